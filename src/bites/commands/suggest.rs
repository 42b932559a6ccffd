use crate::commands::helpers::{pick_place, suggestions};
use crate::commands::{CmdMessage, CmdResult, PlacePick};
use crate::error::Result;
use crate::places::{PlacesClient, PlacesTransport, SuggestionList};

/// Autocomplete suggestions for `query`.
///
/// A failed lookup is reported as a warning with an empty list, the same
/// way the form's suggestion box just goes blank.
pub fn run<T: PlacesTransport>(places: &PlacesClient<T>, pick: &PlacePick) -> Result<CmdResult> {
    let mut list = SuggestionList::new();
    let mut result = CmdResult::default();

    if let Some(err) = suggestions(places, &mut list, pick) {
        result.add_message(CmdMessage::warning(format!("No suggestions: {}", err)));
    }
    result.predictions = list.items().to_vec();
    Ok(result)
}

/// Suggestions for `pick.query`, then details for the `pick.position`-th one.
pub fn show_pick<T: PlacesTransport>(
    places: &PlacesClient<T>,
    pick: &PlacePick,
) -> Result<CmdResult> {
    let (prediction, details) = pick_place(places, pick)?;
    let mut result = CmdResult::default();
    result.place = Some(details?);
    result.predictions = vec![prediction];
    Ok(result)
}
