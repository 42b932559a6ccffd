use crate::commands::{CmdMessage, FormChanges, PlacePick};
use crate::error::{BitesError, Result};
use crate::form::RestaurantForm;
use crate::model::RestaurantRecord;
use crate::places::{PlaceDetails, PlacesClient, PlacesTransport, Prediction, Resolution, SuggestionList};
use crate::selector::RecordSelector;
use chrono::Utc;

/// Position of the record named by `selector`, or `RecordNotFound`.
pub fn require(selector: &RecordSelector, records: &[RestaurantRecord]) -> Result<usize> {
    selector
        .locate(records)
        .ok_or_else(|| BitesError::RecordNotFound(selector.to_string()))
}

/// A fresh id: the current time in milliseconds, bumped past any id
/// already in use.
pub fn next_id(records: &[RestaurantRecord]) -> String {
    next_id_from(records, Utc::now().timestamp_millis())
}

pub fn next_id_from(records: &[RestaurantRecord], now_ms: i64) -> String {
    let mut candidate = now_ms;
    while records.iter().any(|r| r.id == candidate.to_string()) {
        candidate += 1;
    }
    candidate.to_string()
}

/// Run one autocomplete through a [`SuggestionList`].
///
/// Failures degrade to an empty list; the error comes back alongside so
/// the caller can show it.
pub fn suggestions<T: PlacesTransport>(
    places: &PlacesClient<T>,
    list: &mut SuggestionList,
    pick: &PlacePick,
) -> Option<BitesError> {
    let ticket = list.begin(&pick.query);
    match list.resolve(ticket, places.autocomplete(&pick.query, pick.bias)) {
        Resolution::Failed(err) => Some(err),
        Resolution::Applied(_) | Resolution::Discarded => None,
    }
}

/// Resolve a pick to a prediction and its details.
///
/// No matching suggestion is an error (there is nothing to fill in). A
/// details failure is not: the prediction still names the place.
pub fn pick_place<T: PlacesTransport>(
    places: &PlacesClient<T>,
    pick: &PlacePick,
) -> Result<(Prediction, std::result::Result<PlaceDetails, BitesError>)> {
    let mut list = SuggestionList::new();
    if let Some(err) = suggestions(places, &mut list, pick) {
        return Err(err);
    }
    let count = list.items().len();
    let prediction = list.select(pick.position).ok_or_else(|| {
        BitesError::validation(format!(
            "No suggestion #{} for '{}' ({} found)",
            pick.position, pick.query, count
        ))
    })?;
    let details = places.get_details(&prediction.place_id);
    Ok((prediction, details))
}

/// Apply a submission's changes to `form`: the picked place first, then
/// explicit field input on top.
pub fn apply_changes<T: PlacesTransport>(
    places: &PlacesClient<T>,
    form: &mut RestaurantForm,
    changes: FormChanges,
) -> Result<Vec<CmdMessage>> {
    let mut messages = Vec::new();

    if let Some(pick) = &changes.pick {
        let (prediction, details) = pick_place(places, pick)?;
        form.apply_prediction(&prediction);
        match details {
            Ok(details) => {
                form.apply_details(&details);
                messages.push(CmdMessage::info(format!(
                    "Filled from place: {}",
                    prediction.description
                )));
            }
            Err(err) => {
                messages.push(CmdMessage::warning(format!(
                    "Could not load details for {}: {}",
                    prediction.description, err
                )));
            }
        }
    }

    changes.input.apply_to(form);
    Ok(messages)
}
