use crate::commands::helpers::require;
use crate::commands::{CmdResult, MapLink};
use crate::error::Result;
use crate::selector::RecordSelector;
use crate::store::records::RecordStore;
use crate::store::KeyValueStore;

/// Map links for the selected records, or for all of them when none are
/// selected.
pub fn run<K: KeyValueStore>(
    store: &RecordStore<K>,
    selectors: &[RecordSelector],
) -> Result<CmdResult> {
    let records = store.load_all()?;

    let chosen: Vec<_> = if selectors.is_empty() {
        records.iter().collect()
    } else {
        selectors
            .iter()
            .map(|s| require(s, &records).map(|i| &records[i]))
            .collect::<Result<Vec<_>>>()?
    };

    let mut result = CmdResult::default();
    result.links = chosen
        .into_iter()
        .map(|r| MapLink {
            label: r.name.clone(),
            url: r.map_link(),
        })
        .collect();
    Ok(result)
}
