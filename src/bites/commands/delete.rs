use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::RestaurantRecord;
use crate::selector::RecordSelector;
use crate::store::records::{delete_by_id, RecordStore};
use crate::store::KeyValueStore;
use tracing::info;

/// Delete every selected record.
///
/// Selectors are resolved against the list as loaded, so `delete 1 2`
/// removes the first two entries rather than the first and third.
/// Unknown selectors are reported and skipped; if nothing matched, nothing
/// is written.
pub fn run<K: KeyValueStore>(
    store: &RecordStore<K>,
    selectors: &[RecordSelector],
) -> Result<CmdResult> {
    let mut snapshot = store.load_snapshot()?;
    let mut result = CmdResult::default();

    let mut targets: Vec<RestaurantRecord> = Vec::new();
    for selector in selectors {
        match selector.resolve(&snapshot.records) {
            Some(record) if !targets.iter().any(|t| t.id == record.id) => {
                targets.push(record.clone());
            }
            Some(_) => {}
            None => result.add_message(CmdMessage::warning(format!(
                "No restaurant matches '{}'",
                selector
            ))),
        }
    }

    if targets.is_empty() {
        return Ok(result);
    }

    for target in &targets {
        delete_by_id(&mut snapshot.records, &target.id);
    }
    store.save_if_unchanged(&snapshot.records, &snapshot.revision)?;

    for target in &targets {
        info!(id = %target.id, "deleted restaurant");
        result.add_message(CmdMessage::success(format!("Deleted: {}", target.name)));
    }
    Ok(result.with_affected(targets))
}
