use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::sample_records;
use crate::store::records::RecordStore;
use crate::store::KeyValueStore;

/// Replace the collection with the three sample restaurants.
pub fn run<K: KeyValueStore>(store: &RecordStore<K>) -> Result<CmdResult> {
    let samples = sample_records();
    store.save_all(&samples)?;

    let mut result = CmdResult::default().with_affected(samples);
    result.add_message(CmdMessage::success("Sample data added!"));
    Ok(result)
}
