use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::records::RecordStore;
use crate::store::KeyValueStore;

pub fn run<K: KeyValueStore>(store: &RecordStore<K>) -> Result<CmdResult> {
    store.clear()?;
    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success("All data cleared!"));
    Ok(result)
}
