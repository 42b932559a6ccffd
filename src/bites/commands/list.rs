use crate::commands::CmdResult;
use crate::error::Result;
use crate::selector::number_records;
use crate::store::records::RecordStore;
use crate::store::KeyValueStore;

pub fn run<K: KeyValueStore>(store: &RecordStore<K>) -> Result<CmdResult> {
    let records = store.load_all()?;
    Ok(CmdResult::default().with_listed(number_records(records)))
}
