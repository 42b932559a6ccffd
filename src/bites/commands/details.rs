use crate::commands::helpers::require;
use crate::commands::{CmdMessage, CmdResult, RestaurantDetail};
use crate::error::Result;
use crate::places::{PlacesClient, PlacesTransport};
use crate::selector::{ListedRecord, RecordSelector};
use crate::store::records::RecordStore;
use crate::store::KeyValueStore;

/// Show one record. With `refresh`, contact and address are looked up
/// again for records that came from a place; the stored record is never
/// modified and a failed lookup falls back to the stored values.
pub fn run<K: KeyValueStore, T: PlacesTransport>(
    store: &RecordStore<K>,
    places: &PlacesClient<T>,
    selector: &RecordSelector,
    refresh: bool,
) -> Result<CmdResult> {
    let records = store.load_all()?;
    let index = require(selector, &records)?;
    let record = records[index].clone();

    let mut result = CmdResult::default();
    let mut detail = RestaurantDetail {
        contact: record.contact.clone(),
        address: record.address.clone(),
        refreshed: false,
        listed: ListedRecord {
            position: index + 1,
            record,
        },
    };

    if refresh {
        match detail.listed.record.place_id.as_deref() {
            None => result.add_message(CmdMessage::info(
                "Entered by hand; nothing to refresh",
            )),
            Some(place_id) => match places.get_details(place_id) {
                Ok(live) => {
                    // Fields the live result lacks keep their stored value.
                    detail.contact = live.phone_number.or(detail.contact.take());
                    detail.address = live.formatted_address.or(detail.address.take());
                    detail.refreshed = true;
                }
                Err(err) => result.add_message(CmdMessage::warning(format!(
                    "Showing saved details; refresh failed: {}",
                    err
                ))),
            },
        }
    }

    result.detail = Some(detail);
    Ok(result)
}
