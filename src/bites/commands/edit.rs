use crate::commands::helpers::{apply_changes, require};
use crate::commands::{CmdMessage, CmdResult, FormChanges};
use crate::error::{BitesError, Result};
use crate::form::RestaurantForm;
use crate::places::{PlacesClient, PlacesTransport};
use crate::selector::RecordSelector;
use crate::store::records::{update_by_id, RecordStore};
use crate::store::KeyValueStore;
use tracing::info;

/// Edit one record in place. Its id and position never change.
pub fn run<K: KeyValueStore, T: PlacesTransport>(
    store: &RecordStore<K>,
    places: &PlacesClient<T>,
    selector: &RecordSelector,
    changes: FormChanges,
) -> Result<CmdResult> {
    let mut snapshot = store.load_snapshot()?;
    let index = require(selector, &snapshot.records)?;
    let original = snapshot.records[index].clone();

    let mut form = RestaurantForm::from_record(&original);
    let messages = apply_changes(places, &mut form, changes)?;
    let updated = form.validate()?.into_record(original.id.clone());

    if updated == original {
        let mut result = CmdResult::default().with_affected(vec![original]);
        result.messages = messages;
        result.add_message(CmdMessage::info("Nothing to change"));
        return Ok(result);
    }

    if !update_by_id(&mut snapshot.records, &original.id, updated.clone()) {
        return Err(BitesError::RecordNotFound(original.id));
    }
    store.save_if_unchanged(&snapshot.records, &snapshot.revision)?;
    info!(id = %updated.id, "updated restaurant");

    let mut result = CmdResult::default().with_affected(vec![updated.clone()]);
    result.messages = messages;
    result.add_message(CmdMessage::success(format!(
        "Restaurant updated: {}",
        updated.name
    )));
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::FormInput;
    use crate::places::fake::FakeTransport;
    use crate::store::memory::fixtures::StoreFixture;

    fn offline() -> PlacesClient<FakeTransport> {
        PlacesClient::new(FakeTransport::new(), None)
    }

    fn input(input: FormInput) -> FormChanges {
        FormChanges { pick: None, input }
    }

    #[test]
    fn updates_in_place() {
        let fixture = StoreFixture::new().with_samples();
        run(
            &fixture.store,
            &offline(),
            &RecordSelector::new("2"),
            input(FormInput {
                rating: Some("5".into()),
                ..Default::default()
            }),
        )
        .unwrap();

        let records = fixture.store.load_all().unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(records[1].id, "2");
        assert_eq!(records[1].name, "Sushi World");
        assert_eq!(records[1].rating, 5);
        assert_eq!(records[0].rating, 5);
        assert_eq!(records[2].rating, 3);
    }

    #[test]
    fn clearing_contact_stores_none() {
        let fixture = StoreFixture::new().with_samples();
        run(
            &fixture.store,
            &offline(),
            &RecordSelector::new("1"),
            input(FormInput {
                contact: Some("  ".into()),
                ..Default::default()
            }),
        )
        .unwrap();
        assert_eq!(fixture.store.load_all().unwrap()[0].contact, None);
    }

    #[test]
    fn missing_record_is_not_found() {
        let fixture = StoreFixture::new().with_samples();
        let err = run(
            &fixture.store,
            &offline(),
            &RecordSelector::new("42"),
            FormChanges::default(),
        )
        .unwrap_err();
        assert!(matches!(err, BitesError::RecordNotFound(_)));
    }

    #[test]
    fn blanking_name_is_rejected() {
        let fixture = StoreFixture::new().with_samples();
        let err = run(
            &fixture.store,
            &offline(),
            &RecordSelector::new("1"),
            input(FormInput {
                name: Some("".into()),
                ..Default::default()
            }),
        )
        .unwrap_err();
        assert!(matches!(err, BitesError::Validation(_)));
        assert_eq!(fixture.store.load_all().unwrap()[0].name, "The Italian Place");
    }

    #[test]
    fn unchanged_edit_skips_write() {
        let fixture = StoreFixture::new().with_samples();
        fixture.store.kv().set_simulate_write_error(true);
        let result = run(
            &fixture.store,
            &offline(),
            &RecordSelector::new("3"),
            FormChanges::default(),
        )
        .unwrap();
        assert_eq!(result.affected[0].name, "Burger Haven");
    }
}
