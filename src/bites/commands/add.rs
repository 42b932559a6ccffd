use crate::commands::helpers::{apply_changes, next_id};
use crate::commands::{CmdMessage, CmdResult, FormChanges};
use crate::error::Result;
use crate::form::RestaurantForm;
use crate::places::{PlacesClient, PlacesTransport};
use crate::store::records::RecordStore;
use crate::store::KeyValueStore;
use tracing::info;

/// Fill `form` with `changes`, validate it and append the new record.
///
/// Validation happens before any storage access, so an invalid form
/// leaves the collection untouched.
pub fn run<K: KeyValueStore, T: PlacesTransport>(
    store: &RecordStore<K>,
    places: &PlacesClient<T>,
    mut form: RestaurantForm,
    changes: FormChanges,
) -> Result<CmdResult> {
    let messages = apply_changes(places, &mut form, changes)?;
    let valid = form.validate()?;

    let mut snapshot = store.load_snapshot()?;
    let record = valid.into_record(next_id(&snapshot.records));
    snapshot.records.push(record.clone());
    store.save_if_unchanged(&snapshot.records, &snapshot.revision)?;
    info!(id = %record.id, name = %record.name, "added restaurant");

    let mut result = CmdResult::default();
    result.messages = messages;
    result.add_message(CmdMessage::success(format!(
        "Restaurant added: {}",
        record.name
    )));
    Ok(result.with_affected(vec![record]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BitesError;
    use crate::form::FormInput;
    use crate::model::Coordinates;
    use crate::places::fake::{FakeTransport, NOT_FOUND_DETAILS, PIZZA_PREDICTIONS, TONY_DETAILS};
    use crate::commands::PlacePick;
    use crate::places::Endpoint;
    use crate::store::memory::fixtures::StoreFixture;

    fn offline() -> PlacesClient<FakeTransport> {
        PlacesClient::new(FakeTransport::new(), None)
    }

    fn typed(name: &str, rating: &str) -> FormChanges {
        FormChanges {
            pick: None,
            input: FormInput {
                name: Some(name.into()),
                rating: Some(rating.into()),
                ..Default::default()
            },
        }
    }

    #[test]
    fn appends_record() {
        let fixture = StoreFixture::new().with_samples();
        let result = run(
            &fixture.store,
            &offline(),
            RestaurantForm::default(),
            typed("Taqueria Cancun", "4"),
        )
        .unwrap();

        let records = fixture.store.load_all().unwrap();
        assert_eq!(records.len(), 4);
        assert_eq!(records[3].name, "Taqueria Cancun");
        assert_eq!(records[3].coordinates(), Coordinates::new(37.7749, -122.4194));
        assert_eq!(result.affected[0].id, records[3].id);
        assert!(records[3].added_at().is_some());
    }

    #[test]
    fn invalid_form_writes_nothing() {
        let fixture = StoreFixture::new().with_samples();
        let before = fixture.store.load_snapshot().unwrap().revision;

        let err = run(
            &fixture.store,
            &offline(),
            RestaurantForm::default(),
            typed("", "4"),
        )
        .unwrap_err();

        assert!(matches!(err, BitesError::Validation(_)));
        assert_eq!(fixture.store.load_snapshot().unwrap().revision, before);
    }

    #[test]
    fn non_finite_location_is_rejected_and_store_stays_readable() {
        let fixture = StoreFixture::new().with_samples();
        let mut changes = typed("Nowhere Cafe", "4");
        changes.input.location = Some(Coordinates::new(f64::NAN, 1.0));

        let err = run(&fixture.store, &offline(), RestaurantForm::default(), changes).unwrap_err();

        assert!(matches!(err, BitesError::Validation(_)));
        assert_eq!(fixture.store.load_all().unwrap().len(), 3);
    }

    #[test]
    fn ids_stay_unique_for_rapid_adds() {
        let fixture = StoreFixture::new();
        for i in 0..5 {
            run(
                &fixture.store,
                &offline(),
                RestaurantForm::default(),
                typed(&format!("Spot {}", i), "3"),
            )
            .unwrap();
        }
        let mut ids: Vec<_> = fixture
            .store
            .load_all()
            .unwrap()
            .into_iter()
            .map(|r| r.id)
            .collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 5);
    }

    #[test]
    fn pick_fills_from_place_details() {
        let fixture = StoreFixture::new();
        let places = PlacesClient::new(
            FakeTransport::new()
                .respond(Endpoint::Autocomplete, PIZZA_PREDICTIONS)
                .respond(Endpoint::Details, TONY_DETAILS),
            Some("k".into()),
        );
        let changes = FormChanges {
            pick: Some(PlacePick {
                query: "pizza".into(),
                position: 1,
                bias: None,
            }),
            input: FormInput {
                rating: Some("5".into()),
                ..Default::default()
            },
        };

        run(&fixture.store, &places, RestaurantForm::default(), changes).unwrap();

        let record = &fixture.store.load_all().unwrap()[0];
        assert_eq!(record.name, "Tony's Pizza, Stockton St");
        assert_eq!(record.place_id.as_deref(), Some("pl-tony"));
        assert_eq!(record.contact.as_deref(), Some("(415) 835-9888"));
        assert_eq!(record.coordinates(), Coordinates::new(37.8002, -122.4090));
    }

    #[test]
    fn details_failure_keeps_picked_name() {
        let fixture = StoreFixture::new();
        let places = PlacesClient::new(
            FakeTransport::new()
                .respond(Endpoint::Autocomplete, PIZZA_PREDICTIONS)
                .respond(Endpoint::Details, NOT_FOUND_DETAILS),
            Some("k".into()),
        );
        let changes = FormChanges {
            pick: Some(PlacePick {
                query: "pizza".into(),
                position: 2,
                bias: None,
            }),
            input: FormInput {
                rating: Some("4".into()),
                ..Default::default()
            },
        };

        let result = run(&fixture.store, &places, RestaurantForm::default(), changes).unwrap();

        let record = &fixture.store.load_all().unwrap()[0];
        assert_eq!(record.name, "Pizza Hacker, Cortland Ave");
        assert_eq!(record.contact, None);
        assert!(result
            .messages
            .iter()
            .any(|m| m.level == crate::commands::MessageLevel::Warning));
    }

    #[test]
    fn pick_out_of_range_is_rejected() {
        let fixture = StoreFixture::new();
        let places = PlacesClient::new(
            FakeTransport::new().respond(Endpoint::Autocomplete, PIZZA_PREDICTIONS),
            Some("k".into()),
        );
        let changes = FormChanges {
            pick: Some(PlacePick {
                query: "pizza".into(),
                position: 3,
                bias: None,
            }),
            input: FormInput::default(),
        };
        let err = run(&fixture.store, &places, RestaurantForm::default(), changes).unwrap_err();
        assert!(matches!(err, BitesError::Validation(_)));
        assert!(fixture.store.load_all().unwrap().is_empty());
    }
}
