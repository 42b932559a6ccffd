use crate::commands::helpers::{pick_place, require};
use crate::commands::{CmdMessage, CmdResult, FocusPoint, MapLink, MapView, PlacePick};
use crate::error::Result;
use crate::model::Coordinates;
use crate::places::{PlacesClient, PlacesTransport};
use crate::selector::{number_records, RecordSelector};
use crate::store::records::RecordStore;
use crate::store::KeyValueStore;

/// What the map should centre on.
#[derive(Debug, Clone, Default)]
pub enum MapFocus {
    /// The configured default location.
    #[default]
    Home,
    Record(RecordSelector),
    Point(Coordinates),
    /// A searched place: its details supply the point.
    Search(PlacePick),
}

/// One marker per saved record, plus the focus point.
///
/// A search that fails leaves the map on `home` with a warning; the
/// markers are still shown.
pub fn run<K: KeyValueStore, T: PlacesTransport>(
    store: &RecordStore<K>,
    places: &PlacesClient<T>,
    focus: MapFocus,
    home: Coordinates,
) -> Result<CmdResult> {
    let records = store.load_all()?;
    let mut result = CmdResult::default();

    let focus = match focus {
        MapFocus::Home => None,
        MapFocus::Point(coordinates) => Some(FocusPoint {
            label: coordinates.to_string(),
            coordinates,
        }),
        MapFocus::Record(selector) => {
            let record = &records[require(&selector, &records)?];
            Some(FocusPoint {
                label: record.name.clone(),
                coordinates: record.coordinates(),
            })
        }
        MapFocus::Search(pick) => match pick_place(places, &pick) {
            Ok((prediction, Ok(details))) => Some(FocusPoint {
                label: prediction.description,
                coordinates: details.coordinates(),
            }),
            Ok((prediction, Err(err))) => {
                result.add_message(CmdMessage::warning(format!(
                    "Could not locate {}: {}",
                    prediction.description, err
                )));
                None
            }
            Err(err) => {
                result.add_message(CmdMessage::warning(format!("Search failed: {}", err)));
                None
            }
        },
    };

    let center = focus.as_ref().map(|f| f.coordinates).unwrap_or(home);
    result.links = records
        .iter()
        .map(|r| MapLink {
            label: r.name.clone(),
            url: r.map_link(),
        })
        .collect();
    if let Some(point) = &focus {
        result.links.insert(
            0,
            MapLink {
                label: point.label.clone(),
                url: point.coordinates.map_link(),
            },
        );
    }
    result.map = Some(MapView {
        markers: number_records(records),
        focus,
        center,
    });
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BitesError;
    use crate::model::DEFAULT_LOCATION;
    use crate::places::fake::{FakeTransport, PIZZA_PREDICTIONS, TONY_DETAILS};
    use crate::places::Endpoint;
    use crate::store::memory::fixtures::StoreFixture;

    fn offline() -> PlacesClient<FakeTransport> {
        PlacesClient::new(FakeTransport::new(), None)
    }

    #[test]
    fn markers_for_every_record() {
        let fixture = StoreFixture::new().with_samples();
        let result = run(&fixture.store, &offline(), MapFocus::Home, DEFAULT_LOCATION).unwrap();
        let map = result.map.unwrap();
        assert_eq!(map.markers.len(), 3);
        assert_eq!(map.center, DEFAULT_LOCATION);
        assert!(map.focus.is_none());
        assert_eq!(result.links.len(), 3);
    }

    #[test]
    fn focus_on_record() {
        let fixture = StoreFixture::new().with_record("7", "Dumpling Time", 5);
        let result = run(
            &fixture.store,
            &offline(),
            MapFocus::Record(RecordSelector::new("7")),
            DEFAULT_LOCATION,
        )
        .unwrap();
        let map = result.map.unwrap();
        assert_eq!(map.center, Coordinates::new(1.0, 2.0));
        assert_eq!(map.focus.unwrap().label, "Dumpling Time");
    }

    #[test]
    fn focus_on_unknown_record_fails() {
        let fixture = StoreFixture::new();
        assert!(matches!(
            run(
                &fixture.store,
                &offline(),
                MapFocus::Record(RecordSelector::new("1")),
                DEFAULT_LOCATION
            ),
            Err(BitesError::RecordNotFound(_))
        ));
    }

    #[test]
    fn focus_on_searched_place() {
        let fixture = StoreFixture::new().with_samples();
        let places = PlacesClient::new(
            FakeTransport::new()
                .respond(Endpoint::Autocomplete, PIZZA_PREDICTIONS)
                .respond(Endpoint::Details, TONY_DETAILS),
            Some("k".into()),
        );
        let pick = PlacePick {
            query: "pizza".into(),
            position: 1,
            bias: None,
        };
        let result = run(&fixture.store, &places, MapFocus::Search(pick), DEFAULT_LOCATION).unwrap();
        let map = result.map.unwrap();
        assert_eq!(map.center, Coordinates::new(37.8002, -122.4090));
        assert_eq!(result.links.len(), 4);
        assert_eq!(result.links[0].label, "Tony's Pizza, Stockton St");
    }

    #[test]
    fn failed_search_keeps_markers() {
        let fixture = StoreFixture::new().with_samples();
        let places = PlacesClient::new(
            FakeTransport::new().fail(Endpoint::Autocomplete, "offline"),
            Some("k".into()),
        );
        let pick = PlacePick {
            query: "pizza".into(),
            position: 1,
            bias: None,
        };
        let result = run(&fixture.store, &places, MapFocus::Search(pick), DEFAULT_LOCATION).unwrap();
        let map = result.map.unwrap();
        assert_eq!(map.markers.len(), 3);
        assert_eq!(map.center, DEFAULT_LOCATION);
        assert_eq!(result.messages.len(), 1);
    }
}
