//! # Places Lookup
//!
//! A thin client for a Google-Places-shaped service with two endpoints:
//!
//! - **autocomplete**: text → list of [`Prediction`]s
//! - **details**: place id → [`PlaceDetails`]
//!
//! The client never touches the network itself; it goes through a
//! [`PlacesTransport`] (production: [`HttpTransport`]). There is no caching,
//! no retry and no rate limiting. Each call is one request.
//!
//! Responses carry a `status` field. `OK` is success, `ZERO_RESULTS` is an
//! empty autocomplete, `NOT_FOUND`/`ZERO_RESULTS` on details is
//! `PlaceNotFound`, and anything else (`REQUEST_DENIED`, `INVALID_REQUEST`,
//! `OVER_QUERY_LIMIT`, ...) is `LookupFailed`.

use crate::error::{BitesError, Result};
use crate::model::Coordinates;
use serde::Deserialize;
use tracing::{debug, warn};

pub mod suggestions;
pub mod transport;

pub use suggestions::{QueryTicket, Resolution, SuggestionList};
pub use transport::{Endpoint, HttpTransport, PlacesTransport};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prediction {
    pub place_id: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlaceDetails {
    pub latitude: f64,
    pub longitude: f64,
    pub phone_number: Option<String>,
    pub formatted_address: Option<String>,
}

impl PlaceDetails {
    pub fn coordinates(&self) -> Coordinates {
        Coordinates::new(self.latitude, self.longitude)
    }
}

/// Restricts autocomplete to results around a point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocationBias {
    pub location: Coordinates,
    pub radius_m: u32,
}

pub struct PlacesClient<T: PlacesTransport> {
    transport: T,
    api_key: Option<String>,
    types: Option<String>,
}

impl<T: PlacesTransport> PlacesClient<T> {
    pub fn new(transport: T, api_key: Option<String>) -> Self {
        Self {
            transport,
            api_key,
            types: Some("establishment".to_string()),
        }
    }

    /// Autocomplete `types` filter; `None` sends no filter.
    pub fn with_types(mut self, types: Option<String>) -> Self {
        self.types = types.filter(|t| !t.trim().is_empty());
        self
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Suggestions for `query`. A blank query returns nothing without
    /// making a request.
    pub fn autocomplete(&self, query: &str, bias: Option<LocationBias>) -> Result<Vec<Prediction>> {
        if query.trim().is_empty() {
            return Ok(Vec::new());
        }

        let mut params = vec![("input", query.to_string()), ("key", self.key()?)];
        if let Some(types) = &self.types {
            params.push(("types", types.clone()));
        }
        if let Some(bias) = bias {
            params.push(("location", bias.location.to_string()));
            params.push(("radius", bias.radius_m.to_string()));
        }

        let body = self.transport.get(Endpoint::Autocomplete, &params)?;
        let response: AutocompleteResponse = decode(Endpoint::Autocomplete, &body)?;

        match response.status.as_deref().unwrap_or(STATUS_OK) {
            STATUS_OK => {}
            STATUS_ZERO_RESULTS => return Ok(Vec::new()),
            other => return Err(remote_error(Endpoint::Autocomplete, other, response.error_message)),
        }

        let predictions: Vec<Prediction> = response
            .predictions
            .into_iter()
            .map(|p| Prediction {
                place_id: p.place_id,
                description: p.description,
            })
            .collect();
        debug!(count = predictions.len(), "autocomplete results");
        Ok(predictions)
    }

    pub fn get_details(&self, place_id: &str) -> Result<PlaceDetails> {
        let params = [("place_id", place_id.to_string()), ("key", self.key()?)];
        let body = self.transport.get(Endpoint::Details, &params)?;
        let response: DetailsResponse = decode(Endpoint::Details, &body)?;

        match response.status.as_deref().unwrap_or(STATUS_OK) {
            STATUS_OK => {}
            STATUS_NOT_FOUND | STATUS_ZERO_RESULTS => {
                return Err(BitesError::PlaceNotFound(place_id.to_string()))
            }
            other => return Err(remote_error(Endpoint::Details, other, response.error_message)),
        }

        let result = response
            .result
            .ok_or_else(|| BitesError::PlaceNotFound(place_id.to_string()))?;
        let location = result
            .geometry
            .map(|g| g.location)
            .ok_or_else(|| BitesError::lookup(format!("details for {} carry no location", place_id)))?;

        Ok(PlaceDetails {
            latitude: location.lat,
            longitude: location.lng,
            phone_number: result.formatted_phone_number,
            formatted_address: result.formatted_address,
        })
    }

    fn key(&self) -> Result<String> {
        self.api_key.clone().ok_or_else(|| {
            BitesError::lookup("no places API key configured (set BITES_PLACES_API_KEY)")
        })
    }
}

const STATUS_OK: &str = "OK";
const STATUS_ZERO_RESULTS: &str = "ZERO_RESULTS";
const STATUS_NOT_FOUND: &str = "NOT_FOUND";

fn decode<'a, R: Deserialize<'a>>(endpoint: Endpoint, body: &'a str) -> Result<R> {
    serde_json::from_str(body)
        .map_err(|e| BitesError::lookup(format!("{} response is not valid: {}", endpoint, e)))
}

fn remote_error(endpoint: Endpoint, status: &str, message: Option<String>) -> BitesError {
    warn!(%endpoint, status, "places service reported an error");
    match message {
        Some(m) => BitesError::lookup(format!("{} returned {}: {}", endpoint, status, m)),
        None => BitesError::lookup(format!("{} returned {}", endpoint, status)),
    }
}

#[derive(Deserialize)]
struct AutocompleteResponse {
    status: Option<String>,
    #[serde(default)]
    predictions: Vec<WirePrediction>,
    error_message: Option<String>,
}

#[derive(Deserialize)]
struct WirePrediction {
    description: String,
    place_id: String,
}

#[derive(Deserialize)]
struct DetailsResponse {
    status: Option<String>,
    result: Option<WireDetails>,
    error_message: Option<String>,
}

#[derive(Deserialize)]
struct WireDetails {
    geometry: Option<WireGeometry>,
    formatted_phone_number: Option<String>,
    formatted_address: Option<String>,
}

#[derive(Deserialize)]
struct WireGeometry {
    location: WireLatLng,
}

#[derive(Deserialize)]
struct WireLatLng {
    lat: f64,
    lng: f64,
}

#[cfg(any(test, feature = "test_utils"))]
pub mod fake {
    use super::*;
    use std::cell::RefCell;
    use std::collections::HashMap;

    /// A scripted transport: canned bodies or failures per endpoint, and a
    /// log of every request made.
    #[derive(Default)]
    pub struct FakeTransport {
        bodies: RefCell<HashMap<Endpoint, String>>,
        failures: RefCell<HashMap<Endpoint, String>>,
        calls: RefCell<Vec<(Endpoint, Vec<(String, String)>)>>,
    }

    impl FakeTransport {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn respond(self, endpoint: Endpoint, body: &str) -> Self {
            self.bodies.borrow_mut().insert(endpoint, body.to_string());
            self
        }

        pub fn fail(self, endpoint: Endpoint, message: &str) -> Self {
            self.failures
                .borrow_mut()
                .insert(endpoint, message.to_string());
            self
        }

        pub fn call_count(&self) -> usize {
            self.calls.borrow().len()
        }

        /// Value of `name` in the most recent request, if any.
        pub fn last_param(&self, name: &str) -> Option<String> {
            self.calls.borrow().last().and_then(|(_, params)| {
                params
                    .iter()
                    .find(|(k, _)| k == name)
                    .map(|(_, v)| v.clone())
            })
        }
    }

    impl PlacesTransport for FakeTransport {
        fn get(&self, endpoint: Endpoint, params: &[(&str, String)]) -> Result<String> {
            self.calls.borrow_mut().push((
                endpoint,
                params
                    .iter()
                    .map(|(k, v)| (k.to_string(), v.clone()))
                    .collect(),
            ));
            if let Some(message) = self.failures.borrow().get(&endpoint) {
                return Err(BitesError::lookup(message.clone()));
            }
            self.bodies
                .borrow()
                .get(&endpoint)
                .cloned()
                .ok_or_else(|| BitesError::lookup(format!("no canned {} response", endpoint)))
        }
    }

    pub const PIZZA_PREDICTIONS: &str = r#"{
        "status": "OK",
        "predictions": [
            {"description": "Tony's Pizza, Stockton St", "place_id": "pl-tony"},
            {"description": "Pizza Hacker, Cortland Ave", "place_id": "pl-hacker"}
        ]
    }"#;

    pub const TONY_DETAILS: &str = r#"{
        "status": "OK",
        "result": {
            "geometry": {"location": {"lat": 37.8002, "lng": -122.4090}},
            "formatted_phone_number": "(415) 835-9888",
            "formatted_address": "1570 Stockton St, San Francisco, CA"
        }
    }"#;

    pub const NOT_FOUND_DETAILS: &str = r#"{"status": "NOT_FOUND"}"#;
}
