use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// A saved restaurant.
///
/// Serialized as one JSON object inside the `@restaurants` array. `contact`
/// and `address` round-trip exactly as stored: missing or `null` loads as
/// `None`, an empty string stays `Some("")`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RestaurantRecord {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub name: String,
    pub rating: i64,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub contact: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub place_id: Option<String>,
}

impl RestaurantRecord {
    pub fn new(id: impl Into<String>, name: impl Into<String>, rating: i64, at: Coordinates) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            rating,
            latitude: at.latitude,
            longitude: at.longitude,
            contact: None,
            address: None,
            place_id: None,
        }
    }

    pub fn coordinates(&self) -> Coordinates {
        Coordinates::new(self.latitude, self.longitude)
    }

    /// Creation time, when the id is a millisecond timestamp.
    ///
    /// Seeded records use short ids like `"1"`; anything before 2001 is
    /// treated as not a timestamp.
    pub fn added_at(&self) -> Option<DateTime<Utc>> {
        const MIN_PLAUSIBLE_MS: i64 = 978_307_200_000;
        let millis: i64 = self.id.parse().ok()?;
        if millis < MIN_PLAUSIBLE_MS {
            return None;
        }
        Utc.timestamp_millis_opt(millis).single()
    }

    pub fn map_link(&self) -> String {
        self.coordinates().map_link()
    }
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Id {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match Id::deserialize(deserializer)? {
        Id::Text(s) => s,
        Id::Number(n) => n.to_string(),
    })
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Both values are real numbers. NaN and infinities serialize as
    /// `null` and could not be read back.
    pub fn is_finite(&self) -> bool {
        self.latitude.is_finite() && self.longitude.is_finite()
    }

    /// A Google Maps search link that opens on this point.
    pub fn map_link(&self) -> String {
        format!(
            "https://www.google.com/maps/search/?api=1&query={},{}",
            self.latitude, self.longitude
        )
    }
}

impl std::fmt::Display for Coordinates {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{},{}", self.latitude, self.longitude)
    }
}

impl std::str::FromStr for Coordinates {
    type Err = String;

    /// Parses `"lat,lng"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (lat, lng) = s
            .split_once(',')
            .ok_or_else(|| format!("Expected LAT,LNG but got '{}'", s))?;
        let latitude = lat
            .trim()
            .parse()
            .map_err(|_| format!("Invalid latitude: '{}'", lat.trim()))?;
        let longitude = lng
            .trim()
            .parse()
            .map_err(|_| format!("Invalid longitude: '{}'", lng.trim()))?;
        let coordinates = Self::new(latitude, longitude);
        if !coordinates.is_finite() {
            return Err(format!("Coordinates must be finite numbers, got '{}'", s.trim()));
        }
        Ok(coordinates)
    }
}

/// San Francisco, where the map opens when nothing else is known.
pub const DEFAULT_LOCATION: Coordinates = Coordinates::new(37.7749, -122.4194);

/// The sample collection written by `seed`.
pub fn sample_records() -> Vec<RestaurantRecord> {
    let sample = |id: &str, name: &str, rating, lat, lng, address: &str, contact: &str| {
        RestaurantRecord {
            address: Some(address.to_string()),
            contact: Some(contact.to_string()),
            ..RestaurantRecord::new(id, name, rating, Coordinates::new(lat, lng))
        }
    };

    vec![
        sample(
            "1",
            "The Italian Place",
            5,
            37.7749,
            -122.4194,
            "123 Italian St, San Francisco, CA",
            "(123) 456-7890",
        ),
        sample(
            "2",
            "Sushi World",
            4,
            37.7849,
            -122.4094,
            "456 Sushi Ave, San Francisco, CA",
            "(987) 654-3210",
        ),
        sample(
            "3",
            "Burger Haven",
            3,
            37.7949,
            -122.4294,
            "789 Burger Blvd, San Francisco, CA",
            "(555) 555-5555",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_without_place_id_when_absent() {
        let record = RestaurantRecord::new("1", "A", 5, Coordinates::new(0.0, 0.0));
        let json = serde_json::to_value(&record).unwrap();
        let keys: Vec<_> = json.as_object().unwrap().keys().cloned().collect();
        assert_eq!(
            keys.len(),
            7,
            "expected the seven persisted fields, got {:?}",
            keys
        );
        assert!(json.get("place_id").is_none());
        assert!(json["contact"].is_null());
    }

    #[test]
    fn loads_records_missing_optional_fields() {
        let json = r#"[{"id":"1","name":"A","rating":5,"latitude":0,"longitude":0}]"#;
        let records: Vec<RestaurantRecord> = serde_json::from_str(json).unwrap();
        assert_eq!(records[0].contact, None);
        assert_eq!(records[0].address, None);
    }

    #[test]
    fn keeps_empty_strings_as_written() {
        let json = r#"{"id":"1","name":"A","rating":5,"latitude":0,"longitude":0,"contact":"","address":""}"#;
        let record: RestaurantRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.contact.as_deref(), Some(""));
    }

    #[test]
    fn accepts_numeric_ids() {
        let json = r#"{"id":1700000000000,"name":"A","rating":5,"latitude":0,"longitude":0}"#;
        let record: RestaurantRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.id, "1700000000000");
    }

    #[test]
    fn added_at_reads_millisecond_ids() {
        let record = RestaurantRecord::new("1700000000000", "A", 5, DEFAULT_LOCATION);
        let added = record.added_at().unwrap();
        assert_eq!(added.timestamp(), 1_700_000_000);

        let seeded = RestaurantRecord::new("2", "B", 4, DEFAULT_LOCATION);
        assert!(seeded.added_at().is_none());
    }

    #[test]
    fn map_link_uses_coordinates() {
        let record = RestaurantRecord::new("1", "A", 5, Coordinates::new(37.7749, -122.4194));
        assert_eq!(
            record.map_link(),
            "https://www.google.com/maps/search/?api=1&query=37.7749,-122.4194"
        );
    }

    #[test]
    fn parses_coordinates() {
        let c: Coordinates = "37.5, -122.25".parse().unwrap();
        assert_eq!(c, Coordinates::new(37.5, -122.25));
        assert!("37.5".parse::<Coordinates>().is_err());
        assert!("north,-1".parse::<Coordinates>().is_err());
    }

    #[test]
    fn rejects_non_finite_coordinates() {
        for raw in ["NaN,1", "inf,0", "0,-inf", "1,NaN"] {
            assert!(raw.parse::<Coordinates>().is_err(), "{} parsed", raw);
        }
        assert!(!Coordinates::new(f64::NAN, 0.0).is_finite());
        assert!(DEFAULT_LOCATION.is_finite());
    }

    #[test]
    fn sample_ids_are_unique() {
        let records = sample_records();
        let mut ids: Vec<_> = records.iter().map(|r| r.id.as_str()).collect();
        ids.dedup();
        assert_eq!(ids, vec!["1", "2", "3"]);
    }
}
