//! The add/edit form as plain data.
//!
//! A form is filled from user input (and optionally a picked place), then
//! validated into a [`RestaurantRecord`]. Nothing here touches storage.

use crate::error::{BitesError, Result};
use crate::model::{Coordinates, RestaurantRecord, DEFAULT_LOCATION};
use crate::places::{PlaceDetails, Prediction};

#[derive(Debug, Clone, PartialEq)]
pub struct RestaurantForm {
    pub name: String,
    /// Raw rating input; parsed on submit.
    pub rating: String,
    pub location: Coordinates,
    pub contact: String,
    pub address: String,
    pub place_id: Option<String>,
}

impl Default for RestaurantForm {
    fn default() -> Self {
        Self::at(DEFAULT_LOCATION)
    }
}

impl RestaurantForm {
    /// An empty form whose location starts at `location`.
    pub fn at(location: Coordinates) -> Self {
        Self {
            name: String::new(),
            rating: String::new(),
            location,
            contact: String::new(),
            address: String::new(),
            place_id: None,
        }
    }

    /// Pre-fill for editing an existing record.
    pub fn from_record(record: &RestaurantRecord) -> Self {
        Self {
            name: record.name.clone(),
            rating: record.rating.to_string(),
            location: record.coordinates(),
            contact: record.contact.clone().unwrap_or_default(),
            address: record.address.clone().unwrap_or_default(),
            place_id: record.place_id.clone(),
        }
    }

    /// A picked suggestion names the restaurant.
    pub fn apply_prediction(&mut self, prediction: &Prediction) {
        self.name = prediction.description.clone();
        self.place_id = Some(prediction.place_id.clone());
    }

    /// Merge looked-up details: location always, contact and address
    /// replaced (cleared when the place has none).
    pub fn apply_details(&mut self, details: &PlaceDetails) {
        self.location = details.coordinates();
        self.contact = details.phone_number.clone().unwrap_or_default();
        self.address = details.formatted_address.clone().unwrap_or_default();
    }

    /// Check required fields and parse the rating.
    pub fn validate(&self) -> Result<ValidForm> {
        if self.name.trim().is_empty() || self.rating.trim().is_empty() {
            return Err(BitesError::validation(
                "Please fill out all fields: name and rating are required",
            ));
        }
        let rating: i64 = self.rating.trim().parse().map_err(|_| {
            BitesError::validation(format!(
                "Rating must be a whole number, got '{}'",
                self.rating.trim()
            ))
        })?;
        if !self.location.is_finite() {
            return Err(BitesError::validation(format!(
                "Location must be finite coordinates, got {}",
                self.location
            )));
        }

        Ok(ValidForm {
            name: self.name.trim().to_string(),
            rating,
            location: self.location,
            contact: non_blank(&self.contact),
            address: non_blank(&self.address),
            place_id: self.place_id.clone(),
        })
    }
}

/// A form that passed validation; only this can become a record.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidForm {
    name: String,
    rating: i64,
    location: Coordinates,
    contact: Option<String>,
    address: Option<String>,
    place_id: Option<String>,
}

impl ValidForm {
    pub fn into_record(self, id: impl Into<String>) -> RestaurantRecord {
        RestaurantRecord {
            id: id.into(),
            name: self.name,
            rating: self.rating,
            latitude: self.location.latitude,
            longitude: self.location.longitude,
            contact: self.contact,
            address: self.address,
            place_id: self.place_id,
        }
    }
}

fn non_blank(s: &str) -> Option<String> {
    let trimmed = s.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Field changes supplied for an add or edit. `None` leaves a field as is.
#[derive(Debug, Clone, Default)]
pub struct FormInput {
    pub name: Option<String>,
    pub rating: Option<String>,
    pub location: Option<Coordinates>,
    pub contact: Option<String>,
    pub address: Option<String>,
}

impl FormInput {
    pub fn apply_to(self, form: &mut RestaurantForm) {
        if let Some(name) = self.name {
            form.name = name;
        }
        if let Some(rating) = self.rating {
            form.rating = rating;
        }
        if let Some(location) = self.location {
            form.location = location;
        }
        if let Some(contact) = self.contact {
            form.contact = contact;
        }
        if let Some(address) = self.address {
            form.address = address;
        }
    }
}
