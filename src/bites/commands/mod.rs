//! # Command Layer
//!
//! One module per screen action. Commands take a store (and a places
//! client where they need one), do the work, and return a [`CmdResult`].
//! They never print, never prompt and never exit; that is the client's job.
//!
//! Every mutation is read-modify-write against the single collection key.
//! The read's revision travels with the write (`save_if_unchanged`) so a
//! concurrent writer turns into a `Conflict` instead of a lost update.

use crate::config::BitesConfig;
use crate::model::{Coordinates, RestaurantRecord};
use crate::places::{LocationBias, PlaceDetails, Prediction};
use crate::selector::ListedRecord;

pub mod about;
pub mod add;
pub mod clear;
pub mod config;
pub mod delete;
pub mod details;
pub mod edit;
pub mod helpers;
pub mod link;
pub mod list;
pub mod map;
pub mod seed;
pub mod suggest;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

/// One record as shown on the details screen.
#[derive(Debug, Clone)]
pub struct RestaurantDetail {
    pub listed: ListedRecord,
    /// Contact and address to show; refreshed from the places service when
    /// that was requested and succeeded.
    pub contact: Option<String>,
    pub address: Option<String>,
    pub refreshed: bool,
}

/// A labelled point the map is centred on.
#[derive(Debug, Clone, PartialEq)]
pub struct FocusPoint {
    pub label: String,
    pub coordinates: Coordinates,
}

#[derive(Debug, Clone)]
pub struct MapView {
    pub markers: Vec<ListedRecord>,
    pub focus: Option<FocusPoint>,
    pub center: Coordinates,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MapLink {
    pub label: String,
    pub url: String,
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub affected: Vec<RestaurantRecord>,
    pub listed: Vec<ListedRecord>,
    pub predictions: Vec<Prediction>,
    pub place: Option<PlaceDetails>,
    pub detail: Option<RestaurantDetail>,
    pub map: Option<MapView>,
    pub links: Vec<MapLink>,
    pub config: Option<BitesConfig>,
    pub text: Option<String>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_affected(mut self, records: Vec<RestaurantRecord>) -> Self {
        self.affected = records;
        self
    }

    pub fn with_listed(mut self, records: Vec<ListedRecord>) -> Self {
        self.listed = records;
        self
    }

    pub fn with_config(mut self, config: BitesConfig) -> Self {
        self.config = Some(config);
        self
    }
}

/// "Fill the form from the N-th suggestion for this query."
#[derive(Debug, Clone)]
pub struct PlacePick {
    pub query: String,
    /// 1-based position in the suggestion list.
    pub position: usize,
    pub bias: Option<LocationBias>,
}

/// Everything an add or edit submission can change.
#[derive(Debug, Clone, Default)]
pub struct FormChanges {
    pub pick: Option<PlacePick>,
    pub input: crate::form::FormInput,
}
