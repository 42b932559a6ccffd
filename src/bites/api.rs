//! # API Facade
//!
//! A thin layer over `commands/*.rs` and the single entry point for every
//! client. It turns raw tokens into selectors, fills in configured
//! defaults (home location, search radius) and dispatches. It does no
//! I/O of its own and returns data, never strings for display.
//!
//! `BitesApi<K, T>` is generic over both seams:
//! - Production: `BitesApi<FsKv, HttpTransport>` (see [`open`])
//! - Testing: `BitesApi<MemKv, FakeTransport>`

use crate::commands::{self, config::ConfigAction, map::MapFocus, FormChanges, PlacePick};
use crate::config::BitesConfig;
use crate::error::Result;
use crate::form::RestaurantForm;
use crate::model::Coordinates;
use crate::places::{HttpTransport, LocationBias, PlacesClient, PlacesTransport};
use crate::selector::RecordSelector;
use crate::store::fs::FsKv;
use crate::store::records::RecordStore;
use crate::store::KeyValueStore;
use std::path::{Path, PathBuf};

pub struct BitesApi<K: KeyValueStore, T: PlacesTransport> {
    store: RecordStore<K>,
    places: PlacesClient<T>,
    config: BitesConfig,
    data_dir: PathBuf,
}

/// The production API rooted at `data_dir`, configured from that
/// directory and the environment.
pub fn open(data_dir: &Path) -> Result<BitesApi<FsKv, HttpTransport>> {
    let config = BitesConfig::load(data_dir)?;
    let transport = HttpTransport::new(config.places_base_url.clone(), config.request_timeout())?;
    let places = PlacesClient::new(transport, config.places_api_key.clone())
        .with_types(config.autocomplete_types());
    Ok(BitesApi::new(
        RecordStore::new(FsKv::new(data_dir)),
        places,
        config,
        data_dir,
    ))
}

impl<K: KeyValueStore, T: PlacesTransport> BitesApi<K, T> {
    pub fn new(
        store: RecordStore<K>,
        places: PlacesClient<T>,
        config: BitesConfig,
        data_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            store,
            places,
            config,
            data_dir: data_dir.into(),
        }
    }

    pub fn list(&self) -> Result<commands::CmdResult> {
        commands::list::run(&self.store)
    }

    pub fn seed(&self) -> Result<commands::CmdResult> {
        commands::seed::run(&self.store)
    }

    pub fn clear(&self) -> Result<commands::CmdResult> {
        commands::clear::run(&self.store)
    }

    /// A blank form positioned at the configured home location.
    pub fn new_form(&self) -> RestaurantForm {
        RestaurantForm::at(self.config.default_location())
    }

    pub fn add(&self, changes: FormChanges) -> Result<commands::CmdResult> {
        commands::add::run(&self.store, &self.places, self.new_form(), changes)
    }

    pub fn edit(&self, selector: &str, changes: FormChanges) -> Result<commands::CmdResult> {
        commands::edit::run(
            &self.store,
            &self.places,
            &RecordSelector::new(selector),
            changes,
        )
    }

    pub fn delete<I: AsRef<str>>(&self, selectors: &[I]) -> Result<commands::CmdResult> {
        commands::delete::run(&self.store, &parse_selectors(selectors))
    }

    pub fn details(&self, selector: &str, refresh: bool) -> Result<commands::CmdResult> {
        commands::details::run(
            &self.store,
            &self.places,
            &RecordSelector::new(selector),
            refresh,
        )
    }

    pub fn links<I: AsRef<str>>(&self, selectors: &[I]) -> Result<commands::CmdResult> {
        commands::link::run(&self.store, &parse_selectors(selectors))
    }

    pub fn map(&self, focus: MapFocus) -> Result<commands::CmdResult> {
        commands::map::run(
            &self.store,
            &self.places,
            focus,
            self.config.default_location(),
        )
    }

    pub fn suggest(&self, pick: &PlacePick) -> Result<commands::CmdResult> {
        commands::suggest::run(&self.places, pick)
    }

    pub fn show_pick(&self, pick: &PlacePick) -> Result<commands::CmdResult> {
        commands::suggest::show_pick(&self.places, pick)
    }

    /// A pick for `query`, biased around `near` with the configured radius.
    pub fn pick(&self, query: &str, position: usize, near: Option<Coordinates>) -> PlacePick {
        PlacePick {
            query: query.to_string(),
            position,
            bias: near.map(|location| LocationBias {
                location,
                radius_m: self.config.search_radius_m,
            }),
        }
    }

    pub fn about(&self) -> commands::CmdResult {
        commands::about::run()
    }

    pub fn config(&self, action: ConfigAction) -> Result<commands::CmdResult> {
        commands::config::run(&self.data_dir, action)
    }

    pub fn settings(&self) -> &BitesConfig {
        &self.config
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

fn parse_selectors<I: AsRef<str>>(inputs: &[I]) -> Vec<RecordSelector> {
    inputs
        .iter()
        .map(|s| RecordSelector::new(s.as_ref()))
        .collect()
}
