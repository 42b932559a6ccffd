//! Suggestion-list state for a text field backed by autocomplete.
//!
//! Every query takes a [`QueryTicket`]. Results are applied only if their
//! ticket is still the latest one, so a slow response for "piz" can never
//! overwrite the list for "pizza", and nothing lands after the list was
//! closed. A failed lookup empties the list and marks it stale rather than
//! leaving the previous query's suggestions on screen.

use super::Prediction;
use crate::error::{BitesError, Result};
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryTicket {
    generation: u64,
}

#[derive(Debug)]
pub enum Resolution {
    /// Results replaced the list; holds the new length.
    Applied(usize),
    /// A newer query or a close superseded this ticket.
    Discarded,
    /// The lookup failed; the list is now empty and stale.
    Failed(BitesError),
}

#[derive(Debug, Default)]
pub struct SuggestionList {
    generation: u64,
    query: String,
    items: Vec<Prediction>,
    stale: bool,
}

impl SuggestionList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a query for `text`. A blank query clears the list immediately.
    pub fn begin(&mut self, text: &str) -> QueryTicket {
        self.generation += 1;
        self.query = text.to_string();
        if text.trim().is_empty() {
            self.items.clear();
            self.stale = false;
        }
        QueryTicket {
            generation: self.generation,
        }
    }

    pub fn is_current(&self, ticket: &QueryTicket) -> bool {
        ticket.generation == self.generation
    }

    pub fn resolve(&mut self, ticket: QueryTicket, result: Result<Vec<Prediction>>) -> Resolution {
        if !self.is_current(&ticket) {
            debug!(
                ticket = ticket.generation,
                current = self.generation,
                "discarding superseded suggestions"
            );
            return Resolution::Discarded;
        }

        match result {
            Ok(items) => {
                self.items = items;
                self.stale = false;
                Resolution::Applied(self.items.len())
            }
            Err(err) => {
                warn!(query = %self.query, error = %err, "suggestion lookup failed");
                self.items.clear();
                self.stale = true;
                Resolution::Failed(err)
            }
        }
    }

    /// Take the suggestion at 1-based `position` and close the list.
    pub fn select(&mut self, position: usize) -> Option<Prediction> {
        let picked = position
            .checked_sub(1)
            .and_then(|i| self.items.get(i))
            .cloned();
        if picked.is_some() {
            self.close();
        }
        picked
    }

    /// Empty the list and invalidate every outstanding ticket.
    pub fn close(&mut self) {
        self.generation += 1;
        self.items.clear();
        self.stale = false;
    }

    pub fn items(&self) -> &[Prediction] {
        &self.items
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn is_stale(&self) -> bool {
        self.stale
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prediction(id: &str) -> Prediction {
        Prediction {
            place_id: id.to_string(),
            description: format!("Place {}", id),
        }
    }

    #[test]
    fn applies_current_results() {
        let mut list = SuggestionList::new();
        let ticket = list.begin("piz");
        let res = list.resolve(ticket, Ok(vec![prediction("a")]));
        assert!(matches!(res, Resolution::Applied(1)));
        assert_eq!(list.items().len(), 1);
    }

    #[test]
    fn discards_superseded_results() {
        let mut list = SuggestionList::new();
        let old = list.begin("piz");
        let new = list.begin("pizza");

        list.resolve(new, Ok(vec![prediction("new")]));
        let res = list.resolve(old, Ok(vec![prediction("old")]));

        assert!(matches!(res, Resolution::Discarded));
        assert_eq!(list.items()[0].place_id, "new");
    }

    #[test]
    fn discards_results_after_close() {
        let mut list = SuggestionList::new();
        let ticket = list.begin("piz");
        list.close();
        assert!(matches!(
            list.resolve(ticket, Ok(vec![prediction("a")])),
            Resolution::Discarded
        ));
        assert!(list.items().is_empty());
    }

    #[test]
    fn failure_clears_and_marks_stale() {
        let mut list = SuggestionList::new();
        let first = list.begin("piz");
        list.resolve(first, Ok(vec![prediction("a")]));

        let second = list.begin("pizz");
        let res = list.resolve(second, Err(BitesError::lookup("offline")));

        assert!(matches!(res, Resolution::Failed(_)));
        assert!(list.items().is_empty());
        assert!(list.is_stale());
    }

    #[test]
    fn blank_query_clears_immediately() {
        let mut list = SuggestionList::new();
        let t = list.begin("piz");
        list.resolve(t, Ok(vec![prediction("a")]));
        list.begin("");
        assert!(list.items().is_empty());
    }

    #[test]
    fn select_is_one_based_and_closes() {
        let mut list = SuggestionList::new();
        let t = list.begin("piz");
        list.resolve(t, Ok(vec![prediction("a"), prediction("b")]));

        assert_eq!(list.select(0), None);
        assert_eq!(list.select(2).unwrap().place_id, "b");
        assert!(list.items().is_empty());
        assert!(!list.is_current(&t));
    }
}
