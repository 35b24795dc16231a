//! Search state owned by the controller.
//!
//! One `SearchState` per controller, living from mount to teardown. All
//! mutations happen inside `SearchController` methods; the presentation
//! surface only ever sees immutable `SearchSnapshot`s.

use geodb_client::City;

/// Cities fetched per page, matching the remote API default.
pub const PAGE_SIZE: u64 = 10;

/// Population and country constraints applied locally to the fetched page.
///
/// Bounds are not validated against each other: an inverted range
/// (min > max) filters everything out rather than erroring.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchFilters {
    pub min_population: u64,
    /// `None` means unbounded.
    pub max_population: Option<u64>,
    /// Case-insensitive substring match on the country name. Empty means no
    /// constraint.
    pub country: String,
}

/// Field-wise patch for [`SearchFilters`], merged by
/// `SearchController::update_filters`.
///
/// The nested option on `max_population` distinguishes "leave unchanged"
/// (outer `None`) from "clear to unbounded" (`Some(None)`).
#[derive(Debug, Clone, Default)]
pub struct FilterUpdate {
    pub min_population: Option<u64>,
    pub max_population: Option<Option<u64>>,
    pub country: Option<String>,
}

/// Mutable search state. Result set and total count are only ever set
/// together, from one successful fetch.
#[derive(Debug, Default)]
pub struct SearchState {
    pub query: String,
    pub page: u64,
    pub cities: Vec<City>,
    pub total_count: u64,
    pub loading: bool,
    pub error: Option<String>,
    pub filters: SearchFilters,
    pub selected: Option<City>,
}

impl SearchState {
    pub fn total_pages(&self) -> u64 {
        self.total_count.div_ceil(PAGE_SIZE)
    }
}

/// Immutable view of the search state for one render cycle.
///
/// `cities` is the derived filtered view, not the raw result set.
#[derive(Debug, Clone)]
pub struct SearchSnapshot {
    pub query: String,
    pub page: u64,
    pub total_pages: u64,
    pub total_count: u64,
    pub cities: Vec<City>,
    pub selected: Option<City>,
    pub loading: bool,
    pub error: Option<String>,
}
