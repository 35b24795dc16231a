// Test mocks for the search controller.
//
// One mock matching the one trait boundary:
// - MockCityProvider (CityProvider) — HashMap-based (prefix, offset)→response
//
// Plus helpers for constructing City values and response pages.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;

use geodb_client::{
    City, CitySearchRequest, CitySearchResponse, GeoDbError, ResponseMetadata,
};

use crate::provider::CityProvider;

/// New York, NY coordinates.
pub const NYC: (f64, f64) = (40.7128, -74.0060);

struct Canned {
    response: CitySearchResponse,
    delay: Option<Duration>,
}

/// HashMap-based city provider. Unregistered searches return an empty page;
/// a `failing()` provider errors on every call.
/// Builder pattern: `.on_search()`, `.on_search_delayed()`, `.failing()`.
pub struct MockCityProvider {
    responses: HashMap<(String, u64), Canned>,
    fail: bool,
    calls: AtomicUsize,
}

impl MockCityProvider {
    pub fn new() -> Self {
        Self {
            responses: HashMap::new(),
            fail: false,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn on_search(mut self, prefix: &str, offset: u64, response: CitySearchResponse) -> Self {
        self.responses.insert(
            (prefix.to_string(), offset),
            Canned {
                response,
                delay: None,
            },
        );
        self
    }

    /// Like `on_search`, but the response resolves only after `delay`.
    /// Used to keep a fetch in flight while the test issues more input.
    pub fn on_search_delayed(
        mut self,
        prefix: &str,
        offset: u64,
        delay: Duration,
        response: CitySearchResponse,
    ) -> Self {
        self.responses.insert(
            (prefix.to_string(), offset),
            Canned {
                response,
                delay: Some(delay),
            },
        );
        self
    }

    /// Every search fails with a network error.
    pub fn failing(mut self) -> Self {
        self.fail = true;
        self
    }

    /// Number of searches initiated against this provider.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CityProvider for MockCityProvider {
    async fn search(
        &self,
        req: &CitySearchRequest,
    ) -> Result<CitySearchResponse, GeoDbError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if self.fail {
            return Err(GeoDbError::Network("connection refused".to_string()));
        }

        match self.responses.get(&(req.name_prefix.clone(), req.offset)) {
            Some(canned) => {
                if let Some(delay) = canned.delay {
                    tokio::time::sleep(delay).await;
                }
                Ok(canned.response.clone())
            }
            None => Ok(empty_page(req.offset)),
        }
    }

    fn name(&self) -> &str {
        "mock"
    }
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

pub fn city(id: u64, name: &str, country: &str, population: u64) -> City {
    City {
        id,
        wiki_data_id: format!("Q{id}"),
        city_type: "CITY".to_string(),
        city: name.to_string(),
        name: name.to_string(),
        country: country.to_string(),
        country_code: "XX".to_string(),
        region: String::new(),
        population,
        latitude: 0.0,
        longitude: 0.0,
    }
}

pub fn new_york() -> City {
    City {
        id: 1,
        wiki_data_id: "Q60".to_string(),
        city_type: "CITY".to_string(),
        city: "New York".to_string(),
        name: "New York".to_string(),
        country: "United States".to_string(),
        country_code: "US".to_string(),
        region: "New York".to_string(),
        population: 8_400_000,
        latitude: NYC.0,
        longitude: NYC.1,
    }
}

pub fn page(cities: Vec<City>, offset: u64, total: u64) -> CitySearchResponse {
    CitySearchResponse {
        data: cities,
        metadata: ResponseMetadata {
            current_offset: offset,
            total_count: total,
        },
    }
}

pub fn empty_page(offset: u64) -> CitySearchResponse {
    page(Vec::new(), offset, 0)
}
