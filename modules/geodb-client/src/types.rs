use serde::{Deserialize, Serialize};

/// One populated place from the GeoDB `/v1/geo/cities` endpoint.
///
/// Cities are value objects: a fetch replaces the whole working set, and
/// nothing downstream mutates an individual entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct City {
    pub id: u64,
    #[serde(rename = "wikiDataId")]
    pub wiki_data_id: String,
    /// Entity type as reported by the API ("CITY", "ADM2", ...).
    #[serde(rename = "type")]
    pub city_type: String,
    pub city: String,
    pub name: String,
    pub country: String,
    #[serde(rename = "countryCode")]
    pub country_code: String,
    pub region: String,
    pub population: u64,
    pub latitude: f64,
    pub longitude: f64,
}

/// Paging metadata returned alongside every search response.
#[derive(Debug, Clone, Deserialize)]
pub struct ResponseMetadata {
    #[serde(rename = "currentOffset")]
    pub current_offset: u64,
    #[serde(rename = "totalCount")]
    pub total_count: u64,
}

/// Response envelope for `GET /cities`.
#[derive(Debug, Clone, Deserialize)]
pub struct CitySearchResponse {
    pub data: Vec<City>,
    pub metadata: ResponseMetadata,
}

/// Parameters for a city prefix search. Results come back ordered by
/// descending population.
#[derive(Debug, Clone)]
pub struct CitySearchRequest {
    pub name_prefix: String,
    pub offset: u64,
    pub limit: u64,
    pub min_population: Option<u64>,
    pub max_population: Option<u64>,
}

impl CitySearchRequest {
    pub fn new(name_prefix: impl Into<String>) -> Self {
        Self {
            name_prefix: name_prefix.into(),
            offset: 0,
            limit: crate::DEFAULT_LIMIT,
            min_population: None,
            max_population: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_geodb_cities_payload() {
        let payload = r#"{
            "data": [
                {
                    "id": 3350606,
                    "wikiDataId": "Q60",
                    "type": "CITY",
                    "city": "New York",
                    "name": "New York",
                    "country": "United States of America",
                    "countryCode": "US",
                    "region": "New York",
                    "latitude": 40.7128,
                    "longitude": -74.006,
                    "population": 8400000
                }
            ],
            "metadata": {
                "currentOffset": 0,
                "totalCount": 4
            }
        }"#;

        let resp: CitySearchResponse = serde_json::from_str(payload).unwrap();
        assert_eq!(resp.data.len(), 1);
        assert_eq!(resp.metadata.current_offset, 0);
        assert_eq!(resp.metadata.total_count, 4);

        let city = &resp.data[0];
        assert_eq!(city.id, 3350606);
        assert_eq!(city.wiki_data_id, "Q60");
        assert_eq!(city.city_type, "CITY");
        assert_eq!(city.name, "New York");
        assert_eq!(city.country_code, "US");
        assert_eq!(city.population, 8_400_000);
        assert!((city.latitude - 40.7128).abs() < 1e-9);
        assert!((city.longitude + 74.006).abs() < 1e-9);
    }

    #[test]
    fn request_defaults_to_first_page_of_ten() {
        let req = CitySearchRequest::new("New");
        assert_eq!(req.name_prefix, "New");
        assert_eq!(req.offset, 0);
        assert_eq!(req.limit, 10);
        assert!(req.min_population.is_none());
        assert!(req.max_population.is_none());
    }
}
