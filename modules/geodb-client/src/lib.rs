pub mod error;
pub mod types;

pub use error::{GeoDbError, Result};
pub use types::{City, CitySearchRequest, CitySearchResponse, ResponseMetadata};

/// Default RapidAPI host for the GeoDB Cities API.
pub const DEFAULT_API_HOST: &str = "wft-geo-db.p.rapidapi.com";

/// Page size requested when the caller does not override it.
pub const DEFAULT_LIMIT: u64 = 10;

pub struct GeoDbClient {
    client: reqwest::Client,
    base_url: String,
    host: String,
    api_key: String,
}

impl GeoDbClient {
    pub fn new(host: String, api_key: String) -> Self {
        let base_url = format!("https://{host}/v1/geo");
        Self {
            client: reqwest::Client::new(),
            base_url,
            host,
            api_key,
        }
    }

    /// Search cities by name prefix. A single GET to `/cities`, authenticated
    /// via the two RapidAPI headers supplied at construction.
    pub async fn search_cities(&self, req: &CitySearchRequest) -> Result<CitySearchResponse> {
        let url = format!("{}/cities", self.base_url);

        let mut params: Vec<(&str, String)> = vec![
            ("namePrefix", req.name_prefix.clone()),
            ("offset", req.offset.to_string()),
            ("limit", req.limit.to_string()),
            ("sort", "-population".to_string()),
        ];
        if let Some(min) = req.min_population {
            params.push(("minPopulation", min.to_string()));
        }
        if let Some(max) = req.max_population {
            params.push(("maxPopulation", max.to_string()));
        }

        tracing::debug!(
            prefix = %req.name_prefix,
            offset = req.offset,
            limit = req.limit,
            "Searching cities"
        );

        let resp = self
            .client
            .get(&url)
            .header("X-RapidAPI-Host", &self.host)
            .header("X-RapidAPI-Key", &self.api_key)
            .query(&params)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(GeoDbError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let search: CitySearchResponse = resp.json().await?;
        tracing::debug!(
            count = search.data.len(),
            total = search.metadata.total_count,
            "Search returned"
        );
        Ok(search)
    }
}
