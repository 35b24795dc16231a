use async_trait::async_trait;
use geodb_client::{CitySearchRequest, CitySearchResponse, GeoDbClient, GeoDbError};

/// Remote city search operation consumed by the controller.
///
/// The trait boundary keeps the controller testable with canned responses.
#[async_trait]
pub trait CityProvider: Send + Sync {
    async fn search(&self, req: &CitySearchRequest)
        -> Result<CitySearchResponse, GeoDbError>;
    fn name(&self) -> &str;
}

#[async_trait]
impl CityProvider for GeoDbClient {
    async fn search(
        &self,
        req: &CitySearchRequest,
    ) -> Result<CitySearchResponse, GeoDbError> {
        self.search_cities(req).await
    }

    fn name(&self) -> &str {
        "geodb"
    }
}
