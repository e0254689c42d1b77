use crate::config::Config;
use crate::errors::AppError;
use crate::name_query::SearchQuery;
use reqwest::header::CONTENT_TYPE;
use std::time::Duration;

/// CCB service name for the individual search.
const SEARCH_SERVICE: &str = "individual_search";

/// Client for the Church Community Builder XML API.
#[derive(Clone)]
pub struct CcbClient {
    client: reqwest::Client,
    api_url: String,
    username: String,
    password: String,
}

impl CcbClient {
    /// Creates a new `CcbClient` from the loaded configuration.
    ///
    /// Requests are bounded by `ccb_timeout_secs`.
    pub fn new(config: &Config) -> Result<Self, AppError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.ccb_timeout_secs))
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to create CCB client: {}", e)))?;

        Ok(Self {
            client,
            api_url: config.ccb_api_url.clone(),
            username: config.ccb_username.clone(),
            password: config.ccb_password.clone(),
        })
    }

    /// Builds the search URL: `srv=individual_search` followed by the name
    /// parameters.
    pub fn search_url(&self, query: &SearchQuery) -> Result<reqwest::Url, AppError> {
        let mut params = vec![("srv", SEARCH_SERVICE)];
        params.extend(query.query_pairs());

        reqwest::Url::parse_with_params(&self.api_url, &params)
            .map_err(|e| AppError::Internal(format!("Failed to build CCB URL: {}", e)))
    }

    /// Runs one `individual_search` call and returns the raw XML body.
    ///
    /// # Errors
    ///
    /// * `AppError::RemoteTransport` - network failure, timeout, or a
    ///   non-success HTTP status.
    pub async fn search_individuals(&self, query: &SearchQuery) -> Result<Vec<u8>, AppError> {
        let url = self.search_url(query)?;
        tracing::info!("Searching CCB individuals");
        tracing::debug!("CCB search for '{}'", query);
        tracing::debug!("CCB URL: {}", url);

        let response = self
            .client
            .post(url)
            .basic_auth(&self.username, Some(&self.password))
            .header(CONTENT_TYPE, "application/xml")
            .send()
            .await
            .map_err(|e| AppError::RemoteTransport(format!("CCB request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AppError::RemoteTransport(format!(
                "CCB returned {}: {}",
                status, error_text
            )));
        }

        let body = response.bytes().await.map_err(|e| {
            AppError::RemoteTransport(format!("Failed to read CCB response: {}", e))
        })?;

        tracing::debug!("CCB response: {} bytes", body.len());
        Ok(body.to_vec())
    }
}
