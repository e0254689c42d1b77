use crate::ccb_client::CcbClient;
use crate::ccb_models::Envelope;
use crate::config::Config;
use crate::errors::AppError;
use crate::name_query::{NamePolicy, SearchQuery};
use crate::transcoder;

/// Name lookup pipeline: request builder, CCB call, transcoder.
#[derive(Clone)]
pub struct WhoIsService {
    client: CcbClient,
    policy: NamePolicy,
}

impl WhoIsService {
    pub fn new(config: &Config) -> Result<Self, AppError> {
        Ok(Self {
            client: CcbClient::new(config)?,
            policy: config.name_policy,
        })
    }

    /// Looks a name up and returns the parsed envelope.
    ///
    /// Empty names fail before any outbound call. Every failure is logged
    /// here and returned, so the caller decides whether to surface it.
    pub async fn lookup(&self, name: &str) -> Result<Envelope, AppError> {
        let result = self.run(name).await;
        if let Err(ref e) = result {
            e.log();
        }
        result
    }

    /// Looks a name up and returns the envelope as a JSON string.
    pub async fn who_is(&self, name: &str) -> Result<String, AppError> {
        let envelope = self.lookup(name).await?;
        transcoder::to_json(&envelope)
    }

    async fn run(&self, name: &str) -> Result<Envelope, AppError> {
        let query = SearchQuery::parse(name, self.policy)?;
        let body = self.client.search_individuals(&query).await?;
        let envelope = transcoder::parse_envelope(&body)?;

        if let Some(response) = envelope.response.as_ref() {
            if let Some(errors) = response.errors.as_ref().filter(|e| !e.is_empty()) {
                tracing::warn!("CCB reported {} API error(s)", errors.len());
            }

            let count = response
                .individuals
                .as_ref()
                .and_then(|i| i.count.as_deref())
                .unwrap_or("0");
            tracing::info!("CCB search matched {} individual(s)", count);
            tracing::debug!("Search was for '{}'", query);
        }

        Ok(envelope)
    }
}
