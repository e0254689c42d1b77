use crate::name_query::NamePolicy;

/// Default CCB endpoint used when `CCB_API_URL` is not set.
pub const DEFAULT_CCB_API_URL: &str = "https://vouschurch.ccbchurch.com/api.php";

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub ccb_api_url: String,
    pub ccb_username: String,
    pub ccb_password: String,
    pub ccb_timeout_secs: u64,
    pub name_policy: NamePolicy,
    /// Report lookup failures with conventional status codes instead of `200 OK`.
    pub strict_status_codes: bool,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    ///
    /// `from_env` delegates here; tests pass a closure over a map instead of
    /// mutating the process environment.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let config = Self {
            port: lookup("PORT")
                .unwrap_or_else(|| "8080".to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid number between 1-65535"))?,
            ccb_api_url: {
                let url = lookup("CCB_API_URL")
                    .filter(|s| !s.trim().is_empty())
                    .unwrap_or_else(|| DEFAULT_CCB_API_URL.to_string());
                if !url.starts_with("http://") && !url.starts_with("https://") {
                    anyhow::bail!("CCB_API_URL must start with http:// or https://");
                }
                url
            },
            ccb_username: lookup("CCB_USERNAME")
                .or_else(|| lookup("USERNAME"))
                .ok_or_else(|| {
                    anyhow::anyhow!("CCB_USERNAME or USERNAME environment variable required")
                })
                .and_then(|user| {
                    if user.trim().is_empty() {
                        anyhow::bail!("CCB_USERNAME cannot be empty");
                    }
                    Ok(user)
                })?,
            ccb_password: lookup("CCB_PASSWORD")
                .or_else(|| lookup("PASSWORD"))
                .ok_or_else(|| {
                    anyhow::anyhow!("CCB_PASSWORD or PASSWORD environment variable required")
                })
                .and_then(|pass| {
                    if pass.trim().is_empty() {
                        anyhow::bail!("CCB_PASSWORD cannot be empty");
                    }
                    Ok(pass)
                })?,
            ccb_timeout_secs: lookup("CCB_TIMEOUT_SECS")
                .unwrap_or_else(|| "30".to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("CCB_TIMEOUT_SECS must be a whole number of seconds"))?,
            name_policy: lookup("CCB_NAME_POLICY")
                .map(|policy| policy.parse::<NamePolicy>().map_err(|e| anyhow::anyhow!(e)))
                .transpose()?
                .unwrap_or_default(),
            strict_status_codes: lookup("STRICT_STATUS_CODES")
                .map(|flag| matches!(flag.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
                .unwrap_or(false),
        };

        // Log successful configuration load (without credentials)
        tracing::info!("Configuration loaded successfully");
        tracing::debug!("CCB API URL: {}", config.ccb_api_url);
        tracing::debug!("CCB timeout: {}s", config.ccb_timeout_secs);
        tracing::debug!("Name policy: {:?}", config.name_policy);
        tracing::debug!("Server Port: {}", config.port);

        Ok(config)
    }
}
