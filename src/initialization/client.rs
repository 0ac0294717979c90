//! HTTP client initialization.

use std::sync::Arc;
use std::time::Duration;

use reqwest::ClientBuilder;

use crate::config::Config;
use crate::error_handling::InitializationError;

/// Initializes the HTTP client shared by the discovery sources.
///
/// Creates a `reqwest::Client` configured with the User-Agent and timeout
/// from the configuration.
///
/// # Errors
///
/// Returns `InitializationError::HttpClientError` if client creation fails.
pub fn init_client(config: &Config) -> Result<Arc<reqwest::Client>, InitializationError> {
    let client = ClientBuilder::new()
        .timeout(Duration::from_secs(config.timeout_seconds))
        .user_agent(config.user_agent.clone())
        .build()?;
    Ok(Arc::new(client))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_client_with_default_config() {
        let config = Config::default();
        assert!(init_client(&config).is_ok());
    }
}
