use super::types::CwaForecastResponse;
use crate::config::Config;
use reqwest::Client;
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CwaError {
    #[error("CWA_API_KEY is not configured")]
    MissingApiKey,
    #[error("HTTP client setup failed: {0}")]
    ClientBuild(reqwest::Error),
    #[error("HTTP request failed: {0}")]
    Network(#[from] reqwest::Error),
    #[error("Upstream returned HTTP {status}: {body}")]
    Upstream { status: u16, body: String },
    #[error("JSON parsing failed: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Client for the CWA open-data forecast datastore.
pub struct CwaClient {
    client: Client,
    config: Config,
}

impl CwaClient {
    pub fn new(config: Config) -> Result<Self, CwaError> {
        let mut builder = Client::builder().user_agent("CwaWeatherGateway/1.0");
        if let Some(secs) = config.cwa_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder.build().map_err(CwaError::ClientBuild)?;

        Ok(Self { client, config })
    }

    /// Fetches the raw forecast for one CWA location name. Exactly one request,
    /// no retry.
    pub async fn fetch(&self, location_name: &str) -> Result<CwaForecastResponse, CwaError> {
        let api_key = self
            .config
            .cwa_api_key
            .as_deref()
            .ok_or(CwaError::MissingApiKey)?;

        let url = format!(
            "{}/{}",
            self.config.cwa_base_url.trim_end_matches('/'),
            self.config.cwa_dataset_id
        );

        tracing::debug!("Requesting CWA forecast for {} from {}", location_name, url);

        let response = self
            .client
            .get(&url)
            .query(&[("Authorization", api_key), ("locationName", location_name)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = match response.text().await {
                Ok(body) => body,
                Err(e) => {
                    tracing::debug!("Could not read CWA error body for HTTP {}: {}", status, e);
                    String::new()
                }
            };
            tracing::warn!("CWA API returned HTTP {} for {}", status, location_name);
            return Err(CwaError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        let text = response.text().await?;
        let payload: CwaForecastResponse = serde_json::from_str(&text)?;
        Ok(payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_config(base_url: &str, api_key: Option<&str>) -> Config {
        Config {
            port: 0,
            cwa_api_key: api_key.map(str::to_string),
            cwa_base_url: base_url.to_string(),
            cwa_dataset_id: "F-C0032-001".to_string(),
            cwa_timeout_secs: Some(5),
        }
    }

    #[tokio::test]
    async fn test_fetch_sends_credential_and_location() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/F-C0032-001"))
            .and(query_param("Authorization", "CWA-TEST"))
            .and(query_param("locationName", "臺北市"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "success": "true",
                "records": {
                    "datasetDescription": "三十六小時天氣預報",
                    "location": [{ "locationName": "臺北市", "weatherElement": [] }]
                }
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = CwaClient::new(test_config(&mock_server.uri(), Some("CWA-TEST"))).unwrap();
        let payload = client.fetch("臺北市").await.unwrap();

        assert_eq!(payload.records.location.len(), 1);
        assert_eq!(payload.records.location[0].location_name, "臺北市");
    }

    #[tokio::test]
    async fn test_fetch_without_api_key_makes_no_request() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&mock_server)
            .await;

        let client = CwaClient::new(test_config(&mock_server.uri(), None)).unwrap();
        let err = client.fetch("臺北市").await.unwrap_err();

        assert!(matches!(err, CwaError::MissingApiKey));
    }

    #[tokio::test]
    async fn test_fetch_surfaces_upstream_status_and_body() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/F-C0032-001"))
            .respond_with(
                ResponseTemplate::new(401)
                    .set_body_json(serde_json::json!({ "message": "Unauthorized" })),
            )
            .mount(&mock_server)
            .await;

        let client = CwaClient::new(test_config(&mock_server.uri(), Some("bad-key"))).unwrap();
        let err = client.fetch("臺北市").await.unwrap_err();

        match err {
            CwaError::Upstream { status, body } => {
                assert_eq!(status, 401);
                assert!(body.contains("Unauthorized"));
            }
            other => panic!("expected upstream error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_fetch_upstream_error_without_body() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/F-C0032-001"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&mock_server)
            .await;

        let client = CwaClient::new(test_config(&mock_server.uri(), Some("key"))).unwrap();
        let err = client.fetch("臺北市").await.unwrap_err();

        match err {
            CwaError::Upstream { status, body } => {
                assert_eq!(status, 503);
                assert!(body.is_empty());
            }
            other => panic!("expected upstream error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_fetch_reports_undecodable_body() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/F-C0032-001"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
            .mount(&mock_server)
            .await;

        let client = CwaClient::new(test_config(&mock_server.uri(), Some("key"))).unwrap();
        let err = client.fetch("臺北市").await.unwrap_err();

        assert!(matches!(err, CwaError::Decode(_)));
    }

    #[tokio::test]
    async fn test_fetch_connection_failure_is_network_error() {
        let client = CwaClient::new(test_config("http://127.0.0.1:1", Some("key"))).unwrap();
        let err = client.fetch("臺北市").await.unwrap_err();

        assert!(matches!(err, CwaError::Network(_)));
    }

    #[tokio::test]
    async fn test_trailing_slash_in_base_url() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/F-C0032-001"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "records": { "location": [] }
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let base = format!("{}/", mock_server.uri());
        let client = CwaClient::new(test_config(&base, Some("key"))).unwrap();
        let payload = client.fetch("新北市").await.unwrap();

        assert!(payload.records.location.is_empty());
    }
}
