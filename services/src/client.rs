use crate::config::{self, get_config_element};
use crate::error::{Error, Result};
use crate::layers::handle::Resource;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, instrument};
use url::Url;

/// Opens resources of an ArcGIS REST endpoint
#[async_trait]
pub trait ArcGisClient: Send + Sync {
    /// Fetches the metadata at `url` and wraps it into a fresh handle.
    async fn open(&self, url: &Url) -> Result<Resource>;
}

/// The `error` member ArcGIS servers answer with, usually with status 200
#[derive(Debug, Deserialize)]
struct ServiceError {
    code: i64,
    #[serde(default)]
    message: String,
}

#[derive(Debug, Clone, Default)]
pub struct RestClient {
    client: reqwest::Client,
}

impl RestClient {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }

    /// Builds a client with the timeout and user agent from the `arcgis` settings.
    pub fn from_config() -> Result<Self> {
        let settings: config::ArcGis = get_config_element()?;

        let client = reqwest::Client::builder()
            .timeout(settings.request_timeout())
            .user_agent(settings.user_agent)
            .build()?;

        Ok(Self::new(client))
    }

    async fn get_json(&self, url: &Url) -> Result<Value> {
        let mut request_url = url.clone();
        request_url.query_pairs_mut().append_pair("f", "json");

        let json: Value = self
            .client
            .get(request_url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        if let Some(error) = json.get("error") {
            let error: ServiceError = serde_json::from_value(error.clone())?;
            return Err(Error::ArcGisService {
                code: error.code,
                message: error.message,
            });
        }

        Ok(json)
    }
}

#[async_trait]
impl ArcGisClient for RestClient {
    #[instrument(skip_all, fields(url = %url))]
    async fn open(&self, url: &Url) -> Result<Resource> {
        let json = self.get_json(url).await?;
        let resource = Resource::from_json(url.clone(), json)?;

        debug!(resource_type = resource.type_name(), "opened resource");

        Ok(resource)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layers::handle::RemoteResource;
    use httptest::{
        Expectation, Server, all_of,
        matchers::{contains, request, url_decoded},
        responders::{json_encoded, status_code},
    };
    use serde_json::json;

    #[tokio::test]
    async fn it_opens_feature_servers() {
        let server = Server::run();
        server.expect(
            Expectation::matching(all_of![
                request::method_path("GET", "/arcgis/rest/services/Counties/FeatureServer"),
                request::query(url_decoded(contains(("f", "json"))))
            ])
            .respond_with(json_encoded(json!({
                "currentVersion": 11.1,
                "layers": [{"id": 0, "name": "Counties"}],
                "tables": []
            }))),
        );

        let url = Url::parse(&server.url_str("/arcgis/rest/services/Counties/FeatureServer"))
            .unwrap();
        let resource = RestClient::default().open(&url).await.unwrap();

        assert_eq!(resource.type_name(), "FeatureServer");
        assert_eq!(resource.url(), &url);
    }

    #[tokio::test]
    async fn it_reports_service_errors() {
        let server = Server::run();
        server.expect(
            Expectation::matching(request::method_path(
                "GET",
                "/arcgis/rest/services/Missing/FeatureServer/0",
            ))
            .respond_with(json_encoded(json!({
                "error": {
                    "code": 400,
                    "message": "Invalid URL",
                    "details": ["Invalid URL"]
                }
            }))),
        );

        let url = Url::parse(&server.url_str("/arcgis/rest/services/Missing/FeatureServer/0"))
            .unwrap();
        let result = RestClient::default().open(&url).await;

        assert!(matches!(
            result,
            Err(Error::ArcGisService { code: 400, ref message }) if message == "Invalid URL"
        ));
    }

    #[tokio::test]
    async fn it_reports_http_errors() {
        let server = Server::run();
        server.expect(
            Expectation::matching(request::method_path("GET", "/arcgis/rest/services"))
                .respond_with(status_code(503)),
        );

        let url = Url::parse(&server.url_str("/arcgis/rest/services")).unwrap();
        let result = RestClient::default().open(&url).await;

        assert!(matches!(result, Err(Error::Reqwest { .. })));
    }

    #[tokio::test]
    async fn it_builds_from_config() {
        let server = Server::run();
        server.expect(
            Expectation::matching(request::method_path(
                "GET",
                "/arcgis/rest/services/Elevation/ImageServer",
            ))
            .respond_with(json_encoded(json!({"name": "Elevation"}))),
        );

        let url = Url::parse(&server.url_str("/arcgis/rest/services/Elevation/ImageServer"))
            .unwrap();
        let resource = RestClient::from_config().unwrap().open(&url).await.unwrap();

        assert_eq!(resource.type_name(), "ImageServer");
    }
}
