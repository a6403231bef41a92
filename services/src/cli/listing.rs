use crate::client::{ArcGisClient, RestClient};
use crate::layers;
use clap::Parser;
use url::Url;

/// Prints the fields of a layer or table as JSON
#[derive(Debug, Parser)]
pub struct ListFields {
    /// Url of the layer, e.g. `https://host/arcgis/rest/services/Name/FeatureServer/0`
    url: Url,
}

/// Prints the layers and tables of a FeatureServer or MapServer as JSON
#[derive(Debug, Parser)]
pub struct ListItems {
    /// Url of the service, e.g. `https://host/arcgis/rest/services/Name/FeatureServer`
    url: Url,
}

pub async fn list_fields(client: &RestClient, params: ListFields) -> Result<String, anyhow::Error> {
    let resource = client.open(&params.url).await?;
    let fields = layers::list_fields(&resource);

    Ok(serde_json::to_string_pretty(&fields)?)
}

pub async fn list_items(client: &RestClient, params: ListItems) -> Result<String, anyhow::Error> {
    let resource = client.open(&params.url).await?;
    let items = layers::list_items(&resource)?;

    Ok(serde_json::to_string_pretty(&items)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use httptest::{Expectation, Server, matchers::request, responders::json_encoded};
    use serde_json::json;

    #[tokio::test]
    async fn it_prints_fields() {
        let server = Server::run();
        server.expect(
            Expectation::matching(request::method_path(
                "GET",
                "/arcgis/rest/services/Counties/FeatureServer/0",
            ))
            .respond_with(json_encoded(json!({
                "name": "Counties",
                "type": "Feature Layer",
                "fields": [{"name": "OBJECTID", "type": "esriFieldTypeOID"}]
            }))),
        );

        let params = ListFields {
            url: Url::parse(&server.url_str("/arcgis/rest/services/Counties/FeatureServer/0"))
                .unwrap(),
        };
        let output = list_fields(&RestClient::default(), params).await.unwrap();

        let fields: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(fields[0]["name"], "OBJECTID");
        assert_eq!(fields[0]["type"], "esriFieldTypeOID");
    }

    #[tokio::test]
    async fn it_prints_items() {
        let server = Server::run();
        server.expect(
            Expectation::matching(request::method_path(
                "GET",
                "/arcgis/rest/services/Counties/FeatureServer",
            ))
            .respond_with(json_encoded(json!({
                "layers": [{"id": 0, "name": "Counties"}],
                "tables": [{"id": 1, "name": "Census"}]
            }))),
        );

        let params = ListItems {
            url: Url::parse(&server.url_str("/arcgis/rest/services/Counties/FeatureServer"))
                .unwrap(),
        };
        let output = list_items(&RestClient::default(), params).await.unwrap();

        assert_eq!(
            serde_json::from_str::<serde_json::Value>(&output).unwrap(),
            json!([{"id": 0, "name": "Counties"}, {"id": 1, "name": "Census"}])
        );
    }
}
