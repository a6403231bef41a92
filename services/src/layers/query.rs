use crate::client::ArcGisClient;
use crate::error::{Error, Result};
use crate::layers::handle::{FeatureLayer, Layer, RemoteResource, Resource, Table};
use crate::layers::listing::list_items;
use arcrest_datatypes::util::check_null_or_scalar;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

/// Request parameters that are sent along with every query of a layer,
/// e.g. `where` or `outFields`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QueryParameters(BTreeMap<String, String>);

impl QueryParameters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.0.insert(key.into(), value.into())
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.0.remove(key)
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for QueryParameters {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// A handle that carries query state.
pub trait Queryable: RemoteResource + Sized {
    fn query(&self) -> &QueryParameters;

    fn query_mut(&mut self) -> &mut QueryParameters;

    #[must_use]
    fn with_query_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query_mut().insert(key, value);
        self
    }

    /// Sets the `where` clause. `None` removes it, more than one clause is rejected.
    fn with_where(mut self, clause: Option<&[&str]>) -> Result<Self> {
        check_null_or_scalar(clause, "where")?;

        match clause.and_then(|clauses| clauses.first()) {
            Some(clause) => {
                self.query_mut().insert("where", *clause);
            }
            None => {
                self.query_mut().remove("where");
            }
        }

        Ok(self)
    }

    #[must_use]
    fn with_out_fields(self, fields: &[&str]) -> Self {
        let out_fields = if fields.is_empty() {
            "*".to_owned()
        } else {
            fields.join(",")
        };
        self.with_query_param("outFields", out_fields)
    }
}

impl Queryable for FeatureLayer {
    fn query(&self) -> &QueryParameters {
        FeatureLayer::query(self)
    }

    fn query_mut(&mut self) -> &mut QueryParameters {
        FeatureLayer::query_mut(self)
    }
}

impl Queryable for Table {
    fn query(&self) -> &QueryParameters {
        Table::query(self)
    }

    fn query_mut(&mut self) -> &mut QueryParameters {
        Table::query_mut(self)
    }
}

impl Queryable for Layer {
    fn query(&self) -> &QueryParameters {
        match self {
            Layer::FeatureLayer(layer) => layer.query(),
            Layer::Table(table) => table.query(),
        }
    }

    fn query_mut(&mut self) -> &mut QueryParameters {
        match self {
            Layer::FeatureLayer(layer) => layer.query_mut(),
            Layer::Table(table) => table.query_mut(),
        }
    }
}

/// Removes all query parameters from `handle`.
#[must_use]
pub fn clear_query<Q: Queryable>(mut handle: Q) -> Q {
    handle.query_mut().clear();
    handle
}

/// Fetches the current metadata of `layer` and carries its query over.
///
/// Fails with [`Error::UnsupportedLayerType`] if the url no longer resolves to
/// a layer or table.
pub async fn refresh_layer<C>(client: &C, layer: &Layer) -> Result<Layer>
where
    C: ArcGisClient + ?Sized,
{
    debug!(url = %layer.url(), layer_type = layer.type_name(), "refreshing layer");

    let mut refreshed = Layer::try_from(client.open(layer.url()).await?)?;
    *refreshed.query_mut() = layer.query().clone();

    Ok(refreshed)
}

/// Selects a sub-item of a server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayerSelector {
    Id(u64),
    Name(String),
}

impl std::fmt::Display for LayerSelector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LayerSelector::Id(id) => write!(f, "id {id}"),
            LayerSelector::Name(name) => write!(f, "name {name}"),
        }
    }
}

/// Opens the layer or table of a FeatureServer or MapServer that matches `selector`.
pub async fn get_layer<C>(client: &C, server: &Resource, selector: &LayerSelector) -> Result<Layer>
where
    C: ArcGisClient + ?Sized,
{
    if !matches!(server, Resource::FeatureServer(_) | Resource::MapServer(_)) {
        return Err(Error::NotAServer {
            found: server.type_name(),
        });
    }

    let items = list_items(server)?;
    let item = match selector {
        LayerSelector::Id(id) => items.find_by_id(*id),
        LayerSelector::Name(name) => items.find_by_name(name),
    };
    let id = item
        .and_then(|row| row.get("id"))
        .and_then(serde_json::Value::as_u64)
        .ok_or_else(|| Error::LayerNotFound {
            selector: selector.to_string(),
        })?;

    let mut url = server.url().clone();
    url.path_segments_mut()
        .map_err(|()| Error::UnsupportedResource {
            url: server.url().clone(),
        })?
        .pop_if_empty()
        .push(&id.to_string());

    Layer::try_from(client.open(&url).await?)
}
