use crate::error::{Error, Result};
use crate::layers::query::QueryParameters;
use arcrest_datatypes::primitives::{FieldListing, ItemListing};
use arcrest_datatypes::spatial_reference::{EsriSpatialReference, SpatialReferenceOption};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use strum::IntoStaticStr;
use url::Url;

/// Cached metadata of a remote resource, as last fetched from its endpoint.
pub trait RemoteResource {
    fn url(&self) -> &Url;

    fn fields(&self) -> Option<&FieldListing> {
        None
    }

    fn layers(&self) -> Option<&ItemListing> {
        None
    }

    fn tables(&self) -> Option<&ItemListing> {
        None
    }

    fn spatial_reference(&self) -> SpatialReferenceOption;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Extent {
    pub xmin: f64,
    pub ymin: f64,
    pub xmax: f64,
    pub ymax: f64,
    #[serde(default)]
    pub spatial_reference: Option<EsriSpatialReference>,
}

/// Metadata of a single layer or table, e.g. `.../FeatureServer/0`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayerMetadata {
    #[serde(default)]
    pub id: Option<u64>,
    pub name: String,
    #[serde(rename = "type")]
    pub layer_type: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub geometry_type: Option<String>,
    #[serde(default)]
    pub fields: Option<FieldListing>,
    #[serde(default)]
    pub extent: Option<Extent>,
    #[serde(default)]
    pub object_id_field: Option<String>,
    #[serde(default)]
    pub max_record_count: Option<u64>,
    #[serde(default)]
    pub capabilities: Option<String>,
}

/// Metadata of a FeatureServer or MapServer root
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceMetadata {
    #[serde(default)]
    pub current_version: Option<f64>,
    #[serde(default)]
    pub service_description: Option<String>,
    #[serde(default)]
    pub layers: Option<ItemListing>,
    #[serde(default)]
    pub tables: Option<ItemListing>,
    #[serde(default)]
    pub spatial_reference: Option<EsriSpatialReference>,
    #[serde(default)]
    pub max_record_count: Option<u64>,
    #[serde(default)]
    pub capabilities: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageServiceMetadata {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub extent: Option<Extent>,
    #[serde(default)]
    pub fields: Option<FieldListing>,
    #[serde(default)]
    pub pixel_type: Option<String>,
    #[serde(default)]
    pub band_count: Option<u32>,
}

macro_rules! layer_handle {
    ($(#[$attr:meta])* $name:ident) => {
        $(#[$attr])*
        #[derive(Debug, Clone, PartialEq)]
        pub struct $name {
            url: Url,
            metadata: LayerMetadata,
            query: QueryParameters,
        }

        impl $name {
            pub fn new(url: Url, metadata: LayerMetadata) -> Self {
                Self {
                    url,
                    metadata,
                    query: QueryParameters::default(),
                }
            }

            pub fn metadata(&self) -> &LayerMetadata {
                &self.metadata
            }

            pub fn query(&self) -> &QueryParameters {
                &self.query
            }

            pub fn query_mut(&mut self) -> &mut QueryParameters {
                &mut self.query
            }
        }

        impl RemoteResource for $name {
            fn url(&self) -> &Url {
                &self.url
            }

            fn fields(&self) -> Option<&FieldListing> {
                self.metadata.fields.as_ref()
            }

            fn spatial_reference(&self) -> SpatialReferenceOption {
                self.metadata
                    .extent
                    .as_ref()
                    .and_then(|extent| extent.spatial_reference.as_ref())
                    .map_or(SpatialReferenceOption::Unreferenced, Into::into)
            }
        }
    };
}

macro_rules! server_handle {
    ($(#[$attr:meta])* $name:ident) => {
        $(#[$attr])*
        #[derive(Debug, Clone, PartialEq)]
        pub struct $name {
            url: Url,
            metadata: ServiceMetadata,
        }

        impl $name {
            pub fn new(url: Url, metadata: ServiceMetadata) -> Self {
                Self { url, metadata }
            }

            pub fn metadata(&self) -> &ServiceMetadata {
                &self.metadata
            }
        }

        impl RemoteResource for $name {
            fn url(&self) -> &Url {
                &self.url
            }

            fn layers(&self) -> Option<&ItemListing> {
                self.metadata.layers.as_ref()
            }

            fn tables(&self) -> Option<&ItemListing> {
                self.metadata.tables.as_ref()
            }

            fn spatial_reference(&self) -> SpatialReferenceOption {
                self.metadata
                    .spatial_reference
                    .as_ref()
                    .map_or(SpatialReferenceOption::Unreferenced, Into::into)
            }
        }
    };
}

layer_handle!(
    /// A layer with geometries
    FeatureLayer
);
layer_handle!(
    /// A layer without geometries
    Table
);
server_handle!(FeatureServer);
server_handle!(MapServer);

#[derive(Debug, Clone, PartialEq)]
pub struct ImageServer {
    url: Url,
    metadata: ImageServiceMetadata,
}

impl ImageServer {
    pub fn new(url: Url, metadata: ImageServiceMetadata) -> Self {
        Self { url, metadata }
    }

    pub fn metadata(&self) -> &ImageServiceMetadata {
        &self.metadata
    }
}

impl RemoteResource for ImageServer {
    fn url(&self) -> &Url {
        &self.url
    }

    fn fields(&self) -> Option<&FieldListing> {
        self.metadata.fields.as_ref()
    }

    fn spatial_reference(&self) -> SpatialReferenceOption {
        self.metadata
            .extent
            .as_ref()
            .and_then(|extent| extent.spatial_reference.as_ref())
            .map_or(SpatialReferenceOption::Unreferenced, Into::into)
    }
}

/// Any resource an ArcGIS REST endpoint can be opened as
#[derive(Debug, Clone, PartialEq, IntoStaticStr)]
pub enum Resource {
    FeatureLayer(FeatureLayer),
    Table(Table),
    FeatureServer(FeatureServer),
    MapServer(MapServer),
    ImageServer(ImageServer),
}

impl Resource {
    /// Picks the variant from the `type` of a layer response or, for service
    /// roots, from the last segment of the url.
    pub fn from_json(url: Url, json: Value) -> Result<Self> {
        match json.get("type").and_then(Value::as_str) {
            Some("Feature Layer") => {
                return Ok(Resource::FeatureLayer(FeatureLayer::new(
                    url,
                    serde_json::from_value(json)?,
                )));
            }
            Some("Table") => {
                return Ok(Resource::Table(Table::new(url, serde_json::from_value(json)?)));
            }
            _ => {}
        }

        let service_type = url
            .path_segments()
            .and_then(|mut segments| segments.rfind(|s| !s.is_empty()))
            .map(str::to_owned);

        match service_type.as_deref() {
            Some("FeatureServer") => Ok(Resource::FeatureServer(FeatureServer::new(
                url,
                serde_json::from_value(json)?,
            ))),
            Some("MapServer") => Ok(Resource::MapServer(MapServer::new(
                url,
                serde_json::from_value(json)?,
            ))),
            Some("ImageServer") => Ok(Resource::ImageServer(ImageServer::new(
                url,
                serde_json::from_value(json)?,
            ))),
            _ => Err(Error::UnsupportedResource { url }),
        }
    }

    pub fn type_name(&self) -> &'static str {
        self.into()
    }

    fn as_remote(&self) -> &dyn RemoteResource {
        match self {
            Resource::FeatureLayer(layer) => layer,
            Resource::Table(table) => table,
            Resource::FeatureServer(server) => server,
            Resource::MapServer(server) => server,
            Resource::ImageServer(server) => server,
        }
    }
}

impl RemoteResource for Resource {
    fn url(&self) -> &Url {
        self.as_remote().url()
    }

    fn fields(&self) -> Option<&FieldListing> {
        self.as_remote().fields()
    }

    fn layers(&self) -> Option<&ItemListing> {
        self.as_remote().layers()
    }

    fn tables(&self) -> Option<&ItemListing> {
        self.as_remote().tables()
    }

    fn spatial_reference(&self) -> SpatialReferenceOption {
        self.as_remote().spatial_reference()
    }
}

/// The resources that carry query state
#[derive(Debug, Clone, PartialEq, IntoStaticStr)]
pub enum Layer {
    FeatureLayer(FeatureLayer),
    Table(Table),
}

impl Layer {
    pub fn type_name(&self) -> &'static str {
        self.into()
    }

    pub fn metadata(&self) -> &LayerMetadata {
        match self {
            Layer::FeatureLayer(layer) => layer.metadata(),
            Layer::Table(table) => table.metadata(),
        }
    }
}

impl RemoteResource for Layer {
    fn url(&self) -> &Url {
        match self {
            Layer::FeatureLayer(layer) => layer.url(),
            Layer::Table(table) => table.url(),
        }
    }

    fn fields(&self) -> Option<&FieldListing> {
        match self {
            Layer::FeatureLayer(layer) => layer.fields(),
            Layer::Table(table) => table.fields(),
        }
    }

    fn spatial_reference(&self) -> SpatialReferenceOption {
        match self {
            Layer::FeatureLayer(layer) => layer.spatial_reference(),
            Layer::Table(table) => table.spatial_reference(),
        }
    }
}

impl From<FeatureLayer> for Layer {
    fn from(layer: FeatureLayer) -> Self {
        Layer::FeatureLayer(layer)
    }
}

impl From<Table> for Layer {
    fn from(table: Table) -> Self {
        Layer::Table(table)
    }
}

impl From<Layer> for Resource {
    fn from(layer: Layer) -> Self {
        match layer {
            Layer::FeatureLayer(layer) => Resource::FeatureLayer(layer),
            Layer::Table(table) => Resource::Table(table),
        }
    }
}

impl TryFrom<Resource> for Layer {
    type Error = Error;

    fn try_from(resource: Resource) -> Result<Self> {
        match resource {
            Resource::FeatureLayer(layer) => Ok(Layer::FeatureLayer(layer)),
            Resource::Table(table) => Ok(Layer::Table(table)),
            other => Err(Error::UnsupportedLayerType {
                url: other.url().clone(),
                found: other.type_name(),
            }),
        }
    }
}
