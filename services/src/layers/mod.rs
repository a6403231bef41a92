pub mod handle;
pub mod listing;
pub mod query;

pub use handle::{
    FeatureLayer, FeatureServer, ImageServer, Layer, MapServer, RemoteResource, Resource, Table,
};
pub use listing::{list_fields, list_items};
pub use query::{
    LayerSelector, QueryParameters, Queryable, clear_query, get_layer, refresh_layer,
};
