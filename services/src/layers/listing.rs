use crate::error::Result;
use crate::layers::handle::RemoteResource;
use arcrest_datatypes::primitives::{FieldListing, ItemListing};

/// The fields of `handle`, or an empty listing if it has none.
pub fn list_fields<R: RemoteResource + ?Sized>(handle: &R) -> FieldListing {
    handle.fields().cloned().unwrap_or_else(FieldListing::empty)
}

/// The layers of `handle` followed by its tables.
pub fn list_items<R: RemoteResource + ?Sized>(handle: &R) -> Result<ItemListing> {
    let layers = handle.layers().cloned().unwrap_or_default();
    let tables = handle.tables().cloned().unwrap_or_default();

    Ok(layers.concat(tables)?)
}
