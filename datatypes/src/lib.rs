pub mod error;
pub mod primitives;
pub mod spatial_reference;
pub mod util;
