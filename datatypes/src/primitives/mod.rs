mod chunk_plan;
mod field;
mod item_listing;

pub use chunk_plan::{ChunkPlan, chunk_indices};
pub use field::{Field, FieldListing, FieldType};
pub use item_listing::{ItemListing, ValueKind};
