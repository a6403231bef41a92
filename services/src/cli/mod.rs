mod chunks;
mod listing;

pub use chunks::{Chunks, plan_chunks};
pub use listing::{ListFields, ListItems, list_fields, list_items};
