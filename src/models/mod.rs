pub mod cache;
pub mod training_load;

pub use cache::{CacheEntry, DataKind, DocumentKey, StoredDocument};
pub use training_load::TrainingLoadSnapshot;
