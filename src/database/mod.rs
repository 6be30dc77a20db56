pub mod memory;
pub mod models;
pub mod postgres;
pub mod store;

pub use memory::MemoryPhotoStore;
pub use postgres::PgPhotoStore;
pub use store::{PhotoStore, StoreError};
