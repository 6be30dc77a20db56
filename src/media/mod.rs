pub mod storage;
pub mod url;

pub use storage::{MediaError, MediaStorage};
pub use url::public_url;
