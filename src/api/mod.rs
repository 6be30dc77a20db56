pub mod format;

pub use format::{OwnerView, PhotoView};
