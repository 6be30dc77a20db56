pub mod photo_service;

pub use photo_service::{FieldErrors, ImageInput, PhotoError, PhotoService, PhotoUpload};
