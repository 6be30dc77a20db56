pub mod photo;

pub use photo::{NewPhoto, Owner, Photo, PhotoRow};
