pub mod actions;
pub mod data;
pub mod models;

pub use data::{UploadData, UploadInput};
pub use models::Upload;
