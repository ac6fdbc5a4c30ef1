//! Profile image storage adapters.
//!
//! - `local` - Files on local disk (development, single-node deployments)
//! - `cloudinary` - Signed uploads to Cloudinary

mod cloudinary;
mod local;

pub use cloudinary::{CloudinaryConfig, CloudinaryImageStorage};
pub use local::LocalImageStorage;
