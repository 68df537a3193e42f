pub mod animation;
pub mod config;
pub mod error;
pub mod mesh;
pub mod surface;
pub mod viewer;
#[cfg(feature = "window")]
pub mod window;

pub use error::{Error, Result};
