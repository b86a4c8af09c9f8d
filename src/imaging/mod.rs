//! Thumbnail generation — pure Rust, zero external dependencies.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Identify** | `image::ImageReader` with content-based format sniffing |
//! | **Scale-to-fit** | [`scale_to_fit`] (pure math, no I/O) |
//! | **Resize → JPEG** | nearest-neighbour resample + `JpegEncoder` |
//!
//! The module is split into:
//! - **Calculations**: Pure functions for dimension math (unit testable)
//! - **Parameters**: Data structures describing thumbnail operations
//! - **Backend**: [`ImageBackend`] trait + [`RustBackend`]

pub mod backend;
mod calculations;
mod params;
pub mod rust_backend;

pub use backend::{BackendError, Dimensions, ImageBackend};
pub use calculations::{scale_ratio, scale_to_fit};
pub use params::{Quality, ThumbnailParams};
pub use rust_backend::RustBackend;
