//! Pixtone Shared Types
//!
//! This crate holds the value types that every stage of the image/audio codec
//! agrees on:
//!
//! - [`Image`] - an 8-bit raster with a [`ColorType`] and a flat channel buffer
//! - [`CodecParams`] - the versioned parameter set both directions must share
//! - [`StageError`] - stable error codes for reporting failures from any stage
//!
//! # Example
//!
//! ```
//! use pixtone_spec::{CodecParams, ColorType, Image};
//!
//! let image = Image::new(2, 1, ColorType::Rgb, vec![10, 20, 30, 200, 210, 220]).unwrap();
//! assert_eq!(image.component_count(), 6);
//!
//! let params = CodecParams::default();
//! assert!(params.validate().is_ok());
//! assert_eq!(params.pixel_frequency(20), 200.0);
//! ```

pub mod color;
pub mod error;
pub mod image;
pub mod params;

pub use color::ColorType;
pub use error::{LayoutError, StageError};
pub use image::Image;
pub use params::{CodecParams, ParamsError, MAX_SAMPLE_RATE, PARAMS_VERSION};
