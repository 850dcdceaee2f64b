//! Common utilities module
//!
//! This module contains the error type and the byte-order helpers shared by
//! the color, image and codec modules.

pub mod bytes;
pub mod error;

pub use bytes::Endian;
pub use error::{ImageError, Result};
