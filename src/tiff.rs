//! TIFF module
//!
//! A TIFF codec on top of the `tiff` crate, registered like any other format.

pub mod codec;
pub mod types;


pub use codec::{decode, decode_config, encode, format};
pub use types::{TiffCompression, TiffOptions, TiffOptionsBuilder};
