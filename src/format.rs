//! Format module
//!
//! The codec options interface and the registry that picks a codec by
//! magic bytes or filename extension.

pub mod options;
pub mod registry;

#[cfg(test)]
mod tests;

pub use options::Options;
pub use registry::{
    Config, DecodeConfigFn, DecodeFn, EncodeFn, Format, Registry, decode, decode_config,
    default_registry, encode, load, matches, register_format, save,
};
