use std::any::Any;

use crate::color::ColorModel;

/// Encode/decode hints shared by every codec.
pub trait Options: Send + Sync {
    /// Model to convert into, if any.
    fn color_model(&self) -> Option<ColorModel>;

    fn lossless(&self) -> bool {
        true
    }

    /// Quality in `0.0..=100.0`; meaningless for lossless codecs.
    fn quality(&self) -> f32 {
        100.0
    }

    /// Lets a codec recover its own option type.
    fn as_any(&self) -> &dyn Any;
}
