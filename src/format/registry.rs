//! Format records and lookup by magic bytes or filename extension.

use std::fmt;
use std::fs::File;
use std::io::{BufReader, BufWriter, Cursor, Read, Write};
use std::path::Path;
use std::sync::{LazyLock, PoisonError, RwLock};

use tracing::{debug, info_span, trace};

use crate::color::ColorModel;
use crate::common::{ImageError, Result};
use crate::format::Options;
use crate::image::{Image, Raster};

/// Dimensions and model of an image, known without decoding its pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    pub color_model: ColorModel,
    pub width: usize,
    pub height: usize,
}

pub type DecodeConfigFn = fn(&mut dyn Read) -> Result<Config>;
pub type DecodeFn = fn(&mut dyn Read, Option<&dyn Options>) -> Result<Box<dyn Raster>>;
pub type EncodeFn = fn(&mut dyn Write, &dyn Image, Option<&dyn Options>) -> Result<()>;

/// A registered codec.
#[derive(Clone)]
pub struct Format {
    pub name: String,
    /// Lowercase suffixes including the dot, e.g. `".rawp"`.
    pub extensions: Vec<String>,
    /// Byte prefixes; `?` matches any single byte.
    pub magics: Vec<Vec<u8>>,
    pub decode_config: DecodeConfigFn,
    pub decode: DecodeFn,
    pub encode: EncodeFn,
}

impl Format {
    pub fn new(
        name: &str,
        extensions: &[&str],
        magics: &[&[u8]],
        decode_config: DecodeConfigFn,
        decode: DecodeFn,
        encode: EncodeFn,
    ) -> Self {
        Self {
            name: name.to_string(),
            extensions: extensions.iter().map(|e| e.to_ascii_lowercase()).collect(),
            magics: magics.iter().map(|m| m.to_vec()).collect(),
            decode_config,
            decode,
            encode,
        }
    }

    /// True if any magic matches the start of `prefix`.
    pub fn matches_prefix(&self, prefix: &[u8]) -> bool {
        self.magics
            .iter()
            .any(|m| prefix.len() >= m.len() && matches(m, &prefix[..m.len()]))
    }

    /// Case-insensitive match of a dot-extension such as `".TIF"`.
    pub fn has_extension(&self, ext: &str) -> bool {
        let ext = ext.to_ascii_lowercase();
        self.extensions.iter().any(|e| *e == ext)
    }
}

impl fmt::Debug for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Format")
            .field("name", &self.name)
            .field("extensions", &self.extensions)
            .field("magics", &self.magics)
            .finish_non_exhaustive()
    }
}

/// Byte-wise wildcard comparison: equal lengths, and every byte of `b`
/// equals the pattern byte or the pattern byte is `?`.
pub fn matches(magic: &[u8], b: &[u8]) -> bool {
    magic.len() == b.len() && magic.iter().zip(b).all(|(&m, &c)| m == b'?' || m == c)
}

/// An ordered list of formats. Earlier registrations win ties.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    formats: Vec<Format>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding the RAWP and TIFF codecs.
    pub fn with_builtin() -> Self {
        let mut r = Self::new();
        r.register(crate::rawp::format());
        r.register(crate::tiff::format());
        r
    }

    pub fn register(&mut self, format: Format) {
        debug!("Registering format {}", format.name);
        self.formats.push(format);
    }

    pub fn formats(&self) -> &[Format] {
        &self.formats
    }

    pub fn find(&self, name: &str) -> Option<&Format> {
        self.formats.iter().find(|f| f.name == name)
    }

    /// Format whose extension list holds the extension of `filename`.
    pub fn sniff_by_name(&self, filename: impl AsRef<Path>) -> Option<&Format> {
        let ext = filename.as_ref().extension()?.to_str()?;
        let ext = format!(".{}", ext);
        self.formats.iter().find(|f| f.has_extension(&ext))
    }

    /// First format whose magic matches the start of `prefix`.
    pub fn sniff_prefix(&self, prefix: &[u8]) -> Option<&Format> {
        let found = self.formats.iter().find(|f| f.matches_prefix(prefix));
        trace!(
            "Sniffed {} prefix bytes: {}",
            prefix.len(),
            found.map_or("no match", |f| f.name.as_str())
        );
        found
    }

    /// Reads just enough of `r` to identify its format. Returns the format
    /// and the bytes consumed, which the caller must replay.
    fn sniff(&self, r: &mut dyn Read) -> Result<(&Format, Vec<u8>)> {
        let n = self
            .formats
            .iter()
            .flat_map(|f| f.magics.iter().map(Vec::len))
            .max()
            .unwrap_or(0);
        let mut prefix = Vec::with_capacity(n);
        (&mut *r).take(n as u64).read_to_end(&mut prefix)?;
        let format = self.sniff_prefix(&prefix).ok_or(ImageError::UnknownFormat)?;
        Ok((format, prefix))
    }

    /// Decodes `r` with the codec its magic selects.
    pub fn decode(&self, r: &mut dyn Read) -> Result<(Box<dyn Raster>, String)> {
        self.decode_with(r, None)
    }

    pub fn decode_with(
        &self,
        r: &mut dyn Read,
        opt: Option<&dyn Options>,
    ) -> Result<(Box<dyn Raster>, String)> {
        let (format, prefix) = self.sniff(r)?;
        let mut rest = Cursor::new(prefix).chain(r);
        let img = (format.decode)(&mut rest, opt)?;
        Ok((img, format.name.clone()))
    }

    pub fn decode_config(&self, r: &mut dyn Read) -> Result<(Config, String)> {
        let (format, prefix) = self.sniff(r)?;
        let mut rest = Cursor::new(prefix).chain(r);
        let config = (format.decode_config)(&mut rest)?;
        Ok((config, format.name.clone()))
    }

    /// Encodes with the format registered under `name`.
    pub fn encode(
        &self,
        name: &str,
        w: &mut dyn Write,
        m: &dyn Image,
        opt: Option<&dyn Options>,
    ) -> Result<()> {
        let format = self.find(name).ok_or(ImageError::UnknownFormat)?;
        (format.encode)(w, m, opt)
    }

    /// Reads and decodes a file, choosing the codec by magic.
    pub fn load(&self, path: impl AsRef<Path>) -> Result<(Box<dyn Raster>, String)> {
        let path = path.as_ref();
        let _span = info_span!("load", path = %path.display()).entered();
        let mut r = BufReader::new(File::open(path)?);
        self.decode(&mut r)
    }

    /// Encodes `m` to a file, choosing the codec by extension.
    pub fn save(
        &self,
        path: impl AsRef<Path>,
        m: &dyn Image,
        opt: Option<&dyn Options>,
    ) -> Result<()> {
        let path = path.as_ref();
        let _span = info_span!("save", path = %path.display()).entered();
        let format = self.sniff_by_name(path).ok_or(ImageError::UnknownFormat)?;
        let mut w = BufWriter::new(File::create(path)?);
        (format.encode)(&mut w, m, opt)?;
        w.flush()?;
        Ok(())
    }
}

static DEFAULT_REGISTRY: LazyLock<RwLock<Registry>> =
    LazyLock::new(|| RwLock::new(Registry::with_builtin()));

/// A copy of the process-wide registry, so no lock is held while a codec runs.
pub fn default_registry() -> Registry {
    DEFAULT_REGISTRY
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .clone()
}

/// Appends `format` to the process-wide registry, after the built-in codecs.
pub fn register_format(format: Format) {
    DEFAULT_REGISTRY
        .write()
        .unwrap_or_else(PoisonError::into_inner)
        .register(format);
}

pub fn decode(r: &mut dyn Read) -> Result<(Box<dyn Raster>, String)> {
    default_registry().decode(r)
}

pub fn decode_config(r: &mut dyn Read) -> Result<(Config, String)> {
    default_registry().decode_config(r)
}

pub fn encode(
    name: &str,
    w: &mut dyn Write,
    m: &dyn Image,
    opt: Option<&dyn Options>,
) -> Result<()> {
    default_registry().encode(name, w, m, opt)
}

pub fn load(path: impl AsRef<Path>) -> Result<(Box<dyn Raster>, String)> {
    default_registry().load(path)
}

pub fn save(path: impl AsRef<Path>, m: &dyn Image, opt: Option<&dyn Options>) -> Result<()> {
    default_registry().save(path, m, opt)
}
