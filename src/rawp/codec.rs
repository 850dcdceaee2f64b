use std::borrow::Cow;
use std::io::{Read, Write};

use tracing::{debug, instrument};

use crate::color::{ColorModel, SampleKind};
use crate::common::{ImageError, Result};
use crate::format::{Config, Format, Options};
use crate::image::{Image, Raster, convert_image};
use crate::rawp::header::Header;
use crate::rawp::pix_decoder::PixDecoder;
use crate::rawp::pix_encoder::PixEncoder;
use crate::rawp::types::{DataType, HEADER_SIZE, MAGIC_PATTERN, RawpOptions};

/// The RAWP format record.
pub fn format() -> Format {
    Format::new(
        "rawp",
        &[".rawp"],
        &[MAGIC_PATTERN],
        decode_config,
        decode,
        encode,
    )
}

/// The container layout an image of `model` is stored with. Models outside
/// the nine container layouts are promoted to 8-bit RGBA.
pub fn container_layout(model: ColorModel) -> (usize, SampleKind) {
    match model {
        ColorModel::Gray => (1, SampleKind::U8),
        ColorModel::Gray16 => (1, SampleKind::U16),
        ColorModel::Gray32f => (1, SampleKind::F32),
        ColorModel::Rgb => (3, SampleKind::U8),
        ColorModel::Rgb48 => (3, SampleKind::U16),
        ColorModel::Rgb96f => (3, SampleKind::F32),
        ColorModel::Rgba => (4, SampleKind::U8),
        ColorModel::Rgba64 => (4, SampleKind::U16),
        ColorModel::Rgba128f => (4, SampleKind::F32),
        _ => (4, SampleKind::U8),
    }
}

/// Validates the whole stream (header, payload size, checksum and the
/// Snappy length) without decoding pixels.
pub fn decode_config(r: &mut dyn Read) -> Result<Config> {
    let mut data = Vec::new();
    r.read_to_end(&mut data)?;
    let hdr = Header::parse(&data)?;
    let payload = &data[HEADER_SIZE..];
    hdr.verify_payload(payload)?;
    if hdr.use_snappy {
        check_decompressed_len(payload, hdr.pixel_len())?;
    }
    Ok(Config {
        color_model: hdr.color_model(),
        width: hdr.width as usize,
        height: hdr.height as usize,
    })
}

#[instrument(name = "rawp_decode", skip_all)]
pub fn decode(r: &mut dyn Read, opt: Option<&dyn Options>) -> Result<Box<dyn Raster>> {
    let mut data = Vec::new();
    r.read_to_end(&mut data)?;
    decode_bytes(&data, None, opt)
}

/// Decodes a complete RAWP stream. A `buf` of the matching concrete type
/// that covers the image is reused instead of allocating.
pub fn decode_bytes(
    data: &[u8],
    buf: Option<&dyn Raster>,
    opt: Option<&dyn Options>,
) -> Result<Box<dyn Raster>> {
    let hdr = Header::parse(data)?;
    let payload = &data[HEADER_SIZE..];
    hdr.verify_payload(payload)?;
    debug!("RAWP header: {}", hdr);

    let decoder = PixDecoder::for_header(&hdr)?;
    let pixels = if hdr.use_snappy {
        Cow::Owned(decompress(payload, decoder.data_len())?)
    } else {
        Cow::Borrowed(payload)
    };
    let img = decoder.decode(&pixels, buf)?;

    match opt.and_then(|o| o.color_model()) {
        Some(model) if model != img.color_model() => {
            debug!("Converting decoded {} image to {}", img.color_model(), model);
            convert_image(img.as_image(), model)
        }
        _ => Ok(img),
    }
}

fn check_decompressed_len(payload: &[u8], expected: usize) -> Result<()> {
    let n = snap::raw::decompress_len(payload)
        .map_err(|e| ImageError::BadCompression(e.to_string()))?;
    if n != expected {
        return Err(ImageError::BadCompression(format!(
            "decompressed length {} does not match {} pixel bytes",
            n, expected
        )));
    }
    Ok(())
}

fn decompress(payload: &[u8], expected: usize) -> Result<Vec<u8>> {
    check_decompressed_len(payload, expected)?;
    snap::raw::Decoder::new()
        .decompress_vec(payload)
        .map_err(|e| ImageError::BadCompression(e.to_string()))
}

#[instrument(name = "rawp_encode", skip_all)]
pub fn encode(w: &mut dyn Write, m: &dyn Image, opt: Option<&dyn Options>) -> Result<()> {
    let data = encode_to_vec(m, opt)?;
    w.write_all(&data)?;
    Ok(())
}

/// Encodes `m` into a complete RAWP stream. Only [`RawpOptions`] can turn
/// on Snappy; any other options contribute their color model.
pub fn encode_to_vec(m: &dyn Image, opt: Option<&dyn Options>) -> Result<Vec<u8>> {
    let use_snappy = opt
        .and_then(|o| o.as_any().downcast_ref::<RawpOptions>())
        .is_some_and(|o| o.use_snappy);

    // Models without an interleaved layout go straight to the promoted layout.
    let model = opt.and_then(|o| o.color_model()).unwrap_or(m.color_model());
    let converted;
    let m: &dyn Image = if model != m.color_model() && model.layout().is_some() {
        converted = convert_image(m, model)?;
        converted.as_image()
    } else {
        m
    };

    let (width, height) = m.bounds().size();
    if !(1..=0xFFFF).contains(&width) || !(1..=0xFFFF).contains(&height) {
        return Err(ImageError::InvalidDimensions(width, height));
    }

    let (channels, kind) = container_layout(model);
    let pixels = PixEncoder::new(channels, kind)?.encode(m, None)?;
    let pixel_len = pixels.len();
    let payload = if use_snappy {
        snap::raw::Encoder::new()
            .compress_vec(&pixels)
            .map_err(|e| ImageError::EncodeError(e.to_string()))?
    } else {
        pixels
    };
    let data_size = u32::try_from(payload.len()).map_err(|_| {
        ImageError::EncodeError(format!("payload of {} bytes is too large", payload.len()))
    })?;

    let hdr = Header {
        width: width as u16,
        height: height as u16,
        channels: channels as u8,
        depth: kind.bits() as u8,
        data_type: DataType::of(kind),
        use_snappy,
        data_size,
        checksum: crc32fast::hash(&payload),
    };
    debug!(
        "Encoded RAWP {}: {} pixel bytes, {} stored",
        hdr.color_model(),
        pixel_len,
        payload.len()
    );

    let mut out = Vec::with_capacity(HEADER_SIZE + payload.len());
    out.extend_from_slice(&hdr.to_bytes());
    out.extend_from_slice(&payload);
    Ok(out)
}
