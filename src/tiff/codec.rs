use std::io::{Cursor, Read, Write};

use ::tiff::ColorType;
use ::tiff::decoder::{Decoder, DecodingResult};
use ::tiff::encoder::compression::DeflateLevel;
use ::tiff::encoder::{Compression, TiffEncoder, colortype};
use ::tiff::tags::Predictor;
use tracing::{debug, instrument};

use crate::color::{
    ColorModel, Gray, Gray16, Gray32f, GrayA, GrayA32, Pixel, Rgb, Rgb48, Rgb96f, Rgba, Rgba64,
    Rgba128f, Sample,
};
use crate::common::{Endian, ImageError, Result};
use crate::format::{Config, Format, Options};
use crate::image::{Image, ImageBuf, Raster, Rect, convert_image};
use crate::tiff::types::{TiffCompression, TiffOptions};

/// The TIFF format record.
pub fn format() -> Format {
    Format::new(
        "tiff",
        &[".tif", ".tiff"],
        &[b"II*\x00", b"MM\x00*"],
        decode_config,
        decode,
        encode,
    )
}

fn decode_err(e: ::tiff::TiffError) -> ImageError {
    ImageError::DecodeError(e.to_string())
}

fn encode_err(e: ::tiff::TiffError) -> ImageError {
    ImageError::EncodeError(e.to_string())
}

fn open(r: &mut dyn Read) -> Result<Decoder<Cursor<Vec<u8>>>> {
    let mut data = Vec::new();
    r.read_to_end(&mut data)?;
    Decoder::new(Cursor::new(data)).map_err(decode_err)
}

/// The model a TIFF color type decodes to. 32-bit gray and color layouts
/// are read as floats.
fn model_of(ct: ColorType) -> Option<ColorModel> {
    match ct {
        ColorType::Gray(8) => Some(ColorModel::Gray),
        ColorType::Gray(16) => Some(ColorModel::Gray16),
        ColorType::Gray(32) => Some(ColorModel::Gray32f),
        ColorType::GrayA(8) => Some(ColorModel::GrayA),
        ColorType::GrayA(16) => Some(ColorModel::GrayA32),
        ColorType::RGB(8) => Some(ColorModel::Rgb),
        ColorType::RGB(16) => Some(ColorModel::Rgb48),
        ColorType::RGB(32) => Some(ColorModel::Rgb96f),
        ColorType::RGBA(8) => Some(ColorModel::Rgba),
        ColorType::RGBA(16) => Some(ColorModel::Rgba64),
        ColorType::RGBA(32) => Some(ColorModel::Rgba128f),
        _ => None,
    }
}

pub fn decode_config(r: &mut dyn Read) -> Result<Config> {
    let mut decoder = open(r)?;
    let (width, height) = decoder.dimensions().map_err(decode_err)?;
    let ct = decoder.colortype().map_err(decode_err)?;
    let color_model = model_of(ct)
        .ok_or_else(|| ImageError::DecodeError(format!("unsupported TIFF color type {:?}", ct)))?;
    Ok(Config {
        color_model,
        width: width as usize,
        height: height as usize,
    })
}

#[instrument(name = "tiff_decode", skip_all)]
pub fn decode(r: &mut dyn Read, opt: Option<&dyn Options>) -> Result<Box<dyn Raster>> {
    let mut decoder = open(r)?;
    let (width, height) = decoder.dimensions().map_err(decode_err)?;
    let ct = decoder.colortype().map_err(decode_err)?;
    debug!("Decoding TIFF image: {}x{} {:?}", width, height, ct);
    let (w, h) = (width as usize, height as usize);

    let img = match (ct, decoder.read_image().map_err(decode_err)?) {
        (ColorType::Gray(8), DecodingResult::U8(v)) => from_samples::<Gray>(w, h, &v)?,
        (ColorType::Gray(16), DecodingResult::U16(v)) => from_samples::<Gray16>(w, h, &v)?,
        (ColorType::Gray(32), DecodingResult::F32(v)) => from_samples::<Gray32f>(w, h, &v)?,
        (ColorType::GrayA(8), DecodingResult::U8(v)) => from_samples::<GrayA>(w, h, &v)?,
        (ColorType::GrayA(16), DecodingResult::U16(v)) => from_samples::<GrayA32>(w, h, &v)?,
        (ColorType::RGB(8), DecodingResult::U8(v)) => from_samples::<Rgb>(w, h, &v)?,
        (ColorType::RGB(16), DecodingResult::U16(v)) => from_samples::<Rgb48>(w, h, &v)?,
        (ColorType::RGB(32), DecodingResult::F32(v)) => from_samples::<Rgb96f>(w, h, &v)?,
        (ColorType::RGBA(8), DecodingResult::U8(v)) => from_samples::<Rgba>(w, h, &v)?,
        (ColorType::RGBA(16), DecodingResult::U16(v)) => from_samples::<Rgba64>(w, h, &v)?,
        (ColorType::RGBA(32), DecodingResult::F32(v)) => from_samples::<Rgba128f>(w, h, &v)?,
        (ct, _) => {
            return Err(ImageError::DecodeError(format!(
                "unsupported TIFF color type {:?}",
                ct
            )));
        }
    };

    match opt.and_then(|o| o.color_model()) {
        Some(model) if model != img.color_model() => convert_image(img.as_image(), model),
        _ => Ok(img),
    }
}

/// Builds an image from interleaved, row-major samples.
fn from_samples<P: Pixel>(w: usize, h: usize, v: &[P::Sample]) -> Result<Box<dyn Raster>> {
    if v.len() != w * h * P::CHANNELS {
        return Err(ImageError::BadDataSize {
            expected: w * h * P::CHANNELS,
            actual: v.len(),
        });
    }
    let img = ImageBuf::<P>::new(Rect::from_size(w, h));
    {
        let width = <P::Sample as Sample>::KIND.byte_width();
        let mut pix = img.pix_mut();
        for (s, b) in v.iter().zip(pix.chunks_exact_mut(width)) {
            s.put(b, Endian::Big);
        }
    }
    Ok(Box::new(img))
}

/// Interleaved samples of `m` as `P`, row by row.
fn samples_of<P: Pixel>(m: &dyn Image) -> Vec<P::Sample> {
    let r = m.bounds();
    let (w, h) = r.size();
    let mut out = Vec::with_capacity(w * h * P::CHANNELS);
    let mut push = |p: P| out.extend(p.to_array().into_iter().take(P::CHANNELS));
    if let Some(src) = m.as_any().downcast_ref::<ImageBuf<P>>() {
        let stride = src.stride();
        let pix = src.pix();
        for y in 0..h {
            for b in pix[y * stride..y * stride + w * P::BYTES].chunks_exact(P::BYTES) {
                push(P::read(b, Endian::Big));
            }
        }
    } else {
        for y in r.min.y..r.max.y {
            for x in r.min.x..r.max.x {
                push(P::from_color(m.at(x, y)));
            }
        }
    }
    out
}

/// Models TIFF stores natively; others are written as 8-bit RGBA.
fn tiff_model(model: ColorModel) -> ColorModel {
    match model {
        ColorModel::Gray
        | ColorModel::Gray16
        | ColorModel::Gray32f
        | ColorModel::Rgb
        | ColorModel::Rgb48
        | ColorModel::Rgb96f
        | ColorModel::Rgba
        | ColorModel::Rgba64
        | ColorModel::Rgba128f => model,
        _ => ColorModel::Rgba,
    }
}

#[instrument(name = "tiff_encode", skip_all)]
pub fn encode(output: &mut dyn Write, m: &dyn Image, opt: Option<&dyn Options>) -> Result<()> {
    let config = opt
        .and_then(|o| o.as_any().downcast_ref::<TiffOptions>())
        .cloned()
        .unwrap_or_default();
    let model = tiff_model(opt.and_then(|o| o.color_model()).unwrap_or(m.color_model()));

    let (w, h) = m.bounds().size();
    if w == 0 || h == 0 || w > u32::MAX as usize || h > u32::MAX as usize {
        return Err(ImageError::InvalidDimensions(w, h));
    }
    let (width, height) = (w as u32, h as u32);
    debug!("Encoding TIFF image: {}x{} as {}", width, height, model);

    let compression = match config.compression {
        TiffCompression::None => Compression::Uncompressed,
        TiffCompression::Lzw => Compression::Lzw,
        TiffCompression::DeflateFast => Compression::Deflate(DeflateLevel::Fast),
        TiffCompression::DeflateBalanced => Compression::Deflate(DeflateLevel::Balanced),
        TiffCompression::DeflateBest => Compression::Deflate(DeflateLevel::Best),
    };

    let mut buffer = Vec::new();
    {
        let mut encoder = TiffEncoder::new(Cursor::new(&mut buffer))
            .map_err(encode_err)?
            .with_compression(compression);

        let integer = !matches!(
            model,
            ColorModel::Gray32f | ColorModel::Rgb96f | ColorModel::Rgba128f
        );
        if let (true, Some(predictor_val)) = (integer, config.predictor) {
            let predictor = match predictor_val {
                2 => Predictor::Horizontal,
                _ => Predictor::None,
            };
            encoder = encoder.with_predictor(predictor);
        }

        match model {
            ColorModel::Gray => {
                encoder.write_image::<colortype::Gray8>(width, height, &samples_of::<Gray>(m))
            }
            ColorModel::Gray16 => {
                encoder.write_image::<colortype::Gray16>(width, height, &samples_of::<Gray16>(m))
            }
            ColorModel::Gray32f => encoder.write_image::<colortype::Gray32Float>(
                width,
                height,
                &samples_of::<Gray32f>(m),
            ),
            ColorModel::Rgb => {
                encoder.write_image::<colortype::RGB8>(width, height, &samples_of::<Rgb>(m))
            }
            ColorModel::Rgb48 => {
                encoder.write_image::<colortype::RGB16>(width, height, &samples_of::<Rgb48>(m))
            }
            ColorModel::Rgb96f => encoder.write_image::<colortype::RGB32Float>(
                width,
                height,
                &samples_of::<Rgb96f>(m),
            ),
            ColorModel::Rgba64 => {
                encoder.write_image::<colortype::RGBA16>(width, height, &samples_of::<Rgba64>(m))
            }
            ColorModel::Rgba128f => encoder.write_image::<colortype::RGBA32Float>(
                width,
                height,
                &samples_of::<Rgba128f>(m),
            ),
            _ => encoder.write_image::<colortype::RGBA8>(width, height, &samples_of::<Rgba>(m)),
        }
        .map_err(encode_err)?;
    }

    output.write_all(&buffer)?;
    debug!("TIFF encoding complete: {} bytes", buffer.len());
    Ok(())
}
