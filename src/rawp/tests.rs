use super::*;
use crate::color::{
    ColorModel, Gray, Gray16, Gray32f, GrayA, Pixel, Rgb, Rgb48, Rgb96f, Rgba, Rgba64, Rgba128f,
    SampleKind, YCbCr,
};
use crate::common::ImageError;
use crate::image::{
    Gray16Image, GrayImage, ImageBuf, Raster, Rect, RgbImage, SubsampleRatio, YCbCrImage,
    new_image,
};

fn gray_8x8() -> GrayImage {
    let mut img = GrayImage::new(Rect::new(0, 0, 8, 8));
    img.fill(Gray { y: 0x80 });
    img
}

fn patterned<P: Pixel>(w: i32, h: i32, f: impl Fn(i32, i32) -> P) -> ImageBuf<P> {
    let mut img = ImageBuf::<P>::new(Rect::new(0, 0, w, h));
    for y in 0..h {
        for x in 0..w {
            img.set_pixel(x, y, f(x, y));
        }
    }
    img
}

fn assert_round_trip<P: Pixel>(a: &ImageBuf<P>, opt: Option<&dyn crate::format::Options>) {
    let data = encode_to_vec(a, opt).unwrap();
    let b = decode_bytes(&data, None, None).unwrap();
    assert_same_pixels(a, b.as_ref());
}

fn assert_same_pixels<P: Pixel>(a: &ImageBuf<P>, b: &dyn Raster) {
    let b = b.as_any().downcast_ref::<ImageBuf<P>>().unwrap();
    assert_eq!(a.rect().size(), b.rect().size());
    let r = a.rect();
    for y in r.min.y..r.max.y {
        for x in r.min.x..r.max.x {
            assert_eq!(
                a.pixel_at(x, y),
                b.pixel_at(x - r.min.x + b.rect().min.x, y - r.min.y + b.rect().min.y)
            );
        }
    }
}

#[test]
fn test_gray_stream_layout() {
    let data = encode_to_vec(&gray_8x8(), None).unwrap();
    assert_eq!(&data[0..4], b"RAWP");
    assert_eq!(&data[4..8], &[0x0A, 0x38, 0xF2, 0x1B]);
    assert_eq!(&data[8..12], &[8, 0, 8, 0]);
    assert_eq!(&data[12..15], &[1, 8, 1]);
    assert_eq!(data[15], 0);
    assert_eq!(u32::from_le_bytes(data[16..20].try_into().unwrap()), 64);
    let crc = crc32fast::hash(&[0x80u8; 64]);
    assert_eq!(u32::from_le_bytes(data[20..24].try_into().unwrap()), crc);
    assert_eq!(data.len(), HEADER_SIZE + 64);

    let img = decode_bytes(&data, None, None).unwrap();
    let gray = img.as_any().downcast_ref::<GrayImage>().unwrap();
    assert_eq!(&gray.pix()[..], &[0x80u8; 64][..]);
}

#[test]
fn test_rgb_payload_bytes() {
    let mut img = RgbImage::new(Rect::new(0, 0, 2, 1));
    img.set_pixel(0, 0, Rgb { r: 1, g: 2, b: 3 });
    img.set_pixel(1, 0, Rgb { r: 4, g: 5, b: 6 });
    let data = encode_to_vec(&img, None).unwrap();
    assert_eq!(&data[HEADER_SIZE..], &[1, 2, 3, 4, 5, 6]);
}

#[test]
fn test_payload_is_little_endian() {
    let img = patterned(1, 1, |_, _| Gray16 { y: 0x1234 });
    let data = encode_to_vec(&img, None).unwrap();
    assert_eq!(&data[HEADER_SIZE..], &[0x34, 0x12]);
    assert_eq!(&img.pix()[..], &[0x12, 0x34]);

    let img = patterned(1, 1, |_, _| Gray32f { y: 1.5 });
    let data = encode_to_vec(&img, None).unwrap();
    assert_eq!(&data[HEADER_SIZE..], &1.5f32.to_le_bytes());
}

#[test]
fn test_round_trip_supported_layouts() {
    let opts = [
        RawpOptions::default(),
        RawpOptions::builder().use_snappy(true).build(),
    ];
    for opt in &opts {
        let opt: Option<&dyn crate::format::Options> = Some(opt);

        let a = patterned(5, 3, |x, y| Gray { y: (x * 40 + y) as u8 });
        assert_round_trip(&a, opt);
        let a = patterned(5, 3, |x, y| Gray16 { y: (x * 4000 + y) as u16 });
        assert_round_trip(&a, opt);
        let a = patterned(5, 3, |x, y| Gray32f { y: x as f32 * 0.5 - y as f32 });
        assert_round_trip(&a, opt);
        let a = patterned(4, 2, |x, y| Rgb { r: x as u8, g: y as u8, b: 200 });
        assert_round_trip(&a, opt);
        let a = patterned(4, 2, |x, y| Rgb48 { r: x as u16 * 300, g: y as u16, b: 0xFFFF });
        assert_round_trip(&a, opt);
        let a = patterned(4, 2, |x, y| Rgb96f { r: x as f32, g: -(y as f32), b: 0.25 });
        assert_round_trip(&a, opt);
        let a = patterned(3, 3, |x, y| Rgba { r: x as u8, g: y as u8, b: 9, a: (x * y) as u8 });
        assert_round_trip(&a, opt);
        let a = patterned(3, 3, |x, y| Rgba64 { r: x as u16, g: y as u16, b: 9, a: 0x8000 });
        assert_round_trip(&a, opt);
        let a = patterned(3, 3, |x, y| Rgba128f { r: x as f32, g: y as f32, b: 1e6, a: 0.5 });
        assert_round_trip(&a, opt);
    }
}

#[test]
fn test_sub_image_round_trip() {
    let parent = patterned(6, 6, |x, y| Rgb { r: x as u8, g: y as u8, b: 7 });
    let sub = parent.sub_image(Rect::new(2, 1, 5, 4));
    let data = encode_to_vec(&sub, None).unwrap();
    assert_eq!(&data[8..12], &[3, 0, 3, 0]);
    let img = decode_bytes(&data, None, None).unwrap();
    assert_eq!(img.bounds(), Rect::new(0, 0, 3, 3));
    assert_same_pixels(&sub, img.as_ref());
}

#[test]
fn test_snappy_header_fields() {
    let opt = RawpOptions::builder().use_snappy(true).build();
    let data = encode_to_vec(&gray_8x8(), Some(&opt)).unwrap();
    let hdr = Header::parse(&data).unwrap();
    assert!(hdr.use_snappy);
    assert_eq!(hdr.data_size as usize, data.len() - HEADER_SIZE);
    assert!(hdr.data_size < 64);
    assert_eq!(hdr.checksum, crc32fast::hash(&data[HEADER_SIZE..]));
}

#[test]
fn test_unlisted_models_promote_to_rgba() {
    let a = patterned(2, 2, |x, _| GrayA { y: 10 * x as u8, a: 0x80 });
    let data = encode_to_vec(&a, None).unwrap();
    let hdr = Header::parse(&data).unwrap();
    assert_eq!(hdr.color_model(), ColorModel::Rgba);
    let img = decode_bytes(&data, None, None).unwrap();
    assert_eq!(img.at(1, 0), Rgba { r: 10u8, g: 10, b: 10, a: 0x80 }.to_color());

    let ycc = YCbCrImage::new(Rect::new(0, 0, 2, 2), SubsampleRatio::Ratio420);
    let hdr = Header::parse(&encode_to_vec(&ycc, None).unwrap()).unwrap();
    assert_eq!(hdr.color_model(), ColorModel::Rgba);
}

#[test]
fn test_encode_converts_requested_model() {
    let a = patterned(2, 1, |x, _| Rgb { r: 100, g: 200, b: 50 * x as u8 });
    let opt = RawpOptions::builder().color_model(ColorModel::Gray).build();
    let data = encode_to_vec(&a, Some(&opt)).unwrap();
    assert_eq!(Header::parse(&data).unwrap().color_model(), ColorModel::Gray);
    assert_eq!(data[HEADER_SIZE], 147);
    assert_eq!(data[HEADER_SIZE + 1], 153);
}

#[test]
fn test_encode_promotes_ycbcr_request_to_rgba() {
    let opt = RawpOptions::builder().color_model(ColorModel::YCbCr).build();
    let data = encode_to_vec(&gray_8x8(), Some(&opt)).unwrap();
    let hdr = Header::parse(&data).unwrap();
    assert_eq!(hdr.color_model(), ColorModel::Rgba);
    assert_eq!(&data[HEADER_SIZE..HEADER_SIZE + 4], &[0x80, 0x80, 0x80, 0xFF]);
}

#[test]
fn test_decode_converts_requested_model() {
    let data = encode_to_vec(&gray_8x8(), None).unwrap();
    let opt = RawpOptions::builder().color_model(ColorModel::Rgba64).build();
    let img = decode_bytes(&data, None, Some(&opt)).unwrap();
    assert_eq!(img.color_model(), ColorModel::Rgba64);
    assert_eq!(img.at(3, 3), Rgba64 { r: 0x8080, g: 0x8080, b: 0x8080, a: 0xFFFF }.to_color());
}

#[test]
fn test_pix_encoder_conversions() {
    let rgb = patterned(1, 1, |_, _| Rgb96f { r: 100.0, g: 200.0, b: 50.0 });
    let out = PixEncoder::new(1, SampleKind::F32).unwrap().encode(&rgb, None).unwrap();
    let y = f32::from_le_bytes(out[..4].try_into().unwrap());
    assert!((y - 153.0).abs() < 1e-3);

    let gray = patterned(1, 1, |_, _| Gray { y: 0x80 });
    let out = PixEncoder::new(4, SampleKind::U16).unwrap().encode(&gray, None).unwrap();
    assert_eq!(out, vec![0x80, 0x80, 0x80, 0x80, 0x80, 0x80, 0xFF, 0xFF]);

    let mut ycc = YCbCrImage::new(Rect::new(0, 0, 1, 1), SubsampleRatio::Ratio444);
    ycc.set_ycbcr(0, 0, YCbCr::new(77, 90, 200));
    let out = PixEncoder::new(1, SampleKind::U8).unwrap().encode(&ycc, None).unwrap();
    assert_eq!(out, vec![77]);
    let out = PixEncoder::new(3, SampleKind::U8).unwrap().encode(&ycc, None).unwrap();
    let (r, g, b) = YCbCr::new(77, 90, 200).to_rgb();
    assert_eq!(out, vec![r, g, b]);

    // Reuses the caller's allocation.
    let buf = Vec::with_capacity(1024);
    let out = PixEncoder::new(1, SampleKind::U8).unwrap().encode(&gray, Some(buf)).unwrap();
    assert_eq!(out, vec![0x80]);
    assert!(out.capacity() >= 1024);
}

#[test]
fn test_fallback_through_canonical_rgba() {
    let mut src = new_image(Rect::new(0, 0, 1, 1), 3, SampleKind::I64).unwrap();
    src.set(0, 0, Rgb48 { r: 0x1234, g: 0x3456, b: 0x5678 }.to_color());
    let out = PixEncoder::new(3, SampleKind::U8).unwrap().encode(src.as_image(), None).unwrap();
    assert_eq!(out, vec![0x12, 0x34, 0x56]);
}

#[test]
fn test_unsupported_layouts() {
    assert!(matches!(
        PixEncoder::new(2, SampleKind::U8),
        Err(ImageError::UnsupportedFormat { channels: 2, .. })
    ));
    assert!(matches!(
        PixDecoder::new(3, SampleKind::I32, 1, 1),
        Err(ImageError::UnsupportedFormat { channels: 3, kind: SampleKind::I32 })
    ));

    let mut data = encode_to_vec(&gray_8x8(), None).unwrap();
    data[12] = 2;
    assert!(matches!(
        decode_bytes(&data, None, None),
        Err(ImageError::BadHeader { field: "DataSize", .. })
    ));
}

#[test]
fn test_decoder_checks_length() {
    let dec = PixDecoder::new(3, SampleKind::U8, 2, 2).unwrap();
    assert_eq!(dec.data_len(), 12);
    assert!(matches!(
        dec.decode(&[0; 11], None),
        Err(ImageError::BadDataSize { expected: 12, actual: 11 })
    ));
}

#[test]
fn test_decoder_reuses_buffer() {
    let data = encode_to_vec(&gray_8x8(), None).unwrap();
    let arena = GrayImage::new(Rect::new(0, 0, 16, 16));
    let img = decode_bytes(&data, Some(&arena), None).unwrap();
    let gray = img.as_any().downcast_ref::<GrayImage>().unwrap();
    assert!(gray.shares_pix(&arena));
    assert_eq!(gray.rect(), Rect::new(0, 0, 8, 8));
    assert_eq!(arena.pixel_at(7, 7), Gray { y: 0x80 });
    assert_eq!(arena.pixel_at(8, 8), Gray { y: 0 });

    // Too small or the wrong type: a fresh buffer.
    let small = GrayImage::new(Rect::new(0, 0, 4, 4));
    let img = decode_bytes(&data, Some(&small), None).unwrap();
    assert!(!img.as_any().downcast_ref::<GrayImage>().unwrap().shares_pix(&small));
    let other = Gray16Image::new(Rect::new(0, 0, 16, 16));
    let img = decode_bytes(&data, Some(&other), None).unwrap();
    assert_eq!(img.color_model(), ColorModel::Gray);
}

#[test]
fn test_bad_data_size_leaves_buffer_untouched() {
    let mut data = encode_to_vec(&gray_8x8(), None).unwrap();
    data[16..20].copy_from_slice(&65u32.to_le_bytes());
    let arena = GrayImage::new(Rect::new(0, 0, 8, 8));
    assert!(matches!(
        decode_bytes(&data, Some(&arena), None),
        Err(ImageError::BadDataSize { expected: 65, actual: 64 })
    ));
    assert!(arena.pix().iter().all(|&b| b == 0));
}

#[test]
fn test_header_validation() {
    let good = encode_to_vec(&gray_8x8(), None).unwrap();
    let cases: [(usize, u8, &str); 8] = [
        (0, b'X', "Sig"),
        (4, 0, "Magic"),
        (8, 0, "Width/Height"),
        (12, 5, "Channels"),
        (13, 12, "Depth"),
        (14, 3, "DataType"),
        (15, 2, "UseSnappy"),
        (16, 0, "DataSize"),
    ];
    for (offset, value, field) in cases {
        let mut data = good.clone();
        data[offset] = value;
        if field == "Width/Height" {
            data[9] = 0;
        }
        if field == "DataSize" {
            data[16..20].fill(0);
        }
        match decode_bytes(&data, None, None) {
            Err(ImageError::BadHeader { field: f, .. }) => assert_eq!(f, field),
            other => panic!(
                "byte {}: expected bad header {}, got {:?}",
                offset,
                field,
                other.map(|i| i.bounds())
            ),
        }
    }
    assert!(matches!(
        decode_bytes(&good[..10], None, None),
        Err(ImageError::BadHeader { field: "Sig", .. })
    ));
}

#[test]
fn test_payload_flips_fail_checksum() {
    for opt in [RawpOptions::default(), RawpOptions::builder().use_snappy(true).build()] {
        let img = patterned(4, 4, |x, y| Rgba { r: x as u8, g: y as u8, b: 3, a: 0xFF });
        let good = encode_to_vec(&img, Some(&opt)).unwrap();
        for i in HEADER_SIZE..good.len() {
            let mut data = good.clone();
            data[i] ^= 0x01;
            assert!(matches!(
                decode_bytes(&data, None, None),
                Err(ImageError::BadChecksum { .. })
            ));
        }
    }
}

#[test]
fn test_header_flips_fail() {
    let img = patterned(4, 4, |x, y| Rgb48 { r: x as u16, g: y as u16, b: 3 });
    let good = encode_to_vec(&img, None).unwrap();
    // UseSnappy and DataSize flips surface as compression and size errors.
    for i in (0..HEADER_SIZE).filter(|i| !(15..20).contains(i)) {
        for bit in 0..8 {
            let mut data = good.clone();
            data[i] ^= 1 << bit;
            assert!(
                matches!(
                    decode_bytes(&data, None, None),
                    Err(ImageError::BadHeader { .. }) | Err(ImageError::BadChecksum { .. })
                ),
                "byte {} bit {}",
                i,
                bit
            );
        }
    }
}

#[test]
fn test_bad_compression() {
    let opt = RawpOptions::builder().use_snappy(true).build();
    let mut data = encode_to_vec(&gray_8x8(), Some(&opt)).unwrap();
    // Claim a 4x8 image: the stream decompresses to twice the pixel bytes.
    data[8] = 4;
    assert!(matches!(
        decode_bytes(&data, None, None),
        Err(ImageError::BadCompression(_))
    ));

    let garbage = [0xFFu8; 10];
    let mut data = data[..HEADER_SIZE].to_vec();
    data[8] = 8;
    data[16..20].copy_from_slice(&10u32.to_le_bytes());
    data[20..24].copy_from_slice(&crc32fast::hash(&garbage).to_le_bytes());
    data.extend_from_slice(&garbage);
    assert!(matches!(
        decode_bytes(&data, None, None),
        Err(ImageError::BadCompression(_))
    ));
}

#[test]
fn test_invalid_dimensions() {
    let empty = GrayImage::new(Rect::new(0, 0, 0, 5));
    assert!(matches!(
        encode_to_vec(&empty, None),
        Err(ImageError::InvalidDimensions(0, 5))
    ));
    let wide = GrayImage::new(Rect::new(0, 0, 0x10000, 1));
    assert!(matches!(
        encode_to_vec(&wide, None),
        Err(ImageError::InvalidDimensions(0x10000, 1))
    ));
}

#[test]
fn test_decode_config_validates_stream() {
    let data = encode_to_vec(&patterned(3, 2, |_, _| Rgba128f::default()), None).unwrap();
    let config = decode_config(&mut data.as_slice()).unwrap();
    assert_eq!(config.color_model, ColorModel::Rgba128f);
    assert_eq!((config.width, config.height), (3, 2));

    let good = encode_to_vec(&gray_8x8(), None).unwrap();
    let mut flipped = good.clone();
    flipped[HEADER_SIZE + 3] ^= 0x01;
    assert!(matches!(
        decode_config(&mut flipped.as_slice()),
        Err(ImageError::BadChecksum { .. })
    ));
    assert!(matches!(
        decode_config(&mut &good[..HEADER_SIZE + 10]),
        Err(ImageError::BadDataSize { .. })
    ));
    assert!(matches!(
        decode_config(&mut &good[..HEADER_SIZE]),
        Err(ImageError::BadDataSize { .. })
    ));
}

#[test]
fn test_decode_config_checks_snappy_length() {
    let opt = RawpOptions::builder().use_snappy(true).build();
    let mut data = encode_to_vec(&gray_8x8(), Some(&opt)).unwrap();
    assert!(decode_config(&mut data.as_slice()).is_ok());
    data[8] = 4;
    assert!(matches!(
        decode_config(&mut data.as_slice()),
        Err(ImageError::BadCompression(_))
    ));
}

#[test]
fn test_decode_from_reader() {
    let mut out = Vec::new();
    encode(&mut out, &gray_8x8(), None).unwrap();
    let img = decode(&mut out.as_slice(), None).unwrap();
    assert_eq!(img.color_model(), ColorModel::Gray);
    assert!(img.opaque());
}

#[test]
fn test_container_layout_table() {
    assert_eq!(container_layout(ColorModel::Gray32f), (1, SampleKind::F32));
    assert_eq!(container_layout(ColorModel::Rgb48), (3, SampleKind::U16));
    assert_eq!(container_layout(ColorModel::Gray64f), (4, SampleKind::U8));
    assert_eq!(container_layout(ColorModel::YCbCr), (4, SampleKind::U8));
    assert_eq!(DataType::of(SampleKind::I64), DataType::Int);
    assert_eq!(DataType::Float.sample_kind(64), Some(SampleKind::F64));
    assert_eq!(DataType::UInt.sample_kind(32), None);
}

