use std::io::{Read, Write};

use super::*;
use crate::color::{ColorModel, Gray, Pixel};
use crate::common::{ImageError, Result};
use crate::image::{GrayImage, Image, Raster, Rect};

// Mock codecs: each decodes to a 1x1 gray image whose value names the codec.
fn config_a(_: &mut dyn Read) -> Result<Config> {
    Ok(Config {
        color_model: ColorModel::Gray,
        width: 1,
        height: 1,
    })
}

fn config_b(_: &mut dyn Read) -> Result<Config> {
    Ok(Config {
        color_model: ColorModel::Gray16,
        width: 2,
        height: 2,
    })
}

fn tagged(tag: u8) -> Box<dyn Raster> {
    let mut img = GrayImage::new(Rect::new(0, 0, 1, 1));
    img.set_pixel(0, 0, Gray { y: tag });
    Box::new(img)
}

fn decode_a(_: &mut dyn Read, _: Option<&dyn Options>) -> Result<Box<dyn Raster>> {
    Ok(tagged(b'a'))
}

/// Checks that the sniffed bytes are replayed ahead of the rest.
fn decode_b(r: &mut dyn Read, _: Option<&dyn Options>) -> Result<Box<dyn Raster>> {
    let mut all = Vec::new();
    r.read_to_end(&mut all)?;
    Ok(tagged(if all == b"BBBB-payload" { b'b' } else { b'?' }))
}

fn encode_a(w: &mut dyn Write, _: &dyn Image, _: Option<&dyn Options>) -> Result<()> {
    w.write_all(b"AAAA")?;
    Ok(())
}

fn encode_b(w: &mut dyn Write, _: &dyn Image, _: Option<&dyn Options>) -> Result<()> {
    w.write_all(b"BBBB")?;
    Ok(())
}

fn format_a() -> Format {
    Format::new("a", &[".img", ".a"], &[b"AAAA"], config_a, decode_a, encode_a)
}

fn format_b() -> Format {
    Format::new("b", &[".IMG", ".b"], &[b"B?B?"], config_b, decode_b, encode_b)
}

fn registry() -> Registry {
    let mut r = Registry::new();
    r.register(format_a());
    r.register(format_b());
    r
}

fn tag_of(img: &dyn Raster) -> Gray {
    Gray::from_color(img.at(0, 0))
}

#[test]
fn test_magic_wildcards() {
    assert!(matches(b"RIFF????WEBP", b"RIFF\x00\x01\x02\x03WEBP"));
    assert!(matches(b"????", b"????"));
    assert!(!matches(b"RIFF????WEBP", b"RIFF\x00\x01\x02\x03WEBQ"));
    assert!(!matches(b"AB", b"ABC"));
    assert!(matches(b"", b""));
}

#[test]
fn test_magic_match_is_bytewise() {
    let magic = b"a?c";
    for b0 in [b'a', b'b'] {
        for b1 in 0..=255u8 {
            let cand = [b0, b1, b'c'];
            assert_eq!(matches(magic, &cand), b0 == b'a');
        }
    }
}

#[test]
fn test_decode_sniffs_by_magic_not_name() {
    let r = registry();
    let mut input: &[u8] = b"BBBB-payload";
    let (img, name) = r.decode(&mut input).unwrap();
    assert_eq!(name, "b");
    assert_eq!(tag_of(img.as_ref()), Gray { y: b'b' });

    // Both formats claim ".img"; the first registration wins by name.
    assert_eq!(r.sniff_by_name("photo.IMG").unwrap().name, "a");
    assert_eq!(r.sniff_by_name("dir.b/photo.b").unwrap().name, "b");
    assert!(r.sniff_by_name("photo").is_none());
    assert!(r.sniff_by_name("photo.png").is_none());
}

#[test]
fn test_first_registered_match_wins() {
    let mut r = registry();
    r.register(Format::new("late", &[], &[b"AAAA"], config_b, decode_b, encode_b));
    let (_, name) = r.decode(&mut &b"AAAAxyz"[..]).unwrap();
    assert_eq!(name, "a");
}

#[test]
fn test_unknown_format() {
    let r = registry();
    assert!(matches!(
        r.decode(&mut &b"ZZZZZZZZ"[..]),
        Err(ImageError::UnknownFormat)
    ));
    // Shorter than any magic.
    assert!(matches!(r.decode(&mut &b"BB"[..]), Err(ImageError::UnknownFormat)));
    assert!(matches!(
        Registry::new().decode(&mut &b"AAAA"[..]),
        Err(ImageError::UnknownFormat)
    ));
    let img = GrayImage::new(Rect::new(0, 0, 1, 1));
    assert!(matches!(
        r.encode("c", &mut Vec::new(), &img, None),
        Err(ImageError::UnknownFormat)
    ));
}

#[test]
fn test_decode_config_and_encode_by_name() {
    let r = registry();
    let (config, name) = r.decode_config(&mut &b"BxBy"[..]).unwrap();
    assert_eq!(name, "b");
    assert_eq!(config.color_model, ColorModel::Gray16);

    let img = GrayImage::new(Rect::new(0, 0, 1, 1));
    let mut out = Vec::new();
    r.encode("a", &mut out, &img, None).unwrap();
    assert_eq!(out, b"AAAA");
}

#[test]
fn test_register_copies_patterns() {
    let mut exts = vec![".x"];
    let magic = b"XX".to_vec();
    let mut r = Registry::new();
    r.register(Format::new("x", &exts, &[&magic], config_a, decode_a, encode_a));
    exts.push(".y");
    drop(magic);
    assert_eq!(r.formats()[0].extensions, vec![".x".to_string()]);
    assert_eq!(r.formats()[0].magics, vec![b"XX".to_vec()]);
    assert!(r.find("x").is_some());
    assert!(r.find("y").is_none());
}

#[test]
fn test_builtin_registry() {
    let r = Registry::with_builtin();
    let names: Vec<&str> = r.formats().iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, vec!["rawp", "tiff"]);
    assert_eq!(r.sniff_by_name("a.RAWP").unwrap().name, "rawp");
    assert_eq!(r.sniff_by_name("a.tif").unwrap().name, "tiff");
    assert_eq!(r.sniff_prefix(b"MM\x00*").unwrap().name, "tiff");
    assert_eq!(r.sniff_prefix(b"RAWP\x0A\x38\xF2\x1B").unwrap().name, "rawp");
    assert!(r.sniff_prefix(b"RAWP\x00\x00\x00\x00").is_none());
}

#[test]
fn test_load_and_save() {
    let dir = tempfile::tempdir().unwrap();
    let r = registry();
    let img = GrayImage::new(Rect::new(0, 0, 1, 1));

    let path = dir.path().join("out.B");
    r.save(&path, &img, None).unwrap();
    assert_eq!(std::fs::read(&path).unwrap(), b"BBBB");
    let (_, name) = r.load(&path).unwrap();
    assert_eq!(name, "b");

    assert!(matches!(
        r.save(dir.path().join("out.none"), &img, None),
        Err(ImageError::UnknownFormat)
    ));
    assert!(matches!(
        r.load(dir.path().join("missing.a")),
        Err(ImageError::IoError(_))
    ));
}

#[test]
fn test_default_registry_appends() {
    register_format(Format::new(
        "mock-default",
        &[".mockdefault"],
        &[b"MOCKDEF!"],
        config_a,
        decode_a,
        encode_a,
    ));
    let r = default_registry();
    let names: Vec<&str> = r.formats().iter().map(|f| f.name.as_str()).collect();
    assert_eq!(&names[..2], &["rawp", "tiff"]);
    assert!(names.contains(&"mock-default"));

    let (img, name) = decode(&mut &b"MOCKDEF!"[..]).unwrap();
    assert_eq!(name, "mock-default");
    assert_eq!(tag_of(img.as_ref()), Gray { y: b'a' });
}
