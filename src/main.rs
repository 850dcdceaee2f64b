use std::path::PathBuf;

use anyhow::{Context, bail};
use rawp_image::logger;
use rawp_image::{Image, Options, RawpOptions, TiffOptions};

use tracing::{error, info};

const USAGE: &str = "usage: rawp-convert <input> <output> [--snappy]";

struct Args {
    input: PathBuf,
    output: PathBuf,
    snappy: bool,
}

fn parse_args() -> anyhow::Result<Args> {
    let mut paths = Vec::new();
    let mut snappy = false;
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--snappy" => snappy = true,
            "-h" | "--help" => bail!(USAGE),
            s if s.starts_with("--") => bail!("unknown flag {}\n{}", s, USAGE),
            _ => paths.push(PathBuf::from(arg)),
        }
    }
    let [input, output] = <[PathBuf; 2]>::try_from(paths).map_err(|_| anyhow::anyhow!(USAGE))?;
    Ok(Args {
        input,
        output,
        snappy,
    })
}

fn main() -> anyhow::Result<()> {
    logger::init();

    let args = parse_args()?;
    info!("Converting {} -> {}", args.input.display(), args.output.display());

    let (img, format) = rawp_image::load(&args.input)
        .with_context(|| format!("failed to load {}", args.input.display()))?;
    let r = img.bounds();
    info!(
        "Loaded {} image: {}x{} {}",
        format,
        r.width(),
        r.height(),
        img.color_model()
    );

    let rawp = RawpOptions::builder().use_snappy(args.snappy).build();
    let tiff = TiffOptions::default();
    let is_tiff = args
        .output
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("tif") || e.eq_ignore_ascii_case("tiff"));
    let opt: &dyn Options = if is_tiff { &tiff } else { &rawp };

    match rawp_image::save(&args.output, img.as_image(), Some(opt)) {
        Ok(()) => info!("Conversion successful!"),
        Err(e) => {
            error!("Conversion failed: {}", e);
            return Err(e).with_context(|| format!("failed to save {}", args.output.display()));
        }
    }

    Ok(())
}
