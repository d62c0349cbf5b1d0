//! Pixel conversion example driven by a YAML job file.
//!
//! Generates a gradient image in the job's source format, converts it with
//! `read_pixels` and prints a summary of the result.
//!
//! Usage:
//!   cargo run --example convert_pixels -- --config configs/varna.yaml
//!   RUST_LOG=debug cargo run --example convert_pixels --features force-scalar

use std::path::Path;
use std::time::Instant;

use clap::Parser;
use varna::{
    ColorType, ConversionConfig, F32x4, PixelInfo, SimdVector, backend, half::load_half4,
    read_pixels,
};

/// Convert a generated image between pixel formats
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short, long, default_value = "configs/varna.yaml")]
    config: String,

    /// Number of times to repeat the conversion
    #[arg(short, long, default_value_t = 1)]
    repeat: u32,
}

/// Fill `buf` with a gradient in `info`'s format.
fn generate_source(info: &PixelInfo, row_bytes: usize, buf: &mut [u8]) {
    let bpp = info.color_type.bytes_per_pixel();
    let packed = info.width * bpp;
    for y in 0..info.height {
        let row = &mut buf[y * row_bytes..][..packed];
        for (x, px) in row.chunks_exact_mut(bpp).enumerate() {
            let t = x as f32 / info.width.max(1) as f32;
            let s = y as f32 / info.height.max(1) as f32;
            let rgba = F32x4::new(t, s, 1.0 - t, 1.0);
            match info.color_type {
                ColorType::Rgba8888 | ColorType::Bgra8888 => {
                    let bytes = rgba * F32x4::splat(255.0) + F32x4::splat(0.5);
                    for (c, out) in px.iter_mut().enumerate() {
                        *out = bytes.lane(c) as u8;
                    }
                    if info.color_type == ColorType::Bgra8888 {
                        px.swap(0, 2);
                    }
                }
                ColorType::RgbaF16 => varna::half::store_half4(rgba, px),
                ColorType::RgbaF32 => rgba.store_bytes(px),
            }
        }
    }
}

/// Read pixel `(x, y)` of a converted image as floats.
fn sample(info: &PixelInfo, row_bytes: usize, buf: &[u8], x: usize, y: usize) -> F32x4 {
    let bpp = info.color_type.bytes_per_pixel();
    let px = &buf[y * row_bytes + x * bpp..][..bpp];
    match info.color_type {
        ColorType::Rgba8888 => F32x4::new(
            f32::from(px[0]),
            f32::from(px[1]),
            f32::from(px[2]),
            f32::from(px[3]),
        ),
        ColorType::Bgra8888 => F32x4::new(
            f32::from(px[2]),
            f32::from(px[1]),
            f32::from(px[0]),
            f32::from(px[3]),
        ),
        ColorType::RgbaF16 => load_half4(px),
        ColorType::RgbaF32 => F32x4::load_bytes(px),
    }
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    let config_path = Path::new(&args.config);
    let config = if config_path.exists() {
        ConversionConfig::load(config_path).unwrap_or_else(|e| {
            eprintln!("Warning: Failed to load config: {}, using defaults", e);
            ConversionConfig::default()
        })
    } else {
        println!(
            "Config not found at {}, using defaults",
            config_path.display()
        );
        ConversionConfig::default()
    };
    config.check_backend();

    let src_info = config.source_info();
    let dst_info = config.destination_info();
    let (src_row_bytes, dst_row_bytes) =
        match (config.source_row_bytes(), config.destination_row_bytes()) {
            (Ok(src), Ok(dst)) => (src, dst),
            (Err(e), _) | (_, Err(e)) => {
                eprintln!("Invalid image: {}", e);
                std::process::exit(1);
            }
        };
    let (Some(src_len), Some(dst_len)) = (
        src_info.byte_size(src_row_bytes),
        dst_info.byte_size(dst_row_bytes),
    ) else {
        eprintln!(
            "Image {}x{} does not fit in memory",
            src_info.width, src_info.height
        );
        std::process::exit(1);
    };

    let mut src = vec![0u8; src_len];
    let mut dst = vec![0u8; dst_len];
    generate_source(&src_info, src_row_bytes, &mut src);

    let start = Instant::now();
    for _ in 0..args.repeat.max(1) {
        if let Err(e) = read_pixels(
            &src_info,
            &src,
            src_row_bytes,
            &dst_info,
            &mut dst,
            dst_row_bytes,
        ) {
            eprintln!("Conversion failed: {}", e);
            std::process::exit(1);
        }
    }
    let elapsed = start.elapsed();

    println!("Backend:     {}", backend::active());
    println!(
        "Image:       {}x{} ({:?}/{:?} -> {:?}/{:?})",
        src_info.width,
        src_info.height,
        src_info.color_type,
        src_info.alpha_type,
        dst_info.color_type,
        dst_info.alpha_type
    );
    println!(
        "Time:        {:.3} ms per conversion",
        elapsed.as_secs_f64() * 1000.0 / f64::from(args.repeat.max(1))
    );

    let corners = [
        (0, 0),
        (dst_info.width - 1, 0),
        (0, dst_info.height - 1),
        (dst_info.width - 1, dst_info.height - 1),
    ];
    for (x, y) in corners {
        let px = sample(&dst_info, dst_row_bytes, &dst, x, y);
        println!("Pixel ({:>4}, {:>4}): {:?}", x, y, px.to_array());
    }
}
