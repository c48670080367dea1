//! Example: Print the colour metadata of a PNG
//!
//! Run: `cargo run --example analyze -- <image.png>`

use png_icc::{PngImage, COMPRESSION_DEFLATE};
use std::{env, fs};

fn main() -> png_icc::Result<()> {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: {} <png_file>", args[0]);
        std::process::exit(1);
    }

    let data = fs::read(&args[1])?;
    let info = png_icc::inspect_color_info(&data)?;

    println!("=== PNG Metadata ===\n");
    println!("Dimensions: {}x{}", info.width, info.height);
    println!("Bit Depth: {}", info.bit_depth);
    println!("Color Type: {}", info.color_type);
    println!("Palette: {}", if info.has_palette { "Yes" } else { "No" });

    if let Some(gamma) = info.gamma {
        println!("\n--- Gamma ---");
        println!("Source Gamma: {:.5}", gamma as f64 / 100_000.0);
    }

    if info.has_chromaticities {
        println!("\n--- Chromaticities ---");
        println!("cHRM chunk present");
    }

    if let Some(intent) = info.srgb_intent {
        println!("\n--- sRGB ---");
        println!("Rendering Intent: {}", intent);
    }

    match &info.icc_profile {
        Some(profile) => {
            println!("\n--- ICC Profile ---");
            println!("Name: {}", profile.name);
            println!("Compression: {} (deflate)", COMPRESSION_DEFLATE);
            println!("Profile data length: {} bytes", profile.len);
        }
        None => println!("\nNo ICC profile"),
    }

    println!("\n--- Chunks ({}) ---", info.chunk_count);
    let image = PngImage::parse(&data)?;
    for chunk in image.chunks() {
        println!(
            "{:>4} {:>10} bytes  crc {:08x}",
            chunk.chunk_type.to_string(),
            chunk.data.len(),
            chunk.crc()
        );
    }

    Ok(())
}
