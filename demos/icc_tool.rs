//! Example: Apply, transfer and extract ICC profiles from the command line
//!
//! Run:
//! - `cargo run --example icc_tool -- <source.png> <target.png> [output.png]`
//! - `cargo run --example icc_tool -- --default <image.png> [output.png]`
//! - `cargo run --example icc_tool -- --extract <image.png> <profile.icc>`

use std::{env, fs};

fn usage(program: &str) -> ! {
    eprintln!("Usage:");
    eprintln!("  {} <source.png> <target.png> [output.png]", program);
    eprintln!("  {} --default <image.png> [output.png]", program);
    eprintln!("  {} --extract <image.png> <profile.icc>", program);
    std::process::exit(1);
}

fn main() -> png_icc::Result<()> {
    let args: Vec<String> = env::args().collect();
    let program = args.first().map(String::as_str).unwrap_or("icc_tool");

    match args.get(1).map(String::as_str) {
        Some("--default") => {
            let Some(input) = args.get(2) else { usage(program) };
            let output = args.get(3).map(String::as_str).unwrap_or("result.png");

            println!("Reading image: {}", input);
            let image = fs::read(input)?;

            println!("Applying default ICC profile...");
            let result = png_icc::apply_default_icc_profile(&image)?;
            println!("Result image size: {} bytes", result.len());

            fs::write(output, &result)?;
            println!("Wrote {}", output);
        }

        Some("--extract") => {
            let (Some(input), Some(output)) = (args.get(2), args.get(3)) else {
                usage(program)
            };

            let image = fs::read(input)?;
            let profile = png_icc::extract_icc_profile(&image)?;
            if profile.is_empty() {
                eprintln!("{} has no embedded ICC profile", input);
                std::process::exit(1);
            }

            fs::write(output, &profile)?;
            println!("Wrote {} bytes of ICC profile to {}", profile.len(), output);
        }

        Some(source) => {
            let Some(target) = args.get(2) else { usage(program) };
            let output = args.get(3).map(String::as_str).unwrap_or("result.png");

            println!("Reading source image: {}", source);
            let source_data = fs::read(source)?;
            println!("Reading target image: {}", target);
            let target_data = fs::read(target)?;

            let profile = png_icc::extract_icc_profile(&source_data)?;
            if profile.is_empty() {
                println!("No ICC profile found in source image");
            } else {
                println!("Source ICC profile: {} bytes", profile.len());
            }

            println!("Transferring ICC profile...");
            let result = png_icc::transfer_icc_profile(&source_data, &target_data)?;

            fs::write(output, &result)?;
            println!("Wrote {} ({} bytes)", output, result.len());
        }

        None => usage(program),
    }

    Ok(())
}
