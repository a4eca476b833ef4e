//! Demo harness: relocates a tune binary and prints the resulting
//! configuration record. Not a general-purpose CLI (SPEC_FULL §10.4) — real
//! integrations call `sidreloc_core::run` directly.

use std::error::Error;
use std::fs;

use sidreloc_core::{Image, TuneDescriptor};

const TUNE_PATH: &str = "demos/tune.bin";
const ORIGINAL_BASE: u16 = 0x1000;
const NEW_BASE: u16 = 0x3000;
const ORIGINAL_SID_BASE: u16 = 0xD400;
const NEW_SID_BASE: u16 = 0xD420;

fn run() -> Result<(), Box<dyn Error>> {
    let bytes = fs::read(TUNE_PATH)?;
    let image = Image::new(ORIGINAL_BASE, bytes);

    let descriptor = TuneDescriptor {
        original_base: ORIGINAL_BASE,
        new_base: NEW_BASE,
        original_sid_base: ORIGINAL_SID_BASE,
        new_sid_base: NEW_SID_BASE,
        entry_points: TuneDescriptor::standard_entry_points(ORIGINAL_BASE),
    };

    let output = sidreloc_core::run(image, &descriptor)?;

    for diag in &output.diagnostics {
        log::warn!("{}", diag);
    }
    println!("{}", serde_json::to_string_pretty(&output.config)?);
    fs::write("demos/tune.relocated.bin", &output.patched)?;
    Ok(())
}

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        log::error!("relocation failed: {}", err);
        std::process::exit(1);
    }
}
