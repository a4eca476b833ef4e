//! Pipeline orchestration (SPEC_FULL §5, §7): sequences disassembly, table
//! detection, code patching, and data patching into a single run.

use crate::config::{TuneConfig, TuneDescriptor};
use crate::detect_hi::detect_hi_tables;
use crate::detect_interleaved::detect_interleaved_tables;
use crate::disasm::disassemble;
use crate::error::{Diagnostic, EngineError};
use crate::image::Image;
use crate::patch_code::patch_code;
use crate::patch_data::patch_data;

/// Below this image size, a table-free tune is plausible enough that an
/// empty detection result is not worth flagging.
const EMPTY_DETECTION_THRESHOLD: usize = 0x200;

/// Everything the engine produces from one run: the patched image bytes, the
/// configuration record for the playback harness, and any non-fatal findings.
pub struct EngineOutput {
    pub patched: Vec<u8>,
    pub config: TuneConfig,
    pub diagnostics: Vec<Diagnostic>,
}

/// Runs the full relocation pipeline against `image` using `descriptor`.
///
/// Mutation never starts until both table detectors have finished reading
/// the original image (SPEC_FULL §7): the code patcher and data patcher both
/// run after disassembly and detection are complete, never interleaved with
/// them.
pub fn run(mut image: Image, descriptor: &TuneDescriptor) -> Result<EngineOutput, EngineError> {
    log::info!(
        "relocating tune ${:04X}..${:04X} -> ${:04X} (SID ${:04X} -> ${:04X})",
        descriptor.original_base,
        descriptor.original_base as u32 + image.len() as u32,
        descriptor.new_base,
        descriptor.original_sid_base,
        descriptor.new_sid_base,
    );

    let disasm = disassemble(&image, &descriptor.entry_points)?;

    let hi_tables = detect_hi_tables(&image, &disasm);
    let interleaved_tables = detect_interleaved_tables(&image, &disasm);

    let mut diagnostics = Vec::new();
    for table in &hi_tables {
        if table.lo_base.is_none() {
            diagnostics.push(Diagnostic::AmbiguousTable {
                hi_base: table.base,
            });
        }
    }
    if hi_tables.is_empty() && interleaved_tables.is_empty() && image.len() > EMPTY_DETECTION_THRESHOLD
    {
        diagnostics.push(Diagnostic::EmptyDetection);
    }

    patch_code(&mut image, &disasm, descriptor);
    patch_data(&mut image, &hi_tables, &interleaved_tables, descriptor.delta());

    let config = TuneConfig::new(descriptor, &disasm.resolved_entries);

    for diag in &diagnostics {
        log::warn!("{}", diag);
    }
    log::info!("relocation complete: {} diagnostic(s)", diagnostics.len());

    Ok(EngineOutput {
        patched: image.into_bytes(),
        config,
        diagnostics,
    })
}
