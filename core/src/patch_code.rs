//! Code patcher (SPEC_FULL §4.3): rewrites every ABS/ABX/ABY/IND operand in
//! the decoded instruction map according to SID redirection or tune
//! relocation, whichever applies.

use crate::address::{apply_delta, split_u16, AddrRange};
use crate::config::{TuneDescriptor, SID_WINDOW_LEN};
use crate::disasm::Disassembly;
use crate::image::Image;

/// Outcome counts, used only for logging (SPEC_FULL §4.3 "count expectation").
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CodePatchStats {
    pub patched: usize,
    pub redirected: usize,
}

/// Applies the code patcher exactly once. Not idempotent: running this
/// twice on the same image with the same descriptor double-applies `Δ`.
pub fn patch_code(
    image: &mut Image,
    disasm: &Disassembly,
    descriptor: &TuneDescriptor,
) -> CodePatchStats {
    let tune_range = image.range();
    let sid_range = AddrRange::new(descriptor.original_sid_base, SID_WINDOW_LEN as u32);
    let delta = descriptor.delta();

    let mut stats = CodePatchStats::default();

    for instr in disasm.instructions.values() {
        if !instr.mode.is_sixteen_bit_absolute() {
            continue;
        }
        let a16 = instr.operand16();

        let new_value = if sid_range.contains(a16) {
            stats.redirected += 1;
            descriptor
                .new_sid_base
                .wrapping_add(a16.wrapping_sub(descriptor.original_sid_base))
        } else if tune_range.contains(a16) {
            apply_delta(a16, delta)
        } else {
            continue;
        };

        stats.patched += 1;
        let (lo, hi) = split_u16(new_value);
        image.write(instr.addr.wrapping_add(1), lo);
        image.write(instr.addr.wrapping_add(2), hi);
        log::trace!(
            "patched operand at ${:04X}: ${:04X} -> ${:04X}",
            instr.addr,
            a16,
            new_value
        );
    }

    log::info!(
        "code patcher: {} operands rewritten ({} SID redirections)",
        stats.patched,
        stats.redirected
    );
    stats
}
