//! Hi-byte pointer-table detector (SPEC_FULL §4.4): finds split lo/hi
//! pointer tables by tracing the `LDA table,R / STA zp` idiom SID-WIZARD
//! uses to assemble a pointer from two parallel byte arrays.

use std::collections::BTreeMap;

use crate::address::Addr;
use crate::disasm::{Disassembly, Instruction};
use crate::image::Image;
use crate::opcode::Mode;

/// How many fall-through instructions past the indexed load are inspected
/// for the defining `STA zp`.
const LOOKAHEAD: usize = 3;

/// A detected hi-byte table (SPEC_FULL §3 "Hi-byte-table descriptor").
/// `lo_base` is `None` when no sibling lo-byte table could be paired —
/// such a table is reported as `Diagnostic::AmbiguousTable` and left
/// unpatched (SPEC_FULL §7).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HiByteTable {
    pub base: Addr,
    pub length: u32,
    pub lo_base: Option<Addr>,
}

fn fallthrough_chain<'m>(
    instructions: &'m BTreeMap<Addr, Instruction>,
    from: &Instruction,
    max: usize,
) -> Vec<&'m Instruction> {
    let mut chain = Vec::with_capacity(max);
    let mut addr = from.addr.wrapping_add(from.len as u16);
    for _ in 0..max {
        match instructions.get(&addr) {
            Some(instr) => {
                chain.push(instr);
                addr = addr.wrapping_add(instr.len as u16);
            }
            None => break,
        }
    }
    chain
}

/// Distance in bytes from `base` to the next address that starts a decoded
/// instruction, or to the end of the image — whichever comes first.
fn distance_to_boundary(image: &Image, disasm: &Disassembly, base: Addr) -> u32 {
    let end = image.range().end();
    let mut addr = base as u32 + 1;
    while addr < end && !disasm.is_code(addr as u16) {
        addr += 1;
    }
    addr - base as u32
}

pub fn detect_hi_tables(image: &Image, disasm: &Disassembly) -> Vec<HiByteTable> {
    let tune_range = image.range();

    let mut hi_candidates: Vec<(Addr, u8)> = Vec::new();
    let mut lo_candidates: Vec<(Addr, u8)> = Vec::new();

    for instr in disasm.instructions.values() {
        if instr.mnemonic != "LDA" || !instr.mode.is_absolute_indexed() {
            continue;
        }
        let base = instr.operand16();
        if disasm.is_code(base) || !tune_range.contains(base) {
            continue;
        }

        for next in fallthrough_chain(&disasm.instructions, instr, LOOKAHEAD) {
            if next.mnemonic == "STA" && next.mode == Mode::Zp {
                let zp = next.operand8();
                if zp % 2 == 1 {
                    log::trace!("hi-byte table candidate base=${:04X} zp=${:02X}", base, zp);
                    hi_candidates.push((base, zp));
                } else {
                    lo_candidates.push((base, zp));
                }
                break;
            }
        }
    }

    let mut tables = Vec::new();
    for &(hi_base, hi_zp) in &hi_candidates {
        let lo_zp = hi_zp.wrapping_sub(1);
        let lo_base = lo_candidates
            .iter()
            .find(|&&(_, zp)| zp == lo_zp)
            .map(|&(base, _)| base);

        let boundary = distance_to_boundary(image, disasm, hi_base);
        let length = match lo_base {
            Some(lo) if lo != hi_base => {
                let gap = (hi_base as i32 - lo as i32).unsigned_abs();
                gap.min(boundary)
            }
            _ => boundary,
        };

        if lo_base.is_none() {
            log::warn!(
                "hi-byte table at ${:04X} has no paired lo-byte table (zp ${:02X})",
                hi_base,
                lo_zp
            );
        }

        tables.push(HiByteTable {
            base: hi_base,
            length,
            lo_base,
        });
    }

    log::info!("hi-byte table detector: {} table(s) found", tables.len());
    tables
}
