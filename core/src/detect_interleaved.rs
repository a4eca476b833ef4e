//! Interleaved pointer-table detector (SPEC_FULL §4.5): finds tables of
//! alternating `(lo, hi)` byte pairs accessed as `LDA table,R` /
//! `LDA table+1,R` with a shared index register.

use crate::address::{join_u16, Addr, AddrRange};
use crate::disasm::Disassembly;
use crate::image::Image;
use crate::opcode::Mode;

#[derive(Clone, Copy, PartialEq, Eq)]
enum IndexReg {
    X,
    Y,
}

/// A detected interleaved table (SPEC_FULL §3 "Interleaved-table descriptor").
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InterleavedTable {
    pub base: Addr,
    pub length_pairs: u32,
}

fn index_register(mode: Mode) -> Option<IndexReg> {
    match mode {
        Mode::Abx => Some(IndexReg::X),
        Mode::Aby => Some(IndexReg::Y),
        _ => None,
    }
}

/// Scans forward from `base` in steps of 2 while the pair forms a pointer
/// inside the tune range, returning the count of in-range pairs found.
fn count_in_range_pairs(image: &Image, tune_range: AddrRange, base: Addr) -> u32 {
    let mut count: u32 = 0;
    loop {
        let lo_addr = base.wrapping_add((2 * count) as u16);
        let hi_addr = base.wrapping_add((2 * count + 1) as u16);
        let pair = match (image.read(lo_addr), image.read(hi_addr)) {
            (Some(lo), Some(hi)) => join_u16(lo, hi),
            _ => break,
        };
        if !tune_range.contains(pair) {
            break;
        }
        count += 1;
    }
    count
}

pub fn detect_interleaved_tables(image: &Image, disasm: &Disassembly) -> Vec<InterleavedTable> {
    let tune_range = image.range();

    let mut loads: Vec<(Addr, IndexReg)> = Vec::new();
    for instr in disasm.instructions.values() {
        if instr.mnemonic != "LDA" {
            continue;
        }
        let Some(reg) = index_register(instr.mode) else {
            continue;
        };
        let base = instr.operand16();
        if disasm.is_code(base) || !tune_range.contains(base) {
            continue;
        }
        loads.push((base, reg));
    }

    let mut bases = std::collections::BTreeSet::new();
    for (i, &(base_a, reg_a)) in loads.iter().enumerate() {
        for &(base_b, reg_b) in loads.iter().skip(i + 1) {
            if reg_a != reg_b {
                continue;
            }
            let diff = (base_a as i32 - base_b as i32).abs();
            if diff == 1 {
                bases.insert(base_a.min(base_b));
            }
        }
    }

    let tables: Vec<InterleavedTable> = bases
        .into_iter()
        .map(|base| InterleavedTable {
            base,
            length_pairs: count_in_range_pairs(image, tune_range, base),
        })
        .collect();

    log::info!(
        "interleaved table detector: {} table(s) found",
        tables.len()
    );
    tables
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::disasm::disassemble;

    #[test]
    fn finds_table_and_stops_at_first_out_of_range_pair() {
        // SPEC_FULL §8 scenario 4: $1100..$1107 = 00,10 40,10 80,10 00,20
        let mut bytes = vec![0u8; 0x200];
        bytes[0] = 0x4C;
        bytes[1] = 0x10;
        bytes[2] = 0x10;
        let body: &[u8] = &[
            0xBD, 0x00, 0x11, // LDA $1100,X
            0xBD, 0x01, 0x11, // LDA $1101,X
            0x60, // RTS
        ];
        bytes[0x10..0x10 + body.len()].copy_from_slice(body);
        let pairs: &[u8] = &[0x00, 0x10, 0x40, 0x10, 0x80, 0x10, 0x00, 0x20];
        bytes[0x100..0x100 + pairs.len()].copy_from_slice(pairs);

        let img = Image::new(0x1000, bytes);
        let disasm = disassemble(&img, &[0x1000]).unwrap();
        let tables = detect_interleaved_tables(&img, &disasm);

        assert_eq!(tables.len(), 1);
        assert_eq!(tables[0].base, 0x1100);
        assert_eq!(tables[0].length_pairs, 3);
    }

    #[test]
    fn requires_shared_index_register() {
        let mut bytes = vec![0u8; 0x200];
        bytes[0] = 0x4C;
        bytes[1] = 0x10;
        bytes[2] = 0x10;
        let body: &[u8] = &[
            0xBD, 0x00, 0x11, // LDA $1100,X
            0xB9, 0x01, 0x11, // LDA $1101,Y (different register)
            0x60,
        ];
        bytes[0x10..0x10 + body.len()].copy_from_slice(body);
        let img = Image::new(0x1000, bytes);
        let disasm = disassemble(&img, &[0x1000]).unwrap();
        let tables = detect_interleaved_tables(&img, &disasm);
        assert!(tables.is_empty());
    }
}
