//! Data patcher (SPEC_FULL §4.6): rewrites the hi-bytes of pointers found by
//! the two table detectors, applying the same relocation delta as the code
//! patcher, but only where the pointer lies in the tune range. Lo bytes are
//! never written.

use crate::address::{apply_delta, join_u16, split_u16};
use crate::detect_hi::HiByteTable;
use crate::detect_interleaved::InterleavedTable;
use crate::image::Image;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DataPatchStats {
    pub hi_bytes_patched: usize,
    pub interleaved_bytes_patched: usize,
}

pub fn patch_data(
    image: &mut Image,
    hi_tables: &[HiByteTable],
    interleaved_tables: &[InterleavedTable],
    delta: i16,
) -> DataPatchStats {
    let tune_range = image.range();
    let mut stats = DataPatchStats::default();

    for table in hi_tables {
        let Some(lo_base) = table.lo_base else {
            log::warn!(
                "skipping unpatched ambiguous hi-byte table at ${:04X}",
                table.base
            );
            continue;
        };
        for i in 0..table.length {
            let hi_addr = table.base.wrapping_add(i as u16);
            let lo_addr = lo_base.wrapping_add(i as u16);
            let (Some(lo), Some(hi)) = (image.read(lo_addr), image.read(hi_addr)) else {
                break;
            };
            let pointer = join_u16(lo, hi);
            if !tune_range.contains(pointer) {
                continue;
            }
            let new_pointer = apply_delta(pointer, delta);
            let (_, new_hi) = split_u16(new_pointer);
            image.write(hi_addr, new_hi);
            stats.hi_bytes_patched += 1;
        }
    }

    for table in interleaved_tables {
        for i in 0..table.length_pairs {
            let lo_addr = table.base.wrapping_add((2 * i) as u16);
            let hi_addr = table.base.wrapping_add((2 * i + 1) as u16);
            let (Some(lo), Some(hi)) = (image.read(lo_addr), image.read(hi_addr)) else {
                break;
            };
            let pointer = join_u16(lo, hi);
            if !tune_range.contains(pointer) {
                continue;
            }
            let new_pointer = apply_delta(pointer, delta);
            let (_, new_hi) = split_u16(new_pointer);
            image.write(hi_addr, new_hi);
            stats.interleaved_bytes_patched += 1;
        }
    }

    log::info!(
        "data patcher: {} hi-byte table entries, {} interleaved entries rewritten",
        stats.hi_bytes_patched,
        stats.interleaved_bytes_patched
    );
    stats
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hi_byte_table_scenario() {
        // SPEC_FULL §8 scenario 3.
        let mut bytes = vec![0u8; 0x100];
        let lo = [0x00u8, 0x10, 0x40, 0x10, 0x80, 0x10, 0xC0, 0x10];
        bytes[0x80..0x88].copy_from_slice(&lo);
        let hi = [0x10u8, 0x10, 0x10, 0x10];
        bytes[0x90..0x94].copy_from_slice(&hi);
        let mut img = Image::new(0x1000, bytes);

        let tables = vec![HiByteTable {
            base: 0x1090,
            length: 4,
            lo_base: Some(0x1080),
        }];
        patch_data(&mut img, &tables, &[], 0x2000);

        assert_eq!(img.as_bytes()[0x90..0x94], [0x30, 0x30, 0x30, 0x30]);
        // lo bytes untouched
        assert_eq!(img.as_bytes()[0x80..0x88], lo);
    }

    #[test]
    fn interleaved_table_scenario() {
        // SPEC_FULL §8 scenario 4.
        let mut bytes = vec![0u8; 0x200];
        let pairs: &[u8] = &[0x00, 0x10, 0x40, 0x10, 0x80, 0x10, 0x00, 0x20];
        bytes[0x100..0x100 + pairs.len()].copy_from_slice(pairs);
        let mut img = Image::new(0x1000, bytes);

        let tables = vec![InterleavedTable {
            base: 0x1100,
            length_pairs: 3,
        }];
        patch_data(&mut img, &[], &tables, 0x4000);

        assert_eq!(img.read(0x1101), Some(0x50));
        assert_eq!(img.read(0x1103), Some(0x50));
        assert_eq!(img.read(0x1105), Some(0x50));
        // fourth pair is untouched because it was never registered (out of range)
        assert_eq!(img.read(0x1107), Some(0x20));
    }

    #[test]
    fn unpaired_hi_table_is_skipped() {
        let mut bytes = vec![0u8; 0x100];
        bytes[0x90] = 0x10;
        let mut img = Image::new(0x1000, bytes);
        let tables = vec![HiByteTable {
            base: 0x1090,
            length: 1,
            lo_base: None,
        }];
        patch_data(&mut img, &tables, &[], 0x2000);
        assert_eq!(img.read(0x1090), Some(0x10));
    }
}
