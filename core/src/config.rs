//! Tune descriptor (engine input) and configuration record (engine output),
//! per SPEC_FULL §3 and §6/§10.3.

use serde::{Deserialize, Serialize};

use crate::address::Addr;

/// Immutable per-run input (SPEC_FULL §3 "Tune descriptor").
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TuneDescriptor {
    pub original_base: Addr,
    pub new_base: Addr,
    pub original_sid_base: Addr,
    pub new_sid_base: Addr,
    /// Jump-table slot addresses to seed the disassembler with, in order.
    /// Convention: `original_base`, `original_base+3`, `original_base+6`.
    pub entry_points: Vec<Addr>,
}

/// Width of a SID register window (SPEC_FULL §3 "SID window").
pub const SID_WINDOW_LEN: u16 = 0x20;

impl TuneDescriptor {
    /// `Δ = new_base − original_base`, a signed 16-bit delta added to every
    /// tune-internal pointer (Invariant I1).
    pub fn delta(&self) -> i16 {
        self.new_base.wrapping_sub(self.original_base) as i16
    }

    /// Standard convention: the three jump-table slots at `original_base`,
    /// `original_base+3`, `original_base+6`.
    pub fn standard_entry_points(original_base: Addr) -> Vec<Addr> {
        vec![
            original_base,
            original_base.wrapping_add(3),
            original_base.wrapping_add(6),
        ]
    }
}

/// Configuration record the engine emits for the harness (SPEC_FULL §6):
/// the new load address, the new SID window, the relocated entry addresses,
/// and (when multiple tunes are chained) an assigned raster trigger line.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TuneConfig {
    pub new_base: Addr,
    pub new_sid_base: Addr,
    /// Original entry addresses translated by `Δ` (`entry + Δ`).
    pub entries: Vec<Addr>,
    pub raster_line: Option<u16>,
}

impl TuneConfig {
    pub fn new(descriptor: &TuneDescriptor, resolved_entries: &[Addr]) -> Self {
        let delta = descriptor.delta();
        let entries = resolved_entries
            .iter()
            .map(|&e| crate::address::apply_delta(e, delta))
            .collect();
        Self {
            new_base: descriptor.new_base,
            new_sid_base: descriptor.new_sid_base,
            entries,
            raster_line: None,
        }
    }
}

/// PAL raster lines per frame, used by the chained-playback convention.
pub const PAL_FRAME_LINES: u16 = 312;

/// Assigns raster trigger lines to `count` chained tunes: `⌊312·k/N⌋` for
/// `k` in `0..count` (SPEC_FULL §6). This is a convention consumed by
/// harnesses that chain several tunes in one frame; the engine itself does
/// not drive scheduling.
pub fn raster_lines(count: u16) -> Vec<u16> {
    if count == 0 {
        return Vec::new();
    }
    (0..count)
        .map(|k| (PAL_FRAME_LINES as u32 * k as u32 / count as u32) as u16)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delta_is_signed_difference() {
        let d = TuneDescriptor {
            original_base: 0x1000,
            new_base: 0x3000,
            original_sid_base: 0xD400,
            new_sid_base: 0xD400,
            entry_points: vec![],
        };
        assert_eq!(d.delta(), 0x2000);
    }

    #[test]
    fn negative_delta_wraps_correctly() {
        let d = TuneDescriptor {
            original_base: 0x3000,
            new_base: 0x1000,
            original_sid_base: 0xD400,
            new_sid_base: 0xD400,
            entry_points: vec![],
        };
        assert_eq!(d.delta(), -0x2000);
        assert_eq!(crate::address::apply_delta(0x3050, d.delta()), 0x1050);
    }

    #[test]
    fn standard_entry_points_are_spaced_by_three() {
        let pts = TuneDescriptor::standard_entry_points(0x1000);
        assert_eq!(pts, vec![0x1000, 0x1003, 0x1006]);
    }

    #[test]
    fn four_way_raster_split_matches_canonical_example() {
        assert_eq!(raster_lines(4), vec![0, 78, 156, 234]);
    }

    #[test]
    fn config_translates_entries_by_delta() {
        let d = TuneDescriptor {
            original_base: 0x1000,
            new_base: 0x3000,
            original_sid_base: 0xD400,
            new_sid_base: 0xD400,
            entry_points: vec![],
        };
        let cfg = TuneConfig::new(&d, &[0x1050, 0x1200]);
        assert_eq!(cfg.entries, vec![0x3050, 0x3200]);
    }
}
