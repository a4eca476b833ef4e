//! Static description of the 6502 instruction set: mnemonic, length and
//! addressing mode for each of the 256 opcode values (SPEC_FULL §4.1).

/// Addressing mode of a decoded instruction. Tags follow the spec's naming
/// (IMP, IMM, ZP, ZPX, ZPY, ABS, ABX, ABY, IND, INDX, INDY, REL, ACC).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    Imp,
    Imm,
    Zp,
    Zpx,
    Zpy,
    Abs,
    Abx,
    Aby,
    Ind,
    IndX,
    IndY,
    Rel,
    Acc,
}

impl Mode {
    /// The four modes whose operand is a 16-bit absolute address that the
    /// code patcher and data patcher care about.
    pub fn is_sixteen_bit_absolute(self) -> bool {
        matches!(self, Mode::Abs | Mode::Abx | Mode::Aby | Mode::Ind)
    }

    /// True for `ABX`/`ABY`: an indexed load whose base is a table, the
    /// shape the table detectors look for.
    pub fn is_absolute_indexed(self) -> bool {
        matches!(self, Mode::Abx | Mode::Aby)
    }
}

/// Static per-opcode entry. `mnemonic` is `"ILL"` for undefined opcodes; such
/// an entry terminates a disassembly walk but never aborts the run.
#[derive(Clone, Copy)]
pub struct Opcode {
    pub mnemonic: &'static str,
    pub mode: Mode,
    pub bytes: u8,
}

pub const ILLEGAL: &str = "ILL";

macro_rules! op {
    () => {
        Opcode { mnemonic: ILLEGAL, mode: Mode::Imp, bytes: 1 }
    };
    ($name:literal, $mode:expr, $bytes:literal) => {
        Opcode { mnemonic: $name, mode: $mode, bytes: $bytes }
    };
}

#[rustfmt::skip]
pub const OPCODES: [Opcode; 256] = [
    // 0x00 - 0x0F
    op!("BRK", Mode::Imp, 1), op!("ORA", Mode::IndX, 2), op!(), op!(),
    op!(), op!("ORA", Mode::Zp, 2), op!("ASL", Mode::Zp, 2), op!(),
    op!("PHP", Mode::Imp, 1), op!("ORA", Mode::Imm, 2), op!("ASL", Mode::Acc, 1), op!(),
    op!(), op!("ORA", Mode::Abs, 3), op!("ASL", Mode::Abs, 3), op!(),
    // 0x10 - 0x1F
    op!("BPL", Mode::Rel, 2), op!("ORA", Mode::IndY, 2), op!(), op!(),
    op!(), op!("ORA", Mode::Zpx, 2), op!("ASL", Mode::Zpx, 2), op!(),
    op!("CLC", Mode::Imp, 1), op!("ORA", Mode::Aby, 3), op!(), op!(),
    op!(), op!("ORA", Mode::Abx, 3), op!("ASL", Mode::Abx, 3), op!(),
    // 0x20 - 0x2F
    op!("JSR", Mode::Abs, 3), op!("AND", Mode::IndX, 2), op!(), op!(),
    op!("BIT", Mode::Zp, 2), op!("AND", Mode::Zp, 2), op!("ROL", Mode::Zp, 2), op!(),
    op!("PLP", Mode::Imp, 1), op!("AND", Mode::Imm, 2), op!("ROL", Mode::Acc, 1), op!(),
    op!("BIT", Mode::Abs, 3), op!("AND", Mode::Abs, 3), op!("ROL", Mode::Abs, 3), op!(),
    // 0x30 - 0x3F
    op!("BMI", Mode::Rel, 2), op!("AND", Mode::IndY, 2), op!(), op!(),
    op!(), op!("AND", Mode::Zpx, 2), op!("ROL", Mode::Zpx, 2), op!(),
    op!("SEC", Mode::Imp, 1), op!("AND", Mode::Aby, 3), op!(), op!(),
    op!(), op!("AND", Mode::Abx, 3), op!("ROL", Mode::Abx, 3), op!(),
    // 0x40 - 0x4F
    op!("RTI", Mode::Imp, 1), op!("EOR", Mode::IndX, 2), op!(), op!(),
    op!(), op!("EOR", Mode::Zp, 2), op!("LSR", Mode::Zp, 2), op!(),
    op!("PHA", Mode::Imp, 1), op!("EOR", Mode::Imm, 2), op!("LSR", Mode::Acc, 1), op!(),
    op!("JMP", Mode::Abs, 3), op!("EOR", Mode::Abs, 3), op!("LSR", Mode::Abs, 3), op!(),
    // 0x50 - 0x5F
    op!("BVC", Mode::Rel, 2), op!("EOR", Mode::IndY, 2), op!(), op!(),
    op!(), op!("EOR", Mode::Zpx, 2), op!("LSR", Mode::Zpx, 2), op!(),
    op!("CLI", Mode::Imp, 1), op!("EOR", Mode::Aby, 3), op!(), op!(),
    op!(), op!("EOR", Mode::Abx, 3), op!("LSR", Mode::Abx, 3), op!(),
    // 0x60 - 0x6F
    op!("RTS", Mode::Imp, 1), op!("ADC", Mode::IndX, 2), op!(), op!(),
    op!(), op!("ADC", Mode::Zp, 2), op!("ROR", Mode::Zp, 2), op!(),
    op!("PLA", Mode::Imp, 1), op!("ADC", Mode::Imm, 2), op!("ROR", Mode::Acc, 1), op!(),
    op!("JMP", Mode::Ind, 3), op!("ADC", Mode::Abs, 3), op!("ROR", Mode::Abs, 3), op!(),
    // 0x70 - 0x7F
    op!("BVS", Mode::Rel, 2), op!("ADC", Mode::IndY, 2), op!(), op!(),
    op!(), op!("ADC", Mode::Zpx, 2), op!("ROR", Mode::Zpx, 2), op!(),
    op!("SEI", Mode::Imp, 1), op!("ADC", Mode::Aby, 3), op!(), op!(),
    op!(), op!("ADC", Mode::Abx, 3), op!("ROR", Mode::Abx, 3), op!(),
    // 0x80 - 0x8F
    op!(), op!("STA", Mode::IndX, 2), op!(), op!(),
    op!("STY", Mode::Zp, 2), op!("STA", Mode::Zp, 2), op!("STX", Mode::Zp, 2), op!(),
    op!("DEY", Mode::Imp, 1), op!(), op!("TXA", Mode::Imp, 1), op!(),
    op!("STY", Mode::Abs, 3), op!("STA", Mode::Abs, 3), op!("STX", Mode::Abs, 3), op!(),
    // 0x90 - 0x9F
    op!("BCC", Mode::Rel, 2), op!("STA", Mode::IndY, 2), op!(), op!(),
    op!("STY", Mode::Zpx, 2), op!("STA", Mode::Zpx, 2), op!("STX", Mode::Zpy, 2), op!(),
    op!("TYA", Mode::Imp, 1), op!("STA", Mode::Aby, 3), op!("TXS", Mode::Imp, 1), op!(),
    op!(), op!("STA", Mode::Abx, 3), op!(), op!(),
    // 0xA0 - 0xAF
    op!("LDY", Mode::Imm, 2), op!("LDA", Mode::IndX, 2), op!("LDX", Mode::Imm, 2), op!(),
    op!("LDY", Mode::Zp, 2), op!("LDA", Mode::Zp, 2), op!("LDX", Mode::Zp, 2), op!(),
    op!("TAY", Mode::Imp, 1), op!("LDA", Mode::Imm, 2), op!("TAX", Mode::Imp, 1), op!(),
    op!("LDY", Mode::Abs, 3), op!("LDA", Mode::Abs, 3), op!("LDX", Mode::Abs, 3), op!(),
    // 0xB0 - 0xBF
    op!("BCS", Mode::Rel, 2), op!("LDA", Mode::IndY, 2), op!(), op!(),
    op!("LDY", Mode::Zpx, 2), op!("LDA", Mode::Zpx, 2), op!("LDX", Mode::Zpy, 2), op!(),
    op!("CLV", Mode::Imp, 1), op!("LDA", Mode::Aby, 3), op!("TSX", Mode::Imp, 1), op!(),
    op!("LDY", Mode::Abx, 3), op!("LDA", Mode::Abx, 3), op!("LDX", Mode::Aby, 3), op!(),
    // 0xC0 - 0xCF
    op!("CPY", Mode::Imm, 2), op!("CMP", Mode::IndX, 2), op!(), op!(),
    op!("CPY", Mode::Zp, 2), op!("CMP", Mode::Zp, 2), op!("DEC", Mode::Zp, 2), op!(),
    op!("INY", Mode::Imp, 1), op!("CMP", Mode::Imm, 2), op!("DEX", Mode::Imp, 1), op!(),
    op!("CPY", Mode::Abs, 3), op!("CMP", Mode::Abs, 3), op!("DEC", Mode::Abs, 3), op!(),
    // 0xD0 - 0xDF
    op!("BNE", Mode::Rel, 2), op!("CMP", Mode::IndY, 2), op!(), op!(),
    op!(), op!("CMP", Mode::Zpx, 2), op!("DEC", Mode::Zpx, 2), op!(),
    op!("CLD", Mode::Imp, 1), op!("CMP", Mode::Aby, 3), op!(), op!(),
    op!(), op!("CMP", Mode::Abx, 3), op!("DEC", Mode::Abx, 3), op!(),
    // 0xE0 - 0xEF
    op!("CPX", Mode::Imm, 2), op!("SBC", Mode::IndX, 2), op!(), op!(),
    op!("CPX", Mode::Zp, 2), op!("SBC", Mode::Zp, 2), op!("INC", Mode::Zp, 2), op!(),
    op!("INX", Mode::Imp, 1), op!("SBC", Mode::Imm, 2), op!("NOP", Mode::Imp, 1), op!(),
    op!("CPX", Mode::Abs, 3), op!("SBC", Mode::Abs, 3), op!("INC", Mode::Abs, 3), op!(),
    // 0xF0 - 0xFF
    op!("BEQ", Mode::Rel, 2), op!("SBC", Mode::IndY, 2), op!(), op!(),
    op!(), op!("SBC", Mode::Zpx, 2), op!("INC", Mode::Zpx, 2), op!(),
    op!("SED", Mode::Imp, 1), op!("SBC", Mode::Aby, 3), op!(), op!(),
    op!(), op!("SBC", Mode::Abx, 3), op!("INC", Mode::Abx, 3), op!(),
];

/// Looks up the static entry for a raw opcode byte.
pub fn lookup(byte: u8) -> &'static Opcode {
    &OPCODES[byte as usize]
}

pub fn is_illegal(opcode: &Opcode) -> bool {
    opcode.mnemonic == ILLEGAL
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_has_256_entries() {
        assert_eq!(OPCODES.len(), 256);
    }

    #[test]
    fn jsr_is_three_bytes_absolute() {
        let op = lookup(0x20);
        assert_eq!(op.mnemonic, "JSR");
        assert_eq!(op.mode, Mode::Abs);
        assert_eq!(op.bytes, 3);
    }

    #[test]
    fn jmp_indirect_decodes() {
        let op = lookup(0x6C);
        assert_eq!(op.mnemonic, "JMP");
        assert_eq!(op.mode, Mode::Ind);
    }

    #[test]
    fn undefined_opcode_is_illegal() {
        assert!(is_illegal(lookup(0x02)));
        assert!(is_illegal(lookup(0xFF)));
    }

    #[test]
    fn conditional_branches_are_relative_two_bytes() {
        for byte in [0x10u8, 0x30, 0x50, 0x70, 0x90, 0xB0, 0xD0, 0xF0] {
            let op = lookup(byte);
            assert_eq!(op.mode, Mode::Rel);
            assert_eq!(op.bytes, 2);
        }
    }
}
