// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

//! WDC 65C02 addressing modes and instruction set.
//!
//! # Addressing Modes
//!
//! | Syntax | Mode |
//! |--------|------|
//! | `#$20` | Immediate |
//! | `$20` | Zero Page |
//! | `$20,X` | Zero Page,X |
//! | `$20,Y` | Zero Page,Y |
//! | `$1234` | Absolute |
//! | `$1234,X` | Absolute,X |
//! | `$1234,Y` | Absolute,Y |
//! | `($20,X)` | Indexed Indirect |
//! | `($20),Y` | Indirect Indexed |
//! | `($20)` | Zero Page Indirect (65C02) |
//! | `($1234)` | Indirect (JMP) |
//! | `($1234,X)` | Absolute Indexed Indirect (65C02, JMP) |

pub mod table;

pub use table::{decode, has_mode, lookup, OpcodeEntry, INSTRUCTION_TABLE};

/// Addressing modes for the 65C02.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AddressMode {
    /// No operand (NOP, RTS, BRK, etc.)
    Implied,
    /// Accumulator (ASL A, INC A, etc.)
    Accumulator,
    /// #$nn - 8-bit immediate value
    Immediate,
    /// $nn - Zero page (8-bit address)
    ZeroPage,
    /// $nn,X - Zero page indexed by X
    ZeroPageX,
    /// $nn,Y - Zero page indexed by Y
    ZeroPageY,
    /// $nnnn - Absolute (16-bit address)
    Absolute,
    /// $nnnn,X - Absolute indexed by X
    AbsoluteX,
    /// $nnnn,Y - Absolute indexed by Y
    AbsoluteY,
    /// ($nnnn) - Indirect (JMP only)
    Indirect,
    /// ($nn,X) - Indexed indirect (zero page)
    IndirectX,
    /// ($nn),Y - Indirect indexed (zero page)
    IndirectY,
    /// ($nn) - Zero page indirect (65C02)
    ZeroPageIndirect,
    /// ($nnnn,X) - Absolute indexed indirect (65C02, JMP)
    AbsoluteIndexedIndirect,
    /// Relative branch offset (8-bit signed)
    Relative,
}

impl AddressMode {
    /// Get the number of operand bytes for this mode.
    pub fn operand_size(&self) -> u8 {
        match self {
            AddressMode::Implied | AddressMode::Accumulator => 0,
            AddressMode::Immediate
            | AddressMode::ZeroPage
            | AddressMode::ZeroPageX
            | AddressMode::ZeroPageY
            | AddressMode::IndirectX
            | AddressMode::IndirectY
            | AddressMode::ZeroPageIndirect
            | AddressMode::Relative => 1,
            AddressMode::Absolute
            | AddressMode::AbsoluteX
            | AddressMode::AbsoluteY
            | AddressMode::Indirect
            | AddressMode::AbsoluteIndexedIndirect => 2,
        }
    }
}

/// The 65C02 mnemonic set (NMOS 6502 plus the WDC extensions).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mnemonic {
    Adc,
    And,
    Asl,
    Bcc,
    Bcs,
    Beq,
    Bit,
    Bmi,
    Bne,
    Bpl,
    Bra,
    Brk,
    Bvc,
    Bvs,
    Clc,
    Cld,
    Cli,
    Clv,
    Cmp,
    Cpx,
    Cpy,
    Dec,
    Dex,
    Dey,
    Eor,
    Inc,
    Inx,
    Iny,
    Jmp,
    Jsr,
    Lda,
    Ldx,
    Ldy,
    Lsr,
    Nop,
    Ora,
    Pha,
    Php,
    Phx,
    Phy,
    Pla,
    Plp,
    Plx,
    Ply,
    Rol,
    Ror,
    Rti,
    Rts,
    Sbc,
    Sec,
    Sed,
    Sei,
    Sta,
    Stx,
    Sty,
    Stz,
    Tax,
    Tay,
    Trb,
    Tsb,
    Tsx,
    Txa,
    Txs,
    Tya,
}

impl Mnemonic {
    /// Parse a mnemonic, case-insensitively.
    pub fn parse(text: &str) -> Option<Mnemonic> {
        let upper = text.to_ascii_uppercase();
        Some(match upper.as_str() {
            "ADC" => Mnemonic::Adc,
            "AND" => Mnemonic::And,
            "ASL" => Mnemonic::Asl,
            "BCC" => Mnemonic::Bcc,
            "BCS" => Mnemonic::Bcs,
            "BEQ" => Mnemonic::Beq,
            "BIT" => Mnemonic::Bit,
            "BMI" => Mnemonic::Bmi,
            "BNE" => Mnemonic::Bne,
            "BPL" => Mnemonic::Bpl,
            "BRA" => Mnemonic::Bra,
            "BRK" => Mnemonic::Brk,
            "BVC" => Mnemonic::Bvc,
            "BVS" => Mnemonic::Bvs,
            "CLC" => Mnemonic::Clc,
            "CLD" => Mnemonic::Cld,
            "CLI" => Mnemonic::Cli,
            "CLV" => Mnemonic::Clv,
            "CMP" => Mnemonic::Cmp,
            "CPX" => Mnemonic::Cpx,
            "CPY" => Mnemonic::Cpy,
            "DEC" => Mnemonic::Dec,
            "DEX" => Mnemonic::Dex,
            "DEY" => Mnemonic::Dey,
            "EOR" => Mnemonic::Eor,
            "INC" => Mnemonic::Inc,
            "INX" => Mnemonic::Inx,
            "INY" => Mnemonic::Iny,
            "JMP" => Mnemonic::Jmp,
            "JSR" => Mnemonic::Jsr,
            "LDA" => Mnemonic::Lda,
            "LDX" => Mnemonic::Ldx,
            "LDY" => Mnemonic::Ldy,
            "LSR" => Mnemonic::Lsr,
            "NOP" => Mnemonic::Nop,
            "ORA" => Mnemonic::Ora,
            "PHA" => Mnemonic::Pha,
            "PHP" => Mnemonic::Php,
            "PHX" => Mnemonic::Phx,
            "PHY" => Mnemonic::Phy,
            "PLA" => Mnemonic::Pla,
            "PLP" => Mnemonic::Plp,
            "PLX" => Mnemonic::Plx,
            "PLY" => Mnemonic::Ply,
            "ROL" => Mnemonic::Rol,
            "ROR" => Mnemonic::Ror,
            "RTI" => Mnemonic::Rti,
            "RTS" => Mnemonic::Rts,
            "SBC" => Mnemonic::Sbc,
            "SEC" => Mnemonic::Sec,
            "SED" => Mnemonic::Sed,
            "SEI" => Mnemonic::Sei,
            "STA" => Mnemonic::Sta,
            "STX" => Mnemonic::Stx,
            "STY" => Mnemonic::Sty,
            "STZ" => Mnemonic::Stz,
            "TAX" => Mnemonic::Tax,
            "TAY" => Mnemonic::Tay,
            "TRB" => Mnemonic::Trb,
            "TSB" => Mnemonic::Tsb,
            "TSX" => Mnemonic::Tsx,
            "TXA" => Mnemonic::Txa,
            "TXS" => Mnemonic::Txs,
            "TYA" => Mnemonic::Tya,
            _ => return None,
        })
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Mnemonic::Adc => "ADC",
            Mnemonic::And => "AND",
            Mnemonic::Asl => "ASL",
            Mnemonic::Bcc => "BCC",
            Mnemonic::Bcs => "BCS",
            Mnemonic::Beq => "BEQ",
            Mnemonic::Bit => "BIT",
            Mnemonic::Bmi => "BMI",
            Mnemonic::Bne => "BNE",
            Mnemonic::Bpl => "BPL",
            Mnemonic::Bra => "BRA",
            Mnemonic::Brk => "BRK",
            Mnemonic::Bvc => "BVC",
            Mnemonic::Bvs => "BVS",
            Mnemonic::Clc => "CLC",
            Mnemonic::Cld => "CLD",
            Mnemonic::Cli => "CLI",
            Mnemonic::Clv => "CLV",
            Mnemonic::Cmp => "CMP",
            Mnemonic::Cpx => "CPX",
            Mnemonic::Cpy => "CPY",
            Mnemonic::Dec => "DEC",
            Mnemonic::Dex => "DEX",
            Mnemonic::Dey => "DEY",
            Mnemonic::Eor => "EOR",
            Mnemonic::Inc => "INC",
            Mnemonic::Inx => "INX",
            Mnemonic::Iny => "INY",
            Mnemonic::Jmp => "JMP",
            Mnemonic::Jsr => "JSR",
            Mnemonic::Lda => "LDA",
            Mnemonic::Ldx => "LDX",
            Mnemonic::Ldy => "LDY",
            Mnemonic::Lsr => "LSR",
            Mnemonic::Nop => "NOP",
            Mnemonic::Ora => "ORA",
            Mnemonic::Pha => "PHA",
            Mnemonic::Php => "PHP",
            Mnemonic::Phx => "PHX",
            Mnemonic::Phy => "PHY",
            Mnemonic::Pla => "PLA",
            Mnemonic::Plp => "PLP",
            Mnemonic::Plx => "PLX",
            Mnemonic::Ply => "PLY",
            Mnemonic::Rol => "ROL",
            Mnemonic::Ror => "ROR",
            Mnemonic::Rti => "RTI",
            Mnemonic::Rts => "RTS",
            Mnemonic::Sbc => "SBC",
            Mnemonic::Sec => "SEC",
            Mnemonic::Sed => "SED",
            Mnemonic::Sei => "SEI",
            Mnemonic::Sta => "STA",
            Mnemonic::Stx => "STX",
            Mnemonic::Sty => "STY",
            Mnemonic::Stz => "STZ",
            Mnemonic::Tax => "TAX",
            Mnemonic::Tay => "TAY",
            Mnemonic::Trb => "TRB",
            Mnemonic::Tsb => "TSB",
            Mnemonic::Tsx => "TSX",
            Mnemonic::Txa => "TXA",
            Mnemonic::Txs => "TXS",
            Mnemonic::Tya => "TYA",
        }
    }

    /// Branch mnemonics always take relative addressing.
    pub fn is_branch(&self) -> bool {
        matches!(
            self,
            Mnemonic::Bcc
                | Mnemonic::Bcs
                | Mnemonic::Beq
                | Mnemonic::Bmi
                | Mnemonic::Bne
                | Mnemonic::Bpl
                | Mnemonic::Bvc
                | Mnemonic::Bvs
                | Mnemonic::Bra
        )
    }
}

#[cfg(test)]
mod tests {
    use super::{AddressMode, Mnemonic};

    #[test]
    fn mnemonic_parse_is_case_insensitive() {
        assert_eq!(Mnemonic::parse("lda"), Some(Mnemonic::Lda));
        assert_eq!(Mnemonic::parse("Stz"), Some(Mnemonic::Stz));
        assert_eq!(Mnemonic::parse("XYZ"), None);
    }

    #[test]
    fn branch_set_matches_the_relative_only_mnemonics() {
        assert!(Mnemonic::Bra.is_branch());
        assert!(Mnemonic::Bne.is_branch());
        assert!(!Mnemonic::Jmp.is_branch());
        assert!(!Mnemonic::Brk.is_branch());
    }

    #[test]
    fn operand_sizes_by_mode() {
        assert_eq!(AddressMode::Implied.operand_size(), 0);
        assert_eq!(AddressMode::Immediate.operand_size(), 1);
        assert_eq!(AddressMode::ZeroPageIndirect.operand_size(), 1);
        assert_eq!(AddressMode::AbsoluteIndexedIndirect.operand_size(), 2);
    }
}
