// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

//! 65C02 instruction table.
//!
//! One table serves the assembler (keyed by mnemonic and mode), the
//! emulator, and the disassembler (keyed by opcode byte). Cycle counts
//! are the base costs; page-crossing and branch-taken penalties are not
//! modeled.

use std::sync::OnceLock;

use super::{AddressMode, Mnemonic};

/// An instruction-table entry.
pub struct OpcodeEntry {
    pub mnemonic: Mnemonic,
    pub mode: AddressMode,
    pub opcode: u8,
    pub cycles: u8,
}

impl OpcodeEntry {
    /// Total instruction size in bytes (opcode plus operand).
    pub fn size(&self) -> u8 {
        1 + self.mode.operand_size()
    }
}

/// All documented NMOS 6502 opcodes plus the WDC 65C02 additions.
/// Unassigned opcode bytes are illegal: they decode to a one-byte,
/// two-cycle no-op and disassemble as `???`.
pub static INSTRUCTION_TABLE: &[OpcodeEntry] = &[
    // ADC - Add with Carry
    OpcodeEntry {
        mnemonic: Mnemonic::Adc,
        mode: AddressMode::Immediate,
        opcode: 0x69,
        cycles: 2,
    },
    OpcodeEntry {
        mnemonic: Mnemonic::Adc,
        mode: AddressMode::ZeroPage,
        opcode: 0x65,
        cycles: 3,
    },
    OpcodeEntry {
        mnemonic: Mnemonic::Adc,
        mode: AddressMode::ZeroPageX,
        opcode: 0x75,
        cycles: 4,
    },
    OpcodeEntry {
        mnemonic: Mnemonic::Adc,
        mode: AddressMode::Absolute,
        opcode: 0x6D,
        cycles: 4,
    },
    OpcodeEntry {
        mnemonic: Mnemonic::Adc,
        mode: AddressMode::AbsoluteX,
        opcode: 0x7D,
        cycles: 4,
    },
    OpcodeEntry {
        mnemonic: Mnemonic::Adc,
        mode: AddressMode::AbsoluteY,
        opcode: 0x79,
        cycles: 4,
    },
    OpcodeEntry {
        mnemonic: Mnemonic::Adc,
        mode: AddressMode::IndirectX,
        opcode: 0x61,
        cycles: 6,
    },
    OpcodeEntry {
        mnemonic: Mnemonic::Adc,
        mode: AddressMode::IndirectY,
        opcode: 0x71,
        cycles: 5,
    },
    OpcodeEntry {
        mnemonic: Mnemonic::Adc,
        mode: AddressMode::ZeroPageIndirect,
        opcode: 0x72,
        cycles: 5,
    },
    // AND - Logical AND
    OpcodeEntry {
        mnemonic: Mnemonic::And,
        mode: AddressMode::Immediate,
        opcode: 0x29,
        cycles: 2,
    },
    OpcodeEntry {
        mnemonic: Mnemonic::And,
        mode: AddressMode::ZeroPage,
        opcode: 0x25,
        cycles: 3,
    },
    OpcodeEntry {
        mnemonic: Mnemonic::And,
        mode: AddressMode::ZeroPageX,
        opcode: 0x35,
        cycles: 4,
    },
    OpcodeEntry {
        mnemonic: Mnemonic::And,
        mode: AddressMode::Absolute,
        opcode: 0x2D,
        cycles: 4,
    },
    OpcodeEntry {
        mnemonic: Mnemonic::And,
        mode: AddressMode::AbsoluteX,
        opcode: 0x3D,
        cycles: 4,
    },
    OpcodeEntry {
        mnemonic: Mnemonic::And,
        mode: AddressMode::AbsoluteY,
        opcode: 0x39,
        cycles: 4,
    },
    OpcodeEntry {
        mnemonic: Mnemonic::And,
        mode: AddressMode::IndirectX,
        opcode: 0x21,
        cycles: 6,
    },
    OpcodeEntry {
        mnemonic: Mnemonic::And,
        mode: AddressMode::IndirectY,
        opcode: 0x31,
        cycles: 5,
    },
    OpcodeEntry {
        mnemonic: Mnemonic::And,
        mode: AddressMode::ZeroPageIndirect,
        opcode: 0x32,
        cycles: 5,
    },
    // ASL - Arithmetic Shift Left
    OpcodeEntry {
        mnemonic: Mnemonic::Asl,
        mode: AddressMode::Accumulator,
        opcode: 0x0A,
        cycles: 2,
    },
    OpcodeEntry {
        mnemonic: Mnemonic::Asl,
        mode: AddressMode::ZeroPage,
        opcode: 0x06,
        cycles: 5,
    },
    OpcodeEntry {
        mnemonic: Mnemonic::Asl,
        mode: AddressMode::ZeroPageX,
        opcode: 0x16,
        cycles: 6,
    },
    OpcodeEntry {
        mnemonic: Mnemonic::Asl,
        mode: AddressMode::Absolute,
        opcode: 0x0E,
        cycles: 6,
    },
    OpcodeEntry {
        mnemonic: Mnemonic::Asl,
        mode: AddressMode::AbsoluteX,
        opcode: 0x1E,
        cycles: 7,
    },
    // BCC - Branch on Carry Clear
    OpcodeEntry {
        mnemonic: Mnemonic::Bcc,
        mode: AddressMode::Relative,
        opcode: 0x90,
        cycles: 2,
    },
    // BCS - Branch on Carry Set
    OpcodeEntry {
        mnemonic: Mnemonic::Bcs,
        mode: AddressMode::Relative,
        opcode: 0xB0,
        cycles: 2,
    },
    // BEQ - Branch on Equal
    OpcodeEntry {
        mnemonic: Mnemonic::Beq,
        mode: AddressMode::Relative,
        opcode: 0xF0,
        cycles: 2,
    },
    // BIT - Bit Test (immediate and indexed forms are 65C02 additions)
    OpcodeEntry {
        mnemonic: Mnemonic::Bit,
        mode: AddressMode::ZeroPage,
        opcode: 0x24,
        cycles: 3,
    },
    OpcodeEntry {
        mnemonic: Mnemonic::Bit,
        mode: AddressMode::Absolute,
        opcode: 0x2C,
        cycles: 4,
    },
    OpcodeEntry {
        mnemonic: Mnemonic::Bit,
        mode: AddressMode::Immediate,
        opcode: 0x89,
        cycles: 2,
    },
    OpcodeEntry {
        mnemonic: Mnemonic::Bit,
        mode: AddressMode::ZeroPageX,
        opcode: 0x34,
        cycles: 4,
    },
    OpcodeEntry {
        mnemonic: Mnemonic::Bit,
        mode: AddressMode::AbsoluteX,
        opcode: 0x3C,
        cycles: 4,
    },
    // BMI - Branch on Minus
    OpcodeEntry {
        mnemonic: Mnemonic::Bmi,
        mode: AddressMode::Relative,
        opcode: 0x30,
        cycles: 2,
    },
    // BNE - Branch on Not Equal
    OpcodeEntry {
        mnemonic: Mnemonic::Bne,
        mode: AddressMode::Relative,
        opcode: 0xD0,
        cycles: 2,
    },
    // BPL - Branch on Plus
    OpcodeEntry {
        mnemonic: Mnemonic::Bpl,
        mode: AddressMode::Relative,
        opcode: 0x10,
        cycles: 2,
    },
    // BRA - Branch Always (65C02)
    OpcodeEntry {
        mnemonic: Mnemonic::Bra,
        mode: AddressMode::Relative,
        opcode: 0x80,
        cycles: 3,
    },
    // BRK - Force Interrupt
    OpcodeEntry {
        mnemonic: Mnemonic::Brk,
        mode: AddressMode::Implied,
        opcode: 0x00,
        cycles: 7,
    },
    // BVC - Branch on Overflow Clear
    OpcodeEntry {
        mnemonic: Mnemonic::Bvc,
        mode: AddressMode::Relative,
        opcode: 0x50,
        cycles: 2,
    },
    // BVS - Branch on Overflow Set
    OpcodeEntry {
        mnemonic: Mnemonic::Bvs,
        mode: AddressMode::Relative,
        opcode: 0x70,
        cycles: 2,
    },
    // CLC - Clear Carry
    OpcodeEntry {
        mnemonic: Mnemonic::Clc,
        mode: AddressMode::Implied,
        opcode: 0x18,
        cycles: 2,
    },
    // CLD - Clear Decimal
    OpcodeEntry {
        mnemonic: Mnemonic::Cld,
        mode: AddressMode::Implied,
        opcode: 0xD8,
        cycles: 2,
    },
    // CLI - Clear Interrupt Disable
    OpcodeEntry {
        mnemonic: Mnemonic::Cli,
        mode: AddressMode::Implied,
        opcode: 0x58,
        cycles: 2,
    },
    // CLV - Clear Overflow
    OpcodeEntry {
        mnemonic: Mnemonic::Clv,
        mode: AddressMode::Implied,
        opcode: 0xB8,
        cycles: 2,
    },
    // CMP - Compare Accumulator
    OpcodeEntry {
        mnemonic: Mnemonic::Cmp,
        mode: AddressMode::Immediate,
        opcode: 0xC9,
        cycles: 2,
    },
    OpcodeEntry {
        mnemonic: Mnemonic::Cmp,
        mode: AddressMode::ZeroPage,
        opcode: 0xC5,
        cycles: 3,
    },
    OpcodeEntry {
        mnemonic: Mnemonic::Cmp,
        mode: AddressMode::ZeroPageX,
        opcode: 0xD5,
        cycles: 4,
    },
    OpcodeEntry {
        mnemonic: Mnemonic::Cmp,
        mode: AddressMode::Absolute,
        opcode: 0xCD,
        cycles: 4,
    },
    OpcodeEntry {
        mnemonic: Mnemonic::Cmp,
        mode: AddressMode::AbsoluteX,
        opcode: 0xDD,
        cycles: 4,
    },
    OpcodeEntry {
        mnemonic: Mnemonic::Cmp,
        mode: AddressMode::AbsoluteY,
        opcode: 0xD9,
        cycles: 4,
    },
    OpcodeEntry {
        mnemonic: Mnemonic::Cmp,
        mode: AddressMode::IndirectX,
        opcode: 0xC1,
        cycles: 6,
    },
    OpcodeEntry {
        mnemonic: Mnemonic::Cmp,
        mode: AddressMode::IndirectY,
        opcode: 0xD1,
        cycles: 5,
    },
    OpcodeEntry {
        mnemonic: Mnemonic::Cmp,
        mode: AddressMode::ZeroPageIndirect,
        opcode: 0xD2,
        cycles: 5,
    },
    // CPX - Compare X Register
    OpcodeEntry {
        mnemonic: Mnemonic::Cpx,
        mode: AddressMode::Immediate,
        opcode: 0xE0,
        cycles: 2,
    },
    OpcodeEntry {
        mnemonic: Mnemonic::Cpx,
        mode: AddressMode::ZeroPage,
        opcode: 0xE4,
        cycles: 3,
    },
    OpcodeEntry {
        mnemonic: Mnemonic::Cpx,
        mode: AddressMode::Absolute,
        opcode: 0xEC,
        cycles: 4,
    },
    // CPY - Compare Y Register
    OpcodeEntry {
        mnemonic: Mnemonic::Cpy,
        mode: AddressMode::Immediate,
        opcode: 0xC0,
        cycles: 2,
    },
    OpcodeEntry {
        mnemonic: Mnemonic::Cpy,
        mode: AddressMode::ZeroPage,
        opcode: 0xC4,
        cycles: 3,
    },
    OpcodeEntry {
        mnemonic: Mnemonic::Cpy,
        mode: AddressMode::Absolute,
        opcode: 0xCC,
        cycles: 4,
    },
    // DEC - Decrement Memory (accumulator form is a 65C02 addition)
    OpcodeEntry {
        mnemonic: Mnemonic::Dec,
        mode: AddressMode::Accumulator,
        opcode: 0x3A,
        cycles: 2,
    },
    OpcodeEntry {
        mnemonic: Mnemonic::Dec,
        mode: AddressMode::ZeroPage,
        opcode: 0xC6,
        cycles: 5,
    },
    OpcodeEntry {
        mnemonic: Mnemonic::Dec,
        mode: AddressMode::ZeroPageX,
        opcode: 0xD6,
        cycles: 6,
    },
    OpcodeEntry {
        mnemonic: Mnemonic::Dec,
        mode: AddressMode::Absolute,
        opcode: 0xCE,
        cycles: 6,
    },
    OpcodeEntry {
        mnemonic: Mnemonic::Dec,
        mode: AddressMode::AbsoluteX,
        opcode: 0xDE,
        cycles: 7,
    },
    // DEX - Decrement X Register
    OpcodeEntry {
        mnemonic: Mnemonic::Dex,
        mode: AddressMode::Implied,
        opcode: 0xCA,
        cycles: 2,
    },
    // DEY - Decrement Y Register
    OpcodeEntry {
        mnemonic: Mnemonic::Dey,
        mode: AddressMode::Implied,
        opcode: 0x88,
        cycles: 2,
    },
    // EOR - Exclusive OR
    OpcodeEntry {
        mnemonic: Mnemonic::Eor,
        mode: AddressMode::Immediate,
        opcode: 0x49,
        cycles: 2,
    },
    OpcodeEntry {
        mnemonic: Mnemonic::Eor,
        mode: AddressMode::ZeroPage,
        opcode: 0x45,
        cycles: 3,
    },
    OpcodeEntry {
        mnemonic: Mnemonic::Eor,
        mode: AddressMode::ZeroPageX,
        opcode: 0x55,
        cycles: 4,
    },
    OpcodeEntry {
        mnemonic: Mnemonic::Eor,
        mode: AddressMode::Absolute,
        opcode: 0x4D,
        cycles: 4,
    },
    OpcodeEntry {
        mnemonic: Mnemonic::Eor,
        mode: AddressMode::AbsoluteX,
        opcode: 0x5D,
        cycles: 4,
    },
    OpcodeEntry {
        mnemonic: Mnemonic::Eor,
        mode: AddressMode::AbsoluteY,
        opcode: 0x59,
        cycles: 4,
    },
    OpcodeEntry {
        mnemonic: Mnemonic::Eor,
        mode: AddressMode::IndirectX,
        opcode: 0x41,
        cycles: 6,
    },
    OpcodeEntry {
        mnemonic: Mnemonic::Eor,
        mode: AddressMode::IndirectY,
        opcode: 0x51,
        cycles: 5,
    },
    OpcodeEntry {
        mnemonic: Mnemonic::Eor,
        mode: AddressMode::ZeroPageIndirect,
        opcode: 0x52,
        cycles: 5,
    },
    // INC - Increment Memory (accumulator form is a 65C02 addition)
    OpcodeEntry {
        mnemonic: Mnemonic::Inc,
        mode: AddressMode::Accumulator,
        opcode: 0x1A,
        cycles: 2,
    },
    OpcodeEntry {
        mnemonic: Mnemonic::Inc,
        mode: AddressMode::ZeroPage,
        opcode: 0xE6,
        cycles: 5,
    },
    OpcodeEntry {
        mnemonic: Mnemonic::Inc,
        mode: AddressMode::ZeroPageX,
        opcode: 0xF6,
        cycles: 6,
    },
    OpcodeEntry {
        mnemonic: Mnemonic::Inc,
        mode: AddressMode::Absolute,
        opcode: 0xEE,
        cycles: 6,
    },
    OpcodeEntry {
        mnemonic: Mnemonic::Inc,
        mode: AddressMode::AbsoluteX,
        opcode: 0xFE,
        cycles: 7,
    },
    // INX - Increment X Register
    OpcodeEntry {
        mnemonic: Mnemonic::Inx,
        mode: AddressMode::Implied,
        opcode: 0xE8,
        cycles: 2,
    },
    // INY - Increment Y Register
    OpcodeEntry {
        mnemonic: Mnemonic::Iny,
        mode: AddressMode::Implied,
        opcode: 0xC8,
        cycles: 2,
    },
    // JMP - Jump (indexed indirect form is a 65C02 addition)
    OpcodeEntry {
        mnemonic: Mnemonic::Jmp,
        mode: AddressMode::Absolute,
        opcode: 0x4C,
        cycles: 3,
    },
    OpcodeEntry {
        mnemonic: Mnemonic::Jmp,
        mode: AddressMode::Indirect,
        opcode: 0x6C,
        cycles: 5,
    },
    OpcodeEntry {
        mnemonic: Mnemonic::Jmp,
        mode: AddressMode::AbsoluteIndexedIndirect,
        opcode: 0x7C,
        cycles: 6,
    },
    // JSR - Jump to Subroutine
    OpcodeEntry {
        mnemonic: Mnemonic::Jsr,
        mode: AddressMode::Absolute,
        opcode: 0x20,
        cycles: 6,
    },
    // LDA - Load Accumulator
    OpcodeEntry {
        mnemonic: Mnemonic::Lda,
        mode: AddressMode::Immediate,
        opcode: 0xA9,
        cycles: 2,
    },
    OpcodeEntry {
        mnemonic: Mnemonic::Lda,
        mode: AddressMode::ZeroPage,
        opcode: 0xA5,
        cycles: 3,
    },
    OpcodeEntry {
        mnemonic: Mnemonic::Lda,
        mode: AddressMode::ZeroPageX,
        opcode: 0xB5,
        cycles: 4,
    },
    OpcodeEntry {
        mnemonic: Mnemonic::Lda,
        mode: AddressMode::Absolute,
        opcode: 0xAD,
        cycles: 4,
    },
    OpcodeEntry {
        mnemonic: Mnemonic::Lda,
        mode: AddressMode::AbsoluteX,
        opcode: 0xBD,
        cycles: 4,
    },
    OpcodeEntry {
        mnemonic: Mnemonic::Lda,
        mode: AddressMode::AbsoluteY,
        opcode: 0xB9,
        cycles: 4,
    },
    OpcodeEntry {
        mnemonic: Mnemonic::Lda,
        mode: AddressMode::IndirectX,
        opcode: 0xA1,
        cycles: 6,
    },
    OpcodeEntry {
        mnemonic: Mnemonic::Lda,
        mode: AddressMode::IndirectY,
        opcode: 0xB1,
        cycles: 5,
    },
    OpcodeEntry {
        mnemonic: Mnemonic::Lda,
        mode: AddressMode::ZeroPageIndirect,
        opcode: 0xB2,
        cycles: 5,
    },
    // LDX - Load X Register
    OpcodeEntry {
        mnemonic: Mnemonic::Ldx,
        mode: AddressMode::Immediate,
        opcode: 0xA2,
        cycles: 2,
    },
    OpcodeEntry {
        mnemonic: Mnemonic::Ldx,
        mode: AddressMode::ZeroPage,
        opcode: 0xA6,
        cycles: 3,
    },
    OpcodeEntry {
        mnemonic: Mnemonic::Ldx,
        mode: AddressMode::ZeroPageY,
        opcode: 0xB6,
        cycles: 4,
    },
    OpcodeEntry {
        mnemonic: Mnemonic::Ldx,
        mode: AddressMode::Absolute,
        opcode: 0xAE,
        cycles: 4,
    },
    OpcodeEntry {
        mnemonic: Mnemonic::Ldx,
        mode: AddressMode::AbsoluteY,
        opcode: 0xBE,
        cycles: 4,
    },
    // LDY - Load Y Register
    OpcodeEntry {
        mnemonic: Mnemonic::Ldy,
        mode: AddressMode::Immediate,
        opcode: 0xA0,
        cycles: 2,
    },
    OpcodeEntry {
        mnemonic: Mnemonic::Ldy,
        mode: AddressMode::ZeroPage,
        opcode: 0xA4,
        cycles: 3,
    },
    OpcodeEntry {
        mnemonic: Mnemonic::Ldy,
        mode: AddressMode::ZeroPageX,
        opcode: 0xB4,
        cycles: 4,
    },
    OpcodeEntry {
        mnemonic: Mnemonic::Ldy,
        mode: AddressMode::Absolute,
        opcode: 0xAC,
        cycles: 4,
    },
    OpcodeEntry {
        mnemonic: Mnemonic::Ldy,
        mode: AddressMode::AbsoluteX,
        opcode: 0xBC,
        cycles: 4,
    },
    // LSR - Logical Shift Right
    OpcodeEntry {
        mnemonic: Mnemonic::Lsr,
        mode: AddressMode::Accumulator,
        opcode: 0x4A,
        cycles: 2,
    },
    OpcodeEntry {
        mnemonic: Mnemonic::Lsr,
        mode: AddressMode::ZeroPage,
        opcode: 0x46,
        cycles: 5,
    },
    OpcodeEntry {
        mnemonic: Mnemonic::Lsr,
        mode: AddressMode::ZeroPageX,
        opcode: 0x56,
        cycles: 6,
    },
    OpcodeEntry {
        mnemonic: Mnemonic::Lsr,
        mode: AddressMode::Absolute,
        opcode: 0x4E,
        cycles: 6,
    },
    OpcodeEntry {
        mnemonic: Mnemonic::Lsr,
        mode: AddressMode::AbsoluteX,
        opcode: 0x5E,
        cycles: 7,
    },
    // NOP - No Operation
    OpcodeEntry {
        mnemonic: Mnemonic::Nop,
        mode: AddressMode::Implied,
        opcode: 0xEA,
        cycles: 2,
    },
    // ORA - Logical Inclusive OR
    OpcodeEntry {
        mnemonic: Mnemonic::Ora,
        mode: AddressMode::Immediate,
        opcode: 0x09,
        cycles: 2,
    },
    OpcodeEntry {
        mnemonic: Mnemonic::Ora,
        mode: AddressMode::ZeroPage,
        opcode: 0x05,
        cycles: 3,
    },
    OpcodeEntry {
        mnemonic: Mnemonic::Ora,
        mode: AddressMode::ZeroPageX,
        opcode: 0x15,
        cycles: 4,
    },
    OpcodeEntry {
        mnemonic: Mnemonic::Ora,
        mode: AddressMode::Absolute,
        opcode: 0x0D,
        cycles: 4,
    },
    OpcodeEntry {
        mnemonic: Mnemonic::Ora,
        mode: AddressMode::AbsoluteX,
        opcode: 0x1D,
        cycles: 4,
    },
    OpcodeEntry {
        mnemonic: Mnemonic::Ora,
        mode: AddressMode::AbsoluteY,
        opcode: 0x19,
        cycles: 4,
    },
    OpcodeEntry {
        mnemonic: Mnemonic::Ora,
        mode: AddressMode::IndirectX,
        opcode: 0x01,
        cycles: 6,
    },
    OpcodeEntry {
        mnemonic: Mnemonic::Ora,
        mode: AddressMode::IndirectY,
        opcode: 0x11,
        cycles: 5,
    },
    OpcodeEntry {
        mnemonic: Mnemonic::Ora,
        mode: AddressMode::ZeroPageIndirect,
        opcode: 0x12,
        cycles: 5,
    },
    // PHA - Push Accumulator
    OpcodeEntry {
        mnemonic: Mnemonic::Pha,
        mode: AddressMode::Implied,
        opcode: 0x48,
        cycles: 3,
    },
    // PHP - Push Processor Status
    OpcodeEntry {
        mnemonic: Mnemonic::Php,
        mode: AddressMode::Implied,
        opcode: 0x08,
        cycles: 3,
    },
    // PHX - Push X Register (65C02)
    OpcodeEntry {
        mnemonic: Mnemonic::Phx,
        mode: AddressMode::Implied,
        opcode: 0xDA,
        cycles: 3,
    },
    // PHY - Push Y Register (65C02)
    OpcodeEntry {
        mnemonic: Mnemonic::Phy,
        mode: AddressMode::Implied,
        opcode: 0x5A,
        cycles: 3,
    },
    // PLA - Pull Accumulator
    OpcodeEntry {
        mnemonic: Mnemonic::Pla,
        mode: AddressMode::Implied,
        opcode: 0x68,
        cycles: 4,
    },
    // PLP - Pull Processor Status
    OpcodeEntry {
        mnemonic: Mnemonic::Plp,
        mode: AddressMode::Implied,
        opcode: 0x28,
        cycles: 4,
    },
    // PLX - Pull X Register (65C02)
    OpcodeEntry {
        mnemonic: Mnemonic::Plx,
        mode: AddressMode::Implied,
        opcode: 0xFA,
        cycles: 4,
    },
    // PLY - Pull Y Register (65C02)
    OpcodeEntry {
        mnemonic: Mnemonic::Ply,
        mode: AddressMode::Implied,
        opcode: 0x7A,
        cycles: 4,
    },
    // ROL - Rotate Left
    OpcodeEntry {
        mnemonic: Mnemonic::Rol,
        mode: AddressMode::Accumulator,
        opcode: 0x2A,
        cycles: 2,
    },
    OpcodeEntry {
        mnemonic: Mnemonic::Rol,
        mode: AddressMode::ZeroPage,
        opcode: 0x26,
        cycles: 5,
    },
    OpcodeEntry {
        mnemonic: Mnemonic::Rol,
        mode: AddressMode::ZeroPageX,
        opcode: 0x36,
        cycles: 6,
    },
    OpcodeEntry {
        mnemonic: Mnemonic::Rol,
        mode: AddressMode::Absolute,
        opcode: 0x2E,
        cycles: 6,
    },
    OpcodeEntry {
        mnemonic: Mnemonic::Rol,
        mode: AddressMode::AbsoluteX,
        opcode: 0x3E,
        cycles: 7,
    },
    // ROR - Rotate Right
    OpcodeEntry {
        mnemonic: Mnemonic::Ror,
        mode: AddressMode::Accumulator,
        opcode: 0x6A,
        cycles: 2,
    },
    OpcodeEntry {
        mnemonic: Mnemonic::Ror,
        mode: AddressMode::ZeroPage,
        opcode: 0x66,
        cycles: 5,
    },
    OpcodeEntry {
        mnemonic: Mnemonic::Ror,
        mode: AddressMode::ZeroPageX,
        opcode: 0x76,
        cycles: 6,
    },
    OpcodeEntry {
        mnemonic: Mnemonic::Ror,
        mode: AddressMode::Absolute,
        opcode: 0x6E,
        cycles: 6,
    },
    OpcodeEntry {
        mnemonic: Mnemonic::Ror,
        mode: AddressMode::AbsoluteX,
        opcode: 0x7E,
        cycles: 7,
    },
    // RTI - Return from Interrupt
    OpcodeEntry {
        mnemonic: Mnemonic::Rti,
        mode: AddressMode::Implied,
        opcode: 0x40,
        cycles: 6,
    },
    // RTS - Return from Subroutine
    OpcodeEntry {
        mnemonic: Mnemonic::Rts,
        mode: AddressMode::Implied,
        opcode: 0x60,
        cycles: 6,
    },
    // SBC - Subtract with Carry
    OpcodeEntry {
        mnemonic: Mnemonic::Sbc,
        mode: AddressMode::Immediate,
        opcode: 0xE9,
        cycles: 2,
    },
    OpcodeEntry {
        mnemonic: Mnemonic::Sbc,
        mode: AddressMode::ZeroPage,
        opcode: 0xE5,
        cycles: 3,
    },
    OpcodeEntry {
        mnemonic: Mnemonic::Sbc,
        mode: AddressMode::ZeroPageX,
        opcode: 0xF5,
        cycles: 4,
    },
    OpcodeEntry {
        mnemonic: Mnemonic::Sbc,
        mode: AddressMode::Absolute,
        opcode: 0xED,
        cycles: 4,
    },
    OpcodeEntry {
        mnemonic: Mnemonic::Sbc,
        mode: AddressMode::AbsoluteX,
        opcode: 0xFD,
        cycles: 4,
    },
    OpcodeEntry {
        mnemonic: Mnemonic::Sbc,
        mode: AddressMode::AbsoluteY,
        opcode: 0xF9,
        cycles: 4,
    },
    OpcodeEntry {
        mnemonic: Mnemonic::Sbc,
        mode: AddressMode::IndirectX,
        opcode: 0xE1,
        cycles: 6,
    },
    OpcodeEntry {
        mnemonic: Mnemonic::Sbc,
        mode: AddressMode::IndirectY,
        opcode: 0xF1,
        cycles: 5,
    },
    OpcodeEntry {
        mnemonic: Mnemonic::Sbc,
        mode: AddressMode::ZeroPageIndirect,
        opcode: 0xF2,
        cycles: 5,
    },
    // SEC - Set Carry
    OpcodeEntry {
        mnemonic: Mnemonic::Sec,
        mode: AddressMode::Implied,
        opcode: 0x38,
        cycles: 2,
    },
    // SED - Set Decimal
    OpcodeEntry {
        mnemonic: Mnemonic::Sed,
        mode: AddressMode::Implied,
        opcode: 0xF8,
        cycles: 2,
    },
    // SEI - Set Interrupt Disable
    OpcodeEntry {
        mnemonic: Mnemonic::Sei,
        mode: AddressMode::Implied,
        opcode: 0x78,
        cycles: 2,
    },
    // STA - Store Accumulator
    OpcodeEntry {
        mnemonic: Mnemonic::Sta,
        mode: AddressMode::ZeroPage,
        opcode: 0x85,
        cycles: 3,
    },
    OpcodeEntry {
        mnemonic: Mnemonic::Sta,
        mode: AddressMode::ZeroPageX,
        opcode: 0x95,
        cycles: 4,
    },
    OpcodeEntry {
        mnemonic: Mnemonic::Sta,
        mode: AddressMode::Absolute,
        opcode: 0x8D,
        cycles: 4,
    },
    OpcodeEntry {
        mnemonic: Mnemonic::Sta,
        mode: AddressMode::AbsoluteX,
        opcode: 0x9D,
        cycles: 5,
    },
    OpcodeEntry {
        mnemonic: Mnemonic::Sta,
        mode: AddressMode::AbsoluteY,
        opcode: 0x99,
        cycles: 5,
    },
    OpcodeEntry {
        mnemonic: Mnemonic::Sta,
        mode: AddressMode::IndirectX,
        opcode: 0x81,
        cycles: 6,
    },
    OpcodeEntry {
        mnemonic: Mnemonic::Sta,
        mode: AddressMode::IndirectY,
        opcode: 0x91,
        cycles: 6,
    },
    OpcodeEntry {
        mnemonic: Mnemonic::Sta,
        mode: AddressMode::ZeroPageIndirect,
        opcode: 0x92,
        cycles: 5,
    },
    // STX - Store X Register
    OpcodeEntry {
        mnemonic: Mnemonic::Stx,
        mode: AddressMode::ZeroPage,
        opcode: 0x86,
        cycles: 3,
    },
    OpcodeEntry {
        mnemonic: Mnemonic::Stx,
        mode: AddressMode::ZeroPageY,
        opcode: 0x96,
        cycles: 4,
    },
    OpcodeEntry {
        mnemonic: Mnemonic::Stx,
        mode: AddressMode::Absolute,
        opcode: 0x8E,
        cycles: 4,
    },
    // STY - Store Y Register
    OpcodeEntry {
        mnemonic: Mnemonic::Sty,
        mode: AddressMode::ZeroPage,
        opcode: 0x84,
        cycles: 3,
    },
    OpcodeEntry {
        mnemonic: Mnemonic::Sty,
        mode: AddressMode::ZeroPageX,
        opcode: 0x94,
        cycles: 4,
    },
    OpcodeEntry {
        mnemonic: Mnemonic::Sty,
        mode: AddressMode::Absolute,
        opcode: 0x8C,
        cycles: 4,
    },
    // STZ - Store Zero (65C02)
    OpcodeEntry {
        mnemonic: Mnemonic::Stz,
        mode: AddressMode::ZeroPage,
        opcode: 0x64,
        cycles: 3,
    },
    OpcodeEntry {
        mnemonic: Mnemonic::Stz,
        mode: AddressMode::ZeroPageX,
        opcode: 0x74,
        cycles: 4,
    },
    OpcodeEntry {
        mnemonic: Mnemonic::Stz,
        mode: AddressMode::Absolute,
        opcode: 0x9C,
        cycles: 4,
    },
    OpcodeEntry {
        mnemonic: Mnemonic::Stz,
        mode: AddressMode::AbsoluteX,
        opcode: 0x9E,
        cycles: 5,
    },
    // TAX - Transfer A to X
    OpcodeEntry {
        mnemonic: Mnemonic::Tax,
        mode: AddressMode::Implied,
        opcode: 0xAA,
        cycles: 2,
    },
    // TAY - Transfer A to Y
    OpcodeEntry {
        mnemonic: Mnemonic::Tay,
        mode: AddressMode::Implied,
        opcode: 0xA8,
        cycles: 2,
    },
    // TRB - Test and Reset Bits (65C02)
    OpcodeEntry {
        mnemonic: Mnemonic::Trb,
        mode: AddressMode::ZeroPage,
        opcode: 0x14,
        cycles: 5,
    },
    OpcodeEntry {
        mnemonic: Mnemonic::Trb,
        mode: AddressMode::Absolute,
        opcode: 0x1C,
        cycles: 6,
    },
    // TSB - Test and Set Bits (65C02)
    OpcodeEntry {
        mnemonic: Mnemonic::Tsb,
        mode: AddressMode::ZeroPage,
        opcode: 0x04,
        cycles: 5,
    },
    OpcodeEntry {
        mnemonic: Mnemonic::Tsb,
        mode: AddressMode::Absolute,
        opcode: 0x0C,
        cycles: 6,
    },
    // TSX - Transfer SP to X
    OpcodeEntry {
        mnemonic: Mnemonic::Tsx,
        mode: AddressMode::Implied,
        opcode: 0xBA,
        cycles: 2,
    },
    // TXA - Transfer X to A
    OpcodeEntry {
        mnemonic: Mnemonic::Txa,
        mode: AddressMode::Implied,
        opcode: 0x8A,
        cycles: 2,
    },
    // TXS - Transfer X to SP
    OpcodeEntry {
        mnemonic: Mnemonic::Txs,
        mode: AddressMode::Implied,
        opcode: 0x9A,
        cycles: 2,
    },
    // TYA - Transfer Y to A
    OpcodeEntry {
        mnemonic: Mnemonic::Tya,
        mode: AddressMode::Implied,
        opcode: 0x98,
        cycles: 2,
    },
];

/// Look up an instruction by mnemonic and addressing mode.
///
/// The table is small enough that linear search is sufficient.
pub fn lookup(mnemonic: Mnemonic, mode: AddressMode) -> Option<&'static OpcodeEntry> {
    INSTRUCTION_TABLE
        .iter()
        .find(|e| e.mnemonic == mnemonic && e.mode == mode)
}

/// Check whether a (mnemonic, mode) pair is encodable.
pub fn has_mode(mnemonic: Mnemonic, mode: AddressMode) -> bool {
    lookup(mnemonic, mode).is_some()
}

/// Decode an opcode byte. `None` marks an illegal opcode.
pub fn decode(opcode: u8) -> Option<&'static OpcodeEntry> {
    static DECODE_INDEX: OnceLock<[Option<&'static OpcodeEntry>; 256]> = OnceLock::new();
    let index = DECODE_INDEX.get_or_init(|| {
        let mut table = [None; 256];
        for entry in INSTRUCTION_TABLE {
            table[entry.opcode as usize] = Some(entry);
        }
        table
    });
    index[opcode as usize]
}
