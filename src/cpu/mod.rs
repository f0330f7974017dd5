// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

//! Single-stepping 65C02 interpreter.
//!
//! The CPU owns a flat 64 KiB memory image. `step()` runs exactly one
//! instruction to completion and returns the base cycles consumed;
//! page-crossing and branch-taken penalties are not modeled, and decimal
//! mode is ignored by ADC/SBC.
//!
//! Calls into the BBC MOS are not emulated: `JMP abs`, `JMP (abs)`, and
//! `JSR abs` whose target is at or above [`OS_ENTRY_BASE`] are silently
//! skipped (a skipped `JSR` pushes nothing). The skipped instruction
//! still costs its base cycles.

pub mod disasm;

use bitflags::bitflags;

use crate::m65c02::{table, AddressMode, Mnemonic};

pub const MEMORY_SIZE: usize = 0x10000;

/// Targets at or above this address are MOS entry points; control
/// transfers there are skipped rather than executed.
pub const OS_ENTRY_BASE: u16 = 0xC000;

const STACK_BASE: u16 = 0x0100;
const IRQ_VECTOR: u16 = 0xFFFE;

bitflags! {
    /// Processor status flags. Bit 5 is not stored; it reads as set in
    /// the packed status byte.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Status: u8 {
        const C = 0x01;
        const Z = 0x02;
        const I = 0x04;
        const D = 0x08;
        const V = 0x40;
        const N = 0x80;
    }
}

/// 65C02 CPU state and execution engine.
pub struct Cpu {
    pub a: u8,
    pub x: u8,
    pub y: u8,
    pub sp: u8,
    pub pc: u16,
    pub status: Status,
    pub halted: bool,
    pub cycles: u64,
    mem: Vec<u8>,
}

impl Default for Cpu {
    fn default() -> Self {
        Self::new()
    }
}

impl Cpu {
    #[must_use]
    pub fn new() -> Self {
        Self {
            a: 0,
            x: 0,
            y: 0,
            sp: 0xFD,
            pc: 0,
            status: Status::empty(),
            halted: false,
            cycles: 0,
            mem: vec![0; MEMORY_SIZE],
        }
    }

    /// Reset registers and counters, preserving memory. Execution will
    /// resume at `start`.
    pub fn reset(&mut self, start: u16) {
        self.a = 0;
        self.x = 0;
        self.y = 0;
        self.sp = 0xFD;
        self.pc = start;
        self.status = Status::empty();
        self.halted = false;
        self.cycles = 0;
    }

    /// Copy a payload into memory, wrapping at the 64 KiB boundary.
    pub fn load(&mut self, addr: u16, bytes: &[u8]) {
        for (ix, byte) in bytes.iter().enumerate() {
            let dest = addr.wrapping_add(ix as u16);
            self.mem[dest as usize] = *byte;
        }
    }

    /// Read-while-stopped view of the full memory image.
    pub fn mem(&self) -> &[u8] {
        &self.mem
    }

    #[inline]
    pub fn read(&self, addr: u16) -> u8 {
        self.mem[addr as usize]
    }

    #[inline]
    pub fn write(&mut self, addr: u16, val: u8) {
        self.mem[addr as usize] = val;
    }

    fn read_u16(&self, addr: u16) -> u16 {
        let lo = self.read(addr) as u16;
        let hi = self.read(addr.wrapping_add(1)) as u16;
        (hi << 8) | lo
    }

    /// Read a 16-bit pointer for `JMP (abs)` with the NMOS page-wrap
    /// behavior: the high byte comes from the same page as the low byte.
    fn read_indirect_u16_bug(&self, addr: u16) -> u16 {
        let lo = self.read(addr) as u16;
        let hi_addr = (addr & 0xFF00) | (addr.wrapping_add(1) & 0x00FF);
        let hi = self.read(hi_addr) as u16;
        (hi << 8) | lo
    }

    /// Packed status byte; bit 5 always reads as set.
    pub fn p(&self) -> u8 {
        self.status.bits() | 0x20
    }

    pub fn set_p(&mut self, val: u8) {
        self.status = Status::from_bits_truncate(val);
    }

    #[inline]
    fn push_u8(&mut self, val: u8) {
        self.write(STACK_BASE | self.sp as u16, val);
        self.sp = self.sp.wrapping_sub(1);
    }

    #[inline]
    fn pull_u8(&mut self) -> u8 {
        self.sp = self.sp.wrapping_add(1);
        self.read(STACK_BASE | self.sp as u16)
    }

    fn push_u16(&mut self, val: u16) {
        self.push_u8((val >> 8) as u8);
        self.push_u8((val & 0xFF) as u8);
    }

    fn pull_u16(&mut self) -> u16 {
        let lo = self.pull_u8() as u16;
        let hi = self.pull_u8() as u16;
        (hi << 8) | lo
    }

    fn set_nz(&mut self, val: u8) {
        self.status.set(Status::N, val & 0x80 != 0);
        self.status.set(Status::Z, val == 0);
    }

    /// Execute one instruction and return the cycles consumed. A halted
    /// CPU is a no-op returning 0.
    pub fn step(&mut self) -> u32 {
        if self.halted {
            return 0;
        }

        let opcode = self.read(self.pc);
        let Some(entry) = table::decode(opcode) else {
            // Illegal opcode: one byte, two cycles, no side effects.
            self.pc = self.pc.wrapping_add(1);
            self.cycles += 2;
            return 2;
        };

        let base_pc = self.pc;
        self.pc = self.pc.wrapping_add(entry.size() as u16);
        self.execute(entry.mnemonic, entry.mode, base_pc);
        self.cycles += entry.cycles as u64;
        entry.cycles as u32
    }

    /// Effective address for memory-operand modes.
    fn effective_addr(&self, mode: AddressMode, base_pc: u16) -> u16 {
        let lo = self.read(base_pc.wrapping_add(1));
        match mode {
            AddressMode::Immediate => base_pc.wrapping_add(1),
            AddressMode::ZeroPage => lo as u16,
            AddressMode::ZeroPageX => lo.wrapping_add(self.x) as u16,
            AddressMode::ZeroPageY => lo.wrapping_add(self.y) as u16,
            AddressMode::Absolute => self.read_u16(base_pc.wrapping_add(1)),
            AddressMode::AbsoluteX => self
                .read_u16(base_pc.wrapping_add(1))
                .wrapping_add(self.x as u16),
            AddressMode::AbsoluteY => self
                .read_u16(base_pc.wrapping_add(1))
                .wrapping_add(self.y as u16),
            AddressMode::Indirect => {
                let vector = self.read_u16(base_pc.wrapping_add(1));
                self.read_indirect_u16_bug(vector)
            }
            AddressMode::IndirectX => {
                let zp = lo.wrapping_add(self.x);
                let lo = self.read(zp as u16) as u16;
                let hi = self.read(zp.wrapping_add(1) as u16) as u16;
                (hi << 8) | lo
            }
            AddressMode::IndirectY => {
                let base_lo = self.read(lo as u16) as u16;
                let base_hi = self.read(lo.wrapping_add(1) as u16) as u16;
                ((base_hi << 8) | base_lo).wrapping_add(self.y as u16)
            }
            AddressMode::ZeroPageIndirect => {
                let base_lo = self.read(lo as u16) as u16;
                let base_hi = self.read(lo.wrapping_add(1) as u16) as u16;
                (base_hi << 8) | base_lo
            }
            AddressMode::AbsoluteIndexedIndirect => {
                let vector = self
                    .read_u16(base_pc.wrapping_add(1))
                    .wrapping_add(self.x as u16);
                self.read_u16(vector)
            }
            AddressMode::Relative => {
                let offset = lo as i8 as i16;
                base_pc.wrapping_add(2).wrapping_add(offset as u16)
            }
            AddressMode::Implied | AddressMode::Accumulator => base_pc,
        }
    }

    fn execute(&mut self, mnemonic: Mnemonic, mode: AddressMode, base_pc: u16) {
        use Mnemonic::*;

        match mnemonic {
            Lda => {
                let val = self.read(self.effective_addr(mode, base_pc));
                self.a = val;
                self.set_nz(val);
            }
            Ldx => {
                let val = self.read(self.effective_addr(mode, base_pc));
                self.x = val;
                self.set_nz(val);
            }
            Ldy => {
                let val = self.read(self.effective_addr(mode, base_pc));
                self.y = val;
                self.set_nz(val);
            }
            Sta => {
                let addr = self.effective_addr(mode, base_pc);
                self.write(addr, self.a);
            }
            Stx => {
                let addr = self.effective_addr(mode, base_pc);
                self.write(addr, self.x);
            }
            Sty => {
                let addr = self.effective_addr(mode, base_pc);
                self.write(addr, self.y);
            }
            Stz => {
                let addr = self.effective_addr(mode, base_pc);
                self.write(addr, 0);
            }

            Tax => {
                self.x = self.a;
                self.set_nz(self.x);
            }
            Tay => {
                self.y = self.a;
                self.set_nz(self.y);
            }
            Txa => {
                self.a = self.x;
                self.set_nz(self.a);
            }
            Tya => {
                self.a = self.y;
                self.set_nz(self.a);
            }
            Tsx => {
                self.x = self.sp;
                self.set_nz(self.x);
            }
            Txs => self.sp = self.x,

            Adc => {
                let val = self.read(self.effective_addr(mode, base_pc));
                self.adc(val);
            }
            Sbc => {
                let val = self.read(self.effective_addr(mode, base_pc));
                self.adc(!val);
            }
            Cmp => {
                let val = self.read(self.effective_addr(mode, base_pc));
                self.compare(self.a, val);
            }
            Cpx => {
                let val = self.read(self.effective_addr(mode, base_pc));
                self.compare(self.x, val);
            }
            Cpy => {
                let val = self.read(self.effective_addr(mode, base_pc));
                self.compare(self.y, val);
            }

            And => {
                let val = self.read(self.effective_addr(mode, base_pc));
                self.a &= val;
                self.set_nz(self.a);
            }
            Ora => {
                let val = self.read(self.effective_addr(mode, base_pc));
                self.a |= val;
                self.set_nz(self.a);
            }
            Eor => {
                let val = self.read(self.effective_addr(mode, base_pc));
                self.a ^= val;
                self.set_nz(self.a);
            }
            Bit => {
                let val = self.read(self.effective_addr(mode, base_pc));
                self.status.set(Status::Z, self.a & val == 0);
                if mode != AddressMode::Immediate {
                    self.status.set(Status::N, val & 0x80 != 0);
                    self.status.set(Status::V, val & 0x40 != 0);
                }
            }
            Trb => {
                let addr = self.effective_addr(mode, base_pc);
                let val = self.read(addr);
                self.status.set(Status::Z, self.a & val == 0);
                self.write(addr, val & !self.a);
            }
            Tsb => {
                let addr = self.effective_addr(mode, base_pc);
                let val = self.read(addr);
                self.status.set(Status::Z, self.a & val == 0);
                self.write(addr, val | self.a);
            }

            Inc => self.modify(mode, base_pc, |val, _| val.wrapping_add(1)),
            Dec => self.modify(mode, base_pc, |val, _| val.wrapping_sub(1)),
            Inx => {
                self.x = self.x.wrapping_add(1);
                self.set_nz(self.x);
            }
            Iny => {
                self.y = self.y.wrapping_add(1);
                self.set_nz(self.y);
            }
            Dex => {
                self.x = self.x.wrapping_sub(1);
                self.set_nz(self.x);
            }
            Dey => {
                self.y = self.y.wrapping_sub(1);
                self.set_nz(self.y);
            }

            Asl => self.modify_with_carry(mode, base_pc, |val, _| (val << 1, val & 0x80 != 0)),
            Lsr => self.modify_with_carry(mode, base_pc, |val, _| (val >> 1, val & 0x01 != 0)),
            Rol => self.modify_with_carry(mode, base_pc, |val, carry| {
                ((val << 1) | carry as u8, val & 0x80 != 0)
            }),
            Ror => self.modify_with_carry(mode, base_pc, |val, carry| {
                ((val >> 1) | ((carry as u8) << 7), val & 0x01 != 0)
            }),

            Jmp => {
                let target = self.effective_addr(mode, base_pc);
                let skippable =
                    matches!(mode, AddressMode::Absolute | AddressMode::Indirect);
                if skippable && target >= OS_ENTRY_BASE {
                    return;
                }
                self.pc = target;
            }
            Jsr => {
                let target = self.effective_addr(mode, base_pc);
                if target >= OS_ENTRY_BASE {
                    return;
                }
                self.push_u16(self.pc.wrapping_sub(1));
                self.pc = target;
            }
            Rts => {
                self.pc = self.pull_u16().wrapping_add(1);
            }
            Rti => {
                let p = self.pull_u8();
                self.set_p(p);
                self.pc = self.pull_u16();
            }
            Brk => {
                self.pc = self.pc.wrapping_add(1);
                self.push_u16(self.pc);
                self.push_u8(self.p() | 0x30);
                self.status.insert(Status::I);
                self.pc = self.read_u16(IRQ_VECTOR);
                self.halted = true;
            }

            Bcc => self.branch(mode, base_pc, !self.status.contains(Status::C)),
            Bcs => self.branch(mode, base_pc, self.status.contains(Status::C)),
            Beq => self.branch(mode, base_pc, self.status.contains(Status::Z)),
            Bne => self.branch(mode, base_pc, !self.status.contains(Status::Z)),
            Bmi => self.branch(mode, base_pc, self.status.contains(Status::N)),
            Bpl => self.branch(mode, base_pc, !self.status.contains(Status::N)),
            Bvc => self.branch(mode, base_pc, !self.status.contains(Status::V)),
            Bvs => self.branch(mode, base_pc, self.status.contains(Status::V)),
            Bra => self.branch(mode, base_pc, true),

            Pha => self.push_u8(self.a),
            Phx => self.push_u8(self.x),
            Phy => self.push_u8(self.y),
            Php => {
                let p = self.p() | 0x10;
                self.push_u8(p);
            }
            Pla => {
                self.a = self.pull_u8();
                self.set_nz(self.a);
            }
            Plx => {
                self.x = self.pull_u8();
                self.set_nz(self.x);
            }
            Ply => {
                self.y = self.pull_u8();
                self.set_nz(self.y);
            }
            Plp => {
                let p = self.pull_u8();
                self.set_p(p);
            }

            Clc => self.status.remove(Status::C),
            Sec => self.status.insert(Status::C),
            Cli => self.status.remove(Status::I),
            Sei => self.status.insert(Status::I),
            Clv => self.status.remove(Status::V),
            Cld => self.status.remove(Status::D),
            Sed => self.status.insert(Status::D),

            Nop => {}
        }
    }

    /// Binary-mode add with carry; the D flag is ignored.
    fn adc(&mut self, val: u8) {
        let carry = self.status.contains(Status::C) as u16;
        let sum = self.a as u16 + val as u16 + carry;
        self.status.set(Status::C, sum > 0xFF);
        let result = (sum & 0xFF) as u8;
        self.status
            .set(Status::V, (!(self.a ^ val) & (self.a ^ result) & 0x80) != 0);
        self.a = result;
        self.set_nz(result);
    }

    fn compare(&mut self, reg: u8, val: u8) {
        self.status.set(Status::C, reg >= val);
        self.set_nz(reg.wrapping_sub(val));
    }

    fn branch(&mut self, mode: AddressMode, base_pc: u16, taken: bool) {
        if taken {
            self.pc = self.effective_addr(mode, base_pc);
        }
    }

    /// Read-modify-write for INC/DEC, accumulator or memory.
    fn modify(&mut self, mode: AddressMode, base_pc: u16, op: fn(u8, bool) -> u8) {
        if mode == AddressMode::Accumulator {
            self.a = op(self.a, false);
            self.set_nz(self.a);
            return;
        }
        let addr = self.effective_addr(mode, base_pc);
        let result = op(self.read(addr), false);
        self.write(addr, result);
        self.set_nz(result);
    }

    /// Read-modify-write for shifts and rotates; `op` returns the result
    /// and the bit shifted out into carry.
    fn modify_with_carry(
        &mut self,
        mode: AddressMode,
        base_pc: u16,
        op: fn(u8, bool) -> (u8, bool),
    ) {
        let carry_in = self.status.contains(Status::C);
        if mode == AddressMode::Accumulator {
            let (result, carry) = op(self.a, carry_in);
            self.a = result;
            self.status.set(Status::C, carry);
            self.set_nz(result);
            return;
        }
        let addr = self.effective_addr(mode, base_pc);
        let (result, carry) = op(self.read(addr), carry_in);
        self.write(addr, result);
        self.status.set(Status::C, carry);
        self.set_nz(result);
    }
}
