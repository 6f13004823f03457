//! LC-3 fetch/decode/execute loop.
//!
//! This implements the documented LC-3 instruction set architecture:
//! eight general registers, a program counter, a three-state condition
//! register, sign-extended immediates/offsets, and the six trap
//! service routines. It knows nothing about where its memory lives or
//! how character I/O reaches a terminal — both are reached through
//! `vm_core::Bus` and `trap::TermIo`, so the whole dispatcher can be
//! driven by an in-memory test double.
//!
//! RTI (privileged return-from-interrupt) and the reserved opcode are
//! out of scope; encountering either one is a no-op, matching the
//! documented "undefined, ignore and continue" behavior for reserved
//! opcodes.

mod bits;
mod flags;
mod trap;

use bits::{sign_extend, zero_extend};
pub use flags::ConditionFlag;
pub use trap::TermIo;
use trap::Trap;

/// The LC-3 machine's starting program counter on every run.
pub const PC_START: u16 = 0x3000;

/// Registers, condition code, and run state for one LC-3 machine.
pub struct Lc3Cpu {
    registers: [u16; 8],
    pc: u16,
    cond: ConditionFlag,
    running: bool,
}

impl Default for Lc3Cpu {
    fn default() -> Self {
        Self::new()
    }
}

impl Lc3Cpu {
    pub fn new() -> Self {
        Self {
            registers: [0; 8],
            pc: PC_START,
            cond: ConditionFlag::Zero,
            running: true,
        }
    }

    pub fn pc(&self) -> u16 {
        self.pc
    }

    pub fn reg(&self, index: u16) -> u16 {
        self.registers[index as usize]
    }

    pub fn cond(&self) -> ConditionFlag {
        self.cond
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Reset to the initial machine state (PC = 0x3000, `running`
    /// true) without touching the bus.
    pub fn reset(&mut self) {
        self.registers = [0; 8];
        self.pc = PC_START;
        self.cond = ConditionFlag::Zero;
        self.running = true;
    }

    /// Run until a `HALT` trap (or an external caller) clears
    /// `running`.
    pub fn run(&mut self, bus: &mut impl TermIo) {
        self.running = true;
        while self.running {
            self.step(bus);
        }
    }

    /// Fetch, decode, and execute exactly one instruction.
    pub fn step(&mut self, bus: &mut impl TermIo) {
        let instr = bus.read(self.pc);
        self.pc = self.pc.wrapping_add(1);
        let op = instr >> 12;
        log::trace!("pc={:#06x} instr={:#06x} op={:#03x}", self.pc.wrapping_sub(1), instr, op);
        self.execute(bus, instr, op);
    }

    fn set_reg(&mut self, r: u16, value: u16) {
        self.registers[r as usize] = value;
        self.cond = ConditionFlag::from_result(value);
    }

    fn execute(&mut self, bus: &mut impl TermIo, instr: u16, op: u16) {
        let dr = (instr >> 9) & 0x7;
        let sr = dr;
        let sr1 = (instr >> 6) & 0x7;
        let base_r = (instr >> 6) & 0x7;

        match op {
            0x0 => {
                // BR
                let nzp = (instr >> 9) & 0x7;
                let offset = sign_extend(instr & 0x1FF, 9);
                if self.cond.as_u16() & nzp != 0 {
                    self.pc = self.pc.wrapping_add(offset);
                }
            }
            0x1 => {
                // ADD
                let value = if instr & 0x20 != 0 {
                    let imm = sign_extend(instr & 0x1F, 5);
                    self.reg(sr1).wrapping_add(imm)
                } else {
                    let sr2 = instr & 0x7;
                    self.reg(sr1).wrapping_add(self.reg(sr2))
                };
                self.set_reg(dr, value);
            }
            0x2 => {
                // LD
                let offset = sign_extend(instr & 0x1FF, 9);
                let value = bus.read(self.pc.wrapping_add(offset));
                self.set_reg(dr, value);
            }
            0x3 => {
                // ST
                let offset = sign_extend(instr & 0x1FF, 9);
                bus.write(self.pc.wrapping_add(offset), self.reg(sr));
            }
            0x4 => {
                // JSR / JSRR
                self.registers[7] = self.pc;
                if instr & 0x0800 != 0 {
                    let offset = sign_extend(instr & 0x7FF, 11);
                    self.pc = self.pc.wrapping_add(offset);
                } else {
                    self.pc = self.reg(base_r);
                }
            }
            0x5 => {
                // AND
                let value = if instr & 0x20 != 0 {
                    let imm = sign_extend(instr & 0x1F, 5);
                    self.reg(sr1) & imm
                } else {
                    let sr2 = instr & 0x7;
                    self.reg(sr1) & self.reg(sr2)
                };
                self.set_reg(dr, value);
            }
            0x6 => {
                // LDR
                let offset = sign_extend(instr & 0x3F, 6);
                let value = bus.read(self.reg(base_r).wrapping_add(offset));
                self.set_reg(dr, value);
            }
            0x7 => {
                // STR
                let offset = sign_extend(instr & 0x3F, 6);
                bus.write(self.reg(base_r).wrapping_add(offset), self.reg(sr));
            }
            0x8 => {
                // RTI: reserved, unimplemented.
                log::debug!("RTI encountered; ignoring (unprivileged, out of scope)");
            }
            0x9 => {
                // NOT
                let value = !self.reg(sr1);
                self.set_reg(dr, value);
            }
            0xA => {
                // LDI
                let offset = sign_extend(instr & 0x1FF, 9);
                let ptr = bus.read(self.pc.wrapping_add(offset));
                let value = bus.read(ptr);
                self.set_reg(dr, value);
            }
            0xB => {
                // STI
                let offset = sign_extend(instr & 0x1FF, 9);
                let ptr = bus.read(self.pc.wrapping_add(offset));
                bus.write(ptr, self.reg(sr));
            }
            0xC => {
                // JMP / RET
                self.pc = self.reg(base_r);
            }
            0xD => {
                // RES: reserved, unimplemented.
                log::debug!("reserved opcode encountered; ignoring");
            }
            0xE => {
                // LEA
                let offset = sign_extend(instr & 0x1FF, 9);
                let value = self.pc.wrapping_add(offset);
                self.set_reg(dr, value);
            }
            0xF => self.trap(bus, (instr & 0xFF) as u8),
            _ => unreachable!("op is a 4-bit field"),
        }
    }

    fn trap(&mut self, bus: &mut impl TermIo, vector: u8) {
        let Some(trap) = Trap::decode(vector) else {
            log::debug!("unimplemented trap vector {vector:#04x}; leaving R0 untouched");
            return;
        };
        log::debug!("trap {trap:?}");
        match trap {
            Trap::GetC => {
                let byte = bus.read_byte();
                self.registers[0] = zero_extend(byte, 8);
            }
            Trap::Out => bus.write_byte((self.registers[0] & 0xFF) as u8),
            Trap::Puts => {
                let mut addr = self.registers[0];
                loop {
                    let word = bus.read(addr);
                    if word == 0 {
                        break;
                    }
                    bus.write_byte((word & 0xFF) as u8);
                    addr = addr.wrapping_add(1);
                }
            }
            Trap::In => {
                write_str(bus, "Enter a character: ");
                let byte = bus.read_byte();
                bus.write_byte((byte & 0xFF) as u8);
                self.registers[0] = zero_extend(byte, 8);
            }
            Trap::Putsp => {
                let mut addr = self.registers[0];
                loop {
                    let word = bus.read(addr);
                    if word == 0 {
                        break;
                    }
                    bus.write_byte((word & 0xFF) as u8);
                    let high = (word >> 8) as u8;
                    if high != 0 {
                        bus.write_byte(high);
                    }
                    addr = addr.wrapping_add(1);
                }
            }
            Trap::Halt => {
                write_str(bus, "Halting...\n");
                self.running = false;
            }
        }
    }
}

fn write_str(bus: &mut impl TermIo, s: &str) {
    for byte in s.bytes() {
        bus.write_byte(byte);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vm_core::Bus;

    /// An in-memory `Bus`/`TermIo` double: a 64K word array plus
    /// scripted stdin bytes and a captured stdout buffer.
    struct TestBus {
        memory: [u16; 65536],
        input: std::collections::VecDeque<u8>,
        output: Vec<u8>,
    }

    impl TestBus {
        fn new() -> Self {
            Self {
                memory: [0; 65536],
                input: std::collections::VecDeque::new(),
                output: Vec::new(),
            }
        }

        fn load(&mut self, addr: u16, words: &[u16]) {
            for (offset, &word) in words.iter().enumerate() {
                self.memory[addr as usize + offset] = word;
            }
        }
    }

    impl Bus for TestBus {
        fn read(&mut self, addr: u16) -> u16 {
            self.memory[addr as usize]
        }

        fn write(&mut self, addr: u16, value: u16) {
            self.memory[addr as usize] = value;
        }
    }

    impl TermIo for TestBus {
        fn read_byte(&mut self) -> u16 {
            u16::from(self.input.pop_front().unwrap_or(0))
        }

        fn write_byte(&mut self, byte: u8) {
            self.output.push(byte);
        }
    }

    #[test]
    fn s1_halt() {
        let mut cpu = Lc3Cpu::new();
        let mut bus = TestBus::new();
        bus.load(0x3000, &[0xF025]);

        cpu.run(&mut bus);

        assert!(!cpu.is_running());
        assert_eq!(bus.output, b"Halting...\n");
    }

    #[test]
    fn s2_add_immediate_sets_positive_flag() {
        let mut cpu = Lc3Cpu::new();
        let mut bus = TestBus::new();
        // ADD R1, R1, #4 ; TRAP HALT
        bus.load(0x3000, &[0x1264, 0xF025]);

        cpu.run(&mut bus);

        assert_eq!(cpu.reg(1), 4);
        assert_eq!(cpu.cond(), ConditionFlag::Positive);
    }

    #[test]
    fn s3_puts_writes_until_nul() {
        let mut cpu = Lc3Cpu::new();
        let mut bus = TestBus::new();
        // LEA R0, msg ; PUTS ; HALT ; msg: 'H' 'i' 0
        bus.load(0x3000, &[0xE002, 0xF022, 0xF025, u16::from(b'H'), u16::from(b'i'), 0]);

        cpu.run(&mut bus);

        assert_eq!(bus.output, b"Hi");
    }

    #[test]
    fn s4_not_sets_negative_flag() {
        let mut cpu = Lc3Cpu::new();
        let mut bus = TestBus::new();
        // NOT R2, R1 ; HALT (R1 starts at 0)
        bus.load(0x3000, &[0x947F, 0xF025]);

        cpu.run(&mut bus);

        assert_eq!(cpu.reg(2), 0xFFFF);
        assert_eq!(cpu.cond(), ConditionFlag::Negative);
    }

    #[test]
    fn puts_on_leading_nul_emits_nothing() {
        let mut cpu = Lc3Cpu::new();
        let mut bus = TestBus::new();
        bus.load(0x3000, &[0xE002, 0xF022, 0xF025, 0]);

        cpu.run(&mut bus);

        assert!(bus.output.is_empty());
    }

    #[test]
    fn ld_st_round_trip() {
        let mut cpu = Lc3Cpu::new();
        let mut bus = TestBus::new();
        // AND R1, R1, #0 ; ADD R1, R1, #7 ; ST R1, label ; LD R2, label ; HALT ; label: 0
        bus.load(
            0x3000,
            &[0x5260, 0x1267, 0x3202, 0x2401, 0xF025, 0],
        );

        cpu.run(&mut bus);

        assert_eq!(cpu.reg(1), cpu.reg(2));
        assert_eq!(cpu.reg(2), 7);
    }

    #[test]
    fn ldi_sti_indirect_through_pointer() {
        let mut cpu = Lc3Cpu::new();
        let mut bus = TestBus::new();
        // AND R1,R1,#0; ADD R1,R1,#9; STI R1,ptr; LDI R2,ptr; HALT; ptr: target; target: 0
        bus.load(
            0x3000,
            &[0x5260, 0x1269, 0xB202, 0xA401, 0xF025, 0x3006, 0],
        );

        cpu.run(&mut bus);

        assert_eq!(cpu.reg(2), 9);
    }

    #[test]
    fn jsr_then_ret_restores_pc_via_r7() {
        let mut cpu = Lc3Cpu::new();
        let mut bus = TestBus::new();
        // JSR sub ; HALT ; sub: ADD R0,R0,#1 ; JMP R7
        bus.load(0x3000, &[0x4801, 0xF025, 0x1021, 0xC1C0]);

        cpu.run(&mut bus);

        assert_eq!(cpu.reg(0), 1);
        assert!(!cpu.is_running());
    }

    #[test]
    fn reserved_opcodes_are_ignored_not_fatal() {
        let mut cpu = Lc3Cpu::new();
        let mut bus = TestBus::new();
        // RTI ; RES ; HALT
        bus.load(0x3000, &[0x8000, 0xD000, 0xF025]);

        cpu.run(&mut bus);

        assert!(!cpu.is_running());
    }

    #[test]
    fn unknown_trap_vector_leaves_r0_untouched() {
        let mut cpu = Lc3Cpu::new();
        let mut bus = TestBus::new();
        cpu.registers[0] = 0x1234;
        // TRAP 0x99 (unimplemented) ; HALT
        bus.load(0x3000, &[0xF099, 0xF025]);

        cpu.run(&mut bus);

        assert_eq!(cpu.reg(0), 0x1234);
    }

    #[test]
    fn getc_and_in_read_from_scripted_stdin() {
        let mut cpu = Lc3Cpu::new();
        let mut bus = TestBus::new();
        bus.input.push_back(b'Q');
        // TRAP GETC ; HALT
        bus.load(0x3000, &[0xF020, 0xF025]);

        cpu.run(&mut bus);

        assert_eq!(cpu.reg(0), u16::from(b'Q'));
    }
}
