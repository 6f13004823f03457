//! The real-world `Bus`/`TermIo` backing store: a 64K-word memory plus
//! a raw-mode POSIX terminal.

use crate::TermError;
use lc3_cpu::TermIo;
use std::io::{self, Read, Write};
use std::os::unix::io::RawFd;
use termios::{tcsetattr, Termios, ECHO, ICANON, TCSANOW};
use vm_core::Bus;

const STDIN_FD: RawFd = libc::STDIN_FILENO;

/// Memory-mapped keyboard and display registers, plus the machine
/// control register.
pub struct TerminalBus {
    memory: Box<[u16; 65536]>,
    saved_termios: Termios,
}

impl TerminalBus {
    pub const KBSR: u16 = 0xFE00;
    pub const KBDR: u16 = 0xFE02;
    pub const DSR: u16 = 0xFE04;
    pub const DDR: u16 = 0xFE06;
    /// Writes here are not specially interpreted; this address is
    /// intentionally backed by plain memory like any other cell, and
    /// is named here only to document the full memory map.
    pub const MCR: u16 = 0xFFFE;

    /// Capture the current line discipline, switch stdin to
    /// non-canonical/no-echo mode, and install a `SIGINT` handler that
    /// restores it before the process exits with a distinct non-zero
    /// status.
    pub fn new() -> Result<Self, TermError> {
        let saved = Termios::from_fd(STDIN_FD)?;
        let mut raw = saved.clone();
        raw.c_lflag &= !(ICANON | ECHO);
        tcsetattr(STDIN_FD, TCSANOW, &raw)?;

        let handler_termios = saved.clone();
        ctrlc::set_handler(move || {
            let _ = tcsetattr(STDIN_FD, TCSANOW, &handler_termios);
            std::process::exit(130);
        })
        .expect("failed to install SIGINT handler");

        Ok(Self {
            memory: Box::new([0; 65536]),
            saved_termios: saved,
        })
    }

    /// Load a big-endian LC-3 image, returning its origin.
    pub fn load_image(&mut self, reader: impl Read) -> Result<u16, TermError> {
        crate::loader::load_image(reader, &mut self.memory)
    }

    /// Restore the terminal's saved line discipline. Called explicitly
    /// by the `HALT` trap path so a clean exit doesn't depend on
    /// `Drop` running.
    pub fn restore_terminal(&self) {
        let _ = tcsetattr(STDIN_FD, TCSANOW, &self.saved_termios);
    }

    fn key_ready() -> bool {
        let mut fd = libc::pollfd {
            fd: STDIN_FD,
            events: libc::POLLIN,
            revents: 0,
        };
        // SAFETY: `fd` is a single well-formed pollfd on the stack and
        // the timeout is zero, so this never blocks.
        let ready = unsafe { libc::poll(&mut fd, 1, 0) };
        ready > 0 && fd.revents & libc::POLLIN != 0
    }

    fn read_stdin_byte() -> u8 {
        let mut buf = [0u8; 1];
        // A short read here would mean stdin closed; treat it as NUL,
        // matching the original's behavior of reading whatever getchar
        // returns.
        let _ = io::stdin().read_exact(&mut buf);
        buf[0]
    }
}

impl Bus for TerminalBus {
    fn read(&mut self, addr: u16) -> u16 {
        match addr {
            Self::KBSR => u16::from(Self::key_ready()) << 15,
            Self::KBDR => {
                if Self::key_ready() {
                    u16::from(Self::read_stdin_byte())
                } else {
                    0
                }
            }
            Self::DSR => 0x8000,
            Self::DDR => 0,
            _ => self.memory[addr as usize],
        }
    }

    fn write(&mut self, addr: u16, value: u16) {
        self.memory[addr as usize] = value;
    }
}

impl TermIo for TerminalBus {
    fn read_byte(&mut self) -> u16 {
        u16::from(Self::read_stdin_byte())
    }

    fn write_byte(&mut self, byte: u8) {
        let mut stdout = io::stdout();
        let _ = stdout.write_all(&[byte]);
        let _ = stdout.flush();
    }
}

impl Drop for TerminalBus {
    fn drop(&mut self) {
        self.restore_terminal();
    }
}
