//! Real-world I/O for the LC-3 CPU: a 64K-word memory, the
//! memory-mapped keyboard/display registers, raw-mode terminal setup,
//! and the big-endian image loader. Everything in `lc3-cpu` is
//! generic over `Bus`/`TermIo`; this crate supplies the implementation
//! that talks to an actual terminal.

mod error;
mod loader;
mod terminal;

pub use error::TermError;
pub use loader::load_image;
pub use terminal::TerminalBus;
