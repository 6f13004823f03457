use thiserror::Error;

/// Every way parsing an ELF object file can fail. All are fatal: the
/// spec has no partial-recovery path, only short-circuit to exit.
#[derive(Debug, Error)]
pub enum ElfError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("not an ELF file: magic bytes are {0:02x?}")]
    BadMagic([u8; 4]),

    #[error("unrecognized class byte {0:#04x} (expected 1 for ELF32 or 2 for ELF64)")]
    UnknownClass(u8),

    #[error("unrecognized data-encoding byte {0:#04x} (expected 1 for little-endian or 2 for big-endian)")]
    UnknownEndianness(u8),

    #[error("OS/ABI byte {0:#04x} is out of the valid [0, 0x12] range")]
    AbiOutOfRange(u8),

    #[error("EI_PAD byte at identification offset {offset} is {value:#04x}, expected 0")]
    NonZeroPadding { offset: usize, value: u8 },

    #[error("header truncated: needed {needed} bytes, got {got}")]
    Truncated { needed: usize, got: usize },
}
