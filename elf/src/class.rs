/// ELF class: whether offsets/addresses are 32-bit or 64-bit wide.
///
/// Every other field width (type, ISA, sizes, counts, flags) is the
/// same in both classes; only offsets and virtual addresses change
/// size and, for the program header, position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElfClass {
    Elf32,
    Elf64,
}

impl ElfClass {
    pub(crate) fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            1 => Some(Self::Elf32),
            2 => Some(Self::Elf64),
            _ => None,
        }
    }
}
