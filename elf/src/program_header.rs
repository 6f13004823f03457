use crate::bytes::{read_u32, read_u64};
use crate::class::ElfClass;
use crate::classifiers::SegmentType;
use crate::error::ElfError;
use crate::header::ElfHeader;
use std::io::{Read, Seek, SeekFrom};

const ENTRY_LEN: usize = 0x38;

/// One program header (segment) entry, widened to 64-bit field sizes.
#[derive(Debug, Clone)]
pub struct ProgramHeaderEntry {
    pub segment_type: SegmentType,
    pub flags: u32,
    pub file_offset: u64,
    pub virtual_address: u64,
    pub physical_address: u64,
    pub file_size: u64,
    pub memory_size: u64,
    pub alignment: u64,
}

impl ProgramHeaderEntry {
    /// Read program header entry `index` for `header`, seeking to its
    /// exact file position first (`program_header_offset + index *
    /// program_header_entry_size`) rather than trusting the reader's
    /// current position.
    pub fn read_at(
        reader: &mut (impl Read + Seek),
        header: &ElfHeader,
        index: u16,
    ) -> Result<Self, ElfError> {
        let entry_size = u64::from(header.program_header_entry_size);
        let position = header.program_header_offset + u64::from(index) * entry_size;
        reader.seek(SeekFrom::Start(position))?;

        let mut bytes = [0u8; ENTRY_LEN];
        reader.read_exact(&mut bytes).map_err(|e| {
            if e.kind() == std::io::ErrorKind::UnexpectedEof {
                ElfError::Truncated {
                    needed: ENTRY_LEN,
                    got: 0,
                }
            } else {
                ElfError::Io(e)
            }
        })?;

        Ok(Self::parse(&bytes, header.class, header.little_endian))
    }

    /// Parse one `0x38`-byte program header entry. `class` controls
    /// both field width and the `flags` field's position: ELF64 puts
    /// it right after `type`, ELF32 puts it near the end.
    pub fn parse(bytes: &[u8], class: ElfClass, little_endian: bool) -> Self {
        let segment_type = SegmentType::from_u32(read_u32(bytes, 0, little_endian));

        match class {
            ElfClass::Elf64 => Self {
                segment_type,
                flags: read_u32(bytes, 4, little_endian),
                file_offset: read_u64(bytes, 8, little_endian),
                virtual_address: read_u64(bytes, 16, little_endian),
                physical_address: read_u64(bytes, 24, little_endian),
                file_size: read_u64(bytes, 32, little_endian),
                memory_size: read_u64(bytes, 40, little_endian),
                alignment: read_u64(bytes, 48, little_endian),
            },
            ElfClass::Elf32 => Self {
                segment_type,
                file_offset: u64::from(read_u32(bytes, 4, little_endian)),
                virtual_address: u64::from(read_u32(bytes, 8, little_endian)),
                physical_address: u64::from(read_u32(bytes, 12, little_endian)),
                file_size: u64::from(read_u32(bytes, 16, little_endian)),
                memory_size: u64::from(read_u32(bytes, 20, little_endian)),
                flags: read_u32(bytes, 24, little_endian),
                alignment: u64::from(read_u32(bytes, 28, little_endian)),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_position_differs_between_classes() {
        let mut bytes64 = [0u8; ENTRY_LEN];
        bytes64[4..8].copy_from_slice(&0x0000_0005u32.to_le_bytes());
        let entry64 = ProgramHeaderEntry::parse(&bytes64, ElfClass::Elf64, true);
        assert_eq!(entry64.flags, 5);

        let mut bytes32 = [0u8; ENTRY_LEN];
        bytes32[24..28].copy_from_slice(&0x0000_0006u32.to_le_bytes());
        let entry32 = ProgramHeaderEntry::parse(&bytes32, ElfClass::Elf32, true);
        assert_eq!(entry32.flags, 6);
    }

    #[test]
    fn segment_type_load_parses() {
        let mut bytes = [0u8; ENTRY_LEN];
        bytes[0..4].copy_from_slice(&1u32.to_le_bytes());
        let entry = ProgramHeaderEntry::parse(&bytes, ElfClass::Elf64, true);
        assert_eq!(entry.segment_type, SegmentType::Load);
    }
}
