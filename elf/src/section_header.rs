use crate::bytes::{read_u32, read_u64};
use crate::class::ElfClass;
use crate::classifiers::SectionType;
use crate::error::ElfError;
use crate::header::ElfHeader;
use std::io::{Read, Seek, SeekFrom};

const ENTRY_LEN: usize = 0x40;

/// One section header entry, widened to 64-bit field sizes.
#[derive(Debug, Clone)]
pub struct SectionHeaderEntry {
    pub name_offset: u32,
    pub section_type: SectionType,
    pub flags: u64,
    pub address: u64,
    pub file_offset: u64,
    pub size: u64,
    pub link: u32,
    pub info: u32,
    pub address_alignment: u64,
    pub entry_size: u64,
}

impl SectionHeaderEntry {
    /// Read section header entry `index` for `header`, seeking to its
    /// exact file position first (`section_header_offset + index *
    /// section_header_entry_size`).
    pub fn read_at(
        reader: &mut (impl Read + Seek),
        header: &ElfHeader,
        index: u16,
    ) -> Result<Self, ElfError> {
        let entry_size = u64::from(header.section_header_entry_size);
        let position = header.section_header_offset + u64::from(index) * entry_size;
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

    /// Parse one `0x40`-byte section header entry.
    pub fn parse(bytes: &[u8], class: ElfClass, little_endian: bool) -> Self {
        let name_offset = read_u32(bytes, 0, little_endian);
        let section_type = SectionType::from_u32(read_u32(bytes, 4, little_endian));

        match class {
            ElfClass::Elf32 => Self {
                name_offset,
                section_type,
                flags: u64::from(read_u32(bytes, 8, little_endian)),
                address: u64::from(read_u32(bytes, 12, little_endian)),
                file_offset: u64::from(read_u32(bytes, 16, little_endian)),
                size: u64::from(read_u32(bytes, 20, little_endian)),
                link: read_u32(bytes, 24, little_endian),
                info: read_u32(bytes, 28, little_endian),
                address_alignment: u64::from(read_u32(bytes, 32, little_endian)),
                entry_size: u64::from(read_u32(bytes, 36, little_endian)),
            },
            ElfClass::Elf64 => Self {
                name_offset,
                section_type,
                flags: read_u64(bytes, 8, little_endian),
                address: read_u64(bytes, 16, little_endian),
                file_offset: read_u64(bytes, 24, little_endian),
                size: read_u64(bytes, 32, little_endian),
                link: read_u32(bytes, 40, little_endian),
                info: read_u32(bytes, 44, little_endian),
                address_alignment: read_u64(bytes, 48, little_endian),
                entry_size: read_u64(bytes, 56, little_endian),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_positions_differ_between_classes() {
        let mut bytes32 = [0u8; ENTRY_LEN];
        bytes32[16..20].copy_from_slice(&0x1000u32.to_le_bytes());
        let entry32 = SectionHeaderEntry::parse(&bytes32, ElfClass::Elf32, true);
        assert_eq!(entry32.file_offset, 0x1000);

        let mut bytes64 = [0u8; ENTRY_LEN];
        bytes64[24..32].copy_from_slice(&0x2000u64.to_le_bytes());
        let entry64 = SectionHeaderEntry::parse(&bytes64, ElfClass::Elf64, true);
        assert_eq!(entry64.file_offset, 0x2000);
    }

    #[test]
    fn section_type_progbits_parses() {
        let mut bytes = [0u8; ENTRY_LEN];
        bytes[4..8].copy_from_slice(&1u32.to_le_bytes());
        let entry = SectionHeaderEntry::parse(&bytes, ElfClass::Elf64, true);
        assert_eq!(entry.section_type, SectionType::Progbits);
    }
}
