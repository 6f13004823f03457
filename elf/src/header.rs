use crate::bytes::{read_u16, read_u32, read_u64};
use crate::class::ElfClass;
use crate::classifiers::{AbiOs, Isa, ObjectType};
use crate::error::ElfError;
use std::io::Read;

const MAGIC: [u8; 4] = [0x7F, b'E', b'L', b'F'];
const HEADER_LEN: usize = 0x40;

const CLASS_OFFSET: usize = 0x04;
const DATA_OFFSET: usize = 0x05;
const VERSION_OFFSET: usize = 0x06;
const ABI_OS_OFFSET: usize = 0x07;
const ABI_VERSION_OFFSET: usize = 0x08;
const PAD_OFFSET: usize = 0x09;
const PAD_LEN: usize = 7;

const TYPE_OFFSET: usize = 0x10;
const ISA_OFFSET: usize = 0x12;
const VERSION_FIELD_OFFSET: usize = 0x14;

/// Parsed ELF object-file header (`e_ident` plus the fixed fields that
/// follow it), widened to the 64-bit field sizes regardless of class.
#[derive(Debug, Clone)]
pub struct ElfHeader {
    pub class: ElfClass,
    pub little_endian: bool,
    /// `true` iff `e_ident[EI_VERSION] == 1` ("original" ELF version).
    pub version_is_original: bool,
    pub abi_os: AbiOs,
    pub abi_version: u8,
    pub object_type: ObjectType,
    pub isa: Isa,
    pub version: u32,
    pub entry_point: u64,
    pub program_header_offset: u64,
    pub section_header_offset: u64,
    pub flags: u32,
    pub elf_header_size: u16,
    pub program_header_entry_size: u16,
    pub program_header_count: u16,
    pub section_header_entry_size: u16,
    pub section_header_count: u16,
    pub section_header_string_index: u16,
}

impl ElfHeader {
    /// Read exactly the first 64 bytes from `reader` and parse them.
    pub fn read_from(reader: &mut impl Read) -> Result<Self, ElfError> {
        let mut buf = [0u8; HEADER_LEN];
        reader.read_exact(&mut buf).map_err(|e| {
            if e.kind() == std::io::ErrorKind::UnexpectedEof {
                ElfError::Truncated {
                    needed: HEADER_LEN,
                    got: 0,
                }
            } else {
                ElfError::Io(e)
            }
        })?;
        Self::parse(&buf)
    }

    /// Parse a 64-byte ELF header buffer.
    pub fn parse(bytes: &[u8]) -> Result<Self, ElfError> {
        if bytes.len() < HEADER_LEN {
            return Err(ElfError::Truncated {
                needed: HEADER_LEN,
                got: bytes.len(),
            });
        }

        if bytes[0..4] != MAGIC {
            let mut got = [0u8; 4];
            got.copy_from_slice(&bytes[0..4]);
            return Err(ElfError::BadMagic(got));
        }

        let class = ElfClass::from_byte(bytes[CLASS_OFFSET])
            .ok_or(ElfError::UnknownClass(bytes[CLASS_OFFSET]))?;

        let little_endian = match bytes[DATA_OFFSET] {
            1 => true,
            2 => false,
            other => return Err(ElfError::UnknownEndianness(other)),
        };

        let version_is_original = bytes[VERSION_OFFSET] == 1;

        let abi_os_byte = bytes[ABI_OS_OFFSET];
        let abi_os = AbiOs::from_byte(abi_os_byte).ok_or(ElfError::AbiOutOfRange(abi_os_byte))?;
        let abi_version = bytes[ABI_VERSION_OFFSET];

        for i in 0..PAD_LEN {
            let value = bytes[PAD_OFFSET + i];
            if value != 0 {
                return Err(ElfError::NonZeroPadding {
                    offset: PAD_OFFSET + i,
                    value,
                });
            }
        }

        let object_type = ObjectType::from_u16(read_u16(bytes, TYPE_OFFSET, little_endian));
        let isa = Isa::from_u16(read_u16(bytes, ISA_OFFSET, little_endian));
        let version = read_u32(bytes, VERSION_FIELD_OFFSET, little_endian);

        let offsets = ClassOffsets::for_class(class);
        let entry_point = offsets.read_wide(bytes, offsets.entry, little_endian);
        let program_header_offset = offsets.read_wide(bytes, offsets.ph_off, little_endian);
        let section_header_offset = offsets.read_wide(bytes, offsets.sh_off, little_endian);
        let flags = read_u32(bytes, offsets.flags, little_endian);
        let elf_header_size = read_u16(bytes, offsets.eh_size, little_endian);
        let program_header_entry_size = read_u16(bytes, offsets.ph_entsize, little_endian);
        let program_header_count = read_u16(bytes, offsets.ph_num, little_endian);
        let section_header_entry_size = read_u16(bytes, offsets.sh_entsize, little_endian);
        let section_header_count = read_u16(bytes, offsets.sh_num, little_endian);
        let section_header_string_index = read_u16(bytes, offsets.sh_strndx, little_endian);

        Ok(Self {
            class,
            little_endian,
            version_is_original,
            abi_os,
            abi_version,
            object_type,
            isa,
            version,
            entry_point,
            program_header_offset,
            section_header_offset,
            flags,
            elf_header_size,
            program_header_entry_size,
            program_header_count,
            section_header_entry_size,
            section_header_count,
            section_header_string_index,
        })
    }
}

/// Class-dependent byte offsets for the fields after `e_ident`.
struct ClassOffsets {
    entry: usize,
    ph_off: usize,
    sh_off: usize,
    flags: usize,
    eh_size: usize,
    ph_entsize: usize,
    ph_num: usize,
    sh_entsize: usize,
    sh_num: usize,
    sh_strndx: usize,
    wide_field_len: usize,
}

impl ClassOffsets {
    fn for_class(class: ElfClass) -> Self {
        match class {
            ElfClass::Elf32 => Self {
                entry: 0x18,
                ph_off: 0x1C,
                sh_off: 0x20,
                flags: 0x24,
                eh_size: 0x28,
                ph_entsize: 0x2A,
                ph_num: 0x2C,
                sh_entsize: 0x2E,
                sh_num: 0x30,
                sh_strndx: 0x32,
                wide_field_len: 4,
            },
            ElfClass::Elf64 => Self {
                entry: 0x18,
                ph_off: 0x20,
                sh_off: 0x28,
                flags: 0x30,
                eh_size: 0x34,
                ph_entsize: 0x36,
                ph_num: 0x38,
                sh_entsize: 0x3A,
                sh_num: 0x3C,
                sh_strndx: 0x3E,
                wide_field_len: 8,
            },
        }
    }

    /// Read an offset/address field, widening a 32-bit value to `u64`
    /// when the class is ELF32.
    fn read_wide(&self, bytes: &[u8], offset: usize, little_endian: bool) -> u64 {
        if self.wide_field_len == 8 {
            read_u64(bytes, offset, little_endian)
        } else {
            u64::from(read_u32(bytes, offset, little_endian))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal_header(class_byte: u8, data_byte: u8) -> Vec<u8> {
        let mut bytes = vec![0u8; HEADER_LEN];
        bytes[0..4].copy_from_slice(&MAGIC);
        bytes[CLASS_OFFSET] = class_byte;
        bytes[DATA_OFFSET] = data_byte;
        bytes[VERSION_OFFSET] = 1;
        bytes[ABI_OS_OFFSET] = 0x03; // Linux
        bytes
    }

    #[test]
    fn s6_bad_magic_is_rejected() {
        let mut bytes = minimal_header(2, 1);
        bytes[0] = 0x00;
        let err = ElfHeader::parse(&bytes).unwrap_err();
        assert!(matches!(err, ElfError::BadMagic(_)));
    }

    #[test]
    fn rejects_nonzero_padding() {
        let mut bytes = minimal_header(2, 1);
        bytes[0x0B] = 0xFF;
        let err = ElfHeader::parse(&bytes).unwrap_err();
        assert!(matches!(err, ElfError::NonZeroPadding { offset: 0x0B, value: 0xFF }));
    }

    #[test]
    fn rejects_abi_os_above_range() {
        let mut bytes = minimal_header(2, 1);
        bytes[ABI_OS_OFFSET] = 0x13;
        let err = ElfHeader::parse(&bytes).unwrap_err();
        assert!(matches!(err, ElfError::AbiOutOfRange(0x13)));
    }

    #[test]
    fn s5_64_bit_little_endian_reads_class_dependent_offsets() {
        let mut bytes = minimal_header(2, 1);
        // entry_point at 0x18, little-endian u64.
        bytes[0x18..0x20].copy_from_slice(&0x0000_0000_0040_1000u64.to_le_bytes());
        // program_header_offset at 0x20 for 64-bit.
        bytes[0x20..0x28].copy_from_slice(&64u64.to_le_bytes());

        let header = ElfHeader::parse(&bytes).unwrap();
        assert_eq!(header.class, ElfClass::Elf64);
        assert!(header.little_endian);
        assert_eq!(header.entry_point, 0x0040_1000);
        assert_eq!(header.program_header_offset, 64);
    }

    #[test]
    fn widens_32_bit_offsets_to_64_bit_record() {
        let mut bytes = minimal_header(1, 1);
        bytes[0x1C..0x20].copy_from_slice(&52u32.to_le_bytes());

        let header = ElfHeader::parse(&bytes).unwrap();
        assert_eq!(header.class, ElfClass::Elf32);
        assert_eq!(header.program_header_offset, 52);
    }
}
