//! Closed-set identifier mappings for ELF header fields.

/// Operating system / ABI the object file targets.
///
/// Validated against `[0, 0x12]` before parsing, so unlike the other
/// classifiers here there is no `Unknown` fallback arm — an
/// out-of-range byte is a parse error, not a variant. Byte `0x12` sits
/// inside the valid range but has no name in the reference decoder
/// this grew out of; it is carried here as `Unspecified`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AbiOs {
    SystemV,
    HpUx,
    NetBsd,
    Linux,
    GnuHurd,
    Solaris,
    Aix,
    Irix,
    FreeBsd,
    Tru64,
    NovellModesto,
    OpenBsd,
    OpenVms,
    NonStopKernel,
    Aros,
    FenixOs,
    CloudAbi,
    StratusTechnologiesOpenVos,
    Unspecified,
}

impl AbiOs {
    pub(crate) fn from_byte(byte: u8) -> Option<Self> {
        Some(match byte {
            0x00 => Self::SystemV,
            0x01 => Self::HpUx,
            0x02 => Self::NetBsd,
            0x03 => Self::Linux,
            0x04 => Self::GnuHurd,
            0x05 => Self::Solaris,
            0x06 => Self::Aix,
            0x07 => Self::Irix,
            0x08 => Self::FreeBsd,
            0x09 => Self::Tru64,
            0x0A => Self::NovellModesto,
            0x0B => Self::OpenBsd,
            0x0C => Self::OpenVms,
            0x0D => Self::NonStopKernel,
            0x0E => Self::Aros,
            0x0F => Self::FenixOs,
            0x10 => Self::CloudAbi,
            0x11 => Self::StratusTechnologiesOpenVos,
            0x12 => Self::Unspecified,
            _ => return None,
        })
    }
}

/// Target instruction set, from the `e_machine` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Isa {
    NoSpecificInstructionSet,
    AtAndTWe32100,
    Sparc,
    X86,
    Motorola6800,
    Motorola8800,
    IntelMcu,
    Intel80860,
    Mips,
    IbmSystem370,
    MipsRs3000LittleEndian,
    HpPaRisc,
    Intel80960,
    PowerPc,
    PowerPc64,
    S390,
    IbmSpu,
    NecV800,
    FujitsuFr20,
    TrwRh32,
    MotorolaRce,
    Arm,
    DigitalAlpha,
    SuperH,
    Sparc9,
    SiemensTriCore,
    ArgonautRisc,
    HitachiH8300,
    HitachiH8300H,
    HitachiH8S,
    HitachiH8500,
    Ia64,
    StanfordMipsX,
    MotorolaColdFire,
    MotorolaM68Hc12,
    FujitsuMma,
    SiemensPcp,
    SonyNCpuRisc,
    DensoNdr1,
    MotorolaStarCore,
    ToyotaMe16,
    StmSt100,
    TinyJ,
    AmdX8664,
    Tms320C6000,
    Arm64,
    RiscV,
    BerkeleyPacketFilter,
    Wdc65C816,
    Unknown(u16),
}

impl Isa {
    pub(crate) fn from_u16(raw: u16) -> Self {
        match raw {
            0x00 => Self::NoSpecificInstructionSet,
            0x01 => Self::AtAndTWe32100,
            0x02 => Self::Sparc,
            0x03 => Self::X86,
            0x04 => Self::Motorola6800,
            0x05 => Self::Motorola8800,
            0x06 => Self::IntelMcu,
            0x07 => Self::Intel80860,
            0x08 => Self::Mips,
            0x09 => Self::IbmSystem370,
            0x0A => Self::MipsRs3000LittleEndian,
            0x0E => Self::HpPaRisc,
            0x13 => Self::Intel80960,
            0x14 => Self::PowerPc,
            0x15 => Self::PowerPc64,
            0x16 => Self::S390,
            0x17 => Self::IbmSpu,
            0x24 => Self::NecV800,
            0x25 => Self::FujitsuFr20,
            0x26 => Self::TrwRh32,
            0x27 => Self::MotorolaRce,
            0x28 => Self::Arm,
            0x29 => Self::DigitalAlpha,
            0x2A => Self::SuperH,
            0x2B => Self::Sparc9,
            0x2C => Self::SiemensTriCore,
            0x2D => Self::ArgonautRisc,
            0x2E => Self::HitachiH8300,
            0x2F => Self::HitachiH8300H,
            0x30 => Self::HitachiH8S,
            0x31 => Self::HitachiH8500,
            0x32 => Self::Ia64,
            0x33 => Self::StanfordMipsX,
            0x34 => Self::MotorolaColdFire,
            0x35 => Self::MotorolaM68Hc12,
            0x36 => Self::FujitsuMma,
            0x37 => Self::SiemensPcp,
            0x38 => Self::SonyNCpuRisc,
            0x39 => Self::DensoNdr1,
            0x3A => Self::MotorolaStarCore,
            0x3B => Self::ToyotaMe16,
            0x3C => Self::StmSt100,
            0x3D => Self::TinyJ,
            0x3E => Self::AmdX8664,
            0x8C => Self::Tms320C6000,
            0xB7 => Self::Arm64,
            0xF3 => Self::RiscV,
            0xF7 => Self::BerkeleyPacketFilter,
            0x101 => Self::Wdc65C816,
            other => Self::Unknown(other),
        }
    }
}

/// Object-file type, from the `e_type` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectType {
    None,
    Relocatable,
    Executable,
    SharedObject,
    Core,
    Unknown(u16),
}

impl ObjectType {
    pub(crate) fn from_u16(raw: u16) -> Self {
        match raw {
            0x0000 => Self::None,
            0x0001 => Self::Relocatable,
            0x0002 => Self::Executable,
            0x0003 => Self::SharedObject,
            0x0004 => Self::Core,
            other => Self::Unknown(other),
        }
    }

    /// Human-readable label matching the original's `stringifyElfType`.
    pub fn describe(self) -> &'static str {
        match self {
            Self::None => "No file type",
            Self::Relocatable => "A relocatable file",
            Self::Executable => "An executable file",
            Self::SharedObject => "A shared object",
            Self::Core => "A core file",
            Self::Unknown(0xFE00..=0xFEFF | 0xFF00..=0xFFFF) => "Processor-specific",
            Self::Unknown(_) => "An Unknown type",
        }
    }
}

/// Program-header segment type, from `p_type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentType {
    Null,
    Load,
    Dynamic,
    Interp,
    Note,
    Shlib,
    Phdr,
    Tls,
    Unknown(u32),
}

impl SegmentType {
    pub(crate) fn from_u32(raw: u32) -> Self {
        match raw {
            0x0 => Self::Null,
            0x1 => Self::Load,
            0x2 => Self::Dynamic,
            0x3 => Self::Interp,
            0x4 => Self::Note,
            0x5 => Self::Shlib,
            0x6 => Self::Phdr,
            0x7 => Self::Tls,
            other => Self::Unknown(other),
        }
    }

    /// Human-readable label matching the original's
    /// `stringifyProgramHeaderType`.
    pub fn describe(self) -> &'static str {
        match self {
            Self::Null => "Program header table entry unused",
            Self::Load => "Loadable segment",
            Self::Dynamic => "Dynamic linking information",
            Self::Interp => "Interpreter information",
            Self::Note => "Auxiliary information",
            Self::Shlib => "Reserved",
            Self::Phdr => "Program header",
            Self::Tls => "Thread-Local Storage template",
            Self::Unknown(0x6000_0000..=0x7FFF_FFFF) => "Processor-specific",
            Self::Unknown(_) => "Undetermined",
        }
    }
}

/// Section-header type, from `sh_type`.
///
/// Only four of these (`Null`/`Progbits`/`Symtab`/`Strtab`) come from
/// the minimal reference decoder this crate grew out of; the rest are
/// the standard ELF section types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionType {
    Null,
    Progbits,
    Symtab,
    Strtab,
    Rela,
    Hash,
    Dynamic,
    Note,
    Nobits,
    Rel,
    Shlib,
    Dynsym,
    InitArray,
    FiniArray,
    PreinitArray,
    Group,
    SymtabShndx,
    Unknown(u32),
}

impl SectionType {
    pub(crate) fn from_u32(raw: u32) -> Self {
        match raw {
            0 => Self::Null,
            1 => Self::Progbits,
            2 => Self::Symtab,
            3 => Self::Strtab,
            4 => Self::Rela,
            5 => Self::Hash,
            6 => Self::Dynamic,
            7 => Self::Note,
            8 => Self::Nobits,
            9 => Self::Rel,
            10 => Self::Shlib,
            11 => Self::Dynsym,
            14 => Self::InitArray,
            15 => Self::FiniArray,
            16 => Self::PreinitArray,
            17 => Self::Group,
            18 => Self::SymtabShndx,
            other => Self::Unknown(other),
        }
    }

    /// Human-readable label. Only the four types the original names
    /// get its exact wording; the rest get a descriptive label.
    pub fn describe(self) -> &'static str {
        match self {
            Self::Null => "Section header table entry unused",
            Self::Progbits => "Program data",
            Self::Symtab => "Symbol table",
            Self::Strtab => "String table",
            Self::Rela => "Relocation entries with addends",
            Self::Hash => "Symbol hash table",
            Self::Dynamic => "Dynamic linking information",
            Self::Note => "Notes",
            Self::Nobits => "Program space with no data (bss)",
            Self::Rel => "Relocation entries, no addends",
            Self::Shlib => "Reserved",
            Self::Dynsym => "Dynamic linker symbol table",
            Self::InitArray => "Array of constructors",
            Self::FiniArray => "Array of destructors",
            Self::PreinitArray => "Array of pre-constructors",
            Self::Group => "Section group",
            Self::SymtabShndx => "Extended section indices",
            Self::Unknown(_) => "Undetermined",
        }
    }
}
