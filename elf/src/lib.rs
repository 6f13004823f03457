//! ELF32/ELF64 object-file decoding: header, program headers, and
//! section headers, plus the closed-set classifiers for the fields
//! that name an OS/ABI, ISA, object type, segment type, or section
//! type.
//!
//! Every multi-byte field is read directly in the file's declared
//! endianness — there is no post-parse byte swap anywhere in this
//! crate (see `bytes` module docs for why that matters).

mod bytes;
mod class;
mod classifiers;
mod error;
mod header;
mod program_header;
mod section_header;

pub use class::ElfClass;
pub use classifiers::{AbiOs, Isa, ObjectType, SectionType, SegmentType};
pub use error::ElfError;
pub use header::ElfHeader;
pub use program_header::ProgramHeaderEntry;
pub use section_header::SectionHeaderEntry;
