//! ELF object-file header dump CLI.

use clap::Parser;
use elf::{ElfHeader, ProgramHeaderEntry, SectionHeaderEntry};
use std::fs::File;
use std::io::BufReader;
use std::process::ExitCode;

/// Decode and print an ELF object file's header, first program
/// header, and first section header.
#[derive(Parser)]
#[command(name = "elf-dump")]
struct Args {
    /// Path to the ELF object file to inspect.
    #[arg(default_value = "a.out")]
    path: std::path::PathBuf,
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("elf-dump: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<(), elf::ElfError> {
    let file = File::open(&args.path)?;
    let mut reader = BufReader::new(file);

    let header = ElfHeader::read_from(&mut reader)?;
    print_header(&header);

    if header.program_header_count > 0 {
        let ph = ProgramHeaderEntry::read_at(&mut reader, &header, 0)?;
        print_program_header(&ph);
    }

    if header.section_header_count > 0 {
        let sh = SectionHeaderEntry::read_at(&mut reader, &header, 0)?;
        print_section_header(&sh);
    }

    Ok(())
}

fn print_header(header: &ElfHeader) {
    println!("ELF header table");
    println!(
        "Endianness: {}",
        if header.little_endian { "Little Endian" } else { "Big Endian" }
    );
    println!("Is ELF original version: {}", header.version_is_original);
    println!("Abi os: {:?}", header.abi_os);
    println!("Abi version: {:#x}", header.abi_version);
    println!("Class: {:?}", header.class);
    println!("Type: {}", header.object_type.describe());
    println!("Isa: {:?}", header.isa);
    println!("Elf header size: {:#x}", header.elf_header_size);
    println!("Program header size: {:#x}", header.program_header_entry_size);
    println!("Number of program header entries: {:#x}", header.program_header_count);
    println!("Section header size: {:#x}", header.section_header_entry_size);
    println!("Number of section header entries: {:#x}", header.section_header_count);
    println!("Section header string index: {:#x}", header.section_header_string_index);
    println!("Flags: {:#x}", header.flags);
    println!("Entry point offset: {:#x}", header.entry_point);
    println!("Program header offset: {:#x}", header.program_header_offset);
    println!("Section header offset: {:#x}", header.section_header_offset);
}

fn print_program_header(ph: &ProgramHeaderEntry) {
    println!();
    println!("Program header table information");
    println!("Type segment: {}", ph.segment_type.describe());
    println!("Flags: {:#x}", ph.flags);
    println!("Offset of the segment in the file image: {:#x}", ph.file_offset);
    println!("Virtual address of the segment in memory: {:#x}", ph.virtual_address);
    println!("Physical address of the segment in memory: {:#x}", ph.physical_address);
    println!("File image size: {:#x}", ph.file_size);
    println!("Size of segment in memory: {:#x}", ph.memory_size);
    println!("Alignment: {:#x}", ph.alignment);
}

fn print_section_header(sh: &SectionHeaderEntry) {
    println!();
    println!("Section header information");
    println!("Name offset: {:#x}", sh.name_offset);
    println!("Type: {}", sh.section_type.describe());
    println!("Flags: {:#x}", sh.flags);
    println!("Address: {:#x}", sh.address);
    println!("Offset: {:#x}", sh.file_offset);
    println!("Size: {:#x}", sh.size);
    println!("Link: {:#x}", sh.link);
    println!("Info: {:#x}", sh.info);
    println!("Address alignment: {:#x}", sh.address_alignment);
    println!("Entry size: {:#x}", sh.entry_size);
}
