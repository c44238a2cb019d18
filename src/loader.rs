//! Executable image parsing and loading.
//!
//! Grounded on `riscvemu::elf_utils::load_elf`, which likewise parses
//! a header and section table once at load time and is never consulted
//! again afterward (spec.md §3's "Lifecycle": "no reference to the
//! file persists"). Unlike the teacher, this format isn't ELF — it's
//! the small custom container spec.md §6 defines — so the `elf` crate
//! the teacher depends on has no role here; the parsing is a handful
//! of direct byte reads, grounded on `original_source/main.c`'s
//! `getHeader` and its section-table loop.

use crate::memory::{MemoryImage, DATA_BASE, PROGRAM_BASE};
use crate::trap::LoadError;

const MAGIC: [u8; 4] = [0x10, b'L', b'E', b'F'];
/// Size in bytes of the file header (spec.md §6).
const HEADER_SIZE: u32 = 15;
/// Size in bytes of a single section header.
///
/// spec.md's prose labels this "15 bytes" but then lists fields
/// (`name:u16, type:u8, address:u32, size:u32`) that sum to 11 — the
/// 15-byte figure is judged a copy-paste artifact from the file
/// header (which genuinely is 15 bytes). The unambiguous field list is
/// what's implemented; see DESIGN.md.
const SECTION_HEADER_SIZE: usize = 11;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SectionType {
    Null,
    Exec,
    Strtab,
    Alloc,
}

impl SectionType {
    fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(SectionType::Null),
            1 => Some(SectionType::Exec),
            2 => Some(SectionType::Strtab),
            3 => Some(SectionType::Alloc),
            _ => None,
        }
    }
}

struct FileHeader {
    entry: u32,
    sh_addr: u32,
    sh_count: u8,
}

struct SectionHeader {
    kind: SectionType,
    address: u32,
    size: u32,
}

fn require(bytes: &[u8], end: usize) -> Result<(), LoadError> {
    if bytes.len() < end {
        Err(LoadError::Truncated)
    } else {
        Ok(())
    }
}

fn read_u8(bytes: &[u8], offset: usize) -> Result<u8, LoadError> {
    require(bytes, offset + 1)?;
    Ok(bytes[offset])
}

fn read_u16_be(bytes: &[u8], offset: usize) -> Result<u16, LoadError> {
    require(bytes, offset + 2)?;
    Ok(u16::from_be_bytes(bytes[offset..offset + 2].try_into().unwrap()))
}

fn read_u32_be(bytes: &[u8], offset: usize) -> Result<u32, LoadError> {
    require(bytes, offset + 4)?;
    Ok(u32::from_be_bytes(bytes[offset..offset + 4].try_into().unwrap()))
}

fn parse_header(bytes: &[u8]) -> Result<FileHeader, LoadError> {
    require(bytes, HEADER_SIZE as usize)?;
    if bytes[0..4] != MAGIC {
        return Err(LoadError::BadMagic);
    }
    let entry = read_u32_be(bytes, 6)?;
    let sh_addr = read_u32_be(bytes, 10)?;
    let sh_count = read_u8(bytes, 14)?;
    Ok(FileHeader {
        entry,
        sh_addr,
        sh_count,
    })
}

fn parse_section_header(bytes: &[u8], offset: usize) -> Result<SectionHeader, LoadError> {
    let _name = read_u16_be(bytes, offset)?;
    let kind = read_u8(bytes, offset + 2)?;
    let address = read_u32_be(bytes, offset + 3)?;
    let size = read_u32_be(bytes, offset + 7)?;
    let kind = SectionType::from_u8(kind).ok_or(LoadError::Truncated)?;
    Ok(SectionHeader { kind, address, size })
}

fn section_payload(bytes: &[u8], section: &SectionHeader) -> Result<&[u8], LoadError> {
    let start = section.address as usize;
    let end = start + section.size as usize;
    require(bytes, end)?;
    Ok(&bytes[start..end])
}

/// Parse `bytes` as a Lite MIPS executable image, populate `image`'s
/// program and data regions, and return the initial program counter
/// (relative to `PROGRAM_BASE`, per spec.md §4.6 step 4).
pub fn load(image: &mut MemoryImage, bytes: &[u8]) -> Result<u32, LoadError> {
    let header = parse_header(bytes)?;

    let mut sections = Vec::with_capacity(header.sh_count as usize);
    for n in 0..header.sh_count as usize {
        let offset = header.sh_addr as usize + n * SECTION_HEADER_SIZE;
        sections.push(parse_section_header(bytes, offset)?);
    }

    let mut program_cursor = PROGRAM_BASE;
    let mut data_cursor = DATA_BASE;

    for section in &sections {
        match section.kind {
            SectionType::Null => {}
            SectionType::Exec => {
                let payload = section_payload(bytes, section)?;
                for chunk in payload.chunks_exact(4) {
                    let word = u32::from_be_bytes(chunk.try_into().unwrap());
                    image.write_word(program_cursor, word);
                    program_cursor += 4;
                }
            }
            SectionType::Alloc => {
                let payload = section_payload(bytes, section)?;
                for &byte in payload {
                    image.write_byte(data_cursor, byte);
                    data_cursor += 1;
                }
            }
            SectionType::Strtab => {
                let payload = section_payload(bytes, section)?;
                let trimmed = if payload.len() >= 2 {
                    &payload[1..payload.len() - 1]
                } else {
                    &[]
                };
                for &byte in trimmed {
                    image.write_byte(data_cursor, byte);
                    data_cursor += 1;
                }
            }
        }
    }

    Ok(header.entry.wrapping_sub(HEADER_SIZE))
}
