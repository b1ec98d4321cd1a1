// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Dataset file header and footer.
//!
//! The header is 56 bytes of fixed-size fields: entity counts first, then the
//! byte length of every section. Parse it once and you know where everything
//! lives and how big each table must come out.
//!
//! The footer is 8 bytes: a CRC32 over everything before it, plus "DZTT" (the
//! header magic reversed). A bad footer means truncation or corruption, and
//! nothing after the header gets decoded.

use std::io::{self, Read, Write};

use crc32fast::Hasher as Crc32Hasher;

// ============================================================================
// CONSTANTS
// ============================================================================

/// Magic bytes: "TTZD" in ASCII (header)
pub const MAGIC: [u8; 4] = [0x54, 0x54, 0x5A, 0x44];

/// Footer magic: "DZTT" (reversed, marks valid file end)
pub const FOOTER_MAGIC: [u8; 4] = [0x44, 0x5A, 0x54, 0x54];

/// Current format version
pub const VERSION: u8 = 1;

// ============================================================================
// SECURITY LIMITS (prevent resource exhaustion from malicious input)
// ============================================================================

/// Maximum file size: 16 MB. The full tz database packs into well under 1 MB.
pub const MAX_FILE_SIZE: usize = 16 * 1024 * 1024;

/// Maximum entries per entity table (indices are u16).
pub const MAX_ENTITY_COUNT: usize = u16::MAX as usize;

/// Maximum number of transitions
pub const MAX_TRANSITION_COUNT: usize = 4_000_000;

/// Maximum varint bytes (u64 needs at most 10 bytes)
pub const MAX_VARINT_BYTES: usize = 10;

// ============================================================================
// FLAGS
// ============================================================================

/// Format flags
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FormatFlags(pub(crate) u8);

impl FormatFlags {
    /// Name tables store u16 token indices instead of u8.
    pub const WIDE_NAMES: u8 = 0b0000_0001;

    pub fn new() -> Self {
        Self(0)
    }

    pub fn with_wide_names(mut self) -> Self {
        self.0 |= Self::WIDE_NAMES;
        self
    }

    pub fn has_wide_names(self) -> bool {
        self.0 & Self::WIDE_NAMES != 0
    }
}

// ============================================================================
// HEADER
// ============================================================================

/// Binary dataset header (56 bytes fixed size)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DatasetHeader {
    pub version: u8,
    pub flags: FormatFlags,
    pub token_count: u32,
    pub country_count: u32,
    pub city_count: u32,
    pub code_count: u32,
    pub transition_count: u32,
    pub tokens_len: u32,
    pub country_names_len: u32,
    pub official_names_len: u32,
    pub country_codes_len: u32,
    pub cities_len: u32,
    pub zone_codes_len: u32,
    pub transitions_len: u32,
}

impl DatasetHeader {
    // 4 (magic) + 1 (version) + 1 (flags) + 2 (reserved) + 12*4 (u32s) = 56
    pub const SIZE: usize = 56;

    /// Compute section byte offsets for this header.
    pub fn section_offsets(&self) -> SectionOffsets {
        SectionOffsets::from_header(self)
    }

    pub fn write<W: Write>(&self, w: &mut W) -> io::Result<()> {
        w.write_all(&MAGIC)?;
        w.write_all(&[self.version])?;
        w.write_all(&[self.flags.0])?;
        w.write_all(&[0u8; 2])?; // reserved
        for value in [
            self.token_count,
            self.country_count,
            self.city_count,
            self.code_count,
            self.transition_count,
            self.tokens_len,
            self.country_names_len,
            self.official_names_len,
            self.country_codes_len,
            self.cities_len,
            self.zone_codes_len,
            self.transitions_len,
        ] {
            w.write_all(&value.to_le_bytes())?;
        }
        Ok(())
    }

    /// Read a header. Magic is checked here; version is the caller's call.
    pub fn read<R: Read>(r: &mut R) -> io::Result<Self> {
        let mut magic = [0u8; 4];
        r.read_exact(&mut magic)?;
        if magic != MAGIC {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("Invalid magic: expected TTZD, got {:?}", magic),
            ));
        }

        let mut buf = [0u8; 52]; // 56 - 4 (magic) = 52
        r.read_exact(&mut buf)?;

        let word = |i: usize| {
            let at = 4 + i * 4;
            u32::from_le_bytes([buf[at], buf[at + 1], buf[at + 2], buf[at + 3]])
        };

        Ok(Self {
            version: buf[0],
            flags: FormatFlags(buf[1]),
            // buf[2..4] is reserved
            token_count: word(0),
            country_count: word(1),
            city_count: word(2),
            code_count: word(3),
            transition_count: word(4),
            tokens_len: word(5),
            country_names_len: word(6),
            official_names_len: word(7),
            country_codes_len: word(8),
            cities_len: word(9),
            zone_codes_len: word(10),
            transitions_len: word(11),
        })
    }
}

// ============================================================================
// SECTION OFFSETS
// ============================================================================

/// Section byte offsets for the file layout.
///
/// Every reader and writer goes through this struct, so the section order is
/// written down exactly once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionOffsets {
    pub tokens: (usize, usize),
    pub country_names: (usize, usize),
    pub official_names: (usize, usize),
    pub country_codes: (usize, usize),
    pub cities: (usize, usize),
    pub zone_codes: (usize, usize),
    pub transitions: (usize, usize),
    pub footer: (usize, usize),
}

impl SectionOffsets {
    /// Layout order:
    /// 1. HEADER         [56B]
    /// 2. TOKENS         - needed by both name tables
    /// 3. COUNTRY_NAMES
    /// 4. OFFICIAL_NAMES
    /// 5. COUNTRY_CODES
    /// 6. CITIES
    /// 7. ZONE_CODES
    /// 8. TRANSITIONS    - references cities, codes and countries
    /// 9. FOOTER         [8B]
    pub fn from_header(h: &DatasetHeader) -> Self {
        let mut pos = DatasetHeader::SIZE;
        let mut next = |len: u32| {
            let start = pos;
            pos += len as usize;
            (start, pos)
        };

        let tokens = next(h.tokens_len);
        let country_names = next(h.country_names_len);
        let official_names = next(h.official_names_len);
        let country_codes = next(h.country_codes_len);
        let cities = next(h.cities_len);
        let zone_codes = next(h.zone_codes_len);
        let transitions = next(h.transitions_len);
        let footer = next(DatasetFooter::SIZE as u32);

        Self {
            tokens,
            country_names,
            official_names,
            country_codes,
            cities,
            zone_codes,
            transitions,
            footer,
        }
    }

    /// Expected content size (everything before footer)
    pub fn content_size(&self) -> usize {
        self.footer.0
    }

    /// Total file size including footer
    pub fn total_size(&self) -> usize {
        self.footer.1
    }

    /// Get a slice for a section from the bytes
    #[inline]
    pub fn slice<'a>(&self, bytes: &'a [u8], section: (usize, usize)) -> Option<&'a [u8]> {
        bytes.get(section.0..section.1)
    }
}

// ============================================================================
// FOOTER (8 bytes)
// ============================================================================

/// Footer with CRC32 checksum and magic number
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DatasetFooter {
    /// CRC32 checksum of header + all sections (everything before footer)
    pub crc32: u32,
}

impl DatasetFooter {
    pub const SIZE: usize = 8; // 4 bytes CRC32 + 4 bytes magic

    pub fn write<W: Write>(&self, w: &mut W) -> io::Result<()> {
        w.write_all(&self.crc32.to_le_bytes())?;
        w.write_all(&FOOTER_MAGIC)?;
        Ok(())
    }

    pub fn read(bytes: &[u8]) -> io::Result<Self> {
        if bytes.len() < Self::SIZE {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "File too short for footer",
            ));
        }

        let footer_start = bytes.len() - Self::SIZE;

        let magic = &bytes[footer_start + 4..];
        if magic != FOOTER_MAGIC {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("Invalid footer magic: expected DZTT, got {:?}", magic),
            ));
        }

        let crc32 = u32::from_le_bytes([
            bytes[footer_start],
            bytes[footer_start + 1],
            bytes[footer_start + 2],
            bytes[footer_start + 3],
        ]);

        Ok(Self { crc32 })
    }

    /// Compute CRC32 over the given bytes
    pub fn compute_crc32(data: &[u8]) -> u32 {
        let mut hasher = Crc32Hasher::new();
        hasher.update(data);
        hasher.finalize()
    }
}
