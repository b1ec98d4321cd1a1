// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Binary format for tinytz datasets.
//!
//! A dataset is small (the whole tz database is a few hundred KB) and read
//! once at startup, so the format optimizes for two things: it must be
//! compact enough to flash onto a device, and it must be impossible to load
//! a corrupt one. Letters are 5-bit packed, lengths and indices are varints,
//! transition starts are zigzag deltas. Every section is decoded into its
//! table and then the whole thing goes through [`Dataset::from_parts`], so a
//! file that decodes is a file that satisfies every load-time invariant.
//!
//! # Security Considerations
//!
//! Datasets may come from untrusted sources:
//! - File size and every count are checked against `MAX_*` limits before
//!   anything is allocated
//! - CRC32 footer detects corruption and truncation
//! - Every section must be consumed exactly; leftovers are an error
//! - Varint decoder has a maximum length
//!
//! # Format Overview (v1)
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────┐
//! │ HEADER (56 bytes)                                          │
//! │   magic: [u8; 4] = "TTZD"                                  │
//! │   version: u8 = 1                                          │
//! │   flags: u8 (bit 0: u16 token indices in names)            │
//! │   reserved: [u8; 2]                                        │
//! │   token/country/city/code/transition counts: 5 × u32       │
//! │   section byte lengths: 7 × u32                            │
//! ├────────────────────────────────────────────────────────────┤
//! │ 1. TOKENS          varint lengths, 5-bit letters           │
//! │ 2. COUNTRY_NAMES   varint lengths, u8/u16 token indices    │
//! │ 3. OFFICIAL_NAMES  varint lengths, u8/u16 token indices    │
//! │ 4. COUNTRY_CODES   2 × 5-bit per country                   │
//! │ 5. CITIES          varint lengths, 5-bit letters           │
//! │ 6. ZONE_CODES      5 × 5-bit per code, zero padded         │
//! │ 7. TRANSITIONS     varint zone, city, country;             │
//! │                    zigzag start delta; zigzag offset;      │
//! │                    u8 is_dst                               │
//! ├────────────────────────────────────────────────────────────┤
//! │ FOOTER (8 bytes): crc32 + magic "DZTT"                     │
//! └────────────────────────────────────────────────────────────┘
//! ```

mod encoding;
mod header;

pub use encoding::{
    decode_varint, encode_varint, pack_codes5, packed_codes5_len, unpack_codes5,
    zigzag_decode, zigzag_encode, ByteReader,
};
pub use header::{
    DatasetFooter, DatasetHeader, FormatFlags, SectionOffsets, FOOTER_MAGIC, MAGIC,
    MAX_ENTITY_COUNT, MAX_FILE_SIZE, MAX_TRANSITION_COUNT, MAX_VARINT_BYTES, VERSION,
};

use std::fs;
use std::io;
use std::path::Path;

use tracing::debug;

use crate::codec::{NameTable, PackedArray};
use crate::dataset::{Dataset, DatasetParts, COUNTRY_CODE_WIDTH, ZONE_CODE_WIDTH};
use crate::error::{DatasetError, Table};
use crate::types::{CityIdx, Code5, CountryIdx, EntityKind, Transition, ZoneIdx};

// ============================================================================
// SECTION ENCODING
// ============================================================================

fn encode_lengths(offsets: &[u32], buf: &mut Vec<u8>) {
    for w in offsets.windows(2) {
        encode_varint(u64::from(w[1] - w[0]), buf);
    }
}

fn encode_code_array(array: &PackedArray<Code5>, buf: &mut Vec<u8>) {
    encode_lengths(array.offsets(), buf);
    pack_codes5(array.data(), buf);
}

fn encode_name_table(names: &NameTable, wide: bool, buf: &mut Vec<u8>) {
    let entries: Vec<Vec<usize>> = (0..names.len())
        .map(|i| names.tokens(i).unwrap_or_default())
        .collect();
    for entry in &entries {
        encode_varint(entry.len() as u64, buf);
    }
    for token in entries.iter().flatten() {
        if wide {
            buf.extend_from_slice(&(*token as u16).to_le_bytes());
        } else {
            buf.push(*token as u8);
        }
    }
}

fn encode_fixed_codes<const N: usize>(codes: &[[Code5; N]], buf: &mut Vec<u8>) {
    let flat: Vec<Code5> = codes.iter().flatten().copied().collect();
    pack_codes5(&flat, buf);
}

fn encode_transitions(transitions: &[Transition], buf: &mut Vec<u8>) {
    let mut prev_start = 0i64;
    for t in transitions {
        encode_varint(t.zone.0.into(), buf);
        encode_varint(t.city.0.into(), buf);
        encode_varint(t.country.0.into(), buf);
        encode_varint(zigzag_encode(t.start.wrapping_sub(prev_start)), buf);
        encode_varint(zigzag_encode(t.offset_minutes.into()), buf);
        buf.push(u8::from(t.is_dst));
        prev_start = t.start;
    }
}

// ============================================================================
// SECTION DECODING
// ============================================================================

fn invalid(msg: String) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidData, msg)
}

/// `count` varint lengths, as an offset table.
fn read_offsets(r: &mut ByteReader<'_>, count: usize) -> io::Result<Vec<u32>> {
    let mut offsets = Vec::with_capacity(count + 1);
    let mut total = 0u32;
    offsets.push(total);
    for _ in 0..count {
        let len = u32::try_from(r.read_varint()?)
            .map_err(|_| invalid("entry length exceeds u32".into()))?;
        total = total
            .checked_add(len)
            .ok_or_else(|| invalid("entry lengths overflow".into()))?;
        offsets.push(total);
    }
    Ok(offsets)
}

fn finish(r: &ByteReader<'_>) -> Result<(), DatasetError> {
    match r.remaining() {
        0 => Ok(()),
        n => Err(DatasetError::TrailingBytes(n)),
    }
}

fn decode_code_array(
    table: Table,
    bytes: &[u8],
    count: usize,
) -> Result<PackedArray<Code5>, DatasetError> {
    let mut r = ByteReader::new(bytes);
    let offsets = read_offsets(&mut r, count)?;
    let total = offsets.last().copied().unwrap_or(0) as usize;
    let data = r.read_codes5(total)?;
    finish(&r)?;
    PackedArray::from_parts(table, data, offsets)
}

fn decode_name_table(
    table: Table,
    bytes: &[u8],
    count: usize,
    wide: bool,
) -> Result<NameTable, DatasetError> {
    let mut r = ByteReader::new(bytes);
    let offsets = read_offsets(&mut r, count)?;
    let total = offsets.last().copied().unwrap_or(0) as usize;
    let names = if wide {
        let raw = r.read_bytes(total.saturating_mul(2))?;
        let data = raw
            .chunks_exact(2)
            .map(|c| u16::from_le_bytes([c[0], c[1]]))
            .collect();
        NameTable::Wide(PackedArray::from_parts(table, data, offsets)?)
    } else {
        let data = r.read_bytes(total)?.to_vec();
        NameTable::Narrow(PackedArray::from_parts(table, data, offsets)?)
    };
    finish(&r)?;
    Ok(names)
}

fn decode_fixed_codes<const N: usize>(
    bytes: &[u8],
    count: usize,
) -> Result<Vec<[Code5; N]>, DatasetError> {
    let mut r = ByteReader::new(bytes);
    let flat = r.read_codes5(count * N)?;
    finish(&r)?;
    Ok(flat
        .chunks_exact(N)
        .map(|chunk| {
            let mut code = [Code5::SEPARATOR; N];
            code.copy_from_slice(chunk);
            code
        })
        .collect())
}

fn read_index(
    r: &mut ByteReader<'_>,
    position: usize,
    kind: EntityKind,
) -> Result<u16, DatasetError> {
    let raw = r.read_varint()?;
    u16::try_from(raw).map_err(|_| DatasetError::DanglingReference {
        position,
        kind,
        index: usize::try_from(raw).unwrap_or(usize::MAX),
    })
}

fn decode_transitions(bytes: &[u8], count: usize) -> Result<Vec<Transition>, DatasetError> {
    let mut r = ByteReader::new(bytes);
    // Six bytes is the smallest encoded transition
    let mut transitions = Vec::with_capacity(count.min(bytes.len() / 6));
    let mut prev_start = 0i64;
    for position in 0..count {
        let zone = ZoneIdx(read_index(&mut r, position, EntityKind::Zone)?);
        let city = CityIdx(read_index(&mut r, position, EntityKind::City)?);
        let country = CountryIdx(read_index(&mut r, position, EntityKind::Country)?);
        let start = prev_start.wrapping_add(r.read_zigzag()?);
        let offset = r.read_zigzag()?;
        let offset_minutes = i32::try_from(offset)
            .map_err(|_| invalid(format!("transition {}: offset {} out of range", position, offset)))?;
        let is_dst = match r.read_u8()? {
            0 => false,
            1 => true,
            other => {
                return Err(invalid(format!(
                    "transition {}: dst flag must be 0 or 1, got {}",
                    position, other
                ))
                .into())
            }
        };
        transitions.push(Transition {
            zone,
            city,
            country,
            start,
            offset_minutes,
            is_dst,
        });
        prev_start = start;
    }
    finish(&r)?;
    Ok(transitions)
}

fn slice_section<'a>(
    bytes: &'a [u8],
    offsets: &SectionOffsets,
    range: (usize, usize),
    name: &str,
) -> Result<&'a [u8], DatasetError> {
    offsets.slice(bytes, range).ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::UnexpectedEof,
            format!("{} section truncated", name),
        )
        .into()
    })
}

fn check_limit(what: &'static str, value: u32, max: usize) -> Result<usize, DatasetError> {
    let size = value as usize;
    if size > max {
        return Err(DatasetError::TooLarge { what, size, max });
    }
    Ok(size)
}

fn section_len(len: usize) -> Result<u32, DatasetError> {
    u32::try_from(len).map_err(|_| DatasetError::TooLarge {
        what: "section size",
        size: len,
        max: u32::MAX as usize,
    })
}

// ============================================================================
// DATASET I/O
// ============================================================================

/// Parse just the header, checking magic, version and footer integrity.
///
/// Cheap way to describe a file without decoding its tables.
pub fn read_header(bytes: &[u8]) -> Result<DatasetHeader, DatasetError> {
    if bytes.len() > MAX_FILE_SIZE {
        return Err(DatasetError::TooLarge {
            what: "file size",
            size: bytes.len(),
            max: MAX_FILE_SIZE,
        });
    }

    let min_size = DatasetHeader::SIZE + DatasetFooter::SIZE;
    if bytes.len() < min_size {
        return Err(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            format!("File too small: {} bytes (minimum {})", bytes.len(), min_size),
        )
        .into());
    }

    let mut magic = [0u8; 4];
    magic.copy_from_slice(&bytes[..4]);
    if magic != MAGIC {
        return Err(DatasetError::BadMagic(magic));
    }

    let footer = DatasetFooter::read(bytes)?;
    let content = &bytes[..bytes.len() - DatasetFooter::SIZE];
    let actual = DatasetFooter::compute_crc32(content);
    if footer.crc32 != actual {
        return Err(DatasetError::ChecksumMismatch {
            expected: footer.crc32,
            actual,
        });
    }

    let header = DatasetHeader::read(&mut &bytes[..])?;
    if header.version != VERSION {
        return Err(DatasetError::UnsupportedVersion(header.version));
    }
    Ok(header)
}

impl Dataset {
    /// Decode and validate a dataset.
    ///
    /// # Validation
    ///
    /// 1. File size is within [`MAX_FILE_SIZE`]
    /// 2. Header magic is "TTZD" and version is supported
    /// 3. Footer magic is "DZTT" and CRC32 matches
    /// 4. Counts are within limits, section lengths add up to the file
    /// 5. Each section decodes to exactly its byte length
    /// 6. Everything [`Dataset::from_parts`] checks
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, DatasetError> {
        let header = read_header(bytes)?;

        let token_count = check_limit("token count", header.token_count, MAX_ENTITY_COUNT)?;
        let country_count = check_limit("country count", header.country_count, MAX_ENTITY_COUNT)?;
        let city_count = check_limit("city count", header.city_count, MAX_ENTITY_COUNT)?;
        let code_count = check_limit("zone code count", header.code_count, MAX_ENTITY_COUNT)?;
        let transition_count = check_limit(
            "transition count",
            header.transition_count,
            MAX_TRANSITION_COUNT,
        )?;

        let offsets = header.section_offsets();
        let content_len = bytes.len() - DatasetFooter::SIZE;
        if offsets.content_size() < content_len {
            return Err(DatasetError::TrailingBytes(content_len - offsets.content_size()));
        }
        if offsets.content_size() > content_len {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                format!(
                    "Section lengths mismatch: header claims {} bytes, got {} bytes",
                    offsets.content_size(),
                    content_len
                ),
            )
            .into());
        }

        let section =
            |range: (usize, usize), name: &'static str| slice_section(bytes, &offsets, range, name);

        let wide = header.flags.has_wide_names();
        let parts = DatasetParts {
            tokens: decode_code_array(Table::Tokens, section(offsets.tokens, "Tokens")?, token_count)?,
            country_names: decode_name_table(
                Table::CountryNames,
                section(offsets.country_names, "Country names")?,
                country_count,
                wide,
            )?,
            official_names: decode_name_table(
                Table::OfficialNames,
                section(offsets.official_names, "Official names")?,
                country_count,
                wide,
            )?,
            country_codes: decode_fixed_codes::<COUNTRY_CODE_WIDTH>(
                section(offsets.country_codes, "Country codes")?,
                country_count,
            )?,
            cities: decode_code_array(Table::Cities, section(offsets.cities, "Cities")?, city_count)?,
            zone_codes: decode_fixed_codes::<ZONE_CODE_WIDTH>(
                section(offsets.zone_codes, "Zone codes")?,
                code_count,
            )?,
            transitions: decode_transitions(
                section(offsets.transitions, "Transitions")?,
                transition_count,
            )?,
        };

        debug!(bytes = bytes.len(), wide, "decoded dataset sections");
        Dataset::from_parts(parts)
    }

    /// Read and decode a dataset file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, DatasetError> {
        let path = path.as_ref();
        let bytes = fs::read(path)?;
        debug!(path = %path.display(), bytes = bytes.len(), "loading dataset");
        Self::from_bytes(&bytes)
    }

    /// Serialize to bytes (with CRC32 footer).
    pub fn to_bytes(&self) -> Result<Vec<u8>, DatasetError> {
        let wide = self.country_names.is_wide() || self.official_names.is_wide();

        let mut tokens = Vec::new();
        encode_code_array(&self.tokens, &mut tokens);
        let mut country_names = Vec::new();
        encode_name_table(&self.country_names, wide, &mut country_names);
        let mut official_names = Vec::new();
        encode_name_table(&self.official_names, wide, &mut official_names);
        let mut country_codes = Vec::new();
        encode_fixed_codes(&self.country_codes, &mut country_codes);
        let mut cities = Vec::new();
        encode_code_array(&self.cities, &mut cities);
        let mut zone_codes = Vec::new();
        encode_fixed_codes(&self.zone_codes, &mut zone_codes);
        let mut transitions = Vec::new();
        encode_transitions(&self.transitions, &mut transitions);

        let flags = if wide {
            FormatFlags::new().with_wide_names()
        } else {
            FormatFlags::new()
        };

        // Counts are bounded by from_parts, lengths are checked here
        let header = DatasetHeader {
            version: VERSION,
            flags,
            token_count: self.token_count() as u32,
            country_count: self.country_count() as u32,
            city_count: self.city_count() as u32,
            code_count: self.zone_count() as u32,
            transition_count: self.transitions.len() as u32,
            tokens_len: section_len(tokens.len())?,
            country_names_len: section_len(country_names.len())?,
            official_names_len: section_len(official_names.len())?,
            country_codes_len: section_len(country_codes.len())?,
            cities_len: section_len(cities.len())?,
            zone_codes_len: section_len(zone_codes.len())?,
            transitions_len: section_len(transitions.len())?,
        };

        let offsets = header.section_offsets();
        let mut buf = Vec::with_capacity(offsets.total_size());
        header.write(&mut buf)?;
        for section in [
            &tokens,
            &country_names,
            &official_names,
            &country_codes,
            &cities,
            &zone_codes,
            &transitions,
        ] {
            buf.extend_from_slice(section);
        }

        let crc32 = DatasetFooter::compute_crc32(&buf);
        DatasetFooter { crc32 }.write(&mut buf)?;

        if buf.len() > MAX_FILE_SIZE {
            return Err(DatasetError::TooLarge {
                what: "file size",
                size: buf.len(),
                max: MAX_FILE_SIZE,
            });
        }
        Ok(buf)
    }

    /// Serialize and write to `path`.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), DatasetError> {
        let path = path.as_ref();
        let bytes = self.to_bytes()?;
        fs::write(path, &bytes)?;
        debug!(path = %path.display(), bytes = bytes.len(), "saved dataset");
        Ok(())
    }
}
