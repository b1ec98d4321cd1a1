// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Error types.
//!
//! Two families. [`ResolveError`] is what a query can legitimately produce at
//! runtime: nothing applies yet, the caller passed a bad index, or the answer
//! is ambiguous. [`DatasetError`] is what a malformed dataset produces at
//! load time. Once a [`Dataset`](crate::Dataset) exists, none of the latter
//! can happen again.

use std::fmt;
use std::io;

use crate::types::{CountryIdx, EntityKind};

/// Why an offset could not be resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    /// No transition for the key started before the requested time.
    NoMatch,
    /// The index is outside the table it claims to address.
    InvalidIndex {
        kind: EntityKind,
        index: usize,
        count: usize,
    },
    /// The country has more than one active city, so there is no single offset.
    MultiZones { country: CountryIdx },
}

impl fmt::Display for ResolveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolveError::NoMatch => write!(f, "no transition applies at the given time"),
            ResolveError::InvalidIndex { kind, index, count } => {
                write!(f, "{} index {} >= {} count {}", kind, index, kind, count)
            }
            ResolveError::MultiZones { country } => {
                write!(f, "country {} spans multiple zones", country)
            }
        }
    }
}

impl std::error::Error for ResolveError {}

/// Which table a load-time error was found in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Table {
    Tokens,
    CountryNames,
    OfficialNames,
    CountryCodes,
    Cities,
    ZoneCodes,
    Transitions,
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Table::Tokens => "tokens",
            Table::CountryNames => "country names",
            Table::OfficialNames => "official names",
            Table::CountryCodes => "country codes",
            Table::Cities => "cities",
            Table::ZoneCodes => "zone codes",
            Table::Transitions => "transitions",
        })
    }
}

/// A dataset that cannot be trusted.
#[derive(Debug)]
pub enum DatasetError {
    /// Reading or decoding bytes failed (truncation, bad varint, file I/O).
    Io(io::Error),
    /// First four bytes are not `TTZD`.
    BadMagic([u8; 4]),
    UnsupportedVersion(u8),
    /// Footer CRC32 disagrees with the content.
    ChecksumMismatch { expected: u32, actual: u32 },
    /// A count or size is beyond the security limits.
    TooLarge { what: &'static str, size: usize, max: usize },
    /// Offset table entries decrease, or its length disagrees with the entries.
    BadOffsets { table: Table, position: usize },
    /// A 5-bit code is out of range, or a fixed code holds a non-letter.
    BadCode { table: Table, position: usize, value: u8 },
    /// A name, city or token renders as nothing.
    EmptyEntry { table: Table, entry: usize },
    /// Entry `entry` repeats the code of an earlier entry.
    DuplicateCode { table: Table, entry: usize },
    /// A name references a token that doesn't exist.
    DanglingToken { table: Table, entry: usize, token: usize },
    /// A transition references a row that doesn't exist.
    DanglingReference { position: usize, kind: EntityKind, index: usize },
    /// Transition `position` starts before transition `position - 1`.
    UnsortedTransitions { position: usize },
    /// Two tables that must line up have different lengths.
    LengthMismatch { table: Table, expected: usize, actual: usize },
    /// Bytes remain after the last section.
    TrailingBytes(usize),
}

impl fmt::Display for DatasetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DatasetError::Io(e) => write!(f, "{}", e),
            DatasetError::BadMagic(magic) => {
                write!(f, "invalid magic: expected TTZD, got {:?}", magic)
            }
            DatasetError::UnsupportedVersion(v) => write!(f, "unsupported dataset version {}", v),
            DatasetError::ChecksumMismatch { expected, actual } => write!(
                f,
                "checksum mismatch: footer says {:08x}, content is {:08x}",
                expected, actual
            ),
            DatasetError::TooLarge { what, size, max } => {
                write!(f, "{} {} exceeds limit {}", what, size, max)
            }
            DatasetError::BadOffsets { table, position } => {
                write!(f, "{}: offset table broken at position {}", table, position)
            }
            DatasetError::BadCode {
                table,
                position,
                value,
            } => write!(f, "{}: invalid code {} at position {}", table, value, position),
            DatasetError::EmptyEntry { table, entry } => {
                write!(f, "{}: entry {} is empty", table, entry)
            }
            DatasetError::DuplicateCode { table, entry } => {
                write!(f, "{}: entry {} duplicates an earlier code", table, entry)
            }
            DatasetError::DanglingToken {
                table,
                entry,
                token,
            } => write!(f, "{}: entry {} references missing token {}", table, entry, token),
            DatasetError::DanglingReference {
                position,
                kind,
                index,
            } => write!(
                f,
                "transition {} references missing {} {}",
                position, kind, index
            ),
            DatasetError::UnsortedTransitions { position } => write!(
                f,
                "transitions not sorted by start at position {}",
                position
            ),
            DatasetError::LengthMismatch {
                table,
                expected,
                actual,
            } => write!(f, "{}: expected {} entries, got {}", table, expected, actual),
            DatasetError::TrailingBytes(n) => write!(f, "{} unexpected bytes after last section", n),
        }
    }
}

impl std::error::Error for DatasetError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DatasetError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for DatasetError {
    fn from(e: io::Error) -> Self {
        DatasetError::Io(e)
    }
}
