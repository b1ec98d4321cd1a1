// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Offset-indexed arrays.

use crate::error::{DatasetError, Table};
use crate::types::{Code5, TokenIdx};

/// Many variable-length entries stored back to back.
///
/// # Invariants
/// - `offsets.len() == len() + 1`
/// - `offsets[i] <= offsets[i + 1]`
/// - `offsets[len()] == data.len()`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackedArray<W> {
    data: Vec<W>,
    offsets: Vec<u32>,
}

impl<W: Copy> PackedArray<W> {
    /// Wrap raw parts, checking the offset invariants.
    pub fn from_parts(table: Table, data: Vec<W>, offsets: Vec<u32>) -> Result<Self, DatasetError> {
        let Some(&last) = offsets.last() else {
            return Err(DatasetError::BadOffsets { table, position: 0 });
        };
        if let Some(position) = offsets.windows(2).position(|w| w[0] > w[1]) {
            return Err(DatasetError::BadOffsets {
                table,
                position: position + 1,
            });
        }
        if last as usize != data.len() {
            return Err(DatasetError::BadOffsets {
                table,
                position: offsets.len() - 1,
            });
        }
        Ok(Self { data, offsets })
    }

    /// Pack a list of entries. Offsets are derived, so the invariants hold by
    /// construction.
    pub fn from_entries<I, E>(entries: I) -> Self
    where
        I: IntoIterator<Item = E>,
        E: AsRef<[W]>,
    {
        let mut data = Vec::new();
        let mut offsets = vec![0u32];
        for entry in entries {
            data.extend_from_slice(entry.as_ref());
            offsets.push(data.len() as u32);
        }
        Self { data, offsets }
    }

    /// Number of entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.offsets.len() - 1
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Entry `idx`, or `None` past the end.
    #[inline]
    pub fn get(&self, idx: usize) -> Option<&[W]> {
        let start = *self.offsets.get(idx)? as usize;
        let end = *self.offsets.get(idx + 1)? as usize;
        self.data.get(start..end)
    }

    /// Length of entry `idx` in elements.
    #[inline]
    pub fn entry_len(&self, idx: usize) -> Option<usize> {
        self.get(idx).map(<[W]>::len)
    }

    pub fn iter(&self) -> impl Iterator<Item = &[W]> + '_ {
        self.offsets
            .windows(2)
            .map(|w| &self.data[w[0] as usize..w[1] as usize])
    }

    pub fn data(&self) -> &[W] {
        &self.data
    }

    pub fn offsets(&self) -> &[u32] {
        &self.offsets
    }
}

/// An element of a token-indexed name: something that names a token.
pub trait TokenRef: Copy {
    fn token(self) -> usize;
}

impl TokenRef for u8 {
    #[inline]
    fn token(self) -> usize {
        self as usize
    }
}

impl TokenRef for u16 {
    #[inline]
    fn token(self) -> usize {
        self as usize
    }
}

/// Token-indexed names, one byte per token when the token table allows it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NameTable {
    Narrow(PackedArray<u8>),
    Wide(PackedArray<u16>),
}

impl NameTable {
    /// Largest token table a narrow name table can address.
    pub const NARROW_LIMIT: usize = u8::MAX as usize + 1;

    /// Pack names, choosing the narrow layout when every token fits in a byte.
    pub fn from_names(names: &[Vec<TokenIdx>], token_count: usize) -> Self {
        if token_count <= Self::NARROW_LIMIT {
            NameTable::Narrow(PackedArray::from_entries(
                names
                    .iter()
                    .map(|name| name.iter().map(|t| t.0 as u8).collect::<Vec<_>>()),
            ))
        } else {
            NameTable::Wide(PackedArray::from_entries(
                names
                    .iter()
                    .map(|name| name.iter().map(|t| t.0).collect::<Vec<_>>()),
            ))
        }
    }

    pub fn len(&self) -> usize {
        match self {
            NameTable::Narrow(a) => a.len(),
            NameTable::Wide(a) => a.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_wide(&self) -> bool {
        matches!(self, NameTable::Wide(_))
    }

    /// Token indices of entry `idx`.
    pub fn tokens(&self, idx: usize) -> Option<Vec<usize>> {
        match self {
            NameTable::Narrow(a) => a.get(idx).map(|e| e.iter().map(|t| t.token()).collect()),
            NameTable::Wide(a) => a.get(idx).map(|e| e.iter().map(|t| t.token()).collect()),
        }
    }

    /// First `(entry, token)` pair whose token is `>= token_count`.
    pub(crate) fn find_dangling(&self, token_count: usize) -> Option<(usize, usize)> {
        fn scan<T: TokenRef>(a: &PackedArray<T>, token_count: usize) -> Option<(usize, usize)> {
            a.iter().enumerate().find_map(|(entry, tokens)| {
                tokens
                    .iter()
                    .map(|t| t.token())
                    .find(|&t| t >= token_count)
                    .map(|t| (entry, t))
            })
        }
        match self {
            NameTable::Narrow(a) => scan(a, token_count),
            NameTable::Wide(a) => scan(a, token_count),
        }
    }

    /// First entry with no tokens.
    pub(crate) fn find_empty(&self) -> Option<usize> {
        match self {
            NameTable::Narrow(a) => a.iter().position(<[u8]>::is_empty),
            NameTable::Wide(a) => a.iter().position(<[u16]>::is_empty),
        }
    }

    /// Render entry `idx` by spelling out each token. Returns the number of
    /// bytes appended.
    pub fn render_into(
        &self,
        idx: usize,
        tokens: &PackedArray<Code5>,
        out: &mut String,
    ) -> Option<usize> {
        match self {
            NameTable::Narrow(a) => super::render_tokens(a.get(idx)?, tokens, out),
            NameTable::Wide(a) => super::render_tokens(a.get(idx)?, tokens, out),
        }
    }
}
