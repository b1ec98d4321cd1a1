// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Binary encoding primitives: varint, zigzag, and 5-bit packing.
//!
//! Varints for lengths and indices that are almost always small. Zigzag on top
//! for the signed values (start deltas, offsets in minutes). Letters are five
//! bits each, so eight of them fit in five bytes instead of eight.
//!
//! # References
//!
//! - **Varint (LEB128)**: Little-endian base-128 variable-length integer encoding.
//!   See Google Protocol Buffers encoding: <https://protobuf.dev/programming-guides/encoding/>
//! - **Zigzag**: maps signed integers to unsigned so small magnitudes stay small,
//!   same page as above.

use std::io;

use super::header::MAX_VARINT_BYTES;
use crate::types::Code5;

// ============================================================================
// VARINT ENCODING
// ============================================================================

/// Encode a varint to bytes
pub fn encode_varint(mut value: u64, buf: &mut Vec<u8>) {
    loop {
        let byte = (value & 0x7F) as u8;
        value >>= 7;
        if value == 0 {
            buf.push(byte);
            break;
        } else {
            buf.push(byte | 0x80);
        }
    }
}

/// Decode a varint from bytes, returning (value, bytes_consumed)
///
/// Returns an error if:
/// - Buffer is empty
/// - Varint exceeds MAX_VARINT_BYTES (malformed/malicious input)
pub fn decode_varint(bytes: &[u8]) -> io::Result<(u64, usize)> {
    if bytes.is_empty() {
        return Err(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            "Empty buffer for varint",
        ));
    }

    let mut result: u64 = 0;
    let mut shift = 0;
    let mut i = 0;

    while i < bytes.len() && i < MAX_VARINT_BYTES {
        let byte = bytes[i];
        result |= ((byte & 0x7F) as u64) << shift;
        i += 1;
        if byte & 0x80 == 0 {
            return Ok((result, i));
        }
        shift += 7;
    }

    if i >= MAX_VARINT_BYTES {
        Err(io::Error::new(
            io::ErrorKind::InvalidData,
            "Varint exceeds maximum length (possible corruption)",
        ))
    } else {
        Err(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            "Incomplete varint",
        ))
    }
}

/// Map a signed value onto unsigned: 0, -1, 1, -2, ... → 0, 1, 2, 3, ...
#[inline]
pub fn zigzag_encode(value: i64) -> u64 {
    ((value << 1) ^ (value >> 63)) as u64
}

#[inline]
pub fn zigzag_decode(value: u64) -> i64 {
    ((value >> 1) as i64) ^ -((value & 1) as i64)
}

// ============================================================================
// 5-BIT PACKING
// ============================================================================

/// Pack 5-bit codes LSB-first. `n` codes take `ceil(5n / 8)` bytes.
pub fn pack_codes5(codes: &[Code5], buf: &mut Vec<u8>) {
    let mut acc: u32 = 0;
    let mut bits = 0;
    for code in codes {
        acc |= u32::from(code.value()) << bits;
        bits += 5;
        while bits >= 8 {
            buf.push(acc as u8);
            acc >>= 8;
            bits -= 8;
        }
    }
    if bits > 0 {
        buf.push(acc as u8);
    }
}

/// Bytes needed to pack `count` 5-bit codes.
#[inline]
pub fn packed_codes5_len(count: usize) -> usize {
    (count * 5).div_ceil(8)
}

/// Unpack exactly `count` codes from the front of `bytes`.
pub fn unpack_codes5(bytes: &[u8], count: usize) -> io::Result<Vec<Code5>> {
    let needed = packed_codes5_len(count);
    let Some(bytes) = bytes.get(..needed) else {
        return Err(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            format!("Truncated 5-bit data: need {} bytes, have {}", needed, bytes.len()),
        ));
    };

    let mut codes = Vec::with_capacity(count);
    let mut acc: u32 = 0;
    let mut bits = 0;
    let mut input = bytes.iter();
    while codes.len() < count {
        if bits < 5 {
            // `needed` guarantees enough bytes for `count` codes
            let byte = input.next().copied().unwrap_or(0);
            acc |= u32::from(byte) << bits;
            bits += 8;
        }
        // Masked to five bits, always a valid Code5
        codes.push(Code5::new((acc & 0x1F) as u8).unwrap_or_default());
        acc >>= 5;
        bits -= 5;
    }
    Ok(codes)
}

// ============================================================================
// BYTE READER
// ============================================================================

/// Cursor over a section, with the reads the decoder needs.
pub struct ByteReader<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> ByteReader<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    pub fn remaining(&self) -> usize {
        self.bytes.len() - self.pos
    }

    pub fn read_varint(&mut self) -> io::Result<u64> {
        let (value, consumed) = decode_varint(&self.bytes[self.pos..])?;
        self.pos += consumed;
        Ok(value)
    }

    pub fn read_zigzag(&mut self) -> io::Result<i64> {
        self.read_varint().map(zigzag_decode)
    }

    pub fn read_u8(&mut self) -> io::Result<u8> {
        let byte = *self.bytes.get(self.pos).ok_or_else(|| {
            io::Error::new(io::ErrorKind::UnexpectedEof, "Truncated section")
        })?;
        self.pos += 1;
        Ok(byte)
    }

    pub fn read_bytes(&mut self, len: usize) -> io::Result<&'a [u8]> {
        let end = self.pos.checked_add(len).ok_or_else(|| {
            io::Error::new(io::ErrorKind::InvalidData, "Length causes overflow")
        })?;
        let slice = self.bytes.get(self.pos..end).ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::UnexpectedEof,
                format!("Truncated section (expected {} bytes)", len),
            )
        })?;
        self.pos = end;
        Ok(slice)
    }

    pub fn read_codes5(&mut self, count: usize) -> io::Result<Vec<Code5>> {
        let codes = unpack_codes5(&self.bytes[self.pos..], count)?;
        self.pos += packed_codes5_len(count);
        Ok(codes)
    }
}
