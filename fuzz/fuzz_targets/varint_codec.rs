// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fuzz target for varint (LEB128) and zigzag decoding.
//!
//! Every length, index and transition start in a dataset goes through these.

#![no_main]

use libfuzzer_sys::fuzz_target;
use tinytz::binary::{decode_varint, encode_varint, zigzag_decode, zigzag_encode};

fuzz_target!(|data: &[u8]| {
    // decode_varint returns Ok or Err, never panics
    if let Ok((value, consumed)) = decode_varint(data) {
        assert!(consumed <= data.len());

        let mut reencoded = Vec::new();
        encode_varint(value, &mut reencoded);
        let (redecoded, reconsumed) =
            decode_varint(&reencoded).expect("re-encoded varint decodes");
        assert_eq!(value, redecoded);
        assert_eq!(reconsumed, reencoded.len());

        // Zigzag is a bijection
        assert_eq!(zigzag_encode(zigzag_decode(value)), value);
    }
});
