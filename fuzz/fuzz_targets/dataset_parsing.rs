// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Dataset decoding under adversarial input.
//!
//! Random bytes almost never carry a valid CRC, so the raw input alone only
//! exercises the header checks. The second pass reseals the input with a
//! correct footer to get the fuzzer past the checksum and into the section
//! decoders and `from_parts`.

#![no_main]

use libfuzzer_sys::fuzz_target;
use tinytz::binary::{DatasetFooter, FOOTER_MAGIC};
use tinytz::{CityIdx, Dataset};

fn check(bytes: &[u8]) {
    let Ok(ds) = Dataset::from_bytes(bytes) else {
        return;
    };

    // A dataset that loads must render and resolve without panicking
    let mut buf = String::with_capacity(ds.name_capacity());
    for c in 0..ds.city_count() {
        buf.clear();
        let written = ds.render_city_into(CityIdx(c as u16), &mut buf);
        assert_eq!(written, Some(buf.len()));
        assert!(buf.len() <= ds.name_capacity());
        let _ = ds.offset_by_city(CityIdx(c as u16), i64::MAX);
    }
    assert!(ds.transitions().windows(2).all(|w| w[0].start <= w[1].start));
}

fuzz_target!(|data: &[u8]| {
    check(data);

    let mut sealed = data.to_vec();
    let crc32 = DatasetFooter::compute_crc32(&sealed);
    sealed.extend_from_slice(&crc32.to_le_bytes());
    sealed.extend_from_slice(&FOOTER_MAGIC);
    check(&sealed);
});
