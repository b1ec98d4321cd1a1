//! Binary format properties.
//!
//! Any corruption of a saved dataset must be rejected, never panic and never
//! load as something else.

use proptest::prelude::*;
use tinytz::{CityIdx, Dataset};

use crate::common::{sample_bytes, sample_dataset, JUL_2024};

proptest! {
    #![proptest_config(ProptestConfig::with_cases(300))]

    /// Property: Changing any single byte is detected.
    #[test]
    fn prop_any_byte_change_rejected(pos in any::<prop::sample::Index>(), xor in 1u8..=255) {
        let mut bytes = sample_bytes();
        let pos = pos.index(bytes.len());
        bytes[pos] ^= xor;
        prop_assert!(Dataset::from_bytes(&bytes).is_err(), "byte {} ^ {:#x} accepted", pos, xor);
    }

    /// Property: Every truncation is rejected.
    #[test]
    fn prop_truncation_rejected(len in any::<prop::sample::Index>()) {
        let bytes = sample_bytes();
        let len = len.index(bytes.len());
        prop_assert!(Dataset::from_bytes(&bytes[..len]).is_err());
    }

    /// Property: Random input never panics the decoder.
    #[test]
    fn prop_garbage_never_panics(bytes in prop::collection::vec(any::<u8>(), 0..512)) {
        let _ = Dataset::from_bytes(&bytes);
    }
}

/// A decoded dataset answers like the one that was saved.
#[test]
fn test_decoded_dataset_answers_the_same() {
    let ds = sample_dataset();
    let decoded = Dataset::from_bytes(&sample_bytes()).unwrap();
    for c in 0..ds.city_count() as u16 {
        assert_eq!(
            decoded.offset_by_city(CityIdx(c), JUL_2024),
            ds.offset_by_city(CityIdx(c), JUL_2024)
        );
        assert_eq!(decoded.render_city(CityIdx(c)), ds.render_city(CityIdx(c)));
    }
    assert_eq!(decoded.name_capacity(), ds.name_capacity());
}
