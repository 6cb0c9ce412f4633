//! Positional base-4 k-mer fingerprinting.
//!
//! A single function replaces the four near-duplicate per-k kernels a naive
//! port would carry: the window length alone determines how many positional
//! digits get folded in, so one correct encoder serves k = 9, 11, 13, and 15
//! alike.

/// Marks a window that contains at least one base outside {A,C,G,T}.
pub const SENTINEL: u32 = u32::MAX;

#[inline]
fn base_code(b: u8) -> Option<u32> {
    match b {
        b'A' => Some(0),
        b'C' => Some(1),
        b'G' => Some(2),
        b'T' => Some(3),
        _ => None,
    }
}

/// Encodes `window` as a base-4 number, leftmost base as the most
/// significant digit. Returns [`SENTINEL`] as soon as a non-ACGT base is
/// encountered, without reading the rest of the window.
pub fn fingerprint(window: &[u8]) -> u32 {
    let mut fp: u32 = 0;
    for &b in window {
        match base_code(b) {
            Some(code) => fp = fp * 4 + code,
            None => return SENTINEL,
        }
    }
    fp
}

/// The k-mer sizes this engine supports.
pub const VALID_K: [usize; 4] = [9, 11, 13, 15];

pub fn is_valid_k(k: usize) -> bool {
    VALID_K.contains(&k)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fingerprint_in_range_for_all_acgt_windows() {
        for k in VALID_K {
            let window = vec![b'A'; k];
            let fp = fingerprint(&window);
            assert!(fp < 4u32.pow(k as u32));
        }
    }

    #[test]
    fn fingerprint_is_sentinel_on_non_acgt() {
        assert_eq!(fingerprint(b"ACGTN"), SENTINEL);
        assert_eq!(fingerprint(b"ACGTacgt"), SENTINEL);
    }

    #[test]
    fn fingerprint_distinguishes_leading_base() {
        // A regression guard against the "writes to arr[k-2]" class of bug:
        // the leading base must affect the most significant digit.
        let a_leading = fingerprint(b"ACGTACGTA");
        let c_leading = fingerprint(b"CCGTACGTA");
        assert_ne!(a_leading, c_leading);
    }

    #[test]
    fn fingerprint_matches_hand_computed_value() {
        // A=0,C=1,G=2,T=3 ; "ACGT" = 0*64 + 1*16 + 2*4 + 3 = 27
        assert_eq!(fingerprint(b"ACGT"), 27);
    }

    #[test]
    fn is_valid_k_rejects_unsupported_sizes() {
        assert!(is_valid_k(15));
        assert!(!is_valid_k(10));
        assert!(!is_valid_k(21));
    }
}
