//! Short code generation.
//!
//! Codes are drawn uniformly from [`ALPHABET`]. A [`CodeGenerator`] owns a
//! single PRNG seeded once from OS entropy, shared by every caller through a
//! mutex. The generator never checks uniqueness; the URL service retries on
//! repository conflicts.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::{Mutex, PoisonError};

/// Characters a short code is built from (case-sensitive letters and digits).
pub const ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Code length used when none is configured.
pub const DEFAULT_CODE_LENGTH: usize = 7;

/// Longest code the service will ever store or look up.
pub const MAX_CODE_LENGTH: usize = 64;

/// Random fixed-length short code generator.
pub struct CodeGenerator {
    length: usize,
    rng: Mutex<StdRng>,
}

impl CodeGenerator {
    /// Creates a generator seeded from OS entropy.
    ///
    /// `length` must be positive; [`crate::config::Config::validate`] enforces
    /// `1..=MAX_CODE_LENGTH` for configured values.
    pub fn new(length: usize) -> Self {
        Self::with_rng(length, StdRng::from_os_rng())
    }

    /// Creates a generator with a fixed seed. Two generators built with the
    /// same seed and length yield the same sequence of codes.
    pub fn seeded(length: usize, seed: u64) -> Self {
        Self::with_rng(length, StdRng::seed_from_u64(seed))
    }

    fn with_rng(length: usize, rng: StdRng) -> Self {
        Self {
            length,
            rng: Mutex::new(rng),
        }
    }

    /// Produces the next random code.
    pub fn generate(&self) -> String {
        // The RNG state stays valid even if a holder panicked.
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);

        (0..self.length)
            .map(|_| ALPHABET[rng.random_range(0..ALPHABET.len())] as char)
            .collect()
    }
}

impl Default for CodeGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_CODE_LENGTH)
    }
}

/// Returns true if `code` could have been produced by a [`CodeGenerator`].
pub fn is_well_formed_code(code: &str) -> bool {
    !code.is_empty() && code.len() <= MAX_CODE_LENGTH && code.bytes().all(|b| ALPHABET.contains(&b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::Arc;

    #[test]
    fn test_alphabet_has_62_unique_symbols() {
        assert_eq!(ALPHABET.len(), 62);

        let unique: HashSet<_> = ALPHABET.iter().collect();
        assert_eq!(unique.len(), ALPHABET.len());
    }

    #[test]
    fn test_generate_has_configured_length() {
        for length in [1, 2, 7, 12, MAX_CODE_LENGTH] {
            let generator = CodeGenerator::new(length);
            for _ in 0..50 {
                assert_eq!(generator.generate().len(), length);
            }
        }
    }

    #[test]
    fn test_generate_uses_alphabet_only() {
        let generator = CodeGenerator::new(32);

        for _ in 0..200 {
            let code = generator.generate();
            assert!(code.bytes().all(|b| ALPHABET.contains(&b)), "{code}");
        }
    }

    #[test]
    fn test_generate_produces_unique_codes() {
        let generator = CodeGenerator::default();
        let codes: HashSet<_> = (0..1000).map(|_| generator.generate()).collect();

        assert_eq!(codes.len(), 1000);
    }

    #[test]
    fn test_seeded_generators_are_reproducible() {
        let a = CodeGenerator::seeded(10, 42);
        let b = CodeGenerator::seeded(10, 42);

        for _ in 0..20 {
            assert_eq!(a.generate(), b.generate());
        }
    }

    #[test]
    fn test_consecutive_codes_differ() {
        let generator = CodeGenerator::seeded(10, 7);
        assert_ne!(generator.generate(), generator.generate());
    }

    #[test]
    fn test_shared_generator_across_threads() {
        let generator = Arc::new(CodeGenerator::new(12));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let generator = Arc::clone(&generator);
                std::thread::spawn(move || {
                    (0..100).map(|_| generator.generate()).collect::<Vec<_>>()
                })
            })
            .collect();

        let mut all = HashSet::new();
        for handle in handles {
            for code in handle.join().unwrap() {
                assert_eq!(code.len(), 12);
                all.insert(code);
            }
        }

        assert_eq!(all.len(), 800);
    }

    #[test]
    fn test_is_well_formed_code() {
        assert!(is_well_formed_code("abc123"));
        assert!(is_well_formed_code("ZZZZZZZ"));
        assert!(is_well_formed_code("doesnotexist"));

        assert!(!is_well_formed_code(""));
        assert!(!is_well_formed_code("has-hyphen"));
        assert!(!is_well_formed_code("under_score"));
        assert!(!is_well_formed_code("space d"));
        assert!(!is_well_formed_code("ünïcode"));
        assert!(!is_well_formed_code(&"a".repeat(MAX_CODE_LENGTH + 1)));
    }
}
