//! Short code generation.
//!
//! Provides cryptographically secure random code generation. Codes are the
//! lookup keys for stored URLs, so they must not be guessable or enumerable.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Mutex;

/// Characters a short code is drawn from.
const ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Length of a generated short code.
const CODE_LENGTH: usize = 7;

/// Generates random short codes from a held random source.
///
/// Each code is exactly 7 characters drawn uniformly, with replacement, from
/// the 62-character alphanumeric alphabet. The generator owns its RNG so that
/// tests can substitute a seeded source and replay the exact code sequence.
///
/// # Examples
///
/// ```ignore
/// let generator = CodeGenerator::new();
/// let code = generator.generate();
/// assert_eq!(code.len(), 7);
/// assert!(code.chars().all(|c| c.is_ascii_alphanumeric()));
/// ```
pub struct CodeGenerator {
    rng: Mutex<StdRng>,
}

impl CodeGenerator {
    /// Creates a generator seeded from the operating system.
    pub fn new() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_os_rng()),
        }
    }

    /// Creates a generator with a fixed seed.
    ///
    /// Two generators built from the same seed produce the same code
    /// sequence. Intended for tests that need to predict generated codes;
    /// production code uses [`CodeGenerator::new`].
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    /// Generates a 7-character random short code.
    ///
    /// # Panics
    ///
    /// Panics if the RNG mutex is poisoned (a previous holder panicked).
    pub fn generate(&self) -> String {
        let mut rng = self.rng.lock().expect("code generator rng poisoned");

        (0..CODE_LENGTH)
            .map(|_| {
                let idx = rng.random_range(0..ALPHABET.len());
                ALPHABET[idx] as char
            })
            .collect()
    }
}

impl Default for CodeGenerator {
    fn default() -> Self {
        Self::new()
    }
}
