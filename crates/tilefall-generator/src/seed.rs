//! Seeds for reproducible level generation.

use std::{
    fmt::{self, Display},
    str::FromStr,
};

use derive_more::{Display as DeriveDisplay, Error};
use rand::{Rng, RngExt};
use sha2::{Digest, Sha256};

/// Error returned when parsing a seed string fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, DeriveDisplay, Error)]
pub enum ParseSeedError {
    /// The string did not contain exactly 64 characters.
    #[display("seed must be 64 hex characters, got {len}")]
    InvalidLength {
        /// Number of characters in the rejected string.
        len: usize,
    },
    /// The string contained a character outside `[0-9a-fA-F]`.
    #[display("seed contains a non-hex character {found:?}")]
    InvalidHexDigit {
        /// The rejected character.
        found: char,
    },
}

/// A 32-byte seed determining every random choice of one generation call.
///
/// Seeds display and parse as 64 lowercase hex characters, which makes a
/// generated level reproducible from its printed seed. The structural
/// searches are deterministic; the seed only drives the odd-position drop,
/// sprite assignment, and pair shuffling.
///
/// # Examples
///
/// ```
/// use tilefall_generator::LevelSeed;
///
/// let seed: LevelSeed =
///     "c1d44bd6afaf8af64f126546884e19298acbdc33c3924a28136715de946ef3f1".parse()?;
/// assert_eq!(
///     seed.to_string(),
///     "c1d44bd6afaf8af64f126546884e19298acbdc33c3924a28136715de946ef3f1"
/// );
/// # Ok::<(), tilefall_generator::ParseSeedError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LevelSeed([u8; Self::LEN]);

impl LevelSeed {
    /// Seed length in bytes.
    pub const LEN: usize = 32;

    /// Creates a seed from raw bytes.
    #[must_use]
    pub const fn from_bytes(bytes: [u8; Self::LEN]) -> Self {
        Self(bytes)
    }

    /// Returns the raw seed bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; Self::LEN] {
        &self.0
    }

    /// Draws a fresh random seed from the given generator.
    pub fn random<R>(rng: &mut R) -> Self
    where
        R: Rng + ?Sized,
    {
        let mut bytes = [0_u8; Self::LEN];
        rng.fill(bytes.as_mut_slice());
        Self(bytes)
    }

    /// Derives a seed from an arbitrary phrase by hashing it with SHA-256.
    ///
    /// Handy for human-memorable reproducible levels ("daily challenge"
    /// strings and the like).
    ///
    /// # Examples
    ///
    /// ```
    /// use tilefall_generator::LevelSeed;
    ///
    /// let a = LevelSeed::from_phrase("2026-08-07");
    /// let b = LevelSeed::from_phrase("2026-08-07");
    /// assert_eq!(a, b);
    /// assert_ne!(a, LevelSeed::from_phrase("2026-08-08"));
    /// ```
    #[must_use]
    pub fn from_phrase(phrase: &str) -> Self {
        Self(Sha256::digest(phrase.as_bytes()).into())
    }
}

impl Display for LevelSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in &self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

impl FromStr for LevelSeed {
    type Err = ParseSeedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(found) = s.chars().find(|c| !c.is_ascii_hexdigit()) {
            return Err(ParseSeedError::InvalidHexDigit { found });
        }
        // All-ASCII from here on, so byte length equals character count.
        if s.len() != Self::LEN * 2 {
            return Err(ParseSeedError::InvalidLength { len: s.len() });
        }
        let mut bytes = [0_u8; Self::LEN];
        for (i, byte) in bytes.iter_mut().enumerate() {
            let digits = &s[2 * i..2 * i + 2];
            *byte = u8::from_str_radix(digits, 16).expect("digits validated as hex");
        }
        Ok(Self(bytes))
    }
}
