//! Raw register words.
//!
//! A bus read returns the bytes of one 32-bit register as they travelled on the
//! wire. Field masks are defined against the assembled word, so assembly always
//! happens first, least-significant byte first.

use std::fmt;

use crate::regmap::assemble_word;

/// Number of bytes moved by one register transaction.
pub const WORD_BYTES: usize = 4;

/// One 32-bit register value assembled from its wire bytes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct RawRegister(pub u32);

impl RawRegister {
    /// Assembles a register word from little-endian wire bytes.
    #[inline]
    pub const fn from_le_bytes(bytes: [u8; WORD_BYTES]) -> Self {
        Self(assemble_word(bytes))
    }

    /// Returns the wire bytes of this word, least-significant first.
    #[inline]
    pub const fn to_le_bytes(self) -> [u8; WORD_BYTES] {
        self.0.to_le_bytes()
    }

    /// Returns the assembled 32-bit value.
    #[inline]
    pub const fn value(self) -> u32 {
        self.0
    }
}

impl From<[u8; WORD_BYTES]> for RawRegister {
    fn from(bytes: [u8; WORD_BYTES]) -> Self {
        Self::from_le_bytes(bytes)
    }
}

impl fmt::Display for RawRegister {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#010x}", self.0)
    }
}
