//! Link configuration errors.

use std::fmt;

/// Why a [`LinkGeometry`](crate::LinkGeometry) cannot drive a link.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeometryError {
    /// Bus width outside 2..=8 bits. The reply status code needs two bits.
    IoBits(u8),
    /// A word must take at least one payload cycle.
    NoPayloadCycles,
    /// `io_bits * payload_cycles` exceeds the 32-bit word register.
    WordTooWide(u32),
    /// A context phase must hold at least one word.
    NoStateWords,
    /// The second phase is empty (`full_state_words <= state_words`).
    NoSecondPhase { state_words: usize, full_state_words: usize },
}

impl fmt::Display for GeometryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IoBits(bits) => write!(f, "bus width of {bits} bits (expected 2 to 8)"),
            Self::NoPayloadCycles => write!(f, "payload must span at least one cycle"),
            Self::WordTooWide(bits) => write!(f, "word of {bits} bits exceeds 32"),
            Self::NoStateWords => write!(f, "state ring phase must hold at least one word"),
            Self::NoSecondPhase {
                state_words,
                full_state_words,
            } => write!(
                f,
                "full ring of {full_state_words} words leaves no second phase after {state_words}",
            ),
        }
    }
}

impl std::error::Error for GeometryError {}
