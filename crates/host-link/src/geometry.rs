//! Bus geometry: how wide the link is and how the state ring is split.

use crate::error::GeometryError;

/// Fixed per-link bus geometry.
///
/// A word of `io_bits * payload_cycles` bits crosses the link in
/// `payload_cycles` clocks, `io_bits` at a time, least significant first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LinkGeometry {
    /// Link width per clock.
    pub io_bits: u8,
    /// Clocks per payload word.
    pub payload_cycles: u8,
    /// Words in one context phase.
    pub state_words: usize,
    /// Words in both phases together.
    pub full_state_words: usize,
}

impl Default for LinkGeometry {
    /// 2-bit link, 16-bit words, 36 + 12 state words.
    fn default() -> Self {
        Self {
            io_bits: 2,
            payload_cycles: 8,
            state_words: 3 * 12,
            full_state_words: 4 * 12,
        }
    }
}

impl LinkGeometry {
    #[must_use]
    pub const fn new(
        io_bits: u8,
        payload_cycles: u8,
        state_words: usize,
        full_state_words: usize,
    ) -> Self {
        Self {
            io_bits,
            payload_cycles,
            state_words,
            full_state_words,
        }
    }

    pub fn validate(&self) -> Result<(), GeometryError> {
        if !(2..=8).contains(&self.io_bits) {
            return Err(GeometryError::IoBits(self.io_bits));
        }
        if self.payload_cycles == 0 {
            return Err(GeometryError::NoPayloadCycles);
        }
        if self.word_bits() > 32 {
            return Err(GeometryError::WordTooWide(self.word_bits()));
        }
        if self.state_words == 0 {
            return Err(GeometryError::NoStateWords);
        }
        if self.full_state_words <= self.state_words {
            return Err(GeometryError::NoSecondPhase {
                state_words: self.state_words,
                full_state_words: self.full_state_words,
            });
        }
        Ok(())
    }

    /// Bits per payload word.
    #[must_use]
    pub const fn word_bits(&self) -> u32 {
        self.io_bits as u32 * self.payload_cycles as u32
    }

    #[must_use]
    pub const fn io_mask(&self) -> u8 {
        ((1u16 << self.io_bits) - 1) as u8
    }

    #[must_use]
    pub const fn word_mask(&self) -> u32 {
        (u32::MAX as u64 >> (32 - self.word_bits())) as u32
    }

    /// Clocks in one receive frame: start, header, payload.
    #[must_use]
    pub const fn frame_cycles(&self) -> u32 {
        self.payload_cycles as u32 + 2
    }

    /// Clocks in one reply: status code, payload.
    #[must_use]
    pub const fn reply_cycles(&self) -> u32 {
        self.payload_cycles as u32 + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_sixteen_bit_words() {
        let g = LinkGeometry::default();
        assert_eq!(g.validate(), Ok(()));
        assert_eq!(g.word_bits(), 16);
        assert_eq!(g.word_mask(), 0xFFFF);
        assert_eq!(g.io_mask(), 0b11);
        assert_eq!(g.frame_cycles(), 10);
        assert_eq!(g.reply_cycles(), 9);
    }

    #[test]
    fn full_width_masks() {
        let g = LinkGeometry::new(8, 4, 1, 2);
        assert_eq!(g.validate(), Ok(()));
        assert_eq!(g.word_mask(), u32::MAX);
        assert_eq!(g.io_mask(), 0xFF);
    }

    #[test]
    fn rejects_bad_geometry() {
        assert_eq!(
            LinkGeometry::new(1, 8, 36, 48).validate(),
            Err(GeometryError::IoBits(1))
        );
        assert_eq!(
            LinkGeometry::new(9, 2, 36, 48).validate(),
            Err(GeometryError::IoBits(9))
        );
        assert_eq!(
            LinkGeometry::new(2, 0, 36, 48).validate(),
            Err(GeometryError::NoPayloadCycles)
        );
        assert_eq!(
            LinkGeometry::new(4, 9, 36, 48).validate(),
            Err(GeometryError::WordTooWide(36))
        );
        assert_eq!(
            LinkGeometry::new(2, 8, 0, 48).validate(),
            Err(GeometryError::NoStateWords)
        );
        assert_eq!(
            LinkGeometry::new(2, 8, 36, 36).validate(),
            Err(GeometryError::NoSecondPhase {
                state_words: 36,
                full_state_words: 36
            })
        );
    }

    #[test]
    fn error_messages_name_the_values() {
        let err = LinkGeometry::new(2, 8, 12, 10).validate().unwrap_err();
        assert_eq!(
            err.to_string(),
            "full ring of 10 words leaves no second phase after 12"
        );
    }

    #[cfg(feature = "serde")]
    #[test]
    fn loads_from_json() {
        let g: LinkGeometry = serde_json::from_str(
            r#"{"io_bits":4,"payload_cycles":4,"state_words":5,"full_state_words":8}"#,
        )
        .unwrap();
        assert_eq!(g, LinkGeometry::new(4, 4, 5, 8));
    }
}
