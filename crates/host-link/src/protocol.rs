//! Wire-level constants: command headers, reply status codes and the
//! register-write reply.
//!
//! # Receive frame (device → host)
//!
//! | Cycle            | Content                                   |
//! |------------------|-------------------------------------------|
//! | 0                | start: bit 0 set                          |
//! | 1                | header: [`Command`] code                  |
//! | 2..2+P           | payload word, `io_bits` per cycle, LSB first |
//!
//! # Reply (host → device)
//!
//! | Cycle            | Content                                   |
//! |------------------|-------------------------------------------|
//! | 0                | [`ReplyStatus`] code                      |
//! | 1..1+P           | reply word, LSB first                     |
//!
//! The reply starts on the same clock that completes the receive frame.

use crate::geometry::LinkGeometry;

/// Register index of the device's output sample credit counter.
pub const REG_ADDR_SAMPLE_CREDITS: u8 = 0;

/// Credits granted each time the host consumes an output sample.
pub const SAMPLE_CREDIT_REFILL: u8 = 3;

/// Command carried in the header cycle of a receive frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Command {
    /// Swap the payload into the state ring and send back the old word.
    Scan = 0,
    /// The payload is an output sample.
    Out = 1,
    /// The payload is a memory address to read.
    Read = 2,
}

impl Command {
    /// Decode a header cycle. Undecoded headers are ignored by the host.
    #[must_use]
    pub fn from_header(header: u8) -> Option<Self> {
        match header {
            0 => Some(Self::Scan),
            1 => Some(Self::Out),
            2 => Some(Self::Read),
            _ => None,
        }
    }

    #[must_use]
    pub const fn header(self) -> u8 {
        self as u8
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Scan => "SCAN",
            Self::Out => "OUT",
            Self::Read => "READ",
        }
    }
}

/// Status code sent in the first cycle of every reply. Never zero, so an
/// idle link (all zeros) is distinguishable from a reply start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ReplyStatus {
    /// Word is the previous state ring contents.
    Scan = 1,
    /// Word is memory contents.
    Read = 2,
    /// Word is a register write: register index in bits 8.., value in 0..8.
    Write = 3,
}

impl ReplyStatus {
    #[must_use]
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(Self::Scan),
            2 => Some(Self::Read),
            3 => Some(Self::Write),
            _ => None,
        }
    }

    #[must_use]
    pub const fn code(self) -> u8 {
        self as u8
    }
}

/// One reply word with its status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Reply {
    pub status: ReplyStatus,
    pub word: u32,
}

impl Reply {
    #[must_use]
    pub const fn scan(old_word: u32) -> Self {
        Self {
            status: ReplyStatus::Scan,
            word: old_word,
        }
    }

    #[must_use]
    pub const fn read(word: u32) -> Self {
        Self {
            status: ReplyStatus::Read,
            word,
        }
    }

    #[must_use]
    pub const fn register_write(register: u8, value: u8) -> Self {
        Self {
            status: ReplyStatus::Write,
            word: (register as u32) << 8 | value as u32,
        }
    }

    /// The fixed reply to every output sample.
    #[must_use]
    pub const fn credit_refill() -> Self {
        Self::register_write(REG_ADDR_SAMPLE_CREDITS, SAMPLE_CREDIT_REFILL)
    }

    /// `(register, value)` for a register write, `None` otherwise.
    #[must_use]
    pub const fn register_target(&self) -> Option<(u8, u8)> {
        match self.status {
            ReplyStatus::Write => Some(((self.word >> 8) as u8, self.word as u8)),
            _ => None,
        }
    }

    /// Serialise into a transmit register image: the word, truncated to
    /// the link's word width, above the status code.
    #[must_use]
    pub fn encode(&self, geometry: &LinkGeometry) -> u64 {
        (u64::from(self.word & geometry.word_mask()) << geometry.io_bits)
            | u64::from(self.status.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_decoding() {
        assert_eq!(Command::from_header(0), Some(Command::Scan));
        assert_eq!(Command::from_header(1), Some(Command::Out));
        assert_eq!(Command::from_header(2), Some(Command::Read));
        assert_eq!(Command::from_header(3), None);
        assert_eq!(Command::from_header(0xFF), None);
        for cmd in [Command::Scan, Command::Out, Command::Read] {
            assert_eq!(Command::from_header(cmd.header()), Some(cmd));
        }
    }

    #[test]
    fn status_codes_are_nonzero() {
        assert_eq!(ReplyStatus::from_code(0), None);
        for status in [ReplyStatus::Scan, ReplyStatus::Read, ReplyStatus::Write] {
            assert_ne!(status.code(), 0);
            assert_eq!(ReplyStatus::from_code(status.code()), Some(status));
        }
    }

    #[test]
    fn credit_refill_targets_sample_credits() {
        let reply = Reply::credit_refill();
        assert_eq!(reply.status, ReplyStatus::Write);
        assert_eq!(reply.word, 0x0003);
        assert_eq!(
            reply.register_target(),
            Some((REG_ADDR_SAMPLE_CREDITS, SAMPLE_CREDIT_REFILL))
        );
        assert_eq!(Reply::scan(0x0102).register_target(), None);
    }

    #[test]
    fn encode_places_status_below_word() {
        let g = LinkGeometry::default();
        assert_eq!(Reply::credit_refill().encode(&g), 0b1111);
        assert_eq!(Reply::read(0xABCD).encode(&g), 0xABCD << 2 | 2);
        assert_eq!(Reply::scan(0x1_2345).encode(&g), 0x2345 << 2 | 1);
    }
}
