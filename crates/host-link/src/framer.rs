//! Receive framing: start bit, header, payload word.

use crate::geometry::LinkGeometry;
use crate::trace;

/// A completed receive frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame {
    /// Raw header cycle. Not necessarily a valid command.
    pub header: u8,
    /// Payload word, `word_bits` wide.
    pub payload: u32,
}

/// Where the framer is within a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RxPhase {
    /// Waiting for bit 0 to go high.
    Idle,
    /// Next cycle is the header.
    Header,
    /// Next cycle is payload chunk `n` (0-based).
    Payload(u8),
}

/// Receive-side frame decoder.
///
/// A single counter tracks the frame: 0 is idle, 1 expects the header,
/// 2.. count payload cycles. There is no resynchronisation: once a start
/// bit is seen the framer consumes a whole frame's worth of cycles before
/// it looks for another.
#[derive(Debug, Clone)]
pub struct RxFramer {
    io_bits: u8,
    io_mask: u8,
    word_bits: u32,
    word_mask: u32,
    /// Counter value that ends the frame (`payload_cycles + 2`).
    frame_end: u8,
    counter: u8,
    header: u8,
    accumulator: u32,
}

impl RxFramer {
    #[must_use]
    pub fn new(geometry: &LinkGeometry) -> Self {
        Self {
            io_bits: geometry.io_bits,
            io_mask: geometry.io_mask(),
            word_bits: geometry.word_bits(),
            word_mask: geometry.word_mask(),
            frame_end: geometry.payload_cycles + 2,
            counter: 0,
            header: 0,
            accumulator: 0,
        }
    }

    /// Consume one inbound sample. Returns the frame on the cycle its last
    /// payload chunk arrives.
    pub fn clock(&mut self, rx: u8) -> Option<Frame> {
        let rx = rx & self.io_mask;
        match self.counter {
            0 => {
                if rx & 1 != 0 {
                    self.counter = 1;
                    if trace::rx_enabled() {
                        eprintln!("[host-link rx] start (sample={rx:#X})");
                    }
                }
                None
            }
            1 => {
                self.header = rx;
                self.counter = 2;
                if trace::rx_enabled() {
                    eprintln!("[host-link rx] header={rx:#X}");
                }
                None
            }
            _ => {
                self.accumulator = self.shift_in(rx);
                self.counter += 1;
                if self.counter < self.frame_end {
                    return None;
                }
                self.counter = 0;
                if trace::rx_enabled() {
                    eprintln!(
                        "[host-link rx] frame header={:#X} payload={:#X}",
                        self.header, self.accumulator
                    );
                }
                Some(Frame {
                    header: self.header,
                    payload: self.accumulator,
                })
            }
        }
    }

    /// Put `rx` above the top of the word, then shift the whole window down
    /// one chunk. After `payload_cycles` chunks the first one sits in the low
    /// bits and everything older has fallen off the bottom.
    fn shift_in(&self, rx: u8) -> u32 {
        let window = u64::from(self.accumulator) | (u64::from(rx) << self.word_bits);
        (window >> self.io_bits) as u32 & self.word_mask
    }

    #[must_use]
    pub fn phase(&self) -> RxPhase {
        match self.counter {
            0 => RxPhase::Idle,
            1 => RxPhase::Header,
            n => RxPhase::Payload(n - 2),
        }
    }

    /// Raw framing counter.
    #[must_use]
    pub fn counter(&self) -> u8 {
        self.counter
    }

    /// Last captured header, valid from the header cycle onwards.
    #[must_use]
    pub fn header(&self) -> u8 {
        self.header
    }

    /// Payload bits gathered so far.
    #[must_use]
    pub fn accumulator(&self) -> u32 {
        self.accumulator
    }
}
