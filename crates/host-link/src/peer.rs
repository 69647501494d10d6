//! The device end of the link.
//!
//! Builds receive frames the way the device clocks them out and decodes the
//! host's replies the way the device clocks them in. Used to drive a
//! [`HostLink`](crate::HostLink) without a simulated chip.

use crate::geometry::LinkGeometry;
use crate::protocol::{Reply, ReplyStatus};

/// Bus samples for one frame: start, header, then `word` LSB chunk first.
#[must_use]
pub fn encode_frame(geometry: &LinkGeometry, header: u8, word: u32) -> Vec<u8> {
    let mut samples = Vec::with_capacity(geometry.frame_cycles() as usize);
    samples.push(1);
    samples.push(header & geometry.io_mask());
    let word = word & geometry.word_mask();
    for chunk in 0..u32::from(geometry.payload_cycles) {
        let bits = word >> (chunk * u32::from(geometry.io_bits));
        samples.push(bits as u8 & geometry.io_mask());
    }
    samples
}

/// Serial-to-parallel reply decoder.
///
/// Waits for a cycle carrying a known status code, then collects one word.
#[derive(Debug, Clone)]
pub struct ReplyDecoder {
    geometry: LinkGeometry,
    pending: Option<ReplyStatus>,
    chunks: u8,
    word: u32,
}

impl ReplyDecoder {
    #[must_use]
    pub fn new(geometry: &LinkGeometry) -> Self {
        Self {
            geometry: *geometry,
            pending: None,
            chunks: 0,
            word: 0,
        }
    }

    /// Consume one host→device sample.
    pub fn clock(&mut self, tx: u8) -> Option<Reply> {
        let tx = tx & self.geometry.io_mask();
        let Some(status) = self.pending else {
            self.pending = ReplyStatus::from_code(tx);
            self.chunks = 0;
            self.word = 0;
            return None;
        };

        self.word |= u32::from(tx) << (u32::from(self.chunks) * u32::from(self.geometry.io_bits));
        self.chunks += 1;
        if self.chunks < self.geometry.payload_cycles {
            return None;
        }
        self.pending = None;
        Some(Reply {
            status,
            word: self.word,
        })
    }

    /// True between a status code and the end of its word.
    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.pending.is_some()
    }

    /// Decode every reply in a recorded outbound stream.
    #[must_use]
    pub fn decode_all(geometry: &LinkGeometry, samples: &[u8]) -> Vec<Reply> {
        let mut decoder = Self::new(geometry);
        samples.iter().filter_map(|&tx| decoder.clock(tx)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shifter::TxShifter;

    #[test]
    fn frame_layout() {
        let g = LinkGeometry::default();
        assert_eq!(
            encode_frame(&g, 0, 0x1234),
            vec![1, 0, 0, 1, 3, 0, 2, 0, 1, 0]
        );
        assert_eq!(encode_frame(&g, 1, 0).len(), g.frame_cycles() as usize);
    }

    #[test]
    fn decodes_shifter_output() {
        let g = LinkGeometry::new(3, 5, 6, 12);
        let mut tx = TxShifter::new(&g);
        let mut samples = vec![0, 0];
        for reply in [Reply::read(0x6ACE), Reply::credit_refill(), Reply::scan(0)] {
            tx.load(reply);
            for _ in 0..g.frame_cycles() {
                samples.push(tx.shift_out());
            }
        }
        assert_eq!(
            ReplyDecoder::decode_all(&g, &samples),
            vec![Reply::read(0x6ACE), Reply::credit_refill(), Reply::scan(0)]
        );
    }

    #[test]
    fn idle_zeros_decode_nothing() {
        let g = LinkGeometry::default();
        let mut d = ReplyDecoder::new(&g);
        for _ in 0..50 {
            assert_eq!(d.clock(0), None);
            assert!(!d.is_busy());
        }
    }
}
