//! Transmit shift register.

use crate::geometry::LinkGeometry;
use crate::protocol::Reply;

/// Parallel-to-serial reply register.
///
/// Loaded once per completed receive frame, drained `io_bits` per clock.
/// Once a reply has been shifted out the register reads zero, which the
/// device sees as an idle link.
#[derive(Debug, Clone)]
pub struct TxShifter {
    geometry: LinkGeometry,
    register: u64,
}

impl TxShifter {
    #[must_use]
    pub fn new(geometry: &LinkGeometry) -> Self {
        Self {
            geometry: *geometry,
            register: 0,
        }
    }

    /// Replace whatever is left with `reply`.
    pub fn load(&mut self, reply: Reply) {
        self.register = reply.encode(&self.geometry);
    }

    /// Emit the low `io_bits` and shift them out.
    pub fn shift_out(&mut self) -> u8 {
        let out = (self.register as u8) & self.geometry.io_mask();
        self.register >>= self.geometry.io_bits;
        out
    }

    /// Bits not yet shifted out.
    #[must_use]
    pub fn residual(&self) -> u64 {
        self.register
    }

    #[must_use]
    pub fn is_drained(&self) -> bool {
        self.register == 0
    }
}
