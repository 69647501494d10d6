//! Trait for components that exchange one narrow bus sample per clock.

/// A component on a narrow synchronous serial link.
///
/// Each call is one bus clock: the caller presents the sample it read from
/// the far side this cycle and gets back the sample to drive towards it.
/// Samples are only as wide as the link; implementations ignore higher bits.
pub trait BitSerial {
    /// Advance by one bus clock.
    fn advance(&mut self, inbound: u8) -> u8;

    /// Advance by one clock per inbound sample, collecting the outbound
    /// samples in order.
    ///
    /// Default implementation calls `advance()` in a loop. Components may
    /// override for efficiency, but must produce identical results.
    fn advance_all(&mut self, inbound: &[u8]) -> Vec<u8> {
        inbound.iter().map(|&rx| self.advance(rx)).collect()
    }
}
