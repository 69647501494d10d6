//! Bus clock counting.

/// A count of bus clocks.
///
/// Every exchange on a serial link takes exactly one bus clock, so this is
/// also the index of the next sample a component will see.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct BusCycle(pub u64);

impl BusCycle {
    pub const ZERO: Self = Self(0);

    #[must_use]
    pub const fn new(count: u64) -> Self {
        Self(count)
    }

    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }

    /// The cycle after this one.
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0 + 1)
    }

    /// Clocks elapsed since `earlier`. Saturates at zero if `earlier` is
    /// actually later.
    #[must_use]
    pub const fn since(self, earlier: Self) -> u64 {
        self.0.saturating_sub(earlier.0)
    }
}

impl core::ops::Add<u64> for BusCycle {
    type Output = Self;

    fn add(self, rhs: u64) -> Self {
        Self(self.0 + rhs)
    }
}

impl core::ops::AddAssign<u64> for BusCycle {
    fn add_assign(&mut self, rhs: u64) {
        self.0 += rhs;
    }
}

impl core::fmt::Display for BusCycle {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}
