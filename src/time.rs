//! Typed representations of durations, offsets, and amounts of processor service.
//!
//! The analysis is parameterized over a simple discrete time model: all
//! quantities are non-negative integers. Three distinct newtypes are used
//! instead of a single raw integer to make it impossible to accidentally
//! mix up a *window length* with a *point in time* or with an *amount of
//! service* at the type level.

use derive_more::{Add, AddAssign, From, Sub, SubAssign, Sum};

/// The length of a time interval (e.g., the length of a busy window, or
/// the argument to a request-bound function).
#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Add, Sub, AddAssign, SubAssign, Sum, From,
)]
pub struct Duration(u64);

impl Duration {
    /// The zero-length interval.
    pub const fn zero() -> Self {
        Duration(0)
    }

    /// The smallest representable positive interval length.
    pub const fn epsilon() -> Self {
        Duration(1)
    }

    /// A sentinel used as a divergence limit when no horizon was given.
    pub const INFINITE: Duration = Duration(u64::MAX);

    pub fn is_zero(self) -> bool {
        self.0 == 0
    }

    pub fn is_non_zero(self) -> bool {
        self.0 != 0
    }

    pub fn saturating_sub(self, other: Self) -> Self {
        Duration(self.0.saturating_sub(other.0))
    }
}

impl std::ops::Mul<u64> for Duration {
    type Output = Duration;
    fn mul(self, n: u64) -> Duration {
        Duration(self.0 * n)
    }
}

impl std::ops::Div<Duration> for Duration {
    type Output = u64;
    fn div(self, other: Duration) -> u64 {
        self.0 / other.0
    }
}

impl std::ops::Rem<Duration> for Duration {
    type Output = Duration;
    fn rem(self, other: Duration) -> Duration {
        Duration(self.0 % other.0)
    }
}

impl From<Service> for Duration {
    fn from(s: Service) -> Self {
        Duration(u64::from(s))
    }
}

impl From<Duration> for u64 {
    fn from(d: Duration) -> u64 {
        d.0
    }
}

impl std::fmt::Display for Duration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A specific point in time, expressed as an offset relative to the
/// start of the busy window under consideration (time zero).
///
/// An offset is always zero-based: `Offset::from_time_zero(Duration::zero())`
/// denotes time zero itself.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, From)]
pub struct Offset(u64);

impl Offset {
    /// The offset corresponding to the *start* of the interval `[0, d)`,
    /// i.e., an interval of length `d` that does not yet include `d` itself.
    pub fn from_time_zero(d: Duration) -> Self {
        Offset(u64::from(d))
    }

    /// The offset corresponding to the last instant covered by a
    /// *closed* interval of length `d`, i.e., `[0, d]`.
    pub fn closed_from_time_zero(d: Duration) -> Self {
        Offset(u64::from(d).saturating_sub(1))
    }

    /// The length of the half-open interval `[0, self)`.
    pub fn since_time_zero(self) -> Duration {
        Duration(self.0)
    }

    /// The length of the closed interval `[0, self]`.
    pub fn closed_since_time_zero(self) -> Duration {
        Duration(self.0 + 1)
    }

    /// The length of the interval separating `self` from a later offset.
    pub fn distance_to(self, other: Self) -> Duration {
        Duration(other.0.saturating_sub(self.0))
    }
}

impl std::ops::Add<Duration> for Offset {
    type Output = Offset;
    fn add(self, d: Duration) -> Offset {
        Offset(self.0 + u64::from(d))
    }
}

impl std::fmt::Display for Offset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An amount of processor service (i.e., an amount of time during which
/// a processor has executed some workload).
///
/// Kept as a type distinct from [Duration] because an amount of service
/// is not a point in time or the length of an interval, even though both
/// happen to be measured in the same unit under the discrete, unit-speed
/// time model used throughout this crate.
#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Add, Sub, AddAssign, SubAssign, Sum, From,
)]
pub struct Service(u64);

impl Service {
    /// No service at all.
    pub const fn none() -> Self {
        Service(0)
    }

    /// The smallest representable positive amount of service.
    pub const fn epsilon() -> Self {
        Service(1)
    }

    /// Construct a service amount from a raw count (e.g., a WCET value
    /// given directly by a caller).
    pub const fn in_interval(amount: u64) -> Self {
        Service(amount)
    }

    pub fn is_none(self) -> bool {
        self.0 == 0
    }

    pub fn is_non_zero(self) -> bool {
        self.0 != 0
    }

    pub fn saturating_sub(self, other: Self) -> Self {
        Service(self.0.saturating_sub(other.0))
    }
}

impl std::ops::Mul<u64> for Service {
    type Output = Service;
    fn mul(self, n: u64) -> Service {
        Service(self.0 * n)
    }
}

impl From<Duration> for Service {
    fn from(d: Duration) -> Self {
        Service(u64::from(d))
    }
}

impl From<Service> for u64 {
    fn from(s: Service) -> u64 {
        s.0
    }
}

impl std::fmt::Display for Service {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
