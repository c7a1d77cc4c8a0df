use super::SupplyBound;
use crate::error::{ModelError, Result};
use crate::time::{Duration, Service};

/// A periodic, rate-based resource model: over any window of length
/// `period`, the supply is guaranteed to deliver at least `allocation`
/// units of service, but delivery may be delayed by up to `delay` time
/// units after the window begins.
///
/// Concretely, `S(delta) = max(0, floor(allocation * (delta - delay) / period))`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateDelayModel {
    period: Duration,
    allocation: Service,
    delay: Duration,
}

impl RateDelayModel {
    pub fn new(period: Duration, allocation: Service, delay: Duration) -> Result<Self> {
        if period.is_zero() {
            return Err(ModelError::InvalidConstruction("period must be positive".into()));
        }
        if allocation.is_none() {
            return Err(ModelError::InvalidConstruction(
                "allocation must be positive".into(),
            ));
        }
        if Duration::from(allocation) > period {
            return Err(ModelError::InvalidConstruction(
                "allocation cannot exceed the period".into(),
            ));
        }
        Ok(RateDelayModel {
            period,
            allocation,
            delay,
        })
    }
}

impl SupplyBound for RateDelayModel {
    fn provided_service(&self, delta: Duration) -> Service {
        let elapsed = delta.saturating_sub(self.delay);
        Service::from(Duration::from(
            (u64::from(self.allocation) * u64::from(elapsed)) / u64::from(self.period),
        ))
    }

    fn service_time(&self, demand: Service) -> Duration {
        if demand.is_none() {
            return Duration::zero();
        }
        let numerator = u64::from(demand) * u64::from(self.period);
        let alloc = u64::from(self.allocation);
        let elapsed = Duration::from((numerator + alloc - 1) / alloc);
        self.delay + elapsed
    }
}
