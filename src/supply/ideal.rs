use super::SupplyBound;
use crate::error::{ModelError, Result};
use crate::time::{Duration, Service};

/// A trivial model of a 100%-available, dedicated processor: there are
/// no delays due to resource unavailability under this model.
///
/// The `speed` parameter is reserved for future use (e.g., to model a
/// processor that runs faster or slower than real time); the current
/// analysis assumes unit speed and only validates that `speed` is
/// positive at construction time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdealProcessor {
    speed: u64,
}

impl IdealProcessor {
    pub fn new(speed: u64) -> Result<Self> {
        if speed == 0 {
            return Err(ModelError::InvalidConstruction(
                "processor speed must be positive".into(),
            ));
        }
        Ok(IdealProcessor { speed })
    }

    pub fn speed(&self) -> u64 {
        self.speed
    }
}

impl Default for IdealProcessor {
    fn default() -> Self {
        IdealProcessor { speed: 1 }
    }
}

impl SupplyBound for IdealProcessor {
    fn provided_service(&self, delta: Duration) -> Service {
        Service::from(delta)
    }

    fn service_time(&self, demand: Service) -> Duration {
        Duration::from(demand)
    }
}
