/*! Models of resource supply (e.g., dedicated processors, periodic servers)

This module provides the trait [SupplyBound], which models the notion of
a *supply-bound function* (SBF), as well as the two concrete models
analyzed throughout this crate. */

use auto_impl::auto_impl;

use crate::time::{Duration, Service};

/// Generic interface for models of processor supply.
#[auto_impl(&, Box, Rc)]
pub trait SupplyBound {
    /// Bound the minimum amount of service provided during an
    /// interval of length `delta`.
    fn provided_service(&self, delta: Duration) -> Service;

    /// Bound the maximum interval length during which the supply
    /// provides at least `demand` amount of service.
    ///
    /// The default implementation assumes `provided_service` is
    /// non-decreasing and searches forward in jumps of the remaining
    /// shortfall; models with a closed-form inverse should override it.
    fn service_time(&self, demand: Service) -> Duration {
        if demand.is_none() {
            return Duration::zero();
        }
        let mut t = Duration::from(demand);
        loop {
            let supply = self.provided_service(t);
            if supply >= demand {
                return t;
            }
            t += Duration::from(demand.saturating_sub(supply));
        }
    }
}

mod ideal;
mod rate_delay;

pub use ideal::IdealProcessor;
pub use rate_delay::RateDelayModel;
