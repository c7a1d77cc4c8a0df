use crate::arrival::{self, ArrivalBound, ArrivalCurvePrefix, Curve, Periodic, Sporadic};
use crate::time::{Duration, Offset};

use crate::tests::{d, dv};

fn brute_force_iter_check<T: ArrivalBound>(ab: &T) {
    let si100 = ab.steps_iter().take(100);
    let bf100 = ab.brute_force_steps_iter().take(100);

    for (s1, s2) in si100.zip(bf100) {
        assert_eq!(s1, s2)
    }
}

#[test]
fn periodic_arrivals() {
    let a = Periodic { period: d(10) };
    assert_eq!(a.number_arrivals(d(0)), 0);
    assert_eq!(a.number_arrivals(d(1)), 1);
    assert_eq!(a.number_arrivals(d(8)), 1);
    assert_eq!(a.number_arrivals(d(10)), 1);
    assert_eq!(a.number_arrivals(d(11)), 2);
    assert_eq!(a.number_arrivals(d(12)), 2);
    assert_eq!(a.number_arrivals(d(13)), 2);
    assert_eq!(a.number_arrivals(d(100)), 10);
    assert_eq!(a.number_arrivals(d(105)), 11);
}

#[test]
fn periodic_iter() {
    let p = Periodic { period: d(10) };
    let steps: Vec<_> = p.steps_iter().take(5).collect();
    assert_eq!(steps, [d(1), d(11), d(21), d(31), d(41)]);
    brute_force_iter_check(&p);
}

#[test]
fn periodic_arrivals_via_curve() {
    let p = Periodic { period: d(10) };
    let c = Curve::from(p);
    for delta in 0..1000 {
        assert_eq!(p.number_arrivals(d(delta)), c.number_arrivals(d(delta)));
    }
    brute_force_iter_check(&c);
}

#[test]
fn sporadic_arrivals() {
    let a = Sporadic {
        min_inter_arrival: d(10),
        jitter: d(3),
    };
    assert_eq!(a.number_arrivals(d(0)), 0);
    assert_eq!(a.number_arrivals(d(1)), 1);
    assert_eq!(a.number_arrivals(d(8)), 2);
    assert_eq!(a.number_arrivals(d(10)), 2);
    assert_eq!(a.number_arrivals(d(11)), 2);
    assert_eq!(a.number_arrivals(d(100)), 11);
    assert_eq!(a.number_arrivals(d(107)), 11);
    assert_eq!(a.number_arrivals(d(108)), 12);
    assert_eq!(a.number_arrivals(d(1108)), 112);
}

#[test]
fn sporadic_periodic_with_jitter_matches_convention() {
    let via_new = Sporadic {
        min_inter_arrival: d(10),
        jitter: d(3),
    };
    let via_constructor = Sporadic::periodic_with_jitter(d(10), d(3));
    for delta in 0..1000 {
        assert_eq!(
            via_new.number_arrivals(d(delta)),
            via_constructor.number_arrivals(d(delta))
        );
    }
}

#[test]
fn jitter_free_sporadic_matches_convention() {
    let via_new = Sporadic {
        min_inter_arrival: d(10),
        jitter: d(0),
    };
    let via_constructor = Sporadic::new(d(10));
    for delta in 0..1000 {
        assert_eq!(
            via_new.number_arrivals(d(delta)),
            via_constructor.number_arrivals(d(delta))
        );
    }
}

#[test]
fn sporadic_arrivals_large_jitter() {
    let a = Sporadic {
        min_inter_arrival: d(10),
        jitter: d(16),
    };
    assert_eq!(a.number_arrivals(d(0)), 0);
    assert_eq!(a.number_arrivals(d(1)), 2);
    assert_eq!(a.number_arrivals(d(4)), 2);
    assert_eq!(a.number_arrivals(d(5)), 3);
}

#[test]
fn compare_sporadic_arrivals_against_curve() {
    let s = Sporadic {
        min_inter_arrival: d(10),
        jitter: d(16),
    };
    let a = Curve::from(s);
    for delta in 0..1000 {
        assert_eq!(a.number_arrivals(d(delta)), s.number_arrivals(d(delta)));
    }
}

#[test]
fn sporadic_iter() {
    let s1 = Sporadic {
        min_inter_arrival: d(10),
        jitter: d(3),
    };
    let steps1: Vec<_> = s1.steps_iter().take(6).collect();
    assert_eq!(steps1, dv(&[1, 8, 18, 28, 38, 48]));

    let s2 = Sporadic {
        min_inter_arrival: d(10),
        jitter: d(16),
    };
    let steps2: Vec<_> = s2.steps_iter().take(6).collect();
    assert_eq!(steps2, dv(&[1, 5, 15, 25, 35, 45]));

    brute_force_iter_check(&s1);
    brute_force_iter_check(&s2);
}

#[test]
fn curve_from_arrival_bound_matches_periodic() {
    let p = Periodic { period: d(15) };
    let c = Curve::from_arrival_bound(&p, 12);
    for delta in 0..=150 {
        let delta = d(delta);
        assert_eq!(p.number_arrivals(delta), c.number_arrivals(delta));
    }
}

#[test]
fn curve_from_trace() {
    let trace: Vec<u64> = vec![0, 10, 20, 30, 40];
    let a = Curve::from_trace(trace.iter().map(|x| Offset::from(*x)), 10);
    assert_eq!(a.number_arrivals(d(0)), 0);
    assert_eq!(a.number_arrivals(d(1)), 1);
    assert_eq!(a.number_arrivals(d(8)), 1);
    assert_eq!(a.number_arrivals(d(10)), 1);
    assert_eq!(a.number_arrivals(d(11)), 2);
}

#[test]
fn curve_extrapolate_reaches_horizon() {
    let p = Periodic { period: d(10) };
    let mut c = Curve::from_arrival_bound(&p, 3);
    assert_eq!(c.min_distance(2), d(10));
    c.extrapolate(d(500));
    assert!(c.min_distance(3) <= d(500));
}

#[test]
fn extrapolating_curve_matches_plain_curve() {
    let p = Periodic { period: d(10) };
    let mut curve = Curve::from_arrival_bound(&p, 3);
    let od_curve = arrival::ExtrapolatingCurve::new(curve.clone());

    let horizon = d(200);
    curve.extrapolate(horizon);

    for delta in 0..=200 {
        assert_eq!(
            curve.number_arrivals(d(delta)),
            od_curve.number_arrivals(d(delta))
        )
    }

    for (s1, s2) in curve
        .steps_iter()
        .take_while(|s1| *s1 <= horizon)
        .zip(od_curve.steps_iter())
    {
        assert_eq!(s1, s2)
    }

    brute_force_iter_check(&curve);
    brute_force_iter_check(&od_curve);
}

#[test]
fn arrival_curve_prefix_steps_iter() {
    let horizon = d(100);
    let steps = vec![(d(1), 1), (d(10), 2), (d(21), 3), (d(45), 4)];
    let ac = ArrivalCurvePrefix::new(horizon, steps);

    let mut steps = ac.steps_iter();

    assert_eq!(steps.next(), Some(d(0)));
    assert_eq!(steps.next(), Some(d(1)));
    assert_eq!(steps.next(), Some(d(10)));
    assert_eq!(steps.next(), Some(d(21)));
    assert_eq!(steps.next(), Some(d(45)));
    assert_eq!(steps.next(), Some(d(101)));
    assert_eq!(steps.next(), Some(d(110)));
}

#[test]
#[allow(clippy::identity_op)]
fn arrival_curve_prefix_number_arrivals() {
    let horizon = d(100);
    let steps = vec![(d(1), 1), (d(10), 2), (d(21), 3), (d(45), 4)];
    let ac = ArrivalCurvePrefix::new(horizon, steps);

    assert_eq!(ac.number_arrivals(d(0)), 0);
    assert_eq!(ac.number_arrivals(d(5)), 1);
    assert_eq!(ac.number_arrivals(d(9)), 1);
    assert_eq!(ac.number_arrivals(d(10)), 2);
    assert_eq!(ac.number_arrivals(d(15)), 2);
    assert_eq!(ac.number_arrivals(d(24)), 3);
    assert_eq!(ac.number_arrivals(d(42)), 3);
    assert_eq!(ac.number_arrivals(d(57)), 4);

    assert_eq!(ac.number_arrivals(d(100)), 0 + 4);
    assert_eq!(ac.number_arrivals(d(105)), 1 + 4);
    assert_eq!(ac.number_arrivals(d(200)), 0 + 8);
}

#[test]
fn arrival_curve_prefix_to_curve() {
    let horizon = d(11);
    let steps = vec![(d(1), 1), (d(3), 2), (d(5), 3), (d(7), 4)];
    let ac = ArrivalCurvePrefix::new(horizon, steps);
    let curve = Curve::from(ac.clone());

    for delta in 0..=11 {
        assert_eq!(curve.number_arrivals(d(delta)), ac.number_arrivals(d(delta)));
    }
}

#[test]
fn arrival_curve_prefix_idempotent_without_wider_horizon() {
    let horizon = d(100);
    let steps = vec![(d(1), 1), (d(5), 2), (d(9), 3)];
    let acp = ArrivalCurvePrefix::new(horizon, steps);
    let widened = acp.as_arrival_curve_prefix(Some(d(50)));
    assert_eq!(widened.number_arrivals(d(50)), acp.number_arrivals(d(50)));
}

#[test]
fn arrival_curve_prefix_widens_to_requested_horizon() {
    let p = Periodic { period: d(10) };
    let acp = p.as_arrival_curve_prefix(Some(d(25)));
    for delta in 0..=25 {
        assert_eq!(acp.number_arrivals(d(delta)), p.number_arrivals(d(delta)));
    }
}
