//! Unit tests for pdp-core primitives.

#[cfg(test)]
mod geo {
    use crate::Point;

    #[test]
    fn zero_distance() {
        let p = Point::new(1.5, -2.0);
        assert_eq!(p.distance(p), 0.0);
    }

    #[test]
    fn pythagorean_distance() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(3.0, 4.0);
        assert!((a.distance(b) - 5.0).abs() < 1e-12);
        assert_eq!(a.distance(b), b.distance(a));
    }

    #[test]
    fn midpoint() {
        let m = Point::new(-1.0, 2.0).midpoint(Point::new(3.0, 4.0));
        assert_eq!(m, Point::new(1.0, 3.0));
    }

    #[test]
    fn display() {
        assert_eq!(Point::new(1.0, -0.5).to_string(), "(1.0000, -0.5000)");
    }
}

#[cfg(test)]
mod time {
    use proptest::prelude::*;

    use crate::{CoreError, TimeLapse, TimeUnit};

    #[test]
    fn unit_conversion() {
        assert_eq!(TimeUnit::Millisecond.to_internal(100), Ok(100));
        assert_eq!(TimeUnit::Second.to_internal(1), Ok(1_000));
        assert_eq!(TimeUnit::Second.to_internal(100), Ok(100_000));
        assert_eq!(TimeUnit::Minute.to_internal(5), Ok(300_000));
        assert_eq!(TimeUnit::Hour.to_internal(4), Ok(14_400_000));
    }

    #[test]
    fn zero_tick_length_rejected() {
        assert_eq!(
            TimeUnit::Second.to_internal(0),
            Err(CoreError::InvalidTickLength(TimeUnit::Second))
        );
    }

    #[test]
    fn overflow_rejected() {
        assert!(matches!(
            TimeUnit::Hour.to_internal(u64::MAX),
            Err(CoreError::TickLengthOverflow { .. })
        ));
    }

    #[test]
    fn default_unit_is_internal_unit() {
        assert_eq!(TimeUnit::default(), TimeUnit::Millisecond);
        assert_eq!(TimeUnit::default().millis(), 1);
    }

    #[test]
    fn time_lapse_accessors() {
        let tl = TimeLapse::new(2_000, 1_000);
        assert_eq!(tl.time(), 2_000);
        assert_eq!(tl.end_time(), 3_000);
        assert_eq!(tl.time_step(), 1_000);
        assert!(tl.contains(2_000));
        assert!(tl.contains(2_999));
        assert!(!tl.contains(3_000));
        assert_eq!(tl.to_string(), "[2000, 3000)");
    }

    proptest! {
        #[test]
        fn conversion_is_linear(len in 1u64..1_000_000) {
            let ms = TimeUnit::Minute.to_internal(len).unwrap();
            prop_assert_eq!(ms, TimeUnit::Second.to_internal(len * 60).unwrap());
        }
    }
}

#[cfg(test)]
mod rng {
    use crate::SimRng;

    #[test]
    fn deterministic_same_seed() {
        let mut r1 = SimRng::new(12345);
        let mut r2 = SimRng::new(12345);
        for _ in 0..100 {
            assert_eq!(r1.next_seed(), r2.next_seed());
            assert_eq!(r1.next_f64(), r2.next_f64());
        }
    }

    #[test]
    fn reseed_restarts_stream() {
        let mut r = SimRng::new(7);
        let first: Vec<u64> = (0..5).map(|_| r.next_seed()).collect();
        r.reseed(7);
        let again: Vec<u64> = (0..5).map(|_| r.next_seed()).collect();
        assert_eq!(first, again);
    }

    #[test]
    fn different_seeds_differ() {
        let a = SimRng::new(1).next_seed();
        let b = SimRng::new(2).next_seed();
        assert_ne!(a, b);
    }

    #[test]
    fn unit_draws_in_bounds() {
        let mut rng = SimRng::new(0);
        for _ in 0..1000 {
            let v = rng.next_f64();
            assert!((0.0..1.0).contains(&v));
            assert!(rng.next_exponential(10.0) >= 0.0);
        }
    }

    #[test]
    fn exponential_mean_is_close() {
        let mut rng = SimRng::new(42);
        let n = 20_000;
        let mean: f64 = (0..n).map(|_| rng.next_exponential(5.0)).sum::<f64>() / n as f64;
        assert!((mean - 5.0).abs() < 0.25, "mean = {mean}");
    }
}
