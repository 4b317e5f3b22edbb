//! Unit tests for cw-core primitives.

#[cfg(test)]
mod ids {
    use crate::SiteId;
    use crate::ids::{AlertId, BookingId};

    #[test]
    fn index_roundtrip() {
        let id = SiteId(3);
        assert_eq!(id.index(), 3);
        assert_eq!(SiteId::try_from(3usize).unwrap(), id);
    }

    #[test]
    fn invalid_sentinels_are_max() {
        assert_eq!(SiteId::INVALID.0, u32::MAX);
        assert_eq!(AlertId::INVALID.0, u32::MAX);
        assert_eq!(BookingId::INVALID.0, u32::MAX);
    }

    #[test]
    fn display() {
        assert_eq!(SiteId(7).to_string(), "SiteId(7)");
    }
}

#[cfg(test)]
mod geo {
    use crate::GeoPoint;

    #[test]
    fn zero_distance() {
        let p = GeoPoint::new(20.888, 70.4017);
        assert!(p.distance_m(p) < 0.01);
    }

    #[test]
    fn one_degree_latitude() {
        let a = GeoPoint::new(22.0, 70.0);
        let b = GeoPoint::new(23.0, 70.0);
        let d = a.distance_m(b);
        assert!((d - 111_195.0).abs() < 500.0, "got {d}");
    }

    #[test]
    fn validity() {
        assert!(GeoPoint::new(22.2394, 68.9678).is_valid());
        assert!(!GeoPoint::new(91.0, 0.0).is_valid());
        assert!(!GeoPoint::new(f32::NAN, 0.0).is_valid());
    }
}

#[cfg(test)]
mod time {
    use crate::Tick;

    #[test]
    fn tick_arithmetic() {
        assert_eq!(Tick(10) + 5, Tick(15));
        assert_eq!(Tick(4).next(), Tick(5));
    }

    #[test]
    fn every_boundary() {
        assert!(Tick(0).is_every(3));
        assert!(Tick(6).is_every(3));
        assert!(!Tick(7).is_every(3));
        assert!(!Tick(0).is_every(0));
    }
}

#[cfg(test)]
mod tier {
    use crate::StatusTier;

    #[test]
    fn thresholds_are_inclusive_lower() {
        assert_eq!(StatusTier::classify(0, 100), StatusTier::Safe);
        assert_eq!(StatusTier::classify(49, 100), StatusTier::Safe);
        assert_eq!(StatusTier::classify(50, 100), StatusTier::Moderate);
        assert_eq!(StatusTier::classify(79, 100), StatusTier::Moderate);
        assert_eq!(StatusTier::classify(80, 100), StatusTier::Crowded);
        assert_eq!(StatusTier::classify(100, 100), StatusTier::Crowded);
    }

    #[test]
    fn reference_site_is_moderate() {
        // 4200 / 6000 = 0.70
        assert_eq!(StatusTier::classify(4200, 6000), StatusTier::Moderate);
        assert_eq!(StatusTier::classify(6000, 6000), StatusTier::Crowded);
    }

    #[test]
    fn boundaries_with_odd_capacity() {
        // 0.5 * 4501 = 2250.5
        assert_eq!(StatusTier::classify(2250, 4501), StatusTier::Safe);
        assert_eq!(StatusTier::classify(2251, 4501), StatusTier::Moderate);
    }

    #[test]
    fn zero_capacity_is_crowded() {
        assert_eq!(StatusTier::classify(0, 0), StatusTier::Crowded);
    }

    #[test]
    fn parse_and_display() {
        assert_eq!("Crowded".parse::<StatusTier>().unwrap(), StatusTier::Crowded);
        assert_eq!(StatusTier::Moderate.to_string(), "moderate");
        assert!("packed".parse::<StatusTier>().is_err());
    }
}

#[cfg(test)]
mod peak {
    use crate::{PeakSchedule, PeakWindow};

    #[test]
    fn default_windows() {
        let s = PeakSchedule::default();
        assert!(!s.is_peak(5));
        assert!(s.is_peak(6));
        assert!(s.is_peak(9));
        assert!(!s.is_peak(10));
        assert!(s.is_peak(18));
        assert!(s.is_peak(20));
        assert!(!s.is_peak(21));
    }

    #[test]
    fn none_is_never_peak() {
        let s = PeakSchedule::none();
        assert!((0..24).all(|h| !s.is_peak(h)));
    }

    #[test]
    fn validate_rejects_bad_windows() {
        assert!(PeakSchedule(vec![PeakWindow::new(9, 6)]).validate().is_err());
        assert!(PeakSchedule(vec![PeakWindow::new(22, 24)]).validate().is_err());
        assert!(PeakSchedule::default().validate().is_ok());
    }
}

#[cfg(test)]
mod config {
    use crate::SimulatorConfig;

    #[test]
    fn defaults() {
        let cfg = SimulatorConfig::default();
        assert_eq!(cfg.interval_ms, 25_000);
        assert_eq!(cfg.interval().as_secs(), 25);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn zero_interval_rejected() {
        let cfg = SimulatorConfig { interval_ms: 0, ..SimulatorConfig::default() };
        assert!(cfg.validate().is_err());
    }
}

#[cfg(test)]
mod rng {
    use crate::{SimRng, SiteId, SiteRng};

    #[test]
    fn deterministic_same_seed() {
        let mut r1 = SiteRng::new(12345, SiteId(0));
        let mut r2 = SiteRng::new(12345, SiteId(0));
        for _ in 0..100 {
            assert_eq!(r1.step(50), r2.step(50));
        }
    }

    #[test]
    fn different_sites_differ() {
        let mut r0 = SiteRng::new(1, SiteId(0));
        let mut r1 = SiteRng::new(1, SiteId(1));
        let a: Vec<i32> = (0..8).map(|_| r0.step(1_000_000)).collect();
        let b: Vec<i32> = (0..8).map(|_| r1.step(1_000_000)).collect();
        assert_ne!(a, b, "seeds for adjacent sites should diverge");
    }

    #[test]
    fn step_in_bounds() {
        let mut rng = SiteRng::new(0, SiteId(0));
        for _ in 0..1000 {
            let v = rng.step(15);
            assert!((-15..15).contains(&v));
        }
        assert_eq!(rng.step(0), 0);
    }

    #[test]
    fn sim_rng_children_are_reproducible() {
        let mut a = SimRng::new(9);
        let mut b = SimRng::new(9);
        let x: u64 = a.child(1).random();
        let y: u64 = b.child(1).random();
        assert_eq!(x, y);
    }
}
