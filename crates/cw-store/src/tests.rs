//! Unit tests for cw-store.

use cw_core::{GeoPoint, SiteId, StatusTier};

use crate::{MetricStore, MetricStoreBuilder, SiteSpec};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn somnath() -> SiteSpec {
    SiteSpec::new("Somnath Temple", 6_000, 500)
        .location("Somnath, Gujarat")
        .position(GeoPoint::new(20.8880, 70.4017))
        .occupancy(4_200)
        .parking_available(245)
        .zone("main_temple", 85)
        .zone("queue_area", 78)
        .zone("parking", 49)
        .zone("food_court", 32)
        .zone("museum", 15)
}

fn dwarka() -> SiteSpec {
    SiteSpec::new("Dwarkadhish Temple", 4_500, 300)
        .position(GeoPoint::new(22.2394, 68.9678))
        .occupancy(3_150)
        .parking_available(123)
        .zone("main_temple", 92)
        .zone("ghat_area", 55)
}

fn pavagadh() -> SiteSpec {
    SiteSpec::new("Pavagadh Temple", 3_000, 200)
        .position(GeoPoint::new(22.4862, 73.5292))
        .occupancy(1_950)
        .parking_available(67)
        .zone("ropeway_station", 82)
}

/// A site smaller than the occupancy floor, with zones at both bounds.
fn shrine() -> SiteSpec {
    SiteSpec::new("Roadside Shrine", 80, 4)
        .occupancy(80)
        .parking_available(0)
        .zone("inner", 95)
        .zone("outer", 10)
}

fn store(seed: u64) -> MetricStore {
    MetricStoreBuilder::new(seed)
        .sites([somnath(), dwarka(), pavagadh(), shrine()])
        .build()
        .unwrap()
}

fn assert_invariants(store: &MetricStore) {
    for site in store.all() {
        assert!(
            site.occupancy() >= site.occupancy_floor() && site.occupancy() <= site.capacity(),
            "{}: occupancy {} outside [{}, {}]",
            site.name(), site.occupancy(), site.occupancy_floor(), site.capacity()
        );
        assert!(site.parking_available() <= site.parking_capacity());
        for z in site.zones() {
            assert!((10..=95).contains(&z.density), "{}: zone {} = {}", site.name(), z.name, z.density);
        }
        assert_eq!(site.tier(), StatusTier::classify(site.occupancy(), site.capacity()));
    }
}

// ── Builder ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod builder_tests {
    use super::*;
    use crate::StoreError;

    #[test]
    fn ids_follow_creation_order() {
        let s = store(1);
        let names: Vec<_> = s.all().iter().map(|x| x.name()).collect();
        assert_eq!(names, ["Somnath Temple", "Dwarkadhish Temple", "Pavagadh Temple", "Roadside Shrine"]);
        for (i, site) in s.all().iter().enumerate() {
            assert_eq!(site.id(), SiteId(i as u32));
        }
    }

    #[test]
    fn initial_tier_and_wait_are_derived() {
        let s = store(1);
        let site = s.get(SiteId(0)).unwrap();
        assert_eq!(site.tier(), StatusTier::Moderate);
        // 4200 / 6000 * 80
        assert_eq!(site.wait_minutes(), 56);
    }

    #[test]
    fn explicit_wait_is_kept() {
        let s = MetricStoreBuilder::new(0)
            .site(somnath().wait_minutes(45))
            .build()
            .unwrap();
        assert_eq!(s.all()[0].wait_minutes(), 45);
    }

    #[test]
    fn defaults_fill_occupancy_and_parking() {
        let s = MetricStoreBuilder::new(0)
            .site(SiteSpec::new("Big", 1_000, 40))
            .site(SiteSpec::new("Tiny", 50, 5))
            .build()
            .unwrap();
        assert_eq!(s.all()[0].occupancy(), 100);
        assert_eq!(s.all()[0].parking_available(), 40);
        assert_eq!(s.all()[1].occupancy(), 50, "floor is capped at capacity");
    }

    #[test]
    fn zero_capacity_rejected() {
        let r = MetricStoreBuilder::new(0).site(SiteSpec::new("X", 0, 10)).build();
        assert!(matches!(r, Err(StoreError::InvalidSite { .. })));
        let r = MetricStoreBuilder::new(0).site(SiteSpec::new("X", 10, 0)).build();
        assert!(matches!(r, Err(StoreError::InvalidSite { .. })));
    }

    #[test]
    fn out_of_range_values_rejected() {
        let over = SiteSpec::new("X", 100, 10).occupancy(101);
        assert!(MetricStoreBuilder::new(0).site(over).build().is_err());

        let parking = SiteSpec::new("X", 100, 10).parking_available(11);
        assert!(MetricStoreBuilder::new(0).site(parking).build().is_err());

        let zone = SiteSpec::new("X", 100, 10).zone("gate", 9);
        assert!(MetricStoreBuilder::new(0).site(zone).build().is_err());

        let pos = SiteSpec::new("X", 100, 10).position(GeoPoint::new(120.0, 0.0));
        assert!(MetricStoreBuilder::new(0).site(pos).build().is_err());
    }

    #[test]
    fn duplicates_rejected() {
        let r = MetricStoreBuilder::new(0).site(somnath()).site(somnath()).build();
        assert!(matches!(r, Err(StoreError::DuplicateSite(name)) if name == "Somnath Temple"));

        let r = MetricStoreBuilder::new(0)
            .site(SiteSpec::new("X", 100, 10).zone("gate", 20).zone("gate", 30))
            .build();
        assert!(matches!(r, Err(StoreError::DuplicateZone { .. })));
    }
}

// ── apply_delta ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod delta_tests {
    use super::*;
    use crate::SiteDelta;

    #[test]
    fn occupancy_clamps_to_capacity_and_reclassifies() {
        let mut s = store(1);
        assert_eq!(s.get(SiteId(0)).unwrap().tier(), StatusTier::Moderate);

        let site = s
            .apply(SiteId(0), &SiteDelta { occupancy: 2_000, ..SiteDelta::default() })
            .unwrap();
        assert_eq!(site.occupancy(), 6_000);
        assert_eq!(site.load_pct(), 100);
        assert_eq!(site.tier(), StatusTier::Crowded);
    }

    #[test]
    fn parking_clamps_to_zero() {
        let mut s = store(1);
        let site = s
            .apply(SiteId(0), &SiteDelta { parking: -400, ..SiteDelta::default() })
            .unwrap();
        assert_eq!(site.parking_available(), 0);
    }

    #[test]
    fn occupancy_floor_holds() {
        let mut s = store(1);
        let site = s
            .apply(SiteId(0), &SiteDelta { occupancy: -1_000_000, ..SiteDelta::default() })
            .unwrap();
        assert_eq!(site.occupancy(), 100);
        assert_eq!(site.tier(), StatusTier::Safe);
    }

    #[test]
    fn zones_clamp_to_bounds() {
        let mut s = store(1);
        let delta = SiteDelta { zones: vec![100, -100, 0], ..SiteDelta::default() };
        let site = s.apply(SiteId(0), &delta).unwrap();
        assert_eq!(site.zone_density("main_temple"), Some(95));
        assert_eq!(site.zone_density("queue_area"), Some(10));
        assert_eq!(site.zone_density("parking"), Some(49));
        // Zones without a delta are untouched.
        assert_eq!(site.zone_density("museum"), Some(15));
    }

    #[test]
    fn wait_is_load_plus_jitter() {
        let mut s = store(1);
        let delta = SiteDelta {
            occupancy:              1_800,
            wait_jitter:            7,
            full_load_wait_minutes: 90,
            ..SiteDelta::default()
        };
        let site = s.apply(SiteId(0), &delta).unwrap();
        assert_eq!(site.occupancy(), 6_000);
        assert_eq!(site.wait_minutes(), 97);
    }

    #[test]
    fn huge_wait_jitter_saturates() {
        let mut s = store(1);
        let delta = SiteDelta { wait_jitter: u32::MAX, ..SiteDelta::default() };
        let site = s.apply(SiteId(0), &delta).unwrap();
        assert_eq!(site.wait_minutes(), u32::MAX);
        assert_eq!(site.occupancy(), 4_200);
    }

    #[test]
    fn huge_full_load_wait_saturates() {
        let mut s = store(1);
        let delta = SiteDelta { full_load_wait_minutes: u32::MAX, ..SiteDelta::default() };
        let site = s.apply(SiteId(0), &delta).unwrap();
        // 4200/6000 of u32::MAX still fits; jitter 0.
        assert_eq!(site.wait_minutes(), (u32::MAX as u64 * 4_200 / 6_000) as u32);

        let delta = SiteDelta {
            full_load_wait_minutes: u32::MAX,
            wait_jitter:            u32::MAX,
            ..SiteDelta::default()
        };
        assert_eq!(s.apply(SiteId(0), &delta).unwrap().wait_minutes(), u32::MAX);
    }

    #[test]
    fn extreme_profile_at_peak_keeps_invariants() {
        let mut s = store(9);
        let profile = crate::RefreshProfile {
            occupancy_step: i32::MAX,
            parking_step:   i32::MAX,
            zone_step:      i32::MAX,
            wait_jitter:    u32::MAX,
            ..crate::RefreshProfile::LIVE
        };
        for _ in 0..50 {
            s.refresh_with(&profile, true);
            assert_invariants(&s);
        }
    }

    #[test]
    fn apply_unknown_site_is_not_found() {
        let mut s = store(1);
        let r = s.apply(SiteId(42), &SiteDelta::default());
        assert!(matches!(r, Err(cw_core::CwError::SiteNotFound(SiteId(42)))));
    }
}

// ── refresh ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod refresh_tests {
    use super::*;
    use crate::RefreshProfile;

    #[test]
    fn invariants_hold_over_many_refreshes() {
        let mut s = store(7);
        assert_invariants(&s);
        for i in 0..500 {
            s.refresh(i % 3 == 0);
            assert_invariants(&s);
        }
        for _ in 0..200 {
            s.refresh_with(&RefreshProfile::MANUAL, true);
            assert_invariants(&s);
        }
        assert_eq!(s.refresh_count(), 700);
    }

    #[test]
    fn same_seed_same_trajectory() {
        let mut a = store(2024);
        let mut b = store(2024);
        for i in 0..50 {
            a.refresh(i % 2 == 0);
            b.refresh(i % 2 == 0);
        }
        assert_eq!(a.all(), b.all());
    }

    #[test]
    fn different_seed_diverges() {
        let mut a = store(1);
        let mut b = store(2);
        for _ in 0..50 {
            a.refresh(false);
            b.refresh(false);
        }
        assert_ne!(a.all(), b.all());
    }

    #[test]
    fn off_peak_step_is_bounded() {
        let mut s = store(3);
        for _ in 0..100 {
            let before = s.get(SiteId(0)).unwrap().occupancy() as i64;
            s.refresh(false);
            let after = s.get(SiteId(0)).unwrap().occupancy() as i64;
            assert!((after - before).abs() <= 50, "moved {}", after - before);
        }
    }

    #[test]
    fn peak_step_is_doubled() {
        // Somnath starts mid-range; 15 peak steps of at most 100 cannot reach
        // either bound, so every move is an unclamped doubled draw.
        let mut s = store(4);
        for _ in 0..15 {
            let before = s.get(SiteId(0)).unwrap().occupancy() as i64;
            s.refresh(true);
            let after = s.get(SiteId(0)).unwrap().occupancy() as i64;
            let moved = after - before;
            assert!(moved.abs() <= 100, "moved {moved}");
            assert_eq!(moved % 2, 0, "peak delta must be an even multiple");
        }
    }

    #[test]
    fn wait_tracks_load() {
        let mut s = store(5);
        for _ in 0..100 {
            s.refresh(false);
            for site in s.all() {
                let base = site.occupancy() * 80 / site.capacity();
                assert!(
                    (base..base + 20).contains(&site.wait_minutes()),
                    "{}: wait {} for base {base}",
                    site.name(),
                    site.wait_minutes()
                );
            }
        }
    }
}

// ── Reads ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod read_tests {
    use super::*;
    use cw_core::CwError;

    #[test]
    fn get_unknown_is_not_found() {
        let s = store(1);
        assert!(matches!(s.get(SiteId(99)), Err(CwError::SiteNotFound(SiteId(99)))));
        assert!(matches!(s.get_by_name("Nowhere"), Err(CwError::SiteNameNotFound(_))));
    }

    #[test]
    fn get_by_name_finds_site() {
        let s = store(1);
        assert_eq!(s.get_by_name("Pavagadh Temple").unwrap().id(), SiteId(2));
    }

    #[test]
    fn by_tier_filters_in_order() {
        let s = store(1);
        // Somnath 0.70, Dwarka 0.70, Pavagadh 0.65, Shrine 1.0
        let moderate: Vec<_> = s.by_tier(StatusTier::Moderate).map(|x| x.id()).collect();
        assert_eq!(moderate, [SiteId(0), SiteId(1), SiteId(2)]);
        let crowded: Vec<_> = s.by_tier(StatusTier::Crowded).map(|x| x.id()).collect();
        assert_eq!(crowded, [SiteId(3)]);
        assert_eq!(s.by_tier(StatusTier::Safe).count(), 0);
    }

    #[test]
    fn nearest_site() {
        let s = store(1);
        let veraval = GeoPoint::new(20.907, 70.367);
        assert_eq!(s.nearest(veraval).unwrap().name(), "Somnath Temple");

        let vadodara = GeoPoint::new(22.307, 73.181);
        let order: Vec<_> = s.k_nearest(vadodara, 5).iter().map(|x| x.name()).collect();
        // The shrine has no position and is never returned.
        assert_eq!(order, ["Pavagadh Temple", "Somnath Temple", "Dwarkadhish Temple"]);
    }

    #[test]
    fn nearest_without_positions_is_none() {
        let s = MetricStoreBuilder::new(0).site(shrine()).build().unwrap();
        assert!(s.nearest(GeoPoint::new(0.0, 0.0)).is_none());
    }

    #[test]
    fn summary_totals() {
        let s = MetricStoreBuilder::new(0)
            .site(SiteSpec::new("A", 1_000, 100).occupancy(500).wait_minutes(30).parking_available(40))
            .site(SiteSpec::new("B", 2_000, 50).occupancy(1_700).wait_minutes(50).parking_available(10))
            .build()
            .unwrap();
        let sum = s.summary();
        assert_eq!(sum.site_count, 2);
        assert_eq!(sum.total_occupancy, 2_200);
        assert_eq!(sum.total_capacity, 3_000);
        assert_eq!(sum.average_load_pct, 68); // (50 + 85) / 2 = 67.5
        assert_eq!(sum.average_wait_minutes, 40);
        assert_eq!(sum.total_parking, 50);
        assert_eq!(sum.crowded_sites, 1);
    }

    #[test]
    fn empty_store_summary_is_zero() {
        let s = MetricStoreBuilder::new(0).build().unwrap();
        assert!(s.is_empty());
        assert_eq!(s.summary().site_count, 0);
        assert_eq!(s.summary().average_load_pct, 0);
    }
}

// ── CSV loader ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod loader_tests {
    use std::io::Cursor;

    use super::*;
    use crate::{load_sites_reader, StoreError};

    const SITES_CSV: &str = "\
name,location,lat,lon,capacity,occupancy,parking_capacity,parking_available,zones\n\
Somnath Temple,\"Somnath, Gujarat\",20.8880,70.4017,6000,4200,500,245,main_temple:85;queue_area:78\n\
Pavagadh Temple,\"Pavagadh, Gujarat\",,,3000,,200,,\n\
";

    #[test]
    fn loads_rows_in_order() {
        let specs = load_sites_reader(Cursor::new(SITES_CSV)).unwrap();
        assert_eq!(specs.len(), 2);

        assert_eq!(specs[0].name, "Somnath Temple");
        assert_eq!(specs[0].location, "Somnath, Gujarat");
        assert_eq!(specs[0].position, Some(GeoPoint::new(20.8880, 70.4017)));
        assert_eq!(specs[0].occupancy, Some(4_200));
        assert_eq!(
            specs[0].zones,
            vec![("main_temple".to_owned(), 85), ("queue_area".to_owned(), 78)]
        );

        assert_eq!(specs[1].position, None);
        assert_eq!(specs[1].occupancy, None);
        assert_eq!(specs[1].parking_available, None);
        assert!(specs[1].zones.is_empty());
    }

    #[test]
    fn loaded_specs_build() {
        let specs = load_sites_reader(Cursor::new(SITES_CSV)).unwrap();
        let s = MetricStoreBuilder::new(0).sites(specs).build().unwrap();
        assert_eq!(s.len(), 2);
        assert_eq!(s.all()[1].occupancy(), 100);
        assert_eq!(s.all()[1].parking_available(), 200);
    }

    #[test]
    fn half_a_position_is_an_error() {
        let csv = "\
name,location,lat,lon,capacity,occupancy,parking_capacity,parking_available,zones\n\
X,,22.0,,100,,10,,\n";
        assert!(matches!(load_sites_reader(Cursor::new(csv)), Err(StoreError::Parse(_))));
    }

    #[test]
    fn malformed_zone_is_an_error() {
        let csv = "\
name,location,lat,lon,capacity,occupancy,parking_capacity,parking_available,zones\n\
X,,,,100,,10,,gate=20\n";
        assert!(matches!(load_sites_reader(Cursor::new(csv)), Err(StoreError::Parse(_))));
    }
}
