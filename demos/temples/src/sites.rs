//! Built-in site data: four Gujarat pilgrimage temples.

use cw_core::GeoPoint;
use cw_store::SiteSpec;

pub fn gujarat_temples() -> Vec<SiteSpec> {
    vec![
        SiteSpec::new("Somnath Temple", 6_000, 500)
            .location("Somnath, Gujarat")
            .position(GeoPoint::new(20.8880, 70.4017))
            .occupancy(4_200)
            .parking_available(245)
            .zone("main_temple", 85)
            .zone("queue_area", 78)
            .zone("parking", 49)
            .zone("food_court", 32)
            .zone("museum", 15),
        SiteSpec::new("Dwarkadhish Temple", 4_500, 300)
            .location("Dwarka, Gujarat")
            .position(GeoPoint::new(22.2394, 68.9678))
            .occupancy(3_150)
            .parking_available(123)
            .zone("main_temple", 92)
            .zone("queue_area", 87)
            .zone("parking", 41)
            .zone("ghat_area", 55)
            .zone("market", 63),
        SiteSpec::new("Ambaji Temple", 4_000, 250)
            .location("Ambaji, Gujarat")
            .position(GeoPoint::new(24.2197, 72.8661))
            .occupancy(2_800)
            .parking_available(89)
            .zone("main_temple", 88)
            .zone("hill_path", 75)
            .zone("parking", 36)
            .zone("prasad_area", 42)
            .zone("shops", 58),
        SiteSpec::new("Pavagadh Temple", 3_000, 200)
            .location("Pavagadh, Gujarat")
            .position(GeoPoint::new(22.4862, 73.5292))
            .occupancy(1_950)
            .parking_available(67)
            .zone("main_temple", 65)
            .zone("ropeway_station", 82)
            .zone("parking", 34)
            .zone("fort_area", 28)
            .zone("base_temple", 45),
    ]
}

/// Vadodara city centre: the default pilgrim position for the
/// nearest-temple lookup.
pub const PILGRIM_POSITION: GeoPoint = GeoPoint { lat: 22.3072, lon: 73.1812 };
