// core/src/metrics.rs
use serde::{Deserialize, Serialize};

// Fast ratetabell. Ingen overrides; alle divisorer er > 0 så
// divisjon-på-null kan ikke oppstå.
pub const RUPEE_PER_KM: f64 = 3.0; // spart per km vs referansekjøretøy
pub const CO2_SAVED_PER_KM_G: f64 = 75.0; // gram CO2 unngått per km
pub const ICE_PER_GRAM_CO2: f64 = 3.0; // gram arktisk is per gram CO2
pub const NETFLIX_GRAMS_PER_HOUR: f64 = 55.0; // gram CO2 per time streaming
pub const PIZZA_GRAMS_PER_SLICE: f64 = 300.0; // gram CO2 per pizzastykke
pub const JEANS_KG_CO2: f64 = 20.0; // kg CO2 per buksepar
pub const TREE_KG_CO2_PER_YEAR: f64 = 22.0; // kg CO2 et modent tre tar opp per år

// --- RoundTo trait (avrunding for visningspresisjon) ---
pub trait RoundTo {
    fn round_to(self, dp: u32) -> f64;
}

impl RoundTo for f64 {
    #[inline]
    fn round_to(self, dp: u32) -> f64 {
        if dp == 0 {
            return self.round();
        }
        let factor = 10_f64.powi(dp as i32);
        (self * factor).round() / factor
    }
}

/// Avledede metrikker for én tur. Ren funksjon av distanse.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct ImpactMetrics {
    pub co2_grams: f64,
    pub money_saved: f64,
    pub ice_saved_kg: f64,
    pub pizza_slices: f64,
    pub netflix_hours: f64,
    /// Andel av ett buksepar (%) for denne turen alene.
    pub jeans_percent: f64,
}

impl ImpactMetrics {
    pub fn for_distance(dist_km: f64) -> Self {
        let co2_grams = dist_km * CO2_SAVED_PER_KM_G;
        Self {
            co2_grams,
            money_saved: dist_km * RUPEE_PER_KM,
            ice_saved_kg: co2_grams * ICE_PER_GRAM_CO2 / 1000.0,
            pizza_slices: co2_grams / PIZZA_GRAMS_PER_SLICE,
            netflix_hours: co2_grams / NETFLIX_GRAMS_PER_HOUR,
            jeans_percent: (co2_grams / 1000.0 / JEANS_KG_CO2) * 100.0,
        }
    }
}

/// Livstidsekvivalenser, ren funksjon av akkumulert CO2 (gram).
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct LifetimeImpact {
    pub ice_saved_kg: f64,
    pub pizza_slices: f64,
    pub netflix_hours: f64,
    /// Syklisk "gjeldende buksepar"-fremdrift: ruller over ved 100 %.
    pub jeans_percent: f64,
    pub tree_count: f64,
    /// Fremdrift mot en 10-trærs skog, cappet til 100 for visning.
    pub forest_progress_pct: f64,
}

impl LifetimeImpact {
    pub fn for_total_co2(total_co2_grams: f64) -> Self {
        let co2_kg = total_co2_grams / 1000.0;
        let tree_count = co2_kg / TREE_KG_CO2_PER_YEAR;
        Self {
            ice_saved_kg: total_co2_grams * ICE_PER_GRAM_CO2 / 1000.0,
            pizza_slices: total_co2_grams / PIZZA_GRAMS_PER_SLICE,
            netflix_hours: total_co2_grams / NETFLIX_GRAMS_PER_HOUR,
            jeans_percent: (co2_kg / JEANS_KG_CO2 * 100.0) % 100.0,
            tree_count,
            forest_progress_pct: ((tree_count / 10.0) * 100.0).min(100.0),
        }
    }
}

/// "MM:SS" med nullpadding, for varighetsvisning.
pub fn format_mm_ss(secs: u64) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}
