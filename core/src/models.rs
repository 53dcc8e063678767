use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::metrics::ImpactMetrics;

/// Hvilken distansestrategi økten bruker.
/// `Continuous` akkumulerer haversine-delta per sample (med jitter-filter),
/// `TwoPoint` bruker kun start- og sluttfix og ganger med veikorreksjon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum DistanceMode {
    #[default]
    Continuous,
    TwoPoint,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    pub mode: DistanceMode,
    /// Minste delta (km) som regnes som reell bevegelse. Under dette: GPS-jitter.
    pub jitter_threshold_km: f64,
    /// Estimert veidistanse vs luftlinje (kun TwoPoint-modus).
    pub road_correction_factor: f64,
    /// Minste korrigerte/akkumulerte distanse (km) for at en tur teller.
    pub min_distance_km: f64,
    /// Dårligste aksepterte GPS-nøyaktighet (meter) for et fix.
    pub max_accuracy_m: f64,
    /// Hvor lenge vi venter på et fix før operasjonen feiler (sek).
    pub acquisition_timeout_secs: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            mode: DistanceMode::Continuous,
            jitter_threshold_km: 0.005,
            road_correction_factor: 1.3,
            min_distance_km: 0.1,
            max_accuracy_m: 50.0,
            acquisition_timeout_secs: 10,
        }
    }
}

/// Livstidstotaler, persistert som én JSON-post. Øker monotont; kun
/// `storage::commit_session` muterer dem.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct LifetimeStats {
    pub total_km: f64,
    pub total_rupees: f64,
    pub total_co2_grams: f64,
}

/// Pågående økt. Maks én om gangen; forbrukes ved stop().
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActiveSession {
    pub start_time: DateTime<Utc>,
    /// Startfix (TwoPoint-ankeret). None i Continuous-modus før første sample.
    pub start_position: Option<(f64, f64)>,
    /// Siste aksepterte posisjon (Continuous-ankeret).
    pub last_position: Option<(f64, f64)>,
    pub accumulated_km: f64,
    /// Samples forkastet fordi delta lå under jitter-terskelen.
    pub rejected_jitter: u32,
    /// Sist kjente medgåtte tid (sek), oppdatert av tick().
    pub elapsed_secs: u64,
}

impl ActiveSession {
    pub fn begin(now: DateTime<Utc>) -> Self {
        Self {
            start_time: now,
            start_position: None,
            last_position: None,
            accumulated_km: 0.0,
            rejected_jitter: 0,
            elapsed_secs: 0,
        }
    }

    pub fn begin_at(now: DateTime<Utc>, lat: f64, lon: f64) -> Self {
        Self {
            start_position: Some((lat, lon)),
            last_position: Some((lat, lon)),
            ..Self::begin(now)
        }
    }
}

/// Rapport for én fullført tur. Ren funksjon av distanse + varighet,
/// persisteres ikke separat.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RideReport {
    pub distance_km: f64,
    pub duration_secs: u64,
    pub impact: ImpactMetrics,
}

impl RideReport {
    pub fn from_distance(distance_km: f64, duration_secs: u64) -> Self {
        Self {
            distance_km,
            duration_secs,
            impact: ImpactMetrics::for_distance(distance_km),
        }
    }
}
