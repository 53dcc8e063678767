// core/src/distance.rs
use crate::models::ActiveSession;

pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Storsirkel-distanse (km) mellom to koordinater, haversine.
pub fn haversine_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let d_lat = (lat2 - lat1).to_radians();
    let d_lon = (lon2 - lon1).to_radians();

    let a = (d_lat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (d_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}

/// Luftlinje → estimert veidistanse.
pub fn road_corrected_km(linear_km: f64, factor: f64) -> f64 {
    linear_km * factor
}

/// Mater ett posisjonssample inn i en pågående økt.
///
/// Første sample etablerer kun ankeret og bidrar ikke med distanse.
/// Delta under terskelen forkastes som jitter – ankeret flyttes IKKE,
/// ellers ville sub-terskel-drift summert seg opp i det stille.
/// Returnerer km lagt til akkumulatoren (0.0 ved baseline/jitter).
pub fn accumulate_sample(
    session: &mut ActiveSession,
    lat: f64,
    lon: f64,
    jitter_threshold_km: f64,
) -> f64 {
    let (last_lat, last_lon) = match session.last_position {
        Some(p) => p,
        None => {
            session.last_position = Some((lat, lon));
            return 0.0;
        }
    };

    let d = haversine_km(last_lat, last_lon, lat, lon);
    if d > jitter_threshold_km {
        session.accumulated_km += d;
        session.last_position = Some((lat, lon));
        d
    } else {
        session.rejected_jitter += 1;
        0.0
    }
}
