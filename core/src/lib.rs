pub mod distance;
pub mod location;
pub mod metrics;
pub mod models;
pub mod session;
pub mod storage;
pub mod telemetry;

pub use distance::{haversine_km, road_corrected_km, EARTH_RADIUS_KM};
pub use location::{Fix, LocationError, LocationProvider, ScriptedLocationProvider, WakeLock};
pub use metrics::{format_mm_ss, ImpactMetrics, LifetimeImpact, RoundTo};
pub use models::{ActiveSession, DistanceMode, LifetimeStats, RideReport, SessionConfig};
pub use session::{RideError, RideSession, SessionState};
pub use storage::{FileStore, KvStore, MemoryStore, StoreError};
