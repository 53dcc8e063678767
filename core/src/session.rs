// core/src/session.rs
use std::time::Duration;

use chrono::Utc;
use log::{debug, warn};
use thiserror::Error;

use crate::distance::{accumulate_sample, haversine_km, road_corrected_km};
use crate::location::{Fix, LocationError, LocationProvider, WakeLock};
use crate::models::{ActiveSession, DistanceMode, RideReport, SessionConfig};
use crate::storage::{self, KvStore, StoreError};
use crate::telemetry;

/// Lokale, gjenopprettbare feil. Ingen retries i kjernen – hver feil krever
/// nytt eksplisitt start()/stop()-kall fra kalleren.
#[derive(Debug, Error)]
pub enum RideError {
    #[error("stedstjenester er ikke tilgjengelig på denne enheten")]
    CapabilityUnavailable,
    #[error("GPS-nøyaktighet for dårlig ({accuracy_m:.0} m, grense {limit_m:.0} m)")]
    WeakSignal { accuracy_m: f64, limit_m: f64 },
    #[error("ugyldige koordinater (0, 0) – GPS ikke initialisert")]
    InvalidFix,
    #[error("fikk ingen posisjon innen {0} s")]
    AcquisitionTimeout(u64),
    #[error("distanse for kort: {distance_km:.3} km (minimum {min_km} km)")]
    TooShort { distance_km: f64, min_km: f64 },
    #[error(transparent)]
    Storage(#[from] StoreError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Active,
}

/// Måling som venter på behold/forkast-valg etter TooShort.
#[derive(Debug, Clone, Copy)]
struct PendingStop {
    distance_km: f64,
    duration_secs: u64,
}

/// Øktens tilstandsmaskin: Idle → Active → Idle, ingen pause/resume.
/// Eier all ikke-presentasjonell tilstand; presentasjonslaget mater inn
/// samples/tikk og får tilbake visningsklare verdier.
pub struct RideSession {
    config: SessionConfig,
    active: Option<ActiveSession>,
    pending_short: Option<PendingStop>,
}

impl RideSession {
    pub fn new(config: SessionConfig) -> Self {
        Self {
            config,
            active: None,
            pending_short: None,
        }
    }

    /// Plukker opp en persistert pågående tur etter app-restart.
    pub fn restore(config: SessionConfig, store: &dyn KvStore) -> Result<Self, RideError> {
        let active = storage::load_active_ride(store)?;
        if active.is_some() {
            debug!("gjenopptar persistert aktiv tur");
        }
        Ok(Self {
            config,
            active,
            pending_short: None,
        })
    }

    pub fn state(&self) -> SessionState {
        if self.active.is_some() {
            SessionState::Active
        } else {
            SessionState::Idle
        }
    }

    pub fn active(&self) -> Option<&ActiveSession> {
        self.active.as_ref()
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Starter en ny økt. No-op hvis en økt allerede er aktiv.
    /// TwoPoint-modus henter og validerer startfix før noe tilstand opprettes;
    /// WeakSignal/InvalidFix/AcquisitionTimeout lar alt stå urørt.
    pub fn start(
        &mut self,
        provider: &mut dyn LocationProvider,
        store: &mut dyn KvStore,
        wake_lock: Option<&mut dyn WakeLock>,
    ) -> Result<(), RideError> {
        if self.active.is_some() {
            debug!("start() ignorert: økt allerede aktiv");
            return Ok(());
        }
        if !provider.available() {
            return Err(RideError::CapabilityUnavailable);
        }

        let now = Utc::now();
        let session = match self.config.mode {
            DistanceMode::Continuous => ActiveSession::begin(now),
            DistanceMode::TwoPoint => {
                let fix = self.acquire_fix(provider)?;
                self.validate_fix(&fix)?;
                let session = ActiveSession::begin_at(now, fix.latitude, fix.longitude);
                storage::save_active_ride(store, &session)?;
                session
            }
        };

        // Best-effort: manglende wake-lock stopper ikke økten.
        if let Some(lock) = wake_lock {
            if let Err(e) = lock.acquire() {
                warn!("⚠️ Wake-lock feilet, fortsetter uten: {e}");
            }
        }

        telemetry::RIDES_STARTED_TOTAL.inc();
        self.active = Some(session);
        Ok(())
    }

    /// Kontinuerlig posisjonsstrøm. Første sample etablerer baseline,
    /// sub-terskel-delta forkastes som jitter. Ignoreres i TwoPoint-modus
    /// og mens en TooShort-avgjørelse venter.
    pub fn on_sample(&mut self, fix: &Fix) {
        if self.config.mode != DistanceMode::Continuous || self.pending_short.is_some() {
            return;
        }
        let Some(session) = self.active.as_mut() else {
            return;
        };

        let rejected_before = session.rejected_jitter;
        accumulate_sample(
            session,
            fix.latitude,
            fix.longitude,
            self.config.jitter_threshold_km,
        );
        if session.rejected_jitter > rejected_before {
            telemetry::JITTER_REJECTED_TOTAL.inc();
        }
    }

    /// 1 Hz-tikk fra driveren. Oppdaterer og returnerer medgått tid (sek).
    /// None når ingen økt er aktiv.
    pub fn tick(&mut self) -> Option<u64> {
        let session = self.active.as_mut()?;
        let elapsed = (Utc::now() - session.start_time).num_seconds().max(0) as u64;
        session.elapsed_secs = elapsed;
        Some(elapsed)
    }

    /// Avslutter økten: finaliserer distanse etter modus, bokfører i
    /// livstidstotalene og går tilbake til Idle. No-op (Ok(None)) uten aktiv
    /// økt. WeakSignal/timeout på sluttfixet muterer ingenting – økten består
    /// og stop() kan prøves på nytt. Under minimumsdistansen stashes målingen
    /// og TooShort returneres; kalleren velger keep_short_ride() eller
    /// discard_ride().
    pub fn stop(
        &mut self,
        provider: &mut dyn LocationProvider,
        store: &mut dyn KvStore,
    ) -> Result<Option<RideReport>, RideError> {
        let Some(session) = self.active.as_ref() else {
            debug!("stop() ignorert: ingen aktiv økt");
            return Ok(None);
        };

        let distance_km = match self.config.mode {
            DistanceMode::Continuous => session.accumulated_km,
            DistanceMode::TwoPoint => {
                let end = self.acquire_fix(provider)?;
                self.validate_fix(&end)?;
                // TwoPoint-økter har alltid startanker; mangler det er posten korrupt.
                let (start_lat, start_lon) =
                    session.start_position.ok_or(RideError::InvalidFix)?;
                let linear = haversine_km(start_lat, start_lon, end.latitude, end.longitude);
                road_corrected_km(linear, self.config.road_correction_factor)
            }
        };
        let duration_secs = (Utc::now() - session.start_time).num_seconds().max(0) as u64;

        if distance_km < self.config.min_distance_km {
            self.pending_short = Some(PendingStop {
                distance_km,
                duration_secs,
            });
            return Err(RideError::TooShort {
                distance_km,
                min_km: self.config.min_distance_km,
            });
        }

        self.finish(store, distance_km, duration_secs).map(Some)
    }

    /// Etter TooShort: behold turen likevel og bokfør den som normalt.
    pub fn keep_short_ride(
        &mut self,
        store: &mut dyn KvStore,
    ) -> Result<Option<RideReport>, RideError> {
        match self.pending_short.take() {
            Some(p) => self.finish(store, p.distance_km, p.duration_secs).map(Some),
            None => Ok(None),
        }
    }

    /// Forkaster den aktive turen uten å røre livstidstotalene.
    pub fn discard_ride(&mut self, store: &mut dyn KvStore) -> Result<(), RideError> {
        if self.active.take().is_some() {
            storage::clear_active_ride(store)?;
            telemetry::RIDES_DISCARDED_TOTAL.inc();
            debug!("aktiv tur forkastet");
        }
        self.pending_short = None;
        Ok(())
    }

    fn finish(
        &mut self,
        store: &mut dyn KvStore,
        distance_km: f64,
        duration_secs: u64,
    ) -> Result<RideReport, RideError> {
        let report = RideReport::from_distance(distance_km, duration_secs);
        storage::commit_session(
            store,
            report.distance_km,
            report.impact.money_saved,
            report.impact.co2_grams,
        )?;
        // Bidraget er bokført – økten er ferdig nå, ellers kunne et nytt
        // stop() bokført samme tur to ganger.
        self.active = None;
        self.pending_short = None;
        telemetry::RIDES_COMPLETED_TOTAL.inc();
        if let Err(e) = storage::clear_active_ride(store) {
            warn!("⚠️ Fikk ikke ryddet persistert aktiv tur, fortsetter: {e}");
        }
        Ok(report)
    }

    fn acquire_fix(&self, provider: &mut dyn LocationProvider) -> Result<Fix, RideError> {
        let timeout = Duration::from_secs(self.config.acquisition_timeout_secs);
        provider.current_fix(timeout).map_err(|e| match e {
            LocationError::Unavailable => RideError::CapabilityUnavailable,
            LocationError::Timeout(_) => {
                RideError::AcquisitionTimeout(self.config.acquisition_timeout_secs)
            }
        })
    }

    /// Avviser svakt signal (accuracy over grensen) og (0,0)-sentinelen.
    /// Manglende accuracy tolereres – feltet er valgfri berikelse.
    fn validate_fix(&self, fix: &Fix) -> Result<(), RideError> {
        if let Some(accuracy_m) = fix.accuracy_m {
            if accuracy_m > self.config.max_accuracy_m {
                telemetry::FIX_REJECTED_TOTAL.inc();
                return Err(RideError::WeakSignal {
                    accuracy_m,
                    limit_m: self.config.max_accuracy_m,
                });
            }
        }
        if fix.latitude == 0.0 && fix.longitude == 0.0 {
            telemetry::FIX_REJECTED_TOTAL.inc();
            return Err(RideError::InvalidFix);
        }
        Ok(())
    }
}
