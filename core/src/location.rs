use std::collections::VecDeque;
use std::error::Error;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Én posisjonsavlesning. accuracy/speed er valgfri berikelse fra
/// tilbyderen, aldri påkrevd input.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Fix {
    pub latitude: f64,
    pub longitude: f64,
    pub accuracy_m: Option<f64>,
    pub speed_ms: Option<f64>,
}

impl Fix {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            accuracy_m: None,
            speed_ms: None,
        }
    }

    pub fn with_accuracy(latitude: f64, longitude: f64, accuracy_m: f64) -> Self {
        Self {
            accuracy_m: Some(accuracy_m),
            ..Self::new(latitude, longitude)
        }
    }
}

#[derive(Debug, Error)]
pub enum LocationError {
    #[error("stedstjenester er ikke tilgjengelig på denne enheten")]
    Unavailable,
    #[error("fikk ingen posisjon innen {0:?}")]
    Timeout(Duration),
}

/// Posisjonstilbyder. Kontinuerlig strøm drives av kalleren som mater
/// `RideSession::on_sample`; kjernen trenger bare engangs-fix + capability.
pub trait LocationProvider {
    fn available(&self) -> bool;
    fn current_fix(&mut self, timeout: Duration) -> Result<Fix, LocationError>;
}

/// Skriptet tilbyder (test og enkel avspilling): leverer fixes FIFO fra en kø.
/// Tom kø ⇒ Timeout.
#[derive(Debug, Default)]
pub struct ScriptedLocationProvider {
    fixes: VecDeque<Fix>,
    capability: bool,
}

impl ScriptedLocationProvider {
    pub fn new(fixes: Vec<Fix>) -> Self {
        Self {
            fixes: fixes.into(),
            capability: true,
        }
    }

    pub fn unavailable() -> Self {
        Self {
            fixes: VecDeque::new(),
            capability: false,
        }
    }

    pub fn push(&mut self, fix: Fix) {
        self.fixes.push_back(fix);
    }
}

impl LocationProvider for ScriptedLocationProvider {
    fn available(&self) -> bool {
        self.capability
    }

    fn current_fix(&mut self, timeout: Duration) -> Result<Fix, LocationError> {
        self.fixes.pop_front().ok_or(LocationError::Timeout(timeout))
    }
}

/// Best-effort hold-skjermen-våken-krok, kalt ved øktstart. Feil er ikke
/// fatale; kjernen logger og fortsetter uten.
pub trait WakeLock {
    fn acquire(&mut self) -> Result<(), Box<dyn Error>>;
}
