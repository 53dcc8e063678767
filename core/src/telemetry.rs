use once_cell::sync::Lazy;
use prometheus::{IntCounter, Registry};

pub static REGISTRY: Lazy<Registry> = Lazy::new(Registry::new);

fn counter(name: &str, help: &str) -> IntCounter {
    let c = IntCounter::new(name, help).expect("gyldig counter-navn");
    REGISTRY
        .register(Box::new(c.clone()))
        .expect("counter registrert én gang");
    c
}

pub static RIDES_STARTED_TOTAL: Lazy<IntCounter> =
    Lazy::new(|| counter("ecoride_rides_started_total", "Antall startede turer"));

pub static RIDES_COMPLETED_TOTAL: Lazy<IntCounter> =
    Lazy::new(|| counter("ecoride_rides_completed_total", "Antall fullførte turer"));

pub static RIDES_DISCARDED_TOTAL: Lazy<IntCounter> =
    Lazy::new(|| counter("ecoride_rides_discarded_total", "Antall forkastede turer"));

pub static JITTER_REJECTED_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    counter(
        "ecoride_jitter_rejected_total",
        "Posisjonssamples forkastet som GPS-jitter",
    )
});

pub static FIX_REJECTED_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    counter(
        "ecoride_fix_rejected_total",
        "Fixes avvist pga. svak nøyaktighet eller ugyldige koordinater",
    )
});
