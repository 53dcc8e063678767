use std::collections::HashMap;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::models::{ActiveSession, LifetimeStats};

/// Nøkkel for livstidstotalene (én post).
pub const STATS_KEY: &str = "ecoride_stats";
/// Nøkkel for en pågående tur, så den overlever app-restart (TwoPoint-modus).
pub const ACTIVE_RIDE_KEY: &str = "ecoride_active_ride";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O-feil mot lageret: {0}")]
    Io(#[from] std::io::Error),
    #[error("korrupt post i lageret: {0}")]
    Corrupt(#[from] serde_json::Error),
}

/// Enkelt nøkkel/verdi-lager. Én logisk skriver om gangen; ingen
/// samtidighetskontroll trengs.
pub trait KvStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError>;
    fn set(&mut self, key: &str, bytes: &[u8]) -> Result<(), StoreError>;
    fn remove(&mut self, key: &str) -> Result<(), StoreError>;
}

/// In-memory-lager for tester.
#[derive(Debug, Default)]
pub struct MemoryStore {
    map: HashMap<String, Vec<u8>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KvStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        Ok(self.map.get(key).cloned())
    }

    fn set(&mut self, key: &str, bytes: &[u8]) -> Result<(), StoreError> {
        self.map.insert(key.to_string(), bytes.to_vec());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        self.map.remove(key);
        Ok(())
    }
}

/// Filbasert lager: én JSON-fil per nøkkel under en katalog.
/// Eneste kopi av historikken – ingen backup, ingen replikering.
#[derive(Debug)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl KvStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        let path = self.path_for(key);
        if Path::new(&path).exists() {
            Ok(Some(std::fs::read(&path)?))
        } else {
            Ok(None)
        }
    }

    fn set(&mut self, key: &str, bytes: &[u8]) -> Result<(), StoreError> {
        std::fs::create_dir_all(&self.dir)?;
        std::fs::write(self.path_for(key), bytes)?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        let path = self.path_for(key);
        if Path::new(&path).exists() {
            std::fs::remove_file(&path)?;
        }
        Ok(())
    }
}

/// Leser livstidstotalene. Finnes ingen post ennå, returneres nullstilte
/// totaler (førstegangskjøring).
pub fn load_stats(store: &dyn KvStore) -> Result<LifetimeStats, StoreError> {
    match store.get(STATS_KEY)? {
        Some(bytes) => {
            let stats: LifetimeStats = serde_json::from_slice(&bytes)?;
            Ok(stats)
        }
        None => {
            println!("⚠️ Fant ingen livstidsstatistikk, starter på null");
            Ok(LifetimeStats::default())
        }
    }
}

pub fn save_stats(store: &mut dyn KvStore, stats: &LifetimeStats) -> Result<(), StoreError> {
    let json = serde_json::to_vec_pretty(stats)?;
    store.set(STATS_KEY, &json)?;
    Ok(())
}

/// Folder én fullført tur inn i livstidstotalene.
/// Enkel read-modify-write; det finnes nøyaktig én skriver.
pub fn commit_session(
    store: &mut dyn KvStore,
    distance_km: f64,
    money_saved: f64,
    co2_grams: f64,
) -> Result<LifetimeStats, StoreError> {
    let mut stats = load_stats(store)?;
    stats.total_km += distance_km;
    stats.total_rupees += money_saved;
    stats.total_co2_grams += co2_grams;
    save_stats(store, &stats)?;
    println!(
        "✅ Tur lagret ({distance_km:.2} km), livstid nå {:.2} km",
        stats.total_km
    );
    Ok(stats)
}

pub fn load_active_ride(store: &dyn KvStore) -> Result<Option<ActiveSession>, StoreError> {
    match store.get(ACTIVE_RIDE_KEY)? {
        Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
        None => Ok(None),
    }
}

pub fn save_active_ride(store: &mut dyn KvStore, ride: &ActiveSession) -> Result<(), StoreError> {
    let json = serde_json::to_vec_pretty(ride)?;
    store.set(ACTIVE_RIDE_KEY, &json)?;
    Ok(())
}

pub fn clear_active_ride(store: &mut dyn KvStore) -> Result<(), StoreError> {
    store.remove(ACTIVE_RIDE_KEY)
}
