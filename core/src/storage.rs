use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info, warn};

use crate::error::{StoreError, StoreResult};
use crate::models::Document;
use crate::types::{LengthUnit, WeightUnit};

pub const STATE_KEY: &str = "neon_weight_state_v1";
pub const WEIGHT_UNIT_KEY: &str = "neon_weight_unit";
pub const LENGTH_UNIT_KEY: &str = "neon_length_unit";

/// Nøkkel/verdi-lager med strengverdier. Kjernen ser kun denne sømmen.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>>;
    fn set(&self, key: &str, value: &str) -> StoreResult<()>;
}

/// I minnet. `rejecting()` avviser alle skrivinger (for å teste feil-svelging).
#[derive(Debug, Default)]
pub struct MemoryStore {
    map: RefCell<HashMap<String, String>>,
    reject_writes: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rejecting() -> Self {
        Self { map: RefCell::new(HashMap::new()), reject_writes: true }
    }

    pub fn raw(&self, key: &str) -> Option<String> {
        self.map.borrow().get(key).cloned()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        Ok(self.map.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        if self.reject_writes {
            return Err(StoreError::Rejected(key.to_string()));
        }
        self.map.borrow_mut().insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Én fil per nøkkel i en katalog (`<dir>/<key>.json`).
#[derive(Debug, Clone)]
pub struct JsonDirStore {
    dir: PathBuf,
}

impl JsonDirStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl KeyValueStore for JsonDirStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        let path = self.path_for(key);
        if !path.exists() {
            debug!("Fant ikke {}, ingen verdi for {}", path.display(), key);
            return Ok(None);
        }
        fs::read_to_string(&path)
            .map(Some)
            .map_err(|e| StoreError::io(key, e))
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        fs::create_dir_all(&self.dir).map_err(|e| StoreError::io(key, e))?;
        fs::write(self.path_for(key), value).map_err(|e| StoreError::io(key, e))
    }
}

/// Parser et snapshot; feilen peker på feltet som ikke passet.
pub fn parse_document(json: &str) -> StoreResult<Document> {
    let mut de = serde_json::Deserializer::from_str(json);
    serde_path_to_error::deserialize(&mut de).map_err(StoreError::from_path_error)
}

pub fn load_snapshot<S: KeyValueStore + ?Sized>(store: &S) -> StoreResult<Option<Document>> {
    match store.get(STATE_KEY)? {
        Some(raw) => parse_document(&raw).map(Some),
        None => Ok(None),
    }
}

pub fn save_snapshot<S: KeyValueStore + ?Sized>(store: &S, doc: &Document) -> StoreResult<()> {
    let json = serde_json::to_string(doc)?;
    store.set(STATE_KEY, &json)
}

pub fn load_weight_unit<S: KeyValueStore + ?Sized>(store: &S) -> StoreResult<Option<WeightUnit>> {
    store.get(WEIGHT_UNIT_KEY)?.map(|s| s.parse()).transpose()
}

pub fn save_weight_unit<S: KeyValueStore + ?Sized>(store: &S, unit: WeightUnit) -> StoreResult<()> {
    store.set(WEIGHT_UNIT_KEY, unit.as_str())
}

pub fn load_length_unit<S: KeyValueStore + ?Sized>(store: &S) -> StoreResult<Option<LengthUnit>> {
    store.get(LENGTH_UNIT_KEY)?.map(|s| s.parse()).transpose()
}

pub fn save_length_unit<S: KeyValueStore + ?Sized>(store: &S, unit: LengthUnit) -> StoreResult<()> {
    store.set(LENGTH_UNIT_KEY, unit.as_str())
}

/// Leser dokument fra disk (JSON).
/// Hvis filen ikke finnes, returneres et default-dokument.
pub fn load_document(path: impl AsRef<Path>) -> StoreResult<Document> {
    let path = path.as_ref();
    if path.exists() {
        let contents = fs::read_to_string(path).map_err(|e| StoreError::io(&path.display().to_string(), e))?;
        let doc = parse_document(&contents)?;
        info!("📂 Dokument lastet fra {} (entries={})", path.display(), doc.entries.len());
        Ok(doc)
    } else {
        warn!("⚠️ Fant ikke dokument på {}, returnerer default", path.display());
        Ok(Document::default())
    }
}

/// Lagrer dokument til disk som JSON (pretty-print).
pub fn save_document(doc: &Document, path: impl AsRef<Path>) -> StoreResult<()> {
    let path = path.as_ref();
    let json = serde_json::to_string_pretty(doc)?;
    fs::write(path, json).map_err(|e| StoreError::io(&path.display().to_string(), e))?;
    info!("✅ Dokument lagret til {} (entries={})", path.display(), doc.entries.len());
    Ok(())
}
