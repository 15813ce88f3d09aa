//! TOML file-backed store rooted at a journal directory

use crate::domain::day_bucket::parse_timestamp;
use crate::domain::records::{EmotionCategory, Record};
use crate::error::{MindmateError, Result};
use crate::infrastructure::config::{Config, MINDMATE_DIR};
use crate::infrastructure::lock::with_exclusive_lock;
use crate::infrastructure::store::EntryStore;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};

const STORE_FILE: &str = "store.toml";

#[derive(Debug, Default, Serialize, Deserialize)]
struct StoreFile {
    #[serde(default, rename = "record")]
    records: Vec<toml::Value>,
}

/// Records persisted in `.mindmate/store.toml`
///
/// The whole file is loaded on open. Every change is merged into the current
/// file under the directory lock: records this handle wrote replace their
/// stored versions, everything else another process wrote meanwhile is kept.
/// Records that fail to decode are kept verbatim so a save never destroys them.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
    records: BTreeMap<String, Record>,
    malformed: Vec<toml::Value>,
    /// Keys written through this handle since the last save
    dirty: BTreeSet<String>,
}

impl FileStore {
    /// Open the store of an initialized journal root
    pub fn open(root: PathBuf) -> Result<Self> {
        if !Self::has_mindmate_dir(&root) {
            return Err(MindmateError::NotMindmateDirectory(root));
        }

        let (records, malformed) = read_store(&Self::store_path(&root))?;

        tracing::debug!(
            root = %root.display(),
            records = records.len(),
            malformed = malformed.len(),
            "opened store"
        );

        Ok(FileStore {
            root,
            records,
            malformed,
            dirty: BTreeSet::new(),
        })
    }

    /// Create `.mindmate/` with the given config and an empty store
    pub fn initialize(root: &Path, config: &Config) -> Result<Self> {
        let dir = root.join(MINDMATE_DIR);
        if dir.exists() {
            return Err(MindmateError::Config(format!(
                "Directory already initialized: {}",
                root.display()
            )));
        }

        fs::create_dir_all(&dir)?;
        config.save_to_dir(root)?;

        let mut store = FileStore {
            root: root.to_path_buf(),
            records: BTreeMap::new(),
            malformed: Vec::new(),
            dirty: BTreeSet::new(),
        };
        store.persist()?;
        Ok(store)
    }

    /// Discover the journal root
    /// First checks MINDMATE_ROOT environment variable, then walks up from the current directory
    pub fn discover() -> Result<Self> {
        if let Ok(root_path) = std::env::var("MINDMATE_ROOT") {
            let path = PathBuf::from(root_path);
            if Self::has_mindmate_dir(&path) {
                return Self::open(path);
            }
            return Err(MindmateError::Config(format!(
                "MINDMATE_ROOT is set to '{}' but no .mindmate directory found. \
                Run 'mindmate init' in that directory or unset MINDMATE_ROOT.",
                path.display()
            )));
        }

        let current_dir = std::env::current_dir()?;
        Self::discover_from(&current_dir)
    }

    /// Discover the journal root by walking up from a specific starting directory
    pub fn discover_from(start: &Path) -> Result<Self> {
        let mut current = start.to_path_buf();

        loop {
            if Self::has_mindmate_dir(&current) {
                return Self::open(current);
            }

            match current.parent() {
                Some(parent) => current = parent.to_path_buf(),
                None => return Err(MindmateError::NotMindmateDirectory(start.to_path_buf())),
            }
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The `.mindmate/` directory holding the store, config and lock
    pub fn state_dir(&self) -> PathBuf {
        self.root.join(MINDMATE_DIR)
    }

    pub fn load_config(&self) -> Result<Config> {
        Config::load_from_dir(&self.root)
    }

    pub fn save_config(&self, config: &Config) -> Result<()> {
        config.save_to_dir(&self.root)
    }

    fn has_mindmate_dir(path: &Path) -> bool {
        path.join(MINDMATE_DIR).is_dir()
    }

    fn store_path(root: &Path) -> PathBuf {
        root.join(MINDMATE_DIR).join(STORE_FILE)
    }

    /// Merge this handle's writes into the current file and replace it
    ///
    /// Runs under the directory lock. The new contents go to a temp file that is
    /// then renamed into place.
    fn persist(&mut self) -> Result<()> {
        let path = Self::store_path(&self.root);
        let dir = self.state_dir();

        with_exclusive_lock(&dir, || {
            let (mut merged, malformed) = read_store(&path)?;
            for key in &self.dirty {
                let Some(ours) = self.records.get(key) else {
                    continue;
                };
                let record = match (ours, merged.get(key)) {
                    (Record::Emotion(ours), Some(Record::Emotion(stored))) => {
                        Record::Emotion(merge_emotion(ours, stored))
                    }
                    _ => ours.clone(),
                };
                merged.insert(key.clone(), record);
            }

            let mut file = StoreFile::default();
            for record in merged.values() {
                file.records.push(toml::Value::try_from(record)?);
            }
            file.records.extend(malformed.iter().cloned());

            let contents = toml::to_string(&file)?;
            let tmp_path =
                path.with_file_name(format!("{}.tmp-{}", STORE_FILE, std::process::id()));

            fs::write(&tmp_path, contents)?;
            if cfg!(windows) && path.exists() {
                fs::remove_file(&path)?;
            }
            fs::rename(&tmp_path, &path)?;

            tracing::debug!(
                written = self.dirty.len(),
                records = merged.len(),
                "saved store"
            );
            self.records = merged;
            self.malformed = malformed;
            Ok(())
        })?;

        self.dirty.clear();
        Ok(())
    }
}

impl EntryStore for FileStore {
    fn query(&self, predicate: &dyn Fn(&Record) -> bool) -> Vec<Record> {
        self.records
            .values()
            .filter(|r| predicate(r))
            .cloned()
            .collect()
    }

    fn set(&mut self, record: Record) -> Result<()> {
        let key = record.key();
        self.records.insert(key.clone(), record);
        self.dirty.insert(key);
        self.persist()
    }

    fn set_all(&mut self, records: Vec<Record>) -> Result<()> {
        if records.is_empty() {
            return Ok(());
        }
        for record in records {
            let key = record.key();
            self.records.insert(key.clone(), record);
            self.dirty.insert(key);
        }
        self.persist()
    }

    fn malformed_count(&self) -> usize {
        self.malformed.len()
    }

    fn contains_key(&self, key: &str) -> bool {
        self.records.contains_key(key)
    }
}

/// Load and decode a store file; a missing file is an empty store
fn read_store(path: &Path) -> Result<(BTreeMap<String, Record>, Vec<toml::Value>)> {
    let file: StoreFile = match fs::read_to_string(path) {
        Ok(contents) => toml::from_str(&contents).map_err(|e| {
            MindmateError::Store(format!("Failed to parse {}: {}", path.display(), e))
        })?,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => StoreFile::default(),
        Err(e) => return Err(MindmateError::Io(e)),
    };

    let mut records = BTreeMap::new();
    let mut malformed = Vec::new();
    for (index, value) in file.records.into_iter().enumerate() {
        match decode_record(&value) {
            Ok(record) => {
                records.insert(record.key(), record);
            }
            Err(reason) => {
                tracing::warn!(index, %reason, "keeping undecodable store record as-is");
                malformed.push(value);
            }
        }
    }
    Ok((records, malformed))
}

/// A category written by this handle, keeping the later `last_seen` of the two
fn merge_emotion(ours: &EmotionCategory, stored: &EmotionCategory) -> EmotionCategory {
    let seen = |e: &EmotionCategory| e.last_seen.as_deref().and_then(parse_timestamp);
    let mut merged = ours.clone();
    if let (Some(stored_at), ours_at) = (seen(stored), seen(ours)) {
        if ours_at.map_or(true, |t| stored_at > t) {
            merged.last_seen = stored.last_seen.clone();
        }
    }
    merged
}

/// Decode one stored record, tolerating hand-edited shapes
///
/// Native TOML datetimes are accepted for `timestamp`/`last_seen`, and non-string
/// mood tags are dropped rather than failing the record.
fn decode_record(value: &toml::Value) -> std::result::Result<Record, String> {
    let mut table = value
        .as_table()
        .cloned()
        .ok_or_else(|| "record is not a table".to_string())?;

    for field in ["timestamp", "last_seen"] {
        if let Some(toml::Value::Datetime(dt)) = table.get(field) {
            let text = dt.to_string();
            table.insert(field.to_string(), toml::Value::String(text));
        }
    }

    if let Some(toml::Value::Array(tags)) = table.get_mut("moods_detected") {
        tags.retain(toml::Value::is_str);
    }

    toml::Value::Table(table)
        .try_into::<Record>()
        .map_err(|e| e.to_string())
}
