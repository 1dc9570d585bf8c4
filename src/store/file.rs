use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;

use super::props::PropertyStore;

/// File-backed property store: the whole property map as one JSON object,
/// rewritten on every `set`. Suits standalone hosts without their own
/// persistence; write failures are logged and the in-memory copy stays
/// authoritative for the rest of the process.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    props: Mutex<BTreeMap<String, String>>,
}

impl JsonFileStore {
    /// Open a store at `path`, loading the existing map if the file exists.
    pub fn open(path: impl Into<PathBuf>) -> io::Result<Self> {
        let path = path.into();
        let props = match fs::read_to_string(&path) {
            Ok(text) => serde_json::from_str(&text)
                .map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err))?,
            Err(err) if err.kind() == io::ErrorKind::NotFound => BTreeMap::new(),
            Err(err) => return Err(err),
        };
        Ok(Self {
            path,
            props: Mutex::new(props),
        })
    }

    fn flush(&self, props: &BTreeMap<String, String>) {
        let text = match serde_json::to_string_pretty(props) {
            Ok(text) => text,
            Err(err) => {
                tracing::warn!("property store serialization failed: {err}");
                return;
            }
        };
        if let Err(err) = fs::write(&self.path, text) {
            tracing::warn!(path = %self.path.display(), "property store write failed: {err}");
        }
    }
}

impl PropertyStore for JsonFileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.props.lock().unwrap().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        let mut props = self.props.lock().unwrap();
        props.insert(key.to_string(), value.to_string());
        self.flush(&props);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::open(dir.path().join("props.json")).unwrap();
        assert_eq!(store.get("clans"), None);
    }

    #[test]
    fn values_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("props.json");
        {
            let store = JsonFileStore::open(&path).unwrap();
            store.set("clans", "{\"Alpha\":{}}");
        }
        let store = JsonFileStore::open(&path).unwrap();
        assert_eq!(store.get("clans").as_deref(), Some("{\"Alpha\":{}}"));
    }

    #[test]
    fn corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("props.json");
        fs::write(&path, "not json").unwrap();
        assert!(JsonFileStore::open(&path).is_err());
    }
}
