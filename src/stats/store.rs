//! 통계용 키-값 저장소 구현.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};

use tracing::warn;

use super::StatsResult;

/// 문자열 키로 값을 읽고 쓰는 저장소.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: String) -> StatsResult<()>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for &mut T {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: String) -> StatsResult<()> {
        (**self).set(key, value)
    }
}

/// 메모리 저장소. 테스트나 저장이 필요 없는 세션에서 사용한다.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) -> StatsResult<()> {
        self.entries.insert(key.to_string(), value);
        Ok(())
    }
}

/// JSON 객체 하나(`{key: value}`)를 파일로 보관하는 저장소.
///
/// `set` 마다 파일 전체를 다시 쓴다. 동시 사용 시 마지막 쓰기가 남는다.
/// 파일이 없거나 읽을 수 없거나 손상된 경우 빈 저장소로 본다.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> BTreeMap<String, String> {
        if !self.path.exists() {
            return BTreeMap::new();
        }
        let content = match fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(err) => {
                warn!(path = %self.path.display(), %err, "stats file unreadable");
                return BTreeMap::new();
            }
        };
        serde_json::from_str(&content).unwrap_or_else(|err| {
            warn!(path = %self.path.display(), %err, "stats file corrupt; starting empty");
            BTreeMap::new()
        })
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.load().remove(key)
    }

    fn set(&mut self, key: &str, value: String) -> StatsResult<()> {
        let mut entries = self.load();
        entries.insert(key.to_string(), value);
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(&entries)?;
        fs::write(&self.path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_store_round_trips_and_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("stats.json");
        let mut store = JsonFileStore::new(&path);
        assert_eq!(store.get("k"), None);
        store.set("k", "v1".into()).unwrap();
        store.set("other", "v2".into()).unwrap();
        store.set("k", "v3".into()).unwrap();

        let reopened = JsonFileStore::new(&path);
        assert_eq!(reopened.get("k").as_deref(), Some("v3"));
        assert_eq!(reopened.get("other").as_deref(), Some("v2"));
    }

    #[test]
    fn corrupt_file_reads_as_empty_and_is_replaced_on_write() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stats.json");
        fs::write(&path, "[1, 2").unwrap();
        let mut store = JsonFileStore::new(&path);
        assert_eq!(store.get("k"), None);
        store.set("k", "v".into()).unwrap();
        assert_eq!(store.get("k").as_deref(), Some("v"));
    }

    #[test]
    fn borrowed_store_writes_through() {
        fn write_one<S: KeyValueStore>(mut store: S) {
            store.set("a", "1".into()).unwrap();
        }
        let mut mem = MemoryStore::default();
        write_one(&mut mem);
        assert_eq!(mem.len(), 1);
        assert_eq!(mem.get("a").as_deref(), Some("1"));
    }
}
