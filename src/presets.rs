//! Color presets and the persisted recently-used history.
//!
//! The history is a JSON array of `#rrggbbaa` strings stored under a
//! namespace key, most recent first. Storage is injected through
//! [`PresetBackend`] so the color logic never touches the filesystem
//! directly.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::color::Rgba;
use crate::error::StoreError;
use crate::named;

/// Key-value string storage for preset history.
pub trait PresetBackend {
    /// The stored value, or `None` when the key is missing or unreadable.
    fn get(&self, key: &str) -> Option<String>;

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

impl<B: PresetBackend + ?Sized> PresetBackend for Box<B> {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).set(key, value)
    }
}

/// In-process storage. Nothing survives the process.
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    entries: HashMap<String, String>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PresetBackend for MemoryBackend {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// One `<key>.json` file per namespace inside a directory.
#[derive(Debug, Clone)]
pub struct FileBackend {
    dir: PathBuf,
}

impl FileBackend {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The per-user data directory for this crate.
    pub fn user_default() -> Result<Self, StoreError> {
        let dirs = directories::ProjectDirs::from("rs", "floem-shade", "floem-shade")
            .ok_or(StoreError::NoDataDir)?;
        Ok(Self::new(dirs.data_dir().join("presets")))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// `<key>.json`, with every byte outside `[A-Za-z0-9_-]` written as
    /// `%XX` so distinct keys never share a file.
    fn path_for(&self, key: &str) -> PathBuf {
        let mut file = String::with_capacity(key.len());
        for byte in key.bytes() {
            if byte.is_ascii_alphanumeric() || byte == b'-' || byte == b'_' {
                file.push(char::from(byte));
            } else {
                file.push_str(&format!("%{byte:02X}"));
            }
        }
        self.dir.join(format!("{file}.json"))
    }
}

impl PresetBackend for FileBackend {
    fn get(&self, key: &str) -> Option<String> {
        let path = self.path_for(key);
        match std::fs::read_to_string(&path) {
            Ok(content) => Some(content),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
            Err(e) => {
                warn!("Failed to read presets from {:?}: {}", path, e);
                None
            }
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        std::fs::create_dir_all(&self.dir)?;
        let path = self.path_for(key);
        std::fs::write(&path, value)?;
        info!("Saved presets to {:?}", path);
        Ok(())
    }
}

/// Recently-used colors on top of a [`PresetBackend`].
#[derive(Debug, Clone, Default)]
pub struct PresetStore<B> {
    backend: B,
}

impl<B: PresetBackend> PresetStore<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn into_backend(self) -> B {
        self.backend
    }

    /// The stored hex strings, most recent first.
    ///
    /// A missing key or malformed JSON reads as an empty history.
    pub fn load(&self, key: &str) -> Vec<String> {
        let Some(raw) = self.backend.get(key) else {
            return Vec::new();
        };
        match serde_json::from_str::<Vec<String>>(&raw) {
            Ok(hexes) => hexes,
            Err(e) => {
                warn!("Ignoring malformed preset history under {:?}: {}", key, e);
                Vec::new()
            }
        }
    }

    /// The stored history decoded to colors. Undecodable entries come back
    /// as [`Rgba::INVALID`].
    pub fn load_colors(&self, key: &str) -> Vec<Rgba> {
        self.load(key).iter().map(|hex| Rgba::from_hex(hex)).collect()
    }

    /// Move `color` to the front of the history, dropping any earlier copy,
    /// and write the whole list back.
    pub fn add(&mut self, key: &str, color: Rgba) -> Result<(), StoreError> {
        let hex = color.to_hex();
        let mut hexes = self.load(key);
        hexes.retain(|existing| *existing != hex);
        hexes.insert(0, hex);
        let json = serde_json::to_string(&hexes)?;
        self.backend.set(key, &json)
    }
}

/// A named group of colors offered in the preset grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Preset {
    pub key: String,
    pub label: String,
    pub colors: Vec<Rgba>,
    /// Show the persisted history instead of `colors`.
    #[serde(default)]
    pub keep_history: bool,
}

impl Preset {
    pub fn last_used() -> Self {
        Self {
            key: "last-used-colors".to_string(),
            label: "Last used colors".to_string(),
            colors: vec![Rgba::BLACK, Rgba::WHITE, Rgba::YELLOW],
            keep_history: true,
        }
    }

    pub fn basic() -> Self {
        Self {
            key: "basic-colors".to_string(),
            label: "Basic colors".to_string(),
            colors: vec![
                Rgba::RED,
                Rgba::YELLOW,
                Rgba::GREEN,
                Rgba::AQUA,
                Rgba::BLUE,
                Rgba::FUCHSIA,
                Rgba::BLACK,
                Rgba::WHITE,
            ],
            keep_history: false,
        }
    }

    pub fn web_safe() -> Self {
        Self {
            key: "web-safe-colors".to_string(),
            label: "Web safe colors".to_string(),
            colors: named::all().collect(),
            keep_history: false,
        }
    }

    pub fn defaults() -> Vec<Self> {
        vec![Self::last_used(), Self::basic(), Self::web_safe()]
    }

    /// Exactly `count` colors for the grid: the history or the fixed colors,
    /// padded with white and truncated.
    pub fn visible_colors<B: PresetBackend>(
        &self,
        store: &PresetStore<B>,
        namespace: &str,
        count: usize,
    ) -> Vec<Rgba> {
        let mut colors = if self.keep_history {
            store.load_colors(namespace)
        } else {
            self.colors.clone()
        };
        colors.resize(count, Rgba::WHITE);
        colors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY: &str = "test-presets";

    fn unique_dir(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("floem-shade-{}-{}", name, std::process::id()))
    }

    #[test]
    fn test_load_missing_key_is_empty() {
        let store = PresetStore::new(MemoryBackend::new());
        assert!(store.load(KEY).is_empty());
    }

    #[test]
    fn test_load_malformed_json_is_empty() {
        let mut backend = MemoryBackend::new();
        backend.set(KEY, "{not json").unwrap();
        backend.set("object", r#"{"a":1}"#).unwrap();
        let store = PresetStore::new(backend);
        assert!(store.load(KEY).is_empty());
        assert!(store.load("object").is_empty());
    }

    #[test]
    fn test_add_is_most_recent_first() {
        let mut store = PresetStore::new(MemoryBackend::new());
        store.add(KEY, Rgba::RED).unwrap();
        store.add(KEY, Rgba::GREEN).unwrap();
        store.add(KEY, Rgba::BLUE).unwrap();
        assert_eq!(store.load(KEY), vec!["#0000ffff", "#00ff00ff", "#ff0000ff"]);
        assert_eq!(store.load_colors(KEY), vec![Rgba::BLUE, Rgba::GREEN, Rgba::RED]);
    }

    #[test]
    fn test_add_same_color_is_idempotent() {
        let mut store = PresetStore::new(MemoryBackend::new());
        store.add(KEY, Rgba::RED).unwrap();
        store.add(KEY, Rgba::BLUE).unwrap();
        for _ in 0..3 {
            store.add(KEY, Rgba::RED).unwrap();
        }
        assert_eq!(store.load(KEY), vec!["#ff0000ff", "#0000ffff"]);
    }

    #[test]
    fn test_add_writes_json_array() {
        let mut store = PresetStore::new(MemoryBackend::new());
        store.add(KEY, Rgba::new(171, 205, 239, 0.5)).unwrap();
        assert_eq!(store.backend().get(KEY).as_deref(), Some(r##"["#abcdef80"]"##));
    }

    #[test]
    fn test_add_replaces_malformed_history() {
        let mut backend = MemoryBackend::new();
        backend.set(KEY, "garbage").unwrap();
        let mut store = PresetStore::new(backend);
        store.add(KEY, Rgba::WHITE).unwrap();
        assert_eq!(store.load(KEY), vec!["#ffffffff"]);
    }

    #[test]
    fn test_namespaces_are_separate() {
        let mut store = PresetStore::new(MemoryBackend::new());
        store.add("a", Rgba::RED).unwrap();
        store.add("b", Rgba::BLUE).unwrap();
        assert_eq!(store.load("a"), vec!["#ff0000ff"]);
        assert_eq!(store.load("b"), vec!["#0000ffff"]);
    }

    #[test]
    fn test_file_backend_persists() {
        let dir = unique_dir("file-backend");
        let _ = std::fs::remove_dir_all(&dir);

        let mut store = PresetStore::new(FileBackend::new(&dir));
        assert!(store.load("color-picker-with-presets").is_empty());
        store.add("color-picker-with-presets", Rgba::RED).unwrap();
        store.add("color-picker-with-presets", Rgba::AQUA).unwrap();

        let reopened = PresetStore::new(FileBackend::new(&dir));
        assert_eq!(
            reopened.load("color-picker-with-presets"),
            vec!["#00ffffff", "#ff0000ff"]
        );
        assert!(dir.join("color-picker-with-presets.json").exists());

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_boxed_backend() {
        let backend: Box<dyn PresetBackend> = Box::new(MemoryBackend::new());
        let mut store = PresetStore::new(backend);
        store.add(KEY, Rgba::YELLOW).unwrap();
        assert_eq!(store.load_colors(KEY), vec![Rgba::YELLOW]);
    }

    #[test]
    fn test_file_backend_escapes_keys() {
        let backend = FileBackend::new("/tmp/presets");
        assert_eq!(
            backend.path_for("../evil key"),
            PathBuf::from("/tmp/presets/%2E%2E%2Fevil%20key.json")
        );
        assert_eq!(
            backend.path_for("100%"),
            PathBuf::from("/tmp/presets/100%25.json")
        );
        assert_eq!(
            backend.path_for("color-picker_with-presets"),
            PathBuf::from("/tmp/presets/color-picker_with-presets.json")
        );
    }

    #[test]
    fn test_file_backend_keeps_similar_keys_apart() {
        let dir = unique_dir("similar-keys");
        let _ = std::fs::remove_dir_all(&dir);

        let mut store = PresetStore::new(FileBackend::new(&dir));
        store.add("team.a", Rgba::RED).unwrap();
        store.add("team_a", Rgba::BLUE).unwrap();
        store.add("team%2Ea", Rgba::GREEN).unwrap();
        assert_eq!(store.load("team.a"), vec!["#ff0000ff"]);
        assert_eq!(store.load("team_a"), vec!["#0000ffff"]);
        assert_eq!(store.load("team%2Ea"), vec!["#00ff00ff"]);

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_visible_colors_pads_and_truncates() {
        let store = PresetStore::new(MemoryBackend::new());
        let basic = Preset::basic().visible_colors(&store, KEY, 10);
        assert_eq!(basic.len(), 10);
        assert_eq!(basic[0], Rgba::RED);
        assert_eq!(basic[8], Rgba::WHITE);
        assert_eq!(basic[9], Rgba::WHITE);

        let web = Preset::web_safe().visible_colors(&store, KEY, 4);
        assert_eq!(web.len(), 4);
    }

    #[test]
    fn test_visible_colors_reads_history() {
        let mut store = PresetStore::new(MemoryBackend::new());
        store.add(KEY, Rgba::MAGENTA).unwrap();
        let colors = Preset::last_used().visible_colors(&store, KEY, 3);
        assert_eq!(colors, vec![Rgba::MAGENTA, Rgba::WHITE, Rgba::WHITE]);
    }

    #[test]
    fn test_default_presets() {
        let presets = Preset::defaults();
        let keys: Vec<&str> = presets.iter().map(|p| p.key.as_str()).collect();
        assert_eq!(keys, ["last-used-colors", "basic-colors", "web-safe-colors"]);
        assert!(presets[0].keep_history);
        assert_eq!(presets[2].colors.len(), named::NAMED_COLORS.len());
    }
}
