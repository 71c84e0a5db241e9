//! Navigation store: active scene, transition flag, and cursor style.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::persistence::NavigationPersistence;
use crate::error::NavigationError;

/// Storage key for the persisted navigation state.
pub const STORAGE_KEY: &str = "navigation-storage";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SceneKind {
    #[default]
    Galaxy,
    Roadmap,
}

impl fmt::Display for SceneKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SceneKind::Galaxy => f.write_str("galaxy"),
            SceneKind::Roadmap => f.write_str("roadmap"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CursorStyle {
    #[default]
    Default,
    Grab,
    Grabbing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NavigationState {
    pub current_scene: SceneKind,
    pub is_transitioning: bool,
    pub cursor_style: CursorStyle,
}

/// The persisted subset of [`NavigationState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
struct PersistedNavigation {
    current_scene: SceneKind,
    cursor_style: CursorStyle,
}

/// Explicit navigation state with injected persistence.
///
/// State is loaded once in [`NavigationStore::load`] and saved whenever a
/// persisted field changes. Storage failures are logged and never block
/// navigation.
pub struct NavigationStore {
    state: NavigationState,
    persistence: Box<dyn NavigationPersistence>,
}

impl NavigationStore {
    /// Load persisted state, falling back to defaults on missing or corrupt data.
    pub fn load(persistence: Box<dyn NavigationPersistence>) -> Self {
        let state = match read_persisted(persistence.as_ref()) {
            Ok(Some(saved)) => NavigationState {
                current_scene: saved.current_scene,
                is_transitioning: false,
                cursor_style: saved.cursor_style,
            },
            Ok(None) => NavigationState::default(),
            Err(e) => {
                tracing::warn!("Discarding navigation state: {}", e);
                NavigationState::default()
            }
        };
        tracing::debug!("Navigation state loaded: scene={}", state.current_scene);
        Self { state, persistence }
    }

    pub fn state(&self) -> NavigationState {
        self.state
    }

    pub fn current_scene(&self) -> SceneKind {
        self.state.current_scene
    }

    pub fn is_transitioning(&self) -> bool {
        self.state.is_transitioning
    }

    pub fn cursor_style(&self) -> CursorStyle {
        self.state.cursor_style
    }

    pub fn set_scene(&mut self, scene: SceneKind) {
        if self.state.current_scene != scene {
            tracing::info!("Scene changed: {} -> {}", self.state.current_scene, scene);
            self.state.current_scene = scene;
            self.persist();
        }
    }

    /// Transition flag is runtime-only and never persisted.
    pub fn set_transitioning(&mut self, transitioning: bool) {
        self.state.is_transitioning = transitioning;
    }

    pub fn set_cursor_style(&mut self, style: CursorStyle) {
        if self.state.cursor_style != style {
            self.state.cursor_style = style;
            self.persist();
        }
    }

    fn persist(&self) {
        let persisted = PersistedNavigation {
            current_scene: self.state.current_scene,
            cursor_style: self.state.cursor_style,
        };
        let result = serde_json::to_string(&persisted)
            .map_err(NavigationError::from)
            .and_then(|json| self.persistence.save(STORAGE_KEY, &json));
        if let Err(e) = result {
            tracing::warn!("Failed to save navigation state: {}", e);
        }
    }
}

impl fmt::Debug for NavigationStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NavigationStore")
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

fn read_persisted(
    persistence: &dyn NavigationPersistence,
) -> Result<Option<PersistedNavigation>, NavigationError> {
    match persistence.load(STORAGE_KEY)? {
        Some(json) => Ok(Some(serde_json::from_str(&json)?)),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::navigation::persistence::{FilePersistence, MemoryPersistence};
    use std::sync::Arc;

    /// Shares one memory backend between two stores.
    struct Shared(Arc<MemoryPersistence>);

    impl NavigationPersistence for Shared {
        fn load(&self, key: &str) -> Result<Option<String>, NavigationError> {
            self.0.load(key)
        }
        fn save(&self, key: &str, value: &str) -> Result<(), NavigationError> {
            self.0.save(key, value)
        }
    }

    struct Failing;

    impl NavigationPersistence for Failing {
        fn load(&self, _: &str) -> Result<Option<String>, NavigationError> {
            Err(NavigationError::Poisoned)
        }
        fn save(&self, _: &str, _: &str) -> Result<(), NavigationError> {
            Err(NavigationError::Poisoned)
        }
    }

    #[test]
    fn test_defaults_when_empty() {
        let store = NavigationStore::load(Box::new(MemoryPersistence::new()));
        assert_eq!(store.state(), NavigationState::default());
        assert_eq!(store.current_scene(), SceneKind::Galaxy);
    }

    #[test]
    fn test_changes_survive_reload() {
        let backend = Arc::new(MemoryPersistence::new());
        let mut store = NavigationStore::load(Box::new(Shared(backend.clone())));
        store.set_scene(SceneKind::Roadmap);
        store.set_cursor_style(CursorStyle::Grab);
        store.set_transitioning(true);

        let reloaded = NavigationStore::load(Box::new(Shared(backend)));
        assert_eq!(reloaded.current_scene(), SceneKind::Roadmap);
        assert_eq!(reloaded.cursor_style(), CursorStyle::Grab);
        assert!(!reloaded.is_transitioning());
    }

    #[test]
    fn test_persisted_format() {
        let backend = Arc::new(MemoryPersistence::new());
        let mut store = NavigationStore::load(Box::new(Shared(backend.clone())));
        store.set_scene(SceneKind::Roadmap);
        let json = backend.load(STORAGE_KEY).unwrap().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["current_scene"], "roadmap");
        assert_eq!(value["cursor_style"], "default");
        assert!(value.get("is_transitioning").is_none());
    }

    #[test]
    fn test_corrupt_storage_falls_back_to_defaults() {
        let backend = MemoryPersistence::new();
        backend.save(STORAGE_KEY, "not json").unwrap();
        let store = NavigationStore::load(Box::new(backend));
        assert_eq!(store.state(), NavigationState::default());
    }

    #[test]
    fn test_storage_failures_do_not_block_navigation() {
        let mut store = NavigationStore::load(Box::new(Failing));
        store.set_scene(SceneKind::Roadmap);
        assert_eq!(store.current_scene(), SceneKind::Roadmap);
    }

    #[test]
    fn test_file_backend_reload() {
        let tmp = tempfile::tempdir().unwrap();
        let mut store = NavigationStore::load(Box::new(FilePersistence::new(tmp.path())));
        store.set_cursor_style(CursorStyle::Grabbing);
        let reloaded = NavigationStore::load(Box::new(FilePersistence::new(tmp.path())));
        assert_eq!(reloaded.cursor_style(), CursorStyle::Grabbing);
    }
}
