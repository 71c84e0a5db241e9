//! Scene navigation state and its persistence.

pub mod persistence;
pub mod store;

pub use persistence::{FilePersistence, MemoryPersistence, NavigationPersistence};
pub use store::{CursorStyle, NavigationState, NavigationStore, SceneKind, STORAGE_KEY};
