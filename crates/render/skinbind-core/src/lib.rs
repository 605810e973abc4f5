//! skinbind
//!
//! Resolves an opaque game profile into a cached, prepared model state and binds it to a
//! host renderer for one frame. Three binding purposes share one resolver namespace:
//! first-person hand, third-person player, and skull decorations.
//!
//! The host brings its own profile and entity types plus three collaborators: a
//! [`ProfileResolver`] (or the bundled [`ProfileCache`]), a [`RendererPort`] and an
//! [`AnimationPort`]. Everything runs on the render thread.

pub mod cache;
pub mod config;
pub mod definition;
pub mod error;
pub mod keys;
pub mod manager;
pub mod player;
pub mod ports;
pub mod properties;

pub use cache::{CacheStats, PlayerLoader, ProfileCache, ProfileIdentity};
pub use config::{CacheConfig, Config, PropertyKeys};
pub use definition::{DefinitionStatus, ItemTransform, ModelDefinition, TextureSheetType};
pub use error::{ConfigError, LoadError};
pub use keys::{UniqueKey, PLAYER_UNIQUE, SKULL_UNIQUE};
pub use manager::{ProfileSource, RenderManager};
pub use player::{
    AnimationMode, AnimationState, LiveEntity, PlayerRef, PoseSnapshot, ResolvedPlayer,
};
pub use ports::{AnimationPort, ProfileResolver, RendererPort};
pub use properties::PropertyGetter;
