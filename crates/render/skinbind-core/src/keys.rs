//! Cache keys ("unique" strings) that separate resolutions by purpose.
//!
//! Hand and third-person player binds share [`PLAYER_UNIQUE`]. Skull decorations get
//! their own namespace so a skull resolved from the same texture as a player never
//! collides with that player's cached state.

use std::fmt;

/// Key shared by hand and third-person player resolutions.
pub const PLAYER_UNIQUE: &str = "player";

/// Fallback key for skulls that carry neither a model nor a texture property.
pub const SKULL_UNIQUE: &str = "skull";

/// Prefix for skulls with an explicit model assignment.
pub const MODEL_PREFIX: &str = "model:";

/// Prefix for skulls keyed only by their skin texture.
pub const SKULL_TEXTURE_PREFIX: &str = "skull_tex:";

/// Typed form of a resolution key. `Display` yields the string handed to the resolver.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum UniqueKey {
    Player,
    Skull,
    Model(String),
    SkullTexture(String),
}

impl UniqueKey {
    /// Derive the key for a skull bind.
    ///
    /// `model_getter_configured` mirrors whether a model projection exists at all: without
    /// one, every skull falls back to [`UniqueKey::Skull`], even if a texture is known.
    pub fn for_skull(
        model_getter_configured: bool,
        model: Option<String>,
        texture: Option<String>,
    ) -> Self {
        if !model_getter_configured {
            return UniqueKey::Skull;
        }
        match (model, texture) {
            (Some(model), _) => UniqueKey::Model(model),
            (None, Some(texture)) => UniqueKey::SkullTexture(texture),
            (None, None) => UniqueKey::Skull,
        }
    }
}

impl fmt::Display for UniqueKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UniqueKey::Player => f.write_str(PLAYER_UNIQUE),
            UniqueKey::Skull => f.write_str(SKULL_UNIQUE),
            UniqueKey::Model(name) => write!(f, "{MODEL_PREFIX}{name}"),
            UniqueKey::SkullTexture(tex) => write!(f, "{SKULL_TEXTURE_PREFIX}{tex}"),
        }
    }
}
