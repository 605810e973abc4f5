//! Model definition surface consumed by the orchestrator.
//!
//! Parsing and loading of definitions live outside this crate; only the pieces the bind
//! cycle touches are modeled here: the per-frame item transform cache and a status value.

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

/// Load status of a model definition. Doubles as the diagnostic value returned by
/// `RenderManager::status`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum DefinitionStatus {
    #[default]
    Loading,
    Loaded,
    /// The owner chose not to show a custom model.
    Hidden,
    Error {
        message: String,
    },
}

impl DefinitionStatus {
    pub fn is_renderable(&self) -> bool {
        matches!(self, DefinitionStatus::Loaded)
    }
}

/// Transform applied to a held item for the current frame.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ItemTransform {
    pub translation: [f32; 3],
    pub rotation: [f32; 3],
    pub scale: [f32; 3],
}

impl Default for ItemTransform {
    fn default() -> Self {
        Self {
            translation: [0.0; 3],
            rotation: [0.0; 3],
            scale: [1.0; 3],
        }
    }
}

/// Sheets a skin texture can be bound from.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextureSheetType {
    Skin,
    Cape,
    Elytra,
    Armor1,
    Armor2,
}

#[derive(Clone, Debug, Default)]
pub struct ModelDefinition {
    name: String,
    status: DefinitionStatus,
    /// Item slot -> transform. Filled by the renderer during a frame, cleared before
    /// every bind.
    pub item_transforms: HashMap<String, ItemTransform>,
}

impl ModelDefinition {
    pub fn new(name: impl Into<String>, status: DefinitionStatus) -> Self {
        Self {
            name: name.into(),
            status,
            item_transforms: HashMap::new(),
        }
    }

    /// Shorthand for a definition that finished loading.
    pub fn loaded(name: impl Into<String>) -> Self {
        Self::new(name, DefinitionStatus::Loaded)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn status(&self) -> &DefinitionStatus {
        &self.status
    }

    pub fn set_status(&mut self, status: DefinitionStatus) {
        self.status = status;
    }

    pub fn clear_item_transforms(&mut self) {
        self.item_transforms.clear();
    }
}
