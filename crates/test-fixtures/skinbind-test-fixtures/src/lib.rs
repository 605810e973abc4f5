//! Shared fixtures for skinbind tests: fake profiles and entities loaded from
//! `fixtures/profiles.json`, a loader that builds resolved players from them, and
//! renderer/animation ports that record every call into one shared journal.

use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap};
use std::rc::Rc;

use anyhow::{anyhow, Result};
use once_cell::sync::Lazy;
use serde::Deserialize;
use uuid::Uuid;

use skinbind::{
    AnimationMode, AnimationPort, CacheConfig, DefinitionStatus, LiveEntity, LoadError,
    ModelDefinition, PlayerLoader, PoseSnapshot, ProfileCache, ProfileIdentity, RenderManager,
    RendererPort, ResolvedPlayer, TextureSheetType,
};

static MANIFEST: Lazy<Manifest> = Lazy::new(|| {
    let raw = include_str!("../../../../fixtures/profiles.json");
    serde_json::from_str(raw).expect("profile fixtures should parse")
});

#[derive(Debug, Deserialize)]
struct Manifest {
    profiles: HashMap<String, ProfileEntry>,
}

#[derive(Debug, Clone, Deserialize)]
struct ProfileEntry {
    id: Uuid,
    name: String,
    #[serde(default)]
    properties: BTreeMap<String, Vec<String>>,
    #[serde(default)]
    status: Option<DefinitionStatus>,
    #[serde(default)]
    missing: bool,
}

pub const MODEL_PROPERTY: &str = "cpm:model";
pub const TEXTURES_PROPERTY: &str = "textures";

/// Profile snapshot with a property multimap, like a game profile.
#[derive(Debug, Clone, PartialEq)]
pub struct FixtureProfile {
    pub id: Uuid,
    pub name: String,
    pub properties: BTreeMap<String, Vec<String>>,
    status: Option<DefinitionStatus>,
    missing: bool,
}

impl FixtureProfile {
    pub fn first_property(&self, key: &str) -> Option<String> {
        self.properties
            .get(key)
            .and_then(|values| values.first())
            .cloned()
    }

    pub fn texture(&self) -> Option<String> {
        self.first_property(TEXTURES_PROPERTY)
    }
}

impl ProfileIdentity for FixtureProfile {
    type Id = Uuid;

    fn identity(&self) -> Uuid {
        self.id
    }
}

pub mod profiles {
    use super::*;

    pub fn keys() -> Vec<String> {
        MANIFEST.profiles.keys().cloned().collect()
    }

    pub fn get(name: &str) -> Result<FixtureProfile> {
        let entry = MANIFEST
            .profiles
            .get(name)
            .ok_or_else(|| anyhow!("unknown profile fixture '{name}'"))?
            .clone();
        Ok(FixtureProfile {
            id: entry.id,
            name: entry.name,
            properties: entry.properties,
            status: entry.status,
            missing: entry.missing,
        })
    }

    pub fn entity(name: &str) -> Result<FixtureEntity> {
        Ok(FixtureEntity {
            profile: get(name)?,
            pose: PoseSnapshot::default(),
        })
    }
}

/// Live entity carrying a profile snapshot and a pose.
#[derive(Debug, Clone)]
pub struct FixtureEntity {
    pub profile: FixtureProfile,
    pub pose: PoseSnapshot,
}

impl LiveEntity for FixtureEntity {
    fn pose(&self) -> PoseSnapshot {
        self.pose
    }
}

/// Builds players from fixture profiles. A profile with a `cpm:model` property resolves
/// as an explicit model assignment.
#[derive(Debug, Default)]
pub struct FixtureLoader {
    /// (profile name, unique key) of every load, in call order.
    pub loads: Vec<(String, String)>,
}

impl PlayerLoader<FixtureProfile> for FixtureLoader {
    fn load(
        &mut self,
        profile: &FixtureProfile,
        unique: &str,
    ) -> Result<ResolvedPlayer<FixtureProfile>, LoadError> {
        self.loads.push((profile.name.clone(), unique.to_string()));
        if profile.missing {
            return Err(LoadError::ProfileNotFound);
        }
        let status = profile.status.clone().unwrap_or(DefinitionStatus::Loaded);
        let texture = profile.texture().unwrap_or_else(|| "none".into());
        let mut definition =
            ModelDefinition::new(format!("{}:{}:{}", profile.name, unique, texture), status);
        // Left over from a previous frame; every bind must clear it.
        definition
            .item_transforms
            .insert("main_hand".into(), Default::default());
        let is_model = profile.first_property(MODEL_PROPERTY).is_some();
        Ok(ResolvedPlayer::new(
            profile.clone(),
            is_model,
            Some(definition),
        ))
    }
}

/// Host model handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ModelHandle(pub u32);

/// Host draw buffer; counts the binds issued against it.
#[derive(Debug, Default)]
pub struct FrameBuffer {
    pub binds: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Bind {
        model: ModelHandle,
        arg: Option<String>,
        definition: String,
        mode: AnimationMode,
        transforms_empty: bool,
    },
    Prepare {
        definition: String,
        mode: AnimationMode,
        transforms_empty: bool,
        jump: bool,
    },
    Unbind(ModelHandle),
    Flush(ModelHandle),
    SubModel {
        parent: ModelHandle,
        model: ModelHandle,
        arg: Option<String>,
    },
    Skin {
        model: ModelHandle,
        sheet: TextureSheetType,
    },
}

/// Shared, ordered record of renderer and animation calls.
pub type Journal = Rc<RefCell<Vec<Call>>>;

#[derive(Debug, Default)]
pub struct RecordingRenderer {
    pub journal: Journal,
}

impl RendererPort<FixtureProfile> for RecordingRenderer {
    type Model = ModelHandle;
    type Buffer = FrameBuffer;

    fn bind_model(
        &mut self,
        model: &ModelHandle,
        arg: Option<&str>,
        buffer: &mut FrameBuffer,
        definition: &ModelDefinition,
        _player: &ResolvedPlayer<FixtureProfile>,
        mode: AnimationMode,
    ) {
        buffer.binds += 1;
        self.journal.borrow_mut().push(Call::Bind {
            model: *model,
            arg: arg.map(str::to_string),
            definition: definition.name().to_string(),
            mode,
            transforms_empty: definition.item_transforms.is_empty(),
        });
    }

    fn unbind_model(&mut self, model: &ModelHandle) {
        self.journal.borrow_mut().push(Call::Unbind(*model));
    }

    fn flush_batch(&mut self, model: &ModelHandle, _batch: Option<&str>) {
        self.journal.borrow_mut().push(Call::Flush(*model));
    }

    fn bind_sub_model(&mut self, parent: &ModelHandle, model: &ModelHandle, arg: Option<&str>) {
        self.journal.borrow_mut().push(Call::SubModel {
            parent: *parent,
            model: *model,
            arg: arg.map(str::to_string),
        });
    }

    fn bind_skin(&mut self, model: &ModelHandle, _arg: Option<&str>, sheet: TextureSheetType) {
        self.journal.borrow_mut().push(Call::Skin {
            model: *model,
            sheet,
        });
    }
}

#[derive(Debug, Default)]
pub struct RecordingAnimations {
    pub journal: Journal,
}

impl AnimationPort<FixtureProfile> for RecordingAnimations {
    fn prepare_animations(
        &mut self,
        _player: &ResolvedPlayer<FixtureProfile>,
        mode: AnimationMode,
        definition: &ModelDefinition,
        jump: bool,
    ) {
        self.journal.borrow_mut().push(Call::Prepare {
            definition: definition.name().to_string(),
            mode,
            transforms_empty: definition.item_transforms.is_empty(),
            jump,
        });
    }
}

pub type FixtureManager = RenderManager<
    FixtureProfile,
    FixtureEntity,
    ProfileCache<FixtureProfile, FixtureLoader>,
    RecordingRenderer,
    RecordingAnimations,
>;

/// Manager over a fresh cache with property getters installed, plus its journal.
pub fn manager() -> (FixtureManager, Journal) {
    manager_with(CacheConfig::default())
}

/// [`manager`] over a cache with the given bounds.
pub fn manager_with(cache: CacheConfig) -> (FixtureManager, Journal) {
    let mut mgr = bare_manager(cache);
    let journal = Rc::clone(&mgr.renderer().journal);
    mgr.set_property_getters(|profile: &FixtureProfile, key: &str| profile.first_property(key));
    (mgr, journal)
}

/// Manager with no property getters: no staleness checks, skulls always use the
/// fallback key.
pub fn bare_manager(cache: CacheConfig) -> FixtureManager {
    let journal = Journal::default();
    RenderManager::new(
        RecordingRenderer {
            journal: Rc::clone(&journal),
        },
        ProfileCache::new(FixtureLoader::default(), cache),
        RecordingAnimations { journal },
        |entity: &FixtureEntity| entity.profile.clone(),
    )
}
