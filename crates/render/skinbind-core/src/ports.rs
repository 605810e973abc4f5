//! Collaborator traits the orchestrator drives.
//!
//! Hosts implement these against their own loader, renderer and animation engine and
//! pass them into `RenderManager::new`. All calls happen on the render thread.

use crate::definition::{ModelDefinition, TextureSheetType};
use crate::player::{AnimationMode, PlayerRef, ResolvedPlayer};

/// Resolves a profile under a cache key into shared player state.
pub trait ProfileResolver<G> {
    /// Cached or freshly loaded state. Repeated calls with the same (profile, key) return
    /// the same entry until it is invalidated.
    fn load_player(&mut self, profile: &G, unique: &str) -> Option<PlayerRef<G>>;

    /// Bypass the cache, recompute, and republish under `unique`.
    fn reload_player(&mut self, profile: &G, unique: &str) -> Option<PlayerRef<G>>;
}

/// Engine-side model binding.
pub trait RendererPort<G> {
    /// Host model handle a definition is bound onto.
    type Model;
    /// Host draw buffer passed through to the bind.
    type Buffer;

    fn bind_model(
        &mut self,
        model: &Self::Model,
        arg: Option<&str>,
        buffer: &mut Self::Buffer,
        definition: &ModelDefinition,
        player: &ResolvedPlayer<G>,
        mode: AnimationMode,
    );

    fn unbind_model(&mut self, model: &Self::Model);

    /// Submit any batched draw pending for `model`.
    fn flush_batch(&mut self, model: &Self::Model, batch: Option<&str>);

    /// Attach `model` as a part of the already bound `parent`.
    fn bind_sub_model(&mut self, parent: &Self::Model, model: &Self::Model, arg: Option<&str>);

    fn bind_skin(&mut self, model: &Self::Model, arg: Option<&str>, sheet: TextureSheetType);
}

/// Per-frame pose preparation.
pub trait AnimationPort<G> {
    /// `jump` is true on the one preparation that follows an armed jump gesture.
    fn prepare_animations(
        &mut self,
        player: &ResolvedPlayer<G>,
        mode: AnimationMode,
        definition: &ModelDefinition,
        jump: bool,
    );
}
