//! Bind orchestration: resolves a profile for a binding purpose, refreshes stale skin
//! resolutions, prepares the resolved state and hands it to the renderer and animation
//! ports.
//!
//! The manager tracks one "currently bound" player. It shares the resolver's entry, is
//! overwritten by every successful resolution and is restored around skull binds, which
//! are nested inside whatever player or hand bind is active. Cache eviction does not
//! clear it; only an explicit clear or the next successful resolution does.

use std::rc::Rc;

use log::{debug, trace};

use crate::config::PropertyKeys;
use crate::definition::{DefinitionStatus, TextureSheetType};
use crate::keys::{UniqueKey, PLAYER_UNIQUE};
use crate::player::{AnimationMode, LiveEntity, PlayerRef};
use crate::ports::{AnimationPort, ProfileResolver, RendererPort};
use crate::properties::{Projections, PropertyGetter};

/// Where the profile for a resolution comes from.
#[derive(Debug)]
pub enum ProfileSource<'a, G, P> {
    /// Explicit profile, no live entity to sync pose data from.
    Profile(&'a G),
    /// Profile derived from the entity through the `profile_of` projection.
    Entity(&'a P),
    /// Explicit profile plus an entity to sync pose data from.
    Both { profile: &'a G, entity: &'a P },
}

impl<'a, G, P> ProfileSource<'a, G, P> {
    /// Live entity to sync pose data from, if the source carries one.
    pub fn entity(&self) -> Option<&'a P> {
        match *self {
            ProfileSource::Profile(_) => None,
            ProfileSource::Entity(entity) | ProfileSource::Both { entity, .. } => Some(entity),
        }
    }
}

impl<G, P> Clone for ProfileSource<'_, G, P> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<G, P> Copy for ProfileSource<'_, G, P> {}

pub struct RenderManager<G, P, L, R, A> {
    bound: Option<PlayerRef<G>>,
    renderer: R,
    loader: L,
    animations: A,
    projections: Projections<G, P>,
    property_keys: PropertyKeys,
}

impl<G, P, L, R, A> RenderManager<G, P, L, R, A>
where
    P: LiveEntity,
    L: ProfileResolver<G>,
    R: RendererPort<G>,
    A: AnimationPort<G>,
{
    /// Manager with no property getters installed and nothing bound. `profile_of` derives
    /// the profile for entity-sourced binds.
    pub fn new(
        renderer: R,
        loader: L,
        animations: A,
        profile_of: impl Fn(&P) -> G + 'static,
    ) -> Self {
        Self {
            bound: None,
            renderer,
            loader,
            animations,
            projections: Projections::new(profile_of),
            property_keys: PropertyKeys::default(),
        }
    }

    /// Property names used by [`Self::set_property_getters`].
    pub fn with_property_keys(mut self, keys: PropertyKeys) -> Self {
        self.property_keys = keys;
        self
    }

    /// Renderer port.
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Renderer port, mutably.
    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    /// Profile resolver.
    pub fn loader(&self) -> &L {
        &self.loader
    }

    /// Profile resolver, mutably.
    pub fn loader_mut(&mut self) -> &mut L {
        &mut self.loader
    }

    /// Animation port.
    pub fn animations(&self) -> &A {
        &self.animations
    }

    /// Animation port, mutably.
    pub fn animations_mut(&mut self) -> &mut A {
        &mut self.animations
    }

    /// Resolve `source` under `unique`, refresh a stale skin resolution, and prepare the
    /// result for a bind in `mode`. Records the result as the bound player.
    ///
    /// `None` when the resolver has nothing or the resolution has no renderable model.
    fn resolve(
        &mut self,
        source: ProfileSource<'_, G, P>,
        unique: &str,
        mode: AnimationMode,
    ) -> Option<PlayerRef<G>> {
        let derived;
        let profile = match source {
            ProfileSource::Profile(profile) | ProfileSource::Both { profile, .. } => profile,
            ProfileSource::Entity(entity) => {
                derived = self.projections.profile_of(entity);
                &derived
            }
        };

        let mut player = self.loader.load_player(profile, unique)?;

        // Explicit model assignments are never re-checked; only bare skins go stale.
        let stale = {
            let cached = player.borrow();
            let changed = self.projections.texture_changed(profile, cached.profile());
            !cached.is_model && changed == Some(true)
        };
        if stale {
            debug!("skin texture changed for '{}', reloading", unique);
            player = self.loader.reload_player(profile, unique)?;
        }

        {
            let mut state = player.borrow_mut();
            if state.model_definition().is_none() {
                return None;
            }
            state.anim_state.animation_mode = mode;
            if let Some(entity) = source.entity() {
                state.update_player(entity);
            }
            if let Some(def) = state.model_definition_mut() {
                def.clear_item_transforms();
            }
        }

        self.bound = Some(Rc::clone(&player));
        Some(player)
    }

    /// Issue the renderer bind and animation preparation for an already prepared player.
    /// A pending jump is consumed here and handed to exactly one preparation.
    fn bind_resolved(
        &mut self,
        player: &PlayerRef<G>,
        model: &R::Model,
        arg: Option<&str>,
        buffer: &mut R::Buffer,
    ) -> bool {
        let jump = {
            let mut state = player.borrow_mut();
            if state.model_definition().is_none() {
                return false;
            }
            state.anim_state.take_jump()
        };
        let state = player.borrow();
        let Some(def) = state.model_definition() else {
            return false;
        };
        let mode = state.anim_state.animation_mode;
        self.renderer.bind_model(model, arg, buffer, def, &state, mode);
        self.animations.prepare_animations(&state, mode, def, jump);
        trace!("bound '{}' as {:?}", def.name(), mode);
        true
    }

    /// Resolve and bind in one step. On failure `model` is unbound so no half-bound
    /// state is left behind.
    pub fn try_bind_model(
        &mut self,
        source: ProfileSource<'_, G, P>,
        buffer: &mut R::Buffer,
        model: &R::Model,
        arg: Option<&str>,
        unique: &str,
        mode: AnimationMode,
    ) -> bool {
        let bound = match self.resolve(source, unique, mode) {
            Some(player) => self.bind_resolved(&player, model, arg, buffer),
            None => false,
        };
        if !bound {
            trace!("nothing to bind for '{}', unbinding", unique);
            self.renderer.unbind_model(model);
        }
        bound
    }

    /// Resolve and prepare without binding. The result is also the bound player, so
    /// [`Self::bind_player_state`] can bind it as many times as needed.
    pub fn load_player_state(
        &mut self,
        source: ProfileSource<'_, G, P>,
        unique: &str,
        mode: AnimationMode,
    ) -> Option<PlayerRef<G>> {
        self.resolve(source, unique, mode)
    }

    /// Re-bind the bound player with its stored definition and mode. No-op when nothing
    /// is bound.
    pub fn bind_player_state(
        &mut self,
        buffer: &mut R::Buffer,
        model: &R::Model,
        arg: Option<&str>,
    ) {
        if let Some(player) = self.bound_player() {
            self.bind_resolved(&player, model, arg, buffer);
        }
    }

    /// First-person hand.
    pub fn bind_hand(&mut self, entity: &P, buffer: &mut R::Buffer, model: &R::Model) -> bool {
        self.try_bind_model(
            ProfileSource::Entity(entity),
            buffer,
            model,
            None,
            PLAYER_UNIQUE,
            AnimationMode::Hand,
        )
    }

    /// Third-person player. Any previously bound player is dropped first.
    pub fn bind_player(&mut self, entity: &P, buffer: &mut R::Buffer, model: &R::Model) -> bool {
        if self.bound.is_some() {
            self.clear_bound_player();
        }
        self.try_bind_model(
            ProfileSource::Entity(entity),
            buffer,
            model,
            None,
            PLAYER_UNIQUE,
            AnimationMode::Player,
        )
    }

    /// Skull decoration. The bound player is the same before and after the call.
    pub fn bind_skull(&mut self, profile: &G, buffer: &mut R::Buffer, model: &R::Model) -> bool {
        let prev = self.bound.clone();
        let unique = self.skull_key(profile).to_string();
        let bound = self.try_bind_model(
            ProfileSource::Profile(profile),
            buffer,
            model,
            None,
            &unique,
            AnimationMode::Skull,
        );
        self.bound = prev;
        bound
    }

    /// Cache key a skull for `profile` resolves under.
    pub fn skull_key(&self, profile: &G) -> UniqueKey {
        UniqueKey::for_skull(
            self.projections.has_skull_model(),
            self.projections.skull_model(profile),
            self.projections.texture(profile),
        )
    }

    pub fn bind_armor(&mut self, player_model: &R::Model, model: &R::Model, layer: u8) {
        let arg = format!("armor{layer}");
        self.renderer.bind_sub_model(player_model, model, Some(&arg));
    }

    pub fn bind_elytra(&mut self, player_model: &R::Model, model: &R::Model) {
        self.renderer.bind_sub_model(player_model, model, None);
    }

    pub fn bind_skin(&mut self, model: &R::Model, sheet: TextureSheetType) {
        self.renderer.bind_skin(model, None, sheet);
    }

    pub fn unbind(&mut self, model: &R::Model) {
        self.renderer.unbind_model(model);
    }

    /// Flush any pending batched draw for `model`, then unbind it.
    pub fn unbind_flush(&mut self, model: &R::Model) {
        self.renderer.flush_batch(model, None);
        self.unbind(model);
    }

    /// [`Self::unbind_flush`], then forget the bound player.
    pub fn unbind_clear(&mut self, model: &R::Model) {
        self.unbind_flush(model);
        self.clear_bound_player();
    }

    /// The bound player, if any.
    pub fn bound_player(&self) -> Option<PlayerRef<G>> {
        self.bound.clone()
    }

    pub fn clear_bound_player(&mut self) {
        if self.bound.take().is_some() {
            debug!("cleared bound player");
        }
    }

    pub fn set_skull_model_getter(&mut self, getter: Option<PropertyGetter<G>>) {
        self.projections.set_skull_model(getter);
    }

    /// Installing a texture getter enables staleness checks for bare-skin resolutions.
    pub fn set_texture_getter(&mut self, getter: Option<PropertyGetter<G>>) {
        self.projections.set_texture(getter);
    }

    /// Install model and texture getters from a multimap lookup that returns the first
    /// value stored under a property name.
    pub fn set_property_getters<F>(&mut self, lookup: F)
    where
        F: Fn(&G, &str) -> Option<String> + 'static,
        G: 'static,
        P: 'static,
    {
        self.projections.set_property_getters(&self.property_keys, lookup);
    }

    /// Arm a one-shot jump on the entity's player resolution. No bind, no mode change.
    pub fn jump(&mut self, entity: &P) {
        let profile = self.projections.profile_of(entity);
        if let Some(player) = self.loader.load_player(&profile, PLAYER_UNIQUE) {
            player.borrow_mut().anim_state.jump();
        }
    }

    /// Diagnostic status of the definition under (profile, unique). Never reloads and
    /// never touches the bound player.
    pub fn status(&mut self, profile: &G, unique: &str) -> Option<DefinitionStatus> {
        let player = self.loader.load_player(profile, unique)?;
        let state = player.borrow();
        state.raw_model_definition().map(|def| def.status().clone())
    }
}
