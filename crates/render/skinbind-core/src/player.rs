//! Resolved per-profile state: model definition, animation state and liveness data.

use std::cell::RefCell;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::definition::ModelDefinition;

/// Shared handle to a resolved player. The resolver's cache holds the owning `Rc`.
pub type PlayerRef<G> = Rc<RefCell<ResolvedPlayer<G>>>;

/// What a bound model is being drawn as.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnimationMode {
    /// First-person hand.
    Hand,
    /// Third-person player.
    #[default]
    Player,
    /// Block or item skull decoration.
    Skull,
}

/// Pose-affecting attributes copied from a live entity on every bind.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PoseSnapshot {
    pub sneaking: bool,
    pub sprinting: bool,
    pub swimming: bool,
    pub sleeping: bool,
    pub on_ground: bool,
    pub hurt: bool,
    /// Horizontal movement speed, blocks per tick.
    pub move_speed: f32,
    /// Body yaw in degrees.
    pub body_yaw: f32,
}

/// Host entity that can feed pose data into a resolved player.
pub trait LiveEntity {
    fn pose(&self) -> PoseSnapshot;
}

#[derive(Clone, Debug, Default)]
pub struct AnimationState {
    pub animation_mode: AnimationMode,
    pub pose: PoseSnapshot,
    jump_pending: bool,
}

impl AnimationState {
    /// Arm a one-shot jump gesture.
    pub fn jump(&mut self) {
        self.jump_pending = true;
    }

    pub fn jump_pending(&self) -> bool {
        self.jump_pending
    }

    /// Consume the jump gesture, returning whether one was armed.
    pub fn take_jump(&mut self) -> bool {
        std::mem::take(&mut self.jump_pending)
    }
}

/// Resolution result for one (profile, key) pair.
#[derive(Debug)]
pub struct ResolvedPlayer<G> {
    /// Resolved from an explicit model assignment rather than a bare skin.
    pub is_model: bool,
    profile: G,
    definition: Option<ModelDefinition>,
    pub anim_state: AnimationState,
    /// Number of live-entity syncs since resolution.
    updates: u64,
}

impl<G> ResolvedPlayer<G> {
    pub fn new(profile: G, is_model: bool, definition: Option<ModelDefinition>) -> Self {
        Self {
            is_model,
            profile,
            definition,
            anim_state: AnimationState::default(),
            updates: 0,
        }
    }

    /// Wrap into the shared form handed out by resolvers.
    pub fn into_shared(self) -> PlayerRef<G> {
        Rc::new(RefCell::new(self))
    }

    /// Profile data this resolution was computed from.
    pub fn profile(&self) -> &G {
        &self.profile
    }

    /// Definition when it is renderable, `None` otherwise.
    pub fn model_definition(&self) -> Option<&ModelDefinition> {
        self.definition
            .as_ref()
            .filter(|def| def.status().is_renderable())
    }

    pub fn model_definition_mut(&mut self) -> Option<&mut ModelDefinition> {
        self.definition
            .as_mut()
            .filter(|def| def.status().is_renderable())
    }

    /// Definition in whatever state it is in, for diagnostics.
    pub fn raw_model_definition(&self) -> Option<&ModelDefinition> {
        self.definition.as_ref()
    }

    pub fn set_model_definition(&mut self, definition: Option<ModelDefinition>) {
        self.definition = definition;
    }

    /// Copy pose-affecting attributes from the live entity. Identity is left alone.
    pub fn update_player<P: LiveEntity + ?Sized>(&mut self, entity: &P) {
        self.anim_state.pose = entity.pose();
        self.updates = self.updates.wrapping_add(1);
    }

    pub fn update_count(&self) -> u64 {
        self.updates
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::definition::DefinitionStatus;

    struct Sneaker;

    impl LiveEntity for Sneaker {
        fn pose(&self) -> PoseSnapshot {
            PoseSnapshot {
                sneaking: true,
                on_ground: true,
                ..PoseSnapshot::default()
            }
        }
    }

    #[test]
    fn jump_is_one_shot() {
        let mut state = AnimationState::default();
        assert!(!state.take_jump());
        state.jump();
        assert!(state.jump_pending());
        assert!(state.take_jump());
        assert!(!state.take_jump());
    }

    #[test]
    fn loading_definition_is_hidden_from_bind_path() {
        let def = ModelDefinition::new("m", DefinitionStatus::Loading);
        let player = ResolvedPlayer::new("p", false, Some(def));
        assert!(player.model_definition().is_none());
        assert_eq!(
            player.raw_model_definition().map(|d| d.status().clone()),
            Some(DefinitionStatus::Loading)
        );
    }

    #[test]
    fn update_player_copies_pose_only() {
        let mut player = ResolvedPlayer::new("p", true, None);
        player.anim_state.animation_mode = AnimationMode::Skull;
        player.update_player(&Sneaker);
        assert!(player.anim_state.pose.sneaking);
        assert_eq!(player.anim_state.animation_mode, AnimationMode::Skull);
        assert_eq!(*player.profile(), "p");
        assert_eq!(player.update_count(), 1);
    }
}
