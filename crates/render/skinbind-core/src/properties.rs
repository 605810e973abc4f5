//! Projections from host profile/entity types onto the values the orchestrator needs.

use std::rc::Rc;

use crate::config::PropertyKeys;

/// Reads a string property (model name, texture) off a profile.
pub type PropertyGetter<G> = Box<dyn Fn(&G) -> Option<String>>;

/// Host-supplied projections. `profile_of` is required; the property getters are optional
/// and may be installed after construction.
pub struct Projections<G, P> {
    profile_of: Box<dyn Fn(&P) -> G>,
    skull_model: Option<PropertyGetter<G>>,
    texture: Option<PropertyGetter<G>>,
}

impl<G, P> Projections<G, P> {
    pub fn new(profile_of: impl Fn(&P) -> G + 'static) -> Self {
        Self {
            profile_of: Box::new(profile_of),
            skull_model: None,
            texture: None,
        }
    }

    pub fn profile_of(&self, entity: &P) -> G {
        (self.profile_of)(entity)
    }

    pub fn set_skull_model(&mut self, getter: Option<PropertyGetter<G>>) {
        self.skull_model = getter;
    }

    pub fn set_texture(&mut self, getter: Option<PropertyGetter<G>>) {
        self.texture = getter;
    }

    pub fn has_skull_model(&self) -> bool {
        self.skull_model.is_some()
    }

    pub fn has_texture(&self) -> bool {
        self.texture.is_some()
    }

    pub fn skull_model(&self, profile: &G) -> Option<String> {
        self.skull_model.as_ref().and_then(|get| get(profile))
    }

    pub fn texture(&self, profile: &G) -> Option<String> {
        self.texture.as_ref().and_then(|get| get(profile))
    }

    /// `Some(true)` when the two profiles carry different textures, counting
    /// present-vs-absent as different. `None` when no texture getter is installed.
    pub fn texture_changed(&self, requested: &G, cached: &G) -> Option<bool> {
        let get = self.texture.as_ref()?;
        Some(get(requested) != get(cached))
    }

    /// Install both getters from a multimap lookup returning the first value stored under
    /// a property name.
    pub fn set_property_getters<F>(&mut self, keys: &PropertyKeys, lookup: F)
    where
        F: Fn(&G, &str) -> Option<String> + 'static,
        G: 'static,
        P: 'static,
    {
        let lookup = Rc::new(lookup);

        let model_lookup = Rc::clone(&lookup);
        let model_key = keys.model.clone();
        self.skull_model = Some(Box::new(move |profile: &G| {
            model_lookup(profile, &model_key)
        }));

        let texture_key = keys.textures.clone();
        self.texture = Some(Box::new(move |profile: &G| lookup(profile, &texture_key)));
    }
}

impl<G, P> std::fmt::Debug for Projections<G, P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Projections")
            .field("skull_model", &self.skull_model.is_some())
            .field("texture", &self.texture.is_some())
            .finish_non_exhaustive()
    }
}
