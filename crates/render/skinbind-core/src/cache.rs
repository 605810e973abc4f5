//! In-memory [`ProfileResolver`] for hosts that do not bring their own cache.
//!
//! Entries are keyed by (profile identity, unique key) and kept in insertion order so the
//! oldest entry is evicted first once `max_entries` is reached. Eviction only drops the
//! cache's handle; a player bound elsewhere stays alive until that holder lets go.

use std::fmt::Debug;
use std::hash::Hash;
use std::rc::Rc;

use indexmap::IndexMap;
use log::{debug, warn};
use serde::Serialize;

use crate::config::CacheConfig;
use crate::error::LoadError;
use crate::player::{PlayerRef, ResolvedPlayer};
use crate::ports::ProfileResolver;

/// Stable identity of a profile. Two profile snapshots of the same account share an id
/// even when their skin textures differ.
pub trait ProfileIdentity {
    type Id: Clone + Eq + Hash + Debug;

    fn identity(&self) -> Self::Id;
}

/// Builds resolved players. Typically expensive: fetches skins, parses definitions.
pub trait PlayerLoader<G> {
    fn load(&mut self, profile: &G, unique: &str) -> Result<ResolvedPlayer<G>, LoadError>;
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub reloads: u64,
    pub failures: u64,
    pub evictions: u64,
}

pub struct ProfileCache<G: ProfileIdentity, L> {
    config: CacheConfig,
    loader: L,
    entries: IndexMap<(G::Id, String), PlayerRef<G>>,
    stats: CacheStats,
}

impl<G: ProfileIdentity, L: PlayerLoader<G>> ProfileCache<G, L> {
    pub fn new(loader: L, config: CacheConfig) -> Self {
        Self {
            config,
            loader,
            entries: IndexMap::new(),
            stats: CacheStats::default(),
        }
    }

    pub fn loader(&self) -> &L {
        &self.loader
    }

    pub fn loader_mut(&mut self) -> &mut L {
        &mut self.loader
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn stats(&self) -> CacheStats {
        self.stats
    }

    /// Look up an entry without loading on a miss.
    pub fn peek(&self, profile: &G, unique: &str) -> Option<PlayerRef<G>> {
        self.entries
            .get(&(profile.identity(), unique.to_string()))
            .cloned()
    }

    /// Drop every entry for the profile, under any key.
    pub fn invalidate(&mut self, profile: &G) {
        let id = profile.identity();
        let before = self.entries.len();
        self.entries.retain(|(entry_id, _), _| *entry_id != id);
        debug!(
            "invalidated {} cache entries for {:?}",
            before - self.entries.len(),
            id
        );
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    fn fetch(&mut self, profile: &G, unique: &str) -> Option<PlayerRef<G>> {
        match self.loader.load(profile, unique) {
            Ok(player) => Some(player.into_shared()),
            Err(err) => {
                self.stats.failures += 1;
                warn!(
                    "failed to load '{}' for {:?}: {}",
                    unique,
                    profile.identity(),
                    err
                );
                None
            }
        }
    }

    fn publish(&mut self, key: (G::Id, String), player: PlayerRef<G>) {
        self.entries.shift_remove(&key);
        let cap = self.config.max_entries.max(1);
        while self.entries.len() >= cap {
            if let Some(((id, unique), _)) = self.entries.shift_remove_index(0) {
                self.stats.evictions += 1;
                debug!("evicted '{}' for {:?}", unique, id);
            }
        }
        self.entries.insert(key, player);
    }
}

impl<G: ProfileIdentity, L: PlayerLoader<G>> ProfileResolver<G> for ProfileCache<G, L> {
    fn load_player(&mut self, profile: &G, unique: &str) -> Option<PlayerRef<G>> {
        let key = (profile.identity(), unique.to_string());
        if let Some(player) = self.entries.get(&key) {
            self.stats.hits += 1;
            return Some(Rc::clone(player));
        }
        self.stats.misses += 1;
        let player = self.fetch(profile, unique)?;
        self.publish(key, Rc::clone(&player));
        Some(player)
    }

    fn reload_player(&mut self, profile: &G, unique: &str) -> Option<PlayerRef<G>> {
        let key = (profile.identity(), unique.to_string());
        self.stats.reloads += 1;
        match self.fetch(profile, unique) {
            Some(player) => {
                self.publish(key, Rc::clone(&player));
                Some(player)
            }
            None => {
                self.entries.shift_remove(&key);
                None
            }
        }
    }
}

impl<G: ProfileIdentity, L> Debug for ProfileCache<G, L> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProfileCache")
            .field("config", &self.config)
            .field("entries", &self.entries.len())
            .field("stats", &self.stats)
            .finish_non_exhaustive()
    }
}
