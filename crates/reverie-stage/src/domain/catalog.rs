//! Ordered catalog of scene factories.

use std::fmt;

use reverie_core::error::StageError;
use reverie_core::scene_id::SceneId;

use super::scene::Scene;

type SceneFactory = Box<dyn Fn() -> Box<dyn Scene> + Send + Sync>;

struct CatalogEntry {
    id: SceneId,
    scored: bool,
    factory: SceneFactory,
}

/// The fixed, ordered set of scenes. Order defines `advance`/`retreat`.
#[derive(Default)]
pub struct SceneCatalog {
    entries: Vec<CatalogEntry>,
}

impl SceneCatalog {
    /// Creates an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a scene. `scored` scenes count toward the scorecard.
    ///
    /// # Errors
    ///
    /// Returns `StageError::DuplicateScene` if `id` is already registered.
    pub fn register<F>(
        &mut self,
        id: impl Into<SceneId>,
        scored: bool,
        factory: F,
    ) -> Result<(), StageError>
    where
        F: Fn() -> Box<dyn Scene> + Send + Sync + 'static,
    {
        let id = id.into();
        if self.contains(&id) {
            return Err(StageError::DuplicateScene(id));
        }
        self.entries.push(CatalogEntry {
            id,
            scored,
            factory: Box::new(factory),
        });
        Ok(())
    }

    /// Number of scenes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no scene is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns `true` if `id` is registered.
    #[must_use]
    pub fn contains(&self, id: &SceneId) -> bool {
        self.index_of(id).is_some()
    }

    /// Position of `id` in the catalog order.
    #[must_use]
    pub fn index_of(&self, id: &SceneId) -> Option<usize> {
        self.entries.iter().position(|e| &e.id == id)
    }

    /// Ids in catalog order.
    #[must_use]
    pub fn order(&self) -> Vec<SceneId> {
        self.entries.iter().map(|e| e.id.clone()).collect()
    }

    /// First scene, if any.
    #[must_use]
    pub fn first(&self) -> Option<&SceneId> {
        self.entries.first().map(|e| &e.id)
    }

    /// Returns `true` if `id` counts toward the scorecard.
    #[must_use]
    pub fn is_scored(&self, id: &SceneId) -> bool {
        self.entries.iter().any(|e| &e.id == id && e.scored)
    }

    /// Number of scored scenes.
    #[must_use]
    pub fn scored_count(&self) -> usize {
        self.entries.iter().filter(|e| e.scored).count()
    }

    /// Entry after `current`, clamped to the last one. With no current
    /// scene, the first entry.
    #[must_use]
    pub fn next_after(&self, current: Option<&SceneId>) -> Option<&SceneId> {
        self.step(current, |i| (i + 1).min(self.entries.len().saturating_sub(1)))
    }

    /// Entry before `current`, clamped to the first one. With no current
    /// scene, the first entry.
    #[must_use]
    pub fn previous_before(&self, current: Option<&SceneId>) -> Option<&SceneId> {
        self.step(current, |i| i.saturating_sub(1))
    }

    fn step(&self, current: Option<&SceneId>, f: impl Fn(usize) -> usize) -> Option<&SceneId> {
        let index = current.and_then(|id| self.index_of(id)).map_or(0, f);
        self.entries.get(index).map(|e| &e.id)
    }

    /// Constructs a fresh scene for `id`.
    #[must_use]
    pub fn build(&self, id: &SceneId) -> Option<Box<dyn Scene>> {
        self.entries
            .iter()
            .find(|e| &e.id == id)
            .map(|e| (e.factory)())
    }
}

impl fmt::Debug for SceneCatalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.entries.iter().map(|e| (&e.id, e.scored)))
            .finish()
    }
}
