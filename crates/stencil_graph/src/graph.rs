//! The entity dependency graph.
//!
//! Entities are deduplicated by signature on registration. Dependency edges
//! are checked for cycles as they are added, so a cyclic configuration is
//! rejected at the edge that closes the cycle rather than during emission.

use std::collections::{BTreeSet, HashMap};

use stencil_foundation::{Error, Result};
use tracing::debug;

use crate::entity::{Entity, EntityId};

// =============================================================================
// EntityGraph
// =============================================================================

/// Registry of entities and their dependency and reference edges.
#[derive(Clone, Debug, Default)]
pub struct EntityGraph {
    entities: Vec<Entity>,
    by_signature: HashMap<String, EntityId>,
    frozen: bool,
}

impl EntityGraph {
    /// Creates an empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of distinct entities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Returns true if no entity is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Returns true once the graph has been frozen for scheduling.
    #[must_use]
    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    /// Freezes the graph. Later mutations fail with `Frozen`.
    pub fn freeze(&mut self) {
        self.frozen = true;
    }

    /// Registers an entity, returning the id of the existing entity if one
    /// with the same signature is already present.
    ///
    /// # Errors
    /// Returns `Frozen` if the graph is frozen.
    pub fn register(&mut self, entity: Entity) -> Result<EntityId> {
        if let Some(id) = self.by_signature.get(entity.signature()) {
            debug!(signature = entity.signature(), %id, "entity deduplicated");
            return Ok(*id);
        }
        if self.frozen {
            return Err(Error::frozen(entity.name()));
        }
        let id = EntityId(u32::try_from(self.entities.len()).map_err(|_| {
            Error::invalid_config("entity graph exceeds the maximum number of entities")
        })?);
        debug!(signature = entity.signature(), %id, kind = ?entity.kind(), "entity registered");
        self.by_signature.insert(entity.signature().to_string(), id);
        self.entities.push(entity);
        Ok(id)
    }

    /// Looks up an entity by id.
    #[must_use]
    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.entities.get(id.index())
    }

    /// Looks up an entity id by signature.
    #[must_use]
    pub fn find(&self, signature: &str) -> Option<EntityId> {
        self.by_signature.get(signature).copied()
    }

    /// Iterates over all entities in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (EntityId, &Entity)> {
        self.entities
            .iter()
            .enumerate()
            .map(|(i, e)| (EntityId(i as u32), e))
    }

    fn entity(&self, id: EntityId) -> Result<&Entity> {
        self.get(id).ok_or_else(|| Error::unknown_entity(id.to_string()))
    }

    fn entity_mut(&mut self, id: EntityId) -> Result<&mut Entity> {
        if self.frozen {
            let name = self.entity(id)?.name().to_string();
            return Err(Error::frozen(name));
        }
        self.entities
            .get_mut(id.index())
            .ok_or_else(|| Error::unknown_entity(id.to_string()))
    }

    /// Declares that `from` must be emitted after `to`. Also adds the
    /// reference edge.
    ///
    /// # Errors
    /// Returns `DependencyCycle` if `to` already depends on `from`,
    /// `UnknownEntity` for a dangling id and `Frozen` if the graph is frozen.
    pub fn add_dependency(&mut self, from: EntityId, to: EntityId) -> Result<()> {
        self.entity(to)?;
        if let Some(path) = self.dependency_path(to, from) {
            let mut cycle = vec![self.entity(from)?.name().to_string()];
            for id in path {
                cycle.push(self.entity(id)?.name().to_string());
            }
            return Err(Error::dependency_cycle(self.entity(from)?.name(), cycle));
        }
        let entity = self.entity_mut(from)?;
        entity.dependencies.insert(to);
        entity.references.insert(to);
        Ok(())
    }

    /// Declares that `to` must be part of any output that contains `from`,
    /// without constraining their relative order.
    ///
    /// # Errors
    /// Returns `UnknownEntity` for a dangling id and `Frozen` if the graph is frozen.
    pub fn add_reference(&mut self, from: EntityId, to: EntityId) -> Result<()> {
        self.entity(to)?;
        self.entity_mut(from)?.references.insert(to);
        Ok(())
    }

    /// Path of dependency edges from `start` to `goal`, both included.
    fn dependency_path(&self, start: EntityId, goal: EntityId) -> Option<Vec<EntityId>> {
        let mut visited = BTreeSet::new();
        let mut stack = vec![(start, vec![start])];
        while let Some((id, path)) = stack.pop() {
            if id == goal {
                return Some(path);
            }
            if !visited.insert(id) {
                continue;
            }
            if let Some(entity) = self.get(id) {
                for next in entity.dependencies() {
                    let mut extended = path.clone();
                    extended.push(next);
                    stack.push((next, extended));
                }
            }
        }
        None
    }

    /// The entity and everything reachable from it by reference edges.
    #[must_use]
    pub fn total_references(&self, id: EntityId) -> BTreeSet<EntityId> {
        self.closure(id, Entity::references)
    }

    /// The entity and everything reachable from it by dependency edges.
    #[must_use]
    pub fn total_dependencies(&self, id: EntityId) -> BTreeSet<EntityId> {
        self.closure(id, Entity::dependencies)
    }

    fn closure<'a, I>(&'a self, id: EntityId, edges: impl Fn(&'a Entity) -> I) -> BTreeSet<EntityId>
    where
        I: Iterator<Item = EntityId> + 'a,
    {
        let mut set = BTreeSet::new();
        let mut stack = vec![id];
        while let Some(next) = stack.pop() {
            if !set.insert(next) {
                continue;
            }
            if let Some(entity) = self.get(next) {
                stack.extend(edges(entity));
            }
        }
        set
    }
}
