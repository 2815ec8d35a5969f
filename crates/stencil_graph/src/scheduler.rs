//! Emission scheduling.
//!
//! The scheduler orders every entity reachable from a module's roots so that
//! dependencies come first, then distributes the definitions over output
//! partitions, always filling the currently smallest one.

use std::collections::{BTreeSet, HashMap};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use stencil_foundation::{Error, PartitionPolicy, Result};
use tracing::debug;

use crate::entity::{Entity, EntityId};
use crate::graph::EntityGraph;

/// One output partition and the definitions assigned to it.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Partition {
    /// 1-based partition index.
    pub index: usize,
    /// Entities whose definitions land here, in emission order.
    pub entities: Vec<EntityId>,
    /// Sum of the size estimates of the assigned entities.
    pub size: usize,
}

/// Result of scheduling a graph.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Schedule {
    order: Vec<EntityId>,
    positions: HashMap<EntityId, usize>,
    partitions: Vec<Partition>,
}

impl Schedule {
    /// Every live entity, dependencies first.
    #[must_use]
    pub fn order(&self) -> &[EntityId] {
        &self.order
    }

    /// Position of an entity: one past the highest position among its
    /// dependencies, starting from 1.
    #[must_use]
    pub fn position(&self, id: EntityId) -> Option<usize> {
        self.positions.get(&id).copied()
    }

    /// Output partitions.
    #[must_use]
    pub fn partitions(&self) -> &[Partition] {
        &self.partitions
    }

    /// Partition holding the definition of an entity.
    #[must_use]
    pub fn partition_of(&self, id: EntityId) -> Option<usize> {
        self.partitions
            .iter()
            .find(|p| p.entities.contains(&id))
            .map(|p| p.index)
    }

    /// Sorts a set of entities into emission order.
    #[must_use]
    pub fn sorted(&self, ids: &BTreeSet<EntityId>) -> Vec<EntityId> {
        self.order.iter().copied().filter(|id| ids.contains(id)).collect()
    }
}

/// Orders and partitions entities.
#[derive(Clone, Copy, Debug, Default)]
pub struct Scheduler {
    policy: PartitionPolicy,
}

impl Scheduler {
    /// Creates a scheduler with the given partition policy.
    #[must_use]
    pub fn new(policy: PartitionPolicy) -> Self {
        Self { policy }
    }

    /// Schedules everything reachable from `roots` by reference edges.
    ///
    /// `sizer` estimates the byte size an entity contributes to the partition
    /// that defines it.
    ///
    /// # Errors
    /// Returns `DependencyCycle` if the dependency relation is cyclic and
    /// `UnknownEntity` if a root is not in the graph.
    #[tracing::instrument(level = "debug", skip_all, fields(roots = roots.len()))]
    pub fn schedule(
        &self,
        graph: &EntityGraph,
        roots: &[EntityId],
        sizer: impl Fn(&Entity) -> usize,
    ) -> Result<Schedule> {
        let mut live = BTreeSet::new();
        for root in roots {
            if graph.get(*root).is_none() {
                return Err(Error::unknown_entity(root.to_string()));
            }
            live.extend(graph.total_references(*root));
        }

        let mut positions = HashMap::new();
        for id in &live {
            position(graph, *id, &mut positions, &mut Vec::new())?;
        }

        let mut order: Vec<EntityId> = live.iter().copied().collect();
        order.sort_by_key(|id| (positions[id], *id));

        let sizes: Vec<usize> = order
            .iter()
            .map(|id| graph.get(*id).map_or(0, &sizer))
            .collect();
        let total: usize = sizes.iter().sum();
        let count = self.policy.partition_count(total);

        let mut partitions: Vec<Partition> = (1..=count)
            .map(|index| Partition {
                index,
                entities: Vec::new(),
                size: 0,
            })
            .collect();
        for (id, size) in order.iter().zip(&sizes) {
            // min_by_key keeps the first minimum, so ties go to the lowest index
            if let Some(smallest) = partitions.iter_mut().min_by_key(|p| p.size) {
                smallest.entities.push(*id);
                smallest.size += size;
            }
        }

        debug!(
            entities = order.len(),
            partitions = partitions.len(),
            total_size = total,
            sizes = ?partitions.iter().map(|p| p.size).collect::<Vec<_>>(),
            "schedule computed"
        );

        Ok(Schedule {
            order,
            positions,
            partitions,
        })
    }
}

/// Memoized position computation with an explicit stack for cycle reporting.
fn position(
    graph: &EntityGraph,
    id: EntityId,
    memo: &mut HashMap<EntityId, usize>,
    stack: &mut Vec<EntityId>,
) -> Result<usize> {
    if let Some(p) = memo.get(&id) {
        return Ok(*p);
    }
    let name = |id: EntityId| graph.get(id).map_or_else(|| id.to_string(), |e| e.name().to_string());
    if let Some(start) = stack.iter().position(|s| *s == id) {
        let mut cycle: Vec<String> = stack[start..].iter().map(|s| name(*s)).collect();
        cycle.push(name(id));
        return Err(Error::dependency_cycle(name(id), cycle));
    }
    let entity = graph
        .get(id)
        .ok_or_else(|| Error::unknown_entity(id.to_string()))?;
    stack.push(id);
    let mut highest = 0;
    for dep in entity.dependencies() {
        highest = highest.max(position(graph, dep, memo, stack)?);
    }
    stack.pop();
    memo.insert(id, highest + 1);
    Ok(highest + 1)
}
