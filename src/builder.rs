use std::collections::HashMap;

use itertools::Itertools;
use petgraph::graphmap::UnGraphMap;
use thiserror::Error;
use unordered_pair::UnorderedPair;

use crate::graph::{ConstraintGraph, GraphId, Slot, SlotId, SlotIndex};
use crate::tag::Capability;

/// Reasons a builder may become invalid while building.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum BuilderInvalidReason {
    /// A slot id was added twice to the same graph.
    #[error("slot `{0}` declared more than once")]
    DuplicateSlot(SlotId),
    /// An edge names a slot that was not added (yet) to this graph.
    #[error("edge refers to unknown slot `{0}`")]
    UnknownSlot(SlotId),
    /// An edge connects a slot to itself.
    #[error("slot `{0}` connected to itself")]
    SelfLoop(SlotId),
}

/// A builder for [`ConstraintGraph`]s.
///
/// Slots must be added before the edges that mention them.
/// Builders mutate themselves while building but can be [`Clone`]d to save their state at some point.
#[derive(Clone, Debug)]
pub struct GraphBuilder {
    id: GraphId,
    slots: Vec<Slot>,
    slot_indices: HashMap<SlotId, SlotIndex>,
    // insertion order is kept so edge iteration (and with it, scoring order) is reproducible
    edges: Vec<UnorderedPair<SlotIndex>>,
    invalid_reasons: Vec<BuilderInvalidReason>,
}

impl GraphBuilder {
    /// Start an empty graph with the given id.
    pub fn new(id: impl Into<GraphId>) -> Self {
        Self {
            id: id.into(),
            slots: Default::default(),
            slot_indices: Default::default(),
            edges: Default::default(),
            invalid_reasons: Default::default(),
        }
    }

    /// Add a slot requiring `required`.
    ///
    /// May cause the builder to enter a [`DuplicateSlot`](BuilderInvalidReason::DuplicateSlot) invalid state if `id` is already present.
    /// If the builder is already in an invalid state, this function does nothing.
    pub fn add_slot(&mut self, id: impl Into<SlotId>, required: Capability) -> &mut Self {
        if !self.invalid_reasons.is_empty() {
            return self;
        }

        let id = id.into();
        if self.slot_indices.contains_key(&id) {
            self.invalid_reasons.push(BuilderInvalidReason::DuplicateSlot(id));
            return self;
        }

        self.slot_indices.insert(id.clone(), self.slots.len());
        self.slots.push(Slot { id, required });
        self
    }

    /// Remove the most recently added slot along with every edge touching it.
    ///
    /// If the builder is in an invalid state or no slots are present, this function does nothing.
    pub fn pop_slot(&mut self) -> &mut Self {
        if !self.invalid_reasons.is_empty() {
            return self;
        }

        if let Some(slot) = self.slots.pop() {
            let index = self.slots.len();
            self.slot_indices.remove(&slot.id);
            self.edges.retain(|UnorderedPair(a, b)| *a != index && *b != index);
        }

        self
    }

    /// Connect the two slots named by `ends`. Connecting an already connected pair does nothing.
    ///
    /// May cause the builder to enter an [`UnknownSlot`](BuilderInvalidReason::UnknownSlot) or
    /// [`SelfLoop`](BuilderInvalidReason::SelfLoop) invalid state.
    /// If the builder is already in an invalid state, this function does nothing.
    pub fn connect(&mut self, ends: UnorderedPair<SlotId>) -> &mut Self {
        if !self.invalid_reasons.is_empty() {
            return self;
        }

        let UnorderedPair(a, b) = ends;
        if a == b {
            self.invalid_reasons.push(BuilderInvalidReason::SelfLoop(a));
            return self;
        }

        let mut indices = Vec::with_capacity(2);
        for end in [a, b] {
            match self.slot_indices.get(&end) {
                Some(index) => indices.push(*index),
                None => {
                    self.invalid_reasons.push(BuilderInvalidReason::UnknownSlot(end));
                    return self;
                }
            }
        }

        let edge = UnorderedPair(indices[0].min(indices[1]), indices[0].max(indices[1]));
        if !self.edges.contains(&edge) {
            self.edges.push(edge);
        }

        self
    }

    /// Shorthand for multiple calls to [`Self::connect`], with the same conditions.
    ///
    /// Connect `slot` to each of `neighbors`.
    pub fn connect_around(&mut self, slot: impl Into<SlotId>, neighbors: Vec<SlotId>) -> &mut Self {
        let slot = slot.into();
        for neighbor in neighbors {
            self.connect(UnorderedPair(slot.clone(), neighbor));
        }

        self
    }

    /// Check the validity of this builder, ensuring no [`BuilderInvalidReason`] condition has arisen.
    ///
    /// Returns `None` if the builder is valid, `Some(&Vec<BuilderInvalidReason>)` otherwise.
    pub fn is_valid(&self) -> Option<&Vec<BuilderInvalidReason>> {
        if self.invalid_reasons.is_empty() {
            None
        } else {
            Some(&self.invalid_reasons)
        }
    }

    /// Convert the state of this builder into a [`ConstraintGraph`].
    /// If the builder is invalid for any reason, a reference to a [`Vec`] of [`BuilderInvalidReason`] will indicate why.
    pub fn build(&self) -> Result<ConstraintGraph, &Vec<BuilderInvalidReason>> {
        if !self.invalid_reasons.is_empty() {
            return Err(&self.invalid_reasons);
        }

        let mut adjacency = UnGraphMap::with_capacity(self.slots.len(), self.edges.len());
        // isolated slots still need a vertex
        (0..self.slots.len()).for_each(|index| { adjacency.add_node(index); });
        for UnorderedPair(a, b) in self.edges.iter() {
            adjacency.add_edge(*a, *b, ());
        }

        Ok(ConstraintGraph {
            id: self.id.clone(),
            slots: self.slots.clone(),
            slot_indices: self.slot_indices.clone(),
            adjacency,
        })
    }

    /// Ids of the slots added so far, in order.
    pub fn slot_ids(&self) -> Vec<&SlotId> {
        self.slots.iter().map(|slot| &slot.id).collect_vec()
    }
}
