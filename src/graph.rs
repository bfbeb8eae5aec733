use std::collections::HashMap;
use std::fmt::{Display, Formatter};

use petgraph::graphmap::UnGraphMap;
use serde::{Deserialize, Serialize};
use unordered_pair::UnorderedPair;

use crate::tag::Capability;

/// Identifier of a [`ConstraintGraph`], unique among the graphs of one call.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GraphId(pub String);

/// Identifier of a [`Slot`], unique within its graph.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SlotId(pub String);

impl Display for GraphId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Display for SlotId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for GraphId {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl From<&str> for SlotId {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl From<String> for GraphId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<String> for SlotId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// A place a single character can occupy.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Slot {
    /// Unique within the owning graph.
    pub id: SlotId,
    /// Only characters with this capability active may sit here.
    pub required: Capability,
}

// slots live in a vec; the graph itself only stores their positions, since GraphMap nodes must be Copy
pub(crate) type SlotIndex = usize;

/// A "puzzle": slots plus the undirected adjacency between them.
///
/// Two occupied adjacent slots generate synergy; see [`edge_score`](crate::scoring::edge_score).
/// Graphs should be built with a [`GraphBuilder`](crate::builder::GraphBuilder), which guarantees every edge refers to a slot of this graph.
#[derive(Clone, Debug)]
pub struct ConstraintGraph {
    pub(crate) id: GraphId,
    pub(crate) slots: Vec<Slot>,
    pub(crate) slot_indices: HashMap<SlotId, SlotIndex>,
    pub(crate) adjacency: UnGraphMap<SlotIndex, ()>,
}

impl ConstraintGraph {
    /// The id of this graph.
    pub fn id(&self) -> &GraphId {
        &self.id
    }

    /// Slots in declaration order.
    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    /// Look up a slot by id.
    pub fn slot(&self, id: &SlotId) -> Option<&Slot> {
        self.slot_index(id).map(|index| &self.slots[index])
    }

    #[inline]
    pub(crate) fn slot_index(&self, id: &SlotId) -> Option<SlotIndex> {
        self.slot_indices.get(id).copied()
    }

    /// Number of edges incident to `id`, or [`None`] if there is no such slot.
    pub fn degree(&self, id: &SlotId) -> Option<usize> {
        self.slot_index(id).map(|index| self.adjacency.neighbors(index).count())
    }

    /// Slots adjacent to `id`. Empty if there is no such slot.
    pub fn neighbors<'a>(&'a self, id: &SlotId) -> impl Iterator<Item=&'a Slot> + 'a {
        self.slot_index(id)
            .into_iter()
            .flat_map(|index| self.adjacency.neighbors(index))
            .map(|index| &self.slots[index])
    }

    /// Every edge once, in insertion order.
    pub fn edges(&self) -> impl Iterator<Item=UnorderedPair<&Slot>> {
        self.index_edges()
            .map(|UnorderedPair(a, b)| UnorderedPair(&self.slots[a], &self.slots[b]))
    }

    pub(crate) fn index_edges(&self) -> impl Iterator<Item=UnorderedPair<SlotIndex>> + '_ {
        self.adjacency.all_edges().map(|(a, b, _)| UnorderedPair(a, b))
    }

    /// Number of edges.
    pub fn edge_count(&self) -> usize {
        self.adjacency.edge_count()
    }
}
