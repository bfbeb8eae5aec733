use std::collections::HashMap;

use itertools::Itertools;

use crate::assignment::{Assignment, SlotKey};
use crate::character::{Character, Roster};
use crate::graph::ConstraintGraph;
use crate::scoring::{edge_score, Score, Scoring};
use crate::tag::Capability;

// index into the flattened slot list of a working solution
pub(crate) type FlatIndex = usize;
// index into the roster
pub(crate) type CharacterIndex = usize;

#[derive(Clone, Debug)]
pub(crate) struct FlatSlot {
    pub(crate) key: SlotKey,
    pub(crate) required: Capability,
    pub(crate) neighbors: Vec<FlatIndex>,
}

/// Every slot of every graph laid out in one vec, with occupants referring into the roster.
///
/// Slots appear graph by graph, each graph in declaration order, and edges likewise;
/// the search relies on this order being the caller's order.
#[derive(Clone, Debug)]
pub(crate) struct WorkingSolution<'r> {
    roster: &'r Roster,
    scoring: Scoring,
    slots: Vec<FlatSlot>,
    positions: HashMap<SlotKey, FlatIndex>,
    edges: Vec<(FlatIndex, FlatIndex)>,
    occupants: Vec<Option<CharacterIndex>>,
}

impl<'r> WorkingSolution<'r> {
    pub(crate) fn new(graphs: &[ConstraintGraph], roster: &'r Roster, scoring: Scoring) -> Self {
        let total_slots = graphs.iter().map(|graph| graph.slots.len()).sum();
        let mut slots = Vec::with_capacity(total_slots);
        let mut edges = Vec::with_capacity(graphs.iter().map(ConstraintGraph::edge_count).sum());

        for graph in graphs {
            let base = slots.len();
            slots.extend(graph.slots.iter().enumerate().map(|(index, slot)| FlatSlot {
                key: SlotKey { graph: graph.id.clone(), slot: slot.id.clone() },
                required: slot.required,
                neighbors: graph.adjacency.neighbors(index).map(|neighbor| base + neighbor).collect_vec(),
            }));
            edges.extend(graph.index_edges().map(|pair| (base + pair.0, base + pair.1)));
        }

        let positions = slots.iter()
            .enumerate()
            .map(|(index, slot)| (slot.key.clone(), index))
            .collect();

        Self {
            roster,
            scoring,
            occupants: vec![None; slots.len()],
            slots,
            positions,
            edges,
        }
    }

    /// Full recomputation over every edge; nothing is cached between calls.
    pub(crate) fn score(&self) -> Score {
        let synergy: Score = self.edges.iter()
            .filter_map(|(a, b)| Some(edge_score(self.occupant_character(*a)?, self.occupant_character(*b)?)))
            .sum();
        self.scoring.combine(synergy, self.placed_count())
    }

    #[inline]
    pub(crate) fn slot(&self, index: FlatIndex) -> &FlatSlot {
        &self.slots[index]
    }

    pub(crate) fn slot_count(&self) -> usize {
        self.slots.len()
    }

    pub(crate) fn position(&self, key: &SlotKey) -> Option<FlatIndex> {
        self.positions.get(key).copied()
    }

    #[inline]
    pub(crate) fn character(&self, index: CharacterIndex) -> &'r Character {
        self.roster.at(index)
    }

    #[inline]
    pub(crate) fn occupant(&self, slot: FlatIndex) -> Option<CharacterIndex> {
        self.occupants[slot]
    }

    #[inline]
    pub(crate) fn occupant_character(&self, slot: FlatIndex) -> Option<&'r Character> {
        self.occupants[slot].map(|index| self.roster.at(index))
    }

    /// Overwrite the occupant of `slot`, returning the previous one. Exclusivity is the caller's business.
    #[inline]
    pub(crate) fn set_occupant(&mut self, slot: FlatIndex, occupant: Option<CharacterIndex>) -> Option<CharacterIndex> {
        std::mem::replace(&mut self.occupants[slot], occupant)
    }

    pub(crate) fn swap_occupants(&mut self, a: FlatIndex, b: FlatIndex) {
        self.occupants.swap(a, b);
    }

    pub(crate) fn placed_count(&self) -> usize {
        self.occupants.iter().flatten().count()
    }

    /// Occupied slots only, as an [`Assignment`].
    pub(crate) fn to_assignment(&self) -> Assignment {
        self.occupants.iter()
            .enumerate()
            .filter_map(|(slot, occupant)| occupant.map(|index| (self.slots[slot].key.clone(), self.roster.at(index).id)))
            .collect()
    }
}
