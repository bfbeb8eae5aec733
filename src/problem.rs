//! JSON problem descriptions and their validation.
//!
//! The optimizer trusts its inputs; this is where caller data is checked first.
//! A problem file looks like:
//!
//! ```json
//! {
//!   "characters": [
//!     { "id": 1, "name": "Elwin", "factions": ["PROTAGONIST", "LEGION_OF_GLORY"], "capabilities": ["INFANTRY"] }
//!   ],
//!   "graphs": [
//!     { "id": "CITY_HALL", "slots": [{ "id": "t1", "required": "INFANTRY" }], "edges": [] }
//!   ],
//!   "active": { "1": ["INFANTRY"] },
//!   "fixed": [{ "graph": "CITY_HALL", "slot": "t1", "character": 1 }]
//! }
//! ```
//!
//! `active` may be omitted, in which case every declared capability is enabled; `fixed` may be omitted as well.

use std::collections::HashSet;

use itertools::Itertools;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use unordered_pair::UnorderedPair;

use crate::active::ActiveCapabilities;
use crate::assignment::{lookup_slot, Assignment, Placement, PlacementError, SlotKey};
use crate::builder::{BuilderInvalidReason, GraphBuilder};
use crate::character::{Character, CharacterId, Roster};
use crate::graph::{ConstraintGraph, GraphId, Slot, SlotId};
use crate::scoring::{ScoreSheet, Scoring};
use crate::solver::{OptimizeReport, Optimizer};

/// Reasons a problem description may be rejected.
#[derive(Debug, Error)]
pub enum LoadError {
    /// Not valid JSON, or not shaped like a problem.
    #[error("malformed problem: {0}")]
    Json(#[from] serde_json::Error),
    /// A graph failed to build.
    #[error("graph `{graph}` is invalid: {}", .reasons.iter().join("; "))]
    InvalidGraph {
        /// The offending graph.
        graph: GraphId,
        /// Everything the builder complained about.
        reasons: Vec<BuilderInvalidReason>,
    },
    /// Two graphs share an id.
    #[error("graph `{0}` declared more than once")]
    DuplicateGraph(GraphId),
    /// Two characters share an id.
    #[error("character {0} declared more than once")]
    DuplicateCharacter(CharacterId),
    /// A fixed entry names a character that is not in the problem.
    #[error("fixed placement refers to unknown character {0}")]
    UnknownFixedCharacter(CharacterId),
    /// A fixed entry pins the same character twice.
    #[error("character {0} is fixed in more than one slot")]
    DuplicateFixedCharacter(CharacterId),
    /// Two fixed entries pin the same slot.
    #[error("slot {0} is fixed more than once")]
    DuplicateFixedSlot(SlotKey),
    /// A fixed entry is not a legal placement.
    #[error("invalid fixed placement: {0}")]
    InvalidFixed(#[from] PlacementError),
}

/// The serialized form of a [`ConstraintGraph`].
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GraphSpec {
    /// Graph id.
    pub id: GraphId,
    /// Slots in order.
    pub slots: Vec<Slot>,
    /// Pairs of slot ids.
    #[serde(default)]
    pub edges: Vec<(SlotId, SlotId)>,
}

impl GraphSpec {
    /// Run this description through a [`GraphBuilder`].
    pub fn build(&self) -> Result<ConstraintGraph, LoadError> {
        let mut builder = GraphBuilder::new(self.id.clone());
        for slot in &self.slots {
            builder.add_slot(slot.id.clone(), slot.required);
        }
        for (a, b) in &self.edges {
            builder.connect(UnorderedPair(a.clone(), b.clone()));
        }

        builder.build().map_err(|reasons| LoadError::InvalidGraph {
            graph: self.id.clone(),
            reasons: reasons.clone(),
        })
    }
}

/// The serialized form of a [`Problem`].
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ProblemSpec {
    /// Owned characters, in pool order.
    pub characters: Vec<Character>,
    /// Graphs, in search order.
    pub graphs: Vec<GraphSpec>,
    /// Enabled capabilities; everything declared when absent.
    #[serde(default)]
    pub active: Option<ActiveCapabilities>,
    /// Pinned placements, kept as a list so repeated slots can be reported.
    #[serde(default)]
    pub fixed: Vec<Placement>,
}

/// A validated, ready to optimize problem.
#[derive(Clone, Debug)]
pub struct Problem {
    /// Owned characters, in pool order.
    pub characters: Vec<Character>,
    /// Built graphs.
    pub graphs: Vec<ConstraintGraph>,
    /// Enabled capabilities.
    pub active: ActiveCapabilities,
    /// Pinned placements.
    pub fixed: Assignment,
}

impl TryFrom<ProblemSpec> for Problem {
    type Error = LoadError;

    fn try_from(spec: ProblemSpec) -> Result<Self, Self::Error> {
        if let Some(id) = spec.characters.iter().map(|character| character.id).duplicates().next() {
            return Err(LoadError::DuplicateCharacter(id));
        }
        if let Some(id) = spec.graphs.iter().map(|graph| &graph.id).duplicates().next() {
            return Err(LoadError::DuplicateGraph(id.clone()));
        }

        let graphs = spec.graphs.iter().map(GraphSpec::build).collect::<Result<Vec<_>, _>>()?;
        let active = spec.active.unwrap_or_else(|| ActiveCapabilities::all_declared(&spec.characters));

        let known: HashSet<CharacterId> = spec.characters.iter().map(|character| character.id).collect();
        let mut pinned = HashSet::with_capacity(spec.fixed.len());
        let mut fixed = Assignment::new();
        for Placement { graph, slot, character } in spec.fixed {
            let key = SlotKey { graph, slot };
            if !known.contains(&character) {
                return Err(LoadError::UnknownFixedCharacter(character));
            }
            if !pinned.insert(character) {
                return Err(LoadError::DuplicateFixedCharacter(character));
            }
            if fixed.get(&key).is_some() {
                return Err(LoadError::DuplicateFixedSlot(key));
            }
            check_fixed(&graphs, &active, &key, character)?;
            fixed.insert_unchecked(key, character);
        }

        Ok(Self {
            characters: spec.characters,
            graphs,
            active,
            fixed,
        })
    }
}

fn check_fixed(graphs: &[ConstraintGraph], active: &ActiveCapabilities, key: &SlotKey, id: CharacterId) -> Result<(), PlacementError> {
    let slot = lookup_slot(graphs, key).ok_or_else(|| PlacementError::UnknownSlot(key.clone()))?;
    if !active.allows(id, slot.required) {
        return Err(PlacementError::Inactive { character: id, required: slot.required });
    }

    Ok(())
}

impl Problem {
    /// Parse and validate a JSON problem.
    pub fn from_json(s: &str) -> Result<Self, LoadError> {
        let spec: ProblemSpec = serde_json::from_str(s)?;
        Self::try_from(spec)
    }

    /// Optimize this problem.
    pub fn solve(&self, optimizer: &Optimizer) -> OptimizeReport {
        optimizer.run(&self.characters, &self.graphs, &self.active, &self.fixed)
    }

    /// Per-graph and total scores of `assignment` against this problem.
    pub fn score_sheet(&self, scoring: &Scoring, assignment: &Assignment) -> ScoreSheet {
        let roster = Roster::new(self.characters.clone());
        ScoreSheet::compute(scoring, &self.graphs, assignment, &roster)
    }
}
