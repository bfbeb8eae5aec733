#![warn(missing_docs)]

//! # `dichromate`
//!
//! An optimizer placing heroes into the slots of several independent puzzles, as posited in contract-style roster games.
//! Describe each puzzle with a [`GraphBuilder`], collect the owned [`Character`]s and which of their capabilities are enabled
//! ([`ActiveCapabilities`]), then call [`optimize()`] to obtain an [`Assignment`].
//!
//! Every slot requires one [`Capability`]; a character may fill it only if that capability is currently enabled for them.
//! A character fills at most one slot across all puzzles.
//! Two adjacent occupied slots score the number of [`Faction`]s their occupants share, up to three;
//! see [`edge_score`](scoring::edge_score).
//!
//! # Internals
//! The problem is a constrained assignment and is attacked with a deterministic local search rather than an exact method.
//! Slots of all puzzles are flattened into one list and characters are referred to by their position in the roster.
//!
//! 1. Pinned placements (the `fixed` argument) are applied and taken out of the search entirely.
//! 2. A greedy pass fills slots by descending degree, choosing the candidate with the most synergy toward already occupied neighbors.
//!    Ties go to the candidate declaring fewer capabilities, so versatile characters stay available for later slots.
//! 3. Rounds of hill climbing follow. Each round tries every swap of two placed characters, then tries moving every
//!    unplaced character into every slot, keeping a move only when the total score strictly rises.
//!    The search stops after a round without improvement or at the round cap.
//!
//! The result is locally optimal with respect to those two neighborhoods, and identical inputs always give identical output.
//!
//! ```
//! use dichromate::{optimize, ActiveCapabilities, Assignment, Capability, Character, Faction, GraphBuilder};
//! use dichromate::scoring::global_score;
//! use unordered_pair::UnorderedPair;
//!
//! let graph = GraphBuilder::new("city_hall")
//!     .add_slot("n1", Capability::Infantry)
//!     .add_slot("n2", Capability::Infantry)
//!     .connect(UnorderedPair("n1".into(), "n2".into()))
//!     .build()
//!     .unwrap();
//!
//! let owned = vec![
//!     Character::new(1, "A", [Faction::Protagonist, Faction::LegionOfGlory], [Capability::Infantry]),
//!     Character::new(2, "B", [Faction::LegionOfGlory, Faction::EmpireHonor], [Capability::Infantry]),
//! ];
//! let active = ActiveCapabilities::all_declared(&owned);
//! let graphs = [graph];
//!
//! let assignment = optimize(&owned, &graphs, &active, &Assignment::new());
//! assert_eq!(assignment.len(), 2);
//! assert_eq!(global_score(&graphs, &assignment, &owned.into_iter().collect()), 1);
//! ```

pub use active::ActiveCapabilities;
pub use assignment::{Assignment, Placement, PlacementError, SlotKey};
pub use builder::{BuilderInvalidReason, GraphBuilder};
pub use character::{Character, CharacterId, Roster};
pub use graph::{ConstraintGraph, GraphId, Slot, SlotId};
pub use solver::{optimize, OptimizeReport, Optimizer};
pub use tag::{Capability, Faction};

pub(crate) mod active;
pub(crate) mod assignment;
pub mod builder;
pub(crate) mod character;
pub mod config;
pub(crate) mod graph;
pub mod problem;
pub mod scoring;
pub(crate) mod search;
pub(crate) mod seeder;
pub(crate) mod solution;
pub(crate) mod solver;
pub(crate) mod tag;
#[cfg(feature = "wasm")]
pub mod wasm;
