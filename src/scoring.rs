use serde::{Deserialize, Serialize};
use strum::VariantArray;

use crate::assignment::{Assignment, SlotKey};
use crate::character::{Character, Roster};
use crate::graph::{ConstraintGraph, GraphId, SlotId};
use crate::tag::Faction;

/// Synergy points.
pub type Score = u32;

/// Faction overlap beyond this is not rewarded further.
pub const MAX_EDGE_SCORE: Score = 3;

const FACTION_COUNT: usize = <Faction as VariantArray>::VARIANTS.len();

#[inline]
fn tally(factions: &[Faction]) -> [u8; FACTION_COUNT] {
    let mut counts = [0u8; FACTION_COUNT];
    for faction in factions {
        counts[*faction as usize] = counts[*faction as usize].saturating_add(1);
    }
    counts
}

/// Synergy between two adjacent characters: the number of factions they share, at most [`MAX_EDGE_SCORE`].
///
/// Factions are multisets, so a faction listed twice on both sides counts twice.
pub fn edge_score(a: &Character, b: &Character) -> Score {
    let (a, b) = (tally(&a.factions), tally(&b.factions));
    let shared: Score = a.iter().zip(b.iter())
        .map(|(x, y)| Score::from(*x.min(y)))
        .sum();

    shared.min(MAX_EDGE_SCORE)
}

/// The reward model.
///
/// The default rewards only realized synergy between adjacent occupied slots.
/// A non-zero `occupancy_bonus` additionally pays a flat amount for every occupied slot.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct Scoring {
    /// Points per occupied slot.
    #[serde(default)]
    pub occupancy_bonus: Score,
}

impl Scoring {
    /// Score one graph given who occupies each of its slots.
    ///
    /// Edges with an empty endpoint contribute nothing.
    pub fn graph_score<'c>(&self, graph: &ConstraintGraph, occupant: impl Fn(&SlotId) -> Option<&'c Character>) -> Score {
        let occupants = graph.slots.iter().map(|slot| occupant(&slot.id)).collect::<Vec<_>>();

        let synergy: Score = graph.index_edges()
            .filter_map(|pair| Some(edge_score(occupants[pair.0]?, occupants[pair.1]?)))
            .sum();
        let occupied = occupants.iter().flatten().count();

        self.combine(synergy, occupied)
    }

    /// Synergy plus the bonus for `occupied` slots.
    ///
    /// Saturates at [`Score::MAX`], since any configured bonus is accepted.
    pub(crate) fn combine(&self, synergy: Score, occupied: usize) -> Score {
        let occupied = Score::try_from(occupied).unwrap_or(Score::MAX);
        synergy.saturating_add(self.occupancy_bonus.saturating_mul(occupied))
    }

    /// Sum of [`Self::graph_score`] over all `graphs`.
    ///
    /// Characters missing from `roster` are treated as absent.
    pub fn global_score(&self, graphs: &[ConstraintGraph], assignment: &Assignment, roster: &Roster) -> Score {
        graphs.iter()
            .map(|graph| self.graph_score(graph, |slot| {
                // keys are rebuilt per lookup; the search scores through WorkingSolution instead
                assignment.get(&SlotKey { graph: graph.id.clone(), slot: slot.clone() })
                    .and_then(|id| roster.get(id))
            }))
            .fold(0, Score::saturating_add)
    }
}

/// [`Scoring::graph_score`] under the default, synergy-only model.
pub fn graph_score<'c>(graph: &ConstraintGraph, occupant: impl Fn(&SlotId) -> Option<&'c Character>) -> Score {
    Scoring::default().graph_score(graph, occupant)
}

/// [`Scoring::global_score`] under the default, synergy-only model.
pub fn global_score(graphs: &[ConstraintGraph], assignment: &Assignment, roster: &Roster) -> Score {
    Scoring::default().global_score(graphs, assignment, roster)
}

/// Score of one graph, as shown next to it.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct GraphScore {
    /// Which graph.
    pub graph: GraphId,
    /// Its score.
    pub score: Score,
    /// How many of its slots are occupied.
    pub occupied: usize,
    /// How many slots it has.
    pub slots: usize,
}

/// Scores of every graph plus their total.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct ScoreSheet {
    /// One entry per graph, in graph order.
    pub graphs: Vec<GraphScore>,
    /// Sum over `graphs`.
    pub total: Score,
}

impl ScoreSheet {
    /// Score `assignment` graph by graph.
    pub fn compute(scoring: &Scoring, graphs: &[ConstraintGraph], assignment: &Assignment, roster: &Roster) -> Self {
        let graphs = graphs.iter()
            .map(|graph| {
                let placements = assignment.for_graph(&graph.id);
                GraphScore {
                    graph: graph.id.clone(),
                    score: scoring.graph_score(graph, |slot| placements.get(slot).and_then(|id| roster.get(*id))),
                    occupied: graph.slots.iter().filter(|slot| placements.contains_key(&slot.id)).count(),
                    slots: graph.slots.len(),
                }
            })
            .collect::<Vec<_>>();
        let total = graphs.iter().map(|graph| graph.score).fold(0, Score::saturating_add);

        Self { graphs, total }
    }
}
