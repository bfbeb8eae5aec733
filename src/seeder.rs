use std::cmp::Reverse;

use itertools::Itertools;
use tracing::trace;

use crate::active::ActiveCapabilities;
use crate::scoring::{edge_score, Score};
use crate::solution::{CharacterIndex, FlatIndex, WorkingSolution};

/// One forward pass which fills the most connected slots first.
///
/// For each slot, the candidate with the best synergy toward already occupied neighbors wins.
/// On a tie, the candidate declaring fewer capabilities wins, keeping versatile characters for later;
/// on a full tie, the earlier pool entry wins.
/// Nothing is ever revisited.
pub(crate) struct GreedySeeder<'a> {
    active: &'a ActiveCapabilities,
}

impl<'a> GreedySeeder<'a> {
    pub(crate) fn new(active: &'a ActiveCapabilities) -> Self {
        Self { active }
    }

    /// Fill `targets` from `pool`, removing every placed character from `pool`.
    ///
    /// Targets are visited by descending degree; the sort is stable so equal degrees keep the order given.
    pub(crate) fn seed(&self, solution: &mut WorkingSolution, targets: &[FlatIndex], pool: &mut Vec<CharacterIndex>) {
        let order = targets.iter()
            .copied()
            .sorted_by_key(|slot| Reverse(solution.slot(*slot).neighbors.len()))
            .collect_vec();

        for slot in order {
            let Some(position) = self.pick(solution, slot, pool) else {
                trace!(event = "seed_skip", slot = %solution.slot(slot).key);
                continue;
            };

            let chosen = pool.remove(position);
            trace!(event = "seed_place", slot = %solution.slot(slot).key, character = solution.character(chosen).id);
            solution.set_occupant(slot, Some(chosen));
        }
    }

    // position in `pool` of the best candidate for `slot`, if anyone can fill it
    fn pick(&self, solution: &WorkingSolution, slot: FlatIndex, pool: &[CharacterIndex]) -> Option<usize> {
        let required = solution.slot(slot).required;
        let mut best: Option<(usize, Score, usize)> = None;

        for (position, index) in pool.iter().enumerate() {
            let candidate = solution.character(*index);
            if !self.active.allows(candidate.id, required) {
                continue;
            }

            let gain: Score = solution.slot(slot).neighbors.iter()
                .filter_map(|neighbor| solution.occupant_character(*neighbor))
                .map(|neighbor| edge_score(candidate, neighbor))
                .sum();
            let breadth = candidate.capabilities.len();

            let better = match best {
                None => true,
                Some((_, best_gain, best_breadth)) => gain > best_gain || (gain == best_gain && breadth < best_breadth),
            };
            if better {
                best = Some((position, gain, breadth));
            }
        }

        best.map(|(position, _, _)| position)
    }
}
