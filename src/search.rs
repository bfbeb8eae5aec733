use std::fmt::Debug;

use tracing::{debug, trace};

use crate::active::ActiveCapabilities;
use crate::scoring::Score;
use crate::solution::{CharacterIndex, FlatIndex, WorkingSolution};

/// A reversible change to a working solution.
///
/// `undo` must restore exactly the state `do_move` started from.
pub(crate) trait Move: Debug {
    fn do_move(&self, solution: &mut WorkingSolution);
    fn undo(&self, solution: &mut WorkingSolution);
}

/// Exchange the occupants of two slots.
#[derive(Clone, Copy, Debug)]
pub(crate) struct SwapMove {
    pub(crate) left: FlatIndex,
    pub(crate) right: FlatIndex,
}

impl Move for SwapMove {
    fn do_move(&self, solution: &mut WorkingSolution) {
        solution.swap_occupants(self.left, self.right);
    }

    fn undo(&self, solution: &mut WorkingSolution) {
        solution.swap_occupants(self.left, self.right);
    }
}

/// Put a pool character into a slot, evicting the current occupant (if any).
#[derive(Clone, Copy, Debug)]
pub(crate) struct ExchangeMove {
    pub(crate) slot: FlatIndex,
    pub(crate) incoming: CharacterIndex,
    pub(crate) outgoing: Option<CharacterIndex>,
}

impl Move for ExchangeMove {
    fn do_move(&self, solution: &mut WorkingSolution) {
        solution.set_occupant(self.slot, Some(self.incoming));
    }

    fn undo(&self, solution: &mut WorkingSolution) {
        solution.set_occupant(self.slot, self.outgoing);
    }
}

/// Apply `m`, rescore from scratch, and keep it only if the score strictly rose.
///
/// `score` must be the score of `solution` on entry and is updated on commit.
pub(crate) fn try_move<M: Move>(solution: &mut WorkingSolution, m: &M, score: &mut Score) -> bool {
    m.do_move(solution);
    let candidate = solution.score();

    if candidate > *score {
        trace!(event = "move_accepted", ?m, from = *score, to = candidate);
        *score = candidate;
        true
    } else {
        m.undo(solution);
        false
    }
}

/// What a local search run did.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) struct SearchStats {
    pub(crate) rounds: usize,
    pub(crate) swaps: usize,
    pub(crate) exchanges: usize,
}

/// First-improvement hill climbing over swap and exchange neighborhoods.
pub(crate) struct LocalSearch<'a> {
    active: &'a ActiveCapabilities,
    round_cap: usize,
}

impl<'a> LocalSearch<'a> {
    pub(crate) fn new(active: &'a ActiveCapabilities, round_cap: usize) -> Self {
        Self { active, round_cap }
    }

    #[inline]
    fn fits(&self, solution: &WorkingSolution, character: CharacterIndex, slot: FlatIndex) -> bool {
        self.active.allows(solution.character(character).id, solution.slot(slot).required)
    }

    /// Improve `solution` in place until a round accepts nothing or the round cap is reached.
    ///
    /// `targets` is the order moves are tried in; `pool` holds everyone not currently placed in a target and is kept in sync.
    pub(crate) fn run(&self, solution: &mut WorkingSolution, targets: &[FlatIndex], pool: &mut Vec<CharacterIndex>) -> SearchStats {
        let mut stats = SearchStats::default();
        let mut score = solution.score();

        while stats.rounds < self.round_cap {
            stats.rounds += 1;

            let swaps = self.swap_pass(solution, targets, &mut score);
            let exchanges = self.exchange_pass(solution, targets, pool, &mut score);
            stats.swaps += swaps;
            stats.exchanges += exchanges;

            debug!(event = "round", round = stats.rounds, swaps, exchanges, score);

            if swaps + exchanges == 0 {
                break;
            }
        }

        stats
    }

    fn swap_pass(&self, solution: &mut WorkingSolution, targets: &[FlatIndex], score: &mut Score) -> usize {
        let mut accepted = 0;

        for (i, left) in targets.iter().enumerate() {
            for right in &targets[i + 1..] {
                // occupants are re-read for every pair; earlier swaps in this pass count
                let (Some(a), Some(b)) = (solution.occupant(*left), solution.occupant(*right)) else {
                    continue;
                };
                if a == b || !self.fits(solution, a, *right) || !self.fits(solution, b, *left) {
                    continue;
                }

                if try_move(solution, &SwapMove { left: *left, right: *right }, score) {
                    accepted += 1;
                }
            }
        }

        accepted
    }

    fn exchange_pass(&self, solution: &mut WorkingSolution, targets: &[FlatIndex], pool: &mut Vec<CharacterIndex>, score: &mut Score) -> usize {
        let mut accepted = 0;

        for slot in targets {
            let outgoing = solution.occupant(*slot);

            for position in 0..pool.len() {
                let incoming = pool[position];
                if !self.fits(solution, incoming, *slot) {
                    continue;
                }

                if try_move(solution, &ExchangeMove { slot: *slot, incoming, outgoing }, score) {
                    // the evicted occupant takes the incoming character's place in the pool
                    match outgoing {
                        Some(evicted) => pool[position] = evicted,
                        None => { pool.remove(position); }
                    }
                    accepted += 1;
                    break;
                }
            }
        }

        accepted
    }
}
