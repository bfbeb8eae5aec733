use std::collections::HashSet;

use itertools::Itertools;
use serde::Serialize;
use tracing::{debug, info};

use crate::active::ActiveCapabilities;
use crate::assignment::Assignment;
use crate::character::{Character, Roster};
use crate::config::OptimizerConfig;
use crate::graph::ConstraintGraph;
use crate::scoring::Score;
use crate::search::LocalSearch;
use crate::seeder::GreedySeeder;
use crate::solution::{CharacterIndex, FlatIndex, WorkingSolution};

/// Outcome of one [`Optimizer::run`].
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct OptimizeReport {
    /// The final placements, fixed ones included.
    pub assignment: Assignment,
    /// Score right after greedy seeding.
    pub seed_score: Score,
    /// Score of `assignment`.
    pub score: Score,
    /// Local search rounds performed.
    pub rounds: usize,
    /// Accepted swap moves across all rounds.
    pub swaps: usize,
    /// Accepted exchange moves across all rounds.
    pub exchanges: usize,
}

/// Greedy seeding followed by swap/exchange hill climbing.
///
/// Every call works on private copies of its inputs, so one optimizer may be shared freely.
/// Results are fully determined by the inputs, including the order of `owned`, `graphs` and their slots.
#[derive(Clone, Copy, Debug, Default)]
pub struct Optimizer {
    config: OptimizerConfig,
}

// the pieces of a call that seeding and searching both work from
struct Prepared<'r> {
    solution: WorkingSolution<'r>,
    targets: Vec<FlatIndex>,
    pool: Vec<CharacterIndex>,
}

impl Optimizer {
    /// An optimizer using `config`.
    pub fn new(config: OptimizerConfig) -> Self {
        Self { config }
    }

    /// The configuration in use.
    pub fn config(&self) -> &OptimizerConfig {
        &self.config
    }

    fn prepare<'r>(&self, roster: &'r Roster, graphs: &[ConstraintGraph], fixed: &Assignment) -> Prepared<'r> {
        let mut solution = WorkingSolution::new(graphs, roster, self.config.scoring);

        let mut pinned = HashSet::with_capacity(fixed.len());
        for (key, id) in fixed {
            // fixed entries outside the known slots or roster are echoed but play no part
            if let (Some(slot), Some(index)) = (solution.position(key), roster.index_of(*id)) {
                solution.set_occupant(slot, Some(index));
                pinned.insert(slot);
            }
        }

        let targets = (0..solution.slot_count())
            .filter(|slot| fixed.get(&solution.slot(*slot).key).is_none())
            .collect_vec();
        let pool = roster.characters().iter()
            .enumerate()
            .filter(|(_, character)| !fixed.contains_character(character.id))
            .map(|(index, _)| index)
            .collect_vec();

        debug!(event = "prepared", slots = solution.slot_count(), pinned = pinned.len(), targets = targets.len(), pool = pool.len());

        Prepared { solution, targets, pool }
    }

    // fixed entries go back in verbatim, whatever the working solution made of them
    fn finish(solution: &WorkingSolution, fixed: &Assignment) -> Assignment {
        let mut assignment = solution.to_assignment();
        for (key, id) in fixed {
            assignment.insert_unchecked(key.clone(), *id);
        }
        assignment
    }

    /// Only the greedy seed, without any local search. Useful as a baseline.
    pub fn seed(&self, owned: &[Character], graphs: &[ConstraintGraph], active: &ActiveCapabilities, fixed: &Assignment) -> Assignment {
        if owned.is_empty() {
            return Assignment::new();
        }

        let roster = Roster::new(owned.to_vec());
        let Prepared { mut solution, targets, mut pool } = self.prepare(&roster, graphs, fixed);
        GreedySeeder::new(active).seed(&mut solution, &targets, &mut pool);

        Self::finish(&solution, fixed)
    }

    /// Seed, then hill-climb, reporting what happened along the way.
    pub fn run(&self, owned: &[Character], graphs: &[ConstraintGraph], active: &ActiveCapabilities, fixed: &Assignment) -> OptimizeReport {
        if owned.is_empty() {
            info!(event = "optimize_skipped", reason = "no characters");
            return OptimizeReport::default();
        }

        let roster = Roster::new(owned.to_vec());
        let Prepared { mut solution, targets, mut pool } = self.prepare(&roster, graphs, fixed);

        info!(
            event = "optimize_start",
            characters = roster.len(),
            graphs = graphs.len(),
            slots = solution.slot_count(),
            fixed = fixed.len(),
            round_cap = self.config.round_cap,
        );

        GreedySeeder::new(active).seed(&mut solution, &targets, &mut pool);
        let seed_score = solution.score();
        debug!(event = "seeded", placed = solution.placed_count(), score = seed_score);

        let stats = LocalSearch::new(active, self.config.round_cap).run(&mut solution, &targets, &mut pool);
        let score = solution.score();

        info!(
            event = "optimize_end",
            rounds = stats.rounds,
            swaps = stats.swaps,
            exchanges = stats.exchanges,
            placed = solution.placed_count(),
            seed_score,
            score,
        );

        OptimizeReport {
            assignment: Self::finish(&solution, fixed),
            seed_score,
            score,
            rounds: stats.rounds,
            swaps: stats.swaps,
            exchanges: stats.exchanges,
        }
    }

    /// Seed, then hill-climb; only the resulting assignment.
    pub fn optimize(&self, owned: &[Character], graphs: &[ConstraintGraph], active: &ActiveCapabilities, fixed: &Assignment) -> Assignment {
        self.run(owned, graphs, active, fixed).assignment
    }
}

/// [`Optimizer::optimize`] with the default configuration.
///
/// Returns only occupied slots. Entries of `fixed` are excluded from the search and echoed verbatim.
/// An empty `owned` yields an empty assignment.
pub fn optimize(owned: &[Character], graphs: &[ConstraintGraph], active: &ActiveCapabilities, fixed: &Assignment) -> Assignment {
    Optimizer::default().optimize(owned, graphs, active, fixed)
}
