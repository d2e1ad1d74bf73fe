//! Random-mutation hill climbing over move-plan chromosomes.

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

use crate::agent::{Agent, DecideError};
use crate::core::{GameRng, PlayerId};
use crate::rules::{GameState, Move};
use crate::sampler::{sample_world, SampleError};

use super::chromosome::Chromosome;
use super::config::RMHCConfig;

/// Statistics collected during a hill climb.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct RMHCStats {
    /// Chromosome evaluations performed, including the initial one.
    pub evaluations: u32,

    /// Mutations that strictly improved the incumbent.
    pub improvements: u32,

    /// Total time spent climbing (microseconds).
    pub time_us: u64,
}

impl RMHCStats {
    /// Reset all statistics to zero.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Hill-climbing search context.
///
/// Keeps a single incumbent chromosome and repeatedly clones, mutates,
/// and evaluates it, accepting strict improvements only. Serves as a
/// cheap alternative to tree search over the same determinization layer.
pub struct RMHCSearch {
    /// Search configuration.
    config: RMHCConfig,

    /// RNG forked once per decision.
    rng: GameRng,

    /// Statistics for the most recent decision.
    stats: RMHCStats,
}

impl RMHCSearch {
    /// Create a new hill-climbing search context.
    pub fn new(config: RMHCConfig) -> Self {
        let rng = GameRng::new(config.seed);

        Self {
            config,
            rng,
            stats: RMHCStats::default(),
        }
    }

    /// Pick a move for `player` from a perspective state.
    ///
    /// Climbs until the generation cap or deadline, then decodes the best
    /// chromosome's first gene against the real legal move list. A root
    /// with a single legal move is returned without any climbing.
    pub fn decide(&mut self, state: &GameState, player: PlayerId) -> Result<Move, DecideError> {
        let start = Instant::now();
        self.stats.reset();

        let legal = state.legal_moves(player);
        if legal.is_empty() {
            return Err(DecideError::NoLegalMoves { player });
        }
        if legal.len() == 1 {
            return Ok(legal[0]);
        }

        let mut rng = self.rng.fork();
        let length = self.config.chromosome_length.max(1);

        let mut best = Chromosome::random(length, &mut rng);
        let mut best_score = self.evaluate(&best, state, player, &mut rng)?;
        self.stats.evaluations = 1;

        let deadline = if self.config.time_limit_ms > 0 {
            Some(start + Duration::from_millis(self.config.time_limit_ms))
        } else {
            None
        };

        let mut generation = 0u32;
        loop {
            let capped = self.config.generations > 0 && generation >= self.config.generations;
            let out_of_time = match deadline {
                Some(deadline) => Instant::now() >= deadline,
                // With no bound at all there is nothing to run down.
                None => self.config.generations == 0,
            };
            if capped || out_of_time {
                break;
            }

            let neighbour = best.mutate(self.config.mutation_rate, &mut rng);
            let score = self.evaluate(&neighbour, state, player, &mut rng)?;
            self.stats.evaluations += 1;

            if score > best_score {
                best = neighbour;
                best_score = score;
                self.stats.improvements += 1;
            }

            generation += 1;
        }

        self.stats.time_us = start.elapsed().as_micros() as u64;

        Ok(legal[usize::from(best.gene(0)) % legal.len()])
    }

    /// Score a chromosome as the mean terminal score over several
    /// independent determinizations of `state`.
    ///
    /// In each replay the deciding player's turns consume genes in order,
    /// each decoded modulo the number of currently-legal moves; other
    /// players play uniform-random legal moves. A replay stops at game
    /// over or gene exhaustion and scores the position as it stands.
    pub fn evaluate(
        &self,
        chromosome: &Chromosome,
        state: &GameState,
        player: PlayerId,
        rng: &mut GameRng,
    ) -> Result<f64, SampleError> {
        let repeats = self.config.eval_repeats.max(1);

        let mut total = 0.0;
        for _ in 0..repeats {
            let mut world = sample_world(state, player, rng)?;
            total += f64::from(self.replay(chromosome, &mut world, player, rng));
        }

        Ok(total / f64::from(repeats))
    }

    /// Play one world out under the chromosome, returning its score.
    fn replay(
        &self,
        chromosome: &Chromosome,
        world: &mut GameState,
        player: PlayerId,
        rng: &mut GameRng,
    ) -> u8 {
        let mut next_gene = 0;

        while !world.is_game_over() {
            let active = world.active_player();
            let legal = world.legal_moves(active);
            if legal.is_empty() {
                break;
            }

            let mv = if active == player {
                if next_gene >= chromosome.len() {
                    break;
                }
                let gene = chromosome.gene(next_gene);
                next_gene += 1;
                legal[usize::from(gene) % legal.len()]
            } else {
                legal[rng.gen_range_usize(0..legal.len())]
            };

            if world.apply(active, mv).is_err() {
                break;
            }
        }

        world.score()
    }

    /// Get statistics for the most recent decision.
    #[must_use]
    pub fn stats(&self) -> &RMHCStats {
        &self.stats
    }

    /// Get the configuration.
    pub fn config(&self) -> &RMHCConfig {
        &self.config
    }
}

impl Agent for RMHCSearch {
    fn decide_move(&mut self, state: &GameState, player: PlayerId) -> Result<Move, DecideError> {
        self.decide(state, player)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Card, Colour};

    fn small_config() -> RMHCConfig {
        RMHCConfig::default()
            .with_generations(40)
            .with_time_limit_ms(0)
    }

    #[test]
    fn test_decide_returns_legal_move() {
        let state = GameState::new(3, 5);
        let player = state.active_player();
        let persp = state.perspective(player);

        let mut search = RMHCSearch::new(small_config());
        let mv = search.decide(&persp, player).unwrap();

        assert!(state.legal_moves(player).contains(&mv));
    }

    #[test]
    fn test_single_legal_move_skips_search() {
        let state = GameState::fixture(&[], &[&[Card::new(Colour::White, 2)], &[]]);
        let player = state.active_player();

        let mut search = RMHCSearch::new(small_config());
        let mv = search.decide(&state, player).unwrap();

        assert_eq!(mv, Move::Play { slot: 0 });
        assert_eq!(search.stats().evaluations, 0);
    }

    #[test]
    fn test_decide_deterministic_with_seed() {
        let state = GameState::new(3, 11);
        let player = state.active_player();
        let persp = state.perspective(player);

        let mut search1 = RMHCSearch::new(small_config().with_seed(7));
        let mut search2 = RMHCSearch::new(small_config().with_seed(7));

        assert_eq!(
            search1.decide(&persp, player).unwrap(),
            search2.decide(&persp, player).unwrap()
        );
    }

    #[test]
    fn test_evaluate_is_deterministic_with_seeded_rng() {
        let state = GameState::new(3, 11);
        let player = state.active_player();
        let persp = state.perspective(player);

        let search = RMHCSearch::new(small_config());
        let mut rng = GameRng::new(23);
        let chromosome = Chromosome::random(30, &mut rng);

        let mut rng1 = GameRng::new(9);
        let mut rng2 = GameRng::new(9);
        let score1 = search.evaluate(&chromosome, &persp, player, &mut rng1).unwrap();
        let score2 = search.evaluate(&chromosome, &persp, player, &mut rng2).unwrap();

        assert_eq!(score1, score2);
        assert!((0.0..=25.0).contains(&score1));
    }

    #[test]
    fn test_generation_cap_bounds_evaluations() {
        let state = GameState::new(3, 11);
        let player = state.active_player();
        let persp = state.perspective(player);

        let mut search = RMHCSearch::new(
            RMHCConfig::default()
                .with_generations(50)
                .with_time_limit_ms(0),
        );
        search.decide(&persp, player).unwrap();

        // The initial chromosome plus one evaluation per generation.
        assert_eq!(search.stats().evaluations, 51);
    }

    #[test]
    fn test_finds_the_winning_play() {
        let mut state = GameState::fixture(
            &[],
            &[
                &[Card::new(Colour::Red, 1), Card::new(Colour::Red, 5)],
                &[Card::new(Colour::Blue, 1), Card::new(Colour::Blue, 5)],
            ],
        );
        let p0 = PlayerId::new(0);
        let p1 = PlayerId::new(1);

        // Two value hints leave one countdown move and pin both of the
        // decider's cards exactly, so every sampled world is the truth.
        state
            .apply(p0, Move::HintValue { player: p1, value: 1 })
            .unwrap();
        state
            .apply(p1, Move::HintValue { player: p0, value: 1 })
            .unwrap();
        assert_eq!(state.moves_left(), 1);

        let persp = state.perspective(p0);
        let mut search = RMHCSearch::new(
            RMHCConfig::default()
                .with_generations(300)
                .with_time_limit_ms(0),
        );

        // The game ends after one more move; chromosomes whose first gene
        // decodes to the red play score 1, everything else scores 0.
        let mv = search.decide(&persp, p0).unwrap();
        assert_eq!(mv, Move::Play { slot: 0 });
    }
}
