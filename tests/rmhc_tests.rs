//! Hill-climber integration tests: decisions through perspectives and
//! the agent interface.

use fireworks_ai::agent::Agent;
use fireworks_ai::core::{GameRng, PlayerId};
use fireworks_ai::rmhc::{Chromosome, RMHCConfig, RMHCSearch};
use fireworks_ai::rules::{GameState, MAX_SCORE};

fn small_config() -> RMHCConfig {
    RMHCConfig::default()
        .with_generations(40)
        .with_time_limit_ms(0)
        .with_eval_repeats(2)
}

// =============================================================================
// Decision Tests
// =============================================================================

#[test]
fn test_climber_decides_from_every_seat() {
    let mut state = GameState::new(3, 19);

    for _ in 0..3 {
        let player = state.active_player();
        let persp = state.perspective(player);

        let mut search = RMHCSearch::new(small_config());
        let mv = search.decide(&persp, player).unwrap();

        assert!(state.legal_moves(player).contains(&mv));
        state.apply(player, mv).unwrap();
    }
}

#[test]
fn test_decide_is_deterministic_for_a_seed() {
    let persp = GameState::new(4, 3).perspective(PlayerId::new(0));

    let mv_a = RMHCSearch::new(small_config().with_seed(21))
        .decide(&persp, PlayerId::new(0))
        .unwrap();
    let mv_b = RMHCSearch::new(small_config().with_seed(21))
        .decide(&persp, PlayerId::new(0))
        .unwrap();

    assert_eq!(mv_a, mv_b);
}

#[test]
fn test_zero_bounds_fall_back_to_the_initial_chromosome() {
    let persp = GameState::new(3, 9).perspective(PlayerId::new(0));

    // No generation cap and no deadline means no climbing at all: the
    // initial random chromosome is scored once and decides directly.
    let mut search = RMHCSearch::new(
        RMHCConfig::default()
            .with_generations(0)
            .with_time_limit_ms(0),
    );
    let mv = search.decide(&persp, PlayerId::new(0)).unwrap();

    assert!(persp.legal_moves(PlayerId::new(0)).contains(&mv));
    assert_eq!(search.stats().evaluations, 1);
    assert_eq!(search.stats().improvements, 0);
}

#[test]
fn test_time_limited_climb_still_decides() {
    let persp = GameState::new(3, 9).perspective(PlayerId::new(0));

    let mut search = RMHCSearch::new(
        RMHCConfig::default()
            .with_generations(0)
            .with_time_limit_ms(5),
    );
    let mv = search.decide(&persp, PlayerId::new(0)).unwrap();

    assert!(persp.legal_moves(PlayerId::new(0)).contains(&mv));
    assert!(search.stats().evaluations >= 1);
}

// =============================================================================
// Statistics Tests
// =============================================================================

#[test]
fn test_generation_cap_bounds_the_evaluations() {
    let persp = GameState::new(3, 11).perspective(PlayerId::new(0));

    let mut search = RMHCSearch::new(small_config());
    search.decide(&persp, PlayerId::new(0)).unwrap();

    let stats = search.stats();
    // The initial chromosome plus one neighbour per generation.
    assert_eq!(stats.evaluations, 41);
    assert!(stats.improvements < stats.evaluations);
}

#[test]
fn test_evaluate_scores_within_game_bounds() {
    let persp = GameState::new(3, 11).perspective(PlayerId::new(0));
    let search = RMHCSearch::new(small_config());

    let chromosome = Chromosome::random(30, &mut GameRng::new(4));
    let score = search
        .evaluate(&chromosome, &persp, PlayerId::new(0), &mut GameRng::new(8))
        .unwrap();

    assert!(score >= 0.0);
    assert!(score <= f64::from(MAX_SCORE));
}

#[test]
fn test_climber_runs_as_an_agent_in_a_live_game() {
    let mut state = GameState::new(3, 2);
    let mut search = RMHCSearch::new(small_config());

    for _ in 0..6 {
        if state.is_game_over() {
            break;
        }
        let player = state.active_player();
        let persp = state.perspective(player);
        let mv = search.decide_move(&persp, player).unwrap();
        state.apply(player, mv).unwrap();
    }

    assert!(state.turn() == 6 || state.is_game_over());
}
