//! Full-game rules integration tests.

use fireworks_ai::agent::{Agent, PlaySafeAgent, RandomAgent};
use fireworks_ai::core::{Card, Colour, PlayerId};
use fireworks_ai::rules::{
    GameEvent, GameState, Move, RulesError, hand_size_for, MAX_INFORMATION, MAX_LIVES, MAX_SCORE,
};

/// Find a seeded deal where the first player holds a card matching `pred`.
fn deal_with_card(player_count: usize, pred: impl Fn(Card) -> bool) -> (GameState, usize) {
    (0..100)
        .find_map(|seed| {
            let state = GameState::new(player_count, seed);
            let slot = state
                .hand(PlayerId::new(0))
                .visible_cards()
                .find(|&(_, card)| pred(card))
                .map(|(slot, _)| slot)?;
            Some((state, slot))
        })
        .expect("some seed deals a matching card")
}

// =============================================================================
// Setup Tests
// =============================================================================

#[test]
fn test_new_game_deals_correct_hands() {
    for player_count in 2..=5 {
        let state = GameState::new(player_count, 42);
        let hand_size = hand_size_for(player_count);

        assert_eq!(state.player_count(), player_count);
        for player in state.player_ids() {
            let hand = state.hand(player);
            assert_eq!(hand.size(), hand_size);
            assert_eq!(hand.occupied_slots().count(), hand_size);
        }

        assert_eq!(state.deck().len(), 50 - player_count * hand_size);
        assert_eq!(state.information(), MAX_INFORMATION);
        assert_eq!(state.lives(), MAX_LIVES);
        assert_eq!(state.score(), 0);
        assert_eq!(state.turn(), 0);
        assert_eq!(state.active_player(), PlayerId::new(0));
        assert!(!state.is_game_over());
    }
}

#[test]
fn test_deal_is_seeded() {
    assert_eq!(GameState::new(4, 7), GameState::new(4, 7));
    assert_ne!(GameState::new(4, 7), GameState::new(4, 8));
}

#[test]
fn test_state_serialization_round_trip() {
    let state = GameState::new(3, 99);
    let json = serde_json::to_string(&state).unwrap();
    let deserialized: GameState = serde_json::from_str(&json).unwrap();
    assert_eq!(state, deserialized);
}

// =============================================================================
// Legal Move Tests
// =============================================================================

#[test]
fn test_fresh_game_legal_moves() {
    let state = GameState::new(3, 5);
    let player = state.active_player();
    let legal = state.legal_moves(player);

    let plays = legal
        .iter()
        .filter(|m| matches!(m, Move::Play { .. }))
        .count();
    let discards = legal
        .iter()
        .filter(|m| matches!(m, Move::Discard { .. }))
        .count();

    assert_eq!(plays, 5, "every occupied slot can be played");
    assert_eq!(discards, 0, "discarding at full information is illegal");
    assert!(legal.iter().any(|m| m.is_hint()));

    // Hints never target the performer.
    for mv in &legal {
        match *mv {
            Move::HintColour { player: target, .. } | Move::HintValue { player: target, .. } => {
                assert_ne!(target, player);
            }
            _ => {}
        }
    }
}

#[test]
fn test_moves_out_of_turn_rejected() {
    let mut state = GameState::new(3, 5);
    let result = state.apply(PlayerId::new(1), Move::Play { slot: 0 });
    assert!(matches!(result, Err(RulesError::NotYourTurn { .. })));
}

// =============================================================================
// Hint Tests
// =============================================================================

#[test]
fn test_colour_hint_marks_matching_slots() {
    let mut state = GameState::new(3, 5);
    let performer = state.active_player();
    let target = performer.next(3);
    let (_, card) = state.hand(target).visible_cards().next().unwrap();

    let events = state
        .apply(
            performer,
            Move::HintColour {
                player: target,
                colour: card.colour,
            },
        )
        .unwrap();

    let hinted_slots = events
        .iter()
        .find_map(|event| match event {
            GameEvent::ColourHinted { slots, .. } => Some(slots.clone()),
            _ => None,
        })
        .expect("a colour hint emits a ColourHinted event");

    for slot in state.hand(target).occupied_slots().collect::<Vec<_>>() {
        let possible = state.hand(target).possible_colours(slot);
        if hinted_slots.contains(&slot) {
            assert_eq!(possible, &[card.colour], "hinted slot pinned to the colour");
        } else {
            assert!(
                !possible.contains(&card.colour),
                "unhinted slot excludes the colour"
            );
        }
    }

    assert_eq!(state.information(), MAX_INFORMATION - 1);
}

#[test]
fn test_self_hint_rejected() {
    let mut state = GameState::new(3, 5);
    let player = state.active_player();
    let result = state.apply(
        player,
        Move::HintColour {
            player,
            colour: Colour::Red,
        },
    );
    assert!(matches!(result, Err(RulesError::SelfHint { .. })));
}

#[test]
fn test_hint_matching_nothing_rejected() {
    // Find a deal where some value is absent from the target's hand.
    let target = PlayerId::new(1);
    let (mut state, value) = (0..100)
        .find_map(|seed| {
            let state = GameState::new(3, seed);
            let value = (1..=5).find(|&v| !state.hand(target).has_value(v))?;
            Some((state, value))
        })
        .expect("some seed leaves a value out of the hand");

    let performer = state.active_player();
    let result = state.apply(performer, Move::HintValue { player: target, value });
    assert!(matches!(result, Err(RulesError::EmptyHint { .. })));
}

#[test]
fn test_hints_consume_information_until_exhausted() {
    let mut state = GameState::new(2, 3);

    for _ in 0..MAX_INFORMATION {
        let performer = state.active_player();
        let target = performer.next(2);
        let (_, card) = state.hand(target).visible_cards().next().unwrap();
        state
            .apply(
                performer,
                Move::HintValue {
                    player: target,
                    value: card.value,
                },
            )
            .unwrap();
    }

    assert_eq!(state.information(), 0);

    let performer = state.active_player();
    let target = performer.next(2);
    assert!(
        state.legal_moves(performer).iter().all(|m| !m.is_hint()),
        "no hints are legal without information tokens"
    );

    let (_, card) = state.hand(target).visible_cards().next().unwrap();
    let result = state.apply(
        performer,
        Move::HintValue {
            player: target,
            value: card.value,
        },
    );
    assert!(matches!(result, Err(RulesError::NoInformation)));
}

// =============================================================================
// Play and Discard Tests
// =============================================================================

#[test]
fn test_successful_play_scores() {
    let (mut state, slot) = deal_with_card(2, |card| card.value == 1);
    let player = state.active_player();
    let card = state.hand(player).card(slot).unwrap();

    let events = state.apply(player, Move::Play { slot }).unwrap();

    assert!(matches!(
        events[0],
        GameEvent::CardPlayed {
            successful: true,
            ..
        }
    ));
    assert_eq!(state.score(), 1);
    assert_eq!(state.table_value(card.colour), 1);
    assert_eq!(state.lives(), MAX_LIVES);
    assert_eq!(
        state.hand(player).occupied_slots().count(),
        5,
        "the played slot refills from the deck"
    );
}

#[test]
fn test_misplay_burns_a_life() {
    let (mut state, slot) = deal_with_card(2, |card| card.value != 1);
    let player = state.active_player();

    let events = state.apply(player, Move::Play { slot }).unwrap();

    assert!(matches!(
        events[0],
        GameEvent::CardPlayed {
            successful: false,
            ..
        }
    ));
    assert_eq!(state.lives(), MAX_LIVES - 1);
    assert_eq!(state.score(), 0);
    assert_eq!(state.discard_pile().count(), 1, "the misplay is discarded");
}

#[test]
fn test_discard_at_full_information_rejected() {
    let mut state = GameState::new(2, 3);
    let player = state.active_player();
    let result = state.apply(player, Move::Discard { slot: 0 });
    assert!(matches!(result, Err(RulesError::MaxInformation)));
}

#[test]
fn test_discard_restores_information() {
    let mut state = GameState::new(2, 3);

    // Spend a token so a discard becomes legal.
    let performer = state.active_player();
    let target = performer.next(2);
    let (_, card) = state.hand(target).visible_cards().next().unwrap();
    state
        .apply(
            performer,
            Move::HintValue {
                player: target,
                value: card.value,
            },
        )
        .unwrap();
    assert_eq!(state.information(), MAX_INFORMATION - 1);

    let discarder = state.active_player();
    let events = state.apply(discarder, Move::Discard { slot: 0 }).unwrap();

    assert_eq!(state.information(), MAX_INFORMATION);
    assert!(matches!(events[0], GameEvent::CardDiscarded { .. }));
    assert!(matches!(events[1], GameEvent::CardDrawn { .. }));
}

#[test]
fn test_drawn_card_resets_knowledge() {
    let mut state = GameState::new(2, 3);

    let performer = state.active_player();
    let target = performer.next(2);
    let (slot, card) = state.hand(target).visible_cards().next().unwrap();
    state
        .apply(
            performer,
            Move::HintValue {
                player: target,
                value: card.value,
            },
        )
        .unwrap();
    assert_eq!(state.hand(target).possible_values(slot), &[card.value]);

    state.apply(target, Move::Discard { slot }).unwrap();

    assert_eq!(
        state.hand(target).possible_values(slot).len(),
        5,
        "a fresh card could be any value"
    );
    assert_eq!(state.hand(target).possible_colours(slot).len(), 5);
}

// =============================================================================
// Perspective Tests
// =============================================================================

#[test]
fn test_perspective_conceals_own_cards_only() {
    let state = GameState::new(3, 5);
    let player = PlayerId::new(0);
    let persp = state.perspective(player);

    for slot in 0..persp.hand(player).size() {
        assert!(persp.hand(player).is_occupied(slot));
        assert_eq!(persp.hand(player).card(slot), None, "own cards are hidden");
    }

    for other in state.player_ids().filter(|&p| p != player) {
        for (slot, card) in state.hand(other).visible_cards() {
            assert_eq!(persp.hand(other).card(slot), Some(card));
        }
    }

    // The concealed cards join the unseen pool.
    assert_eq!(persp.deck().len(), state.deck().len() + 5);
    assert_eq!(persp.information(), state.information());
    assert_eq!(persp.lives(), state.lives());
    assert_eq!(persp.score(), state.score());
}

#[test]
fn test_perspective_preserves_hint_knowledge() {
    let mut state = GameState::new(3, 5);

    // First player hints the second, second hints the first.
    let p0 = state.active_player();
    let p1 = p0.next(3);
    let (_, card1) = state.hand(p1).visible_cards().next().unwrap();
    state
        .apply(p0, Move::HintValue { player: p1, value: card1.value })
        .unwrap();

    let (slot0, card0) = state.hand(p0).visible_cards().next().unwrap();
    state
        .apply(p1, Move::HintValue { player: p0, value: card0.value })
        .unwrap();

    let persp = state.perspective(p0);
    assert_eq!(
        persp.hand(p0).possible_values(slot0),
        &[card0.value],
        "own hint knowledge survives concealment"
    );
}

// =============================================================================
// Full Game Tests
// =============================================================================

#[test]
fn test_random_games_end_for_a_valid_reason() {
    for player_count in 2..=5 {
        let mut state = GameState::new(player_count, 11);
        let mut agent = RandomAgent::new(77 + player_count as u64);

        for _ in 0..500 {
            if state.is_game_over() {
                break;
            }
            let active = state.active_player();
            let mv = agent.decide_move(&state, active).unwrap();
            state.apply(active, mv).unwrap();
        }

        assert!(state.is_game_over(), "random play must finish the game");
        assert!(
            state.lives() == 0
                || state.score() == MAX_SCORE
                || (state.deck().is_empty() && state.moves_left() == 0),
            "the game ended without a terminal condition"
        );
        assert!(state.legal_moves(state.active_player()).is_empty());

        let table_total: u8 = Colour::ALL.iter().map(|&c| state.table_value(c)).sum();
        assert_eq!(state.score(), table_total);
    }
}

#[test]
fn test_rule_agent_plays_full_game_from_perspectives() {
    for seed in [3, 11, 29] {
        let mut state = GameState::new(3, seed);
        let mut agent = PlaySafeAgent;

        for _ in 0..500 {
            if state.is_game_over() {
                break;
            }
            let active = state.active_player();

            // The agent only ever sees its own perspective.
            let persp = state.perspective(active);
            let mv = agent.decide_move(&persp, active).unwrap();

            assert!(state.legal_moves(active).contains(&mv));
            state.apply(active, mv).unwrap();
        }

        assert!(state.is_game_over());
        assert!(state.score() <= MAX_SCORE);
    }
}
