//! Turn controller flow: opening selection, upkeep, draw, resource step,
//! attack bookkeeping and deck variants

use smallvec::SmallVec;
use spectrum_duel::core::{CardId, CardSpec, PlayerId, Rank, Suit};
use spectrum_duel::game::{
    DrawSource, EffectKind, GameEvent, Intent, Match, MatchConfig, MatchMode, Phase,
    ScenarioSetup, SeatSetup, DEFAULT_HAND_SIZE,
};
use spectrum_duel::DuelError;

const P1: PlayerId = PlayerId::ONE;
const P2: PlayerId = PlayerId::TWO;

fn spec(suit: Suit, rank: Rank) -> CardSpec {
    CardSpec::new(suit, rank)
}

fn opening_picks(game: &Match, player: PlayerId) -> SmallVec<[CardId; 3]> {
    game.player(player).hand.iter().take(3).map(|c| c.id).collect()
}

fn opened(config: MatchConfig) -> Match {
    let mut game = Match::new(config).unwrap();
    for player in PlayerId::both() {
        let picks = opening_picks(&game, player);
        game.apply_in_place(player, Intent::SelectInitialResources(picks))
            .unwrap();
    }
    game
}

fn scenario(setup: ScenarioSetup) -> Match {
    Match::new(MatchConfig::default().with_mode(MatchMode::Scenario(setup))).unwrap()
}

#[test]
fn test_opening_selection_in_either_order() {
    let mut game = Match::new(MatchConfig::default().with_seed(9)).unwrap();
    assert_eq!(game.phase(), Phase::InitSelect);

    // The second seat may pick first
    let picks = opening_picks(&game, P2);
    let events = game
        .apply_in_place(P2, Intent::SelectInitialResources(picks))
        .unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(game.phase(), Phase::InitSelect);

    let again = opening_picks(&game, P2);
    assert!(matches!(
        game.apply(P2, Intent::SelectInitialResources(again)),
        Err(DuelError::InvalidSelection(_))
    ));

    let picks = opening_picks(&game, P1);
    let events = game
        .apply_in_place(P1, Intent::SelectInitialResources(picks))
        .unwrap();
    assert!(events.contains(&GameEvent::TurnStarted {
        player: P1,
        turn_number: 1
    }));
    assert_eq!(game.phase(), Phase::Main);
}

#[test]
fn test_opening_selection_needs_three_cards() {
    let game = Match::new(MatchConfig::default()).unwrap();
    let two: SmallVec<[CardId; 3]> = game.player(P1).hand.iter().take(2).map(|c| c.id).collect();
    assert!(matches!(
        game.apply(P1, Intent::SelectInitialResources(two)),
        Err(DuelError::InvalidSelection(_))
    ));

    let foreign = opening_picks(&game, P2);
    assert!(matches!(
        game.apply(P1, Intent::SelectInitialResources(foreign)),
        Err(DuelError::CardNotInHand(_))
    ));
}

#[test]
fn test_intents_outside_their_phase_are_rejected() {
    let game = opened(MatchConfig::default().with_seed(4));
    assert_eq!(game.phase(), Phase::Main);

    for intent in [
        Intent::BeginResourceAdd,
        Intent::SkipResource,
        Intent::ConfirmAttack,
        Intent::ConfirmBlocks,
    ] {
        assert!(matches!(
            game.apply(P1, intent),
            Err(DuelError::WrongPhase { .. })
        ));
    }
}

#[test]
fn test_turn_counter_moves_on_starting_seat() {
    let mut game = opened(MatchConfig::default().with_seed(12));
    assert_eq!(game.turn.turn_number, 1);

    game.apply_in_place(P1, Intent::EndTurn).unwrap();
    assert_eq!(game.turn.turn_number, 1);
    assert_eq!(game.phase(), Phase::ResourceStart);
    game.apply_in_place(P2, Intent::SkipResource).unwrap();
    game.apply_in_place(P2, Intent::EndTurn).unwrap();

    assert_eq!(game.active_player(), P1);
    assert_eq!(game.turn.turn_number, 2);
    // P1's second turn is no longer the opening turn; the opening turn drew too
    assert_eq!(game.phase(), Phase::ResourceStart);
    assert_eq!(game.player(P1).hand.len(), DEFAULT_HAND_SIZE - 3 + 2);
}

#[test]
fn test_second_seat_may_start() {
    let config = MatchConfig::default()
        .with_seed(21)
        .with_starting_player(P2);
    let mut game = opened(config);
    assert_eq!(game.active_player(), P2);
    assert_eq!(game.phase(), Phase::Main);

    game.apply_in_place(P2, Intent::EndTurn).unwrap();
    assert_eq!(game.active_player(), P1);
    assert_eq!(game.turn.turn_number, 1);
    assert_eq!(game.phase(), Phase::ResourceStart);
}

#[test]
fn test_swap_from_resource_start_keeps_counts() {
    let mut game = opened(MatchConfig::default().with_seed(6));
    game.apply_in_place(P1, Intent::EndTurn).unwrap();

    let hand_before = game.player(P2).hand.len();
    let hand_card = game.player(P2).hand[0].id;
    let resource_unit = game.player(P2).resources.units[1].id();
    let events = game
        .apply_in_place(
            P2,
            Intent::SwapResource {
                hand_card,
                resource_unit,
            },
        )
        .unwrap();

    assert!(events.contains(&GameEvent::ResourceSwapped {
        player: P2,
        into_resources: hand_card,
        into_hand: resource_unit
    }));
    assert_eq!(game.player(P2).hand.len(), hand_before);
    assert_eq!(game.player(P2).resources.len(), 3);
    assert!(game.player(P2).resources.contains(hand_card));
    assert!(game.player(P2).hand_card(resource_unit).is_some());
    assert_eq!(game.phase(), Phase::Main);
}

#[test]
fn test_upkeep_untaps_and_wakes_units() {
    let mut game = scenario(ScenarioSetup {
        seats: [
            SeatSetup {
                hand: vec![spec(Suit::Spades, Rank::Three)],
                resources: vec![spec(Suit::Clubs, Rank::Two); 3],
                ..Default::default()
            },
            SeatSetup::default(),
        ],
        shared_deck: Some(vec![spec(Suit::Hearts, Rank::Two); 6]),
        open_at_upkeep: false,
    });
    let soldier = game.player(P1).hand[0].id;
    game.apply_in_place(P1, Intent::play(soldier)).unwrap();

    assert_eq!(game.player(P1).untapped_resources(), 0);
    assert!(game.legal_attackers(P1).is_empty());
    assert!(matches!(
        game.apply(P1, Intent::DeclareAttackers(vec![soldier])),
        Err(DuelError::IllegalAttacker { .. })
    ));

    game.apply_in_place(P1, Intent::EndTurn).unwrap();
    game.apply_in_place(P2, Intent::SkipResource).unwrap();
    game.apply_in_place(P2, Intent::EndTurn).unwrap();

    assert_eq!(game.player(P1).untapped_resources(), 3);
    assert_eq!(game.legal_attackers(P1), vec![soldier]);
}

#[test]
fn test_one_attack_per_turn() {
    let mut game = scenario(ScenarioSetup {
        seats: [
            SeatSetup {
                field: vec![spec(Suit::Spades, Rank::Four), spec(Suit::Spades, Rank::Six)],
                ..Default::default()
            },
            SeatSetup::default(),
        ],
        shared_deck: Some(vec![spec(Suit::Hearts, Rank::Two); 6]),
        open_at_upkeep: false,
    });
    let four = game.player(P1).field.units[0].id();
    let six = game.player(P1).field.units[1].id();

    // Declaring and cancelling does not use up the attack
    game.apply_in_place(P1, Intent::DeclareAttackers(vec![four, six]))
        .unwrap();
    assert_eq!(game.phase(), Phase::AttackDeclare);
    game.apply_in_place(P1, Intent::CancelAttack).unwrap();
    assert_eq!(game.phase(), Phase::Main);
    assert_eq!(game.legal_attackers(P1).len(), 2);

    game.apply_in_place(P1, Intent::DeclareAttackers(vec![four]))
        .unwrap();
    game.apply_in_place(P1, Intent::ConfirmAttack).unwrap();
    assert_eq!(game.player(P2).life, 16);
    assert!(game.player(P1).has_attacked_this_turn);

    assert!(game.legal_attackers(P1).is_empty());
    assert!(matches!(
        game.apply(P1, Intent::DeclareAttackers(vec![six])),
        Err(DuelError::IllegalAttacker { .. })
    ));
}

#[test]
fn test_duplicate_attacker_rejected() {
    let game = scenario(ScenarioSetup {
        seats: [
            SeatSetup {
                field: vec![spec(Suit::Spades, Rank::Four)],
                ..Default::default()
            },
            SeatSetup::default(),
        ],
        shared_deck: Some(Vec::new()),
        open_at_upkeep: false,
    });
    let four = game.player(P1).field.units[0].id();
    assert!(matches!(
        game.apply(P1, Intent::DeclareAttackers(vec![four, four])),
        Err(DuelError::IllegalAttacker { .. })
    ));
}

#[test]
fn test_jack_draws_what_is_left() {
    let mut game = scenario(ScenarioSetup {
        seats: [
            SeatSetup {
                hand: vec![spec(Suit::Clubs, Rank::Jack)],
                resources: vec![spec(Suit::Clubs, Rank::Two); 2],
                ..Default::default()
            },
            SeatSetup::default(),
        ],
        shared_deck: Some(vec![spec(Suit::Hearts, Rank::Five)]),
        open_at_upkeep: false,
    });
    let jack = game.player(P1).hand[0].id;
    let events = game.apply_in_place(P1, Intent::play(jack)).unwrap();

    assert!(events.iter().any(|e| matches!(
        e,
        GameEvent::EffectResolved {
            effect: EffectKind::DrewCards { drawn: 1 },
            ..
        }
    )));
    assert_eq!(game.player(P1).hand.len(), 1);
    assert_eq!(game.player(P1).draw_failures, 1);
    // Only one seat has run dry
    assert!(game.outcome.is_none());
}

#[test]
fn test_sandbox_never_ends_on_exhaustion() {
    let setup = ScenarioSetup {
        seats: [SeatSetup::default(), SeatSetup::default()],
        shared_deck: Some(Vec::new()),
        open_at_upkeep: false,
    };
    let mut game = scenario(setup.clone());
    game.config.mode = MatchMode::Sandbox;
    for _ in 0..3 {
        game.apply_in_place(P1, Intent::EndTurn).unwrap();
        game.apply_in_place(P2, Intent::SkipResource).unwrap();
        game.apply_in_place(P2, Intent::EndTurn).unwrap();
        game.apply_in_place(P1, Intent::SkipResource).unwrap();
    }
    assert!(game.outcome.is_none());
    assert_eq!(game.player(P1).draw_failures, 3);
    assert_eq!(game.player(P2).draw_failures, 3);

    // The same position in a normal match ends on the second empty draw
    let mut game = scenario(setup);
    game.apply_in_place(P1, Intent::EndTurn).unwrap();
    game.apply_in_place(P2, Intent::SkipResource).unwrap();
    game.apply_in_place(P2, Intent::EndTurn).unwrap();
    assert!(game.is_over());
}

#[test]
fn test_per_player_decks() {
    let game = opened(MatchConfig::default().with_mode(MatchMode::PerPlayerDecks));
    assert_eq!(game.draw_source, DrawSource::PerPlayer);
    assert!(game.deck.is_empty());
    // P1 drew once for its opening turn
    assert_eq!(game.cards_left(P1), 52 - DEFAULT_HAND_SIZE - 1);
    assert_eq!(game.cards_left(P2), 52 - DEFAULT_HAND_SIZE);
}

#[test]
fn test_scenario_opening_at_upkeep() {
    let game = scenario(ScenarioSetup {
        seats: [SeatSetup::default(), SeatSetup::default()],
        shared_deck: Some(vec![spec(Suit::Hearts, Rank::Two); 3]),
        open_at_upkeep: true,
    });
    assert_eq!(game.phase(), Phase::Main);
    assert_eq!(game.player(P1).hand.len(), 1);
    assert_eq!(game.cards_left(P1), 2);
}

#[test]
fn test_invalid_scenarios_rejected() {
    let face_on_field = ScenarioSetup {
        seats: [
            SeatSetup {
                field: vec![spec(Suit::Spades, Rank::King)],
                ..Default::default()
            },
            SeatSetup::default(),
        ],
        shared_deck: None,
        open_at_upkeep: false,
    };
    assert!(matches!(
        Match::new(MatchConfig::default().with_mode(MatchMode::Scenario(face_on_field))),
        Err(DuelError::InvalidScenario(_))
    ));

    let over_cap = ScenarioSetup {
        seats: [
            SeatSetup {
                resources: vec![spec(Suit::Spades, Rank::Two); 11],
                ..Default::default()
            },
            SeatSetup::default(),
        ],
        shared_deck: None,
        open_at_upkeep: false,
    };
    assert!(matches!(
        Match::new(MatchConfig::default().with_mode(MatchMode::Scenario(over_cap))),
        Err(DuelError::InvalidScenario(_))
    ));
}

#[test]
fn test_unplayable_configs_rejected_at_start() {
    let configs = [
        MatchConfig::default().with_starting_player(PlayerId::new(2)),
        MatchConfig::default().with_starting_life(0),
        MatchConfig::default()
            .with_starting_life(-1)
            .with_mode(MatchMode::PerPlayerDecks),
        MatchConfig::default().with_hand_size(2),
        MatchConfig::default()
            .with_mode(MatchMode::Scenario(ScenarioSetup::default()))
            .with_starting_life(0),
    ];
    for config in configs {
        assert!(
            matches!(Match::start(config.clone()), Err(DuelError::InvalidConfig(_))),
            "started from {:?}",
            config
        );
    }

    // The smallest legal hand still reaches the first main phase
    let game = opened(MatchConfig::default().with_seed(8).with_hand_size(3));
    assert_eq!(game.phase(), Phase::Main);
    assert!(!game.is_over());
}

#[test]
fn test_scenario_loads_from_json() {
    let json = r#"{
        "seats": [
            { "life": 9, "field": [{ "suit": "Hearts", "rank": "Seven" }] },
            { "hand": [{ "suit": "Spades", "rank": "Ace" }] }
        ],
        "shared_deck": []
    }"#;
    let setup: ScenarioSetup = serde_json::from_str(json).unwrap();
    let game = scenario(setup);

    assert_eq!(game.player(P1).life, 9);
    assert_eq!(game.player(P1).field.len(), 1);
    assert_eq!(game.player(P2).hand.len(), 1);
    assert_eq!(game.player(P2).life, 20);
}

#[test]
fn test_events_serialize_as_json_lines() {
    let mut game = opened(MatchConfig::default().with_seed(30));
    let events = game.apply_in_place(P1, Intent::EndTurn).unwrap();
    for event in &events {
        let line = serde_json::to_string(event).unwrap();
        assert!(!line.contains('\n'));
        let back: GameEvent = serde_json::from_str(&line).unwrap();
        assert_eq!(&back, event);
    }
}
