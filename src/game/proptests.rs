//! Property-based tests for the game state machine
//!
//! These tests verify the session invariants hold across arbitrary event
//! sequences, including ones the page would never send.

use super::*;
use proptest::prelude::*;

// ============================================================================
// Arbitrary Generators
// ============================================================================

const OBJECTS: &[&str] = &["cat", "Book", "phone", "bicycle", "CLOCK"];

fn arb_config() -> impl Strategy<Value = GameConfig> {
    prop_oneof![
        Just(GameConfig::CLASSIC),
        Just(GameConfig::HINTED),
        (1u32..6, 0u32..4).prop_map(|(limit, budget)| GameConfig::new(limit, budget)),
    ]
}

fn arb_object() -> impl Strategy<Value = String> {
    proptest::sample::select(OBJECTS).prop_map(str::to_string)
}

fn arb_answer() -> impl Strategy<Value = Answer> {
    prop_oneof![
        Just(Answer::Yes),
        Just(Answer::No),
        Just(Answer::Maybe),
        Just(Answer::Error),
    ]
}

fn arb_guess() -> impl Strategy<Value = String> {
    prop_oneof![
        arb_object(),
        arb_object().prop_map(|o| o.to_uppercase()),
        "[a-z]{1,8}",
    ]
}

fn arb_event() -> impl Strategy<Value = Event> {
    prop_oneof![
        4 => "[a-zA-Z ?]{0,20}".prop_map(|text| Event::AskQuestion { text }),
        4 => arb_answer().prop_map(|answer| Event::AnswerReceived { answer }),
        2 => Just(Event::RequestHint),
        2 => "[a-z ]{1,20}".prop_map(|hint| Event::HintReceived { hint }),
        2 => arb_guess().prop_map(|text| Event::SubmitGuess { text }),
        1 => arb_object().prop_map(|target_object| Event::NewRound { target_object }),
    ]
}

fn check_invariants(session: &Session, config: &GameConfig) {
    assert_eq!(
        session.question_count() as usize,
        session.questions_log().len()
    );
    assert!(session.question_count() <= config.question_limit);
    assert_eq!(
        session.hints_remaining() as usize + session.hints_log().len(),
        config.hint_budget as usize
    );
    assert!(!session.target_object().is_empty());
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// Invariants hold after every accepted transition
    #[test]
    fn prop_invariants_hold(
        config in arb_config(),
        object in arb_object(),
        events in proptest::collection::vec(arb_event(), 0..60),
    ) {
        let mut session = Session::new(object, &config);
        check_invariants(&session, &config);

        for event in events {
            if let Ok(result) = transition(&session, &config, event) {
                session = result.new_session;
                check_invariants(&session, &config);
            }
        }
    }

    /// The target object only changes through a new round
    #[test]
    fn prop_target_fixed_within_round(
        config in arb_config(),
        object in arb_object(),
        events in proptest::collection::vec(arb_event(), 0..60),
    ) {
        let mut session = Session::new(object, &config);

        for event in events {
            let is_new_round = matches!(event, Event::NewRound { .. });
            if let Ok(result) = transition(&session, &config, event) {
                if !is_new_round {
                    prop_assert_eq!(result.new_session.target_object(), session.target_object());
                    prop_assert_eq!(result.new_session.round(), session.round());
                }
                session = result.new_session;
            }
        }
    }

    /// A finished round refuses play until reset
    #[test]
    fn prop_over_only_accepts_new_round(
        config in arb_config(),
        object in arb_object(),
        event in arb_event(),
    ) {
        let session = transition(
            &Session::new(object.clone(), &config),
            &config,
            Event::SubmitGuess { text: object },
        )
        .unwrap()
        .new_session;
        prop_assert!(session.game_over());

        let is_new_round = matches!(event, Event::NewRound { .. });
        let result = transition(&session, &config, event);
        prop_assert_eq!(result.is_ok(), is_new_round);
    }

    /// Guessing the object in any case wins
    #[test]
    fn prop_correct_guess_wins(
        config in arb_config(),
        object in arb_object(),
        upper in any::<bool>(),
    ) {
        let session = Session::new(object.clone(), &config);
        let text = if upper { object.to_uppercase() } else { object.to_lowercase() };

        let result = transition(&session, &config, Event::SubmitGuess { text }).unwrap();

        prop_assert_eq!(result.outcome, Some(GuessOutcome::Win));
        prop_assert!(result.new_session.game_over());
    }

    /// A wrong guess ends the round only once the question budget is spent
    #[test]
    fn prop_wrong_guess_needs_exhausted_budget(
        config in arb_config(),
        asked in 0u32..25,
    ) {
        let mut session = Session::new("bicycle", &config);
        for i in 0..asked.min(config.question_limit) {
            let pending = transition(
                &session,
                &config,
                Event::AskQuestion { text: format!("Question {i}?") },
            )
            .unwrap()
            .new_session;
            session = transition(&pending, &config, Event::AnswerReceived { answer: Answer::Maybe })
                .unwrap()
                .new_session;
        }

        let result = transition(
            &session,
            &config,
            Event::SubmitGuess { text: "unicycle".to_string() },
        )
        .unwrap();

        let exhausted = session.question_count() >= config.question_limit;
        prop_assert_eq!(result.new_session.game_over(), exhausted);
        if exhausted {
            prop_assert_eq!(
                result.outcome,
                Some(GuessOutcome::Loss { target_object: "bicycle".to_string() })
            );
        }
    }

    /// A new round resets the session regardless of prior state
    #[test]
    fn prop_new_round_resets(
        config in arb_config(),
        object in arb_object(),
        events in proptest::collection::vec(arb_event(), 0..40),
        next_object in arb_object(),
    ) {
        let mut session = Session::new(object, &config);
        for event in events {
            if let Ok(result) = transition(&session, &config, event) {
                session = result.new_session;
            }
        }

        let fresh = transition(
            &session,
            &config,
            Event::NewRound { target_object: next_object.clone() },
        )
        .unwrap()
        .new_session;

        prop_assert!(fresh.questions_log().is_empty());
        prop_assert!(fresh.hints_log().is_empty());
        prop_assert_eq!(fresh.question_count(), 0);
        prop_assert_eq!(fresh.hints_remaining(), config.hint_budget);
        prop_assert!(!fresh.game_over());
        prop_assert_eq!(fresh.phase(), &GamePhase::Active);
        prop_assert_eq!(fresh.target_object(), next_object.as_str());
    }
}
