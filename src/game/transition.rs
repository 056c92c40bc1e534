//! Pure state transition function

use super::state::{GameConfig, GamePhase, GuessOutcome, Session};
use super::{Effect, Event};
use thiserror::Error;

/// Result of a state transition
#[derive(Debug)]
pub struct TransitionResult {
    pub new_session: Session,
    /// Set only by guesses
    pub outcome: Option<GuessOutcome>,
    pub effects: Vec<Effect>,
}

impl TransitionResult {
    pub fn new(session: Session) -> Self {
        Self {
            new_session: session,
            outcome: None,
            effects: vec![],
        }
    }

    pub fn with_outcome(mut self, outcome: GuessOutcome) -> Self {
        self.outcome = Some(outcome);
        self
    }

    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }
}

/// Reasons a transition is refused
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransitionError {
    #[error("Question is empty")]
    EmptyQuestion,
    #[error("No questions left this round ({limit} asked); make a guess or start a new game")]
    QuestionLimitReached { limit: u32 },
    #[error("The round is over; start a new game")]
    GameOver,
    #[error("Still waiting for the previous request to finish")]
    Busy,
    #[error("Unexpected {event} in the current phase")]
    Unexpected { event: &'static str },
    #[error("Invalid transition: {0}")]
    InvalidTransition(String),
}

/// Pure transition function
///
/// Given the same inputs it always produces the same outputs; collaborator
/// calls are expressed as effects for the caller to execute.
pub fn transition(
    session: &Session,
    config: &GameConfig,
    event: Event,
) -> Result<TransitionResult, TransitionError> {
    match (session.phase(), event) {
        // ============================================================
        // New round (accepted in every phase)
        // ============================================================
        (_, Event::NewRound { target_object }) => {
            let target_object = target_object.trim().to_string();
            if target_object.is_empty() {
                return Err(TransitionError::InvalidTransition(
                    "target object must not be empty".to_string(),
                ));
            }
            Ok(TransitionResult::new(Session::next_round(
                session,
                target_object,
                config,
            )))
        }

        // ============================================================
        // Questions
        // ============================================================
        (GamePhase::Active, Event::AskQuestion { text }) => {
            let question = text.trim();
            if question.is_empty() {
                return Err(TransitionError::EmptyQuestion);
            }
            if session.question_count() >= config.question_limit {
                return Err(TransitionError::QuestionLimitReached {
                    limit: config.question_limit,
                });
            }

            let mut next = session.clone();
            next.set_phase(GamePhase::AwaitingAnswer {
                question: question.to_string(),
            });
            Ok(TransitionResult::new(next)
                .with_effect(Effect::request_answer(question, session.target_object())))
        }

        (GamePhase::AwaitingAnswer { question }, Event::AnswerReceived { answer }) => {
            let mut next = session.clone();
            next.record_answer(question.clone(), answer);
            next.set_phase(GamePhase::Active);

            let exhausted = next.question_count() >= config.question_limit;
            let result = TransitionResult::new(next);
            if exhausted {
                Ok(result.with_effect(Effect::QuestionBudgetExhausted {
                    question_limit: config.question_limit,
                }))
            } else {
                Ok(result)
            }
        }

        // ============================================================
        // Hints
        // ============================================================

        // Over budget: silently ignored, the page disables the control
        (GamePhase::Active, Event::RequestHint) if session.hints_remaining() == 0 => {
            Ok(TransitionResult::new(session.clone()))
        }

        (GamePhase::Active, Event::RequestHint) => {
            let mut next = session.clone();
            next.set_phase(GamePhase::AwaitingHint);
            Ok(TransitionResult::new(next).with_effect(Effect::request_hint(
                session.target_object(),
                session.hints_log(),
            )))
        }

        (GamePhase::AwaitingHint, Event::HintReceived { hint }) => {
            if session.hints_remaining() == 0 {
                return Err(TransitionError::Unexpected {
                    event: "hint_received",
                });
            }
            let mut next = session.clone();
            next.record_hint(hint);
            next.set_phase(GamePhase::Active);
            Ok(TransitionResult::new(next))
        }

        // ============================================================
        // Guesses
        // ============================================================
        (GamePhase::Active, Event::SubmitGuess { text }) => {
            let outcome = if session.matches_target(&text) {
                GuessOutcome::Win
            } else if session.question_count() >= config.question_limit {
                GuessOutcome::Loss {
                    target_object: session.target_object().to_string(),
                }
            } else {
                GuessOutcome::Incorrect {
                    questions_remaining: session.questions_remaining(config),
                }
            };

            if !outcome.ends_round() {
                return Ok(TransitionResult::new(session.clone()).with_outcome(outcome));
            }

            let mut next = session.clone();
            next.set_phase(GamePhase::Over {
                outcome: outcome.clone(),
            });
            Ok(TransitionResult::new(next)
                .with_outcome(outcome.clone())
                .with_effect(Effect::RoundOver { outcome }))
        }

        // ============================================================
        // Rejections
        // ============================================================
        (
            GamePhase::Over { .. },
            Event::AskQuestion { .. } | Event::RequestHint | Event::SubmitGuess { .. },
        ) => Err(TransitionError::GameOver),

        (
            GamePhase::AwaitingAnswer { .. } | GamePhase::AwaitingHint,
            Event::AskQuestion { .. } | Event::RequestHint | Event::SubmitGuess { .. },
        ) => Err(TransitionError::Busy),

        // Collaborator results that no longer match the phase
        (_, event @ (Event::AnswerReceived { .. } | Event::HintReceived { .. })) => {
            Err(TransitionError::Unexpected {
                event: event.name(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Answer;

    fn ask(session: &Session, config: &GameConfig, text: &str, answer: Answer) -> Session {
        let pending = transition(
            session,
            config,
            Event::AskQuestion {
                text: text.to_string(),
            },
        )
        .unwrap()
        .new_session;
        transition(&pending, config, Event::AnswerReceived { answer })
            .unwrap()
            .new_session
    }

    fn hint(session: &Session, config: &GameConfig, text: &str) -> Session {
        let result = transition(session, config, Event::RequestHint).unwrap();
        if result.effects.is_empty() {
            return result.new_session;
        }
        transition(
            &result.new_session,
            config,
            Event::HintReceived {
                hint: text.to_string(),
            },
        )
        .unwrap()
        .new_session
    }

    fn guess(session: &Session, config: &GameConfig, text: &str) -> TransitionResult {
        transition(
            session,
            config,
            Event::SubmitGuess {
                text: text.to_string(),
            },
        )
        .unwrap()
    }

    #[test]
    fn test_ask_requests_answer_then_logs_it() {
        let config = GameConfig::CLASSIC;
        let session = Session::new("cat", &config);

        let result = transition(
            &session,
            &config,
            Event::AskQuestion {
                text: "  Is it alive? ".to_string(),
            },
        )
        .unwrap();

        assert_eq!(
            result.new_session.phase(),
            &GamePhase::AwaitingAnswer {
                question: "Is it alive?".to_string()
            }
        );
        assert_eq!(
            result.effects,
            vec![Effect::request_answer("Is it alive?", "cat")]
        );
        assert_eq!(result.new_session.question_count(), 0);

        let answered = transition(
            &result.new_session,
            &config,
            Event::AnswerReceived { answer: Answer::Yes },
        )
        .unwrap()
        .new_session;

        assert_eq!(answered.phase(), &GamePhase::Active);
        assert_eq!(answered.question_count(), 1);
        assert_eq!(answered.questions_log()[0].question, "Is it alive?");
        assert_eq!(answered.questions_log()[0].answer, Answer::Yes);
    }

    #[test]
    fn test_empty_question_rejected() {
        let config = GameConfig::CLASSIC;
        let session = Session::new("cat", &config);
        let err = transition(
            &session,
            &config,
            Event::AskQuestion {
                text: "   ".to_string(),
            },
        )
        .unwrap_err();
        assert_eq!(err, TransitionError::EmptyQuestion);
    }

    #[test]
    fn test_duplicate_questions_logged_independently() {
        let config = GameConfig::CLASSIC;
        let mut session = Session::new("cat", &config);
        session = ask(&session, &config, "Is it big?", Answer::No);
        session = ask(&session, &config, "Is it big?", Answer::No);
        assert_eq!(session.question_count(), 2);
        assert_eq!(session.questions_log().len(), 2);
    }

    #[test]
    fn test_guess_any_case_wins() {
        let config = GameConfig::CLASSIC;
        let session = Session::new("book", &config);

        let result = guess(&session, &config, "Book");

        assert_eq!(result.outcome, Some(GuessOutcome::Win));
        assert!(result.new_session.game_over());
        assert_eq!(
            result.effects,
            vec![Effect::RoundOver {
                outcome: GuessOutcome::Win
            }]
        );
    }

    #[test]
    fn test_wrong_guess_with_budget_left_continues() {
        let config = GameConfig::CLASSIC;
        let session = ask(&Session::new("book", &config), &config, "Q?", Answer::No);

        let result = guess(&session, &config, "lamp");

        assert_eq!(
            result.outcome,
            Some(GuessOutcome::Incorrect {
                questions_remaining: 9
            })
        );
        assert!(!result.new_session.game_over());
        assert_eq!(result.new_session, session);
        assert!(result.effects.is_empty());
    }

    #[test]
    fn test_limit_reached_then_wrong_guess_loses() {
        let config = GameConfig::CLASSIC;
        let mut session = Session::new("clock", &config);
        for i in 0..9 {
            session = ask(&session, &config, &format!("Question {i}?"), Answer::Maybe);
        }

        // The tenth answer exhausts the budget
        let pending = transition(
            &session,
            &config,
            Event::AskQuestion {
                text: "Last one?".to_string(),
            },
        )
        .unwrap()
        .new_session;
        let result = transition(
            &pending,
            &config,
            Event::AnswerReceived {
                answer: Answer::Maybe,
            },
        )
        .unwrap();
        assert_eq!(
            result.effects,
            vec![Effect::QuestionBudgetExhausted { question_limit: 10 }]
        );
        let session = result.new_session;
        assert_eq!(session.question_count(), 10);
        assert!(!session.game_over());

        let err = transition(
            &session,
            &config,
            Event::AskQuestion {
                text: "One more?".to_string(),
            },
        )
        .unwrap_err();
        assert_eq!(err, TransitionError::QuestionLimitReached { limit: 10 });

        let result = guess(&session, &config, "lamp");
        assert_eq!(
            result.outcome,
            Some(GuessOutcome::Loss {
                target_object: "clock".to_string()
            })
        );
        assert!(result.new_session.game_over());
    }

    #[test]
    fn test_hints_capped_by_budget() {
        let config = GameConfig::HINTED;
        let mut session = Session::new("tree", &config);

        session = hint(&session, &config, "It has rings.");
        session = hint(&session, &config, "Birds like it.");
        assert_eq!(session.hints_remaining(), 0);

        let result = transition(&session, &config, Event::RequestHint).unwrap();
        assert!(result.effects.is_empty());
        assert_eq!(result.new_session, session);
        assert_eq!(result.new_session.hints_log().len(), 2);
    }

    #[test]
    fn test_hint_request_carries_previous_hints() {
        let config = GameConfig::HINTED;
        let session = hint(&Session::new("tree", &config), &config, "It has rings.");

        let result = transition(&session, &config, Event::RequestHint).unwrap();

        assert_eq!(result.new_session.phase(), &GamePhase::AwaitingHint);
        assert_eq!(
            result.effects,
            vec![Effect::RequestHint {
                target_object: "tree".to_string(),
                previous_hints: vec!["It has rings.".to_string()],
            }]
        );
    }

    #[test]
    fn test_game_over_rejects_play_but_accepts_new_round() {
        let config = GameConfig::HINTED;
        let session = guess(&Session::new("cup", &config), &config, "cup").new_session;

        for event in [
            Event::AskQuestion {
                text: "Is it red?".to_string(),
            },
            Event::RequestHint,
            Event::SubmitGuess {
                text: "cup".to_string(),
            },
        ] {
            assert_eq!(
                transition(&session, &config, event).unwrap_err(),
                TransitionError::GameOver
            );
        }

        let fresh = transition(
            &session,
            &config,
            Event::NewRound {
                target_object: "shoe".to_string(),
            },
        )
        .unwrap()
        .new_session;
        assert_eq!(fresh.target_object(), "shoe");
        assert_eq!(fresh.round(), 2);
        assert!(!fresh.game_over());
        assert_eq!(fresh.hints_remaining(), 2);
    }

    #[test]
    fn test_busy_rejects_user_actions() {
        let config = GameConfig::HINTED;
        let pending = transition(&Session::new("car", &config), &config, Event::RequestHint)
            .unwrap()
            .new_session;

        let err = transition(
            &pending,
            &config,
            Event::SubmitGuess {
                text: "car".to_string(),
            },
        )
        .unwrap_err();
        assert_eq!(err, TransitionError::Busy);
    }

    #[test]
    fn test_stale_collaborator_result_rejected() {
        let config = GameConfig::CLASSIC;
        let session = Session::new("car", &config);
        let err = transition(&session, &config, Event::AnswerReceived { answer: Answer::Yes })
            .unwrap_err();
        assert_eq!(
            err,
            TransitionError::Unexpected {
                event: "answer_received"
            }
        );
    }

    #[test]
    fn test_new_round_resets_everything() {
        let config = GameConfig::HINTED;
        let mut session = Session::new("pencil", &config);
        session = ask(&session, &config, "Is it long?", Answer::Yes);
        session = hint(&session, &config, "Sharpen it.");

        let fresh = transition(
            &session,
            &config,
            Event::NewRound {
                target_object: "chair".to_string(),
            },
        )
        .unwrap()
        .new_session;

        assert!(fresh.questions_log().is_empty());
        assert!(fresh.hints_log().is_empty());
        assert_eq!(fresh.question_count(), 0);
        assert_eq!(fresh.hints_remaining(), config.hint_budget);
        assert!(!fresh.game_over());
    }

    #[test]
    fn test_blank_target_object_rejected() {
        let config = GameConfig::CLASSIC;
        let session = Session::new("cat", &config);
        let err = transition(
            &session,
            &config,
            Event::NewRound {
                target_object: " ".to_string(),
            },
        )
        .unwrap_err();
        assert!(matches!(err, TransitionError::InvalidTransition(_)));
    }
}
