//! Session executor
//!
//! Applies one user action to a session: runs the pure transition under the
//! session lock, executes the resulting effects with the lock released, then
//! feeds collaborator results back in as events.
//!
//! The executor owns everything it touches so the manager can run it on a
//! detached task that outlives the request that started it.

use crate::game::{transition, Effect, Event, GameConfig, GuessOutcome, Session, TransitionError};
use crate::oracle::Oracle;
use std::collections::VecDeque;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Final state after an action and its effects have run
pub(super) struct Dispatched {
    pub session: Session,
    pub outcome: Option<GuessOutcome>,
}

pub(super) struct SessionExecutor {
    id: String,
    session: Arc<Mutex<Session>>,
    config: GameConfig,
    oracle: Oracle,
}

impl SessionExecutor {
    pub fn new(
        id: String,
        session: Arc<Mutex<Session>>,
        config: GameConfig,
        oracle: Oracle,
    ) -> Self {
        Self {
            id,
            session,
            config,
            oracle,
        }
    }

    pub async fn ask(&self, text: String) -> Result<Dispatched, TransitionError> {
        self.dispatch(Event::AskQuestion { text }).await
    }

    pub async fn hint(&self) -> Result<Dispatched, TransitionError> {
        self.dispatch(Event::RequestHint).await
    }

    pub async fn guess(&self, text: String) -> Result<(GuessOutcome, Session), TransitionError> {
        let dispatched = self.dispatch(Event::SubmitGuess { text }).await?;
        let outcome = dispatched.outcome.ok_or_else(|| {
            TransitionError::InvalidTransition("guess produced no outcome".to_string())
        })?;
        Ok((outcome, dispatched.session))
    }

    /// Name a fresh object, avoiding the current one, and start a new round
    pub async fn new_game(&self) -> Result<Dispatched, TransitionError> {
        let previous = self.session.lock().await.target_object().to_string();
        let target_object = self.oracle.name_object(&[previous]).await;
        self.dispatch(Event::NewRound { target_object }).await
    }

    async fn dispatch(&self, event: Event) -> Result<Dispatched, TransitionError> {
        let event_name = event.name();
        let (round, result) = {
            let mut session = self.session.lock().await;
            let result = transition(&session, &self.config, event).map_err(|e| {
                tracing::debug!(
                    session_id = %self.id,
                    event = event_name,
                    error = %e,
                    "Action rejected"
                );
                e
            })?;
            *session = result.new_session.clone();
            (session.round(), result)
        };

        tracing::debug!(
            session_id = %self.id,
            event = event_name,
            round,
            effects = result.effects.len(),
            "Transition applied"
        );

        let outcome = result.outcome;
        let mut snapshot = result.new_session;
        let mut effects: VecDeque<Effect> = result.effects.into();

        while let Some(effect) = effects.pop_front() {
            let Some(follow_up) = self.execute_effect(effect).await else {
                continue;
            };

            let mut session = self.session.lock().await;
            if session.round() != round {
                tracing::debug!(
                    session_id = %self.id,
                    event = follow_up.name(),
                    stale_round = round,
                    round = session.round(),
                    "Discarding result for a finished round"
                );
                snapshot = session.clone();
                break;
            }

            match transition(&session, &self.config, follow_up) {
                Ok(next) => {
                    *session = next.new_session.clone();
                    snapshot = next.new_session;
                    effects.extend(next.effects);
                }
                Err(e) => {
                    tracing::warn!(
                        session_id = %self.id,
                        error = %e,
                        "Discarding collaborator result"
                    );
                    snapshot = session.clone();
                    break;
                }
            }
        }

        Ok(Dispatched {
            session: snapshot,
            outcome,
        })
    }

    /// Run an effect; collaborator calls yield the event carrying their result
    async fn execute_effect(&self, effect: Effect) -> Option<Event> {
        match effect {
            Effect::RequestAnswer {
                question,
                target_object,
            } => {
                let answer = self.oracle.answer(&question, &target_object).await;
                Some(Event::AnswerReceived { answer })
            }
            Effect::RequestHint {
                target_object,
                previous_hints,
            } => {
                let hint = self.oracle.hint(&target_object, &previous_hints).await;
                Some(Event::HintReceived { hint })
            }
            Effect::QuestionBudgetExhausted { question_limit } => {
                tracing::info!(session_id = %self.id, question_limit, "Question budget exhausted");
                None
            }
            Effect::RoundOver { outcome } => {
                tracing::info!(session_id = %self.id, outcome = ?outcome, "Round over");
                None
            }
        }
    }
}
