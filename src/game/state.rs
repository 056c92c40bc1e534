//! Game session state types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ============================================================================
// Answers and Log Entries
// ============================================================================

/// Answer to a yes/no question about the target object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Answer {
    Yes,
    No,
    Maybe,
    /// The answerer could not be reached
    Error,
}

/// One answered question
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QaEntry {
    pub question: String,
    pub answer: Answer,
}

// ============================================================================
// Outcomes
// ============================================================================

/// Result of submitting a guess
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GuessOutcome {
    /// The guess matched the target object
    Win,
    /// Wrong guess with the question budget spent; the object is revealed
    Loss { target_object: String },
    /// Wrong guess, the round continues
    Incorrect { questions_remaining: u32 },
}

impl GuessOutcome {
    pub fn ends_round(&self) -> bool {
        !matches!(self, GuessOutcome::Incorrect { .. })
    }
}

// ============================================================================
// Game Phase
// ============================================================================

/// Where the session is within a round
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GamePhase {
    /// Accepting questions, hints and guesses
    #[default]
    Active,

    /// Question sent to the answerer, waiting for its reply
    AwaitingAnswer { question: String },

    /// Hint requested from the hinter, waiting for its reply
    AwaitingHint,

    /// Round finished; only a new game is accepted
    Over { outcome: GuessOutcome },
}

impl GamePhase {
    /// A collaborator call is in flight
    pub fn is_busy(&self) -> bool {
        matches!(
            self,
            GamePhase::AwaitingAnswer { .. } | GamePhase::AwaitingHint
        )
    }
}

// ============================================================================
// Configuration
// ============================================================================

/// Per-round rules (immutable for the life of the server)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub question_limit: u32,
    pub hint_budget: u32,
}

impl GameConfig {
    /// Ten questions, no hints
    pub const CLASSIC: GameConfig = GameConfig {
        question_limit: 10,
        hint_budget: 0,
    };

    /// Twenty questions, two hints
    pub const HINTED: GameConfig = GameConfig {
        question_limit: 20,
        hint_budget: 2,
    };

    pub fn new(question_limit: u32, hint_budget: u32) -> Self {
        Self {
            question_limit,
            hint_budget,
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::CLASSIC
    }
}

// ============================================================================
// Session
// ============================================================================

/// A single player's game, replaced wholesale on every new round
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    target_object: String,
    questions_log: Vec<QaEntry>,
    hints_log: Vec<String>,
    hints_remaining: u32,
    phase: GamePhase,
    round: u32,
    started_at: DateTime<Utc>,
}

impl Session {
    /// Start the first round of a session.
    ///
    /// `target_object` must be non-empty; the oracle guarantees this by
    /// substituting a fallback when naming fails.
    pub fn new(target_object: impl Into<String>, config: &GameConfig) -> Self {
        Self::fresh(target_object.into(), config, 1)
    }

    /// Fresh round state following `previous`
    pub(super) fn next_round(
        previous: &Session,
        target_object: String,
        config: &GameConfig,
    ) -> Self {
        Self::fresh(target_object, config, previous.round.wrapping_add(1))
    }

    fn fresh(target_object: String, config: &GameConfig, round: u32) -> Self {
        Self {
            target_object,
            questions_log: Vec::new(),
            hints_log: Vec::new(),
            hints_remaining: config.hint_budget,
            phase: GamePhase::Active,
            round,
            started_at: Utc::now(),
        }
    }

    pub fn target_object(&self) -> &str {
        &self.target_object
    }

    pub fn questions_log(&self) -> &[QaEntry] {
        &self.questions_log
    }

    pub fn hints_log(&self) -> &[String] {
        &self.hints_log
    }

    /// Number of answered questions this round
    pub fn question_count(&self) -> u32 {
        u32::try_from(self.questions_log.len()).unwrap_or(u32::MAX)
    }

    pub fn hints_remaining(&self) -> u32 {
        self.hints_remaining
    }

    pub fn phase(&self) -> &GamePhase {
        &self.phase
    }

    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn game_over(&self) -> bool {
        matches!(self.phase, GamePhase::Over { .. })
    }

    pub fn questions_remaining(&self, config: &GameConfig) -> u32 {
        config.question_limit.saturating_sub(self.question_count())
    }

    pub fn can_ask(&self, config: &GameConfig) -> bool {
        self.phase == GamePhase::Active && self.questions_remaining(config) > 0
    }

    pub fn can_hint(&self) -> bool {
        self.phase == GamePhase::Active && self.hints_remaining > 0
    }

    pub fn can_guess(&self) -> bool {
        self.phase == GamePhase::Active
    }

    /// Exact comparison against the target object after case-folding
    pub fn matches_target(&self, guess: &str) -> bool {
        guess.to_lowercase() == self.target_object.to_lowercase()
    }

    pub(super) fn set_phase(&mut self, phase: GamePhase) {
        self.phase = phase;
    }

    pub(super) fn record_answer(&mut self, question: String, answer: Answer) {
        self.questions_log.push(QaEntry { question, answer });
    }

    pub(super) fn record_hint(&mut self, hint: String) {
        self.hints_log.push(hint);
        self.hints_remaining = self.hints_remaining.saturating_sub(1);
    }
}
