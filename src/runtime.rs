//! Runtime for hosting game sessions
//!
//! Sessions live in memory for the life of the process, keyed by a random
//! id handed to the page. Each action runs on its own task so a dropped
//! request cannot leave a session waiting on a collaborator forever.

mod executor;

#[cfg(test)]
pub mod testing;

use crate::game::{GameConfig, GuessOutcome, Session, TransitionError};
use crate::oracle::Oracle;
use executor::SessionExecutor;
use std::collections::HashMap;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::{Mutex, RwLock};

/// Errors surfaced to the API layer
#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("Session not found: {0}")]
    SessionNotFound(String),
    #[error(transparent)]
    Rejected(#[from] TransitionError),
    #[error("Session task failed: {0}")]
    TaskFailed(String),
}

/// A session's state at a point in time
#[derive(Debug, Clone)]
pub struct SessionSnapshot {
    pub id: String,
    pub session: Session,
}

impl SessionSnapshot {
    fn new(id: &str, session: Session) -> Self {
        Self {
            id: id.to_string(),
            session,
        }
    }
}

/// Snapshot plus the outcome of a guess
#[derive(Debug, Clone)]
pub struct GuessResult {
    pub outcome: GuessOutcome,
    pub snapshot: SessionSnapshot,
}

/// One hosted session
struct SessionSlot {
    session: Arc<Mutex<Session>>,
    last_used: AtomicU64,
}

/// Manager for all game sessions
pub struct SessionManager {
    sessions: RwLock<HashMap<String, Arc<SessionSlot>>>,
    oracle: Oracle,
    config: GameConfig,
    max_sessions: usize,
    clock: AtomicU64,
}

impl SessionManager {
    pub fn new(oracle: Oracle, config: GameConfig, max_sessions: usize) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            oracle,
            config,
            max_sessions: max_sessions.max(1),
            clock: AtomicU64::new(0),
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Number of hosted sessions
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    /// Start a session with a freshly named object
    pub async fn create_session(&self) -> SessionSnapshot {
        let target_object = self.oracle.name_object(&[]).await;
        let session = Session::new(target_object, &self.config);
        let id = uuid::Uuid::new_v4().to_string();

        let slot = Arc::new(SessionSlot {
            session: Arc::new(Mutex::new(session.clone())),
            last_used: AtomicU64::new(self.tick()),
        });

        let mut sessions = self.sessions.write().await;
        if sessions.len() >= self.max_sessions {
            Self::evict_least_recent(&mut sessions);
        }
        sessions.insert(id.clone(), slot);
        tracing::info!(session_id = %id, sessions = sessions.len(), "Session created");

        SessionSnapshot { id, session }
    }

    pub async fn snapshot(&self, id: &str) -> Result<SessionSnapshot, RuntimeError> {
        let slot = self.slot(id).await?;
        let session = slot.session.lock().await.clone();
        Ok(SessionSnapshot::new(id, session))
    }

    /// Ask a yes/no question
    pub async fn ask(&self, id: &str, text: String) -> Result<SessionSnapshot, RuntimeError> {
        let dispatched = self
            .run(id, |executor| async move { executor.ask(text).await })
            .await?;
        Ok(SessionSnapshot::new(id, dispatched.session))
    }

    /// Request a hint; a no-op once the hint budget is spent
    pub async fn hint(&self, id: &str) -> Result<SessionSnapshot, RuntimeError> {
        let dispatched = self
            .run(id, |executor| async move { executor.hint().await })
            .await?;
        Ok(SessionSnapshot::new(id, dispatched.session))
    }

    /// Submit a guess at the target object
    pub async fn guess(&self, id: &str, text: String) -> Result<GuessResult, RuntimeError> {
        let (outcome, session) = self
            .run(id, |executor| async move { executor.guess(text).await })
            .await?;
        Ok(GuessResult {
            outcome,
            snapshot: SessionSnapshot::new(id, session),
        })
    }

    /// Replace the session's round with a new one
    pub async fn new_game(&self, id: &str) -> Result<SessionSnapshot, RuntimeError> {
        let dispatched = self
            .run(id, |executor| async move { executor.new_game().await })
            .await?;
        Ok(SessionSnapshot::new(id, dispatched.session))
    }

    /// Drop a session
    pub async fn remove(&self, id: &str) -> Result<(), RuntimeError> {
        let removed = self.sessions.write().await.remove(id);
        match removed {
            Some(_) => {
                tracing::info!(session_id = %id, "Session removed");
                Ok(())
            }
            None => Err(RuntimeError::SessionNotFound(id.to_string())),
        }
    }

    async fn slot(&self, id: &str) -> Result<Arc<SessionSlot>, RuntimeError> {
        let slot = self
            .sessions
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or_else(|| RuntimeError::SessionNotFound(id.to_string()))?;
        slot.last_used.store(self.tick(), Ordering::Relaxed);
        Ok(slot)
    }

    /// Run an action on a detached task and wait for it
    ///
    /// If the caller goes away mid-action the task still applies the
    /// collaborator's result, so the session never stays busy.
    async fn run<T, F, Fut>(&self, id: &str, action: F) -> Result<T, RuntimeError>
    where
        F: FnOnce(SessionExecutor) -> Fut,
        Fut: Future<Output = Result<T, TransitionError>> + Send + 'static,
        T: Send + 'static,
    {
        let slot = self.slot(id).await?;
        let executor = SessionExecutor::new(
            id.to_string(),
            slot.session.clone(),
            self.config,
            self.oracle.clone(),
        );

        tokio::spawn(action(executor))
            .await
            .map_err(|e| {
                tracing::error!(session_id = %id, error = %e, "Session task failed");
                RuntimeError::TaskFailed(e.to_string())
            })?
            .map_err(RuntimeError::from)
    }

    fn tick(&self) -> u64 {
        self.clock.fetch_add(1, Ordering::Relaxed)
    }

    fn evict_least_recent(sessions: &mut HashMap<String, Arc<SessionSlot>>) {
        let oldest = sessions
            .iter()
            .min_by_key(|(_, slot)| slot.last_used.load(Ordering::Relaxed))
            .map(|(id, _)| id.clone());
        if let Some(id) = oldest {
            sessions.remove(&id);
            tracing::info!(session_id = %id, "Evicted least recently used session");
        }
    }
}
