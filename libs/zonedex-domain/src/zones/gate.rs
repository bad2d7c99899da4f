//! One-shot cache gate
//!
//! `CacheGate` runs an expensive build at most once per successful outcome.
//! It moves through `Empty -> Building -> Ready`:
//!
//! - `Empty`: the next caller becomes the leader and runs the build.
//! - `Building`: later callers subscribe to the leader's outcome instead of
//!   starting a second build. They get the leader's value or its error.
//! - `Ready`: the value is returned immediately for the rest of the gate's life.
//!
//! A failed build puts the gate back to `Empty`, so the next call retries.
//! If the leader is dropped mid-build, the gate also goes back to `Empty` and
//! waiters re-enter it, one of them taking over as leader.

use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::watch;
use tracing::debug;

use super::{Result, ZoneIndexError};

type Outcome<T> = Option<std::result::Result<Arc<T>, ZoneIndexError>>;

enum GateState<T> {
    Empty,
    Building(watch::Receiver<Outcome<T>>),
    Ready(Arc<T>),
}

/// Observable phase of a gate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateStatus {
    Empty,
    Building,
    Ready,
}

enum Role<T> {
    Done(Arc<T>),
    Lead(watch::Sender<Outcome<T>>),
    Wait(watch::Receiver<Outcome<T>>),
}

pub struct CacheGate<T> {
    state: Mutex<GateState<T>>,
}

impl<T> Default for CacheGate<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> CacheGate<T> {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(GateState::Empty),
        }
    }

    pub fn status(&self) -> GateStatus {
        match &*self.lock() {
            GateState::Empty => GateStatus::Empty,
            GateState::Building(_) => GateStatus::Building,
            GateState::Ready(_) => GateStatus::Ready,
        }
    }

    /// The cached value, if a build has completed
    pub fn get(&self) -> Option<Arc<T>> {
        match &*self.lock() {
            GateState::Ready(value) => Some(Arc::clone(value)),
            _ => None,
        }
    }

    // The lock is only ever held for a state transition, never across an await.
    fn lock(&self) -> MutexGuard<'_, GateState<T>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn enter(&self) -> Role<T> {
        let mut state = self.lock();
        match &*state {
            GateState::Ready(value) => Role::Done(Arc::clone(value)),
            GateState::Building(receiver) => Role::Wait(receiver.clone()),
            GateState::Empty => {
                let (sender, receiver) = watch::channel(None);
                *state = GateState::Building(receiver);
                Role::Lead(sender)
            }
        }
    }
}

impl<T> CacheGate<T>
where
    T: Send + Sync,
{
    /// Return the cached value, building it first if needed
    ///
    /// Only one `build` runs at a time. Callers that arrive while it runs
    /// receive its outcome, success or failure.
    ///
    /// # Errors
    ///
    /// Returns the error of the build attempt this call observed. The error is
    /// not cached.
    pub async fn get_or_build<F, Fut>(&self, build: F) -> Result<Arc<T>>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let sender = loop {
            let mut receiver = match self.enter() {
                Role::Done(value) => return Ok(value),
                Role::Lead(sender) => break sender,
                Role::Wait(receiver) => receiver,
            };

            debug!("Joining in-flight build");

            let observed = match receiver.wait_for(Option::is_some).await {
                Ok(outcome) => (*outcome).clone(),
                Err(_) => None,
            };

            match observed {
                Some(outcome) => return outcome,
                None => debug!("In-flight build was abandoned, re-entering gate"),
            }
        };

        // Declared after `sender` so it drops first: the gate is back to
        // `Empty` before waiters see the channel close.
        let guard = BuildGuard {
            gate: self,
            armed: true,
        };

        let outcome = build().await.map(Arc::new);
        guard.finish(&outcome);

        // Waiters may all be gone; the state transition above already happened.
        let _ = sender.send(Some(outcome.clone()));
        outcome
    }
}

/// Resets the gate to `Empty` if the leader never reaches `finish`
struct BuildGuard<'a, T> {
    gate: &'a CacheGate<T>,
    armed: bool,
}

impl<T> BuildGuard<'_, T> {
    fn finish(mut self, outcome: &std::result::Result<Arc<T>, ZoneIndexError>) {
        let next = match outcome {
            Ok(value) => GateState::Ready(Arc::clone(value)),
            Err(_) => GateState::Empty,
        };
        *self.gate.lock() = next;
        self.armed = false;
    }
}

impl<T> Drop for BuildGuard<'_, T> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        let mut state = self.gate.lock();
        if matches!(*state, GateState::Building(_)) {
            *state = GateState::Empty;
        }
    }
}
