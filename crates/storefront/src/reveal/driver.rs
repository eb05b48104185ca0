//! Runs a [`RevealSequencer`] on tokio timers.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::debug;

use super::{FadeIn, RevealPhase, RevealSequencer, RevealState, RevealTimings};

/// Spawns reveal sequences.
pub struct RevealDriver;

impl RevealDriver {
    /// Mount the title and start the reveal on the current tokio runtime.
    ///
    /// `on_complete` runs exactly once, right after the content becomes
    /// visible, with the two fade-ins to start. It never runs if the returned
    /// handle is torn down (or dropped) first.
    ///
    /// # Panics
    ///
    /// Panics if called outside a tokio runtime.
    pub fn spawn<F>(timings: RevealTimings, on_complete: F) -> RevealHandle
    where
        F: FnOnce([FadeIn; 2]) + Send + 'static,
    {
        let shared = Arc::new(Shared {
            sequencer: Mutex::new(RevealSequencer::new(timings)),
            state: watch::Sender::new(RevealSequencer::new(timings).state()),
        });

        let task = tokio::spawn(run(Arc::clone(&shared), on_complete));
        RevealHandle { shared, task }
    }
}

struct Shared {
    sequencer: Mutex<RevealSequencer>,
    state: watch::Sender<RevealState>,
}

impl Shared {
    fn lock(&self) -> MutexGuard<'_, RevealSequencer> {
        self.sequencer.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Apply a transition and publish the resulting state.
    ///
    /// The state is published before the lock is released, so concurrent
    /// steps publish in the order they were applied.
    fn step<T>(&self, transition: impl FnOnce(&mut RevealSequencer) -> T) -> T {
        let mut sequencer = self.lock();
        let out = transition(&mut sequencer);
        let state = sequencer.state();
        self.state.send_if_modified(|current| {
            let changed = *current != state;
            *current = state;
            changed
        });
        drop(sequencer);
        out
    }
}

async fn run<F>(shared: Arc<Shared>, on_complete: F)
where
    F: FnOnce([FadeIn; 2]) + Send + 'static,
{
    let Some(delay) = shared.step(RevealSequencer::mount) else {
        return;
    };
    debug!(?delay, "Reveal intro started");
    tokio::time::sleep(delay).await;

    let Some(animation) = shared.step(RevealSequencer::intro_elapsed) else {
        return;
    };
    debug!(duration = ?animation.duration, "Title moving to header");
    tokio::time::sleep(animation.duration).await;

    if let Some(fades) = shared.step(RevealSequencer::transform_finished) {
        debug!("Content revealed");
        on_complete(fades);
    }
}

/// Handle to a running reveal. Dropping it tears the reveal down.
pub struct RevealHandle {
    shared: Arc<Shared>,
    task: JoinHandle<()>,
}

impl RevealHandle {
    /// Current state.
    #[must_use]
    pub fn state(&self) -> RevealState {
        *self.shared.state.borrow()
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> RevealPhase {
        self.state().phase
    }

    /// Whether the browse content is visible.
    #[must_use]
    pub fn content_visible(&self) -> bool {
        self.state().content_visible
    }

    /// Receiver that sees every state change.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<RevealState> {
        self.shared.state.subscribe()
    }

    /// Wait for the reveal to finish. Returns `true` if the content was
    /// revealed, `false` if it was torn down first.
    pub async fn finished(&self) -> bool {
        let mut rx = self.subscribe();
        rx.wait_for(|state| state.phase.is_terminal())
            .await
            .map(|state| state.content_visible)
            .unwrap_or(false)
    }

    /// Cancel any pending stage. A completed reveal is unaffected.
    pub fn teardown(&self) {
        self.task.abort();
        if self.shared.step(RevealSequencer::teardown) {
            debug!("Reveal torn down before completion");
        }
    }
}

impl Drop for RevealHandle {
    fn drop(&mut self) {
        self.teardown();
    }
}
