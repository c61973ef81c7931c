//! Playback sequencer for algorithm timelines.
//!
//! A [`Sequencer`] owns the playback state of one structure:
//!
//! ```text
//! Idle ──start──▶ Running ──last frame──▶ Idle
//!                    │
//!                    └──cancel / drop──▶ Cancelled ──start──▶ Running
//! ```
//!
//! Starting while Running is rejected with [`Error::AlreadyRunning`]; the
//! sequence already playing is never interrupted by a new request.
//!
//! Playback is cooperative. [`Run::play`] sleeps for the interval before each
//! frame and yields to the runtime in between; it never runs concurrently
//! with itself. Cancellation takes effect at frame boundaries: once
//! [`Sequencer::cancel`] returns, no further frame is published.

use std::sync::Arc;
use std::time::Duration;

use arbor_algorithms::Algorithm;
use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tracing::{info, trace, warn};

use crate::error::{Error, Result};
use crate::frames::{Frame, Highlight, Sequence};

/// Current state of playback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PlaybackState {
    /// Nothing is playing
    #[default]
    Idle,
    /// A sequence is being delivered
    Running,
    /// The last sequence was cancelled before its end
    Cancelled,
}

/// Playback status for observers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaybackStatus {
    pub state: PlaybackState,
    /// Number of the current (or last) run; 0 before the first start.
    pub run: u64,
    pub algorithm: Option<Algorithm>,
    /// Frames published so far in this run.
    pub delivered: usize,
    /// Frames in this run.
    pub total: usize,
}

impl PlaybackStatus {
    /// Whether `run` is the run currently playing.
    pub fn is_running(&self, run: u64) -> bool {
        self.state == PlaybackState::Running && self.run == run
    }

    /// Calculate progress as a fraction (0.0 - 1.0).
    pub fn progress(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.delivered as f64 / self.total as f64
        }
    }
}

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    /// Every frame was delivered.
    Completed { delivered: usize },
    /// Playback stopped early.
    Cancelled { delivered: usize },
}

impl Outcome {
    pub fn delivered(&self) -> usize {
        match self {
            Outcome::Completed { delivered } | Outcome::Cancelled { delivered } => *delivered,
        }
    }
}

/// What a run hands to its consumer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Delivery<'a> {
    /// A frame was published; its highlight replaces the previous one.
    Frame { index: usize, frame: &'a Frame },
    /// The run ended and all highlights were cleared.
    Cleared(Outcome),
}

struct Shared {
    status: watch::Sender<PlaybackStatus>,
    highlight: watch::Sender<Highlight>,
}

/// Drives one sequence at a time for a single structure.
///
/// Cloning yields another handle to the same sequencer.
#[derive(Clone)]
pub struct Sequencer {
    shared: Arc<Shared>,
}

impl Default for Sequencer {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Sequencer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Sequencer")
            .field("status", &*self.shared.status.borrow())
            .finish()
    }
}

impl Sequencer {
    /// Create an idle sequencer.
    pub fn new() -> Self {
        let (status, _) = watch::channel(PlaybackStatus::default());
        let (highlight, _) = watch::channel(Highlight::default());
        Self {
            shared: Arc::new(Shared { status, highlight }),
        }
    }

    /// Arm a run of `sequence`, pacing frames `interval` apart.
    ///
    /// The transition to Running happens here, synchronously; the returned
    /// [`Run`] must then be driven with [`Run::play`]. Fails with
    /// [`Error::AlreadyRunning`] if another run is in flight.
    pub fn start<F>(&self, sequence: Sequence, interval: Duration, on_event: F) -> Result<Run<F>>
    where
        F: FnMut(Delivery<'_>) + Send,
    {
        let algorithm = sequence.algorithm();
        let total = sequence.len();
        let mut run = 0;

        let started = self.shared.status.send_if_modified(|status| {
            if status.state == PlaybackState::Running {
                return false;
            }
            run = status.run + 1;
            *status = PlaybackStatus {
                state: PlaybackState::Running,
                run,
                algorithm: Some(algorithm),
                delivered: 0,
                total,
            };
            true
        });

        if !started {
            warn!(%algorithm, "playback rejected: another sequence is running");
            return Err(Error::AlreadyRunning);
        }

        self.shared.highlight.send_replace(Highlight::default());
        info!(run, %algorithm, frames = total, ?interval, "playback started");

        Ok(Run {
            guard: RunGuard {
                shared: Arc::clone(&self.shared),
                run,
            },
            status: self.shared.status.subscribe(),
            frames: sequence.into_frames(),
            interval,
            on_event,
        })
    }

    /// Cancel the running sequence and clear highlights.
    ///
    /// Returns `false` (and does nothing) if nothing is running.
    pub fn cancel(&self) -> bool {
        let highlight = &self.shared.highlight;
        let cancelled = self.shared.status.send_if_modified(|status| {
            if status.state != PlaybackState::Running {
                return false;
            }
            status.state = PlaybackState::Cancelled;
            highlight.send_replace(Highlight::default());
            true
        });

        if cancelled {
            info!(run = self.shared.status.borrow().run, "playback cancelled");
        }
        cancelled
    }

    /// Whether a sequence is currently running.
    pub fn is_running(&self) -> bool {
        self.shared.status.borrow().state == PlaybackState::Running
    }

    /// Snapshot of the current status.
    pub fn status(&self) -> PlaybackStatus {
        self.shared.status.borrow().clone()
    }

    /// The highlight currently published.
    pub fn highlight(&self) -> Highlight {
        self.shared.highlight.borrow().clone()
    }

    /// Watch highlight snapshots as they are published.
    pub fn subscribe(&self) -> watch::Receiver<Highlight> {
        self.shared.highlight.subscribe()
    }

    /// Watch status changes.
    pub fn watch_status(&self) -> watch::Receiver<PlaybackStatus> {
        self.shared.status.subscribe()
    }
}

/// Ties the Running state to the lifetime of a [`Run`].
///
/// Dropping a run that is still Running (never played, or its `play` future
/// aborted) cancels it so the sequencer does not stay locked.
struct RunGuard {
    shared: Arc<Shared>,
    run: u64,
}

impl RunGuard {
    /// Publish a frame if this run is still current.
    fn publish(&self, frame: &Frame) -> bool {
        let highlight = &self.shared.highlight;
        self.shared.status.send_if_modified(|status| {
            if !status.is_running(self.run) {
                return false;
            }
            highlight.send_replace(frame.highlight.clone());
            status.delivered += 1;
            true
        })
    }

    /// Move from Running to `next`, clearing highlights. Returns whether
    /// this run was still current.
    fn end(&self, next: PlaybackState) -> bool {
        let highlight = &self.shared.highlight;
        self.shared.status.send_if_modified(|status| {
            if !status.is_running(self.run) {
                return false;
            }
            status.state = next;
            highlight.send_replace(Highlight::default());
            true
        })
    }
}

impl Drop for RunGuard {
    fn drop(&mut self) {
        if self.end(PlaybackState::Cancelled) {
            warn!(run = self.run, "playback dropped while running");
        }
    }
}

/// An armed playback of one sequence.
pub struct Run<F> {
    guard: RunGuard,
    status: watch::Receiver<PlaybackStatus>,
    frames: Vec<Frame>,
    interval: Duration,
    on_event: F,
}

impl<F> Run<F>
where
    F: FnMut(Delivery<'_>) + Send,
{
    /// Run number assigned at start.
    pub fn id(&self) -> u64 {
        self.guard.run
    }

    /// Number of frames to deliver.
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Deliver every frame, `interval` apart, until done or cancelled.
    ///
    /// The last frame stays published for one more interval before the
    /// highlight is cleared. A cancel wakes the pending delay at once rather
    /// than letting it run out. Always finishes with [`Delivery::Cleared`].
    pub async fn play(self) -> Outcome {
        let Run {
            guard,
            mut status,
            frames,
            interval,
            mut on_event,
        } = self;
        let mut delivered = 0;

        for (index, frame) in frames.iter().enumerate() {
            pause(&mut status, guard.run, interval).await;
            if !guard.publish(frame) {
                break;
            }
            delivered += 1;
            trace!(run = guard.run, index, "frame delivered");
            on_event(Delivery::Frame { index, frame });
        }

        // Hold the final frame like every other one.
        if delivered > 0 && delivered == frames.len() {
            pause(&mut status, guard.run, interval).await;
        }

        let outcome = if guard.end(PlaybackState::Idle) {
            info!(run = guard.run, delivered, "playback completed");
            Outcome::Completed { delivered }
        } else {
            Outcome::Cancelled { delivered }
        };
        on_event(Delivery::Cleared(outcome));
        outcome
    }
}

/// Resolves once `run` is no longer the running sequence.
async fn superseded(status: &mut watch::Receiver<PlaybackStatus>, run: u64) {
    let _ = status.wait_for(|s| !s.is_running(run)).await;
}

/// Sleep for `interval`, waking early if `run` stops running.
async fn pause(status: &mut watch::Receiver<PlaybackStatus>, run: u64, interval: Duration) {
    tokio::select! {
        _ = tokio::time::sleep(interval) => {}
        _ = superseded(status, run) => {}
    }
}
