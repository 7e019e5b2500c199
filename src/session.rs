use std::time::Duration;
use tokio::sync::{broadcast, watch};
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{debug, info};

use crate::analysis::Analyzer;
use crate::scoring::{FrameSignal, Jitter};
use crate::AnalysisResult;

const RESULT_BUFFER: usize = 32;

pub trait FrameSource {
    fn next_frame(&mut self) -> Option<FrameSignal>;
}

#[derive(Debug, Clone, Copy)]
pub struct SyntheticCamera {
    width: u32,
    height: u32,
}

impl SyntheticCamera {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl FrameSource for SyntheticCamera {
    fn next_frame(&mut self) -> Option<FrameSignal> {
        Some(FrameSignal::new(self.width, self.height))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Running,
    Hidden,
    Stopped,
}

/// Periodic face analysis while a camera is active. Hiding suspends the
/// interval so no ticks queue up; dropping the session stops it.
pub struct CaptureSession {
    state: watch::Sender<SessionState>,
    results: broadcast::Sender<AnalysisResult>,
    task: Option<JoinHandle<()>>,
}

impl CaptureSession {
    pub fn start<J, F>(analyzer: Analyzer<J>, frames: F, period: Duration) -> Self
    where
        J: Jitter + Send + 'static,
        F: FrameSource + Send + 'static,
    {
        let (state, state_rx) = watch::channel(SessionState::Running);
        let (results, _) = broadcast::channel(RESULT_BUFFER);
        let task = tokio::spawn(run_session(
            analyzer,
            frames,
            period,
            state_rx,
            results.clone(),
        ));
        info!(period_ms = period.as_millis() as u64, "capture session started");

        Self {
            state,
            results,
            task: Some(task),
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<AnalysisResult> {
        self.results.subscribe()
    }

    pub fn state(&self) -> SessionState {
        *self.state.borrow()
    }

    pub fn set_visible(&self, visible: bool) {
        let next = if visible {
            SessionState::Running
        } else {
            SessionState::Hidden
        };
        self.state.send_if_modified(|current| {
            if *current == SessionState::Stopped || *current == next {
                return false;
            }
            *current = next;
            true
        });
    }

    pub async fn stop(mut self) {
        self.state.send_replace(SessionState::Stopped);
        if let Some(task) = self.task.take() {
            let _ = task.await;
        }
        info!("capture session stopped");
    }
}

impl Drop for CaptureSession {
    fn drop(&mut self) {
        self.state.send_replace(SessionState::Stopped);
    }
}

async fn run_session<J, F>(
    mut analyzer: Analyzer<J>,
    mut frames: F,
    period: Duration,
    mut state: watch::Receiver<SessionState>,
    results: broadcast::Sender<AnalysisResult>,
) where
    J: Jitter,
    F: FrameSource,
{
    loop {
        let current = *state.borrow_and_update();
        match current {
            SessionState::Stopped => return,
            SessionState::Hidden => {
                debug!("capture session paused");
                if state.changed().await.is_err() {
                    return;
                }
                continue;
            }
            SessionState::Running => {}
        }

        let mut ticker = time::interval_at(Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    let Some(frame) = frames.next_frame() else {
                        continue;
                    };
                    if !frame.is_ready() {
                        debug!("frame not ready, skipping tick");
                        continue;
                    }
                    let result = analyzer.analyze_face(&frame);
                    let _ = results.send(result);
                }
                changed = state.changed() => {
                    if changed.is_err() {
                        return;
                    }
                    break;
                }
            }
        }
    }
}
