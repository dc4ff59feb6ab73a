//! Host-owned frame driver
//!
//! The browser calls back once per display refresh; the driver turns those
//! callbacks into simulation ticks. Whether another callback gets scheduled
//! is decided by one explicit flag, so stopping is a state change the host can
//! test rather than a handle it has to remember to clear.

use crate::sim::{FrameReport, GameState, RunPhase, SceneSink, TickInput, tick};

/// Result of one host callback
#[derive(Debug, Clone, PartialEq)]
pub enum FrameOutcome {
    /// Driver is stopped; nothing ran
    Stopped,
    /// Rendering host missing; nothing ran
    Skipped,
    Ticked(FrameReport),
}

#[derive(Debug, Clone, Default)]
pub struct FrameDriver {
    running: bool,
    /// Set once the host is gone; `start` is ignored afterwards
    closed: bool,
    last_time_ms: Option<f64>,
}

impl FrameDriver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin scheduling frames. Returns `false` if the driver was shut down.
    pub fn start(&mut self) -> bool {
        if self.closed {
            return false;
        }
        self.running = true;
        self.last_time_ms = None;
        true
    }

    pub fn stop(&mut self) {
        self.running = false;
        self.last_time_ms = None;
    }

    /// Stop for good; the rendering host has been released
    pub fn shutdown(&mut self) {
        self.stop();
        self.closed = true;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Run one frame at host time `now_ms`.
    ///
    /// The first frame after `start` has a zero delta. The driver stops
    /// itself when the run leaves the running phase.
    pub fn frame<S: SceneSink + ?Sized>(
        &mut self,
        now_ms: f64,
        state: &mut GameState,
        input: &TickInput,
        sink: Option<&mut S>,
    ) -> FrameOutcome {
        if !self.running {
            return FrameOutcome::Stopped;
        }
        let Some(sink) = sink else {
            return FrameOutcome::Skipped;
        };

        let dt = match self.last_time_ms {
            Some(last) => ((now_ms - last) / 1000.0).max(0.0) as f32,
            None => 0.0,
        };
        self.last_time_ms = Some(now_ms);

        let report = tick(state, input, dt, sink);
        if state.phase != RunPhase::Running {
            log::info!("Run ended after {} frames, loop halted", state.frames);
            self.stop();
        }
        FrameOutcome::Ticked(report)
    }
}
