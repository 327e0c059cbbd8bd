//! Animation controller
//!
//! Drives one animation from progress 0 to 1 against an injected [`Clock`]
//! and [`FrameScheduler`], firing lifecycle callbacks along the way.
//!
//! ```text
//! Idle --run--> Running --pause--> Paused --run--> Running
//!   ^              |                  |
//!   +----stop------+-------stop-------+
//! ```
//!
//! Completion of a play-through is a stop followed, budget permitting, by a
//! fresh `run`.

use std::cell::Cell;
use std::rc::{Rc, Weak};
use std::time::Duration;

use crate::callback::dispatch;
use crate::clock::Clock;
use crate::config::AnimationConfig;
use crate::scheduler::{FrameHandle, FrameScheduler};

/// Coarse playback state derived from the running/paused flags
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnimationState {
    Idle,
    Running,
    Paused,
}

/// Lifecycle driver for a single animation.
///
/// Created behind an [`Rc`] so that scheduled time-steps can find their way
/// back to the controller. Every operation takes `&self`, which lets
/// callbacks pause or stop the animation that invoked them.
pub struct AnimationController {
    this: Weak<AnimationController>,
    config: AnimationConfig,
    scheduler: Rc<dyn FrameScheduler>,
    clock: Rc<dyn Clock>,
    running: Cell<bool>,
    paused: Cell<bool>,
    iteration_count: Cell<u32>,
    /// Accumulated active playback, in milliseconds
    play_time_ms: Cell<f64>,
    /// Clock reading at the previous step (or at `run`)
    last_frame: Cell<Duration>,
    pending: Cell<Option<FrameHandle>>,
}

impl AnimationController {
    pub fn new(
        config: AnimationConfig,
        scheduler: Rc<dyn FrameScheduler>,
        clock: Rc<dyn Clock>,
    ) -> Rc<Self> {
        Rc::new_cyclic(|this| Self {
            this: this.clone(),
            config,
            scheduler,
            clock,
            running: Cell::new(false),
            paused: Cell::new(false),
            iteration_count: Cell::new(0),
            play_time_ms: Cell::new(0.0),
            last_frame: Cell::new(Duration::ZERO),
            pending: Cell::new(None),
        })
    }

    /// Start or resume playback.
    ///
    /// Returns `false` without doing anything when already running. A fresh
    /// start fires `begin`; resuming from pause does not.
    pub fn run(&self) -> bool {
        if self.running.get() {
            return false;
        }

        if self.paused.get() {
            self.paused.set(false);
            tracing::debug!(elapsed_ms = self.play_time_ms.get(), "resuming animation");
        } else {
            tracing::debug!(
                duration_ms = self.config.duration_ms(),
                iteration = self.iteration_count.get(),
                "starting animation"
            );
            dispatch(self.config.slots().begin.as_ref(), |begin| begin(self));
        }

        self.running.set(true);
        self.last_frame.set(self.clock.now());
        self.schedule_step();
        true
    }

    /// Freeze playback, keeping elapsed time for a later `run`.
    ///
    /// No-op unless running.
    pub fn pause(&self) {
        if self.paused.get() || !self.running.get() {
            return;
        }

        self.running.set(false);
        self.paused.set(true);
        self.cancel_step();

        tracing::debug!(elapsed_ms = self.play_time_ms.get(), "paused animation");
        dispatch(self.config.slots().pause.as_ref(), |pause| pause(self));
    }

    /// End playback and reset elapsed time. `finish` always fires.
    ///
    /// With `to_end`, a final frame at progress 1 is emitted first. No-op
    /// unless running or paused.
    pub fn stop(&self, to_end: bool) {
        if !self.running.get() && !self.paused.get() {
            return;
        }

        if to_end {
            self.frame(1.0);
        }

        self.running.set(false);
        self.paused.set(false);
        self.play_time_ms.set(0.0);
        self.cancel_step();

        tracing::debug!(to_end, "stopped animation");
        dispatch(self.config.slots().finish.as_ref(), |finish| finish(self));
    }

    pub fn is_running(&self) -> bool {
        self.running.get()
    }

    pub fn is_paused(&self) -> bool {
        self.paused.get()
    }

    pub fn state(&self) -> AnimationState {
        if self.running.get() {
            AnimationState::Running
        } else if self.paused.get() {
            AnimationState::Paused
        } else {
            AnimationState::Idle
        }
    }

    /// Completed play-throughs in the current repeat cycle
    pub fn iteration_count(&self) -> u32 {
        self.iteration_count.get()
    }

    /// Active playback time accumulated so far, in milliseconds
    pub fn elapsed_ms(&self) -> f64 {
        self.play_time_ms.get()
    }

    /// Progress as of the last step, clamped to `[0, 1]`
    pub fn progress(&self) -> f64 {
        (self.play_time_ms.get() / self.config.duration_ms()).clamp(0.0, 1.0)
    }

    pub fn config(&self) -> &AnimationConfig {
        &self.config
    }

    fn schedule_step(&self) {
        let this = self.this.clone();
        let handle = self.scheduler.request_frame(Box::new(move || {
            if let Some(controller) = this.upgrade() {
                controller.step();
            }
        }));
        self.pending.set(Some(handle));
    }

    fn cancel_step(&self) {
        if let Some(handle) = self.pending.take() {
            self.scheduler.cancel_frame(handle);
        }
    }

    fn step(&self) {
        self.pending.set(None);

        let now = self.clock.now();
        let delta = now.saturating_sub(self.last_frame.get());
        let play_time = self.play_time_ms.get() + as_millis_f64(delta);
        self.play_time_ms.set(play_time);

        let progress = (play_time / self.config.duration_ms()).clamp(0.0, 1.0);
        tracing::trace!(progress, elapsed_ms = play_time, "animation step");
        self.frame(progress);

        // A frame handler may have paused, stopped or restarted us. A
        // restart has already scheduled the next step.
        if !self.running.get() || self.pending.get().is_some() {
            return;
        }

        if progress < 1.0 {
            self.last_frame.set(now);
            self.schedule_step();
            return;
        }

        self.stop(false);
        let completed = self.iteration_count.get().saturating_add(1);
        self.iteration_count.set(completed);

        if self.config.repeat().repeats_after(completed) {
            tracing::debug!(iteration = completed, "restarting animation");
            self.run();
        } else {
            self.iteration_count.set(0);
        }
    }

    fn frame(&self, progress: f64) {
        let eased = self.config.easing_curve().apply(progress);
        dispatch(self.config.slots().frame.as_ref(), |frame| {
            frame(progress, eased, self)
        });
    }
}

fn as_millis_f64(duration: Duration) -> f64 {
    duration.as_nanos() as f64 / 1_000_000.0
}

impl std::fmt::Debug for AnimationController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnimationController")
            .field("state", &self.state())
            .field("iteration_count", &self.iteration_count.get())
            .field("elapsed_ms", &self.play_time_ms.get())
            .field("config", &self.config)
            .finish()
    }
}
