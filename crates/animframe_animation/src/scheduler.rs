//! Frame scheduling
//!
//! The controller never touches a platform timer directly. It asks a
//! [`FrameScheduler`] for "call me back next frame" and cancels through the
//! returned [`FrameHandle`]. [`FrameLoop`] is the host-pumped implementation
//! used by the CLI and the tests.

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

use slotmap::{new_key_type, SlotMap};
use smallvec::SmallVec;

use crate::clock::Clock;

/// Target frame rate for the timer fallback
pub const FPS: u32 = 77;

/// Fallback timer interval, `floor(1000 / FPS)` milliseconds
pub const FRAME_INTERVAL: Duration = Duration::from_millis((1000 / FPS) as u64);

new_key_type! {
    /// Handle to a pending frame callback, used only for cancellation
    pub struct FrameHandle;
}

/// Callback run once when its frame comes due
pub type FrameCallback = Box<dyn FnOnce()>;

/// Capability to run a callback roughly one frame from now
pub trait FrameScheduler {
    /// Queue `callback` for the next frame
    fn request_frame(&self, callback: FrameCallback) -> FrameHandle;

    /// Drop a pending callback. Unknown or already-fired handles are ignored.
    fn cancel_frame(&self, handle: FrameHandle);
}

/// When a requested frame comes due
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Pacing {
    /// Frame-synchronized: due on the next pump
    Display,
    /// Timer fallback: due once the interval has elapsed since the request
    Fixed(Duration),
}

struct PendingFrame {
    callback: FrameCallback,
    requested_at: Duration,
}

/// Cooperative, single-threaded frame scheduler driven by [`FrameLoop::pump`]
pub struct FrameLoop {
    clock: Rc<dyn Clock>,
    pacing: Pacing,
    pending: RefCell<SlotMap<FrameHandle, PendingFrame>>,
    frames_fired: Cell<u64>,
}

impl FrameLoop {
    pub fn new(clock: Rc<dyn Clock>, pacing: Pacing) -> Self {
        Self {
            clock,
            pacing,
            pending: RefCell::new(SlotMap::with_key()),
            frames_fired: Cell::new(0),
        }
    }

    /// Frame-synchronized loop
    pub fn display(clock: Rc<dyn Clock>) -> Self {
        Self::new(clock, Pacing::Display)
    }

    /// Fixed-interval timer loop at [`FRAME_INTERVAL`]
    pub fn fallback(clock: Rc<dyn Clock>) -> Self {
        Self::new(clock, Pacing::Fixed(FRAME_INTERVAL))
    }

    /// Prefer display sync, falling back to the fixed-interval timer
    pub fn for_platform(clock: Rc<dyn Clock>, display_sync: bool) -> Self {
        if display_sync {
            Self::display(clock)
        } else {
            tracing::debug!(
                interval_ms = FRAME_INTERVAL.as_millis() as u64,
                "display sync unavailable, using timer fallback"
            );
            Self::fallback(clock)
        }
    }

    pub fn pacing(&self) -> Pacing {
        self.pacing
    }

    /// Nominal time between pumps
    pub fn frame_interval(&self) -> Duration {
        match self.pacing {
            Pacing::Display => FRAME_INTERVAL,
            Pacing::Fixed(interval) => interval,
        }
    }

    /// Fire every frame that is due.
    ///
    /// Frames requested while pumping are never fired by the same pump.
    /// Returns the number of callbacks run.
    pub fn pump(&self) -> usize {
        let now = self.clock.now();
        let due: SmallVec<[FrameHandle; 4]> = self
            .pending
            .borrow()
            .iter()
            .filter(|(_, frame)| self.is_due(frame, now))
            .map(|(handle, _)| handle)
            .collect();

        let mut fired = 0;
        for handle in due {
            // An earlier callback in this pump may have cancelled it.
            let frame = self.pending.borrow_mut().remove(handle);
            let Some(frame) = frame else {
                continue;
            };
            (frame.callback)();
            fired += 1;
        }

        self.frames_fired.set(self.frames_fired.get() + fired as u64);
        fired
    }

    /// Time until the earliest pending frame is due, `None` when idle
    pub fn time_until_next(&self) -> Option<Duration> {
        let now = self.clock.now();
        self.pending
            .borrow()
            .values()
            .map(|frame| match self.pacing {
                Pacing::Display => Duration::ZERO,
                Pacing::Fixed(interval) => (frame.requested_at + interval).saturating_sub(now),
            })
            .min()
    }

    /// Check if any frames are still pending
    pub fn has_pending(&self) -> bool {
        !self.pending.borrow().is_empty()
    }

    pub fn is_idle(&self) -> bool {
        !self.has_pending()
    }

    /// Get the number of pending frames
    pub fn pending_count(&self) -> usize {
        self.pending.borrow().len()
    }

    /// Total callbacks fired since creation
    pub fn frames_fired(&self) -> u64 {
        self.frames_fired.get()
    }

    fn is_due(&self, frame: &PendingFrame, now: Duration) -> bool {
        match self.pacing {
            Pacing::Display => true,
            Pacing::Fixed(interval) => now >= frame.requested_at + interval,
        }
    }
}

impl FrameScheduler for FrameLoop {
    fn request_frame(&self, callback: FrameCallback) -> FrameHandle {
        let requested_at = self.clock.now();
        self.pending.borrow_mut().insert(PendingFrame {
            callback,
            requested_at,
        })
    }

    fn cancel_frame(&self, handle: FrameHandle) {
        if self.pending.borrow_mut().remove(handle).is_some() {
            tracing::trace!(?handle, "cancelled pending frame");
        }
    }
}
