//! animframe Animation Driver
//!
//! Time-steps a single animation from progress 0 to 1 and fires lifecycle
//! callbacks around it.
//!
//! # Features
//!
//! - **Controller**: run / pause / resume / stop with repeat budgets
//! - **Easing Table**: the classic `(t, b, c, d)` curves, plus custom functions
//! - **Callback Slots**: one handler or an ordered list per lifecycle event
//! - **Injected Timing**: clocks and frame schedulers are swappable, so the
//!   same controller runs against a display loop, a timer, or a test clock
//!
//! # Example
//!
//! ```rust
//! use std::rc::Rc;
//! use animframe_animation::{AnimationConfig, AnimationController, FrameLoop, ManualClock, Speed};
//!
//! let clock = Rc::new(ManualClock::new());
//! let frames = Rc::new(FrameLoop::display(clock.clone()));
//!
//! let config = AnimationConfig::new(Speed::Fast)
//!     .on_frame(|progress, eased, _| println!("{progress:.2} -> {eased:.2}"));
//! let anim = AnimationController::new(config, frames.clone(), clock.clone());
//!
//! assert!(anim.run());
//! while frames.has_pending() {
//!     clock.advance_ms(16);
//!     frames.pump();
//! }
//! assert!(!anim.is_running());
//! ```

pub mod callback;
pub mod clock;
pub mod config;
pub mod controller;
pub mod easing;
pub mod error;
pub mod scheduler;

pub use callback::Callback;
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{
    AnimationConfig, AnimationSpec, Callbacks, FrameHandler, Iteration, IterationValue,
    LifecycleHandler, Speed, SpeedValue, INFINITE,
};
pub use controller::{AnimationController, AnimationState};
pub use easing::{Easing, EasingFn, DEFAULT_EASING};
pub use error::{ConfigError, Result};
pub use scheduler::{FrameCallback, FrameHandle, FrameLoop, FrameScheduler, Pacing, FPS, FRAME_INTERVAL};
