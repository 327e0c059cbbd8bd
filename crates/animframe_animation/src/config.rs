//! Animation configuration
//!
//! [`AnimationConfig`] is the in-code builder handed to
//! [`AnimationController::new`](crate::AnimationController::new).
//! [`AnimationSpec`] is the serde form of the same settings, for animations
//! described in TOML or JSON.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::callback::Callback;
use crate::controller::AnimationController;
use crate::easing::{Easing, DEFAULT_EASING};
use crate::error::{ConfigError, Result};

/// Handler for `begin`, `finish` and `pause`
pub type LifecycleHandler = dyn Fn(&AnimationController);

/// Handler for `frame`: `(progress, eased, controller)`
pub type FrameHandler = dyn Fn(f64, f64, &AnimationController);

/// Keyword for endless repetition
pub const INFINITE: &str = "infinite";

// ============================================================================
// Speed
// ============================================================================

/// Animation duration, either a named preset or milliseconds
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum Speed {
    /// 600 ms
    Slow,
    /// 400 ms
    #[default]
    Normal,
    /// 200 ms
    Fast,
    /// Used as-is, without validation
    Millis(f64),
}

impl Speed {
    /// Resolve to milliseconds
    pub fn millis(self) -> f64 {
        match self {
            Speed::Slow => 600.0,
            Speed::Normal => 400.0,
            Speed::Fast => 200.0,
            Speed::Millis(ms) => ms,
        }
    }

    /// Look up a preset by name
    pub fn from_name(name: &str) -> Option<Speed> {
        match name {
            "slow" => Some(Speed::Slow),
            "normal" => Some(Speed::Normal),
            "fast" => Some(Speed::Fast),
            _ => None,
        }
    }
}

impl From<f64> for Speed {
    fn from(ms: f64) -> Self {
        Speed::Millis(ms)
    }
}

impl From<u32> for Speed {
    fn from(ms: u32) -> Self {
        Speed::Millis(ms as f64)
    }
}

impl From<Duration> for Speed {
    fn from(duration: Duration) -> Self {
        Speed::Millis(duration.as_secs_f64() * 1000.0)
    }
}

impl FromStr for Speed {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self> {
        if let Some(speed) = Speed::from_name(s) {
            return Ok(speed);
        }
        s.trim()
            .parse::<f64>()
            .map(Speed::Millis)
            .map_err(|_| ConfigError::UnknownSpeed(s.to_string()))
    }
}

// ============================================================================
// Iteration
// ============================================================================

/// How many play-throughs one `run()` produces
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Iteration {
    /// Restart after every completion until paused or stopped
    Infinite,
    /// Play this many times; always at least 1 once normalized
    Count(u32),
}

impl Iteration {
    /// Build a count, coercing anything below 1 to a single play
    pub fn count(n: i64) -> Self {
        Iteration::Count(n.clamp(1, u32::MAX as i64) as u32)
    }

    /// Coerce `Count(0)` to `Count(1)`
    pub fn normalized(self) -> Self {
        match self {
            Iteration::Count(0) => Iteration::Count(1),
            other => other,
        }
    }

    /// Whether another play-through follows after `completed` ones
    pub fn repeats_after(self, completed: u32) -> bool {
        match self {
            Iteration::Infinite => true,
            Iteration::Count(n) => n > completed,
        }
    }
}

impl Default for Iteration {
    fn default() -> Self {
        Iteration::Count(1)
    }
}

impl FromStr for Iteration {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self> {
        if s == INFINITE {
            return Ok(Iteration::Infinite);
        }
        s.trim()
            .parse::<i64>()
            .map(Iteration::count)
            .map_err(|_| ConfigError::InvalidIteration(s.to_string()))
    }
}

impl fmt::Display for Iteration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Iteration::Infinite => f.write_str(INFINITE),
            Iteration::Count(n) => write!(f, "{}", n),
        }
    }
}

// ============================================================================
// AnimationConfig
// ============================================================================

/// Lifecycle callback slots, each optional
#[derive(Debug, Default)]
pub struct Callbacks {
    pub begin: Option<Callback<LifecycleHandler>>,
    pub frame: Option<Callback<FrameHandler>>,
    pub finish: Option<Callback<LifecycleHandler>>,
    pub pause: Option<Callback<LifecycleHandler>>,
}

/// Normalized configuration for a single animation
#[derive(Debug)]
pub struct AnimationConfig {
    duration_ms: f64,
    easing: Easing,
    iteration: Iteration,
    callbacks: Callbacks,
}

impl AnimationConfig {
    /// Start a configuration with the given duration; presets resolve here
    pub fn new(speed: impl Into<Speed>) -> Self {
        Self {
            duration_ms: speed.into().millis(),
            easing: DEFAULT_EASING,
            iteration: Iteration::default(),
            callbacks: Callbacks::default(),
        }
    }

    /// Set the easing curve
    pub fn easing(mut self, easing: impl Into<Easing>) -> Self {
        self.easing = easing.into();
        self
    }

    /// Set the repeat budget
    pub fn iteration(mut self, iteration: Iteration) -> Self {
        self.iteration = iteration.normalized();
        self
    }

    /// Add a `begin` handler, fired on every fresh start
    pub fn on_begin<F: Fn(&AnimationController) + 'static>(mut self, handler: F) -> Self {
        let handler: Box<LifecycleHandler> = Box::new(handler);
        self.callbacks.begin = Some(append(self.callbacks.begin.take(), handler));
        self
    }

    /// Add a `frame` handler, fired on every time-step with `(progress, eased, controller)`
    pub fn on_frame<F: Fn(f64, f64, &AnimationController) + 'static>(mut self, handler: F) -> Self {
        let handler: Box<FrameHandler> = Box::new(handler);
        self.callbacks.frame = Some(append(self.callbacks.frame.take(), handler));
        self
    }

    /// Add a `finish` handler, fired on every stop
    pub fn on_finish<F: Fn(&AnimationController) + 'static>(mut self, handler: F) -> Self {
        let handler: Box<LifecycleHandler> = Box::new(handler);
        self.callbacks.finish = Some(append(self.callbacks.finish.take(), handler));
        self
    }

    /// Add a `pause` handler
    pub fn on_pause<F: Fn(&AnimationController) + 'static>(mut self, handler: F) -> Self {
        let handler: Box<LifecycleHandler> = Box::new(handler);
        self.callbacks.pause = Some(append(self.callbacks.pause.take(), handler));
        self
    }

    /// Replace all callback slots at once
    pub fn callbacks(mut self, callbacks: Callbacks) -> Self {
        self.callbacks = callbacks;
        self
    }

    pub fn duration_ms(&self) -> f64 {
        self.duration_ms
    }

    pub fn easing_curve(&self) -> Easing {
        self.easing
    }

    pub fn repeat(&self) -> Iteration {
        self.iteration
    }

    pub(crate) fn slots(&self) -> &Callbacks {
        &self.callbacks
    }
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self::new(Speed::default())
    }
}

fn append<F: ?Sized>(slot: Option<Callback<F>>, handler: Box<F>) -> Callback<F> {
    match slot {
        Some(callback) => callback.push(handler),
        None => Callback::Single(handler),
    }
}

// ============================================================================
// AnimationSpec (serde)
// ============================================================================

/// Duration as written in a config file
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum SpeedValue {
    Millis(f64),
    Named(String),
}

/// Iteration as written in a config file
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum IterationValue {
    Count(i64),
    Named(String),
}

/// Serializable animation description, without callbacks
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct AnimationSpec {
    #[serde(alias = "speed", default = "default_duration")]
    pub duration: SpeedValue,
    #[serde(default)]
    pub easing: Option<String>,
    #[serde(default)]
    pub iteration: Option<IterationValue>,
}

fn default_duration() -> SpeedValue {
    SpeedValue::Named("normal".to_string())
}

impl Default for AnimationSpec {
    fn default() -> Self {
        Self {
            duration: default_duration(),
            easing: None,
            iteration: None,
        }
    }
}

impl AnimationSpec {
    pub fn speed(&self) -> Result<Speed> {
        match &self.duration {
            SpeedValue::Millis(ms) => Ok(Speed::Millis(*ms)),
            SpeedValue::Named(name) => name.parse(),
        }
    }

    pub fn easing(&self) -> Result<Easing> {
        match &self.easing {
            Some(name) => name.parse(),
            None => Ok(DEFAULT_EASING),
        }
    }

    pub fn iteration(&self) -> Result<Iteration> {
        match &self.iteration {
            None => Ok(Iteration::default()),
            Some(IterationValue::Count(n)) => Ok(Iteration::count(*n)),
            Some(IterationValue::Named(name)) => name.parse(),
        }
    }

    /// Resolve names and counts into a callback-free [`AnimationConfig`]
    pub fn into_config(self) -> Result<AnimationConfig> {
        Ok(AnimationConfig::new(self.speed()?)
            .easing(self.easing()?)
            .iteration(self.iteration()?))
    }
}
