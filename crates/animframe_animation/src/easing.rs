//! Easing functions for animations
//!
//! Every curve uses the classic `(t, b, c, d)` signature: elapsed time `t`
//! out of a total `d`, mapped onto a value that starts at `b` and moves by
//! `c`. The controller always evaluates curves with the unit envelope
//! `(progress, 0, 1, 1)`, see [`Easing::apply`].

use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

use serde::{de, ser, Deserialize, Deserializer, Serialize, Serializer};

use crate::error::ConfigError;

/// Signature of a caller-supplied easing curve: `(t, b, c, d) -> value`
pub type EasingFn = fn(f64, f64, f64, f64) -> f64;

/// Easing used when a configuration does not name one
pub const DEFAULT_EASING: Easing = Easing::Swing;

/// Overshoot amount shared by the back curves
const BACK_OVERSHOOT: f64 = 1.70158;

/// Easing function type
#[derive(Clone, Copy, Debug, Default)]
pub enum Easing {
    Linear,
    #[default]
    Swing,
    EaseInQuad,
    EaseOutQuad,
    EaseInOutQuad,
    EaseInCubic,
    EaseOutCubic,
    EaseInOutCubic,
    EaseInQuart,
    EaseOutQuart,
    EaseInOutQuart,
    EaseInQuint,
    EaseOutQuint,
    EaseInOutQuint,
    EaseInSine,
    EaseOutSine,
    EaseInOutSine,
    EaseInExpo,
    EaseOutExpo,
    EaseInOutExpo,
    EaseInCirc,
    EaseOutCirc,
    EaseInOutCirc,
    EaseInElastic,
    EaseOutElastic,
    EaseInOutElastic,
    EaseInBack,
    EaseOutBack,
    EaseInOutBack,
    EaseInBounce,
    EaseOutBounce,
    EaseInOutBounce,
    /// Any function with the `(t, b, c, d)` signature
    Custom(EasingFn),
}

impl Easing {
    /// Every named curve, in table order
    pub const ALL: [Easing; 32] = [
        Easing::Linear,
        Easing::Swing,
        Easing::EaseInQuad,
        Easing::EaseOutQuad,
        Easing::EaseInOutQuad,
        Easing::EaseInCubic,
        Easing::EaseOutCubic,
        Easing::EaseInOutCubic,
        Easing::EaseInQuart,
        Easing::EaseOutQuart,
        Easing::EaseInOutQuart,
        Easing::EaseInQuint,
        Easing::EaseOutQuint,
        Easing::EaseInOutQuint,
        Easing::EaseInSine,
        Easing::EaseOutSine,
        Easing::EaseInOutSine,
        Easing::EaseInExpo,
        Easing::EaseOutExpo,
        Easing::EaseInOutExpo,
        Easing::EaseInCirc,
        Easing::EaseOutCirc,
        Easing::EaseInOutCirc,
        Easing::EaseInElastic,
        Easing::EaseOutElastic,
        Easing::EaseInOutElastic,
        Easing::EaseInBack,
        Easing::EaseOutBack,
        Easing::EaseInOutBack,
        Easing::EaseInBounce,
        Easing::EaseOutBounce,
        Easing::EaseInOutBounce,
    ];

    /// Table name of the curve (`"custom"` for caller-supplied functions)
    pub fn name(&self) -> &'static str {
        match self {
            Easing::Linear => "linear",
            Easing::Swing => "swing",
            Easing::EaseInQuad => "easeInQuad",
            Easing::EaseOutQuad => "easeOutQuad",
            Easing::EaseInOutQuad => "easeInOutQuad",
            Easing::EaseInCubic => "easeInCubic",
            Easing::EaseOutCubic => "easeOutCubic",
            Easing::EaseInOutCubic => "easeInOutCubic",
            Easing::EaseInQuart => "easeInQuart",
            Easing::EaseOutQuart => "easeOutQuart",
            Easing::EaseInOutQuart => "easeInOutQuart",
            Easing::EaseInQuint => "easeInQuint",
            Easing::EaseOutQuint => "easeOutQuint",
            Easing::EaseInOutQuint => "easeInOutQuint",
            Easing::EaseInSine => "easeInSine",
            Easing::EaseOutSine => "easeOutSine",
            Easing::EaseInOutSine => "easeInOutSine",
            Easing::EaseInExpo => "easeInExpo",
            Easing::EaseOutExpo => "easeOutExpo",
            Easing::EaseInOutExpo => "easeInOutExpo",
            Easing::EaseInCirc => "easeInCirc",
            Easing::EaseOutCirc => "easeOutCirc",
            Easing::EaseInOutCirc => "easeInOutCirc",
            Easing::EaseInElastic => "easeInElastic",
            Easing::EaseOutElastic => "easeOutElastic",
            Easing::EaseInOutElastic => "easeInOutElastic",
            Easing::EaseInBack => "easeInBack",
            Easing::EaseOutBack => "easeOutBack",
            Easing::EaseInOutBack => "easeInOutBack",
            Easing::EaseInBounce => "easeInBounce",
            Easing::EaseOutBounce => "easeOutBounce",
            Easing::EaseInOutBounce => "easeInOutBounce",
            Easing::Custom(_) => "custom",
        }
    }

    /// Look up a named curve
    pub fn from_name(name: &str) -> Option<Easing> {
        Self::ALL.iter().copied().find(|easing| easing.name() == name)
    }

    /// Evaluate the curve with the unit envelope `(progress, 0, 1, 1)`
    pub fn apply(&self, progress: f64) -> f64 {
        self.ease(progress, 0.0, 1.0, 1.0)
    }

    /// Evaluate the curve with an explicit `(t, b, c, d)` envelope
    pub fn ease(&self, t: f64, b: f64, c: f64, d: f64) -> f64 {
        match self {
            Easing::Linear => c * t / d + b,
            Easing::Swing => c * (0.5 - (t / d * PI).cos() / 2.0) + b,
            Easing::EaseInQuad => {
                let t = t / d;
                c * t * t + b
            }
            Easing::EaseOutQuad => {
                let t = t / d;
                -c * t * (t - 2.0) + b
            }
            Easing::EaseInOutQuad => {
                let t = t / (d / 2.0);
                if t < 1.0 {
                    c / 2.0 * t * t + b
                } else {
                    let t = t - 1.0;
                    -c / 2.0 * (t * (t - 2.0) - 1.0) + b
                }
            }
            Easing::EaseInCubic => c * (t / d).powi(3) + b,
            Easing::EaseOutCubic => c * ((t / d - 1.0).powi(3) + 1.0) + b,
            Easing::EaseInOutCubic => {
                let t = t / (d / 2.0);
                if t < 1.0 {
                    c / 2.0 * t.powi(3) + b
                } else {
                    c / 2.0 * ((t - 2.0).powi(3) + 2.0) + b
                }
            }
            Easing::EaseInQuart => c * (t / d).powi(4) + b,
            Easing::EaseOutQuart => -c * ((t / d - 1.0).powi(4) - 1.0) + b,
            Easing::EaseInOutQuart => {
                let t = t / (d / 2.0);
                if t < 1.0 {
                    c / 2.0 * t.powi(4) + b
                } else {
                    -c / 2.0 * ((t - 2.0).powi(4) - 2.0) + b
                }
            }
            Easing::EaseInQuint => c * (t / d).powi(5) + b,
            Easing::EaseOutQuint => c * ((t / d - 1.0).powi(5) + 1.0) + b,
            Easing::EaseInOutQuint => {
                let t = t / (d / 2.0);
                if t < 1.0 {
                    c / 2.0 * t.powi(5) + b
                } else {
                    c / 2.0 * ((t - 2.0).powi(5) + 2.0) + b
                }
            }
            Easing::EaseInSine => -c * (t / d * (PI / 2.0)).cos() + c + b,
            Easing::EaseOutSine => c * (t / d * (PI / 2.0)).sin() + b,
            Easing::EaseInOutSine => -c / 2.0 * ((PI * t / d).cos() - 1.0) + b,
            Easing::EaseInExpo => {
                if t == 0.0 {
                    b
                } else {
                    c * 2f64.powf(10.0 * (t / d - 1.0)) + b
                }
            }
            Easing::EaseOutExpo => {
                if t == d {
                    b + c
                } else {
                    c * (1.0 - 2f64.powf(-10.0 * t / d)) + b
                }
            }
            Easing::EaseInOutExpo => {
                if t == 0.0 {
                    return b;
                }
                if t == d {
                    return b + c;
                }
                let t = t / (d / 2.0);
                if t < 1.0 {
                    c / 2.0 * 2f64.powf(10.0 * (t - 1.0)) + b
                } else {
                    c / 2.0 * (2.0 - 2f64.powf(-10.0 * (t - 1.0))) + b
                }
            }
            Easing::EaseInCirc => {
                let t = t / d;
                -c * ((1.0 - t * t).sqrt() - 1.0) + b
            }
            Easing::EaseOutCirc => {
                let t = t / d - 1.0;
                c * (1.0 - t * t).sqrt() + b
            }
            Easing::EaseInOutCirc => {
                let t = t / (d / 2.0);
                if t < 1.0 {
                    -c / 2.0 * ((1.0 - t * t).sqrt() - 1.0) + b
                } else {
                    let t = t - 2.0;
                    c / 2.0 * ((1.0 - t * t).sqrt() + 1.0) + b
                }
            }
            Easing::EaseInElastic => {
                if t == 0.0 {
                    return b;
                }
                let t = t / d;
                if t == 1.0 {
                    return b + c;
                }
                let period = d * 0.3;
                let shift = period / 4.0;
                let t = t - 1.0;
                -(c * 2f64.powf(10.0 * t) * ((t * d - shift) * (2.0 * PI) / period).sin()) + b
            }
            Easing::EaseOutElastic => {
                if t == 0.0 {
                    return b;
                }
                let t = t / d;
                if t == 1.0 {
                    return b + c;
                }
                let period = d * 0.3;
                let shift = period / 4.0;
                c * 2f64.powf(-10.0 * t) * ((t * d - shift) * (2.0 * PI) / period).sin() + c + b
            }
            Easing::EaseInOutElastic => {
                if t == 0.0 {
                    return b;
                }
                let t = t / (d / 2.0);
                if t == 2.0 {
                    return b + c;
                }
                let period = d * (0.3 * 1.5);
                let shift = period / 4.0;
                let t = t - 1.0;
                let wave = ((t * d - shift) * (2.0 * PI) / period).sin();
                if t < 0.0 {
                    -0.5 * (c * 2f64.powf(10.0 * t) * wave) + b
                } else {
                    c * 2f64.powf(-10.0 * t) * wave * 0.5 + c + b
                }
            }
            Easing::EaseInBack => {
                let s = BACK_OVERSHOOT;
                let t = t / d;
                c * t * t * ((s + 1.0) * t - s) + b
            }
            Easing::EaseOutBack => {
                let s = BACK_OVERSHOOT;
                let t = t / d - 1.0;
                c * (t * t * ((s + 1.0) * t + s) + 1.0) + b
            }
            Easing::EaseInOutBack => {
                let s = BACK_OVERSHOOT * 1.525;
                let t = t / (d / 2.0);
                if t < 1.0 {
                    c / 2.0 * (t * t * ((s + 1.0) * t - s)) + b
                } else {
                    let t = t - 2.0;
                    c / 2.0 * (t * t * ((s + 1.0) * t + s) + 2.0) + b
                }
            }
            Easing::EaseInBounce => bounce_in(t, b, c, d),
            Easing::EaseOutBounce => bounce_out(t, b, c, d),
            Easing::EaseInOutBounce => {
                if t < d / 2.0 {
                    bounce_in(t * 2.0, 0.0, c, d) * 0.5 + b
                } else {
                    bounce_out(t * 2.0 - d, 0.0, c, d) * 0.5 + c * 0.5 + b
                }
            }
            Easing::Custom(f) => f(t, b, c, d),
        }
    }
}

fn bounce_out(t: f64, b: f64, c: f64, d: f64) -> f64 {
    let t = t / d;
    if t < 1.0 / 2.75 {
        c * (7.5625 * t * t) + b
    } else if t < 2.0 / 2.75 {
        let t = t - 1.5 / 2.75;
        c * (7.5625 * t * t + 0.75) + b
    } else if t < 2.5 / 2.75 {
        let t = t - 2.25 / 2.75;
        c * (7.5625 * t * t + 0.9375) + b
    } else {
        let t = t - 2.625 / 2.75;
        c * (7.5625 * t * t + 0.984375) + b
    }
}

fn bounce_in(t: f64, b: f64, c: f64, d: f64) -> f64 {
    c - bounce_out(d - t, 0.0, c, d) + b
}

impl From<EasingFn> for Easing {
    fn from(f: EasingFn) -> Self {
        Easing::Custom(f)
    }
}

impl FromStr for Easing {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Easing::from_name(s).ok_or_else(|| ConfigError::UnknownEasing(s.to_string()))
    }
}

impl fmt::Display for Easing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Named curves serialize as their table name. `Custom` has no name to
/// round-trip through and is rejected.
impl Serialize for Easing {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Easing::Custom(_) => Err(ser::Error::custom("custom easing curves have no name")),
            named => serializer.serialize_str(named.name()),
        }
    }
}

impl<'de> Deserialize<'de> for Easing {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        name.parse().map_err(de::Error::custom)
    }
}
