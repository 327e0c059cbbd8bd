//! Terminal playback
//!
//! Plays an [`AnimationFile`] against the wall clock, drawing one progress
//! bar per frame.

use std::io::{self, Write};
use std::rc::Rc;
use std::thread;
use std::time::Duration;

use animframe_animation::{
    AnimationController, Clock, Easing, FrameLoop, Pacing, SystemClock,
};
use anyhow::Result;

use crate::config::{AnimationFile, DisplayConfig};

/// Options for a single `play` invocation
#[derive(Debug, Clone, Copy, Default)]
pub struct PlayOptions {
    /// Use the fixed-interval timer instead of display pacing
    pub timer_fallback: bool,
    /// Force the animation to its end after this much wall time
    pub stop_after: Option<Duration>,
}

/// Summary printed after playback
#[derive(Debug, Clone, Copy)]
pub struct PlayReport {
    pub frames: u64,
    pub wall_time: Duration,
    pub forced: bool,
}

/// Play the animation until it finishes or `stop_after` elapses
pub fn play(file: AnimationFile, options: PlayOptions) -> Result<PlayReport> {
    let display = file.display;
    let config = file.animation.into_config()?;
    tracing::info!(
        duration_ms = config.duration_ms(),
        easing = %config.easing_curve(),
        iteration = %config.repeat(),
        "playing animation"
    );

    let width = display.width;
    let fill = display.fill;
    let config = config
        .on_begin(|anim| {
            println!("begin (iteration {})", anim.iteration_count() + 1);
        })
        .on_frame(move |progress, eased, _| {
            print!("\r{}", render_bar(progress, eased, width, fill));
            let _ = io::stdout().flush();
        })
        .on_pause(|anim| println!("\npaused at {:.0} ms", anim.elapsed_ms()))
        .on_finish(|_| println!("\nfinish"));

    let clock = Rc::new(SystemClock::new());
    let frames = Rc::new(FrameLoop::for_platform(clock.clone(), !options.timer_fallback));
    let anim = AnimationController::new(config, frames.clone(), clock.clone());

    anim.run();
    let mut forced = false;
    while frames.has_pending() {
        if let Some(limit) = options.stop_after {
            if clock.now() >= limit {
                tracing::info!(limit_ms = limit.as_millis() as u64, "stop-after reached, jumping to end");
                anim.stop(true);
                forced = true;
                break;
            }
        }

        let wait = match frames.pacing() {
            Pacing::Display => frames.frame_interval(),
            Pacing::Fixed(_) => frames.time_until_next().unwrap_or_default(),
        };
        thread::sleep(wait);
        frames.pump();
    }

    Ok(PlayReport {
        frames: frames.frames_fired(),
        wall_time: clock.now(),
        forced,
    })
}

/// Print `samples` evenly spaced points of a curve as bars
pub fn sample(easing: Easing, samples: usize, display: &DisplayConfig) {
    let samples = samples.max(2);
    for i in 0..samples {
        let t = i as f64 / (samples - 1) as f64;
        println!("{}", render_bar(t, easing.apply(t), display.width, display.fill));
    }
}

/// Render `[####    ] 0.50 -> 0.25`. Overshooting values are clamped for the
/// bar but printed as-is.
pub fn render_bar(progress: f64, eased: f64, width: usize, fill: char) -> String {
    let filled = ((eased.clamp(0.0, 1.0) * width as f64).round() as usize).min(width);
    let mut bar = String::with_capacity(width + 24);
    bar.push('[');
    bar.extend(std::iter::repeat(fill).take(filled));
    bar.extend(std::iter::repeat(' ').take(width - filled));
    bar.push(']');
    bar.push_str(&format!(" {:.2} -> {:.3}", progress, eased));
    bar
}
