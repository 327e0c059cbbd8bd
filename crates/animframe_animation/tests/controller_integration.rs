//! Integration tests for controller + scheduler + configuration
//!
//! These tests verify that:
//! - A controller driven by a frame loop honours the lifecycle contract
//! - The timer fallback paces steps at the fixed frame interval
//! - Configurations loaded from text drive the controller the same way
//! - Multiple handlers in one slot fire in registration order

use animframe_animation::{
    AnimationConfig, AnimationController, AnimationSpec, Clock, Easing, FrameLoop, Iteration,
    ManualClock, Speed, FRAME_INTERVAL,
};
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_test_writer()
        .try_init();
}

/// Run the frame loop to completion, advancing the clock by `step_ms` per pump
fn drain(clock: &ManualClock, frames: &FrameLoop, step_ms: u64) -> usize {
    let mut fired = 0;
    while frames.has_pending() {
        clock.advance_ms(step_ms);
        fired += frames.pump();
    }
    fired
}

/// 400ms, single play, fixed 16ms steps: the last frame reports 1.0 and
/// finish fires exactly once with nothing left scheduled
#[test]
fn test_single_play_with_fake_clock() {
    init_tracing();
    let clock = Rc::new(ManualClock::new());
    let frames = Rc::new(FrameLoop::display(clock.clone()));

    let progress = Rc::new(RefCell::new(Vec::new()));
    let finished = Rc::new(RefCell::new(0));

    let config = AnimationConfig::new(400u32)
        .iteration(Iteration::Count(1))
        .on_frame({
            let progress = progress.clone();
            move |p, _, _| progress.borrow_mut().push(p)
        })
        .on_finish({
            let finished = finished.clone();
            move |_| *finished.borrow_mut() += 1
        });

    let anim = AnimationController::new(config, frames.clone(), clock.clone());
    assert!(anim.run());
    drain(&clock, &frames, 16);

    let progress = progress.borrow();
    assert_eq!(progress.last(), Some(&1.0));
    assert!(progress[..progress.len() - 1].iter().all(|p| *p < 1.0));
    assert_eq!(*finished.borrow(), 1);
    assert!(frames.is_idle());
    assert!(clock.now() >= Duration::from_millis(400));
}

/// The timer fallback fires one step per elapsed interval
#[test]
fn test_timer_fallback_paces_steps() {
    let clock = Rc::new(ManualClock::new());
    let frames = Rc::new(FrameLoop::fallback(clock.clone()));
    let steps = Rc::new(RefCell::new(0));

    let config = AnimationConfig::new(120u32).on_frame({
        let steps = steps.clone();
        move |_, _, _| *steps.borrow_mut() += 1
    });
    let anim = AnimationController::new(config, frames.clone(), clock.clone());
    anim.run();

    // Pumping faster than the interval does not produce extra steps
    for _ in 0..5 {
        clock.advance_ms(2);
        frames.pump();
    }
    assert_eq!(*steps.borrow(), 0);

    drain(&clock, &frames, FRAME_INTERVAL.as_millis() as u64);
    assert_eq!(*steps.borrow(), 10);
    assert!(!anim.is_running());
}

/// Three iterations: begin and finish fire three times each for one run()
#[test]
fn test_repeat_budget_from_spec() {
    let spec: AnimationSpec = serde_json::from_str(
        r#"{ "speed": "fast", "easing": "easeInOutSine", "iteration": 3 }"#,
    )
    .unwrap();

    let log = Rc::new(RefCell::new(Vec::new()));
    let config = spec
        .into_config()
        .unwrap()
        .on_begin({
            let log = log.clone();
            move |anim| log.borrow_mut().push(format!("begin {}", anim.iteration_count()))
        })
        .on_finish({
            let log = log.clone();
            move |_| log.borrow_mut().push("finish".to_string())
        });
    assert!(matches!(config.easing_curve(), Easing::EaseInOutSine));

    let clock = Rc::new(ManualClock::new());
    let frames = Rc::new(FrameLoop::display(clock.clone()));
    let anim = AnimationController::new(config, frames.clone(), clock.clone());

    anim.run();
    drain(&clock, &frames, 25);

    assert_eq!(
        *log.borrow(),
        vec!["begin 0", "finish", "begin 1", "finish", "begin 2", "finish"]
    );
    assert_eq!(anim.iteration_count(), 0);
}

/// Handlers registered on the same slot run in order with identical arguments
#[test]
fn test_multiple_handlers_share_arguments() {
    let clock = Rc::new(ManualClock::new());
    let frames = Rc::new(FrameLoop::display(clock.clone()));
    let seen = Rc::new(RefCell::new(Vec::new()));

    let config = AnimationConfig::new(Speed::Normal)
        .easing(Easing::Linear)
        .on_frame({
            let seen = seen.clone();
            move |p, e, _| seen.borrow_mut().push(("first", p, e))
        })
        .on_frame({
            let seen = seen.clone();
            move |p, e, _| seen.borrow_mut().push(("second", p, e))
        });
    let anim = AnimationController::new(config, frames.clone(), clock.clone());

    anim.run();
    clock.advance_ms(100);
    frames.pump();
    anim.stop(false);

    assert_eq!(
        *seen.borrow(),
        vec![("first", 0.25, 0.25), ("second", 0.25, 0.25)]
    );
}

/// An infinite animation stopped from its own frame handler ends cleanly
/// without scheduling another cycle
#[test]
fn test_infinite_stopped_from_frame_handler() {
    let clock = Rc::new(ManualClock::new());
    let frames = Rc::new(FrameLoop::display(clock.clone()));
    let cycles = Rc::new(RefCell::new(0));
    let finishes = Rc::new(RefCell::new(0));

    let config = AnimationConfig::new(50u32)
        .iteration(Iteration::Infinite)
        .on_frame({
            let cycles = cycles.clone();
            move |progress, _, anim| {
                if progress >= 1.0 {
                    *cycles.borrow_mut() += 1;
                    if *cycles.borrow() == 5 {
                        anim.stop(false);
                    }
                }
            }
        })
        .on_finish({
            let finishes = finishes.clone();
            move |_| *finishes.borrow_mut() += 1
        });
    let anim = AnimationController::new(config, frames.clone(), clock.clone());

    anim.run();
    let fired = drain(&clock, &frames, 10);

    assert_eq!(*cycles.borrow(), 5);
    assert_eq!(*finishes.borrow(), 5);
    assert_eq!(fired, 25);
    assert!(!anim.is_running());
    assert!(!anim.is_paused());
    assert!(frames.is_idle());
}
