use cvarp_engine::{ControlInputs, Engine, EngineSettings};
use cvarp_types::{DirectionMode, MAX_STEPS};

/// Drive the engine with one external clock pulse and return the new step.
fn clock_step(engine: &mut Engine, base: &ControlInputs) -> usize {
    let low = ControlInputs {
        ext_clock: Some(0.0),
        ..*base
    };
    let high = ControlInputs {
        ext_clock: Some(10.0),
        ..*base
    };
    engine.process(&low);
    let out = engine.process(&high);
    assert!(out.advanced);
    out.step
}

fn controls(steps: usize, mode: DirectionMode) -> ControlInputs {
    ControlInputs {
        steps: steps as f32,
        direction: mode.control_value(),
        ..ControlInputs::default()
    }
}

#[test]
fn up_mode_cycles_every_step_count() {
    for n in 1..=MAX_STEPS {
        let mut engine = Engine::default();
        let base = controls(n, DirectionMode::Up);
        let visited: Vec<usize> = (0..n * 3).map(|_| clock_step(&mut engine, &base)).collect();
        let expected: Vec<usize> = (0..n * 3).map(|i| (i + 1) % n).collect();
        assert_eq!(visited, expected, "n={}", n);
    }
}

#[test]
fn up_down_single_step_never_leaves_zero() {
    let mut engine = Engine::default();
    let base = controls(1, DirectionMode::UpDown);
    for _ in 0..50 {
        assert_eq!(clock_step(&mut engine, &base), 0);
    }
}

#[test]
fn up_down_stays_in_range_for_all_step_counts() {
    for n in 1..=MAX_STEPS {
        let mut engine = Engine::default();
        let base = controls(n, DirectionMode::UpDown);
        for _ in 0..40 {
            let step = clock_step(&mut engine, &base);
            assert!(step < n, "n={} step={}", n, step);
        }
    }
}

#[test]
fn up_down_sweeps_back_and_forth() {
    let mut engine = Engine::default();
    let base = controls(5, DirectionMode::UpDown);
    let visited: Vec<usize> = (0..12).map(|_| clock_step(&mut engine, &base)).collect();
    assert_eq!(visited, vec![1, 2, 3, 4, 3, 2, 1, 0, 1, 2, 3, 4]);
}

#[test]
fn random_mode_is_roughly_uniform() {
    let n = 5;
    let trials = 10_000;
    let mut engine = Engine::new(EngineSettings::default().with_seed(0xdead_beef));
    let base = controls(n, DirectionMode::Random);
    let mut counts = [0usize; MAX_STEPS];
    for _ in 0..trials {
        let step = clock_step(&mut engine, &base);
        assert!(step < n);
        counts[step] += 1;
    }
    let expected = trials / n;
    for (step, &count) in counts.iter().enumerate().take(n) {
        let deviation = (count as f64 - expected as f64).abs() / expected as f64;
        assert!(deviation < 0.1, "step {} hit {} times", step, count);
    }
    assert!(counts[n..].iter().all(|&c| c == 0));
}

#[test]
fn reset_while_stopped_forces_a_step() {
    let mut engine = Engine::default();
    let base = controls(8, DirectionMode::Up);
    for _ in 0..3 {
        clock_step(&mut engine, &base);
    }
    assert_eq!(engine.index(), 3);

    // Stop with the run button
    engine.process(&base);
    engine.process(&ControlInputs {
        run_button: 1.0,
        ..base
    });
    assert!(!engine.is_running());

    let internal = ControlInputs {
        clock_rate: 6.0,
        ..base
    };
    for _ in 0..5_000 {
        assert!(!engine.process(&internal).advanced);
    }
    assert_eq!(engine.index(), 3);

    let out = engine.process(&ControlInputs {
        reset_button: 1.0,
        ..internal
    });
    assert!(out.advanced);
    assert_eq!(out.step, 0);
    assert_eq!(engine.phase(), 0.0);
    assert!(!engine.is_running());
    // Stopped: outputs stay silent
    assert!(!out.gate_high());
}

#[test]
fn reset_jack_and_button_are_ored() {
    let mut engine = Engine::default();
    let base = controls(8, DirectionMode::Up);
    for _ in 0..4 {
        clock_step(&mut engine, &base);
    }
    engine.process(&base);
    let out = engine.process(&ControlInputs {
        reset_button: 0.0,
        reset_cv: 5.0,
        ..base
    });
    assert!(out.advanced);
    assert_eq!(out.step, 0);
    // Pressing the button while the jack is still high is not a new edge
    let out = engine.process(&ControlInputs {
        reset_button: 1.0,
        reset_cv: 5.0,
        ..base
    });
    assert!(!out.advanced);
}

#[test]
fn step_count_cv_is_clamped_not_wrapped() {
    let mut engine = Engine::default();
    let base = ControlInputs {
        steps: 6.0,
        steps_cv: 7.0,
        ..controls(6, DirectionMode::Up)
    };
    let visited: Vec<usize> = (0..16).map(|_| clock_step(&mut engine, &base)).collect();
    assert_eq!(*visited.iter().max().unwrap_or(&0), MAX_STEPS - 1);
    assert_eq!(visited[7], 0);
}

#[test]
fn gate_buttons_toggle_mask_during_playback() {
    let mut engine = Engine::default();
    let base = controls(8, DirectionMode::Up);
    engine.process(&base);
    let mut pressed = base;
    pressed.gate_buttons[4] = 1.0;
    engine.process(&pressed);
    assert!(!engine.gate_enabled(4));
    engine.process(&base);
    engine.process(&pressed);
    assert!(engine.gate_enabled(4));
}
