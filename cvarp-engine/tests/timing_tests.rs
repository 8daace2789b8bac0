use cvarp_engine::{ControlInputs, Engine, EngineSettings, Outputs};
use cvarp_types::{DirectionMode, GateMode, GATE_HIGH};

fn engine_at(sample_rate: f32) -> Engine {
    Engine::new(EngineSettings::default().with_sample_rate(sample_rate))
}

fn ext(level: f32) -> ControlInputs {
    ControlInputs {
        ext_clock: Some(level),
        ..ControlInputs::default()
    }
}

/// One low sample, then `len` high samples starting a step.
fn clock_pulse(engine: &mut Engine, len: usize) -> Vec<Outputs> {
    engine.process(&ext(0.0));
    (0..len).map(|_| engine.process(&ext(10.0))).collect()
}

#[test]
fn trigger_gate_lasts_one_millisecond() {
    let mut engine = engine_at(48_000.0);
    assert_eq!(engine.gate_mode(), GateMode::Trigger);

    let outs = clock_pulse(&mut engine, 2_000);
    assert!(outs[0].advanced);
    assert_eq!(outs[0].step, 1);
    for (i, out) in outs.iter().enumerate() {
        let expect_high = i < 48;
        assert_eq!(out.step_gate_high(1), expect_high, "sample {}", i);
        assert_eq!(out.gate_high(), expect_high, "sample {}", i);
        for other in [0, 2, 3, 4, 5, 6, 7] {
            assert!(!out.step_gate_high(other));
        }
    }
    assert_eq!(outs[0].step_gates[1], GATE_HIGH);

    // Next step fires its own pulse
    let outs = clock_pulse(&mut engine, 100);
    assert_eq!(outs[0].step, 2);
    assert!(outs[0].step_gate_high(2));
    assert!(!outs[0].step_gate_high(1));
    assert_eq!(outs.iter().filter(|o| o.step_gate_high(2)).count(), 48);
}

#[test]
fn retrigger_gate_opens_after_pulse() {
    let mut engine = engine_at(48_000.0);
    engine.set_gate_mode(GateMode::Retrigger);
    let outs = clock_pulse(&mut engine, 500);
    for (i, out) in outs.iter().enumerate() {
        assert_eq!(out.step_gate_high(1), i >= 48, "sample {}", i);
    }
}

#[test]
fn continuous_gate_follows_external_clock() {
    let mut engine = engine_at(48_000.0);
    engine.set_gate_mode(GateMode::Continuous);
    let outs = clock_pulse(&mut engine, 300);
    assert!(outs.iter().all(|o| o.step_gate_high(1)));
    let out = engine.process(&ext(0.0));
    assert!(!out.step_gate_high(1));
    assert!(!out.gate_high());
}

#[test]
fn disabled_step_emits_no_gate() {
    let mut engine = engine_at(48_000.0);
    engine.set_gate_enabled(1, false);
    let outs = clock_pulse(&mut engine, 100);
    assert_eq!(outs[0].step, 1);
    assert!(outs.iter().all(|o| !o.gate_high() && !o.step_gate_high(1)));
}

#[test]
fn four_steps_at_one_hertz_wraps_after_four_seconds() {
    // Power-of-two rate keeps the phase arithmetic exact
    let sample_rate = 1024.0;
    let mut engine = engine_at(sample_rate);
    engine.set_gate_mode(GateMode::Continuous);
    let inputs = ControlInputs {
        clock_rate: 0.0,
        steps: 4.0,
        direction: DirectionMode::Up.control_value(),
        ..ControlInputs::default()
    };

    let total = (4.5 * sample_rate) as usize;
    let outs: Vec<Outputs> = (0..total).map(|_| engine.process(&inputs)).collect();

    let advances: Vec<(usize, usize)> = outs
        .iter()
        .enumerate()
        .filter(|(_, o)| o.advanced)
        .map(|(i, o)| (i + 1, o.step))
        .collect();
    assert_eq!(advances, vec![(1024, 1), (2048, 2), (3072, 3), (4096, 0)]);

    // Second pass through step 0: gate high for the first half second
    let second_pass = &outs[4095..4607];
    assert!(second_pass.iter().all(|o| o.step == 0));
    assert!(second_pass.iter().all(|o| o.gate_high() && o.step_gate_high(0)));
    assert_eq!(engine.index(), 0);
    assert!((engine.phase() - 0.5).abs() < 1e-6);
}

#[test]
fn one_hertz_steps_stay_on_time_at_host_rates() {
    for sample_rate in [44_100.0_f32, 48_000.0, 96_000.0, 192_000.0] {
        let mut engine = engine_at(sample_rate);
        engine.set_gate_mode(GateMode::Continuous);
        let inputs = ControlInputs {
            clock_rate: 0.0,
            steps: 4.0,
            direction: DirectionMode::Up.control_value(),
            ..ControlInputs::default()
        };

        // Stop one millisecond short of the middle of the second pass through step 0
        let total = (4.499 * sample_rate as f64).round() as usize;
        let mut advances = Vec::new();
        let mut last = None;
        for i in 0..total {
            let out = engine.process(&inputs);
            if out.advanced {
                advances.push((i + 1, out.step));
            }
            last = Some(out);
        }

        assert_eq!(advances.len(), 4, "{} Hz: {:?}", sample_rate, advances);
        for (k, (tick, step)) in advances.iter().enumerate() {
            let expected = (k + 1) as f64 * sample_rate as f64;
            assert!(
                (*tick as f64 - expected).abs() <= 1.0,
                "{} Hz: advance {} at sample {}",
                sample_rate,
                k + 1,
                tick
            );
            assert_eq!(*step, (k + 1) % 4);
        }

        let last = last.expect("rendered at least one sample");
        assert_eq!(last.step, 0, "{} Hz", sample_rate);
        assert!(last.gate_high(), "{} Hz", sample_rate);
        assert!(last.step_gate_high(0), "{} Hz", sample_rate);
    }
}
