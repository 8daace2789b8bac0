//! Offline rendering: run the engine for a fixed time, report steps and
//! optionally write the CV outputs to a float WAV file.

use std::io;
use std::path::Path;

use cvarp_engine::{ControlInputs, Engine};
use cvarp_types::{GATE_HIGH, NUM_ROWS};

/// One step start observed during a render.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepEvent {
    pub time_secs: f64,
    pub step: usize,
    pub rows: [f32; NUM_ROWS],
    pub gate: bool,
}

/// WAV channel layout: three rows then the aggregate gate, each scaled so
/// 10 V is full scale.
pub const WAV_CHANNELS: u16 = NUM_ROWS as u16 + 1;

/// Run `engine` for `seconds` with fixed `inputs`. Calls `on_step` for every
/// step start and returns the number of samples processed.
pub fn render(
    engine: &mut Engine,
    inputs: &ControlInputs,
    seconds: f32,
    wav: Option<&Path>,
    mut on_step: impl FnMut(&StepEvent),
) -> io::Result<usize> {
    let sample_rate = engine.sample_rate();
    let total = (seconds.max(0.0) * sample_rate).round() as usize;

    let mut writer = match wav {
        Some(path) => {
            let spec = hound::WavSpec {
                channels: WAV_CHANNELS,
                sample_rate: sample_rate.round() as u32,
                bits_per_sample: 32,
                sample_format: hound::SampleFormat::Float,
            };
            Some(hound::WavWriter::create(path, spec).map_err(wav_error)?)
        }
        None => None,
    };

    for n in 0..total {
        let out = engine.process(inputs);
        if out.advanced {
            on_step(&StepEvent {
                time_secs: n as f64 / sample_rate as f64,
                step: out.step,
                rows: out.rows,
                gate: out.gate_high(),
            });
        }
        if let Some(writer) = writer.as_mut() {
            for value in out.rows.iter().chain(std::iter::once(&out.gates)) {
                writer.write_sample(value / GATE_HIGH).map_err(wav_error)?;
            }
        }
    }

    if let Some(writer) = writer {
        writer.finalize().map_err(wav_error)?;
    }
    log::debug!(target: "cli", "rendered {} samples at {} Hz", total, sample_rate);
    Ok(total)
}

fn wav_error(e: hound::Error) -> io::Error {
    io::Error::new(io::ErrorKind::Other, format!("WAV error: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use cvarp_engine::EngineSettings;

    #[test]
    fn reports_each_step() {
        let mut engine = Engine::new(EngineSettings::default().with_sample_rate(1024.0));
        let inputs = ControlInputs {
            clock_rate: 0.0,
            steps: 3.0,
            ..ControlInputs::default()
        };
        let mut events = Vec::new();
        let samples = render(&mut engine, &inputs, 4.5, None, |e| events.push(*e)).unwrap();
        assert_eq!(samples, 4608);
        let steps: Vec<usize> = events.iter().map(|e| e.step).collect();
        assert_eq!(steps, vec![1, 2, 0, 1]);
        assert!((events[0].time_secs - 1023.0 / 1024.0).abs() < 1e-9);
        assert!(events.iter().all(|e| e.gate));
    }

    #[test]
    fn writes_four_channel_wav() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.wav");
        let mut engine = Engine::new(EngineSettings::default().with_sample_rate(8000.0));
        let samples = render(&mut engine, &ControlInputs::default(), 0.5, Some(&path), |_| {}).unwrap();

        let reader = hound::WavReader::open(&path).unwrap();
        let spec = reader.spec();
        assert_eq!(spec.channels, WAV_CHANNELS);
        assert_eq!(spec.sample_rate, 8000);
        assert_eq!(spec.sample_format, hound::SampleFormat::Float);
        assert_eq!(reader.len() as usize, samples * WAV_CHANNELS as usize);
    }
}
