mod render;

use std::io;
use std::path::PathBuf;

use cvarp_core::config::Config;
use cvarp_core::new_engine;
use cvarp_core::persistence::{load_patch_str, save_patch_string, PersistError};
use cvarp_engine::ControlInputs;
use cvarp_types::{DirectionMode, GateMode, MAX_STEPS};

const USAGE: &str = "\
usage: cvarp [options]

  -s, --seconds <n>      render length in seconds (default 8)
      --steps <1-8>      step count (default 8)
      --direction <d>    up | updown | random (default up)
      --rate <log2>      internal clock rate, log2 steps per second (default 2)
      --gate-mode <m>    trigger | retrigger | continuous
      --config <file>    config file instead of the user config
      --patch <file>     load a patch before running
      --save <file>      write the patch after running
      --wav <file>       render row and gate CVs to a float WAV
  -v, --verbose          debug logging
  -h, --help             show this help";

#[derive(Debug, Clone, PartialEq)]
struct Args {
    help: bool,
    verbose: bool,
    seconds: f32,
    steps: f32,
    direction: DirectionMode,
    rate: f32,
    gate_mode: Option<GateMode>,
    config: Option<PathBuf>,
    patch: Option<PathBuf>,
    save: Option<PathBuf>,
    wav: Option<PathBuf>,
}

impl Default for Args {
    fn default() -> Self {
        let inputs = ControlInputs::default();
        Self {
            help: false,
            verbose: false,
            seconds: 8.0,
            steps: inputs.steps,
            direction: DirectionMode::Up,
            rate: inputs.clock_rate,
            gate_mode: None,
            config: None,
            patch: None,
            save: None,
            wav: None,
        }
    }
}

fn parse_args(argv: &[String]) -> Result<Args, String> {
    let mut args = Args::default();
    let mut iter = argv.iter();
    while let Some(flag) = iter.next() {
        let mut value = || {
            iter.next()
                .cloned()
                .ok_or_else(|| format!("missing value for {}", flag))
        };
        match flag.as_str() {
            "-h" | "--help" => args.help = true,
            "-v" | "--verbose" => args.verbose = true,
            "-s" | "--seconds" => args.seconds = parse_number(flag, &value()?)?.max(0.0),
            "--steps" => {
                args.steps = parse_number(flag, &value()?)?.clamp(1.0, MAX_STEPS as f32)
            }
            "--rate" => args.rate = parse_number(flag, &value()?)?,
            "--direction" => {
                let v = value()?;
                args.direction =
                    DirectionMode::parse(&v).ok_or_else(|| format!("unknown direction: {}", v))?;
            }
            "--gate-mode" => {
                let v = value()?;
                args.gate_mode =
                    Some(GateMode::parse(&v).ok_or_else(|| format!("unknown gate mode: {}", v))?);
            }
            "--config" => args.config = Some(PathBuf::from(value()?)),
            "--patch" => args.patch = Some(PathBuf::from(value()?)),
            "--save" => args.save = Some(PathBuf::from(value()?)),
            "--wav" => args.wav = Some(PathBuf::from(value()?)),
            other => return Err(format!("unknown argument: {}", other)),
        }
    }
    Ok(args)
}

fn parse_number(flag: &str, text: &str) -> Result<f32, String> {
    text.parse::<f32>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| format!("{} expects a number, got {}", flag, text))
}

fn init_logging(verbose: bool) {
    use simplelog::{ColorChoice, LevelFilter, TermLogger, TerminalMode};

    let log_level = if verbose { LevelFilter::Debug } else { LevelFilter::Warn };
    if let Err(e) = TermLogger::init(
        log_level,
        simplelog::Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    ) {
        eprintln!("logger unavailable: {}", e);
    }
    log::info!(target: "cli", "cvarp starting (log level: {:?})", log_level);
}

fn persist_error(e: PersistError) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidData, e.to_string())
}

fn main() -> io::Result<()> {
    let argv: Vec<String> = std::env::args().skip(1).collect();
    let args = match parse_args(&argv) {
        Ok(args) => args,
        Err(msg) => {
            eprintln!("{}\n\n{}", msg, USAGE);
            std::process::exit(2);
        }
    };
    if args.help {
        println!("{}", USAGE);
        return Ok(());
    }
    init_logging(args.verbose);

    let config = match &args.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    };
    let mut engine = new_engine(&config);
    if let Some(mode) = args.gate_mode {
        engine.set_gate_mode(mode);
    }

    if let Some(path) = &args.patch {
        let text = std::fs::read_to_string(path)?;
        let report = load_patch_str(&mut engine, &text).map_err(persist_error)?;
        log::info!(
            target: "cli",
            "loaded {} ({} values, {} skipped)",
            path.display(),
            report.applied,
            report.skipped
        );
        if !engine.is_running() {
            log::warn!(target: "cli", "patch {} is stopped; no steps will play", path.display());
        }
    }

    let inputs = ControlInputs {
        clock_rate: args.rate,
        steps: args.steps,
        direction: args.direction.control_value(),
        ..ControlInputs::default()
    };

    println!(
        "{} steps, {}, {} gates, {:.2} steps/s at {} Hz",
        args.steps,
        args.direction.name(),
        engine.gate_mode().name(),
        args.rate.exp2(),
        engine.sample_rate()
    );
    let samples = render::render(
        &mut engine,
        &inputs,
        args.seconds,
        args.wav.as_deref(),
        |event| {
            println!(
                "{:>9.4}s  step {}  rows {:+.3} {:+.3} {:+.3} V  gate {}",
                event.time_secs,
                event.step + 1,
                event.rows[0],
                event.rows[1],
                event.rows[2],
                if event.gate { "on" } else { "off" }
            );
        },
    )?;
    if let Some(path) = &args.wav {
        println!("wrote {} samples to {}", samples, path.display());
    }

    if let Some(path) = &args.save {
        let text = save_patch_string(&engine).map_err(persist_error)?;
        std::fs::write(path, text)?;
        log::info!(target: "cli", "saved patch to {}", path.display());
    }
    Ok(())
}
