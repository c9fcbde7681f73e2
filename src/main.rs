//! Gorillas console shell
//!
//! A thin line-oriented front end over the simulation core. Each line is
//! one entry: digits are typed and confirmed, `<` deletes a digit, `r`
//! restarts, `q` quits. Flights run at a simulated 60 fps through the
//! fixed-step accumulator.
//!
//! Usage: `gorillas [CONFIG.json] [--seed N]`

use std::error::Error;
use std::io::{self, BufRead, Write};

use gorillas::GameConfig;
use gorillas::sim::{EventResponse, FixedStepper, GameEvent, InputEvent, Phase, Round};

const FRAME_DT: f32 = 1.0 / 60.0;
/// Give up on a flight after this many frames (a minute of game time)
const MAX_FLIGHT_FRAMES: u32 = 60 * 60;

struct Args {
    config_path: Option<String>,
    seed: Option<u64>,
}

fn parse_args() -> Result<Args, Box<dyn Error>> {
    let mut args = Args {
        config_path: None,
        seed: None,
    };
    let mut iter = std::env::args().skip(1);
    while let Some(arg) = iter.next() {
        if arg == "--seed" {
            let value = iter.next().ok_or("--seed needs a value")?;
            args.seed = Some(value.parse()?);
        } else {
            args.config_path = Some(arg);
        }
    }
    Ok(args)
}

fn load_config(path: Option<&str>) -> Result<GameConfig, Box<dyn Error>> {
    match path {
        Some(path) => {
            let json = std::fs::read_to_string(path)?;
            let config = GameConfig::from_json(&json)?;
            log::info!("Loaded config from {}", path);
            Ok(config)
        }
        None => Ok(GameConfig::default()),
    }
}

fn clock_seed() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}

/// Translate one console line into input events
fn line_events(line: &str) -> Vec<InputEvent> {
    match line.trim() {
        "q" | "quit" => vec![InputEvent::QuitRequested],
        "r" | "restart" => vec![InputEvent::Restart],
        "<" => vec![InputEvent::Backspace],
        "" => vec![InputEvent::Confirm],
        text => vec![InputEvent::Text(text.to_string()), InputEvent::Confirm],
    }
}

fn print_status(round: &Round, out: &mut impl Write) -> io::Result<()> {
    let snap = round.snapshot();
    writeln!(
        out,
        "[round {}] {} | wind {:+.1}",
        snap.round, snap.status, snap.wind_display
    )?;
    if !snap.prompt.is_empty() {
        write!(out, "{}", snap.prompt)?;
    }
    out.flush()
}

fn print_events(round: &mut Round, out: &mut impl Write) -> io::Result<()> {
    for event in round.drain_events() {
        match event {
            GameEvent::Explosion { center, cleared, .. } => {
                writeln!(out, "  boom at ({}, {}), {} cells gone", center.x, center.y, cleared)?
            }
            GameEvent::ShotMissed { .. } => writeln!(out, "  missed, off the field")?,
            GameEvent::RoundStarted { round, .. } => writeln!(out, "  round {} begins", round)?,
            _ => {}
        }
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let args = parse_args()?;
    let config = load_config(args.config_path.as_deref())?;
    let seed = args.seed.unwrap_or_else(clock_seed);
    log::info!("Gorillas (console) starting with seed {}", seed);

    let mut round = Round::new(config, seed)?;
    let mut stepper = FixedStepper::new();
    let stdin = io::stdin();
    let mut out = io::stdout();

    print_events(&mut round, &mut out)?;
    print_status(&round, &mut out)?;

    for line in stdin.lock().lines() {
        let line = line?;
        for event in line_events(&line) {
            if round.handle_event(event)? == EventResponse::Quit {
                return Ok(());
            }
        }

        let mut frames = 0;
        while round.phase() == Phase::FlightInProgress && frames < MAX_FLIGHT_FRAMES {
            stepper.advance(&mut round, FRAME_DT);
            frames += 1;
        }

        print_events(&mut round, &mut out)?;
        print_status(&round, &mut out)?;
    }

    Ok(())
}
