/// Entry point and game loop.

mod config;
mod domain;
mod sim;
mod telemetry;
mod ui;

use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info, trace, warn};

use config::GameConfig;
use domain::entity::Direction;
use sim::event::GameEvent;
use sim::level;
use sim::snapshot::capture_snapshot;
use sim::step::step;
use sim::world::{Phase, WorldState};
use ui::gamepad::GamepadState;
use ui::input::InputState;
use ui::renderer::Renderer;

const FRAME_SLEEP: Duration = Duration::from_millis(5);
/// Keys drained before this much time on the end screen are discarded,
/// so a held direction key cannot dismiss it.
const END_SCREEN_GRACE: Duration = Duration::from_millis(750);

#[derive(Parser)]
#[command(author, version, about = "Terminal maze chase with BFS-driven ghosts", long_about = None)]
struct Args {
    /// Path to config.toml (default: search next to the executable, then the CWD)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// RNG seed for ghost wandering; overrides `[general] seed`
    #[arg(short, long)]
    seed: Option<u64>,
}

/// How the loop ended.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum Outcome {
    Won,
    GameOver,
    Quit,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let config = GameConfig::load(args.config.as_deref());

    let logging = telemetry::init_telemetry(&config.log)?;
    for w in &config.warnings {
        warn!("{w}");
    }

    let seed = args.seed.or(config.seed).unwrap_or_else(rand::random);
    let mut world = level::build_world(&config, StdRng::seed_from_u64(seed))
        .context("building the built-in level")?;
    info!(
        seed,
        width = world.maze.width(),
        height = world.maze.height(),
        pickups = world.maze.remaining_count(),
        "session start"
    );

    let mut renderer = Renderer::new();
    if let Err(e) = renderer.init() {
        let _ = renderer.cleanup();
        return Err(e).context("terminal init failed");
    }

    let result = game_loop(&mut world, &mut renderer, &config);
    let cleanup = renderer.cleanup();

    match &result {
        Ok(outcome) => info!(?outcome, score = world.player.score, ticks = world.tick, "game end"),
        Err(e) => warn!(error = %e, "game loop failed"),
    }
    result?;
    cleanup.context("terminal cleanup failed")?;

    println!();
    println!("Thanks for playing Maze Chase!");
    println!("Final Score: {}", world.player.score);
    if !logging {
        println!("(logging disabled: could not open {})", config.log.file.display());
    }
    Ok(())
}

fn game_loop(world: &mut WorldState, renderer: &mut Renderer, config: &GameConfig) -> Result<Outcome> {
    let mut kb = InputState::new();
    let mut gp = GamepadState::new();
    gp.load_button_config(&config.gamepad);
    let mut last_tick = Instant::now();
    let tick_rate = Duration::from_nanos(1_000_000_000 / u64::from(config.speed.tick_rate_hz));

    let mut pending: Option<Direction> = None;
    let mut ended_at: Option<Instant> = None;
    renderer.render(&capture_snapshot(world))?;

    loop {
        let frame = kb.drain_events();
        gp.update();

        if frame.quit || gp.quit_pressed() {
            return Ok(Outcome::Quit);
        }

        if world.phase.is_terminal() {
            // Final screen stays up until a key pressed after the grace period.
            let shown_at = *ended_at.get_or_insert_with(Instant::now);
            let pressed = frame.any_key || gp.any_pressed();
            if pressed && end_screen_dismissable(shown_at.elapsed()) {
                return Ok(match world.phase {
                    Phase::Won => Outcome::Won,
                    _ => Outcome::GameOver,
                });
            }
        } else {
            if let Some(dir) = frame.direction.or_else(|| gp.direction_pressed()) {
                pending = Some(dir);
            }

            if last_tick.elapsed() >= tick_rate {
                last_tick = Instant::now();
                let events = step(world, pending.take());
                log_events(&events);
                renderer.render(&capture_snapshot(world))?;
            }
        }

        std::thread::sleep(FRAME_SLEEP);
    }
}

fn end_screen_dismissable(shown_for: Duration) -> bool {
    shown_for >= END_SCREEN_GRACE
}

fn log_events(events: &[GameEvent]) {
    for event in events {
        match event {
            GameEvent::PhaseChanged { phase } => debug!(?phase, "global phase changed"),
            GameEvent::PowerPelletEaten { col, row } => info!(col, row, "power pellet eaten"),
            GameEvent::GhostEaten { ghost } => info!(?ghost, "ghost eaten"),
            GameEvent::PlayerCaught { lives_left } => info!(lives_left, "life lost"),
            GameEvent::GameOver => info!("game over"),
            GameEvent::MazeCleared => info!("maze cleared"),
            GameEvent::PelletEaten { col, row } => trace!(col, row, "pellet eaten"),
            GameEvent::GhostsFrightened => debug!("ghosts frightened"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn end_screen_ignores_keys_during_grace() {
        assert!(!end_screen_dismissable(Duration::ZERO));
        // Typical key-repeat interval while a direction is held.
        assert!(!end_screen_dismissable(Duration::from_millis(33)));
        assert!(!end_screen_dismissable(END_SCREEN_GRACE - Duration::from_millis(1)));
    }

    #[test]
    fn end_screen_accepts_keys_after_grace() {
        assert!(end_screen_dismissable(END_SCREEN_GRACE));
        assert!(end_screen_dismissable(Duration::from_secs(5)));
    }
}
