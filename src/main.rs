//! Tank Arena headless driver
//!
//! Runs the simulation at a fixed timestep with a scripted pilot and routes
//! events to a logging audio sink. Usage:
//!
//! ```text
//! tank-arena [seed] [seconds] [tuning.json]
//! tank-arena --dump-tuning
//! ```

use tank_arena::Tuning;
use tank_arena::audio::{AudioManager, LogSink};
use tank_arena::consts::SIM_DT;
use tank_arena::sim::{GameState, TickInput, tick};

/// Frame length fed to the accumulator (a 50 Hz display)
const FRAME_DT: f32 = 1.0 / 50.0;

/// Maximum simulation substeps per frame
const MAX_SUBSTEPS: u32 = 5;

/// Headless session: state plus the fixed-step accumulator
struct Session {
    state: GameState,
    audio: AudioManager<LogSink>,
    accumulator: f32,
    input: TickInput,
    frames: u64,
    restarts: u32,
}

impl Session {
    fn new(seed: u64, tuning: Tuning) -> Self {
        Self {
            state: GameState::with_tuning(seed, tuning),
            audio: AudioManager::new(LogSink),
            accumulator: 0.0,
            input: TickInput::default(),
            frames: 0,
            restarts: 0,
        }
    }

    /// Scripted pilot: drive in long arcs, sweep the turret and tap fire
    fn pilot(&mut self) {
        let f = self.frames;
        let was_firing = self.input.fire_pressed;
        self.input.forward = f % 300 < 200;
        self.input.rotate_left = f % 120 < 25;
        self.input.turret_right = f % 80 < 30;
        self.input.fire_pressed = f % 12 < 2;
        self.input.fire_just_pressed = self.input.fire_pressed && !was_firing;
        self.input.restart = self.state.is_game_over();
    }

    fn update(&mut self, dt: f32) {
        self.pilot();
        self.accumulator += dt.min(0.1);

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            let was_over = self.state.is_game_over();
            tick(&mut self.state, &self.input, SIM_DT);
            self.accumulator -= SIM_DT;
            substeps += 1;

            if was_over && !self.state.is_game_over() {
                self.restarts += 1;
            }

            // Clear one-shot inputs after processing
            self.input.fire_just_pressed = false;
            self.input.restart = false;
        }

        let events = self.state.drain_events();
        self.audio.play_events(&events);
        self.frames += 1;
    }
}

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.first().map(String::as_str) == Some("--dump-tuning") {
        println!("{}", Tuning::default().to_json_pretty());
        return;
    }

    let seed = args.first().and_then(|s| s.parse().ok()).unwrap_or(12345);
    let seconds: f32 = args.get(1).and_then(|s| s.parse().ok()).unwrap_or(60.0);
    let tuning = args.get(2).map(|path| Tuning::load(path)).unwrap_or_default();

    log::info!("Tank Arena (headless) starting: seed {}, {:.0}s", seed, seconds);
    let mut session = Session::new(seed, tuning);

    let total_frames = (seconds / FRAME_DT).ceil() as u64;
    for _ in 0..total_frames {
        session.update(FRAME_DT);
    }

    let hud = session.state.hud();
    log::info!(
        "Finished after {} ticks: score {}, health {:.0}/{:.0}, {} enemies, {} shells, {} restarts",
        session.state.time_ticks,
        hud.score,
        hud.health,
        hud.max_health,
        session.state.enemy_count(),
        session.state.shells.len(),
        session.restarts,
    );
}
