//! Headless arena demo
//!
//! Runs one session with jittered frame times and a scripted input
//! sequence, logging what happens. Pass a `.ron` or `.toml` config path as
//! the first argument to override the shipped tuning.

use arena_engine::config::Config;
use arena_engine::foundation::{logging, time::Timer};
use arena_engine::input::{InputManager, KeyCode, MouseButton};
use arena_engine::render::{HeadlessRenderer, Viewport};
use arena_shooter::{Game, GameConfig, GameResult, LogHud};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const DEFAULT_CONFIG: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/config/arena.ron");
const SESSION_SECONDS: f32 = 60.0;
const NOMINAL_FRAME: f32 = 1.0 / 60.0;

fn main() -> GameResult<()> {
    logging::init();

    let config = match std::env::args().nth(1) {
        Some(path) => GameConfig::load_from_file(&path)?,
        None => GameConfig::load_or_default(DEFAULT_CONFIG),
    };

    let mut game = Game::new(
        config,
        InputManager::new(),
        LogHud::new(),
        HeadlessRenderer::new(),
        Viewport::new(1280, 720),
    )?;

    let mut jitter = StdRng::seed_from_u64(0x5eed);
    let mut timer = Timer::new();
    let mut clock = 0.0;

    while game.is_running() && clock < SESSION_SECONDS {
        // Occasional hitches exercise the sub-step cap
        let frame = if jitter.gen_bool(0.02) {
            NOMINAL_FRAME * 6.0
        } else {
            NOMINAL_FRAME * jitter.gen_range(0.5..1.5)
        };
        clock += frame;

        script_input(game.input_mut(), clock);
        game.step(frame);
        timer.update();

        if game.is_game_over() {
            game.stop();
        }
    }
    game.stop();

    log::info!(
        "Simulated {:.1}s in {} frames ({:.2}s wall), health {:.0}, {} enemies alive, {:.2}s dropped",
        clock,
        game.renderer().frame_count(),
        timer.total_time(),
        game.player().health(),
        game.enemies().len(),
        game.timestep().dropped_time()
    );
    Ok(())
}

/// Walk forward, strafe, jump every few seconds and fire in bursts
fn script_input(input: &mut InputManager, clock: f32) {
    let phase = clock % 8.0;
    input.handle_key_input(KeyCode::W, phase < 4.0);
    input.handle_key_input(KeyCode::D, (2.0..3.0).contains(&phase));
    input.handle_key_input(KeyCode::A, (5.0..6.0).contains(&phase));
    input.handle_key_input(KeyCode::Space, clock % 3.0 < 0.1);
    input.handle_mouse_button(MouseButton::Left, clock % 1.0 < 0.5);
}
