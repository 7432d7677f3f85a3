//! Session loop
//!
//! One [`Game::step`] per host frame. Simulation runs in fixed steps drained
//! from an accumulator; presentation (projectile visuals, camera, HUD,
//! rendering) runs once per frame with the raw frame delta.

use arena_engine::foundation::math::Vec3;
use arena_engine::foundation::time::FixedTimestep;
use arena_engine::input::InputSource;
use arena_engine::physics::{BodyKind, RigidBodyDesc};
use arena_engine::render::{Renderer, Viewport};
use arena_engine::scene::{MeshShape, NodeDesc};

use crate::chase_camera::ChaseCamera;
use crate::config::GameConfig;
use crate::enemy_manager::EnemyManager;
use crate::entity::{Arena, EntityHandles};
use crate::error::{GameError, GameResult};
use crate::hud::Hud;
use crate::player::Player;

const GROUND_SIZE: f32 = 100.0;
const GROUND_COLOR: [f32; 3] = [0.35, 0.38, 0.35];

/// A running arena session
pub struct Game<I, H, R> {
    config: GameConfig,
    arena: Arena,
    timestep: FixedTimestep,
    ground: EntityHandles,
    player: Player,
    enemies: EnemyManager,
    chase: ChaseCamera,
    viewport: Viewport,
    input: I,
    hud: H,
    renderer: R,
    running: bool,
}

impl<I: InputSource, H: Hud, R: Renderer> Game<I, H, R> {
    /// Build the arena: ground, avatar, spawner and camera
    pub fn new(config: GameConfig, input: I, mut hud: H, renderer: R, viewport: Viewport) -> GameResult<Self> {
        validate(&config)?;

        let mut arena = Arena::new(config.physics_config());
        let ground = arena.spawn(
            RigidBodyDesc::plane(BodyKind::Ground, Vec3::y(), 0.0),
            NodeDesc::new(MeshShape::Plane { size: GROUND_SIZE }, GROUND_COLOR),
        );
        let player = Player::new(&mut arena, config.player.clone(), config.projectile.clone());
        let enemies = EnemyManager::new(config.spawner.clone(), config.enemy.clone());
        let chase = ChaseCamera::new(config.camera.clone(), viewport);
        let timestep = FixedTimestep::new(config.simulation.fixed_step, config.simulation.max_sub_steps);

        hud.set_health01(player.health_fraction());
        hud.set_enemy_count(0);
        log::info!(
            "Arena session started ({:.1} Hz, up to {} sub-steps)",
            1.0 / config.simulation.fixed_step,
            config.simulation.max_sub_steps
        );

        Ok(Self {
            config,
            arena,
            timestep,
            ground,
            player,
            enemies,
            chase,
            viewport,
            input,
            hud,
            renderer,
            running: true,
        })
    }

    /// Advance the session by one host frame and return the fixed steps run
    pub fn step(&mut self, frame_delta: f32) -> u32 {
        if !self.running {
            return 0;
        }

        let steps = self.timestep.advance(frame_delta);
        let fixed_dt = self.timestep.step_size();
        for _ in 0..steps {
            self.fixed_step(fixed_dt);
        }

        let dt = if frame_delta.is_finite() { frame_delta.max(0.0) } else { 0.0 };
        self.player.update(dt, &mut self.arena);
        self.enemies.update(dt);

        let position = self.player.position(&self.arena);
        let forward = self.player.forward(&self.arena);
        self.chase.follow(dt, position, forward);

        self.hud.set_enemy_count(self.enemies.len());
        self.renderer.render(&self.arena.scene, self.chase.camera());
        steps
    }

    fn fixed_step(&mut self, dt: f32) {
        self.arena.physics.step(dt);
        let events = self.arena.physics.take_contact_events();
        self.player.handle_contacts(&mut self.arena, &events);
        self.enemies.handle_contacts(&mut self.arena, &events);

        self.player.fixed_update(dt, &mut self.arena, &self.input, self.chase.camera());
        self.enemies.fixed_update(dt, &mut self.arena, &mut self.player, &mut self.hud);
    }

    /// Track a new surface size
    pub fn handle_resize(&mut self, width: u32, height: u32) {
        self.viewport = Viewport::new(width, height);
        self.chase.resize(self.viewport);
    }

    /// End the session; later `step` calls do nothing
    pub fn stop(&mut self) {
        if self.running {
            self.running = false;
            log::info!("Arena session stopped after {} physics steps", self.arena.physics.step_count());
        }
    }

    /// Whether the session still advances
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Whether the avatar has died
    pub fn is_game_over(&self) -> bool {
        self.player.is_dead()
    }

    /// Active configuration
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Physics and scene registries
    pub fn arena(&self) -> &Arena {
        &self.arena
    }

    /// Mutable registries, for hosts that place extra bodies
    pub fn arena_mut(&mut self) -> &mut Arena {
        &mut self.arena
    }

    /// Ground entity
    pub fn ground(&self) -> EntityHandles {
        self.ground
    }

    /// The avatar
    pub fn player(&self) -> &Player {
        &self.player
    }

    /// Hostile bookkeeping
    pub fn enemies(&self) -> &EnemyManager {
        &self.enemies
    }

    /// Hostile bookkeeping together with the arena, for scripted spawns
    pub fn enemies_mut(&mut self) -> (&mut EnemyManager, &mut Arena) {
        (&mut self.enemies, &mut self.arena)
    }

    /// Chase camera
    pub fn chase_camera(&self) -> &ChaseCamera {
        &self.chase
    }

    /// Current surface size
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Fixed-step accumulator
    pub fn timestep(&self) -> &FixedTimestep {
        &self.timestep
    }

    /// Input source
    pub fn input_mut(&mut self) -> &mut I {
        &mut self.input
    }

    /// HUD sink
    pub fn hud(&self) -> &H {
        &self.hud
    }

    /// Renderer
    pub fn renderer(&self) -> &R {
        &self.renderer
    }
}

fn validate(config: &GameConfig) -> GameResult<()> {
    let simulation = &config.simulation;
    if !(simulation.fixed_step.is_finite() && simulation.fixed_step > 0.0) {
        return Err(GameError::InvalidConfig(format!(
            "fixed_step must be positive, got {}",
            simulation.fixed_step
        )));
    }
    if simulation.max_sub_steps == 0 {
        return Err(GameError::InvalidConfig("max_sub_steps must be at least 1".to_string()));
    }
    let spawner = &config.spawner;
    if spawner.ring_inner < 0.0 || spawner.ring_outer < spawner.ring_inner {
        return Err(GameError::InvalidConfig(format!(
            "spawn ring [{}, {}] is empty",
            spawner.ring_inner, spawner.ring_outer
        )));
    }
    if config.player.max_health <= 0.0 {
        return Err(GameError::InvalidConfig("player max_health must be positive".to_string()));
    }
    let decay_base = config.camera.decay_base;
    if !(decay_base > 0.0 && decay_base < 1.0) {
        return Err(GameError::InvalidConfig(format!(
            "camera decay_base must lie strictly between 0 and 1, got {decay_base}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hud::LogHud;
    use arena_engine::input::{InputManager, KeyCode};
    use arena_engine::render::HeadlessRenderer;

    type TestGame = Game<InputManager, LogHud, HeadlessRenderer>;

    fn game(config: GameConfig) -> TestGame {
        Game::new(config, InputManager::new(), LogHud::new(), HeadlessRenderer::new(), Viewport::new(1280, 720))
            .unwrap()
    }

    fn seeded() -> GameConfig {
        let mut config = GameConfig::default();
        config.spawner.seed = Some(7);
        config
    }

    #[test]
    fn test_sub_steps_follow_elapsed_time() {
        // 1/64 s steps keep the accumulator arithmetic exact
        let mut config = seeded();
        config.simulation.fixed_step = 1.0 / 64.0;
        let mut game = game(config);

        assert_eq!(game.step(1.0 / 64.0), 1);
        assert_eq!(game.step(1.0 / 128.0), 0);
        assert_eq!(game.step(1.0 / 128.0), 1);
        assert_eq!(game.step(2.0 / 64.0), 2);
        assert_eq!(game.step(0.0), 0);
        assert_eq!(game.renderer().frame_count(), 5);
        assert_eq!(game.arena().physics.step_count(), 4);
    }

    #[test]
    fn test_long_frame_is_capped_and_excess_dropped() {
        let mut game = game(seeded());

        assert_eq!(game.step(1.01), 3);
        assert!(game.timestep().accumulator() < game.timestep().step_size());
        assert_eq!(game.step(0.0), 0);
        assert_eq!(game.arena().physics.step_count(), 3);
    }

    #[test]
    fn test_hud_tracks_enemy_count() {
        let mut game = game(seeded());
        for _ in 0..200 {
            game.step(1.0 / 60.0);
        }

        assert!(game.enemies().len() >= 1);
        assert_eq!(game.hud().enemy_count(), game.enemies().len());
    }

    #[test]
    fn test_stopped_game_ignores_steps() {
        let mut game = game(seeded());
        game.stop();

        assert!(!game.is_running());
        assert_eq!(game.step(0.5), 0);
        assert_eq!(game.renderer().frame_count(), 0);
    }

    #[test]
    fn test_input_moves_avatar_and_camera_follows() {
        let mut game = game(seeded());
        game.input_mut().handle_key_input(KeyCode::W, true);

        for _ in 0..120 {
            game.step(1.0 / 60.0);
        }

        let avatar = game.player().position(game.arena());
        assert!(avatar.x.hypot(avatar.z) > 1.0);
        let target = game.chase_camera().camera().target;
        assert!((target - (avatar + Vec3::new(0.0, 1.0, 0.0))).norm() < 1e-4);
    }

    #[test]
    fn test_resize_updates_aspect() {
        let mut game = game(seeded());
        game.handle_resize(1000, 500);

        assert_eq!(game.viewport(), Viewport::new(1000, 500));
        assert!((game.chase_camera().camera().aspect - 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_first_hostile_arrives_on_first_step() {
        let mut game = game(seeded());
        game.step(1.0 / 60.0);

        assert_eq!(game.enemies().len(), 1);
        assert_eq!(game.hud().enemy_count(), 1);
    }

    #[test]
    fn test_rejects_camera_decay_outside_unit_interval() {
        for decay_base in [0.0, 1.0, 1.5, -0.2, f32::NAN, f32::INFINITY] {
            let mut config = GameConfig::default();
            config.camera.decay_base = decay_base;

            let result =
                Game::new(config, InputManager::new(), LogHud::new(), HeadlessRenderer::new(), Viewport::new(1, 1));
            assert!(matches!(result, Err(GameError::InvalidConfig(_))), "accepted decay_base {decay_base}");
        }
    }

    #[test]
    fn test_rejects_empty_spawn_ring() {
        let mut config = GameConfig::default();
        config.spawner.ring_inner = 30.0;

        let result = Game::new(config, InputManager::new(), LogHud::new(), HeadlessRenderer::new(), Viewport::new(1, 1));
        assert!(matches!(result, Err(GameError::InvalidConfig(_))));
    }
}
