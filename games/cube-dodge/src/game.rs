use cube_engine::*;
use glam::Vec3;

use crate::controls::Controls;
use crate::spawner::{EnemyTemplate, SpawnSchedule};

/// Vertical speed given to the player by a jump.
const JUMP_SPEED: f32 = 0.1;

const PLAYER_START_VELOCITY: Vec3 = Vec3::new(0.0, -0.001, 0.0);
const GROUND_SIZE: Vec3 = Vec3::new(10.0, 0.5, 50.0);
const GROUND_POSITION: Vec3 = Vec3::new(0.0, -2.0, 0.0);

/// Enemies that fell this far below the platform stop being drawn. They stay
/// in the scene and keep updating.
const FALL_CULL_Y: f32 = -20.0;

const PLAYER_COLOR: u32 = 0xffffff;
const ENEMY_COLOR: u32 = 0xffffff;
const GROUND_COLOR: u32 = 0x0369a1;

/// Sound cue IDs, mapped to audio streams by the host.
pub mod sounds {
    pub const STOP_MUSIC: u32 = 1;
    pub const DEATH: u32 = 2;
}

/// Game event kinds read by the host.
pub mod game_events {
    /// `a` = frame count at the hit, `b` = enemies alive.
    pub const GAME_OVER: f32 = 1.0;
}

/// Host texture slots.
mod textures {
    pub const PLAYER_IMAGE: u32 = 0;
    pub const ENEMY_VIDEO: u32 = 0;
}

mod tags {
    pub const PLAYER: &str = "player";
    pub const ENEMY: &str = "enemy";
    pub const GROUND: &str = "ground";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Running,
    GameOver,
}

/// Dodge the incoming cubes for as long as possible.
pub struct DodgeGame<R: RandomSource = Rng> {
    rng: R,
    player: Option<EntityId>,
    ground: Option<EntityId>,
    /// In spawn order.
    enemies: Vec<EntityId>,
    frame_count: u64,
    spawner: SpawnSchedule,
    enemy: EnemyTemplate,
    phase: Phase,
}

impl DodgeGame<Rng> {
    pub fn new() -> Self {
        Self::with_random(Rng::new(GameConfig::default().seed))
    }
}

impl Default for DodgeGame<Rng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: RandomSource> DodgeGame<R> {
    pub fn with_random(rng: R) -> Self {
        Self {
            rng,
            player: None,
            ground: None,
            enemies: Vec::new(),
            frame_count: 0,
            spawner: SpawnSchedule::default(),
            enemy: EnemyTemplate::default(),
            phase: Phase::Running,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    pub fn player(&self) -> Option<EntityId> {
        self.player
    }

    pub fn ground(&self) -> Option<EntityId> {
        self.ground
    }

    pub fn enemies(&self) -> &[EntityId] {
        &self.enemies
    }

    pub fn spawn_rate(&self) -> u64 {
        self.spawner.rate()
    }

    /// Advance one tick with the given controls. Does nothing before
    /// `init` or once the game is over.
    pub fn step(&mut self, ctx: &mut EngineContext, controls: &Controls) {
        if self.phase == Phase::GameOver {
            return;
        }
        let (Some(player_id), Some(ground_id)) = (self.player, self.ground) else {
            return;
        };
        let Some(ground) = ctx.body(ground_id).cloned() else {
            return;
        };

        let (vx, vz) = controls.horizontal_velocity();
        let Some(player) = ctx.body_mut(player_id) else {
            return;
        };
        player.velocity.x = vx;
        player.velocity.z = vz;
        player.update(&ground);
        let player = player.clone();

        let mut hit = false;
        for &id in &self.enemies {
            if let Some(enemy) = ctx.scene.get_mut(id) {
                enemy.body.update(&ground);
                hit |= detect_box_collision(&player, &enemy.body);
                if enemy.active && enemy.body.position.y < FALL_CULL_Y {
                    enemy.active = false;
                    log::debug!("enemy {} fell off the platform", id.0);
                }
            }
        }
        if hit {
            self.end(ctx);
        }

        if controls.jump && detect_ground(&player, &ground) {
            if let Some(body) = ctx.body_mut(player_id) {
                body.velocity.y = JUMP_SPEED;
            }
        }

        if self.spawner.due(self.frame_count) {
            self.spawn_enemy(ctx);
        }

        self.frame_count += 1;
    }

    fn end(&mut self, ctx: &mut EngineContext) {
        if self.phase == Phase::GameOver {
            return;
        }
        self.phase = Phase::GameOver;

        ctx.emit_sound(SoundEvent(sounds::STOP_MUSIC));
        ctx.emit_sound(SoundEvent(sounds::DEATH));
        ctx.emit_event(GameEvent::new(
            game_events::GAME_OVER,
            self.frame_count as f32,
            self.enemies.len() as f32,
            0.0,
        ));
        log::info!(
            "game over at frame {} with {} enemies on the field",
            self.frame_count,
            self.enemies.len()
        );
    }

    fn spawn_enemy(&mut self, ctx: &mut EngineContext) {
        let body = self.enemy.body(&mut self.rng);
        let id = ctx.spawn(|id| {
            Entity::new(id, body).with_tag(tags::ENEMY).with_material(
                Material::from_hex(ENEMY_COLOR)
                    .with_texture(TextureSlot::Video(textures::ENEMY_VIDEO))
                    .with_cast_shadow(true),
            )
        });
        self.enemies.push(id);

        if self.spawner.rate() == SpawnSchedule::RATE_FLOOR {
            log::debug!("enemy {} spawned at minimum interval", self.enemies.len());
        }
    }
}

impl<R: RandomSource> Game for DodgeGame<R> {
    fn init(&mut self, ctx: &mut EngineContext) {
        ctx.scene.clear();
        self.rng.reseed(ctx.config.seed);
        self.enemies.clear();
        self.frame_count = 0;
        self.spawner = SpawnSchedule::default();
        self.phase = Phase::Running;

        self.player = Some(ctx.spawn(|id| {
            Entity::new(id, BoxBody::cube().with_velocity(PLAYER_START_VELOCITY))
                .with_tag(tags::PLAYER)
                .with_material(
                    Material::from_hex(PLAYER_COLOR)
                        .with_texture(TextureSlot::Image(textures::PLAYER_IMAGE))
                        .with_cast_shadow(true),
                )
        }));

        self.ground = Some(ctx.spawn(|id| {
            let body = BoxBody::new(GROUND_SIZE.x, GROUND_SIZE.y, GROUND_SIZE.z)
                .with_position(GROUND_POSITION);
            Entity::new(id, body)
                .with_tag(tags::GROUND)
                .with_material(Material::from_hex(GROUND_COLOR).with_receive_shadow(true))
        }));

        log::info!("cube-dodge ready, seed {}", ctx.config.seed);
    }

    fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue) {
        let controls = Controls::from_input(input);
        self.step(ctx, &controls);
    }

    fn is_over(&self) -> bool {
        self.phase == Phase::GameOver
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Always returns the same value, pinning enemy x.
    struct Fixed(f32);

    impl RandomSource for Fixed {
        fn next_f32(&mut self) -> f32 {
            self.0
        }
    }

    fn started(value: f32) -> (DodgeGame<Fixed>, EngineContext) {
        let mut game = DodgeGame::with_random(Fixed(value));
        let mut ctx = EngineContext::new();
        game.init(&mut ctx);
        (game, ctx)
    }

    fn player_body<'a, R: RandomSource>(game: &DodgeGame<R>, ctx: &'a EngineContext) -> &'a BoxBody {
        ctx.body(game.player().unwrap()).unwrap()
    }

    #[test]
    fn init_builds_player_and_ground() {
        let (game, ctx) = started(0.5);
        assert_eq!(ctx.scene.len(), 2);
        assert_eq!(game.phase(), Phase::Running);

        let player = player_body(&game, &ctx);
        assert_eq!(player.position, Vec3::ZERO);
        assert_eq!(player.velocity, PLAYER_START_VELOCITY);
        assert_eq!(player.size(), Vec3::ONE);

        let ground = ctx.scene.get(game.ground().unwrap()).unwrap();
        assert_eq!(ground.body.position, GROUND_POSITION);
        assert_eq!(ground.body.size(), GROUND_SIZE);
        assert!((ground.body.top + 1.75).abs() < 1e-6);

        let material = ground.material.as_ref().unwrap();
        assert!(material.receives_shadow && !material.casts_shadow);
        assert_eq!(material.color, Material::from_hex(GROUND_COLOR).color);
        assert_eq!(
            ctx.scene.get(game.player().unwrap()).unwrap().material.as_ref().unwrap().texture,
            TextureSlot::Image(textures::PLAYER_IMAGE)
        );
    }

    #[test]
    fn step_before_init_is_a_no_op() {
        let mut game = DodgeGame::with_random(Fixed(0.5));
        let mut ctx = EngineContext::new();
        game.step(&mut ctx, &Controls::default());
        assert_eq!(game.frame_count(), 0);
        assert!(ctx.scene.is_empty());
    }

    #[test]
    fn first_tick_spawns_an_enemy_far_ahead() {
        let (mut game, mut ctx) = started(0.5);
        game.step(&mut ctx, &Controls::default());

        assert_eq!(game.frame_count(), 1);
        assert_eq!(game.enemies().len(), 1);
        assert_eq!(game.spawn_rate(), 185);

        let enemy = ctx.scene.get(game.enemies()[0]).unwrap();
        assert_eq!(enemy.tag, "enemy");
        assert_eq!(enemy.body.position, Vec3::new(0.0, 0.0, -20.0));
        assert_eq!(enemy.body.velocity, Vec3::new(0.0, 0.0, 0.005));
        assert_eq!(
            enemy.material.as_ref().unwrap().texture,
            TextureSlot::Video(textures::ENEMY_VIDEO)
        );
    }

    #[test]
    fn controls_drive_the_player() {
        let (mut game, mut ctx) = started(0.0);
        let controls = Controls {
            left: true,
            forward: true,
            ..Controls::default()
        };
        game.step(&mut ctx, &controls);

        let player = player_body(&game, &ctx);
        assert_eq!(player.position.x, -0.05);
        assert_eq!(player.position.z, -0.05);

        // Velocity is reset every tick, so releasing the keys stops the player.
        game.step(&mut ctx, &Controls::default());
        let player = player_body(&game, &ctx);
        assert_eq!(player.position.x, -0.05);
        assert_eq!(player.velocity.x, 0.0);
    }

    #[test]
    fn centered_enemy_ends_the_game() {
        let (mut game, mut ctx) = started(0.5);

        let mut ended_at = None;
        for _ in 0..1_000 {
            ctx.clear_frame_data();
            let frame = game.frame_count();
            game.step(&mut ctx, &Controls::default());
            if game.is_over() {
                ended_at = Some(frame);
                break;
            }
        }

        // The first enemy spawns at the end of frame 0 and updates once per
        // frame after that, so on frame k it has z_k = z_0 + v*k + a*k(k+1)/2.
        // Contact needs its front face to reach the player's back face.
        let template = EnemyTemplate::default();
        let (z0, v, a) = (
            template.z as f64,
            template.speed as f64,
            Z_ACCELERATION as f64,
        );
        let contact_z = -0.5 - 0.5;
        let mut k = 0u64;
        while z0 + v * k as f64 + a * (k * (k + 1)) as f64 / 2.0 < contact_z {
            k += 1;
        }
        // Faces are cached at the start of each update, one frame behind.
        let expected = k + 1;

        let frame = ended_at.expect("first enemy should reach the player");
        assert!(
            frame.abs_diff(expected) <= 1,
            "game over at frame {}, expected {}",
            frame,
            expected
        );

        assert_eq!(
            ctx.sounds,
            vec![SoundEvent(sounds::STOP_MUSIC), SoundEvent(sounds::DEATH)]
        );
        assert_eq!(ctx.events.len(), 1);
        let event = ctx.events[0];
        assert_eq!(event.kind, game_events::GAME_OVER);
        assert_eq!(event.a, frame as f32);
        // Spawns at frames 0, 185 and 340.
        assert_eq!(event.b, 3.0);
    }

    #[test]
    fn nothing_moves_after_game_over() {
        let (mut game, mut ctx) = started(0.5);
        while !game.is_over() && game.frame_count() < 1_000 {
            game.step(&mut ctx, &Controls::default());
        }
        assert!(game.is_over());

        let frame = game.frame_count();
        let enemies = game.enemies().len();
        let player = player_body(&game, &ctx).clone();

        ctx.clear_frame_data();
        for _ in 0..10 {
            game.step(&mut ctx, &Controls { jump: true, ..Controls::default() });
        }

        assert_eq!(game.frame_count(), frame);
        assert_eq!(game.enemies().len(), enemies);
        assert_eq!(player_body(&game, &ctx), &player);
        assert!(ctx.sounds.is_empty());
        assert!(ctx.events.is_empty());
    }

    #[test]
    fn enemies_off_to_the_side_never_hit() {
        let (mut game, mut ctx) = started(0.0);
        for _ in 0..1_000 {
            game.step(&mut ctx, &Controls::default());
        }

        assert!(!game.is_over());
        assert_eq!(game.enemies().len(), 21);
        assert_eq!(game.spawn_rate(), SpawnSchedule::RATE_FLOOR);
        assert_eq!(ctx.scene.count_tag("enemy"), 21);
        for &id in game.enemies() {
            assert_eq!(ctx.body(id).unwrap().position.x, -5.0);
        }
    }

    #[test]
    fn fallen_enemies_leave_the_render_buffer() {
        let (mut game, mut ctx) = started(0.0);
        for _ in 0..12_000 {
            game.step(&mut ctx, &Controls::default());
        }
        assert!(!game.is_over());

        let capacity = GameConfig::default().max_instances;
        assert!(game.enemies().len() > capacity);

        let mut buffer = RenderBuffer::with_capacity(capacity);
        assert_eq!(build_render_buffer(ctx.scene.iter(), &mut buffer), 0);

        let newest = *game.enemies().last().unwrap();
        let oldest = game.enemies()[0];
        assert!(buffer.ids.contains(&newest.0));
        assert!(!buffer.ids.contains(&oldest.0));
        assert!(buffer.ids.contains(&game.player().unwrap().0));
        assert!(buffer.ids.contains(&game.ground().unwrap().0));

        // Culled enemies are still simulated.
        let fallen = ctx.scene.get(oldest).unwrap();
        assert!(!fallen.active);
        assert!(fallen.body.position.y < FALL_CULL_Y);
        assert_eq!(ctx.scene.count_tag("enemy"), game.enemies().len());
    }

    #[test]
    fn jump_only_when_grounded() {
        let (mut game, mut ctx) = started(0.0);
        let jump = Controls { jump: true, ..Controls::default() };

        // Still falling from the spawn point.
        for _ in 0..20 {
            game.step(&mut ctx, &jump);
            assert!(player_body(&game, &ctx).velocity.y < 0.0);
        }

        for _ in 0..280 {
            game.step(&mut ctx, &Controls::default());
        }

        // Resting on the ground: the look-ahead window accepts the player on
        // most ticks of its residual bounce.
        let mut jumped = false;
        for _ in 0..10 {
            game.step(&mut ctx, &jump);
            if player_body(&game, &ctx).velocity.y == JUMP_SPEED {
                jumped = true;
                break;
            }
        }
        assert!(jumped);
    }

    #[test]
    fn same_seed_same_enemies() {
        let run = |seed: u64| {
            let mut game = DodgeGame::new();
            let mut ctx = EngineContext::with_config(GameConfig { seed, ..GameConfig::default() });
            game.init(&mut ctx);
            for _ in 0..200 {
                game.step(&mut ctx, &Controls::default());
            }
            game.enemies()
                .iter()
                .map(|&id| ctx.body(id).unwrap().position.x)
                .collect::<Vec<_>>()
        };

        let a = run(7);
        assert_eq!(a.len(), 2);
        assert_eq!(a, run(7));
        assert!(a.iter().all(|x| (-5.0..5.0).contains(x)));
    }

    #[test]
    fn update_reads_held_keys() {
        let (mut game, mut ctx) = started(0.0);
        let mut input = InputQueue::new();
        input.push(InputEvent::KeyDown { key_code: crate::controls::keys::D });
        game.update(&mut ctx, &input);
        assert_eq!(player_body(&game, &ctx).position.x, 0.05);
    }
}
