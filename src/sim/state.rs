//! Game state and core simulation types
//!
//! Everything the frame step mutates lives in [`GameState`]: the player,
//! the entity pools, the session counters and the seeded RNG.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use crate::consts::*;
use crate::tuning::Tuning;

/// Current screen of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen, nothing simulated yet
    Start,
    /// Active gameplay
    Playing,
    /// Frozen gameplay, countdown halted
    Paused,
    /// Player health ran out
    GameOver,
    /// Demo countdown ran out
    DemoExpired,
}

impl GamePhase {
    pub fn is_terminal(self) -> bool {
        matches!(self, GamePhase::GameOver | GamePhase::DemoExpired)
    }
}

/// Why a session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EndReason {
    HealthDepleted,
    DemoExpired,
}

impl EndReason {
    pub fn phase(self) -> GamePhase {
        match self {
            EndReason::HealthDepleted => GamePhase::GameOver,
            EndReason::DemoExpired => GamePhase::DemoExpired,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Facing {
    Left,
    #[default]
    Right,
}

/// Animation clips shared by the player and enemies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AnimState {
    #[default]
    Idle,
    Walk,
    Jump,
    Attack,
}

impl AnimState {
    /// Frames in the sprite sheet row for this clip
    pub fn frame_count(self) -> u32 {
        match self {
            AnimState::Idle => 4,
            AnimState::Walk => 6,
            AnimState::Jump => 1,
            AnimState::Attack => 3,
        }
    }
}

/// Sprite animation cursor (the presentation layer picks the sheet)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Animation {
    pub state: AnimState,
    pub frame: u32,
    pub timer: u32,
}

/// Ticks per animation frame
pub const PLAYER_ANIM_PERIOD: u32 = 10;
pub const ENEMY_ANIM_PERIOD: u32 = 12;

impl Animation {
    pub fn new(state: AnimState) -> Self {
        Self {
            state,
            frame: 0,
            timer: 0,
        }
    }

    /// Switch clip (keeps the frame cursor, wrapped into the new clip) and
    /// advance one tick
    pub fn advance(&mut self, state: AnimState, period: u32) {
        self.state = state;
        self.timer += 1;
        if self.timer >= period {
            self.frame = (self.frame + 1) % state.frame_count();
            self.timer = 0;
        } else if self.frame >= state.frame_count() {
            self.frame %= state.frame_count();
        }
    }
}

/// The player character
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Top-left corner
    pub pos: Vec2,
    pub vel_y: f32,
    pub size: Vec2,
    pub facing: Facing,
    pub grounded: bool,
    pub jumping: bool,
    pub attacking: bool,
    /// Frames until the next attack may start
    pub attack_cooldown: u32,
    /// Enemy IDs already damaged by the current swing
    #[serde(skip)]
    pub swing_hits: Vec<u32>,
    pub invincible: bool,
    pub invincible_ticks: u32,
    pub health: u32,
    pub max_health: u32,
    pub anim: Animation,
}

impl Player {
    pub fn new(max_health: u32) -> Self {
        Self {
            pos: Vec2::new(PLAYER_START_X, GROUND_LEVEL - PLAYER_HEIGHT),
            vel_y: 0.0,
            size: Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT),
            facing: Facing::Right,
            grounded: true,
            jumping: false,
            attacking: false,
            attack_cooldown: 0,
            swing_hits: Vec::new(),
            invincible: false,
            invincible_ticks: 0,
            health: max_health,
            max_health,
            anim: Animation::new(AnimState::Idle),
        }
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.pos, self.size)
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size / 2.0
    }

    /// Melee hit box in front of the player, full body height
    pub fn reach_box(&self, range: f32) -> Aabb {
        let x = match self.facing {
            Facing::Right => self.pos.x + self.size.x,
            Facing::Left => self.pos.x - range,
        };
        Aabb::new(Vec2::new(x, self.pos.y), Vec2::new(range, self.size.y))
    }

    /// Apply damage, flooring health at zero. Returns the remaining health.
    pub fn take_damage(&mut self, damage: u32) -> u32 {
        self.health = self.health.saturating_sub(damage);
        self.health
    }

    pub fn heal(&mut self, amount: u32) {
        self.health = self.health.saturating_add(amount).min(self.max_health);
    }

    pub fn grant_invincibility(&mut self, ticks: u32) {
        self.invincible = ticks > 0;
        self.invincible_ticks = ticks;
    }

    pub fn is_dead(&self) -> bool {
        self.health == 0
    }
}

/// Enemy weapon, used only for drawing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Weapon {
    Tongue,
    Bone,
    ShibaClaw,
    SadTear,
    Katana,
    Axe,
    Pacifier,
}

/// Enemy types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnemyKind {
    Pepe,
    Bonk,
    Doge,
    Wojak,
    Shib,
    Floki,
    BabyDoge,
}

/// Static per-kind enemy stats
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnemyTemplate {
    pub name: &'static str,
    pub color: &'static str,
    pub width: f32,
    pub height: f32,
    pub health: u32,
    pub damage: u32,
    /// Base leftward speed (pixels/frame)
    pub speed: f32,
    pub points: u64,
    pub weapon: Weapon,
}

#[rustfmt::skip]
static ENEMY_TEMPLATES: [EnemyTemplate; 7] = [
    EnemyTemplate { name: "PEPE", color: "#4CAF50", width: 80.0, height: 80.0, health: 60, damage: 15, speed: 2.0, points: 100, weapon: Weapon::Tongue },
    EnemyTemplate { name: "BONK", color: "#FFC107", width: 70.0, height: 70.0, health: 50, damage: 12, speed: 2.5, points: 80, weapon: Weapon::Bone },
    EnemyTemplate { name: "DOGE", color: "#FF9800", width: 90.0, height: 90.0, health: 70, damage: 18, speed: 1.8, points: 120, weapon: Weapon::ShibaClaw },
    EnemyTemplate { name: "WOJAK", color: "#B0BEC5", width: 60.0, height: 60.0, health: 40, damage: 10, speed: 3.0, points: 70, weapon: Weapon::SadTear },
    EnemyTemplate { name: "SHIB", color: "#E57373", width: 85.0, height: 85.0, health: 65, damage: 16, speed: 1.9, points: 110, weapon: Weapon::Katana },
    EnemyTemplate { name: "FLOKI", color: "#9CCC65", width: 75.0, height: 75.0, health: 55, damage: 13, speed: 2.2, points: 90, weapon: Weapon::Axe },
    EnemyTemplate { name: "BABYDOGE", color: "#81D4FA", width: 65.0, height: 65.0, health: 45, damage: 11, speed: 2.8, points: 75, weapon: Weapon::Pacifier },
];

impl EnemyKind {
    pub const ALL: [EnemyKind; 7] = [
        EnemyKind::Pepe,
        EnemyKind::Bonk,
        EnemyKind::Doge,
        EnemyKind::Wojak,
        EnemyKind::Shib,
        EnemyKind::Floki,
        EnemyKind::BabyDoge,
    ];

    pub fn template(self) -> &'static EnemyTemplate {
        &ENEMY_TEMPLATES[self as usize]
    }
}

/// A live enemy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub id: u32,
    pub kind: EnemyKind,
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    pub health: u32,
    pub max_health: u32,
    /// Horizontal velocity (negative = leftward)
    pub vel_x: f32,
    pub anim: Animation,
}

impl Enemy {
    /// Instantiate a template standing on the ground at `x`
    pub fn new(id: u32, kind: EnemyKind, x: f32, vel_x: f32) -> Self {
        let t = kind.template();
        Self {
            id,
            kind,
            pos: Vec2::new(x, GROUND_LEVEL - t.height),
            size: Vec2::new(t.width, t.height),
            health: t.health,
            max_health: t.health,
            vel_x,
            anim: Animation::new(AnimState::Walk),
        }
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.pos, self.size)
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size / 2.0
    }

    pub fn damage(&self) -> u32 {
        self.kind.template().damage
    }

    pub fn points(&self) -> u64 {
        self.kind.template().points
    }

    /// Fully past the left edge
    pub fn is_off_screen(&self) -> bool {
        self.pos.x + self.size.x < 0.0
    }
}

/// Coin radius, used for culling
pub const COIN_RADIUS: f32 = 20.0;

/// A collectible coin
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Coin {
    pub id: u32,
    /// Center
    pub pos: Vec2,
    pub value: u32,
    pub vel_x: f32,
}

impl Coin {
    pub fn is_off_screen(&self) -> bool {
        self.pos.x < -COIN_RADIUS
    }
}

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerUpKind {
    Heal,
    Invincible,
}

/// What a collected power-up does, with its magnitude
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PowerUpEffect {
    Heal { amount: u32 },
    Invincible { ticks: u32 },
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 2] = [PowerUpKind::Heal, PowerUpKind::Invincible];

    pub fn name(self) -> &'static str {
        match self {
            PowerUpKind::Heal => "Health Potion",
            PowerUpKind::Invincible => "Invincibility",
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            PowerUpKind::Heal => "#E74C3C",
            PowerUpKind::Invincible => "#F1C40F",
        }
    }

    /// Drawn edge length, also the cull margin
    pub fn size(self) -> f32 {
        30.0
    }

    pub fn effect(self, tuning: &Tuning) -> PowerUpEffect {
        match self {
            PowerUpKind::Heal => PowerUpEffect::Heal {
                amount: tuning.heal_amount,
            },
            PowerUpKind::Invincible => PowerUpEffect::Invincible {
                ticks: tuning.invincibility_power_up_ticks,
            },
        }
    }
}

/// A power-up pickup
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PowerUp {
    pub id: u32,
    pub kind: PowerUpKind,
    /// Center
    pub pos: Vec2,
    pub vel_x: f32,
}

impl PowerUp {
    pub fn is_off_screen(&self) -> bool {
        self.pos.x < -self.kind.size()
    }
}

/// Particle tint, one per kind of event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParticleColor {
    Hit,
    Gold,
    Heal,
    Shield,
}

impl ParticleColor {
    pub fn hex(self) -> &'static str {
        match self {
            ParticleColor::Hit => "#FF4136",
            ParticleColor::Gold => "#FFD700",
            ParticleColor::Heal => "#00FF00",
            ParticleColor::Shield => "#ADD8E6",
        }
    }
}

/// A particle for visual effects
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub color: ParticleColor,
    /// Frames left
    pub life: u32,
}

/// One-shot notifications for the presentation layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    PhaseChanged { from: GamePhase, to: GamePhase },
    EnemyHit { id: u32, remaining: u32 },
    EnemyDefeated { id: u32, kind: EnemyKind, points: u64 },
    PlayerHit { damage: u32, health: u32 },
    CoinCollected { value: u32 },
    PowerUpCollected { kind: PowerUpKind },
    SessionEnded { reason: EndReason, score: u64, coins: u64 },
}

/// Complete simulation context
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub tuning: Tuning,
    pub rng: Pcg32,
    /// Current screen
    pub phase: GamePhase,
    /// Demo countdown (seconds)
    pub time_remaining: u32,
    pub score: u64,
    pub coin_total: u64,
    pub level: u32,
    /// Simulation tick counter for the current session
    pub time_ticks: u64,
    pub player: Player,
    /// Live pools, in spawn order
    pub enemies: Vec<Enemy>,
    pub coins: Vec<Coin>,
    pub power_ups: Vec<PowerUp>,
    pub particles: Vec<Particle>,
    events: Vec<GameEvent>,
    next_id: u32,
}

impl GameState {
    /// Create a new game state with the given seed, sitting on the start screen
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, Tuning::default())
    }

    /// Create a state with custom balance; out-of-range values are clamped
    pub fn with_tuning(seed: u64, tuning: Tuning) -> Self {
        let tuning = tuning.sanitized();
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Start,
            time_remaining: tuning.demo_seconds,
            score: 0,
            coin_total: 0,
            level: tuning.start_level,
            time_ticks: 0,
            player: Player::new(tuning.max_health),
            enemies: Vec::new(),
            coins: Vec::new(),
            power_ups: Vec::new(),
            particles: Vec::new(),
            events: Vec::new(),
            next_id: 1,
            tuning,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take all events raised since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Clear every pool and reset the player and counters for a fresh session
    pub fn reset_session(&mut self) {
        self.enemies.clear();
        self.coins.clear();
        self.power_ups.clear();
        self.particles.clear();
        self.player = Player::new(self.tuning.max_health);
        self.score = 0;
        self.coin_total = 0;
        self.level = self.tuning.start_level;
        self.time_remaining = self.tuning.demo_seconds;
        self.time_ticks = 0;
    }
}
