//! Board and gameplay constants.

use embedded_graphics::pixelcolor::{Rgb565, RgbColor, WebColors};

use crate::geometry::Vec2;
use crate::physics::ScoringRule;

// --- Screen (Pico Display Pack, landscape) ---
pub const SCREEN_W: i32 = 240;
pub const SCREEN_H: i32 = 135;

// --- Timing ---
/// Timer rate driving `GameState::on_tick`.
pub const TICK_HZ: u64 = 250;
/// Timer ticks per physics step (~16 steps/s at 250 Hz).
pub const TICKS_PER_STEP: u16 = 15;

// --- Field ---
/// Gap between the screen edge and the fence.
pub const FENCE_INSET: i32 = 8;
/// Paddle center distance from its side of the screen.
pub const PADDLE_INSET: i32 = 14;

// --- Shapes and motion ---
pub const BALL_RADIUS: i32 = 8;
pub const BALL_VELOCITY: Vec2 = Vec2::new(2, 2);
pub const PADDLE_HALF_SIZE: Vec2 = Vec2::new(5, 10);
pub const PADDLE_SPEED: i32 = 5;

// --- Buzzer ---
/// Startup tone period in PWM cycles (~1 kHz with the firmware's divider).
pub const TONE_PERIOD: u16 = 2000;

// --- HUD ---
pub const SCORE_POS: Vec2 = Vec2::new(10, 10);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    pub background: Rgb565,
    pub fence: Rgb565,
    pub ball: Rgb565,
    pub left_paddle: Rgb565,
    pub right_paddle: Rgb565,
    pub text: Rgb565,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            background: Rgb565::CSS_KHAKI,
            fence: Rgb565::BLACK,
            ball: Rgb565::CSS_FIRE_BRICK,
            left_paddle: Rgb565::BLUE,
            right_paddle: Rgb565::CSS_HOT_PINK,
            text: Rgb565::BLACK,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GameConfig {
    pub screen_w: i32,
    pub screen_h: i32,
    pub ticks_per_step: u16,
    pub fence_inset: i32,
    pub paddle_inset: i32,
    pub ball_radius: i32,
    pub ball_velocity: Vec2,
    pub paddle_half_size: Vec2,
    pub paddle_speed: i32,
    pub scoring: ScoringRule,
    /// Tone started at boot; `None` keeps the buzzer silent.
    pub startup_tone: Option<u16>,
    pub score_pos: Vec2,
    pub palette: Palette,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::for_screen(SCREEN_W, SCREEN_H)
    }
}

impl GameConfig {
    /// Default gameplay on a panel of the given size.
    pub fn for_screen(screen_w: i32, screen_h: i32) -> Self {
        Self {
            screen_w,
            screen_h,
            ticks_per_step: TICKS_PER_STEP,
            fence_inset: FENCE_INSET,
            paddle_inset: PADDLE_INSET,
            ball_radius: BALL_RADIUS,
            ball_velocity: BALL_VELOCITY,
            paddle_half_size: PADDLE_HALF_SIZE,
            paddle_speed: PADDLE_SPEED,
            scoring: ScoringRule::default(),
            startup_tone: Some(TONE_PERIOD),
            score_pos: SCORE_POS,
            palette: Palette::default(),
        }
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.screen_w / 2, self.screen_h / 2)
    }
}
