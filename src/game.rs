//! Scene setup and the timer-driven step.

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::DrawTarget;

use crate::config::GameConfig;
use crate::geometry::{Region, Vec2};
use crate::hud;
use crate::input::{self, Paddle, SwitchMask};
use crate::layer::{Layer, LayerId, LayerStack, MoverId, MovingLayer, MovingLayers, SceneError};
use crate::physics::{self, Advance, Field, Scores};
use crate::render;
use crate::shape::Shape;

/// Everything the tick handler and the foreground loop share.
pub struct GameState {
    config: GameConfig,
    layers: LayerStack,
    movers: MovingLayers,
    field: LayerId,
    ball: MoverId,
    left_paddle: MoverId,
    right_paddle: MoverId,
    scores: Scores,
    redraw_needed: bool,
    tick_count: u16,
}

impl GameState {
    /// Builds the demo scene. Draw order, front first: ball, right paddle,
    /// left paddle, field outline.
    pub fn new(config: GameConfig) -> Result<Self, SceneError> {
        let center = config.center();
        let palette = config.palette;
        let mut layers = LayerStack::new();

        let ball_shape = layers.add_shape(Shape::circle(config.ball_radius))?;
        let paddle_shape = layers.add_shape(Shape::Rect {
            half_size: config.paddle_half_size,
        })?;
        let field_shape = layers.add_shape(Shape::rect_outline(
            center.x - config.fence_inset,
            center.y - config.fence_inset,
        ))?;

        let ball = layers.push(Layer::new(ball_shape, center, palette.ball))?;
        let right = layers.push(Layer::new(
            paddle_shape,
            Vec2::new(config.screen_w - config.paddle_inset, center.y),
            palette.right_paddle,
        ))?;
        let left = layers.push(Layer::new(
            paddle_shape,
            Vec2::new(config.paddle_inset, center.y),
            palette.left_paddle,
        ))?;
        let field = layers.push(Layer::new(field_shape, center, palette.fence))?;

        let mut movers = MovingLayers::new();
        let ball = movers.push(&layers, ball, config.ball_velocity)?;
        let right_paddle = movers.push(&layers, right, Vec2::ZERO)?;
        let left_paddle = movers.push(&layers, left, Vec2::ZERO)?;

        log::info!(
            "scene ready: {}x{} screen, {} layers, {} moving",
            config.screen_w,
            config.screen_h,
            layers.len(),
            movers.len()
        );

        Ok(Self {
            config,
            layers,
            movers,
            field,
            ball,
            left_paddle,
            right_paddle,
            scores: Scores::default(),
            redraw_needed: true,
            tick_count: 0,
        })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn layers(&self) -> &LayerStack {
        &self.layers
    }

    pub fn scores(&self) -> Scores {
        self.scores
    }

    pub fn ball(&self) -> &MovingLayer {
        self.movers.get(self.ball)
    }

    pub fn paddle(&self, paddle: Paddle) -> &MovingLayer {
        self.movers.get(self.paddle_mover(paddle))
    }

    pub fn ball_layer(&self) -> &Layer {
        self.layers.layer(self.ball().layer)
    }

    pub fn paddle_layer(&self, paddle: Paddle) -> &Layer {
        self.layers.layer(self.paddle(paddle).layer)
    }

    pub fn set_paddle_velocity(&mut self, paddle: Paddle, velocity_y: i32) {
        let id = self.paddle_mover(paddle);
        self.movers.get_mut(id).velocity.y = velocity_y;
    }

    /// Fence and paddle boxes at the layers' current positions.
    pub fn field(&self) -> Field {
        Field {
            fence: self.layers.bounds(self.field),
            left_paddle: self.layers.bounds(self.paddle(Paddle::Left).layer),
            right_paddle: self.layers.bounds(self.paddle(Paddle::Right).layer),
        }
    }

    pub fn redraw_needed(&self) -> bool {
        self.redraw_needed
    }

    /// Reads and clears the redraw flag.
    pub fn take_redraw(&mut self) -> bool {
        core::mem::take(&mut self.redraw_needed)
    }

    /// Paints the whole scene. Call once after the display is up.
    pub fn draw_initial<D>(&mut self, display: &mut D) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        render::draw_layers(&mut self.layers, self.config.palette.background, display)
    }

    pub fn draw_hud<D>(&self, display: &mut D) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        hud::draw_score(display, self.scores, self.config.score_pos, &self.config.palette)
    }

    /// Timer entry point. Runs `step` on every `ticks_per_step`-th call and
    /// reports whether it did.
    pub fn on_tick<D>(&mut self, switches: SwitchMask, display: &mut D) -> Result<bool, D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        self.tick_count += 1;
        if self.tick_count < self.config.ticks_per_step.max(1) {
            return Ok(false);
        }
        self.tick_count = 0;
        self.step(switches, display)?;
        Ok(true)
    }

    /// One simulation step: repaint all movers, advance the ball, then apply
    /// each held switch to its paddle and repaint and advance that paddle.
    ///
    /// Paddles collide against the field as it was at the start of the step.
    pub fn step<D>(&mut self, switches: SwitchMask, display: &mut D) -> Result<Advance, D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        let field = self.field();
        let background = self.config.palette.background;

        render::redraw(&mut self.layers, self.movers.as_slice(), background, display)?;
        let ball = self.advance(self.ball, &field);
        let mut changed = ball.any() || self.ball().velocity != Vec2::ZERO;
        self.serve_if_lost();

        for switch in switches.pressed() {
            let Some(cmd) = input::command_for(switch, self.config.paddle_speed) else {
                continue;
            };
            self.set_paddle_velocity(cmd.paddle, cmd.velocity_y);
            let id = self.paddle_mover(cmd.paddle);
            render::redraw(&mut self.layers, self.movers.only(id), background, display)?;
            self.advance(id, &field);
            changed = true;
        }

        log::trace!(
            "step: ball at ({}, {}), score {}-{}",
            self.ball_layer().pos.x,
            self.ball_layer().pos.y,
            self.scores.player1,
            self.scores.player2
        );

        if changed {
            self.redraw_needed = true;
        }
        Ok(ball)
    }

    fn advance(&mut self, id: MoverId, field: &Field) -> Advance {
        let out = physics::advance(
            &mut self.layers,
            self.movers.get_mut(id),
            field,
            self.config.scoring,
            &mut self.scores,
        );
        if out.player1_scored || out.player2_scored {
            log::debug!("score {}-{}", self.scores.player1, self.scores.player2);
        }
        out
    }

    /// Puts the ball back in the middle once it is entirely off screen.
    fn serve_if_lost(&mut self) {
        let id = self.ball().layer;
        let screen = Region::from_corners(
            Vec2::ZERO,
            Vec2::new(self.config.screen_w - 1, self.config.screen_h - 1),
        );
        let next = self.layers.layer(id).pos_next;
        if self.layers.bounds_at(id, next).intersection(&screen).is_none() {
            log::info!("ball lost at ({}, {}), serving again", next.x, next.y);
            self.layers.layer_mut(id).pos_next = self.config.center();
        }
    }

    fn paddle_mover(&self, paddle: Paddle) -> MoverId {
        match paddle {
            Paddle::Left => self.left_paddle,
            Paddle::Right => self.right_paddle,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{SCREEN_H, SCREEN_W, TICKS_PER_STEP};
    use crate::physics::ScoringRule;
    use crate::testing::FrameBuffer;

    fn crossing() -> GameConfig {
        GameConfig {
            scoring: ScoringRule::Crossing,
            ..GameConfig::default()
        }
    }

    fn screen() -> FrameBuffer {
        FrameBuffer::new(SCREEN_W as u32, SCREEN_H as u32)
    }

    #[test]
    fn test_scene_layout() {
        let game = GameState::new(GameConfig::default()).unwrap();
        let field = game.field();

        assert_eq!(game.layers().len(), 4);
        assert_eq!(game.ball_layer().pos, Vec2::new(120, 67));
        assert_eq!(game.ball().velocity, Vec2::new(2, 2));
        assert_eq!(
            field.fence,
            Region::from_corners(Vec2::new(8, 8), Vec2::new(232, 126))
        );
        assert_eq!(
            field.left_paddle,
            Region::from_corners(Vec2::new(9, 57), Vec2::new(19, 77))
        );
        assert_eq!(
            field.right_paddle,
            Region::from_corners(Vec2::new(221, 57), Vec2::new(231, 77))
        );
    }

    #[test]
    fn test_prescale() {
        let mut game = GameState::new(crossing()).unwrap();
        let mut fb = screen();

        for _ in 1..TICKS_PER_STEP {
            assert!(!game.on_tick(SwitchMask::RELEASED, &mut fb).unwrap());
        }
        assert!(fb.windows.is_empty());
        assert!(game.on_tick(SwitchMask::RELEASED, &mut fb).unwrap());
        assert!(!fb.windows.is_empty());
        assert!(!game.on_tick(SwitchMask::RELEASED, &mut fb).unwrap());
    }

    #[test]
    fn test_ball_moves_one_step_behind_physics() {
        let mut game = GameState::new(crossing()).unwrap();
        let mut fb = screen();

        game.step(SwitchMask::RELEASED, &mut fb).unwrap();
        assert_eq!(game.ball_layer().pos, Vec2::new(120, 67));
        assert_eq!(game.ball_layer().pos_next, Vec2::new(122, 69));

        game.step(SwitchMask::RELEASED, &mut fb).unwrap();
        assert_eq!(game.ball_layer().pos, Vec2::new(122, 69));
        assert_eq!(game.ball_layer().pos_last, Vec2::new(120, 67));
    }

    #[test]
    fn test_step_repaints_ball_and_erases_trail() {
        let mut game = GameState::new(crossing()).unwrap();
        let mut fb = screen();
        let palette = game.config().palette;
        game.draw_initial(&mut fb).unwrap();
        assert_eq!(fb.pixel(112, 67), Some(palette.ball));

        game.step(SwitchMask::RELEASED, &mut fb).unwrap();
        game.step(SwitchMask::RELEASED, &mut fb).unwrap();

        assert_eq!(fb.pixel(122, 69), Some(palette.ball));
        // Left-most pixel of the old disc is now background.
        assert_eq!(fb.pixel(112, 67), Some(palette.background));
        // Field outline untouched.
        assert_eq!(fb.pixel(8, 8), Some(palette.fence));
    }

    #[test]
    fn test_switch_zero_moves_left_paddle_up() {
        let mut game = GameState::new(crossing()).unwrap();
        let mut fb = screen();
        let start = game.paddle_layer(Paddle::Left).pos;

        game.step(SwitchMask::from_pressed([true, false, false, false]), &mut fb)
            .unwrap();
        assert_eq!(game.paddle(Paddle::Left).velocity.y, -5);
        assert_eq!(game.paddle_layer(Paddle::Left).pos_next, start + Vec2::new(0, -5));

        game.step(SwitchMask::RELEASED, &mut fb).unwrap();
        assert_eq!(game.paddle_layer(Paddle::Left).pos, start + Vec2::new(0, -5));
        // Right paddle did not move.
        assert_eq!(
            game.paddle_layer(Paddle::Right).pos,
            Vec2::new(SCREEN_W - 14, 67)
        );
    }

    #[test]
    fn test_right_paddle_switches() {
        let mut game = GameState::new(crossing()).unwrap();
        let mut fb = screen();
        let start = game.paddle_layer(Paddle::Right).pos;

        game.step(SwitchMask::from_pressed([false, false, true, false]), &mut fb)
            .unwrap();
        assert_eq!(game.paddle(Paddle::Right).velocity.y, 5);
        assert_eq!(game.paddle_layer(Paddle::Right).pos_next, start + Vec2::new(0, 5));

        game.step(SwitchMask::from_pressed([false, false, false, true]), &mut fb)
            .unwrap();
        assert_eq!(game.paddle(Paddle::Right).velocity.y, -5);
        assert_eq!(game.paddle_layer(Paddle::Right).pos_next, start);
    }

    #[test]
    fn test_paddle_bounces_off_fence() {
        let mut game = GameState::new(crossing()).unwrap();
        let mut fb = screen();
        let up = SwitchMask::from_pressed([true, false, false, false]);

        for _ in 0..30 {
            game.step(up, &mut fb).unwrap();
            let bounds = game.layers().bounds(game.paddle(Paddle::Left).layer);
            assert!(bounds.top_left.y >= game.field().fence.top_left.y - 5);
        }
    }

    #[test]
    fn test_redraw_flag() {
        let mut game = GameState::new(crossing()).unwrap();
        let mut fb = screen();
        assert!(game.take_redraw());
        assert!(!game.redraw_needed());

        game.step(SwitchMask::RELEASED, &mut fb).unwrap();
        assert!(game.take_redraw());
    }

    #[test]
    fn test_idle_scene_does_not_request_redraw() {
        let mut game = GameState::new(GameConfig {
            ball_velocity: Vec2::ZERO,
            ..crossing()
        })
        .unwrap();
        let mut fb = screen();
        game.take_redraw();

        game.step(SwitchMask::RELEASED, &mut fb).unwrap();
        assert!(!game.redraw_needed());

        game.step(SwitchMask::from_pressed([false, true, false, false]), &mut fb)
            .unwrap();
        assert!(game.redraw_needed());
    }

    #[test]
    fn test_legacy_scoring_counts_player2() {
        let mut game = GameState::new(GameConfig::default()).unwrap();
        let mut fb = screen();

        let out = game.step(SwitchMask::RELEASED, &mut fb).unwrap();

        assert!(out.player2_scored);
        assert_eq!(game.scores(), Scores { player1: 0, player2: 1 });
    }

    #[test]
    fn test_lost_ball_is_served_again() {
        let mut game = GameState::new(crossing()).unwrap();
        let mut fb = screen();
        let id = game.ball().layer;
        game.layers.layer_mut(id).pos_next = Vec2::new(-40, 67);

        game.step(SwitchMask::RELEASED, &mut fb).unwrap();

        assert_eq!(game.ball_layer().pos, Vec2::new(-40, 67));
        assert_eq!(game.ball_layer().pos_next, Vec2::new(120, 67));
    }

    #[test]
    fn test_hud() {
        let game = GameState::new(crossing()).unwrap();
        let mut fb = screen();
        game.draw_hud(&mut fb).unwrap();
        assert!(fb.pixel(10, 10).is_some());
    }
}
