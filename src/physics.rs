//! Ball/paddle motion step: paddle and wall reflection, goal scoring.

use crate::geometry::{Axis, Region, Vec2};
use crate::layer::{LayerStack, MovingLayer};

/// Playing field geometry for one step, derived from current layer bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Field {
    pub fence: Region,
    pub left_paddle: Region,
    pub right_paddle: Region,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Scores {
    pub player1: u16,
    pub player2: u16,
}

/// How a right-wall goal is detected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ScoringRule {
    /// Player 2 scores on every step the ball's right edge is left of the
    /// right fence, i.e. almost always. Kept because it is how the demo has
    /// always counted.
    #[default]
    Legacy,
    /// Player 2 scores on every step the ball's right edge is past the right
    /// fence, mirroring the left-wall rule.
    Crossing,
}

/// What happened during one `advance`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Advance {
    pub paddle_bounce: bool,
    pub wall_bounce: bool,
    pub player1_scored: bool,
    pub player2_scored: bool,
}

impl Advance {
    pub fn any(&self) -> bool {
        self.paddle_bounce || self.wall_bounce || self.player1_scored || self.player2_scored
    }
}

/// Moves `mover`'s pending position one velocity step inside `field`.
///
/// All tests run against the bounds at the uncorrected tentative position.
/// A paddle hit flips the horizontal velocity, a top/bottom fence hit flips
/// the vertical one, and either adds twice the flipped component to the
/// tentative position. Goals only count; they never reset the ball.
/// Only `pos_next` is written.
pub fn advance(
    layers: &mut LayerStack,
    mover: &mut MovingLayer,
    field: &Field,
    rule: ScoringRule,
    scores: &mut Scores,
) -> Advance {
    let mut out = Advance::default();
    let mut pos = layers.layer(mover.layer).pos_next + mover.velocity;
    let b = layers.bounds_at(mover.layer, pos);

    if hits_left_paddle(&b, &field.left_paddle) || hits_right_paddle(&b, &field.right_paddle) {
        reflect(&mut mover.velocity, &mut pos, Axis::X);
        out.paddle_bounce = true;
        log::debug!("paddle bounce at ({}, {})", pos.x, pos.y);
    }

    if b.top_left.y < field.fence.top_left.y || b.bot_right.y > field.fence.bot_right.y {
        reflect(&mut mover.velocity, &mut pos, Axis::Y);
        out.wall_bounce = true;
        log::debug!("wall bounce at ({}, {})", pos.x, pos.y);
    }

    if b.top_left.x < field.fence.top_left.x {
        scores.player1 = scores.player1.wrapping_add(1);
        out.player1_scored = true;
    }

    let right_goal = match rule {
        ScoringRule::Legacy => b.bot_right.x < field.fence.bot_right.x,
        ScoringRule::Crossing => b.bot_right.x > field.fence.bot_right.x,
    };
    if right_goal {
        scores.player2 = scores.player2.wrapping_add(1);
        out.player2_scored = true;
    }

    layers.layer_mut(mover.layer).pos_next = pos;
    out
}

/// Ball's top edge strictly inside the paddle's vertical span and its left
/// edge at or left of the paddle's right edge.
fn hits_left_paddle(b: &Region, paddle: &Region) -> bool {
    b.top_left.y < paddle.bot_right.y
        && b.top_left.y > paddle.top_left.y
        && b.top_left.x <= paddle.bot_right.x
}

/// Ball's bottom edge strictly inside the paddle's vertical span and its
/// right edge at or right of the paddle's left edge.
fn hits_right_paddle(b: &Region, paddle: &Region) -> bool {
    b.bot_right.y > paddle.top_left.y
        && b.bot_right.x >= paddle.top_left.x
        && b.bot_right.y < paddle.bot_right.y
}

fn reflect(velocity: &mut Vec2, pos: &mut Vec2, axis: Axis) {
    let v = velocity.axis_mut(axis);
    *v = -*v;
    let v = *v;
    *pos.axis_mut(axis) += 2 * v;
}
