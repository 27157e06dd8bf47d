//! Score line.

use core::fmt::Write as _;

use embedded_graphics::mono_font::MonoTextStyleBuilder;
use embedded_graphics::mono_font::ascii::FONT_5X7;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::text::{Baseline, Text};

use crate::config::Palette;
use crate::geometry::Vec2;
use crate::physics::Scores;

/// Draws "score: P1 P2" with its top-left corner at `pos`, over an opaque
/// background so the previous value is overwritten.
pub fn draw_score<D>(
    display: &mut D,
    scores: Scores,
    pos: Vec2,
    palette: &Palette,
) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb565>,
{
    let style = MonoTextStyleBuilder::new()
        .font(&FONT_5X7)
        .text_color(palette.text)
        .background_color(palette.background)
        .build();

    let mut buf = heapless::String::<32>::new();
    core::write!(buf, "score: {} {}", scores.player1, scores.player2).ok();
    Text::with_baseline(&buf, pos.into(), style, Baseline::Top).draw(display)?;
    Ok(())
}
