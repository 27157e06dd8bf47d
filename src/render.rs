//! Dirty-box compositor.
//!
//! Only the boxes swept by moving layers are repainted. Each pixel in such a
//! box is resolved against the whole layer stack, since a moving shape can
//! uncover a layer behind it or slide under one in front of it.

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;

use crate::geometry::Region;
use crate::layer::{LayerStack, MovingLayer};

/// Commits pending motion for `movers` and repaints what they swept.
///
/// The `pos_last <- pos <- pos_next` shift for all movers happens inside one
/// critical section; painting happens outside it. Each mover's old bounds and
/// new bounds are painted as separate windows, so pixels outside both are not
/// written.
pub fn redraw<D>(
    layers: &mut LayerStack,
    movers: &[MovingLayer],
    background: Rgb565,
    display: &mut D,
) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb565>,
{
    critical_section::with(|_| {
        for mover in movers {
            layers.layer_mut(mover.layer).commit();
        }
    });

    for mover in movers {
        let layer = layers.layer(mover.layer);
        let old = layers.bounds_at(mover.layer, layer.pos_last);
        let new = layers.bounds(mover.layer);
        if old != new {
            paint(layers, old, background, display)?;
        }
        paint(layers, new, background, display)?;
    }
    Ok(())
}

/// Full repaint: clears to `background` and draws every layer's bounds.
///
/// Pending and previous positions are reset to the current ones first, so the
/// next `redraw` starts from what is on screen.
pub fn draw_layers<D>(
    layers: &mut LayerStack,
    background: Rgb565,
    display: &mut D,
) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb565>,
{
    layers.settle_all();
    display.clear(background)?;
    for layer in layers.iter() {
        let bounds = layers.shape(layer.shape).bounds(layer.pos);
        paint(layers, bounds, background, display)?;
    }
    Ok(())
}

/// Streams the resolved colors of `region`, clipped to the display, in raster
/// order.
fn paint<D>(
    layers: &LayerStack,
    region: Region,
    background: Rgb565,
    display: &mut D,
) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb565>,
{
    let area = region.to_rectangle().intersection(&display.bounding_box());
    if area.is_zero_sized() {
        return Ok(());
    }
    let colors = area
        .points()
        .map(|p| layers.probe(p.into()).unwrap_or(background));
    display.fill_contiguous(&area, colors)
}
