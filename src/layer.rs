//! Layers and the moving-layer table.
//!
//! `LayerStack` owns a small arena of shapes and the ordered list of layers
//! that place them on screen. Order is draw order, front first: when two
//! layers cover a pixel, the earlier one wins. `MovingLayers` is a separate
//! table attaching a velocity to some of those layers, so static layers carry
//! no motion state.

use core::fmt;

use embedded_graphics::pixelcolor::Rgb565;
use heapless::Vec;

use crate::geometry::{Region, Vec2};
use crate::shape::Shape;

pub const MAX_SHAPES: usize = 5;
pub const MAX_LAYERS: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ShapeId(u8);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LayerId(u8);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MoverId(u8);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SceneError {
    ShapeCapacity,
    LayerCapacity,
    MoverCapacity,
    UnknownShape(ShapeId),
    UnknownLayer(LayerId),
}

impl fmt::Display for SceneError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SceneError::ShapeCapacity => write!(f, "more than {MAX_SHAPES} shapes"),
            SceneError::LayerCapacity => write!(f, "more than {MAX_LAYERS} layers"),
            SceneError::MoverCapacity => write!(f, "more than {MAX_LAYERS} moving layers"),
            SceneError::UnknownShape(id) => write!(f, "no shape with index {}", id.0),
            SceneError::UnknownLayer(id) => write!(f, "no layer with index {}", id.0),
        }
    }
}

/// A shape placed on screen.
///
/// `pos` is what is currently drawn. `pos_next` is where the physics step
/// wants the layer to be on the next redraw, and `pos_last` is where it was
/// drawn before the last redraw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layer {
    pub shape: ShapeId,
    pub pos: Vec2,
    pub pos_last: Vec2,
    pub pos_next: Vec2,
    pub color: Rgb565,
}

impl Layer {
    pub fn new(shape: ShapeId, pos: Vec2, color: Rgb565) -> Self {
        Self {
            shape,
            pos,
            pos_last: pos,
            pos_next: pos,
            color,
        }
    }

    /// Makes the pending position current.
    pub fn commit(&mut self) {
        self.pos_last = self.pos;
        self.pos = self.pos_next;
    }

    /// Forgets any pending or previous motion.
    pub fn settle(&mut self) {
        self.pos_last = self.pos;
        self.pos_next = self.pos;
    }
}

#[derive(Debug, Clone, Default)]
pub struct LayerStack {
    shapes: Vec<Shape, MAX_SHAPES>,
    layers: Vec<Layer, MAX_LAYERS>,
}

impl LayerStack {
    pub const fn new() -> Self {
        Self {
            shapes: Vec::new(),
            layers: Vec::new(),
        }
    }

    pub fn add_shape(&mut self, shape: Shape) -> Result<ShapeId, SceneError> {
        let id = ShapeId(self.shapes.len() as u8);
        self.shapes
            .push(shape)
            .map_err(|_| SceneError::ShapeCapacity)?;
        Ok(id)
    }

    /// Appends `layer` behind every layer already in the stack.
    pub fn push(&mut self, layer: Layer) -> Result<LayerId, SceneError> {
        if usize::from(layer.shape.0) >= self.shapes.len() {
            return Err(SceneError::UnknownShape(layer.shape));
        }
        let id = LayerId(self.layers.len() as u8);
        self.layers
            .push(layer)
            .map_err(|_| SceneError::LayerCapacity)?;
        Ok(id)
    }

    pub fn contains(&self, id: LayerId) -> bool {
        usize::from(id.0) < self.layers.len()
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Panics if `id` was issued by another stack.
    pub fn layer(&self, id: LayerId) -> &Layer {
        &self.layers[usize::from(id.0)]
    }

    pub fn layer_mut(&mut self, id: LayerId) -> &mut Layer {
        &mut self.layers[usize::from(id.0)]
    }

    pub fn shape(&self, id: ShapeId) -> &Shape {
        &self.shapes[usize::from(id.0)]
    }

    /// Layers front to back.
    pub fn iter(&self) -> impl Iterator<Item = &Layer> {
        self.layers.iter()
    }

    /// Bounds of the layer's shape at its current position.
    pub fn bounds(&self, id: LayerId) -> Region {
        let layer = self.layer(id);
        self.bounds_at(id, layer.pos)
    }

    /// Bounds of the layer's shape if it were centered on `pos`.
    pub fn bounds_at(&self, id: LayerId, pos: Vec2) -> Region {
        self.shape(self.layer(id).shape).bounds(pos)
    }

    /// Color of the front-most layer covering `point`, if any.
    pub fn probe(&self, point: Vec2) -> Option<Rgb565> {
        self.layers
            .iter()
            .find(|layer| self.shape(layer.shape).contains(layer.pos, point))
            .map(|layer| layer.color)
    }

    /// Resets every layer's previous and pending position to the current one.
    pub fn settle_all(&mut self) {
        for layer in self.layers.iter_mut() {
            layer.settle();
        }
    }
}

/// A layer that moves by `velocity` on every physics step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MovingLayer {
    pub layer: LayerId,
    pub velocity: Vec2,
}

#[derive(Debug, Clone, Default)]
pub struct MovingLayers {
    entries: Vec<MovingLayer, MAX_LAYERS>,
}

impl MovingLayers {
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub fn push(
        &mut self,
        layers: &LayerStack,
        layer: LayerId,
        velocity: Vec2,
    ) -> Result<MoverId, SceneError> {
        if !layers.contains(layer) {
            return Err(SceneError::UnknownLayer(layer));
        }
        let id = MoverId(self.entries.len() as u8);
        self.entries
            .push(MovingLayer { layer, velocity })
            .map_err(|_| SceneError::MoverCapacity)?;
        Ok(id)
    }

    pub fn get(&self, id: MoverId) -> &MovingLayer {
        &self.entries[usize::from(id.0)]
    }

    pub fn get_mut(&mut self, id: MoverId) -> &mut MovingLayer {
        &mut self.entries[usize::from(id.0)]
    }

    /// Single-entry slice, for redrawing one mover on its own.
    pub fn only(&self, id: MoverId) -> &[MovingLayer] {
        core::slice::from_ref(self.get(id))
    }

    pub fn as_slice(&self) -> &[MovingLayer] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_graphics::pixelcolor::RgbColor;

    fn two_layer_stack() -> (LayerStack, LayerId, LayerId) {
        let mut stack = LayerStack::new();
        let square = stack.add_shape(Shape::rect(2, 2)).unwrap();
        let big = stack.add_shape(Shape::rect(5, 5)).unwrap();
        let front = stack
            .push(Layer::new(square, Vec2::new(10, 10), Rgb565::RED))
            .unwrap();
        let back = stack
            .push(Layer::new(big, Vec2::new(10, 10), Rgb565::BLUE))
            .unwrap();
        (stack, front, back)
    }

    #[test]
    fn test_probe_first_match_wins() {
        let (stack, _, _) = two_layer_stack();
        assert_eq!(stack.probe(Vec2::new(10, 10)), Some(Rgb565::RED));
        assert_eq!(stack.probe(Vec2::new(14, 10)), Some(Rgb565::BLUE));
        assert_eq!(stack.probe(Vec2::new(16, 10)), None);
    }

    #[test]
    fn test_shared_shape() {
        let mut stack = LayerStack::new();
        let dot = stack.add_shape(Shape::circle(1)).unwrap();
        let a = stack
            .push(Layer::new(dot, Vec2::new(0, 0), Rgb565::RED))
            .unwrap();
        let b = stack
            .push(Layer::new(dot, Vec2::new(20, 0), Rgb565::GREEN))
            .unwrap();
        assert_eq!(stack.layer(a).shape, stack.layer(b).shape);
        assert_eq!(stack.probe(Vec2::new(20, 1)), Some(Rgb565::GREEN));
        assert_eq!(stack.probe(Vec2::new(1, 0)), Some(Rgb565::RED));
    }

    #[test]
    fn test_commit_and_settle() {
        let (mut stack, front, _) = two_layer_stack();
        let layer = stack.layer_mut(front);
        layer.pos_next = Vec2::new(12, 13);
        layer.commit();
        assert_eq!(layer.pos_last, Vec2::new(10, 10));
        assert_eq!(layer.pos, Vec2::new(12, 13));

        stack.settle_all();
        let layer = stack.layer(front);
        assert_eq!(layer.pos_last, Vec2::new(12, 13));
        assert_eq!(layer.pos_next, Vec2::new(12, 13));
    }

    #[test]
    fn test_capacity_and_unknown_ids() {
        let mut stack = LayerStack::new();
        for _ in 0..MAX_SHAPES {
            stack.add_shape(Shape::circle(1)).unwrap();
        }
        assert_eq!(
            stack.add_shape(Shape::circle(1)),
            Err(SceneError::ShapeCapacity)
        );
        assert_eq!(
            stack.push(Layer::new(ShapeId(9), Vec2::ZERO, Rgb565::BLACK)),
            Err(SceneError::UnknownShape(ShapeId(9)))
        );
        for _ in 0..MAX_LAYERS {
            stack
                .push(Layer::new(ShapeId(0), Vec2::ZERO, Rgb565::BLACK))
                .unwrap();
        }
        assert_eq!(
            stack.push(Layer::new(ShapeId(0), Vec2::ZERO, Rgb565::BLACK)),
            Err(SceneError::LayerCapacity)
        );

        let mut movers = MovingLayers::new();
        assert_eq!(
            movers.push(&stack, LayerId(7), Vec2::ZERO),
            Err(SceneError::UnknownLayer(LayerId(7)))
        );
        let id = movers.push(&stack, LayerId(1), Vec2::new(1, 2)).unwrap();
        assert_eq!(movers.only(id)[0].velocity, Vec2::new(1, 2));
    }
}
