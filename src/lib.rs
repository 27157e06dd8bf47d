//! Shape motion demo for small SPI LCDs.
//!
//! A handful of shapes ("layers") sit in a fixed front-to-back order. Some of
//! them move: a ball bouncing inside a fenced field and two paddles driven by
//! switches. Each physics step repaints only the boxes the moving layers
//! swept, resolving every pixel against the whole layer stack, so nothing
//! ever needs a full-screen framebuffer.
//!
//! The library is `no_std` and talks to the panel through
//! [`embedded_graphics::draw_target::DrawTarget`]. The RP2040 firmware lives
//! in `src/main.rs` behind the `firmware` feature.

#![cfg_attr(not(test), no_std)]

pub mod config;
pub mod game;
pub mod geometry;
pub mod hud;
pub mod input;
pub mod layer;
pub mod physics;
pub mod render;
pub mod shape;
pub mod tone;

#[cfg(test)]
mod testing;

pub use config::GameConfig;
pub use game::GameState;
pub use geometry::{Axis, Region, Vec2};
pub use input::{Paddle, SwitchMask};
pub use layer::{Layer, LayerStack, MovingLayer, MovingLayers, SceneError};
pub use physics::{Advance, Field, Scores, ScoringRule, advance};
pub use render::{draw_layers, redraw};
pub use shape::Shape;
pub use tone::{Buzzer, ToneDriver};
