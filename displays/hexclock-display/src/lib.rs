//! Display abstraction for the HexClock face
//!
//! This crate provides:
//! - `DrawSurface` trait: the handful of primitives the display core sequences
//! - `Color` palette: the 9 colours a widget can carry in a 4-bit index
//! - `GraphicsSurface`: a `DrawSurface` over any `embedded-graphics` target
//! - `RecordingSurface` (feature `mock`): records draw calls for tests
//!
//! # Architecture
//!
//! The core never talks to the panel controller directly. Board code wraps
//! the real driver (RA8875 on the original hardware) in a `DrawSurface`
//! implementation; host tests use the recorder to assert exactly which draw
//! calls a refresh produced.

#![no_std]
#![deny(unsafe_code)]

pub mod backend;
pub mod color;
pub mod graphics;
#[cfg(any(test, feature = "mock"))]
pub mod mock;

// Re-export key types
pub use backend::{Bounds, DisplayError, DrawSurface, Font, Rotation};
pub use color::{Color, UnmappedColor, PALETTE};
pub use graphics::GraphicsSurface;
