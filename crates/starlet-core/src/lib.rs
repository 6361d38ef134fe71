//! Core types and traits for Starlet.
//!
//! This crate provides foundational types used throughout Starlet:
//! - Geometric primitives: [`Point`], [`Size`], [`Rect`]
//! - Color representation: [`Color`]
//! - Layout constraints: [`Constraints`]
//! - Pointer input: [`Event`], [`MouseButton`]
//! - Rendering: [`Widget`], [`Canvas`], [`Brick`] and the virtual [`Element`] tree

mod brick;
pub mod canvas;
mod color;
mod constraints;
pub mod element;
mod event;
mod geometry;
pub mod widget;

pub use brick::{Brick, BrickAssertion, BrickVerification};
pub use canvas::{DrawCommand, RecordingCanvas};
pub use color::{Color, ColorParseError};
pub use constraints::Constraints;
pub use element::{Element, Node};
pub use event::{Event, MouseButton};
pub use geometry::{Point, Rect, Size};
pub use widget::{AccessibleRole, Canvas, FontWeight, LayoutResult, TextStyle, TypeId, Widget};
