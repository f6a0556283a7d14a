//! Native core of the Dynamic Sign Android app.
//!
//! Kotlin forwards every UI event as a JSON command through the JNI
//! `dispatch` entry point and renders the widget tree it gets back.
//! The placement math lives in [`geometry`] and has no Android dependency.

rust_i18n::i18n!("locales", fallback = "en");

pub mod error;
pub mod features;
pub mod geometry;
mod i18n;
pub mod logging;
mod router;
pub mod state;
mod ui;

pub use error::SignError;
pub use geometry::{
    clamp_drag_position, compute_relative_position, compute_scale_factor, NormalizedPlacement,
    OverlayPosition, Point, ScrollState, Size, ViewportBounds,
};
