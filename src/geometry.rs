//! Coordinate mapping between the on-screen signature overlay and the
//! document page it sits on.
//!
//! Everything here is pure: no state, no logging, no I/O. The router feeds
//! it the latest layout numbers reported by the Kotlin renderer.

use serde::{Deserialize, Serialize};

use crate::error::SignError;

pub const MIN_SCALE: f32 = 0.5;
pub const MAX_SCALE: f32 = 3.0;

/// Screen-pixel rectangle the document viewer occupies after layout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewportBounds {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl ViewportBounds {
    pub const fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Widened so extreme edges cannot overflow.
    pub const fn width(&self) -> i64 {
        self.right as i64 - self.left as i64
    }

    pub const fn height(&self) -> i64 {
        self.bottom as i64 - self.top as i64
    }

    pub const fn is_degenerate(&self) -> bool {
        self.width() <= 0 || self.height() <= 0
    }
}

/// Scroll and zoom numbers read from the renderer at save time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScrollState {
    /// Fraction in [0,1] of the total scrollable extent already scrolled past.
    pub position_offset: f32,
    pub zoom_factor: f32,
    pub page_count: u32,
    pub viewport_pixel_height: u32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Top-left corner and layout size of the signature overlay, in screen pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct OverlayPosition {
    pub screen_x: f32,
    pub screen_y: f32,
    pub width: f32,
    pub height: f32,
}

impl OverlayPosition {
    pub const fn new(screen_x: f32, screen_y: f32, width: f32, height: f32) -> Self {
        Self {
            screen_x,
            screen_y,
            width,
            height,
        }
    }

    pub const fn origin(&self) -> Point {
        Point::new(self.screen_x, self.screen_y)
    }

    pub const fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    pub fn move_to(&mut self, point: Point) {
        self.screen_x = point.x;
        self.screen_y = point.y;
    }
}

/// Page index plus page-relative fractions, independent of zoom and scroll.
///
/// The fractions are not bounded to [0,1]: a scroll position past the first
/// page yields `fraction_y > 1`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NormalizedPlacement {
    pub page: u32,
    pub fraction_x: f32,
    pub fraction_y: f32,
}

pub fn compute_relative_position(
    overlay: &OverlayPosition,
    bounds: &ViewportBounds,
    scroll: &ScrollState,
    current_page: u32,
) -> Result<NormalizedPlacement, SignError> {
    if bounds.is_degenerate() {
        return Err(SignError::DegenerateViewport);
    }
    // `!(z > 0)` also rejects NaN.
    if !(scroll.zoom_factor > 0.0) {
        return Err(SignError::InvalidZoom);
    }

    let page_height = scroll.viewport_pixel_height as f32 / scroll.zoom_factor;
    let visible_page_top = scroll.position_offset * scroll.page_count as f32 * page_height;

    let width = bounds.width() as f32;
    let height = bounds.height() as f32;
    let fraction_x = (overlay.screen_x - bounds.left as f32) / width;
    let fraction_y = ((overlay.screen_y - bounds.top as f32) + visible_page_top) / height;

    Ok(NormalizedPlacement {
        page: current_page,
        fraction_x,
        fraction_y,
    })
}

/// Keep a dragged overlay inside the viewport.
///
/// When the overlay is larger than the viewport along an axis the range is
/// empty and the result sticks to the left/top edge.
pub fn clamp_drag_position(proposed: Point, overlay_size: Size, bounds: &ViewportBounds) -> Point {
    Point {
        x: clamp_biased(
            proposed.x,
            bounds.left as f32,
            bounds.right as f32 - overlay_size.width,
        ),
        y: clamp_biased(
            proposed.y,
            bounds.top as f32,
            bounds.bottom as f32 - overlay_size.height,
        ),
    }
}

fn clamp_biased(value: f32, min: f32, max: f32) -> f32 {
    if max < min {
        return min;
    }
    value.max(min).min(max)
}

pub fn compute_scale_factor(previous_scale: f32, gesture_scale_delta: f32) -> f32 {
    let next = previous_scale * gesture_scale_delta;
    if next.is_nan() {
        return clamp_biased(previous_scale, MIN_SCALE, MAX_SCALE);
    }
    next.clamp(MIN_SCALE, MAX_SCALE)
}
