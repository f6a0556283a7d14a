use serde::Serialize;

use crate::error::SignError;
use crate::geometry::{
    clamp_drag_position, compute_relative_position, compute_scale_factor, NormalizedPlacement,
    OverlayPosition, Point, ScrollState, ViewportBounds,
};
use crate::state::AppState;

/// Placeholder overlay size before a signature exists.
pub const DEFAULT_OVERLAY_PX: f32 = 100.0;
/// Gap between the viewport top edge and a freshly placed overlay.
pub const DEFAULT_TOP_PADDING_PX: f32 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum OverlayVisibility {
    Hidden,
    PositionedDefault,
    UserPositioned,
}

/// Pointer-to-overlay offset captured on pointer-down.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragSession {
    pub start_dx: f32,
    pub start_dy: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OverlayState {
    pub visibility: OverlayVisibility,
    pub position: OverlayPosition,
    pub scale: f32,
    pub drag: Option<DragSession>,
}

impl OverlayState {
    pub const fn new() -> Self {
        Self {
            visibility: OverlayVisibility::Hidden,
            position: OverlayPosition::new(0.0, 0.0, DEFAULT_OVERLAY_PX, DEFAULT_OVERLAY_PX),
            scale: 1.0,
            drag: None,
        }
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    pub fn is_visible(&self) -> bool {
        self.visibility != OverlayVisibility::Hidden
    }

    pub fn is_draggable(&self) -> bool {
        self.visibility == OverlayVisibility::UserPositioned
    }

    /// Hidden -> PositionedDefault once the viewport is known. Returns whether
    /// the overlay moved.
    pub fn place_default(&mut self, bounds: &ViewportBounds) -> bool {
        if self.visibility != OverlayVisibility::Hidden {
            return false;
        }
        self.position = default_position(bounds, DEFAULT_OVERLAY_PX);
        self.visibility = OverlayVisibility::PositionedDefault;
        true
    }

    /// A capture resets the overlay to the top-left corner and makes it draggable.
    /// A hidden overlay is default-placed first so the walk stays
    /// Hidden -> PositionedDefault -> UserPositioned.
    pub fn attach_signature(&mut self, bounds: &ViewportBounds, edge_px: f32) {
        self.place_default(bounds);
        self.position = default_position(bounds, edge_px);
        self.visibility = OverlayVisibility::UserPositioned;
        self.drag = None;
    }
}

fn default_position(bounds: &ViewportBounds, edge_px: f32) -> OverlayPosition {
    OverlayPosition::new(
        bounds.left as f32,
        bounds.top as f32 + DEFAULT_TOP_PADDING_PX,
        edge_px,
        edge_px,
    )
}

pub fn handle_pointer_down(state: &mut AppState, raw: Point) -> bool {
    let overlay = &mut state.overlay;
    if !overlay.is_draggable() {
        return false;
    }
    overlay.drag = Some(DragSession {
        start_dx: raw.x - overlay.position.screen_x,
        start_dy: raw.y - overlay.position.screen_y,
    });
    true
}

pub fn handle_pointer_move(state: &mut AppState, raw: Point) -> Result<bool, SignError> {
    let Some(session) = state.overlay.drag else {
        return Ok(false);
    };
    let bounds = state.document.bounds.ok_or(SignError::DegenerateViewport)?;
    let proposed = Point::new(raw.x - session.start_dx, raw.y - session.start_dy);
    let clamped = clamp_drag_position(proposed, state.overlay.position.size(), &bounds);
    state.overlay.position.move_to(clamped);
    Ok(true)
}

pub fn handle_pointer_up(state: &mut AppState) -> bool {
    state.overlay.drag.take().is_some()
}

pub fn handle_pinch(state: &mut AppState, scale_delta: f32) -> bool {
    if !state.overlay.is_draggable() {
        return false;
    }
    state.overlay.scale = compute_scale_factor(state.overlay.scale, scale_delta);
    true
}

/// Save action: map the overlay's current screen position to page fractions.
pub fn handle_save_position(
    state: &mut AppState,
    scroll: Option<ScrollState>,
) -> Result<NormalizedPlacement, SignError> {
    let page_count = state.document.page_count.ok_or(SignError::NoDocument)?;
    if !state.signature.is_captured() {
        return Err(SignError::MissingSignature);
    }
    let bounds = state.document.bounds.ok_or(SignError::DegenerateViewport)?;
    let scroll = scroll.unwrap_or_else(|| {
        log::debug!(target: "Signature", "no scroll state on save, assuming top of document at zoom 1");
        ScrollState {
            position_offset: 0.0,
            zoom_factor: 1.0,
            page_count,
            viewport_pixel_height: bounds.height().clamp(0, i64::from(u32::MAX)) as u32,
        }
    });

    let placement = compute_relative_position(
        &state.overlay.position,
        &bounds,
        &scroll,
        state.document.current_page,
    )?;

    log::debug!(
        target: "Signature",
        "Page: {}, Relative X: {}, Relative Y: {}",
        placement.page,
        placement.fraction_x,
        placement.fraction_y
    );
    state.last_placement = Some(placement);
    Ok(placement)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn captured_state(bounds: ViewportBounds) -> AppState {
        let mut state = AppState::new();
        state.document.page_count = Some(3);
        state.document.bounds = Some(bounds);
        state.overlay.place_default(&bounds);
        state.signature.image_base64 = Some("png".into());
        state.overlay.attach_signature(&bounds, 150.0);
        state
    }

    #[test]
    fn overlay_state_machine_follows_session() {
        let bounds = ViewportBounds::new(0, 100, 400, 900);
        let mut overlay = OverlayState::new();
        assert!(!overlay.is_visible());

        assert!(overlay.place_default(&bounds));
        assert_eq!(overlay.visibility, OverlayVisibility::PositionedDefault);
        assert_eq!(overlay.position, OverlayPosition::new(0.0, 110.0, 100.0, 100.0));
        assert!(!overlay.place_default(&bounds));

        overlay.attach_signature(&bounds, 150.0);
        assert_eq!(overlay.visibility, OverlayVisibility::UserPositioned);
        assert_eq!(overlay.position.width, 150.0);

        overlay.position.move_to(Point::new(200.0, 300.0));
        assert!(!overlay.place_default(&bounds));
        assert_eq!(overlay.position.origin(), Point::new(200.0, 300.0));
    }

    #[test]
    fn capture_on_hidden_overlay_passes_through_default() {
        let bounds = ViewportBounds::new(5, 20, 405, 820);
        let mut overlay = OverlayState::new();
        overlay.attach_signature(&bounds, 150.0);
        assert_eq!(overlay.visibility, OverlayVisibility::UserPositioned);
        assert_eq!(overlay.position, OverlayPosition::new(5.0, 30.0, 150.0, 150.0));
        assert!(!overlay.place_default(&bounds));
    }

    #[test]
    fn save_without_scroll_uses_viewport_height() {
        let bounds = ViewportBounds::new(0, 0, 200, 400);
        let mut state = captured_state(bounds);
        state.overlay.position.move_to(Point::new(100.0, 200.0));
        let placement = handle_save_position(&mut state, None).unwrap();
        assert_eq!(placement.page, 0);
        assert!((placement.fraction_x - 0.5).abs() < 1e-4);
        assert!((placement.fraction_y - 0.5).abs() < 1e-4);
    }

    #[test]
    fn drag_keeps_grab_offset_and_clamps() {
        let bounds = ViewportBounds::new(0, 100, 400, 900);
        let mut state = captured_state(bounds);
        // overlay at (0, 110); grab 20px into it
        assert!(handle_pointer_down(&mut state, Point::new(20.0, 130.0)));
        assert_eq!(
            state.overlay.drag,
            Some(DragSession {
                start_dx: 20.0,
                start_dy: 20.0
            })
        );

        handle_pointer_move(&mut state, Point::new(120.0, 330.0)).unwrap();
        assert_eq!(state.overlay.position.origin(), Point::new(100.0, 310.0));

        handle_pointer_move(&mut state, Point::new(2000.0, -50.0)).unwrap();
        assert_eq!(state.overlay.position.origin(), Point::new(250.0, 100.0));

        assert!(handle_pointer_up(&mut state));
        assert!(state.overlay.drag.is_none());
        assert!(!handle_pointer_move(&mut state, Point::new(0.0, 0.0)).unwrap());
        assert_eq!(state.overlay.position.origin(), Point::new(250.0, 100.0));
    }

    #[test]
    fn gestures_are_ignored_before_capture() {
        let bounds = ViewportBounds::new(0, 0, 400, 800);
        let mut state = AppState::new();
        state.document.page_count = Some(1);
        state.document.bounds = Some(bounds);
        state.overlay.place_default(&bounds);
        assert!(!handle_pointer_down(&mut state, Point::new(10.0, 10.0)));
        assert!(!handle_pinch(&mut state, 2.0));
        assert_eq!(state.overlay.scale, 1.0);
    }

    #[test]
    fn pinch_accumulates_within_limits() {
        let mut state = captured_state(ViewportBounds::new(0, 0, 400, 800));
        handle_pinch(&mut state, 2.0);
        handle_pinch(&mut state, 2.0);
        assert_eq!(state.overlay.scale, 3.0);
        handle_pinch(&mut state, 0.1);
        assert_eq!(state.overlay.scale, 0.5);
    }

    #[test]
    fn save_reports_relative_position() {
        let bounds = ViewportBounds::new(0, 0, 300, 300);
        let mut state = captured_state(bounds);
        state.document.current_page = 1;
        state.overlay.position.move_to(Point::new(0.0, 50.0));
        let scroll = ScrollState {
            position_offset: 0.5,
            zoom_factor: 1.0,
            page_count: 3,
            viewport_pixel_height: 300,
        };
        let placement = handle_save_position(&mut state, Some(scroll)).unwrap();
        assert_eq!(placement.page, 1);
        assert!((placement.fraction_y - 500.0 / 300.0).abs() < 1e-4);
        assert_eq!(state.last_placement, Some(placement));
    }

    #[test]
    fn failed_save_leaves_state_untouched() {
        let bounds = ViewportBounds::new(0, 0, 300, 300);
        let mut state = captured_state(bounds);
        let previous = state.overlay.clone();
        let scroll = ScrollState {
            position_offset: 0.0,
            zoom_factor: 0.0,
            page_count: 3,
            viewport_pixel_height: 300,
        };
        assert_eq!(
            handle_save_position(&mut state, Some(scroll)),
            Err(SignError::InvalidZoom)
        );
        assert_eq!(state.overlay, previous);
        assert!(state.last_placement.is_none());

        state.document.bounds = Some(ViewportBounds::new(0, 0, 0, 300));
        assert_eq!(
            handle_save_position(&mut state, None),
            Err(SignError::DegenerateViewport)
        );
    }

    #[test]
    fn save_without_signature_is_rejected() {
        let mut state = AppState::new();
        assert_eq!(handle_save_position(&mut state, None), Err(SignError::NoDocument));
        state.document.page_count = Some(1);
        state.document.bounds = Some(ViewportBounds::new(0, 0, 100, 100));
        assert_eq!(
            handle_save_position(&mut state, None),
            Err(SignError::MissingSignature)
        );
    }
}
