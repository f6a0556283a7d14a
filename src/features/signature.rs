use std::io::Cursor;

use base64::engine::general_purpose::STANDARD as B64;
use base64::Engine;
use image::imageops::FilterType;
use image::{DynamicImage, ImageOutputFormat, RgbaImage};

use crate::error::SignError;
use crate::state::{AppState, Screen};

/// Edge length, in pixels, of the captured signature once placed on the document.
pub const CAPTURED_SIGNATURE_PX: u32 = 150;

#[derive(Debug, Clone, PartialEq)]
pub struct SignatureState {
    /// PNG of the accepted signature, already scaled for the overlay.
    pub image_base64: Option<String>,
    /// Set when the user pressed "clear" on the pad and has not drawn since.
    pub pad_cleared: bool,
}

impl SignatureState {
    pub const fn new() -> Self {
        Self {
            image_base64: None,
            pad_cleared: false,
        }
    }

    pub fn reset(&mut self) {
        self.image_base64 = None;
        self.pad_cleared = false;
    }

    pub fn is_captured(&self) -> bool {
        self.image_base64.is_some()
    }
}

/// Decode the pad output, reject blank captures, and scale to overlay size.
pub fn prepare_signature(encoded: &str) -> Result<String, SignError> {
    let trimmed = encoded.trim();
    if trimmed.is_empty() {
        return Err(SignError::MissingSignature);
    }
    // The pad may send a data URL.
    let payload = trimmed
        .split_once("base64,")
        .map(|(_, rest)| rest)
        .unwrap_or(trimmed);
    let bytes = B64.decode(payload.as_bytes()).map_err(|e| {
        log::warn!(target: "Signature", "signature_decode_failed:{e}");
        SignError::MissingSignature
    })?;
    let img = image::load_from_memory(&bytes)
        .map_err(|e| {
            log::warn!(target: "Signature", "signature_image_invalid:{e}");
            SignError::MissingSignature
        })?
        .to_rgba8();

    if is_blank(&img) {
        return Err(SignError::MissingSignature);
    }

    let scaled = image::imageops::resize(
        &img,
        CAPTURED_SIGNATURE_PX,
        CAPTURED_SIGNATURE_PX,
        FilterType::Triangle,
    );
    encode_png(scaled)
}

fn is_blank(img: &RgbaImage) -> bool {
    img.width() == 0 || img.height() == 0 || img.pixels().all(|p| p[3] == 0)
}

fn encode_png(img: RgbaImage) -> Result<String, SignError> {
    let mut out = Cursor::new(Vec::new());
    DynamicImage::ImageRgba8(img)
        .write_to(&mut out, ImageOutputFormat::Png)
        .map_err(|e| {
            log::error!(target: "Signature", "signature_encode_failed:{e}");
            SignError::MissingSignature
        })?;
    Ok(B64.encode(out.into_inner()))
}

pub fn handle_pad_open(state: &mut AppState) -> Result<(), SignError> {
    if !state.document.is_loaded() {
        return Err(SignError::NoDocument);
    }
    state.signature.pad_cleared = false;
    state.push_screen(Screen::SignaturePad);
    Ok(())
}

pub fn handle_pad_clear(state: &mut AppState) {
    state.signature.pad_cleared = true;
}

/// "Done" on the pad: accept the capture and move the overlay into place.
pub fn handle_signature_done(state: &mut AppState, encoded: Option<&str>) -> Result<(), SignError> {
    if !state.document.is_loaded() {
        return Err(SignError::NoDocument);
    }
    let encoded = encoded.ok_or(SignError::MissingSignature)?;
    let prepared = prepare_signature(encoded)?;
    let bounds = state
        .document
        .bounds
        .filter(|b| !b.is_degenerate())
        .ok_or(SignError::DegenerateViewport)?;

    state.signature.image_base64 = Some(prepared);
    state.signature.pad_cleared = false;
    state
        .overlay
        .attach_signature(&bounds, CAPTURED_SIGNATURE_PX as f32);
    if state.current_screen() == Screen::SignaturePad {
        state.pop_screen();
    }
    log::info!(target: "Signature", "signature captured");
    Ok(())
}
