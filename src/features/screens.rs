use serde_json::Value;

use crate::features::placement::OverlayVisibility;
use crate::state::AppState;
use crate::ui::{
    maybe_push_back, to_value, Button as UiButton, Column as UiColumn, PdfViewer as UiPdfViewer,
    SignatureOverlay as UiSignatureOverlay, SignaturePad as UiSignaturePad, Text as UiText,
};

pub fn render_home_screen(state: &AppState) -> Value {
    let title = rust_i18n::t!("app_title");
    let hint = rust_i18n::t!("select_pdf_hint");
    let pick = rust_i18n::t!("select_pdf");
    let mut children = vec![
        to_value(UiText::new(&title).size(22.0)),
        to_value(UiText::new(&hint).size(14.0)),
        to_value(
            UiButton::new(&pick, "pdf_select")
                .id("button_select_pdf")
                .requires_file_picker(true)
                .content_description("Pick a PDF to sign"),
        ),
    ];
    push_error(&mut children, state);
    to_value(UiColumn::new(children).padding(24))
}

pub fn render_document_screen(state: &AppState) -> Value {
    let doc = &state.document;
    let pick = rust_i18n::t!("select_pdf");
    let mut children = vec![to_value(
        UiButton::new(&pick, "pdf_select")
            .id("button_select_pdf")
            .requires_file_picker(true),
    )];

    if let Some(count) = doc.page_count {
        let uri = doc.source_uri.as_deref().unwrap_or_default();
        if !uri.is_empty() {
            let label = rust_i18n::t!("loaded_document", uri = uri);
            children.push(to_value(UiText::new(&label).size(12.0)));
        }
        let page = doc.current_page + 1;
        let pages = rust_i18n::t!("page_indicator", page = page, count = count);
        children.push(to_value(
            UiText::new(&pages).size(12.0).content_description("page_indicator"),
        ));

        let show_pad = rust_i18n::t!("show_signature_pad");
        let save = rust_i18n::t!("save_position");
        children.push(to_value(
            UiButton::new(&show_pad, "signature_pad_open").id("button_show_bottom_sheet"),
        ));
        children.push(to_value(
            UiButton::new(&save, "save_position").id("button_save_position"),
        ));
        children.push(to_value(UiPdfViewer::new(uri, doc.current_page)));
        if let Some(overlay) = render_overlay(state) {
            children.push(overlay);
        }
    }

    push_error(&mut children, state);
    maybe_push_back(&mut children, state);
    to_value(UiColumn::new(children).padding(8))
}

fn render_overlay(state: &AppState) -> Option<Value> {
    let overlay = &state.overlay;
    let label = match overlay.visibility {
        OverlayVisibility::Hidden => return None,
        OverlayVisibility::PositionedDefault => "positioned_default",
        OverlayVisibility::UserPositioned => "user_positioned",
    };
    Some(to_value(UiSignatureOverlay {
        kind: "SignatureOverlay",
        state: label,
        x: overlay.position.screen_x,
        y: overlay.position.screen_y,
        width: overlay.position.width,
        height: overlay.position.height,
        scale: overlay.scale,
        draggable: overlay.is_draggable(),
        image_base64: state.signature.image_base64.as_deref(),
    }))
}

pub fn render_signature_pad_screen(state: &AppState) -> Value {
    let title = rust_i18n::t!("pad_title");
    let clear = rust_i18n::t!("pad_clear");
    let done = rust_i18n::t!("pad_done");
    let mut children = vec![
        to_value(UiText::new(&title).size(18.0)),
        to_value(
            UiSignaturePad::new("signature")
                .cleared(state.signature.pad_cleared)
                .content_description("Signature drawing area"),
        ),
        to_value(UiButton::new(&clear, "signature_clear").id("button_clear")),
        to_value(UiButton::new(&done, "signature_done").id("button_done")),
    ];
    push_error(&mut children, state);
    maybe_push_back(&mut children, state);
    to_value(UiColumn::new(children).padding(16))
}

fn push_error(children: &mut Vec<Value>, state: &AppState) {
    if let Some(err) = &state.last_error {
        children.push(to_value(
            UiText::new(&format!("Error: {err}"))
                .size(12.0)
                .content_description("error_text"),
        ));
    }
}
