use serde::Serialize;
use serde_json::{json, Value};

use crate::state::AppState;

#[derive(Serialize)]
pub struct Text<'a> {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub text: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_description: Option<&'a str>,
}

impl<'a> Text<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            kind: "Text",
            text,
            size: None,
            content_description: None,
        }
    }

    pub fn size(mut self, size: f64) -> Self {
        self.size = Some(size);
        self
    }

    pub fn content_description(mut self, cd: &'a str) -> Self {
        self.content_description = Some(cd);
        self
    }
}

#[derive(Serialize)]
pub struct Button<'a> {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub text: &'a str,
    pub action: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requires_file_picker: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_description: Option<&'a str>,
}

impl<'a> Button<'a> {
    pub fn new(text: &'a str, action: &'a str) -> Self {
        Self {
            kind: "Button",
            text,
            action,
            id: None,
            requires_file_picker: None,
            content_description: None,
        }
    }

    pub fn id(mut self, id: &'a str) -> Self {
        self.id = Some(id);
        self
    }

    pub fn requires_file_picker(mut self, needs: bool) -> Self {
        self.requires_file_picker = Some(needs);
        self
    }

    pub fn content_description(mut self, cd: &'a str) -> Self {
        self.content_description = Some(cd);
        self
    }
}

#[derive(Serialize)]
pub struct Column<'a> {
    #[serde(rename = "type")]
    pub kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub padding: Option<u32>,
    pub children: Vec<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_description: Option<&'a str>,
}

impl<'a> Column<'a> {
    pub fn new(children: Vec<Value>) -> Self {
        Self {
            kind: "Column",
            padding: None,
            children,
            content_description: None,
        }
    }

    pub fn padding(mut self, padding: u32) -> Self {
        self.padding = Some(padding);
        self
    }
}

/// Host-side PDF renderer. Kotlin reports layout, page and scroll changes back.
#[derive(Serialize)]
pub struct PdfViewer<'a> {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub source_uri: &'a str,
    pub default_page: u32,
    pub current_page: u32,
    pub swipe_horizontal: bool,
    pub enable_double_tap: bool,
    pub fit_each_page: bool,
}

impl<'a> PdfViewer<'a> {
    pub fn new(source_uri: &'a str, current_page: u32) -> Self {
        Self {
            kind: "PdfViewer",
            source_uri,
            default_page: 0,
            current_page,
            swipe_horizontal: false,
            enable_double_tap: true,
            fit_each_page: true,
        }
    }
}

/// Draggable image on top of the viewer; the host applies x/y/scale directly.
#[derive(Serialize)]
pub struct SignatureOverlay<'a> {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub state: &'static str,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub scale: f32,
    pub draggable: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_base64: Option<&'a str>,
}

#[derive(Serialize)]
pub struct SignaturePad<'a> {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub bind_key: &'a str,
    pub height_dp: u32,
    pub cleared: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_description: Option<&'a str>,
}

impl<'a> SignaturePad<'a> {
    pub fn new(bind_key: &'a str) -> Self {
        Self {
            kind: "SignaturePad",
            bind_key,
            height_dp: 200,
            cleared: false,
            content_description: None,
        }
    }

    pub fn cleared(mut self, cleared: bool) -> Self {
        self.cleared = cleared;
        self
    }

    pub fn content_description(mut self, cd: &'a str) -> Self {
        self.content_description = Some(cd);
        self
    }
}

/// Widget structs only hold plain fields, so serialization cannot fail.
pub fn to_value<T: Serialize>(widget: T) -> Value {
    serde_json::to_value(widget).unwrap_or_else(|e| {
        json!({
            "type": "Text",
            "text": format!("serialize_error:{e}")
        })
    })
}

pub fn maybe_push_back(children: &mut Vec<Value>, state: &AppState) {
    if state.nav_depth() > 1 {
        let label = rust_i18n::t!("back");
        children.push(to_value(Button::new(&label, "back").id("back_btn")));
    }
}
