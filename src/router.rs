use crate::error::SignError;
use crate::features::document::{
    handle_document_open, handle_layout_changed, handle_page_changed, DocumentSource,
};
use crate::features::placement::{
    handle_pinch, handle_pointer_down, handle_pointer_move, handle_pointer_up,
    handle_save_position,
};
use crate::features::screens::{
    render_document_screen, render_home_screen, render_signature_pad_screen,
};
use crate::features::signature::{handle_pad_clear, handle_pad_open, handle_signature_done};
use crate::geometry::{Point, ScrollState, ViewportBounds};
use crate::i18n::apply_locale;
use crate::logging;
use crate::state::{AppState, Screen};

use jni::objects::{JClass, JString};
use jni::sys::jstring;
use jni::JNIEnv;
use serde::Deserialize;
use serde_json::{json, Value};
use std::{
    fs::File,
    os::unix::io::{FromRawFd, RawFd},
    ptr,
    sync::Mutex,
};

static STATE: Mutex<AppState> = Mutex::new(AppState::new());

#[derive(Debug, Default, Deserialize)]
struct Command {
    action: String,
    fd: Option<i32>,
    path: Option<String>,
    uri: Option<String>,
    error: Option<String>,
    bounds: Option<ViewportBounds>,
    scroll: Option<ScrollState>,
    page: Option<u32>,
    raw_x: Option<f32>,
    raw_y: Option<f32>,
    scale_delta: Option<f32>,
    signature: Option<String>,
    locale: Option<String>,
}

#[derive(Debug)]
enum Action {
    Init {
        locale: Option<String>,
    },
    Reset,
    Back,
    SetLocale {
        locale: String,
    },
    PdfSelect {
        path: Option<String>,
        uri: Option<String>,
        error: Option<String>,
    },
    PdfLayoutChanged {
        bounds: ViewportBounds,
    },
    PdfPageChanged {
        page: u32,
        bounds: Option<ViewportBounds>,
    },
    PdfRenderError {
        error: Option<String>,
    },
    SignaturePadOpen,
    SignatureClear,
    SignatureDone {
        signature: Option<String>,
    },
    OverlayPointerDown(Point),
    OverlayPointerMove(Point),
    OverlayPointerUp,
    OverlayPinch {
        scale_delta: f32,
    },
    SavePosition {
        scroll: Option<ScrollState>,
    },
}

/// Closes a descriptor Kotlin handed over if no handler consumed it.
struct FdHandle(Option<i32>);

impl FdHandle {
    fn new(fd: Option<i32>) -> Self {
        Self(fd)
    }

    fn take(&mut self) -> Option<i32> {
        self.0.take()
    }
}

impl Drop for FdHandle {
    fn drop(&mut self) {
        if let Some(fd) = self.0.take() {
            if fd >= 0 {
                unsafe { File::from_raw_fd(fd as RawFd) };
            }
        }
    }
}

fn pointer(raw_x: Option<f32>, raw_y: Option<f32>) -> Result<Point, SignError> {
    match (raw_x, raw_y) {
        (Some(x), Some(y)) => Ok(Point::new(x, y)),
        _ => Err(SignError::InvalidCommand("missing_pointer".into())),
    }
}

fn parse_action(command: Command) -> Result<Action, SignError> {
    let Command {
        action,
        fd: _,
        path,
        uri,
        error,
        bounds,
        scroll,
        page,
        raw_x,
        raw_y,
        scale_delta,
        signature,
        locale,
    } = command;

    match action.as_str() {
        "init" => Ok(Action::Init { locale }),
        "reset" => Ok(Action::Reset),
        "back" => Ok(Action::Back),
        "set_locale" => Ok(Action::SetLocale {
            locale: locale.ok_or_else(|| SignError::InvalidCommand("missing_locale".into()))?,
        }),
        "pdf_select" => Ok(Action::PdfSelect {
            path,
            uri,
            error,
        }),
        "pdf_layout_changed" => Ok(Action::PdfLayoutChanged {
            bounds: bounds.ok_or_else(|| SignError::InvalidCommand("missing_bounds".into()))?,
        }),
        "pdf_page_changed" => Ok(Action::PdfPageChanged {
            page: page.ok_or_else(|| SignError::InvalidCommand("missing_page".into()))?,
            bounds,
        }),
        "pdf_render_error" => Ok(Action::PdfRenderError { error }),
        "signature_pad_open" => Ok(Action::SignaturePadOpen),
        "signature_clear" => Ok(Action::SignatureClear),
        "signature_done" => Ok(Action::SignatureDone { signature }),
        "overlay_pointer_down" => Ok(Action::OverlayPointerDown(pointer(raw_x, raw_y)?)),
        "overlay_pointer_move" => Ok(Action::OverlayPointerMove(pointer(raw_x, raw_y)?)),
        "overlay_pointer_up" => Ok(Action::OverlayPointerUp),
        "overlay_pinch" => Ok(Action::OverlayPinch {
            scale_delta: scale_delta
                .ok_or_else(|| SignError::InvalidCommand("missing_scale_delta".into()))?,
        }),
        "save_position" => Ok(Action::SavePosition { scroll }),
        "invalid_json" => Err(SignError::InvalidCommand(format!(
            "invalid_json:{}",
            error.unwrap_or_default()
        ))),
        other => Err(SignError::InvalidCommand(format!("unknown_action:{other}"))),
    }
}

fn report_error(state: &mut AppState, err: SignError) {
    log::warn!("{}", err.wire());
    state.last_error = Some(err.wire());
    state.report(err.user_message());
}

fn handle_command(command: Command) -> Value {
    let mut state = match STATE.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    };
    state.ensure_navigation();

    // Fd ownership is tracked before parsing so a rejected command still closes it.
    let mut fd_handle = FdHandle::new(command.fd);
    log::debug!("dispatch {}", command.action);
    let action = match parse_action(command) {
        Ok(action) => action,
        Err(err) => {
            report_error(&mut state, err);
            return render_ui(&mut state);
        }
    };
    state.last_error = None;

    let mut extra: Option<Value> = None;
    match action {
        Action::Init { locale } => {
            if let Some(locale) = locale {
                apply_locale(&mut state, &locale);
            }
        }
        Action::Reset => {
            state.reset_runtime();
            state.reset_navigation();
        }
        Action::Back => {
            state.pop_screen();
        }
        Action::SetLocale { locale } => {
            apply_locale(&mut state, &locale);
        }
        Action::PdfSelect { path, uri, error } => {
            if let Some(err) = error {
                log::error!(target: "PDFView", "picker failed: {err}");
                state.last_error = Some(err);
                state.report(rust_i18n::t!("unable_to_open_pdf").into_owned());
            } else {
                let source = fd_handle
                    .take()
                    .map(DocumentSource::Fd)
                    .or_else(|| path.map(DocumentSource::Path));
                match source {
                    Some(source) => match handle_document_open(&mut state, source, uri.as_deref())
                    {
                        Ok(count) => {
                            state.report(rust_i18n::t!("pdf_loaded", count = count).into_owned());
                        }
                        Err(err) => report_error(&mut state, err),
                    },
                    None => state.report(rust_i18n::t!("unable_to_open_pdf").into_owned()),
                }
            }
        }
        Action::PdfLayoutChanged { bounds } => handle_layout_changed(&mut state, bounds),
        Action::PdfPageChanged { page, bounds } => {
            if let Err(err) = handle_page_changed(&mut state, page, bounds) {
                report_error(&mut state, err);
            }
        }
        Action::PdfRenderError { error } => {
            let reason = error.unwrap_or_else(|| "render_failed".into());
            log::error!(target: "PDFView", "Error loading PDF: {reason}");
            report_error(&mut state, SignError::DocumentLoad(reason));
        }
        Action::SignaturePadOpen => {
            if let Err(err) = handle_pad_open(&mut state) {
                report_error(&mut state, err);
            }
        }
        Action::SignatureClear => handle_pad_clear(&mut state),
        Action::SignatureDone { signature } => {
            if let Err(err) = handle_signature_done(&mut state, signature.as_deref()) {
                report_error(&mut state, err);
            }
        }
        Action::OverlayPointerDown(raw) => {
            handle_pointer_down(&mut state, raw);
        }
        Action::OverlayPointerMove(raw) => {
            if let Err(err) = handle_pointer_move(&mut state, raw) {
                report_error(&mut state, err);
            }
        }
        Action::OverlayPointerUp => {
            handle_pointer_up(&mut state);
        }
        Action::OverlayPinch { scale_delta } => {
            handle_pinch(&mut state, scale_delta);
        }
        Action::SavePosition { scroll } => match handle_save_position(&mut state, scroll) {
            Ok(placement) => {
                let page = placement.page;
                let x = placement.fraction_x;
                let y = placement.fraction_y;
                state.report(
                    rust_i18n::t!("signature_saved", page = page, x = x, y = y).into_owned(),
                );
                extra = serde_json::to_value(placement).ok();
            }
            Err(err) => report_error(&mut state, err),
        },
    }

    let mut ui = render_ui(&mut state);
    if let (Some(placement), Some(root)) = (extra, ui.as_object_mut()) {
        root.insert("placement".into(), placement);
    }
    ui
}

fn dispatch_json(input: &str) -> Value {
    match serde_json::from_str::<Command>(input) {
        Ok(command) => handle_command(command),
        Err(e) => handle_command(Command {
            action: "invalid_json".into(),
            error: Some(e.to_string()),
            ..Command::default()
        }),
    }
}

fn error_ui(message: &str) -> Value {
    let title = rust_i18n::t!("error_title");
    json!({
        "type": "Column",
        "padding": 24,
        "children": [
            { "type": "Text", "text": title, "size": 18.0 },
            { "type": "Text", "text": message }
        ]
    })
}

/// Render the current screen and hand over any pending toast.
fn render_ui(state: &mut AppState) -> Value {
    let mut ui = match state.current_screen() {
        Screen::Home => render_home_screen(state),
        Screen::Document => render_document_screen(state),
        Screen::SignaturePad => render_signature_pad_screen(state),
    };
    if let (Some(toast), Some(root)) = (state.toast.take(), ui.as_object_mut()) {
        root.insert("toast".into(), Value::String(toast));
    }
    ui
}

#[no_mangle]
pub extern "system" fn Java_com_example_dynamic_1sign_MainActivity_dispatch(
    mut env: JNIEnv,
    _class: JClass,
    input: JString,
) -> jstring {
    logging::init();
    let response = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
        let input_str: String = env
            .get_string(&input)
            .map(|s| s.into())
            .unwrap_or_else(|_| "{}".to_string());
        dispatch_json(&input_str)
    }));

    let json_value = match response {
        Ok(value) => value,
        Err(_) => {
            log::error!("dispatch panicked");
            error_ui("panic")
        }
    };

    let output_string = json_value.to_string();
    match env.new_string(output_string) {
        Ok(java_str) => java_str.into_raw(),
        Err(_) => {
            let fallback = error_ui("jni_new_string_failed").to_string();
            env.new_string(fallback)
                .map(|s| s.into_raw())
                .unwrap_or(ptr::null_mut())
        }
    }
}
