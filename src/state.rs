use crate::features::document::DocumentState;
use crate::features::placement::OverlayState;
use crate::features::signature::SignatureState;
use crate::geometry::NormalizedPlacement;
use crate::i18n::Locale;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Home,
    Document,
    SignaturePad,
}

pub struct AppState {
    pub nav_stack: Vec<Screen>,
    pub locale: Locale,
    pub last_error: Option<String>,
    /// One-shot message; consumed by the next render.
    pub toast: Option<String>,
    pub document: DocumentState,
    pub signature: SignatureState,
    pub overlay: OverlayState,
    pub last_placement: Option<NormalizedPlacement>,
}

impl AppState {
    // const so it can be used in static initialization
    pub const fn new() -> Self {
        Self {
            nav_stack: Vec::new(),
            locale: Locale::English,
            last_error: None,
            toast: None,
            document: DocumentState::new(),
            signature: SignatureState::new(),
            overlay: OverlayState::new(),
            last_placement: None,
        }
    }

    pub fn ensure_navigation(&mut self) {
        if self.nav_stack.is_empty() {
            self.nav_stack.push(Screen::Home);
        }
    }

    pub fn current_screen(&self) -> Screen {
        self.nav_stack.last().copied().unwrap_or(Screen::Home)
    }

    pub fn nav_depth(&self) -> usize {
        let depth = self.nav_stack.len();
        if depth == 0 { 1 } else { depth }
    }

    pub fn push_screen(&mut self, screen: Screen) {
        self.ensure_navigation();
        if self.current_screen() != screen {
            self.nav_stack.push(screen);
        }
    }

    pub fn pop_screen(&mut self) {
        self.ensure_navigation();
        if self.nav_stack.len() > 1 {
            self.nav_stack.pop();
        }
    }

    pub fn reset_navigation(&mut self) {
        self.nav_stack.clear();
        self.nav_stack.push(Screen::Home);
    }

    /// Start a fresh document session: the overlay goes back to hidden and
    /// any previous capture is dropped. Viewport bounds belong to the host
    /// layout and survive.
    pub fn begin_document_session(&mut self) {
        self.document.reset_session();
        self.signature.reset();
        self.overlay.reset();
        self.last_placement = None;
    }

    pub fn reset_runtime(&mut self) {
        self.last_error = None;
        self.toast = None;
        self.begin_document_session();
        self.document.bounds = None;
    }

    pub fn report(&mut self, message: String) {
        self.toast = Some(message);
    }
}
