use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SignError {
    /// Renderer has not been laid out yet.
    #[error("document viewport has zero area")]
    DegenerateViewport,
    #[error("zoom factor must be positive")]
    InvalidZoom,
    #[error("failed to load document: {0}")]
    DocumentLoad(String),
    #[error("no signature has been captured")]
    MissingSignature,
    #[error("no document selected")]
    NoDocument,
    #[error("invalid command: {0}")]
    InvalidCommand(String),
}

impl SignError {
    /// Stable identifier sent back to the Kotlin shell.
    pub fn code(&self) -> &'static str {
        match self {
            SignError::DegenerateViewport => "degenerate_viewport",
            SignError::InvalidZoom => "invalid_zoom",
            SignError::DocumentLoad(_) => "document_load_failed",
            SignError::MissingSignature => "missing_signature",
            SignError::NoDocument => "no_document",
            SignError::InvalidCommand(_) => "invalid_command",
        }
    }

    /// Code plus detail, in the `code:detail` shape used for `last_error`.
    pub fn wire(&self) -> String {
        match self {
            SignError::DocumentLoad(detail) | SignError::InvalidCommand(detail) => {
                format!("{}:{detail}", self.code())
            }
            _ => self.code().to_string(),
        }
    }

    /// Translated, user-facing text for the toast.
    pub fn user_message(&self) -> String {
        match self {
            SignError::DegenerateViewport => rust_i18n::t!("error_viewport_not_ready").into_owned(),
            SignError::InvalidZoom => rust_i18n::t!("error_invalid_zoom").into_owned(),
            SignError::DocumentLoad(detail) => {
                rust_i18n::t!("error_loading_pdf", message = detail).into_owned()
            }
            SignError::MissingSignature => rust_i18n::t!("provide_signature").into_owned(),
            SignError::NoDocument => rust_i18n::t!("select_pdf_first").into_owned(),
            SignError::InvalidCommand(detail) => {
                rust_i18n::t!("error_invalid_command", message = detail).into_owned()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_codes_carry_detail_only_when_present() {
        assert_eq!(SignError::InvalidZoom.wire(), "invalid_zoom");
        assert_eq!(
            SignError::DocumentLoad("pdf_parse_failed".into()).wire(),
            "document_load_failed:pdf_parse_failed"
        );
    }

    #[test]
    fn user_message_is_translated_text() {
        let _guard = crate::router::tests::lock_tests();
        rust_i18n::set_locale("en");
        assert_eq!(
            SignError::MissingSignature.user_message(),
            "Please provide a signature."
        );
        assert!(SignError::DocumentLoad("boom".into())
            .user_message()
            .contains("boom"));
    }
}
