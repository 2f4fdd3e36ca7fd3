//! Request validation helpers shared by the notes handlers.
//!
//! Every failure becomes an `invalid_request` [`Error`] whose details name the
//! offending `field` and a stable `code`.

use serde_json::json;

use crate::domain::{Error, NoteDraft, NoteDraftValidationError, NoteId};

/// Detail codes attached to validation failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    MissingHeader,
    MissingField,
    BlankField,
    InvalidNoteId,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::MissingHeader => "missing_header",
            ErrorCode::MissingField => "missing_field",
            ErrorCode::BlankField => "blank_field",
            ErrorCode::InvalidNoteId => "invalid_note_id",
        }
    }
}

/// Newtype for request field and header names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    pub(crate) fn as_str(&self) -> &'static str {
        self.0
    }
}

pub(crate) const TITLE: FieldName = FieldName::new("title");
pub(crate) const NOTE_ID: FieldName = FieldName::new("id");

struct ValidationError {
    field: &'static str,
    message: String,
}

impl ValidationError {
    fn new(field: FieldName, message: impl Into<String>) -> Self {
        Self {
            field: field.as_str(),
            message: message.into(),
        }
    }

    fn with_code(self, code: ErrorCode) -> Error {
        Error::invalid_request(self.message).with_details(json!({
            "field": self.field,
            "code": code.as_str(),
        }))
    }

    fn with_value(self, code: ErrorCode, value: impl Into<String>) -> Error {
        Error::invalid_request(self.message).with_details(json!({
            "field": self.field,
            "value": value.into(),
            "code": code.as_str(),
        }))
    }
}

pub(crate) fn missing_header_error(header: FieldName) -> Error {
    ValidationError::new(header, format!("missing required header: {}", header.as_str()))
        .with_code(ErrorCode::MissingHeader)
}

pub(crate) fn missing_field_error(field: FieldName) -> Error {
    ValidationError::new(field, format!("missing required field: {}", field.as_str()))
        .with_code(ErrorCode::MissingField)
}

pub(crate) fn blank_field_error(field: FieldName) -> Error {
    ValidationError::new(field, format!("{} must not be blank", field.as_str()))
        .with_code(ErrorCode::BlankField)
}

pub(crate) fn invalid_note_id_error(value: &str) -> Error {
    ValidationError::new(NOTE_ID, "note id must be a positive integer")
        .with_value(ErrorCode::InvalidNoteId, value)
}

/// Parse a path segment into a [`NoteId`].
pub(crate) fn parse_note_id(raw: &str) -> Result<NoteId, Error> {
    raw.parse().map_err(|_| invalid_note_id_error(raw))
}

/// Build a [`NoteDraft`] from optional payload fields.
///
/// A missing title and a blank title are reported separately; missing
/// content is treated as empty.
pub(crate) fn parse_note_draft(
    title: Option<String>,
    content: Option<String>,
) -> Result<NoteDraft, Error> {
    let title = title.ok_or_else(|| missing_field_error(TITLE))?;
    NoteDraft::new(title, content.unwrap_or_default()).map_err(|err| match err {
        NoteDraftValidationError::BlankTitle => blank_field_error(TITLE),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::Value;

    fn detail<'a>(err: &'a Error, key: &str) -> Option<&'a str> {
        err.details()
            .and_then(|details| details.get(key))
            .and_then(Value::as_str)
    }

    #[rstest]
    #[case(None, "missing_field")]
    #[case(Some(""), "blank_field")]
    #[case(Some("  \t"), "blank_field")]
    fn draft_rejects_absent_or_blank_title(#[case] title: Option<&str>, #[case] code: &str) {
        let err = parse_note_draft(title.map(str::to_owned), Some("body".to_owned()))
            .expect_err("title rejected");

        assert_eq!(err.code(), crate::domain::ErrorCode::InvalidRequest);
        assert_eq!(detail(&err, "field"), Some("title"));
        assert_eq!(detail(&err, "code"), Some(code));
    }

    #[rstest]
    fn draft_defaults_missing_content() {
        let draft = parse_note_draft(Some("T".to_owned()), None).expect("valid draft");
        assert_eq!(draft.content(), "");
    }

    #[rstest]
    #[case("abc")]
    #[case("0")]
    #[case("-1")]
    fn note_id_rejects_non_positive_values(#[case] raw: &str) {
        let err = parse_note_id(raw).expect_err("invalid id");
        assert_eq!(detail(&err, "code"), Some("invalid_note_id"));
        assert_eq!(detail(&err, "value"), Some(raw));
    }

    #[rstest]
    fn missing_header_names_the_header() {
        let err = missing_header_error(FieldName::new("X-ANON-ID"));
        assert_eq!(detail(&err, "field"), Some("X-ANON-ID"));
        assert_eq!(detail(&err, "code"), Some("missing_header"));
    }
}
