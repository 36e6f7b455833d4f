//! Input collection: the four query fields and the submit action.
//!
//! Focus cycles over the fields plus a virtual submit stop at index
//! [`FIELD_COUNT`]. Keystrokes for the focused field are forwarded to its
//! `tui-input` buffer; parsing only happens when submit is triggered.

use std::fmt;

use crossterm::event::{Event, KeyEvent};
use tui_input::backend::crossterm::EventHandler;
use tui_input::Input;

pub const PAGE_IDX: usize = 0;
pub const LANG_IDX: usize = 1;
pub const CLEAN_REF_IDX: usize = 2;
pub const MAX_WIDTH_IDX: usize = 3;

/// Number of text fields; also the focus index of the submit action.
pub const FIELD_COUNT: usize = 4;

/// Captions shown above each field, in focus order.
pub const LABELS: [&str; FIELD_COUNT] = [
    "Comma-separated Wikipedia page titles",
    "Comma-separated language codes of the pages",
    "Remove the reference link texts (true or false)",
    "Maximum width of columns (leave empty for no maximum)",
];

/// Placeholder text rendered while a field is empty.
pub const PLACEHOLDERS: [&str; FIELD_COUNT] = ["Arhaan_Khan", "en", "true", ""];

/// A validated, parsed query ready for the fetch pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub pages: Vec<String>,
    pub langs: Vec<String>,
    pub clean_refs: bool,
    /// 0 means unconstrained
    pub max_column_width: usize,
}

/// Rejected user input; surfaced as a message, never fatal.
#[derive(Debug, PartialEq, Eq)]
pub enum InputError {
    EmptyPages,
    EmptyLanguages,
    CountMismatch,
    BadBool(String),
    BadWidth(String),
}

impl fmt::Display for InputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputError::EmptyPages => write!(f, "invalid value: page must be set"),
            InputError::EmptyLanguages => write!(f, "invalid value: language code must be set"),
            InputError::CountMismatch => write!(
                f,
                "invalid value: number of pages and language codes are not equal"
            ),
            InputError::BadBool(v) => write!(f, "invalid value {v}: must be true or false"),
            InputError::BadWidth(v) => write!(f, "invalid value {v}: must be a valid number"),
        }
    }
}

impl std::error::Error for InputError {}

/// The ordered text fields plus the cyclic focus index.
#[derive(Debug, Default, Clone)]
pub struct InputForm {
    fields: [Input; FIELD_COUNT],
    focus: usize,
}

impl InputForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current focus stop; `FIELD_COUNT` means the submit action.
    pub fn focus(&self) -> usize {
        self.focus
    }

    pub fn submit_focused(&self) -> bool {
        self.focus == FIELD_COUNT
    }

    /// Advance focus, wrapping from submit back to the first field.
    pub fn focus_next(&mut self) {
        self.focus = if self.focus >= FIELD_COUNT {
            0
        } else {
            self.focus + 1
        };
    }

    /// Retreat focus, wrapping from the first field to submit.
    pub fn focus_prev(&mut self) {
        self.focus = if self.focus == 0 {
            FIELD_COUNT
        } else {
            self.focus - 1
        };
    }

    /// Put focus back on the first field (new-query flow).
    pub fn reset_focus(&mut self) {
        self.focus = 0;
    }

    /// Jump straight to the submit stop.
    pub fn focus_submit(&mut self) {
        self.focus = FIELD_COUNT;
    }

    /// Forward a key event to the focused field's editing buffer. Ignored
    /// while the submit action is focused.
    pub fn handle_key(&mut self, key: &KeyEvent) {
        if let Some(field) = self.fields.get_mut(self.focus) {
            field.handle_event(&Event::Key(*key));
        }
    }

    pub fn value(&self, field: usize) -> &str {
        self.fields[field].value()
    }

    /// Overwrite a field's buffer, e.g. from tests or future presets.
    pub fn set_value(&mut self, field: usize, value: &str) {
        self.fields[field] = Input::new(value.to_string());
    }

    /// Validate and parse the field values into a fetch request.
    pub fn parse(&self) -> Result<FetchRequest, InputError> {
        let page = self.value(PAGE_IDX);
        if page.is_empty() {
            return Err(InputError::EmptyPages);
        }
        let pages: Vec<String> = page.split(',').map(str::to_string).collect();

        let lang = self.value(LANG_IDX);
        if lang.is_empty() {
            return Err(InputError::EmptyLanguages);
        }
        let langs: Vec<String> = lang.split(',').map(str::to_string).collect();

        if pages.len() != langs.len() {
            return Err(InputError::CountMismatch);
        }

        let clean_refs = parse_bool(self.value(CLEAN_REF_IDX))?;

        let width_value = self.value(MAX_WIDTH_IDX);
        let max_column_width = if width_value.is_empty() {
            0
        } else {
            let parsed: i64 = width_value
                .parse()
                .map_err(|_| InputError::BadWidth(width_value.to_string()))?;
            // Non-positive normalizes to unconstrained
            usize::try_from(parsed).unwrap_or(0)
        };

        Ok(FetchRequest {
            pages,
            langs,
            clean_refs,
            max_column_width,
        })
    }
}

/// Boolean field syntax: the usual true/false spellings plus the short
/// forms 1/0 and t/f.
fn parse_bool(value: &str) -> Result<bool, InputError> {
    match value {
        "1" | "t" | "T" | "true" | "TRUE" | "True" => Ok(true),
        "0" | "f" | "F" | "false" | "FALSE" | "False" => Ok(false),
        other => Err(InputError::BadBool(other.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(page: &str, lang: &str, clean: &str, width: &str) -> InputForm {
        let mut form = InputForm::new();
        form.set_value(PAGE_IDX, page);
        form.set_value(LANG_IDX, lang);
        form.set_value(CLEAN_REF_IDX, clean);
        form.set_value(MAX_WIDTH_IDX, width);
        form
    }

    #[test]
    fn parses_a_full_request() {
        let request = form("A,B", "en,de", "true", "12").parse().unwrap();
        assert_eq!(
            request,
            FetchRequest {
                pages: vec!["A".into(), "B".into()],
                langs: vec!["en".into(), "de".into()],
                clean_refs: true,
                max_column_width: 12,
            }
        );
    }

    #[test]
    fn empty_pages_is_rejected() {
        assert_eq!(
            form("", "en", "t", "").parse(),
            Err(InputError::EmptyPages)
        );
    }

    #[test]
    fn empty_languages_is_rejected() {
        assert_eq!(
            form("A", "", "t", "").parse(),
            Err(InputError::EmptyLanguages)
        );
    }

    #[test]
    fn page_language_count_mismatch_is_rejected() {
        assert_eq!(
            form("A,B", "en", "t", "").parse(),
            Err(InputError::CountMismatch)
        );
    }

    #[test]
    fn bool_short_forms_are_accepted() {
        assert!(form("A", "en", "t", "").parse().unwrap().clean_refs);
        assert!(!form("A", "en", "F", "").parse().unwrap().clean_refs);
        assert!(form("A", "en", "1", "").parse().unwrap().clean_refs);
    }

    #[test]
    fn bad_bool_is_rejected() {
        assert_eq!(
            form("A", "en", "yes", "").parse(),
            Err(InputError::BadBool("yes".to_string()))
        );
    }

    #[test]
    fn width_empty_or_non_positive_means_unconstrained() {
        assert_eq!(form("A", "en", "t", "").parse().unwrap().max_column_width, 0);
        assert_eq!(
            form("A", "en", "t", "-4").parse().unwrap().max_column_width,
            0
        );
        assert_eq!(
            form("A", "en", "t", "0").parse().unwrap().max_column_width,
            0
        );
    }

    #[test]
    fn bad_width_is_rejected() {
        assert_eq!(
            form("A", "en", "t", "wide").parse(),
            Err(InputError::BadWidth("wide".to_string()))
        );
    }

    #[test]
    fn focus_wraps_in_both_directions() {
        let mut form = InputForm::new();
        assert_eq!(form.focus(), 0);
        for _ in 0..FIELD_COUNT {
            form.focus_next();
        }
        assert!(form.submit_focused());
        form.focus_next();
        assert_eq!(form.focus(), 0);
        form.focus_prev();
        assert!(form.submit_focused());
    }

    #[test]
    fn typing_goes_to_the_focused_field() {
        use crossterm::event::{KeyCode, KeyModifiers};

        let mut form = InputForm::new();
        form.focus_next();
        form.handle_key(&KeyEvent::new(KeyCode::Char('e'), KeyModifiers::NONE));
        form.handle_key(&KeyEvent::new(KeyCode::Char('n'), KeyModifiers::NONE));
        assert_eq!(form.value(PAGE_IDX), "");
        assert_eq!(form.value(LANG_IDX), "en");
    }
}
