//! New-event form.
//!
//! Four text fields edited one at a time. Nothing is validated while typing;
//! [`EventForm::to_draft`] normalizes the date on submit and everything else is
//! left for the server to accept or reject.

use crate::domain::error::Result;
use crate::domain::EventDraft;

/// Form fields in tab order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Title,
    Description,
    Date,
    Location,
}

impl FormField {
    pub const ALL: [Self; 4] = [Self::Title, Self::Description, Self::Date, Self::Location];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Title => "Title",
            Self::Description => "Description",
            Self::Date => "Date",
            Self::Location => "Location",
        }
    }

    /// Input hint shown while the field is empty.
    #[must_use]
    pub const fn placeholder(self) -> &'static str {
        match self {
            Self::Title => "Event name",
            Self::Description => "What is it about",
            Self::Date => "YYYY-MM-DD or YYYY-MM-DDTHH:MM",
            Self::Location => "Where",
        }
    }

    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Title => Self::Description,
            Self::Description => Self::Date,
            Self::Date => Self::Location,
            Self::Location => Self::Title,
        }
    }

    #[must_use]
    pub const fn prev(self) -> Self {
        match self {
            Self::Title => Self::Location,
            Self::Description => Self::Title,
            Self::Date => Self::Description,
            Self::Location => Self::Date,
        }
    }
}

/// Contents of the form plus the focused field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventForm {
    pub title: String,
    pub description: String,
    pub date: String,
    pub location: String,
    pub focus: FormField,
}

impl Default for EventForm {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            date: String::new(),
            location: String::new(),
            focus: FormField::Title,
        }
    }
}

impl EventForm {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn value(&self, field: FormField) -> &str {
        match field {
            FormField::Title => &self.title,
            FormField::Description => &self.description,
            FormField::Date => &self.date,
            FormField::Location => &self.location,
        }
    }

    fn value_mut(&mut self, field: FormField) -> &mut String {
        match field {
            FormField::Title => &mut self.title,
            FormField::Description => &mut self.description,
            FormField::Date => &mut self.date,
            FormField::Location => &mut self.location,
        }
    }

    /// Appends a character to the focused field.
    pub fn push_char(&mut self, c: char) {
        let focus = self.focus;
        self.value_mut(focus).push(c);
    }

    /// Removes the last character of the focused field.
    pub fn backspace(&mut self) {
        let focus = self.focus;
        self.value_mut(focus).pop();
    }

    pub fn focus_next(&mut self) {
        self.focus = self.focus.next();
    }

    pub fn focus_prev(&mut self) {
        self.focus = self.focus.prev();
    }

    /// Empties every field and moves focus back to the title.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Builds the request body from the current contents.
    ///
    /// # Errors
    ///
    /// Returns [`crate::EventboardError::InvalidDate`] if the date field cannot
    /// be normalized.
    pub fn to_draft(&self) -> Result<EventDraft> {
        EventDraft::from_input(
            self.title.clone(),
            self.description.clone(),
            &self.date,
            self.location.clone(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::EventboardError;

    fn type_str(form: &mut EventForm, text: &str) {
        for c in text.chars() {
            form.push_char(c);
        }
    }

    #[test]
    fn typing_goes_to_focused_field() {
        let mut form = EventForm::new();
        type_str(&mut form, "Talk");
        form.focus_next();
        type_str(&mut form, "About Rust");
        form.backspace();

        assert_eq!(form.title, "Talk");
        assert_eq!(form.description, "About Rus");
        assert_eq!(form.focus, FormField::Description);
    }

    #[test]
    fn focus_wraps_both_ways() {
        let mut form = EventForm::new();
        form.focus_prev();
        assert_eq!(form.focus, FormField::Location);
        form.focus_next();
        assert_eq!(form.focus, FormField::Title);

        for _ in FormField::ALL {
            form.focus_next();
        }
        assert_eq!(form.focus, FormField::Title);
    }

    #[test]
    fn draft_normalizes_date() {
        let mut form = EventForm::new();
        type_str(&mut form, "T");
        form.focus = FormField::Date;
        type_str(&mut form, "2024-05-01");

        let draft = form.to_draft().unwrap();
        assert_eq!(draft.name, "T");
        assert_eq!(crate::domain::event::to_iso_millis(&draft.date), "2024-05-01T00:00:00.000Z");
    }

    #[test]
    fn empty_text_fields_are_not_rejected_locally() {
        let mut form = EventForm::new();
        form.date = "2024-05-01".to_string();
        assert!(form.to_draft().is_ok());
    }

    #[test]
    fn bad_date_is_reported() {
        let mut form = EventForm::new();
        form.date = "next tuesday".to_string();
        assert!(matches!(form.to_draft(), Err(EventboardError::InvalidDate(_))));
    }

    #[test]
    fn clear_resets_everything() {
        let mut form = EventForm::new();
        type_str(&mut form, "x");
        form.focus_next();
        form.clear();
        assert_eq!(form, EventForm::default());
    }
}
