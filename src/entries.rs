//! Entry editors and the ordered list that owns them.
//!
//! The list always holds at least one editor; display indices stay a
//! contiguous 1..N sequence in list order.

use crate::model::{Field, TimeEntry};
#[cfg(test)]
use crate::model::FIELDS;
use time::OffsetDateTime;

/// Raw field text plus the result of the most recent validation pass.
/// The flag is only rewritten on an explicit field edit or a form-wide pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldState {
    pub text: String,
    pub valid: bool,
}

impl FieldState {
    fn blank() -> Self {
        Self {
            text: String::new(),
            valid: true,
        }
    }
}

/// An editable wrapper around one timestamp: six text fields with per-field
/// validity, and a 1-based display index used only for presentation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryEditor {
    pub index: usize,
    fields: [FieldState; 6],
}

impl EntryEditor {
    /// Canonical blank editor: empty fields, all flags valid.
    pub fn blank(index: usize) -> Self {
        Self {
            index,
            fields: std::array::from_fn(|_| FieldState::blank()),
        }
    }

    pub fn text(&self, field: Field) -> &str {
        &self.fields[field.pos()].text
    }

    pub fn set_text(&mut self, field: Field, text: impl Into<String>) {
        self.fields[field.pos()].text = text.into();
    }

    pub fn is_valid(&self, field: Field) -> bool {
        self.fields[field.pos()].valid
    }

    pub fn set_valid(&mut self, field: Field, valid: bool) {
        self.fields[field.pos()].valid = valid;
    }

    /// Field values in display order, for whole-editor comparisons.
    #[cfg(test)]
    pub fn texts(&self) -> [&str; 6] {
        std::array::from_fn(|i| self.fields[i].text.as_str())
    }

    /// Convert to the wire value. `None` if any field does not parse into
    /// its integer type; range checking is the validator's job.
    pub fn to_entry(&self) -> Option<TimeEntry> {
        Some(TimeEntry {
            year: self.text(Field::Year).parse().ok()?,
            month: self.text(Field::Month).parse().ok()?,
            day: self.text(Field::Day).parse().ok()?,
            hour: self.text(Field::Hour).parse().ok()?,
            minute: self.text(Field::Minute).parse().ok()?,
            second: self.text(Field::Second).parse().ok()?,
        })
    }
}

/// The ordered collection of entry editors. Length is always derived from
/// the sequence itself; there is no separate counter to drift.
#[derive(Debug, Clone)]
pub struct EntryList {
    editors: Vec<EntryEditor>,
}

impl Default for EntryList {
    fn default() -> Self {
        Self::new()
    }
}

impl EntryList {
    /// A list starts with one blank editor; it can never become empty.
    pub fn new() -> Self {
        Self {
            editors: vec![EntryEditor::blank(1)],
        }
    }

    pub fn len(&self) -> usize {
        self.editors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.editors.is_empty()
    }

    pub fn editors(&self) -> &[EntryEditor] {
        &self.editors
    }

    pub fn editor_mut(&mut self, pos: usize) -> Option<&mut EntryEditor> {
        self.editors.get_mut(pos)
    }

    /// Append a blank editor and return its list position. The display index
    /// is the new length; appends never renumber existing editors.
    pub fn add_entry(&mut self) -> usize {
        let index = self.editors.len() + 1;
        self.editors.push(EntryEditor::blank(index));
        self.editors.len() - 1
    }

    /// Remove the editor at `pos` and renumber survivors 1..N in their
    /// existing relative order. A no-op when only one editor remains or
    /// `pos` is out of range; returns whether a removal happened.
    pub fn remove_entry(&mut self, pos: usize) -> bool {
        if self.editors.len() <= 1 || pos >= self.editors.len() {
            return false;
        }
        self.editors.remove(pos);
        for (i, editor) in self.editors.iter_mut().enumerate() {
            editor.index = i + 1;
        }
        true
    }

    /// Seed the first editor's fields from the wall clock. Runs once at
    /// startup; editors added later always start blank.
    pub fn seed_first(&mut self, now: OffsetDateTime) {
        let first = &mut self.editors[0];
        first.set_text(Field::Year, now.year().to_string());
        first.set_text(Field::Month, u8::from(now.month()).to_string());
        first.set_text(Field::Day, now.day().to_string());
        first.set_text(Field::Hour, now.hour().to_string());
        first.set_text(Field::Minute, now.minute().to_string());
        first.set_text(Field::Second, now.second().to_string());
    }

    /// Snapshot of every editor's wire value, in list order. `None` unless
    /// every field of every editor parses; call after a validation pass.
    pub fn entries(&self) -> Option<Vec<TimeEntry>> {
        self.editors.iter().map(EntryEditor::to_entry).collect()
    }
}

/// Write a parsed entry back into an editor, one field per slot.
#[cfg(test)]
pub fn fill_editor(editor: &mut EntryEditor, entry: &TimeEntry) {
    for field in FIELDS {
        let text = match field {
            Field::Year => entry.year.to_string(),
            Field::Month => entry.month.to_string(),
            Field::Day => entry.day.to_string(),
            Field::Hour => entry.hour.to_string(),
            Field::Minute => entry.minute.to_string(),
            Field::Second => entry.second.to_string(),
        };
        editor.set_text(field, text);
    }
}
