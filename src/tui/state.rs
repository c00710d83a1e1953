use crate::entries::EntryList;
use crate::model::Field;

/// UI-side state. Owned exclusively by the UI thread; the orchestrator only
/// ever sees serialized snapshots of the entry list.
pub struct UiState {
    pub tab: usize,
    pub entries: EntryList,
    /// List position of the focused editor.
    pub selected: usize,
    /// Focused field within the focused editor.
    pub field: Field,
    pub info: String,
    /// Mirror of the orchestrator's busy state, kept current by events.
    pub exporting: bool,
    pub last_saved_path: Option<String>,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            tab: 0,
            entries: EntryList::new(),
            selected: 0,
            field: Field::Year,
            info: String::new(),
            exporting: false,
            last_saved_path: None,
        }
    }
}

impl UiState {
    /// Keep the cursor on an existing editor after a removal.
    pub fn clamp_selection(&mut self) {
        if self.selected >= self.entries.len() {
            self.selected = self.entries.len().saturating_sub(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selection_clamps_after_removal() {
        let mut state = UiState::default();
        state.entries.add_entry();
        state.entries.add_entry();
        state.selected = 2;

        state.entries.remove_entry(2);
        state.clamp_selection();
        assert_eq!(state.selected, 1);
    }
}
