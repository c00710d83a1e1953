//! Field and whole-entry validation.
//!
//! Pure functions: no rendering, no I/O. Per-field validity lands on the
//! editor as state; the export path only cares about the combined verdict.

use crate::entries::{EntryEditor, EntryList};
use crate::model::{Field, TimeEntry, FIELDS};

/// A single field passes when its text parses as an integer inside the
/// inclusive `[min, max]` range. Boundary values are accepted.
pub fn validate_field(value: &str, min: i64, max: i64) -> bool {
    match value.parse::<i64>() {
        Ok(v) => v >= min && v <= max,
        Err(_) => false,
    }
}

/// True last day of the given month, leap years included.
/// `None` for a month outside 1-12.
pub fn last_day_of_month(year: i32, month: u8) -> Option<u8> {
    let month = time::Month::try_from(month).ok()?;
    Some(time::util::days_in_year_month(year, month))
}

/// Validate every field of the editor, updating each validity flag.
///
/// All six fields are checked unconditionally so every invalid field gets
/// flagged in one pass, not just the first. Only when all six are
/// individually in range is the calendar day bound applied; a day past the
/// month's true length flags the day field alone. Returns the AND of all
/// checks.
pub fn validate_entry(editor: &mut EntryEditor) -> bool {
    let mut all_valid = true;
    for field in FIELDS {
        let (min, max) = field.bounds();
        let valid = validate_field(editor.text(field), min, max);
        editor.set_valid(field, valid);
        all_valid &= valid;
    }
    if !all_valid {
        return false;
    }

    let Some(entry) = editor.to_entry() else {
        // Unreachable after the per-field pass, but never panic over it.
        return false;
    };
    match last_day_of_month(entry.year, entry.month) {
        Some(last) if entry.day <= last => true,
        _ => {
            editor.set_valid(Field::Day, false);
            false
        }
    }
}

/// Revalidate one field after an edit, updating only that field's flag.
pub fn revalidate_field(editor: &mut EntryEditor, field: Field) -> bool {
    let (min, max) = field.bounds();
    let valid = validate_field(editor.text(field), min, max);
    editor.set_valid(field, valid);
    valid
}

/// Whole-list validation pass gating an export.
///
/// Every editor is validated even after a failure so all field markers
/// refresh in the same pass. On success the ordered snapshot to submit is
/// returned; otherwise the number of failing editors, for one aggregate
/// notification.
pub fn validate_all(list: &mut EntryList) -> Result<Vec<TimeEntry>, usize> {
    let mut invalid = 0usize;
    for pos in 0..list.len() {
        if let Some(editor) = list.editor_mut(pos) {
            if !validate_entry(editor) {
                invalid += 1;
            }
        }
    }
    match list.entries() {
        Some(times) if invalid == 0 => Ok(times),
        _ => Err(invalid.max(1)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entries::{fill_editor, EntryEditor};
    use crate::model::TimeEntry;

    fn editor_for(entry: TimeEntry) -> EntryEditor {
        let mut editor = EntryEditor::blank(1);
        fill_editor(&mut editor, &entry);
        editor
    }

    const MARCH_5: TimeEntry = TimeEntry {
        year: 2024,
        month: 3,
        day: 5,
        hour: 7,
        minute: 8,
        second: 9,
    };

    #[test]
    fn field_bounds_are_inclusive() {
        assert!(validate_field("1", 1, 12));
        assert!(validate_field("12", 1, 12));
        assert!(!validate_field("0", 1, 12));
        assert!(!validate_field("13", 1, 12));
        assert!(validate_field("0", 0, 59));
        assert!(validate_field("59", 0, 59));
        assert!(!validate_field("60", 0, 59));
        assert!(validate_field("-5", -10, 0));
    }

    #[test]
    fn field_rejects_non_integers() {
        assert!(!validate_field("", 1, 31));
        assert!(!validate_field("abc", 1, 31));
        assert!(!validate_field("1.5", 1, 31));
        assert!(!validate_field("1 ", 1, 31));
    }

    #[test]
    fn last_day_matches_gregorian_lengths() {
        assert_eq!(last_day_of_month(2024, 1), Some(31));
        assert_eq!(last_day_of_month(2024, 4), Some(30));
        // Leap year rules: /4, except /100, except /400.
        assert_eq!(last_day_of_month(2024, 2), Some(29));
        assert_eq!(last_day_of_month(2023, 2), Some(28));
        assert_eq!(last_day_of_month(2000, 2), Some(29));
        assert_eq!(last_day_of_month(1900, 2), Some(28));
        assert_eq!(last_day_of_month(2024, 13), None);
        assert_eq!(last_day_of_month(2024, 0), None);
    }

    #[test]
    fn valid_entry_passes() {
        let mut editor = editor_for(MARCH_5);
        assert!(validate_entry(&mut editor));
        for field in FIELDS {
            assert!(editor.is_valid(field));
        }
    }

    #[test]
    fn all_invalid_fields_flagged_in_one_pass() {
        let mut editor = editor_for(MARCH_5);
        editor.set_text(Field::Month, "13");
        editor.set_text(Field::Hour, "24");
        editor.set_text(Field::Second, "oops");

        assert!(!validate_entry(&mut editor));
        // Checking continues past the first failure.
        assert!(!editor.is_valid(Field::Month));
        assert!(!editor.is_valid(Field::Hour));
        assert!(!editor.is_valid(Field::Second));
        assert!(editor.is_valid(Field::Year));
        assert!(editor.is_valid(Field::Day));
        assert!(editor.is_valid(Field::Minute));
    }

    #[test]
    fn day_past_month_end_flags_only_day() {
        let mut editor = editor_for(TimeEntry {
            year: 2023,
            month: 2,
            day: 29,
            hour: 0,
            minute: 0,
            second: 0,
        });
        assert!(!validate_entry(&mut editor));
        assert!(!editor.is_valid(Field::Day));
        for field in [
            Field::Year,
            Field::Month,
            Field::Hour,
            Field::Minute,
            Field::Second,
        ] {
            assert!(editor.is_valid(field));
        }
    }

    #[test]
    fn leap_day_accepted_in_leap_year() {
        let mut editor = editor_for(TimeEntry {
            year: 2024,
            month: 2,
            day: 29,
            hour: 12,
            minute: 30,
            second: 0,
        });
        assert!(validate_entry(&mut editor));
    }

    #[test]
    fn revalidation_clears_a_stale_flag() {
        let mut editor = editor_for(MARCH_5);
        editor.set_text(Field::Minute, "75");
        assert!(!revalidate_field(&mut editor, Field::Minute));
        editor.set_text(Field::Minute, "45");
        assert!(revalidate_field(&mut editor, Field::Minute));
        assert!(editor.is_valid(Field::Minute));
    }

    #[test]
    fn validate_all_flags_every_failing_editor() {
        let mut list = EntryList::new();
        fill_editor(list.editor_mut(0).unwrap(), &MARCH_5);
        let pos = list.add_entry();
        fill_editor(list.editor_mut(pos).unwrap(), &MARCH_5);
        let pos = list.add_entry();
        fill_editor(list.editor_mut(pos).unwrap(), &MARCH_5);

        list.editor_mut(0).unwrap().set_text(Field::Hour, "99");
        list.editor_mut(2).unwrap().set_text(Field::Day, "32");

        assert_eq!(validate_all(&mut list), Err(2));
        // Both failing editors got their markers, not just the first.
        assert!(!list.editors()[0].is_valid(Field::Hour));
        assert!(!list.editors()[2].is_valid(Field::Day));
        assert!(list.editors()[1].texts().iter().all(|t| !t.is_empty()));
    }

    #[test]
    fn validate_all_returns_ordered_snapshot() {
        let mut list = EntryList::new();
        fill_editor(list.editor_mut(0).unwrap(), &MARCH_5);
        let pos = list.add_entry();
        fill_editor(
            list.editor_mut(pos).unwrap(),
            &TimeEntry {
                year: 2025,
                month: 6,
                day: 30,
                hour: 18,
                minute: 0,
                second: 0,
            },
        );

        let times = validate_all(&mut list).unwrap();
        assert_eq!(times.len(), 2);
        assert_eq!(times[0], MARCH_5);
        assert_eq!(times[1].year, 2025);
    }

    #[test]
    fn year_is_bounded_only_by_parseability() {
        let mut editor = editor_for(MARCH_5);
        editor.set_text(Field::Year, "-44");
        assert!(validate_entry(&mut editor));
        editor.set_text(Field::Year, "99999999999999999999");
        assert!(!validate_entry(&mut editor));
        assert!(!editor.is_valid(Field::Year));
    }
}
