mod autosave;
mod editor;

pub(crate) use autosave::{DebouncedSave, SaveTracker, AUTOSAVE_DEBOUNCE_MS};
pub(crate) use editor::{BulletNotes, BULLET};

use crate::models::Submission;

/// Mirror accepted notes into the submission list so switching back to a row shows
/// the latest text before the autosave lands.
pub(crate) fn apply_submission_notes(
    submissions: &mut [Submission],
    submission_id: &str,
    notes: &str,
) -> bool {
    if let Some(s) = submissions.iter_mut().find(|s| s.id == submission_id) {
        s.notes = Some(notes.to_string());
        true
    } else {
        false
    }
}

/// Same as [`apply_submission_notes`] for the currently selected row.
pub(crate) fn apply_selected_notes(
    selected: &mut Option<Submission>,
    submission_id: &str,
    notes: &str,
) -> bool {
    match selected {
        Some(s) if s.id == submission_id => {
            s.notes = Some(notes.to_string());
            true
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sub(id: &str) -> Submission {
        Submission {
            id: id.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn mirrors_into_matching_row_only() {
        let mut xs = vec![sub("a"), sub("b")];
        assert!(apply_submission_notes(&mut xs, "b", "• hi"));
        assert_eq!(xs[0].notes, None);
        assert_eq!(xs[1].notes.as_deref(), Some("• hi"));
        assert!(!apply_submission_notes(&mut xs, "zzz", "• hi"));
    }

    #[test]
    fn selected_mirror_checks_id() {
        let mut selected = Some(sub("a"));
        assert!(!apply_selected_notes(&mut selected, "b", "• x"));
        assert!(apply_selected_notes(&mut selected, "a", "• x"));
        assert_eq!(selected.and_then(|s| s.notes).as_deref(), Some("• x"));

        let mut none: Option<Submission> = None;
        assert!(!apply_selected_notes(&mut none, "a", "• x"));
    }
}
