//! Input validation shared by the project/goal/task write paths.

use crate::error::CoreError;

/// Maximum number of labels per project/goal.
pub const MAX_LABELS: usize = 2;

/// Maximum label length in characters (not bytes -- labels are Korean).
pub const MAX_LABEL_CHARS: usize = 5;

/// Validate a label set: at most [`MAX_LABELS`] entries, each non-empty and
/// at most [`MAX_LABEL_CHARS`] characters.
pub fn validate_labels(labels: &[String]) -> Result<(), CoreError> {
    if labels.len() > MAX_LABELS {
        return Err(CoreError::Validation(format!(
            "At most {MAX_LABELS} labels are allowed"
        )));
    }
    for label in labels {
        let chars = label.chars().count();
        if chars == 0 {
            return Err(CoreError::Validation("Labels must not be empty".into()));
        }
        if chars > MAX_LABEL_CHARS {
            return Err(CoreError::Validation(format!(
                "Label '{label}' exceeds {MAX_LABEL_CHARS} characters"
            )));
        }
    }
    Ok(())
}

/// Validate a task progress value: 0..=100 in steps of 10.
pub fn validate_progress(progress: i16) -> Result<(), CoreError> {
    if !(0..=100).contains(&progress) || progress % 10 != 0 {
        return Err(CoreError::Validation(format!(
            "Progress must be between 0 and 100 in steps of 10, got {progress}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn accepts_up_to_two_short_labels() {
        assert!(validate_labels(&labels(&[])).is_ok());
        assert!(validate_labels(&labels(&["기획"])).is_ok());
        assert!(validate_labels(&labels(&["기획", "디자인"])).is_ok());
    }

    #[test]
    fn rejects_more_than_two_labels() {
        assert!(validate_labels(&labels(&["a", "b", "c"])).is_err());
    }

    #[test]
    fn label_limit_counts_characters_not_bytes() {
        // 5 Korean characters: 15 bytes in UTF-8, still valid.
        assert!(validate_labels(&labels(&["가나다라마"])).is_ok());
        assert!(validate_labels(&labels(&["가나다라마바"])).is_err());
    }

    #[test]
    fn rejects_empty_label() {
        assert!(validate_labels(&labels(&[""])).is_err());
    }

    #[test]
    fn progress_must_be_a_step_of_ten() {
        for p in (0..=100).step_by(10) {
            assert!(validate_progress(p as i16).is_ok());
        }
        assert!(validate_progress(55).is_err());
        assert!(validate_progress(-10).is_err());
        assert!(validate_progress(110).is_err());
    }
}
