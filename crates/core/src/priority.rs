//! Bridge between the two coexisting task priority schemes.
//!
//! Older rows carry the Korean strings 높음/중간/낮음; newer rows carry the
//! numeric strings "1".."4". Both are stored as-is; this module maps either
//! scheme to the display label the client shows. Unknown or missing values
//! map to 미정 rather than failing, since legacy data cannot be trusted.

/// Label for a missing or unrecognized priority.
pub const PRIORITY_UNSET: &str = "미정";

/// Map a raw stored priority (either scheme) to its display label.
///
/// Numeric scheme: "1" 높음, "2" 중요, "3" 보통, "4" 낮음.
/// Legacy scheme: 높음 stays 높음, 중간 becomes 중요, 낮음 stays 낮음.
pub fn priority_label(raw: Option<&str>) -> &'static str {
    match raw {
        Some("1") | Some("높음") => "높음",
        Some("2") | Some("중간") => "중요",
        Some("3") => "보통",
        Some("4") | Some("낮음") => "낮음",
        _ => PRIORITY_UNSET,
    }
}

/// Whether a raw priority value is one of the accepted inputs.
///
/// Used when validating writes; reads stay permissive.
pub fn is_valid_priority(raw: &str) -> bool {
    matches!(raw, "1" | "2" | "3" | "4" | "높음" | "중간" | "낮음")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_scheme_maps_to_labels() {
        assert_eq!(priority_label(Some("1")), "높음");
        assert_eq!(priority_label(Some("2")), "중요");
        assert_eq!(priority_label(Some("3")), "보통");
        assert_eq!(priority_label(Some("4")), "낮음");
    }

    #[test]
    fn legacy_scheme_maps_to_labels() {
        assert_eq!(priority_label(Some("높음")), "높음");
        assert_eq!(priority_label(Some("중간")), "중요");
        assert_eq!(priority_label(Some("낮음")), "낮음");
    }

    #[test]
    fn missing_or_unknown_is_unset() {
        assert_eq!(priority_label(None), "미정");
        assert_eq!(priority_label(Some("")), "미정");
        assert_eq!(priority_label(Some("urgent")), "미정");
    }

    #[test]
    fn validation_accepts_both_schemes_only() {
        for ok in ["1", "2", "3", "4", "높음", "중간", "낮음"] {
            assert!(is_valid_priority(ok), "{ok} should be accepted");
        }
        assert!(!is_valid_priority("0"));
        assert!(!is_valid_priority("5"));
        assert!(!is_valid_priority("미정"));
    }
}
