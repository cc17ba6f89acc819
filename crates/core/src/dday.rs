//! D-day formatting for deadlines.
//!
//! The original client computed this label independently on every page with
//! slightly inconsistent rounding. There is exactly one implementation here;
//! every caller goes through [`format_dday`].

use chrono::NaiveDate;

/// Label shown when an item has no deadline.
const NO_DEADLINE: &str = "-";

/// Format a deadline relative to `today` using the Korean D-day convention.
///
/// - `None` deadline: `"-"`
/// - deadline == today: `"D-Day"`
/// - deadline n days in the future: `"D-{n}"`
/// - deadline n days in the past: `"D+{n}"`
///
/// Both dates are compared at day granularity, so the result never depends
/// on the time of day.
pub fn format_dday(today: NaiveDate, deadline: Option<NaiveDate>) -> String {
    let Some(deadline) = deadline else {
        return NO_DEADLINE.to_string();
    };

    let days = (deadline - today).num_days();
    match days {
        0 => "D-Day".to_string(),
        n if n > 0 => format!("D-{n}"),
        n => format!("D+{}", -n),
    }
}
