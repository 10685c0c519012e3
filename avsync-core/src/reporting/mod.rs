//! Plain-text reports
//!
//! Rendering is pure: every report is a `Display` wrapper over already
//! computed data, so the same analysis always renders the same bytes and the
//! CLI decides where the text goes.

use crate::media::Field;

pub mod duration;
pub mod sync;

pub use duration::DurationReport;
pub use sync::{BATCH_FOOTER, SyncFileReport};

/// Rule printed around report headings
pub const SEPARATOR: &str = "============================================================";

/// Renders a present field with `render`, or `N/A` when it is missing or malformed
pub(crate) fn or_na<T>(field: &Field<T>, render: impl Fn(&T) -> String) -> String {
    match field {
        Field::Value(v) => render(v),
        Field::Missing | Field::Malformed(_) => "N/A".to_string(),
    }
}

/// A threshold in seconds as a millisecond label, e.g. `0.5` -> `500ms`
pub fn millis_label(seconds: f64) -> String {
    let millis = seconds * 1000.0;
    if (millis - millis.round()).abs() < 1e-9 {
        format!("{:.0}ms", millis)
    } else {
        format!("{:.1}ms", millis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_millis_label() {
        assert_eq!(millis_label(0.5), "500ms");
        assert_eq!(millis_label(0.1), "100ms");
        assert_eq!(millis_label(0.01), "10ms");
        assert_eq!(millis_label(0.0125), "12.5ms");
        assert_eq!(millis_label(2.0), "2000ms");
    }

    #[test]
    fn test_or_na() {
        let secs = |v: &f64| format!("{:.3}s", v);
        assert_eq!(or_na(&Field::Value(1.5), secs), "1.500s");
        assert_eq!(or_na(&Field::<f64>::Missing, secs), "N/A");
        assert_eq!(or_na(&Field::<f64>::Malformed("x".into()), secs), "N/A");
    }
}
