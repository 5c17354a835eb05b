//! Display formatting shared by recommendation text and audit diffs.

/// Format a float the way the ward's reports always have: whole values
/// keep a trailing `.0` ("2.0" rather than "2").
pub(crate) fn fmt_float(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 {
        format!("{:.1}", value)
    } else {
        value.to_string()
    }
}

/// Render a boolean flag for display.
pub(crate) fn fmt_flag(value: bool) -> &'static str {
    if value {
        "yes"
    } else {
        "no"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fmt_float_keeps_trailing_zero() {
        assert_eq!(fmt_float(2.0), "2.0");
        assert_eq!(fmt_float(0.0), "0.0");
        assert_eq!(fmt_float(2.45), "2.45");
        assert_eq!(fmt_float(-1.0), "-1.0");
    }
}
