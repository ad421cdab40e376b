/// Round to the nearest whole unit, halves toward positive infinity
#[inline]
pub fn round_half_up(value: f64) -> f64 {
    let floor = value.floor();
    if value - floor >= 0.5 {
        floor + 1.0
    } else {
        floor
    }
}

/// Format a number with `,` thousands separators and at most three
/// fraction digits, e.g. `1234567.8` -> `1,234,567.8`
pub fn group_thousands(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    let fixed = format!("{:.3}", value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
    let frac_part = frac_part.trim_end_matches('0');

    let mut out = String::with_capacity(fixed.len() + int_part.len() / 3);
    let digits = int_part.len();
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (digits - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }

    if !frac_part.is_empty() {
        out.push('.');
        out.push_str(frac_part);
    }

    if value < 0.0 && out != "0" {
        out.insert(0, '-');
    }

    out
}
