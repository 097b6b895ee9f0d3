//! Number formatting shared by the printers.

/// Format a float the way C's `%g` does: six significant digits, trailing
/// zeros dropped, exponent form outside `1e-4 ..= 1e6`.
pub fn format_g(val: f64) -> String {
    const PRECISION: i32 = 6;

    if val.is_nan() {
        return "nan".to_string();
    }
    if val.is_infinite() {
        return if val.is_sign_positive() { "inf" } else { "-inf" }.to_string();
    }
    if val == 0.0 {
        return if val.is_sign_negative() { "-0" } else { "0" }.to_string();
    }

    // Rounding can carry into the next decade, so take the exponent from
    // the rounded scientific form.
    let sci = format!("{:.*e}", (PRECISION - 1) as usize, val);
    let (mantissa, exp) = match sci.split_once('e') {
        Some((m, e)) => (m, e.parse::<i32>().unwrap_or(0)),
        None => (sci.as_str(), 0),
    };

    if !(-4..PRECISION).contains(&exp) {
        let sign = if exp < 0 { '-' } else { '+' };
        format!("{}e{}{:02}", trim_fraction(mantissa), sign, exp.abs())
    } else {
        let decimals = (PRECISION - 1 - exp) as usize;
        trim_fraction(&format!("{:.*}", decimals, val)).to_string()
    }
}

fn trim_fraction(s: &str) -> &str {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_notation() {
        assert_eq!(format_g(1.0), "1");
        assert_eq!(format_g(-2.5), "-2.5");
        assert_eq!(format_g(3.14159265), "3.14159");
        assert_eq!(format_g(100000.0), "100000");
        assert_eq!(format_g(0.0001), "0.0001");
        assert_eq!(format_g(0.1f32 as f64), "0.1");
    }

    #[test]
    fn exponent_notation() {
        assert_eq!(format_g(1e6), "1e+06");
        assert_eq!(format_g(1234567.0), "1.23457e+06");
        assert_eq!(format_g(0.00001234), "1.234e-05");
        assert_eq!(format_g(-6.02214076e23), "-6.02214e+23");
    }

    #[test]
    fn special_values() {
        assert_eq!(format_g(0.0), "0");
        assert_eq!(format_g(f64::NAN), "nan");
        assert_eq!(format_g(f64::NEG_INFINITY), "-inf");
    }
}
