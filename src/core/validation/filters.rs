//! Reusable field filters
//!
//! These filters transform field values before they are validated or stored

/// Filter: trim surrounding whitespace
pub fn trim(value: &str) -> String {
    value.trim().to_string()
}

/// Filter: upper-case the first character and lower-case the rest
pub fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => {
            let mut out: String = first.to_uppercase().collect();
            out.push_str(&chars.as_str().to_lowercase());
            out
        }
        None => String::new(),
    }
}

/// Filter: round number to specified decimal places (half away from zero)
///
/// Values too large to scale without overflowing have no fractional digits
/// left and are returned unchanged.
pub fn round_decimals(decimals: u32) -> impl Fn(f64) -> f64 + Send + Sync + Clone {
    move |value: f64| {
        let factor = 10_f64.powi(decimals as i32);
        let scaled = value * factor;
        if !scaled.is_finite() {
            return value;
        }
        scaled.round() / factor
    }
}
