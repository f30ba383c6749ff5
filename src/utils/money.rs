/// Rounds to two decimal places, half away from zero. Money is carried at
/// full `f64` precision between calls; only display goes through this.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

pub fn format_amount(currency: &str, value: f64) -> String {
    format!("{currency}{:.2}", round2(value))
}
