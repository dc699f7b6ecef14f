use super::value_objects::DurationSpec;

/// Largest whole amount an `f64` still counts exactly.
const MAX_CHARGE: f64 = 9_007_199_254_740_992.0;

/// `ceil(base_price × month_equivalent)`; charges are whole currency units.
pub fn total_charge(base_price: f64, duration: &DurationSpec) -> Result<u64, String> {
    let raw = base_price * duration.month_equivalent();
    if raw == 0.0 {
        return Ok(0);
    }
    if !raw.is_finite() || raw < 0.0 || raw.ceil() > MAX_CHARGE {
        return Err("Booking total is out of range".to_string());
    }
    Ok(raw.ceil() as u64)
}
