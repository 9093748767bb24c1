use std::f32::consts::TAU;

/// Wrap an angle into `[0, 2π)`.
#[inline]
pub fn wrap_0_tau(x: f32) -> f32 {
    let w = x.rem_euclid(TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs.
    if w >= TAU { 0.0 } else { w }
}

/// Phase of the reference driver at time `t`: `(Ω·t) mod 2π`.
#[inline]
pub fn driver_phase(omega: f32, t: f32) -> f32 {
    wrap_0_tau(omega * t)
}

/// Driver phase sampled on a whole time vector.
pub fn driver_trace(omega: f32, t: &[f32]) -> Vec<f32> {
    t.iter().map(|&ti| driver_phase(omega, ti)).collect()
}
