//! Head loss and pumping power formulas.

use rl_core::units::constants::G_MPS2;

/// Darcy–Weisbach frictional head loss `f·(L/D)·(v²/2g)` (m).
#[inline]
pub fn darcy_head_loss(friction_factor: f64, length: f64, diameter: f64, kinetic_head: f64) -> f64 {
    if diameter <= 0.0 {
        return 0.0;
    }
    friction_factor * (length / diameter) * kinetic_head
}

/// Minor (fittings) head loss `ΣK·(v²/2g)` (m).
#[inline]
pub fn minor_head_loss(k_total: f64, kinetic_head: f64) -> f64 {
    k_total * kinetic_head
}

/// Hydraulic power `ρ·g·Q·H` (W).
#[inline]
pub fn hydraulic_power(density: f64, flow: f64, head: f64) -> f64 {
    density * G_MPS2 * flow * head
}

/// Hydraulic power in kilowatts.
#[inline]
pub fn hydraulic_power_kw(density: f64, flow: f64, head: f64) -> f64 {
    rl_core::units::convert::w_to_kw(hydraulic_power(density, flow, head))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn darcy_loss_scales_with_length() {
        let h1 = darcy_head_loss(0.0176, 100.0, 0.1541, 0.0916);
        let h2 = darcy_head_loss(0.0176, 200.0, 0.1541, 0.0916);
        assert_relative_eq!(h2, 2.0 * h1, max_relative = 1e-12);
    }

    #[test]
    fn darcy_loss_degenerate_diameter() {
        assert_eq!(darcy_head_loss(0.02, 100.0, 0.0, 0.1), 0.0);
    }

    #[test]
    fn minor_loss() {
        assert_relative_eq!(minor_head_loss(4.3, 0.0916), 0.39388, max_relative = 1e-4);
    }

    #[test]
    fn segment_one_power() {
        // 998 kg/m³, 25 L/s against 102.35 m
        assert_relative_eq!(
            hydraulic_power_kw(998.0, 0.025, 102.35),
            25.05,
            max_relative = 1e-3
        );
    }
}
