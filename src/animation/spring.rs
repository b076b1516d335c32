/// Mass-spring-damper parameters.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SpringConfig {
    /// Spring constant `k`.
    pub stiffness: f64,
    /// Damping coefficient `c`.
    pub damping: f64,
    /// Moving mass `m`.
    pub mass: f64,
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self {
            stiffness: 100.0,
            damping: 10.0,
            mass: 1.0,
        }
    }
}

/// Spring released from rest at 0 and settling toward 1.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct Spring {
    /// Physical parameters.
    pub config: SpringConfig,
}

impl Spring {
    /// Spring with the given parameters.
    pub fn new(config: SpringConfig) -> Self {
        Self { config }
    }

    /// Position after `secs` seconds. Negative time is treated as "not yet released".
    pub fn sample(&self, secs: f64) -> f64 {
        if secs <= 0.0 {
            return 0.0;
        }
        step_response(secs, self.config)
    }
}

// Analytic step response with x(0)=0, v(0)=0, target 1.
fn step_response(t: f64, cfg: SpringConfig) -> f64 {
    let k = cfg.stiffness.max(0.0);
    let c = cfg.damping.max(0.0);
    let m = cfg.mass.max(1e-9);

    let w0 = (k / m).sqrt();
    if w0 == 0.0 {
        return 0.0;
    }
    let zeta = c / (2.0 * (k * m).sqrt()).max(1e-9);

    if (zeta - 1.0).abs() < 1e-6 {
        // Critically damped.
        let e = (-w0 * t).exp();
        1.0 - e * (1.0 + w0 * t)
    } else if zeta < 1.0 {
        // Underdamped: decaying oscillation around 1.
        let wd = w0 * (1.0 - zeta * zeta).sqrt();
        let e = (-zeta * w0 * t).exp();
        let k = zeta / (1.0 - zeta * zeta).sqrt();
        1.0 - e * ((wd * t).cos() + k * (wd * t).sin())
    } else {
        // Overdamped.
        let z2 = (zeta * zeta - 1.0).sqrt();
        let r1 = -w0 * (zeta - z2);
        let r2 = -w0 * (zeta + z2);
        let c2 = (zeta + z2) / (2.0 * z2);
        let c1 = (zeta - z2) / (2.0 * z2);
        1.0 - (c2 * (r1 * t).exp() - c1 * (r2 * t).exp())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/spring.rs"]
mod tests;
