use super::*;

const TITLE_POP: SpringConfig = SpringConfig {
    stiffness: 200.0,
    damping: 100.0,
    mass: 1.0,
};

#[test]
fn starts_at_rest_at_zero() {
    for cfg in [TITLE_POP, SpringConfig::default()] {
        let s = Spring::new(cfg);
        assert_eq!(s.sample(0.0), 0.0);
        assert_eq!(s.sample(-1.0), 0.0);
    }
}

#[test]
fn overdamped_rises_monotonically_toward_one() {
    let s = Spring::new(TITLE_POP);
    let mut prev = 0.0;
    for i in 1..=300 {
        let v = s.sample(i as f64 / 30.0);
        assert!(v >= prev, "spring must not fall back at frame {i}");
        assert!(v <= 1.0);
        prev = v;
    }
    assert!(prev > 0.99);
}

#[test]
fn underdamped_overshoots_then_settles() {
    let s = Spring::new(SpringConfig::default());
    let peak = (1..=90)
        .map(|i| s.sample(i as f64 / 30.0))
        .fold(f64::MIN, f64::max);
    assert!(peak > 1.0);
    assert!((s.sample(10.0) - 1.0).abs() < 1e-3);
}

#[test]
fn critically_damped_has_no_overshoot() {
    let s = Spring::new(SpringConfig {
        stiffness: 100.0,
        damping: 20.0,
        mass: 1.0,
    });
    for i in 1..=120 {
        assert!(s.sample(i as f64 / 30.0) <= 1.0);
    }
    assert!((s.sample(5.0) - 1.0).abs() < 1e-6);
}
