use super::*;
use crate::foundation::core::FRAME_RATE;

fn ctx(frame: u64) -> SampleCtx {
    SampleCtx {
        fps: FRAME_RATE,
        local_frame: frame,
    }
}

#[test]
fn keyframes_linear_interpolates() {
    let kf = Keyframes::from_ranges(&[0.0, 10.0], &[0.0, 10.0]).unwrap();
    assert_eq!(kf.sample(5.0), 5.0);
    assert_eq!(kf.sample(2.5), 2.5);
}

#[test]
fn keyframes_clamp_outside_range() {
    let anim = Anim::Keyframes(Keyframes::from_ranges(&[30.0, 45.0], &[0.0, 1.0]).unwrap());
    assert_eq!(anim.sample(ctx(0)), 0.0);
    assert_eq!(anim.sample(ctx(29)), 0.0);
    assert_eq!(anim.sample(ctx(45)), 1.0);
    assert_eq!(anim.sample(ctx(10_000)), 1.0);
}

#[test]
fn four_point_curve_rises_holds_and_falls() {
    let kf = Keyframes::from_ranges(&[0.0, 15.0, 120.0, 150.0], &[0.0, 1.0, 1.0, 0.0]).unwrap();
    assert_eq!(kf.sample(0.0), 0.0);
    assert_eq!(kf.sample(15.0), 1.0);
    assert_eq!(kf.sample(60.0), 1.0);
    assert_eq!(kf.sample(135.0), 0.5);
    assert_eq!(kf.sample(150.0), 0.0);
    assert_eq!(kf.sample(900.0), 0.0);
}

#[test]
fn keyframes_reject_unsorted_or_empty_keys() {
    assert!(Keyframes::new(vec![]).is_err());
    assert!(Keyframes::from_ranges(&[10.0, 0.0], &[0.0, 1.0]).is_err());
    assert!(Keyframes::from_ranges(&[5.0, 5.0], &[0.0, 1.0]).is_err());
    assert!(Keyframes::from_ranges(&[0.0, 1.0], &[0.0]).is_err());
    assert!(Keyframes::from_ranges(&[0.0, f64::NAN], &[0.0, 1.0]).is_err());
}

#[test]
fn constant_ignores_frame() {
    let anim = Anim::Constant(1.0);
    assert_eq!(anim.sample(ctx(0)), 1.0);
    assert_eq!(anim.sample(ctx(999)), 1.0);
    assert_eq!(anim.start_frame(), 0.0);
}
