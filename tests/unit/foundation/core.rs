use super::*;

#[test]
fn frame_range_contains_boundaries() {
    let r = FrameRange::new(FrameIndex(2), FrameIndex(5)).unwrap();
    assert!(!r.contains(FrameIndex(1)));
    assert!(r.contains(FrameIndex(2)));
    assert!(r.contains(FrameIndex(4)));
    assert!(!r.contains(FrameIndex(5)));
    assert_eq!(r.len_frames(), 3);
}

#[test]
fn frame_range_rejects_inverted_bounds() {
    assert!(FrameRange::new(FrameIndex(5), FrameIndex(2)).is_err());
    assert!(FrameRange::new(FrameIndex(5), FrameIndex(5)).unwrap().is_empty());
}

#[test]
fn secs_to_frames_rounds_half_up() {
    let fps = FRAME_RATE;
    assert_eq!(fps.secs_to_frames_round(5.0), Some(150));
    // 0.05s * 30 = 1.5 frames -> ties toward +inf.
    assert_eq!(fps.secs_to_frames_round(0.05), Some(2));
    assert_eq!(fps.secs_to_frames_round(0.04), Some(1));
    assert_eq!(fps.secs_to_frames_round(f64::NAN), None);
    assert_eq!(fps.secs_to_frames_round(f64::INFINITY), None);
}

#[test]
fn frames_to_whole_seconds_rounds_up() {
    assert_eq!(FRAME_RATE.frames_to_secs_ceil(690), 23);
    assert_eq!(FRAME_RATE.frames_to_secs_ceil(691), 24);
    assert_eq!(FRAME_RATE.frames_to_secs_ceil(0), 0);
}

#[test]
fn fps_rejects_zero_parts() {
    assert!(Fps::new(0, 1).is_err());
    assert!(Fps::new(30, 0).is_err());
    assert_eq!(Fps::new(30, 1).unwrap(), FRAME_RATE);
}

#[test]
fn canvas_center_is_half_extent() {
    let c = DEFAULT_CANVAS.center();
    assert_eq!((c.x, c.y), (960.0, 540.0));
}
