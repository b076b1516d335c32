use crate::{
    animation::anim::{Anim, Keyframes},
    animation::spring::{Spring, SpringConfig},
    foundation::core::Fps,
    foundation::error::ReelResult,
};

/// Time window in seconds, relative to a section's start.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct Window {
    /// Window start (seconds).
    pub start: f64,
    /// Window end (seconds).
    pub end: f64,
}

impl Window {
    /// Window `[start, end]` in seconds.
    pub const fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    /// Same length, shifted later by `by` seconds.
    pub fn delayed(self, by: f64) -> Self {
        Self {
            start: self.start + by,
            end: self.end + by,
        }
    }
}

/// Opacity rising 0 -> 1 across `window`.
pub fn fade_in(fps: Fps, window: Window) -> ReelResult<Anim> {
    let kf = Keyframes::from_ranges(
        &[
            fps.secs_to_frame_pos(window.start),
            fps.secs_to_frame_pos(window.end),
        ],
        &[0.0, 1.0],
    )?;
    Ok(Anim::Keyframes(kf))
}

/// Opacity rising across `fade_in`, holding, then falling back to 0 across `fade_out`.
pub fn fade_in_out(fps: Fps, fade_in: Window, fade_out: Window) -> ReelResult<Anim> {
    let kf = Keyframes::from_ranges(
        &[
            fps.secs_to_frame_pos(fade_in.start),
            fps.secs_to_frame_pos(fade_in.end),
            fps.secs_to_frame_pos(fade_out.start),
            fps.secs_to_frame_pos(fade_out.end),
        ],
        &[0.0, 1.0, 1.0, 0.0],
    )?;
    Ok(Anim::Keyframes(kf))
}

/// Window of item `index` in a cascading reveal: `first` shifted by `index * step` seconds.
pub fn stagger_window(first: Window, step: f64, index: usize) -> Window {
    first.delayed(step * index as f64)
}

/// One fade-in per item, each delayed by `step` seconds relative to the previous one.
pub fn staggered_fades(fps: Fps, first: Window, step: f64, count: usize) -> ReelResult<Vec<Anim>> {
    (0..count)
        .map(|i| fade_in(fps, stagger_window(first, step, i)))
        .collect()
}

/// Spring pop-in scale settling at 1.0.
pub fn spring_scale(config: SpringConfig) -> Anim {
    Anim::Spring(Spring::new(config))
}

#[cfg(test)]
#[path = "../../tests/unit/animation/ops.rs"]
mod tests;
