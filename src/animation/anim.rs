use crate::{
    animation::spring::Spring,
    foundation::core::Fps,
    foundation::error::{ReelError, ReelResult},
};

/// Where on a section's local timeline a curve is being sampled.
#[derive(Clone, Copy, Debug)]
pub struct SampleCtx {
    /// Frame rate the curve positions are expressed in.
    pub fps: Fps,
    /// Frame relative to the owning section's start.
    pub local_frame: u64,
}

impl SampleCtx {
    /// Local time in seconds.
    pub fn local_secs(self) -> f64 {
        self.fps.frames_to_secs(self.local_frame)
    }
}

/// A scalar animation channel (opacity, scale, ...).
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Anim {
    /// Same value on every frame.
    Constant(f64),
    /// Piecewise-linear curve, clamped outside its keys.
    Keyframes(Keyframes),
    /// Spring step response from 0 toward 1.
    Spring(Spring),
}

impl Anim {
    /// Sample the channel. Pure: identical inputs give identical outputs.
    pub fn sample(&self, ctx: SampleCtx) -> f64 {
        match self {
            Self::Constant(v) => *v,
            Self::Keyframes(kf) => kf.sample(ctx.local_frame as f64),
            Self::Spring(spring) => spring.sample(ctx.local_secs()),
        }
    }

    /// First frame position at which the channel starts changing.
    pub fn start_frame(&self) -> f64 {
        match self {
            Self::Keyframes(kf) => kf.keys[0].frame,
            Self::Constant(_) | Self::Spring(_) => 0.0,
        }
    }
}

/// Sorted keyframes over fractional frame positions.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Keyframes {
    keys: Vec<Keyframe>, // strictly increasing by frame
}

/// One control point of a [`Keyframes`] curve.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct Keyframe {
    /// Position in frames (may be fractional).
    pub frame: f64,
    /// Value at `frame`.
    pub value: f64,
}

impl Keyframes {
    /// Build a curve; keys must be finite and strictly increasing by frame.
    pub fn new(keys: Vec<Keyframe>) -> ReelResult<Self> {
        if keys.is_empty() {
            return Err(ReelError::animation("Keyframes must have at least one key"));
        }
        if keys
            .iter()
            .any(|k| !k.frame.is_finite() || !k.value.is_finite())
        {
            return Err(ReelError::animation("Keyframes keys must be finite"));
        }
        if !keys.windows(2).all(|w| w[0].frame < w[1].frame) {
            return Err(ReelError::animation(
                "Keyframes keys must be strictly increasing by frame",
            ));
        }
        Ok(Self { keys })
    }

    /// Build a curve from parallel `frames -> values` ranges.
    pub fn from_ranges(frames: &[f64], values: &[f64]) -> ReelResult<Self> {
        if frames.len() != values.len() {
            return Err(ReelError::animation(format!(
                "input range has {} entries but output range has {}",
                frames.len(),
                values.len()
            )));
        }
        Self::new(
            frames
                .iter()
                .zip(values)
                .map(|(&frame, &value)| Keyframe { frame, value })
                .collect(),
        )
    }

    /// Control points in frame order.
    pub fn keys(&self) -> &[Keyframe] {
        &self.keys
    }

    /// Sample at a fractional frame position, clamping to the boundary values outside the keys.
    pub fn sample(&self, f: f64) -> f64 {
        let idx = self.keys.partition_point(|k| k.frame <= f);

        if idx == 0 {
            return self.keys[0].value;
        }
        if idx >= self.keys.len() {
            return self.keys[self.keys.len() - 1].value;
        }

        let a = &self.keys[idx - 1];
        let b = &self.keys[idx];
        let t = (f - a.frame) / (b.frame - a.frame);
        a.value + (b.value - a.value) * t
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/anim.rs"]
mod tests;
