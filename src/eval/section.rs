use crate::animation::anim::SampleCtx;
use crate::eval::schedule::{ElementKey, ElementTrack, element_tracks};
use crate::foundation::core::{Affine, Canvas, DEFAULT_CANVAS, Fps};
use crate::foundation::error::ReelResult;
use crate::sections::model::{SectionDescriptor, SectionKind};

/// Sampled state of one element on one frame.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementState {
    /// Element sampled.
    pub key: ElementKey,
    /// Own opacity in `[0, 1]`.
    pub opacity: f64,
    /// Uniform scale factor.
    pub scale: f64,
    /// Own opacity multiplied by the parent's.
    pub effective_opacity: f64,
    /// Scale about the canvas centre; identity when `scale == 1`.
    pub transform: Affine,
}

/// Every element of one section sampled at one local frame.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionFrame {
    /// Registry tag of the section.
    pub tag: String,
    /// Shape of the section's properties.
    pub kind: SectionKind,
    /// Frame relative to the section start.
    pub local_frame: u64,
    /// Elements in declaration order.
    pub elements: Vec<ElementState>,
}

impl SectionFrame {
    /// State of `key`, if the section declares it.
    pub fn element(&self, key: ElementKey) -> Option<&ElementState> {
        self.elements.iter().find(|e| e.key == key)
    }
}

/// Sample every element of `section` at `local_frame` on the default canvas.
///
/// Pure: identical inputs give bit-identical results.
#[tracing::instrument(level = "debug", skip(section), fields(tag = %section.tag))]
pub fn sample_section(
    section: &SectionDescriptor,
    fps: Fps,
    local_frame: u64,
) -> ReelResult<SectionFrame> {
    sample_section_on(section, fps, local_frame, DEFAULT_CANVAS)
}

/// [`sample_section`] for an explicit canvas.
pub fn sample_section_on(
    section: &SectionDescriptor,
    fps: Fps,
    local_frame: u64,
    canvas: Canvas,
) -> ReelResult<SectionFrame> {
    let tracks = element_tracks(&section.props, fps)?;
    Ok(sample_tracks(section, &tracks, fps, local_frame, canvas))
}

/// Sample already resolved element `tracks` of `section` at `local_frame`.
///
/// Parents must precede their children in `tracks`.
pub fn sample_tracks(
    section: &SectionDescriptor,
    tracks: &[ElementTrack],
    fps: Fps,
    local_frame: u64,
    canvas: Canvas,
) -> SectionFrame {
    let ctx = SampleCtx { fps, local_frame };
    let mut elements: Vec<ElementState> = Vec::with_capacity(tracks.len());
    for track in tracks {
        let opacity = track.opacity.sample(ctx).clamp(0.0, 1.0);
        let scale = track.scale.sample(ctx);
        let parent_opacity = track
            .parent
            .and_then(|p| elements.iter().find(|e| e.key == p))
            .map_or(1.0, |e| e.effective_opacity);

        elements.push(ElementState {
            key: track.key,
            opacity,
            scale,
            effective_opacity: opacity * parent_opacity,
            transform: scale_about(canvas, scale),
        });
    }

    SectionFrame {
        tag: section.tag.clone(),
        kind: section.kind(),
        local_frame,
        elements,
    }
}

fn scale_about(canvas: Canvas, scale: f64) -> Affine {
    if scale == 1.0 {
        return Affine::IDENTITY;
    }
    let c = canvas.center().to_vec2();
    Affine::translate(c) * Affine::scale(scale) * Affine::translate(-c)
}

#[cfg(test)]
#[path = "../../tests/unit/eval/section.rs"]
mod tests;
