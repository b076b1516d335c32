use crate::eval::schedule::ElementTrack;
use crate::eval::section::{SectionFrame, sample_tracks};
use crate::foundation::core::{Canvas, DEFAULT_CANVAS, FrameIndex, FrameRange, Fps};
use crate::foundation::error::{ReelError, ReelResult};
use crate::sections::model::SectionDescriptor;
use crate::sections::registry::ComponentRegistry;
use crate::sections::validate::{VideoRequest, validate_request};

/// Where one section sits on the composition timeline.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionPlacement {
    /// First global frame of the section.
    pub start_frame: u64,
    /// Number of frames the section occupies (> 0).
    pub duration_frames: u64,
}

impl SectionPlacement {
    /// Exclusive end frame.
    pub fn end_frame(self) -> u64 {
        self.start_frame + self.duration_frames
    }

    /// Frames covered by this placement.
    pub fn range(self) -> FrameRange {
        FrameRange {
            start: FrameIndex(self.start_frame),
            end: FrameIndex(self.end_frame()),
        }
    }
}

/// A section together with its placement and the element curves its template declares.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct PlacedSection {
    /// Position on the composition timeline.
    pub placement: SectionPlacement,
    /// Validated section.
    pub section: SectionDescriptor,
    /// Element tracks resolved when the composition was built.
    #[serde(skip)]
    pub elements: Vec<ElementTrack>,
}

/// Sections laid end to end on a single frame timeline.
///
/// Immutable once assembled; jobs share it through an `Arc`.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Composition {
    /// Identifier handed to the renderer.
    pub id: String,
    /// Frame rate of every placement.
    pub fps: Fps,
    /// Output size; scale transforms pivot on its centre.
    pub canvas: Canvas,
    /// Sections in presentation order.
    pub sections: Vec<PlacedSection>,
    /// Sum of all section durations.
    pub total_duration_frames: u64,
}

impl Composition {
    /// Whole seconds covering the composition, rounded up.
    pub fn duration_secs_ceil(&self) -> u64 {
        self.fps.frames_to_secs_ceil(self.total_duration_frames)
    }

    /// `true` when there is nothing to render.
    pub fn is_empty(&self) -> bool {
        self.total_duration_frames == 0
    }

    /// Index of the section active at `global_frame` and the frame relative to its start.
    pub fn locate(&self, global_frame: u64) -> Option<(usize, u64)> {
        if global_frame >= self.total_duration_frames {
            return None;
        }
        let idx = self
            .sections
            .partition_point(|s| s.placement.start_frame <= global_frame)
            .checked_sub(1)?;
        let placement = self.sections[idx].placement;
        Some((idx, global_frame - placement.start_frame))
    }

    /// Interpolated element state of the section visible at `global_frame`.
    ///
    /// Returns `Ok(None)` past the end of the composition.
    pub fn sample(&self, global_frame: u64) -> ReelResult<Option<SectionFrame>> {
        let Some((idx, local)) = self.locate(global_frame) else {
            return Ok(None);
        };
        let placed = &self.sections[idx];
        Ok(Some(sample_tracks(
            &placed.section,
            &placed.elements,
            self.fps,
            local,
            self.canvas,
        )))
    }
}

/// Frame count for `secs`, rounded to nearest with ties upward.
pub fn duration_frames(fps: Fps, secs: f64) -> ReelResult<u64> {
    if !secs.is_finite() || secs <= 0.0 {
        return Err(ReelError::assembly(format!(
            "section duration must be a positive number of seconds, got {secs}"
        )));
    }
    match fps.secs_to_frames_round(secs) {
        Some(0) => Err(ReelError::assembly(format!(
            "section duration {secs}s rounds to zero frames at {} fps",
            fps.as_f64()
        ))),
        Some(n) => Ok(n),
        None => Err(ReelError::assembly(format!(
            "section duration {secs}s does not fit the frame timeline"
        ))),
    }
}

/// Lay `sections` out back to back starting at frame 0, using the built-in element schedules.
///
/// An empty list yields an empty composition.
pub fn assemble(
    id: impl Into<String>,
    sections: Vec<SectionDescriptor>,
    fps: Fps,
) -> ReelResult<Composition> {
    assemble_with(&ComponentRegistry::empty(), id, sections, fps)
}

/// [`assemble`] with element tracks taken from the templates in `registry`.
///
/// Tags missing from `registry` fall back to the built-in schedule of their kind.
pub fn assemble_with(
    registry: &ComponentRegistry,
    id: impl Into<String>,
    sections: Vec<SectionDescriptor>,
    fps: Fps,
) -> ReelResult<Composition> {
    let mut placed = Vec::with_capacity(sections.len());
    let mut cursor = 0u64;

    for section in sections {
        let frames = duration_frames(fps, section.duration_secs)?;
        let placement = SectionPlacement {
            start_frame: cursor,
            duration_frames: frames,
        };
        cursor = cursor
            .checked_add(frames)
            .ok_or_else(|| ReelError::assembly("composition length overflows u64 frames"))?;
        let elements = registry.declared_elements(&section, fps)?;
        placed.push(PlacedSection {
            placement,
            section,
            elements,
        });
    }

    Ok(Composition {
        id: id.into(),
        fps,
        canvas: DEFAULT_CANVAS,
        sections: placed,
        total_duration_frames: cursor,
    })
}

/// Validate `request` against `registry` and lay the result out as composition `id`.
pub fn compile_request(
    registry: &ComponentRegistry,
    request: &VideoRequest,
    id: impl Into<String>,
    fps: Fps,
) -> ReelResult<Composition> {
    let sections = validate_request(registry, request)?;
    assemble_with(registry, id, sections, fps)
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/assemble.rs"]
mod tests;
