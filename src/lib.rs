//! slidereel compiles declarative slide sections into frame-accurate video timelines.
//!
//! The pipeline is:
//!
//! - Validate a [`VideoRequest`] against a [`ComponentRegistry`] into [`SectionDescriptor`]s
//! - Lay the sections out back to back as a [`Composition`] at a fixed 30 fps
//! - Sample any section at any local frame with [`sample_section`] (pure, deterministic)
//! - Hand the composition to a [`Renderer`] through a [`RenderService`] and poll the job
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

pub(crate) mod animation;
pub mod config;
pub(crate) mod eval;
pub(crate) mod jobs;
pub(crate) mod render;
pub(crate) mod sections;
pub(crate) mod timeline;

pub use crate::foundation::core::{
    Affine, Canvas, DEFAULT_CANVAS, FRAME_RATE, Fps, FrameIndex, FrameRange, Point, Vec2,
};
pub use crate::foundation::error::{
    PathElem, ReelError, ReelResult, ValidationErrors, ValidationIssue,
};

pub use crate::animation::anim::{Anim, Keyframe, Keyframes, SampleCtx};
pub use crate::animation::ops::{Window, fade_in, fade_in_out, spring_scale, staggered_fades};
pub use crate::animation::spring::{Spring, SpringConfig};
pub use crate::config::{RendererConfig, RetentionConfig, ServiceConfig};
pub use crate::eval::schedule::{ElementKey, ElementTrack, element_tracks};
pub use crate::eval::section::{
    ElementState, SectionFrame, sample_section, sample_section_on, sample_tracks,
};
pub use crate::jobs::service::RenderService;
pub use crate::jobs::state::{JobEvent, JobId, JobStatus, JobTicket, RenderJob};
pub use crate::jobs::store::{JobStore, RetentionPolicy};
pub use crate::render::command::{CommandRenderer, composition_json_path};
pub use crate::render::renderer::{RenderArtifact, RenderFailure, RenderRequest, Renderer};
pub use crate::sections::example::example_request;
pub use crate::sections::model::{
    BulletProps, ComparisonProps, ConclusionProps, DEFAULT_SECTION_SECS, ProblemProps,
    ResultEntry, ResultsProps, SectionDescriptor, SectionKind, SectionProps, SolutionProps,
    TitleProps,
};
pub use crate::sections::registry::{BuiltinTemplate, ComponentRegistry, SectionTemplate};
pub use crate::sections::validate::{VideoRequest, validate_request};
pub use crate::timeline::assemble::{
    Composition, PlacedSection, SectionPlacement, assemble, assemble_with, compile_request,
    duration_frames,
};
