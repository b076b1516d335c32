use std::fmt;

use crate::animation::anim::Anim;
use crate::animation::ops::{Window, fade_in, fade_in_out, staggered_fades, spring_scale};
use crate::animation::spring::SpringConfig;
use crate::foundation::core::Fps;
use crate::foundation::error::ReelResult;
use crate::sections::model::SectionProps;

const HEADER_FADE: Window = Window::new(0.0, 0.5);
const BODY_FADE: Window = Window::new(1.0, 1.5);

const TITLE_FADE_OUT: Window = Window::new(4.0, 5.0);
const TITLE_SPRING: SpringConfig = SpringConfig {
    stiffness: 200.0,
    damping: 100.0,
    mass: 1.0,
};

const PROBLEM_ITEMS: Window = Window::new(1.0, 1.5);
const PROBLEM_STAGGER: f64 = 0.5;

const SOLUTION_ITEMS: Window = Window::new(2.0, 2.3);
const SOLUTION_STAGGER: f64 = 0.3;

const BULLET_ITEMS: Window = Window::new(1.0, 1.4);
const BULLET_STAGGER: f64 = 0.4;

const RESULT_ROWS: Window = Window::new(2.0, 2.3);
const RESULT_STAGGER: f64 = 0.3;

const CONCLUSION_TITLE: Window = Window::new(0.0, 1.0);
const CONCLUSION_CONTENT: Window = Window::new(1.0, 2.0);
const CONCLUSION_CTA: Window = Window::new(2.5, 3.5);

/// A visual element of a section that is timed independently.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementKey {
    /// Title slide headline block (title and subtitle together).
    Headline,
    /// Problem header block (title and description together).
    Header,
    /// Section heading.
    Title,
    /// Body copy.
    Content,
    /// `n`-th entry of a staggered list (points, features, result rows).
    Item(usize),
    /// Both comparison columns.
    Columns,
    /// Container holding the result rows.
    ResultsPanel,
    /// Closing prompt of a conclusion.
    CallToAction,
}

impl fmt::Display for ElementKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Headline => f.write_str("headline"),
            Self::Header => f.write_str("header"),
            Self::Title => f.write_str("title"),
            Self::Content => f.write_str("content"),
            Self::Item(i) => write!(f, "item[{i}]"),
            Self::Columns => f.write_str("columns"),
            Self::ResultsPanel => f.write_str("results_panel"),
            Self::CallToAction => f.write_str("call_to_action"),
        }
    }
}

/// Animation channels of one element.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct ElementTrack {
    /// Which element the curves drive.
    pub key: ElementKey,
    /// Opacity curve, clamped to `[0, 1]` when sampled.
    pub opacity: Anim,
    /// Uniform scale about the canvas centre.
    pub scale: Anim,
    /// Enclosing element whose opacity multiplies this one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<ElementKey>,
}

impl ElementTrack {
    fn new(key: ElementKey, opacity: Anim) -> Self {
        Self {
            key,
            opacity,
            scale: Anim::Constant(1.0),
            parent: None,
        }
    }

    fn with_scale(mut self, scale: Anim) -> Self {
        self.scale = scale;
        self
    }

    fn within(mut self, parent: ElementKey) -> Self {
        self.parent = Some(parent);
        self
    }
}

/// Ordered element tracks for a section. Parents always precede their children.
pub fn element_tracks(props: &SectionProps, fps: Fps) -> ReelResult<Vec<ElementTrack>> {
    let mut out = Vec::new();
    match props {
        SectionProps::Title(_) => {
            out.push(
                ElementTrack::new(
                    ElementKey::Headline,
                    fade_in_out(fps, HEADER_FADE, TITLE_FADE_OUT)?,
                )
                .with_scale(spring_scale(TITLE_SPRING)),
            );
        }
        SectionProps::ProblemStatement(p) => {
            out.push(ElementTrack::new(ElementKey::Header, fade_in(fps, HEADER_FADE)?));
            push_items(&mut out, fps, PROBLEM_ITEMS, PROBLEM_STAGGER, p.points.len(), None)?;
        }
        SectionProps::Solution(p) => {
            out.push(ElementTrack::new(ElementKey::Title, fade_in(fps, HEADER_FADE)?));
            out.push(ElementTrack::new(ElementKey::Content, fade_in(fps, BODY_FADE)?));
            push_items(&mut out, fps, SOLUTION_ITEMS, SOLUTION_STAGGER, p.features.len(), None)?;
        }
        SectionProps::BulletPoints(p) => {
            out.push(ElementTrack::new(ElementKey::Title, fade_in(fps, HEADER_FADE)?));
            push_items(&mut out, fps, BULLET_ITEMS, BULLET_STAGGER, p.points.len(), None)?;
        }
        SectionProps::Comparison(_) => {
            out.push(ElementTrack::new(ElementKey::Title, fade_in(fps, HEADER_FADE)?));
            out.push(ElementTrack::new(ElementKey::Columns, fade_in(fps, BODY_FADE)?));
        }
        SectionProps::Results(p) => {
            out.push(ElementTrack::new(ElementKey::Title, fade_in(fps, HEADER_FADE)?));
            out.push(ElementTrack::new(ElementKey::ResultsPanel, fade_in(fps, BODY_FADE)?));
            push_items(
                &mut out,
                fps,
                RESULT_ROWS,
                RESULT_STAGGER,
                p.results.len(),
                Some(ElementKey::ResultsPanel),
            )?;
        }
        SectionProps::Conclusion(p) => {
            out.push(ElementTrack::new(ElementKey::Title, fade_in(fps, CONCLUSION_TITLE)?));
            out.push(ElementTrack::new(ElementKey::Content, fade_in(fps, CONCLUSION_CONTENT)?));
            if !p.call_to_action.is_empty() {
                out.push(ElementTrack::new(
                    ElementKey::CallToAction,
                    fade_in(fps, CONCLUSION_CTA)?,
                ));
            }
        }
    }
    Ok(out)
}

fn push_items(
    out: &mut Vec<ElementTrack>,
    fps: Fps,
    first: Window,
    step: f64,
    count: usize,
    parent: Option<ElementKey>,
) -> ReelResult<()> {
    for (i, opacity) in staggered_fades(fps, first, step, count)?.into_iter().enumerate() {
        let track = ElementTrack::new(ElementKey::Item(i), opacity);
        out.push(match parent {
            Some(p) => track.within(p),
            None => track,
        });
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/eval/schedule.rs"]
mod tests;
