use std::fmt;

/// Seconds a section lasts when the request omits `duration`.
pub const DEFAULT_SECTION_SECS: f64 = 5.0;

/// The closed set of section shapes a presentation is built from.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
    /// Opening slide: title plus optional subtitle.
    Title,
    /// Problem header with a staggered list of pain points.
    ProblemStatement,
    /// Solution pitch: title, body copy and staggered features.
    Solution,
    /// Plain staggered bullet list.
    BulletPoints,
    /// Two columns revealed together.
    Comparison,
    /// Metric rows revealed one after another.
    Results,
    /// Staged title, body and call-to-action reveal.
    Conclusion,
}

impl SectionKind {
    /// Every kind, in registry order.
    pub const ALL: [SectionKind; 7] = [
        Self::Title,
        Self::ProblemStatement,
        Self::Solution,
        Self::BulletPoints,
        Self::Comparison,
        Self::Results,
        Self::Conclusion,
    ];

    /// Wire tag (`"bullet_points"`).
    pub fn tag(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::ProblemStatement => "problem_statement",
            Self::Solution => "solution",
            Self::BulletPoints => "bullet_points",
            Self::Comparison => "comparison",
            Self::Results => "results",
            Self::Conclusion => "conclusion",
        }
    }

    /// Parse a wire tag.
    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.tag() == tag)
    }
}

impl fmt::Display for SectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// One row of a results slide.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ResultEntry {
    /// What was measured ("Speed Improvement").
    pub metric: String,
    /// Headline figure ("10x faster").
    pub value: String,
    /// Optional decorative glyph.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

/// Properties of a `title` section.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct TitleProps {
    /// Headline text.
    pub title: String,
    /// Line under the headline; empty when absent.
    pub subtitle: String,
}

/// Properties of a `problem_statement` section.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct ProblemProps {
    /// Header text.
    pub title: String,
    /// Pain points, revealed one after another.
    pub points: Vec<String>,
    /// Copy shown with the header.
    pub description: String,
}

/// Properties of a `solution` section.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct SolutionProps {
    /// Header text.
    pub title: String,
    /// Body copy.
    pub content: String,
    /// Feature list, revealed one after another.
    pub features: Vec<String>,
}

/// Properties of a `bullet_points` section.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct BulletProps {
    /// Header text.
    pub title: String,
    /// Bullets, revealed one after another.
    pub points: Vec<String>,
}

/// Properties of a `comparison` section.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonProps {
    /// Header text.
    pub title: String,
    /// Left column heading; `"Option A"` by default.
    pub left_title: String,
    /// Right column heading; `"Option B"` by default.
    pub right_title: String,
    /// Left column entries.
    pub left_points: Vec<String>,
    /// Right column entries.
    pub right_points: Vec<String>,
}

/// Properties of a `results` section.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct ResultsProps {
    /// Header text.
    pub title: String,
    /// Metric rows in display order.
    pub results: Vec<ResultEntry>,
    /// Copy under the panel.
    pub description: String,
}

/// Properties of a `conclusion` section.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConclusionProps {
    /// Header text; `"Conclusion"` by default.
    pub title: String,
    /// Closing message.
    pub content: String,
    /// Final prompt; no element is staged when empty.
    pub call_to_action: String,
}

/// Validated, defaulted properties; the variant fixes which visual elements exist.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SectionProps {
    /// `title`
    Title(TitleProps),
    /// `problem_statement`
    ProblemStatement(ProblemProps),
    /// `solution`
    Solution(SolutionProps),
    /// `bullet_points`
    BulletPoints(BulletProps),
    /// `comparison`
    Comparison(ComparisonProps),
    /// `results`
    Results(ResultsProps),
    /// `conclusion`
    Conclusion(ConclusionProps),
}

impl SectionProps {
    /// Kind corresponding to this variant.
    pub fn kind(&self) -> SectionKind {
        match self {
            Self::Title(_) => SectionKind::Title,
            Self::ProblemStatement(_) => SectionKind::ProblemStatement,
            Self::Solution(_) => SectionKind::Solution,
            Self::BulletPoints(_) => SectionKind::BulletPoints,
            Self::Comparison(_) => SectionKind::Comparison,
            Self::Results(_) => SectionKind::Results,
            Self::Conclusion(_) => SectionKind::Conclusion,
        }
    }
}

/// A normalized section, ready for timeline assembly.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionDescriptor {
    /// Registry tag the section was submitted under.
    pub tag: String,
    /// Display duration in seconds (> 0).
    pub duration_secs: f64,
    /// Validated properties.
    #[serde(flatten)]
    pub props: SectionProps,
}

impl SectionDescriptor {
    /// Section with the default five-second duration.
    pub fn new(props: SectionProps) -> Self {
        Self {
            tag: props.kind().tag().to_owned(),
            duration_secs: DEFAULT_SECTION_SECS,
            props,
        }
    }

    /// Override the display duration.
    pub fn with_duration(mut self, secs: f64) -> Self {
        self.duration_secs = secs;
        self
    }

    /// Kind of the underlying properties.
    pub fn kind(&self) -> SectionKind {
        self.props.kind()
    }
}

impl Default for ComparisonProps {
    fn default() -> Self {
        Self {
            title: String::new(),
            left_title: "Option A".to_owned(),
            right_title: "Option B".to_owned(),
            left_points: Vec::new(),
            right_points: Vec::new(),
        }
    }
}

impl Default for ConclusionProps {
    fn default() -> Self {
        Self {
            title: "Conclusion".to_owned(),
            content: String::new(),
            call_to_action: String::new(),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/sections/model.rs"]
mod tests;
