use std::collections::BTreeMap;
use std::sync::Arc;

use serde_json::{Map, Value};

use crate::eval::schedule::{ElementTrack, element_tracks};
use crate::foundation::core::Fps;
use crate::foundation::error::ReelResult;
use crate::sections::model::{SectionDescriptor, SectionKind, SectionProps};
use crate::sections::schema::parse_props;

/// Capability descriptor for one section tag.
///
/// A template owns the property schema of its tag and the element curves the engine samples for
/// it. The default curves are the built-in schedule of the [`SectionProps`] variant produced.
pub trait SectionTemplate: Send + Sync {
    /// Registry key (`"bullet_points"`).
    fn tag(&self) -> &str;

    /// Short human description shown by `section_types`.
    fn description(&self) -> &str;

    /// Validate a property bag and substitute defaults for absent optional fields.
    fn parse(&self, properties: &Map<String, Value>) -> Result<SectionProps, String>;

    /// Ordered sub-elements needing independent timing, with their curves.
    fn elements(&self, props: &SectionProps, fps: Fps) -> ReelResult<Vec<ElementTrack>> {
        element_tracks(props, fps)
    }
}

/// Template for one of the seven built-in kinds.
#[derive(Clone, Copy, Debug)]
pub struct BuiltinTemplate {
    kind: SectionKind,
}

impl BuiltinTemplate {
    /// Template for `kind`.
    pub fn new(kind: SectionKind) -> Self {
        Self { kind }
    }
}

impl SectionTemplate for BuiltinTemplate {
    fn tag(&self) -> &str {
        self.kind.tag()
    }

    fn description(&self) -> &str {
        match self.kind {
            SectionKind::Title => "Main title slide with optional subtitle",
            SectionKind::ProblemStatement => "List problems with bullet points",
            SectionKind::Solution => "Present solution with features",
            SectionKind::BulletPoints => "Simple bullet point list",
            SectionKind::Comparison => "Side-by-side comparison",
            SectionKind::Results => "Show metrics and achievements",
            SectionKind::Conclusion => "Final message with call-to-action",
        }
    }

    fn parse(&self, properties: &Map<String, Value>) -> Result<SectionProps, String> {
        parse_props(self.kind, properties)
    }
}

/// Mapping from section tag to template.
#[derive(Clone)]
pub struct ComponentRegistry {
    templates: BTreeMap<String, Arc<dyn SectionTemplate>>,
}

impl ComponentRegistry {
    /// Registry without any entries.
    pub fn empty() -> Self {
        Self {
            templates: BTreeMap::new(),
        }
    }

    /// Registry with the seven built-in section kinds.
    pub fn builtin() -> Self {
        let mut reg = Self::empty();
        for kind in SectionKind::ALL {
            reg.register(Arc::new(BuiltinTemplate::new(kind)));
        }
        reg
    }

    /// Add a template under its tag, replacing any previous template for that tag.
    pub fn register(&mut self, template: Arc<dyn SectionTemplate>) -> &mut Self {
        self.templates.insert(template.tag().to_owned(), template);
        self
    }

    /// Template registered under `tag`.
    pub fn lookup(&self, tag: &str) -> Option<&Arc<dyn SectionTemplate>> {
        self.templates.get(tag)
    }

    /// Registered tags in sorted order.
    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.templates.keys().map(String::as_str)
    }

    /// `tag -> description` for every registered tag.
    pub fn section_types(&self) -> BTreeMap<String, String> {
        self.templates
            .iter()
            .map(|(tag, t)| (tag.clone(), t.description().to_owned()))
            .collect()
    }

    /// Ordered visual elements `section` stages for independent timing.
    pub fn declared_elements(
        &self,
        section: &SectionDescriptor,
        fps: Fps,
    ) -> ReelResult<Vec<ElementTrack>> {
        match self.lookup(&section.tag) {
            Some(template) => template.elements(&section.props, fps),
            None => element_tracks(&section.props, fps),
        }
    }

    /// Number of registered tags.
    pub fn len(&self) -> usize {
        self.templates.len()
    }

    /// `true` when nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

impl Default for ComponentRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

impl std::fmt::Debug for ComponentRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ComponentRegistry")
            .field("tags", &self.templates.keys().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/sections/registry.rs"]
mod tests;
