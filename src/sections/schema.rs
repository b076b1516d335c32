use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::sections::model::{
    BulletProps, ComparisonProps, ConclusionProps, ProblemProps, ResultEntry, ResultsProps,
    SectionKind, SectionProps, SolutionProps, TitleProps,
};

// Wire shapes accept `null` for every field; absent and null both fall back to defaults.

#[derive(Deserialize, Default)]
#[serde(default)]
struct TitleWire {
    title: Option<String>,
    subtitle: Option<String>,
    content: Option<String>,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct ProblemWire {
    title: Option<String>,
    points: Option<Vec<String>>,
    description: Option<String>,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct SolutionWire {
    title: Option<String>,
    content: Option<String>,
    features: Option<Vec<String>>,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct BulletWire {
    title: Option<String>,
    points: Option<Vec<String>>,
}

#[derive(Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
struct ComparisonWire {
    title: Option<String>,
    #[serde(alias = "left_title")]
    left_title: Option<String>,
    #[serde(alias = "right_title")]
    right_title: Option<String>,
    #[serde(alias = "left_points")]
    left_points: Option<Vec<String>>,
    #[serde(alias = "right_points")]
    right_points: Option<Vec<String>>,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct ResultsWire {
    title: Option<String>,
    results: Option<Vec<ResultEntry>>,
    description: Option<String>,
}

#[derive(Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
struct ConclusionWire {
    title: Option<String>,
    content: Option<String>,
    #[serde(alias = "call_to_action")]
    call_to_action: Option<String>,
}

/// Parse a section's property bag into the schema of `kind`, substituting defaults.
///
/// Keys that do not belong to the schema are ignored. Returns a human readable message when a
/// known key has the wrong JSON type.
pub(crate) fn parse_props(kind: SectionKind, bag: &Map<String, Value>) -> Result<SectionProps, String> {
    Ok(match kind {
        SectionKind::Title => {
            let w: TitleWire = from_bag(bag)?;
            SectionProps::Title(TitleProps {
                title: non_empty(w.title).or(w.content).unwrap_or_default(),
                subtitle: w.subtitle.unwrap_or_default(),
            })
        }
        SectionKind::ProblemStatement => {
            let w: ProblemWire = from_bag(bag)?;
            SectionProps::ProblemStatement(ProblemProps {
                title: w.title.unwrap_or_default(),
                points: w.points.unwrap_or_default(),
                description: w.description.unwrap_or_default(),
            })
        }
        SectionKind::Solution => {
            let w: SolutionWire = from_bag(bag)?;
            SectionProps::Solution(SolutionProps {
                title: w.title.unwrap_or_default(),
                content: w.content.unwrap_or_default(),
                features: w.features.unwrap_or_default(),
            })
        }
        SectionKind::BulletPoints => {
            let w: BulletWire = from_bag(bag)?;
            SectionProps::BulletPoints(BulletProps {
                title: w.title.unwrap_or_default(),
                points: w.points.unwrap_or_default(),
            })
        }
        SectionKind::Comparison => {
            let w: ComparisonWire = from_bag(bag)?;
            let d = ComparisonProps::default();
            SectionProps::Comparison(ComparisonProps {
                title: w.title.unwrap_or_default(),
                left_title: non_empty(w.left_title).unwrap_or(d.left_title),
                right_title: non_empty(w.right_title).unwrap_or(d.right_title),
                left_points: w.left_points.unwrap_or_default(),
                right_points: w.right_points.unwrap_or_default(),
            })
        }
        SectionKind::Results => {
            let w: ResultsWire = from_bag(bag)?;
            SectionProps::Results(ResultsProps {
                title: w.title.unwrap_or_default(),
                results: w.results.unwrap_or_default(),
                description: w.description.unwrap_or_default(),
            })
        }
        SectionKind::Conclusion => {
            let w: ConclusionWire = from_bag(bag)?;
            let d = ConclusionProps::default();
            SectionProps::Conclusion(ConclusionProps {
                title: non_empty(w.title).unwrap_or(d.title),
                content: w.content.unwrap_or_default(),
                call_to_action: w.call_to_action.unwrap_or_default(),
            })
        }
    })
}

fn from_bag<T: DeserializeOwned>(bag: &Map<String, Value>) -> Result<T, String> {
    serde_json::from_value(Value::Object(bag.clone())).map_err(|e| e.to_string())
}

fn non_empty(v: Option<String>) -> Option<String> {
    v.filter(|s| !s.is_empty())
}

#[cfg(test)]
#[path = "../../tests/unit/sections/schema.rs"]
mod tests;
