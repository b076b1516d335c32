use super::*;
use crate::foundation::core::FRAME_RATE;
use std::sync::Arc;

use serde_json::{Map, Value, json};

use crate::eval::schedule::{ElementKey, ElementTrack};
use crate::sections::model::{BulletProps, SectionKind, SectionProps, TitleProps};
use crate::sections::registry::SectionTemplate;
use crate::sections::schema::parse_props;

fn bullets(secs: f64) -> SectionDescriptor {
    SectionDescriptor::new(SectionProps::BulletPoints(BulletProps::default())).with_duration(secs)
}

#[test]
fn placements_are_contiguous_from_zero() {
    let comp = assemble("c", vec![bullets(5.0), bullets(10.0), bullets(8.0)], FRAME_RATE).unwrap();

    let starts: Vec<_> = comp
        .sections
        .iter()
        .map(|s| s.placement.start_frame)
        .collect();
    assert_eq!(starts, vec![0, 150, 450]);
    assert_eq!(comp.total_duration_frames, 690);
    assert_eq!(comp.duration_secs_ceil(), 23);

    for w in comp.sections.windows(2) {
        assert_eq!(w[0].placement.end_frame(), w[1].placement.start_frame);
    }
}

#[test]
fn fractional_seconds_round_half_up() {
    // 0.05s * 30 = 1.5 frames
    let comp = assemble("c", vec![bullets(0.05), bullets(1.0 / 3.0)], FRAME_RATE).unwrap();
    assert_eq!(comp.sections[0].placement.duration_frames, 2);
    assert_eq!(comp.sections[1].placement.duration_frames, 10);
    assert_eq!(comp.total_duration_frames, 12);
}

#[test]
fn empty_list_yields_zero_length() {
    let comp = assemble("c", Vec::new(), FRAME_RATE).unwrap();
    assert!(comp.is_empty());
    assert_eq!(comp.total_duration_frames, 0);
    assert_eq!(comp.locate(0), None);
    assert_eq!(comp.canvas, DEFAULT_CANVAS);
}

#[test]
fn bad_durations_are_assembly_errors() {
    for secs in [0.0, -1.0, f64::NAN, f64::INFINITY, 0.01] {
        let err = assemble("c", vec![bullets(secs)], FRAME_RATE).unwrap_err();
        assert!(matches!(err, ReelError::Assembly(_)), "{secs}: {err}");
    }
}

#[test]
fn locate_maps_global_to_local() {
    let comp = assemble("c", vec![bullets(5.0), bullets(10.0)], FRAME_RATE).unwrap();
    assert_eq!(comp.locate(0), Some((0, 0)));
    assert_eq!(comp.locate(149), Some((0, 149)));
    assert_eq!(comp.locate(150), Some((1, 0)));
    assert_eq!(comp.locate(449), Some((1, 299)));
    assert_eq!(comp.locate(450), None);
}

#[test]
fn sample_uses_active_section() {
    let title = SectionDescriptor::new(SectionProps::Title(TitleProps {
        title: "Hi".to_owned(),
        subtitle: String::new(),
    }));
    let comp = assemble("c", vec![title, bullets(2.0)], FRAME_RATE).unwrap();

    let f = comp.sample(15).unwrap().unwrap();
    assert_eq!(f.tag, "title");
    assert_eq!(f.local_frame, 15);

    let f = comp.sample(150).unwrap().unwrap();
    assert_eq!(f.tag, "bullet_points");
    assert_eq!(f.local_frame, 0);

    assert!(comp.sample(210).unwrap().is_none());
}

#[test]
fn serializes_camel_case() {
    let comp = assemble("Video1", vec![bullets(1.0)], FRAME_RATE).unwrap();
    let v = serde_json::to_value(&comp).unwrap();
    assert_eq!(v["id"], "Video1");
    assert_eq!(v["totalDurationFrames"], 30);
    assert_eq!(v["sections"][0]["placement"]["durationFrames"], 30);
    assert_eq!(v["sections"][0]["section"]["type"], "bullet_points");
    assert_eq!(v["canvas"]["width"], 1920);
}

/// Title variant that animates nothing but its headline, held fully visible.
struct StillTitle;

impl SectionTemplate for StillTitle {
    fn tag(&self) -> &str {
        "still_title"
    }
    fn description(&self) -> &str {
        "Title without entrance animation"
    }
    fn parse(&self, properties: &Map<String, Value>) -> Result<SectionProps, String> {
        parse_props(SectionKind::Title, properties)
    }
    fn elements(&self, _props: &SectionProps, _fps: Fps) -> ReelResult<Vec<ElementTrack>> {
        Ok(vec![ElementTrack {
            key: ElementKey::Headline,
            opacity: crate::animation::anim::Anim::Constant(1.0),
            scale: crate::animation::anim::Anim::Constant(1.0),
            parent: None,
        }])
    }
}

#[test]
fn sampling_uses_registered_template_curves() {
    let mut reg = ComponentRegistry::builtin();
    reg.register(Arc::new(StillTitle));
    let request = VideoRequest::from_value(&json!({
        "sections": [
            {"type": "still_title", "title": "Hi", "duration": 1},
            {"type": "title", "title": "Hi", "duration": 1}
        ]
    }))
    .unwrap();
    let comp = compile_request(&reg, &request, "c", FRAME_RATE).unwrap();
    assert_eq!(comp.sections[0].elements.len(), 1);

    // Frame 0: the custom headline is already visible, the built-in one has not faded in.
    let custom = comp.sample(0).unwrap().unwrap();
    assert_eq!(custom.tag, "still_title");
    assert_eq!(custom.elements.len(), 1);
    assert_eq!(custom.elements[0].opacity, 1.0);

    let builtin = comp.sample(30).unwrap().unwrap();
    assert_eq!(builtin.tag, "title");
    assert_eq!(
        builtin.element(ElementKey::Headline).unwrap().opacity,
        0.0
    );
}
