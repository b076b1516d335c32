use super::*;
use crate::foundation::core::FRAME_RATE;
use crate::sections::model::{
    ConclusionProps, ResultEntry, ResultsProps, SolutionProps, TitleProps,
};

fn row(metric: &str) -> ResultEntry {
    ResultEntry {
        metric: metric.to_owned(),
        value: "1".to_owned(),
        icon: None,
    }
}

#[test]
fn result_rows_stagger_from_two_seconds() {
    let props = SectionProps::Results(ResultsProps {
        title: "R".to_owned(),
        results: vec![row("a"), row("b"), row("c")],
        description: String::new(),
    });
    let tracks = element_tracks(&props, FRAME_RATE).unwrap();

    let rows: Vec<_> = tracks
        .iter()
        .filter(|t| matches!(t.key, ElementKey::Item(_)))
        .collect();
    assert_eq!(rows.len(), 3);
    for (i, t) in rows.iter().enumerate() {
        let expected = (2.0 + 0.3 * i as f64) * 30.0;
        assert!((t.opacity.start_frame() - expected).abs() < 1e-9);
        assert_eq!(t.parent, Some(ElementKey::ResultsPanel));
    }
}

#[test]
fn title_headline_fades_in_and_out_with_spring() {
    let tracks = element_tracks(&SectionProps::Title(TitleProps::default()), FRAME_RATE).unwrap();
    assert_eq!(tracks.len(), 1);
    assert_eq!(tracks[0].key, ElementKey::Headline);

    let Anim::Keyframes(kf) = &tracks[0].opacity else {
        panic!("expected keyframes");
    };
    let frames: Vec<_> = kf.keys().iter().map(|k| k.frame).collect();
    let values: Vec<_> = kf.keys().iter().map(|k| k.value).collect();
    assert_eq!(frames, vec![0.0, 15.0, 120.0, 150.0]);
    assert_eq!(values, vec![0.0, 1.0, 1.0, 0.0]);

    let Anim::Spring(s) = &tracks[0].scale else {
        panic!("expected spring");
    };
    assert_eq!(s.config.stiffness, 200.0);
    assert_eq!(s.config.damping, 100.0);
}

#[test]
fn solution_orders_title_content_features() {
    let props = SectionProps::Solution(SolutionProps {
        title: "S".to_owned(),
        content: "C".to_owned(),
        features: vec!["x".to_owned(), "y".to_owned()],
    });
    let tracks = element_tracks(&props, FRAME_RATE).unwrap();
    let keys: Vec<_> = tracks.iter().map(|t| t.key).collect();
    assert_eq!(
        keys,
        vec![
            ElementKey::Title,
            ElementKey::Content,
            ElementKey::Item(0),
            ElementKey::Item(1),
        ]
    );
    assert_eq!(tracks[3].opacity.start_frame(), 69.0);
    assert!(tracks.iter().all(|t| t.scale == Anim::Constant(1.0)));
}

#[test]
fn call_to_action_only_when_present() {
    let without = element_tracks(
        &SectionProps::Conclusion(ConclusionProps::default()),
        FRAME_RATE,
    )
    .unwrap();
    assert!(!without.iter().any(|t| t.key == ElementKey::CallToAction));

    let with = element_tracks(
        &SectionProps::Conclusion(ConclusionProps {
            call_to_action: "Go".to_owned(),
            ..ConclusionProps::default()
        }),
        FRAME_RATE,
    )
    .unwrap();
    let cta = with
        .iter()
        .find(|t| t.key == ElementKey::CallToAction)
        .unwrap();
    assert_eq!(cta.opacity.start_frame(), 75.0);
}

#[test]
fn element_key_display() {
    assert_eq!(ElementKey::Item(2).to_string(), "item[2]");
    assert_eq!(ElementKey::ResultsPanel.to_string(), "results_panel");
}
