use super::*;
use crate::foundation::core::{FRAME_RATE, Point};
use crate::sections::model::{
    BulletProps, ResultEntry, ResultsProps, SectionProps, TitleProps,
};

fn bullets(n: usize) -> SectionDescriptor {
    SectionDescriptor::new(SectionProps::BulletPoints(BulletProps {
        title: "B".to_owned(),
        points: (0..n).map(|i| format!("p{i}")).collect(),
    }))
}

fn title() -> SectionDescriptor {
    SectionDescriptor::new(SectionProps::Title(TitleProps {
        title: "T".to_owned(),
        subtitle: "S".to_owned(),
    }))
}

#[test]
fn fades_clamp_and_do_not_decrease() {
    let d = bullets(1);
    let mut prev = 0.0;
    for f in 0..=90 {
        let frame = sample_section(&d, FRAME_RATE, f).unwrap();
        let item = frame.element(ElementKey::Item(0)).unwrap().opacity;
        assert!(item >= prev, "frame {f}: {item} < {prev}");
        prev = item;
        if f <= 30 {
            assert_eq!(item, 0.0);
        }
        if f >= 42 {
            assert_eq!(item, 1.0);
        }
    }
    let mid = sample_section(&d, FRAME_RATE, 36).unwrap();
    let v = mid.element(ElementKey::Item(0)).unwrap().opacity;
    assert!((v - 0.5).abs() < 1e-9);
}

#[test]
fn sampling_is_deterministic() {
    let d = title();
    for f in [0, 7, 15, 60, 135, 400] {
        let a = sample_section(&d, FRAME_RATE, f).unwrap();
        let b = sample_section(&d, FRAME_RATE, f).unwrap();
        assert_eq!(a, b);
        for (x, y) in a.elements.iter().zip(&b.elements) {
            assert_eq!(x.opacity.to_bits(), y.opacity.to_bits());
            assert_eq!(x.scale.to_bits(), y.scale.to_bits());
        }
    }
}

#[test]
fn title_headline_fades_out_at_end() {
    let d = title();
    let at = |f| {
        sample_section(&d, FRAME_RATE, f)
            .unwrap()
            .element(ElementKey::Headline)
            .unwrap()
            .opacity
    };
    assert_eq!(at(0), 0.0);
    assert_eq!(at(15), 1.0);
    assert_eq!(at(120), 1.0);
    assert!((at(135) - 0.5).abs() < 1e-9);
    assert_eq!(at(150), 0.0);
    assert_eq!(at(300), 0.0);
}

#[test]
fn title_scale_springs_toward_one() {
    let d = title();
    let first = sample_section(&d, FRAME_RATE, 0).unwrap();
    let head = first.element(ElementKey::Headline).unwrap();
    assert_eq!(head.scale, 0.0);

    let later = sample_section(&d, FRAME_RATE, 600).unwrap();
    let head = later.element(ElementKey::Headline).unwrap();
    assert!((head.scale - 1.0).abs() < 1e-3);

    let mid = sample_section(&d, FRAME_RATE, 10).unwrap();
    let head = mid.element(ElementKey::Headline).unwrap();
    assert!(head.scale > 0.0 && head.scale < 1.0);
    let centre = Point::new(960.0, 540.0);
    let moved = head.transform * centre;
    assert!((moved.x - centre.x).abs() < 1e-9 && (moved.y - centre.y).abs() < 1e-9);
    let corner = head.transform * Point::ZERO;
    assert!((corner.x - 960.0 * (1.0 - head.scale)).abs() < 1e-9);
}

#[test]
fn result_rows_inherit_panel_opacity() {
    let d = SectionDescriptor::new(SectionProps::Results(ResultsProps {
        title: "R".to_owned(),
        results: vec![ResultEntry {
            metric: "m".to_owned(),
            value: "v".to_owned(),
            icon: None,
        }],
        description: String::new(),
    }));

    // Panel fully visible, row a third of the way through its fade (frames 60..69).
    let frame = sample_section(&d, FRAME_RATE, 63).unwrap();
    let row = frame.element(ElementKey::Item(0)).unwrap();
    assert!((row.opacity - 1.0 / 3.0).abs() < 1e-9);
    assert!((row.effective_opacity - 1.0 / 3.0).abs() < 1e-9);

    let frame = sample_section(&d, FRAME_RATE, 0).unwrap();
    let panel = frame.element(ElementKey::ResultsPanel).unwrap();
    assert_eq!(panel.opacity, 0.0);
    assert_eq!(frame.element(ElementKey::Item(0)).unwrap().effective_opacity, 0.0);
}

#[test]
fn unit_scale_has_identity_transform() {
    let frame = sample_section(&bullets(0), FRAME_RATE, 20).unwrap();
    let t = frame.element(ElementKey::Title).unwrap();
    assert_eq!(t.scale, 1.0);
    assert_eq!(t.transform, Affine::IDENTITY);
}
