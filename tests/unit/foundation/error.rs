use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        ReelError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        ReelError::assembly("x")
            .to_string()
            .contains("assembly error:")
    );
    assert!(
        ReelError::animation("x")
            .to_string()
            .contains("animation error:")
    );
    assert!(ReelError::render("x").to_string().contains("render error:"));
    assert!(ReelError::not_found("x").to_string().contains("not found:"));
    assert!(ReelError::config("x").to_string().contains("config error:"));
    assert!(
        ReelError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = ReelError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}

#[test]
fn issues_render_json_paths() {
    let issue = ValidationIssue::at(
        &[
            PathElem::Field("sections".to_owned()),
            PathElem::Index(2),
            PathElem::Field("type".to_owned()),
        ],
        "unknown section type \"intro\"",
    );
    assert_eq!(issue.path_string(), "$.sections[2].type");
    assert_eq!(
        issue.to_string(),
        "$.sections[2].type: unknown section type \"intro\""
    );

    let json = serde_json::to_value(&issue).unwrap();
    assert_eq!(json["path"], "$.sections[2].type");
}

#[test]
fn validation_errors_join_issues() {
    let err = ReelError::Validation(ValidationErrors {
        issues: vec![ValidationIssue::root("a"), ValidationIssue::root("b")],
    });
    assert_eq!(err.to_string(), "validation error: a; b");
    assert_eq!(err.validation_issues().map(<[_]>::len), Some(2));
    assert!(ReelError::render("x").validation_issues().is_none());
}
