use super::*;

#[test]
fn empty_file_takes_defaults() {
    let cfg = ServiceConfig::from_toml_str("").unwrap();
    assert_eq!(cfg, ServiceConfig::default());
    assert_eq!(cfg.output_dir, PathBuf::from("public/videos"));
    assert_eq!(cfg.renderer.program, "npx");
    assert_eq!(cfg.retention.max_jobs, Some(DEFAULT_MAX_JOBS));
}

#[test]
fn sections_override_defaults() {
    let cfg = ServiceConfig::from_toml_str(
        r#"
output_dir = "/srv/out"
video_url_prefix = "https://cdn.example.com/v/"

[renderer]
program = "render-video"
args = ["{composition_json}", "{output}"]

[retention]
max_jobs = 10
ttl_secs = 60
"#,
    )
    .unwrap();

    assert_eq!(cfg.renderer.args, vec!["{composition_json}", "{output}"]);
    assert_eq!(cfg.artifact_path("abc"), PathBuf::from("/srv/out/abc.mp4"));
    assert_eq!(cfg.video_url("abc"), "https://cdn.example.com/v/abc.mp4");

    let policy = cfg.retention.policy();
    assert_eq!(policy.max_jobs, Some(10));
    assert_eq!(policy.ttl, Some(Duration::from_secs(60)));
}

#[test]
fn default_url_matches_public_layout() {
    assert_eq!(ServiceConfig::default().video_url("j1"), "/videos/j1.mp4");
}

#[test]
fn bad_values_are_config_errors() {
    for text in [
        "[retention]\nmax_jobs = 0",
        "[retention]\nttl_secs = 0",
        "[renderer]\nprogram = \"  \"",
        "output_dir = \"\"",
        "unknown_key = 1",
        "output_dir = 5",
    ] {
        let err = ServiceConfig::from_toml_str(text).unwrap_err();
        assert!(matches!(err, ReelError::Config(_)), "{text}: {err}");
    }
}

#[test]
fn load_reads_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("slidereel.toml");
    std::fs::write(&path, "video_url_prefix = \"/media\"\n").unwrap();

    let cfg = ServiceConfig::load(&path).unwrap();
    assert_eq!(cfg.video_url("x"), "/media/x.mp4");

    let missing = ServiceConfig::load(&dir.path().join("nope.toml")).unwrap_err();
    assert!(matches!(missing, ReelError::Other(_)));
}
