use agent_nexus::core::config::IntroConfig;
use std::io::Write;

#[test]
fn partial_ron_fills_with_defaults() {
    // Only the text is overridden; everything else must come from defaults.
    let cfg: IntroConfig = ron::from_str("(field: (text: \"HELLO\"))").expect("parse RON");
    assert_eq!(cfg.field.text, "HELLO");
    assert_eq!(cfg.field.sample_stride, 4);
    assert_eq!(cfg.agents.history_limit, 40);
    assert_eq!(cfg.window.title, "Agent Nexus");
}

#[test]
fn invalid_values_are_clamped_with_warnings() {
    let ron_src = r#"(
        field: (
            sample_stride: 0,          // clamped to 1
            coverage_threshold: 2.5,   // reset to 0.5
            return_divisor: 0.1,       // clamped to 1.0
            size_range: (min: 3.0, max: 1.0), // swapped
        ),
        agents: (
            history_limit: 0,          // clamped to 1
            fade_retain: 1.5,          // reset to 0.8
            radius_x_frac: 4.0,        // clamped to 1.0
        ),
    )"#;
    let mut cfg: IntroConfig = ron::from_str(ron_src).expect("parse RON");
    let warnings = cfg.validate();

    assert_eq!(cfg.field.sample_stride, 1);
    assert_eq!(cfg.field.coverage_threshold, 0.5);
    assert_eq!(cfg.field.return_divisor, 1.0);
    assert!(cfg.field.size_range.min <= cfg.field.size_range.max);
    assert_eq!(cfg.agents.history_limit, 1);
    assert_eq!(cfg.agents.fade_retain, 0.8);
    assert_eq!(cfg.agents.radius_x_frac, 1.0);
    // One warning per repair, not an exact count to stay resilient.
    assert!(warnings.len() >= 7);
}

#[test]
fn load_from_file_round_trip() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    write!(
        file,
        "(window: (title: \"Test Shell\", autoClose: 1.5), field: (text: \"AB\"))"
    )
    .expect("write config");
    let cfg = IntroConfig::load_from_file(file.path()).expect("load config");
    assert_eq!(cfg.window.title, "Test Shell");
    assert_eq!(cfg.window.auto_close, 1.5);
    assert_eq!(cfg.field.text, "AB");
}

#[test]
fn load_or_default_survives_missing_file() {
    let (cfg, err) = IntroConfig::load_or_default("definitely/not/here.ron");
    assert_eq!(cfg, IntroConfig::default());
    assert!(err.is_some());
}

#[test]
fn load_or_default_reports_parse_errors() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    write!(file, "(window: (width: \"wat\"))").expect("write config");
    let (cfg, err) = IntroConfig::load_or_default(file.path());
    assert_eq!(cfg, IntroConfig::default());
    assert!(err.expect("parse error").contains("parse RON"));
}
