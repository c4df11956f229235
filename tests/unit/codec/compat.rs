use super::*;

#[test]
fn presets_resolve_to_fixed_levels() {
    assert_eq!(CompatibilityGate::stable().level(), 80);
    assert_eq!(CompatibilityGate::beta().level(), TagCode::MAX.ordinal());
    assert_eq!(CompatibilityGate::default().mode(), GateMode::Beta);
}

#[test]
fn level_is_an_inclusive_ceiling() {
    let gate = CompatibilityGate::custom(TagCode::MaskBlock.ordinal()).unwrap();
    assert!(gate.is_tag_code_supported(TagCode::MaskBlock));
    assert!(gate.is_tag_code_supported(TagCode::LayerAttributes));
    assert!(!gate.is_tag_code_supported(TagCode::MaskBlockV2));
    assert!(!gate.admit(TagCode::CameraOption));
}

#[test]
fn stable_withholds_post_stable_tags() {
    let gate = CompatibilityGate::stable();
    assert!(gate.is_tag_code_supported(TagCode::TextSourceV3));
    assert!(!gate.is_tag_code_supported(TagCode::MaskBlockV2));
    assert!(!gate.is_tag_code_supported(TagCode::Transform3D));
}

#[test]
fn select_falls_back_to_older_variants() {
    let order = [
        TagCode::TextSourceV3,
        TagCode::TextSourceV2,
        TagCode::TextSource,
    ];
    let gate = CompatibilityGate::custom(TagCode::TextSourceV2.ordinal()).unwrap();
    assert_eq!(gate.select(&order), Some(TagCode::TextSourceV2));
    let gate = CompatibilityGate::custom(10).unwrap();
    assert_eq!(gate.select(&order), Some(TagCode::TextSource));
    let gate = CompatibilityGate::custom(1).unwrap();
    assert_eq!(gate.select(&order), None);
}

#[test]
fn custom_level_zero_is_rejected() {
    assert!(matches!(
        CompatibilityGate::custom(0),
        Err(PagError::Validation(_))
    ));
    let config = GateConfig {
        mode: GateMode::Custom,
        level: None,
    };
    assert!(config.resolve().is_err());
}

#[test]
fn options_parse_from_json() {
    let json = br#"{ "gate": { "mode": "custom", "level": 60 } }"#;
    let options = EncodeOptions::from_reader(&json[..]).unwrap();
    assert_eq!(options.version, CURRENT_VERSION);
    assert_eq!(options.gate.resolve().unwrap().level(), 60);

    let options = EncodeOptions::from_reader(&b"{}"[..]).unwrap();
    assert_eq!(options, EncodeOptions::default());
}

#[test]
fn bad_options_are_reported() {
    let unknown_mode = br#"{ "gate": { "mode": "nightly" } }"#;
    assert!(matches!(
        EncodeOptions::from_reader(&unknown_mode[..]),
        Err(PagError::Serde(_))
    ));
    let zero = br#"{ "gate": { "mode": "custom", "level": 0 } }"#;
    assert!(matches!(
        EncodeOptions::from_reader(&zero[..]),
        Err(PagError::Validation(_))
    ));
    let future = br#"{ "version": 9 }"#;
    assert!(EncodeOptions::from_reader(&future[..]).is_err());
    assert!(EncodeOptions::from_path("/definitely/not/here.json").is_err());
}

#[test]
fn gates_deserialize_through_validation() {
    let gate: CompatibilityGate =
        serde_json::from_str(r#"{ "mode": "custom", "level": 42 }"#).unwrap();
    assert_eq!(gate, CompatibilityGate::custom(42).unwrap());
    let gate: CompatibilityGate = serde_json::from_str(r#"{ "mode": "stable" }"#).unwrap();
    assert_eq!(gate, CompatibilityGate::stable());

    for invalid in [r#"{ "mode": "custom", "level": 0 }"#, r#"{ "mode": "custom" }"#] {
        assert!(serde_json::from_str::<CompatibilityGate>(invalid).is_err());
    }

    for gate in [CompatibilityGate::beta(), CompatibilityGate::custom(7).unwrap()] {
        let json = serde_json::to_string(&gate).unwrap();
        assert_eq!(serde_json::from_str::<CompatibilityGate>(&json).unwrap(), gate);
    }
}
