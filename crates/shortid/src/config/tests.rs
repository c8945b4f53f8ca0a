use super::*;

#[test]
fn defaults_match_declared_constants() {
    let config = ShortIdConfig::default();

    assert!(config.auto);
    assert_eq!(config.length, 22);
    assert_eq!(config.prefix, "");
    assert_eq!(config.max_retries, 10);
    assert!(config.collision_check);
    assert_eq!(config.alphabet, None);
    assert_eq!(config.width(), 22);
}

#[test]
fn validate_rejects_zero_length() {
    let err = ShortIdConfig::new().length(0).validate().unwrap_err();
    assert_eq!(err, ConfigError::ZeroLength);
}

#[test]
fn validate_rejects_zero_retries() {
    let err = ShortIdConfig::new().max_retries(0).validate().unwrap_err();
    assert_eq!(err, ConfigError::ZeroRetries);
}

#[test]
fn validate_rejects_bad_alphabet() {
    let err = ShortIdConfig::new().alphabet("").validate().unwrap_err();
    assert_eq!(err, ConfigError::Alphabet(AlphabetError::Empty));

    let err = ShortIdConfig::new().alphabet("aab").validate().unwrap_err();
    assert_eq!(
        err,
        ConfigError::Alphabet(AlphabetError::Duplicate { ch: 'a' })
    );
}

#[test]
fn validate_resolves_alphabet() {
    let alphabet = ShortIdConfig::new().validate().unwrap();
    assert_eq!(alphabet, Alphabet::default());

    let alphabet = ShortIdConfig::new().alphabet("xyz").validate().unwrap();
    assert_eq!(alphabet.as_str(), "xyz");
}

#[test]
fn width_counts_prefix() {
    let config = ShortIdConfig::new().prefix("id_").length(7);
    assert_eq!(config.width(), 10);
}

#[test]
fn toml_roundtrip_keeps_every_option() {
    let config = ShortIdConfig::new()
        .auto(false)
        .length(9)
        .prefix("usr_")
        .max_retries(4)
        .collision_check(false)
        .alphabet("abc123");

    let text = config.to_toml_string().unwrap();
    let decoded = ShortIdConfig::from_toml_str(&text).unwrap();

    assert_eq!(decoded, config);
}

#[test]
fn toml_roundtrip_keeps_default_alphabet_unset() {
    let config = ShortIdConfig::new().prefix("p_");

    let text = config.to_toml_string().unwrap();
    assert!(!text.contains("alphabet"));

    let decoded = ShortIdConfig::from_toml_str(&text).unwrap();
    assert_eq!(decoded.alphabet, None);
}

#[test]
fn toml_partial_uses_defaults() {
    let config = ShortIdConfig::from_toml_str("prefix = \"id_\"\nlength = 7\n").unwrap();

    assert_eq!(config.prefix, "id_");
    assert_eq!(config.length, 7);
    assert_eq!(config.max_retries, 10);
    assert!(config.collision_check);
}

#[test]
fn toml_rejects_unknown_keys() {
    let err = ShortIdConfig::from_toml_str("lenght = 7\n").unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}

#[test]
fn json_roundtrip() {
    let config = ShortIdConfig::new().alphabet("0123456789abcdef").length(16);

    let json = serde_json::to_string(&config).unwrap();
    let decoded: ShortIdConfig = serde_json::from_str(&json).unwrap();

    assert_eq!(decoded, config);
}

#[test]
fn field_options_skip_undeclared() {
    let options = FieldOptions::new().max_length(10).primary_key(true);
    let json = serde_json::to_value(&options).unwrap();

    assert_eq!(json["max_length"], 10);
    assert_eq!(json["primary_key"], true);
    assert!(json.get("unique").is_none());
    assert!(json.get("editable").is_none());

    let decoded: FieldOptions = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, options);
}
