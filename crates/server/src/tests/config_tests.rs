use super::{apply_env_overrides, apply_file_overrides, read_config_file, Settings};

use std::{
    collections::HashMap,
    env, fs,
    time::{SystemTime, UNIX_EPOCH},
};

fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let vars: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| vars.get(key).cloned()
}

#[test]
fn defaults_bind_locally_and_start_in_setup() {
    let settings = Settings::default();
    assert_eq!(settings.server_bind, "127.0.0.1:8080");
    assert_eq!(settings.initial_state, "setup");
    assert_eq!(settings.log_filter, "info");
}

#[test]
fn file_overrides_accept_string_and_integer_values() {
    let mut settings = Settings::default();
    apply_file_overrides(
        &mut settings,
        r#"
bind_addr = "0.0.0.0:9000"
initial_state = "ready"
max_body_bytes = 512
"#,
    )
    .expect("overrides");

    assert_eq!(settings.server_bind, "0.0.0.0:9000");
    assert_eq!(settings.initial_state, "ready");
    assert_eq!(settings.max_body_bytes, 512);

    apply_file_overrides(&mut settings, r#"max_body_bytes = "1024""#).expect("overrides");
    assert_eq!(settings.max_body_bytes, 1024);
}

#[test]
fn invalid_toml_leaves_settings_untouched() {
    let mut settings = Settings::default();
    assert!(apply_file_overrides(&mut settings, "bind_addr = ").is_err());
    assert_eq!(settings, Settings::default());
}

#[test]
fn app_prefixed_env_vars_win_over_plain_ones() {
    let mut settings = Settings::default();
    apply_env_overrides(
        &mut settings,
        lookup_from(&[
            ("SERVER_BIND", "127.0.0.1:1"),
            ("APP__BIND_ADDR", "127.0.0.1:2"),
            ("RUST_LOG", "debug"),
            ("APP__LOG_FILTER", "warn"),
            ("APP__INITIAL_STATE", "offline"),
        ]),
    );

    assert_eq!(settings.server_bind, "127.0.0.1:2");
    assert_eq!(settings.log_filter, "warn");
    assert_eq!(settings.initial_state, "offline");
}

#[test]
fn unparseable_body_limit_is_ignored() {
    let mut settings = Settings::default();
    apply_env_overrides(
        &mut settings,
        lookup_from(&[("APP__MAX_BODY_BYTES", "lots")]),
    );
    assert_eq!(settings.max_body_bytes, Settings::default().max_body_bytes);
}

#[test]
fn missing_config_file_is_not_an_error() {
    let suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock")
        .as_nanos();
    let path = env::temp_dir().join(format!("gateway_state_missing_{suffix}.toml"));
    assert!(read_config_file(&path).expect("read").is_none());
}

#[test]
fn reads_existing_config_file() {
    let suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock")
        .as_nanos();
    let path = env::temp_dir().join(format!("gateway_state_config_{suffix}.toml"));
    fs::write(&path, "initial_state = \"running\"\n").expect("write");

    let raw = read_config_file(&path).expect("read").expect("present");
    let mut settings = Settings::default();
    apply_file_overrides(&mut settings, &raw).expect("overrides");
    assert_eq!(settings.initial_state, "running");

    fs::remove_file(path).expect("cleanup");
}

#[test]
fn unreadable_config_path_is_an_error() {
    let err = read_config_file(&env::temp_dir()).expect_err("directory is not a file");
    assert!(err.to_string().contains("failed to read config file"));
}
