// vite-toolkit: Vite configuration helpers
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use std::path::Path;

use serde_json::{Value, json};

use super::{Command, ConfigEnv, ModeMapping, Toolkit, ToolkitOptions, create_toolkit};
use crate::env::{MapLoader, RawEnv};
use crate::error::ToolkitError;
use crate::value::ConverterTable;

fn toolkit(mode: &str, command: Command) -> Toolkit {
    create_toolkit(ConfigEnv::new(mode, command), ToolkitOptions::default())
}

fn raw(pairs: &[(&str, &str)]) -> RawEnv {
    pairs
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect()
}

// =============================================================================
// Mode and command
// =============================================================================

#[test]
fn test_default_mode_mapping() {
    let mapping = ModeMapping::default();
    let entries: Vec<_> = mapping.iter().collect();
    assert_eq!(
        entries,
        [("dev", "development"), ("prod", "production"), ("test", "test")]
    );
}

#[test]
fn test_mode_predicates() {
    let dev = toolkit("development", Command::Serve);
    assert!(dev.is_dev());
    assert!(!dev.is_prod());
    assert!(!dev.is_test());

    let prod = toolkit("production", Command::Build);
    assert!(prod.is_prod());
    assert!(!prod.is_dev());
    assert!(!prod.is_test(), "is_test must not compare against prod");

    let test = toolkit("test", Command::Serve);
    assert!(test.is_test());
    assert!(!test.is_prod());
}

#[test]
fn test_custom_mode_mapping() {
    let options = ToolkitOptions::builder()
        .with_mode_mapping(
            ModeMapping::new()
                .with("prod", "release")
                .with("staging", "stage"),
        )
        .build();
    let toolkit = create_toolkit(ConfigEnv::new("stage", Command::Build), options);

    assert_eq!(toolkit.get_mode("prod"), Some("release"));
    assert_eq!(toolkit.get_mode("dev"), Some("development"));
    assert_eq!(toolkit.get_mode("unknown"), None);
    assert!(toolkit.eq_mode("staging"));
    assert!(!toolkit.eq_mode("unknown"));
    assert!(!toolkit.is_prod());
}

#[test]
fn test_command_predicates() {
    let build = toolkit("production", Command::Build);
    assert!(build.is_build());
    assert!(!build.is_serve());
    assert!(build.eq_command(Command::Build));

    let serve = toolkit("development", Command::Serve);
    assert!(serve.is_serve());
    assert!(!serve.is_build());
}

#[test]
fn test_command_parse_and_display() {
    assert_eq!("build".parse::<Command>().unwrap(), Command::Build);
    assert_eq!("serve".parse::<Command>().unwrap(), Command::Serve);
    assert_eq!(Command::Serve.to_string(), "serve");

    let err = "preview".parse::<Command>().unwrap_err();
    assert!(matches!(err, ToolkitError::InvalidCommand(_)));
    insta::assert_snapshot!(err.to_string(), @"invalid command 'preview', expected 'build' or 'serve'");
}

#[test]
fn test_config_env_deserialize() {
    let config_env: ConfigEnv =
        serde_json::from_value(json!({"mode": "development", "command": "serve"})).unwrap();
    assert_eq!(config_env, ConfigEnv::new("development", Command::Serve));
}

// =============================================================================
// Options
// =============================================================================

#[test]
fn test_options_defaults() {
    let options = ToolkitOptions::default();
    assert_eq!(options.mode_mapping(), &ModeMapping::default());
    assert!(!options.allow_mount_to_process_env());
    assert!(options.env_converter().is_empty());
}

#[test]
fn test_options_deserialize_merges_mode_mapping() {
    let options: ToolkitOptions = serde_json::from_value(json!({
        "modeMapping": {"prod": "release", "qa": "qa"},
        "allowMountToProcessEnv": true,
    }))
    .unwrap();

    assert!(options.allow_mount_to_process_env());
    assert_eq!(options.mode_mapping().get("prod"), Some("release"));
    assert_eq!(options.mode_mapping().get("dev"), Some("development"));
    assert_eq!(options.mode_mapping().get("qa"), Some("qa"));
}

#[test]
fn test_options_deserialize_empty() {
    let options: ToolkitOptions = serde_json::from_value(json!({})).unwrap();
    assert_eq!(options.mode_mapping(), &ModeMapping::default());
    assert!(!options.allow_mount_to_process_env());
}

// =============================================================================
// load_env
// =============================================================================

#[test]
fn test_load_env_uses_current_mode_and_converters() {
    let loader = MapLoader::new(raw(&[
        ("VITE_PORT", "5173"),
        ("VITE_TITLE", "Demo"),
        ("VITE_FLAGS", r#"{"beta":true}"#),
        ("SECRET", "hunter2"),
    ]))
    .with_mode("production", raw(&[("VITE_PORT", "80")]));

    let options = ToolkitOptions::builder()
        .with_env_converter(
            ConverterTable::new().with("VITE_TITLE", |raw: &str| Ok(raw.to_lowercase())),
        )
        .build();
    let toolkit =
        create_toolkit(ConfigEnv::new("production", Command::Build), options).with_loader(loader);

    let env = toolkit.load_env(None, Some(Path::new(".")), None).unwrap();

    assert_eq!(
        Value::Object(env),
        json!({"VITE_FLAGS": {"beta": true}, "VITE_PORT": 80, "VITE_TITLE": "demo"})
    );
}

#[test]
fn test_load_env_explicit_mode_and_prefixes() {
    let loader = MapLoader::new(raw(&[("APP_DEBUG", "false"), ("VITE_X", "1")]))
        .with_mode("development", raw(&[("APP_DEBUG", "true")]));
    let toolkit = toolkit("production", Command::Build).with_loader(loader);

    let env = toolkit
        .load_env(Some("development"), None, Some(&["APP_"]))
        .unwrap();

    assert_eq!(Value::Object(env), json!({"APP_DEBUG": true}));
}

#[test]
fn test_load_env_loader_failure() {
    let toolkit = toolkit("development", Command::Serve).with_loader(MapLoader::default());
    let err = toolkit.load_env(None, None, Some(&[""])).unwrap_err();
    assert!(matches!(err, ToolkitError::Load(_)));
}

#[test]
fn test_load_env_mounts_when_allowed() {
    let loader = MapLoader::new(raw(&[("VITE_TOOLKIT_TEST_FACADE_MOUNT", "[1, 2]")]));
    let options = ToolkitOptions::builder()
        .with_allow_mount_to_process_env(true)
        .build();
    let toolkit =
        create_toolkit(ConfigEnv::new("development", Command::Serve), options).with_loader(loader);

    let env = toolkit.load_env(None, None, None).unwrap();

    assert_eq!(env["VITE_TOOLKIT_TEST_FACADE_MOUNT"], json!([1, 2]));
    let mounted = std::env::var("VITE_TOOLKIT_TEST_FACADE_MOUNT");

    // SAFETY: Test-only cleanup of a variable no other test uses.
    unsafe {
        std::env::remove_var("VITE_TOOLKIT_TEST_FACADE_MOUNT");
    }
    assert_eq!(mounted.as_deref(), Ok("[1,2]"));
}

#[test]
fn test_load_flattened_env() {
    let loader = MapLoader::new(raw(&[
        ("VITE_API", r#"{"base": "/api", "retries": 3}"#),
        ("VITE_NAME", "demo"),
    ]));
    let toolkit = toolkit("development", Command::Serve).with_loader(loader);

    let define = toolkit
        .load_flattened_env("__ENV__", None, None, None)
        .unwrap();

    assert_eq!(
        define.keys().collect::<Vec<_>>(),
        [
            "__ENV__.VITE_API",
            "__ENV__.VITE_API.base",
            "__ENV__.VITE_API.retries",
            "__ENV__.VITE_NAME",
        ]
    );
    assert_eq!(define["__ENV__.VITE_API.base"], json!("\"/api\""));
    assert_eq!(define["__ENV__.VITE_NAME"], json!("\"demo\""));
}

#[test]
fn test_load_flattened_env_missing_name() {
    let toolkit = toolkit("development", Command::Serve).with_loader(MapLoader::default());
    let err = toolkit
        .load_flattened_env("", None, None, None)
        .unwrap_err();
    assert!(matches!(err, ToolkitError::Flatten(_)));
    insta::assert_snapshot!(err.to_string(), @r#"flatten error: missing parameter "name""#);
}

#[test]
fn test_toolkit_debug_omits_loader() {
    let rendered = format!("{:?}", toolkit("development", Command::Serve));
    assert!(rendered.starts_with("Toolkit {"));
    assert!(rendered.contains("development"));
    assert!(rendered.ends_with(".. }"));
}
