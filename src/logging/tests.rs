// mpcreator: GitLab main-project builder
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::{LogConfig, LogContext, LogLevel};

#[test]
fn test_log_level_parse_names_and_numbers() {
    let parsed: Vec<_> = ["info", "DEBUG", "warning", "0", "5", "dump"]
        .into_iter()
        .map(|input| (input, input.parse::<LogLevel>().map(|l| l.as_u8()).ok()))
        .collect();

    assert_eq!(
        parsed,
        vec![
            ("info", Some(3)),
            ("DEBUG", Some(4)),
            ("warning", Some(2)),
            ("0", Some(0)),
            ("5", Some(5)),
            ("dump", Some(6)),
        ]
    );
}

#[test]
fn test_log_level_parse_rejects_unknown() {
    assert!("verbose".parse::<LogLevel>().is_err());
    assert!("7".parse::<LogLevel>().is_err());
}

#[test]
fn test_log_level_filter_strings() {
    insta::assert_debug_snapshot!(
        [
            LogLevel::SILENT.to_filter_string(),
            LogLevel::INFO.to_filter_string(),
            LogLevel::DEBUG.to_filter_string(),
            LogLevel::DUMP.to_filter_string(),
        ],
        @r#"
    [
        "off",
        "warn,mpcreator=info",
        "warn,mpcreator=debug",
        "trace",
    ]
    "#
    );
}

#[test]
fn test_log_level_deserialize_number_or_name() {
    let from_number: LogLevel = serde_json::from_str("4").unwrap();
    let from_name: LogLevel = serde_json::from_str("\"trace\"").unwrap();
    assert_eq!(from_number, LogLevel::DEBUG);
    assert_eq!(from_name, LogLevel::TRACE);
    assert!(serde_json::from_str::<LogLevel>("9").is_err());
}

#[test]
fn test_log_config_defaults() {
    let config = LogConfig::default();
    assert_eq!(config.console_level(), LogLevel::INFO);
    assert_eq!(config.file_level(), LogLevel::DEBUG);
    assert!(config.log_file().is_none());
}

#[test]
fn test_log_context_children_without_subscriber() {
    // No subscriber is installed in unit tests: spans are disabled but usable.
    let root = LogContext::for_command("fill");
    let project = root.group("team/app").project("team/app/svc1");
    let value = project.in_scope(|| 42);
    assert_eq!(value, 42);
    assert!(LogContext::default().span().is_none());
}
