// envbridge: Runtime Environment Adapter
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use std::io::{self, Write};

use super::denylist::Denylist;
use super::{Emitter, HIDDEN, escape_value};
use crate::config::Config;
use crate::core::env::container::{Env, ResolvedEnv};
use crate::translate::Translator;

fn resolved(pairs: &[(&str, &str)]) -> ResolvedEnv {
    let host: Env = pairs.iter().copied().collect();
    Translator::from_config(&Config::default())
        .unwrap()
        .resolve(&host)
        .unwrap()
}

fn default_emitter() -> Emitter {
    Emitter::from_config(&Config::default()).unwrap()
}

struct BrokenPipe;

impl Write for BrokenPipe {
    fn write(&mut self, _: &[u8]) -> io::Result<usize> {
        Err(io::Error::from(io::ErrorKind::BrokenPipe))
    }

    fn flush(&mut self) -> io::Result<()> {
        Err(io::Error::from(io::ErrorKind::BrokenPipe))
    }
}

#[test]
fn test_render_contains_translated_port() {
    let text = default_emitter().render(&resolved(&[("PORT", "8080")]));
    assert!(text.contains("APP_PORT: 8080"));
    insta::assert_snapshot!(text, @r"
    envbridge: resolved configuration
    APP_PORT: 8080
    ");
}

#[test]
fn test_render_marks_unset_keys() {
    let text = default_emitter().render(&resolved(&[]));
    insta::assert_snapshot!(text, @r"
    envbridge: resolved configuration
    APP_PORT: (unset)
    ");
}

#[test]
fn test_render_is_deterministic_and_ordered() {
    let emitter = Emitter::new(
        ["WEBHOOK_URL", "APP_PORT", "DB_TYPE", "APP_PORT"],
        Denylist::builtin(),
    );
    let env = resolved(&[
        ("PORT", "8080"),
        ("DB_TYPE", "postgresdb"),
        ("WEBHOOK_URL", "https://example.run.app/"),
    ]);
    let first = emitter.render(&env);
    assert_eq!(first, emitter.render(&env));
    insta::assert_snapshot!(first, @r"
    envbridge: resolved configuration
    WEBHOOK_URL: https://example.run.app/
    APP_PORT: 8080
    DB_TYPE: postgresdb
    ");
}

#[test]
fn test_denylisted_keys_never_rendered() {
    let secrets = [
        ("DB_POSTGRESDB_PASSWORD", "hunter2"),
        ("N8N_ENCRYPTION_KEY", "k3y-material"),
        ("OAUTH_CLIENT_SECRET", "shh"),
        ("GITHUB_TOKEN", "ghp_abc"),
        ("api_key", "lower-case-secret"),
        ("N8N_SMTP_PASS", "smtp-pass"),
        ("DB_PASS", "db-pass"),
        ("APIKEY", "plain-apikey"),
        ("N8N_BASIC_AUTH_PASSWORD", "basic"),
    ];
    let emitter = Emitter::new(
        secrets.iter().map(|(k, _)| *k).chain(["APP_PORT"]),
        Denylist::builtin(),
    );
    let mut pairs = secrets.to_vec();
    pairs.push(("PORT", "8080"));
    let text = emitter.render(&resolved(&pairs));

    for (key, value) in secrets {
        assert!(!text.contains(key), "{key} leaked");
        assert!(!text.contains(value), "value of {key} leaked");
    }
    assert!(text.contains("APP_PORT: 8080"));
    assert_eq!(emitter.keys(), ["APP_PORT"]);
}

#[test]
fn test_builtin_denylist_short_forms() {
    let denylist = Denylist::builtin();
    for key in [
        "N8N_SMTP_PASS",
        "DB_PASS",
        "DB_PASS_FILE",
        "APIKEY",
        "OPENAI_APIKEY",
        "N8N_AUTH_EXCLUDE_ENDPOINTS",
        "DB_POSTGRESDB_PASSWORD",
    ] {
        assert!(denylist.is_denied(key), "{key} not denied");
    }
    for key in ["APP_PORT", "DB_TYPE", "WEBHOOK_URL", "N8N_PROTOCOL"] {
        assert!(!denylist.is_denied(key), "{key} denied");
    }
}

#[test]
fn test_render_escapes_control_characters() {
    let emitter = Emitter::new(["WEBHOOK_URL", "APP_PORT"], Denylist::builtin());
    let text = emitter.render(&resolved(&[
        ("PORT", "8080"),
        ("WEBHOOK_URL", "https://x/\nDB_POSTGRESDB_PASSWORD: forged\r\t\u{1b}[2J"),
    ]));
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(
        lines,
        [
            "envbridge: resolved configuration",
            r"WEBHOOK_URL: https://x/\nDB_POSTGRESDB_PASSWORD: forged\r\t\u{1b}[2J",
            "APP_PORT: 8080",
        ]
    );
}

#[test]
fn test_escape_value_borrows_plain_text() {
    assert!(matches!(
        escape_value("https://example.run.app/"),
        std::borrow::Cow::Borrowed(_)
    ));
    assert_eq!(escape_value("a\nb"), r"a\nb");
    assert_eq!(escape_value("caf\u{e9}"), "caf\u{e9}");
}

#[test]
fn test_config_denylist_extends_builtin() {
    let config = Config::parse(
        r#"
        [diagnostics]
        keys = ["APP_PORT", "DB_POSTGRESDB_USER", "DB_POSTGRESDB_PASSWORD"]
        denylist = ["db_postgresdb_user"]
        "#,
    )
    .unwrap();
    let emitter = Emitter::from_config(&config).unwrap();
    assert_eq!(emitter.keys(), ["APP_PORT"]);
    assert!(emitter.denylist().is_denied("DB_POSTGRESDB_PASSWORD"));
    assert!(emitter.denylist().len() > super::denylist::BUILTIN_PATTERNS.len());
}

#[test]
fn test_rule_targets_are_listed() {
    let config = Config::parse(
        r#"
        [diagnostics]
        keys = ["WEBHOOK_URL"]

        [[translate.rules]]
        source = "PORT"
        target = "N8N_PORT"
        "#,
    )
    .unwrap();
    let emitter = Emitter::from_config(&config).unwrap();
    assert_eq!(emitter.keys(), ["WEBHOOK_URL", "N8N_PORT"]);
}

#[test]
fn test_mask_hides_secret_values() {
    let emitter = default_emitter();
    assert_eq!(emitter.mask("DB_POSTGRESDB_PASSWORD", "hunter2"), HIDDEN);
    assert_eq!(emitter.mask("APP_PORT", "8080"), "8080");
}

#[test]
fn test_emit_writes_to_stream() {
    let mut buf = Vec::new();
    let ok = default_emitter().emit(&resolved(&[("PORT", "8080")]), &mut buf);
    assert!(ok);
    let text = String::from_utf8(buf).unwrap();
    assert!(text.contains("APP_PORT: 8080"));
}

#[test]
fn test_emit_failure_is_not_fatal() {
    let ok = default_emitter().emit(&resolved(&[("PORT", "8080")]), &mut BrokenPipe);
    assert!(!ok);
}

#[test]
fn test_invalid_denylist_pattern_rejected() {
    assert!(Denylist::with_extra(&["{unclosed"]).is_err());
}
