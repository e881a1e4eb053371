//! Integration tests for TOML configuration loading.
//!
//! Uses figment::Jail for safe, sandboxed env var manipulation.

use credo_config::{ConfigError, CredoConfig};
use credo_core::Credibility;
use figment::{
    Figment, Jail,
    providers::{Format, Serialized, Toml},
};
use pretty_assertions::assert_eq;

#[test]
fn loads_analysis_and_retrieval_from_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[analysis]
max_input_chars = 20000
max_concurrent_claims = 4
unverifiable_confidence = 35

[retrieval]
timeout_ms = 2500
similarity_threshold = 0.5
max_candidates_per_source = 3
context_sentences = 2
"#,
        )?;

        let config: CredoConfig = Figment::from(Serialized::defaults(CredoConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert_eq!(config.analysis.max_input_chars, 20_000);
        assert_eq!(config.analysis.max_concurrent_claims, 4);
        assert_eq!(config.analysis.unverifiable_confidence, 35);
        assert_eq!(config.retrieval.timeout_ms, 2_500);
        assert!((config.retrieval.similarity_threshold - 0.5).abs() < f64::EPSILON);
        assert_eq!(config.retrieval.max_candidates_per_source, 3);
        assert_eq!(config.retrieval.context_sentences, 2);
        Ok(())
    });
}

#[test]
fn loads_sources_from_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[sources.wikipedia]
enabled = false

[sources.crossref]
mailto = "ops@example.org"
credibility = "medium"

[sources.factcheck]
api_key = "AIza-toml"
language_code = "de"

[sources.corpus]
path = "./reference.toml"
"#,
        )?;

        let config: CredoConfig = Figment::from(Serialized::defaults(CredoConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert!(!config.sources.wikipedia.is_configured());
        assert_eq!(config.sources.crossref.mailto, "ops@example.org");
        assert_eq!(config.sources.crossref.credibility, Credibility::Medium);
        assert_eq!(config.sources.factcheck.api_key, "AIza-toml");
        assert_eq!(config.sources.factcheck.language_code, "de");
        assert_eq!(config.sources.corpus.path, "./reference.toml");
        assert_eq!(
            config.sources.active(),
            vec!["crossref", "factcheck", "corpus"]
        );
        Ok(())
    });
}

#[test]
fn partial_toml_keeps_defaults() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r"
[retrieval]
timeout_ms = 800
",
        )?;

        let config: CredoConfig = Figment::from(Serialized::defaults(CredoConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert_eq!(config.retrieval.timeout_ms, 800);
        assert!((config.retrieval.similarity_threshold - 0.35).abs() < f64::EPSILON);
        assert_eq!(config.analysis.max_input_chars, 50_000);
        Ok(())
    });
}

#[test]
fn project_local_config_is_picked_up() {
    Jail::expect_with(|jail| {
        std::fs::create_dir_all(jail.directory().join(".credo")).expect("mkdir .credo");
        jail.create_file(
            ".credo/config.toml",
            r"
[analysis]
max_input_chars = 1234
",
        )?;

        let config = CredoConfig::load().expect("config loads");
        assert_eq!(config.analysis.max_input_chars, 1234);
        Ok(())
    });
}

#[test]
fn load_from_file_rejects_invalid_values() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("credo.toml");
    std::fs::write(
        &path,
        r"
[analysis]
unverifiable_confidence = 90
",
    )
    .expect("write config");

    let err = CredoConfig::load_from_file(&path).unwrap_err();
    assert!(matches!(err, ConfigError::InvalidValue { .. }));
}

#[test]
fn load_from_file_requires_the_file() {
    Jail::expect_with(|jail| {
        std::fs::create_dir_all(jail.directory().join(".credo")).expect("mkdir .credo");
        jail.create_file(".credo/config.toml", "[analysis]\nmax_input_chars = 1234\n")?;
        jail.set_env("CREDO_ANALYSIS__MAX_INPUT_CHARS", "4321");

        let missing = jail.directory().join("typo.toml");
        let err = CredoConfig::load_from_file(&missing).unwrap_err();
        match err {
            ConfigError::FileNotFound { path } => assert_eq!(path, missing),
            other => panic!("expected FileNotFound, got {other:?}"),
        }
        Ok(())
    });
}
