use daily_programmer::load_config::{load_config, load_repo_url, ConfigError};
use daily_programmer_core::config::DEFAULT_REPO_URL;
use std::fs::write;
use tempfile::NamedTempFile;

fn config_file(content: &str) -> NamedTempFile {
    let config_file = NamedTempFile::new().expect("temp file");
    write(config_file.path(), content).unwrap();
    config_file
}

/// A well-formed file yields the configured repository.
#[test]
fn test_load_config_success() {
    let config_file = config_file("GitRepoInfo:\n  repo: git@github.com:example/site.git\n");

    let config = load_config(config_file.path()).expect("Config should load");
    assert_eq!(config.repo_url, "git@github.com:example/site.git");
    assert_eq!(
        load_repo_url(config_file.path()),
        "git@github.com:example/site.git"
    );
}

#[test]
fn test_load_config_errors_for_missing_file() {
    let err = load_config("/definitely/not/here/config.yaml").unwrap_err();
    assert!(matches!(err, ConfigError::Read { .. }), "got {err:?}");
}

#[test]
fn test_load_config_errors_for_invalid_file() {
    let config_file = config_file("GitRepoInfo: [unclosed\n  repo: ::\n");
    let err = load_config(config_file.path()).unwrap_err();
    assert!(matches!(err, ConfigError::Parse { .. }), "got {err:?}");
}

#[test]
fn test_load_config_errors_on_missing_section() {
    for content in ["{}\n", "OtherSection:\n  repo: git@github.com:example/site.git\n"] {
        let config_file = config_file(content);
        let err = load_config(config_file.path()).unwrap_err();
        assert!(
            matches!(err, ConfigError::MissingSection { .. }),
            "content {content:?} gave {err:?}"
        );
        assert!(err.to_string().contains("missing section GitRepoInfo"));
    }
}

#[test]
fn test_load_config_errors_on_missing_or_empty_repo() {
    for content in [
        "GitRepoInfo:\n  branch: gh-pages\n",
        "GitRepoInfo:\n  repo:\n",
        "GitRepoInfo:\n  repo: \"\"\n",
    ] {
        let config_file = config_file(content);
        let err = load_config(config_file.path()).unwrap_err();
        assert!(
            matches!(err, ConfigError::MissingOption { .. }),
            "content {content:?} gave {err:?}"
        );
        assert!(err.to_string().contains("check option \"repo\""));
    }
}

/// Every invalid configuration falls back to the default repository.
#[test]
fn test_load_repo_url_falls_back_to_default() {
    let invalid = [
        config_file("GitRepoInfo: [unclosed\n"),
        config_file("Unrelated: 1\n"),
        config_file("GitRepoInfo:\n  repo: \"\"\n"),
    ];
    for file in &invalid {
        assert_eq!(load_repo_url(file.path()), DEFAULT_REPO_URL);
    }
    assert_eq!(load_repo_url("/definitely/not/here.yaml"), DEFAULT_REPO_URL);
}
