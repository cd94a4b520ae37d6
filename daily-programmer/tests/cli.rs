use assert_cmd::Command;
use predicates::prelude::*;
use std::fs::{self, write};
use std::path::Path;
use std::sync::{Arc, Mutex};
use tempfile::tempdir;
use tracing::field::{Field, Visit};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{layer::Context, Layer, Registry};

const HISTORY_EXPORT: &str = r#"{
  "ok": true,
  "messages": [
    {"type": "message", "text": "*=== Friday May 7th 2021 - Daily Programmer ===*\n\n*[Two Sum]*\n```Input: nums = [2,7]\nOutput: [0,1]```"},
    {"type": "message", "text": "Good luck everyone!"},
    {"type": "message", "subtype": "channel_join"},
    {"type": "message", "text": "*=== Thursday May 6th 2021 - Daily Programmer ===*\n\n*[Valid Parentheses]*\nBalanced or not?"}
  ]
}"#;

fn git_in(dir: &Path, args: &[&str]) -> String {
    let output = std::process::Command::new("git")
        .args(args)
        .current_dir(dir)
        .output()
        .expect("git should be installed");
    assert!(
        output.status.success(),
        "git {:?} failed: {}",
        args,
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).trim().to_string()
}

#[test]
fn help_lists_subcommands() {
    let mut cmd = Command::cargo_bin("daily-programmer").expect("Binary exists");
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("history").and(predicate::str::contains("message")));
}

#[test]
fn non_challenge_message_is_skipped_without_writing() {
    let tmp = tempdir().unwrap();
    let message = tmp.path().join("message.json");
    write(&message, r#"{"type": "message", "text": "who wants coffee?"}"#).unwrap();
    let output_dir = tmp.path().join("ToBePublished");

    let mut cmd = Command::cargo_bin("daily-programmer").expect("Binary exists");
    cmd.arg("message")
        .arg("--message")
        .arg(&message)
        .arg("--config")
        .arg(tmp.path().join("missing.yaml"))
        .arg("--output-dir")
        .arg(&output_dir)
        .assert()
        .success();

    assert!(!output_dir.exists(), "nothing should be written");
}

const SKIP_LINE: &str = "Message is not a challenge, skipping";

fn skip_non_challenge(dir: &Path) -> Command {
    let message = dir.join("message.json");
    write(&message, r#"{"type": "message", "text": "lunch at noon"}"#).unwrap();

    let mut cmd = Command::cargo_bin("daily-programmer").expect("Binary exists");
    cmd.current_dir(dir)
        .env_remove("RUST_LOG")
        .arg("message")
        .arg("--message")
        .arg(&message)
        .arg("--output-dir")
        .arg(dir.join("ToBePublished"));
    cmd
}

#[test]
fn debug_events_are_hidden_by_default() {
    let tmp = tempdir().unwrap();
    skip_non_challenge(tmp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("trace_initialised"))
        .stdout(predicate::str::contains(SKIP_LINE).not());
}

#[test]
fn rust_log_enables_core_debug_events() {
    let tmp = tempdir().unwrap();
    skip_non_challenge(tmp.path())
        .env("RUST_LOG", "daily_programmer_core=debug")
        .assert()
        .success()
        .stdout(predicate::str::contains(SKIP_LINE));
}

#[test]
fn dotenv_file_sets_verbosity() {
    let tmp = tempdir().unwrap();
    write(tmp.path().join(".env"), "RUST_LOG=debug\n").unwrap();
    skip_non_challenge(tmp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains(SKIP_LINE));
}

#[test]
fn invalid_mode_fails_before_writing() {
    let tmp = tempdir().unwrap();
    let history = tmp.path().join("history.json");
    write(&history, HISTORY_EXPORT).unwrap();
    let output_dir = tmp.path().join("ToBePublished");

    let mut cmd = Command::cargo_bin("daily-programmer").expect("Binary exists");
    cmd.arg("history")
        .arg("--history")
        .arg(&history)
        .arg("--output-dir")
        .arg(&output_dir)
        .arg("--mode")
        .arg("x")
        .assert()
        .failure()
        .stderr(predicate::str::contains("isn't 'a'"));

    assert!(!output_dir.exists(), "output dir must not be created");
}

#[test]
fn history_is_rendered_and_published_to_gh_pages() {
    let tmp = tempdir().unwrap();
    let remote = tmp.path().join("remote.git");
    fs::create_dir_all(&remote).unwrap();
    git_in(&remote, &["init", "--bare"]);

    let config = tmp.path().join("config.yaml");
    write(
        &config,
        format!("GitRepoInfo:\n  repo: {}\n", remote.display()),
    )
    .unwrap();
    let history = tmp.path().join("history.json");
    write(&history, HISTORY_EXPORT).unwrap();
    let output_dir = tmp.path().join("ToBePublished");

    let mut cmd = Command::cargo_bin("daily-programmer").expect("Binary exists");
    cmd.arg("history")
        .arg("--history")
        .arg(&history)
        .arg("--config")
        .arg(&config)
        .arg("--output-dir")
        .arg(&output_dir)
        .assert()
        .success();

    let page = fs::read_to_string(output_dir.join("index.md")).unwrap();
    assert!(page.starts_with("## Valid Parentheses -- Thursday May 6th 2021\n"));
    assert!(page.contains("## Two Sum -- Friday May 7th 2021\n```\nInput: nums = [2,7]\nOutput: [0,1]\n```"));
    assert!(!page.contains("Good luck everyone!"));

    let published = git_in(&remote, &["show", "gh-pages:index.md"]);
    assert_eq!(published, page.trim());
}

/// Keeps the `message` field of every event.
#[derive(Clone, Default)]
struct MessageRecorder {
    messages: Arc<Mutex<Vec<String>>>,
}

struct MessageField<'a>(&'a mut Option<String>);

impl Visit for MessageField<'_> {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            *self.0 = Some(format!("{value:?}"));
        }
    }
}

impl<S: tracing::Subscriber> Layer<S> for MessageRecorder {
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        let mut message = None;
        event.record(&mut MessageField(&mut message));
        if let Some(message) = message {
            self.messages.lock().unwrap().push(message);
        }
    }
}

#[tokio::test]
async fn run_announces_trace_initialised_first() {
    use daily_programmer::cli::{run, Cli, Commands, TargetArgs};

    let recorder = MessageRecorder::default();
    let _guard = tracing::subscriber::set_default(Registry::default().with(recorder.clone()));

    let tmp = tempdir().unwrap();
    let cli = Cli {
        command: Commands::Message {
            message: tmp.path().join("does-not-exist.json"),
            target: TargetArgs {
                config: tmp.path().join("config.yaml"),
                output_dir: tmp.path().join("ToBePublished"),
            },
            mode: "append".to_string(),
        },
    };

    assert!(run(cli).await.is_err(), "missing export must fail");

    let messages = recorder.messages.lock().unwrap();
    assert_eq!(
        messages.first().map(String::as_str),
        Some("trace_initialised"),
        "recorded: {messages:?}"
    );
}
