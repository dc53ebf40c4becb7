// tests/integration_test.rs
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

use tempfile::TempDir;

const BIN: &str = env!("CARGO_BIN_EXE_create-release");

#[test]
fn test_create_release_help() {
    let output = Command::new(BIN)
        .arg("--help")
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("create-release"));
    assert!(stdout.contains("--dry-run"));
}

#[test]
fn test_create_release_version() {
    let output = Command::new(BIN)
        .arg("--version")
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_outside_repository_fails() {
    let sandbox = tempfile::tempdir().unwrap();
    let sandbox_path = sandbox.path().canonicalize().unwrap();
    let plain = sandbox_path.join("plain");
    std::fs::create_dir_all(&plain).unwrap();

    let output = isolated(Command::new(BIN), &sandbox_path)
        .env("GIT_CEILING_DIRECTORIES", &sandbox_path)
        .current_dir(&plain)
        .stdin(Stdio::null())
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Git repository error"));
}

/// A working clone with one annotated tag, pushed to a local bare remote.
struct Fixture {
    sandbox: TempDir,
}

impl Fixture {
    fn new(tag: &str) -> Self {
        let git = Command::new("git").arg("--version").output();
        assert!(
            git.map(|output| output.status.success()).unwrap_or(false),
            "these tests drive the real git binary, which must be on PATH"
        );

        let fixture = Fixture {
            sandbox: tempfile::tempdir().unwrap(),
        };
        let remote = fixture.remote();
        let work = fixture.work();
        std::fs::create_dir_all(&remote).unwrap();
        std::fs::create_dir_all(&work).unwrap();

        fixture.git(&remote, &["init", "--bare", "-q"]);
        fixture.git(&remote, &["symbolic-ref", "HEAD", "refs/heads/master"]);
        fixture.git(&work, &["init", "-q"]);
        fixture.git(&work, &["symbolic-ref", "HEAD", "refs/heads/master"]);
        std::fs::write(work.join("README"), "release fixture\n").unwrap();
        fixture.git(&work, &["add", "README"]);
        fixture.git(&work, &["commit", "-q", "-m", "initial"]);
        fixture.git(&work, &["tag", "-a", tag, "-m", &format!("Release {}", tag)]);
        fixture.git(&work, &["remote", "add", "origin", remote.to_str().unwrap()]);
        fixture.git(&work, &["push", "-q", "origin", "master", "--tags"]);

        fixture
    }

    fn remote(&self) -> PathBuf {
        self.sandbox.path().join("remote.git")
    }

    fn work(&self) -> PathBuf {
        self.sandbox.path().join("work")
    }

    fn git(&self, dir: &Path, args: &[&str]) -> String {
        let output = isolated(Command::new("git"), self.sandbox.path())
            .args(args)
            .current_dir(dir)
            .output()
            .unwrap();
        assert!(
            output.status.success(),
            "git {:?} failed: {}",
            args,
            String::from_utf8_lossy(&output.stderr)
        );
        String::from_utf8_lossy(&output.stdout).into_owned()
    }

    fn remote_tags(&self) -> Vec<String> {
        self.git(&self.remote(), &["tag", "-l"])
            .lines()
            .map(str::to_string)
            .collect()
    }

    /// Pushes one more commit to the remote from a second clone.
    fn push_upstream_commit(&self, file: &str) {
        let other = self.sandbox.path().join("other");
        self.git(
            self.sandbox.path(),
            &["clone", "-q", self.remote().to_str().unwrap(), "other"],
        );
        std::fs::write(other.join(file), "upstream change\n").unwrap();
        self.git(&other, &["add", file]);
        self.git(&other, &["commit", "-q", "-m", "upstream change"]);
        self.git(&other, &["push", "-q", "origin", "master"]);
    }

    fn current_branch(&self) -> String {
        self.git(&self.work(), &["rev-parse", "--abbrev-ref", "HEAD"])
            .trim()
            .to_string()
    }

    fn release(&self, args: &[&str], answer: &str) -> Output {
        self.release_from(&self.work(), args, answer)
    }

    fn release_from(&self, dir: &Path, args: &[&str], answer: &str) -> Output {
        let mut child = isolated(Command::new(BIN), self.sandbox.path())
            .args(args)
            .current_dir(dir)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .unwrap();
        child
            .stdin
            .take()
            .unwrap()
            .write_all(answer.as_bytes())
            .unwrap();
        child.wait_with_output().unwrap()
    }
}

/// Keeps the user's git and tool configuration out of the test.
fn isolated(mut command: Command, home: &Path) -> Command {
    command
        .env("HOME", home)
        .env("XDG_CONFIG_HOME", home.join(".config"))
        .env("GIT_CONFIG_NOSYSTEM", "1")
        .env("GIT_AUTHOR_NAME", "Release Bot")
        .env("GIT_AUTHOR_EMAIL", "release@example.com")
        .env("GIT_COMMITTER_NAME", "Release Bot")
        .env("GIT_COMMITTER_EMAIL", "release@example.com")
        .env_remove("RUST_LOG");
    command
}

#[test]
fn test_confirmed_release_pushes_next_minor_tag() {
    let fixture = Fixture::new("2.3.1");

    let output = fixture.release(&["--branch", "master"], "y\n");

    assert!(
        output.status.success(),
        "{}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Publish the new version? (y/N)"));
    assert!(fixture.remote_tags().contains(&"2.4.0".to_string()));

    let message = fixture.git(
        &fixture.work(),
        &["tag", "-l", "--format=%(contents:subject)", "2.4.0"],
    );
    assert_eq!(message.trim(), "Release 2.4.0");
}

#[test]
fn test_declined_release_leaves_tags_untouched() {
    let fixture = Fixture::new("2.3.1");

    let output = fixture.release(&["--branch", "master"], "Y\n");

    assert!(output.status.success());
    assert_eq!(fixture.remote_tags(), vec!["2.3.1".to_string()]);
    assert!(fixture
        .git(&fixture.work(), &["tag", "-l", "2.4.0"])
        .trim()
        .is_empty());
}

#[test]
fn test_dry_run_creates_nothing() {
    let fixture = Fixture::new("0.0.9");

    let output = fixture.release(&["--branch", "master", "--dry-run"], "");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("0.1.0"));
    assert_eq!(fixture.remote_tags(), vec!["0.0.9".to_string()]);
}

#[test]
fn test_failed_command_propagates_exit_code() {
    let fixture = Fixture::new("1.0.0");

    let output = fixture.release(&["--branch", "no-such-branch", "--yes"], "");

    // `git checkout` of an unknown branch exits with 1.
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("git checkout no-such-branch"));
    assert_eq!(fixture.remote_tags(), vec!["1.0.0".to_string()]);
}

#[test]
fn test_dry_run_leaves_branch_and_history_alone() {
    let fixture = Fixture::new("1.4.2");
    fixture.push_upstream_commit("UPSTREAM");
    fixture.git(&fixture.work(), &["checkout", "-q", "-b", "feature"]);

    let output = fixture.release(&["--branch", "master", "--dry-run"], "");

    assert!(
        output.status.success(),
        "{}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("git checkout master"));
    assert!(stdout.contains("git pull --tags origin master"));
    assert!(stdout.contains("1.5.0"));
    assert_eq!(fixture.current_branch(), "feature");
    assert!(!fixture.work().join("UPSTREAM").exists());
}

#[test]
fn test_project_config_is_found_from_subdirectory() {
    let fixture = Fixture::new("0.3.0");
    std::fs::write(
        fixture.work().join("release.toml"),
        "message = \"Cut {version}\"\n",
    )
    .unwrap();
    let nested = fixture.work().join("docs");
    std::fs::create_dir_all(&nested).unwrap();

    let output = fixture.release_from(&nested, &["--branch", "master", "--dry-run"], "");

    assert!(
        output.status.success(),
        "{}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("\"Cut 0.4.0\""), "{}", stdout);
}
