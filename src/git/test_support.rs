// mpcreator: GitLab main-project builder
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Shared helpers for tests that drive the real `git` binary.

use std::path::{Path, PathBuf};
use std::process::Command;

/// Run git in `cwd` with a fixed identity and default branch, panicking on failure.
pub(crate) fn git(cwd: &Path, args: &[&str]) -> String {
    let output = Command::new("git")
        .args(["-c", "init.defaultBranch=main", "-c", "protocol.file.allow=always"])
        .args(args)
        .current_dir(cwd)
        .env("GIT_AUTHOR_NAME", "Test")
        .env("GIT_AUTHOR_EMAIL", "test@example.com")
        .env("GIT_COMMITTER_NAME", "Test")
        .env("GIT_COMMITTER_EMAIL", "test@example.com")
        .env("GIT_TERMINAL_PROMPT", "0")
        .output()
        .expect("failed to run git");
    assert!(
        output.status.success(),
        "git {} failed: {}",
        args.join(" "),
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).trim().to_string()
}

/// Create a repository on `main` with one commit.
pub(crate) fn init_repo_with_commit(path: &Path) {
    std::fs::create_dir_all(path).expect("failed to create repo dir");
    git(path, &["init", "--quiet"]);
    commit_file(path, "README.md", "hello\n");
}

/// Write `name` and commit it.
pub(crate) fn commit_file(repo: &Path, name: &str, content: &str) {
    std::fs::write(repo.join(name), content).expect("failed to write file");
    git(repo, &["add", name]);
    git(repo, &["commit", "--quiet", "-m", &format!("update {name}")]);
}

/// Create an upstream repository under `root/upstream/<name>` and return its path.
pub(crate) fn upstream(root: &Path, name: &str) -> PathBuf {
    let path = root.join("upstream").join(name);
    init_repo_with_commit(&path);
    path
}
