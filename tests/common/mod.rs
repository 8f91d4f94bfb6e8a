//! Shared test utilities for integration tests.
//!
//! Not all functions are used by every test file, but they're shared across tests.
#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use git2::{Oid, Repository, Signature};

use commitsmith::commit::Confirmer;
use commitsmith::error::{CommitError, GenerationError};
use commitsmith::llm::{CompletionClient, CompletionRequest};

/// A test git repository in a temp directory, with an identity configured
/// so the `git` binary can commit in it.
pub struct TestRepo {
    pub dir: tempfile::TempDir,
    pub repo: Repository,
}

impl TestRepo {
    /// Create a new repository with one initial commit.
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp directory");
        let repo = Repository::init(dir.path()).expect("Failed to init git repo");

        {
            let mut config = repo.config().expect("Failed to open repo config");
            config.set_str("user.name", "Test User").unwrap();
            config.set_str("user.email", "test@example.com").unwrap();
            config.set_bool("commit.gpgsign", false).unwrap();
        }

        let test_repo = Self { dir, repo };
        test_repo.write("README.md", "# test\n");
        test_repo.commit_all("init");
        test_repo
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write a file relative to the repository root.
    pub fn write(&self, rel: &str, content: &str) {
        let path = self.dir.path().join(rel);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent dirs");
        }
        std::fs::write(path, content).expect("Failed to write test file");
    }

    /// Stage everything through git2 and commit it. Returns the commit OID.
    pub fn commit_all(&self, message: &str) -> Oid {
        let sig = Signature::now("Test User", "test@example.com").expect("Failed to create signature");

        let mut index = self.repo.index().expect("Failed to get index");
        index
            .add_all(["*"].iter(), git2::IndexAddOption::DEFAULT, None)
            .expect("Failed to add files");
        index.write().expect("Failed to write index");
        let tree_id = index.write_tree().expect("Failed to write tree");
        let tree = self.repo.find_tree(tree_id).expect("Failed to find tree");

        let parent = self.repo.head().ok().and_then(|h| h.peel_to_commit().ok());
        let parents: Vec<&git2::Commit> = parent.iter().collect();

        self.repo
            .commit(Some("HEAD"), &sig, &sig, message, &tree, &parents)
            .expect("Failed to create commit")
    }

    /// Message of the commit at HEAD.
    pub fn head_message(&self) -> String {
        self.repo
            .head()
            .and_then(|h| h.peel_to_commit())
            .map(|c| c.message().unwrap_or_default().to_string())
            .expect("Failed to read HEAD commit")
    }

    pub fn head_oid(&self) -> Oid {
        self.repo
            .head()
            .ok()
            .and_then(|h| h.target())
            .expect("HEAD has no target")
    }

    /// Name of the current branch.
    pub fn branch_name(&self) -> String {
        self.repo
            .head()
            .ok()
            .and_then(|h| h.shorthand().map(|s| s.to_string()))
            .unwrap_or_else(|| "master".to_string())
    }

    /// Number of paths that differ between HEAD and the index.
    pub fn staged_count(&self) -> usize {
        let output = Command::new("git")
            .args(["diff", "--cached", "--name-only"])
            .current_dir(self.dir.path())
            .output()
            .expect("Failed to run git diff --cached");
        assert!(output.status.success(), "git diff --cached failed");
        String::from_utf8_lossy(&output.stdout).lines().count()
    }

    /// Add a bare repository as `origin`. Returns the bare repository's path.
    pub fn add_bare_origin(&self) -> (tempfile::TempDir, PathBuf) {
        let remote_dir = tempfile::tempdir().expect("Failed to create remote dir");
        Repository::init_bare(remote_dir.path()).expect("Failed to init bare repo");
        self.repo
            .remote("origin", remote_dir.path().to_str().expect("Invalid remote path"))
            .expect("Failed to add origin remote");
        let path = remote_dir.path().to_path_buf();
        (remote_dir, path)
    }
}

/// Completion client that returns a fixed reply and counts requests.
pub struct FakeClient {
    reply: String,
    calls: AtomicUsize,
    pub last_request: Mutex<Option<CompletionRequest>>,
}

impl FakeClient {
    pub fn replying(reply: &str) -> Self {
        Self {
            reply: reply.to_string(),
            calls: AtomicUsize::new(0),
            last_request: Mutex::new(None),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CompletionClient for FakeClient {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, GenerationError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_request.lock().unwrap() = Some(request.clone());
        Ok(self.reply.clone())
    }
}

/// Confirmer that answers from a fixed list and records the questions.
pub struct ScriptedConfirmer {
    answers: Mutex<Vec<bool>>,
    pub asked: Mutex<Vec<String>>,
}

impl ScriptedConfirmer {
    /// Answers are consumed in order.
    pub fn new(answers: &[bool]) -> Self {
        let mut answers = answers.to_vec();
        answers.reverse();
        Self {
            answers: Mutex::new(answers),
            asked: Mutex::new(Vec::new()),
        }
    }

    pub fn asked(&self) -> Vec<String> {
        self.asked.lock().unwrap().clone()
    }
}

impl Confirmer for ScriptedConfirmer {
    fn confirm(&self, prompt: &str) -> Result<bool, CommitError> {
        self.asked.lock().unwrap().push(prompt.to_string());
        self.answers
            .lock()
            .unwrap()
            .pop()
            .ok_or_else(|| CommitError::Prompt(format!("no scripted answer for '{prompt}'")))
    }
}
