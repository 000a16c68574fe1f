// tests/git_discovery_test.rs
use git2::{Commit, Oid, Signature};
use release_trigger::cli::orchestration::resolve_event;
use release_trigger::domain::{Action, ChangedPaths, Event, IncomingEvent, RevisionRange};
use release_trigger::git::{Git2Repository, Repository};
use release_trigger::Resolver;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

struct TestRepo {
    dir: TempDir,
    repo: git2::Repository,
}

impl TestRepo {
    fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let repo = git2::Repository::init(dir.path()).unwrap();
        TestRepo { dir, repo }
    }

    /// Write (Some) or delete (None) files, then commit on HEAD
    fn commit(&self, changes: &[(&str, Option<&str>)]) -> Oid {
        let mut index = self.repo.index().unwrap();
        for (path, content) in changes {
            let full = self.dir.path().join(path);
            match content {
                Some(text) => {
                    fs::create_dir_all(full.parent().unwrap()).unwrap();
                    fs::write(&full, text).unwrap();
                    index.add_path(Path::new(path)).unwrap();
                }
                None => {
                    fs::remove_file(&full).unwrap();
                    index.remove_path(Path::new(path)).unwrap();
                }
            }
        }
        index.write().unwrap();

        let tree = self.repo.find_tree(index.write_tree().unwrap()).unwrap();
        let sig = Signature::now("Release Bot", "bot@example.com").unwrap();
        let parents: Vec<Commit> = self
            .repo
            .head()
            .ok()
            .and_then(|h| h.target())
            .map(|oid| self.repo.find_commit(oid).unwrap())
            .into_iter()
            .collect();
        let parent_refs: Vec<&Commit> = parents.iter().collect();

        self.repo
            .commit(Some("HEAD"), &sig, &sig, "change", &tree, &parent_refs)
            .unwrap()
    }
}

#[test]
fn test_changed_paths_between_commits() {
    let test = TestRepo::new();
    let first = test.commit(&[
        ("setup.py", Some("from setuptools import setup\n")),
        ("README.md", Some("# twoblock\n")),
        ("old.txt", Some("obsolete\n")),
    ]);
    let second = test.commit(&[
        ("README.md", Some("# twoblock\n\nTwo-block SDR.\n")),
        ("src/twoblock/__init__.py", Some("__version__ = \"0.1.3\"\n")),
        ("old.txt", None),
    ]);

    let repo = Git2Repository::open(test.dir.path()).unwrap();
    let paths = repo
        .changed_paths(&first.to_string(), &second.to_string())
        .unwrap();

    let expected: ChangedPaths = ["README.md", "old.txt", "src/twoblock/__init__.py"]
        .iter()
        .map(|s| s.to_string())
        .collect();
    assert_eq!(paths, expected);
}

#[test]
fn test_unknown_revision_is_an_error() {
    let test = TestRepo::new();
    let head = test.commit(&[("setup.py", Some("x\n"))]);

    let repo = Git2Repository::open(test.dir.path()).unwrap();
    let err = repo
        .changed_paths("1234567890123456789012345678901234567890", &head.to_string())
        .unwrap_err();
    assert!(err.to_string().contains("cannot resolve revision"));
}

#[test]
fn test_discovered_workflow_only_push_skips() {
    let test = TestRepo::new();
    let first = test.commit(&[("setup.py", Some("x\n"))]);
    let second = test.commit(&[(
        ".github/workflows/python-publish.yml",
        Some("name: Upload Python Package\n"),
    )]);

    let repo = Git2Repository::open(test.dir.path()).unwrap();
    let incoming = IncomingEvent {
        event: Event::push("master", Vec::<String>::new()),
        revision_range: Some(RevisionRange::new(first.to_string(), second.to_string())),
    };

    let (event, decision) = resolve_event(
        &Resolver::default(),
        &incoming,
        &ChangedPaths::new(),
        Some(&repo),
    )
    .unwrap();

    assert_eq!(
        event,
        Event::push("master", [".github/workflows/python-publish.yml"])
    );
    assert_eq!(decision.action, Action::Skip);
}
