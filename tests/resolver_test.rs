// tests/resolver_test.rs
use release_trigger::domain::{Action, ChangedPaths, Event, VersionPart};
use release_trigger::{decide, ReleaseTriggerError, Resolver};

fn paths(items: &[&str]) -> ChangedPaths {
    items.iter().map(|s| s.to_string()).collect()
}

fn path_inputs() -> Vec<ChangedPaths> {
    vec![
        ChangedPaths::new(),
        paths(&["README.md"]),
        paths(&[".github/workflows/python-publish.yml"]),
        paths(&["src/twoblock/_preproc_utilities.py", "setup.py"]),
    ]
}

// ============================================================================
// Dispatch events
// ============================================================================

#[test]
fn test_manual_dispatch_valid_bumps_publish() {
    for part in VersionPart::ALL {
        let event = Event::ManualDispatch {
            bump: part.to_string(),
        };
        for changed in path_inputs() {
            assert_eq!(
                decide(&event, &changed).unwrap(),
                Action::Publish { bump: Some(part) },
                "dispatch with {} and {:?}",
                part,
                changed
            );
        }
    }
}

#[test]
fn test_manual_dispatch_invalid_bumps_fail() {
    for raw in ["", "Patch", "MINOR", "majr", "1.2.3", "prerelease", "patch "] {
        let event = Event::ManualDispatch {
            bump: raw.to_string(),
        };
        let err = decide(&event, &ChangedPaths::new()).unwrap_err();
        assert!(
            matches!(err, ReleaseTriggerError::InvalidInput(_)),
            "bump {:?} gave {:?}",
            raw,
            err
        );
    }
}

#[test]
fn test_reusable_call_follows_dispatch_rules() {
    let ok = Event::ReusableCall {
        bump: "minor".into(),
    };
    assert_eq!(
        decide(&ok, &ChangedPaths::new()).unwrap(),
        Action::Publish {
            bump: Some(VersionPart::Minor)
        }
    );

    let bad = Event::ReusableCall {
        bump: "next".into(),
    };
    assert!(matches!(
        decide(&bad, &ChangedPaths::new()),
        Err(ReleaseTriggerError::InvalidInput(_))
    ));
}

// ============================================================================
// Release, push and pull request events
// ============================================================================

#[test]
fn test_release_created_always_publishes_without_bump() {
    for changed in path_inputs() {
        assert_eq!(
            decide(&Event::ReleaseCreated, &changed).unwrap(),
            Action::Publish { bump: None }
        );
    }
}

#[test]
fn test_push_readme_only_skips() {
    let event = Event::push("master", ["README.md"]);
    assert_eq!(decide(&event, &paths(&["README.md"])).unwrap(), Action::Skip);
}

#[test]
fn test_push_mixed_paths_builds() {
    let event = Event::push("master", ["README.md", "src/app.py"]);
    assert_eq!(
        decide(&event, &paths(&["README.md", "src/app.py"])).unwrap(),
        Action::BuildOnly
    );
}

#[test]
fn test_push_every_ignored_entry_skips() {
    let event = Event::push(
        "master",
        [
            ".github/workflows/python-publish.yml",
            ".github/dependabot.yml",
            "README.md",
            ".gitignore",
            "CHANGELOG.md",
        ],
    );
    assert_eq!(decide(&event, &ChangedPaths::new()).unwrap(), Action::Skip);
}

#[test]
fn test_push_empty_paths_never_skips() {
    let event = Event::push("master", Vec::<String>::new());
    assert_eq!(
        decide(&event, &ChangedPaths::new()).unwrap(),
        Action::BuildOnly
    );
}

#[test]
fn test_push_never_publishes() {
    for changed in path_inputs() {
        let event = Event::push("master", changed.iter().cloned());
        let action = decide(&event, &changed).unwrap();
        assert!(!action.uploads(), "push published for {:?}", changed);
    }
}

#[test]
fn test_pull_request_always_builds_only() {
    for branch in ["master", "develop"] {
        for changed in path_inputs() {
            let event = Event::PullRequest {
                branch: branch.to_string(),
            };
            assert_eq!(decide(&event, &changed).unwrap(), Action::BuildOnly);
        }
    }
}

// ============================================================================
// Purity
// ============================================================================

#[test]
fn test_decide_is_idempotent() {
    let resolver = Resolver::default();
    let events = vec![
        Event::ReleaseCreated,
        Event::ManualDispatch {
            bump: "major".into(),
        },
        Event::ReusableCall { bump: "bad".into() },
        Event::push("master", ["README.md"]),
        Event::push("master", ["src/app.py"]),
        Event::PullRequest {
            branch: "master".into(),
        },
    ];

    for event in &events {
        for changed in path_inputs() {
            let first = resolver.explain(event, &changed).map_err(|e| e.to_string());
            let second = resolver.explain(event, &changed).map_err(|e| e.to_string());
            assert_eq!(first, second);
        }
    }
}
