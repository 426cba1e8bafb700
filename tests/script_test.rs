//! Tests for script execution and the bundled demos

use std::fs;

use rstest::rstest;
use tempfile::TempDir;

use colourtree::application::demo::{demo_source, run_demo};
use colourtree::application::error_ext::read_script;
use colourtree::application::{
    ApplicationError, Outcome, RunSettings, ScriptRunner, REFERENCE_DEMO, SWAP_DEMO,
};
use colourtree::domain::{Colour, DomainError, ErrorKind, RenderOptions};
use colourtree::util::testing;

fn run(source: &str) -> Result<(ScriptRunner, Vec<Outcome>), ApplicationError> {
    testing::init_test_setup();
    let mut runner = ScriptRunner::new(RunSettings::default());
    let outcomes = runner.run_source(source)?;
    Ok((runner, outcomes))
}

// ============================================================
// Bundled Demos
// ============================================================

#[test]
fn given_reference_demo_when_run_then_all_expectations_hold() {
    let (runner, outcomes) = run(REFERENCE_DEMO).expect("reference demo runs");

    let expected: Vec<&Outcome> = outcomes
        .iter()
        .filter(|o| matches!(o, Outcome::Expected { .. }))
        .collect();
    assert_eq!(
        expected,
        vec![
            &Outcome::Expected {
                name: "r".into(),
                propagated: Some(Colour::Cyan)
            },
            &Outcome::Expected {
                name: "r".into(),
                propagated: Some(Colour::Cyan)
            },
            &Outcome::Expected {
                name: "r".into(),
                propagated: Some(Colour::Yellow)
            },
            &Outcome::Expected {
                name: "b".into(),
                propagated: None
            },
        ]
    );

    let tree = runner.tree().unwrap();
    let b = runner.lookup("b").unwrap();
    assert!(!tree.is_attached(b), "b stays alive but detached");
}

#[test]
fn given_swap_demo_when_run_then_verifies() {
    let (_, outcomes) = run(SWAP_DEMO).expect("swap demo runs");
    assert!(outcomes.contains(&Outcome::Verified));
    assert!(outcomes.contains(&Outcome::Checked {
        name: "j".into(),
        colour: Colour::Green,
        depth: 0,
        uniform: true
    }));
}

#[rstest]
#[case("reference")]
#[case("swap")]
fn given_demo_name_when_looked_up_then_runs_with_verification(#[case] name: &str) {
    let source = demo_source(name).expect("known demo");
    let settings = RunSettings {
        verify_each: true,
        render: RenderOptions::default(),
    };
    run_demo(source, settings).expect("demo runs with verify_each");
}

#[test]
fn given_unknown_demo_name_when_looked_up_then_none() {
    assert!(demo_source("fractal").is_none());
}

// ============================================================
// Statements
// ============================================================

#[test]
fn given_show_statement_when_run_then_renders_names_and_caches() {
    let (_, outcomes) = run("root r red\nnode b cyan\nput r b\nshow").unwrap();
    let Some(Outcome::Shown(rendered)) = outcomes.last() else {
        panic!("expected a rendered tree");
    };
    let lines: Vec<&str> = rendered.lines().collect();
    assert_eq!(lines[0], "r red [cyan]");
    assert!(lines[1].ends_with("b cyan [-]"));
}

#[test]
fn given_show_of_subtree_when_run_then_starts_there() {
    let (_, outcomes) = run("root r red\nnode b cyan\nnode c green\nput r b\nput b c\nshow b").unwrap();
    let Some(Outcome::Shown(rendered)) = outcomes.last() else {
        panic!("expected a rendered tree");
    };
    assert!(rendered.starts_with("b cyan [green]"));
    assert!(!rendered.contains("r red"));
}

#[test]
fn given_recolour_when_run_then_check_sees_new_colour() {
    let (_, outcomes) =
        run("root r green\nnode b red\nput r b\ncheck r green 1\ncolour b green\ncheck r green 1").unwrap();
    let uniform: Vec<bool> = outcomes
        .iter()
        .filter_map(|o| match o {
            Outcome::Checked { uniform, .. } => Some(*uniform),
            _ => None,
        })
        .collect();
    assert_eq!(uniform, vec![false, true]);
}

// ============================================================
// Errors
// ============================================================

#[test]
fn given_failed_expectation_when_run_then_reports_line() {
    let err = run("root r red\nnode b cyan\nput r b\nexpect r yellow").unwrap_err();
    assert_eq!(err.line(), Some(4));
    assert!(err.to_string().contains("r propagates cyan, expected yellow"));
}

#[test]
fn given_ancestor_swap_when_run_then_invalid_operand_at_line() {
    let err = run("root r red\nnode b cyan\nnode c green\nput r b\nput b c\nswap b c").unwrap_err();
    match err {
        ApplicationError::Statement { line, source } => {
            assert_eq!(line, 6);
            assert_eq!(source.kind(), ErrorKind::InvalidOperand);
            assert!(matches!(source, DomainError::AncestorSwap { .. }));
        }
        other => panic!("expected statement error, got {:?}", other),
    }
}

#[test]
fn given_missing_colour_when_run_then_precondition_violation() {
    let err = run("root r red\ncolour r").unwrap_err();
    match err {
        ApplicationError::Statement { source, .. } => {
            assert_eq!(source.kind(), ErrorKind::PreconditionViolation)
        }
        other => panic!("expected statement error, got {:?}", other),
    }
}

#[rstest]
#[case("root r red\nput r ghost", 2, "unknown node name 'ghost'")]
#[case("root r red\nnode r blue", 2, "name 'r' is already bound")]
#[case("root r red\nrm r", 2, "has no parent")]
#[case("root r red\nnode b blue\ndiscard r", 3, "still attached")]
fn given_bad_operand_when_run_then_error_names_it(
    #[case] source: &str,
    #[case] line: usize,
    #[case] message: &str,
) {
    let err = run(source).unwrap_err();
    assert_eq!(err.line(), Some(line));
    assert!(err.to_string().contains(message), "got: {}", err);
}

// ============================================================
// Script Files
// ============================================================

#[test]
fn given_script_file_when_read_then_runs() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("walk.tree");
    fs::write(&path, "root r red\nnode b violet\nput r b\nexpect r violet\nverify\n").unwrap();

    let source = read_script(&path).unwrap();
    let (_, outcomes) = run(&source).unwrap();
    assert_eq!(outcomes.last(), Some(&Outcome::Verified));
}

#[test]
fn given_missing_script_file_when_read_then_operation_failed() {
    let dir = TempDir::new().unwrap();
    let err = read_script(&dir.path().join("absent.tree")).unwrap_err();
    assert!(matches!(err, ApplicationError::OperationFailed { .. }));
    assert!(err.to_string().contains("read script"));
}
