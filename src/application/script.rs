//! Line-oriented tree scripts.
//!
//! One statement per line, `#` starts a comment:
//!
//! ```text
//! root r red          # create the tree
//! node b cyan         # create a detached node
//! put r b             # insert b under r
//! rm b                # detach b (and its subtree)
//! swap b c            # exchange two subtrees
//! colour b green      # update a node's colour
//! check r red 2       # uniform colour down to depth 2?
//! expect r cyan       # assert propagated colour (`none` for leaves)
//! show [b]            # render the tree or a subtree
//! verify              # check all invariants
//! discard b           # free a detached subtree
//! ```

use crate::application::{ApplicationError, ApplicationResult};
use crate::domain::{Colour, DomainError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Statement {
    Root { name: String, colour: Colour },
    Node { name: String, colour: Colour },
    Put { parent: String, child: String },
    Remove { name: String },
    Swap { a: String, b: String },
    Recolour { name: String, colour: Colour },
    Check { name: String, colour: Colour, depth: usize },
    Expect { name: String, propagated: Option<Colour> },
    Show { name: Option<String> },
    Verify,
    Discard { name: String },
}

impl Statement {
    /// True for statements that change the tree.
    pub fn is_mutation(&self) -> bool {
        matches!(
            self,
            Statement::Put { .. }
                | Statement::Remove { .. }
                | Statement::Swap { .. }
                | Statement::Recolour { .. }
                | Statement::Discard { .. }
        )
    }
}

/// A parsed statement with its 1-based source line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    pub number: usize,
    pub statement: Statement,
}

const KEYWORDS: [&str; 11] = [
    "root", "node", "put", "rm", "swap", "colour", "check", "expect", "show", "verify", "discard",
];

/// Parses a whole script, stopping at the first malformed line.
pub fn parse_script(source: &str) -> ApplicationResult<Vec<Line>> {
    let mut lines = Vec::new();
    for (idx, raw) in source.lines().enumerate() {
        let number = idx + 1;
        if let Some(statement) = parse_line(number, raw)? {
            lines.push(Line { number, statement });
        }
    }
    Ok(lines)
}

fn parse_line(number: usize, raw: &str) -> ApplicationResult<Option<Statement>> {
    let content = raw.split('#').next().unwrap_or_default();
    let words: Vec<&str> = content.split_whitespace().collect();

    let statement = match words.as_slice() {
        [] => return Ok(None),
        ["root", name, rest @ ..] => Statement::Root {
            name: name.to_string(),
            colour: colour_arg(number, "root", rest)?,
        },
        ["node", name, rest @ ..] => Statement::Node {
            name: name.to_string(),
            colour: colour_arg(number, "node", rest)?,
        },
        ["put", parent, child] => Statement::Put {
            parent: parent.to_string(),
            child: child.to_string(),
        },
        ["rm", name] => Statement::Remove {
            name: name.to_string(),
        },
        ["swap", a, b] => Statement::Swap {
            a: a.to_string(),
            b: b.to_string(),
        },
        ["colour", name, rest @ ..] => Statement::Recolour {
            name: name.to_string(),
            colour: colour_arg(number, "colour", rest)?,
        },
        ["check", name, colour, depth] => Statement::Check {
            name: name.to_string(),
            colour: parse_colour(number, colour)?,
            depth: depth.parse().map_err(|_| ApplicationError::Parse {
                line: number,
                message: format!("depth must be a non-negative integer, got '{}'", depth),
            })?,
        },
        ["expect", name, "none"] => Statement::Expect {
            name: name.to_string(),
            propagated: None,
        },
        ["expect", name, colour] => Statement::Expect {
            name: name.to_string(),
            propagated: Some(parse_colour(number, colour)?),
        },
        ["show"] => Statement::Show { name: None },
        ["show", name] => Statement::Show {
            name: Some(name.to_string()),
        },
        ["verify"] => Statement::Verify,
        ["discard", name] => Statement::Discard {
            name: name.to_string(),
        },
        [keyword, ..] if KEYWORDS.contains(keyword) => {
            return Err(ApplicationError::Parse {
                line: number,
                message: format!("wrong number of arguments for '{}'", keyword),
            })
        }
        [keyword, ..] => {
            return Err(ApplicationError::Parse {
                line: number,
                message: format!("unknown statement '{}'", keyword),
            })
        }
    };
    Ok(Some(statement))
}

/// Trailing colour argument of `root`, `node` and `colour`.
fn colour_arg(number: usize, keyword: &str, rest: &[&str]) -> ApplicationResult<Colour> {
    match rest {
        [colour] => parse_colour(number, colour),
        [] => Err(ApplicationError::Statement {
            line: number,
            source: DomainError::MissingColour(format!("'{}' needs a colour", keyword)),
        }),
        _ => Err(ApplicationError::Parse {
            line: number,
            message: format!("wrong number of arguments for '{}'", keyword),
        }),
    }
}

fn parse_colour(number: usize, word: &str) -> ApplicationResult<Colour> {
    word.parse()
        .map_err(|source| ApplicationError::Statement { line: number, source })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn given_script_with_comments_when_parsed_then_keeps_line_numbers() {
        let lines = parse_script("# header\nroot r red\n\nnode b cyan # trailing\nput r b\n").unwrap();
        let numbers: Vec<usize> = lines.iter().map(|l| l.number).collect();
        assert_eq!(numbers, vec![2, 4, 5]);
        assert_eq!(
            lines[1].statement,
            Statement::Node {
                name: "b".into(),
                colour: Colour::Cyan
            }
        );
    }

    #[rstest]
    #[case("expect r none", Statement::Expect { name: "r".into(), propagated: None })]
    #[case("expect r violet", Statement::Expect { name: "r".into(), propagated: Some(Colour::Violet) })]
    #[case("check r green 2", Statement::Check { name: "r".into(), colour: Colour::Green, depth: 2 })]
    #[case("show", Statement::Show { name: None })]
    #[case("swap a b", Statement::Swap { a: "a".into(), b: "b".into() })]
    fn given_statement_when_parsed_then_matches(#[case] input: &str, #[case] expected: Statement) {
        let lines = parse_script(input).unwrap();
        assert_eq!(lines[0].statement, expected);
    }

    #[test]
    fn given_colour_statement_without_colour_when_parsed_then_precondition_error() {
        let err = parse_script("root r red\ncolour r").unwrap_err();
        assert!(matches!(
            err,
            ApplicationError::Statement {
                line: 2,
                source: DomainError::MissingColour(_)
            }
        ));
    }

    #[rstest]
    #[case("paint r red", "unknown statement 'paint'")]
    #[case("put r", "wrong number of arguments for 'put'")]
    #[case("check r red deep", "depth must be a non-negative integer")]
    fn given_malformed_line_when_parsed_then_parse_error(#[case] input: &str, #[case] message: &str) {
        let err = parse_script(input).unwrap_err();
        assert_eq!(err.line(), Some(1));
        assert!(err.to_string().contains(message), "got: {}", err);
    }
}
