//! Concrete colour palette used by the script runner and the CLI.
//!
//! The tree itself works with any totally ordered type; this enum is just the
//! palette the tooling speaks. Declaration order is dominance order.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::error::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Colour {
    Red,
    Orange,
    Yellow,
    Green,
    Cyan,
    Blue,
    Indigo,
    Violet,
}

impl Colour {
    /// All colours, least dominant first.
    pub const ALL: [Colour; 8] = [
        Colour::Red,
        Colour::Orange,
        Colour::Yellow,
        Colour::Green,
        Colour::Cyan,
        Colour::Blue,
        Colour::Indigo,
        Colour::Violet,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Colour::Red => "red",
            Colour::Orange => "orange",
            Colour::Yellow => "yellow",
            Colour::Green => "green",
            Colour::Cyan => "cyan",
            Colour::Blue => "blue",
            Colour::Indigo => "indigo",
            Colour::Violet => "violet",
        }
    }
}

impl fmt::Display for Colour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Colour {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        if wanted.is_empty() {
            return Err(DomainError::MissingColour("empty colour name".to_string()));
        }
        Colour::ALL
            .iter()
            .copied()
            .find(|c| c.name() == wanted)
            .ok_or_else(|| DomainError::UnknownColour(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_palette_when_compared_then_cyan_dominates_yellow() {
        assert!(Colour::Cyan > Colour::Yellow);
        assert!(Colour::Red < Colour::Violet);
        assert_eq!(Colour::ALL.iter().max(), Some(&Colour::Violet));
    }

    #[test]
    fn given_mixed_case_name_when_parsed_then_resolves() {
        assert_eq!("CyAn".parse::<Colour>().unwrap(), Colour::Cyan);
        assert_eq!(" red ".parse::<Colour>().unwrap(), Colour::Red);
    }

    #[test]
    fn given_bad_names_when_parsed_then_errors() {
        assert!(matches!(
            "".parse::<Colour>(),
            Err(DomainError::MissingColour(_))
        ));
        assert!(matches!(
            "magenta".parse::<Colour>(),
            Err(DomainError::UnknownColour(_))
        ));
    }
}
