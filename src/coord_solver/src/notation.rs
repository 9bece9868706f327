//! Standard face turn notation: a face letter from `FRUBLD`, optionally
//! followed by `2` for a half turn or `'` for a counterclockwise turn.

use crate::cube::{Face, Move};
use itertools::Itertools;
use std::{fmt, str::FromStr};
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum NotationError {
    #[error("Invalid move `{0}`, expected one of F R U B L D optionally followed by 2 or '")]
    InvalidMove(String),
}

impl FromStr for Move {
    type Err = NotationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let face = match chars.next() {
            Some('F') => Face::F,
            Some('R') => Face::R,
            Some('U') => Face::U,
            Some('B') => Face::B,
            Some('L') => Face::L,
            Some('D') => Face::D,
            _ => return Err(NotationError::InvalidMove(s.to_owned())),
        };
        let power = match (chars.next(), chars.next()) {
            (None, _) => 0,
            (Some('2'), None) => 1,
            (Some('\''), None) => 2,
            _ => return Err(NotationError::InvalidMove(s.to_owned())),
        };
        Ok(Move::new(face, power))
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.face().letter())?;
        match self.power() {
            1 => write!(f, "2"),
            2 => write!(f, "'"),
            _ => Ok(()),
        }
    }
}

/// Parse a whitespace separated move sequence. Blank input is the empty
/// sequence.
///
/// # Errors
///
/// If any token is not a valid move.
pub fn parse_moves(s: &str) -> Result<Vec<Move>, NotationError> {
    s.split_whitespace().map(str::parse).collect()
}

/// Whether `s` is a non-empty, well formed move sequence.
#[must_use]
pub fn validate(s: &str) -> bool {
    !s.trim().is_empty() && parse_moves(s).is_ok()
}

#[must_use]
pub fn format_moves(moves: &[Move]) -> String {
    moves.iter().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_indices() {
        let moves = parse_moves("F R U B L D").unwrap();
        assert_eq!(
            moves.iter().map(|m| m.index()).collect::<Vec<_>>(),
            vec![0, 3, 6, 9, 12, 15]
        );
        let moves = parse_moves("  R2   U' \tF\n").unwrap();
        assert_eq!(
            moves.iter().map(|m| m.index()).collect::<Vec<_>>(),
            vec![4, 8, 0]
        );
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(
            parse_moves("R x"),
            Err(NotationError::InvalidMove("x".to_owned()))
        );
        assert!(parse_moves("R3").is_err());
        assert!(parse_moves("R2'").is_err());
        assert!(parse_moves("r").is_err());
        assert!(parse_moves("R'2").is_err());
    }

    #[test]
    fn test_empty_sequence() {
        assert_eq!(parse_moves(""), Ok(vec![]));
        assert_eq!(parse_moves("   "), Ok(vec![]));
        assert!(!validate(""));
        assert!(!validate("  "));
        assert!(validate("D2"));
        assert!(!validate("D2 E"));
    }

    #[test]
    fn test_format() {
        let scramble = "R U' F2 B L' D";
        assert_eq!(format_moves(&parse_moves(scramble).unwrap()), scramble);
        assert_eq!(format_moves(&[]), "");
        for move_ in Move::ALL {
            assert_eq!(move_.to_string().parse::<Move>(), Ok(move_));
        }
    }
}
