//! The built in sub-goals of the first step of a speedsolve. Slots 4 to 7
//! are the bottom layer edges and slot 8 is the front right middle layer
//! edge. Corner slot 4 is the bottom front right corner.

use crate::{
    coordinate::{AffectedPieces, Orbit},
    solver::SolverConfig,
};
use std::{fmt, str::FromStr};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Goal {
    /// Orient every edge and place the front and back bottom edges.
    EoLine,
    /// Orient every edge and place the bottom cross.
    EoCross,
    Cross,
    /// The cross and the front right pair.
    XCross,
    /// The `XCross` with every edge oriented.
    EoXCross,
}

impl Goal {
    pub const ALL: [Goal; 5] = [
        Goal::EoLine,
        Goal::EoCross,
        Goal::Cross,
        Goal::XCross,
        Goal::EoXCross,
    ];

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Goal::EoLine => "EOLine",
            Goal::EoCross => "EOCross",
            Goal::Cross => "Cross",
            Goal::XCross => "XCross",
            Goal::EoXCross => "EOXCross",
        }
    }

    #[must_use]
    pub fn config(self) -> SolverConfig {
        let edges = |pieces: &[u8]| Some(AffectedPieces::new_unchecked(Orbit::Edges, pieces));
        let corners = |pieces: &[u8]| Some(AffectedPieces::new_unchecked(Orbit::Corners, pieces));

        let (edge_permutation, edge_orientation, corner_permutation, corner_orientation) =
            match self {
                Goal::EoLine => (
                    edges(&[5, 7]),
                    Some(AffectedPieces::all(Orbit::Edges)),
                    None,
                    None,
                ),
                Goal::EoCross => (
                    edges(&[4, 5, 6, 7]),
                    Some(AffectedPieces::all(Orbit::Edges)),
                    None,
                    None,
                ),
                Goal::Cross => (edges(&[4, 5, 6, 7]), edges(&[4, 5, 6, 7]), None, None),
                Goal::XCross => (
                    edges(&[4, 5, 6, 7, 8]),
                    edges(&[4, 5, 6, 7, 8]),
                    corners(&[4]),
                    corners(&[4]),
                ),
                Goal::EoXCross => (
                    edges(&[4, 5, 6, 7, 8]),
                    Some(AffectedPieces::all(Orbit::Edges)),
                    corners(&[4]),
                    corners(&[4]),
                ),
            };

        SolverConfig {
            edge_orientation,
            edge_permutation,
            corner_orientation,
            corner_permutation,
            ..SolverConfig::default()
        }
    }
}

impl fmt::Display for Goal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Goal {
    type Err = String;

    /// Goal names are matched case insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Goal::ALL
            .into_iter()
            .find(|goal| goal.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("Unknown goal `{s}`"))
    }
}
