//! Coordinate spaces tie the codec to the move model. A space knows how big
//! it is, how a move acts on one of its coordinates, and which coordinates
//! count as solved.

use crate::{
    coordinate::{
        AffectedPieces, Orbit, index_to_orientation, index_to_permutation, orientation_to_index,
        permutation_to_index,
    },
    cube::{Move, MoveDefs},
};
use enum_dispatch::enum_dispatch;

#[enum_dispatch]
pub trait CoordinateSpace {
    /// The number of coordinates in the space.
    fn size(&self) -> u32;

    /// The coordinate reached by applying `move_` to `coordinate`.
    fn apply_move(&self, coordinate: u32, move_: Move) -> u32;

    /// The coordinate of the solved cube.
    fn solved_coordinate(&self) -> u32;

    /// Every coordinate that satisfies the goal of this space.
    fn goal_coordinates(&self) -> Vec<u32>;

    /// The same space with its goal forgotten. Two spaces with the same
    /// transition space share a move table.
    fn transition_space(&self) -> CoordinateSpaceImpl;

    /// A short human readable label, used in logs.
    fn label(&self) -> String;
}

#[enum_dispatch(CoordinateSpace)]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CoordinateSpaceImpl {
    OrientationSpace,
    PermutationSpace,
}

/// Orientations of every piece in an orbit. The goal is that the slots listed
/// in `affected` are oriented, or every slot when `affected` is `None`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OrientationSpace {
    orbit: Orbit,
    affected: Option<AffectedPieces>,
    move_defs: &'static MoveDefs,
}

impl OrientationSpace {
    #[must_use]
    pub fn new(orbit: Orbit, affected: Option<AffectedPieces>, move_defs: &'static MoveDefs) -> Self {
        debug_assert!(affected.as_ref().is_none_or(|a| a.orbit() == orbit));
        Self {
            orbit,
            affected,
            move_defs,
        }
    }

    fn decode(&self, coordinate: u32) -> Vec<u8> {
        index_to_orientation(
            coordinate,
            self.orbit.piece_count(),
            self.orbit.orientation_count(),
        )
    }
}

impl CoordinateSpace for OrientationSpace {
    fn size(&self) -> u32 {
        self.orbit.orientation_space_size()
    }

    fn apply_move(&self, coordinate: u32, move_: Move) -> u32 {
        let mut orientation = self.decode(coordinate);
        self.move_defs
            .apply_orientation(self.orbit, &mut orientation, move_);
        orientation_to_index(&orientation, self.orbit.orientation_count())
    }

    fn solved_coordinate(&self) -> u32 {
        0
    }

    fn goal_coordinates(&self) -> Vec<u32> {
        let Some(affected) = &self.affected else {
            return vec![self.solved_coordinate()];
        };
        (0..self.size())
            .filter(|&coordinate| {
                let orientation = self.decode(coordinate);
                affected
                    .pieces()
                    .iter()
                    .all(|&slot| orientation[usize::from(slot)] == 0)
            })
            .collect()
    }

    fn transition_space(&self) -> CoordinateSpaceImpl {
        OrientationSpace::new(self.orbit, None, self.move_defs).into()
    }

    fn label(&self) -> String {
        let orbit = match self.orbit {
            Orbit::Edges => "edge",
            Orbit::Corners => "corner",
        };
        match &self.affected {
            Some(affected) => format!("{orbit} orientation of {:?}", affected.pieces()),
            None => format!("{orbit} orientation"),
        }
    }
}

/// Positions of the affected pieces of an orbit. The goal is the single
/// coordinate in which each of them sits in its home slot.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PermutationSpace {
    affected: AffectedPieces,
    move_defs: &'static MoveDefs,
}

impl PermutationSpace {
    #[must_use]
    pub fn new(affected: AffectedPieces, move_defs: &'static MoveDefs) -> Self {
        Self {
            affected,
            move_defs,
        }
    }
}

impl CoordinateSpace for PermutationSpace {
    fn size(&self) -> u32 {
        self.affected.permutation_space_size()
    }

    fn apply_move(&self, coordinate: u32, move_: Move) -> u32 {
        let orbit = self.affected.orbit();
        let mut permutation =
            index_to_permutation(coordinate, self.affected.pieces(), orbit.piece_count());
        self.move_defs
            .apply_permutation(orbit, &mut permutation, move_);
        permutation_to_index(&permutation, self.affected.pieces())
    }

    fn solved_coordinate(&self) -> u32 {
        permutation_to_index(&self.affected.orbit().identity(), self.affected.pieces())
    }

    fn goal_coordinates(&self) -> Vec<u32> {
        vec![self.solved_coordinate()]
    }

    fn transition_space(&self) -> CoordinateSpaceImpl {
        self.clone().into()
    }

    fn label(&self) -> String {
        let orbit = match self.affected.orbit() {
            Orbit::Edges => "edge",
            Orbit::Corners => "corner",
        };
        format!("{orbit} permutation of {:?}", self.affected.pieces())
    }
}
