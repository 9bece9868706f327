use crate::{
    cube::Move,
    space::{CoordinateSpace, CoordinateSpaceImpl},
    start, success,
};
use log::info;
use memoize::memoize;
use std::{sync::Arc, time::Instant};

/// The coordinate reached by every move from every coordinate of a space,
/// computed once up front so the search never touches piece vectors.
#[derive(Debug)]
pub struct MoveTable {
    table: Box<[[u32; Move::COUNT]]>,
}

impl MoveTable {
    pub fn generate<S: CoordinateSpace>(space: &S) -> Self {
        info!(start!("Generating the move table for {}"), space.label());
        let start = Instant::now();

        let table = (0..space.size())
            .map(|coordinate| Move::ALL.map(|move_| space.apply_move(coordinate, move_)))
            .collect::<Box<[_]>>();

        info!(
            success!("Generated {} move table entries in {:.3}s"),
            table.len() * Move::COUNT,
            start.elapsed().as_secs_f64()
        );
        Self { table }
    }

    /// A table with the given rows, for tests that need transitions no cube
    /// space has.
    #[cfg(test)]
    pub(crate) fn from_rows(table: Box<[[u32; Move::COUNT]]>) -> Self {
        Self { table }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.table.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    #[must_use]
    pub fn make_move(&self, coordinate: u32, move_: Move) -> u32 {
        self.table[coordinate as usize][move_.index()]
    }

    /// Every successor of `coordinate`, in move index order.
    #[must_use]
    pub fn row(&self, coordinate: u32) -> &[u32; Move::COUNT] {
        &self.table[coordinate as usize]
    }
}

/// Get the move table of `space`, generating it only the first time its
/// transition space is seen on this thread.
///
/// The thread keeps every shared table alive, even after the last solver
/// using it is dropped, until `release_shared_move_tables` is called.
#[must_use]
pub fn shared_move_table(space: &CoordinateSpaceImpl) -> Arc<MoveTable> {
    memoized_move_table(space.transition_space())
}

/// Forget every move table shared on this thread. Tables still held by a
/// solver stay alive until that solver is dropped, but later solvers build
/// their own.
pub fn release_shared_move_tables() {
    memoized_flush_memoized_move_table();
}

#[memoize]
fn memoized_move_table(transition_space: CoordinateSpaceImpl) -> Arc<MoveTable> {
    Arc::new(MoveTable::generate(&transition_space))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        coordinate::{AffectedPieces, Orbit},
        cube::MoveDefs,
        space::{OrientationSpace, PermutationSpace},
    };

    #[test_log::test]
    fn test_table_matches_space() {
        let space =
            PermutationSpace::new(AffectedPieces::new(Orbit::Edges, &[5, 7]).unwrap(), &MoveDefs::CUBE3);
        let move_table = MoveTable::generate(&space);
        assert_eq!(move_table.len(), 132);
        for coordinate in 0..space.size() {
            for move_ in Move::ALL {
                assert_eq!(
                    move_table.make_move(coordinate, move_),
                    space.apply_move(coordinate, move_)
                );
            }
        }
    }

    #[test_log::test]
    fn test_move_then_inverse_in_table() {
        let move_table =
            MoveTable::generate(&OrientationSpace::new(Orbit::Corners, None, &MoveDefs::CUBE3));
        for coordinate in 0..u32::try_from(move_table.len()).unwrap() {
            for (move_, &next) in Move::ALL.iter().zip(move_table.row(coordinate)) {
                assert_eq!(move_table.make_move(next, move_.inverse()), coordinate);
            }
        }
    }

    #[test_log::test]
    fn test_shared_tables_are_reused() {
        let space: CoordinateSpaceImpl =
            OrientationSpace::new(Orbit::Edges, None, &MoveDefs::CUBE3).into();
        let a = shared_move_table(&space);
        let b = shared_move_table(&space);
        assert!(Arc::ptr_eq(&a, &b));

        // Same transitions with a different goal
        let partial: CoordinateSpaceImpl = OrientationSpace::new(
            Orbit::Edges,
            Some(AffectedPieces::new(Orbit::Edges, &[0]).unwrap()),
            &MoveDefs::CUBE3,
        )
        .into();
        assert!(Arc::ptr_eq(&a, &shared_move_table(&partial)));

        let corners: CoordinateSpaceImpl =
            OrientationSpace::new(Orbit::Corners, None, &MoveDefs::CUBE3).into();
        assert!(!Arc::ptr_eq(&a, &shared_move_table(&corners)));
    }

    #[test_log::test]
    fn test_released_tables_are_rebuilt() {
        let space: CoordinateSpaceImpl = PermutationSpace::new(
            AffectedPieces::new(Orbit::Corners, &[1, 2]).unwrap(),
            &MoveDefs::CUBE3,
        )
        .into();
        let before = shared_move_table(&space);
        release_shared_move_tables();
        let after = shared_move_table(&space);
        assert!(!Arc::ptr_eq(&before, &after));
        assert!(Arc::ptr_eq(&after, &shared_move_table(&space)));
        assert_eq!(before.row(3), after.row(3));
    }
}
