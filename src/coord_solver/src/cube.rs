//! The 3x3x3 move model: faces, moves, and how a move acts on permutation
//! and orientation vectors.
//!
//! Moves are data, not code. Every face is described once by the slots its
//! clockwise quarter turn cycles, and half and counterclockwise turns repeat
//! that quarter turn.

use crate::coordinate::Orbit;

/// The six faces, in the fixed order that move indices are built from.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Face {
    F,
    R,
    U,
    B,
    L,
    D,
}

impl Face {
    pub const ALL: [Face; 6] = [Face::F, Face::R, Face::U, Face::B, Face::L, Face::D];

    #[must_use]
    pub fn index(self) -> usize {
        self as usize
    }

    #[must_use]
    pub fn from_index(index: usize) -> Option<Face> {
        Face::ALL.get(index).copied()
    }

    /// The face on the other side of the cube. Opposite faces are three
    /// indices apart.
    #[must_use]
    pub fn opposite(self) -> Face {
        Face::ALL[(self.index() + 3) % 6]
    }

    #[must_use]
    pub fn letter(self) -> char {
        match self {
            Face::F => 'F',
            Face::R => 'R',
            Face::U => 'U',
            Face::B => 'B',
            Face::L => 'L',
            Face::D => 'D',
        }
    }
}

/// One of the 18 face turns. The index is `face * 3 + power`, where power 0
/// is a clockwise quarter turn, 1 a half turn and 2 a counterclockwise
/// quarter turn.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Move(u8);

impl Move {
    pub const COUNT: usize = 18;

    pub const ALL: [Move; Move::COUNT] = {
        let mut arr = [Move(0); Move::COUNT];
        let mut i = 0;
        while i < Move::COUNT {
            #[allow(clippy::cast_possible_truncation)]
            let index = i as u8;
            arr[i] = Move(index);
            i += 1;
        }
        arr
    };

    /// Create the move turning `face` by `power + 1` clockwise quarter turns.
    ///
    /// # Panics
    ///
    /// If `power` is not 0, 1 or 2.
    #[must_use]
    pub fn new(face: Face, power: u8) -> Self {
        assert!(power < 3, "Move power must be below 3, got {power}");
        #[allow(clippy::cast_possible_truncation)]
        let face_index = face.index() as u8;
        Self(face_index * 3 + power)
    }

    #[must_use]
    pub fn from_index(index: usize) -> Option<Self> {
        Move::ALL.get(index).copied()
    }

    #[must_use]
    pub fn index(self) -> usize {
        usize::from(self.0)
    }

    #[must_use]
    pub fn face(self) -> Face {
        Face::ALL[usize::from(self.0 / 3)]
    }

    #[must_use]
    pub fn power(self) -> u8 {
        self.0 % 3
    }

    /// The number of clockwise quarter turns this move performs.
    #[must_use]
    pub fn quarter_turns(self) -> u8 {
        self.power() + 1
    }

    /// The move that undoes this one. Half turns are their own inverse.
    #[must_use]
    pub fn inverse(self) -> Self {
        Self(self.0 / 3 * 3 + (2 - self.power()))
    }
}

/// Immutable description of how every face turn acts on the pieces.
///
/// Edge slots are `UR UF UL UB DR DF DL DB FR FL BL BR` and corner slots are
/// `URF UFL ULB UBR DFR DLF DBL DRB`.
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct MoveDefs {
    /// For each face, the four edge slots a clockwise quarter turn cycles.
    /// The occupant of the first slot moves to the second, and so on.
    pub edge_cycles: [[u8; 4]; 6],
    /// For each face, the source slot of every corner slot after a clockwise
    /// quarter turn.
    pub corner_sources: [[u8; 8]; 6],
    /// For each face, the twist added to the corner that lands in each slot.
    pub corner_twists: [[u8; 8]; 6],
    /// The faces whose quarter turns flip the edges they move.
    pub edge_flipping_faces: [Face; 2],
}

impl MoveDefs {
    pub const CUBE3: MoveDefs = MoveDefs {
        edge_cycles: [
            [1, 8, 5, 9],
            [0, 11, 4, 8],
            [1, 2, 3, 0],
            [3, 10, 7, 11],
            [2, 9, 6, 10],
            [5, 4, 7, 6],
        ],
        corner_sources: [
            [1, 5, 2, 3, 0, 4, 6, 7],
            [4, 1, 2, 0, 7, 5, 6, 3],
            [3, 0, 1, 2, 4, 5, 6, 7],
            [0, 1, 3, 7, 4, 5, 2, 6],
            [0, 2, 6, 3, 4, 1, 5, 7],
            [0, 1, 2, 3, 5, 6, 7, 4],
        ],
        corner_twists: [
            [1, 2, 0, 0, 2, 1, 0, 0],
            [2, 0, 0, 1, 1, 0, 0, 2],
            [0; 8],
            [0, 0, 1, 2, 0, 0, 2, 1],
            [0, 1, 2, 0, 0, 2, 1, 0],
            [0; 8],
        ],
        edge_flipping_faces: [Face::F, Face::B],
    };

    /// Apply `move_` to the permutation vector of `orbit` in place.
    pub fn apply_permutation(&self, orbit: Orbit, pieces: &mut [u8], move_: Move) {
        match orbit {
            Orbit::Edges => self.apply_edge_permutation(pieces, move_),
            Orbit::Corners => self.apply_corner_permutation(pieces, move_),
        }
    }

    /// Apply `move_` to the orientation vector of `orbit` in place.
    pub fn apply_orientation(&self, orbit: Orbit, orientation: &mut [u8], move_: Move) {
        match orbit {
            Orbit::Edges => self.apply_edge_orientation(orientation, move_),
            Orbit::Corners => self.apply_corner_orientation(orientation, move_),
        }
    }

    pub fn apply_edge_permutation(&self, pieces: &mut [u8], move_: Move) {
        debug_assert_eq!(pieces.len(), Orbit::Edges.piece_count());
        let [a, b, c, d] = self.edge_cycles[move_.face().index()].map(usize::from);
        for _ in 0..move_.quarter_turns() {
            let last = pieces[d];
            pieces[d] = pieces[c];
            pieces[c] = pieces[b];
            pieces[b] = pieces[a];
            pieces[a] = last;
        }
    }

    /// Edge orientations travel with their edges. Only odd numbers of quarter
    /// turns of the flipping faces change them.
    pub fn apply_edge_orientation(&self, orientation: &mut [u8], move_: Move) {
        self.apply_edge_permutation(orientation, move_);
        let face = move_.face();
        if self.edge_flipping_faces.contains(&face) && move_.quarter_turns() % 2 == 1 {
            for slot in self.edge_cycles[face.index()] {
                orientation[usize::from(slot)] ^= 1;
            }
        }
    }

    pub fn apply_corner_permutation(&self, pieces: &mut [u8], move_: Move) {
        debug_assert_eq!(pieces.len(), Orbit::Corners.piece_count());
        let sources = &self.corner_sources[move_.face().index()];
        for _ in 0..move_.quarter_turns() {
            let round: [u8; 8] = std::array::from_fn(|slot| pieces[slot]);
            for (piece, &source) in pieces.iter_mut().zip(sources) {
                *piece = round[usize::from(source)];
            }
        }
    }

    pub fn apply_corner_orientation(&self, orientation: &mut [u8], move_: Move) {
        debug_assert_eq!(orientation.len(), Orbit::Corners.piece_count());
        let face = move_.face().index();
        let sources = &self.corner_sources[face];
        let twists = &self.corner_twists[face];
        for _ in 0..move_.quarter_turns() {
            let round: [u8; 8] = std::array::from_fn(|slot| orientation[slot]);
            for ((twist, &source), &delta) in orientation.iter_mut().zip(sources).zip(twists) {
                *twist = (round[usize::from(source)] + delta) % 3;
            }
        }
    }
}

/// A random sequence of `length` moves in which no face is turned twice in a
/// row.
#[must_use]
pub fn random_scramble(length: usize) -> Vec<Move> {
    let mut scramble = Vec::with_capacity(length);
    let mut last_face: Option<Face> = None;
    for _ in 0..length {
        let face = match last_face {
            None => fastrand::usize(0..6),
            Some(last_face) => {
                let face = fastrand::usize(0..5);
                if face >= last_face.index() { face + 1 } else { face }
            }
        };
        let face = Face::ALL[face];
        scramble.push(Move::new(face, fastrand::u8(0..3)));
        last_face = Some(face);
    }
    scramble
}

#[cfg(test)]
mod tests {
    use super::*;
    use itertools::Itertools;

    const DEFS: &MoveDefs = &MoveDefs::CUBE3;

    #[test]
    fn test_move_index_decomposition() {
        for move_ in Move::ALL {
            assert_eq!(move_.face().index() * 3 + usize::from(move_.power()), move_.index());
            assert_eq!(Move::new(move_.face(), move_.power()), move_);
            assert_eq!(Move::from_index(move_.index()), Some(move_));
        }
        assert_eq!(Move::from_index(18), None);
        assert_eq!(Move::new(Face::R, 0).index(), 3);
        assert_eq!(Move::new(Face::R, 0).inverse().index(), 5);
        assert_eq!(Move::new(Face::U, 1).inverse(), Move::new(Face::U, 1));
    }

    #[test]
    fn test_opposite_faces() {
        assert_eq!(Face::F.opposite(), Face::B);
        assert_eq!(Face::R.opposite(), Face::L);
        assert_eq!(Face::U.opposite(), Face::D);
        for face in Face::ALL {
            assert_eq!(face.opposite().opposite(), face);
        }
    }

    #[test]
    fn test_move_defs_are_well_formed() {
        for face in 0..6 {
            let sources = DEFS.corner_sources[face].iter().copied().sorted().collect_vec();
            assert_eq!(sources, Orbit::Corners.identity());
            assert_eq!(DEFS.edge_cycles[face].iter().unique().count(), 4);
            // A quarter turn never changes the total corner twist
            assert_eq!(DEFS.corner_twists[face].iter().map(|&t| u32::from(t)).sum::<u32>() % 3, 0);
        }
    }

    #[test]
    fn test_inverse_restores_vectors() {
        let edge_identity = Orbit::Edges.identity();
        let corner_identity = Orbit::Corners.identity();
        for move_ in Move::ALL {
            let mut edges = edge_identity.clone();
            DEFS.apply_edge_permutation(&mut edges, move_);
            DEFS.apply_edge_permutation(&mut edges, move_.inverse());
            assert_eq!(edges, edge_identity);

            let mut edge_orientation = vec![0; 12];
            DEFS.apply_edge_orientation(&mut edge_orientation, move_);
            DEFS.apply_edge_orientation(&mut edge_orientation, move_.inverse());
            assert_eq!(edge_orientation, vec![0; 12]);

            let mut corners = corner_identity.clone();
            DEFS.apply_corner_permutation(&mut corners, move_);
            DEFS.apply_corner_permutation(&mut corners, move_.inverse());
            assert_eq!(corners, corner_identity);

            let mut corner_orientation = vec![0; 8];
            DEFS.apply_corner_orientation(&mut corner_orientation, move_);
            DEFS.apply_corner_orientation(&mut corner_orientation, move_.inverse());
            assert_eq!(corner_orientation, vec![0; 8]);
        }
    }

    #[test]
    fn test_four_quarter_turns_are_identity() {
        for face in Face::ALL {
            let move_ = Move::new(face, 0);
            let mut edges = Orbit::Edges.identity();
            let mut corner_orientation = vec![0, 1, 2, 0, 1, 2, 0, 0];
            let original_corner_orientation = corner_orientation.clone();
            for _ in 0..4 {
                DEFS.apply_edge_permutation(&mut edges, move_);
                DEFS.apply_corner_orientation(&mut corner_orientation, move_);
            }
            assert_eq!(edges, Orbit::Edges.identity());
            assert_eq!(corner_orientation, original_corner_orientation);
        }
    }

    #[test]
    fn test_only_f_and_b_quarter_turns_flip_edges() {
        for move_ in Move::ALL {
            let mut orientation = vec![0; 12];
            DEFS.apply_edge_orientation(&mut orientation, move_);
            let flipped = orientation.iter().filter(|&&o| o == 1).count();
            let expected = match (move_.face(), move_.power()) {
                (Face::F | Face::B, 0 | 2) => 4,
                _ => 0,
            };
            assert_eq!(flipped, expected, "{move_:?}");
        }
    }

    #[test]
    fn test_r_cycles_edges() {
        let mut edges = Orbit::Edges.identity();
        DEFS.apply_edge_permutation(&mut edges, Move::new(Face::R, 0));
        // UR -> BR -> DR -> FR -> UR
        assert_eq!(edges[11], 0);
        assert_eq!(edges[4], 11);
        assert_eq!(edges[8], 4);
        assert_eq!(edges[0], 8);
    }

    #[test]
    fn test_u_and_d_never_twist_corners() {
        for face in [Face::U, Face::D] {
            for power in 0..3 {
                let mut orientation = vec![0; 8];
                DEFS.apply_corner_orientation(&mut orientation, Move::new(face, power));
                assert_eq!(orientation, vec![0; 8]);
            }
        }
    }

    #[test]
    fn test_random_scramble_never_repeats_a_face() {
        for _ in 0..100 {
            let scramble = random_scramble(30);
            assert_eq!(scramble.len(), 30);
            assert!(scramble.iter().tuple_windows().all(|(a, b)| a.face() != b.face()));
        }
    }
}
