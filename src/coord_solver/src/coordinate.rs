//! Bijections between piece vectors and dense integer coordinates.
//!
//! Two families of coordinates exist. Orientation coordinates read the
//! orientation vector as a mixed radix number, dropping the last piece
//! because its orientation is forced by the others. Permutation coordinates
//! encode where a chosen subset of pieces sits, ignoring every other piece.

use crate::FACT_UNTIL_19;
use thiserror::Error;

/// Placeholder for a slot whose occupant is not tracked by a permutation
/// coordinate.
pub const UNTRACKED: u8 = u8::MAX;

/// A set of pieces of the same kind that moves permute among themselves.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Orbit {
    /// The 12 edges, each either flipped or not.
    Edges,
    /// The 8 corners, each with one of 3 twists.
    Corners,
}

impl Orbit {
    #[must_use]
    pub const fn piece_count(self) -> usize {
        match self {
            Orbit::Edges => 12,
            Orbit::Corners => 8,
        }
    }

    #[must_use]
    pub const fn orientation_count(self) -> u8 {
        match self {
            Orbit::Edges => 2,
            Orbit::Corners => 3,
        }
    }

    /// The number of orientation coordinates, `orientation_count ^
    /// (piece_count - 1)`.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn orientation_space_size(self) -> u32 {
        u32::from(self.orientation_count()).pow(self.piece_count() as u32 - 1)
    }

    /// The solved permutation vector, where every slot holds its own piece.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn identity(self) -> Vec<u8> {
        (0..self.piece_count() as u8).collect()
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum CoordinateError {
    #[error("The set of affected pieces must not be empty")]
    NoAffectedPieces,
    #[error("Piece {piece} does not exist, expected a value below {piece_count}")]
    PieceOutOfRange { piece: u8, piece_count: usize },
    #[error("Piece {0} is listed more than once")]
    DuplicatePiece(u8),
}

/// An ordered, duplicate free subset of the pieces of one orbit that a goal
/// constrains. Every other piece is "don't care".
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AffectedPieces {
    orbit: Orbit,
    pieces: Box<[u8]>,
}

impl AffectedPieces {
    /// Validate and create a set of affected pieces.
    ///
    /// # Errors
    ///
    /// If `pieces` is empty, contains a piece that does not exist in `orbit`,
    /// or contains the same piece twice.
    pub fn new(orbit: Orbit, pieces: &[u8]) -> Result<Self, CoordinateError> {
        if pieces.is_empty() {
            return Err(CoordinateError::NoAffectedPieces);
        }

        let mut seen = 0_u32;
        for &piece in pieces {
            if usize::from(piece) >= orbit.piece_count() {
                return Err(CoordinateError::PieceOutOfRange {
                    piece,
                    piece_count: orbit.piece_count(),
                });
            }
            if seen & (1 << piece) != 0 {
                return Err(CoordinateError::DuplicatePiece(piece));
            }
            seen |= 1 << piece;
        }

        Ok(Self {
            orbit,
            pieces: pieces.into(),
        })
    }

    /// Every piece of the orbit, in slot order.
    #[must_use]
    pub fn all(orbit: Orbit) -> Self {
        Self {
            orbit,
            pieces: orbit.identity().into_boxed_slice(),
        }
    }

    /// Create a set of affected pieces without validating it. Only used for
    /// the built in goal definitions.
    pub(crate) fn new_unchecked(orbit: Orbit, pieces: &[u8]) -> Self {
        debug_assert!(Self::new(orbit, pieces).is_ok());
        Self {
            orbit,
            pieces: pieces.into(),
        }
    }

    #[must_use]
    pub fn orbit(&self) -> Orbit {
        self.orbit
    }

    #[must_use]
    pub fn pieces(&self) -> &[u8] {
        &self.pieces
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.pieces.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }

    /// The number of permutation coordinates of these pieces.
    #[must_use]
    pub fn permutation_space_size(&self) -> u32 {
        permutation_space_size(self.orbit.piece_count(), self.len())
    }
}

/// `size! / (size - k)!`, the number of ways to place `k` distinguishable
/// pieces into `size` slots.
#[must_use]
pub fn permutation_space_size(size: usize, k: usize) -> u32 {
    debug_assert!(k <= size && size < FACT_UNTIL_19.len());
    u32::try_from(FACT_UNTIL_19[size] / FACT_UNTIL_19[size - k]).unwrap_or(u32::MAX)
}

/// Encode an orientation vector. The first `n - 1` entries are the digits of
/// a base `orientation_count` number, most significant first.
#[must_use]
pub fn orientation_to_index(orientation: &[u8], orientation_count: u8) -> u32 {
    let Some((_, digits)) = orientation.split_last() else {
        return 0;
    };
    digits.iter().fold(0, |index, &digit| {
        index * u32::from(orientation_count) + u32::from(digit)
    })
}

/// Decode an orientation coordinate. The last piece receives whatever
/// orientation makes the sum of all orientations divisible by
/// `orientation_count`.
#[must_use]
pub fn index_to_orientation(mut index: u32, piece_count: usize, orientation_count: u8) -> Vec<u8> {
    let mut orientation = vec![0; piece_count];
    if piece_count == 0 {
        return orientation;
    }

    let base = u32::from(orientation_count);
    let mut parity = 0_u32;
    for slot in (0..piece_count - 1).rev() {
        #[allow(clippy::cast_possible_truncation)]
        let digit = (index % base) as u8;
        orientation[slot] = digit;
        parity += u32::from(digit);
        index /= base;
    }
    #[allow(clippy::cast_possible_truncation)]
    let last = ((base - parity % base) % base) as u8;
    orientation[piece_count - 1] = last;

    orientation
}

/// Encode where the affected pieces sit in `permutation`.
///
/// Piece `i` of `affected` contributes one digit: its slot, minus the number
/// of slots taken by affected pieces after it that lie below it. The last
/// affected piece is the least significant digit with radix `n`, the one
/// before it has radix `n - 1`, and so on. The result lies in
/// `0..n! / (n - k)!`.
#[must_use]
pub fn permutation_to_index(permutation: &[u8], affected: &[u8]) -> u32 {
    let size = permutation.len();
    let mut slot_of = [UNTRACKED; 16];
    for (slot, &piece) in permutation.iter().enumerate() {
        if piece != UNTRACKED {
            #[allow(clippy::cast_possible_truncation)]
            let slot = slot as u8;
            slot_of[usize::from(piece)] = slot;
        }
    }

    match affected {
        [] => 0,
        // A lone piece is fully described by its slot
        &[piece] => u32::from(slot_of[usize::from(piece)]),
        _ => {
            let k = affected.len();
            let mut later_slots = 0_u16;
            let mut digits = [0_u8; 16];
            for (i, &piece) in affected.iter().enumerate().rev() {
                let slot = slot_of[usize::from(piece)];
                debug_assert!(usize::from(slot) < size, "Piece {piece} is not in the permutation");
                #[allow(clippy::cast_possible_truncation)]
                let smaller_later = (later_slots & ((1 << slot) - 1)).count_ones() as u8;
                digits[i] = slot - smaller_later;
                later_slots |= 1 << slot;
            }

            digits[..k]
                .iter()
                .enumerate()
                .fold(0, |index, (i, &digit)| {
                    #[allow(clippy::cast_possible_truncation)]
                    let radix = (size - (k - 1 - i)) as u32;
                    index * radix + u32::from(digit)
                })
        }
    }
}

/// Decode a permutation coordinate into a vector of length `size` in which
/// every affected piece is placed and every other slot is [`UNTRACKED`].
#[must_use]
pub fn index_to_permutation(mut index: u32, affected: &[u8], size: usize) -> Vec<u8> {
    let mut permutation = vec![UNTRACKED; size];

    match affected {
        [] => {}
        &[piece] => permutation[index as usize] = piece,
        _ => {
            let k = affected.len();
            let mut digits = [0_u32; 16];
            for (i, digit) in digits[..k].iter_mut().enumerate().rev() {
                #[allow(clippy::cast_possible_truncation)]
                let radix = (size - (k - 1 - i)) as u32;
                *digit = index % radix;
                index /= radix;
            }

            // Undo the digit normalization from the back: each digit counts
            // the free slots below the piece, skipping slots already claimed
            // by later pieces
            let mut later_slots = 0_u16;
            for (i, &piece) in affected.iter().enumerate().rev() {
                let slot = nth_free_slot(later_slots, digits[i]);
                permutation[slot] = piece;
                later_slots |= 1 << slot;
            }
        }
    }

    permutation
}

fn nth_free_slot(taken: u16, n: u32) -> usize {
    let mut remaining = n;
    let mut slot = 0;
    loop {
        if taken & (1 << slot) == 0 {
            if remaining == 0 {
                return slot;
            }
            remaining -= 1;
        }
        slot += 1;
    }
}
