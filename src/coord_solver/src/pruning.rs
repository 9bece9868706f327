use crate::{move_table::MoveTable, start, success, working};
use log::{debug, info};
use std::time::Instant;
use thiserror::Error;

/// Nibble value of a coordinate that has not been reached yet.
const UNVISITED: u8 = 0xF;

/// An exact distance-to-goal table over a coordinate space, packed two
/// entries per byte. Even coordinates live in the low nibble and odd
/// coordinates in the high nibble.
#[derive(Debug)]
pub struct PruningTable {
    table: Box<[u8]>,
    len: u32,
    max_depth: u8,
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum PruningTableError {
    #[error("A pruning table needs at least one goal coordinate")]
    NoGoalCoordinates,
    #[error("Goal coordinate {coordinate} is out of range, expected a value below {len}")]
    GoalOutOfRange { coordinate: u32, len: u32 },
    #[error("The coordinate space is deeper than a pruning table nibble can represent")]
    DepthOverflow,
}

impl PruningTable {
    /// Build the table with a breadth first search from every goal coordinate
    /// at once. Each layer expands the coordinates found by the previous one,
    /// and the search stops as soon as a layer finds nothing new.
    ///
    /// Moves are invertible, so distances found walking away from the goals
    /// are exactly the distances to the goals.
    ///
    /// # Errors
    ///
    /// If there are no goal coordinates, a goal coordinate is out of range,
    /// or some coordinate lies 15 or more moves from every goal.
    pub fn generate(
        move_table: &MoveTable,
        goal_coordinates: impl IntoIterator<Item = u32>,
    ) -> Result<Self, PruningTableError> {
        let len = u32::try_from(move_table.len()).unwrap_or(u32::MAX);
        info!(start!("Generating a pruning table of {} entries"), len);
        let start = Instant::now();

        let mut pruning_table = Self {
            table: vec![0xFF; (len as usize).div_ceil(2)].into_boxed_slice(),
            len,
            max_depth: 0,
        };

        let mut visited = 0_usize;
        for coordinate in goal_coordinates {
            if coordinate >= len {
                return Err(PruningTableError::GoalOutOfRange { coordinate, len });
            }
            if pruning_table.get(coordinate) == UNVISITED {
                pruning_table.set(coordinate, 0);
                visited += 1;
            }
        }
        if visited == 0 {
            return Err(PruningTableError::NoGoalCoordinates);
        }
        debug!(working!("Depth 0: {} coordinates"), visited);

        let mut depth = 0;
        loop {
            let mut layer = 0_usize;
            for coordinate in 0..len {
                if pruning_table.get(coordinate) != depth {
                    continue;
                }
                for &next in move_table.row(coordinate) {
                    if pruning_table.get(next) == UNVISITED {
                        if depth + 1 == UNVISITED {
                            return Err(PruningTableError::DepthOverflow);
                        }
                        pruning_table.set(next, depth + 1);
                        layer += 1;
                    }
                }
            }
            if layer == 0 {
                break;
            }
            depth += 1;
            visited += layer;
            debug!(working!("Depth {}: {} coordinates"), depth, layer);
        }
        pruning_table.max_depth = depth;

        info!(
            success!("Generated pruning table in {:.3}s, {} of {} coordinates reachable within {} moves"),
            start.elapsed().as_secs_f64(),
            visited,
            len,
            depth
        );
        Ok(pruning_table)
    }

    fn get(&self, coordinate: u32) -> u8 {
        let byte = self.table[coordinate as usize / 2];
        if coordinate & 1 == 0 {
            byte & 0x0F
        } else {
            byte >> 4
        }
    }

    fn set(&mut self, coordinate: u32, value: u8) {
        debug_assert!(value <= UNVISITED);
        let byte = &mut self.table[coordinate as usize / 2];
        if coordinate & 1 == 0 {
            *byte = (*byte & 0xF0) | value;
        } else {
            *byte = (*byte & 0x0F) | (value << 4);
        }
    }

    /// A lower bound on the number of moves from `coordinate` to a goal
    /// coordinate. Since the table is exact the bound is tight.
    #[must_use]
    pub fn admissible_heuristic(&self, coordinate: u32) -> u8 {
        self.get(coordinate)
    }

    /// Whether `coordinate` is one of the goal coordinates.
    #[must_use]
    pub fn is_goal(&self, coordinate: u32) -> bool {
        self.get(coordinate) == 0
    }

    /// The largest distance in the table, the diameter of the space as seen
    /// from the goal set.
    #[must_use]
    pub fn max_depth(&self) -> u8 {
        self.max_depth
    }

    #[must_use]
    pub fn len(&self) -> u32 {
        self.len
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The size of the packed storage in bytes.
    #[must_use]
    pub fn storage_len(&self) -> usize {
        self.table.len()
    }
}
