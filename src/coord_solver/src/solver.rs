use crate::{
    coordinate::{AffectedPieces, CoordinateError, Orbit},
    cube::{Face, Move, MoveDefs},
    move_table::{MoveTable, shared_move_table},
    notation::{NotationError, format_moves, parse_moves},
    pruning::{PruningTable, PruningTableError},
    space::{CoordinateSpace, CoordinateSpaceImpl, OrientationSpace, PermutationSpace},
    start, success, working,
};
use log::{Level, debug, info, log_enabled};
use std::{
    sync::{Arc, OnceLock},
    time::Instant,
};
use thiserror::Error;

/// Every position of the cube can be solved in 20 face turns.
pub const GODS_NUMBER: usize = 20;

/// Edge orientation, edge permutation, corner orientation and corner
/// permutation.
const MAX_COORDINATES: usize = 4;

/// Which pieces a solver has to bring home. Each of the four coordinates is
/// only tracked when its set of affected pieces is given.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolverConfig {
    pub(crate) edge_orientation: Option<AffectedPieces>,
    pub(crate) edge_permutation: Option<AffectedPieces>,
    pub(crate) corner_orientation: Option<AffectedPieces>,
    pub(crate) corner_permutation: Option<AffectedPieces>,
    pub(crate) max_solution_length: usize,
    pub(crate) move_defs: &'static MoveDefs,
}

#[derive(Error, Debug)]
pub enum SolverError {
    #[error("No solution of at most {max_solution_length} moves exists")]
    MaxSolutionLengthExceeded { max_solution_length: usize },
    #[error("Invalid scramble: {0}")]
    Notation(#[from] NotationError),
    #[error("Invalid goal: {0}")]
    Coordinate(#[from] CoordinateError),
    #[error("Could not generate a pruning table: {0}")]
    PruningTable(#[from] PruningTableError),
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            edge_orientation: None,
            edge_permutation: None,
            corner_orientation: None,
            corner_permutation: None,
            max_solution_length: GODS_NUMBER,
            move_defs: &MoveDefs::CUBE3,
        }
    }
}

impl SolverConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Require the given edges to be in their home slots.
    ///
    /// # Errors
    ///
    /// If `pieces` is not a valid set of edges. See `CoordinateError`.
    pub fn with_edge_permutation(mut self, pieces: &[u8]) -> Result<Self, CoordinateError> {
        self.edge_permutation = Some(AffectedPieces::new(Orbit::Edges, pieces)?);
        Ok(self)
    }

    /// Require the edges in the given slots to be oriented.
    ///
    /// # Errors
    ///
    /// If `slots` is not a valid set of edge slots. See `CoordinateError`.
    pub fn with_edge_orientation(mut self, slots: &[u8]) -> Result<Self, CoordinateError> {
        self.edge_orientation = Some(AffectedPieces::new(Orbit::Edges, slots)?);
        Ok(self)
    }

    /// Require the given corners to be in their home slots.
    ///
    /// # Errors
    ///
    /// If `pieces` is not a valid set of corners. See `CoordinateError`.
    pub fn with_corner_permutation(mut self, pieces: &[u8]) -> Result<Self, CoordinateError> {
        self.corner_permutation = Some(AffectedPieces::new(Orbit::Corners, pieces)?);
        Ok(self)
    }

    /// Require the corners in the given slots to be oriented.
    ///
    /// # Errors
    ///
    /// If `slots` is not a valid set of corner slots. See `CoordinateError`.
    pub fn with_corner_orientation(mut self, slots: &[u8]) -> Result<Self, CoordinateError> {
        self.corner_orientation = Some(AffectedPieces::new(Orbit::Corners, slots)?);
        Ok(self)
    }

    #[must_use]
    pub fn with_max_solution_length(mut self, max_solution_length: usize) -> Self {
        self.max_solution_length = max_solution_length;
        self
    }

    #[must_use]
    pub fn with_move_defs(mut self, move_defs: &'static MoveDefs) -> Self {
        self.move_defs = move_defs;
        self
    }

    #[must_use]
    pub fn max_solution_length(&self) -> usize {
        self.max_solution_length
    }

    /// The coordinate spaces this configuration tracks, in the order edge
    /// orientation, edge permutation, corner orientation, corner permutation.
    #[must_use]
    pub fn coordinate_spaces(&self) -> Vec<CoordinateSpaceImpl> {
        let mut spaces = vec![];
        if let Some(affected) = &self.edge_orientation {
            spaces.push(
                OrientationSpace::new(Orbit::Edges, Some(affected.clone()), self.move_defs).into(),
            );
        }
        if let Some(affected) = &self.edge_permutation {
            spaces.push(PermutationSpace::new(affected.clone(), self.move_defs).into());
        }
        if let Some(affected) = &self.corner_orientation {
            spaces.push(
                OrientationSpace::new(Orbit::Corners, Some(affected.clone()), self.move_defs)
                    .into(),
            );
        }
        if let Some(affected) = &self.corner_permutation {
            spaces.push(PermutationSpace::new(affected.clone(), self.move_defs).into());
        }
        spaces
    }
}

/// The tables of one tracked coordinate.
struct CoordinateTables {
    move_table: Arc<MoveTable>,
    pruning_table: PruningTable,
    solved_coordinate: u32,
}

/// One coordinate per tracked space. Entries past the number of tracked
/// spaces are unused.
type SearchState = [u32; MAX_COORDINATES];

struct SearchTables {
    coordinates: Vec<CoordinateTables>,
}

struct SubgoalSolverMutable {
    solution: Vec<Move>,
    nodes_visited: u64,
}

impl SearchTables {
    fn generate(config: &SolverConfig) -> Result<Self, PruningTableError> {
        info!(start!("Generating solver tables"));
        let start = Instant::now();

        let coordinates = config
            .coordinate_spaces()
            .into_iter()
            .map(|space| {
                let move_table = shared_move_table(&space);
                let pruning_table =
                    PruningTable::generate(&move_table, space.goal_coordinates())?;
                Ok(CoordinateTables {
                    move_table,
                    pruning_table,
                    solved_coordinate: space.solved_coordinate(),
                })
            })
            .collect::<Result<Vec<_>, PruningTableError>>()?;

        info!(
            success!("Generated solver tables in {:.3}s"),
            start.elapsed().as_secs_f64()
        );
        Ok(Self { coordinates })
    }

    fn apply_scramble(&self, scramble: &[Move]) -> SearchState {
        let mut state = [0; MAX_COORDINATES];
        for (coordinate, tables) in state.iter_mut().zip(&self.coordinates) {
            *coordinate = scramble.iter().fold(tables.solved_coordinate, |c, &move_| {
                tables.move_table.make_move(c, move_)
            });
        }
        state
    }

    fn make_move(&self, state: &SearchState, move_: Move) -> SearchState {
        let mut next = *state;
        for (coordinate, tables) in next.iter_mut().zip(&self.coordinates) {
            *coordinate = tables.move_table.make_move(*coordinate, move_);
        }
        next
    }

    /// The largest pruning value over all tracked coordinates. Each one is a
    /// lower bound on its own, so the maximum is too.
    fn admissible_heuristic(&self, state: &SearchState) -> u8 {
        state
            .iter()
            .zip(&self.coordinates)
            .map(|(&coordinate, tables)| tables.pruning_table.admissible_heuristic(coordinate))
            .max()
            .unwrap_or(0)
    }

    fn is_goal(&self, state: &SearchState) -> bool {
        state
            .iter()
            .zip(&self.coordinates)
            .all(|(&coordinate, tables)| tables.pruning_table.is_goal(coordinate))
    }

    /// Depth first search for a sequence of exactly `permitted_cost` moves that
    /// reaches the goal. On success the moves are appended to
    /// `mutable.solution` deepest first.
    fn search_for_solution(
        &self,
        mutable: &mut SubgoalSolverMutable,
        state: &SearchState,
        permitted_cost: usize,
        last_face: Option<Face>,
    ) -> bool {
        if log_enabled!(Level::Debug) {
            mutable.nodes_visited += 1;
        }

        if permitted_cost == 0 {
            return self.is_goal(state);
        }

        if usize::from(self.admissible_heuristic(state)) > permitted_cost {
            return false;
        }

        for move_ in Move::ALL {
            if last_face.is_some_and(|last_face| is_redundant_after(last_face, move_.face())) {
                continue;
            }

            let next_state = self.make_move(state, move_);
            if self.search_for_solution(mutable, &next_state, permitted_cost - 1, Some(move_.face()))
            {
                mutable.solution.push(move_);
                return true;
            }
        }
        false
    }
}

/// Turning the same face twice in a row can always be merged into one move,
/// and opposite faces commute, so only one of their two orders is searched:
/// `B` may follow `F` but not the other way around.
fn is_redundant_after(last_face: Face, face: Face) -> bool {
    face == last_face || face.index() + 3 == last_face.index()
}

/// An IDA* solver for one sub-goal of the cube, such as the cross or the
/// edge orientation. Its tables are generated once, on first use.
pub struct SubgoalSolver {
    config: SolverConfig,
    tables: OnceLock<SearchTables>,
}

impl SubgoalSolver {
    #[must_use]
    pub fn new(config: SolverConfig) -> Self {
        Self {
            config,
            tables: OnceLock::new(),
        }
    }

    #[must_use]
    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Generate the move and pruning tables now instead of on the first
    /// solve.
    ///
    /// # Errors
    ///
    /// If a pruning table cannot be generated.
    pub fn initialize(&self) -> Result<(), SolverError> {
        self.tables().map(|_| ())
    }

    /// Whether the tables have been generated.
    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.tables.get().is_some()
    }

    fn tables(&self) -> Result<&SearchTables, SolverError> {
        if let Some(tables) = self.tables.get() {
            return Ok(tables);
        }
        let tables = SearchTables::generate(&self.config)?;
        Ok(self.tables.get_or_init(|| tables))
    }

    /// The number of moves the solution to `scramble` needs at the very
    /// least, according to the pruning tables.
    ///
    /// # Errors
    ///
    /// If the tables cannot be generated.
    pub fn lower_bound(&self, scramble: &[Move]) -> Result<u8, SolverError> {
        let tables = self.tables()?;
        Ok(tables.admissible_heuristic(&tables.apply_scramble(scramble)))
    }

    /// Whether applying `solution` after `scramble` reaches the goal.
    ///
    /// # Errors
    ///
    /// If the tables cannot be generated.
    pub fn is_solved_after(&self, scramble: &[Move], solution: &[Move]) -> Result<bool, SolverError> {
        let tables = self.tables()?;
        let state = solution
            .iter()
            .fold(tables.apply_scramble(scramble), |state, &move_| {
                tables.make_move(&state, move_)
            });
        Ok(tables.is_goal(&state))
    }

    /// Find a shortest move sequence that brings the cube scrambled by
    /// `scramble` to the goal, using [iterative deepening A*][IDA]. Each
    /// iteration searches all sequences of exactly the current depth, pruned
    /// by the tables, and the first sequence found wins.
    ///
    /// [IDA]: https://en.wikipedia.org/wiki/Iterative_deepening_A*
    ///
    /// # Errors
    ///
    /// If the tables cannot be generated, or no solution of at most the
    /// configured maximum length exists.
    pub fn solve(&self, scramble: &[Move]) -> Result<Vec<Move>, SolverError> {
        let tables = self.tables()?;
        info!(start!("Searching for a solution"));
        let start = Instant::now();

        let state = tables.apply_scramble(scramble);
        let mut mutable = SubgoalSolverMutable {
            solution: vec![],
            nodes_visited: 0,
        };

        // Every depth below the heuristic of the start state would be cut at
        // the root
        let mut depth = usize::from(tables.admissible_heuristic(&state));
        loop {
            if depth > self.config.max_solution_length {
                return Err(SolverError::MaxSolutionLengthExceeded {
                    max_solution_length: self.config.max_solution_length,
                });
            }

            debug!(working!("Searching depth {}..."), depth);
            let depth_start = Instant::now();
            let found = tables.search_for_solution(&mut mutable, &state, depth, None);
            debug!(
                working!("Traversed {} nodes in {:.3}s"),
                mutable.nodes_visited,
                depth_start.elapsed().as_secs_f64()
            );
            if found {
                break;
            }
            mutable.nodes_visited = 0;
            depth += 1;
        }

        mutable.solution.reverse();
        info!(
            success!("Solution found in {:.3}s at depth {}"),
            start.elapsed().as_secs_f64(),
            depth
        );
        Ok(mutable.solution)
    }

    /// Solve a scramble written in standard notation and return the solution
    /// in the same notation.
    ///
    /// # Errors
    ///
    /// If the scramble cannot be parsed, or see `solve`.
    pub fn solve_str(&self, scramble: &str) -> Result<String, SolverError> {
        let scramble = parse_moves(scramble)?;
        Ok(format_moves(&self.solve(&scramble)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redundancy_rule() {
        for face in Face::ALL {
            assert!(is_redundant_after(face, face));
        }
        assert!(is_redundant_after(Face::B, Face::F));
        assert!(is_redundant_after(Face::L, Face::R));
        assert!(is_redundant_after(Face::D, Face::U));
        assert!(!is_redundant_after(Face::F, Face::B));
        assert!(!is_redundant_after(Face::R, Face::L));
        assert!(!is_redundant_after(Face::U, Face::D));
        assert!(!is_redundant_after(Face::R, Face::U));
    }

    #[test]
    fn test_config_spaces_order() {
        let config = SolverConfig::new()
            .with_corner_permutation(&[4])
            .unwrap()
            .with_edge_permutation(&[4, 5])
            .unwrap()
            .with_edge_orientation(&[4])
            .unwrap();
        let labels = config
            .coordinate_spaces()
            .iter()
            .map(CoordinateSpace::label)
            .collect::<Vec<_>>();
        assert_eq!(
            labels,
            vec![
                "edge orientation of [4]",
                "edge permutation of [4, 5]",
                "corner permutation of [4]"
            ]
        );
    }

    #[test]
    fn test_config_errors() {
        assert!(matches!(
            SolverConfig::new().with_corner_orientation(&[9]),
            Err(CoordinateError::PieceOutOfRange { piece: 9, .. })
        ));
        assert!(matches!(
            SolverConfig::new().with_edge_permutation(&[]),
            Err(CoordinateError::NoAffectedPieces)
        ));
    }

    #[test_log::test]
    fn test_nothing_to_solve() {
        let solver = SubgoalSolver::new(SolverConfig::new());
        let scramble = parse_moves("R U F").unwrap();
        assert_eq!(solver.solve(&scramble).unwrap(), vec![]);
    }

    #[test_log::test]
    fn test_tables_are_generated_once_needed() {
        let solver = SubgoalSolver::new(SolverConfig::new().with_edge_permutation(&[2]).unwrap());
        assert!(!solver.is_initialized());
        solver.initialize().unwrap();
        assert!(solver.is_initialized());

        let lazy = SubgoalSolver::new(SolverConfig::new().with_edge_permutation(&[2]).unwrap());
        assert_eq!(lazy.solve_str("U").unwrap(), "U'");
        assert!(lazy.is_initialized());
    }
}
