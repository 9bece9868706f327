use color_eyre::eyre::{WrapErr, eyre};
use coord_solver::{
    goals::Goal,
    solver::{SolverConfig, SubgoalSolver},
};
use serde::Deserialize;
use std::{fs, path::Path};

/// A custom goal, in the `[[goal]]` tables of a goals file.
#[derive(Deserialize, Debug)]
#[serde(deny_unknown_fields)]
struct GoalConfig {
    name: String,
    edge_permutation: Option<Vec<u8>>,
    edge_orientation: Option<Vec<u8>>,
    corner_permutation: Option<Vec<u8>>,
    corner_orientation: Option<Vec<u8>>,
    max_solution_length: Option<usize>,
}

#[derive(Deserialize, Debug)]
#[serde(deny_unknown_fields)]
struct GoalsFile {
    goal: Vec<GoalConfig>,
}

/// A solver together with the name its solutions are printed under.
pub struct NamedSolver {
    pub name: String,
    pub solver: SubgoalSolver,
}

impl GoalConfig {
    fn into_solver_config(self) -> color_eyre::Result<SolverConfig> {
        let mut config = SolverConfig::new();
        if let Some(pieces) = &self.edge_permutation {
            config = config.with_edge_permutation(pieces)?;
        }
        if let Some(slots) = &self.edge_orientation {
            config = config.with_edge_orientation(slots)?;
        }
        if let Some(pieces) = &self.corner_permutation {
            config = config.with_corner_permutation(pieces)?;
        }
        if let Some(slots) = &self.corner_orientation {
            config = config.with_corner_orientation(slots)?;
        }
        if let Some(max_solution_length) = self.max_solution_length {
            config = config.with_max_solution_length(max_solution_length);
        }
        Ok(config)
    }
}

/// Every built in goal, in the order they are printed.
pub fn presets() -> Vec<NamedSolver> {
    Goal::ALL
        .into_iter()
        .map(|goal| NamedSolver {
            name: goal.name().to_owned(),
            solver: SubgoalSolver::new(goal.config()),
        })
        .collect()
}

pub fn load(path: &Path) -> color_eyre::Result<Vec<NamedSolver>> {
    let text = fs::read_to_string(path)
        .wrap_err_with(|| format!("Failed to read the goals file {}", path.display()))?;
    parse(&text).wrap_err_with(|| format!("Invalid goals file {}", path.display()))
}

fn parse(text: &str) -> color_eyre::Result<Vec<NamedSolver>> {
    let goals_file = toml::from_str::<GoalsFile>(text)?;
    if goals_file.goal.is_empty() {
        return Err(eyre!("The goals file does not define any goal"));
    }
    goals_file
        .goal
        .into_iter()
        .map(|goal| {
            let name = goal.name.clone();
            let config = goal
                .into_solver_config()
                .wrap_err_with(|| format!("Goal `{name}`"))?;
            Ok(NamedSolver {
                name,
                solver: SubgoalSolver::new(config),
            })
        })
        .collect()
}
