//! Simulated annealing for the N-queens problem.

use std::fmt;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info};

/// Configuration for an annealing run.
#[derive(Debug, Clone, PartialEq)]
pub struct AnnealingConfig {
    pub initial_temp: f64,
    /// Factor applied to the temperature after every step, in (0, 1).
    pub cooling_rate: f64,
    pub stopping_temp: f64,
    /// Seed for the random generator (None draws one from the OS).
    pub seed: Option<u64>,
}

impl Default for AnnealingConfig {
    fn default() -> Self {
        AnnealingConfig {
            initial_temp: 100.0,
            cooling_rate: 0.95,
            stopping_temp: 1.0,
            seed: None,
        }
    }
}

impl AnnealingConfig {
    pub fn validate(&self, n: usize) -> Result<(), AnnealingError> {
        if n == 0 {
            return Err(AnnealingError::EmptyBoard);
        }
        let rate = self.cooling_rate;
        if rate.is_nan() || rate <= 0.0 || rate >= 1.0 {
            return Err(AnnealingError::CoolingRate(rate));
        }
        for temp in [self.initial_temp, self.stopping_temp] {
            if temp.is_nan() || temp <= 0.0 {
                return Err(AnnealingError::Temperature(temp));
            }
        }
        Ok(())
    }

    /// The random generator this configuration asks for.
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}

/// Invalid annealing parameters.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AnnealingError {
    #[error("board size must be at least 1")]
    EmptyBoard,
    #[error("cooling rate {0} is outside (0, 1)")]
    CoolingRate(f64),
    #[error("temperature {0} must be positive")]
    Temperature(f64),
}

/// Queen placement: `board.0[row]` is the column of the queen in `row`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Board(pub Vec<usize>);

impl Board {
    pub fn random<R: Rng>(n: usize, rng: &mut R) -> Self {
        Board((0..n).map(|_| rng.gen_range(0..n)).collect())
    }

    pub fn size(&self) -> usize {
        self.0.len()
    }

    /// Number of queen pairs sharing a column or a diagonal.
    pub fn cost(&self) -> usize {
        let cols = &self.0;
        let mut cost = 0;
        for i in 0..cols.len() {
            for j in i + 1..cols.len() {
                if cols[i] == cols[j] || cols[i].abs_diff(cols[j]) == j - i {
                    cost += 1;
                }
            }
        }
        cost
    }

    /// Move one random queen to a random column (possibly its own).
    pub fn random_neighbor<R: Rng>(&self, rng: &mut R) -> Board {
        let n = self.size();
        let mut next = self.0.clone();
        if n > 0 {
            let row = rng.gen_range(0..n);
            next[row] = rng.gen_range(0..n);
        }
        Board(next)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let n = self.size();
        for &col in &self.0 {
            let row: Vec<&str> = (0..n).map(|j| if j == col { "Q" } else { "." }).collect();
            writeln!(f, "{}", row.join(" "))?;
        }
        Ok(())
    }
}

/// State after one annealing step.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnnealingStep {
    pub step: usize,
    pub temperature: f64,
    pub cost: usize,
    pub accepted: bool,
}

impl fmt::Display for AnnealingStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Step {}: Temp={:.3}, Cost={}",
            self.step, self.temperature, self.cost
        )
    }
}

/// Result of [`anneal`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnnealingOutcome {
    pub initial: Board,
    pub initial_cost: usize,
    pub board: Board,
    pub cost: usize,
    pub steps: Vec<AnnealingStep>,
}

impl AnnealingOutcome {
    pub fn solved(&self) -> bool {
        self.cost == 0
    }
}

/// Search for an N-queens placement by simulated annealing.
///
/// Runs while the temperature is above `stopping_temp` and queens still
/// attack each other. A worse neighbor is accepted with probability
/// `exp(-Δ/T)`.
pub fn anneal<R: Rng>(
    n: usize,
    config: &AnnealingConfig,
    rng: &mut R,
) -> Result<AnnealingOutcome, AnnealingError> {
    config.validate(n)?;

    let initial = Board::random(n, rng);
    let initial_cost = initial.cost();
    let mut board = initial.clone();
    let mut cost = initial_cost;
    let mut temperature = config.initial_temp;
    let mut steps = Vec::new();

    info!(n, initial_cost, "starting simulated annealing");

    while temperature > config.stopping_temp && cost > 0 {
        let neighbor = board.random_neighbor(rng);
        let neighbor_cost = neighbor.cost();
        let delta = neighbor_cost as f64 - cost as f64;

        let accepted = delta < 0.0 || rng.gen::<f64>() < (-delta / temperature).exp();
        if accepted {
            board = neighbor;
            cost = neighbor_cost;
        }

        let step = AnnealingStep {
            step: steps.len() + 1,
            temperature,
            cost,
            accepted,
        };
        debug!(step = step.step, temperature, cost, accepted, "annealing step");
        steps.push(step);
        temperature *= config.cooling_rate;
    }

    info!(steps = steps.len(), cost, "simulated annealing finished");

    Ok(AnnealingOutcome {
        initial,
        initial_cost,
        board,
        cost,
        steps,
    })
}
