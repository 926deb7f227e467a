use serde::Serialize;

use crate::error::ConfigError;

/// Parameters of one colony run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AcoParams {
    /// Number of ants, also the numerator of the initial pheromone level.
    pub ant_population: usize,
    pub iterations: usize,
    /// Weight of the pheromone trail in the selection rule.
    pub alpha: f64,
    /// Weight of the inverse distance in the selection rule.
    pub beta: f64,
    /// Evaporation rate in `[0, 1)`.
    pub rho: f64,
    /// Lower bound applied to every pheromone value after evaporation.
    pub min_pheromone: f64,
    pub seed: u64,
}

impl Default for AcoParams {
    fn default() -> Self {
        AcoParams {
            ant_population: 48,
            iterations: 200,
            alpha: 1.0,
            beta: 2.0,
            rho: 0.5,
            min_pheromone: 1e-12,
            seed: 0,
        }
    }
}

impl AcoParams {
    pub fn new(ant_population: usize, iterations: usize, alpha: f64, beta: f64, rho: f64) -> Self {
        AcoParams {
            ant_population,
            iterations,
            alpha,
            beta,
            rho,
            ..Default::default()
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_min_pheromone(mut self, min_pheromone: f64) -> Self {
        self.min_pheromone = min_pheromone;
        self
    }

    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    pub fn with_ant_population(mut self, ant_population: usize) -> Self {
        self.ant_population = ant_population;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.ant_population == 0 {
            return Err(ConfigError::NoAnts);
        }
        if self.iterations == 0 {
            return Err(ConfigError::NoIterations);
        }
        if !(self.alpha.is_finite() && self.alpha >= 0.0) {
            return Err(ConfigError::InvalidAlpha(self.alpha));
        }
        if !(self.beta.is_finite() && self.beta >= 0.0) {
            return Err(ConfigError::InvalidBeta(self.beta));
        }
        if !(self.rho >= 0.0 && self.rho < 1.0) {
            return Err(ConfigError::InvalidRho(self.rho));
        }
        if !(self.min_pheromone.is_finite() && self.min_pheromone > 0.0) {
            return Err(ConfigError::InvalidPheromoneFloor(self.min_pheromone));
        }
        Ok(())
    }
}

#[cfg(test)]
mod test_params {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert_eq!(AcoParams::default().validate(), Ok(()));
        assert_eq!(AcoParams::new(4, 10, 0.0, 0.0, 0.0).validate(), Ok(()));
    }

    #[test]
    fn test_rejected() {
        let p = AcoParams::default();
        assert_eq!(
            p.with_ant_population(0).validate(),
            Err(ConfigError::NoAnts)
        );
        assert_eq!(p.with_iterations(0).validate(), Err(ConfigError::NoIterations));
        assert_eq!(
            AcoParams { alpha: -1.0, ..p }.validate(),
            Err(ConfigError::InvalidAlpha(-1.0))
        );
        assert_eq!(
            AcoParams { beta: f64::INFINITY, ..p }.validate(),
            Err(ConfigError::InvalidBeta(f64::INFINITY))
        );
        assert_eq!(
            AcoParams { rho: 1.0, ..p }.validate(),
            Err(ConfigError::InvalidRho(1.0))
        );
        assert!(matches!(
            AcoParams { rho: f64::NAN, ..p }.validate(),
            Err(ConfigError::InvalidRho(_))
        ));
        assert_eq!(
            p.with_min_pheromone(0.0).validate(),
            Err(ConfigError::InvalidPheromoneFloor(0.0))
        );
    }
}
