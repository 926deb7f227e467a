use thiserror::Error;

/// Errors raised while loading a node list.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LoadError {
    #[error("the node list is empty")]
    Empty,

    #[error("node ids must run from 1 without gaps: expected {expected}, found {found}")]
    UnexpectedId { expected: usize, found: usize },

    #[error("node {id} has a non-finite coordinate")]
    NonFiniteCoordinate { id: usize },

    #[error("all {nodes} nodes share the same coordinates, every tour has length zero")]
    Degenerate { nodes: usize },
}

/// Errors raised by parameter validation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("the ant population must be positive")]
    NoAnts,

    #[error("the number of iterations must be positive")]
    NoIterations,

    #[error("alpha must be a finite non-negative number, got {0}")]
    InvalidAlpha(f64),

    #[error("beta must be a finite non-negative number, got {0}")]
    InvalidBeta(f64),

    #[error("rho must lie in [0, 1), got {0}")]
    InvalidRho(f64),

    #[error("the pheromone floor must be a finite positive number, got {0}")]
    InvalidPheromoneFloor(f64),
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum AcoError {
    #[error("load error: {0}")]
    Load(#[from] LoadError),

    #[error("invalid parameters: {0}")]
    Config(#[from] ConfigError),
}

pub type AcoResult<T> = Result<T, AcoError>;
