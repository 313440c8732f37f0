//! Systems that read the grid each tick

pub mod scorer;

pub use scorer::{Happiness, NeighborhoodScorer, ScoreField};
