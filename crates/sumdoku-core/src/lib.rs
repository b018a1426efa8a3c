pub mod assist;
pub mod board;
pub mod cage;
pub mod catalogue;
pub mod difficulty;
pub mod error;
pub mod puzzle;
pub mod session;
pub mod validation;

pub use assist::Scope;
pub use board::{Board, Cell, PuzzleGrid, SolutionGrid};
pub use cage::{Cage, CageSet};
pub use catalogue::{Catalogue, CatalogueEntry, CatalogueIssue};
pub use difficulty::Difficulty;
pub use error::EngineError;
pub use session::{CheckOutcome, Session, Variant};
