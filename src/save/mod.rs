//! Save and load of investor progress and market history.

pub mod game;
pub mod manager;

pub use game::{MacroPersistence, SaveGame};
pub use manager::SaveManager;
