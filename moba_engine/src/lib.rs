#![warn(clippy::pedantic)]
#![allow(clippy::must_use_candidate)]

pub const MOBA_VERSION: &str = env!("CARGO_PKG_VERSION");

// Core modules
pub mod character;
pub mod command;
pub mod data_paths;
pub mod groups;
pub mod health;
pub mod loader;
pub mod map;
pub mod repl;
pub mod session;
pub mod skill;
pub mod spinners;
pub mod style;
pub mod view;

// Re-exports for convenience
pub use character::{Character, CharacterId, Roster};
pub use command::{CommandStatus, Refusal, Verb};
pub use loader::{load_game, load_game_from};
pub use map::{MapGraph, NodeId};
pub use repl::run_repl;
pub use session::Session;
pub use view::{View, ViewItem};
