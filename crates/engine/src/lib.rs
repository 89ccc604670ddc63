//! Game controller and its collaborator contracts
//!
//! - [`controller`]: command handling, the timed loop, game-over bookkeeping
//! - [`clock`]: injectable time source
//! - [`render`]: the render collaborator trait
//! - [`high_scores`]: the capped high-score list and its stores
//! - [`config`]: environment configuration for the binary
//! - [`pacer`]: fixed-rate ticks for the host loop

pub mod clock;
pub mod config;
pub mod controller;
pub mod high_scores;
pub mod pacer;
pub mod render;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::GameConfig;
pub use controller::Controller;
pub use high_scores::{
    HighScoreEntry, HighScores, JsonFileStore, MemoryStore, ScoreStore, StoreError,
};
pub use pacer::FramePacer;
pub use render::Renderer;
