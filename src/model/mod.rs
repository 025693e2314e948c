pub mod config;
pub mod music;
pub mod task;
pub mod workspace;

pub use config::*;
pub use music::*;
pub use task::*;
pub use workspace::*;
