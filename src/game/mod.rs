pub mod types;
pub mod board;
pub mod gravity;
pub mod random;
pub mod setup;
pub mod rules;
pub mod state;

pub use types::*;
pub use board::*;
pub use gravity::*;
pub use random::*;
pub use setup::*;
pub use rules::*;
pub use state::*;
