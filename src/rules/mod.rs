//! Game rules for connect-N
//!
//! A player wins by owning `strike_length` contiguous cells along any of the
//! four lattice axes. Longer runs win as well.

pub mod win;

// Re-exports for convenient access
pub use win::{completes_strike, winning_strike, VictoryChecker};
