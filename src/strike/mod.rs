//! Strike tracking: maximal same-player runs along the board axes
//!
//! The [`StrikeSet`] backs both win detection and the AI's ranking. It is
//! updated incrementally on every mark and undo, so the search can afford a
//! full move + undo at every node.

pub mod axis;
pub mod strike_set;


pub use axis::{Axes, Axis, AXIS_COUNT};
pub use strike_set::{Strike, StrikeError, StrikeId, StrikeSet};
