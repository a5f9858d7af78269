//! Data types for the editable grid.

mod cell;
mod column;
mod options;
mod row;

pub use cell::*;
pub use column::*;
pub use options::*;
pub use row::*;
