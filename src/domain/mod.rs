//! Value objects and entities of a trip: who is in it, what was spent and
//! how it is split, and the transfers that settle it.

pub mod expense;
pub mod member;
pub mod money;
pub mod ports;
pub mod settlement;
