//! Application layer: the settlement calculation and the `TripLedger`
//! service that runs it over a stored trip.

pub mod engine;
pub mod ledger;
