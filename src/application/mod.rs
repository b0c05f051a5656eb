//! Application layer orchestrating the rental workflow.
//!
//! `RentalService` is the entry point. Clients quote through a
//! `ReservationSession` and confirm through the `ConfirmationCoordinator`;
//! `ManagerService` loads fleets and answers reporting queries.

pub mod coordinator;
pub mod manager;
pub mod quoting;
pub mod service;
pub mod session;
