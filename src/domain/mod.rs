//! Domain layer: the rental data model and the rules that act on a single
//! company's fleet, plus the ports the application layer depends on.

pub mod car;
pub mod car_type;
pub mod company;
pub mod fleet;
pub mod period;
pub mod ports;
pub mod quote;
pub mod reservation;
