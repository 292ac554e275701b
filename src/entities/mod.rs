mod bus;
mod coordinates;
mod stop;
mod transfer;

pub use bus::Bus;
pub use coordinates::Coordinates;
pub use stop::Stop;
pub use transfer::{Arrival, Transfer};
