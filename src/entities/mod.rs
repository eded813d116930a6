mod location;
mod quote;
mod route;

pub use location::{Coordinates, GeoPoint};
pub use quote::Quote;
pub use route::{RouteSelection, Slot, Status};
