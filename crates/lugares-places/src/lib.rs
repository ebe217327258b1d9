//! External collaborators of the places controller.
//!
//! Both the geolocation capability and the place directory sit behind traits
//! so the controller never knows whether it talks to a stub or a real backend.

pub mod error;
pub mod geolocation;
pub mod search;

pub use error::SearchError;
pub use geolocation::{GeolocationProvider, Geolocator, IpGeolocation, StaticGeolocation};
pub use search::{CatalogSearch, PlaceSearch};
