//! REST collaborators - the game API, the chart renderer and the lookup services.

/// Game API client
pub mod am4;
/// Chart rendering client
pub mod charts;
/// Dictionary, fact and QR lookups
pub mod lookup;
/// Game API response structures
pub mod models;

pub use am4::{Am4Client, GameApi};
pub use charts::ChartClient;
pub use lookup::LookupClient;
