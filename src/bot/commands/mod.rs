//! Discord command implementations organized by category.

#![allow(clippy::too_long_first_doc_paragraph)]

/// Airline lookup and account linking commands
pub mod airline;

/// Alliance commands
pub mod alliance;

/// Chart comparison commands
pub mod compare;

/// General utility commands
pub mod general;

/// Dictionary, fact and QR commands
pub mod lookup;

/// Quiz commands
pub mod quiz;

// Export commands
pub use airline::*;
pub use alliance::*;
pub use compare::*;
pub use general::*;
pub use lookup::*;
pub use quiz::*;
