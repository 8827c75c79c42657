//! Site-map and proximity-narration engine for the talking trail.
//!
//! Platform-free: the web and native frontends own the sensor, the speech
//! engine and the map surface, and carry out the [`Effect`]s pushed here.

pub mod catalog;
pub mod config;
pub mod constants;
pub mod effect;
pub mod engine;
pub mod error;
pub mod geo;
pub mod narration;
pub mod proximity;
pub mod sampler;
pub mod status;
pub mod surface;
pub mod viewport;

pub use catalog::*;
pub use config::*;
pub use effect::*;
pub use engine::*;
pub use error::*;
pub use geo::*;
pub use narration::*;
pub use proximity::*;
pub use sampler::*;
pub use status::*;
pub use surface::*;
pub use viewport::*;
