//! Services
//!
//! The wizard core: catalogs, the profile store, the navigator state
//! machine, and the pure scoring and recommendation engines.

pub mod agents;
pub mod catalog;
pub mod navigator;
pub mod profile;
pub mod recommendation;
pub mod scoring;

pub use catalog::load_catalog;
pub use navigator::{Progress, WizardNavigator};
pub use profile::{toggled, ProfileStore};
pub use recommendation::recommend;
pub use scoring::{maturity_level, score};
