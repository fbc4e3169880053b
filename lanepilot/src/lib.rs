//! # Lanepilot
//!
//! Evaluates an exported driving policy on a simulated multi-lane road and
//! reports the shaped reward it collects.
//!
//! ## The Crates
//!
//! -   **`lanepilot`:** The crate you are currently viewing. It owns the
//!     command line, the run configuration and the wiring between the other
//!     crates.
//! -   **[`road`]:** The driving environment: scenarios, waypoints and a
//!     kinematic vehicle on a straight road.
//! -   **[`ml`]:** Dense inference graphs, observation spaces and the on-disk
//!     artifact format policies are exported in.
//! -   **[`agent`]:** The evaluation bridge. Encodes observations, shapes
//!     rewards, decodes actions and drives the episode loop.
//!
//! ## Getting Started
//!
//! ```text
//! lanepilot init-model --out model/
//! lanepilot run --scenario scenario.json --model model/ --report report.json
//! ```
//!
//! [`app::run`] is the library form of the `run` subcommand, configured by a
//! [`config::RunConfig`].

pub mod app;
pub mod config;

pub use agent;
pub use ml;
pub use road;
