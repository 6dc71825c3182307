//! Client and aggregation layer for the NiceHash Excavator daemon.
//!
//! The daemon exposes a JSON-RPC-shaped API over HTTP GET
//! (`<host>:<port>/api?command=<json>`). [`ExcavatorApi`] is the transport,
//! [`MiningRig`] polls it and retains the last good snapshot, and
//! [`AlgorithmSelector`] is the composition-based entity seam a hosting
//! platform builds its presentation layer on.

mod config;
mod entity;
mod error;
mod excavator_api;
mod mining_rig;
mod models;
mod parsers;

pub use config::RigConfig;
pub use entity::{AlgorithmSelector, Refreshable, Selectable, NO_ALGORITHM};
pub use error::ApiError;
pub use excavator_api::{format_host_address, ApiCommand, ExcavatorApi};
pub use mining_rig::{MiningRig, Snapshot};
pub use models::{Algorithm, GraphicsCard, RigInfo, Worker, WorkerAlgorithm};
pub use parsers::{parse_algorithms, parse_devices, parse_rig_info, parse_workers};
