use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

/// Rig-level attributes from the `info` command
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RigInfo {
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub build_platform: String,
    #[serde(default)]
    pub build_number: i64,
    #[serde(default)]
    pub uptime: u64,
    #[serde(default)]
    pub cpu_load: f64,
}

/// A compute device recognized by the daemon.
///
/// Older daemon revisions report the identifier as `id`, newer ones as
/// `device_id`; both are accepted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphicsCard {
    #[serde(alias = "device_id")]
    pub id: u32,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub uuid: String,
    #[serde(default)]
    pub subvendor: String,
    #[serde(default)]
    pub gpgpu_type: i64,
}

/// A mining algorithm known to the daemon
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Algorithm {
    #[serde(alias = "algorithm_id")]
    pub id: u32,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub speed: f64,
}

/// A running algorithm instance bound to a device.
///
/// The wire format carries the nested algorithms as a list; it is re-keyed
/// by algorithm identifier on deserialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Worker {
    #[serde(alias = "worker_id")]
    pub id: u32,
    #[serde(default)]
    pub device_id: u32,
    #[serde(default)]
    pub device_uuid: String,
    #[serde(default, deserialize_with = "algorithm_list")]
    pub algorithms: BTreeMap<u32, WorkerAlgorithm>,
}

/// An algorithm entry inside a worker, with its performance counter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkerAlgorithm {
    #[serde(alias = "algorithm_id")]
    pub id: u32,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub speed: f64,
}

fn algorithm_list<'de, D>(deserializer: D) -> Result<BTreeMap<u32, WorkerAlgorithm>, D::Error>
where
    D: Deserializer<'de>,
{
    let entries = Vec::<WorkerAlgorithm>::deserialize(deserializer)?;
    Ok(entries.into_iter().map(|a| (a.id, a)).collect())
}
