use crate::config::RigConfig;
use crate::error::ApiError;
use crate::excavator_api::{ApiCommand, ExcavatorApi};
use crate::models::{Algorithm, GraphicsCard, RigInfo, Worker};
use crate::parsers;
use std::collections::BTreeMap;
use std::sync::RwLock;
use tracing::warn;

/// The cached collections as of the last successful refresh
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub rig_info: Option<RigInfo>,
    pub devices: BTreeMap<u32, GraphicsCard>,
    pub algorithms: BTreeMap<u32, Algorithm>,
    pub workers: BTreeMap<u32, Worker>,
}

/// Aggregation layer over one Excavator daemon.
///
/// Polls the four get-commands, retains the last good result per collection,
/// and exposes the worker/algorithm mutations. Collections start empty and
/// are replaced wholesale per refresh; a failed sub-request keeps that
/// collection's previous value so consumers see stale-but-present data
/// during outages.
pub struct MiningRig {
    api: ExcavatorApi,
    snapshot: RwLock<Snapshot>,
    refresh_guard: tokio::sync::Mutex<()>,
}

impl MiningRig {
    pub fn new(config: &RigConfig) -> Self {
        Self {
            api: ExcavatorApi::new(config),
            snapshot: RwLock::new(Snapshot::default()),
            refresh_guard: tokio::sync::Mutex::new(()),
        }
    }

    /// Re-poll the daemon and swap the cached collections.
    ///
    /// The four get-commands are issued independently; results are buffered
    /// and applied under a single write lock, so observers never see a torn
    /// snapshot. Concurrent callers queue on the refresh guard. Returns an
    /// error only when every sub-request failed.
    pub async fn refresh(&self) -> Result<(), ApiError> {
        let _guard = self.refresh_guard.lock().await;

        let mut errors = Vec::new();
        let mut failed = |label: &str, e: ApiError| {
            warn!("{label} request failed: {e}");
            errors.push(e);
        };

        let rig_info = match self.api.request(&ApiCommand::info()).await {
            Ok(response) => Some(parsers::parse_rig_info(&response)),
            Err(e) => {
                failed("info", e);
                None
            }
        };
        let devices = match self.api.request(&ApiCommand::devices_get()).await {
            Ok(response) => Some(parsers::parse_devices(&response)),
            Err(e) => {
                failed("devices.get", e);
                None
            }
        };
        let algorithms = match self.api.request(&ApiCommand::algorithm_list()).await {
            Ok(response) => Some(parsers::parse_algorithms(&response)),
            Err(e) => {
                failed("algorithm.list", e);
                None
            }
        };
        let workers = match self.api.request(&ApiCommand::worker_list()).await {
            Ok(response) => Some(parsers::parse_workers(&response)),
            Err(e) => {
                failed("worker.list", e);
                None
            }
        };

        if errors.len() == 4 {
            return Err(errors.remove(0));
        }

        let mut snapshot = self.snapshot.write().expect("snapshot lock poisoned");
        if let Some(rig_info) = rig_info {
            snapshot.rig_info = Some(rig_info);
        }
        if let Some(devices) = devices {
            snapshot.devices = devices;
        }
        if let Some(algorithms) = algorithms {
            snapshot.algorithms = algorithms;
        }
        if let Some(workers) = workers {
            snapshot.workers = workers;
        }
        Ok(())
    }

    /// Bind an algorithm to a device/worker slot. Call [`refresh`] afterward
    /// to observe the effect.
    ///
    /// [`refresh`]: MiningRig::refresh
    pub async fn add_algorithm_to_device(
        &self,
        algorithm: &str,
        target_id: u32,
    ) -> Result<(), ApiError> {
        self.api
            .request(&ApiCommand::worker_add(algorithm, target_id))
            .await
            .map(|_| ())
    }

    /// Free a running worker. Call [`refresh`] afterward to observe the effect.
    ///
    /// [`refresh`]: MiningRig::refresh
    pub async fn free_worker(&self, worker_id: u32) -> Result<(), ApiError> {
        self.api
            .request(&ApiCommand::worker_free(worker_id))
            .await
            .map(|_| ())
    }

    /// Register an algorithm at rig scope. Newer daemons auto-register on
    /// `worker.add`, so this is only needed as a fallback.
    pub async fn add_algorithm(&self, algorithm: &str) -> Result<(), ApiError> {
        self.api
            .request(&ApiCommand::algorithm_add(algorithm))
            .await
            .map(|_| ())
    }

    /// One-shot reachability probe for setup flows. Response content is ignored.
    pub async fn test_connection(&self) -> bool {
        self.api.request(&ApiCommand::info()).await.is_ok()
    }

    pub fn update_auth_token(&self, token: &str) {
        self.api.update_auth_token(token);
    }

    pub fn rig_info(&self) -> Option<RigInfo> {
        self.read().rig_info.clone()
    }

    pub fn devices(&self) -> BTreeMap<u32, GraphicsCard> {
        self.read().devices.clone()
    }

    pub fn algorithms(&self) -> BTreeMap<u32, Algorithm> {
        self.read().algorithms.clone()
    }

    pub fn workers(&self) -> BTreeMap<u32, Worker> {
        self.read().workers.clone()
    }

    pub fn snapshot(&self) -> Snapshot {
        self.read().clone()
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, Snapshot> {
        self.snapshot.read().expect("snapshot lock poisoned")
    }
}
