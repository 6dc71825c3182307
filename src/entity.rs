use crate::error::ApiError;
use crate::mining_rig::MiningRig;
use std::sync::Arc;

/// Option label shown when a device runs no algorithm
pub const NO_ALGORITHM: &str = "None";

/// Anything that can pull fresh state from the daemon
#[allow(async_fn_in_trait)]
pub trait Refreshable {
    async fn refresh(&self) -> Result<(), ApiError>;
}

impl Refreshable for MiningRig {
    async fn refresh(&self) -> Result<(), ApiError> {
        MiningRig::refresh(self).await
    }
}

/// A presentation entity offering a pick-one-of-N choice
#[allow(async_fn_in_trait)]
pub trait Selectable {
    fn options(&self) -> Vec<String>;
    fn current_option(&self) -> String;
    async fn select(&self, option: &str) -> Result<(), ApiError>;
}

/// Per-device algorithm picker built on the aggregator's snapshot.
///
/// Plain data holder, no host-framework base type; the hosting platform
/// wires it up through [`Selectable`] and drives polling externally.
pub struct AlgorithmSelector {
    rig: Arc<MiningRig>,
    device_id: u32,
}

impl AlgorithmSelector {
    pub fn new(rig: Arc<MiningRig>, device_id: u32) -> Self {
        Self { rig, device_id }
    }

    pub fn device_id(&self) -> u32 {
        self.device_id
    }

    fn active_worker_id(&self) -> Option<u32> {
        self.rig
            .workers()
            .values()
            .find(|worker| worker.device_id == self.device_id)
            .map(|worker| worker.id)
    }
}

impl Selectable for AlgorithmSelector {
    fn options(&self) -> Vec<String> {
        let mut options = vec![NO_ALGORITHM.to_string()];
        options.extend(
            self.rig
                .algorithms()
                .values()
                .map(|algorithm| algorithm.name.clone()),
        );
        options
    }

    fn current_option(&self) -> String {
        self.rig
            .workers()
            .values()
            .find(|worker| worker.device_id == self.device_id)
            .and_then(|worker| worker.algorithms.values().next())
            .map(|algorithm| algorithm.name.clone())
            .unwrap_or_else(|| NO_ALGORITHM.to_string())
    }

    async fn select(&self, option: &str) -> Result<(), ApiError> {
        if option == NO_ALGORITHM {
            if let Some(worker_id) = self.active_worker_id() {
                self.rig.free_worker(worker_id).await?;
                self.rig.refresh().await?;
            }
            return Ok(());
        }

        self.rig.add_algorithm_to_device(option, self.device_id).await?;
        self.rig.refresh().await?;

        // Older daemons need an explicit rig-scope registration when the
        // name is still unknown after the add.
        let known = self
            .rig
            .algorithms()
            .values()
            .any(|algorithm| algorithm.name == option);
        if !known {
            self.rig.add_algorithm(option).await?;
        }
        Ok(())
    }
}
