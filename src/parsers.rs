use crate::models::{Algorithm, GraphicsCard, RigInfo, Worker};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::warn;

/// Extract rig-level fields from an `info` response.
///
/// A malformed response degrades to the default record rather than failing.
pub fn parse_rig_info(response: &Value) -> RigInfo {
    serde_json::from_value(response.clone()).unwrap_or_else(|e| {
        warn!("malformed info response: {e}");
        RigInfo::default()
    })
}

/// Parse a `devices.get` response into a map keyed by device identifier.
pub fn parse_devices(response: &Value) -> BTreeMap<u32, GraphicsCard> {
    parse_keyed_list(response, "devices", |card: &GraphicsCard| card.id)
}

/// Parse an `algorithm.list` response into a map keyed by algorithm identifier.
pub fn parse_algorithms(response: &Value) -> BTreeMap<u32, Algorithm> {
    parse_keyed_list(response, "algorithms", |algorithm: &Algorithm| algorithm.id)
}

/// Parse a `worker.list` response into a map keyed by worker identifier.
pub fn parse_workers(response: &Value) -> BTreeMap<u32, Worker> {
    parse_keyed_list(response, "workers", |worker: &Worker| worker.id)
}

/// Deserialize the list under `key` and key each entry by its identifier.
///
/// A missing or non-list `key` yields an empty map; entries that fail to
/// deserialize are skipped so one bad record cannot poison a snapshot.
fn parse_keyed_list<T, F>(response: &Value, key: &str, id_of: F) -> BTreeMap<u32, T>
where
    T: DeserializeOwned,
    F: Fn(&T) -> u32,
{
    let Some(entries) = response.get(key).and_then(Value::as_array) else {
        return BTreeMap::new();
    };
    entries
        .iter()
        .filter_map(|entry| match serde_json::from_value::<T>(entry.clone()) {
            Ok(item) => Some((id_of(&item), item)),
            Err(e) => {
                warn!("skipping malformed {key} entry: {e}");
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parse_devices_keys_by_identifier() {
        let response = json!({
            "id": 1,
            "error": null,
            "devices": [{"device_id": 3, "name": "GPU0"}]
        });
        let devices = parse_devices(&response);
        assert_eq!(devices.len(), 1);
        assert_eq!(devices[&3].id, 3);
        assert_eq!(devices[&3].name, "GPU0");
    }

    #[test]
    fn parse_devices_missing_list_yields_empty_map() {
        assert!(parse_devices(&json!({"id": 1, "error": null})).is_empty());
        assert!(parse_devices(&json!({"devices": "not a list"})).is_empty());
        assert!(parse_devices(&json!(null)).is_empty());
    }

    #[test]
    fn parse_algorithms_empty_list_yields_empty_map() {
        assert!(parse_algorithms(&json!({"algorithms": []})).is_empty());
        assert!(parse_algorithms(&json!({})).is_empty());
    }

    #[test]
    fn parse_algorithms_keys_by_identifier() {
        let response = json!({
            "algorithms": [
                {"algorithm_id": 20, "name": "daggerhashimoto", "speed": 0.0},
                {"algorithm_id": 33, "name": "kawpow", "speed": 12.5}
            ]
        });
        let algorithms = parse_algorithms(&response);
        assert_eq!(algorithms.len(), 2);
        assert_eq!(algorithms[&33].name, "kawpow");
    }

    #[test]
    fn parse_workers_rekeys_nested_algorithms() {
        let response = json!({
            "workers": [{
                "worker_id": 0,
                "device_id": 0,
                "device_uuid": "GPU-aa11",
                "algorithms": [{"algorithm_id": 20, "name": "daggerhashimoto"}]
            }]
        });
        let workers = parse_workers(&response);
        assert_eq!(workers.len(), 1);
        assert_eq!(workers[&0].algorithms[&20].name, "daggerhashimoto");
    }

    #[test]
    fn parse_workers_skips_malformed_entries() {
        let response = json!({
            "workers": [
                {"worker_id": 1, "device_id": 0},
                {"device_id": "no identifier at all"}
            ]
        });
        let workers = parse_workers(&response);
        assert_eq!(workers.len(), 1);
        assert!(workers.contains_key(&1));
    }

    #[test]
    fn parse_rig_info_extracts_fields() {
        let response = json!({
            "version": "1.7.5d",
            "build_platform": "windows",
            "build_number": 501,
            "uptime": 3600,
            "cpu_load": 2.5,
            "error": null
        });
        let info = parse_rig_info(&response);
        assert_eq!(info.version, "1.7.5d");
        assert_eq!(info.uptime, 3600);
        assert_eq!(info.build_number, 501);
    }

    #[test]
    fn parse_rig_info_degrades_to_default() {
        assert_eq!(parse_rig_info(&json!([1, 2, 3])), RigInfo::default());
    }
}
