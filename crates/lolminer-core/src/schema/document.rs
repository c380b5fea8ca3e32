//! lolMiner API document (`/` endpoint of the miner's HTTP API).
//!
//! Every field is optional on the wire: an absent or `null` field takes its
//! zero value so that older and newer miner builds decode the same way.

use serde::{Deserialize, Deserializer};

/// Treat `null` as the zero value instead of a type error.
fn nullable<'de, D, T>(de: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(de)?.unwrap_or_default())
}

/// Decoded upstream payload.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct MetricDocument {
    #[serde(rename = "Software", default, deserialize_with = "nullable")]
    pub software: String,
    #[serde(rename = "Session", default, deserialize_with = "nullable")]
    pub session: SessionInfo,
    #[serde(rename = "Num_Workers", default, deserialize_with = "nullable")]
    pub num_workers: u8,
    #[serde(rename = "Workers", default, deserialize_with = "nullable")]
    pub workers: Vec<WorkerRecord>,
    #[serde(rename = "Num_Algorithms", default, deserialize_with = "nullable")]
    pub num_algorithms: u8,
    #[serde(rename = "Algorithms", default, deserialize_with = "nullable")]
    pub algorithms: Vec<AlgorithmRecord>,
}

/// Mining session bookkeeping.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SessionInfo {
    /// Unix timestamp (seconds) of miner start.
    #[serde(rename = "Startup", default, deserialize_with = "nullable")]
    pub startup: u64,
    /// Human readable form of `startup`, used as a label.
    #[serde(rename = "StartupString", default, deserialize_with = "nullable")]
    pub startup_string: String,
    /// Seconds since start.
    #[serde(rename = "Uptime", default, deserialize_with = "nullable")]
    pub uptime: u64,
    /// Unix timestamp (seconds) of the last statistics refresh.
    #[serde(rename = "Last_Update", default, deserialize_with = "nullable")]
    pub last_update: u64,
}

/// One GPU.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct WorkerRecord {
    #[serde(rename = "Index", default, deserialize_with = "nullable")]
    pub index: u8,
    #[serde(rename = "Name", default, deserialize_with = "nullable")]
    pub name: String,
    /// Watts.
    #[serde(rename = "Power", default, deserialize_with = "nullable")]
    pub power: f64,
    /// Core clock (MHz).
    #[serde(rename = "CCLK", default, deserialize_with = "nullable")]
    pub core_clock: u32,
    /// Memory clock (MHz).
    #[serde(rename = "MCLK", default, deserialize_with = "nullable")]
    pub memory_clock: u32,
    #[serde(rename = "Core_Temp", default, deserialize_with = "nullable")]
    pub core_temp: i8,
    #[serde(rename = "Juc_Temp", default, deserialize_with = "nullable")]
    pub junction_temp: i8,
    #[serde(rename = "Mem_Temp", default, deserialize_with = "nullable")]
    pub memory_temp: i8,
    /// Percent. Usually 0..=100 but not guaranteed by the miner.
    #[serde(rename = "Fan_Speed", default, deserialize_with = "nullable")]
    pub fan_speed: u8,
    #[serde(rename = "PCIE_Address", default, deserialize_with = "nullable")]
    pub pcie_address: String,
}

/// One running algorithm and its share counters.
///
/// The `worker_*` sequences are parallel to `MetricDocument::workers`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct AlgorithmRecord {
    #[serde(rename = "Algorithm", default, deserialize_with = "nullable")]
    pub algorithm: String,
    #[serde(rename = "Algorithm_Appendix", default, deserialize_with = "nullable")]
    pub algorithm_appendix: String,
    #[serde(rename = "Pool", default, deserialize_with = "nullable")]
    pub pool: String,
    #[serde(rename = "User", default, deserialize_with = "nullable")]
    pub user: String,
    #[serde(rename = "Worker", default, deserialize_with = "nullable")]
    pub worker: String,
    #[serde(rename = "Performance_Unit", default, deserialize_with = "nullable")]
    pub performance_unit: String,
    #[serde(rename = "Performance_Factor", default, deserialize_with = "nullable")]
    pub performance_factor: i64,
    #[serde(rename = "Total_Accepted", default, deserialize_with = "nullable")]
    pub total_accepted: u64,
    #[serde(rename = "Total_Rejected", default, deserialize_with = "nullable")]
    pub total_rejected: u64,
    #[serde(rename = "Total_Stales", default, deserialize_with = "nullable")]
    pub total_stales: u64,
    #[serde(rename = "Total_Errors", default, deserialize_with = "nullable")]
    pub total_errors: u64,
    #[serde(rename = "Worker_Performances", default, deserialize_with = "nullable")]
    pub worker_performances: Vec<f64>,
    #[serde(rename = "Worker_Accepted", default, deserialize_with = "nullable")]
    pub worker_accepted: Vec<u64>,
    #[serde(rename = "Worker_Rejected", default, deserialize_with = "nullable")]
    pub worker_rejected: Vec<u64>,
    #[serde(rename = "Worker_Stales", default, deserialize_with = "nullable")]
    pub worker_stales: Vec<u64>,
    #[serde(rename = "Worker_Errors", default, deserialize_with = "nullable")]
    pub worker_errors: Vec<u64>,
}

impl AlgorithmRecord {
    /// Algorithm name with its variant suffix, e.g. `"Ethash"` or `"Autolykos2 ZIL"`.
    pub fn display_name(&self) -> String {
        if self.algorithm_appendix.is_empty() {
            self.algorithm.clone()
        } else {
            format!("{} {}", self.algorithm, self.algorithm_appendix)
        }
    }

    /// True when every per-worker sequence has exactly `workers` entries.
    pub fn per_worker_lengths_match(&self, workers: usize) -> bool {
        [
            self.worker_performances.len(),
            self.worker_accepted.len(),
            self.worker_rejected.len(),
            self.worker_stales.len(),
            self.worker_errors.len(),
        ]
        .iter()
        .all(|&len| len == workers)
    }
}
