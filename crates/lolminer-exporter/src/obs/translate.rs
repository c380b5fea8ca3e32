//! MetricDocument -> series records.
//!
//! Registration order: exporter, software, algorithms, session, GPUs. With
//! `MetricNaming::Labeled` each quantity has one metric name and the array
//! position travels in a label; `MetricNaming::Indexed` keeps the historical
//! `<name>_<i>` wire format for existing dashboards.
//!
//! `gpu_index` is the device index reported by the miner and may repeat or be
//! absent; `gpu_position` is the array position and is what keeps GPU series
//! apart.

use prometheus::Registry;

use lolminer_core::error::Result;
use lolminer_core::schema::{AlgorithmRecord, MetricDocument, SessionInfo, WorkerRecord};

use crate::config::MetricNaming;
use crate::obs::registry::{labels, Labels, RegistryBuilder};

pub const NAMESPACE: &str = "lolminer";

/// Knobs that shape the generated series.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuildOptions {
    pub naming: MetricNaming,
    pub per_worker_share_metrics: bool,
}

/// Build and freeze the registry for one scrape.
pub fn build_registry(doc: &MetricDocument, opts: &BuildOptions) -> Result<Registry> {
    collect(doc, opts).freeze()
}

/// Collect the series for `doc` without materialising collectors.
pub fn collect(doc: &MetricDocument, opts: &BuildOptions) -> RegistryBuilder {
    let mut b = RegistryBuilder::new(NAMESPACE);

    add_exporter(&mut b);
    add_software(&mut b, doc);
    for (i, algo) in doc.algorithms.iter().enumerate() {
        add_algorithm(&mut b, opts, i, algo);
    }
    add_session(&mut b, &doc.session);
    for (i, gpu) in doc.workers.iter().enumerate() {
        add_gpu(&mut b, opts, i, gpu);
    }
    if opts.per_worker_share_metrics {
        for (i, algo) in doc.algorithms.iter().enumerate() {
            add_per_worker_shares(&mut b, doc, i, algo);
        }
    }

    b
}

fn positional(naming: MetricNaming, base: &str, i: usize) -> String {
    match naming {
        MetricNaming::Labeled => base.to_string(),
        MetricNaming::Indexed => format!("{base}_{i}"),
    }
}

fn add_exporter(b: &mut RegistryBuilder) {
    b.info(
        "exporter_info",
        "Metadata about the exporter.",
        labels([("version", crate::APP_VERSION.to_string())]),
    );
}

fn add_software(b: &mut RegistryBuilder, doc: &MetricDocument) {
    let common = labels([("software", doc.software.clone())]);

    b.info("software_info", "Metadata about the software.", common.clone());
    b.gauge(
        "session_active_gpus",
        "Number of active GPUs.",
        common,
        f64::from(doc.num_workers),
    );
}

fn add_algorithm(b: &mut RegistryBuilder, opts: &BuildOptions, i: usize, algo: &AlgorithmRecord) {
    let mut common = labels([("algorithm", algo.algorithm.clone())]);
    if opts.naming == MetricNaming::Labeled {
        common.insert("algorithm_index".into(), i.to_string());
    }

    let mut info = common.clone();
    if opts.naming == MetricNaming::Labeled {
        info.insert("algorithm_variant".into(), algo.display_name());
    }

    b.info(
        &positional(opts.naming, "mining_info", i),
        "Metadata about mining.",
        info,
    );
    b.counter(
        "session_accepted_shares_total",
        "Number of accepted shares for this session.",
        common,
        algo.total_accepted,
    );
}

fn add_session(b: &mut RegistryBuilder, session: &SessionInfo) {
    let common = labels([("session_startup_time", session.startup_string.clone())]);

    b.info("session_info", "Metadata about the session.", common.clone());
    b.gauge(
        "session_startup_seconds_timestamp",
        "Timestamp for the start of the session.",
        common.clone(),
        session.startup as f64,
    );
    b.gauge(
        "session_uptime_seconds",
        "Uptime for the session (s).",
        common.clone(),
        session.uptime as f64,
    );
    b.gauge(
        "session_last_update_seconds_timestamp",
        "Timestamp for last update.",
        common,
        session.last_update as f64,
    );
}

fn add_gpu(b: &mut RegistryBuilder, opts: &BuildOptions, i: usize, gpu: &WorkerRecord) {
    let mut common = labels([("gpu_index", gpu.index.to_string())]);
    if opts.naming == MetricNaming::Labeled {
        common.insert("gpu_position".into(), i.to_string());
    }

    let mut info = common.clone();
    info.insert("name".into(), gpu.name.clone());
    info.insert("pcie_address".into(), gpu.pcie_address.clone());

    b.info(
        &positional(opts.naming, "gpu_info", i),
        "Metadata about a GPU.",
        info,
    );
    b.gauge(
        &positional(opts.naming, "gpu_power_watts", i),
        "GPU power usage (Watt).",
        common.clone(),
        gpu.power,
    );
    b.gauge(
        &positional(opts.naming, "gpu_fan_speed", i),
        "GPU fan speed (%).",
        common.clone(),
        f64::from(gpu.fan_speed),
    );
    b.gauge(
        &positional(opts.naming, "gpu_temperature_celsius", i),
        "GPU temperature (deg. C).",
        common,
        f64::from(gpu.core_temp),
    );
}

/// Opt-in series from the per-worker algorithm sequences.
///
/// Uses stable names regardless of `MetricNaming`; the sequences never had an
/// indexed wire format to stay compatible with.
fn add_per_worker_shares(
    b: &mut RegistryBuilder,
    doc: &MetricDocument,
    i: usize,
    algo: &AlgorithmRecord,
) {
    let algo_labels = labels([
        ("algorithm", algo.algorithm.clone()),
        ("algorithm_index", i.to_string()),
    ]);

    b.counter(
        "session_rejected_shares_total",
        "Number of rejected shares for this session.",
        algo_labels.clone(),
        algo.total_rejected,
    );
    b.counter(
        "session_stale_shares_total",
        "Number of stale shares for this session.",
        algo_labels.clone(),
        algo.total_stales,
    );
    b.counter(
        "session_error_shares_total",
        "Number of erroneous shares for this session.",
        algo_labels.clone(),
        algo.total_errors,
    );

    if !algo.per_worker_lengths_match(doc.workers.len()) {
        tracing::warn!(
            algorithm = %algo.algorithm,
            algorithm_index = i,
            workers = doc.workers.len(),
            "per-worker sequences do not match worker count, skipping per-GPU share series"
        );
        return;
    }

    for (w, gpu) in doc.workers.iter().enumerate() {
        let mut gpu_labels: Labels = algo_labels.clone();
        gpu_labels.insert("gpu_index".into(), gpu.index.to_string());
        gpu_labels.insert("gpu_position".into(), w.to_string());

        let mut perf_labels = gpu_labels.clone();
        perf_labels.insert("unit".into(), algo.performance_unit.clone());

        b.gauge(
            "gpu_performance",
            "GPU performance in the algorithm's performance unit.",
            perf_labels,
            algo.worker_performances[w],
        );
        b.counter(
            "gpu_accepted_shares_total",
            "Number of accepted shares for the GPU during the current session.",
            gpu_labels.clone(),
            algo.worker_accepted[w],
        );
        b.counter(
            "gpu_rejected_shares_total",
            "Number of rejected shares for the GPU during the current session.",
            gpu_labels.clone(),
            algo.worker_rejected[w],
        );
        b.counter(
            "gpu_stale_shares_total",
            "Number of stale shares for the GPU during the current session.",
            gpu_labels.clone(),
            algo.worker_stales[w],
        );
        b.counter(
            "gpu_error_shares_total",
            "Number of erroneous shares for the GPU during the current session.",
            gpu_labels,
            algo.worker_errors[w],
        );
    }
}
