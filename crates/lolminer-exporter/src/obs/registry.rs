//! Request-scoped registry construction.
//!
//! Series are first collected as plain records, in registration order, and
//! only turned into `prometheus` collectors by [`RegistryBuilder::freeze`].
//! Identity conflicts are therefore found before any collector exists, and a
//! failed build never leaks a half-populated registry to the encoder.

use std::collections::{BTreeMap, BTreeSet};

use prometheus::{GaugeVec, IntCounterVec, Opts, Registry};

use lolminer_core::error::{ExporterError, Result};

/// Label set of one series. Ordered, so label keys compare independent of insertion order.
pub type Labels = BTreeMap<String, String>;

/// Collector kind of a series.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeriesKind {
    Gauge,
    Counter,
}

/// Value of a series, already widened for its kind.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SeriesValue {
    Gauge(f64),
    Counter(u64),
}

impl SeriesValue {
    pub fn kind(&self) -> SeriesKind {
        match self {
            SeriesValue::Gauge(_) => SeriesKind::Gauge,
            SeriesValue::Counter(_) => SeriesKind::Counter,
        }
    }
}

/// One `(name, labels) -> value` entry.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesRecord {
    pub name: String,
    pub help: String,
    pub labels: Labels,
    pub value: SeriesValue,
}

/// Accumulates series for one scrape.
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    namespace: String,
    records: Vec<SeriesRecord>,
}

impl RegistryBuilder {
    pub fn new(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            records: Vec::new(),
        }
    }

    /// Info pattern: value fixed at 1, content in labels.
    pub fn info(&mut self, name: &str, help: &str, labels: Labels) {
        self.gauge(name, help, labels, 1.0);
    }

    pub fn gauge(&mut self, name: &str, help: &str, labels: Labels, value: f64) {
        self.push(name, help, labels, SeriesValue::Gauge(value));
    }

    pub fn counter(&mut self, name: &str, help: &str, labels: Labels, value: u64) {
        self.push(name, help, labels, SeriesValue::Counter(value));
    }

    fn push(&mut self, name: &str, help: &str, labels: Labels, value: SeriesValue) {
        let name = if self.namespace.is_empty() {
            name.to_string()
        } else {
            format!("{}_{}", self.namespace, name)
        };
        self.records.push(SeriesRecord {
            name,
            help: help.to_string(),
            labels,
            value,
        });
    }

    pub fn records(&self) -> &[SeriesRecord] {
        &self.records
    }

    /// Check every identity rule, then materialise a fresh registry.
    pub fn freeze(self) -> Result<Registry> {
        let families = group_families(self.records)?;

        let registry = Registry::new();
        for family in families {
            let opts = Opts::new(family.name.clone(), family.help.clone());
            let keys: Vec<&str> = family.label_keys.iter().map(String::as_str).collect();

            match family.kind {
                SeriesKind::Gauge => {
                    let vec = GaugeVec::new(opts, &keys).map_err(|e| conflict(&family.name, e))?;
                    for r in &family.records {
                        let values = label_values(&r.labels);
                        let gauge = vec
                            .get_metric_with_label_values(&values)
                            .map_err(|e| conflict(&family.name, e))?;
                        if let SeriesValue::Gauge(v) = r.value {
                            gauge.set(v);
                        }
                    }
                    registry
                        .register(Box::new(vec))
                        .map_err(|e| conflict(&family.name, e))?;
                }
                SeriesKind::Counter => {
                    let vec =
                        IntCounterVec::new(opts, &keys).map_err(|e| conflict(&family.name, e))?;
                    for r in &family.records {
                        let values = label_values(&r.labels);
                        let counter = vec
                            .get_metric_with_label_values(&values)
                            .map_err(|e| conflict(&family.name, e))?;
                        if let SeriesValue::Counter(v) = r.value {
                            counter.inc_by(v);
                        }
                    }
                    registry
                        .register(Box::new(vec))
                        .map_err(|e| conflict(&family.name, e))?;
                }
            }
        }

        Ok(registry)
    }
}

/// Series sharing a metric name.
struct Family {
    name: String,
    help: String,
    kind: SeriesKind,
    label_keys: Vec<String>,
    records: Vec<SeriesRecord>,
}

fn group_families(records: Vec<SeriesRecord>) -> Result<Vec<Family>> {
    let mut families: Vec<Family> = Vec::new();
    let mut seen: BTreeSet<(String, Labels)> = BTreeSet::new();

    for r in records {
        let keys: Vec<String> = r.labels.keys().cloned().collect();

        if !seen.insert((r.name.clone(), r.labels.clone())) {
            return Err(ExporterError::RegistrationConflict(format!(
                "duplicate series {}{}",
                r.name,
                render_labels(&r.labels)
            )));
        }

        match families.iter_mut().find(|f| f.name == r.name) {
            Some(family) => {
                if family.kind != r.value.kind() {
                    return Err(ExporterError::RegistrationConflict(format!(
                        "{} registered as both gauge and counter",
                        r.name
                    )));
                }
                if family.label_keys != keys {
                    return Err(ExporterError::RegistrationConflict(format!(
                        "{} registered with label keys {:?} and {:?}",
                        r.name, family.label_keys, keys
                    )));
                }
                if family.help != r.help {
                    return Err(ExporterError::RegistrationConflict(format!(
                        "{} registered with differing help text",
                        r.name
                    )));
                }
                family.records.push(r);
            }
            None => families.push(Family {
                name: r.name.clone(),
                help: r.help.clone(),
                kind: r.value.kind(),
                label_keys: keys,
                records: vec![r],
            }),
        }
    }

    Ok(families)
}

fn label_values(labels: &Labels) -> Vec<&str> {
    labels.values().map(String::as_str).collect()
}

fn render_labels(labels: &Labels) -> String {
    if labels.is_empty() {
        return String::new();
    }
    let inner = labels
        .iter()
        .map(|(k, v)| format!("{k}=\"{v}\""))
        .collect::<Vec<_>>()
        .join(",");
    format!("{{{inner}}}")
}

fn conflict(name: &str, e: prometheus::Error) -> ExporterError {
    ExporterError::RegistrationConflict(format!("{name}: {e}"))
}

/// Build a label map from literal pairs.
pub fn labels<const N: usize>(pairs: [(&str, String); N]) -> Labels {
    pairs
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect()
}
