#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use lolminer_core::error::ExporterError;
use lolminer_exporter::config::{self, MetricNaming};

#[test]
fn deny_unknown_fields_nested() {
    let bad = r#"
version: 1
exporter:
  listen: "0.0.0.0:8080"
upstream:
  timeout: 5000 # typo should fail
"#;

    let err = config::load_from_str(bad).expect_err("must fail");
    assert!(matches!(err, ExporterError::Config(_)));
    assert_eq!(err.http_status(), 500);
}

#[test]
fn ok_minimal_config() {
    let cfg = config::load_from_str("version: 1\n").expect("must parse");
    assert_eq!(cfg.version, 1);
    assert_eq!(cfg.exporter.listen, "0.0.0.0:8080");
    assert!(!cfg.exporter.debug);
    assert_eq!(cfg.exporter.metric_naming, MetricNaming::Labeled);
    assert!(!cfg.exporter.per_worker_share_metrics);
    assert_eq!(cfg.upstream.timeout(), None);
    assert!(!cfg.upstream.reject_error_status);
    assert!(cfg.upstream.user_agent.starts_with("lolminer-exporter/"));
}

#[test]
fn full_config() {
    let ok = r#"
version: 1
exporter:
  listen: ":9400"
  debug: true
  metric_naming: indexed
  per_worker_share_metrics: true
upstream:
  timeout_ms: 2500
  reject_error_status: true
  user_agent: "rig-monitor/1"
"#;
    let cfg = config::load_from_str(ok).expect("must parse");
    assert_eq!(cfg.exporter.listen_addr().unwrap(), "0.0.0.0:9400".parse::<std::net::SocketAddr>().unwrap());
    assert!(cfg.exporter.debug);
    assert_eq!(cfg.exporter.metric_naming, MetricNaming::Indexed);
    assert_eq!(cfg.upstream.timeout(), Some(std::time::Duration::from_millis(2500)));
    assert_eq!(cfg.upstream.user_agent, "rig-monitor/1");
}

#[test]
fn rejects_out_of_range_values() {
    for bad in [
        "version: 2\n",
        "version: 1\nexporter:\n  listen: \"not an address\"\n",
        "version: 1\nupstream:\n  timeout_ms: 0\n",
        "version: 1\nupstream:\n  user_agent: \"  \"\n",
        "version: 1\nexporter:\n  metric_naming: suffixed\n",
    ] {
        assert!(config::load_from_str(bad).is_err(), "config={bad}");
    }
}
