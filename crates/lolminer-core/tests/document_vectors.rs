//! Decoder tests against captured miner payloads.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use lolminer_core::{decode_document, ExporterError};

mod vector_loader;
use vector_loader::load;

#[test]
fn scenario_single_gpu() {
    let doc = decode_document(&load("scenario_single_gpu.json")).unwrap();
    assert_eq!(doc.software, "lolMiner");
    assert_eq!(doc.num_workers, 1);
    assert_eq!(doc.workers.len(), 1);

    let gpu = &doc.workers[0];
    assert_eq!(gpu.index, 0);
    assert_eq!(gpu.name, "RTX3080");
    assert_eq!(gpu.power, 220.5);
    assert_eq!(gpu.fan_speed, 60);
    assert_eq!(gpu.core_temp, 65);
    assert_eq!(gpu.pcie_address, "0000:01:00.0");
    // Absent in the payload.
    assert_eq!(gpu.core_clock, 0);
    assert_eq!(gpu.memory_temp, 0);

    assert_eq!(doc.algorithms.len(), 1);
    assert_eq!(doc.algorithms[0].algorithm, "Ethash");
    assert_eq!(doc.algorithms[0].total_accepted, 42);
    assert!(doc.algorithms[0].worker_accepted.is_empty());

    assert_eq!(doc.session.startup, 1000);
    assert_eq!(doc.session.startup_string, "Mon");
    assert_eq!(doc.session.uptime, 500);
    assert_eq!(doc.session.last_update, 1500);
}

#[test]
fn dual_mining_ignores_unknown_fields() {
    let doc = decode_document(&load("dual_mining.json")).unwrap();
    assert_eq!(doc.num_workers, 2);
    assert_eq!(doc.num_algorithms, 2);

    assert_eq!(doc.workers[1].power, 142.0);
    assert_eq!(doc.workers[1].junction_temp, 71);
    assert_eq!(doc.workers[1].memory_clock, 1075);

    let etc = &doc.algorithms[0];
    assert_eq!(etc.pool, "etc.2miners.com:1010");
    assert_eq!(etc.performance_unit, "Mh/s");
    assert_eq!(etc.performance_factor, 1_000_000);
    assert_eq!(etc.total_rejected, 2);
    assert_eq!(etc.worker_performances.len(), 2);
    assert!((etc.worker_performances[1] - 60.4).abs() < 1e-9);
    assert!(etc.per_worker_lengths_match(doc.workers.len()));

    assert_eq!(doc.algorithms[1].display_name(), "Autolykos2 ZIL");
}

#[test]
fn decoding_is_idempotent() {
    let raw = load("dual_mining.json");
    let a = decode_document(&raw).unwrap();
    let b = decode_document(&raw).unwrap();
    assert_eq!(a, b);
}

#[test]
fn malformed_payloads_fail_to_decode() {
    for name in [
        "truncated.json",
        "wrong_type.json",
        "top_level_array.json",
        "out_of_range.json",
    ] {
        let err = decode_document(&load(name)).expect_err("expected decode failure");
        assert!(matches!(err, ExporterError::Decode(_)), "vector={name}");
        assert_eq!(err.http_status(), 500, "vector={name}");
    }
}

#[test]
fn non_json_bytes_fail_to_decode() {
    for raw in [&b""[..], b"<html>502 Bad Gateway</html>", b"lolMiner", b"{,}"] {
        let err = decode_document(raw).expect_err("expected decode failure");
        assert!(err
            .client_body()
            .starts_with("500 - Failed to parse scraped data: "));
    }
}
