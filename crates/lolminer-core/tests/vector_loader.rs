//! Raw upstream payload loader shared by the decoder tests.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]
#![allow(dead_code)]

use std::fs;

pub fn load(name: &str) -> Vec<u8> {
    fs::read(format!("tests/vectors/{name}"))
        .unwrap_or_else(|e| panic!("missing test vector {name}: {e}"))
}
