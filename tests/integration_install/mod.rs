//! These tests shell out to cargo and skip themselves when it is unavailable.

mod cargo_roundtrip;
