//! Benchmark support crate for labshift.
//!
//! Holds only the criterion benches under `benches/`; run with
//! `cargo bench`.
