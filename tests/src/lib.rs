// Integration test support for Nrfr end-to-end tests
//
// Wires the override dispatcher, config query and SIM inventory to the
// in-memory privileged channel so whole read/write flows can be driven
// without a device.

pub mod test_harness;

pub use test_harness::{init_tracing, TestHarness, TestResult};
