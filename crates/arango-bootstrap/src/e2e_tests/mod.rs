//! E2E tests against a real ArangoDB via testcontainers.
//!
//! All tests are `#[ignore]`d; run them with `cargo test -- --ignored`
//! on a machine with Docker.

mod arango_test_harness;

pub use arango_test_harness::ArangoTestHarness;
