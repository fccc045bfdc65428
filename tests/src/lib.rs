//! # Skill Market Test Suite
//!
//! ## Structure
//!
//! ```text
//! tests/
//! ├── benches/          # Criterion benchmarks (ABI codec, projection)
//! └── src/integration/  # Cross-crate flows over real store adapters
//!     ├── flows.rs      # submit / book / complete end to end
//!     └── races.rs      # lost index updates between independent writers
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p sm-tests
//! cargo bench -p sm-tests
//! ```

pub mod integration;
