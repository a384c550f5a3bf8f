//! # Cantata Testkit
//!
//! Testing utilities for the Cantata codec.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Golden vectors**: captured wire blobs with their expected decoded
//!   payloads, for cross-implementation verification
//! - **Generators**: proptest strategies for property-based testing
//! - **Fixtures**: helper structs for setting up test scenarios
//!
//! ## Golden Vectors
//!
//! ```rust
//! use cantata_testkit::vectors::{golden_v38_payload, GOLDEN_V38_BLOB};
//!
//! let expected = golden_v38_payload();
//! assert!(GOLDEN_V38_BLOB.starts_with("🎼4/4|"));
//! assert_eq!(expected.version, -38);
//! ```
//!
//! ## Property Testing
//!
//! Use the generators with proptest:
//!
//! ```rust,ignore
//! use proptest::prelude::*;
//! use cantata_testkit::generators::v38_payload;
//!
//! proptest! {
//!     #[test]
//!     fn decodes_what_it_encodes(payload in v38_payload()) {
//!         // encode, decode, compare
//!     }
//! }
//! ```
//!
//! ## Test Fixtures
//!
//! ```rust
//! use cantata_testkit::fixtures::TestFixture;
//!
//! let fixture = TestFixture::with_seed([0x42; 32]);
//! let payload = fixture.make_public_payload(b"ciphertext");
//! ```

pub mod fixtures;
pub mod generators;
pub mod vectors;

pub use fixtures::TestFixture;
