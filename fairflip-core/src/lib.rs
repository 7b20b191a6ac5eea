//! Core types and utilities for the commit-reveal coin flip.
//!
//! # Example
//!
//! ```
//! use fairflip_core::{commit::HashCommit, flip::{Flip, Outcome}, secret::OverlongPolicy, Secret};
//!
//! let secret_a = Secret::parse("abc");
//! let secret_b = Secret::parse("xyz");
//!
//! let (decommitment, commitment) = secret_a.hash_commit();
//! assert_eq!(
//!     commitment.to_string(),
//!     "4e03657aea45a94fc7d47ba826c8d667c0d1e6e33a64a036ec44f58fa12d6c45"
//! );
//!
//! decommitment.verify(&commitment).unwrap();
//!
//! let flip = Flip::from_secrets(decommitment.data(), &secret_b, OverlongPolicy::Reject).unwrap();
//! assert_eq!(flip.outcome(), Outcome::PlayerA);
//! ```

#![deny(
    unsafe_code,
    missing_docs,
    unused_imports,
    unused_must_use,
    unreachable_pub,
    clippy::all
)]

pub mod commit;
pub mod flip;
pub mod hash;
pub mod secret;

pub use hash::{keccak256, Hash};
pub use secret::Secret;
