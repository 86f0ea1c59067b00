//! Redaction policy: what "hidden" means per collection, and how hidden
//! content is replaced.
//!
//! The primitives live in `policy`; `snapshot` decides where to apply them.

pub mod policy;

pub use policy::{
    exchange_with_pool, permute_hidden, redeal_from_slots, reshuffle_and_redeal, sample_value,
    substitute_value,
};
