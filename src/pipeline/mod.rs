//! Pure derivations over the review collection.
//!
//! Nothing in here touches the network or the store; the controller calls
//! these functions whenever their tracked inputs change and caches the
//! results alongside the input identity.

pub mod aggregate;
pub mod filter;
