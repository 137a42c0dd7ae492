//! Shared helpers for the crate's property tests.

pub(crate) mod quick;
