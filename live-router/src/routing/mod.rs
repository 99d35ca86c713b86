//! Rule resolution layer.
//!
//! [`pattern_index`] owns single-tenant wildcard matching; [`tenant_registry`]
//! partitions indexes by tenant, loads them from storage on first use and accepts
//! local upserts.

pub(crate) mod pattern_index;
pub(crate) mod tenant_registry;
