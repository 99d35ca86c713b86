/********************************************************************************
 * Copyright (c) 2026 Contributors to the Eclipse Foundation
 *
 * See the NOTICE file(s) distributed with this work for additional
 * information regarding copyright ownership.
 *
 * This program and the accompanying materials are made available under the
 * terms of the Apache License Version 2.0 which is available at
 * https://www.apache.org/licenses/LICENSE-2.0
 *
 * SPDX-License-Identifier: Apache-2.0
 ********************************************************************************/

//! # live-router
//!
//! `live-router` resolves a live channel to the rule that governs it, per tenant.
//!
//! Every published or subscribed channel (`scope/namespace/path`) is matched on the
//! hot path against the wildcard rules of its organization. Rules come from a
//! [`RuleStorage`] collaborator; the [`TenantRegistry`] loads a tenant the first time
//! it is asked about it, accepts local upserts through [`TenantRegistry::save`], and a
//! background refresher periodically reloads every known tenant so that changes made
//! elsewhere (including deletions) become visible.
//!
//! ## Resolving a channel
//!
//! ```
//! use std::sync::Arc;
//! use async_trait::async_trait;
//! use live_router::{
//!     orgchannel, Channel, RegistryConfig, RuleEntry, RuleStorage, StorageError, TenantId,
//!     TenantRegistry,
//! };
//!
//! struct FixedRules;
//!
//! #[async_trait]
//! impl RuleStorage<&'static str> for FixedRules {
//!     async fn list_rules(
//!         &self,
//!         tenant_id: TenantId,
//!     ) -> Result<Vec<RuleEntry<&'static str>>, StorageError> {
//!         Ok(vec![RuleEntry::new(tenant_id, "stream/telegraf/*", "telegraf-rule")])
//!     }
//! }
//!
//! # tokio::runtime::Runtime::new().unwrap().block_on(async {
//! let registry = TenantRegistry::<&str>::new(Arc::new(FixedRules), RegistryConfig::default());
//!
//! let (org_id, raw) = orgchannel::strip_org_id("1/stream/telegraf/cpu").unwrap();
//! let channel = Channel::parse(raw).unwrap();
//!
//! let rule = registry.get(org_id, &channel.to_string()).await.unwrap();
//! assert_eq!(rule, Some("telegraf-rule"));
//!
//! // No rule is a valid answer, distinct from an error.
//! assert_eq!(registry.get(org_id, "streams/telegraf/cpu").await.unwrap(), None);
//! # });
//! ```
//!
//! ## Background refresh
//!
//! ```no_run
//! use std::sync::Arc;
//! # use async_trait::async_trait;
//! use live_router::{spawn_refresher, RegistryConfig, TenantRegistry};
//! # use live_router::{RuleEntry, RuleStorage, StorageError, TenantId};
//! use tokio_util::sync::CancellationToken;
//! # struct Empty;
//! # #[async_trait]
//! # impl RuleStorage<String> for Empty {
//! #     async fn list_rules(&self, _: TenantId) -> Result<Vec<RuleEntry<String>>, StorageError> {
//! #         Ok(Vec::new())
//! #     }
//! # }
//!
//! # tokio::runtime::Runtime::new().unwrap().block_on(async {
//! let registry = Arc::new(TenantRegistry::<String>::new(Arc::new(Empty), RegistryConfig::default()));
//! let refresher = spawn_refresher(registry.clone(), CancellationToken::new());
//!
//! // ... serve lookups ...
//!
//! refresher.shutdown().await.unwrap();
//! # });
//! ```
//!
//! ## Consistency model
//!
//! - Values written through `save` are visible to the next `get` immediately.
//! - Anything else may be up to one refresh period stale.
//! - A refresh or fill replaces a tenant's index wholesale; a failed refresh keeps
//!   the previous index.
//!
//! ## Observability model
//!
//! The crate uses `tracing` for logs/events. Library code emits events and does not
//! initialize a global subscriber. Binaries and tests are responsible for one-time
//! `tracing_subscriber` initialization.

mod channel;
pub use channel::{Channel, Scope, MAX_CHANNEL_LENGTH};

mod config;
pub use config::{ConfigError, RegistryConfig};

mod error;
pub use error::{ChannelError, PatternError, RoutingError, StorageError};

pub mod orgchannel;

mod refresh_health;
pub use refresh_health::RefreshHealth;

#[doc(hidden)]
pub mod observability;

mod routing;
pub use routing::pattern_index::{PatternIndex, ANY_REMAINDER, ANY_SEGMENT};
pub use routing::tenant_registry::{RefreshReport, TenantRegistry};

mod runtime;
pub use runtime::refresher::{spawn_refresher, RefresherHandle};

mod storage;
pub use storage::{RuleEntry, RuleStorage};

#[cfg(test)]
mod test_support;

/// Organization id partitioning rule sets and caches.
pub type TenantId = i64;
