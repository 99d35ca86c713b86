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

mod support;

use live_router::{orgchannel, Channel, RegistryConfig, RoutingError, StorageError};
use serde_json::json;
use support::{init_logging, make_registry, write_rules_file, RULES_FIXTURE};

#[tokio::test]
async fn telegraf_wildcard_matches_only_its_scope() {
    init_logging();
    let registry = make_registry(RULES_FIXTURE, RegistryConfig::default());

    let rule = registry
        .get(1, "stream/telegraf/mem")
        .await
        .expect("fixture loads")
        .expect("wildcard rule applies");
    assert_eq!(rule["output"], "managed_stream");

    assert_eq!(registry.get(1, "streams/telegraf/cpu").await.unwrap(), None);
}

#[tokio::test]
async fn exact_rule_wins_over_wildcard() {
    init_logging();
    let registry = make_registry(RULES_FIXTURE, RegistryConfig::default());

    let rule = registry.get(1, "stream/telegraf/cpu").await.unwrap().unwrap();
    assert_eq!(rule["output"], "conditional");

    let rule = registry
        .get(1, "stream/json/host-a/cpu/total")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(rule["converter"], "json_auto");
}

#[tokio::test]
async fn malformed_fixture_patterns_are_skipped() {
    init_logging();
    let registry = make_registry(RULES_FIXTURE, RegistryConfig::default());

    assert_eq!(registry.fill(2).await.unwrap(), 1);
    let rule = registry.get(2, "plugin/testdata/random-2s-stream").await.unwrap();
    assert_eq!(rule, Some(json!({ "output": "managed_stream" })));
}

#[tokio::test]
async fn org_prefixed_channel_resolves_through_parse() {
    init_logging();
    let registry = make_registry(RULES_FIXTURE, RegistryConfig::default());

    let (org_id, raw) = orgchannel::strip_org_id("1/grafana/dashboard/uid-1").unwrap();
    let channel = Channel::parse(raw).unwrap();
    let rule = registry.get(org_id, &channel.to_string()).await.unwrap().unwrap();
    assert_eq!(rule["output"], "local_subscriber");

    assert!(Channel::parse("grafana/dashboard").is_err());
}

#[tokio::test]
async fn unavailable_storage_reports_error_not_missing_rule() {
    init_logging();
    let registry = make_registry("does/not/exist.json", RegistryConfig::default());

    let err = registry.get(2, "a/b/c").await.unwrap_err();
    assert!(matches!(
        err,
        RoutingError::Storage {
            tenant_id: 2,
            source: StorageError::Unavailable(_)
        }
    ));
}

#[tokio::test]
async fn saved_rule_is_visible_before_any_storage_read() {
    init_logging();
    let registry = make_registry("does/not/exist.json", RegistryConfig::default());

    registry
        .save(3, "stream/custom/*", json!({ "output": "local" }))
        .await
        .unwrap();

    let rule = registry.get(3, "stream/custom/x").await.unwrap();
    assert_eq!(rule, Some(json!({ "output": "local" })));
}

#[tokio::test]
async fn refresh_drops_rules_removed_upstream() {
    init_logging();
    let path = write_rules_file(
        "refresh_drops_rules_removed_upstream.json",
        &json!({ "5": { "a/b/c": 1, "a/b/d": 2 } }),
    );
    let path = path.to_string_lossy().to_string();
    let registry = make_registry(&path, RegistryConfig::default());

    assert_eq!(registry.get(5, "a/b/d").await.unwrap(), Some(json!(2)));

    write_rules_file(
        "refresh_drops_rules_removed_upstream.json",
        &json!({ "5": { "a/b/c": 1 } }),
    );
    assert_eq!(registry.get(5, "a/b/d").await.unwrap(), Some(json!(2)));

    let report = registry.refresh_all().await;
    assert!(report.is_success());
    assert_eq!(registry.get(5, "a/b/d").await.unwrap(), None);
    assert_eq!(registry.get(5, "a/b/c").await.unwrap(), Some(json!(1)));
}
