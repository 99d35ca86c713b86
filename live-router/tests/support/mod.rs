use live_router::{RegistryConfig, TenantRegistry};
use live_rules_static_file::LiveRulesStaticFile;
use serde_json::Value;
use std::path::PathBuf;
use std::sync::Arc;

pub(crate) const RULES_FIXTURE: &str = "../utils/live-rules-static-file/static-configs/testdata.json";

pub(crate) fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub(crate) fn make_registry(rules_file: &str, config: RegistryConfig) -> Arc<TenantRegistry<Value>> {
    let storage = Arc::new(LiveRulesStaticFile::new(rules_file.to_string()));
    Arc::new(TenantRegistry::new(storage, config))
}

/// Writes a scratch rules file under the cargo-provided temporary directory.
#[allow(dead_code)]
pub(crate) fn write_rules_file(name: &str, document: &Value) -> PathBuf {
    let path = PathBuf::from(env!("CARGO_TARGET_TMPDIR")).join(name);
    std::fs::write(&path, document.to_string()).expect("scratch rules file should be writable");
    path
}
