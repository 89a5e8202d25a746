#![allow(dead_code)]

use std::path::PathBuf;

use implementors::{ImplementationRecord, ImplementorTable};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[ctor::ctor]
fn init_tests() {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::from_default_env())
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("Failed to set tracing subscriber");
}

pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

pub fn record(text: &str, synthetic: bool, types: &[&str]) -> ImplementationRecord {
    ImplementationRecord::new(
        text,
        synthetic,
        types.iter().map(|ty| ty.to_string()).collect(),
    )
}

/// `{ "libA": [ impl X for Y ] }`
pub fn lib_a_table() -> ImplementorTable {
    ImplementorTable::new().with_library(
        "libA",
        vec![record("impl X for Y", false, &["libA", "Y"])],
    )
}
