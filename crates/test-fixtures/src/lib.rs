//! Test fixture loader for capsule golden datasets and graph scenarios.
//!
//! Provides typed deserialization of the fixture JSON files and builders
//! shared by the integration tests of every crate.

use std::path::PathBuf;

use capsule_core::CapsuleSnapshot;
use serde::de::DeserializeOwned;
use serde::Deserialize;

/// Root directory of the test-fixtures folder.
fn fixtures_root() -> PathBuf {
    // Works from any crate in the workspace: walk up to find test-fixtures.
    let manifest_dir = std::env::var("CARGO_MANIFEST_DIR").unwrap_or_else(|_| ".".to_string());
    let mut path = PathBuf::from(&manifest_dir);

    while !path.join("test-fixtures").exists() {
        if !path.pop() {
            panic!(
                "Could not find test-fixtures directory from CARGO_MANIFEST_DIR={}",
                manifest_dir
            );
        }
    }
    path.join("test-fixtures")
}

/// Load and deserialize a JSON fixture file.
///
/// # Panics
/// Panics if the file doesn't exist or can't be deserialized.
pub fn load_fixture<T: DeserializeOwned>(relative_path: &str) -> T {
    let path = fixtures_root().join(relative_path);
    let content = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read fixture {}: {}", path.display(), e));
    serde_json::from_str(&content)
        .unwrap_or_else(|e| panic!("Failed to parse fixture {}: {}", path.display(), e))
}

/// Check that a fixture file exists.
pub fn fixture_exists(relative_path: &str) -> bool {
    fixtures_root().join(relative_path).exists()
}

/// Load every golden capsule.
pub fn golden_capsules() -> Vec<CapsuleSnapshot> {
    [
        "golden/capsules/well_formed.json",
        "golden/capsules/sparse.json",
        "golden/capsules/revised.json",
    ]
    .iter()
    .map(|path| load_fixture(path))
    .collect()
}

/// A minimal capsule with a usable title and insight.
pub fn capsule(id: &str) -> CapsuleSnapshot {
    let mut c = CapsuleSnapshot::new(
        id,
        format!("Capsule {id} title"),
        "testing",
        format!("Insight recorded for capsule {id}."),
    );
    c.evidence = vec!["observation".to_string()];
    c
}

/// One relation of a graph scenario.
#[derive(Debug, Clone, Deserialize)]
pub struct ScenarioRelation {
    pub from: String,
    pub to: String,
    pub kind: String,
    pub strength: f64,
}

/// A set of capsules plus the relations between them.
#[derive(Debug, Clone, Deserialize)]
pub struct GraphScenario {
    pub description: String,
    pub capsules: Vec<String>,
    pub relations: Vec<ScenarioRelation>,
}

pub fn load_graph(name: &str) -> GraphScenario {
    load_fixture(&format!("golden/graphs/{name}.json"))
}
