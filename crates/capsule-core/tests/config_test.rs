use capsule_core::config::*;

#[test]
fn config_loads_from_empty_toml_with_all_defaults() {
    let config = CapsuleConfig::from_toml("").unwrap();

    assert_eq!(config.storage.db_path, "capsules.db");
    assert!(config.storage.wal_mode);
    assert_eq!(config.storage.busy_timeout_ms, 5_000);
    assert_eq!(config.storage.read_pool_size, 4);

    assert_eq!(config.traversal.default_depth, 3);
    assert_eq!(config.traversal.max_depth, 5);
    assert_eq!(config.traversal.max_nodes, 50);

    assert_eq!(config.summary.default_limit, 50);
    assert_eq!(config.summary.max_limit, 200);

    assert_eq!(config.registration.initial_version, "v1.0.0");
    assert_eq!(config.registration.author, "system");
    assert_eq!(config.registration.source_type, "manual");
    assert_eq!(config.registration.initial_reason, "initial creation");

    assert_eq!(config.observability.log_level, "info");
}

#[test]
fn config_loads_partial_toml_with_overrides() {
    let toml = r#"
[storage]
db_path = "/var/lib/capsules/prov.db"
read_pool_size = 8

[traversal]
max_nodes = 10
"#;
    let config = CapsuleConfig::from_toml(toml).unwrap();
    assert_eq!(config.storage.db_path, "/var/lib/capsules/prov.db");
    assert_eq!(config.storage.read_pool_size, 8);
    // Untouched keys keep defaults.
    assert_eq!(config.storage.busy_timeout_ms, 5_000);
    assert_eq!(config.traversal.max_nodes, 10);
    assert_eq!(config.traversal.max_depth, 5);
}

#[test]
fn config_rejects_malformed_toml() {
    let err = CapsuleConfig::from_toml("[storage\nread_pool_size = ").unwrap_err();
    assert!(matches!(err, capsule_core::CapsuleError::ConfigError(_)));
}

#[test]
fn traversal_depth_is_clamped_to_configured_max() {
    let config = TraversalConfig::default();
    assert_eq!(config.clamp_depth(2), 2);
    assert_eq!(config.clamp_depth(99), 5);
    assert_eq!(config.clamp_depth(0), 0);
}

#[test]
fn summary_limit_is_clamped() {
    let config = SummaryConfig::default();
    assert_eq!(config.clamp_limit(0), 1);
    assert_eq!(config.clamp_limit(500), 200);
    assert_eq!(config.clamp_limit(25), 25);
}
