use std::fs;

use hashdash_registry::{CATALOG_PATH_ENV, CatalogError, DashboardConfig, ParameterCatalog};
use hashdash_types::{DashboardError, ResolverId};

#[test]
fn every_operation_has_a_resolver_and_unique_labels() {
    let catalog = ParameterCatalog::embedded().unwrap();
    assert_eq!(catalog.len(), 6);
    for operation in catalog.operations() {
        assert!(ResolverId::ALL.contains(&operation.resolver));
        for axis in &operation.axes {
            assert!(!axis.choices.is_empty(), "{} / {}", operation.name, axis.name);
        }
    }
}

#[test]
fn selection_lists_wire_values_in_axis_order() {
    let catalog = ParameterCatalog::embedded().unwrap();
    // label order in the request does not matter
    let selection = catalog
        .resolve_selection("Hashprice", &[("currency", "BTC"), ("interval", "7 Days")])
        .unwrap();
    assert_eq!(selection.wire_values(), vec!["_7_DAYS", "BTC"]);
    assert_eq!(selection.describe(), "Hashprice (7 Days, BTC)");
}

#[test]
fn overview_takes_no_arguments() {
    let catalog = ParameterCatalog::embedded().unwrap();
    let selection = catalog.resolve_selection("Bitcoin Overview", &[]).unwrap();
    assert!(selection.wire_values().is_empty());
    assert_eq!(selection.operation().api_method, "get_bitcoin_overview");
}

#[test]
fn intervals_differ_per_operation() {
    let catalog = ParameterCatalog::embedded().unwrap();
    assert_eq!(
        catalog.resolve_axis_value("Network Difficulty", "interval", "3 Years").unwrap(),
        "_3_YEAR"
    );
    let error = catalog
        .resolve_axis_value("Network Hashrate", "interval", "3 Years")
        .unwrap_err();
    assert!(matches!(error, DashboardError::NotFound { what: "choice", .. }));
}

#[test]
fn lookup_misses_are_not_found() {
    let catalog = ParameterCatalog::embedded().unwrap();
    assert!(matches!(
        catalog.get_operation("Mempool"),
        Err(DashboardError::NotFound { what: "operation", .. })
    ));
    assert!(matches!(
        catalog.resolve_selection("Network Hashrate", &[]),
        Err(DashboardError::NotFound { what: "value for axis", .. })
    ));
    assert!(matches!(
        catalog.resolve_selection("Network Hashrate", &[("interval", "1 Day"), ("currency", "USD")]),
        Err(DashboardError::NotFound { what: "axis", .. })
    ));
}

#[test]
fn json_override_file_replaces_embedded_catalog() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("catalog.json");
    fs::write(
        &path,
        r#"{"operations":[{"name":"Hashprice","api_method":"get_hashprice","resolver":"resolve_get_hashprice",
            "axes":[{"name":"interval","variable":"inputInterval","choices":[{"label":"1 Day","value":"_1_DAY"}]}]}]}"#,
    )
    .unwrap();

    temp_env::with_var_unset(CATALOG_PATH_ENV, || {
        let catalog = ParameterCatalog::load(&DashboardConfig::default(), Some(&path)).unwrap();
        assert_eq!(catalog.list_operations(), vec!["Hashprice"]);
    });
}

#[test]
fn environment_override_beats_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let env_catalog = dir.path().join("env.yaml");
    fs::write(
        &env_catalog,
        "operations:\n  - name: Bitcoin Overview\n    api_method: get_bitcoin_overview\n    resolver: resolve_get_bitcoin_overview\n",
    )
    .unwrap();
    let config = DashboardConfig {
        catalog_path: Some(dir.path().join("missing.yaml")),
        ..DashboardConfig::default()
    };

    temp_env::with_var(CATALOG_PATH_ENV, Some(env_catalog.to_str().unwrap()), || {
        let catalog = ParameterCatalog::load(&config, None).unwrap();
        assert_eq!(catalog.list_operations(), vec!["Bitcoin Overview"]);
    });

    temp_env::with_var_unset(CATALOG_PATH_ENV, || {
        assert!(matches!(ParameterCatalog::load(&config, None), Err(CatalogError::Io { .. })));
    });
}
