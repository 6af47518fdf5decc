use keyforge_model::{Entity, StaticSchema, Value};
use keyforge_scaffold::{
    InMemoryModel, ModelBuilder, ModelConfigError, ScaffoldConfig, ScaffoldError, ScaffoldSession,
};
use keyforge_synth::{Diagnostic, SynthError};
use pretty_assertions::assert_eq;
use serde_json::json;

mod common;

// ── Single entity ────────────────────────────────────────────────

#[test]
fn order_key_is_registered_with_builder() {
    common::init_tracing();
    let schema = common::shop_schema();
    let mut model = InMemoryModel::new();
    let mut session = ScaffoldSession::new(ScaffoldConfig::default());

    let configured = session
        .configure_entity(&schema, &mut model, "Order")
        .unwrap();

    assert_eq!(configured.entity_set, "Order");
    assert_eq!(configured.key_fields, vec!["OrderId", "LineNumber"]);
    assert!(configured.key_type.is_some());
    assert_eq!(session.registry().len(), 1);

    let selector = model.key_for("Order").expect("key declared");
    let key = selector
        .extract(&Entity::new("Order", json!({"OrderId": 7, "LineNumber": 2, "Sku": "A"})))
        .unwrap();
    assert_eq!(key.values(), &[Value::Int32(7), Value::Int32(2)]);
    assert_eq!(Some(key.synthesized_type().id()), configured.key_type);
}

#[test]
fn order_loaded_from_json_is_configured() {
    let schema = StaticSchema::from_json(
        r#"{
            "entity_types": [{
                "name": "Order",
                "key_groups": [{
                    "name": "PK_Order",
                    "properties": [
                        {"name": "OrderId", "type": "int32", "is_primary_key": true},
                        {"name": "LineNumber", "type": "int32", "is_primary_key": true}
                    ]
                }]
            }]
        }"#,
    )
    .unwrap();
    let mut model = InMemoryModel::new();
    let mut session = ScaffoldSession::default();

    let configured = session
        .configure_entity(&schema, &mut model, "Order")
        .unwrap();
    assert_eq!(configured.key_fields, vec!["OrderId", "LineNumber"]);

    let key = model
        .key_for("Order")
        .unwrap()
        .extract(&Entity::new("Order", json!({"OrderId": 1001, "LineNumber": 4})))
        .unwrap();
    assert_eq!(key.values(), &[Value::Int32(1001), Value::Int32(4)]);
}

#[test]
fn entity_set_name_override_is_used() {
    let schema = common::shop_schema();
    let mut model = InMemoryModel::new();
    let config = ScaffoldConfig::from_toml_str(
        r#"
        [entity_sets]
        Order = "Orders"
        "#,
    )
    .unwrap();
    let mut session = ScaffoldSession::new(config);

    session.configure_entity(&schema, &mut model, "Order").unwrap();
    let set = model.entity_set("Orders").unwrap();
    assert_eq!(set.entity_type, "Order");
    assert!(model.entity_set("Order").is_none());
}

#[test]
fn unknown_entity_type_is_a_schema_error() {
    let schema = common::shop_schema();
    let mut model = InMemoryModel::new();
    let mut session = ScaffoldSession::default();

    let err = session
        .configure_entity(&schema, &mut model, "Invoice")
        .unwrap_err();
    assert!(matches!(err, ScaffoldError::Schema(_)));
}

// ── Empty keys ───────────────────────────────────────────────────

#[test]
fn keyless_entity_fails_when_key_required() {
    let schema = common::shop_schema();
    let mut model = InMemoryModel::new();
    let mut session = ScaffoldSession::default();

    let err = session
        .configure_entity(&schema, &mut model, "AuditLog")
        .unwrap_err();
    assert!(matches!(err, ScaffoldError::Synth(SynthError::Configuration(_))));
    assert!(model.entity_sets().is_empty());
    assert!(session.registry().is_empty());
}

#[test]
fn keyless_entity_registers_set_when_key_optional() {
    let schema = common::shop_schema();
    let mut model = InMemoryModel::new();
    let config = ScaffoldConfig {
        require_key: false,
        ..ScaffoldConfig::default()
    };
    let mut session = ScaffoldSession::new(config);

    let configured = session
        .configure_entity(&schema, &mut model, "AuditLog")
        .unwrap();
    assert_eq!(configured.key_type, None);
    assert!(configured.key_fields.is_empty());
    assert!(model.entity_set("AuditLog").is_some());
    assert!(model.key_for("AuditLog").is_none());
}

// ── Diagnostics ──────────────────────────────────────────────────

#[test]
fn duplicate_key_field_is_reported_and_configuration_proceeds() {
    let schema = common::shop_schema();
    let mut model = InMemoryModel::new();
    let mut session = ScaffoldSession::default();

    let configured = session
        .configure_entity(&schema, &mut model, "Widget")
        .unwrap();
    assert_eq!(configured.key_fields, vec!["X", "Y"]);
    assert_eq!(configured.diagnostics.len(), 1);
    assert!(matches!(
        &configured.diagnostics[0],
        Diagnostic::DuplicateKeyField { field, .. } if field == "X"
    ));

    let key = model
        .key_for("Widget")
        .unwrap()
        .extract(&Entity::new("Widget", json!({"X": 5, "Y": "w"})))
        .unwrap();
    assert_eq!(key.get("X"), Some(&Value::Int64(5)));
}

// ── Builder failures ─────────────────────────────────────────────

#[test]
fn builder_error_is_propagated() {
    let schema = common::shop_schema();
    let mut model = InMemoryModel::new();
    model.register_entity_set("Order", "Other").unwrap();
    let mut session = ScaffoldSession::default();

    let err = session
        .configure_entity(&schema, &mut model, "Order")
        .unwrap_err();
    assert!(matches!(
        err,
        ScaffoldError::Model(ModelConfigError::DuplicateEntitySet(ref name)) if name == "Order"
    ));
    assert!(model.key_for("Order").is_none());
    // the key type synthesized before the rejection is kept
    assert_eq!(session.registry().len(), 1);
}

#[test]
fn reconfiguring_an_entity_is_rejected_by_builder() {
    let schema = common::shop_schema();
    let mut model = InMemoryModel::new();
    let config = ScaffoldConfig::default();
    let mut first = ScaffoldSession::new(config.clone());
    first.configure_entity(&schema, &mut model, "Order").unwrap();

    // a fresh session with a different set name reaches the key declaration
    let mut renamed = config;
    renamed
        .entity_sets
        .insert("Order".to_string(), "OrderLines".to_string());
    let mut second = ScaffoldSession::new(renamed);
    let err = second
        .configure_entity(&schema, &mut model, "Order")
        .unwrap_err();
    assert!(matches!(
        err,
        ScaffoldError::Model(ModelConfigError::KeyAlreadyDeclared(_))
    ));
    // the new set was registered before the key was rejected
    assert!(model.entity_set("OrderLines").is_some());
}

// ── Full runs ────────────────────────────────────────────────────

#[test]
fn configure_all_isolates_failures() {
    common::init_tracing();
    let schema = common::shop_schema();
    let mut model = InMemoryModel::new();
    let mut session = ScaffoldSession::default();

    let report = session.configure_all(&schema, &mut model);

    let configured: Vec<&str> = report
        .configured
        .iter()
        .map(|c| c.entity_type.as_str())
        .collect();
    assert_eq!(configured, vec!["Order", "Customer", "Widget"]);
    assert_eq!(report.failed.len(), 1);
    assert_eq!(report.failed[0].0, "AuditLog");
    assert!(!report.is_success());
    assert_eq!(report.diagnostics().count(), 1);
    assert_eq!(model.entity_sets().len(), 3);
}

#[test]
fn configure_all_honors_exclusions() {
    let schema = common::shop_schema();
    let mut model = InMemoryModel::new();
    let config = ScaffoldConfig::from_toml_str(r#"exclude = ["AuditLog", "Widget"]"#).unwrap();
    let mut session = ScaffoldSession::new(config);

    let report = session.configure_all(&schema, &mut model);
    assert!(report.is_success());
    assert_eq!(report.skipped, vec!["AuditLog", "Widget"]);
    assert_eq!(report.configured.len(), 2);
    assert!(model.key_for("Widget").is_none());
}

#[test]
fn each_entity_gets_its_own_key_type() {
    let mut copy = common::order();
    copy.name = "OrderArchive".to_string();
    let schema = StaticSchema::new().with_entity(common::order()).with_entity(copy);
    let mut model = InMemoryModel::new();
    let mut session = ScaffoldSession::default();

    let report = session.configure_all(&schema, &mut model);
    assert!(report.is_success());
    let ids: Vec<_> = report.configured.iter().map(|c| c.key_type).collect();
    assert_ne!(ids[0], ids[1]);

    let registry = session.finish();
    assert_eq!(registry.len(), 2);
}
