//! Shared fixtures for scaffolding tests.

#![allow(dead_code)]

use keyforge_model::{EntityType, KeyGroup, PropertyDescriptor, StaticSchema, TypeTag};

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub fn order() -> EntityType {
    EntityType::new("Order")
        .with_key_group(KeyGroup::named(
            "PK_Order",
            vec![
                PropertyDescriptor::key("OrderId", TypeTag::Int32),
                PropertyDescriptor::key("LineNumber", TypeTag::Int32),
            ],
        ))
        .with_property(PropertyDescriptor::column("Sku", TypeTag::String))
}

pub fn customer() -> EntityType {
    EntityType::new("Customer").with_key_group(KeyGroup::new(vec![
        PropertyDescriptor::key("CustomerId", TypeTag::Int32),
        PropertyDescriptor::key("RegionCode", TypeTag::String),
    ]))
}

/// An entity with no primary-key properties.
pub fn audit_log() -> EntityType {
    EntityType::new("AuditLog")
        .with_property(PropertyDescriptor::column("Message", TypeTag::String))
}

/// `X` is declared as int32 in the first key group and int64 in the second.
pub fn widget() -> EntityType {
    EntityType::new("Widget")
        .with_key_group(KeyGroup::new(vec![
            PropertyDescriptor::key("X", TypeTag::Int32),
            PropertyDescriptor::key("Y", TypeTag::String),
        ]))
        .with_key_group(KeyGroup::new(vec![PropertyDescriptor::key("X", TypeTag::Int64)]))
}

pub fn shop_schema() -> StaticSchema {
    StaticSchema::new()
        .with_entity(order())
        .with_entity(customer())
        .with_entity(audit_log())
        .with_entity(widget())
}
