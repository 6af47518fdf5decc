//! Shared test helpers for synthesis tests.

#![allow(dead_code)]

use keyforge_model::{EntityType, KeyGroup, PropertyDescriptor, TypeTag};
use keyforge_synth::FieldSpecs;

/// Installs a test subscriber honoring `RUST_LOG`. Safe to call repeatedly.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// `Order` with composite key `(OrderId: int32, LineNumber: int32)`.
pub fn order_type() -> EntityType {
    EntityType::new("Order")
        .with_key_group(KeyGroup::named(
            "PK_Order",
            vec![
                PropertyDescriptor::key("OrderId", TypeTag::Int32),
                PropertyDescriptor::key("LineNumber", TypeTag::Int32),
            ],
        ))
        .with_property(PropertyDescriptor::column("Quantity", TypeTag::Int32))
}

/// `Customer` with composite key `(CustomerId: int32, RegionCode: string)`.
pub fn customer_type() -> EntityType {
    EntityType::new("Customer").with_key_group(KeyGroup::new(vec![
        PropertyDescriptor::key("CustomerId", TypeTag::Int32),
        PropertyDescriptor::key("RegionCode", TypeTag::String),
    ]))
}

pub fn specs(fields: &[(&str, TypeTag)]) -> FieldSpecs {
    fields.iter().copied().collect()
}

/// `n` distinct int64 fields named `F0..F{n-1}`.
pub fn wide_specs(n: usize) -> FieldSpecs {
    let mut specs = FieldSpecs::new();
    for i in 0..n {
        specs.insert(&format!("F{i}"), TypeTag::Int64);
    }
    specs
}
