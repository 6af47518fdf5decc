use crate::descriptor::FieldSpecs;
use crate::error::{SynthError, SynthResult};
use crate::registry::SynthTypeId;
use keyforge_model::{PropertySource, TypeTag, Value};
use std::fmt;
use std::sync::Arc;

/// A record type built at configuration time from ordered field specs.
///
/// Each field has a typed backing slot and a get/set [`Accessor`]. Every
/// type has a no-argument constructor ([`SynthesizedType::construct`]); types
/// with at least one field also have a [`FullConstructor`] taking every field
/// positionally, in field order.
#[derive(Debug)]
pub struct SynthesizedType {
    id: SynthTypeId,
    name: String,
    fields: FieldSpecs,
}

impl SynthesizedType {
    pub(crate) fn new(id: SynthTypeId, name: String, fields: FieldSpecs) -> Self {
        Self { id, name, fields }
    }

    pub fn id(&self) -> SynthTypeId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The field specs this type was built from, in constructor order.
    pub fn fields(&self) -> &FieldSpecs {
        &self.fields
    }

    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    pub fn accessor(&self, name: &str) -> Option<Accessor<'_>> {
        self.fields
            .position(name)
            .map(|index| Accessor { ty: self, index })
    }

    /// One accessor per field, in constructor order.
    pub fn accessors(&self) -> impl Iterator<Item = Accessor<'_>> {
        (0..self.fields.len()).map(|index| Accessor { ty: self, index })
    }

    /// No-argument constructor: every slot holds its type's default.
    pub fn construct(self: &Arc<Self>) -> Record {
        let slots = self
            .fields
            .iter()
            .map(|spec| spec.field_type.default_value())
            .collect();
        Record {
            ty: Arc::clone(self),
            slots,
        }
    }

    /// The positional constructor, absent for a type with no fields.
    pub fn full_constructor(self: &Arc<Self>) -> Option<FullConstructor> {
        (!self.fields.is_empty()).then(|| FullConstructor { ty: Arc::clone(self) })
    }

    fn coerce(&self, index: usize, value: Value) -> SynthResult<Value> {
        let spec = &self.fields.as_slice()[index];
        value
            .coerce_to(spec.field_type)
            .ok_or_else(|| SynthError::TypeMismatch {
                field: spec.name.clone(),
                expected: spec.field_type,
                actual: value.tag().map_or("null", TypeTag::as_str).to_string(),
            })
    }

    fn check_owner(&self, record: &Record) -> SynthResult<()> {
        if record.ty.id == self.id {
            Ok(())
        } else {
            Err(SynthError::ForeignRecord {
                expected: self.name.clone(),
                actual: record.ty.name.clone(),
            })
        }
    }
}

/// Get/set access to one field of a synthesized type.
#[derive(Debug, Clone, Copy)]
pub struct Accessor<'a> {
    ty: &'a SynthesizedType,
    index: usize,
}

impl<'a> Accessor<'a> {
    pub fn name(&self) -> &'a str {
        &self.ty.fields.as_slice()[self.index].name
    }

    pub fn field_type(&self) -> TypeTag {
        self.ty.fields.as_slice()[self.index].field_type
    }

    /// Position of the field in constructor order.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn get<'r>(&self, record: &'r Record) -> SynthResult<&'r Value> {
        self.ty.check_owner(record)?;
        Ok(&record.slots[self.index])
    }

    /// Overwrites the slot. The value only has to be comparable to the
    /// field's declared type.
    pub fn set(&self, record: &mut Record, value: Value) -> SynthResult<()> {
        self.ty.check_owner(record)?;
        record.slots[self.index] = self.ty.coerce(self.index, value)?;
        Ok(())
    }
}

/// Constructor taking one argument per field, in field order.
#[derive(Debug, Clone)]
pub struct FullConstructor {
    ty: Arc<SynthesizedType>,
}

impl FullConstructor {
    pub fn synthesized_type(&self) -> &Arc<SynthesizedType> {
        &self.ty
    }

    /// Parameter types, in order.
    pub fn params(&self) -> Vec<TypeTag> {
        self.ty.fields.iter().map(|s| s.field_type).collect()
    }

    pub fn arity(&self) -> usize {
        self.ty.fields.len()
    }

    /// Builds a record from default state, then assigns argument `i` to
    /// slot `i`. Either every argument is stored or an error is returned.
    pub fn invoke(&self, args: Vec<Value>) -> SynthResult<Record> {
        if args.len() != self.arity() {
            return Err(SynthError::ArityMismatch {
                expected: self.arity(),
                actual: args.len(),
            });
        }
        let mut record = self.ty.construct();
        for (index, arg) in args.into_iter().enumerate() {
            record.slots[index] = self.ty.coerce(index, arg)?;
        }
        Ok(record)
    }
}

/// An instance of a synthesized type.
#[derive(Clone)]
pub struct Record {
    ty: Arc<SynthesizedType>,
    slots: Vec<Value>,
}

impl Record {
    pub fn synthesized_type(&self) -> &Arc<SynthesizedType> {
        &self.ty
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.ty.fields.position(field).map(|index| &self.slots[index])
    }

    pub fn set(&mut self, field: &str, value: Value) -> SynthResult<()> {
        let index = self
            .ty
            .fields
            .position(field)
            .ok_or_else(|| SynthError::UnknownField {
                ty: self.ty.name.clone(),
                field: field.to_string(),
            })?;
        self.slots[index] = self.ty.coerce(index, value)?;
        Ok(())
    }

    /// Slot values in constructor order.
    pub fn values(&self) -> &[Value] {
        &self.slots
    }

    pub fn to_json(&self) -> serde_json::Value {
        let map = self
            .ty
            .fields
            .names()
            .zip(&self.slots)
            .map(|(name, value)| (name.to_string(), value.to_json()))
            .collect::<serde_json::Map<_, _>>();
        serde_json::Value::Object(map)
    }
}

impl PartialEq for Record {
    fn eq(&self, other: &Self) -> bool {
        self.ty.id == other.ty.id && self.slots == other.slots
    }
}

impl PropertySource for Record {
    fn property(&self, name: &str) -> Option<Value> {
        self.get(name).cloned()
    }
}

impl fmt::Debug for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct(&self.ty.name);
        for (name, value) in self.ty.fields.names().zip(&self.slots) {
            s.field(name, value);
        }
        s.finish()
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {{ ", self.ty.name)?;
        for (i, (name, value)) in self.ty.fields.names().zip(&self.slots).enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{name}: {value}")?;
        }
        f.write_str(" }")
    }
}
