//! Field shaping of materialized rows
//!
//! Rows come back from a projected SELECT whose columns are aliased to API
//! field names. Shaping turns each row into a JSON object holding exactly the
//! requested fields, in request order.

use chrono::{DateTime, Utc};
use serde_json::{Map, Number, Value};
use sqlx::{postgres::PgRow, Row};
use uuid::Uuid;

use super::view::{FieldDef, FieldKind};

/// A shaped row: API field name to JSON value
pub type Entity = Map<String, Value>;

/// Decode a single projected column into JSON
///
/// NULL becomes `null` for every kind. Non-finite floats also become `null`
/// since JSON cannot carry them.
pub fn decode_field(row: &PgRow, field: &FieldDef) -> Result<Value, sqlx::Error> {
    let key = field.name;
    let value = match field.kind {
        FieldKind::Text => row.try_get::<Option<String>, _>(key)?.map(Value::String),
        FieldKind::Uuid => row
            .try_get::<Option<Uuid>, _>(key)?
            .map(|id| Value::String(id.to_string())),
        FieldKind::Decimal => row
            .try_get::<Option<f64>, _>(key)?
            .and_then(Number::from_f64)
            .map(Value::Number),
        FieldKind::Timestamp => row
            .try_get::<Option<DateTime<Utc>>, _>(key)?
            .map(|ts| Value::String(ts.to_rfc3339())),
    };
    Ok(value.unwrap_or(Value::Null))
}

/// Shape one row onto `fields`
pub fn shape_row(row: &PgRow, fields: &[&FieldDef]) -> Result<Entity, sqlx::Error> {
    let mut entity = Entity::with_capacity(fields.len());
    for field in fields {
        entity.insert(field.name.to_string(), decode_field(row, field)?);
    }
    Ok(entity)
}

/// Keep only `fields` of an already-serialized record
///
/// Used for typed records (e.g. the result of a create command) that should
/// be returned in the same shape as list rows.
pub fn shape_value(value: Value, fields: &[&FieldDef]) -> Entity {
    let mut source = match value {
        Value::Object(map) => map,
        _ => Map::new(),
    };
    fields
        .iter()
        .map(|f| (f.name.to_string(), source.remove(f.name).unwrap_or(Value::Null)))
        .collect()
}
