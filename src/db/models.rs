// src/db/models.rs
//
// The `users` table has no fixed shape as far as this service is concerned:
// every row is forwarded as a JSON object keyed by column name.

use chrono::{NaiveDate, NaiveDateTime};
use serde_json::{Map, Number, Value};
use sqlx::{
    error::UnexpectedNullError,
    mysql::{types::MySqlTime, MySqlColumn, MySqlRow},
    Column, Decode, MySql, Row, TypeInfo, ValueRef,
};

use crate::db::error::DbError;

/// One row of `users`, column order preserved.
pub type UserRow = Map<String, Value>;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3fZ";

/// How a column's bytes become JSON, keyed off the MySQL type name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Signed,
    Unsigned,
    Float,
    Double,
    Decimal,
    Text,
    Json,
    DateTime,
    Date,
    Time,
    Bytes,
    Null,
    Unknown,
}

impl ColumnKind {
    pub fn from_type_name(name: &str) -> Self {
        let upper = name.to_ascii_uppercase();
        let (base, unsigned) = match upper.strip_suffix(" UNSIGNED") {
            Some(base) => (base, true),
            None => (upper.as_str(), false),
        };

        match base {
            "BOOLEAN" | "TINYINT" | "SMALLINT" | "MEDIUMINT" | "INT" | "BIGINT" | "YEAR" => {
                if unsigned {
                    ColumnKind::Unsigned
                } else {
                    ColumnKind::Signed
                }
            }
            "FLOAT" => ColumnKind::Float,
            "DOUBLE" => ColumnKind::Double,
            "DECIMAL" => ColumnKind::Decimal,
            "CHAR" | "VARCHAR" | "TINYTEXT" | "TEXT" | "MEDIUMTEXT" | "LONGTEXT" | "ENUM"
            | "SET" => ColumnKind::Text,
            "JSON" => ColumnKind::Json,
            "DATETIME" | "TIMESTAMP" => ColumnKind::DateTime,
            "DATE" => ColumnKind::Date,
            "TIME" => ColumnKind::Time,
            "BINARY" | "VARBINARY" | "TINYBLOB" | "BLOB" | "MEDIUMBLOB" | "LONGBLOB" | "BIT"
            | "GEOMETRY" => ColumnKind::Bytes,
            "NULL" => ColumnKind::Null,
            _ => ColumnKind::Unknown,
        }
    }
}

/// Converts a fetched row into a JSON object, one key per column.
pub fn row_to_json(row: &MySqlRow) -> Result<UserRow, DbError> {
    let mut obj = Map::with_capacity(row.columns().len());
    for col in row.columns() {
        obj.insert(col.name().to_string(), column_value(row, col)?);
    }
    Ok(obj)
}

fn column_value(row: &MySqlRow, col: &MySqlColumn) -> Result<Value, DbError> {
    let idx = col.ordinal();
    let type_name = col.type_info().name().to_string();

    let raw = row.try_get_raw(idx).map_err(|e| decode_err(col, &type_name, e))?;
    if raw.is_null() {
        return Ok(Value::Null);
    }

    let err = |e: sqlx::Error| decode_err(col, &type_name, e);

    let value = match ColumnKind::from_type_name(&type_name) {
        ColumnKind::Signed => Value::from(row.try_get_unchecked::<i64, _>(idx).map_err(err)?),
        ColumnKind::Unsigned => Value::from(row.try_get_unchecked::<u64, _>(idx).map_err(err)?),
        ColumnKind::Float => float32_value(row.try_get_unchecked::<f32, _>(idx).map_err(err)?),
        ColumnKind::Double => float_value(row.try_get_unchecked::<f64, _>(idx).map_err(err)?),
        // exact textual form, no float rounding
        ColumnKind::Decimal | ColumnKind::Text => {
            Value::String(row.try_get_unchecked::<String, _>(idx).map_err(err)?)
        }
        ColumnKind::Json => {
            let text = row.try_get_unchecked::<String, _>(idx).map_err(err)?;
            serde_json::from_str::<Value>(&text)
                .map_err(|e| decode_err(col, &type_name, sqlx::Error::Decode(Box::new(e))))?
        }
        ColumnKind::DateTime => calendar_value(row, col, &type_name, |dt: NaiveDateTime| {
            Value::String(format_timestamp(&dt))
        })?,
        ColumnKind::Date => calendar_value(row, col, &type_name, |d: NaiveDate| {
            d.and_hms_opt(0, 0, 0)
                .map(|dt| Value::String(format_timestamp(&dt)))
                .unwrap_or(Value::Null)
        })?,
        ColumnKind::Time => {
            Value::String(format_time(&row.try_get_unchecked::<MySqlTime, _>(idx).map_err(err)?))
        }
        ColumnKind::Bytes => buffer_value(row.try_get_unchecked::<Vec<u8>, _>(idx).map_err(err)?),
        ColumnKind::Null => Value::Null,
        ColumnKind::Unknown => {
            let bytes = row.try_get_unchecked::<Vec<u8>, _>(idx).map_err(err)?;
            match String::from_utf8(bytes) {
                Ok(text) => Value::String(text),
                Err(e) => buffer_value(e.into_bytes()),
            }
        }
    };

    Ok(value)
}

/// Decodes a DATE/DATETIME/TIMESTAMP. Zero dates (`0000-00-00`, or a zero
/// month/day) have no calendar representation and become `null`; anything
/// else that fails to decode is an error.
fn calendar_value<T, F>(
    row: &MySqlRow,
    col: &MySqlColumn,
    type_name: &str,
    render: F,
) -> Result<Value, DbError>
where
    T: for<'r> Decode<'r, MySql>,
    F: FnOnce(T) -> Value,
{
    let idx = col.ordinal();
    match row.try_get_unchecked::<T, _>(idx) {
        Ok(v) => Ok(render(v)),
        Err(e) if is_zero_date_error(&e) => Ok(Value::Null),
        Err(e) => {
            // text protocol hands us the literal instead of an empty value
            let zero_text = row
                .try_get_unchecked::<&str, _>(idx)
                .map(is_zero_date_text)
                .unwrap_or(false);
            if zero_text {
                Ok(Value::Null)
            } else {
                Err(decode_err(col, type_name, e))
            }
        }
    }
}

/// Binary protocol: sqlx reports a zero date as an unexpected null.
fn is_zero_date_error(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::ColumnDecode { source, .. } if source.is::<UnexpectedNullError>())
}

pub fn is_zero_date_text(text: &str) -> bool {
    let date = text.get(..10).unwrap_or(text);
    let mut parts = date.split('-').skip(1);
    matches!(
        (parts.next(), parts.next()),
        (Some(month), Some(day)) if month == "00" || day == "00"
    )
}

/// MySQL's own TIME text: sign, hours past 24 allowed, microseconds when
/// present (`-01:30:00`, `838:59:59`, `12:00:00.500000`).
pub fn format_time(t: &MySqlTime) -> String {
    let sign = if t.sign().is_negative() { "-" } else { "" };
    let mut out = format!(
        "{sign}{:02}:{:02}:{:02}",
        t.hours(),
        t.minutes(),
        t.seconds()
    );
    if t.microseconds() != 0 {
        out.push_str(&format!(".{:06}", t.microseconds()));
    }
    out
}

fn decode_err(col: &MySqlColumn, type_name: &str, source: sqlx::Error) -> DbError {
    DbError::Decode {
        column: col.name().to_string(),
        type_name: type_name.to_string(),
        source,
    }
}

pub fn format_timestamp(dt: &NaiveDateTime) -> String {
    dt.format(TIMESTAMP_FORMAT).to_string()
}

fn float_value(f: f64) -> Value {
    Number::from_f64(f).map(Value::Number).unwrap_or(Value::Null)
}

/// FLOAT goes through its shortest `f32` text so `1.1` stays `1.1` rather
/// than the widened `1.100000023841858`.
fn float32_value(f: f32) -> Value {
    f.to_string()
        .parse::<f64>()
        .map(float_value)
        .unwrap_or(Value::Null)
}

/// Binary columns keep the `{"type":"Buffer","data":[..]}` shape clients
/// of this endpoint already parse.
pub fn buffer_value(bytes: Vec<u8>) -> Value {
    let data = bytes.into_iter().map(Value::from).collect();
    let mut obj = Map::with_capacity(2);
    obj.insert("type".into(), Value::String("Buffer".into()));
    obj.insert("data".into(), Value::Array(data));
    Value::Object(obj)
}
