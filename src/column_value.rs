//! A JSON scalar that is stored in SQLite exactly as the client sent it.

use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

/// A value taken from a JSON request body and bound to a SQL parameter without validation.
///
/// Incoming JSON is converted as follows:
/// - `null` and missing fields become SQL `NULL`,
/// - booleans become the integers 0 and 1,
/// - numbers become `INTEGER` if they fit in an `i64`, otherwise `REAL`,
/// - strings become `TEXT`,
/// - arrays and objects become their JSON text.
///
/// Anything the table does not accept is therefore rejected by SQLite, not by
/// the request handler.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum ColumnValue {
    /// SQL `NULL`.
    #[default]
    Null,
    /// A 64-bit signed integer.
    Integer(i64),
    /// A 64-bit float.
    Real(f64),
    /// A UTF-8 string.
    Text(String),
}

impl From<Value> for ColumnValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => ColumnValue::Null,
            Value::Bool(flag) => ColumnValue::Integer(flag.into()),
            Value::Number(number) => match number.as_i64() {
                Some(integer) => ColumnValue::Integer(integer),
                None => number
                    .as_f64()
                    .map(ColumnValue::Real)
                    .unwrap_or(ColumnValue::Null),
            },
            Value::String(text) => ColumnValue::Text(text),
            compound @ (Value::Array(_) | Value::Object(_)) => {
                ColumnValue::Text(compound.to_string())
            }
        }
    }
}

impl ColumnValue {
    /// Get the text of a `TEXT` value, or `None` for any other SQL type.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            ColumnValue::Text(text) => Some(text),
            _ => None,
        }
    }
}

impl PartialEq<&str> for ColumnValue {
    fn eq(&self, other: &&str) -> bool {
        self.as_text() == Some(*other)
    }
}

impl From<&str> for ColumnValue {
    fn from(value: &str) -> Self {
        ColumnValue::Text(value.to_owned())
    }
}

impl From<i64> for ColumnValue {
    fn from(value: i64) -> Self {
        ColumnValue::Integer(value)
    }
}

impl From<f64> for ColumnValue {
    fn from(value: f64) -> Self {
        ColumnValue::Real(value)
    }
}

impl<'de> Deserialize<'de> for ColumnValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Value::deserialize(deserializer).map(ColumnValue::from)
    }
}

impl Serialize for ColumnValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            ColumnValue::Null => serializer.serialize_none(),
            ColumnValue::Integer(integer) => serializer.serialize_i64(*integer),
            ColumnValue::Real(real) => serializer.serialize_f64(*real),
            ColumnValue::Text(text) => serializer.serialize_str(text),
        }
    }
}

impl ToSql for ColumnValue {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        let value = match self {
            ColumnValue::Null => ValueRef::Null,
            ColumnValue::Integer(integer) => ValueRef::Integer(*integer),
            ColumnValue::Real(real) => ValueRef::Real(*real),
            ColumnValue::Text(text) => ValueRef::Text(text.as_bytes()),
        };

        Ok(ToSqlOutput::Borrowed(value))
    }
}

impl FromSql for ColumnValue {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        match value {
            ValueRef::Null => Ok(ColumnValue::Null),
            ValueRef::Integer(integer) => Ok(ColumnValue::Integer(integer)),
            ValueRef::Real(real) => Ok(ColumnValue::Real(real)),
            ValueRef::Text(_) => value.as_str().map(|text| ColumnValue::Text(text.to_owned())),
            ValueRef::Blob(_) => Err(FromSqlError::InvalidType),
        }
    }
}

#[cfg(test)]
mod tests {
    use rusqlite::Connection;
    use serde_json::json;

    use super::ColumnValue;

    #[test]
    fn converts_json_scalars() {
        assert_eq!(ColumnValue::from(json!(null)), ColumnValue::Null);
        assert_eq!(ColumnValue::from(json!(true)), ColumnValue::Integer(1));
        assert_eq!(ColumnValue::from(json!(100)), ColumnValue::Integer(100));
        assert_eq!(ColumnValue::from(json!(12.5)), ColumnValue::Real(12.5));
        assert_eq!(
            ColumnValue::from(json!("PENDING")),
            ColumnValue::Text("PENDING".to_owned())
        );
    }

    #[test]
    fn converts_compound_json_to_text() {
        assert_eq!(
            ColumnValue::from(json!({ "a": 1 })),
            ColumnValue::Text(r#"{"a":1}"#.to_owned())
        );
        assert_eq!(
            ColumnValue::from(json!([1, 2])),
            ColumnValue::Text("[1,2]".to_owned())
        );
    }

    #[test]
    fn only_text_equals_str() {
        assert_eq!(ColumnValue::from("42"), "42");
        assert_ne!(ColumnValue::Integer(42), "42");
        assert_eq!(ColumnValue::Integer(42).as_text(), None);
    }

    #[test]
    fn serializes_as_plain_json() {
        assert_eq!(
            serde_json::to_value(ColumnValue::Integer(100)).unwrap(),
            json!(100)
        );
        assert_eq!(
            serde_json::to_value(ColumnValue::Real(0.5)).unwrap(),
            json!(0.5)
        );
        assert_eq!(serde_json::to_value(ColumnValue::Null).unwrap(), json!(null));
        assert_eq!(
            serde_json::to_value(ColumnValue::from("u1")).unwrap(),
            json!("u1")
        );
    }

    #[test]
    fn keeps_sql_type_in_untyped_column() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute("CREATE TABLE scratch (value)", ()).unwrap();

        for want in [
            ColumnValue::Null,
            ColumnValue::Integer(-7),
            ColumnValue::Real(1.25),
            ColumnValue::from("text"),
        ] {
            conn.execute("DELETE FROM scratch", ()).unwrap();
            conn.execute("INSERT INTO scratch (value) VALUES (?1)", (&want,))
                .unwrap();

            let got: ColumnValue = conn
                .query_row("SELECT value FROM scratch", (), |row| row.get(0))
                .unwrap();

            assert_eq!(want, got);
        }
    }
}
