use rust_decimal::Decimal;
use time::{
    Date, OffsetDateTime, PrimitiveDateTime, Time, format_description::well_known::Rfc3339,
    macros::format_description,
};
use uuid::Uuid;

macro_rules! write_integer {
    ($out:ident, $value:expr) => {{
        let mut buffer = itoa::Buffer::new();
        $out.push_str(buffer.format($value));
    }};
}
macro_rules! write_float {
    ($out:ident, $value:expr) => {{
        let mut buffer = ryu::Buffer::new();
        $out.push_str(buffer.format($value));
    }};
}

/// Dynamically typed value a placeholder can resolve to.
///
/// Every variant carries an `Option` payload so that a null still knows its
/// declared type: the null policy renders a textual null (`Varchar(None)`) as
/// an empty string but any other null as the `NULL` keyword.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Value {
    #[default]
    Null,
    Boolean(Option<bool>),
    Int8(Option<i8>),
    Int16(Option<i16>),
    Int32(Option<i32>),
    Int64(Option<i64>),
    Int128(Option<i128>),
    UInt8(Option<u8>),
    UInt16(Option<u16>),
    UInt32(Option<u32>),
    UInt64(Option<u64>),
    UInt128(Option<u128>),
    Float32(Option<f32>),
    Float64(Option<f64>),
    Decimal(Option<Decimal>),
    Varchar(Option<String>),
    Date(Option<Date>),
    Time(Option<Time>),
    Timestamp(Option<PrimitiveDateTime>),
    TimestampWithTimezone(Option<OffsetDateTime>),
    Uuid(Option<Uuid>),
}

impl Value {
    pub fn is_null(&self) -> bool {
        match self {
            Value::Null => true,
            Value::Boolean(v) => v.is_none(),
            Value::Int8(v) => v.is_none(),
            Value::Int16(v) => v.is_none(),
            Value::Int32(v) => v.is_none(),
            Value::Int64(v) => v.is_none(),
            Value::Int128(v) => v.is_none(),
            Value::UInt8(v) => v.is_none(),
            Value::UInt16(v) => v.is_none(),
            Value::UInt32(v) => v.is_none(),
            Value::UInt64(v) => v.is_none(),
            Value::UInt128(v) => v.is_none(),
            Value::Float32(v) => v.is_none(),
            Value::Float64(v) => v.is_none(),
            Value::Decimal(v) => v.is_none(),
            Value::Varchar(v) => v.is_none(),
            Value::Date(v) => v.is_none(),
            Value::Time(v) => v.is_none(),
            Value::Timestamp(v) => v.is_none(),
            Value::TimestampWithTimezone(v) => v.is_none(),
            Value::Uuid(v) => v.is_none(),
        }
    }

    /// Whether the declared type renders as plain text. Drives the null
    /// policy distinction between `''` and `NULL`.
    pub fn is_textual(&self) -> bool {
        matches!(self, Value::Varchar(..))
    }

    /// Append the substitution text for this value. Nulls render as the
    /// `NULL` keyword; strings are written verbatim, without surrounding
    /// quotes (the template supplies its own quoting).
    pub fn write_text(&self, out: &mut String) {
        match self {
            Value::Boolean(Some(v)) => out.push_str(if *v { "true" } else { "false" }),
            Value::Int8(Some(v)) => write_integer!(out, *v),
            Value::Int16(Some(v)) => write_integer!(out, *v),
            Value::Int32(Some(v)) => write_integer!(out, *v),
            Value::Int64(Some(v)) => write_integer!(out, *v),
            Value::Int128(Some(v)) => write_integer!(out, *v),
            Value::UInt8(Some(v)) => write_integer!(out, *v),
            Value::UInt16(Some(v)) => write_integer!(out, *v),
            Value::UInt32(Some(v)) => write_integer!(out, *v),
            Value::UInt64(Some(v)) => write_integer!(out, *v),
            Value::UInt128(Some(v)) => write_integer!(out, *v),
            Value::Float32(Some(v)) => write_float!(out, *v),
            Value::Float64(Some(v)) => write_float!(out, *v),
            Value::Decimal(Some(v)) => out.push_str(&v.to_string()),
            Value::Varchar(Some(v)) => out.push_str(v),
            Value::Date(Some(v)) => {
                if let Ok(text) = v.format(format_description!("[year]-[month]-[day]")) {
                    out.push_str(&text);
                }
            }
            Value::Time(Some(v)) => {
                if let Ok(text) = v.format(format_description!("[hour]:[minute]:[second]")) {
                    out.push_str(&text);
                }
            }
            Value::Timestamp(Some(v)) => {
                if let Ok(text) = v.format(format_description!(
                    "[year]-[month]-[day] [hour]:[minute]:[second]"
                )) {
                    out.push_str(&text);
                }
            }
            Value::TimestampWithTimezone(Some(v)) => {
                if let Ok(text) = v.format(&Rfc3339) {
                    out.push_str(&text);
                }
            }
            Value::Uuid(Some(v)) => {
                let mut buffer = Uuid::encode_buffer();
                out.push_str(v.hyphenated().encode_lower(&mut buffer));
            }
            _ => out.push_str("NULL"),
        }
    }

    pub fn to_text(&self) -> String {
        let mut out = String::new();
        self.write_text(&mut out);
        out
    }
}
