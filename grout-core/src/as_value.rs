use crate::Value;
use rust_decimal::Decimal;
use std::borrow::Cow;
use time::{Date, OffsetDateTime, PrimitiveDateTime, Time};
use uuid::Uuid;

/// Conversion from native Rust types into the dynamically typed [`Value`].
///
/// `as_empty_value` produces the typed null for the implementing type, which
/// is what lets `Option::<String>::None` arrive at the null policy as
/// `Value::Varchar(None)` rather than an untyped null.
pub trait AsValue {
    /// The NULL-like value variant for this type.
    fn as_empty_value() -> Value;
    /// Convert into the owned [`Value`] representation.
    fn as_value(self) -> Value;
}

macro_rules! impl_as_value {
    ($type:ty, $variant:ident) => {
        impl AsValue for $type {
            fn as_empty_value() -> Value {
                Value::$variant(None)
            }
            fn as_value(self) -> Value {
                Value::$variant(Some(self))
            }
        }
    };
}

impl_as_value!(bool, Boolean);
impl_as_value!(i8, Int8);
impl_as_value!(i16, Int16);
impl_as_value!(i32, Int32);
impl_as_value!(i64, Int64);
impl_as_value!(i128, Int128);
impl_as_value!(u8, UInt8);
impl_as_value!(u16, UInt16);
impl_as_value!(u32, UInt32);
impl_as_value!(u64, UInt64);
impl_as_value!(u128, UInt128);
impl_as_value!(f32, Float32);
impl_as_value!(f64, Float64);
impl_as_value!(Decimal, Decimal);
impl_as_value!(String, Varchar);
impl_as_value!(Date, Date);
impl_as_value!(Time, Time);
impl_as_value!(PrimitiveDateTime, Timestamp);
impl_as_value!(OffsetDateTime, TimestampWithTimezone);
impl_as_value!(Uuid, Uuid);

impl AsValue for &str {
    fn as_empty_value() -> Value {
        Value::Varchar(None)
    }
    fn as_value(self) -> Value {
        Value::Varchar(Some(self.to_owned()))
    }
}

impl AsValue for Cow<'_, str> {
    fn as_empty_value() -> Value {
        Value::Varchar(None)
    }
    fn as_value(self) -> Value {
        Value::Varchar(Some(self.into_owned()))
    }
}

impl<T: AsValue> AsValue for Option<T> {
    fn as_empty_value() -> Value {
        T::as_empty_value()
    }
    fn as_value(self) -> Value {
        match self {
            Some(value) => value.as_value(),
            None => T::as_empty_value(),
        }
    }
}

impl AsValue for Value {
    fn as_empty_value() -> Value {
        Value::Null
    }
    fn as_value(self) -> Value {
        self
    }
}
