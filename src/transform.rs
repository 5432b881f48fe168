use crate::Value;
use crate::validate::is_decimal_string;

/// A value coercion applied to a leaf before it is validated.
///
/// Implementations are stateless and shared across leaves and threads.
/// Callers must check [`transformable`](Self::transformable) first;
/// [`transform`](Self::transform) returns values it cannot handle unchanged.
pub trait Transformer: Send + Sync {
    /// Short identifier used in error messages.
    fn name(&self) -> &str;

    fn transformable(&self, value: &Value) -> bool;

    fn transform(&self, value: Value) -> Value;
}

/// Canonical integer strings (`"12"`, `"-3"`, not `"012"` or `"1.0"`) to integers.
#[derive(Debug, Clone, Copy, Default)]
pub struct StringToInt;

/// Decimal strings to floats. Integers are widened.
#[derive(Debug, Clone, Copy, Default)]
pub struct StringToFloat;

/// `"true"`, `"false"`, `"1"` and `"0"` to booleans.
#[derive(Debug, Clone, Copy, Default)]
pub struct StringToBool;

fn canonical_int(s: &str) -> Option<i64> {
    s.parse::<i64>().ok().filter(|n| n.to_string() == s)
}

impl Transformer for StringToInt {
    fn name(&self) -> &str {
        "string_to_int"
    }

    fn transformable(&self, value: &Value) -> bool {
        match value {
            Value::Int(_) => true,
            Value::String(s) => canonical_int(s).is_some(),
            _ => false,
        }
    }

    fn transform(&self, value: Value) -> Value {
        match value {
            Value::String(s) => match canonical_int(&s) {
                Some(n) => Value::Int(n),
                None => Value::String(s),
            },
            other => other,
        }
    }
}

impl Transformer for StringToFloat {
    fn name(&self) -> &str {
        "string_to_float"
    }

    fn transformable(&self, value: &Value) -> bool {
        match value {
            Value::Int(_) | Value::Float(_) => true,
            Value::String(s) => is_decimal_string(s) && s.parse::<f64>().is_ok(),
            _ => false,
        }
    }

    #[allow(clippy::cast_precision_loss)]
    fn transform(&self, value: Value) -> Value {
        match value {
            Value::Int(n) => Value::Float(n as f64),
            Value::String(s) if is_decimal_string(&s) => match s.parse::<f64>() {
                Ok(f) => Value::Float(f),
                Err(_) => Value::String(s),
            },
            other => other,
        }
    }
}

impl Transformer for StringToBool {
    fn name(&self) -> &str {
        "string_to_bool"
    }

    fn transformable(&self, value: &Value) -> bool {
        match value {
            Value::Bool(_) => true,
            Value::String(s) => matches!(s.as_str(), "true" | "false" | "1" | "0"),
            _ => false,
        }
    }

    fn transform(&self, value: Value) -> Value {
        match value {
            Value::String(s) => match s.as_str() {
                "true" | "1" => Value::Bool(true),
                "false" | "0" => Value::Bool(false),
                _ => Value::String(s),
            },
            other => other,
        }
    }
}
