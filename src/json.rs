use crate::context::{Context, ContextRef, ContextValue};
pub use serde_json::Value as JsonValue;


impl Context for JsonValue {
    fn child(&self, name: &str) -> Option<&dyn Context> {
        match self {
            JsonValue::Object(obj) => obj.get(name).map(
                |value| value as ContextRef
            ),
            _ => None
        }
    }

    fn value(&self) -> ContextValue<'_> {
        match self {
            JsonValue::Null => ContextValue::Null,
            JsonValue::Bool(b) => ContextValue::Bool(*b),
            JsonValue::Number(n) => ContextValue::Number {
                text: n.to_string(),
                is_zero: n.as_f64() == Some(0.0)
            },
            JsonValue::String(s) => ContextValue::Text(s),
            JsonValue::Array(seq) => ContextValue::List(
                seq.iter()
                    .map(|value| value as ContextRef)
                    .collect::<_>()
            ),
            JsonValue::Object(_) => ContextValue::Mapping
        }
    }
}
