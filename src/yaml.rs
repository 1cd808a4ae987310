use crate::context::{Context, ContextRef, ContextValue};
pub use serde_yaml::Value as YamlValue;


impl Context for YamlValue {
    fn child(&self, name: &str) -> Option<&dyn Context> {
        match self {
            YamlValue::Mapping(obj) => obj.get(name).map(
                |value| value as ContextRef
            ),
            YamlValue::Tagged(tagged) => tagged.value.child(name),
            _ => None
        }
    }

    fn value(&self) -> ContextValue<'_> {
        match self {
            YamlValue::Null => ContextValue::Null,
            YamlValue::Bool(b) => ContextValue::Bool(*b),
            YamlValue::Number(n) => ContextValue::Number {
                text: n.to_string(),
                is_zero: n.as_f64() == Some(0.0)
            },
            YamlValue::String(s) => ContextValue::Text(s),
            YamlValue::Sequence(seq) => ContextValue::List(
                seq.iter()
                    .map(|value| value as ContextRef)
                    .collect::<_>()
            ),
            YamlValue::Mapping(_) => ContextValue::Mapping,
            YamlValue::Tagged(tagged) => tagged.value.value()
        }
    }
}
