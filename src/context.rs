use std::fmt;


/// Data a template is rendered against.
///
/// Implementations expose keyed children for mappings and describe their
/// own shape through [ContextValue]. Adapters are provided for
/// [JsonValue](crate::JsonValue) and [YamlValue](crate::YamlValue).
pub trait Context {
    /// The child under `name`, if this is a mapping holding that key.
    fn child(&self, name: &str) -> Option<&dyn Context>;

    fn value(&self) -> ContextValue<'_>;
}

pub type ContextRef<'a> = &'a dyn Context;


/// Shape of a context value.
pub enum ContextValue<'a> {
    Null,
    Bool(bool),
    Number { text: String, is_zero: bool },
    Text(&'a str),
    List(Vec<ContextRef<'a>>),
    Mapping,
}

impl<'a> ContextValue<'a> {
    /// Display text of a scalar, `None` for lists and mappings.
    pub fn as_text(&self) -> Option<String> {
        match self {
            ContextValue::Null => Some(String::new()),
            ContextValue::Bool(b) => Some(b.to_string()),
            ContextValue::Number { text, .. } => Some(text.clone()),
            ContextValue::Text(text) => Some((*text).to_owned()),
            ContextValue::List(_) | ContextValue::Mapping => None
        }
    }
}

impl<'a> fmt::Debug for ContextValue<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContextValue::Null => write!(f, "Null"),
            ContextValue::Bool(b) => write!(f, "Bool({})", b),
            ContextValue::Number { text, .. } => write!(f, "Number({})", text),
            ContextValue::Text(text) => write!(f, "Text({:?})", text),
            ContextValue::List(seq) => write!(f, "List([{} items])", seq.len()),
            ContextValue::Mapping => write!(f, "Mapping {{...}}")
        }
    }
}


/// Frames consulted when resolving names, innermost last.
pub(crate) struct Stack<'a> {
    frames: Vec<ContextRef<'a>>
}

impl<'a> Stack<'a> {
    pub(crate) fn new(root: ContextRef<'a>) -> Self {
        Stack {
            frames: vec![root]
        }
    }

    pub(crate) fn push(&mut self, frame: ContextRef<'a>) {
        self.frames.push(frame);
    }

    pub(crate) fn pop(&mut self) {
        self.frames.pop();
    }

    /// Resolve a dotted name. The first segment is looked up in every frame
    /// from the innermost out, the following ones only inside the value
    /// found for the previous segment.
    pub(crate) fn resolve(&self, name: &str) -> Option<ContextRef<'a>> {
        if name == "." {
            return self.frames.last().copied();
        }
        let mut segments = name.split('.');
        let first = segments.next()?;
        let mut current = self.frames.iter()
            .rev()
            .copied()
            .find_map(|frame| frame.child(first))?;
        for segment in segments {
            current = current.child(segment)?;
        }
        Some(current)
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::JsonValue;
    use serde_json::json;

    fn text_of(value: Option<ContextRef>) -> Option<String> {
        value.and_then(|it| it.value().as_text())
    }

    #[test]
    fn dotted_name() {
        let data = json!({"a": {"b": 1}});
        let stack = Stack::new(&data);
        assert_eq!(text_of(stack.resolve("a.b")), Some("1".to_owned()));
    }

    #[test]
    fn broken_chain_misses() {
        let data = json!({"a": {"b": 1}});
        let stack = Stack::new(&data);
        assert!(stack.resolve("a.c.d").is_none());
    }

    #[test]
    fn first_segment_searches_the_stack() {
        let outer = json!({"a": {"b": "outer"}, "c": "root"});
        let inner = json!({"x": 1});
        let mut stack = Stack::new(&outer);
        stack.push(&inner);
        assert_eq!(text_of(stack.resolve("a.b")), Some("outer".to_owned()));
        assert_eq!(text_of(stack.resolve("c")), Some("root".to_owned()));
    }

    #[test]
    fn later_segments_do_not_search_the_stack() {
        let outer = json!({"b": {"c": "outer"}});
        let inner = json!({"a": {"x": 1}});
        let mut stack = Stack::new(&outer);
        stack.push(&inner);
        assert!(stack.resolve("a.b.c").is_none());
    }

    #[test]
    fn innermost_frame_wins() {
        let outer = json!({"name": "outer"});
        let inner = json!({"name": "inner"});
        let mut stack = Stack::new(&outer);
        stack.push(&inner);
        assert_eq!(text_of(stack.resolve("name")), Some("inner".to_owned()));
        stack.pop();
        assert_eq!(text_of(stack.resolve("name")), Some("outer".to_owned()));
    }

    #[test]
    fn dot_is_current_frame() {
        let root: JsonValue = json!({"a": 1});
        let item = json!("item");
        let mut stack = Stack::new(&root);
        stack.push(&item);
        assert_eq!(text_of(stack.resolve(".")), Some("item".to_owned()));
    }

    #[test]
    fn scalars_have_no_children() {
        let data = json!("text");
        let stack = Stack::new(&data);
        assert!(stack.resolve("len").is_none());
    }
}
