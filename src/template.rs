use crate::context::{ContextRef, ContextValue, Stack};
use crate::error::Error;
use crate::options::RenderOptions;
use crate::parser::{parse, Node};
use crate::partials::{PartialProvider, StaticProvider};


/// A parsed template, immutable and reusable across renders.
#[derive(Debug)]
pub struct Template {
    nodes: Vec<Node>
}

impl Template {
    #[allow(clippy::should_implement_trait)]
    pub fn from(input: &str) -> Result<Self, Error> {
        let nodes = parse(input)?;
        Ok(Template { nodes })
    }

    pub fn render(&self, context: ContextRef) -> Result<String, Error> {
        self.render_with_options(context, &StaticProvider::new(), &RenderOptions::default())
    }

    pub fn render_with_partials(
        &self, context: ContextRef, partials: &dyn PartialProvider
    ) -> Result<String, Error> {
        self.render_with_options(context, partials, &RenderOptions::default())
    }

    pub fn render_with_options(
        &self, context: ContextRef, partials: &dyn PartialProvider, options: &RenderOptions
    ) -> Result<String, Error> {
        let renderer = Renderer { partials, options };
        let mut stack = Stack::new(context);
        let mut result = String::new();
        renderer.render_nodes(&self.nodes, &mut stack, 0, &mut result)?;
        Ok(result)
    }
}


// How a section treats the value it is named after.
enum SectionValue<'a> {
    Falsy,
    Truthy,
    Push(ContextRef<'a>),
    Iterate(Vec<ContextRef<'a>>),
}

impl<'a> SectionValue<'a> {
    fn of(value: Option<ContextRef<'a>>) -> Self {
        let value = match value {
            Some(value) => value,
            None => return SectionValue::Falsy
        };
        match value.value() {
            ContextValue::Null | ContextValue::Bool(false) => SectionValue::Falsy,
            ContextValue::Number { is_zero: true, .. } => SectionValue::Falsy,
            ContextValue::Text(text) if text.is_empty() => SectionValue::Falsy,
            ContextValue::List(seq) if seq.is_empty() => SectionValue::Falsy,
            ContextValue::List(seq) => SectionValue::Iterate(seq),
            ContextValue::Mapping => SectionValue::Push(value),
            _ => SectionValue::Truthy
        }
    }

    fn is_falsy(&self) -> bool {
        matches!(self, SectionValue::Falsy)
    }
}


struct Renderer<'r> {
    partials: &'r dyn PartialProvider,
    options: &'r RenderOptions
}

impl<'r> Renderer<'r> {
    fn render_nodes<'a>(
        &self, nodes: &[Node], stack: &mut Stack<'a>, depth: usize, result: &mut String
    ) -> Result<(), Error> {
        for node in nodes {
            self.render_node(node, stack, depth, result)?;
        }
        Ok(())
    }

    fn render_node<'a>(
        &self, node: &Node, stack: &mut Stack<'a>, depth: usize, result: &mut String
    ) -> Result<(), Error> {
        match node {
            Node::Text(text) => result.push_str(text),
            Node::Variable { name, escaped } => {
                if let Some(value) = self.lookup(stack, name)? {
                    let text = value.value().as_text().ok_or_else(
                        || Error::NotInterpolatable { name: name.clone() }
                    )?;
                    if *escaped {
                        result.push_str(&html_escape(&text));
                    } else {
                        result.push_str(&text);
                    }
                }
            },
            Node::Section { name, inverted: false, children } => {
                match SectionValue::of(self.lookup(stack, name)?) {
                    SectionValue::Falsy => {},
                    SectionValue::Truthy => self.render_nodes(children, stack, depth, result)?,
                    SectionValue::Push(value) => self.render_in(value, children, stack, depth, result)?,
                    SectionValue::Iterate(seq) => for item in seq {
                        self.render_in(item, children, stack, depth, result)?
                    }
                }
            },
            Node::Section { name, inverted: true, children } => {
                if SectionValue::of(self.lookup(stack, name)?).is_falsy() {
                    self.render_nodes(children, stack, depth, result)?
                }
            },
            Node::Partial { name, indent } => self.render_partial(name, indent, stack, depth, result)?,
            Node::Comment => {}
        }
        Ok(())
    }

    fn render_in<'a>(
        &self,
        frame: ContextRef<'a>,
        nodes: &[Node],
        stack: &mut Stack<'a>,
        depth: usize,
        result: &mut String
    ) -> Result<(), Error> {
        stack.push(frame);
        let rendered = self.render_nodes(nodes, stack, depth, result);
        stack.pop();
        rendered
    }

    fn render_partial<'a>(
        &self, name: &str, indent: &str, stack: &mut Stack<'a>, depth: usize, result: &mut String
    ) -> Result<(), Error> {
        let text = match self.partials.get(name) {
            Some(text) => text,
            None if self.options.strict_partials => {
                return Err(Error::MissingPartial { name: name.to_owned() });
            },
            None => {
                log::trace!("partial {} not found", name);
                return Ok(());
            }
        };
        if let Some(max) = self.options.max_partial_depth {
            if depth >= max {
                return Err(Error::PartialDepth { name: name.to_owned(), depth: max });
            }
        }
        log::debug!("expanding partial {} at depth {}", name, depth);
        let nodes = parse(&indent_lines(&text, indent))?;
        self.render_nodes(&nodes, stack, depth + 1, result)
    }

    fn lookup<'a>(&self, stack: &Stack<'a>, name: &str) -> Result<Option<ContextRef<'a>>, Error> {
        match stack.resolve(name) {
            Some(value) => Ok(Some(value)),
            None if self.options.strict_variables => Err(Error::MissingVariable { name: name.to_owned() }),
            None => {
                log::trace!("context miss for {}", name);
                Ok(None)
            }
        }
    }
}


// prefix every line, a trailing empty line excepted
fn indent_lines(text: &str, indent: &str) -> String {
    if indent.is_empty() {
        return text.to_owned();
    }
    text.split_inclusive('\n')
        .map(|line| format!("{}{}", indent, line))
        .collect::<Vec<_>>()
        .concat()
}

fn html_escape(input: &str) -> String {
    input.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn render(text: &str, data: &serde_json::Value) -> String {
        Template::from(text).unwrap().render(data).unwrap()
    }

    #[test]
    fn hello_world() {
        assert_eq!(render("Hello, {{name}}!", &json!({"name": "World"})), "Hello, World!");
    }

    #[test]
    fn implicit_iterator() {
        assert_eq!(render("{{#items}}{{.}},{{/items}}", &json!({"items": ["a", "b"]})), "a,b,");
    }

    #[test]
    fn escaping() {
        let data = json!({"v": "& \" < > '"});
        assert_eq!(render("{{v}}", &data), "&amp; &quot; &lt; &gt; &#39;");
        assert_eq!(render("{{{v}}}", &data), "& \" < > '");
        assert_eq!(render("{{&v}}", &data), "& \" < > '");
    }

    #[test]
    fn scalars_display() {
        let data = json!({"i": 85, "f": 1.21, "t": true, "n": null});
        assert_eq!(render("{{i}} {{f}} {{t}} [{{n}}]", &data), "85 1.21 true []");
    }

    #[test]
    fn missing_names_render_empty() {
        assert_eq!(render("[{{a}}] [{{b.c}}]", &json!({"b": {}})), "[] []");
    }

    #[test]
    fn mapping_cannot_be_interpolated() {
        let template = Template::from("{{a}}").unwrap();
        let err = template.render(&json!({"a": {"b": 1}})).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Unknown);
    }

    #[test]
    fn section_values() {
        let data = json!({
            "t": true, "f": false, "zero": 0, "one": 1, "empty": "", "s": "x",
            "list": [], "map": {"k": "v"}, "null": null
        });
        let text = "{{#t}}t{{/t}}{{#f}}f{{/f}}{{#zero}}0{{/zero}}{{#one}}1{{/one}}\
            {{#empty}}e{{/empty}}{{#s}}s{{/s}}{{#list}}l{{/list}}{{#map}}{{k}}{{/map}}\
            {{#null}}n{{/null}}{{#missing}}m{{/missing}}";
        assert_eq!(render(text, &data), "t1sv");
    }

    #[test]
    fn inverted_section_values() {
        let data = json!({
            "t": true, "f": false, "list": [], "full": [1], "map": {}, "null": null
        });
        let text = "{{^t}}t{{/t}}{{^f}}f{{/f}}{{^list}}l{{/list}}{{^full}}x{{/full}}\
            {{^map}}m{{/map}}{{^null}}n{{/null}}{{^missing}}?{{/missing}}";
        assert_eq!(render(text, &data), "fln?");
    }

    #[test]
    fn truthy_scalar_keeps_context() {
        let data = json!({"name": "Joe", "flag": 5});
        assert_eq!(render("{{#flag}}{{name}}{{/flag}}", &data), "Joe");
    }

    #[test]
    fn list_pushes_each_element() {
        let data = json!({"name": "outer", "people": [{"name": "a"}, {"other": 1}, {"name": "c"}]});
        assert_eq!(render("{{#people}}{{name}};{{/people}}", &data), "a;outer;c;");
    }

    #[test]
    fn strict_variables() {
        let template = Template::from("{{#a}}{{b}}{{/a}}").unwrap();
        let options = RenderOptions { strict_variables: true, ..RenderOptions::default() };
        let err = template.render_with_options(
            &json!({"a": {"c": 1}}), &StaticProvider::new(), &options
        ).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingParams);
        assert_eq!(err.to_string(), "missing variable b");
    }

    #[test]
    fn strict_partials() {
        let template = Template::from("{{>p}}").unwrap();
        let err = template.render_with_options(
            &json!({}), &StaticProvider::new(), &RenderOptions::strict()
        ).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Unknown);
        assert_eq!(err.to_string(), "missing partial p");
    }

    #[test]
    fn partial_uses_current_context() {
        let template = Template::from("{{#a}}{{>p}}{{/a}}").unwrap();
        let partials = [("p", "<{{b}}>")].into_iter().collect::<StaticProvider>();
        let result = template.render_with_partials(&json!({"a": {"b": "x"}}), &partials).unwrap();
        assert_eq!(result, "<x>");
    }

    #[test]
    fn partial_indentation() {
        let template = Template::from("begin\n    {{>p}}\nend").unwrap();
        let partials = [("p", "one\ntwo\n")].into_iter().collect::<StaticProvider>();
        let result = template.render_with_partials(&json!({}), &partials).unwrap();
        assert_eq!(result, "begin\n    one\n    two\nend");
    }

    #[test]
    fn interpolated_lines_are_not_reindented() {
        let template = Template::from("\\\n {{>p}}\n/\n").unwrap();
        let partials = [("p", "|\n{{{content}}}\n|\n")].into_iter().collect::<StaticProvider>();
        let result = template.render_with_partials(&json!({"content": "<\n->"}), &partials).unwrap();
        assert_eq!(result, "\\\n |\n <\n->\n |\n/\n");
    }

    #[test]
    fn recursive_partial() {
        let template = Template::from("{{>node}}").unwrap();
        let partials = [("node", "{{content}}<{{#nodes}}{{>node}}{{/nodes}}>")]
            .into_iter()
            .collect::<StaticProvider>();
        let data = json!({"content": "X", "nodes": [{"content": "Y", "nodes": []}]});
        let result = template.render_with_partials(&data, &partials).unwrap();
        assert_eq!(result, "X<Y<>>");
    }

    #[test]
    fn partial_depth_guard() {
        let template = Template::from("{{>loop}}").unwrap();
        let partials = [("loop", "x{{>loop}}")].into_iter().collect::<StaticProvider>();
        let options = RenderOptions::default().with_max_partial_depth(3);
        let err = template.render_with_options(&json!({}), &partials, &options).unwrap_err();
        assert_eq!(err.to_string(), "partial loop exceeds the maximum depth of 3");
    }

    #[test]
    fn delimiters_do_not_leak_into_partials() {
        let template = Template::from("{{=| |=}}|>p| |v|").unwrap();
        let partials = [("p", "{{v}}|v|")].into_iter().collect::<StaticProvider>();
        let result = template.render_with_partials(&json!({"v": 1}), &partials).unwrap();
        assert_eq!(result, "1|v| 1");
    }

    #[test]
    fn indent_lines_skips_trailing_empty_line() {
        assert_eq!(indent_lines("a\n\nb\n", "  "), "  a\n  \n  b\n");
        assert_eq!(indent_lines("", "  "), "");
    }
}
