//! A logic-less Mustache implementation.
//!
//! A mustache [Template] compiled from source is rendered by resolving
//! names in a stack of [Context] frames, getting partials from a
//! [PartialProvider].
//!
//! The core modules are supported: interpolation, sections, inverted
//! sections, comments, partials and delimiter changes. Lambdas are not.
//!
//! Failures are returned as [Error] values; [classify] and [Error::kind]
//! tell a missing name apart from a malformed template without looking
//! at the message.
//!
//!
//! # Samples
//!
//! ## Hello world
//!
//! ```
//! use stache::JsonValue;
//!
//! let data = r#"{
//!     "you": "world"
//! }"#;
//! let context = serde_json::from_str::<JsonValue>(data).unwrap();
//!
//! let result = stache::render("hello, {{you}}!", &context).unwrap();
//!
//! assert_eq!(result, "hello, world!")
//! ```
//!
//! ## Hello team
//!
//! ```
//! use stache::{Template, YamlValue};
//! let text = r#"
//!   {{#team}}
//!   hello, {{address}} {{name}}!
//!   {{/team}}
//! "#;
//! let data = r#"
//!   team:
//!     - name: john
//!       address: little
//!     - name: 42
//!       address: citizen
//! "#;
//!
//! let template = Template::from(text).unwrap();
//! let context = serde_yaml::from_str::<YamlValue>(data).unwrap();
//!
//! let result = template.render(&context).unwrap();
//! assert_eq!(result, r#"
//!   hello, little john!
//!   hello, citizen 42!
//! "#);
//! ```
//!
//! ## Partials and strict rendering
//!
//! ```
//! use stache::{ErrorKind, RenderOptions, StaticProvider, Template};
//! use serde_json::json;
//!
//! let partials = [("user", "<b>{{name}}</b>")].into_iter().collect::<StaticProvider>();
//! let template = Template::from("{{#users}}{{>user}}{{/users}}").unwrap();
//!
//! let data = json!({"users": [{"name": "ann"}, {"name": "bob"}]});
//! let result = template.render_with_partials(&data, &partials).unwrap();
//! assert_eq!(result, "<b>ann</b><b>bob</b>");
//!
//! let data = json!({"users": [{"login": "ann"}]});
//! let err = template.render_with_options(&data, &partials, &RenderOptions::strict()).unwrap_err();
//! assert_eq!(err.kind(), ErrorKind::MissingParams);
//! ```
mod reader;
mod parser;
mod template;
mod context;
mod partials;
mod options;
mod error;
mod json;
mod yaml;

pub use self::template::Template;
pub use self::context::{Context, ContextValue, ContextRef};
pub use self::partials::{PartialProvider, StaticProvider};
pub use self::options::RenderOptions;
pub use self::error::{Error, ErrorKind, classify};
pub use self::json::JsonValue;
pub use self::yaml::YamlValue;


/// Parse then render `template` against `data`, without partials.
pub fn render(template: &str, data: ContextRef) -> Result<String, Error> {
    Template::from(template)?.render(data)
}

/// Parse then render `template` against `data`, resolving partials from
/// `partials`.
pub fn render_partials(
    template: &str, partials: &dyn PartialProvider, data: ContextRef
) -> Result<String, Error> {
    Template::from(template)?.render_with_partials(data, partials)
}
