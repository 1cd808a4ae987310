use crate::error::Error;
use crate::reader::{Reader, ReaderStringOps, Spanned, TagKind, Token};


#[derive(PartialEq, Debug)]
pub(crate) enum Node {
    Text(String),
    Variable { name: String, escaped: bool },
    Section { name: String, inverted: bool, children: Vec<Node> },
    Partial { name: String, indent: String },
    Comment,
}


// a section waiting for its close tag
struct OpenSection<'a> {
    name: &'a str,
    inverted: bool,
    start: usize,
    children: Vec<Node>
}


pub(crate) fn parse(input: &str) -> Result<Vec<Node>, Error> {
    let tokens = Reader::new(input).collect::<Result<Vec<_>, _>>()?;
    let mut line_start = 0;
    let standalone = tokens.iter()
        .map(|it| {
            let span = standalone_span(input, line_start, it);
            if let Some(p) = input[it.start..it.end].rfind('\n') {
                line_start = it.start + p + 1;
            }
            span
        })
        .collect::<Vec<_>>();

    let mut root = Vec::new();
    let mut sections: Vec<OpenSection> = Vec::new();
    for (i, spanned) in tokens.iter().enumerate() {
        let node = match spanned.token {
            Token::Text(_) => {
                let start = match i.checked_sub(1).and_then(|p| standalone[p]) {
                    Some((_, line_end)) => line_end,
                    None => spanned.start
                };
                let end = match standalone.get(i + 1).copied().flatten() {
                    Some((line_start, _)) => line_start,
                    None => spanned.end
                };
                if start >= end {
                    continue;
                }
                Node::Text(input[start..end].to_owned())
            },
            Token::Open(TagKind::Value { escaped }, name) => Node::Variable {
                name: name.to_owned(),
                escaped
            },
            Token::Open(kind @ (TagKind::Section | TagKind::InvertedSection), name) => {
                sections.push(OpenSection {
                    name,
                    inverted: kind == TagKind::InvertedSection,
                    start: spanned.start,
                    children: Vec::new()
                });
                continue;
            },
            Token::Close(name) => {
                let section = match sections.pop() {
                    Some(section) => section,
                    None => return Err(Error::UnexpectedClose {
                        line: input.line_at(spanned.start),
                        name: name.to_owned()
                    })
                };
                if section.name != name {
                    return Err(Error::MismatchedSection {
                        line: input.line_at(spanned.start),
                        expected: section.name.to_owned(),
                        found: name.to_owned()
                    });
                }
                Node::Section {
                    name: name.to_owned(),
                    inverted: section.inverted,
                    children: section.children
                }
            },
            Token::Open(TagKind::Partial, name) => {
                let indent = match standalone[i] {
                    Some((line_start, _)) => &input[line_start..spanned.start],
                    None => ""
                };
                Node::Partial {
                    name: name.to_owned(),
                    indent: indent.to_owned()
                }
            },
            Token::Open(TagKind::Comment, _) => Node::Comment,
            Token::Delimiters(_, _) => continue
        };
        match sections.last_mut() {
            Some(section) => section.children.push(node),
            None => root.push(node)
        }
    }

    if let Some(section) = sections.pop() {
        return Err(Error::UnclosedSection {
            line: input.line_at(section.start),
            name: section.name.to_owned()
        });
    }
    log::debug!("parsed template: {} top-level nodes", root.len());
    Ok(root)
}


// For a tag alone on its line, return the range of the line to excise:
// from the start of the line to after the line terminator.
fn standalone_span(input: &str, line_start: usize, spanned: &Spanned) -> Option<(usize, usize)> {
    if !spanned.token.is_standalone_candidate() {
        return None;
    }
    if !input[line_start..spanned.start].is_indent() {
        return None;
    }
    let tail = &input[spanned.end..];
    let rest = tail.trim_start_matches([' ', '\t']);
    let after_space = spanned.end + tail.len() - rest.len();
    let line_end = if rest.is_empty() {
        input.len()
    } else if rest.starts_with("\r\n") {
        after_space + 2
    } else if rest.starts_with('\n') {
        after_space + 1
    } else {
        return None;
    };
    Some((line_start, line_end))
}
