use crate::error::Error;


const OPEN_DELIMITER: &str = "{{";
const CLOSE_DELIMITER: &str = "}}";


/// Splits a template into tokens, following delimiter changes as they
/// are read.
#[derive(Clone)]
pub(crate) struct Reader<'a> {
    input: &'a str,
    open_delimiter: &'a str,
    close_delimiter: &'a str,
    pos: usize,
    line: usize,
    failed: bool
}

impl<'a> Reader<'a> {
    pub(crate) fn new(input: &'a str) -> Self {
        Reader {
            input,
            open_delimiter: OPEN_DELIMITER,
            close_delimiter: CLOSE_DELIMITER,
            pos: 0,
            line: 1,
            failed: false
        }
    }

    pub(crate) fn pop_front(&mut self) -> Option<Result<Spanned<'a>, Error>> {
        if self.failed || self.pos == self.input.len() {
            return None;
        }
        let start = self.pos;
        let tail = &self.input[start..];
        let result = if tail.starts_with(self.open_delimiter) {
            self.read_tag(tail)
        } else {
            Ok(self.read_text(tail))
        };
        match result {
            Ok(token) => {
                self.line += self.input[start..self.pos].matches('\n').count();
                Some(Ok(Spanned { token, start, end: self.pos }))
            },
            Err(err) => {
                self.failed = true;
                Some(Err(err))
            }
        }
    }

    fn read_text(&mut self, tail: &'a str) -> Token<'a> {
        let after_text = tail.find(self.open_delimiter).unwrap_or(tail.len());
        self.pos += after_text;
        Token::Text(&tail[..after_text])
    }

    fn read_tag(&mut self, tail: &'a str) -> Result<Token<'a>, Error> {
        let line = self.line;
        let odl = self.open_delimiter.len();
        let cdl = self.close_delimiter.len();
        let body = &tail[odl..];
        match body.chars().next() {
            Some('{') => {
                let close = format!("}}{}", self.close_delimiter);
                match body.find(&close) {
                    Some(p) => {
                        self.pos += odl + p + close.len();
                        Token::value(body[1..p].trim(), false, line)
                    },
                    None if body.contains(self.close_delimiter) => Err(Error::UnbalancedBraces { line }),
                    None => Err(Error::UnterminatedTag { line })
                }
            },
            Some('=') => {
                let close = format!("={}", self.close_delimiter);
                match body.find(&close) {
                    Some(p) => {
                        self.pos += odl + p + close.len();
                        let (od, cd) = maybe_delimiters(&body[1..p], line)?;
                        self.open_delimiter = od;
                        self.close_delimiter = cd;
                        Ok(Token::Delimiters(od, cd))
                    },
                    None if body.contains(self.close_delimiter) => Err(Error::InvalidDelimiters { line }),
                    None => Err(Error::UnterminatedTag { line })
                }
            },
            _ => match body.find(self.close_delimiter) {
                Some(p) => {
                    self.pos += odl + p + cdl;
                    Token::tag(body[..p].trim(), line)
                },
                None => Err(Error::UnterminatedTag { line })
            }
        }
    }
}

impl<'a> Iterator for Reader<'a> {
    type Item = Result<Spanned<'a>, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        self.pop_front()
    }
}


#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub(crate) enum TagKind {
    Section,
    InvertedSection,
    Partial,
    Comment,
    Value { escaped: bool },
}

#[derive(PartialEq, Debug)]
pub(crate) enum Token<'a> {
    Text(&'a str),
    Open(TagKind, &'a str),
    Close(&'a str),
    Delimiters(&'a str, &'a str),
}

impl<'a> Token<'a> {
    fn tag(text: &'a str, line: usize) -> Result<Token<'a>, Error> {
        match text.chars().next() {
            Some('#') => Ok(Token::Open(TagKind::Section, maybe_tag(text.trim_sigil(), line)?)),
            Some('^') => Ok(Token::Open(TagKind::InvertedSection, maybe_tag(text.trim_sigil(), line)?)),
            Some('/') => Ok(Token::Close(maybe_tag(text.trim_sigil(), line)?)),
            Some('>') => Ok(Token::Open(TagKind::Partial, maybe_tag(text.trim_sigil(), line)?)),
            Some('!') => Ok(Token::Open(TagKind::Comment, text.trim_sigil())),
            Some('&') => Token::value(text.trim_sigil(), false, line),
            Some(_) => Token::value(text, true, line),
            None => Err(Error::EmptyTag { line })
        }
    }

    fn value(text: &'a str, escaped: bool, line: usize) -> Result<Token<'a>, Error> {
        Ok(Token::Open(TagKind::Value { escaped }, maybe_tag(text, line)?))
    }

    /// Tags subject to the standalone line rule.
    pub(crate) fn is_standalone_candidate(&self) -> bool {
        !matches!(self, Token::Text(_) | Token::Open(TagKind::Value { .. }, _))
    }
}


/// A token with the byte range it covers in the input.
#[derive(PartialEq, Debug)]
pub(crate) struct Spanned<'a> {
    pub(crate) token: Token<'a>,
    pub(crate) start: usize,
    pub(crate) end: usize
}


fn maybe_tag(text: &str, line: usize) -> Result<&str, Error> {
    if text.is_empty() {
        Err(Error::EmptyTag { line })
    } else {
        Ok(text)
    }
}

fn maybe_delimiters(text: &str, line: usize) -> Result<(&str, &str), Error> {
    let words = text.split_whitespace().collect::<Vec<_>>();
    match words[..] {
        [od, cd] if !od.contains('=') && !cd.contains('=') => Ok((od, cd)),
        _ => Err(Error::InvalidDelimiters { line })
    }
}


pub(crate) trait ReaderStringOps {
    fn trim_sigil(&self) -> &str;
    fn line_at(&self, pos: usize) -> usize;
    fn is_indent(&self) -> bool;
}

impl ReaderStringOps for str {
    fn trim_sigil(&self) -> &str {
        self[1..].trim_start()
    }

    // 1-based line number of a byte position
    fn line_at(&self, pos: usize) -> usize {
        self[..pos].matches('\n').count() + 1
    }

    fn is_indent(&self) -> bool {
        self.chars().all(|c| c == ' ' || c == '\t')
    }
}
