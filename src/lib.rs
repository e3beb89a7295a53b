#![allow(clippy::module_inception)]

use std::rc::Rc;

use crate::errors::errors::{Error, ErrorTip};

pub mod analyzer;
pub mod ast;
pub mod environment;
pub mod errors;
pub mod generator;
pub mod interpreter;
pub mod lexer;
pub mod macros;
pub mod parser;

extern crate regex;

#[derive(Debug, Clone, PartialEq)]
pub struct Position(pub u32, pub Rc<String>);

#[derive(Debug, Clone, PartialEq)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

/// Returns the 1-based line number, the line text and the column of `position`
/// within `content`, or `None` when the offset lies past the end of the source.
pub fn get_line_at_position(content: &str, position: u32) -> Option<(usize, String, usize)> {
    let pos = position as usize;

    if pos > content.len() {
        return None;
    }

    let mut start = 0;
    let mut line_number = 1;

    for line in content.split_inclusive('\n') {
        let end = start + line.len();

        if (start..end).contains(&pos) {
            let line_pos = pos - start;
            return Some((line_number, line.to_string(), line_pos));
        }

        start = end;
        line_number += 1;
    }

    // Offset just past the final character (e.g. a missing `;` at EOF).
    let last = content.split_inclusive('\n').last()?;
    Some((line_number - 1, last.to_string(), last.len()))
}

/// Renders an error the way the command line driver reports it.
///
/// ```text
/// Error: UnexpectedToken (Expected `;`, found end of input)
/// -> final.plc
///    |
/// 20 | let a = 1
///    | ---------^
/// ```
///
/// Errors without a source position (semantic and runtime errors) render as
/// the first line only.
pub fn render_error(error: &Error, source: &str, file: &str) -> String {
    let mut out = match error.get_tip() {
        ErrorTip::None => format!("Error: {}\n", error.get_error_name()),
        tip => format!("Error: {} ({})\n", error.get_error_name(), tip),
    };

    let Some(position) = error.get_position() else {
        return out;
    };
    let Some((line, line_text, line_pos)) = get_line_at_position(source, position.0) else {
        return out;
    };

    let line_string = line.to_string();
    let padding = line_string.len() + 2;

    out.push_str(&format!("-> {}\n", file));
    out.push_str(&format!("{:>padding$}\n", "|"));

    let (line_text_removed, removed_whitespace) = remove_starting_whitespace(&line_text);
    out.push_str(&format!("{} | {}\n", line_string, line_text_removed.trim_end()));

    let arrows = line_pos.saturating_sub(removed_whitespace) + 1;

    out.push_str(&format!("{:>padding$} {:->arrows$}\n", "|", "^"));
    out
}

fn remove_starting_whitespace(string: &str) -> (String, usize) {
    let mut start = 0;
    for c in string.chars() {
        if c == ' ' {
            start += 1;
        } else {
            break;
        }
    }

    (String::from(&string[start..]), start)
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use crate::errors::errors::{Error, ParseError, ParseErrorImpl, SemanticError};
    use crate::Position;

    const SOURCE: &str = "Hello, world!\nfoo\nbar\n    Testing { }\n";

    #[test]
    fn test_get_line_at_position() {
        let (line_number, line, line_pos) = super::get_line_at_position(SOURCE, 10).unwrap();
        assert_eq!(line_number, 1);
        assert_eq!(line, "Hello, world!\n");
        assert_eq!(line_pos, 10);

        let (line_number, line, line_pos) = super::get_line_at_position(SOURCE, 34).unwrap();
        assert_eq!(line_number, 4);
        assert_eq!(line, "    Testing { }\n");
        assert_eq!(line_pos, 12);

        assert!(super::get_line_at_position(SOURCE, 500).is_none());
    }

    #[test]
    fn test_render_positioned_error() {
        let error = Error::from(ParseError::new(
            ParseErrorImpl::ExpectedToken {
                expected: String::from(";"),
                found: String::from("end of input"),
            },
            Position(9, Rc::new(String::from("test.plc"))),
        ));

        let rendered = super::render_error(&error, "val x = 1", "test.plc");
        assert_eq!(
            rendered,
            "Error: ExpectedToken (Expected `;`, found end of input)\n-> test.plc\n  |\n1 | val x = 1\n  | ---------^\n"
        );
    }

    #[test]
    fn test_render_unpositioned_error() {
        let error = Error::from(SemanticError::MissingMain);
        let rendered = super::render_error(&error, "", "test.plc");
        assert!(rendered.starts_with("Error: MissingMain"));
        assert_eq!(rendered.lines().count(), 1);
    }
}
