use crate::{
    ast::{Block, SourceLine},
    config::BlockMatching,
    error::ParseError,
    interpreter::parser::core::ParseResult,
};

/// The marker that opens a program's entry-point block.
pub const ENTRY_POINT: &str = "when project start";

/// Extracts the lines of the entry-point block from program source.
///
/// The block opens at the first `when project start` that is followed,
/// after optional whitespace, by `{`. It closes at the *last* `}` in the
/// source, so everything in between is the program body. Text before the
/// marker and after that final brace is ignored.
///
/// Lines keep their numbering in the original source; the first body line is
/// whatever follows the opening brace on its own line.
///
/// # Errors
/// Returns [`ParseError::EntryPointNotFound`] if no marker is followed by an
/// opening brace that has a closing brace after it.
///
/// # Example
/// ```
/// use relief::interpreter::parser::block::extract_program;
///
/// let source = "# demo\nwhen project start {\n    out(1)\n}\n";
/// let body = extract_program(source).unwrap();
///
/// assert_eq!(body.len(), 2);
/// assert_eq!(body[1].text, "out(1)");
/// assert_eq!(body[1].line, 3);
///
/// assert!(extract_program("out(1)").is_err());
/// ```
pub fn extract_program(source: &str) -> ParseResult<Block> {
    let Some(close) = source.rfind('}') else {
        return Err(ParseError::EntryPointNotFound);
    };

    for (start, _) in source.match_indices(ENTRY_POINT) {
        let after = &source[start + ENTRY_POINT.len()..];
        let trimmed = after.trim_start();
        if !trimmed.starts_with('{') {
            continue;
        }

        let open = source.len() - trimmed.len();
        if close < open {
            break;
        }

        let first_line = source[..open].matches('\n').count() + 1;
        let body = &source[open + 1..close];

        tracing::debug!(line = first_line, "found entry point");

        return Ok(body.lines()
                      .enumerate()
                      .map(|(offset, text)| SourceLine::new(text, first_line + offset))
                      .collect());
    }

    Err(ParseError::EntryPointNotFound)
}

/// The lines captured for a nested block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Capture {
    /// The block's lines, excluding the delimiters.
    pub body:     Block,
    /// How many lines after the opening line belong to the block, including
    /// the line with the closing brace.
    pub consumed: usize,
    /// Any text that followed the closing brace on its line.
    pub trailing: Option<SourceLine>,
}

/// Captures the block opened by the brace at byte offset `brace` of
/// `opener`.
///
/// Text after the brace on the opening line is the first candidate line of
/// the block, followed by the lines of `rest`. With
/// [`BlockMatching::Shallow`] the block ends at the first `}` found; with
/// [`BlockMatching::Nested`] braces are counted (outside string literals) and
/// the block ends at the brace that balances the opener. Text before the
/// closing brace on its line belongs to the block; text after it is returned
/// as [`Capture::trailing`].
///
/// A block that is never closed extends to the end of `rest`.
///
/// # Example
/// ```
/// use relief::{
///     ast::SourceLine,
///     config::BlockMatching,
///     interpreter::parser::block::capture_block,
/// };
///
/// let opener = SourceLine::new("rep 2 {", 1);
/// let rest = vec![SourceLine::new("out(1)", 2),
///                 SourceLine::new("}", 3),
///                 SourceLine::new("out(2)", 4)];
///
/// let capture = capture_block(&opener, 6, &rest, BlockMatching::Shallow);
/// assert_eq!(capture.body, vec![SourceLine::new("out(1)", 2)]);
/// assert_eq!(capture.consumed, 2);
/// assert_eq!(capture.trailing, None);
/// ```
#[must_use]
pub fn capture_block(opener: &SourceLine,
                     brace: usize,
                     rest: &[SourceLine],
                     matching: BlockMatching)
                     -> Capture {
    let mut depth = 1usize;
    let mut body = Vec::new();
    let mut consumed = 0;
    let mut segment = opener.text.get(brace + 1..).unwrap_or_default();
    let mut line = opener.line;

    loop {
        if let Some(close) = find_closing_brace(segment, matching, &mut depth) {
            push_segment(&mut body, &segment[..close], line);
            let trailing = SourceLine::new(&segment[close + 1..], line);

            return Capture { body,
                             consumed,
                             trailing: (!trailing.is_blank()).then_some(trailing) };
        }

        push_segment(&mut body, segment, line);

        let Some(next) = rest.get(consumed) else {
            tracing::warn!(line = opener.line, "block is never closed");
            return Capture { body,
                             consumed,
                             trailing: None };
        };

        consumed += 1;
        segment = next.text.as_str();
        line = next.line;
    }
}

/// Returns the byte offset of the `}` that closes the current block within
/// `text`, updating `depth` for nested matching.
fn find_closing_brace(text: &str, matching: BlockMatching, depth: &mut usize) -> Option<usize> {
    match matching {
        BlockMatching::Shallow => text.find('}'),
        BlockMatching::Nested => {
            let mut quote: Option<char> = None;

            for (index, c) in text.char_indices() {
                match (quote, c) {
                    (Some(open), c) if c == open => quote = None,
                    (Some(_), _) => {},
                    (None, '"' | '\'') => quote = Some(c),
                    (None, '{') => *depth += 1,
                    (None, '}') => {
                        *depth -= 1;
                        if *depth == 0 {
                            return Some(index);
                        }
                    },
                    (None, _) => {},
                }
            }

            None
        },
    }
}

fn push_segment(body: &mut Block, text: &str, line: usize) {
    let source = SourceLine::new(text, line);
    if !source.is_blank() {
        body.push(source);
    }
}
