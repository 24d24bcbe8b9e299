use crate::domain::{ConvertError, ConvertResult};
use std::io::BufRead;

/// Forward-only cursor over a SHIELD geometry deck. Every transcoding phase
/// consumes from the same cursor; nothing is ever rewound.
#[derive(Debug)]
pub struct DeckCursor<R> {
    reader: R,
}

impl<R: BufRead> DeckCursor<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }

    /// Reads one raw line, retaining its trailing newline as content so the
    /// emitted deck mirrors the source framing. Returns `None` only when the
    /// stream is exhausted before any byte is read.
    pub fn next_raw_line(&mut self) -> ConvertResult<Option<String>> {
        let mut buffer = Vec::new();
        let read = self
            .reader
            .read_until(b'\n', &mut buffer)
            .map_err(|source| {
                ConvertError::io_system(
                    "IO.INPUT_READ",
                    format!("failed to read from input stream: {source}"),
                )
            })?;
        if read == 0 {
            return Ok(None);
        }

        let line = String::from_utf8(buffer).map_err(|_| {
            ConvertError::input_validation("INPUT.ENCODING", "input line is not valid UTF-8")
        })?;
        Ok(Some(line))
    }

    /// Consumes the rest of the stream as whitespace-separated decimal
    /// integers, stopping without error at the first token that does not
    /// parse.
    pub fn remaining_integers(&mut self) -> ConvertResult<Vec<i64>> {
        let mut rest = String::new();
        self.reader.read_to_string(&mut rest).map_err(|source| {
            ConvertError::io_system(
                "IO.INPUT_READ",
                format!("failed to read numeric tail from input stream: {source}"),
            )
        })?;

        let mut values = Vec::new();
        for token in rest.split_whitespace() {
            match token.parse::<i64>() {
                Ok(value) => values.push(value),
                Err(_) => break,
            }
        }
        Ok(values)
    }
}

#[cfg(test)]
mod tests {
    use super::DeckCursor;
    use std::io::Cursor;

    #[test]
    fn raw_lines_retain_their_newline() {
        let mut cursor = DeckCursor::new(Cursor::new("first\nsecond\n"));

        assert_eq!(cursor.next_raw_line().unwrap().as_deref(), Some("first\n"));
        assert_eq!(cursor.next_raw_line().unwrap().as_deref(), Some("second\n"));
        assert_eq!(cursor.next_raw_line().unwrap(), None);
    }

    #[test]
    fn final_line_without_newline_is_returned_as_is() {
        let mut cursor = DeckCursor::new(Cursor::new("only"));

        assert_eq!(cursor.next_raw_line().unwrap().as_deref(), Some("only"));
        assert_eq!(cursor.next_raw_line().unwrap(), None);
    }

    #[test]
    fn numeric_tail_stops_at_first_non_numeric_token() {
        let mut cursor = DeckCursor::new(Cursor::new(" 0 2\n 1 5\nnot-a-number 9\n"));

        assert_eq!(cursor.remaining_integers().unwrap(), vec![0, 2, 1, 5]);
    }

    #[test]
    fn numeric_tail_of_exhausted_stream_is_empty() {
        let mut cursor = DeckCursor::new(Cursor::new(""));

        assert!(cursor.remaining_integers().unwrap().is_empty());
    }
}
