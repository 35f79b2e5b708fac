// src/output/mod.rs
use std::io::Write;

use crate::document::models::ParseResult;
use crate::utils::error::OutputError;

pub const MISSING_PATH_ERROR: &str = "No PDF path provided";

/// Serializes the envelope as a single JSON document followed by a newline.
pub fn write_result<W: Write>(writer: &mut W, result: &ParseResult, pretty: bool) -> Result<(), OutputError> {
    if pretty {
        serde_json::to_writer_pretty(&mut *writer, result)?;
    } else {
        serde_json::to_writer(&mut *writer, result)?;
    }
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}

/// The envelope emitted when no document path was given at all.
pub fn write_missing_path<W: Write>(writer: &mut W) -> Result<(), OutputError> {
    write_error_envelope(writer, MISSING_PATH_ERROR)
}

/// A document-less failure: only `success` and `error`.
pub fn write_error_envelope<W: Write>(writer: &mut W, message: &str) -> Result<(), OutputError> {
    let envelope = serde_json::json!({
        "success": false,
        "error": message,
    });
    serde_json::to_writer(&mut *writer, &envelope)?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compact_output_is_one_line() {
        let mut buf = Vec::new();
        write_result(&mut buf, &ParseResult::success("a.pdf", Vec::new()), false).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(text.lines().count(), 1);
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["success"], true);
        assert_eq!(value["filename"], "a.pdf");
        assert_eq!(value["transactionCount"], 0);
    }

    #[test]
    fn pretty_output_parses_back() {
        let mut buf = Vec::new();
        write_result(&mut buf, &ParseResult::failure("a.pdf", "bad"), true).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(value["error"], "bad");
    }

    #[test]
    fn missing_path_envelope_has_only_two_fields() {
        let mut buf = Vec::new();
        write_missing_path(&mut buf).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(value, serde_json::json!({"success": false, "error": "No PDF path provided"}));
    }

    #[test]
    fn error_envelope_carries_the_message() {
        let mut buf = Vec::new();
        write_error_envelope(&mut buf, "invalid value 'x' for '--section <SECTION>'").unwrap();
        let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"success": false, "error": "invalid value 'x' for '--section <SECTION>'"})
        );
    }
}
