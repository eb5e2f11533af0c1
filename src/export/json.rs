//! JSON Exporter - encodes the document model as a JSON value tree.
//!
//! Field mapping:
//! - Book: `charCode`, `discCode`, `subbooks`
//! - Subbook: `title`, `copyright` (+ `copyrightPage`, `copyrightOffset`), `entries`
//! - Entry: `heading` (+ `headingPage`, `headingOffset`), `text` (+ `textPage`, `textOffset`)
//!
//! Absent values are left out rather than written as `null`. Position fields
//! are only written when enabled. Entry positions are written whether or not
//! the text could be read; copyright positions only accompany copyright text.

use std::io::Write;

use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::{Map, Value};

use super::Exporter;
use crate::error::ExportError;
use crate::model::{Book, Entry, PositionedText, Subbook};

/// Configuration for JSON export.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct JsonConfig {
    /// Emit page/offset fields next to textual fields.
    pub include_positions: bool,
    /// Multi-line output indented by four spaces instead of compact output.
    pub pretty_print: bool,
}

impl JsonConfig {
    pub fn with_positions(mut self, include_positions: bool) -> Self {
        self.include_positions = include_positions;
        self
    }

    pub fn with_pretty_print(mut self, pretty_print: bool) -> Self {
        self.pretty_print = pretty_print;
        self
    }
}

/// Exporter for JSON output.
#[derive(Debug, Clone, Default)]
pub struct JsonExporter {
    config: JsonConfig,
}

impl JsonExporter {
    /// Create a new JsonExporter with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a JsonExporter with the specified configuration.
    pub fn with_config(config: JsonConfig) -> Self {
        Self { config }
    }

    /// Export to an in-memory string.
    pub fn to_string(&self, book: &Book) -> Result<String, ExportError> {
        let mut out = Vec::new();
        self.export(book, &mut out)?;
        // serde_json only ever writes UTF-8
        Ok(String::from_utf8_lossy(&out).into_owned())
    }
}

impl Exporter for JsonExporter {
    fn export<W: Write>(&self, book: &Book, writer: &mut W) -> Result<(), ExportError> {
        let value = encode_book(book, &self.config);

        if self.config.pretty_print {
            let formatter = PrettyFormatter::with_indent(b"    ");
            let mut serializer = serde_json::Serializer::with_formatter(&mut *writer, formatter);
            value.serialize(&mut serializer)?;
        } else {
            serde_json::to_writer(&mut *writer, &value)?;
        }

        writer.flush()?;
        Ok(())
    }
}

/// Build the JSON value tree for `book`.
pub fn encode_book(book: &Book, config: &JsonConfig) -> Value {
    let mut object = Map::new();
    object.insert("charCode".into(), book.char_code().as_str().into());
    object.insert("discCode".into(), book.disc_code().as_str().into());

    let subbooks = book
        .subbooks()
        .iter()
        .map(|subbook| encode_subbook(subbook, config))
        .collect();
    object.insert("subbooks".into(), Value::Array(subbooks));

    Value::Object(object)
}

fn encode_subbook(subbook: &Subbook, config: &JsonConfig) -> Value {
    let mut object = Map::new();

    if let Some(title) = &subbook.title {
        object.insert("title".into(), title.as_str().into());
    }

    if let Some(copyright) = &subbook.copyright.text {
        object.insert("copyright".into(), copyright.as_str().into());
        if config.include_positions {
            insert_position(&mut object, "copyright", &subbook.copyright);
        }
    }

    let entries = subbook
        .entries()
        .iter()
        .map(|entry| encode_entry(entry, config))
        .collect();
    object.insert("entries".into(), Value::Array(entries));

    Value::Object(object)
}

fn encode_entry(entry: &Entry, config: &JsonConfig) -> Value {
    let mut object = Map::new();
    encode_field(&mut object, "heading", &entry.heading, config);
    encode_field(&mut object, "text", &entry.text, config);
    Value::Object(object)
}

/// Write `key` if the text is present, and `keyPage`/`keyOffset` if enabled.
fn encode_field(
    object: &mut Map<String, Value>,
    key: &str,
    field: &PositionedText,
    config: &JsonConfig,
) {
    if let Some(text) = &field.text {
        object.insert(key.into(), text.as_str().into());
    }
    if config.include_positions {
        insert_position(object, key, field);
    }
}

fn insert_position(object: &mut Map<String, Value>, key: &str, field: &PositionedText) {
    object.insert(format!("{key}Page"), field.page.into());
    object.insert(format!("{key}Offset"), field.offset.into());
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::model::{CharCode, DiscCode, Position};

    fn text(s: &str, page: u32, offset: u32) -> PositionedText {
        PositionedText::new(Some(s.to_string()), Position::new(page, offset))
    }

    fn sample_book() -> Book {
        let mut subbook = Subbook::new().with_title("Kenkyusha");
        subbook.copyright = text("(c) 1990", 1, 0);
        subbook
            .push(Entry::new(text("apple", 2, 0), text("a fruit", 2, 64)))
            .unwrap();
        subbook
            .push(Entry::new(
                PositionedText::absent(Position::new(3, 0)),
                text("unreadable heading", 3, 64),
            ))
            .unwrap();

        let mut book = Book::new(CharCode::JisX0208, DiscCode::Epwing);
        book.push_subbook(subbook);
        book
    }

    #[test]
    fn test_encode_without_positions() {
        let value = encode_book(&sample_book(), &JsonConfig::default());
        assert_eq!(
            value,
            json!({
                "charCode": "jisx0208",
                "discCode": "epwing",
                "subbooks": [{
                    "title": "Kenkyusha",
                    "copyright": "(c) 1990",
                    "entries": [
                        {"heading": "apple", "text": "a fruit"},
                        {"text": "unreadable heading"}
                    ]
                }]
            })
        );
    }

    #[test]
    fn test_encode_with_positions() {
        let config = JsonConfig::default().with_positions(true);
        let value = encode_book(&sample_book(), &config);
        assert_eq!(
            value["subbooks"][0],
            json!({
                "title": "Kenkyusha",
                "copyright": "(c) 1990",
                "copyrightPage": 1,
                "copyrightOffset": 0,
                "entries": [
                    {
                        "heading": "apple",
                        "headingPage": 2,
                        "headingOffset": 0,
                        "text": "a fruit",
                        "textPage": 2,
                        "textOffset": 64
                    },
                    {
                        "headingPage": 3,
                        "headingOffset": 0,
                        "text": "unreadable heading",
                        "textPage": 3,
                        "textOffset": 64
                    }
                ]
            })
        );
    }

    #[test]
    fn test_absent_copyright_has_no_position() {
        let mut book = Book::new(CharCode::Iso8859_1, DiscCode::Eb);
        let mut subbook = Subbook::new();
        subbook.copyright = PositionedText::absent(Position::new(7, 7));
        book.push_subbook(subbook);

        let config = JsonConfig::default().with_positions(true);
        let value = encode_book(&book, &config);
        assert_eq!(value["subbooks"][0], json!({"entries": []}));
    }

    #[test]
    fn test_field_order_is_stable() {
        let out = JsonExporter::with_config(JsonConfig::default().with_positions(true))
            .to_string(&sample_book())
            .unwrap();
        let first_entry = r#"{"heading":"apple","headingPage":2,"headingOffset":0,"text":"a fruit","textPage":2,"textOffset":64}"#;
        assert!(out.contains(first_entry), "{out}");
    }

    #[test]
    fn test_pretty_print_uses_four_spaces() {
        let out = JsonExporter::with_config(JsonConfig::default().with_pretty_print(true))
            .to_string(&sample_book())
            .unwrap();
        assert!(out.starts_with("{\n    \"charCode\": \"jisx0208\",\n"));
        assert!(out.contains("\n        {\n"));
        assert!(!out.contains("\t"));
    }

    #[test]
    fn test_compact_is_single_line() {
        let out = JsonExporter::new().to_string(&sample_book()).unwrap();
        assert!(!out.contains('\n'));
        assert!(!out.contains(": "));
        assert!(!out.contains(", "));
    }
}
