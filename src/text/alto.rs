//! ALTO XML reader
//!
//! Extracts the word stream of a page from ALTO OCR output. Every `String`
//! element becomes one [`Word`], numbered in document order.

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use super::types::{Word, WordBox};
use super::TextError;

/// Parse an ALTO document into its ordered word stream
pub fn parse_alto(xml: &str) -> Result<Vec<Word>, TextError> {
    let mut reader = Reader::from_str(xml);
    let mut buf = Vec::new();
    let mut words = Vec::new();

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(ref e) | Event::Empty(ref e) if e.local_name().as_ref() == b"String" => {
                if let Some(word) = read_string_element(e, words.len())? {
                    words.push(word);
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(words)
}

/// Join a word stream into running text
pub fn words_to_text(words: &[Word]) -> String {
    words
        .iter()
        .map(|w| w.text.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}

fn read_string_element(element: &BytesStart, index: usize) -> Result<Option<Word>, TextError> {
    let mut content = None;
    let (mut x, mut y, mut width, mut height) = (0, 0, 0, 0);

    for attr in element.attributes() {
        let attr = attr.map_err(quick_xml::Error::from)?;
        let value = attr.unescape_value()?;

        match attr.key.local_name().as_ref() {
            b"CONTENT" => content = Some(value.into_owned()),
            b"HPOS" => x = parse_coordinate("HPOS", &value)?,
            b"VPOS" => y = parse_coordinate("VPOS", &value)?,
            b"WIDTH" => width = parse_coordinate("WIDTH", &value)?,
            b"HEIGHT" => height = parse_coordinate("HEIGHT", &value)?,
            _ => {}
        }
    }

    // Blank strings carry no searchable text
    Ok(content
        .filter(|c| !c.trim().is_empty())
        .map(|c| Word::new(c, index, WordBox::new(x, y, width, height))))
}

/// Coordinates may be fractional in some ALTO producers
fn parse_coordinate(name: &str, value: &str) -> Result<u32, TextError> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && *v >= 0.0)
        .map(|v| v.round() as u32)
        .ok_or_else(|| TextError::InvalidAlto(format!("invalid {} value: {:?}", name, value)))
}
