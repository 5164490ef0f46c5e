//! iXML text to [`XmlElement`] decoding with quick-xml

use super::{XmlElement, XmlValue};
use crate::error::{ExtractionError, ExtractionResult};
use quick_xml::events::Event;
use quick_xml::Reader;
use tracing::debug;

/// Root element of an iXML document
pub const IXML_ROOT: &str = "BWFXML";

/// Element being built while its end tag has not been seen yet
struct OpenElement {
    name: String,
    element: XmlElement,
    text: String,
    has_children: bool,
}

impl OpenElement {
    fn new(name: String) -> Self {
        Self {
            name,
            element: XmlElement::new(),
            text: String::new(),
            has_children: false,
        }
    }

    /// Leaf elements become text; text mixed with child elements is dropped
    fn into_value(self) -> (String, XmlValue) {
        let value = if self.has_children {
            XmlValue::Element(self.element)
        } else {
            XmlValue::Text(self.text)
        };
        (self.name, value)
    }
}

/// Decode an iXML document and return the content of its `BWFXML` root.
///
/// A well-formed document with a different root yields an empty element.
/// Attributes, comments and processing instructions are ignored.
pub fn parse_document(xml: &str) -> ExtractionResult<XmlElement> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut stack: Vec<OpenElement> = Vec::new();
    let mut root: Option<(String, XmlValue)> = None;

    loop {
        match reader.read_event() {
            Ok(Event::Start(start)) => {
                if stack.is_empty() && root.is_some() {
                    return Err(malformed("multiple root elements"));
                }
                let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();
                stack.push(OpenElement::new(name));
            }
            Ok(Event::Empty(start)) => {
                let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();
                close(&mut stack, &mut root, name, XmlValue::Text(String::new()))?;
            }
            Ok(Event::End(_)) => {
                let open = stack
                    .pop()
                    .ok_or_else(|| malformed("closing tag without opening tag"))?;
                let (name, value) = open.into_value();
                close(&mut stack, &mut root, name, value)?;
            }
            Ok(Event::Text(text)) => {
                let text = text
                    .unescape()
                    .map_err(|e| malformed(format!("invalid text: {}", e)))?;
                append_text(&mut stack, &text)?;
            }
            Ok(Event::CData(cdata)) => {
                let bytes = cdata.into_inner();
                append_text(&mut stack, &String::from_utf8_lossy(&bytes))?;
            }
            Ok(Event::Eof) => break,
            // Declaration, comments, processing instructions, doctype
            Ok(_) => {}
            Err(e) => {
                return Err(malformed(format!(
                    "at byte {}: {}",
                    reader.buffer_position(),
                    e
                )))
            }
        }
    }

    if let Some(open) = stack.last() {
        return Err(malformed(format!("unclosed element '{}'", open.name)));
    }

    match root {
        Some((name, XmlValue::Element(element))) if name == IXML_ROOT => Ok(element),
        Some((name, XmlValue::Text(_))) if name == IXML_ROOT => Ok(XmlElement::new()),
        Some((name, _)) => {
            debug!(root = %name, "iXML document root is not BWFXML, ignoring content");
            Ok(XmlElement::new())
        }
        None => Err(malformed("no root element")),
    }
}

fn close(
    stack: &mut [OpenElement],
    root: &mut Option<(String, XmlValue)>,
    name: String,
    value: XmlValue,
) -> ExtractionResult<()> {
    match stack.last_mut() {
        Some(parent) => {
            parent.has_children = true;
            parent.element.push(name, value);
        }
        None => {
            if root.is_some() {
                return Err(malformed("multiple root elements"));
            }
            *root = Some((name, value));
        }
    }
    Ok(())
}

fn append_text(stack: &mut [OpenElement], text: &str) -> ExtractionResult<()> {
    match stack.last_mut() {
        Some(open) => open.text.push_str(text),
        None if text.trim().is_empty() => {}
        None => return Err(malformed("text outside the root element")),
    }
    Ok(())
}

fn malformed(message: impl Into<String>) -> ExtractionError {
    ExtractionError::MalformedXml(message.into())
}
