//! A small owned element tree built from `quick-xml` events.
//!
//! GPX reading only needs to look things up, so the tree is exposed through
//! the read-only [`XmlNode`] trait.

use quick_xml::Reader;
use quick_xml::escape::unescape;
use quick_xml::events::{BytesStart, Event};

use crate::error::GpxError;

type Result<T> = std::result::Result<T, GpxError>;

/// Read-only view of an element.
pub trait XmlNode {
    /// Local name, without any namespace prefix.
    fn name(&self) -> &str;

    /// Direct children with the given local name, in document order.
    fn children_named(&self, tag: &str) -> Vec<&Self>;

    fn attribute(&self, name: &str) -> Option<&str>;

    /// Character content directly inside this element.
    fn leaf_text(&self) -> &str;
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Element {
    name: String,
    attributes: Vec<(String, String)>,
    children: Vec<Element>,
    text: String,
}

impl Element {
    /// Parse a document and return its root element.
    ///
    /// A document with no elements at all is reported as a missing `gpx`
    /// element, since that is the only root this crate reads.
    pub fn parse_root(xml: &str) -> Result<Element> {
        let mut reader = Reader::from_str(xml);
        let mut open: Vec<Element> = Vec::new();
        let mut root: Option<Element> = None;

        loop {
            match reader.read_event() {
                Ok(Event::Start(e)) => open.push(Element::from_start(&e)?),
                Ok(Event::Empty(e)) => {
                    let element = Element::from_start(&e)?;
                    attach(&mut open, &mut root, element)?;
                }
                Ok(Event::End(_)) => {
                    if let Some(element) = open.pop() {
                        attach(&mut open, &mut root, element)?;
                    }
                }
                Ok(Event::Text(e)) => {
                    if let Some(current) = open.last_mut() {
                        let raw = std::str::from_utf8(e.as_ref()).unwrap_or_default();
                        current.text.push_str(raw);
                    }
                }
                Ok(Event::CData(e)) => {
                    if let Some(current) = open.last_mut() {
                        let s = std::str::from_utf8(e.as_ref()).unwrap_or_default();
                        current.text.push_str(s);
                    }
                }
                Ok(Event::GeneralRef(e)) => {
                    if let Some(current) = open.last_mut() {
                        // Character references (&#60; &#x3C;) first, then the predefined entities
                        if let Ok(Some(ch)) = e.resolve_char_ref() {
                            current.text.push(ch);
                        } else {
                            let name = std::str::from_utf8(e.as_ref()).unwrap_or_default();
                            match name {
                                "amp" => current.text.push('&'),
                                "lt" => current.text.push('<'),
                                "gt" => current.text.push('>'),
                                "quot" => current.text.push('"'),
                                "apos" => current.text.push('\''),
                                _ => {}
                            }
                        }
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => return Err(GpxError::XmlParse(e)),
                _ => {}
            }
        }

        if let Some(unclosed) = open.last() {
            return Err(GpxError::UnclosedElement(unclosed.name.clone()));
        }
        root.ok_or_else(|| GpxError::missing_element(crate::gpx::GPX))
    }

    fn from_start(start: &BytesStart<'_>) -> Result<Element> {
        let name = String::from_utf8_lossy(start.local_name().as_ref()).into_owned();
        let mut attributes = Vec::new();
        for attr_result in start.attributes() {
            let attr = attr_result.map_err(|e| GpxError::XmlParse(e.into()))?;
            let key = String::from_utf8_lossy(attr.key.local_name().as_ref()).into_owned();
            let raw = std::str::from_utf8(&attr.value).unwrap_or_default();
            let value = unescape(raw)
                .map_err(|e| GpxError::XmlParse(e.into()))?
                .into_owned();
            attributes.push((key, value));
        }

        Ok(Element {
            name,
            attributes,
            ..Default::default()
        })
    }
}

/// Hang a finished element under the innermost open one, or make it the root.
/// A document has exactly one root element.
fn attach(open: &mut [Element], root: &mut Option<Element>, element: Element) -> Result<()> {
    match open.last_mut() {
        Some(parent) => parent.children.push(element),
        None if root.is_some() => return Err(GpxError::ExtraRootElement(element.name)),
        None => *root = Some(element),
    }
    Ok(())
}

impl XmlNode for Element {
    fn name(&self) -> &str {
        &self.name
    }

    fn children_named(&self, tag: &str) -> Vec<&Self> {
        self.children.iter().filter(|c| c.name == tag).collect()
    }

    fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    fn leaf_text(&self) -> &str {
        &self.text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builds_tree() {
        let xml = r#"<?xml version="1.0"?>
<gpx version="1.1">
  <rte>
    <rtept lat="1.5" lon="2.5"><name>A</name></rtept>
    <rtept lat="3.5" lon="4.5"/>
  </rte>
</gpx>"#;
        let root = Element::parse_root(xml).unwrap();
        assert_eq!(root.name(), "gpx");
        assert_eq!(root.attribute("version"), Some("1.1"));

        let rte = root.children_named("rte");
        assert_eq!(rte.len(), 1);
        let points = rte[0].children_named("rtept");
        assert_eq!(points.len(), 2);
        assert_eq!(points[0].attribute("lat"), Some("1.5"));
        assert_eq!(points[1].attribute("lon"), Some("4.5"));
        assert_eq!(points[0].children_named("name")[0].leaf_text(), "A");
        assert!(points[1].children_named("name").is_empty());
    }

    #[test]
    fn test_namespace_prefixes_dropped() {
        let xml = r#"<g:gpx xmlns:g="http://www.topografix.com/GPX/1/1"><g:trk/></g:gpx>"#;
        let root = Element::parse_root(xml).unwrap();
        assert_eq!(root.name(), "gpx");
        assert_eq!(root.children_named("trk").len(), 1);
    }

    #[test]
    fn test_cdata_and_entities() {
        let xml = r#"<gpx><name><![CDATA[Fish & Chips]]></name><desc>a &amp; b &lt;c&gt; &#65;</desc></gpx>"#;
        let root = Element::parse_root(xml).unwrap();
        assert_eq!(root.children_named("name")[0].leaf_text(), "Fish & Chips");
        assert_eq!(root.children_named("desc")[0].leaf_text(), "a & b <c> A");
    }

    #[test]
    fn test_attribute_entities_resolved() {
        let xml = r#"<gpx><rtept lat="5&#46;0" lon="&#x2D;1.5" name="A &amp; B"/></gpx>"#;
        let root = Element::parse_root(xml).unwrap();
        let point = root.children_named("rtept")[0];
        assert_eq!(point.attribute("lat"), Some("5.0"));
        assert_eq!(point.attribute("lon"), Some("-1.5"));
        assert_eq!(point.attribute("name"), Some("A & B"));
    }

    #[test]
    fn test_second_root_rejected() {
        assert!(matches!(
            Element::parse_root("<a/><gpx/>"),
            Err(GpxError::ExtraRootElement(name)) if name == "gpx"
        ));
        assert!(matches!(
            Element::parse_root("<gpx></gpx><gpx></gpx>"),
            Err(GpxError::ExtraRootElement(_))
        ));
    }

    #[test]
    fn test_empty_document() {
        assert!(matches!(
            Element::parse_root(r#"<?xml version="1.0"?>"#),
            Err(GpxError::MissingElement(name)) if name == "gpx"
        ));
    }

    #[test]
    fn test_mismatched_end_tag() {
        assert!(matches!(
            Element::parse_root("<gpx><rte></trk></gpx>"),
            Err(GpxError::XmlParse(_))
        ));
    }

    #[test]
    fn test_unclosed_root() {
        assert!(Element::parse_root("<gpx><rte></rte>").is_err());
    }
}
