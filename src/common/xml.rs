//! Shared XML helpers: subtree capture and text escaping.
//!
//! The readers in this crate keep document fragments as raw XML bytes and
//! parse them on demand. Capturing a fragment means re-emitting its events
//! into a standalone byte buffer, which keeps nested same-name elements (a
//! paragraph inside a table cell, a table inside a table) attached to the
//! subtree they belong to.
use crate::common::error::{Error, Result};
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

/// Escape XML special characters for element text and attribute values.
pub(crate) fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

/// A captured direct child element, as a standalone XML fragment.
pub(crate) struct CapturedChild {
    /// Index into the `child_names` slice passed to [`capture_children`]
    pub which: usize,
    /// Raw XML of the child subtree, including its own start/end tags
    pub xml: Vec<u8>,
}

/// Collect the direct children of the first `parent` element whose local
/// names appear in `child_names`, preserving document order.
///
/// Non-matching children (e.g. `w:sectPr` at body level, `w:trPr` at row
/// level) are skipped whole, so their inner elements are never mistaken for
/// direct children.
pub(crate) fn capture_children(
    xml: &[u8],
    parent: &[u8],
    child_names: &[&[u8]],
) -> Result<Vec<CapturedChild>> {
    let mut reader = Reader::from_reader(xml);
    let mut out = Vec::new();
    let mut in_parent = false;
    // Nesting depth of non-captured elements inside the parent.
    let mut rel_depth = 0usize;
    // (child_names index, fragment buffer, open-element depth) while capturing.
    let mut capturing: Option<(usize, Vec<u8>, usize)> = None;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                if let Some((_, buf, depth)) = capturing.as_mut() {
                    push_tag(buf, &e, false);
                    *depth += 1;
                } else if !in_parent {
                    if e.local_name().as_ref() == parent {
                        in_parent = true;
                    }
                } else if rel_depth == 0
                    && let Some(which) = name_index(child_names, e.local_name().as_ref())
                {
                    let mut buf = Vec::with_capacity(1024);
                    push_tag(&mut buf, &e, false);
                    capturing = Some((which, buf, 1));
                } else {
                    rel_depth += 1;
                }
            },
            Ok(Event::Empty(e)) => {
                if let Some((_, buf, _)) = capturing.as_mut() {
                    push_tag(buf, &e, true);
                } else if in_parent
                    && rel_depth == 0
                    && let Some(which) = name_index(child_names, e.local_name().as_ref())
                {
                    let mut buf = Vec::with_capacity(64);
                    push_tag(&mut buf, &e, true);
                    out.push(CapturedChild { which, xml: buf });
                }
            },
            Ok(Event::End(e)) => {
                if capturing.is_some() {
                    let finished = {
                        let (_, buf, depth) = capturing.as_mut().expect("checked above");
                        buf.extend_from_slice(b"</");
                        buf.extend_from_slice(e.name().as_ref());
                        buf.push(b'>');
                        *depth -= 1;
                        *depth == 0
                    };
                    if finished
                        && let Some((which, xml, _)) = capturing.take()
                    {
                        out.push(CapturedChild { which, xml });
                    }
                } else if in_parent {
                    if rel_depth > 0 {
                        rel_depth -= 1;
                    } else if e.local_name().as_ref() == parent {
                        break;
                    }
                }
            },
            Ok(Event::Text(e)) => {
                if let Some((_, buf, _)) = capturing.as_mut() {
                    // Raw (still-escaped) text, so the fragment stays valid XML.
                    buf.extend_from_slice(e.as_ref());
                }
            },
            Ok(Event::GeneralRef(e)) => {
                if let Some((_, buf, _)) = capturing.as_mut() {
                    push_ref(buf, e.as_ref());
                }
            },
            Ok(Event::CData(e)) => {
                if let Some((_, buf, _)) = capturing.as_mut() {
                    buf.extend_from_slice(b"<![CDATA[");
                    buf.extend_from_slice(e.as_ref());
                    buf.extend_from_slice(b"]]>");
                }
            },
            Ok(Event::Eof) => break,
            Err(e) => return Err(Error::Xml(e.to_string())),
            _ => {},
        }
    }

    Ok(out)
}

/// Collect every `name` subtree in the fragment that is not nested inside
/// another `name` element, in document order.
///
/// Used for runs, which may sit below wrappers like `w:hyperlink` and are
/// still part of the paragraph's flat run sequence.
pub(crate) fn capture_descendants(xml: &[u8], name: &[u8]) -> Result<Vec<Vec<u8>>> {
    let mut reader = Reader::from_reader(xml);
    let mut out = Vec::new();
    let mut capturing: Option<(Vec<u8>, usize)> = None;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                if let Some((buf, depth)) = capturing.as_mut() {
                    push_tag(buf, &e, false);
                    *depth += 1;
                } else if e.local_name().as_ref() == name {
                    let mut buf = Vec::with_capacity(512);
                    push_tag(&mut buf, &e, false);
                    capturing = Some((buf, 1));
                }
            },
            Ok(Event::Empty(e)) => {
                if let Some((buf, _)) = capturing.as_mut() {
                    push_tag(buf, &e, true);
                } else if e.local_name().as_ref() == name {
                    let mut buf = Vec::with_capacity(64);
                    push_tag(&mut buf, &e, true);
                    out.push(buf);
                }
            },
            Ok(Event::End(e)) => {
                if capturing.is_some() {
                    let finished = {
                        let (buf, depth) = capturing.as_mut().expect("checked above");
                        buf.extend_from_slice(b"</");
                        buf.extend_from_slice(e.name().as_ref());
                        buf.push(b'>');
                        *depth -= 1;
                        *depth == 0
                    };
                    if finished
                        && let Some((buf, _)) = capturing.take()
                    {
                        out.push(buf);
                    }
                }
            },
            Ok(Event::Text(e)) => {
                if let Some((buf, _)) = capturing.as_mut() {
                    buf.extend_from_slice(e.as_ref());
                }
            },
            Ok(Event::GeneralRef(e)) => {
                if let Some((buf, _)) = capturing.as_mut() {
                    push_ref(buf, e.as_ref());
                }
            },
            Ok(Event::CData(e)) => {
                if let Some((buf, _)) = capturing.as_mut() {
                    buf.extend_from_slice(b"<![CDATA[");
                    buf.extend_from_slice(e.as_ref());
                    buf.extend_from_slice(b"]]>");
                }
            },
            Ok(Event::Eof) => break,
            Err(e) => return Err(Error::Xml(e.to_string())),
            _ => {},
        }
    }

    Ok(out)
}

/// Re-emit a start (or empty) tag with its attributes verbatim.
fn push_tag(buf: &mut Vec<u8>, e: &BytesStart<'_>, empty: bool) {
    buf.push(b'<');
    buf.extend_from_slice(e.name().as_ref());
    for attr in e.attributes().flatten() {
        buf.push(b' ');
        buf.extend_from_slice(attr.key.as_ref());
        buf.extend_from_slice(b"=\"");
        buf.extend_from_slice(&attr.value);
        buf.push(b'"');
    }
    if empty {
        buf.extend_from_slice(b"/>");
    } else {
        buf.push(b'>');
    }
}

/// Re-emit an entity or character reference in its original `&name;` form.
fn push_ref(buf: &mut Vec<u8>, name: &[u8]) {
    buf.push(b'&');
    buf.extend_from_slice(name);
    buf.push(b';');
}

#[inline]
fn name_index(names: &[&[u8]], local: &[u8]) -> Option<usize> {
    names.iter().position(|n| *n == local)
}
