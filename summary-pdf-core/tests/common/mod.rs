//! Test helpers that read back the structure of a generated document.

#![allow(dead_code)]

/// The cross-reference section as found through `startxref`.
#[derive(Debug)]
pub struct ParsedXref {
    /// Byte offset of the `xref` keyword
    pub start: usize,
    /// Declared entry count, free entry included
    pub size: usize,
    /// Offsets of objects 1..size, in id order
    pub offsets: Vec<usize>,
}

pub fn as_text(bytes: &[u8]) -> &str {
    std::str::from_utf8(bytes).expect("document should be ASCII")
}

pub fn parse_xref(bytes: &[u8]) -> ParsedXref {
    let text = as_text(bytes);
    let marker = text.rfind("startxref\n").expect("startxref marker");
    let start: usize = text[marker + "startxref\n".len()..]
        .lines()
        .next()
        .expect("startxref value")
        .trim()
        .parse()
        .expect("numeric startxref");

    let mut lines = text[start..].lines();
    assert_eq!(lines.next(), Some("xref"), "startxref must point at xref");
    let header = lines.next().expect("subsection header");
    let (first, size) = header.split_once(' ').expect("two numbers");
    assert_eq!(first, "0");
    let size: usize = size.parse().expect("numeric size");

    assert_eq!(lines.next(), Some("0000000000 65535 f "));
    let offsets = (1..size)
        .map(|_| {
            let entry = lines.next().expect("xref entry");
            assert_eq!(entry.len(), 19, "entry {entry:?} must be 20 bytes with its newline");
            assert_eq!(&entry[10..], " 00000 n ");
            entry[..10].parse().expect("numeric offset")
        })
        .collect();

    ParsedXref {
        start,
        size,
        offsets,
    }
}

/// Text of object `number` (1-based), from its header to the next object or
/// the xref section.
pub fn object_text(bytes: &[u8], number: usize) -> &str {
    let xref = parse_xref(bytes);
    let start = xref.offsets[number - 1];
    let end = xref.offsets.get(number).copied().unwrap_or(xref.start);
    &as_text(bytes)[start..end]
}

/// Returns the declared `/Length` and the actual payload of a stream object.
pub fn stream_payload(bytes: &[u8], number: usize) -> (usize, &str) {
    let object = object_text(bytes, number);
    let length_at = object.find("/Length ").expect("stream has /Length") + "/Length ".len();
    let declared: usize = object[length_at..]
        .split(' ')
        .next()
        .and_then(|n| n.parse().ok())
        .expect("numeric /Length");

    let payload_start = object.find(" stream\n").expect("stream keyword") + " stream\n".len();
    let payload_end = object.rfind("endstream endobj\n").expect("endstream keyword");
    (declared, &object[payload_start..payload_end])
}

/// Value of the trailer's `/Size`.
pub fn trailer_size(bytes: &[u8]) -> usize {
    let text = as_text(bytes);
    let trailer = text.rfind("trailer\n<< /Size ").expect("trailer") + "trailer\n<< /Size ".len();
    text[trailer..]
        .split(' ')
        .next()
        .and_then(|n| n.parse().ok())
        .expect("numeric /Size")
}
