//! Per-page font tables and character-code decoding.
//!
//! Text operands in a content stream are byte strings whose meaning depends
//! on the font selected by the last `Tf` operator. This module resolves each
//! page's `/Resources → /Font` dictionary, loads every font's `/ToUnicode`
//! CMap when one is embedded, and decodes operand bytes to Unicode:
//!
//! - composite (`Type0`) fonts consume two-byte codes;
//! - simple fonts consume one byte per code;
//! - codes without a ToUnicode mapping fall back to the code point itself
//!   (Latin-1 for one-byte codes), which covers the standard encodings for
//!   the ASCII range.

use std::collections::HashMap;

use log::warn;
use lopdf::{Dictionary, Document, Object, ObjectId};

// ── FontMap ──────────────────────────────────────────────────────────────────

/// Fonts reachable from one page, keyed by resource name (e.g. `F1`).
pub(crate) struct FontMap {
    fonts: HashMap<Vec<u8>, PageFont>,
}

/// A single font as far as text decoding is concerned.
pub(crate) struct PageFont {
    /// `Type0` composite fonts use two-byte character codes.
    two_byte: bool,
    /// Code → Unicode mapping parsed from the `/ToUnicode` stream.
    to_unicode: Option<HashMap<u32, String>>,
}

impl FontMap {
    /// Collect the fonts of `page_id`. Missing or malformed font resources
    /// produce an empty map rather than an error; pages without text
    /// operators never consult it.
    pub(crate) fn for_page(document: &Document, page_id: ObjectId) -> Self {
        let mut fonts = HashMap::new();

        if let Some(font_dict) = Self::page_font_dict(document, page_id) {
            for (name, value) in font_dict.iter() {
                match Self::load_font(document, value) {
                    Some(font) => {
                        fonts.insert(name.clone(), font);
                    }
                    None => {
                        warn!(
                            "ignoring unreadable font resource '{}'",
                            String::from_utf8_lossy(name)
                        );
                    }
                }
            }
        }

        Self { fonts }
    }

    pub(crate) fn get(&self, name: &[u8]) -> Option<&PageFont> {
        self.fonts.get(name)
    }

    /// Walk page → `/Resources` → `/Font`, resolving indirect references at
    /// each step. `/Resources` may be inherited from an ancestor page-tree
    /// node, so lookup follows `/Parent` links.
    fn page_font_dict(document: &Document, page_id: ObjectId) -> Option<Dictionary> {
        let resources_val = inherited_page_value(document, page_id, b"Resources")?;
        let resources = resolve_dict(document, &resources_val)?;
        let fonts_val = resources.get(b"Font").ok()?.clone();
        resolve_dict(document, &fonts_val)
    }

    fn load_font(document: &Document, value: &Object) -> Option<PageFont> {
        let dict = resolve_dict(document, value)?;

        let two_byte = dict
            .get(b"Subtype")
            .ok()
            .and_then(|v| v.as_name().ok())
            .map(|subtype| subtype == b"Type0")
            .unwrap_or(false);

        let to_unicode = dict
            .get(b"ToUnicode")
            .ok()
            .and_then(|v| v.as_reference().ok())
            .and_then(|id| document.get_object(id).ok())
            .and_then(|obj| obj.as_stream().ok())
            .and_then(|stream| {
                let data = stream
                    .decompressed_content()
                    .unwrap_or_else(|_| stream.content.clone());
                let map = parse_tounicode_cmap(&data);
                if map.is_empty() {
                    None
                } else {
                    Some(map)
                }
            });

        Some(PageFont { two_byte, to_unicode })
    }
}

impl PageFont {
    fn lookup(&self, code: u32) -> Option<&str> {
        self.to_unicode.as_ref()?.get(&code).map(String::as_str)
    }
}

// ── Dictionary walking helpers ───────────────────────────────────────────────

/// Resolve a value that might be an inline dictionary or a reference to one.
fn resolve_dict(document: &Document, value: &Object) -> Option<Dictionary> {
    if let Ok(id) = value.as_reference() {
        document
            .get_object(id)
            .ok()
            .and_then(|o| o.as_dict().ok().cloned())
    } else {
        value.as_dict().ok().cloned()
    }
}

/// Look up `key` on a page dictionary, following `/Parent` links up the page
/// tree when the page inherits it.
fn inherited_page_value(document: &Document, page_id: ObjectId, key: &[u8]) -> Option<Object> {
    let mut current = page_id;
    loop {
        let dict = document.get_object(current).ok()?.as_dict().ok()?;
        if let Ok(value) = dict.get(key) {
            return Some(value.clone());
        }
        current = dict.get(b"Parent").ok()?.as_reference().ok()?;
    }
}

// ── String decoding ──────────────────────────────────────────────────────────

/// Decode a content-stream string operand through `font`.
///
/// With no active font the bytes are read as Latin-1, which maps each byte
/// to the same code point and so cannot fail.
pub(crate) fn decode_string(font: Option<&PageFont>, bytes: &[u8]) -> String {
    let Some(font) = font else {
        return bytes.iter().map(|&b| char::from(b)).collect();
    };

    let mut out = String::new();
    if font.two_byte {
        for chunk in bytes.chunks(2) {
            let code = chunk.iter().fold(0u32, |v, &b| (v << 8) | u32::from(b));
            match font.lookup(code) {
                Some(mapped) => out.push_str(mapped),
                // Identity-mapped CID fonts frequently carry UTF-16BE-like
                // code points directly.
                None => {
                    if let Some(ch) = char::from_u32(code) {
                        out.push(ch);
                    }
                }
            }
        }
    } else {
        for &byte in bytes {
            match font.lookup(u32::from(byte)) {
                Some(mapped) => out.push_str(mapped),
                None => out.push(char::from(byte)),
            }
        }
    }
    out
}

// ── ToUnicode CMap parsing ───────────────────────────────────────────────────

/// Upper bound on a single `bfrange` expansion. Ranges beyond this are
/// truncated so a hostile CMap cannot balloon the map.
const MAX_BFRANGE_SPAN: u32 = 0xFFFF;

/// Parse the `bfchar`/`bfrange` sections of a ToUnicode CMap into a
/// code → string table. Values are UTF-16BE hex strings and may map one code
/// to several characters (ligatures). Tokens that fail to parse are skipped;
/// a damaged CMap yields a partial table, not an error.
fn parse_tounicode_cmap(data: &[u8]) -> HashMap<u32, String> {
    let mut tokens = CMapTokenizer::new(data);
    let mut map = HashMap::new();

    while let Some(token) = tokens.next() {
        match token.as_str() {
            "beginbfchar" => {
                while let Some(src_tok) = tokens.next() {
                    if src_tok == "endbfchar" {
                        break;
                    }
                    let src = parse_hex_token(&src_tok);
                    let dst = parse_hex_token(&tokens.next().unwrap_or_default());
                    if !src.is_empty() {
                        if let Some(text) = utf16be_to_string(&dst) {
                            map.insert(bytes_to_code(&src), text);
                        }
                    }
                }
            }
            "beginbfrange" => {
                while let Some(start_tok) = tokens.next() {
                    if start_tok == "endbfrange" {
                        break;
                    }
                    let start = parse_hex_token(&start_tok);
                    let end = parse_hex_token(&tokens.next().unwrap_or_default());
                    let Some(dst_tok) = tokens.next() else {
                        break;
                    };
                    if start.is_empty() || end.is_empty() {
                        continue;
                    }

                    let first = bytes_to_code(&start);
                    let last = bytes_to_code(&end).min(first.saturating_add(MAX_BFRANGE_SPAN));
                    if last < first {
                        continue;
                    }

                    if dst_tok == "[" {
                        // Explicit per-code destinations: <a> <b> [<d1> <d2> …]
                        let mut code = first;
                        while let Some(item) = tokens.next() {
                            if item == "]" {
                                break;
                            }
                            if let Some(text) = utf16be_to_string(&parse_hex_token(&item)) {
                                map.insert(code, text);
                            }
                            code = code.saturating_add(1);
                        }
                    } else {
                        // Single destination incremented across the range:
                        // <a> <b> <dst>
                        let Some(text) = utf16be_to_string(&parse_hex_token(&dst_tok)) else {
                            continue;
                        };
                        let Some(base) = text.chars().next().map(|c| c as u32) else {
                            continue;
                        };
                        for offset in 0..=(last - first) {
                            if let Some(ch) = char::from_u32(base + offset) {
                                map.insert(first + offset, ch.to_string());
                            }
                        }
                    }
                }
            }
            _ => {}
        }
    }

    map
}

fn bytes_to_code(bytes: &[u8]) -> u32 {
    bytes.iter().fold(0u32, |v, &b| (v << 8) | u32::from(b))
}

/// `<AABB…>` hex token → raw bytes. Anything else yields an empty vec.
fn parse_hex_token(token: &str) -> Vec<u8> {
    let trimmed = token.trim();
    let Some(inner) = trimmed
        .strip_prefix('<')
        .and_then(|t| t.strip_suffix('>'))
    else {
        return Vec::new();
    };

    let mut out = Vec::with_capacity(inner.len() / 2);
    let mut chars = inner.chars();
    while let (Some(a), Some(b)) = (chars.next(), chars.next()) {
        let Some(hi) = a.to_digit(16) else { return out };
        let Some(lo) = b.to_digit(16) else { return out };
        out.push((hi as u8) << 4 | lo as u8);
    }
    out
}

fn utf16be_to_string(bytes: &[u8]) -> Option<String> {
    if bytes.is_empty() || bytes.len() % 2 != 0 {
        return None;
    }
    let units: Vec<u16> = bytes
        .chunks_exact(2)
        .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
        .collect();
    String::from_utf16(&units).ok()
}

// ── CMap tokenizer ───────────────────────────────────────────────────────────

/// Minimal tokenizer for the postfix CMap syntax: whitespace-separated
/// words, `<hex>` runs, and `[` / `]` as standalone tokens.
struct CMapTokenizer<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> CMapTokenizer<'a> {
    fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    fn next(&mut self) -> Option<String> {
        while self.pos < self.data.len() && self.data[self.pos].is_ascii_whitespace() {
            self.pos += 1;
        }
        if self.pos >= self.data.len() {
            return None;
        }

        let b = self.data[self.pos];
        if b == b'<' {
            let start = self.pos;
            self.pos += 1;
            while self.pos < self.data.len() && self.data[self.pos] != b'>' {
                self.pos += 1;
            }
            if self.pos < self.data.len() {
                self.pos += 1;
            }
            return Some(String::from_utf8_lossy(&self.data[start..self.pos]).into_owned());
        }
        if b == b'[' || b == b']' {
            self.pos += 1;
            return Some(char::from(b).to_string());
        }

        let start = self.pos;
        while self.pos < self.data.len()
            && !self.data[self.pos].is_ascii_whitespace()
            && !matches!(self.data[self.pos], b'<' | b'[' | b']')
        {
            self.pos += 1;
        }
        Some(String::from_utf8_lossy(&self.data[start..self.pos]).into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bfchar_entries_map_to_utf16_values() {
        let cmap = b"
            /CIDInit /ProcSet findresource begin
            begincmap
            2 beginbfchar
            <0041> <0048>
            <0042> <00480069>
            endbfchar
            endcmap
        ";
        let map = parse_tounicode_cmap(cmap);
        assert_eq!(map.get(&0x41).map(String::as_str), Some("H"));
        assert_eq!(map.get(&0x42).map(String::as_str), Some("Hi"));
    }

    #[test]
    fn bfrange_expands_incrementally() {
        let cmap = b"1 beginbfrange <0001> <0003> <0061> endbfrange";
        let map = parse_tounicode_cmap(cmap);
        assert_eq!(map.get(&1).map(String::as_str), Some("a"));
        assert_eq!(map.get(&2).map(String::as_str), Some("b"));
        assert_eq!(map.get(&3).map(String::as_str), Some("c"));
    }

    #[test]
    fn bfrange_array_form_maps_each_code() {
        let cmap = b"1 beginbfrange <0005> <0006> [<0058> <0059>] endbfrange";
        let map = parse_tounicode_cmap(cmap);
        assert_eq!(map.get(&5).map(String::as_str), Some("X"));
        assert_eq!(map.get(&6).map(String::as_str), Some("Y"));
    }

    #[test]
    fn damaged_cmap_yields_partial_table() {
        let cmap = b"2 beginbfchar <0041> <0048> garbage endbfchar";
        let map = parse_tounicode_cmap(cmap);
        assert_eq!(map.get(&0x41).map(String::as_str), Some("H"));
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn latin1_fallback_without_font() {
        assert_eq!(decode_string(None, b"Invoice 2024"), "Invoice 2024");
        assert_eq!(decode_string(None, &[0xE9]), "\u{e9}");
    }
}
