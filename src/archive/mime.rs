// src/archive/mime.rs
// =============================================================================
// Guesses an entry's MIME type from its file extension.
//
// Directory-backed archives have no stored MIME types. The extension decides
// first (case-insensitive). Files without a known extension, such as legacy
// articles named "A/Main_Page", are recognised as HTML from their leading
// bytes; anything else is application/octet-stream.
// =============================================================================

pub const HTML: &str = "text/html";
const FALLBACK: &str = "application/octet-stream";

// (extension, mime type), lowercase
const EXTENSIONS: &[(&str, &str)] = &[
    ("html", HTML),
    ("htm", HTML),
    ("png", "image/png"),
    ("tiff", "image/tiff"),
    ("tif", "image/tiff"),
    ("jpeg", "image/jpeg"),
    ("jpg", "image/jpeg"),
    ("gif", "image/gif"),
    ("svg", "image/svg+xml"),
    ("webp", "image/webp"),
    ("txt", "text/plain"),
    ("xml", "text/xml"),
    ("css", "text/css"),
    ("vtt", "text/vtt"),
    ("js", "application/javascript"),
    ("json", "application/json"),
    ("epub", "application/epub+zip"),
    ("pdf", "application/pdf"),
    ("zip", "application/zip"),
    ("wasm", "application/wasm"),
    ("ogg", "audio/ogg"),
    ("ogv", "video/ogg"),
    ("webm", "video/webm"),
    ("mp4", "video/mp4"),
    ("otf", "application/vnd.ms-opentype"),
    ("eot", "application/vnd.ms-fontobject"),
    ("ttf", "application/font-ttf"),
    ("woff", "application/font-woff"),
    ("woff2", "application/font-woff2"),
    ("doc", "application/msword"),
    (
        "docx",
        "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
    ),
    ("ppt", "application/vnd.ms-powerpoint"),
    ("odt", "application/vnd.oasis.opendocument.text"),
    ("odp", "application/vnd.oasis.opendocument.presentation"),
];

/// Returns the MIME type for a path, based on the text after its last '.'.
pub fn mime_type_for_path(path: &str) -> &'static str {
    let file_name = path.rsplit('/').next().unwrap_or(path);
    let Some((_, ext)) = file_name.rsplit_once('.') else {
        return FALLBACK;
    };
    let ext = ext.to_ascii_lowercase();
    EXTENSIONS
        .iter()
        .find(|(known, _)| *known == ext)
        .map(|(_, mime)| *mime)
        .unwrap_or(FALLBACK)
}

/// How many leading bytes `sniff_html` needs to look at.
pub const SNIFF_LEN: usize = 512;

const HTML_PREFIXES: &[&[u8]] = &[b"<!doctype html", b"<html"];

/// True when the payload starts (after a BOM and whitespace) with a doctype
/// or an `<html` tag.
pub fn sniff_html(head: &[u8]) -> bool {
    let head = head.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(head);
    let start = head
        .iter()
        .position(|b| !b.is_ascii_whitespace())
        .unwrap_or(head.len());
    let head = &head[start..];
    HTML_PREFIXES.iter().any(|prefix| {
        head.len() >= prefix.len() && head[..prefix.len()].eq_ignore_ascii_case(prefix)
    })
}

/// Like `mime_type_for_path`, but falls back to the payload's leading bytes
/// when the extension says nothing.
pub fn mime_type_for_file(path: &str, head: &[u8]) -> &'static str {
    match mime_type_for_path(path) {
        FALLBACK if sniff_html(head) => HTML,
        mime => mime,
    }
}

/// Whether the extension alone decided the type.
pub fn is_fallback(mime: &str) -> bool {
    mime == FALLBACK
}
