use printpdf::{BuiltinFont, Mm, PdfDocument};

#[derive(Debug, thiserror::Error)]
pub enum PdfError {
    #[error("PDF generation error: {0}")]
    Generation(String),
}

const PAGE_WIDTH: f64 = 210.0; // A4, mm
const PAGE_HEIGHT: f64 = 297.0;
const MARGIN: f64 = 20.0;
const LINE_HEIGHT: f64 = 6.0;
const FONT_SIZE: f64 = 11.0;
const MAX_LINE_CHARS: usize = 90;

/// Renders the text content of an HTML document onto A4 pages.
///
/// The letters and payslips produced by the template engine are simple,
/// linear documents, so markup is flattened: block-level closing tags break
/// lines, table cells become spaces, inline tags are dropped. Layout fidelity
/// is not a goal; a stable printable artifact is.
pub fn html_to_pdf(html: &str) -> Result<Vec<u8>, PdfError> {
    let lines = html_to_lines(html);

    let (doc, first_page, first_layer) =
        PdfDocument::new("Document", Mm(PAGE_WIDTH as _), Mm(PAGE_HEIGHT as _), "content");
    let font = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| PdfError::Generation(e.to_string()))?;

    let mut layer = doc.get_page(first_page).get_layer(first_layer);
    let mut y = PAGE_HEIGHT - MARGIN;

    for line in lines {
        if y < MARGIN {
            let (page, layer_idx) =
                doc.add_page(Mm(PAGE_WIDTH as _), Mm(PAGE_HEIGHT as _), "content");
            layer = doc.get_page(page).get_layer(layer_idx);
            y = PAGE_HEIGHT - MARGIN;
        }
        if !line.is_empty() {
            layer.use_text(line, FONT_SIZE as _, Mm(MARGIN as _), Mm(y as _), &font);
        }
        y -= LINE_HEIGHT;
    }

    doc.save_to_bytes()
        .map_err(|e| PdfError::Generation(e.to_string()))
}

fn html_to_lines(html: &str) -> Vec<String> {
    let text = decode_entities(&strip_markup(html));

    let mut lines = Vec::new();
    let mut blank_run = 0usize;
    for raw in text.lines() {
        let line = raw.split_whitespace().collect::<Vec<_>>().join(" ");
        if line.is_empty() {
            blank_run += 1;
            if blank_run == 1 && !lines.is_empty() {
                lines.push(String::new());
            }
        } else {
            blank_run = 0;
            wrap_line(&line, &mut lines);
        }
    }
    while lines.last().is_some_and(|l| l.is_empty()) {
        lines.pop();
    }
    lines
}

fn wrap_line(line: &str, out: &mut Vec<String>) {
    let mut current = String::new();
    for word in line.split(' ') {
        if !current.is_empty() && current.len() + 1 + word.len() > MAX_LINE_CHARS {
            out.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        out.push(current);
    }
}

fn strip_markup(html: &str) -> String {
    let mut out = String::with_capacity(html.len());
    let bytes = html.as_bytes();
    let mut i = 0;

    while i < html.len() {
        if bytes[i] != b'<' {
            let ch = html[i..].chars().next().unwrap_or('\u{FFFD}');
            out.push(ch);
            i += ch.len_utf8();
            continue;
        }

        // style/script bodies carry no document text
        if starts_with_ci(&html[i..], "<style") {
            i += skip_element(&html[i..], "</style>");
            continue;
        }
        if starts_with_ci(&html[i..], "<script") {
            i += skip_element(&html[i..], "</script>");
            continue;
        }

        let close = html[i..].find('>').map(|p| i + p + 1).unwrap_or(html.len());
        let tag = &html[i..close];

        if ["<br", "</p", "</div", "</h", "</tr", "</li", "</table"]
            .iter()
            .any(|t| starts_with_ci(tag, t))
        {
            out.push('\n');
        } else if starts_with_ci(tag, "</td") || starts_with_ci(tag, "</th") {
            out.push(' ');
        }

        i = close;
    }

    out
}

fn skip_element(rest: &str, closing: &str) -> usize {
    match find_ci(rest, closing) {
        Some(pos) => pos + closing.len(),
        None => rest.len(),
    }
}

fn starts_with_ci(s: &str, prefix: &str) -> bool {
    s.len() >= prefix.len()
        && s.is_char_boundary(prefix.len())
        && s[..prefix.len()].eq_ignore_ascii_case(prefix)
}

fn find_ci(haystack: &str, needle: &str) -> Option<usize> {
    if needle.len() > haystack.len() {
        return None;
    }
    haystack
        .as_bytes()
        .windows(needle.len())
        .position(|w| w.eq_ignore_ascii_case(needle.as_bytes()))
}

fn decode_entities(text: &str) -> String {
    text.replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}
