// src/render/html.rs
//! Standalone HTML page around rendered regions

use chrono::Utc;

use super::dom::escape_html;
use super::View;

const PAGE_STYLE: &str = "table{border-collapse:collapse;margin:1em 0}\
th,td{border:1px solid #999;padding:2px 6px}\
pre{background:#f4f4f4;padding:6px}";

pub fn page<V: View + ?Sized>(title: &str, view: &V) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>{title}</title>\n\
<style>{style}</style>\n</head>\n<body>\n<h1>{title}</h1>\n<p>Generated {generated}</p>\n{body}\n</body>\n</html>\n",
        title = escape_html(title),
        style = PAGE_STYLE,
        generated = Utc::now().format("%Y-%m-%d %H:%M:%S UTC"),
        body = view.to_html(),
    )
}
