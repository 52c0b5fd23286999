//! HTML for the listing page.

use imagerank_common::ImageEntry;
use std::fmt::Write;

const PAGE_HEAD: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>Image Ranking</title>
<style>
body { font-family: sans-serif; margin: 2rem; }
.images { display: flex; flex-wrap: wrap; gap: 1.5rem; }
.image { width: 220px; text-align: center; }
.image img { max-width: 200px; max-height: 200px; }
.score { font-weight: bold; }
form { display: inline; }
</style>
</head>
<body>
<h1>Image Ranking</h1>
"#;

const PAGE_TAIL: &str = "</body>\n</html>\n";

/// Render the listing page for `entries`.
pub fn render_index(entries: &[ImageEntry]) -> String {
    let mut html = String::with_capacity(PAGE_HEAD.len() + entries.len() * 512);
    html.push_str(PAGE_HEAD);

    if entries.is_empty() {
        html.push_str("<p class=\"empty\">No images yet.</p>\n");
    } else {
        html.push_str("<div class=\"images\">\n");
        for entry in entries {
            render_entry(&mut html, entry);
        }
        html.push_str("</div>\n");
    }

    html.push_str(PAGE_TAIL);
    html
}

fn render_entry(html: &mut String, entry: &ImageEntry) {
    let key = escape_html(&entry.key);
    let url = escape_html(&entry.url);

    let _ = write!(
        html,
        r#"<div class="image">
<img src="{url}" alt="{key}">
<p>{key}</p>
<p class="score">Score: {score}</p>
<form method="post" action="/vote"><input type="hidden" name="image_key" value="{key}"><input type="hidden" name="vote" value="up"><button type="submit">Upvote</button></form>
<form method="post" action="/vote"><input type="hidden" name="image_key" value="{key}"><input type="hidden" name="vote" value="down"><button type="submit">Downvote</button></form>
</div>
"#,
        score = entry.score,
    );
}

/// Escape text for use in HTML element content and quoted attributes.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
