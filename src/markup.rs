//! Helpers over the HTML fragment carried by an implementation record.

use html2text::from_read;
use lazy_static::lazy_static;
use regex::{Captures, Regex};

use crate::{Error, InternalResult};

// wide enough that a description never wraps
const PLAIN_TEXT_WIDTH: usize = 4096;

lazy_static! {
    static ref ANCHOR: Regex = Regex::new(
        r#"<a class="(?P<kind>[^"]*)" href="(?P<href>[^"]*)" title="(?P<title>[^"]*)">(?P<label>.*?)</a>"#
    )
    .expect("anchor pattern is valid");
    static ref HREF: Regex = Regex::new(r#"href="(?P<href>[^"]*)""#).expect("href pattern is valid");
    static ref LINK_REFERENCE: Regex =
        Regex::new(r"\[(?P<label>[^\]]*)\]\[\d+\]").expect("link reference pattern is valid");
    static ref FOOTNOTE: Regex = Regex::new(r"^\[\d+\]: ").expect("footnote pattern is valid");
}

/// A hyperlink found in a description, e.g. the trait or the implementing type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImplLink {
    /// Item kind from the `class` attribute (`trait`, `struct`, `enum`, ...).
    pub kind: String,
    pub href: String,
    /// Kind followed by the item path, e.g. `trait core::default::Default`.
    pub title: String,
    pub label: String,
}

impl ImplLink {
    /// Item path from the title with the kind prefix removed.
    pub fn path(&self) -> &str {
        self.title
            .split_once(' ')
            .map(|(_, path)| path)
            .unwrap_or(self.title.as_str())
    }

    pub fn is_external(&self) -> bool {
        self.href.starts_with("http")
    }
}

pub fn links(markup: &str) -> Vec<ImplLink> {
    ANCHOR
        .captures_iter(markup)
        .map(|caps| ImplLink {
            kind: caps["kind"].to_string(),
            href: caps["href"].to_string(),
            title: caps["title"].to_string(),
            label: caps["label"].to_string(),
        })
        .collect()
}

/// Prefixes every relative `href` with `root_path`.
///
/// Links starting with `http` are left alone.
pub fn rebase_links(markup: &str, root_path: &str) -> String {
    HREF.replace_all(markup, |caps: &Captures| {
        let href = &caps["href"];
        if href.starts_with("http") {
            caps[0].to_string()
        } else {
            format!(r#"href="{}{}""#, root_path, href)
        }
    })
    .into_owned()
}

/// Renders a description as a single line of text.
pub fn plain_text(markup: &str) -> InternalResult<String> {
    let text = from_read(markup.as_bytes(), PLAIN_TEXT_WIDTH)
        .map_err(|e| Error::Render(e.to_string()))?;

    let text = text
        .lines()
        .map(|line| line.trim())
        .filter(|line| !line.is_empty() && !FOOTNOTE.is_match(line))
        .collect::<Vec<_>>()
        .join(" ");

    Ok(LINK_REFERENCE.replace_all(&text, "$label").into_owned())
}
