//! # Implementor Assets
//!
//! Loading and writing implementor tables as data files.
//!
//! Two formats are understood:
//!
//! - **Json**: the bare table, `{"crate": [{"text": .., "synthetic": .., "types": [..]}]}`.
//! - **JsShim**: the documentation generator's script, which builds the same
//!   table one library per line and then registers it:
//!
//! ```text
//! (function() {var implementors = {};
//! implementors["serde"] = [{"text":"impl ..","synthetic":false,"types":["serde::de::IgnoredAny"]}];
//! if (window.register_implementors) {window.register_implementors(implementors);} else {window.pending_implementors = implementors;}})()
//! ```

use std::{fs, path::Path, str::FromStr};

use lazy_static::lazy_static;
use regex::Regex;
use tracing::{debug, info, warn};

use crate::{
    model::{ImplementationRecord, ImplementorTable},
    Error, InternalResult,
};

pub const SHIM_HEADER: &str = "(function() {var implementors = {};";
pub const SHIM_REGISTRATION: &str = "if (window.register_implementors) {window.register_implementors(implementors);} else {window.pending_implementors = implementors;}})()";

lazy_static! {
    static ref ASSIGNMENT: Regex = Regex::new(
        r#"^implementors\[(?P<library>"(?:[^"\\]|\\.)*")\]\s*=\s*(?P<records>\[.*\]);?$"#
    )
    .expect("assignment pattern is valid");
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display, strum::EnumString)]
pub enum AssetFormat {
    #[strum(serialize = "json")]
    Json,
    #[strum(serialize = "js")]
    JsShim,
}

impl AssetFormat {
    /// Format implied by the file extension.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Option<Self> {
        path.as_ref()
            .extension()
            .and_then(|ext| ext.to_str())
            .and_then(|ext| Self::from_str(&ext.to_ascii_lowercase()).ok())
    }

    /// Guesses the format from the content.
    pub fn detect(content: &str) -> Self {
        let head = content.trim_start();
        if head.starts_with("(function") || head.starts_with("var implementors") {
            Self::JsShim
        } else {
            Self::Json
        }
    }
}

pub fn parse(content: &str, format: AssetFormat) -> InternalResult<ImplementorTable> {
    match format {
        AssetFormat::Json => parse_json(content),
        AssetFormat::JsShim => parse_js_shim(content),
    }
}

pub fn parse_json(content: &str) -> InternalResult<ImplementorTable> {
    Ok(serde_json::from_str(content)?)
}

pub fn parse_js_shim(content: &str) -> InternalResult<ImplementorTable> {
    let mut table = ImplementorTable::new();
    let mut seen_header = false;

    for (index, raw_line) in content.lines().enumerate() {
        let line_number = index + 1;
        let line = raw_line.trim();
        if line.is_empty() {
            continue;
        }

        if !seen_header {
            if !line.contains("var implementors") {
                return Err(Error::malformed_shim(
                    line_number,
                    "expected `var implementors` header",
                ));
            }
            seen_header = true;
            continue;
        }

        if line.starts_with("if (window.register_implementors)") {
            continue;
        }

        let caps = ASSIGNMENT.captures(line).ok_or_else(|| {
            Error::malformed_shim(line_number, "expected `implementors[\"<crate>\"] = [..];`")
        })?;
        let library: String = serde_json::from_str(&caps["library"])
            .map_err(|e| Error::malformed_shim(line_number, e.to_string()))?;
        let records: Vec<ImplementationRecord> = serde_json::from_str(&caps["records"])
            .map_err(|e| Error::malformed_shim(line_number, e.to_string()))?;

        debug!(library = %library, records = records.len(), "parsed implementors line");
        if table.insert(library.clone(), records).is_some() {
            warn!(library = %library, line = line_number, "library assigned twice, keeping the later list");
        }
    }

    if !seen_header {
        return Err(Error::malformed_shim(0, "empty implementors shim"));
    }

    Ok(table)
}

/// Reads a table from disk, picking the format from the extension and
/// falling back to content sniffing.
pub fn load<P: AsRef<Path>>(path: P) -> InternalResult<ImplementorTable> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)?;
    let format = AssetFormat::from_path(path).unwrap_or_else(|| AssetFormat::detect(&content));

    let table = parse(&content, format)?;
    info!(
        path = %path.display(),
        %format,
        libraries = table.len(),
        records = table.record_count(),
        "loaded implementors"
    );
    Ok(table)
}

pub fn render(table: &ImplementorTable, format: AssetFormat) -> InternalResult<String> {
    match format {
        AssetFormat::Json => to_json(table),
        AssetFormat::JsShim => to_js_shim(table),
    }
}

pub fn to_json(table: &ImplementorTable) -> InternalResult<String> {
    Ok(serde_json::to_string_pretty(table)?)
}

pub fn to_js_shim(table: &ImplementorTable) -> InternalResult<String> {
    let mut js = String::from(SHIM_HEADER);
    js.push('\n');
    for (library, records) in table.iter() {
        js.push_str(&format!(
            "implementors[{}] = {};\n",
            serde_json::to_string(library)?,
            serde_json::to_string(records)?
        ));
    }
    js.push_str(SHIM_REGISTRATION);
    Ok(js)
}
