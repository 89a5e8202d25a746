//! # Implementors Panel
//!
//! A [`Registrar`] that lays out the "Implementors" section of a trait page.
//!
//! Registration follows the documentation front end:
//!
//! 1. Libraries named like the page's own crate are skipped; their impls are
//!    already part of the page.
//! 2. Explicit impls and synthetic (auto trait) impls go to separate lists.
//! 3. A synthetic impl is dropped once any of its types was already listed.
//!    Types are marked while walking, so the ones before the duplicate stay
//!    marked.
//! 4. Crate-relative links are prefixed with the page's root path.
//!
//! Registrations accumulate; tables from several publishes end up in one
//! panel.

use std::{
    collections::HashSet,
    fmt::Write as _,
    sync::{Mutex, MutexGuard, PoisonError},
};

use tracing::debug;

use crate::{
    config::PanelConfig,
    markup,
    model::{ImplementationRecord, ImplementorTable, LibraryId},
    registrar::Registrar,
    InternalResult,
};

/// One line of the panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelEntry {
    pub library: LibraryId,
    /// Description with links rebased onto the root path.
    pub markup: String,
    pub types: Vec<String>,
}

#[derive(Debug, Default)]
struct PanelState {
    explicit: Vec<PanelEntry>,
    synthetic: Vec<PanelEntry>,
    inlined_types: HashSet<String>,
}

#[derive(Debug, Default)]
pub struct ImplementorsPanel {
    config: PanelConfig,
    state: Mutex<PanelState>,
}

impl ImplementorsPanel {
    pub fn new(config: PanelConfig) -> Self {
        Self {
            config,
            state: Mutex::new(PanelState::default()),
        }
    }

    pub fn config(&self) -> &PanelConfig {
        &self.config
    }

    fn lock(&self) -> MutexGuard<'_, PanelState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Marks types already present on the page, e.g. impls inlined by the
    /// page itself.
    pub fn mark_inlined<I, S>(&self, types: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.lock()
            .inlined_types
            .extend(types.into_iter().map(Into::into));
    }

    pub fn explicit(&self) -> Vec<PanelEntry> {
        self.lock().explicit.clone()
    }

    pub fn synthetic(&self) -> Vec<PanelEntry> {
        self.lock().synthetic.clone()
    }

    pub fn len(&self) -> usize {
        let state = self.lock();
        state.explicit.len() + state.synthetic.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn entry(&self, library: &str, record: &ImplementationRecord) -> PanelEntry {
        PanelEntry {
            library: library.to_string(),
            markup: markup::rebase_links(&record.description_markup, &self.config.root_path),
            types: record.implementing_type_path.clone(),
        }
    }

    pub fn render_html(&self) -> String {
        let state = self.lock();
        let mut html = String::new();
        for (id, entries) in [
            ("implementors-list", &state.explicit),
            ("synthetic-implementors-list", &state.synthetic),
        ] {
            let _ = writeln!(html, "<div id=\"{}\">", id);
            for entry in entries {
                let _ = writeln!(html, "<h3 class=\"impl\"><code>{}</code></h3>", entry.markup);
            }
            html.push_str("</div>\n");
        }
        html
    }

    pub fn render_text(&self) -> InternalResult<String> {
        let state = self.lock();
        let mut text = String::new();
        for (heading, entries) in [
            ("Implementors", &state.explicit),
            ("Auto implementors", &state.synthetic),
        ] {
            if entries.is_empty() {
                continue;
            }
            let _ = writeln!(text, "{}:", heading);
            for entry in entries {
                let _ = writeln!(
                    text,
                    "  [{}] {}",
                    entry.library,
                    markup::plain_text(&entry.markup)?
                );
            }
        }
        Ok(text)
    }
}

impl Registrar for ImplementorsPanel {
    fn register_implementors(&self, table: ImplementorTable) {
        let mut state = self.lock();
        let current_crate = self.config.current_crate.as_deref();

        for (library, records) in table.iter() {
            if Some(library) == current_crate {
                debug!(library, "skipping current crate");
                continue;
            }

            'records: for record in records {
                if !record.is_synthetic {
                    let entry = self.entry(library, record);
                    state.explicit.push(entry);
                    continue;
                }

                if self.config.dedupe_synthetic {
                    for ty in &record.implementing_type_path {
                        if !state.inlined_types.insert(ty.clone()) {
                            debug!(library, ty = %ty, "dropping already listed synthetic impl");
                            continue 'records;
                        }
                    }
                }
                let entry = self.entry(library, record);
                state.synthetic.push(entry);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn record(text: &str, synthetic: bool, types: &[&str]) -> ImplementationRecord {
        ImplementationRecord::new(
            text,
            synthetic,
            types.iter().map(|ty| ty.to_string()).collect(),
        )
    }

    fn libraries(entries: &[PanelEntry]) -> Vec<&str> {
        entries.iter().map(|entry| entry.library.as_str()).collect()
    }

    #[test]
    fn test_routes_by_synthetic_flag() {
        let panel = ImplementorsPanel::default();
        panel.register_implementors(ImplementorTable::new().with_library(
            "a",
            vec![
                record("impl Send for A", true, &["a::A"]),
                record("impl Clone for A", false, &["a::A"]),
            ],
        ));

        assert_eq!(panel.explicit().len(), 1);
        assert_eq!(panel.synthetic().len(), 1);
        assert_eq!(panel.explicit()[0].markup, "impl Clone for A");
        assert_eq!(panel.len(), 2);
    }

    #[test]
    fn test_skips_current_crate() {
        let panel = ImplementorsPanel::new(PanelConfig::default().with_current_crate("own"));
        panel.register_implementors(
            ImplementorTable::new()
                .with_library("own", vec![record("impl T for Own", false, &["own::Own"])])
                .with_library("other", vec![record("impl T for Other", false, &["other::Other"])]),
        );

        assert_eq!(libraries(&panel.explicit()), vec!["other"]);
    }

    #[test]
    fn test_synthetic_dedup_marks_types_before_duplicate() {
        let panel = ImplementorsPanel::default();
        panel.mark_inlined(["b::B"]);
        panel.register_implementors(ImplementorTable::new().with_library(
            "lib",
            vec![
                // a::A is marked, then b::B is a duplicate
                record("impl Send for (A, B)", true, &["a::A", "b::B"]),
                record("impl Send for A", true, &["a::A"]),
                record("impl Send for C", true, &["c::C"]),
            ],
        ));

        let synthetic = panel.synthetic();
        assert_eq!(synthetic.len(), 1);
        assert_eq!(synthetic[0].markup, "impl Send for C");
    }

    #[test]
    fn test_dedup_disabled() {
        let config = PanelConfig {
            dedupe_synthetic: false,
            ..Default::default()
        };
        let panel = ImplementorsPanel::new(config);
        let table = ImplementorTable::new()
            .with_library("lib", vec![record("impl Send for A", true, &["a::A"])]);

        panel.register_implementors(table.clone());
        panel.register_implementors(table);

        assert_eq!(panel.synthetic().len(), 2);
    }

    #[test]
    fn test_rebases_relative_links() {
        let panel = ImplementorsPanel::new(PanelConfig::default().with_root_path("../../"));
        panel.register_implementors(ImplementorTable::new().with_library(
            "serde",
            vec![record(
                r#"impl <a class="trait" href="https://doc.rust-lang.org/nightly/core/default/trait.Default.html" title="trait core::default::Default">Default</a> for <a class="struct" href="serde/de/struct.IgnoredAny.html" title="struct serde::de::IgnoredAny">IgnoredAny</a>"#,
                false,
                &["serde::de::ignored_any::IgnoredAny"],
            )],
        ));

        let markup = &panel.explicit()[0].markup;
        assert!(markup.contains(r#"href="../../serde/de/struct.IgnoredAny.html""#));
        assert!(markup.contains(r#"href="https://doc.rust-lang.org/"#));
    }

    #[test]
    fn test_registrations_accumulate() {
        let panel = ImplementorsPanel::default();
        panel.register_implementors(
            ImplementorTable::new().with_library("b", vec![record("impl T for B", false, &["b::B"])]),
        );
        panel.register_implementors(
            ImplementorTable::new().with_library("a", vec![record("impl T for A", false, &["a::A"])]),
        );

        assert_eq!(libraries(&panel.explicit()), vec!["b", "a"]);
    }

    #[test]
    fn test_render_html() {
        let panel = ImplementorsPanel::default();
        panel.register_implementors(ImplementorTable::new().with_library(
            "a",
            vec![
                record("impl Clone for A", false, &["a::A"]),
                record("impl Send for A", true, &["a::A"]),
            ],
        ));

        assert_eq!(
            panel.render_html(),
            "<div id=\"implementors-list\">\n\
             <h3 class=\"impl\"><code>impl Clone for A</code></h3>\n\
             </div>\n\
             <div id=\"synthetic-implementors-list\">\n\
             <h3 class=\"impl\"><code>impl Send for A</code></h3>\n\
             </div>\n"
        );
    }

    #[test]
    fn test_render_text() {
        let panel = ImplementorsPanel::default();
        panel.register_implementors(
            ImplementorTable::new().with_library("a", vec![record("impl Clone for A", false, &["a::A"])]),
        );

        let text = panel.render_text().unwrap();

        assert!(text.starts_with("Implementors:\n"));
        assert!(text.contains("[a] impl Clone for A"));
        assert!(!text.contains("Auto implementors"));
    }
}
