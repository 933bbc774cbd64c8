//! Plain-text rendering of the dropdown for terminal hosts

use std::io::Write;
use std::sync::Mutex;

use crate::format::ANNUAIRE_SEARCH_URL;
use crate::registry::{ResultPage, SearchResult};
use crate::widget::{Renderer, WidgetState, WidgetView};

/// Prints the dropdown to stdout whenever its visible content changes.
#[derive(Default)]
pub struct TerminalRenderer {
    last: Mutex<Option<String>>,
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Renderer for TerminalRenderer {
    fn render(&self, view: &WidgetView) {
        let text = render_view(view);
        let mut last = self.last.lock().unwrap_or_else(|e| e.into_inner());
        if last.as_deref() == Some(text.as_str()) {
            return;
        }

        let mut stdout = std::io::stdout().lock();
        let _ = writeln!(stdout, "{text}");
        let _ = stdout.flush();
        *last = Some(text);
    }
}

/// Text form of the input and the dropdown below it
pub fn render_view(view: &WidgetView) -> String {
    let mut lines = Vec::new();
    let cursor = if view.input.focused { "▏" } else { "" };
    lines.push(format!("[{}] {}{}", view.input.id, view.input.value, cursor));

    match view.state() {
        WidgetState::Idle => {}
        WidgetState::Loading => lines.push("  Loading...".to_string()),
        WidgetState::ShowingError => {
            lines.push("  La recherche d’entreprise ne fonctionne pas.".to_string());
            lines.push(format!(
                "  Vous pouvez effectuer votre recherche sur {ANNUAIRE_SEARCH_URL}"
            ));
        }
        WidgetState::ShowingResults => {
            let width = view
                .panel
                .items
                .iter()
                .map(|item| item.name.chars().count())
                .max()
                .unwrap_or(0);
            for (i, item) in view.panel.items.iter().enumerate() {
                lines.push(format!(
                    "  {:>2}. {:<width$}  {}",
                    i + 1,
                    item.name,
                    item.identifier
                ));
            }
            if view.panel.more.is_visible() {
                lines.push("  ⇢ recherche avancée sur l’Annuaire des Entreprises".to_string());
            }
        }
    }
    lines.join("\n")
}

/// One line per result for one-shot searches
pub fn format_result_line(result: &SearchResult) -> String {
    let mut line = format!("{}  {}", result.display_name(), result.display_siren());
    if let Some(address) = result.address() {
        line.push_str("  ");
        line.push_str(&address);
    }
    if let Some(date) = result.creation_date() {
        line.push_str(&format!("  (créée le {})", date.format("%d/%m/%Y")));
    }
    if result.is_ceased() {
        line.push_str("  [fermée]");
    }
    line
}

/// Pagination summary under a one-shot search
pub fn format_page_summary(page: &ResultPage) -> String {
    if page.is_empty() {
        return "Aucun résultat".to_string();
    }
    let mut summary = format!(
        "{} résultat(s) affiché(s) sur {}, page {}/{}",
        page.len(),
        page.total_results,
        page.page,
        page.total_pages
    );
    if page.has_more() {
        summary.push_str(&format!(", recherche avancée : {ANNUAIRE_SEARCH_URL}"));
    }
    summary
}
