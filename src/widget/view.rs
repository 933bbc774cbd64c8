//! The results dropdown and its visible state

use crate::config::RESULTS_Z_INDEX;
use crate::format::{annuaire_link, escape_html};
use crate::registry::{ResultPage, SearchResult};

use super::dom::{InputElement, Node, Position, Rect};

const LOADER_HTML: &str = "<span>Loading...</span>";

/// What the dropdown currently shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidgetState {
    Idle,
    Loading,
    ShowingResults,
    ShowingError,
}

impl WidgetState {
    pub fn as_str(&self) -> &'static str {
        match self {
            WidgetState::Idle => "idle",
            WidgetState::Loading => "loading",
            WidgetState::ShowingResults => "showing_results",
            WidgetState::ShowingError => "showing_error",
        }
    }
}

/// Message shown when the registry cannot be reached
pub fn error_message() -> String {
    format!(
        "<i>La recherche d’entreprise ne fonctionne pas. Assurez-vous d'être bien connecté à internet.<br/> Si le problème persiste, vous pouvez effectuer votre recherche sur {}.</i>",
        annuaire_link(None)
    )
}

fn more_results_html() -> String {
    format!(
        "<div class='more'>{}</div>",
        annuaire_link(Some("⇢ recherche avancée sur l’Annuaire des Entreprises"))
    )
}

/// One rendered search result
#[derive(Debug, Clone, PartialEq)]
pub struct ItemNode {
    /// Raw identifier, written into the input on click
    pub siren: String,
    /// Capitalized name
    pub name: String,
    /// Identifier grouped by three
    pub identifier: String,
}

impl ItemNode {
    pub fn from_result(result: &SearchResult) -> Self {
        Self {
            siren: result.siren.clone(),
            name: result.display_name(),
            identifier: result.display_siren(),
        }
    }

    pub fn inner_html(&self) -> String {
        format!(
            "<span>{}</span><i>{}</i>",
            escape_html(&self.name),
            escape_html(&self.identifier)
        )
    }

    pub fn to_html(&self) -> String {
        format!("<div class=\"item\">{}</div>", self.inner_html())
    }
}

/// The results container and everything in it.
///
/// The wrapper holds, in order: the loader, the error message, the result
/// list and the "more results" link. Each is shown or hidden on its own.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultsPanel {
    pub wrapper: Node,
    pub loader: Node,
    pub error: Node,
    pub list: Node,
    pub items: Vec<ItemNode>,
    pub more: Node,
}

impl Default for ResultsPanel {
    fn default() -> Self {
        Self::new()
    }
}

impl ResultsPanel {
    pub fn new() -> Self {
        Self {
            wrapper: Node::new("").with_id("wrapper").hidden(),
            loader: Node::new("loader").with_inner_html(LOADER_HTML).hidden(),
            error: Node::new("error-message").hidden(),
            list: Node::new("result-list"),
            items: Vec::new(),
            more: Node::new("").with_inner_html(more_results_html()).hidden(),
        }
    }

    /// Place the wrapper right under `rect`, as wide as it.
    pub fn position_below(&mut self, rect: &Rect) {
        let style = &mut self.wrapper.style;
        style.z_index = Some(RESULTS_Z_INDEX);
        style.width = Some(rect.width);
        style.position = Position::Absolute;
        style.top = Some(rect.bottom());
        style.left = Some(rect.left);
    }

    /// Drop the current items and hide the link and the error message
    pub fn clear_results(&mut self) {
        self.items.clear();
        self.more.hide();
        self.error.hide();
    }

    pub fn show_loading(&mut self) {
        self.loader.show();
    }

    pub fn hide_loading(&mut self) {
        self.loader.hide();
    }

    /// One item per result; the "more results" link only for a non-empty page
    pub fn show_results(&mut self, page: &ResultPage) {
        self.items = page.unite_legale.iter().map(ItemNode::from_result).collect();
        if self.items.is_empty() {
            self.more.hide();
        } else {
            self.more.show();
        }
    }

    pub fn show_error(&mut self) {
        self.items.clear();
        self.more.hide();
        self.error.inner_html = error_message();
        self.error.show();
    }

    pub fn state(&self) -> WidgetState {
        if !self.wrapper.is_visible() {
            WidgetState::Idle
        } else if self.loader.is_visible() {
            WidgetState::Loading
        } else if self.error.is_visible() {
            WidgetState::ShowingError
        } else if !self.items.is_empty() {
            WidgetState::ShowingResults
        } else {
            WidgetState::Idle
        }
    }

    pub fn to_html(&self) -> String {
        let items: String = self.items.iter().map(ItemNode::to_html).collect();
        format!(
            "{}{}{}{}{}</div>{}</div>",
            self.wrapper.open_tag(),
            self.loader.to_html(),
            self.error.to_html(),
            self.list.open_tag(),
            items,
            self.more.to_html(),
        )
    }
}

/// Snapshot handed to renderers
#[derive(Debug, Clone, PartialEq)]
pub struct WidgetView {
    pub input: InputElement,
    pub panel: ResultsPanel,
}

impl WidgetView {
    pub fn state(&self) -> WidgetState {
        self.panel.state()
    }
}
