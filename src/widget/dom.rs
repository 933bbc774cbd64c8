//! Minimal document model the widget renders into
//!
//! The browser DOM is reduced to what the widget needs: an input element
//! with a value, a focus flag and a bounding box, and nodes that can be
//! shown, hidden and positioned.

use std::fmt::Write as _;

/// Bounding box in page pixels
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }
}

/// A text input the widget can bind to
#[derive(Debug, Clone, PartialEq)]
pub struct InputElement {
    pub id: String,
    pub value: String,
    pub focused: bool,
    pub rect: Rect,
}

impl InputElement {
    pub fn new(id: impl Into<String>, rect: Rect) -> Self {
        Self {
            id: id.into(),
            value: String::new(),
            focused: false,
            rect,
        }
    }

    pub fn focus(&mut self) {
        self.focused = true;
    }

    pub fn blur(&mut self) {
        self.focused = false;
    }
}

/// The page hosting the inputs
#[derive(Debug, Clone, Default)]
pub struct Page {
    inputs: Vec<InputElement>,
}

impl Page {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_input(mut self, input: InputElement) -> Self {
        self.inputs.push(input);
        self
    }

    pub fn input_by_id(&self, id: &str) -> Option<&InputElement> {
        self.inputs.iter().find(|input| input.id == id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Display {
    #[default]
    Block,
    None,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Position {
    #[default]
    Static,
    Absolute,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Style {
    pub display: Display,
    pub position: Position,
    pub z_index: Option<i32>,
    pub top: Option<f64>,
    pub left: Option<f64>,
    pub width: Option<f64>,
}

impl Style {
    /// Inline CSS for the `style` attribute
    pub fn to_css(&self) -> String {
        let mut css = String::new();
        if self.display == Display::None {
            css.push_str("display: none;");
        }
        if self.position == Position::Absolute {
            css.push_str(" position: absolute;");
        }
        if let Some(z) = self.z_index {
            let _ = write!(css, " z-index: {z};");
        }
        for (name, value) in [("top", self.top), ("left", self.left), ("width", self.width)] {
            if let Some(v) = value {
                let _ = write!(css, " {name}: {v}px;");
            }
        }
        css.trim_start().to_string()
    }
}

/// An element of the results dropdown
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub id: Option<String>,
    pub class_name: String,
    pub style: Style,
    pub inner_html: String,
}

impl Node {
    pub fn new(class_name: impl Into<String>) -> Self {
        Self {
            id: None,
            class_name: class_name.into(),
            style: Style::default(),
            inner_html: String::new(),
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_inner_html(mut self, html: impl Into<String>) -> Self {
        self.inner_html = html.into();
        self
    }

    pub fn hidden(mut self) -> Self {
        self.hide();
        self
    }

    pub fn show(&mut self) {
        self.style.display = Display::Block;
    }

    pub fn hide(&mut self) {
        self.style.display = Display::None;
    }

    pub fn is_visible(&self) -> bool {
        self.style.display != Display::None
    }

    /// Opening tag with id, class and style attributes
    pub fn open_tag(&self) -> String {
        let mut tag = String::from("<div");
        if let Some(id) = &self.id {
            let _ = write!(tag, " id=\"{id}\"");
        }
        if !self.class_name.is_empty() {
            let _ = write!(tag, " class=\"{}\"", self.class_name);
        }
        let css = self.style.to_css();
        if !css.is_empty() {
            let _ = write!(tag, " style=\"{css}\"");
        }
        tag.push('>');
        tag
    }

    /// Full markup of a leaf node
    pub fn to_html(&self) -> String {
        format!("{}{}</div>", self.open_tag(), self.inner_html)
    }
}

/// Events the host forwards to the widget
#[derive(Debug, Clone, PartialEq)]
pub enum DomEvent {
    Focus,
    Blur,
    /// The input's value changed
    Input(String),
    /// Mouse button pressed on the result item at this index
    MouseDown(usize),
    /// Result item at this index clicked
    Click(usize),
}

/// What the host should do after dispatching an event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EventOutcome {
    pub default_prevented: bool,
}

impl EventOutcome {
    pub fn prevented() -> Self {
        Self {
            default_prevented: true,
        }
    }
}
