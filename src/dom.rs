use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;

static ELEMENT_ID: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)\bid\s*=\s*["']([^"']+)["']"#).expect("valid element id regex")
});

/// Element-level operations on the page.
///
/// Writers return `false` when the element is not present in the currently
/// loaded fragment; callers log and move on.
pub trait Document {
    /// Whether an element with this id is currently present
    fn contains(&self, id: &str) -> bool;

    /// Replace the text content of an element
    fn set_text(&mut self, id: &str, text: &str) -> bool;

    /// Replace the children of an element with the given markup
    fn set_inner_html(&mut self, id: &str, html: &str) -> bool;

    /// Set the `title` attribute of an element
    fn set_title(&mut self, id: &str, title: &str) -> bool;

    /// Set an element's CSS width as a percentage
    fn set_width_percent(&mut self, id: &str, percent: f64) -> bool;

    /// Show or hide an element
    fn set_visible(&mut self, id: &str, visible: bool) -> bool;
}

/// State of a single element in a [`MemoryDocument`]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Element {
    pub text: String,
    pub inner_html: String,
    pub title: Option<String>,
    pub width_percent: Option<f64>,
    pub visible: bool,
    parent: Option<String>,
}

/// In-memory document used for headless rendering and tests
///
/// Setting inner HTML registers every `id` found in the markup as a child
/// element and drops the ids registered by the markup it replaces, so the
/// set of addressable elements follows the loaded fragment.
#[derive(Debug, Clone, Default)]
pub struct MemoryDocument {
    elements: HashMap<String, Element>,
}

impl MemoryDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a document holding the given top-level elements
    pub fn with_elements<'a>(ids: impl IntoIterator<Item = &'a str>) -> Self {
        let mut document = Self::new();
        for id in ids {
            document.insert(id);
        }
        document
    }

    /// Add a visible top-level element, replacing any existing one
    pub fn insert(&mut self, id: &str) {
        self.elements.insert(
            id.to_string(),
            Element {
                visible: true,
                ..Element::default()
            },
        );
    }

    pub fn element(&self, id: &str) -> Option<&Element> {
        self.elements.get(id)
    }

    /// Text content of an element, if present
    pub fn text(&self, id: &str) -> Option<&str> {
        self.elements.get(id).map(|el| el.text.as_str())
    }

    /// Inner HTML of an element, if present
    pub fn inner_html(&self, id: &str) -> Option<&str> {
        self.elements.get(id).map(|el| el.inner_html.as_str())
    }

    pub fn width_percent(&self, id: &str) -> Option<f64> {
        self.elements.get(id).and_then(|el| el.width_percent)
    }

    pub fn is_visible(&self, id: &str) -> bool {
        self.elements.get(id).is_some_and(|el| el.visible)
    }

    fn remove_descendants(&mut self, id: &str) {
        let children: Vec<String> = self
            .elements
            .iter()
            .filter(|(_, el)| el.parent.as_deref() == Some(id))
            .map(|(child, _)| child.clone())
            .collect();

        for child in children {
            self.remove_descendants(&child);
            self.elements.remove(&child);
        }
    }
}

impl Document for MemoryDocument {
    fn contains(&self, id: &str) -> bool {
        self.elements.contains_key(id)
    }

    fn set_text(&mut self, id: &str, text: &str) -> bool {
        if !self.elements.contains_key(id) {
            return false;
        }
        self.remove_descendants(id);
        match self.elements.get_mut(id) {
            Some(el) => {
                el.text = text.to_string();
                el.inner_html = html_escape::encode_text(text).into_owned();
                true
            }
            None => false,
        }
    }

    fn set_inner_html(&mut self, id: &str, html: &str) -> bool {
        if !self.elements.contains_key(id) {
            return false;
        }
        self.remove_descendants(id);

        for caps in ELEMENT_ID.captures_iter(html) {
            let child = caps[1].to_string();
            if child == id {
                continue;
            }
            self.elements.insert(
                child,
                Element {
                    visible: true,
                    parent: Some(id.to_string()),
                    ..Element::default()
                },
            );
        }

        match self.elements.get_mut(id) {
            Some(el) => {
                el.inner_html = html.to_string();
                el.text.clear();
                true
            }
            None => false,
        }
    }

    fn set_title(&mut self, id: &str, title: &str) -> bool {
        match self.elements.get_mut(id) {
            Some(el) => {
                el.title = Some(title.to_string());
                true
            }
            None => false,
        }
    }

    fn set_width_percent(&mut self, id: &str, percent: f64) -> bool {
        match self.elements.get_mut(id) {
            Some(el) => {
                el.width_percent = Some(percent);
                true
            }
            None => false,
        }
    }

    fn set_visible(&mut self, id: &str, visible: bool) -> bool {
        match self.elements.get_mut(id) {
            Some(el) => {
                el.visible = visible;
                true
            }
            None => false,
        }
    }
}
