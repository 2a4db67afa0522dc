//! Show/hide state for a collapsible section such as the login form.

pub const CANCEL_LABEL: &str = "cancel";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Togglable {
    label: String,
    visible: bool,
}

impl Togglable {
    /// A hidden section opened by a button labelled `label`.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            visible: false,
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn toggle_visibility(&mut self) {
        self.visible = !self.visible;
    }

    pub fn show(&mut self) {
        self.visible = true;
    }

    pub fn hide(&mut self) {
        self.visible = false;
    }

    /// Label of the button that flips the section.
    pub fn button_label(&self) -> &str {
        if self.visible {
            CANCEL_LABEL
        } else {
            &self.label
        }
    }
}
