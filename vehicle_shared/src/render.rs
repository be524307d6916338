//! Rendering abstraction.
//!
//! This crate intentionally does not depend on a graphics backend. The pawn
//! only needs world-space text for the in-car HUD.

use crate::math::{Color, Transform};

/// World-space text collaborator.
pub trait TextRender: Send + Sync {
    fn set_text(&mut self, text: &str);
    fn set_visibility(&mut self, visible: bool);
    fn set_color(&mut self, color: Color);
}

/// Text component that keeps its state in memory, for headless runs.
#[derive(Debug, Clone)]
pub struct TextRenderComponent {
    pub name: String,
    pub relative: Transform,
    text: String,
    visible: bool,
    color: Color,
}

impl TextRenderComponent {
    pub fn new(name: impl Into<String>, relative: Transform) -> Self {
        Self {
            name: name.into(),
            relative,
            text: String::new(),
            visible: true,
            color: Color::WHITE,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn color(&self) -> Color {
        self.color
    }
}

impl TextRender for TextRenderComponent {
    fn set_text(&mut self, text: &str) {
        if self.text != text {
            self.text.clear();
            self.text.push_str(text);
        }
    }

    fn set_visibility(&mut self, visible: bool) {
        self.visible = visible;
    }

    fn set_color(&mut self, color: Color) {
        self.color = color;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_component_tracks_state() {
        let mut t = TextRenderComponent::new("IncarGear", Transform::default());
        assert!(t.is_visible());
        t.set_text("R");
        t.set_color(Color::RED);
        t.set_visibility(false);
        assert_eq!(t.text(), "R");
        assert_eq!(t.color(), Color::RED);
        assert!(!t.is_visible());
    }
}
