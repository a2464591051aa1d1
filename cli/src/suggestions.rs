use colored::*;
use funland_core::types::Suggestion;

/// Panel of contextual follow-up questions.
///
/// Visible only while it holds at least one suggestion; displaying an
/// empty list hides it.
#[derive(Debug, Default)]
pub struct SuggestionPanel {
    items: Vec<Suggestion>,
    visible: bool,
}

impl SuggestionPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the panel contents; the panel shows iff the list is non-empty
    pub fn display(&mut self, suggestions: Vec<Suggestion>) {
        self.items = suggestions;
        self.visible = !self.items.is_empty();
    }

    /// Clear and hide the panel
    pub fn hide(&mut self) {
        self.items.clear();
        self.visible = false;
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn items(&self) -> &[Suggestion] {
        &self.items
    }

    /// Look up a suggestion by its displayed one-based number
    pub fn get(&self, number: usize) -> Option<&Suggestion> {
        if !self.visible {
            return None;
        }
        number.checked_sub(1).and_then(|i| self.items.get(i))
    }

    /// Render the panel as numbered lines; empty when hidden
    pub fn render(&self) -> String {
        if !self.visible {
            return String::new();
        }

        let mut output = format!("{}\n", "Возможно, вас заинтересует:".cyan());
        for (i, suggestion) in self.items.iter().enumerate() {
            output.push_str(&format!(
                "  {} {}\n",
                format!("/sug {}", i + 1).green(),
                suggestion.text
            ));
        }
        output
    }
}
