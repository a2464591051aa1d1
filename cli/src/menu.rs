use colored::*;
use funland_core::types::MenuItem;

/// The server-driven main menu.
///
/// Entries are addressed by their displayed one-based number, the terminal
/// stand-in for clicking a menu button.
#[derive(Debug, Default)]
pub struct MenuPanel {
    items: Vec<MenuItem>,
}

impl MenuPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the menu contents
    pub fn set_items(&mut self, items: Vec<MenuItem>) {
        self.items = items;
    }

    pub fn items(&self) -> &[MenuItem] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Look up an entry by its displayed one-based number
    pub fn get(&self, number: usize) -> Option<&MenuItem> {
        number.checked_sub(1).and_then(|i| self.items.get(i))
    }

    /// Render the menu as numbered lines
    pub fn render(&self) -> String {
        if self.items.is_empty() {
            return String::new();
        }

        let mut output = format!("{}\n", "Меню:".cyan().bold());
        for (i, item) in self.items.iter().enumerate() {
            output.push_str(&format!(
                "  {} {}\n",
                format!("/menu {}", i + 1).green(),
                item.text
            ));
        }
        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(text: &str) -> MenuItem {
        MenuItem {
            text: text.to_string(),
            question: format!("{}?", text),
            suggestion_topic: None,
        }
    }

    #[test]
    fn test_render_one_entry_per_item() {
        colored::control::set_override(false);
        let mut menu = MenuPanel::new();
        menu.set_items(vec![item("Цены"), item("VR"), item("Батуты")]);

        let rendered = menu.render();
        assert_eq!(rendered.lines().count(), 4); // header + 3 entries
        assert!(rendered.contains("Цены"));
        assert!(rendered.contains("/menu 3"));
    }

    #[test]
    fn test_set_items_replaces_prior_contents() {
        let mut menu = MenuPanel::new();
        menu.set_items(vec![item("a"), item("b")]);
        menu.set_items(vec![item("c")]);
        assert_eq!(menu.items().len(), 1);
        assert_eq!(menu.items()[0].text, "c");
    }

    #[test]
    fn test_get_is_one_based() {
        let mut menu = MenuPanel::new();
        menu.set_items(vec![item("a"), item("b")]);
        assert_eq!(menu.get(1).unwrap().text, "a");
        assert_eq!(menu.get(2).unwrap().text, "b");
        assert!(menu.get(0).is_none());
        assert!(menu.get(3).is_none());
    }

    #[test]
    fn test_empty_menu_renders_nothing() {
        assert!(MenuPanel::new().render().is_empty());
    }
}
