//! Output formatting utilities

use console::style;

use citadel_tasks::SelectionTable;

/// Print an error message
pub fn error(message: &str) {
    eprintln!("{} {}", style("✗").red().bold(), message);
}

/// Render the list of valid selections shown in help and error output
pub fn selection_menu(table: &SelectionTable) -> String {
    let mut menu = String::from("Valid selections:\n");
    for entry in table.iter() {
        menu.push_str(&format!("  {:<10} {}\n", entry.key, entry.description));
    }
    menu.push_str(&format!(
        "  {:<10} run tests for all subprojects",
        citadel_tasks::ALL_SELECTION
    ));
    menu
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selection_menu_lists_every_key() {
        let table = SelectionTable::citadel();
        let menu = selection_menu(&table);
        for key in table.keys() {
            assert!(menu.contains(key), "menu is missing {key}");
        }
        assert!(menu.contains("the compiler middleend (Optimizer)"));
        assert!(menu.trim_end().ends_with("run tests for all subprojects"));
    }
}
