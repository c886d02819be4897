//! `planwright templates` command.

use super::render_table;
use crate::planning::templates::{self, Template};

/// Execute the `templates` command.
///
/// With no flags, lists every template. `--category` filters, `--show`
/// prints one template's requirement text, `--categories` lists categories.
///
/// # Errors
///
/// Returns an error string for an unknown template id or an empty category.
pub fn run(category: Option<&str>, show: Option<&str>, categories: bool) -> Result<(), String> {
    if categories {
        for name in templates::categories() {
            println!("{name}");
        }
        return Ok(());
    }

    if let Some(id) = show {
        let template = templates::find(id).ok_or_else(|| format!("template not found: {id}"))?;
        println!("{} ({})\n{}\n", template.name, template.category, template.description);
        println!("{}", template.requirements);
        return Ok(());
    }

    let selected: Vec<&Template> = match category {
        Some(name) => templates::by_category(name),
        None => templates::all().iter().collect(),
    };
    if selected.is_empty() {
        return Err(format!(
            "No templates in category {:?}. Categories: {}",
            category.unwrap_or_default(),
            templates::categories().join(", ")
        ));
    }
    print!("{}", render(&selected));
    Ok(())
}

fn render(selected: &[&Template]) -> String {
    let rows: Vec<[String; 3]> = selected
        .iter()
        .map(|t| [t.id.to_string(), t.category.to_string(), t.name.to_string()])
        .collect();
    render_table(["ID", "CATEGORY", "NAME"], &rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lists_and_shows() {
        assert!(run(None, None, false).is_ok());
        assert!(run(None, None, true).is_ok());
        assert!(run(Some("Frontend"), None, false).is_ok());
        assert!(run(None, Some("chat-interface"), false).is_ok());
    }

    #[test]
    fn unknown_template_or_category_fails() {
        assert!(run(None, Some("nope"), false).unwrap_err().contains("nope"));
        assert!(run(Some("Mobile"), None, false).unwrap_err().contains("Backend"));
    }

    #[test]
    fn table_has_one_row_per_template() {
        let out = render(&templates::by_category("Backend"));
        assert_eq!(out.lines().count(), 4);
        assert!(out.contains("auth-system"));
    }
}
