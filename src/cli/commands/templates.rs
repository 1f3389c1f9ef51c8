use crate::ai::prompt::{CATEGORIES, search_templates};
use crate::cli::Output;
use crate::types::{CodeweaveError, Result};

pub fn run(category: Option<&str>, search: Option<&str>, format: &str) -> Result<()> {
    if let Some(category) = category
        && !CATEGORIES.contains(&category)
    {
        return Err(CodeweaveError::InvalidRequest(format!(
            "Unknown category '{}'. Valid values: {}",
            category,
            CATEGORIES.join(", ")
        )));
    }

    let templates = search_templates(category, search);

    if format == "json" {
        println!("{}", serde_json::to_string_pretty(&templates)?);
        return Ok(());
    }

    let output = Output::new();
    if templates.is_empty() {
        output.warning("No templates match");
        return Ok(());
    }

    for template in templates {
        output.section(&format!("{} [{}]", template.title, template.id));
        output.field("category", template.category);
        output.field("tags", template.tags.join(", "));
        output.field("description", template.description);
        println!();
        println!("{}", template.prompt);
    }
    Ok(())
}
