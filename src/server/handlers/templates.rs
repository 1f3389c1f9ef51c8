use axum::{Json, extract::Query};
use serde::{Deserialize, Serialize};

use crate::ai::prompt::{CATEGORIES, CodeTemplate, search_templates};

#[derive(Debug, Default, Deserialize)]
pub struct TemplateQuery {
    /// Category name; `All` or absent selects every category
    pub category: Option<String>,
    /// Free-text filter over title, description and tags
    pub q: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct TemplateList {
    pub categories: &'static [&'static str],
    pub templates: Vec<&'static CodeTemplate>,
}

/// `GET /api/templates`
pub async fn list_templates(Query(query): Query<TemplateQuery>) -> Json<TemplateList> {
    Json(TemplateList {
        categories: CATEGORIES,
        templates: search_templates(query.category.as_deref(), query.q.as_deref()),
    })
}
