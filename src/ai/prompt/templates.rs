//! Built-in prompt template catalog

use serde::Serialize;

/// Filter value that selects every category
pub const ALL_CATEGORIES: &str = "All";

/// Category names in display order
pub const CATEGORIES: &[&str] = &[
    ALL_CATEGORIES,
    "Frontend",
    "Backend",
    "Database",
    "Security",
    "DevOps",
    "Testing",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CodeTemplate {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub prompt: &'static str,
    pub category: &'static str,
    pub tags: &'static [&'static str],
}

impl CodeTemplate {
    /// Case-insensitive match on title, description or any tag
    fn matches(&self, term: &str) -> bool {
        let term = term.to_lowercase();
        self.title.to_lowercase().contains(&term)
            || self.description.to_lowercase().contains(&term)
            || self.tags.iter().any(|tag| tag.to_lowercase().contains(&term))
    }
}

static TEMPLATES: &[CodeTemplate] = &[
    CodeTemplate {
        id: "react-component",
        title: "React Component",
        description: "Create a reusable React component with TypeScript",
        prompt: "Create a React component with TypeScript that includes props interface, proper typing, and modern React patterns. Include examples of usage and styling with Tailwind CSS.",
        category: "Frontend",
        tags: &["React", "TypeScript", "Component"],
    },
    CodeTemplate {
        id: "rest-api",
        title: "REST API",
        description: "Build a complete REST API with Express.js",
        prompt: "Create a REST API using Express.js and TypeScript with CRUD operations, middleware for authentication, error handling, input validation, and proper HTTP status codes. Include database integration with Prisma or Mongoose.",
        category: "Backend",
        tags: &["Express", "API", "TypeScript"],
    },
    CodeTemplate {
        id: "database-schema",
        title: "Database Schema",
        description: "Design a database schema with relationships",
        prompt: "Design a database schema with proper relationships, indexes, and constraints. Include both SQL DDL statements and an ORM model definition. Consider data normalization and performance optimization.",
        category: "Database",
        tags: &["SQL", "Schema", "Database"],
    },
    CodeTemplate {
        id: "auth-system",
        title: "Authentication System",
        description: "Complete authentication with JWT",
        prompt: "Create a complete authentication system with user registration, login, JWT tokens, password hashing, email verification, and password reset functionality. Include both backend API and frontend integration.",
        category: "Security",
        tags: &["Auth", "JWT", "Security"],
    },
    CodeTemplate {
        id: "docker-setup",
        title: "Docker Configuration",
        description: "Dockerize an application with multi-stage builds",
        prompt: "Create Docker configuration for a full-stack application including Dockerfile with multi-stage builds, docker-compose.yml for development and production, environment variable handling, and optimization for smaller image sizes.",
        category: "DevOps",
        tags: &["Docker", "DevOps", "Deployment"],
    },
    CodeTemplate {
        id: "testing-suite",
        title: "Testing Suite",
        description: "Comprehensive testing setup with Jest and Testing Library",
        prompt: "Set up a comprehensive testing suite with unit tests, integration tests, and end-to-end tests. Include Jest configuration, React Testing Library setup, mock implementations, and test coverage reporting.",
        category: "Testing",
        tags: &["Jest", "Testing", "Quality"],
    },
];

pub fn all_templates() -> &'static [CodeTemplate] {
    TEMPLATES
}

pub fn find_template(id: &str) -> Option<&'static CodeTemplate> {
    TEMPLATES.iter().find(|t| t.id == id)
}

/// Templates in `category`; `None` or `"All"` selects everything
pub fn templates_in(category: Option<&str>) -> Vec<&'static CodeTemplate> {
    search_templates(category, None)
}

/// Filter by category and an optional free-text term
pub fn search_templates(category: Option<&str>, term: Option<&str>) -> Vec<&'static CodeTemplate> {
    let category = category.filter(|c| !c.is_empty() && *c != ALL_CATEGORIES);
    let term = term.map(str::trim).filter(|t| !t.is_empty());

    TEMPLATES
        .iter()
        .filter(|t| category.is_none_or(|c| t.category == c))
        .filter(|t| term.is_none_or(|term| t.matches(term)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all() {
        assert_eq!(templates_in(None).len(), 6);
        assert_eq!(templates_in(Some("All")).len(), 6);
    }

    #[test]
    fn test_category_filter() {
        let backend = templates_in(Some("Backend"));
        assert_eq!(backend.len(), 1);
        assert_eq!(backend[0].id, "rest-api");
        assert!(templates_in(Some("Mobile")).is_empty());
    }

    #[test]
    fn test_every_category_is_listed() {
        for template in all_templates() {
            assert!(CATEGORIES.contains(&template.category));
        }
    }

    #[test]
    fn test_search() {
        let hits = search_templates(None, Some("typescript"));
        let ids: Vec<_> = hits.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec!["react-component", "rest-api"]);

        assert!(search_templates(Some("Frontend"), Some("docker")).is_empty());
        assert_eq!(search_templates(None, Some("  ")).len(), 6);
    }

    #[test]
    fn test_find() {
        assert_eq!(find_template("docker-setup").map(|t| t.category), Some("DevOps"));
        assert!(find_template("nope").is_none());
    }
}
