//! Per-language heuristic rules
//!
//! One [`LanguageRules`] record per recognised language key (lowercased
//! fence tag), plus a shared default record for everything else. Each
//! record bundles the import, export and comment detectors, the dependency
//! extractor and the plausibility check used by the validator. Records only
//! override the parts they know about; the rest point at the default rule.
//!
//! These are line-oriented regex heuristics, not parsers. False positives
//! and negatives are expected.

use once_cell::sync::Lazy;

use regex::Regex;

type Pattern = Lazy<Regex>;

macro_rules! pattern {
    ($name:ident, $re:expr) => {
        static $name: Pattern = Lazy::new(|| Regex::new($re).expect("rule pattern is valid"));
    };
}

// =============================================================================
// Import Detectors
// =============================================================================

pattern!(IMPORTS_SCRIPT, r"(?m)^(import|const.*=.*require)");
pattern!(IMPORTS_PYTHON, r"(?m)^(import|from.*import)");
pattern!(IMPORTS_JVM_GO, r"(?m)^(import|package)");
pattern!(IMPORTS_CSHARP, r"(?m)^(using|namespace)");
pattern!(IMPORTS_RUST, r"(?m)^(use|extern)");
pattern!(IMPORTS_PHP, r"(?m)^(use|require|include)");
pattern!(IMPORTS_DEFAULT, r"(?m)^(import|#include|using|require)");

// =============================================================================
// Export Detectors
// =============================================================================

pattern!(EXPORTS_SCRIPT, r"export|module\.exports");
pattern!(EXPORTS_PYTHON, r"__all__|def.*:|class.*:");
pattern!(EXPORTS_JAVA, r"public class|public interface");
pattern!(EXPORTS_CSHARP, r"public class|public interface|namespace");
pattern!(EXPORTS_GO, r"func|type.*struct");
pattern!(EXPORTS_RUST, r"pub fn|pub struct|pub enum");
pattern!(EXPORTS_PHP, r"class|function|namespace");
pattern!(EXPORTS_DEFAULT, r"export|public|def|function");

// =============================================================================
// Comment Detectors
// =============================================================================

pattern!(COMMENTS_C_FAMILY, r"//|/\*");
pattern!(COMMENTS_PYTHON, r#"#|""""#);
pattern!(COMMENTS_PHP, r"//|/\*|#");
pattern!(COMMENTS_MARKUP, r"<!--");
pattern!(COMMENTS_STYLESHEET, r"/\*");
pattern!(COMMENTS_SQL, r"--|/\*");
pattern!(COMMENTS_DEFAULT, r"//|/\*|#|<!--");

// =============================================================================
// Dependency Extractors
// =============================================================================

pattern!(SCRIPT_IMPORT_STMT, r#"import.*from\s+['"`]([^'"`]+)['"`]"#);
pattern!(SCRIPT_IMPORT_FROM, r#"from\s+['"`]([^'"`]+)['"`]"#);
pattern!(SCRIPT_REQUIRE, r#"require\(['"`]([^'"`]+)['"`]\)"#);
pattern!(PYTHON_IMPORT_STMT, r"(?m)^(import\s+\w+|from\s+\w+)");
pattern!(PYTHON_MODULE, r"(?:import|from)\s+(\w+)");
pattern!(JAVA_IMPORT, r"import\s+([^;]+);");
pattern!(GO_IMPORT_STMT, r#"import\s+(?:\([\s\S]*?\)|"[^"]+"|`[^`]+`)"#);
pattern!(GO_QUOTED_PATH, r#""([^"]+)""#);

/// String-literal targets of `import … from '…'` then `require('…')`
fn script_dependencies(code: &str) -> Vec<String> {
    let imports = SCRIPT_IMPORT_STMT.find_iter(code).filter_map(|stmt| {
        SCRIPT_IMPORT_FROM
            .captures(stmt.as_str())
            .map(|caps| caps[1].to_string())
    });
    let requires = SCRIPT_REQUIRE
        .captures_iter(code)
        .map(|caps| caps[1].to_string());

    imports.chain(requires).collect()
}

/// First module word after each line-leading `import` / `from`
fn python_dependencies(code: &str) -> Vec<String> {
    PYTHON_IMPORT_STMT
        .find_iter(code)
        .filter_map(|stmt| {
            PYTHON_MODULE
                .captures(stmt.as_str())
                .map(|caps| caps[1].to_string())
        })
        .collect()
}

fn java_dependencies(code: &str) -> Vec<String> {
    JAVA_IMPORT
        .captures_iter(code)
        .map(|caps| caps[1].to_string())
        .collect()
}

/// Every quoted path in single-line and grouped `import` statements
fn go_dependencies(code: &str) -> Vec<String> {
    GO_IMPORT_STMT
        .find_iter(code)
        .flat_map(|stmt| {
            GO_QUOTED_PATH
                .captures_iter(stmt.as_str())
                .map(|caps| caps[1].to_string())
                .collect::<Vec<_>>()
        })
        .collect()
}

fn no_dependencies(_code: &str) -> Vec<String> {
    Vec::new()
}

// =============================================================================
// Plausibility Checks
// =============================================================================

fn contains_any(code: &str, markers: &[&str]) -> bool {
    markers.iter().any(|m| code.contains(m))
}

fn plausible_script(code: &str) -> bool {
    !code.contains("undefined syntax")
        && contains_any(
            code,
            &[
                "function", "=>", "const", "let", "var", "class", "import", "export",
            ],
        )
}

fn plausible_python(code: &str) -> bool {
    !code.contains("SyntaxError")
        && contains_any(
            code,
            &[
                "def ", "class ", "import ", "from ", "if ", "for ", "=", "print",
            ],
        )
}

fn plausible_java(code: &str) -> bool {
    contains_any(
        code,
        &["class ", "interface ", "public ", "private ", "import "],
    )
}

fn plausible_markup(code: &str) -> bool {
    code.contains('<') && code.contains('>')
}

fn plausible_stylesheet(code: &str) -> bool {
    code.contains('{') && code.contains('}') && (code.contains(':') || code.contains('@'))
}

/// Strict decode first, then any brace or bracket as a weaker signal
fn plausible_data(code: &str) -> bool {
    serde_json::from_str::<serde_json::Value>(code).is_ok()
        || code.contains('{')
        || code.contains('[')
}

fn plausible_default(code: &str) -> bool {
    !code.trim().is_empty()
}

// =============================================================================
// Rule Table
// =============================================================================

/// Heuristic rule record for one language key
pub struct LanguageRules {
    /// Lowercased fence tag this record answers to (`"*"` for the default)
    pub key: &'static str,
    imports: &'static Pattern,
    exports: &'static Pattern,
    comments: &'static Pattern,
    dependencies: fn(&str) -> Vec<String>,
    plausible: fn(&str) -> bool,
}

impl LanguageRules {
    pub fn has_imports(&self, code: &str) -> bool {
        self.imports.is_match(code)
    }

    pub fn has_exports(&self, code: &str) -> bool {
        self.exports.is_match(code)
    }

    pub fn has_comments(&self, code: &str) -> bool {
        self.comments.is_match(code)
    }

    pub fn dependencies(&self, code: &str) -> Vec<String> {
        (self.dependencies)(code)
    }

    /// Does `code` look like real code in this language?
    pub fn is_plausible(&self, code: &str) -> bool {
        (self.plausible)(code)
    }

    /// Whether this is the shared fallback record
    pub fn is_default(&self) -> bool {
        std::ptr::eq(self, &DEFAULT_RULES)
    }
}

macro_rules! rules {
    ($key:literal, $imports:ident, $exports:ident, $comments:ident, $deps:ident, $plausible:ident) => {
        LanguageRules {
            key: $key,
            imports: &$imports,
            exports: &$exports,
            comments: &$comments,
            dependencies: $deps,
            plausible: $plausible,
        }
    };
}

static DEFAULT_RULES: LanguageRules = rules!(
    "*",
    IMPORTS_DEFAULT,
    EXPORTS_DEFAULT,
    COMMENTS_DEFAULT,
    no_dependencies,
    plausible_default
);

#[rustfmt::skip]
static LANGUAGE_RULES: [LanguageRules; 12] = [
    rules!("javascript", IMPORTS_SCRIPT, EXPORTS_SCRIPT, COMMENTS_C_FAMILY, script_dependencies, plausible_script),
    rules!("typescript", IMPORTS_SCRIPT, EXPORTS_SCRIPT, COMMENTS_C_FAMILY, script_dependencies, plausible_script),
    rules!("python", IMPORTS_PYTHON, EXPORTS_PYTHON, COMMENTS_PYTHON, python_dependencies, plausible_python),
    rules!("java", IMPORTS_JVM_GO, EXPORTS_JAVA, COMMENTS_C_FAMILY, java_dependencies, plausible_java),
    rules!("csharp", IMPORTS_CSHARP, EXPORTS_CSHARP, COMMENTS_C_FAMILY, no_dependencies, plausible_default),
    rules!("go", IMPORTS_JVM_GO, EXPORTS_GO, COMMENTS_C_FAMILY, go_dependencies, plausible_default),
    rules!("rust", IMPORTS_RUST, EXPORTS_RUST, COMMENTS_C_FAMILY, no_dependencies, plausible_default),
    rules!("php", IMPORTS_PHP, EXPORTS_PHP, COMMENTS_PHP, no_dependencies, plausible_default),
    rules!("html", IMPORTS_DEFAULT, EXPORTS_DEFAULT, COMMENTS_MARKUP, no_dependencies, plausible_markup),
    rules!("css", IMPORTS_DEFAULT, EXPORTS_DEFAULT, COMMENTS_STYLESHEET, no_dependencies, plausible_stylesheet),
    rules!("sql", IMPORTS_DEFAULT, EXPORTS_DEFAULT, COMMENTS_SQL, no_dependencies, plausible_default),
    rules!("json", IMPORTS_DEFAULT, EXPORTS_DEFAULT, COMMENTS_DEFAULT, no_dependencies, plausible_data),
];

/// Look up the rule record for a fence tag (case-insensitive)
pub fn rules_for(language: &str) -> &'static LanguageRules {
    let key = language.to_lowercase();
    LANGUAGE_RULES
        .iter()
        .find(|rules| rules.key == key)
        .unwrap_or(&DEFAULT_RULES)
}

/// Language keys with a dedicated rule record
pub fn known_languages() -> impl Iterator<Item = &'static str> {
    LANGUAGE_RULES.iter().map(|rules| rules.key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_is_case_insensitive() {
        assert_eq!(rules_for("Python").key, "python");
        assert_eq!(rules_for("JAVASCRIPT").key, "javascript");
        assert!(rules_for("haskell").is_default());
        assert!(rules_for("").is_default());
        // Only exact keys are recognised
        assert!(rules_for("js").is_default());
    }

    #[test]
    fn test_every_pattern_compiles() {
        for lang in known_languages().chain(["unknown"]) {
            let rules = rules_for(lang);
            rules.has_imports("");
            rules.has_exports("");
            rules.has_comments("");
            rules.dependencies("");
        }
    }

    #[test]
    fn test_script_dependencies() {
        let code = r#"import React from 'react';
import { useState } from "react";
const fs = require('fs');
const path = require(`path`);"#;
        assert_eq!(
            rules_for("typescript").dependencies(code),
            vec!["react", "react", "fs", "path"]
        );
    }

    #[test]
    fn test_script_side_effect_import_is_not_a_dependency() {
        assert!(rules_for("javascript").dependencies("import './styles.css';").is_empty());
    }

    #[test]
    fn test_python_dependencies() {
        let code = "import os\nfrom collections import OrderedDict\n  import indented\nx = 1";
        assert_eq!(
            rules_for("python").dependencies(code),
            vec!["os", "collections"]
        );
    }

    #[test]
    fn test_java_dependencies() {
        let code = "package demo;\nimport java.util.List;\nimport static java.lang.Math.max;";
        assert_eq!(
            rules_for("java").dependencies(code),
            vec!["java.util.List", "static java.lang.Math.max"]
        );
    }

    #[test]
    fn test_go_dependencies() {
        let code = "package main\n\nimport (\n\t\"fmt\"\n\t\"net/http\"\n)\n\nimport \"os\"\n";
        assert_eq!(
            rules_for("go").dependencies(code),
            vec!["fmt", "net/http", "os"]
        );
    }

    #[test]
    fn test_no_extractor_languages() {
        assert!(rules_for("rust").dependencies("use serde::Serialize;").is_empty());
        assert!(rules_for("ruby").dependencies("require 'json'").is_empty());
    }

    #[test]
    fn test_import_detection_is_line_anchored() {
        let rules = rules_for("python");
        assert!(rules.has_imports("import os"));
        assert!(rules.has_imports("x = 1\nfrom a import b"));
        assert!(!rules.has_imports("    import os"));
    }

    #[test]
    fn test_default_rules() {
        let rules = rules_for("kotlin");
        assert!(rules.has_imports("import kotlin.math.max"));
        assert!(rules.has_exports("public fun main() {}"));
        assert!(rules.has_comments("// note"));
        assert!(!rules.has_comments("val x = 1"));
    }

    #[test]
    fn test_comment_rules() {
        assert!(rules_for("html").has_comments("<!-- hi -->"));
        assert!(!rules_for("html").has_comments("// not html"));
        assert!(rules_for("sql").has_comments("-- comment"));
        assert!(rules_for("python").has_comments("\"\"\"doc\"\"\""));
        assert!(rules_for("php").has_comments("# note"));
        assert!(!rules_for("css").has_comments("a { color: red; }"));
    }

    #[test]
    fn test_plausibility() {
        assert!(rules_for("javascript").is_plausible("let a = 1"));
        assert!(!rules_for("javascript").is_plausible("hello world"));
        assert!(!rules_for("javascript").is_plausible("const undefined syntax"));
        assert!(rules_for("python").is_plausible("print('x')"));
        assert!(!rules_for("python").is_plausible("SyntaxError: x = 1"));
        assert!(rules_for("java").is_plausible("public void run()"));
        assert!(!rules_for("html").is_plausible("plain text"));
        assert!(rules_for("css").is_plausible("a { color: red }"));
        assert!(!rules_for("css").is_plausible("a { }"));
        assert!(rules_for("json").is_plausible("42"));
        assert!(rules_for("json").is_plausible("{broken"));
        assert!(!rules_for("json").is_plausible("nope"));
        assert!(rules_for("brainfuck").is_plausible("+++"));
    }
}
