//! Block export helpers
//!
//! Naming and bundling for the download and copy-all actions, plus writing
//! blocks to a directory for the `extract --out-dir` command.

use std::collections::HashSet;
use std::fs;
use std::path::{Component, Path, PathBuf};

use crate::types::{ProcessedCodeBlock, Result};

/// File extension used when saving a block in `language`
pub fn file_extension(language: &str) -> &'static str {
    match language.to_lowercase().as_str() {
        "javascript" => "js",
        "typescript" => "ts",
        "python" => "py",
        "java" => "java",
        "html" => "html",
        "css" => "css",
        "sql" => "sql",
        "json" => "json",
        "xml" => "xml",
        "yaml" => "yml",
        "markdown" => "md",
        "bash" | "shell" => "sh",
        "php" => "php",
        "ruby" => "rb",
        "go" => "go",
        "rust" => "rs",
        "cpp" => "cpp",
        "c" => "c",
        "csharp" => "cs",
        "swift" => "swift",
        "kotlin" => "kt",
        "dart" => "dart",
        _ => "txt",
    }
}

/// Declared filename, or `code-{n}.{ext}` for the 0-based `index`
pub fn download_name(block: &ProcessedCodeBlock, index: usize) -> String {
    match &block.filename {
        Some(name) => name.clone(),
        None => format!("code-{}.{}", index + 1, file_extension(&block.language)),
    }
}

/// Concatenate all blocks under `// ===== name (language) =====` headers
pub fn bundle(blocks: &[ProcessedCodeBlock]) -> String {
    blocks
        .iter()
        .enumerate()
        .map(|(idx, block)| {
            let title = block
                .filename
                .clone()
                .unwrap_or_else(|| format!("Code Block {}", idx + 1));
            format!("// ===== {} ({}) =====\n{}", title, block.language, block.code)
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Keep only plain path segments so a model-supplied name stays inside `dir`
fn confined_path(dir: &Path, name: &str) -> Option<PathBuf> {
    let relative: PathBuf = Path::new(name)
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part),
            _ => None,
        })
        .collect();

    (!relative.as_os_str().is_empty()).then(|| dir.join(relative))
}

/// `app.js` -> `app-2.js`, `Makefile` -> `Makefile-2`
fn numbered(path: &Path, n: usize) -> PathBuf {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let name = match path.extension() {
        Some(ext) => format!("{}-{}.{}", stem, n, ext.to_string_lossy()),
        None => format!("{}-{}", stem, n),
    };
    path.with_file_name(name)
}

/// Write every block under `dir`, returning the paths written
///
/// Blocks that declare the same filename get `-2`, `-3`, ... suffixes so
/// every block lands in its own file.
pub fn write_blocks(dir: &Path, blocks: &[ProcessedCodeBlock]) -> Result<Vec<PathBuf>> {
    let mut written = Vec::with_capacity(blocks.len());
    let mut taken: HashSet<PathBuf> = HashSet::with_capacity(blocks.len());

    for (idx, block) in blocks.iter().enumerate() {
        let name = download_name(block, idx);
        let base = confined_path(dir, &name).unwrap_or_else(|| {
            dir.join(format!("code-{}.{}", idx + 1, file_extension(&block.language)))
        });

        let mut path = base.clone();
        let mut n = 1;
        while taken.contains(&path) {
            n += 1;
            path = numbered(&base, n);
        }

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, &block.code)?;
        taken.insert(path.clone());
        written.push(path);
    }

    Ok(written)
}
