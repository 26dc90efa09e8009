use once_cell::sync::Lazy;
use serde::Deserialize;
use std::collections::HashSet;

#[derive(Debug, Clone, Deserialize)]
pub struct Language {
    pub name: String,
    pub extensions: Vec<String>,
}

static LANGUAGES: Lazy<Vec<Language>> = Lazy::new(|| {
    serde_json::from_str(include_str!("../configs/languages.json"))
        .expect("configs/languages.json is embedded at build time and must be valid")
});

/// Extensions of every named language (names match case-insensitively),
/// plus the names that are not in the table.
pub fn extensions_for(names: &[String]) -> (HashSet<String>, Vec<String>) {
    let mut extensions = HashSet::new();
    let mut unknown = Vec::new();

    for name in names {
        let wanted = name.trim().to_lowercase();
        match LANGUAGES.iter().find(|l| l.name.to_lowercase() == wanted) {
            Some(lang) => extensions.extend(lang.extensions.iter().cloned()),
            None => unknown.push(name.clone()),
        }
    }

    (extensions, unknown)
}
