//! Interception table for common literal English UI phrases.
//!
//! A small dictionary maps phrases like "Save" or "Are you sure?" straight
//! to per-region strings, so host applications get localized UI chrome
//! without defining translation keys. Lookup tries an exact match, then a
//! case-insensitive match, then a priority-ordered fuzzy pattern list;
//! a miss returns `None` so the generic translation path can take over.
//!
//! The table is process-wide. `register_translations` merges additional
//! entries at runtime with last-writer-wins semantics; it is intended for
//! startup/configuration time.

use crate::region::Region;
use std::collections::HashMap;
use std::sync::{OnceLock, RwLock};

/// Per-region renderings of one phrase. The `default` entry is mandatory;
/// per-region entries are optional overrides.
#[derive(Debug, Clone)]
pub struct PhraseEntry {
    pub default: String,
    pub regional: HashMap<Region, String>,
}

impl PhraseEntry {
    pub fn new(default: impl Into<String>) -> Self {
        Self {
            default: default.into(),
            regional: HashMap::new(),
        }
    }

    pub fn with(mut self, region: Region, phrase: impl Into<String>) -> Self {
        self.regional.insert(region, phrase.into());
        self
    }

    fn resolve(&self, region: Region) -> &str {
        self.regional.get(&region).map(String::as_str).unwrap_or(&self.default)
    }
}

/// Fuzzy patterns, checked in order after exact and case-insensitive
/// lookup fail. First matching substring wins; overlaps are resolved by
/// this explicit ordering, not by table iteration order.
const FUZZY_PATTERNS: [(&str, &str); 9] = [
    ("you are logged in", "You're logged in!"),
    ("logged in successfully", "You're logged in!"),
    ("login successful", "You're logged in!"),
    ("welcome back", "Welcome!"),
    ("are you sure you want to delete", "Are you sure?"),
    ("confirm delete", "Are you sure?"),
    ("please wait", "Please wait..."),
    ("loading", "Loading..."),
    ("processing", "Loading..."),
];

static TABLE: OnceLock<RwLock<HashMap<String, PhraseEntry>>> = OnceLock::new();

fn table() -> &'static RwLock<HashMap<String, PhraseEntry>> {
    TABLE.get_or_init(|| RwLock::new(default_table()))
}

/// Translate a literal phrase for a region, or `None` on a miss.
///
/// Placeholders of the form `:name` are substituted on a hit.
pub fn intercept(key: &str, placeholders: &[(&str, &str)], region: Region) -> Option<String> {
    let mut translation = lookup(key, region)?;

    for (name, value) in placeholders {
        translation = translation.replace(&format!(":{name}"), value);
    }

    Some(translation)
}

/// Raw lookup without placeholder substitution.
pub fn lookup(key: &str, region: Region) -> Option<String> {
    let table = table().read().expect("interceptor lock poisoned");

    // Exact match
    if let Some(entry) = table.get(key) {
        return Some(entry.resolve(region).to_string());
    }

    // Case-insensitive match
    let lower = key.to_lowercase();
    if let Some(entry) = table
        .iter()
        .find(|(k, _)| k.to_lowercase() == lower)
        .map(|(_, entry)| entry)
    {
        return Some(entry.resolve(region).to_string());
    }

    fuzzy_lookup(key, region, &table)
}

/// Check whether a phrase would be intercepted for any region.
pub fn has_translation(key: &str) -> bool {
    lookup(key, Region::Mz).is_some()
}

/// Merge additional phrase entries into the process-wide table.
///
/// Existing keys are replaced wholesale (last writer wins). Intended for
/// startup/config time; safe, but not cheap, to call concurrently.
pub fn register_translations(entries: Vec<(String, PhraseEntry)>) {
    let mut table = table().write().expect("interceptor lock poisoned");
    for (key, entry) in entries {
        table.insert(key, entry);
    }
}

fn fuzzy_lookup(
    key: &str,
    region: Region,
    table: &HashMap<String, PhraseEntry>,
) -> Option<String> {
    // Punctuation is noise for fuzzy purposes
    let clean: String = key
        .chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace())
        .collect();
    let clean = clean.trim().to_lowercase();

    for (pattern, mapped_key) in FUZZY_PATTERNS {
        if clean.contains(pattern) {
            return table
                .get(mapped_key)
                .map(|entry| entry.resolve(region).to_string());
        }
    }

    None
}

fn default_table() -> HashMap<String, PhraseEntry> {
    let mut t = HashMap::new();

    // Dashboard & authentication
    t.insert(
        "You're logged in!".to_string(),
        PhraseEntry::new("Está conectado!")
            .with(Region::Pt, "Está ligado!")
            .with(Region::Br, "Você está logado!"),
    );
    t.insert("Welcome!".to_string(), PhraseEntry::new("Bem-vindo!"));
    t.insert(
        "Dashboard".to_string(),
        PhraseEntry::new("Painel").with(Region::Pt, "Painel de Controlo"),
    );
    t.insert("Profile".to_string(), PhraseEntry::new("Perfil"));
    t.insert(
        "Settings".to_string(),
        PhraseEntry::new("Configurações").with(Region::Pt, "Definições"),
    );
    t.insert(
        "Logout".to_string(),
        PhraseEntry::new("Sair").with(Region::Pt, "Terminar Sessão"),
    );

    // Common actions
    t.insert(
        "Save".to_string(),
        PhraseEntry::new("Salvar")
            .with(Region::Pt, "Guardar")
            .with(Region::Ao, "Guardar"),
    );
    t.insert("Cancel".to_string(), PhraseEntry::new("Cancelar"));
    t.insert(
        "Delete".to_string(),
        PhraseEntry::new("Excluir")
            .with(Region::Pt, "Eliminar")
            .with(Region::Ao, "Eliminar"),
    );
    t.insert("Edit".to_string(), PhraseEntry::new("Editar"));
    t.insert("Create".to_string(), PhraseEntry::new("Criar"));
    t.insert(
        "Update".to_string(),
        PhraseEntry::new("Actualizar").with(Region::Br, "Atualizar"),
    );

    // Status messages
    t.insert("Success!".to_string(), PhraseEntry::new("Sucesso!"));
    t.insert("Error!".to_string(), PhraseEntry::new("Erro!"));
    t.insert(
        "Loading...".to_string(),
        PhraseEntry::new("Carregando...").with(Region::Pt, "A carregar..."),
    );
    t.insert(
        "Please wait...".to_string(),
        PhraseEntry::new("Por favor aguarde..."),
    );

    // Confirmation
    t.insert(
        "Are you sure?".to_string(),
        PhraseEntry::new("Tem certeza?").with(Region::Pt, "Tem a certeza?"),
    );
    t.insert("Confirm".to_string(), PhraseEntry::new("Confirmar"));

    // File management
    t.insert(
        "Upload".to_string(),
        PhraseEntry::new("Carregar").with(Region::Br, "Enviar"),
    );
    t.insert(
        "Download".to_string(),
        PhraseEntry::new("Baixar").with(Region::Pt, "Descarregar"),
    );

    // Time & dates
    t.insert("Today".to_string(), PhraseEntry::new("Hoje"));
    t.insert("Yesterday".to_string(), PhraseEntry::new("Ontem"));
    t.insert("Tomorrow".to_string(), PhraseEntry::new("Amanhã"));

    t
}
