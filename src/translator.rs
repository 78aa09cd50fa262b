//! Region- and culture-aware translation.
//!
//! A translation passes through four stages: base resolution (interception
//! table, then the region's locale table, then the Portuguese fallback
//! table), regional terminology substitution, formality substitution
//! keyed by the region's default register, and placeholder substitution.
//! A key with no translation anywhere comes back unchanged; the translator
//! never fails.

use crate::context::DetectionContext;
use crate::interceptor;
use crate::region::{CountryRegistry, Formality, Region};
use chrono::{DateTime, Datelike, Local, Timelike, Weekday};
use regex::Regex;
use std::collections::HashMap;
use std::sync::OnceLock;

/// Usage context for contextual translation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UsageContext {
    Business,
    Casual,
    Government,
    General,
}

impl UsageContext {
    pub fn as_str(&self) -> &'static str {
        match self {
            UsageContext::Business => "business",
            UsageContext::Casual => "casual",
            UsageContext::Government => "government",
            UsageContext::General => "general",
        }
    }
}

/// Metadata describing one region's Portuguese variant.
#[derive(Debug, Clone)]
pub struct RegionVariant {
    pub region: Region,
    pub name: &'static str,
    pub locale: &'static str,
    pub variant: &'static str,
    pub formality: Formality,
}

/// Compiled search/replace pair.
struct Substitution {
    re: Regex,
    replacement: &'static str,
}

/// Translate a key for a region, applying terminology, formality, and
/// placeholder substitution.
///
/// An unknown key is returned unchanged.
pub fn translate(key: &str, placeholders: &[(&str, &str)], region: Region) -> String {
    let base = match base_translation(key, region) {
        Some(base) => base,
        None => return key.to_string(),
    };

    let adapted = apply_terminology(&base, region);
    let adapted = apply_formality(&adapted, region);
    replace_placeholders(&adapted, placeholders, region)
}

/// Contextual translation: a context-qualified key (`key.context`) wins
/// when it exists; otherwise the base translation gets the context's
/// phrase substitutions applied on top.
pub fn contextual_translate(
    key: &str,
    context: UsageContext,
    placeholders: &[(&str, &str)],
    region: Region,
) -> String {
    let context_key = format!("{}.{}", key, context.as_str());
    if base_translation(&context_key, region).is_some() {
        return translate(&context_key, placeholders, region);
    }

    let translation = translate(key, placeholders, region);
    apply_context(&translation, context)
}

/// Classify the current request into a usage context.
///
/// Checks, in order: admin/dashboard paths, government paths, business
/// hours on a weekday, and a corporate user agent.
pub fn detect_context(ctx: &DetectionContext) -> UsageContext {
    classify_context(ctx, Local::now())
}

fn classify_context(ctx: &DetectionContext, now: DateTime<Local>) -> UsageContext {
    let path = ctx.path.as_str();

    if path.contains("/admin") || path.contains("/dashboard") {
        return UsageContext::Business;
    }

    if path.contains("/gov") || path.contains("/government") {
        return UsageContext::Government;
    }

    let weekday = !matches!(now.weekday(), Weekday::Sat | Weekday::Sun);
    if weekday && (9..=17).contains(&now.hour()) {
        return UsageContext::Business;
    }

    let user_agent = ctx.user_agent().to_lowercase();
    if user_agent.contains("corporate") || user_agent.contains("business") {
        return UsageContext::Business;
    }

    UsageContext::Casual
}

/// Check whether a key resolves in any locale of the region's priority
/// chain (`pt_REGION`, `pt`, interception table).
pub fn has_translation(key: &str, region: Region) -> bool {
    regional_table(region).contains_key(key)
        || portuguese_table().contains_key(key)
        || interceptor::has_translation(key)
}

/// All keys from `keys` that do not resolve for the region.
pub fn missing_translations(keys: &[&str], region: Region) -> Vec<String> {
    keys.iter()
        .filter(|key| !has_translation(key, region))
        .map(|key| key.to_string())
        .collect()
}

/// The regions with distinct Portuguese variants.
pub fn available_regions() -> Vec<RegionVariant> {
    [
        (Region::Pt, "European Portuguese"),
        (Region::Br, "Brazilian Portuguese"),
        (Region::Mz, "Mozambican Portuguese"),
        (Region::Ao, "Angolan Portuguese"),
        (Region::Cv, "Cape Verdean Portuguese"),
    ]
    .into_iter()
    .map(|(region, variant)| {
        let info = CountryRegistry::get().country(region);
        RegionVariant {
            region,
            name: info.name,
            locale: info.locale,
            variant,
            formality: info.formality,
        }
    })
    .collect()
}

// ==================== Base resolution ====================

fn base_translation(key: &str, region: Region) -> Option<String> {
    if let Some(intercepted) = interceptor::lookup(key, region) {
        return Some(intercepted);
    }
    if let Some(&phrase) = regional_table(region).get(key) {
        return Some(phrase.to_string());
    }
    portuguese_table().get(key).map(|&phrase| phrase.to_string())
}

/// Shared Portuguese fallback table, used by every region that has no
/// override of its own for a key.
fn portuguese_table() -> &'static HashMap<&'static str, &'static str> {
    static TABLE: OnceLock<HashMap<&'static str, &'static str>> = OnceLock::new();
    TABLE.get_or_init(|| {
        HashMap::from([
            // Core application messages
            ("welcome", "Bem-vindo"),
            ("dashboard", "Painel"),
            ("you_are_logged_in", "Está conectado!"),
            ("profile", "Perfil"),
            ("settings", "Configurações"),
            ("logout", "Sair"),
            // Common actions
            ("save", "Salvar"),
            ("cancel", "Cancelar"),
            ("delete", "Excluir"),
            ("edit", "Editar"),
            ("create", "Criar"),
            ("update", "Actualizar"),
            ("submit", "Enviar"),
            ("search", "Pesquisar"),
            // Status messages
            ("success", "Sucesso!"),
            ("error", "Erro!"),
            ("loading", "Carregando..."),
            ("please_wait", "Por favor aguarde..."),
            // Confirmation
            ("are_you_sure", "Tem certeza?"),
            ("confirm", "Confirmar"),
            // Common terms
            ("name", "Nome"),
            ("email", "Email"),
            ("password", "Senha"),
            ("phone", "Telefone"),
            ("address", "Endereço"),
            ("date", "Data"),
            ("time", "Hora"),
            ("status", "Estado"),
            // Greetings, with context-qualified variants
            ("greeting", "olá"),
            ("greeting.business", "bom dia"),
            ("farewell", "tchau"),
            ("thanks", "obrigado"),
            // Validation messages with placeholders
            ("validation.required", "O campo :attribute é obrigatório."),
            ("validation.invalid", "O campo :attribute é inválido."),
        ])
    })
}

/// Per-region key overrides (the `pt_REGION` layer).
fn regional_table(region: Region) -> &'static HashMap<&'static str, &'static str> {
    static EMPTY: OnceLock<HashMap<&'static str, &'static str>> = OnceLock::new();
    static PT: OnceLock<HashMap<&'static str, &'static str>> = OnceLock::new();
    static BR: OnceLock<HashMap<&'static str, &'static str>> = OnceLock::new();

    match region {
        Region::Pt => PT.get_or_init(|| {
            HashMap::from([
                ("settings", "Definições"),
                ("save", "Guardar"),
                ("delete", "Eliminar"),
                ("logout", "Terminar Sessão"),
                ("loading", "A carregar..."),
                ("you_are_logged_in", "Está ligado!"),
            ])
        }),
        Region::Br => BR.get_or_init(|| {
            HashMap::from([
                ("update", "Atualizar"),
                ("you_are_logged_in", "Você está logado!"),
            ])
        }),
        _ => EMPTY.get_or_init(HashMap::new),
    }
}

// ==================== Terminology substitution ====================

fn compile(pairs: &[(&str, &'static str)], whole_word: bool) -> Vec<Substitution> {
    pairs
        .iter()
        .map(|(search, replacement)| {
            let escaped = regex::escape(search);
            let pattern = if whole_word {
                format!(r"(?i)\b{escaped}\b")
            } else {
                format!("(?i){escaped}")
            };
            Substitution {
                re: Regex::new(&pattern).expect("substitution pattern is valid"),
                replacement,
            }
        })
        .collect()
}

fn apply_substitutions(text: &str, subs: &[Substitution]) -> String {
    let mut result = text.to_string();
    for sub in subs {
        result = sub.re.replace_all(&result, sub.replacement).into_owned();
    }
    result
}

/// Whole-word, case-insensitive dialect term swaps per region.
fn apply_terminology(text: &str, region: Region) -> String {
    static TABLES: OnceLock<HashMap<Region, Vec<Substitution>>> = OnceLock::new();
    let tables = TABLES.get_or_init(|| {
        HashMap::from([
            (
                Region::Pt,
                compile(
                    &[
                        ("e-mail", "correio electrónico"),
                        ("email", "correio electrónico"),
                        ("celular", "telemóvel"),
                        ("senha", "palavra-passe"),
                        ("arquivo", "ficheiro"),
                        ("endereço", "morada"),
                        ("usuário", "utilizador"),
                        ("aplicativo", "aplicação"),
                    ],
                    true,
                ),
            ),
            (
                Region::Br,
                compile(
                    &[
                        ("correio electrónico", "e-mail"),
                        ("telemóvel", "celular"),
                        ("palavra-passe", "senha"),
                        ("ficheiro", "arquivo"),
                        ("morada", "endereço"),
                        ("utilizador", "usuário"),
                        ("aplicação", "aplicativo"),
                    ],
                    true,
                ),
            ),
            (
                Region::Mz,
                compile(
                    &[
                        ("correio electrónico", "email"),
                        ("telemóvel", "celular"),
                        ("palavra-passe", "senha"),
                        ("ficheiro", "arquivo"),
                        ("morada", "endereço"),
                        ("utilizador", "usuário"),
                    ],
                    true,
                ),
            ),
            (
                Region::Ao,
                compile(
                    &[
                        ("e-mail", "correio electrónico"),
                        ("celular", "telemóvel"),
                        ("senha", "palavra-passe"),
                        ("arquivo", "ficheiro"),
                        ("endereço", "morada"),
                        ("usuário", "utilizador"),
                    ],
                    true,
                ),
            ),
        ])
    });

    match tables.get(&region) {
        Some(subs) => apply_substitutions(text, subs),
        None => text.to_string(),
    }
}

// ==================== Formality substitution ====================

/// Phrase-level substitutions keyed by the region's default formality.
fn apply_formality(text: &str, region: Region) -> String {
    static TABLES: OnceLock<HashMap<Formality, Vec<Substitution>>> = OnceLock::new();
    let tables = TABLES.get_or_init(|| {
        HashMap::from([
            (
                Formality::Informal,
                compile(
                    &[
                        ("vossa excelência", "você"),
                        ("muito obrigado", "obrigado"),
                        ("cordiais cumprimentos", "até mais"),
                        ("estimado", "caro"),
                    ],
                    false,
                ),
            ),
            (
                Formality::Formal,
                compile(
                    &[
                        ("você", "o senhor/a senhora"),
                        ("obrigado", "muito obrigado"),
                        ("tchau", "até logo"),
                    ],
                    false,
                ),
            ),
            (
                Formality::Mixed,
                compile(
                    &[
                        ("vossa excelência", "estimado cliente"),
                        ("você", "o senhor/a senhora"),
                    ],
                    false,
                ),
            ),
        ])
    });

    let formality = CountryRegistry::get().country(region).formality;
    match tables.get(&formality) {
        Some(subs) => apply_substitutions(text, subs),
        None => text.to_string(),
    }
}

// ==================== Context substitution ====================

fn apply_context(text: &str, context: UsageContext) -> String {
    static TABLES: OnceLock<HashMap<&'static str, Vec<Substitution>>> = OnceLock::new();
    let tables = TABLES.get_or_init(|| {
        HashMap::from([
            (
                "business",
                compile(
                    &[
                        ("olá", "bom dia"),
                        ("oi", "bom dia"),
                        ("tchau", "até logo"),
                        ("obrigado", "muito obrigado"),
                    ],
                    false,
                ),
            ),
            (
                "casual",
                compile(
                    &[
                        ("bom dia", "oi"),
                        ("boa tarde", "olá"),
                        ("muito obrigado", "obrigado"),
                        ("excelência", "você"),
                    ],
                    false,
                ),
            ),
            (
                "government",
                compile(
                    &[
                        ("você", "Vossa Excelência"),
                        ("obrigado", "muito obrigado"),
                        ("olá", "respeitosos cumprimentos"),
                    ],
                    false,
                ),
            ),
        ])
    });

    match tables.get(context.as_str()) {
        Some(subs) => apply_substitutions(text, subs),
        None => text.to_string(),
    }
}

// ==================== Placeholder substitution ====================

fn replace_placeholders(text: &str, placeholders: &[(&str, &str)], region: Region) -> String {
    let mut result = text.to_string();

    for (name, value) in placeholders {
        let substituted = if *name == "attribute" {
            translate_attribute(value, region)
        } else {
            value.to_string()
        };
        result = result.replace(&format!(":{name}"), &substituted);
    }

    result
}

/// Attribute-name dictionary used when substituting `:attribute`
/// placeholders, so validation messages name fields in the local dialect.
fn translate_attribute(attribute: &str, region: Region) -> String {
    static TABLES: OnceLock<HashMap<Region, HashMap<&'static str, &'static str>>> =
        OnceLock::new();
    let tables = TABLES.get_or_init(|| {
        HashMap::from([
            (
                Region::Pt,
                HashMap::from([
                    ("email", "correio electrónico"),
                    ("mobile", "telemóvel"),
                    ("phone", "telefone"),
                    ("password", "palavra-passe"),
                    ("file", "ficheiro"),
                    ("address", "morada"),
                    ("user", "utilizador"),
                    ("username", "nome de utilizador"),
                ]),
            ),
            (
                Region::Br,
                HashMap::from([
                    ("email", "e-mail"),
                    ("mobile", "celular"),
                    ("phone", "telefone"),
                    ("password", "senha"),
                    ("file", "arquivo"),
                    ("address", "endereço"),
                    ("user", "usuário"),
                    ("username", "nome de usuário"),
                ]),
            ),
            (
                Region::Mz,
                HashMap::from([
                    ("email", "email"),
                    ("mobile", "celular"),
                    ("phone", "telefone"),
                    ("password", "senha"),
                    ("file", "arquivo"),
                    ("address", "endereço"),
                    ("user", "usuário"),
                    ("username", "nome de usuário"),
                    ("nuit", "NUIT"),
                ]),
            ),
            (
                Region::Ao,
                HashMap::from([
                    ("email", "correio electrónico"),
                    ("mobile", "telemóvel"),
                    ("phone", "telefone"),
                    ("password", "palavra-passe"),
                    ("file", "ficheiro"),
                    ("address", "endereço"),
                    ("user", "utilizador"),
                    ("username", "nome de utilizador"),
                ]),
            ),
        ])
    });

    let table = tables.get(&region).unwrap_or_else(|| {
        tables
            .get(&Region::Pt)
            .expect("PT attribute table is always present")
    });

    table
        .get(attribute)
        .map(|&translated| translated.to_string())
        .unwrap_or_else(|| attribute.to_string())
}
