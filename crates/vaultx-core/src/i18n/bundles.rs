//! Embedded text bundles and the process-wide bundle table.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::str::FromStr;
use std::sync::{Arc, OnceLock};

use serde_json::Value;

use super::Language;

/// Text namespaces, one JSON file each.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Namespace {
    Common,
    Dashboard,
    Profile,
    Auth,
}

impl Namespace {
    pub const ALL: [Namespace; 4] = [
        Namespace::Common,
        Namespace::Dashboard,
        Namespace::Profile,
        Namespace::Auth,
    ];

    pub const DEFAULT: Namespace = Namespace::Common;

    pub fn as_str(self) -> &'static str {
        match self {
            Namespace::Common => "common",
            Namespace::Dashboard => "dashboard",
            Namespace::Profile => "profile",
            Namespace::Auth => "auth",
        }
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Namespace {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Namespace::ALL
            .into_iter()
            .find(|ns| ns.as_str() == s)
            .ok_or_else(|| format!("Unknown namespace '{s}'"))
    }
}

/// Flattened key/value strings of one (language, namespace) pair.
///
/// Nested JSON objects become dotted keys: `{"tabs": {"home": ".."}}` is
/// stored as `tabs.home`.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Bundle {
    entries: BTreeMap<String, String>,
}

impl Bundle {
    pub fn parse(json: &str) -> Result<Self, serde_json::Error> {
        let value: Value = serde_json::from_str(json)?;
        let mut entries = BTreeMap::new();
        flatten("", &value, &mut entries);
        Ok(Self { entries })
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

fn flatten(prefix: &str, value: &Value, out: &mut BTreeMap<String, String>) {
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                let path = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{prefix}.{key}")
                };
                flatten(&path, child, out);
            }
        }
        Value::String(s) => {
            out.insert(prefix.to_string(), s.clone());
        }
        Value::Null => {}
        other => {
            out.insert(prefix.to_string(), other.to_string());
        }
    }
}

/// Embedded JSON source for a (language, namespace) pair, if one ships.
fn embedded(lang: Language, ns: Namespace) -> Option<&'static str> {
    use Language as L;
    use Namespace as N;

    let src = match (lang, ns) {
        (L::En, N::Common) => include_str!("../../locales/en/common.json"),
        (L::En, N::Dashboard) => include_str!("../../locales/en/dashboard.json"),
        (L::En, N::Profile) => include_str!("../../locales/en/profile.json"),
        (L::En, N::Auth) => include_str!("../../locales/en/auth.json"),

        (L::Es, N::Common) => include_str!("../../locales/es/common.json"),
        (L::Es, N::Dashboard) => include_str!("../../locales/es/dashboard.json"),
        (L::Es, N::Profile) => include_str!("../../locales/es/profile.json"),
        (L::Es, N::Auth) => include_str!("../../locales/es/auth.json"),

        (L::Fr, N::Common) => include_str!("../../locales/fr/common.json"),
        (L::Fr, N::Profile) => include_str!("../../locales/fr/profile.json"),
        (L::Fr, N::Auth) => include_str!("../../locales/fr/auth.json"),

        (L::De, N::Common) => include_str!("../../locales/de/common.json"),
        (L::De, N::Auth) => include_str!("../../locales/de/auth.json"),
        (L::It, N::Common) => include_str!("../../locales/it/common.json"),
        (L::It, N::Auth) => include_str!("../../locales/it/auth.json"),
        (L::Pt, N::Common) => include_str!("../../locales/pt/common.json"),
        (L::Pt, N::Auth) => include_str!("../../locales/pt/auth.json"),
        (L::Ru, N::Common) => include_str!("../../locales/ru/common.json"),
        (L::Ru, N::Auth) => include_str!("../../locales/ru/auth.json"),
        (L::Ja, N::Common) => include_str!("../../locales/ja/common.json"),
        (L::Ja, N::Auth) => include_str!("../../locales/ja/auth.json"),
        (L::Ko, N::Common) => include_str!("../../locales/ko/common.json"),
        (L::Ko, N::Auth) => include_str!("../../locales/ko/auth.json"),
        (L::Ar, N::Common) => include_str!("../../locales/ar/common.json"),
        (L::Ar, N::Auth) => include_str!("../../locales/ar/auth.json"),
        (L::Hi, N::Common) => include_str!("../../locales/hi/common.json"),
        (L::Hi, N::Auth) => include_str!("../../locales/hi/auth.json"),
        (L::Tr, N::Common) => include_str!("../../locales/tr/common.json"),
        (L::Tr, N::Auth) => include_str!("../../locales/tr/auth.json"),
        (L::Pl, N::Common) => include_str!("../../locales/pl/common.json"),
        (L::Pl, N::Auth) => include_str!("../../locales/pl/auth.json"),
        (L::Nl, N::Common) => include_str!("../../locales/nl/common.json"),
        (L::Nl, N::Auth) => include_str!("../../locales/nl/auth.json"),

        (L::Zh, N::Common) => include_str!("../../locales/zh/common.json"),

        _ => return None,
    };
    Some(src)
}

#[derive(Debug)]
struct Entry {
    bundle: Arc<Bundle>,
    /// True when the pair has no bundle of its own and shares the fallback.
    aliased: bool,
}

/// Language -> namespace -> bundle, with every pair populated.
#[derive(Debug)]
pub struct BundleTable {
    entries: HashMap<(Language, Namespace), Entry>,
}

impl BundleTable {
    /// Builds the table, aliasing absent pairs to the fallback language.
    fn build() -> Self {
        let mut entries = HashMap::new();

        let load = |lang: Language, ns: Namespace| -> Option<Bundle> {
            let src = embedded(lang, ns)?;
            match Bundle::parse(src) {
                Ok(bundle) => Some(bundle),
                Err(err) => {
                    tracing::warn!(lang = %lang, ns = %ns, error = %err, "invalid locale bundle");
                    None
                }
            }
        };

        for ns in Namespace::ALL {
            let fallback = Arc::new(load(Language::FALLBACK, ns).unwrap_or_default());
            for lang in Language::ALL {
                let entry = if lang == Language::FALLBACK {
                    Entry {
                        bundle: Arc::clone(&fallback),
                        aliased: false,
                    }
                } else {
                    match load(lang, ns) {
                        Some(bundle) => Entry {
                            bundle: Arc::new(bundle),
                            aliased: false,
                        },
                        None => Entry {
                            bundle: Arc::clone(&fallback),
                            aliased: true,
                        },
                    }
                };
                entries.insert((lang, ns), entry);
            }
        }

        Self { entries }
    }

    pub fn bundle(&self, lang: Language, ns: Namespace) -> &Bundle {
        // Every pair is inserted by `build`.
        match self.entries.get(&(lang, ns)) {
            Some(entry) => &entry.bundle,
            None => empty_bundle(),
        }
    }

    /// Whether `lang` borrows the fallback bundle for `ns`.
    pub fn is_aliased(&self, lang: Language, ns: Namespace) -> bool {
        self.entries.get(&(lang, ns)).is_some_and(|e| e.aliased)
    }

    /// Whether two pairs resolve to the same shared bundle.
    pub fn shares_bundle(&self, a: (Language, Namespace), b: (Language, Namespace)) -> bool {
        match (self.entries.get(&a), self.entries.get(&b)) {
            (Some(x), Some(y)) => Arc::ptr_eq(&x.bundle, &y.bundle),
            _ => false,
        }
    }
}

fn empty_bundle() -> &'static Bundle {
    static EMPTY: OnceLock<Bundle> = OnceLock::new();
    EMPTY.get_or_init(Bundle::default)
}

/// The process-wide table, built on first use.
pub fn table() -> &'static BundleTable {
    static TABLE: OnceLock<BundleTable> = OnceLock::new();
    TABLE.get_or_init(BundleTable::build)
}
