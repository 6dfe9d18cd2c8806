//! Locale inspection commands.

use anyhow::{Result, anyhow};
use comfy_table::Table;
use vaultx_core::i18n::{Language, Namespace, table};

/// Prints every language with the source of each namespace bundle.
pub fn list() {
    let bundles = table();

    let mut header = vec!["Code".to_string(), "Language".to_string()];
    header.extend(Namespace::ALL.iter().map(|ns| ns.as_str().to_string()));

    let mut out = Table::new();
    out.set_header(header);
    for lang in Language::ALL {
        let mut row = vec![
            lang.code().to_string(),
            format!("{} {}", lang.flag(), lang.native_name()),
        ];
        row.extend(Namespace::ALL.iter().map(|&ns| {
            if bundles.is_aliased(lang, ns) {
                Language::FALLBACK.code().to_string()
            } else {
                "own".to_string()
            }
        }));
        out.add_row(row);
    }

    println!("{out}");
}

pub fn show(lang: &str, namespace: &str) -> Result<()> {
    let lang: Language = lang.parse().map_err(|e: String| anyhow!(e))?;
    let ns: Namespace = namespace.parse().map_err(|e: String| anyhow!(e))?;

    let bundles = table();
    if bundles.is_aliased(lang, ns) {
        eprintln!(
            "{} has no '{ns}' strings; showing {}.",
            lang.native_name(),
            Language::FALLBACK.native_name()
        );
    }
    for (key, value) in bundles.bundle(lang, ns).iter() {
        println!("{key} = {value}");
    }
    Ok(())
}
