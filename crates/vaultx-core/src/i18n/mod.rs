//! Localized UI text.
//!
//! Bundles for every supported language are embedded at compile time and
//! assembled into one table per process. A language without a bundle for a
//! namespace shares the English one. Lookups fall back language -> English ->
//! the key itself, and `{{name}}` placeholders are substituted verbatim.

mod bundles;
mod detect;
mod language;

pub use bundles::{Bundle, BundleTable, Namespace, table};
pub use detect::{Detection, DetectionInputs, DetectionSource, Detector, PLATFORM_LOCALE_VARS};
pub use language::Language;

/// Text lookup bound to one language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Translator {
    language: Language,
}

impl Default for Translator {
    fn default() -> Self {
        Self::new(Language::FALLBACK)
    }
}

impl Translator {
    pub fn new(language: Language) -> Self {
        Self { language }
    }

    pub fn language(&self) -> Language {
        self.language
    }

    /// Looks up `key` in `ns`.
    pub fn t(&self, ns: Namespace, key: &str) -> String {
        self.lookup(ns, key).unwrap_or(key).to_string()
    }

    /// Looks up `key` in `ns` and substitutes `{{name}}` placeholders.
    pub fn t_with(&self, ns: Namespace, key: &str, args: &[(&str, &str)]) -> String {
        interpolate(self.lookup(ns, key).unwrap_or(key), args)
    }

    /// Whether `key` resolves in this language or the fallback.
    pub fn has(&self, ns: Namespace, key: &str) -> bool {
        self.lookup(ns, key).is_some()
    }

    fn lookup(&self, ns: Namespace, key: &str) -> Option<&'static str> {
        let table = table();
        table.bundle(self.language, ns).get(key).or_else(|| {
            if self.language == Language::FALLBACK {
                None
            } else {
                table.bundle(Language::FALLBACK, ns).get(key)
            }
        })
    }
}

/// Replaces `{{name}}` (surrounding spaces allowed) with matching args.
///
/// Unknown placeholders are left untouched. No escaping is applied.
pub fn interpolate(template: &str, args: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let Some(end) = after.find("}}") else {
            out.push_str(&rest[start..]);
            return out;
        };
        let name = after[..end].trim();
        match args.iter().find(|(k, _)| *k == name) {
            Some((_, value)) => out.push_str(value),
            None => out.push_str(&rest[start..start + 2 + end + 2]),
        }
        rest = &after[end + 2..];
    }

    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_in_language() {
        let t = Translator::new(Language::Es);
        assert_eq!(t.t(Namespace::Common, "tabs.wallet"), "Billetera");
    }

    #[test]
    fn test_missing_key_falls_back_to_english() {
        // Italian auth ships without `sms.sending`.
        let t = Translator::new(Language::It);
        assert_eq!(t.t(Namespace::Auth, "sms.sending"), "Sending...");
    }

    #[test]
    fn test_aliased_namespace_reads_english() {
        let t = Translator::new(Language::Zh);
        assert_eq!(t.t(Namespace::Auth, "sms.title"), "Verify Your Phone");
        assert_eq!(t.t(Namespace::Common, "tabs.home"), "首页");
    }

    #[test]
    fn test_unknown_key_returns_key() {
        let t = Translator::default();
        assert_eq!(t.t(Namespace::Common, "no.such.key"), "no.such.key");
        assert!(!t.has(Namespace::Common, "no.such.key"));
    }

    #[test]
    fn test_t_with_interpolates() {
        let t = Translator::default();
        assert_eq!(
            t.t_with(
                Namespace::Auth,
                "sms.code_sent",
                &[("length", "6"), ("phone", "+15551234567")]
            ),
            "6-digit verification code sent to +15551234567"
        );
        assert_eq!(
            t.t_with(Namespace::Auth, "sms.resend_in", &[("seconds", "42")]),
            "Resend in 42s"
        );
    }

    #[test]
    fn test_interpolate_edge_cases() {
        assert_eq!(interpolate("Hi {{ name }}!", &[("name", "Ana")]), "Hi Ana!");
        assert_eq!(interpolate("{{missing}} stays", &[]), "{{missing}} stays");
        assert_eq!(interpolate("open {{brace", &[("brace", "x")]), "open {{brace");
        assert_eq!(interpolate("<b>{{v}}</b>", &[("v", "<i>")]), "<b><i></b>");
    }
}
