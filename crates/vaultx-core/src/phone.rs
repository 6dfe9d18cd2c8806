//! Phone number handling: the selectable country table and prefill parsing.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;

/// Geographic grouping used to order the country picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Region {
    NorthAmerica,
    Europe,
    AsiaPacific,
    MiddleEast,
    Africa,
    LatinAmerica,
    Caribbean,
    CentralAsia,
}

impl Region {
    pub fn label(self) -> &'static str {
        match self {
            Region::NorthAmerica => "North America",
            Region::Europe => "Europe",
            Region::AsiaPacific => "Asia-Pacific",
            Region::MiddleEast => "Middle East",
            Region::Africa => "Africa",
            Region::LatinAmerica => "Latin America",
            Region::Caribbean => "Caribbean",
            Region::CentralAsia => "Central Asia",
        }
    }
}

/// A selectable country entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Country {
    pub calling_code: &'static str,
    pub name: &'static str,
    pub flag: &'static str,
    pub region: Region,
}

const fn country(
    calling_code: &'static str,
    name: &'static str,
    flag: &'static str,
    region: Region,
) -> Country {
    Country {
        calling_code,
        name,
        flag,
        region,
    }
}

/// Every country offered by the picker, grouped by region.
///
/// Several countries share a calling code (`+1`, `+7`).
pub const COUNTRIES: &[Country] = &[
    country("+1", "United States", "🇺🇸", Region::NorthAmerica),
    country("+1", "Canada", "🇨🇦", Region::NorthAmerica),
    country("+44", "United Kingdom", "🇬🇧", Region::Europe),
    country("+33", "France", "🇫🇷", Region::Europe),
    country("+49", "Germany", "🇩🇪", Region::Europe),
    country("+39", "Italy", "🇮🇹", Region::Europe),
    country("+34", "Spain", "🇪🇸", Region::Europe),
    country("+31", "Netherlands", "🇳🇱", Region::Europe),
    country("+41", "Switzerland", "🇨🇭", Region::Europe),
    country("+43", "Austria", "🇦🇹", Region::Europe),
    country("+32", "Belgium", "🇧🇪", Region::Europe),
    country("+45", "Denmark", "🇩🇰", Region::Europe),
    country("+46", "Sweden", "🇸🇪", Region::Europe),
    country("+47", "Norway", "🇳🇴", Region::Europe),
    country("+358", "Finland", "🇫🇮", Region::Europe),
    country("+48", "Poland", "🇵🇱", Region::Europe),
    country("+420", "Czech Republic", "🇨🇿", Region::Europe),
    country("+36", "Hungary", "🇭🇺", Region::Europe),
    country("+351", "Portugal", "🇵🇹", Region::Europe),
    country("+30", "Greece", "🇬🇷", Region::Europe),
    country("+7", "Russia", "🇷🇺", Region::Europe),
    country("+380", "Ukraine", "🇺🇦", Region::Europe),
    country("+86", "China", "🇨🇳", Region::AsiaPacific),
    country("+91", "India", "🇮🇳", Region::AsiaPacific),
    country("+81", "Japan", "🇯🇵", Region::AsiaPacific),
    country("+82", "South Korea", "🇰🇷", Region::AsiaPacific),
    country("+65", "Singapore", "🇸🇬", Region::AsiaPacific),
    country("+852", "Hong Kong", "🇭🇰", Region::AsiaPacific),
    country("+886", "Taiwan", "🇹🇼", Region::AsiaPacific),
    country("+60", "Malaysia", "🇲🇾", Region::AsiaPacific),
    country("+66", "Thailand", "🇹🇭", Region::AsiaPacific),
    country("+84", "Vietnam", "🇻🇳", Region::AsiaPacific),
    country("+62", "Indonesia", "🇮🇩", Region::AsiaPacific),
    country("+63", "Philippines", "🇵🇭", Region::AsiaPacific),
    country("+61", "Australia", "🇦🇺", Region::AsiaPacific),
    country("+64", "New Zealand", "🇳🇿", Region::AsiaPacific),
    country("+92", "Pakistan", "🇵🇰", Region::AsiaPacific),
    country("+880", "Bangladesh", "🇧🇩", Region::AsiaPacific),
    country("+94", "Sri Lanka", "🇱🇰", Region::AsiaPacific),
    country("+971", "United Arab Emirates", "🇦🇪", Region::MiddleEast),
    country("+966", "Saudi Arabia", "🇸🇦", Region::MiddleEast),
    country("+974", "Qatar", "🇶🇦", Region::MiddleEast),
    country("+965", "Kuwait", "🇰🇼", Region::MiddleEast),
    country("+973", "Bahrain", "🇧🇭", Region::MiddleEast),
    country("+968", "Oman", "🇴🇲", Region::MiddleEast),
    country("+972", "Israel", "🇮🇱", Region::MiddleEast),
    country("+90", "Turkey", "🇹🇷", Region::MiddleEast),
    country("+98", "Iran", "🇮🇷", Region::MiddleEast),
    country("+964", "Iraq", "🇮🇶", Region::MiddleEast),
    country("+961", "Lebanon", "🇱🇧", Region::MiddleEast),
    country("+962", "Jordan", "🇯🇴", Region::MiddleEast),
    country("+20", "Egypt", "🇪🇬", Region::MiddleEast),
    country("+27", "South Africa", "🇿🇦", Region::Africa),
    country("+234", "Nigeria", "🇳🇬", Region::Africa),
    country("+254", "Kenya", "🇰🇪", Region::Africa),
    country("+233", "Ghana", "🇬🇭", Region::Africa),
    country("+212", "Morocco", "🇲🇦", Region::Africa),
    country("+213", "Algeria", "🇩🇿", Region::Africa),
    country("+216", "Tunisia", "🇹🇳", Region::Africa),
    country("+218", "Libya", "🇱🇾", Region::Africa),
    country("+251", "Ethiopia", "🇪🇹", Region::Africa),
    country("+256", "Uganda", "🇺🇬", Region::Africa),
    country("+55", "Brazil", "🇧🇷", Region::LatinAmerica),
    country("+52", "Mexico", "🇲🇽", Region::LatinAmerica),
    country("+54", "Argentina", "🇦🇷", Region::LatinAmerica),
    country("+56", "Chile", "🇨🇱", Region::LatinAmerica),
    country("+57", "Colombia", "🇨🇴", Region::LatinAmerica),
    country("+51", "Peru", "🇵🇪", Region::LatinAmerica),
    country("+58", "Venezuela", "🇻🇪", Region::LatinAmerica),
    country("+593", "Ecuador", "🇪🇨", Region::LatinAmerica),
    country("+595", "Paraguay", "🇵🇾", Region::LatinAmerica),
    country("+598", "Uruguay", "🇺🇾", Region::LatinAmerica),
    country("+1", "Jamaica", "🇯🇲", Region::Caribbean),
    country("+1", "Trinidad and Tobago", "🇹🇹", Region::Caribbean),
    country("+1", "Barbados", "🇧🇧", Region::Caribbean),
    country("+7", "Kazakhstan", "🇰🇿", Region::CentralAsia),
    country("+996", "Kyrgyzstan", "🇰🇬", Region::CentralAsia),
    country("+998", "Uzbekistan", "🇺🇿", Region::CentralAsia),
    country("+992", "Tajikistan", "🇹🇯", Region::CentralAsia),
    country("+993", "Turkmenistan", "🇹🇲", Region::CentralAsia),
];

/// Recognised codes that have no entry in [`COUNTRIES`].
const EXTRA_CODES: &[&str] = &["+353", "+40"];

/// Calling codes recognised when splitting a stored phone number.
///
/// Every code in [`COUNTRIES`] plus [`EXTRA_CODES`], deduplicated and ordered
/// longest first so that `+358...` is never read as `+35`.
pub fn known_codes() -> &'static [&'static str] {
    static CODES: OnceLock<Vec<&'static str>> = OnceLock::new();
    CODES.get_or_init(|| {
        let mut codes: Vec<&'static str> = COUNTRIES
            .iter()
            .map(|c| c.calling_code)
            .chain(EXTRA_CODES.iter().copied())
            .collect();
        codes.sort_unstable();
        codes.dedup();
        codes.sort_by_key(|code| std::cmp::Reverse(code.len()));
        codes
    })
}

/// First country listed for a calling code.
pub fn country_for_code(calling_code: &str) -> Option<&'static Country> {
    COUNTRIES.iter().find(|c| c.calling_code == calling_code)
}

/// Strips everything but ASCII digits.
pub fn sanitize_digits(input: &str) -> String {
    input.chars().filter(char::is_ascii_digit).collect()
}

/// A phone number split into calling code and local digits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhoneCandidate {
    pub country_code: String,
    /// ASCII digits only.
    pub local_digits: String,
}

impl PhoneCandidate {
    pub fn new(country_code: impl Into<String>, local_digits: &str) -> Self {
        Self {
            country_code: country_code.into(),
            local_digits: sanitize_digits(local_digits),
        }
    }

    /// Number sent to the backend: code and local digits concatenated.
    pub fn full_number(&self) -> String {
        format!("{}{}", self.country_code, self.local_digits)
    }

    pub fn is_empty(&self) -> bool {
        self.local_digits.is_empty()
    }
}

impl fmt::Display for PhoneCandidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.country_code, self.local_digits)
    }
}

fn generic_split() -> Option<&'static Regex> {
    static GENERIC: OnceLock<Option<Regex>> = OnceLock::new();
    GENERIC
        .get_or_init(|| Regex::new(r"^(\+\d{1,3})(.+)$").ok())
        .as_ref()
}

/// Splits a stored phone number into a candidate.
///
/// Numbers starting with `+` are matched against [`known_codes`] first. When
/// none match, a greedy split of up to three digits is used. Numbers without a
/// leading `+` keep `default_code` and become local digits entirely.
pub fn parse_prefill(phone: &str, default_code: &str) -> PhoneCandidate {
    let phone = phone.trim();

    if !phone.starts_with('+') {
        return PhoneCandidate::new(default_code, phone);
    }

    if let Some(code) = known_codes().iter().find(|code| phone.starts_with(**code)) {
        return PhoneCandidate::new(*code, &phone[code.len()..]);
    }

    if let Some(caps) = generic_split().and_then(|re| re.captures(phone))
        && let (Some(code), Some(rest)) = (caps.get(1), caps.get(2))
    {
        return PhoneCandidate::new(code.as_str(), rest.as_str());
    }

    PhoneCandidate::new(default_code, phone)
}

/// Masks all but the last few digits of a phone number for log output.
pub fn mask(phone: &str) -> String {
    let count = phone.chars().count();
    if count <= 4 {
        return "*".repeat(count);
    }
    let visible: String = phone.chars().skip(count - 4).collect();
    format!("{}{visible}", "*".repeat(count - 4))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_codes_are_longest_first() {
        for pair in known_codes().windows(2) {
            assert!(
                pair[0].len() >= pair[1].len(),
                "{} listed before {}",
                pair[0],
                pair[1]
            );
        }
    }

    #[test]
    fn test_known_codes_cover_every_country() {
        for country in COUNTRIES {
            assert!(
                known_codes().contains(&country.calling_code),
                "{} ({}) missing",
                country.name,
                country.calling_code
            );
        }
        assert!(known_codes().contains(&"+353"));
        assert!(known_codes().contains(&"+40"));
    }

    #[test]
    fn test_prefill_round_trips_every_country() {
        for country in COUNTRIES {
            let stored = PhoneCandidate::new(country.calling_code, "5551234").full_number();
            let candidate = parse_prefill(&stored, "+1");
            assert_eq!(
                candidate.country_code, country.calling_code,
                "{} split as {candidate:?}",
                country.name
            );
            assert_eq!(candidate.local_digits, "5551234");
            assert!(country_for_code(&candidate.country_code).is_some());
        }
    }

    #[test]
    fn test_prefill_pakistan_number() {
        let candidate = parse_prefill("+923001234567", "+1");
        assert_eq!(candidate.country_code, "+92");
        assert_eq!(candidate.local_digits, "3001234567");
        assert_eq!(country_for_code("+92").map(|c| c.name), Some("Pakistan"));
    }

    #[test]
    fn test_prefill_uses_known_code() {
        let candidate = parse_prefill("+447911123456", "+1");
        assert_eq!(candidate.country_code, "+44");
        assert_eq!(candidate.local_digits, "7911123456");
    }

    #[test]
    fn test_prefill_prefers_longest_code() {
        let candidate = parse_prefill("+358401234567", "+1");
        assert_eq!(candidate.country_code, "+358");
        assert_eq!(candidate.local_digits, "401234567");
    }

    #[test]
    fn test_prefill_north_america() {
        let candidate = parse_prefill("+15551234567", "+44");
        assert_eq!(candidate.country_code, "+1");
        assert_eq!(candidate.local_digits, "5551234567");
    }

    #[test]
    fn test_prefill_unknown_code_uses_greedy_split() {
        let candidate = parse_prefill("+9991234567", "+1");
        assert_eq!(candidate.country_code, "+999");
        assert_eq!(candidate.local_digits, "1234567");
    }

    #[test]
    fn test_prefill_without_plus_keeps_default_code() {
        let candidate = parse_prefill("5551234567", "+1");
        assert_eq!(candidate.country_code, "+1");
        assert_eq!(candidate.local_digits, "5551234567");
    }

    #[test]
    fn test_prefill_strips_separators() {
        let candidate = parse_prefill("+44 7911-123 456", "+1");
        assert_eq!(candidate.country_code, "+44");
        assert_eq!(candidate.local_digits, "7911123456");
    }

    #[test]
    fn test_full_number_concatenates() {
        let candidate = PhoneCandidate::new("+44", "7911123456");
        assert_eq!(candidate.full_number(), "+447911123456");
    }

    #[test]
    fn test_sanitize_digits() {
        assert_eq!(sanitize_digits("(555) 123-4567"), "5551234567");
        assert_eq!(sanitize_digits("abc"), "");
    }

    #[test]
    fn test_country_table_shares_codes() {
        let plus_one = COUNTRIES.iter().filter(|c| c.calling_code == "+1").count();
        assert_eq!(plus_one, 5);
        assert_eq!(country_for_code("+7").map(|c| c.name), Some("Russia"));
        assert!(country_for_code("+999").is_none());
    }

    #[test]
    fn test_mask_hides_prefix() {
        assert_eq!(mask("+447911123456"), "*********3456");
        assert_eq!(mask("123"), "***");
    }
}
