//! Locale table for week-start and label formatting
//!
//! A small static table replaces runtime locale introspection: the
//! first-day-of-week comes from a locale-prefix lookup (with an explicit
//! per-widget override taking precedence, see `HeatmapOptions`), and the
//! weekday/month abbreviations come from per-language label sets.

/// Languages whose week conventionally starts on Monday
const MONDAY_FIRST_LANGUAGES: &[&str] = &[
    "de", "fr", "es", "it", "pt", "nl", "pl", "cs", "sk", "hu", "ru", "uk", "sv", "da", "fi",
    "nb", "nn", "tr",
];

/// English regions that start the week on Monday despite `en` defaulting
/// to Sunday
const MONDAY_FIRST_REGIONS: &[&str] = &["en-gb", "en-au", "en-nz", "en-ie"];

/// Weekday abbreviations, Sunday-first, per supported language
const WEEKDAYS_EN: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];
const WEEKDAYS_DE: [&str; 7] = ["So", "Mo", "Di", "Mi", "Do", "Fr", "Sa"];
const WEEKDAYS_FR: [&str; 7] = ["dim.", "lun.", "mar.", "mer.", "jeu.", "ven.", "sam."];
const WEEKDAYS_ES: [&str; 7] = ["dom", "lun", "mar", "mié", "jue", "vie", "sáb"];
const WEEKDAYS_IT: [&str; 7] = ["dom", "lun", "mar", "mer", "gio", "ven", "sab"];

const MONTHS_EN: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];
const MONTHS_DE: [&str; 12] = [
    "Jan", "Feb", "Mär", "Apr", "Mai", "Jun", "Jul", "Aug", "Sep", "Okt", "Nov", "Dez",
];
const MONTHS_FR: [&str; 12] = [
    "janv.", "févr.", "mars", "avr.", "mai", "juin", "juil.", "août", "sept.", "oct.", "nov.",
    "déc.",
];
const MONTHS_ES: [&str; 12] = [
    "ene", "feb", "mar", "abr", "may", "jun", "jul", "ago", "sep", "oct", "nov", "dic",
];
const MONTHS_IT: [&str; 12] = [
    "gen", "feb", "mar", "apr", "mag", "giu", "lug", "ago", "set", "ott", "nov", "dic",
];

/// Language subtag of a locale identifier ("de-AT" -> "de")
fn language(locale: &str) -> String {
    locale
        .split(['-', '_'])
        .next()
        .unwrap_or(locale)
        .to_lowercase()
}

/// First day of the week for a locale: 0 = Sunday .. 6 = Saturday.
///
/// Region-specific entries win over the language default; unknown
/// locales fall back to Sunday.
pub fn first_day_of_week(locale: &str) -> u8 {
    let normalized = locale.replace('_', "-").to_lowercase();
    if MONDAY_FIRST_REGIONS.contains(&normalized.as_str()) {
        return 1;
    }
    if MONDAY_FIRST_LANGUAGES.contains(&language(locale).as_str()) {
        return 1;
    }
    0
}

/// Sunday-first weekday abbreviations for a locale (English fallback)
fn weekday_set(locale: &str) -> &'static [&'static str; 7] {
    match language(locale).as_str() {
        "de" => &WEEKDAYS_DE,
        "fr" => &WEEKDAYS_FR,
        "es" => &WEEKDAYS_ES,
        "it" => &WEEKDAYS_IT,
        _ => &WEEKDAYS_EN,
    }
}

/// Localized abbreviation for a month, `month0` in 0..=11
pub fn month_abbrev(locale: &str, month0: usize) -> &'static str {
    let months = match language(locale).as_str() {
        "de" => &MONTHS_DE,
        "fr" => &MONTHS_FR,
        "es" => &MONTHS_ES,
        "it" => &MONTHS_IT,
        _ => &MONTHS_EN,
    };
    months[month0 % 12]
}

/// The seven weekday labels, rotated so the first entry is
/// `first_day_of_week` (0 = Sunday .. 6 = Saturday)
pub fn day_labels(locale: &str, first_day_of_week: u8) -> Vec<String> {
    let set = weekday_set(locale);
    (0..7)
        .map(|i| set[(first_day_of_week as usize + i) % 7].to_string())
        .collect()
}
