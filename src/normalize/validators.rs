use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

use crate::normalize::text::{clean_reply, contains_phrase, title_case};

pub const VIN_LENGTH: usize = 17;
pub const MAX_MILEAGE: u64 = 500_000;
pub const MIN_YEAR: u32 = 1900;
pub const MAX_YEAR: u32 = 2035;
pub const MAX_FLIGHT_HOURS: u64 = 100_000;

static VIN_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-HJ-NPR-Z0-9]{17}$").expect("vin pattern is valid"));

static RATING_SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\s+and\s+|[,/;]").expect("rating separator is valid"));

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[A-Za-z0-9._%+\-]+@[A-Za-z0-9.\-]+\.[A-Za-z]{2,}").expect("email pattern is valid")
});

const NAME_PREFIXES: &[&str] = &[
    "my name is",
    "my name's",
    "name is",
    "name's",
    "i'm",
    "i am",
    "im",
    "it's",
    "its",
    "this is",
    "call me",
    "they call me",
];

const GREETINGS: &[&str] = &["hi", "hello", "hey", "hiya"];

const AFFIRMATIVES: &[&str] = &[
    "yes",
    "y",
    "yeah",
    "yea",
    "yep",
    "yup",
    "sure",
    "ok",
    "okay",
    "correct",
    "right",
    "confirm",
    "confirmed",
    "i confirm",
    "absolutely",
    "definitely",
    "of course",
    "affirmative",
    "that's right",
    "that is right",
    "that's correct",
    "looks good",
    "looks right",
    "sounds good",
    "perfect",
];

const NEGATIVES: &[&str] = &[
    "no",
    "n",
    "nope",
    "nah",
    "not really",
    "not quite",
    "not correct",
    "incorrect",
    "wrong",
    "that's wrong",
    "that's not right",
    "change it",
    "edit",
    "fix it",
    "start over",
];

const VIN_SKIP_PHRASES: &[&str] = &["skip", "no"];
const VIN_MISSING_PHRASES: &[&str] = &["don't have", "dont have", "do not have"];

const DONE_PHRASES: &[&str] = &["done", "that's all", "thats all", "finished", "skip", "no more"];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VinError {
    #[error(
        "That VIN has invalid characters. VINs use letters and digits only, and never I, O or Q."
    )]
    InvalidCharacters,
    #[error("A VIN must be 17 characters. You entered {0}; could you double-check it?")]
    WrongLength(usize),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MileageError {
    #[error("I couldn't read that mileage. Try something like 45000 or 45k.")]
    NotNumeric,
    #[error("Mileage has to be between 0 and 500,000 miles.")]
    OutOfRange,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum YearError {
    #[error("I need a year, like 2019 or '98.")]
    Unparseable,
    #[error("That year doesn't look right. It should be between 1900 and 2035.")]
    OutOfRange,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EmailError {
    #[error("That doesn't look like an email address. Could you type it again?")]
    NotFound,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HoursError {
    #[error("How many total flight hours do you have? A number like 250 works.")]
    NotNumeric,
    #[error("Flight hours have to be between 0 and 100,000.")]
    OutOfRange,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    Affirm,
    Deny,
    Unclear,
}

/// Strict format check on an already-cleaned VIN; no case folding here.
pub fn validate_vin(vin: &str) -> Result<(), VinError> {
    let length = vin.chars().count();
    if length != VIN_LENGTH {
        return Err(VinError::WrongLength(length));
    }
    if !VIN_PATTERN.is_match(vin) {
        return Err(VinError::InvalidCharacters);
    }
    Ok(())
}

/// Strips whitespace and dashes and uppercases raw VIN input.
pub fn clean_vin(input: &str) -> String {
    input
        .chars()
        .filter(|ch| !ch.is_whitespace() && *ch != '-')
        .flat_map(char::to_uppercase)
        .collect()
}

/// `skip`/`no` as the reply itself, or "don't have" anywhere in it.
pub fn is_vin_skip(input: &str) -> bool {
    matches_phrase_set(VIN_SKIP_PHRASES, input)
        || VIN_MISSING_PHRASES
            .iter()
            .any(|phrase| contains_phrase(input, phrase))
}

pub fn parse_mileage(input: &str) -> Result<u64, MileageError> {
    let lowered = input.trim().to_lowercase();
    let stripped = lowered
        .trim_end_matches("miles")
        .trim_end_matches("mi")
        .trim();
    let compact: String = stripped
        .chars()
        .filter(|ch| !matches!(ch, ',' | '_' | ' '))
        .collect();

    let miles = if let Some(thousands) = compact.strip_suffix('k') {
        if thousands.is_empty() || !thousands.chars().all(|ch| ch.is_ascii_digit() || ch == '.') {
            return Err(MileageError::NotNumeric);
        }
        let value: f64 = thousands.parse().map_err(|_| MileageError::NotNumeric)?;
        (value * 1000.0).round() as u64
    } else {
        if compact.is_empty() || !compact.chars().all(|ch| ch.is_ascii_digit()) {
            return Err(MileageError::NotNumeric);
        }
        compact.parse().map_err(|_| MileageError::OutOfRange)?
    };

    if miles > MAX_MILEAGE {
        return Err(MileageError::OutOfRange);
    }
    Ok(miles)
}

/// Keeps digits only; two digits pivot at 30 (`05` -> 2005, `98` -> 1998).
pub fn clean_year(input: &str) -> Result<String, YearError> {
    let digits: String = input.chars().filter(char::is_ascii_digit).collect();
    match digits.len() {
        2 => {
            let short: u32 = digits.parse().map_err(|_| YearError::Unparseable)?;
            let century = if short <= 30 { 2000 } else { 1900 };
            Ok((century + short).to_string())
        }
        4 => {
            let year: u32 = digits.parse().map_err(|_| YearError::Unparseable)?;
            if (MIN_YEAR..=MAX_YEAR).contains(&year) {
                Ok(digits)
            } else {
                Err(YearError::OutOfRange)
            }
        }
        _ => Err(YearError::Unparseable),
    }
}

pub fn parse_name(input: &str) -> String {
    let mut rest = input.trim().trim_end_matches(['.', '!']).to_string();

    for greeting in GREETINGS {
        if let Some(stripped) = strip_prefix_word(&rest, greeting) {
            rest = stripped.trim_start_matches([',', '!']).trim().to_string();
            break;
        }
    }
    for prefix in NAME_PREFIXES {
        if let Some(stripped) = strip_prefix_word(&rest, prefix) {
            rest = stripped.to_string();
            break;
        }
    }

    title_case(&rest)
}

pub fn extract_email(input: &str) -> Result<String, EmailError> {
    EMAIL_PATTERN
        .find(input)
        .map(|found| found.as_str().to_lowercase())
        .ok_or(EmailError::NotFound)
}

pub fn is_affirmative(input: &str) -> bool {
    matches_phrase_set(AFFIRMATIVES, input)
}

pub fn is_negative(input: &str) -> bool {
    matches_phrase_set(NEGATIVES, input)
}

pub fn is_done(input: &str) -> bool {
    matches_phrase_set(DONE_PHRASES, input) || is_negative(input)
}

pub fn classify_confirmation(input: &str) -> Confirmation {
    if is_negative(input) {
        Confirmation::Deny
    } else if is_affirmative(input) {
        Confirmation::Affirm
    } else {
        Confirmation::Unclear
    }
}

pub fn parse_flight_hours(input: &str) -> Result<u64, HoursError> {
    let lowered = input.trim().to_lowercase();
    let stripped = lowered
        .trim_end_matches("hours")
        .trim_end_matches("hrs")
        .trim_end_matches("hr")
        .trim();
    let compact: String = stripped
        .chars()
        .filter(|ch| !matches!(ch, ',' | '_' | ' '))
        .collect();
    if compact.is_empty() || !compact.chars().all(|ch| ch.is_ascii_digit()) {
        return Err(HoursError::NotNumeric);
    }
    let hours: u64 = compact.parse().map_err(|_| HoursError::OutOfRange)?;
    if hours > MAX_FLIGHT_HOURS {
        return Err(HoursError::OutOfRange);
    }
    Ok(hours)
}

/// Splits on commas, slashes and the word "and"; each rating is kept in the
/// user's casing when it is an abbreviation, otherwise title-cased.
pub fn parse_ratings(input: &str) -> Vec<String> {
    RATING_SEPARATOR
        .split(input)
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| {
            if part.chars().all(|ch| ch.is_ascii_uppercase() || ch.is_ascii_digit()) {
                part.to_string()
            } else {
                title_case(part)
            }
        })
        .collect()
}

fn strip_prefix_word<'a>(text: &'a str, prefix: &str) -> Option<&'a str> {
    let lowered = text.to_lowercase();
    if !lowered.starts_with(prefix) {
        return None;
    }
    let rest = text.get(prefix.len()..)?;
    if rest.is_empty() || rest.starts_with([' ', ',']) {
        Some(rest.trim_start_matches(',').trim())
    } else {
        None
    }
}

/// Exact match, or the phrase followed by a space or comma.
fn matches_phrase_set(phrases: &[&str], input: &str) -> bool {
    let reply = clean_reply(input).replace('\u{2019}', "'");
    phrases.iter().any(|phrase| {
        reply == *phrase
            || reply.starts_with(&format!("{phrase} "))
            || reply.starts_with(&format!("{phrase},"))
    })
}
