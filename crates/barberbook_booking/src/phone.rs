// --- File: crates/barberbook_booking/src/phone.rs ---
//! UK-leaning phone heuristics. Nothing here checks that a number exists;
//! it only keeps what people type readable and plausibly long enough.

pub const MIN_PHONE_DIGITS: usize = 10;
pub const MAX_PHONE_DIGITS: usize = 13;

pub const PHONE_HINT: &str = "Enter a UK mobile number.";

pub fn digits_only(raw: &str) -> String {
    raw.chars().filter(char::is_ascii_digit).collect()
}

/// Between 10 and 13 digits, separators ignored.
pub fn is_phone_valid(raw: &str) -> bool {
    (MIN_PHONE_DIGITS..=MAX_PHONE_DIGITS).contains(&digits_only(raw).len())
}

/// Groups a number the way it is read aloud in the UK.
///
/// `+44` numbers become `+44 7700 900 123`, other international numbers
/// are left as `+` and digits, and national numbers become `07700 900 123`
/// (anything past 11 digits is dropped). Applying it twice changes nothing.
pub fn format_uk_phone(raw: &str) -> String {
    let digits = digits_only(raw);

    if raw.contains('+') {
        return match digits.strip_prefix("44") {
            Some(rest) if digits.len() >= 12 => {
                group("+44", rest, &[(0, 4), (4, 7), (7, 10), (10, 13)])
            }
            _ => format!("+{digits}"),
        };
    }

    group("", &digits, &[(0, 5), (5, 8), (8, 11)])
}

fn group(prefix: &str, digits: &str, ranges: &[(usize, usize)]) -> String {
    let mut parts: Vec<&str> = Vec::with_capacity(ranges.len() + 1);
    if !prefix.is_empty() {
        parts.push(prefix);
    }
    for &(start, end) in ranges {
        let chunk = slice(digits, start, end);
        if !chunk.is_empty() {
            parts.push(chunk);
        }
    }
    parts.join(" ")
}

// `digits` is ASCII, so byte offsets are char offsets.
fn slice(digits: &str, start: usize, end: usize) -> &str {
    let len = digits.len();
    &digits[start.min(len)..end.min(len)]
}

/// The message shown under the phone field, if any.
pub fn phone_hint(raw: &str) -> Option<&'static str> {
    (!raw.trim().is_empty() && !is_phone_valid(raw)).then_some(PHONE_HINT)
}
