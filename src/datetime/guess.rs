//! Format detection: literal text -> strptime-style pattern.
//!
//! The analysis layer only depends on [`FormatDetector`]. [`FormatGuesser`]
//! is the built-in implementation: it tokenizes the sample into digit runs,
//! words and separators, derives the directives each token could stand for,
//! and returns the first combination (in preference order) that chrono
//! accepts.

use crate::datetime::parse::{materialize, matches_pattern};

/// Given a literal sample, propose a strptime-style pattern or give up.
pub trait FormatDetector: Send + Sync {
    fn detect_format(&self, text: &str) -> Option<String>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct FormatGuesser;

impl FormatDetector for FormatGuesser {
    fn detect_format(&self, text: &str) -> Option<String> {
        if !plausible(text) {
            return None;
        }
        let tokens = tokenize(text)?;
        let slots = classify(&tokens)?;
        first_valid(&slots, text)
    }
}

const MAX_LEN: usize = 64;
const MAX_COMBINATIONS: usize = 4096;
const SEPARATORS: [char; 8] = [' ', '-', '/', '.', ',', ':', '+', '\t'];

const MONTHS: [&str; 12] = [
    "january", "february", "march", "april", "may", "june", "july", "august", "september",
    "october", "november", "december",
];
const WEEKDAYS: [&str; 7] = [
    "monday", "tuesday", "wednesday", "thursday", "friday", "saturday", "sunday",
];
const ZONE_WORDS: [&str; 4] = ["T", "Z", "UTC", "GMT"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token<'a> {
    Digits(&'a str),
    Word(&'a str),
    Sep(char),
}

/// One position in the pattern being assembled.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Slot {
    Lit(String),
    Fixed(&'static str),
    Choice(Vec<&'static str>),
}

impl Slot {
    fn options(&self) -> Vec<&str> {
        match self {
            Slot::Lit(text) => vec![text.as_str()],
            Slot::Fixed(directive) => vec![*directive],
            Slot::Choice(options) => options.clone(),
        }
    }
}

fn plausible(text: &str) -> bool {
    let (Some(first), Some(last)) = (text.chars().next(), text.chars().last()) else {
        return false;
    };
    text.len() <= MAX_LEN && first.is_ascii_alphanumeric() && last.is_ascii_alphanumeric()
}

fn tokenize(text: &str) -> Option<Vec<Token<'_>>> {
    let bytes = text.as_bytes();
    let mut tokens = Vec::new();
    let mut i = 0;
    while i < bytes.len() {
        let start = i;
        let b = bytes[i];
        if b.is_ascii_digit() {
            while i < bytes.len() && bytes[i].is_ascii_digit() {
                i += 1;
            }
            tokens.push(Token::Digits(&text[start..i]));
        } else if b.is_ascii_alphabetic() {
            while i < bytes.len() && bytes[i].is_ascii_alphabetic() {
                i += 1;
            }
            tokens.push(Token::Word(&text[start..i]));
        } else if SEPARATORS.contains(&char::from(b)) {
            tokens.push(Token::Sep(char::from(b)));
            i += 1;
        } else {
            return None;
        }
    }

    // "1,234" is a grouped number, not a date.
    let grouped = tokens.windows(3).any(|w| {
        matches!(w, [Token::Digits(_), Token::Sep(','), Token::Digits(_)])
    });
    if grouped { None } else { Some(tokens) }
}

fn word_slot(word: &str) -> Option<Slot> {
    let lower = word.to_ascii_lowercase();
    if MONTHS.contains(&lower.as_str()) {
        return Some(Slot::Fixed("%B"));
    }
    if lower.len() == 3 && MONTHS.iter().any(|m| m.starts_with(&lower)) {
        return Some(Slot::Fixed("%b"));
    }
    if WEEKDAYS.contains(&lower.as_str()) {
        return Some(Slot::Fixed("%A"));
    }
    if lower.len() == 3 && WEEKDAYS.iter().any(|d| d.starts_with(&lower)) {
        return Some(Slot::Fixed("%a"));
    }
    if lower == "am" || lower == "pm" {
        return Some(Slot::Fixed("%p"));
    }
    if ZONE_WORDS.contains(&word) {
        return Some(Slot::Lit(word.to_string()));
    }
    None
}

/// Digit runs joined by one repeated separator, starting at `tokens[0]`.
///
/// Returns the parts, the separator (None for a lone run) and how many
/// tokens were consumed.
fn joined_run<'a>(tokens: &[Token<'a>]) -> (Vec<&'a str>, Option<char>, usize) {
    let Some(Token::Digits(first)) = tokens.first() else {
        return (Vec::new(), None, 0);
    };
    let mut parts = vec![*first];
    let mut sep = None;
    let mut j = 1;
    while let (Some(Token::Sep(c)), Some(Token::Digits(next))) = (tokens.get(j), tokens.get(j + 1)) {
        if !matches!(*c, ':' | '-' | '/' | '.') || sep.is_some_and(|s| s != *c) {
            break;
        }
        sep = Some(*c);
        parts.push(*next);
        j += 2;
    }
    (parts, sep, j)
}

/// Tokens making up a `+hhmm` / `+hh:mm` offset after the sign.
fn offset_len(tokens: &[Token<'_>]) -> Option<usize> {
    match tokens {
        [Token::Digits(d), ..] if d.len() == 4 => Some(1),
        [Token::Digits(h), Token::Sep(':'), Token::Digits(m), ..] if h.len() == 2 && m.len() == 2 => {
            Some(3)
        }
        _ => None,
    }
}

fn classify(tokens: &[Token<'_>]) -> Option<Vec<Slot>> {
    let meridiem = tokens
        .iter()
        .any(|t| matches!(t, Token::Word(w) if w.eq_ignore_ascii_case("am") || w.eq_ignore_ascii_case("pm")));
    let hour = if meridiem { "%I" } else { "%H" };

    let mut slots = Vec::new();
    let mut time_seen = false;
    let mut i = 0;
    while i < tokens.len() {
        match tokens[i] {
            Token::Word(word) => {
                slots.push(word_slot(word)?);
                i += 1;
            }
            Token::Sep(c) => {
                if time_seen && (c == '+' || c == '-') {
                    if let Some(consumed) = offset_len(&tokens[i + 1..]) {
                        slots.push(Slot::Fixed("%z"));
                        i += 1 + consumed;
                        continue;
                    }
                }
                slots.push(Slot::Lit(c.to_string()));
                i += 1;
            }
            Token::Digits(digits) => {
                let (parts, sep, consumed) = joined_run(&tokens[i..]);
                match sep {
                    Some(':') => {
                        time_group(&parts, hour, &mut slots)?;
                        time_seen = true;
                        i += consumed;
                        if parts.len() == 3 {
                            if let (Some(Token::Sep('.')), Some(Token::Digits(_))) =
                                (tokens.get(i), tokens.get(i + 1))
                            {
                                slots.push(Slot::Lit(".".to_string()));
                                slots.push(Slot::Fixed("%f"));
                                i += 2;
                            }
                        }
                    }
                    Some(sep) => {
                        date_group(&parts, sep, &mut slots)?;
                        i += consumed;
                    }
                    None => {
                        let after_point = i > 0 && tokens[i - 1] == Token::Sep('.');
                        let before_point = tokens.get(i + 1) == Some(&Token::Sep('.'));
                        if after_point || before_point {
                            return None;
                        }
                        slots.push(standalone(digits, meridiem)?);
                        i += 1;
                    }
                }
            }
        }
    }
    Some(slots)
}

fn time_group(parts: &[&str], hour: &'static str, slots: &mut Vec<Slot>) -> Option<()> {
    if !(2..=3).contains(&parts.len()) || parts.iter().any(|p| p.len() > 2) {
        return None;
    }
    let fields = [hour, "%M", "%S"];
    for (k, field) in fields.iter().take(parts.len()).enumerate() {
        if k > 0 {
            slots.push(Slot::Lit(":".to_string()));
        }
        slots.push(Slot::Fixed(*field));
    }
    Some(())
}

fn date_group(parts: &[&str], sep: char, slots: &mut Vec<Slot>) -> Option<()> {
    // Dotted dates are read day first.
    let day_month: Vec<&'static str> = if sep == '.' {
        vec!["%d", "%m"]
    } else {
        vec!["%m", "%d"]
    };
    let lens: Vec<usize> = parts.iter().map(|p| p.len()).collect();
    let short = |n: &usize| (1..=2).contains(n);

    let fields: Vec<Slot> = match lens.as_slice() {
        [4, b, c] if short(b) && short(c) => vec![
            Slot::Fixed("%Y"),
            Slot::Choice(vec!["%m", "%d"]),
            Slot::Choice(vec!["%d", "%m"]),
        ],
        [a, b, 4] if short(a) && short(b) => vec![
            Slot::Choice(day_month.clone()),
            Slot::Choice(day_month.clone()),
            Slot::Fixed("%Y"),
        ],
        [a, b, c] if short(a) && short(b) && short(c) => {
            let mut with_year = day_month.clone();
            with_year.push("%y");
            vec![
                Slot::Choice(with_year.clone()),
                Slot::Choice(with_year.clone()),
                Slot::Choice(with_year),
            ]
        }
        // Two dotted parts are a decimal number.
        [_, _] if sep == '.' => return None,
        [4, b] if short(b) => vec![Slot::Fixed("%Y"), Slot::Fixed("%m")],
        [a, 4] if short(a) => vec![Slot::Fixed("%m"), Slot::Fixed("%Y")],
        [a, b] if short(a) && short(b) => vec![
            Slot::Choice(day_month.clone()),
            Slot::Choice(day_month),
        ],
        _ => return None,
    };

    for (k, field) in fields.into_iter().enumerate() {
        if k > 0 {
            slots.push(Slot::Lit(sep.to_string()));
        }
        slots.push(field);
    }
    Some(())
}

fn standalone(digits: &str, meridiem: bool) -> Option<Slot> {
    let slot = match digits.len() {
        14 => Slot::Fixed("%Y%m%d%H%M%S"),
        12 => Slot::Fixed("%Y%m%d%H%M"),
        8 => Slot::Fixed("%Y%m%d"),
        4 => Slot::Fixed("%Y"),
        3 => Slot::Fixed("%j"),
        1 | 2 if meridiem => Slot::Choice(vec!["%I", "%d", "%m", "%y", "%M", "%S"]),
        1 | 2 => Slot::Choice(vec!["%d", "%m", "%y", "%H", "%M", "%S"]),
        _ => return None,
    };
    Some(slot)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Year,
    Month,
    Day,
    Hour,
    Minute,
    Second,
    Fraction,
    Weekday,
    Meridiem,
    Offset,
}

fn fields_of(directive: char) -> &'static [Field] {
    match directive {
        'Y' | 'y' => &[Field::Year],
        'm' | 'b' | 'B' => &[Field::Month],
        'd' => &[Field::Day],
        // Day of year pins both month and day.
        'j' => &[Field::Month, Field::Day],
        'H' | 'I' => &[Field::Hour],
        'M' => &[Field::Minute],
        'S' => &[Field::Second],
        'f' => &[Field::Fraction],
        'a' | 'A' => &[Field::Weekday],
        'p' => &[Field::Meridiem],
        'z' => &[Field::Offset],
        _ => &[],
    }
}

fn first_valid(slots: &[Slot], text: &str) -> Option<String> {
    let options: Vec<Vec<&str>> = slots.iter().map(Slot::options).collect();
    let total = options
        .iter()
        .try_fold(1usize, |acc, o| acc.checked_mul(o.len()))?;
    if total == 0 || total > MAX_COMBINATIONS {
        return None;
    }

    let mut index = vec![0usize; options.len()];
    for _ in 0..total {
        let picked: Vec<&str> = options.iter().zip(&index).map(|(o, &k)| o[k]).collect();
        if let Some(pattern) = accept(&picked, text) {
            return Some(pattern);
        }
        // Last slot varies fastest so earlier slots keep their preferred option longest.
        for pos in (0..index.len()).rev() {
            index[pos] += 1;
            if index[pos] < options[pos].len() {
                break;
            }
            index[pos] = 0;
        }
    }
    None
}

fn accept(picked: &[&str], text: &str) -> Option<String> {
    let mut seen: Vec<Field> = Vec::new();
    for piece in picked.iter().filter(|p| p.starts_with('%')) {
        for directive in piece.split('%').filter_map(|d| d.chars().next()) {
            for field in fields_of(directive) {
                if seen.contains(field) {
                    return None;
                }
                seen.push(*field);
            }
        }
    }
    if seen.is_empty() {
        return None;
    }

    let pattern = picked.concat();
    if !matches_pattern(text, &pattern) {
        return None;
    }
    // A weekday only agrees with the real date; without one there is no date to check.
    if !seen.contains(&Field::Weekday) && materialize(text, &pattern).is_none() {
        return None;
    }
    Some(pattern)
}
