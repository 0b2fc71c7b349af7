// ABOUTME: Lenient parsing of malformed RSS/Atom publish dates.
// ABOUTME: Classifies whitespace-separated tokens by shape and reassembles a fixed-format date.

use chrono::{DateTime, Duration, FixedOffset, NaiveDateTime, TimeZone, Utc};

use crate::error::TimeParseError;

/// Widest offset a real time zone carries, in minutes (UTC+14:00).
const MAX_OFFSET_MINUTES: i32 = 14 * 60;

/// Named time-zone abbreviations seen in the wild, with offsets in minutes.
/// Best-effort only: several of these names are ambiguous across regions
/// (CST alone names three real zones), so the table is a fixed lookup, not
/// a source of truth.
const ZONE_OFFSETS: &[(&str, i32)] = &[
    ("CST", -6 * 60),
    ("EDT", -4 * 60),
    ("EST", -5 * 60),
    ("GMT", 0),
    ("MDT", -6 * 60),
    ("MST", -7 * 60),
    ("PDT", -7 * 60),
    ("PST", -8 * 60),
    ("UT", 0),
    ("UTC", 0),
];

/// Date components a token can classify as, in canonical RFC-822 order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Component {
    DayOfWeek,
    Day,
    Month,
    Year,
    Time,
    Offset,
    Zone,
}

impl Component {
    /// The component ordinarily expected after this one.
    fn successor(self) -> Component {
        match self {
            Component::DayOfWeek => Component::Day,
            Component::Day => Component::Month,
            Component::Month => Component::Year,
            Component::Year => Component::Time,
            _ => Component::Offset,
        }
    }
}

/// Classifies one token by shape and position alone.
///
/// `suggestion` is the component expected at this position given what came
/// before; tokens with no distinctive shape fall back to it. Returns `None`
/// for a token that cannot be classified at all, which halts consumption.
fn classify(token: &str, suggestion: Component) -> Option<Component> {
    let first = token.chars().next()?;

    if first.is_ascii_digit() {
        return Some(match token.len() {
            1 | 2 => Component::Day,
            4 => Component::Year,
            8 => Component::Time,
            _ => suggestion,
        });
    }

    if first.is_ascii_alphabetic() {
        return Some(match token.len() {
            1 | 2 => Component::Zone,
            3 => {
                if token.chars().all(|c| c.is_ascii_uppercase()) {
                    Component::Zone
                } else if matches!(suggestion, Component::Day | Component::Month) {
                    // A mixed-case 3-letter token next to the day slot reads
                    // as a month name ("Thu Dec 6", "Tue, 01 Aug 2023").
                    Component::Month
                } else {
                    suggestion
                }
            }
            _ => {
                if token.chars().take(3).all(|c| c.is_ascii_uppercase()) {
                    Component::Zone
                } else if token.ends_with(',') {
                    Component::DayOfWeek
                } else {
                    Component::Month
                }
            }
        });
    }

    if first == '+' || first == '-' {
        return Some(Component::Offset);
    }

    None
}

/// Fixed slots for classified tokens. Later tokens of the same component
/// overwrite earlier ones; the day-of-week is collected but never parsed.
#[derive(Default)]
struct Slots<'a> {
    day: Option<&'a str>,
    month: Option<&'a str>,
    year: Option<&'a str>,
    time: Option<&'a str>,
    offset: Option<&'a str>,
    zone: Option<&'a str>,
}

impl<'a> Slots<'a> {
    fn set(&mut self, component: Component, token: &'a str) {
        match component {
            Component::DayOfWeek => {}
            Component::Day => self.day = Some(token),
            Component::Month => self.month = Some(token),
            Component::Year => self.year = Some(token),
            Component::Time => self.time = Some(token),
            Component::Offset => self.offset = Some(token),
            Component::Zone => self.zone = Some(token),
        }
    }

    fn assemble(&self) -> Result<DateTime<FixedOffset>, TimeParseError> {
        let (Some(day), Some(month), Some(year), Some(time)) =
            (self.day, self.month, self.year, self.time)
        else {
            return Err(TimeParseError::MissingComponents);
        };

        let assembled = format!("{day:0>2} {} {year} {time}", normalize_month(month));
        let naive = NaiveDateTime::parse_from_str(&assembled, "%d %b %Y %H:%M:%S")
            .map_err(|_| TimeParseError::Invalid(assembled.clone()))?;

        // A recognized zone abbreviation overrides any numeric offset;
        // unrecognized abbreviations leave the slot untouched, and nothing
        // at all means UTC.
        let minutes = match self.zone.and_then(zone_offset_minutes) {
            Some(m) => m,
            None => match self.offset {
                Some(token) => parse_numeric_offset(token)
                    .ok_or_else(|| TimeParseError::Invalid(token.to_string()))?,
                None => 0,
            },
        };

        if minutes.abs() > MAX_OFFSET_MINUTES {
            // Offsets no real zone can carry ("+1600"): roll the clock
            // forward by the offset amount and report the instant as UTC.
            let rolled = naive + Duration::minutes(i64::from(minutes));
            return Ok(Utc.from_utc_datetime(&rolled).fixed_offset());
        }

        let Some(offset) = FixedOffset::east_opt(minutes * 60) else {
            return Err(TimeParseError::Invalid(assembled));
        };
        match offset.from_local_datetime(&naive).single() {
            Some(dt) => Ok(dt),
            None => Err(TimeParseError::Invalid(assembled)),
        }
    }
}

/// Attempts to interpret a free-form feed timestamp.
///
/// Tokens are classified positionally (see [`classify`]) into day-of-week,
/// day, month, year, time, numeric offset, and named zone slots, then
/// reassembled into a `dd MMM yyyy HH:mm:ss` buffer and parsed. The first
/// unclassifiable token stops consumption; components collected before it
/// still count. Repairs non-standard weekday/month abbreviations, missing
/// zero padding, 3-letter zone names, and out-of-range numeric offsets.
///
/// Returns an error rather than a guessed timestamp when the input is
/// irrecoverably malformed.
pub fn parse_lenient_time(text: &str) -> Result<DateTime<FixedOffset>, TimeParseError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(TimeParseError::Empty);
    }

    let mut slots = Slots::default();
    let mut suggestion = Component::DayOfWeek;
    for token in trimmed.split_whitespace() {
        let Some(component) = classify(token, suggestion) else {
            break;
        };
        slots.set(component, token);
        suggestion = component.successor();
    }

    slots.assemble()
}

/// First three letters of the month token, normalized to `Jan` casing for
/// the `%b` parse.
fn normalize_month(token: &str) -> String {
    token
        .chars()
        .take(3)
        .enumerate()
        .map(|(i, c)| {
            if i == 0 {
                c.to_ascii_uppercase()
            } else {
                c.to_ascii_lowercase()
            }
        })
        .collect()
}

fn zone_offset_minutes(token: &str) -> Option<i32> {
    ZONE_OFFSETS
        .iter()
        .find(|(name, _)| token.eq_ignore_ascii_case(name))
        .map(|(_, minutes)| *minutes)
}

/// Parses a `+HHMM` / `-HH:MM` style offset token into minutes.
fn parse_numeric_offset(token: &str) -> Option<i32> {
    let (sign, body) = match token.split_at(1) {
        ("+", rest) => (1, rest),
        ("-", rest) => (-1, rest),
        _ => return None,
    };

    let digits: String = body.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.len() != body.chars().filter(|c| *c != ':').count() {
        return None;
    }

    let (hours, minutes): (i32, i32) = match digits.len() {
        4 => (digits[..2].parse().ok()?, digits[2..].parse().ok()?),
        1 | 2 => (digits.parse().ok()?, 0),
        _ => return None,
    };
    Some(sign * (hours * 60 + minutes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn local(dt: &DateTime<FixedOffset>) -> NaiveDateTime {
        dt.naive_local()
    }

    #[test]
    fn test_ctime_with_named_zone() {
        // Unix ctime order with the year last and a double space.
        let dt = parse_lenient_time("Thu Dec  6 23:40:09 MST 2018").unwrap();
        assert_eq!(
            local(&dt),
            NaiveDate::from_ymd_opt(2018, 12, 6).unwrap().and_hms_opt(23, 40, 9).unwrap()
        );
        assert_eq!(dt.offset().local_minus_utc(), -7 * 3600);
    }

    #[test]
    fn test_out_of_range_offset_rolls_forward() {
        let dt = parse_lenient_time("Tue, 01 Aug 2023 11:23:32 +1600").unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2023, 8, 2, 3, 23, 32).unwrap());
        assert_eq!(dt.offset().local_minus_utc(), 0);
    }

    #[test]
    fn test_rfc822_with_numeric_offset() {
        let dt = parse_lenient_time("Mon, 02 Jan 2006 15:04:05 -0700").unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2006, 1, 2, 22, 4, 5).unwrap());
        assert_eq!(dt.offset().local_minus_utc(), -7 * 3600);
    }

    #[test]
    fn test_single_digit_day_padded() {
        let dt = parse_lenient_time("Wed, 9 Aug 2023 07:05:16 GMT").unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2023, 8, 9, 7, 5, 16).unwrap());
    }

    #[test]
    fn test_unknown_zone_defaults_to_utc() {
        let dt = parse_lenient_time("Thu, 10 Aug 2023 12:00:00 XYZ").unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2023, 8, 10, 12, 0, 0).unwrap());
    }

    #[test]
    fn test_no_zone_assumes_utc() {
        let dt = parse_lenient_time("Tue, 01 Aug 2023 11:23:32").unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2023, 8, 1, 11, 23, 32).unwrap());
    }

    #[test]
    fn test_stops_at_unclassifiable_token() {
        // "(sometime)" cannot classify; everything before it still counts.
        let dt = parse_lenient_time("Tue, 01 Aug 2023 11:23:32 (sometime)").unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2023, 8, 1, 11, 23, 32).unwrap());
    }

    #[test]
    fn test_empty_is_an_error() {
        assert_eq!(parse_lenient_time(""), Err(TimeParseError::Empty));
        assert_eq!(parse_lenient_time("   "), Err(TimeParseError::Empty));
    }

    #[test]
    fn test_word_salad_is_missing_components() {
        assert_eq!(
            parse_lenient_time("not a date"),
            Err(TimeParseError::MissingComponents)
        );
    }

    #[test]
    fn test_garbage_components_are_invalid() {
        // Classifies fully ("99" as day) but the fixed-format parse rejects it.
        let result = parse_lenient_time("Tue, 99 Aug 2023 11:23:32");
        assert!(matches!(result, Err(TimeParseError::Invalid(_))));
    }

    #[test]
    fn test_classify_is_pure() {
        assert_eq!(classify("Tue,", Component::DayOfWeek), Some(Component::DayOfWeek));
        assert_eq!(classify("Aug", Component::Month), Some(Component::Month));
        assert_eq!(classify("MST", Component::Year), Some(Component::Zone));
        assert_eq!(classify("2023", Component::DayOfWeek), Some(Component::Year));
        assert_eq!(classify("+0200", Component::DayOfWeek), Some(Component::Offset));
        assert_eq!(classify("(x)", Component::DayOfWeek), None);
    }
}
