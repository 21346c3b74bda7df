//! Field names and line classification.

use crate::error::{Error, Result};
use chrono::{NaiveDateTime, Timelike};

/// Line ending a multi-line field or separating field blocks.
pub const FIELD_SEPARATOR: &str = "-----";

/// Line ending a record.
pub const RECORD_SEPARATOR: &str = "--------";

/// Delimiter between key and value on a single-line field.
const KEY_VALUE_DELIMITER: &str = ": ";

/// Date layout with a 12-hour clock.
const DATE_FORMAT_12H: &str = "%m/%d/%Y %I:%M:%S %p";

/// Date layout with a 24-hour clock.
const DATE_FORMAT_24H: &str = "%m/%d/%Y %H:%M:%S";

/// Fixed-width shape of the date and time part; `0` stands for any digit.
const DATE_SHAPE: &[u8] = b"00/00/0000 00:00:00";

const LAYOUT_12H: &str = "MM/DD/YYYY hh:mm:ss AM|PM";
const LAYOUT_24H: &str = "MM/DD/YYYY HH:mm:ss";

/// Fields whose content spans several lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MultilineField {
    /// `BODY:`
    Body,
    /// `EXTENDED BODY:`
    ExtendedBody,
    /// `EXCERPT:`
    Excerpt,
    /// `KEYWORDS:`
    Keywords,
    /// `COMMENT:`
    Comment,
}

impl MultilineField {
    /// Matches a line that opens a multi-line field.
    ///
    /// The line must be exactly the field name followed by a colon.
    #[must_use]
    pub fn from_header(line: &str) -> Option<Self> {
        match line {
            "BODY:" => Some(Self::Body),
            "EXTENDED BODY:" => Some(Self::ExtendedBody),
            "EXCERPT:" => Some(Self::Excerpt),
            "KEYWORDS:" => Some(Self::Keywords),
            "COMMENT:" => Some(Self::Comment),
            _ => None,
        }
    }

    /// Returns the field name as written in the export format.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Body => "BODY",
            Self::ExtendedBody => "EXTENDED BODY",
            Self::Excerpt => "EXCERPT",
            Self::Keywords => "KEYWORDS",
            Self::Comment => "COMMENT",
        }
    }
}

/// Keys recognized on single-line fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderKey {
    /// `AUTHOR`
    Author,
    /// `TITLE`
    Title,
    /// `BASENAME`
    Basename,
    /// `STATUS`
    Status,
    /// `ALLOW COMMENTS`
    AllowComments,
    /// `ALLOW PINGS`
    AllowPings,
    /// `CONVERT BREAKS`
    ConvertBreaks,
    /// `DATE`
    Date,
    /// `PRIMARY CATEGORY`
    PrimaryCategory,
    /// `CATEGORY`
    Category,
    /// `IMAGE`
    Image,
}

impl HeaderKey {
    /// Looks up a key. Unknown keys return `None`.
    #[must_use]
    pub fn parse(key: &str) -> Option<Self> {
        let key = match key {
            "AUTHOR" => Self::Author,
            "TITLE" => Self::Title,
            "BASENAME" => Self::Basename,
            "STATUS" => Self::Status,
            "ALLOW COMMENTS" => Self::AllowComments,
            "ALLOW PINGS" => Self::AllowPings,
            "CONVERT BREAKS" => Self::ConvertBreaks,
            "DATE" => Self::Date,
            "PRIMARY CATEGORY" => Self::PrimaryCategory,
            "CATEGORY" => Self::Category,
            "IMAGE" => Self::Image,
            _ => return None,
        };
        Some(key)
    }

    /// Returns the key as written in the export format.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Author => "AUTHOR",
            Self::Title => "TITLE",
            Self::Basename => "BASENAME",
            Self::Status => "STATUS",
            Self::AllowComments => "ALLOW COMMENTS",
            Self::AllowPings => "ALLOW PINGS",
            Self::ConvertBreaks => "CONVERT BREAKS",
            Self::Date => "DATE",
            Self::PrimaryCategory => "PRIMARY CATEGORY",
            Self::Category => "CATEGORY",
            Self::Image => "IMAGE",
        }
    }
}

/// Classification of a line read outside a multi-line field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Line<'a> {
    /// `-----`
    FieldSeparator,
    /// `--------`
    RecordSeparator,
    /// Opening line of a multi-line field.
    MultilineStart(MultilineField),
    /// `KEY: value`, split at the first delimiter.
    KeyValue {
        /// Text before the first `": "`.
        key: &'a str,
        /// Text after the first `": "`.
        value: &'a str,
    },
    /// Anything else.
    Other,
}

impl<'a> Line<'a> {
    /// Classifies a line with its line ending already removed.
    #[must_use]
    pub fn classify(line: &'a str) -> Self {
        if line == FIELD_SEPARATOR {
            return Self::FieldSeparator;
        }
        if line == RECORD_SEPARATOR {
            return Self::RecordSeparator;
        }
        if let Some(field) = MultilineField::from_header(line) {
            return Self::MultilineStart(field);
        }
        line.split_once(KEY_VALUE_DELIMITER)
            .map_or(Self::Other, |(key, value)| Self::KeyValue { key, value })
    }
}

/// Parses an `ALLOW COMMENTS` / `ALLOW PINGS` value.
///
/// # Errors
///
/// Returns an error if the value is not an integer or is neither 0 nor 1.
pub fn parse_flag(key: HeaderKey, value: &str) -> Result<i32> {
    let parsed: i64 = value.parse().map_err(|source| Error::InvalidFlag {
        key: key.as_str(),
        source,
    })?;
    match parsed {
        0 => Ok(0),
        1 => Ok(1),
        other => Err(Error::FlagOutOfRange {
            key: key.as_str(),
            value: other,
        }),
    }
}

/// Parses a `DATE` value.
///
/// Values ending in `AM` or `PM` use the 12-hour layout
/// `MM/DD/YYYY hh:mm:ss AM`; anything else uses `MM/DD/YYYY HH:mm:ss`.
/// Every numeric field is zero-padded to its full width and fields are
/// separated by exactly one character.
///
/// # Errors
///
/// Returns an error if the value does not match the selected layout.
pub fn parse_date(value: &str) -> Result<NaiveDateTime> {
    let twelve_hour = value.ends_with("AM") || value.ends_with("PM");
    let (format, layout) = if twelve_hour {
        (DATE_FORMAT_12H, LAYOUT_12H)
    } else {
        (DATE_FORMAT_24H, LAYOUT_24H)
    };
    let layout_error = || Error::DateLayout {
        value: value.to_string(),
        layout,
    };

    if !has_date_shape(value, twelve_hour) {
        return Err(layout_error());
    }
    let date = NaiveDateTime::parse_from_str(value, format).map_err(|source| {
        Error::InvalidDate {
            value: value.to_string(),
            source,
        }
    })?;
    // chrono reads second 60 as a leap second.
    if date.nanosecond() >= 1_000_000_000 {
        return Err(layout_error());
    }
    Ok(date)
}

fn has_date_shape(value: &str, twelve_hour: bool) -> bool {
    let stamp = if twelve_hour {
        match value
            .strip_suffix(" AM")
            .or_else(|| value.strip_suffix(" PM"))
        {
            Some(stamp) => stamp,
            None => return false,
        }
    } else {
        value
    };
    stamp.len() == DATE_SHAPE.len()
        && stamp
            .bytes()
            .zip(DATE_SHAPE)
            .all(|(byte, &expected)| match expected {
                b'0' => byte.is_ascii_digit(),
                _ => byte == expected,
            })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_classify_separators() {
        assert_eq!(Line::classify("-----"), Line::FieldSeparator);
        assert_eq!(Line::classify("--------"), Line::RecordSeparator);
        assert_eq!(Line::classify("------"), Line::Other);
        assert_eq!(Line::classify(""), Line::Other);
    }

    #[test]
    fn test_classify_multiline_start() {
        assert_eq!(
            Line::classify("EXTENDED BODY:"),
            Line::MultilineStart(MultilineField::ExtendedBody)
        );
        assert_eq!(
            Line::classify("COMMENT:"),
            Line::MultilineStart(MultilineField::Comment)
        );
        // Trailing text makes it a plain key/value line.
        assert_eq!(
            Line::classify("BODY: inline"),
            Line::KeyValue {
                key: "BODY",
                value: "inline"
            }
        );
        assert_eq!(Line::classify("body:"), Line::Other);
    }

    #[test]
    fn test_classify_key_value_splits_at_first_delimiter() {
        assert_eq!(
            Line::classify("TITLE: Rust: a primer"),
            Line::KeyValue {
                key: "TITLE",
                value: "Rust: a primer"
            }
        );
        assert_eq!(
            Line::classify("EMAIL: "),
            Line::KeyValue {
                key: "EMAIL",
                value: ""
            }
        );
        assert_eq!(Line::classify("TITLE:no-space"), Line::Other);
    }

    #[test]
    fn test_header_key_lookup() {
        assert_eq!(HeaderKey::parse("ALLOW PINGS"), Some(HeaderKey::AllowPings));
        assert_eq!(HeaderKey::parse("CATEGORY"), Some(HeaderKey::Category));
        assert_eq!(HeaderKey::parse("Category"), None);
        assert_eq!(HeaderKey::parse("UNKNOWN FIELD"), None);
        assert_eq!(HeaderKey::PrimaryCategory.as_str(), "PRIMARY CATEGORY");
    }

    #[test]
    fn test_multiline_field_name() {
        for field in [
            MultilineField::Body,
            MultilineField::ExtendedBody,
            MultilineField::Excerpt,
            MultilineField::Keywords,
            MultilineField::Comment,
        ] {
            let header = format!("{}:", field.name());
            assert_eq!(MultilineField::from_header(&header), Some(field));
        }
    }

    #[test]
    fn test_parse_flag() {
        assert_eq!(parse_flag(HeaderKey::AllowComments, "0").unwrap(), 0);
        assert_eq!(parse_flag(HeaderKey::AllowComments, "1").unwrap(), 1);

        let err = parse_flag(HeaderKey::AllowPings, "2").unwrap_err();
        assert!(matches!(
            err,
            Error::FlagOutOfRange {
                key: "ALLOW PINGS",
                value: 2
            }
        ));

        let err = parse_flag(HeaderKey::AllowComments, "-1").unwrap_err();
        assert!(matches!(err, Error::FlagOutOfRange { value: -1, .. }));

        let err = parse_flag(HeaderKey::AllowComments, "yes").unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidFlag {
                key: "ALLOW COMMENTS",
                ..
            }
        ));
    }

    #[test]
    fn test_parse_date_both_clocks() {
        let expected = NaiveDate::from_ymd_opt(2017, 4, 22)
            .unwrap()
            .and_hms_opt(20, 41, 58)
            .unwrap();
        assert_eq!(parse_date("04/22/2017 08:41:58 PM").unwrap(), expected);
        assert_eq!(parse_date("04/22/2017 20:41:58").unwrap(), expected);

        let morning = NaiveDate::from_ymd_opt(2017, 4, 22)
            .unwrap()
            .and_hms_opt(8, 41, 58)
            .unwrap();
        assert_eq!(parse_date("04/22/2017 08:41:58 AM").unwrap(), morning);
    }

    #[test]
    fn test_parse_date_rejects_iso() {
        let err = parse_date("2023-01-02 15:30:45").unwrap_err();
        assert!(matches!(err, Error::DateLayout { ref value, .. } if value == "2023-01-02 15:30:45"));
        assert!(err.to_string().starts_with("Parsing error on DATE column: "));
    }

    #[test]
    fn test_parse_date_rejects_24h_with_suffix() {
        let err = parse_date("04/22/2017 20:41:58 PM").unwrap_err();
        assert!(matches!(err, Error::InvalidDate { .. }));
    }

    #[test]
    fn test_parse_date_requires_fixed_width_fields() {
        for input in [
            "4/22/2017 20:41:58",
            "04/22/17 20:41:58",
            "04/22/2017  20:41:58",
            " 04/22/2017 20:41:58",
            "04/22/2017 8:41:58 PM",
            "04/22/2017 08:41:58PM",
            "04/22/2017 08:41:58  PM",
            "04/22/2017T20:41:58",
        ] {
            let err = parse_date(input).unwrap_err();
            assert!(
                matches!(err, Error::DateLayout { ref value, .. } if value == input),
                "accepted {input:?}"
            );
            assert!(err.to_string().starts_with("Parsing error on DATE column: "));
        }
    }

    #[test]
    fn test_parse_date_rejects_leap_second() {
        let err = parse_date("04/22/2017 20:41:60").unwrap_err();
        assert!(matches!(err, Error::DateLayout { layout: LAYOUT_24H, .. }));

        let err = parse_date("04/22/2017 08:41:60 PM").unwrap_err();
        assert!(matches!(err, Error::DateLayout { layout: LAYOUT_12H, .. }));
    }

    #[test]
    fn test_parse_date_rejects_out_of_range_fields() {
        for value in ["13/22/2017 20:41:58", "04/31/2017 20:41:58", "04/22/2017 24:00:00"] {
            assert!(matches!(parse_date(value), Err(Error::InvalidDate { .. })), "{value:?}");
        }
    }
}
