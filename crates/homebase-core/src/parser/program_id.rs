//! Slot identifier parser
//!
//! Every guide entry links to its slot as `DATE/CHANNEL/START-END`, for
//! example `20110629/nrktv1/20110629204500-20110629205500`. The whole string
//! is the program identifier used by the record endpoint and the storage page.

use chrono::{NaiveDate, NaiveDateTime};

use crate::error::{HomebaseError, Result};
use crate::types::Program;

/// Date format of the first identifier segment
const DATE_FORMAT: &str = "%Y%m%d";

/// Timestamp format of the start and end in the last segment
const TIMESTAMP_FORMAT: &str = "%Y%m%d%H%M%S";

/// Parse a slot identifier and its display title into a [`Program`].
///
/// # Errors
/// `HomebaseError::ParseError` when the identifier does not split into
/// exactly three `/` parts and two `-` timestamps, or when the date or
/// timestamps are not in `YYYYMMDD` / `YYYYMMDDHHMMSS` form.
///
/// # Examples
/// ```
/// use homebase_core::parser::parse_program_id;
///
/// let program = parse_program_id(
///     "20110629/nrktv1/20110629204500-20110629205500",
///     "Dagsrevyen",
/// ).unwrap();
/// assert_eq!(program.channel, "nrktv1");
/// assert_eq!(program.start.to_string(), "2011-06-29 20:45:00");
/// ```
pub fn parse_program_id(raw: &str, title: &str) -> Result<Program> {
    let parts: Vec<&str> = raw.split('/').collect();
    let [date, channel, range] = parts.as_slice() else {
        return Err(HomebaseError::ParseError(format!(
            "expected DATE/CHANNEL/START-END, got {:?}",
            raw
        )));
    };

    let times: Vec<&str> = range.split('-').collect();
    let [start, end] = times.as_slice() else {
        return Err(HomebaseError::ParseError(format!(
            "expected START-END time range in {:?}",
            raw
        )));
    };

    Ok(Program {
        id: raw.to_string(),
        channel: channel.to_string(),
        date: parse_date(date)?,
        start: parse_timestamp(start)?,
        end: parse_timestamp(end)?,
        title: title.to_string(),
    })
}

fn parse_date(text: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(text, DATE_FORMAT)
        .map_err(|e| HomebaseError::ParseError(format!("bad date {:?}: {}", text, e)))
}

fn parse_timestamp(text: &str) -> Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(text, TIMESTAMP_FORMAT)
        .map_err(|e| HomebaseError::ParseError(format!("bad timestamp {:?}: {}", text, e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_parse_program_id_basic() {
        let program =
            parse_program_id("20110629/nrktv1/20110629204500-20110629205500", "Dagsrevyen")
                .unwrap();

        assert_eq!(program.id, "20110629/nrktv1/20110629204500-20110629205500");
        assert_eq!(program.channel, "nrktv1");
        assert_eq!(program.date, NaiveDate::from_ymd_opt(2011, 6, 29).unwrap());
        assert_eq!(program.start.format("%H:%M").to_string(), "20:45");
        assert_eq!(program.end.format("%H:%M").to_string(), "20:55");
        assert_eq!(program.title, "Dagsrevyen");
    }

    #[test]
    fn test_parse_program_id_past_midnight() {
        let program =
            parse_program_id("20110629/tv2/20110629234500-20110630003000", "Nattkino").unwrap();
        assert_eq!(program.date, NaiveDate::from_ymd_opt(2011, 6, 29).unwrap());
        assert_eq!(program.end.date(), NaiveDate::from_ymd_opt(2011, 6, 30).unwrap());
    }

    #[test]
    fn test_parse_program_id_wrong_slash_arity() {
        assert!(matches!(
            parse_program_id("20110629/nrktv1", "x"),
            Err(HomebaseError::ParseError(_))
        ));
        assert!(matches!(
            parse_program_id("20110629/nrk/tv1/20110629204500-20110629205500", "x"),
            Err(HomebaseError::ParseError(_))
        ));
        assert!(matches!(
            parse_program_id("", "x"),
            Err(HomebaseError::ParseError(_))
        ));
    }

    #[test]
    fn test_parse_program_id_wrong_dash_arity() {
        assert!(matches!(
            parse_program_id("20110629/nrktv1/20110629204500", "x"),
            Err(HomebaseError::ParseError(_))
        ));
        assert!(matches!(
            parse_program_id("20110629/nrktv1/20110629204500-20110629205500-1", "x"),
            Err(HomebaseError::ParseError(_))
        ));
    }

    #[test]
    fn test_parse_program_id_bad_timestamps() {
        assert!(parse_program_id("2011-06-29/nrktv1/20110629204500-20110629205500", "x").is_err());
        assert!(parse_program_id("20110629/nrktv1/201106292045-20110629205500", "x").is_err());
        assert!(parse_program_id("20110632/nrktv1/20110629204500-20110629205500", "x").is_err());
    }

    fn timestamp() -> impl Strategy<Value = NaiveDateTime> {
        (2000i32..2040, 1u32..=12, 1u32..=28, 0u32..24, 0u32..60, 0u32..60).prop_map(
            |(y, mo, d, h, mi, s)| {
                NaiveDate::from_ymd_opt(y, mo, d)
                    .unwrap()
                    .and_hms_opt(h, mi, s)
                    .unwrap()
            },
        )
    }

    proptest! {
        #[test]
        fn prop_identifier_fields_round_trip(
            start in timestamp(),
            end in timestamp(),
            channel in "[a-z0-9_.]{1,16}",
            title in "[^\\x00]{0,40}",
        ) {
            let date = start.date();
            let raw = format!(
                "{}/{}/{}-{}",
                date.format("%Y%m%d"),
                channel,
                start.format("%Y%m%d%H%M%S"),
                end.format("%Y%m%d%H%M%S"),
            );

            let program = parse_program_id(&raw, &title).unwrap();
            prop_assert_eq!(program.date, date);
            prop_assert_eq!(&program.channel, &channel);
            prop_assert_eq!(program.start, start);
            prop_assert_eq!(program.end, end);
            prop_assert_eq!(&program.title, &title);
            prop_assert_eq!(&program.id, &raw);
        }
    }
}
