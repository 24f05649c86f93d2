#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use time::{Date, Month, OffsetDateTime, PrimitiveDateTime, Time, UtcOffset};

use crate::{Error, Result, Sentence};

const UTC_TIME: usize = 0;
const DAY: usize = 1;
const MONTH: usize = 2;
const YEAR: usize = 3;
const ZONE_HOURS: usize = 4;
const ZONE_MINUTES: usize = 5;

/// ZDA - Time & Date - UTC, day, month, year and local time zone
///
/// <https://gpsd.gitlab.io/gpsd/NMEA.html#_zda_time_date_utc_day_month_year_and_local_time_zone>
///
/// ```text
///         1         2  3  4    5  6
///         |         |  |  |    |  |
///  $--ZDA,hhmmss.ss,xx,xx,xxxx,xx,xx*hh<CR><LF>
/// ```
///
/// Unlike RMC, the year is written with four digits.
///
/// ```rust
/// use nmea0183_sentence::{SentenceKind, sentences::ZDA};
///
/// let zda = ZDA::parse("$GPZDA,201530.00,04,07,2002,-05,30*4B").unwrap();
/// let date_time = zda.date_time().unwrap();
///
/// assert_eq!(date_time.year(), 2002);
/// assert_eq!(date_time.offset().as_hms(), (-5, -30, 0));
/// ```
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZDA {
    sentence: Sentence,
}

sentence_kind!(ZDA, "ZDA", 6);

impl ZDA {
    /// Time in UTC
    pub fn time(&self) -> Result<Time> {
        self.sentence.get_time(UTC_TIME)
    }

    pub fn set_time(&mut self, time: Time) -> Result<()> {
        self.sentence.set_time(UTC_TIME, time)
    }

    /// Date in UTC
    pub fn date(&self) -> Result<Date> {
        let day = self.sentence.get_int(DAY)?;
        let month = self.sentence.get_int(MONTH)?;
        let year = self.sentence.get_int(YEAR)?;

        let month = u8::try_from(month)
            .ok()
            .and_then(|month| Month::try_from(month).ok())
            .ok_or_else(|| Error::malformed(MONTH, &month.to_string(), "month"))?;

        u8::try_from(day)
            .ok()
            .and_then(|day| Date::from_calendar_date(year, month, day).ok())
            .ok_or_else(|| Error::malformed(DAY, &day.to_string(), "day of month"))
    }

    pub fn set_date(&mut self, date: Date) -> Result<()> {
        self.sentence.set_int(DAY, date.day().into(), 2)?;
        self.sentence.set_int(MONTH, u8::from(date.month()).into(), 2)?;
        self.sentence.set_int(YEAR, date.year().into(), 4)
    }

    /// Local zone offset from UTC.
    ///
    /// The sign of the hours applies to the minutes as well.
    pub fn local_zone(&self) -> Result<UtcOffset> {
        let hours_field = self.sentence.get_string(ZONE_HOURS)?;
        let hours = self.sentence.get_int(ZONE_HOURS)?;
        let minutes = self.sentence.get_int(ZONE_MINUTES)?;

        let minutes = if hours_field.starts_with('-') {
            -minutes
        } else {
            minutes
        };

        i8::try_from(hours)
            .ok()
            .zip(i8::try_from(minutes).ok())
            .and_then(|(hours, minutes)| UtcOffset::from_hms(hours, minutes, 0).ok())
            .ok_or_else(|| Error::malformed(ZONE_HOURS, hours_field, "local zone offset"))
    }

    pub fn set_local_zone(&mut self, offset: UtcOffset) -> Result<()> {
        let (hours, minutes, _) = offset.as_hms();
        let sign = if offset.is_negative() { "-" } else { "" };

        let hours = format!("{sign}{:02}", hours.unsigned_abs());
        self.sentence.set_string(ZONE_HOURS, hours.as_str())?;
        self.sentence.set_int(ZONE_MINUTES, minutes.unsigned_abs().into(), 2)
    }

    /// UTC date and time, shifted to the local zone.
    ///
    /// # Errors
    ///
    /// [`Error::MalformedField`] on the year if the local date falls outside the
    /// representable years.
    pub fn date_time(&self) -> Result<OffsetDateTime> {
        let utc = PrimitiveDateTime::new(self.date()?, self.time()?).assume_utc();

        utc.checked_to_offset(self.local_zone()?).ok_or_else(|| {
            let year = self.sentence.get_string(YEAR).unwrap_or_default();
            Error::malformed(YEAR, year, "local year")
        })
    }

    pub fn set_date_time(&mut self, date_time: OffsetDateTime) -> Result<()> {
        let utc = date_time.to_offset(UtcOffset::UTC);

        self.set_time(utc.time())?;
        self.set_date(utc.date())?;
        self.set_local_zone(date_time.offset())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{SentenceKind, TalkerId};

    #[test]
    fn test_zda_parsing() {
        let zda = ZDA::parse("$GPZDA,032915,07,08,2004,00,00*4D").unwrap();

        assert_eq!(zda.time().unwrap().as_hms(), (3, 29, 15));
        assert_eq!(zda.date(), Ok(Date::from_calendar_date(2004, Month::August, 7).unwrap()));
        assert_eq!(zda.local_zone(), Ok(UtcOffset::UTC));
    }

    #[test]
    fn test_zda_local_zone() {
        let cases = [
            ("+03", "00", (3, 0, 0)),
            ("-03", "30", (-3, -30, 0)),
            ("-00", "30", (0, -30, 0)),
            ("14", "00", (14, 0, 0)),
        ];

        let mut zda = ZDA::new(TalkerId::GP).unwrap();
        for (hours, minutes, expected) in cases {
            zda.sentence.set_string(ZONE_HOURS, hours).unwrap();
            zda.sentence.set_string(ZONE_MINUTES, minutes).unwrap();
            assert_eq!(zda.local_zone().unwrap().as_hms(), expected, "input: {hours},{minutes}");
        }

        zda.sentence.set_string(ZONE_HOURS, "30").unwrap();
        assert!(matches!(zda.local_zone(), Err(Error::MalformedField { index: ZONE_HOURS, .. })));
    }

    #[test]
    fn test_zda_invalid_date() {
        let zda = ZDA::parse("$GPZDA,120000.00,30,02,2024,00,00").unwrap();
        assert!(matches!(zda.date(), Err(Error::MalformedField { index: DAY, .. })));

        let zda = ZDA::parse("$GPZDA,120000.00,01,13,2024,00,00").unwrap();
        assert!(matches!(zda.date(), Err(Error::MalformedField { index: MONTH, .. })));
    }

    #[test]
    fn test_zda_local_date_out_of_range() {
        let zda = ZDA::parse("$GPZDA,230000.00,31,12,9999,03,00").unwrap();
        assert!(zda.date().is_ok());
        assert!(matches!(zda.date_time(), Err(Error::MalformedField { index: YEAR, .. })));

        // the same instant west of Greenwich stays in year 9999
        let zda = ZDA::parse("$GPZDA,230000.00,31,12,9999,-03,00").unwrap();
        assert_eq!(zda.date_time().unwrap().year(), 9999);
    }

    #[test]
    fn test_zda_encoding() {
        let mut zda = ZDA::new(TalkerId::GP).unwrap();
        assert_eq!(zda.to_string(), "$GPZDA,,,,,,*48");

        let offset = UtcOffset::from_hms(-5, -30, 0).unwrap();
        let date_time = OffsetDateTime::new_in_offset(
            Date::from_calendar_date(2002, Month::July, 4).unwrap(),
            Time::from_hms(14, 45, 30).unwrap(),
            offset,
        );
        zda.set_date_time(date_time).unwrap();

        assert_eq!(zda.to_string(), "$GPZDA,201530.00,04,07,2002,-05,30*4B");
        assert_eq!(zda.date_time(), Ok(date_time));
    }
}
