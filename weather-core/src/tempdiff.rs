//! Peak temperature-difference advisory for a locality.

use chrono::{FixedOffset, NaiveDate, Utc};

use crate::{
    model::{PeakTempDiff, TempDiffRecord},
    provider::raw::RawTempDiffPayload,
};

const TAIWAN_UTC_OFFSET_SECS: i32 = 8 * 3600;

/// Current calendar date in Taiwan (UTC+08:00, no daylight saving).
pub fn taiwan_today() -> NaiveDate {
    match FixedOffset::east_opt(TAIWAN_UTC_OFFSET_SECS) {
        Some(tz) => Utc::now().with_timezone(&tz).date_naive(),
        None => Utc::now().date_naive(),
    }
}

impl TempDiffRecord {
    /// Date portion of the issue timestamp (`YYYY-MM-DD...` or `YYYY/MM/DD...`).
    pub fn issue_date(&self) -> Option<NaiveDate> {
        let head = self.issue_time.get(..10)?;
        NaiveDate::parse_from_str(head, "%Y-%m-%d")
            .or_else(|_| NaiveDate::parse_from_str(head, "%Y/%m/%d"))
            .ok()
    }
}

/// Flatten the area/town/time nesting into records, in scan order.
///
/// Slots without a usable numeric index are dropped.
pub fn records(payload: &RawTempDiffPayload) -> Vec<TempDiffRecord> {
    payload
        .locations
        .iter()
        .flat_map(|area| &area.location)
        .flat_map(|town| &town.time)
        .filter_map(|slot| {
            let index = slot.weather_elements.index()?;
            Some(TempDiffRecord {
                issue_time: slot.issue_time.clone(),
                index,
                warning_text: slot
                    .weather_elements
                    .temperature_difference_warning
                    .clone()
                    .unwrap_or_default(),
            })
        })
        .collect()
}

/// Highest-index record accepted by `keep`; the earliest one wins a tie.
pub fn peak_by<'a>(
    records: &'a [TempDiffRecord],
    keep: impl Fn(&TempDiffRecord) -> bool,
) -> Option<&'a TempDiffRecord> {
    records
        .iter()
        .filter(|&r| keep(r))
        .fold(None, |best: Option<&TempDiffRecord>, r| match best {
            Some(b) if b.index >= r.index => Some(b),
            _ => Some(r),
        })
}

/// Peak advisory for `today`, falling back to any date when today has no record.
pub fn extract_peak(payload: &RawTempDiffPayload, today: NaiveDate) -> PeakTempDiff {
    let records = records(payload);

    let peak = peak_by(&records, |r| r.issue_date() == Some(today)).or_else(|| {
        tracing::debug!(%today, total = records.len(), "no same-day records, using fallback pass");
        peak_by(&records, |_| true)
    });

    peak.map(PeakTempDiff::from)
        .unwrap_or_else(PeakTempDiff::not_found)
}
