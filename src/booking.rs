use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use serde::{Serialize, Serializer};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BookingRequestError {
    #[error("employee id is missing or empty")]
    MissingEmployee,
    #[error("meeting date is missing")]
    MissingMeetingDate,
    #[error("meeting start time is missing")]
    MissingMeetingStart,
    #[error("meeting duration must be a positive number of hours")]
    InvalidDuration,
    #[error("meeting end falls outside the supported date range")]
    EndOutOfRange,
}

fn serialize_naive_time<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
    let formatted_time = format!("{:02}:{:02}", time.hour(), time.minute());
    serializer.serialize_str(&formatted_time)
}

/// A single room-booking submission. Meetings may run past midnight into the
/// next calendar date, so the end is a full date/time rather than a
/// time-of-day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookingRequest {
    submission_date: NaiveDate,
    submission_time: NaiveTime,
    employee_id: String,
    meeting_date: NaiveDate,
    #[serde(serialize_with = "serialize_naive_time")]
    meeting_start: NaiveTime,
    duration_hours: u32,
    meeting_end: NaiveDateTime,
}

impl BookingRequest {
    pub fn builder(
        submission_date: NaiveDate,
        submission_time: NaiveTime,
    ) -> BookingRequestBuilder {
        BookingRequestBuilder {
            submission_date,
            submission_time,
            employee_id: None,
            meeting_date: None,
            meeting_start: None,
            duration_hours: None,
        }
    }

    pub fn submission_date(&self) -> NaiveDate {
        self.submission_date
    }

    pub fn submission_time(&self) -> NaiveTime {
        self.submission_time
    }

    pub fn employee_id(&self) -> &str {
        &self.employee_id
    }

    pub fn meeting_date(&self) -> NaiveDate {
        self.meeting_date
    }

    pub fn meeting_start(&self) -> NaiveTime {
        self.meeting_start
    }

    pub fn duration_hours(&self) -> u32 {
        self.duration_hours
    }

    pub fn meeting_end(&self) -> NaiveDateTime {
        self.meeting_end
    }
}

/// Collects the fields of a [`BookingRequest`] and validates them in one go,
/// so no half-built request ever escapes. The meeting end is computed here,
/// once, rather than on every read.
#[derive(Debug, Clone)]
pub struct BookingRequestBuilder {
    submission_date: NaiveDate,
    submission_time: NaiveTime,
    employee_id: Option<String>,
    meeting_date: Option<NaiveDate>,
    meeting_start: Option<NaiveTime>,
    duration_hours: Option<u32>,
}

impl BookingRequestBuilder {
    pub fn employee<S: Into<String>>(mut self, employee_id: S) -> Self {
        self.employee_id = Some(employee_id.into());
        self
    }

    pub fn meeting_date(mut self, meeting_date: NaiveDate) -> Self {
        self.meeting_date = Some(meeting_date);
        self
    }

    pub fn meeting_start(mut self, meeting_start: NaiveTime) -> Self {
        self.meeting_start = Some(meeting_start);
        self
    }

    pub fn duration_hours(mut self, duration_hours: u32) -> Self {
        self.duration_hours = Some(duration_hours);
        self
    }

    pub fn build(self) -> Result<BookingRequest, BookingRequestError> {
        let employee_id = self
            .employee_id
            .filter(|id| !id.is_empty())
            .ok_or(BookingRequestError::MissingEmployee)?;

        let meeting_date = self
            .meeting_date
            .ok_or(BookingRequestError::MissingMeetingDate)?;

        let meeting_start = self
            .meeting_start
            .ok_or(BookingRequestError::MissingMeetingStart)?;

        let duration_hours = match self.duration_hours {
            Some(hours) if hours > 0 => hours,
            _ => return Err(BookingRequestError::InvalidDuration),
        };

        let duration = Duration::try_hours(i64::from(duration_hours))
            .ok_or(BookingRequestError::EndOutOfRange)?;

        let meeting_end = meeting_date
            .and_time(meeting_start)
            .checked_add_signed(duration)
            .ok_or(BookingRequestError::EndOutOfRange)?;

        Ok(BookingRequest {
            submission_date: self.submission_date,
            submission_time: self.submission_time,
            employee_id,
            meeting_date,
            meeting_start,
            duration_hours,
            meeting_end,
        })
    }
}

/// One run's worth of submissions: the office-hours header followed by the
/// requests in the order they were received.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingRequestBatch {
    opening_time: NaiveTime,
    closing_time: NaiveTime,
    requests: Vec<BookingRequest>,
}

impl BookingRequestBatch {
    pub fn new(opening_time: NaiveTime, closing_time: NaiveTime) -> Self {
        Self {
            opening_time,
            closing_time,
            requests: Vec::new(),
        }
    }

    pub fn opening_time(&self) -> NaiveTime {
        self.opening_time
    }

    pub fn closing_time(&self) -> NaiveTime {
        self.closing_time
    }

    /// Appends a request, keeping insertion order. The batch is list-backed,
    /// so the append always succeeds; duplicate slots are resolved later
    /// during conflict elimination.
    pub fn add_booking_request(&mut self, request: BookingRequest) -> bool {
        self.requests.push(request);
        true
    }

    pub fn requests(&self) -> &[BookingRequest] {
        &self.requests
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn time(hour: u32, minute: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(hour, minute, 0).unwrap()
    }

    #[test]
    fn builds_a_complete_request() {
        let request = BookingRequest::builder(date(2011, 10, 12), time(14, 33))
            .employee("EMP001")
            .meeting_date(date(2011, 10, 25))
            .meeting_start(time(13, 50))
            .duration_hours(10)
            .build()
            .unwrap();

        assert_eq!(request.submission_date(), date(2011, 10, 12));
        assert_eq!(request.submission_time(), time(14, 33));
        assert_eq!(request.employee_id(), "EMP001");
        assert_eq!(request.meeting_date(), date(2011, 10, 25));
        assert_eq!(request.meeting_start(), time(13, 50));
        assert_eq!(request.duration_hours(), 10);
        assert_eq!(
            request.meeting_end(),
            date(2011, 10, 25).and_time(time(13, 50)) + Duration::try_hours(10).unwrap()
        );
    }

    #[test]
    fn meeting_end_rolls_past_midnight() {
        let request = BookingRequest::builder(date(2011, 10, 12), time(14, 33))
            .employee("EMP001")
            .meeting_date(date(2011, 10, 25))
            .meeting_start(time(23, 0))
            .duration_hours(2)
            .build()
            .unwrap();

        assert_eq!(request.meeting_end(), date(2011, 10, 26).and_time(time(1, 0)));
    }

    #[test]
    fn rejects_missing_employee() {
        let result = BookingRequest::builder(date(2011, 10, 12), time(14, 33))
            .meeting_date(date(2011, 10, 25))
            .meeting_start(time(13, 50))
            .duration_hours(1)
            .build();

        assert_eq!(result, Err(BookingRequestError::MissingEmployee));
    }

    #[test]
    fn rejects_empty_employee() {
        let result = BookingRequest::builder(date(2011, 10, 12), time(14, 33))
            .employee("")
            .meeting_date(date(2011, 10, 25))
            .meeting_start(time(13, 50))
            .duration_hours(1)
            .build();

        assert_eq!(result, Err(BookingRequestError::MissingEmployee));
    }

    #[test]
    fn rejects_missing_meeting_date() {
        let result = BookingRequest::builder(date(2011, 10, 12), time(14, 33))
            .employee("EMP001")
            .meeting_start(time(13, 50))
            .duration_hours(1)
            .build();

        assert_eq!(result, Err(BookingRequestError::MissingMeetingDate));
    }

    #[test]
    fn rejects_missing_meeting_start() {
        let result = BookingRequest::builder(date(2011, 10, 12), time(14, 33))
            .employee("EMP001")
            .meeting_date(date(2011, 10, 25))
            .duration_hours(1)
            .build();

        assert_eq!(result, Err(BookingRequestError::MissingMeetingStart));
    }

    #[test]
    fn rejects_missing_duration() {
        let result = BookingRequest::builder(date(2011, 10, 12), time(14, 33))
            .employee("EMP001")
            .meeting_date(date(2011, 10, 25))
            .meeting_start(time(13, 50))
            .build();

        assert_eq!(result, Err(BookingRequestError::InvalidDuration));
    }

    #[test]
    fn rejects_zero_duration() {
        let result = BookingRequest::builder(date(2011, 10, 12), time(14, 33))
            .employee("EMP001")
            .meeting_date(date(2011, 10, 25))
            .meeting_start(time(13, 50))
            .duration_hours(0)
            .build();

        assert_eq!(result, Err(BookingRequestError::InvalidDuration));
    }

    #[test]
    fn equality_is_structural() {
        let build = || {
            BookingRequest::builder(date(2011, 10, 12), time(14, 33))
                .employee("EMP001")
                .meeting_date(date(2011, 10, 25))
                .meeting_start(time(13, 50))
                .duration_hours(1)
                .build()
                .unwrap()
        };

        assert_eq!(build(), build());

        let other_employee = BookingRequest::builder(date(2011, 10, 12), time(14, 33))
            .employee("EMP002")
            .meeting_date(date(2011, 10, 25))
            .meeting_start(time(13, 50))
            .duration_hours(1)
            .build()
            .unwrap();

        assert_ne!(build(), other_employee);
    }

    #[test]
    fn batch_keeps_insertion_order() {
        let mut batch = BookingRequestBatch::new(time(9, 55), time(17, 55));

        assert_eq!(batch.opening_time(), time(9, 55));
        assert_eq!(batch.closing_time(), time(17, 55));
        assert!(batch.requests().is_empty());

        let first = BookingRequest::builder(date(2011, 3, 8), time(9, 30))
            .employee("EMP001")
            .meeting_date(date(2011, 3, 11))
            .meeting_start(time(11, 0))
            .duration_hours(2)
            .build()
            .unwrap();

        let second = BookingRequest::builder(date(2011, 3, 7), time(10, 0))
            .employee("EMP002")
            .meeting_date(date(2011, 3, 11))
            .meeting_start(time(14, 0))
            .duration_hours(1)
            .build()
            .unwrap();

        assert!(batch.add_booking_request(first.clone()));
        assert!(batch.add_booking_request(second.clone()));

        assert_eq!(batch.requests(), [first, second]);
    }
}
