use chrono::{NaiveDate, NaiveTime};
use thiserror::Error;

use crate::booking::{BookingRequest, BookingRequestBatch, BookingRequestError};

const DATE_FORMAT: &str = "%Y-%m-%d";
const SUBMISSION_TIME_FORMAT: &str = "%H:%M:%S";
const MEETING_START_FORMAT: &str = "%H:%M";
const OFFICE_HOURS_FORMAT: &str = "%H%M";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("input is empty, expected office hours on the first line")]
    MissingOfficeHours,
    #[error("line {line}: expected office hours as `HHmm HHmm`")]
    InvalidOfficeHours { line: usize },
    #[error("line {line}: expected `<date> <time> <employee>`")]
    InvalidSubmissionLine { line: usize },
    #[error("line {line}: expected `<date> <HH:MM> <hours>`")]
    InvalidMeetingLine { line: usize },
    #[error("line {line}: booking request is missing its meeting line")]
    MissingMeetingLine { line: usize },
    #[error("line {line}: {source}")]
    InvalidRequest {
        line: usize,
        source: BookingRequestError,
    },
}

/// Parses the line-oriented batch format: an office-hours header followed by
/// two lines per request, the submission record and the meeting record. Any
/// malformed record invalidates the whole batch.
pub fn parse_batch<S: AsRef<str>>(input: S) -> Result<BookingRequestBatch, ParseError> {
    let mut lines = input.as_ref().lines().enumerate();

    let (header_idx, header) = lines.next().ok_or(ParseError::MissingOfficeHours)?;
    let (opening_time, closing_time) =
        parse_office_hours(header).ok_or(ParseError::InvalidOfficeHours {
            line: header_idx + 1,
        })?;

    let mut batch = BookingRequestBatch::new(opening_time, closing_time);

    while let Some((submission_idx, submission_line)) = lines.next() {
        let (meeting_idx, meeting_line) = lines.next().ok_or(ParseError::MissingMeetingLine {
            line: submission_idx + 1,
        })?;

        let request = parse_request(
            submission_line,
            submission_idx + 1,
            meeting_line,
            meeting_idx + 1,
        )?;
        batch.add_booking_request(request);
    }

    Ok(batch)
}

fn parse_office_hours(line: &str) -> Option<(NaiveTime, NaiveTime)> {
    let mut tokens = line.split_whitespace();

    let opening_time = NaiveTime::parse_from_str(tokens.next()?, OFFICE_HOURS_FORMAT).ok()?;
    let closing_time = NaiveTime::parse_from_str(tokens.next()?, OFFICE_HOURS_FORMAT).ok()?;

    tokens.next().is_none().then_some((opening_time, closing_time))
}

fn parse_request(
    submission_line: &str,
    submission_no: usize,
    meeting_line: &str,
    meeting_no: usize,
) -> Result<BookingRequest, ParseError> {
    let (submission_date, submission_time, employee_id) = parse_submission(submission_line)
        .ok_or(ParseError::InvalidSubmissionLine {
            line: submission_no,
        })?;

    let (meeting_date, meeting_start, duration_hours) =
        parse_meeting(meeting_line).ok_or(ParseError::InvalidMeetingLine { line: meeting_no })?;

    BookingRequest::builder(submission_date, submission_time)
        .employee(employee_id)
        .meeting_date(meeting_date)
        .meeting_start(meeting_start)
        .duration_hours(duration_hours)
        .build()
        .map_err(|source| ParseError::InvalidRequest {
            line: submission_no,
            source,
        })
}

fn parse_submission(line: &str) -> Option<(NaiveDate, NaiveTime, &str)> {
    let mut tokens = line.split_whitespace();

    let submission_date = NaiveDate::parse_from_str(tokens.next()?, DATE_FORMAT).ok()?;
    let submission_time =
        NaiveTime::parse_from_str(tokens.next()?, SUBMISSION_TIME_FORMAT).ok()?;
    let employee_id = tokens.next()?;

    tokens
        .next()
        .is_none()
        .then_some((submission_date, submission_time, employee_id))
}

fn parse_meeting(line: &str) -> Option<(NaiveDate, NaiveTime, u32)> {
    let mut tokens = line.split_whitespace();

    let meeting_date = NaiveDate::parse_from_str(tokens.next()?, DATE_FORMAT).ok()?;
    let meeting_start = NaiveTime::parse_from_str(tokens.next()?, MEETING_START_FORMAT).ok()?;
    let duration_hours = tokens.next()?.parse::<u32>().ok()?;

    tokens
        .next()
        .is_none()
        .then_some((meeting_date, meeting_start, duration_hours))
}
