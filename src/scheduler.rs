use chrono::{NaiveDate, NaiveTime};
use log::{info, warn};
use serde::Serialize;
use thiserror::Error;

use crate::booking::{BookingRequest, BookingRequestBatch};
use crate::order::submission_order;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScheduleError {
    #[error("no booking request batch was supplied")]
    MissingBatch,
}

/// The accepted bookings for one meeting date, in submission order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScheduleDay {
    pub date: NaiveDate,
    pub bookings: Vec<BookingRequest>,
}

/// Meeting dates mapped to their accepted bookings. Dates appear in the
/// order they were first encountered while walking the accepted requests in
/// submission order, which is not necessarily chronological.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Schedule {
    days: Vec<ScheduleDay>,
}

impl Schedule {
    pub fn days(&self) -> &[ScheduleDay] {
        &self.days
    }

    pub fn day(&self, date: NaiveDate) -> Option<&ScheduleDay> {
        self.days.iter().find(|day| day.date == date)
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    pub(crate) fn insert(&mut self, booking: BookingRequest) {
        match self
            .days
            .iter_mut()
            .find(|day| day.date == booking.meeting_date())
        {
            Some(day) => day.bookings.push(booking),
            None => self.days.push(ScheduleDay {
                date: booking.meeting_date(),
                bookings: vec![booking],
            }),
        }
    }
}

/// Assigns the meeting room to a batch of booking requests.
///
/// Requests outside office hours are dropped up front. The survivors are
/// sorted by submission instant and walked once, left to right: a candidate
/// that overlaps the most recently accepted booking loses to it and is
/// dropped, everything else is accepted and grouped under its meeting date.
/// Rejections are advisory log lines, never errors.
pub fn schedule(batch: Option<&BookingRequestBatch>) -> Result<Schedule, ScheduleError> {
    let batch = batch.ok_or(ScheduleError::MissingBatch)?;

    let mut candidates = batch
        .requests()
        .iter()
        .filter(|booking| {
            let outside =
                outside_office_hours(booking, batch.opening_time(), batch.closing_time());
            if outside {
                warn!(
                    "meeting occurs outside office hours, dropping request submitted {} {}",
                    booking.submission_date(),
                    booking.submission_time()
                );
            }
            !outside
        })
        .collect::<Vec<_>>();

    candidates.sort_by(|a, b| submission_order(a, b));

    let mut schedule = Schedule::default();
    let mut last_accepted: Option<&BookingRequest> = None;

    for candidate in candidates {
        if let Some(last) = last_accepted {
            if overlaps(last, candidate) {
                info!(
                    "conflicting booking found for request submitted {} {}",
                    candidate.submission_date(),
                    candidate.submission_time()
                );
                continue;
            }
        }

        schedule.insert(candidate.clone());
        last_accepted = Some(candidate);
    }

    Ok(schedule)
}

fn outside_office_hours(
    booking: &BookingRequest,
    opening_time: NaiveTime,
    closing_time: NaiveTime,
) -> bool {
    let end = booking.meeting_end().time();

    booking.meeting_start() < opening_time
        || booking.meeting_start() > closing_time
        || end > closing_time
        || end < opening_time
}

/// Two bookings clash when they ask for the room on the same date and their
/// `[start, end)` intervals intersect, or they name the exact same slot.
/// Bookings on different dates never overlap.
fn overlaps(a: &BookingRequest, b: &BookingRequest) -> bool {
    if a.meeting_date() != b.meeting_date() {
        return false;
    }

    let a_end = a.meeting_end().time();
    let b_end = b.meeting_end().time();

    (a.meeting_start() < b_end && b.meeting_start() < a_end)
        || (a.meeting_start() == b.meeting_start() && a_end == b_end)
}
