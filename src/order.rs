use std::cmp::Ordering;

use crate::booking::BookingRequest;

/// Total order over booking requests by submission instant: requests filed
/// earlier take precedence when conflicts arise. The meeting fields act as
/// deterministic tie-breakers, although business rules guarantee two requests
/// never share a submission instant.
pub fn submission_order(a: &BookingRequest, b: &BookingRequest) -> Ordering {
    a.submission_date()
        .cmp(&b.submission_date())
        .then_with(|| a.submission_time().cmp(&b.submission_time()))
        .then_with(|| a.meeting_date().cmp(&b.meeting_date()))
        .then_with(|| a.meeting_start().cmp(&b.meeting_start()))
        .then_with(|| a.meeting_end().cmp(&b.meeting_end()))
}
