use crate::scheduler::Schedule;

/// Renders the schedule as the plain-text report: each meeting date on its
/// own line followed by one `start end employee` line per accepted booking,
/// with a blank line between date groups.
#[must_use]
pub fn render(schedule: &Schedule) -> String {
    let mut groups = Vec::new();

    for day in schedule.days() {
        let mut lines = vec![day.date.format("%Y-%m-%d").to_string()];

        for booking in &day.bookings {
            lines.push(format!(
                "{} {} {}",
                booking.meeting_start().format("%H:%M"),
                booking.meeting_end().format("%H:%M"),
                booking.employee_id()
            ));
        }

        groups.push(lines.join("\n"));
    }

    groups.join("\n\n")
}
