use chrono::{Datelike, NaiveDate, NaiveTime, Duration};
use crate::domain::models::appointment::Appointment;
use crate::domain::models::location::WeeklyHours;

fn parse_hhmm(value: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(value, "%H:%M").ok()
}

/// Free slots for one barber on one day: walk the location's open window in
/// service-duration steps and drop times already held by a non-rejected
/// appointment. `taken` is expected pre-filtered to slot-holding rows.
pub fn free_slots(
    schedule: &WeeklyHours,
    date: NaiveDate,
    duration_min: i32,
    taken: &[Appointment],
) -> Vec<NaiveTime> {
    if duration_min <= 0 {
        return Vec::new();
    }

    let day = schedule.for_weekday(date.weekday());
    if !day.open {
        return Vec::new();
    }

    let (Some(opens), Some(closes)) = (
        day.opens.as_deref().and_then(parse_hhmm),
        day.closes.as_deref().and_then(parse_hhmm),
    ) else {
        return Vec::new();
    };

    let step = Duration::minutes(duration_min as i64);
    let mut slots = Vec::new();
    let mut cursor = opens;

    loop {
        // overflowing_add keeps a slot from silently wrapping past midnight
        let (end, wrapped) = cursor.overflowing_add_signed(step);
        if wrapped != 0 || end > closes {
            break;
        }
        if !taken.iter().any(|a| a.time == cursor) {
            slots.push(cursor);
        }
        cursor = end;
    }

    slots
}

/// Whether a slot starts and ends inside the published opening hours.
pub fn is_within_hours(schedule: &WeeklyHours, date: NaiveDate, time: NaiveTime, duration_min: i32) -> bool {
    let day = schedule.for_weekday(date.weekday());
    if !day.open {
        return false;
    }
    let (Some(opens), Some(closes)) = (
        day.opens.as_deref().and_then(parse_hhmm),
        day.closes.as_deref().and_then(parse_hhmm),
    ) else {
        return false;
    };

    let end = time + Duration::minutes(duration_min.max(0) as i64);
    time >= opens && end <= closes && end > time
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::appointment::{AppointmentStatus, NewAppointmentParams};

    fn schedule() -> WeeklyHours {
        WeeklyHours::default_business_week()
    }

    // 2025-03-10 is a Monday.
    fn monday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 10).unwrap()
    }

    fn hold(time: &str) -> Appointment {
        Appointment::new(NewAppointmentParams {
            tenant_id: "t1".into(),
            client_id: "c1".into(),
            barber_id: "b1".into(),
            service_id: "s1".into(),
            location_id: None,
            date: monday(),
            time: NaiveTime::parse_from_str(time, "%H:%M").unwrap(),
            notes: None,
            service_price: 12.5,
            status: AppointmentStatus::Accepted,
            created_by: None,
        })
    }

    #[test]
    fn grid_starts_at_opening_and_ends_before_close() {
        let slots = free_slots(&schedule(), monday(), 60, &[]);
        assert_eq!(slots.first().copied(), NaiveTime::from_hms_opt(9, 0, 0));
        // 09:00..19:00 with 60 min steps -> last start 18:00
        assert_eq!(slots.last().copied(), NaiveTime::from_hms_opt(18, 0, 0));
        assert_eq!(slots.len(), 10);
    }

    #[test]
    fn held_slots_are_excluded() {
        let taken = vec![hold("14:00")];
        let slots = free_slots(&schedule(), monday(), 60, &taken);
        assert!(!slots.contains(&NaiveTime::from_hms_opt(14, 0, 0).unwrap()));
        assert!(slots.contains(&NaiveTime::from_hms_opt(15, 0, 0).unwrap()));
    }

    #[test]
    fn closed_day_has_no_slots() {
        let sunday = NaiveDate::from_ymd_opt(2025, 3, 9).unwrap();
        assert!(free_slots(&schedule(), sunday, 30, &[]).is_empty());
    }

    #[test]
    fn slot_must_fit_before_closing() {
        // Saturday closes at 14:00; a 90-minute cut at 13:00 does not fit.
        let saturday = NaiveDate::from_ymd_opt(2025, 3, 15).unwrap();
        assert!(!is_within_hours(&schedule(), saturday, NaiveTime::from_hms_opt(13, 0, 0).unwrap(), 90));
        assert!(is_within_hours(&schedule(), saturday, NaiveTime::from_hms_opt(12, 30, 0).unwrap(), 90));
    }

    #[test]
    fn out_of_hours_is_rejected() {
        assert!(!is_within_hours(&schedule(), monday(), NaiveTime::from_hms_opt(8, 0, 0).unwrap(), 30));
        assert!(is_within_hours(&schedule(), monday(), NaiveTime::from_hms_opt(9, 0, 0).unwrap(), 30));
    }
}
