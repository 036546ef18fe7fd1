//! Grouping of past sessions for the history list.

use chrono::{Datelike, NaiveDate};

use crate::models::Session;

/// Sessions that started on the same calendar day.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryDay<'a> {
    pub date: NaiveDate,
    pub label: String,
    pub sessions: Vec<&'a Session>,
}

/// "Today", "Yesterday", or a short date; the year is shown only when it
/// differs from the current one.
pub fn day_label(date: NaiveDate, today: NaiveDate) -> String {
    if date == today {
        "Today".to_string()
    } else if today.pred_opt() == Some(date) {
        "Yesterday".to_string()
    } else if date.year() == today.year() {
        date.format("%a, %b %-d").to_string()
    } else {
        date.format("%a, %b %-d, %Y").to_string()
    }
}

/// Groups sessions by start date, newest day first, newest session first
/// within a day.
pub fn group_by_day(sessions: &[Session], today: NaiveDate) -> Vec<HistoryDay<'_>> {
    let mut sorted: Vec<&Session> = sessions.iter().collect();
    sorted.sort_by(|a, b| b.start_time.cmp(&a.start_time));

    let mut days: Vec<HistoryDay<'_>> = Vec::new();
    for session in sorted {
        let date = session.start_time.date_naive();
        match days.last_mut() {
            Some(day) if day.date == date => day.sessions.push(session),
            _ => days.push(HistoryDay {
                date,
                label: day_label(date, today),
                sessions: vec![session],
            }),
        }
    }
    days
}
