//! Read-side queries over decoded state.
//!
//! Pure accessors used by the presentation layer. None of these mutate
//! their input; grouping sorts a copy.

use crate::model::Event;
use crate::state::State;

/// The decoded event occurrences.
pub fn select_events(state: &State) -> &[Event] {
    &state.events
}

/// Whether a full fetch is still in flight.
pub fn select_events_loading(state: &State) -> bool {
    state.loading
}

/// An event is free iff both price bounds are exactly 0.
pub fn is_free(price_low: f64, price_high: f64) -> bool {
    price_low == 0.0 && price_high == 0.0
}

/// [`is_free`] over an event's bounds.
pub fn select_event_is_free(event: &Event) -> bool {
    is_free(event.price_low, event.price_high)
}

/// Group events into calendar days.
///
/// Sorts a copy ascending by start time, then splits into runs where every
/// adjacent pair falls on the same calendar day (UTC date components, not
/// instant equality). The outer sequence is chronological.
pub fn group_events_by_start_time(events: &[Event]) -> Vec<Vec<Event>> {
    let mut sorted: Vec<Event> = events.to_vec();
    sorted.sort_by_key(|event| event.start_time);

    let mut days: Vec<Vec<Event>> = Vec::new();
    for event in sorted {
        let extends_run = days
            .last()
            .map_or(false, |day| same_day(&day[day.len() - 1], &event));
        if extends_run {
            if let Some(day) = days.last_mut() {
                day.push(event);
            }
        } else {
            days.push(vec![event]);
        }
    }
    days
}

fn same_day(a: &Event, b: &Event) -> bool {
    a.start_time.date_naive() == b.start_time.date_naive()
}

/// Events satisfying the predicate, order preserved.
pub fn filter_events<F>(events: &[Event], predicate: F) -> Vec<Event>
where
    F: Fn(&Event) -> bool,
{
    events
        .iter()
        .filter(|event| predicate(event))
        .cloned()
        .collect()
}
