//! Month timeline: week rows of day cells with reservation bars on top.
//!
//! All geometry comes from [`TimelineLayout`]; this component only turns
//! grid columns and lanes into CSS percentages and pixels.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{Datelike, NaiveDate};
use leptos::prelude::*;

use cabana_common::timeline::grid::WEEKDAY_LABELS;
use cabana_common::timeline::{BarSegment, CalendarDay, FocusMonth, LayoutMetrics, TimelineLayout};
use cabana_common::Reservation;

#[component]
pub fn Timeline(
    /// Current snapshot contents.
    reservations: Vec<Reservation>,
    /// Month being displayed; the arrows move it.
    focus: RwSignal<FocusMonth>,
    metrics: LayoutMetrics,
    today: NaiveDate,
    /// Called with the reservation id when a bar is clicked.
    on_select: Callback<String>,
) -> impl IntoView {
    let by_id: Arc<HashMap<String, Reservation>> = Arc::new(
        reservations
            .iter()
            .map(|r| (r.id.clone(), r.clone()))
            .collect(),
    );
    let layout = Memo::new(move |_| TimelineLayout::compute(&reservations, focus.get(), &metrics));

    let weeks = move || {
        let layout = layout.get();
        let by_id = Arc::clone(&by_id);
        layout
            .grid
            .weeks()
            .enumerate()
            .map(|(row, days)| {
                let height = layout.week_heights.get(row).copied().unwrap_or(metrics.min_height);
                let bars = layout
                    .segments_in_week(row)
                    .map(|seg| {
                        let reservation = by_id.get(&seg.reservation_id).cloned();
                        view! { <Bar segment=seg.clone() reservation metrics on_select/> }
                    })
                    .collect_view();
                let cells = days
                    .iter()
                    .map(|day| {
                        view! {
                            <div class=day_class(day, today)>
                                <span class="day-number">{day.date.day()}</span>
                            </div>
                        }
                    })
                    .collect_view();

                view! {
                    <div class="week-row" style=format!("height: {height}px")>
                        <div class="week-days">{cells}</div>
                        <div class="week-bars">{bars}</div>
                    </div>
                }
            })
            .collect_view()
    };

    view! {
        <section class="timeline">
            <header class="timeline-nav">
                <button class="nav-arrow" on:click=move |_| focus.update(|f| *f = f.prev())>"‹"</button>
                <h2 class="timeline-title">{move || focus.get().label()}</h2>
                <button class="nav-arrow" on:click=move |_| focus.update(|f| *f = f.next())>"›"</button>
                <button class="today-btn" on:click=move |_| focus.set(FocusMonth::containing(today))>
                    "Hoy"
                </button>
            </header>
            <div class="timeline-weekdays">
                {WEEKDAY_LABELS.iter().map(|label| view! { <div class="weekday">{*label}</div> }).collect_view()}
            </div>
            <div class="timeline-weeks">{weeks}</div>
        </section>
    }
}

/// One bar segment inside a week row.
#[component]
fn Bar(
    segment: BarSegment,
    reservation: Option<Reservation>,
    metrics: LayoutMetrics,
    on_select: Callback<String>,
) -> impl IntoView {
    let class = bar_class(&segment, reservation.as_ref());
    let style = bar_style(&segment, &metrics);
    let (label, title) = match &reservation {
        Some(r) => (
            r.guest_name.clone(),
            format!("{} · {} → {} · {}", r.guest_name, r.check_in, r.check_out, r.status.as_str()),
        ),
        None => (String::new(), String::new()),
    };
    let id = segment.reservation_id;

    view! {
        <div class=class style=style title=title on:click=move |_| on_select.run(id.clone())>
            <span class="bar-label">{label}</span>
        </div>
    }
}

fn day_class(day: &CalendarDay, today: NaiveDate) -> String {
    let mut class = String::from("day-cell");
    if !day.in_focus_month {
        class.push_str(" outside");
    }
    if day.date == today {
        class.push_str(" today");
    }
    if day.date.weekday().number_from_monday() >= 6 {
        class.push_str(" weekend");
    }
    class
}

fn bar_class(segment: &BarSegment, reservation: Option<&Reservation>) -> String {
    let mut class = String::from("bar");
    if let Some(r) = reservation {
        class.push(' ');
        class.push_str(r.status.css_class());
        class.push(' ');
        class.push_str(r.cabin_type.css_class());
    }
    if segment.clipped_start {
        class.push_str(" clipped-start");
    }
    if segment.clipped_end {
        class.push_str(" clipped-end");
    }
    class
}

/// Horizontal placement in percent of the row, vertical in pixels from the
/// top of the row.
fn bar_style(segment: &BarSegment, metrics: &LayoutMetrics) -> String {
    let left = segment.start_column as f64 * 100.0 / 7.0;
    let width = segment.column_span as f64 * 100.0 / 7.0;
    format!(
        "left: {left:.4}%; width: {width:.4}%; top: {}px; height: {}px",
        metrics.lane_offset(segment.lane),
        metrics.bar_height
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use cabana_common::{CabinType, ReservationStatus};

    fn segment(start_column: usize, column_span: usize, lane: usize) -> BarSegment {
        BarSegment {
            reservation_id: "1".into(),
            week_row: 0,
            start_column,
            column_span,
            lane,
            clipped_start: false,
            clipped_end: true,
        }
    }

    #[test]
    fn test_bar_style_uses_columns_and_lanes() {
        let metrics = LayoutMetrics::default();
        assert_eq!(
            bar_style(&segment(0, 7, 0), &metrics),
            "left: 0.0000%; width: 100.0000%; top: 28px; height: 20px"
        );
        assert_eq!(
            bar_style(&segment(2, 3, 2), &metrics),
            "left: 28.5714%; width: 42.8571%; top: 76px; height: 20px"
        );
    }

    #[test]
    fn test_bar_class_reflects_status_and_clipping() {
        let mut r = Reservation::new(
            "1",
            "Ana",
            NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
            NaiveDate::from_ymd_opt(2025, 6, 3).unwrap(),
        );
        r.status = ReservationStatus::Confirmed;
        r.cabin_type = CabinType::Family;
        assert_eq!(
            bar_class(&segment(0, 2, 0), Some(&r)),
            "bar confirmed cabin-family clipped-end"
        );
        assert_eq!(bar_class(&segment(0, 2, 0), None), "bar clipped-end");
    }

    #[test]
    fn test_day_class() {
        let sat = NaiveDate::from_ymd_opt(2025, 5, 31).unwrap();
        let day = CalendarDay {
            date: sat,
            in_focus_month: false,
        };
        assert_eq!(day_class(&day, sat), "day-cell outside today weekend");
    }
}
