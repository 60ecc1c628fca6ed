//! Alert list of pending arrivals in the next few days.

use std::collections::HashSet;

use chrono::NaiveDate;
use leptos::prelude::*;
use leptos_router::components::A;

use cabana_common::query::upcoming_arrivals;
use cabana_common::Reservation;

#[component]
pub fn UpcomingArrivals(
    reservations: Vec<Reservation>,
    today: NaiveDate,
    window_days: u32,
    /// Ids hidden by the user for this session.
    dismissed: RwSignal<HashSet<String>>,
) -> impl IntoView {
    let rows = move || {
        let hidden = dismissed.get();
        upcoming_arrivals(&reservations, today, window_days, &hidden)
            .into_iter()
            .map(|r| {
                let id = r.id.clone();
                let href = format!("/reservations/{}/edit", r.id);
                let name = r.guest_name.clone();
                let when = arrival_label(r.check_in, today);
                let flight = r.flight_in.clone();
                view! {
                    <li class="upcoming-item">
                        <A href=href>{name}</A>
                        <span class="upcoming-when">" llega "{when}</span>
                        <span class="upcoming-flight">{flight}</span>
                        <button
                            class="dismiss-btn"
                            title="Ocultar"
                            on:click=move |_| { dismissed.update(|d| { d.insert(id.clone()); }); }
                        >
                            "×"
                        </button>
                    </li>
                }
            })
            .collect::<Vec<_>>()
    };

    view! {
        <section class="upcoming">
            <h2>"Próximas llegadas pendientes"</h2>
            {move || {
                let items = rows();
                if items.is_empty() {
                    view! { <p class="empty">"No hay llegadas pendientes."</p> }.into_any()
                } else {
                    view! { <ul class="upcoming-list">{items}</ul> }.into_any()
                }
            }}
        </section>
    }
}

/// "hoy", "mañana" or "en N días", followed by the day and month.
fn arrival_label(check_in: NaiveDate, today: NaiveDate) -> String {
    let when = match (check_in - today).num_days() {
        0 => "hoy".to_string(),
        1 => "mañana".to_string(),
        n => format!("en {n} días"),
    };
    format!("{when} ({})", check_in.format("%d/%m"))
}
