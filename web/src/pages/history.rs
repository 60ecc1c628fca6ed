//! History page – stays that have already ended.

use chrono::Local;
use leptos::prelude::*;

use cabana_common::query::past_reservations;

use crate::components::reservation_table::ReservationTable;
use crate::pages::dashboard::list_reservations;

#[component]
pub fn HistoryPage() -> impl IntoView {
    let today = Local::now().date_naive();
    let search = RwSignal::new(String::new());
    let snapshot = Resource::new(|| (), |_| list_reservations());

    view! {
        <div class="history-page">
            <h1>"Historial"</h1>
            <Suspense fallback=move || view! { <p class="loading">"Cargando…"</p> }>
                {move || snapshot.get().map(|res| match res {
                    Ok(snap) => {
                        let past: Vec<_> = past_reservations(&snap.reservations, today)
                            .into_iter()
                            .cloned()
                            .collect();
                        if past.is_empty() {
                            view! { <p class="empty">"Aún no hay estadías terminadas."</p> }.into_any()
                        } else {
                            view! { <ReservationTable reservations=past search/> }.into_any()
                        }
                    }
                    Err(e) => view! {
                        <p class="error">"Error: " {e.to_string()}</p>
                    }.into_any(),
                })}
            </Suspense>
        </div>
    }
}
