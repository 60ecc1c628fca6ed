//! Dashboard – upcoming arrivals, the month timeline and the reservation table.

use std::collections::HashSet;

use chrono::Local;
#[cfg(feature = "hydrate")]
use leptos::leptos_dom::helpers::{set_interval_with_handle, IntervalHandle};
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::use_navigate;
use leptos_router::NavigateOptions;

use cabana_common::query::occupancy_on;
use cabana_common::snapshot::Snapshot;
use cabana_common::timeline::FocusMonth;

use crate::components::reservation_table::ReservationTable;
use crate::components::timeline::Timeline;
use crate::components::upcoming::UpcomingArrivals;
use crate::model::Settings;

// ─── Server functions ────────────────────────────────────────────────────────

/// The current reservation snapshot.
#[server(ListReservations, "/api")]
pub async fn list_reservations() -> Result<Snapshot, ServerFnError> {
    let state = crate::app::app_state()?;
    Ok(Snapshot::clone(&state.store.snapshot()))
}

/// Revision of the current snapshot, polled to detect changes.
#[server(SnapshotRevision, "/api")]
pub async fn snapshot_revision() -> Result<u64, ServerFnError> {
    let state = crate::app::app_state()?;
    Ok(state.store.revision())
}

#[server(GetSettings, "/api")]
pub async fn get_settings() -> Result<Settings, ServerFnError> {
    let state = crate::app::app_state()?;
    Ok(state.settings)
}

#[server(DeleteReservation, "/api")]
pub async fn delete_reservation(id: String) -> Result<(), ServerFnError> {
    let state = crate::app::app_state()?;
    state.store.delete(&id).map_err(|e| {
        tracing::warn!("Delete of {id} failed: {e}");
        ServerFnError::new(e.to_string())
    })
}

// ─── Page component ──────────────────────────────────────────────────────────

#[component]
pub fn Dashboard() -> impl IntoView {
    let today = Local::now().date_naive();
    let focus = RwSignal::new(FocusMonth::containing(today));
    let dismissed = RwSignal::new(HashSet::<String>::new());
    let search = RwSignal::new(String::new());
    // Bumped whenever the snapshot must be refetched.
    let refresh = RwSignal::new(0u32);

    let snapshot = Resource::new(move || refresh.get(), |_| list_reservations());
    let settings = Resource::new(|| (), |_| get_settings());

    // Poll the snapshot revision once the interval is known.
    #[cfg(feature = "hydrate")]
    {
        let interval = StoredValue::new(None::<IntervalHandle>);
        Effect::new(move |started: Option<bool>| {
            if started == Some(true) {
                return true;
            }
            let Some(Ok(s)) = settings.get() else {
                return false;
            };
            let handle = set_interval_with_handle(
                move || {
                    let shown = snapshot
                        .get_untracked()
                        .and_then(|res| res.ok())
                        .map(|snap| snap.revision);
                    spawn_local(async move {
                        if let Ok(rev) = snapshot_revision().await {
                            if needs_refresh(shown, rev) {
                                refresh.update(|n| *n += 1);
                            }
                        }
                    });
                },
                std::time::Duration::from_secs(s.poll_interval_secs),
            );
            match handle {
                Ok(h) => interval.set_value(Some(h)),
                Err(e) => tracing::warn!("Cannot start revision polling: {e:?}"),
            }
            true
        });
        on_cleanup(move || {
            if let Some(h) = interval.get_value() {
                h.clear();
            }
        });
    }

    let navigate = use_navigate();
    let on_select = Callback::new(move |id: String| {
        navigate(&format!("/reservations/{id}/edit"), NavigateOptions::default());
    });
    let on_delete = Callback::new(move |id: String| {
        spawn_local(async move {
            match delete_reservation(id).await {
                Ok(()) => refresh.update(|n| *n += 1),
                Err(e) => tracing::warn!("Delete failed: {e}"),
            }
        });
    });

    view! {
        <div class="dashboard">
            <Transition fallback=move || view! { <p class="loading">"Cargando…"</p> }>
                {move || match (snapshot.get(), settings.get()) {
                    (Some(Ok(snap)), Some(Ok(s))) => {
                        let occupied = occupancy_on(&snap.reservations, today);
                        view! {
                            <p class="occupancy">"Cabañas ocupadas esta noche: " {occupied}</p>
                            <UpcomingArrivals
                                reservations=snap.reservations.clone()
                                today
                                window_days=s.upcoming_window_days
                                dismissed
                            />
                            <Timeline
                                reservations=snap.reservations.clone()
                                focus
                                metrics=s.metrics
                                today
                                on_select
                            />
                            <ReservationTable reservations=snap.reservations search on_delete/>
                        }.into_any()
                    }
                    (Some(Err(e)), _) | (_, Some(Err(e))) => view! {
                        <p class="error">"Error: " {e.to_string()}</p>
                    }.into_any(),
                    _ => view! { <p class="loading">"Cargando…"</p> }.into_any(),
                }}
            </Transition>
        </div>
    }
}

/// Whether the server revision differs from the snapshot on screen.
#[cfg_attr(not(feature = "hydrate"), allow(dead_code))]
fn needs_refresh(shown: Option<u64>, server: u64) -> bool {
    shown != Some(server)
}
