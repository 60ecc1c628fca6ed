//! New/edit reservation pages.

use leptos::prelude::*;
use leptos_router::hooks::use_params_map;

use cabana_common::Reservation;

use crate::components::reservation_form::ReservationForm;
use crate::model::ReservationDraft;
use crate::pages::dashboard::get_settings;

// ─── Server functions ────────────────────────────────────────────────────────

#[server(GetReservation, "/api")]
pub async fn get_reservation(id: String) -> Result<Reservation, ServerFnError> {
    let state = crate::app::app_state()?;
    state
        .store
        .snapshot()
        .get(&id)
        .cloned()
        .ok_or_else(|| ServerFnError::new(cabana_common::ReservationError::NotFound(id).to_string()))
}

/// Price, validate and store the draft. Creates a reservation when `id` is
/// `None`, otherwise overwrites it. Returns the reservation id.
#[server(SaveReservation, "/api")]
pub async fn save_reservation(
    id: Option<String>,
    draft: ReservationDraft,
) -> Result<String, ServerFnError> {
    let state = crate::app::app_state()?;
    let reservation = draft
        .to_reservation(id.as_deref().unwrap_or_default(), &state.settings.rates)
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    let saved = match id {
        None => state.store.create(&reservation),
        Some(id) => state.store.update(&reservation).map(|()| id),
    };
    saved.map_err(|e| {
        tracing::warn!("Saving reservation for {} failed: {e}", reservation.guest_name);
        ServerFnError::new(e.to_string())
    })
}

// ─── Page components ─────────────────────────────────────────────────────────

#[component]
pub fn NewReservationPage() -> impl IntoView {
    let settings = Resource::new(|| (), |_| get_settings());

    view! {
        <div class="reservation-page">
            <h1>"Nueva reserva"</h1>
            <Suspense fallback=move || view! { <p class="loading">"Cargando…"</p> }>
                {move || settings.get().map(|res| match res {
                    Ok(s) => view! {
                        <ReservationForm initial=ReservationDraft::blank() id=None rates=s.rates/>
                    }.into_any(),
                    Err(e) => view! { <p class="error">"Error: " {e.to_string()}</p> }.into_any(),
                })}
            </Suspense>
        </div>
    }
}

#[component]
pub fn EditReservationPage() -> impl IntoView {
    let params = use_params_map();
    let id = move || params.read().get("id").unwrap_or_default();

    let reservation = Resource::new(id, get_reservation);
    let settings = Resource::new(|| (), |_| get_settings());

    view! {
        <div class="reservation-page">
            <h1>"Editar reserva"</h1>
            <Suspense fallback=move || view! { <p class="loading">"Cargando…"</p> }>
                {move || match (reservation.get(), settings.get()) {
                    (Some(Ok(r)), Some(Ok(s))) => view! {
                        <ReservationForm
                            initial=ReservationDraft::from_reservation(&r)
                            id=Some(r.id.clone())
                            rates=s.rates
                        />
                    }.into_any(),
                    (Some(Err(e)), _) | (_, Some(Err(e))) => view! {
                        <p class="error">"Error: " {e.to_string()}</p>
                    }.into_any(),
                    _ => view! { <p class="loading">"Cargando…"</p> }.into_any(),
                }}
            </Suspense>
        </div>
    }
}
