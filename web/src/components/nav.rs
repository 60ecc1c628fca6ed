//! Top navigation bar component.

use leptos::prelude::*;
use leptos_router::components::A;

/// Site-wide navigation bar.
#[component]
pub fn Nav() -> impl IntoView {
    view! {
        <nav class="nav-bar">
            <div class="nav-brand">
                <A href="/" attr:class="nav-logo">"🏕 Cabañas"</A>
            </div>
            <div class="nav-links">
                <A href="/" attr:class="nav-link">"Calendario"</A>
                <A href="/reservations/new" attr:class="nav-link">"Nueva reserva"</A>
                <A href="/history" attr:class="nav-link">"Historial"</A>
            </div>
        </nav>
    }
}
