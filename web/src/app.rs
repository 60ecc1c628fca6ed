//! Root Leptos application component with routing.

use leptos::prelude::*;
use leptos_meta::{provide_meta_context, MetaTags, Stylesheet, Title};
use leptos_router::components::{Route, Router, Routes};
use leptos_router::path;

use crate::components::nav::Nav;
use crate::pages::{
    dashboard::Dashboard,
    history::HistoryPage,
    reservation_edit::{EditReservationPage, NewReservationPage},
};

/// Server-side application state, provided as Leptos context for server functions.
#[derive(Clone, Debug)]
#[cfg(feature = "ssr")]
pub struct AppState {
    pub store: crate::server::store::ReservationStore,
    pub settings: crate::model::Settings,
    pub leptos_options: LeptosOptions,
}

/// Dummy state for the client – never actually constructed on WASM, but the
/// type must exist so server functions can reference it in their signatures.
#[derive(Clone, Debug)]
#[cfg(not(feature = "ssr"))]
pub struct AppState;

/// Fetch the [`AppState`] inside a server function.
#[cfg(feature = "ssr")]
pub fn app_state() -> Result<AppState, ServerFnError> {
    use_context::<AppState>().ok_or_else(|| ServerFnError::new("Missing AppState"))
}

/// HTML document wrapping `<App/>` for server rendering.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="es">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <meta name="description" content="Calendario de reservas de cabañas"/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

/// The root `<App/>` component.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    view! {
        <Stylesheet id="leptos" href="/pkg/cabana-web.css"/>
        <Title text="Cabañas – Reservas"/>

        <Router>
            <Nav/>
            <main class="main-content">
                <Routes fallback=|| view! { <p class="error">"Página no encontrada"</p> }>
                    <Route path=path!("/") view=Dashboard/>
                    <Route path=path!("/reservations/new") view=NewReservationPage/>
                    <Route path=path!("/reservations/:id/edit") view=EditReservationPage/>
                    <Route path=path!("/history") view=HistoryPage/>
                </Routes>
            </main>
        </Router>
    }
}
