//! Searchable table of reservations.

use leptos::prelude::*;
use leptos_router::components::A;

use cabana_common::pricing::format_clp;
use cabana_common::query::search_by_guest;
use cabana_common::Reservation;

#[component]
pub fn ReservationTable(
    reservations: Vec<Reservation>,
    /// Guest-name filter, bound to the search box.
    search: RwSignal<String>,
    /// Delete handler; rows get no delete button when absent.
    #[prop(optional)]
    on_delete: Option<Callback<String>>,
) -> impl IntoView {
    let rows = move || {
        let term = search.get();
        search_by_guest(&reservations, &term)
            .into_iter()
            .map(|r| view! { <ReservationRow reservation=r.clone() on_delete/> })
            .collect::<Vec<_>>()
    };

    view! {
        <section class="reservation-table">
            <input
                class="search-box"
                type="search"
                placeholder="Buscar huésped…"
                prop:value=move || search.get()
                on:input=move |ev| search.set(event_target_value(&ev))
            />
            <table>
                <thead>
                    <tr>
                        <th>"Huésped"</th>
                        <th>"Llegada"</th>
                        <th>"Salida"</th>
                        <th>"Noches"</th>
                        <th>"Cabaña"</th>
                        <th>"Pasajeros"</th>
                        <th>"Estado"</th>
                        <th>"Total"</th>
                        <th>"Abono"</th>
                        <th></th>
                    </tr>
                </thead>
                <tbody>{rows}</tbody>
            </table>
        </section>
    }
}

#[component]
fn ReservationRow(reservation: Reservation, on_delete: Option<Callback<String>>) -> impl IntoView {
    let r = reservation;
    let id = r.id.clone();
    let guests = format!("{} ({}A {}N {}I)", r.total_guests(), r.adults, r.children, r.infants);

    let delete_button = on_delete.map(|on_delete| {
        let id = id.clone();
        let name = r.guest_name.clone();
        view! {
            <button
                class="delete-btn"
                on:click=move |_| {
                    if confirm(&format!("¿Eliminar la reserva de {name}?")) {
                        on_delete.run(id.clone());
                    }
                }
            >
                "Eliminar"
            </button>
        }
    });

    view! {
        <tr class=format!("row {}", r.status.css_class())>
            <td>{r.guest_name.clone()}</td>
            <td>{r.check_in.format("%d/%m/%Y").to_string()}</td>
            <td>{r.check_out.format("%d/%m/%Y").to_string()}</td>
            <td>{r.nights()}</td>
            <td class=r.cabin_type.css_class()>{r.cabin_type.label()}</td>
            <td>{guests}</td>
            <td><span class=format!("status-badge {}", r.status.css_class())>{r.status.as_str()}</span></td>
            <td>{format_clp(r.total_price)}</td>
            <td>{format_clp(r.deposit_amount)}</td>
            <td class="actions">
                <A href=format!("/reservations/{id}/edit") attr:class="edit-link">"Editar"</A>
                {delete_button}
            </td>
        </tr>
    }
}

/// Browser confirmation dialog. Always true outside the browser.
fn confirm(message: &str) -> bool {
    #[cfg(feature = "hydrate")]
    {
        window().confirm_with_message(message).unwrap_or(false)
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = message;
        true
    }
}
