//! Create/edit form with a live price preview.

use leptos::ev::SubmitEvent;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::use_navigate;
use leptos_router::NavigateOptions;

use cabana_common::pricing::{format_clp, Rates};
use cabana_common::{CabinType, DepositKind, Reservation, ReservationError, ReservationStatus, Season};

use crate::model::{ReservationDraft, ARRIVAL_FLIGHTS, DEPARTURE_FLIGHTS};
use crate::pages::reservation_edit::save_reservation;

type Getter = fn(&ReservationDraft) -> &String;
type Setter = fn(&mut ReservationDraft) -> &mut String;

#[component]
pub fn ReservationForm(
    initial: ReservationDraft,
    /// `None` when creating.
    id: Option<String>,
    rates: Rates,
) -> impl IntoView {
    let draft = RwSignal::new(initial);
    let error = RwSignal::new(None::<String>);
    let saving = RwSignal::new(false);
    let navigate = use_navigate();

    let preview = Memo::new(move |_| draft.with(|d| priced(d, &rates)));

    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        if saving.get_untracked() {
            return;
        }
        if let Err(e) = preview.get_untracked() {
            error.set(Some(e.to_string()));
            return;
        }
        saving.set(true);
        error.set(None);
        let id = id.clone();
        let submitted = draft.get_untracked();
        let navigate = navigate.clone();
        spawn_local(async move {
            match save_reservation(id, submitted).await {
                Ok(_) => navigate("/", NavigateOptions::default()),
                Err(e) => {
                    error.set(Some(e.to_string()));
                    saving.set(false);
                }
            }
        });
    };

    let cabins = CabinType::ALL.iter().map(|c| (c.as_str(), c.label())).collect();
    let statuses = ReservationStatus::ALL.iter().map(|s| (s.as_str(), s.as_str())).collect();
    let seasons = vec![(Season::Low.as_str(), "Baja"), (Season::High.as_str(), "Alta")];
    let deposit_kinds = vec![
        (DepositKind::Percentage.as_str(), "Porcentaje"),
        (DepositKind::Manual.as_str(), "Manual"),
    ];
    let arrivals = ARRIVAL_FLIGHTS.iter().map(|f| (*f, *f)).collect();
    let departures = DEPARTURE_FLIGHTS.iter().map(|f| (*f, *f)).collect();
    let manual_deposit =
        move || draft.with(|d| d.deposit_kind == DepositKind::Manual.as_str());

    view! {
        <form class="reservation-form" on:submit=on_submit>
            <fieldset>
                <legend>"Huésped"</legend>
                {input_field("Nombre", "text", draft, |d| &d.guest_name, |d| &mut d.guest_name)}
                {select_field("Estado", statuses, draft, |d| &d.status, |d| &mut d.status)}
            </fieldset>

            <fieldset>
                <legend>"Estadía"</legend>
                {input_field("Llegada", "date", draft, |d| &d.check_in, |d| &mut d.check_in)}
                {input_field("Salida", "date", draft, |d| &d.check_out, |d| &mut d.check_out)}
                {select_field("Cabaña", cabins, draft, |d| &d.cabin_type, |d| &mut d.cabin_type)}
                {select_field("Temporada", seasons, draft, |d| &d.season, |d| &mut d.season)}
                {select_field("Vuelo llegada", arrivals, draft, |d| &d.flight_in, |d| &mut d.flight_in)}
                {select_field("Vuelo salida", departures, draft, |d| &d.flight_out, |d| &mut d.flight_out)}
            </fieldset>

            <fieldset>
                <legend>"Pasajeros"</legend>
                {input_field("Adultos", "number", draft, |d| &d.adults, |d| &mut d.adults)}
                {input_field("Niños", "number", draft, |d| &d.children, |d| &mut d.children)}
                {input_field("Infantes", "number", draft, |d| &d.infants, |d| &mut d.infants)}
            </fieldset>

            <fieldset>
                <legend>"Abono"</legend>
                {select_field("Tipo", deposit_kinds, draft, |d| &d.deposit_kind, |d| &mut d.deposit_kind)}
                <label class="field">
                    <span>"Monto manual"</span>
                    <input
                        type="number"
                        min="0"
                        disabled=move || !manual_deposit()
                        prop:value=move || draft.with(|d| d.deposit_amount.clone())
                        on:input=move |ev| {
                            let value = event_target_value(&ev);
                            draft.update(|d| d.deposit_amount = value);
                        }
                    />
                </label>
            </fieldset>

            <div class="price-preview">
                {move || match preview.get() {
                    Ok(r) => view! {
                        <dl>
                            <dt>"Noches"</dt><dd>{r.nights()}</dd>
                            <dt>"Total"</dt><dd>{format_clp(r.total_price)}</dd>
                            <dt>"Abono"</dt><dd>{format_clp(r.deposit_amount)}</dd>
                            <dt>"Saldo"</dt><dd>{format_clp(r.total_price.saturating_sub(r.deposit_amount))}</dd>
                        </dl>
                    }.into_any(),
                    Err(e) => view! { <p class="invalid">{e.to_string()}</p> }.into_any(),
                }}
            </div>

            {move || error.get().map(|e| view! { <p class="error">"Error: " {e}</p> })}

            <div class="form-actions">
                <a href="/" class="cancel-link">"Cancelar"</a>
                <button type="submit" disabled=move || saving.get()>
                    {move || if saving.get() { "Guardando…" } else { "Guardar" }}
                </button>
            </div>
        </form>
    }
}

/// Parse, price and validate the draft.
fn priced(draft: &ReservationDraft, rates: &Rates) -> Result<Reservation, ReservationError> {
    let r = draft.to_reservation("", rates)?;
    r.validate()?;
    Ok(r)
}

fn input_field(
    label: &'static str,
    kind: &'static str,
    draft: RwSignal<ReservationDraft>,
    get: Getter,
    set: Setter,
) -> impl IntoView {
    view! {
        <label class="field">
            <span>{label}</span>
            <input
                type=kind
                prop:value=move || draft.with(|d| get(d).clone())
                on:input=move |ev| {
                    let value = event_target_value(&ev);
                    draft.update(|d| *set(d) = value);
                }
            />
        </label>
    }
}

fn select_field(
    label: &'static str,
    options: Vec<(&'static str, &'static str)>,
    draft: RwSignal<ReservationDraft>,
    get: Getter,
    set: Setter,
) -> impl IntoView {
    view! {
        <label class="field">
            <span>{label}</span>
            <select on:change=move |ev| {
                let value = event_target_value(&ev);
                draft.update(|d| *set(d) = value);
            }>
                {options
                    .into_iter()
                    .map(|(value, text)| {
                        view! {
                            <option value=value selected=move || draft.with(|d| get(d) == value)>
                                {text}
                            </option>
                        }
                    })
                    .collect_view()}
            </select>
        </label>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priced_rejects_invalid_drafts() {
        let rates = Rates::default();
        let mut draft = ReservationDraft {
            guest_name: "Ana".into(),
            check_in: "2025-06-05".into(),
            check_out: "2025-06-02".into(),
            ..ReservationDraft::blank()
        };
        assert!(matches!(priced(&draft, &rates), Err(ReservationError::InvalidDates { .. })));

        draft.check_out = "2025-06-07".into();
        draft.adults = "0".into();
        assert_eq!(priced(&draft, &rates), Err(ReservationError::NoGuests));

        draft.adults = "1".into();
        draft.deposit_kind = "manual".into();
        draft.deposit_amount = "999999".into();
        assert_eq!(priced(&draft, &rates).unwrap().deposit_amount, 50_000);

        draft.deposit_amount = "10000".into();
        let r = priced(&draft, &rates).unwrap();
        assert_eq!(r.total_price, 2 * 25_000);
        assert_eq!(r.deposit_amount, 10_000);
    }
}
