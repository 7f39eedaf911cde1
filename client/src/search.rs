use std::cell::RefCell;

use gloo_timers::callback::Timeout;
use leptos::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;

use toxicos_shared::profile::{MemberProfile, RankHistory, SearchResult};

use crate::api;

/// Keystroke-to-request debounce window.
const SEARCH_DEBOUNCE_MS: u32 = 300;
/// Queries shorter than this never hit the API.
const MIN_QUERY_LEN: usize = 2;

thread_local! {
    static SEARCH_DEBOUNCE: RefCell<Option<Timeout>> = const { RefCell::new(None) };
}

/// Nav-bar member search: debounced lookup with a result dropdown that opens
/// a profile modal on selection.
#[component]
pub fn MemberSearch() -> impl IntoView {
    let query: RwSignal<String> = RwSignal::new(String::new());
    let results: RwSignal<Vec<SearchResult>> = RwSignal::new(Vec::new());
    let dropdown_open: RwSignal<bool> = RwSignal::new(false);
    let selected: RwSignal<Option<String>> = RwSignal::new(None);
    // Guards against out-of-order responses from superseded queries.
    let search_nonce: RwSignal<u64> = RwSignal::new(0);

    Effect::new(move || {
        let q = query.get();
        SEARCH_DEBOUNCE.with(|slot| {
            if let Some(pending) = slot.borrow_mut().take() {
                pending.cancel();
            }
        });

        let trimmed = q.trim().to_string();
        if trimmed.len() < MIN_QUERY_LEN {
            results.set(Vec::new());
            return;
        }

        let request_nonce = search_nonce.get_untracked().wrapping_add(1);
        search_nonce.set(request_nonce);

        let timeout = Timeout::new(SEARCH_DEBOUNCE_MS, move || {
            spawn_local(async move {
                match api::search_members(&trimmed).await {
                    Ok(found) => {
                        if search_nonce.get_untracked() != request_nonce {
                            return;
                        }
                        results.set(found);
                    }
                    Err(e) => {
                        web_sys::console::warn_1(&format!("member search failed: {e}").into());
                    }
                }
            });
        });
        SEARCH_DEBOUNCE.with(|slot| *slot.borrow_mut() = Some(timeout));
    });

    let on_select = move |habby_id: String| {
        query.set(String::new());
        results.set(Vec::new());
        dropdown_open.set(false);
        selected.set(Some(habby_id));
    };

    view! {
        <div style="position: relative;">
            <input
                style="width: 220px; padding: 7px 10px; background: #1a1d2a; border: 1px solid #282c3e; border-radius: 6px; color: #e2e0d8; font-size: 0.82rem; outline: none;"
                type="text"
                placeholder="Buscar membro por Nick ou ID..."
                prop:value=move || query.get()
                on:input=move |e| {
                    let Some(target) = e.target() else {
                        return;
                    };
                    let Ok(input) = target.dyn_into::<web_sys::HtmlInputElement>() else {
                        return;
                    };
                    query.set(input.value());
                }
                on:focus=move |_| dropdown_open.set(true)
                on:blur=move |_| {
                    // Give result clicks (mousedown) a beat before hiding.
                    Timeout::new(150, move || dropdown_open.set(false)).forget();
                }
            />
            {move || {
                let found = results.get();
                (dropdown_open.get() && !found.is_empty()).then(|| view! {
                    <ul style="position: absolute; top: 100%; left: 0; right: 0; z-index: 30; margin: 4px 0 0; padding: 0; list-style: none; background: #13161f; border: 1px solid #282c3e; border-radius: 6px; max-height: 260px; overflow-y: auto;">
                        {found.into_iter().map(|member| {
                            let habby_id = member.habby_id.clone();
                            view! {
                                <li
                                    style="display: flex; justify-content: space-between; gap: 10px; padding: 8px 10px; cursor: pointer; border-bottom: 1px solid rgba(40,44,62,0.5); font-size: 0.82rem;"
                                    on:mousedown=move |_| on_select(habby_id.clone())
                                >
                                    <span style="color: #e2e0d8;">{member.nick.clone()}</span>
                                    <span style="color: #5a5860;">{member.habby_id.clone()}</span>
                                </li>
                            }
                        }).collect_view()}
                    </ul>
                })
            }}
            {move || {
                selected.get().map(|habby_id| view! {
                    <SearchedProfileModal habby_id=habby_id on_close=move || selected.set(None) />
                })
            }}
        </div>
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum ModalTab {
    Status,
    History,
}

/// Profile modal with a status tab and a lazily-fetched ranking history tab.
#[component]
fn SearchedProfileModal(
    habby_id: String,
    on_close: impl Fn() + Copy + Send + 'static,
) -> impl IntoView {
    let profile: RwSignal<Option<MemberProfile>> = RwSignal::new(None);
    let history: RwSignal<Option<RankHistory>> = RwSignal::new(None);
    let history_requested: RwSignal<bool> = RwSignal::new(false);
    let loading: RwSignal<bool> = RwSignal::new(true);
    let tab: RwSignal<ModalTab> = RwSignal::new(ModalTab::Status);

    let id_for_profile = habby_id.clone();
    Effect::new(move || {
        if !loading.get_untracked() {
            return;
        }
        let habby_id = id_for_profile.clone();
        spawn_local(async move {
            match api::fetch_profile(&habby_id).await {
                Ok(sheet) => profile.set(Some(sheet)),
                Err(e) => {
                    web_sys::console::warn_1(&format!("profile fetch failed: {e}").into());
                    profile.set(None);
                }
            }
            loading.set(false);
        });
    });

    // History loads once, on first visit to its tab.
    let id_for_history = habby_id.clone();
    Effect::new(move || {
        if tab.get() != ModalTab::History || history_requested.get_untracked() {
            return;
        }
        history_requested.set(true);
        let habby_id = id_for_history.clone();
        spawn_local(async move {
            match api::fetch_rank_history(&habby_id).await {
                Ok(entry) => history.set(Some(entry)),
                Err(e) => {
                    web_sys::console::warn_1(&format!("rank history fetch failed: {e}").into());
                }
            }
        });
    });

    let tab_button = move |target: ModalTab, label: &'static str| {
        view! {
            <button
                style=move || {
                    let active = tab.get() == target;
                    format!(
                        "background: none; border: none; border-bottom: 2px solid {}; color: {}; padding: 6px 12px; cursor: pointer; font-size: 0.85rem;",
                        if active { "#f5c542" } else { "transparent" },
                        if active { "#f5c542" } else { "#9a9590" },
                    )
                }
                on:click=move |_| tab.set(target)
            >
                {label}
            </button>
        }
    };

    view! {
        <div style="position: fixed; inset: 0; z-index: 50; background: rgba(0,0,0,0.65); display: flex; align-items: center; justify-content: center;">
            <div style="background: #13161f; border: 1px solid #282c3e; border-radius: 8px; padding: 18px 20px; width: min(420px, 92vw); max-height: 80vh; overflow-y: auto; position: relative;">
                <button
                    style="position: absolute; top: 8px; right: 12px; background: none; border: none; color: #9a9590; font-size: 1.3rem; cursor: pointer;"
                    title="Fechar"
                    on:click=move |_| on_close()
                >"×"</button>

                {move || {
                    if loading.get() {
                        return view! { <p style="color: #5a5860;">"Carregando perfil..."</p> }.into_any();
                    }
                    let Some(sheet) = profile.get() else {
                        return view! { <p style="color: #5a5860;">"Perfil não encontrado."</p> }.into_any();
                    };
                    view! {
                        <div style="display: flex; align-items: center; gap: 12px; margin-bottom: 10px;">
                            <img
                                src=sheet.profile_pic_url.clone()
                                alt="Perfil"
                                style="width: 56px; height: 56px; border-radius: 50%; border: 2px solid #282c3e; object-fit: cover;"
                            />
                            <div>
                                <h2 style="margin: 0; color: #e2e0d8; font-size: 1.05rem;">{sheet.nick.clone()}</h2>
                                <p style="margin: 2px 0 0; color: #9a9590; font-size: 0.8rem;">
                                    {format!("ID Habby: {}", sheet.habby_id)}
                                </p>
                            </div>
                        </div>
                        <div style="border-bottom: 1px solid #282c3e; margin-bottom: 10px;">
                            {tab_button(ModalTab::Status, "Status")}
                            {tab_button(ModalTab::History, "Histórico")}
                        </div>
                        {move || {
                            match tab.get() {
                                ModalTab::Status => {
                                    let Some(sheet) = profile.get() else {
                                        return ().into_any();
                                    };
                                    view! {
                                        <div>
                                            <FieldRow label="ATK Total" value=sheet.atk.to_string() />
                                            <FieldRow label="HP Total" value=sheet.hp.to_string() />
                                            <FieldRow label="ATQ Sobrevivente" value=sheet.survivor_base_atk.to_string() />
                                            <FieldRow label="HP Sobrevivente" value=sheet.survivor_base_hp.to_string() />
                                            <FieldRow label="ATQ Pet" value=sheet.pet_base_atk.to_string() />
                                            <FieldRow label="HP Pet" value=sheet.pet_base_hp.to_string() />
                                        </div>
                                    }
                                    .into_any()
                                }
                                ModalTab::History => match history.get() {
                                    Some(entry) => view! {
                                        <div>
                                            <FieldRow label="Posição no Ranking" value=format!("{}º", entry.position) />
                                            <FieldRow label="Pontuação (Acesso)" value=entry.access_phase.to_string() />
                                            <FieldRow
                                                label="Evolução vs Temporada Anterior"
                                                value=entry.evolution.map(|d| d.to_string()).unwrap_or_else(|| "-".to_string())
                                            />
                                        </div>
                                    }
                                    .into_any(),
                                    None => view! {
                                        <p style="color: #5a5860; font-size: 0.85rem;">
                                            "Carregando histórico ou nenhum encontrado..."
                                        </p>
                                    }
                                    .into_any(),
                                },
                            }
                        }}
                    }
                    .into_any()
                }}
            </div>
        </div>
    }
}

#[component]
fn FieldRow(label: &'static str, value: String) -> impl IntoView {
    view! {
        <div style="display: flex; justify-content: space-between; gap: 12px; padding: 5px 0; border-bottom: 1px solid rgba(40,44,62,0.5); font-size: 0.84rem;">
            <span style="color: #9a9590;">{label}</span>
            <span style="color: #e2e0d8;">{value}</span>
        </div>
    }
}
