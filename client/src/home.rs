use leptos::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;

use toxicos_shared::profile::{HomeContent, SessionUser};
use toxicos_shared::ranking::podium;
use toxicos_shared::season::SeasonParticipant;

use crate::api;
use crate::app::CurrentUser;

/// Clan roster capacity shown on the home card.
const CLAN_CAPACITY: usize = 40;

/// Landing page: clan info card, season podium and editable content blocks.
#[component]
pub fn HomePage() -> impl IntoView {
    let CurrentUser(user) = expect_context();
    let content: RwSignal<HomeContent> = RwSignal::new(HomeContent::default());
    let top_players: RwSignal<Vec<SeasonParticipant>> = RwSignal::new(Vec::new());
    let member_count: RwSignal<usize> = RwSignal::new(0);
    let loading: RwSignal<bool> = RwSignal::new(true);
    let load_started: RwSignal<bool> = RwSignal::new(false);
    let editing: RwSignal<bool> = RwSignal::new(false);
    let saving: RwSignal<bool> = RwSignal::new(false);

    let load_home = move || {
        spawn_local(async move {
            match api::fetch_seasons().await {
                Ok(seasons) => {
                    if let Some(latest) = seasons.last() {
                        top_players.set(podium(&latest.participants));
                        member_count.set(latest.participants.len());
                    }
                }
                Err(e) => {
                    web_sys::console::warn_1(&format!("seasons fetch failed: {e}").into());
                }
            }
            match api::fetch_home_content().await {
                Ok(home) => content.set(home),
                Err(e) => {
                    web_sys::console::warn_1(&format!("home content fetch failed: {e}").into());
                }
            }
            loading.set(false);
        });
    };

    Effect::new(move || {
        if load_started.get_untracked() {
            return;
        }
        load_started.set(true);
        load_home();
    });

    let on_save = move |_| {
        if saving.get_untracked() {
            return;
        }
        saving.set(true);
        let snapshot = content.get_untracked();
        spawn_local(async move {
            match api::update_home_content(&snapshot).await {
                Ok(()) => editing.set(false),
                Err(e) => {
                    if let Some(window) = web_sys::window() {
                        let _ = window
                            .alert_with_message(&format!("Falha ao salvar o conteúdo: {e}"));
                    }
                }
            }
            saving.set(false);
        });
    };

    let on_cancel = move |_| {
        editing.set(false);
        loading.set(true);
        load_home();
    };

    let is_admin = move || user.get().as_ref().is_some_and(SessionUser::is_admin);

    view! {
        <div>
            {move || {
                is_admin().then(|| {
                    if editing.get() {
                        view! {
                            <div style="display: flex; gap: 8px; margin-bottom: 14px;">
                                <button style=BUTTON_STYLE disabled=move || saving.get() on:click=on_save>
                                    {move || if saving.get() { "Salvando..." } else { "Salvar Alterações" }}
                                </button>
                                <button style=GHOST_BUTTON_STYLE disabled=move || saving.get() on:click=on_cancel>
                                    "Cancelar"
                                </button>
                            </div>
                        }
                        .into_any()
                    } else {
                        view! {
                            <div style="margin-bottom: 14px;">
                                <button style=GHOST_BUTTON_STYLE on:click=move |_| editing.set(true)>
                                    "Editar Página"
                                </button>
                            </div>
                        }
                        .into_any()
                    }
                })
            }}

            <div style=SECTION_STYLE>
                <h1 style="font-family: 'Silkscreen', monospace; color: #f5c542; letter-spacing: 0.1em; margin-top: 0;">"Tóxicøs"</h1>
                <div style="display: flex; gap: 30px; flex-wrap: wrap;">
                    <div style="flex: 1; min-width: 240px;">
                        <h3 style="color: #e2e0d8;">"Informações do Clã"</h3>
                        {move || {
                            if editing.get() {
                                view! {
                                    <div>
                                        <EditField
                                            placeholder="Líder"
                                            value=Signal::derive(move || content.get().leader)
                                            on_change=move |v| content.update(|c| c.leader = v)
                                        />
                                        <EditField
                                            placeholder="Foco"
                                            value=Signal::derive(move || content.get().focus)
                                            on_change=move |v| content.update(|c| c.focus = v)
                                        />
                                        <EditField
                                            placeholder="Liga"
                                            value=Signal::derive(move || content.get().league)
                                            on_change=move |v| content.update(|c| c.league = v)
                                        />
                                    </div>
                                }
                                .into_any()
                            } else {
                                let c = content.get();
                                view! {
                                    <ul style="color: #9a9590; line-height: 1.8; padding-left: 18px;">
                                        <li>{format!("Líder: {}", c.leader)}</li>
                                        <li>{format!("Membros: {} / {}", member_count.get(), CLAN_CAPACITY)}</li>
                                        <li>{format!("Foco: {}", c.focus)}</li>
                                        <li>{format!("Liga Atual: {}", c.league)}</li>
                                    </ul>
                                }
                                .into_any()
                            }
                        }}
                    </div>
                    <div style="flex: 1; min-width: 240px;">
                        <h3 style="color: #e2e0d8;">"Requisitos de Alistamento"</h3>
                        {move || {
                            if editing.get() {
                                // Untracked snapshot: keystrokes update `content`
                                // without recreating the input elements.
                                let requirements = content.get_untracked().requirements;
                                view! {
                                    <div>
                                        {requirements.iter().enumerate().map(|(index, req)| {
                                            let req = req.clone();
                                            view! {
                                                <EditField
                                                    placeholder="Requisito"
                                                    value=Signal::derive(move || req.clone())
                                                    on_change=move |v| content.update(|c| {
                                                        if let Some(slot) = c.requirements.get_mut(index) {
                                                            *slot = v;
                                                        }
                                                    })
                                                />
                                            }
                                        }).collect_view()}
                                    </div>
                                }
                                .into_any()
                            } else {
                                view! {
                                    <ul style="color: #9a9590; line-height: 1.8; padding-left: 18px;">
                                        {content.get().requirements.into_iter().map(|req| view! {
                                            <li>{req}</li>
                                        }).collect_view()}
                                    </ul>
                                }
                                .into_any()
                            }
                        }}
                    </div>
                </div>
            </div>

            <div style=SECTION_STYLE>
                <h2 style=SECTION_TITLE_STYLE>"Pódio da Temporada"</h2>
                {move || {
                    if loading.get() {
                        return view! { <p style="color: #5a5860; text-align: center;">"Analisando dados..."</p> }.into_any();
                    }
                    let players = top_players.get();
                    if players.is_empty() {
                        return view! { <p style="color: #5a5860; text-align: center;">"Sem dados de temporada."</p> }.into_any();
                    }
                    // Podium render order puts the champion in the center slot.
                    view! {
                        <div style="display: flex; justify-content: center; align-items: flex-end; gap: 16px;">
                            {[1usize, 0, 2].iter().filter_map(|&rank| {
                                let player = players.get(rank)?;
                                let height = [96, 72, 56][rank];
                                Some(view! {
                                    <div style="text-align: center;">
                                        <div style=format!("width: 90px; height: {height}px; background: linear-gradient(to top, #1a1d2a, rgba(245,197,66,0.35)); border: 1px solid #282c3e; border-radius: 6px 6px 0 0;") />
                                        <p style="color: #e2e0d8; margin: 6px 0 0; font-size: 0.88rem;">{player.name.clone()}</p>
                                        <p style="color: #f5c542; margin: 0; font-size: 0.8rem;">{format!("{} ATK", player.phase)}</p>
                                    </div>
                                })
                            }).collect_view()}
                        </div>
                    }
                    .into_any()
                }}
            </div>

            <ContentBlock
                title="Sobre Nós"
                editing=editing
                value=Signal::derive(move || content.get().about_us)
                on_change=move |v| content.update(|c| c.about_us = v)
            />
            <ContentBlock
                title="Conteúdo"
                editing=editing
                value=Signal::derive(move || content.get().content_section)
                on_change=move |v| content.update(|c| c.content_section = v)
            />

            <footer style="text-align: center; color: #5a5860; font-size: 0.78rem; margin: 24px 0;">
                <p>"© 2025 Tóxicøs. Todos os direitos reservados."</p>
            </footer>
        </div>
    }
}

const SECTION_STYLE: &str = "background: #13161f; border: 1px solid #282c3e; border-radius: 8px; padding: 18px 20px; margin-bottom: 16px;";
const SECTION_TITLE_STYLE: &str = "margin-top: 0; color: #e2e0d8; font-size: 1.05rem; text-align: center;";
const BUTTON_STYLE: &str = "background: #f5c542; border: none; border-radius: 6px; color: #0c0e17; padding: 8px 14px; cursor: pointer; font-weight: 600; font-size: 0.82rem;";
const GHOST_BUTTON_STYLE: &str = "background: none; border: 1px solid #282c3e; border-radius: 6px; color: #9a9590; padding: 8px 14px; cursor: pointer; font-size: 0.82rem;";

#[component]
fn EditField(
    placeholder: &'static str,
    value: Signal<String>,
    on_change: impl Fn(String) + Copy + Send + 'static,
) -> impl IntoView {
    view! {
        <input
            style="display: block; width: 100%; box-sizing: border-box; margin-bottom: 8px; padding: 8px 10px; background: #1a1d2a; border: 1px solid #282c3e; border-radius: 6px; color: #e2e0d8; font-size: 0.85rem; outline: none;"
            type="text"
            placeholder=placeholder
            prop:value=move || value.get()
            on:input=move |e| {
                let Some(target) = e.target() else {
                    return;
                };
                let Ok(input) = target.dyn_into::<web_sys::HtmlInputElement>() else {
                    return;
                };
                on_change(input.value());
            }
        />
    }
}

#[component]
fn ContentBlock(
    title: &'static str,
    editing: RwSignal<bool>,
    value: Signal<String>,
    on_change: impl Fn(String) + Copy + Send + 'static,
) -> impl IntoView {
    view! {
        <div style=SECTION_STYLE>
            <h2 style=SECTION_TITLE_STYLE>{title}</h2>
            {move || {
                if editing.get() {
                    view! {
                        <textarea
                            style="width: 100%; box-sizing: border-box; min-height: 110px; padding: 10px 12px; background: #1a1d2a; border: 1px solid #282c3e; border-radius: 6px; color: #e2e0d8; font-size: 0.85rem; outline: none; resize: vertical;"
                            prop:value=move || value.get()
                            on:input=move |e| {
                                let Some(target) = e.target() else {
                                    return;
                                };
                                let Ok(area) = target.dyn_into::<web_sys::HtmlTextAreaElement>() else {
                                    return;
                                };
                                on_change(area.value());
                            }
                        >
                        </textarea>
                    }
                    .into_any()
                } else {
                    view! {
                        <p style="color: #9a9590; text-align: center; line-height: 1.6;">{value.get()}</p>
                    }
                    .into_any()
                }
            }}
        </div>
    }
}
