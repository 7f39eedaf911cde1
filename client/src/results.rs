use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

use toxicos_shared::profile::SessionUser;
use toxicos_shared::ranking::{RankingBoard, SeasonRanking, evolution};
use toxicos_shared::season::Season;

use crate::api;
use crate::app::CurrentUser;
use crate::date_format::format_date_br;
use crate::honor::Pagination;

/// Expedition ranking: access-phase and round-total boards per season, with
/// admin-only season deletion.
#[component]
pub fn ResultsPage() -> impl IntoView {
    let CurrentUser(user) = expect_context();
    let seasons: RwSignal<Vec<Season>> = RwSignal::new(Vec::new());
    let loading: RwSignal<bool> = RwSignal::new(true);
    let load_started: RwSignal<bool> = RwSignal::new(false);
    let deleting: RwSignal<bool> = RwSignal::new(false);
    let current_page: RwSignal<usize> = RwSignal::new(1);

    let load_seasons = move || {
        spawn_local(async move {
            match api::fetch_seasons().await {
                Ok(list) => {
                    if !list.is_empty() {
                        current_page.set(list.len());
                    }
                    seasons.set(list);
                }
                Err(e) => {
                    web_sys::console::warn_1(&format!("seasons fetch failed: {e}").into());
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
        load_seasons();
    });

    let on_delete = move |season_id: i64, page: usize| {
        if deleting.get_untracked() {
            return;
        }
        let confirmed = web_sys::window()
            .and_then(|w| {
                w.confirm_with_message(&format!(
                    "Tem certeza que deseja excluir a Temporada {page}? Esta ação não pode ser desfeita."
                ))
                .ok()
            })
            .unwrap_or(false);
        if !confirmed {
            return;
        }
        deleting.set(true);
        spawn_local(async move {
            match api::delete_season(season_id).await {
                Ok(()) => {
                    loading.set(true);
                    load_seasons();
                }
                Err(e) => {
                    web_sys::console::warn_1(&format!("season delete failed: {e}").into());
                    if let Some(window) = web_sys::window() {
                        let _ = window.alert_with_message(&format!(
                            "Não foi possível excluir a temporada: {e}"
                        ));
                    }
                }
            }
            deleting.set(false);
        });
    };

    view! {
        <div>
            <h1 style="font-family: 'Silkscreen', monospace; color: #f5c542; letter-spacing: 0.08em;">"Expedição Lunar"</h1>
            {move || {
                if loading.get() {
                    return view! { <p style="color: #5a5860;">"Carregando temporadas..."</p> }.into_any();
                }
                let list = seasons.get();
                let page = current_page.get();
                let Some(season) = page.checked_sub(1).and_then(|i| list.get(i)).cloned() else {
                    return view! { <p style="color: #5a5860;">"Nenhuma temporada encontrada."</p> }.into_any();
                };
                let total = list.len();
                let previous = (page >= 2).then(|| list[page - 2].clone());
                let ranking = SeasonRanking::build(&season.participants);
                let is_admin = user.get().as_ref().is_some_and(SessionUser::is_admin);
                let season_id = season.id;

                view! {
                    <div style="display: flex; align-items: center; gap: 14px; flex-wrap: wrap; margin-bottom: 12px;">
                        <div style="color: #9a9590; font-size: 0.88rem;">
                            {format!(
                                "Temporada {} - {} até {}",
                                page,
                                format_date_br(&season.start_date),
                                format_date_br(&season.end_date),
                            )}
                        </div>
                        {is_admin.then(|| view! {
                            <button
                                style="background: none; border: 1px solid #7f1d1d; border-radius: 6px; color: #fca5a5; padding: 5px 12px; cursor: pointer; font-size: 0.8rem;"
                                disabled=move || deleting.get()
                                on:click=move |_| on_delete(season_id, page)
                            >
                                {move || if deleting.get() { "Excluindo..." } else { "Excluir Temporada" }}
                            </button>
                        })}
                    </div>

                    <div style="display: flex; gap: 20px; flex-wrap: wrap; align-items: flex-start;">
                        <AccessBoard
                            board=ranking.access.clone()
                            season=season.clone()
                            previous=previous.clone()
                        />
                        <ExpeditionBoard board=ranking.expedition.clone() />
                    </div>
                    <Pagination current=current_page total=total />
                }
                .into_any()
            }}
        </div>
    }
}

const CELL_STYLE: &str = "padding: 6px 10px; border-bottom: 1px solid #282c3e;";
const TABLE_WRAPPER_STYLE: &str = "flex: 1; min-width: 320px; background: #13161f; border: 1px solid #282c3e; border-radius: 8px; padding: 14px 16px;";
const INACTIVE_ROW_STYLE: &str = "color: #5a5860;";

fn evolution_cell(name: &str, current: &Season, previous: Option<&Season>) -> impl IntoView {
    let delta = previous.and_then(|prev| evolution(name, current, prev));
    let (text, color) = match delta {
        Some(d) if d > 0 => (format!("+{d}"), "#4ade80"),
        Some(d) if d < 0 => (d.to_string(), "#fca5a5"),
        Some(_) => ("0".to_string(), "#9a9590"),
        None => ("-".to_string(), "#9a9590"),
    };
    view! { <td style=format!("{CELL_STYLE} color: {color};")>{text}</td> }
}

#[component]
fn AccessBoard(board: RankingBoard, season: Season, previous: Option<Season>) -> impl IntoView {
    let active_len = board.active.len();
    view! {
        <div style=TABLE_WRAPPER_STYLE>
            <div style="color: #f5c542; font-size: 0.92rem; margin-bottom: 8px;">"Rank de Acesso"</div>
            <table style="width: 100%; border-collapse: collapse; font-size: 0.85rem;">
                <thead>
                    <tr style="color: #9a9590; text-align: left;">
                        <th style=CELL_STYLE>"Posição"</th>
                        <th style=CELL_STYLE>"Nome"</th>
                        <th style=CELL_STYLE>"Fase de Acesso"</th>
                        <th style=CELL_STYLE>"Evolução"</th>
                    </tr>
                </thead>
                <tbody>
                    {board.active.iter().enumerate().map(|(i, p)| view! {
                        <tr>
                            <td style=CELL_STYLE>{format!("{}º", i + 1)}</td>
                            <td style=CELL_STYLE>{p.name.clone()}</td>
                            <td style=CELL_STYLE>{p.phase}</td>
                            {evolution_cell(&p.name, &season, previous.as_ref())}
                        </tr>
                    }).collect_view()}
                    {board.remaining.iter().enumerate().map(|(i, p)| view! {
                        <tr style=INACTIVE_ROW_STYLE>
                            <td style=CELL_STYLE>{format!("{}º", active_len + i + 1)}</td>
                            <td style=CELL_STYLE>{p.name.clone()}</td>
                            <td style=CELL_STYLE>{p.phase}</td>
                            {evolution_cell(&p.name, &season, previous.as_ref())}
                        </tr>
                    }).collect_view()}
                </tbody>
                <tfoot>
                    <tr style="color: #f5c542;">
                        <td style=CELL_STYLE colspan="2">"Total (Top 30)"</td>
                        <td style=CELL_STYLE colspan="2">{board.active_total}</td>
                    </tr>
                </tfoot>
            </table>
        </div>
    }
}

#[component]
fn ExpeditionBoard(board: RankingBoard) -> impl IntoView {
    let active_len = board.active.len();
    view! {
        <div style=TABLE_WRAPPER_STYLE>
            <div style="color: #f5c542; font-size: 0.92rem; margin-bottom: 8px;">"Expedição Lunar"</div>
            <table style="width: 100%; border-collapse: collapse; font-size: 0.85rem;">
                <thead>
                    <tr style="color: #9a9590; text-align: left;">
                        <th style=CELL_STYLE>"Posição"</th>
                        <th style=CELL_STYLE>"Nome"</th>
                        <th style=CELL_STYLE>"1ª Rodada"</th>
                        <th style=CELL_STYLE>"2ª Rodada"</th>
                        <th style=CELL_STYLE>"3ª Rodada"</th>
                        <th style=CELL_STYLE>"Total"</th>
                    </tr>
                </thead>
                <tbody>
                    {board.active.iter().enumerate().map(|(i, p)| view! {
                        <tr>
                            <td style=CELL_STYLE>{format!("{}º", i + 1)}</td>
                            <td style=CELL_STYLE>{p.name.clone()}</td>
                            <td style=CELL_STYLE>{p.r1}</td>
                            <td style=CELL_STYLE>{p.r2}</td>
                            <td style=CELL_STYLE>{p.r3}</td>
                            <td style=CELL_STYLE>{p.round_total()}</td>
                        </tr>
                    }).collect_view()}
                    {board.remaining.iter().enumerate().map(|(i, p)| view! {
                        <tr style=INACTIVE_ROW_STYLE>
                            <td style=CELL_STYLE>{format!("{}º", active_len + i + 1)}</td>
                            <td style=CELL_STYLE>{p.name.clone()}</td>
                            <td style=CELL_STYLE>{p.r1}</td>
                            <td style=CELL_STYLE>{p.r2}</td>
                            <td style=CELL_STYLE>{p.r3}</td>
                            <td style=CELL_STYLE>{p.round_total()}</td>
                        </tr>
                    }).collect_view()}
                </tbody>
                <tfoot>
                    <tr style="color: #f5c542;">
                        <td style=CELL_STYLE colspan="5">"Total (Top 30)"</td>
                        <td style=CELL_STYLE>{board.active_total}</td>
                    </tr>
                </tfoot>
            </table>
        </div>
    }
}
