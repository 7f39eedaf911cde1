use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

use toxicos_shared::roster::HONOR_TIER_SIZE;
use toxicos_shared::season::HonorSeason;

use crate::date_format::format_date_br;

/// Public honor list: one page per finalized season, newest selected first.
#[component]
pub fn HonorPage() -> impl IntoView {
    let seasons: RwSignal<Vec<HonorSeason>> = RwSignal::new(Vec::new());
    let loading: RwSignal<bool> = RwSignal::new(true);
    let load_started: RwSignal<bool> = RwSignal::new(false);
    // 1-based season page, newest last (mirrors the season numbering).
    let current_page: RwSignal<usize> = RwSignal::new(1);

    Effect::new(move || {
        if load_started.get_untracked() {
            return;
        }
        load_started.set(true);
        spawn_local(async move {
            match crate::api::fetch_honor_seasons().await {
                Ok(list) => {
                    if !list.is_empty() {
                        current_page.set(list.len());
                    }
                    seasons.set(list);
                }
                Err(e) => {
                    web_sys::console::warn_1(&format!("honor seasons fetch failed: {e}").into());
                }
            }
            loading.set(false);
        });
    });

    view! {
        <div>
            <h1 style="font-family: 'Silkscreen', monospace; color: #f5c542; letter-spacing: 0.08em;">"Membros de Honra"</h1>
            {move || {
                if loading.get() {
                    return view! { <p style="color: #5a5860;">"Carregando dados de honra..."</p> }.into_any();
                }
                let list = seasons.get();
                let page = current_page.get();
                let Some(season) = page.checked_sub(1).and_then(|i| list.get(i)).cloned() else {
                    return view! { <p style="color: #5a5860;">"Nenhuma temporada de honra encontrada."</p> }.into_any();
                };
                let total = list.len();
                view! {
                    <div style="color: #9a9590; font-size: 0.88rem; margin-bottom: 12px;">
                        {format!(
                            "Temporada {} - {} até {}",
                            page,
                            format_date_br(&season.start_date),
                            format_date_br(&season.end_date),
                        )}
                    </div>
                    <table style="width: 100%; border-collapse: collapse; font-size: 0.88rem;">
                        <thead>
                            <tr style="color: #9a9590; text-align: left;">
                                <th style=CELL_STYLE>"Pos."</th>
                                <th style=CELL_STYLE>"Nome"</th>
                                <th style=CELL_STYLE>"ID Habby"</th>
                                <th style=CELL_STYLE>"Acesso"</th>
                                <th style=CELL_STYLE>"Ataque"</th>
                            </tr>
                        </thead>
                        <tbody>
                            {season.participants.iter().enumerate().map(|(index, p)| {
                                let row_style = if index < HONOR_TIER_SIZE {
                                    "background: rgba(245,197,66,0.08); color: #f5c542;"
                                } else {
                                    ""
                                };
                                view! {
                                    <tr style=row_style>
                                        <td style=CELL_STYLE>{format!("{}º", index + 1)}</td>
                                        <td style=CELL_STYLE>{p.name.clone()}</td>
                                        <td style=CELL_STYLE>{p.habby_id.clone()}</td>
                                        <td style=CELL_STYLE>{p.access_phase.clone()}</td>
                                        <td style=CELL_STYLE>{p.attack_phase.clone()}</td>
                                    </tr>
                                }
                            }).collect_view()}
                        </tbody>
                    </table>
                    <Pagination current=current_page total=total />
                }
                .into_any()
            }}
        </div>
    }
}

const CELL_STYLE: &str = "padding: 7px 10px; border-bottom: 1px solid #282c3e;";

/// Previous/next season pager shared by the honor and ranking pages.
#[component]
pub fn Pagination(current: RwSignal<usize>, total: usize) -> impl IntoView {
    let button_style = "background: #1a1d2a; border: 1px solid #282c3e; border-radius: 6px; color: #e2e0d8; padding: 6px 14px; cursor: pointer; font-size: 0.82rem;";

    view! {
        <div style="display: flex; gap: 10px; justify-content: center; margin-top: 14px;">
            <button
                style=button_style
                disabled=move || current.get() <= 1
                on:click=move |_| current.update(|p| *p = p.saturating_sub(1).max(1))
            >"< Anterior"</button>
            <button
                style=button_style
                disabled=move || current.get() >= total
                on:click=move |_| current.update(|p| *p = (*p + 1).min(total))
            >"Próximo >"</button>
        </div>
    }
}
