use leptos::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;

use toxicos_shared::csv::parse_roster_records;
use toxicos_shared::roster::{
    HONOR_TIER_SIZE, MergeOutcome, NO_MARKER, Roster, RosterEntry, RosterError, YES_MARKER,
    is_affirmative,
};
use toxicos_shared::season::{NewHonorSeason, validate_season};

use crate::api;

/// Blocking notice shown above the management screen. Every operation outcome
/// lands here; errors stay until dismissed or replaced.
#[derive(Clone)]
struct Notice {
    text: String,
    is_error: bool,
}

impl Notice {
    fn info(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_error: false,
        }
    }

    fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_error: true,
        }
    }
}

fn roster_error_text(err: &RosterError) -> String {
    match err {
        RosterError::MissingField => "Nome e Habby ID são obrigatórios.".to_string(),
        RosterError::DuplicateHabbyId(id) => format!("Habby ID já cadastrado: {id}"),
        RosterError::OutOfBounds { .. } => "Posição inválida na lista.".to_string(),
        RosterError::MissingDate => "Defina as datas de início e fim.".to_string(),
        RosterError::InvalidDateRange => {
            "A data final não pode ser anterior à inicial.".to_string()
        }
        RosterError::EmptyRoster => "Adicione membros antes de finalizar a temporada.".to_string(),
    }
}

fn marker(affirmative: bool) -> String {
    if affirmative { YES_MARKER } else { NO_MARKER }.to_string()
}

fn input_value(e: &leptos::ev::Event) -> Option<String> {
    let target = e.target()?;
    let input = target.dyn_into::<web_sys::HtmlInputElement>().ok()?;
    Some(input.value())
}

fn confirm(message: &str) -> bool {
    web_sys::window()
        .and_then(|w| w.confirm_with_message(message).ok())
        .unwrap_or(false)
}

/// Honor roster management screen: manual add/edit, CSV bulk import,
/// eligibility reordering, save-changes and season finalization.
#[component]
pub fn HonorRegisterPage() -> impl IntoView {
    let roster: RwSignal<Roster> = RwSignal::new(Roster::new());
    let roster_loading: RwSignal<bool> = RwSignal::new(true);
    let load_started: RwSignal<bool> = RwSignal::new(false);

    // Manual entry form
    let name: RwSignal<String> = RwSignal::new(String::new());
    let habby_id: RwSignal<String> = RwSignal::new(String::new());
    let access_ok: RwSignal<bool> = RwSignal::new(false);
    let attack_ok: RwSignal<bool> = RwSignal::new(false);
    let editing: RwSignal<Option<usize>> = RwSignal::new(None);

    // Season finalization
    let start_date: RwSignal<String> = RwSignal::new(String::new());
    let end_date: RwSignal<String> = RwSignal::new(String::new());

    // In-flight guards: controls stay disabled while a request is outstanding
    // so overlapping writes cannot race each other.
    let saving: RwSignal<bool> = RwSignal::new(false);
    let finalizing: RwSignal<bool> = RwSignal::new(false);

    let notice: RwSignal<Option<Notice>> = RwSignal::new(None);

    // Load the working roster once on screen entry.
    Effect::new(move || {
        if load_started.get_untracked() {
            return;
        }
        load_started.set(true);
        spawn_local(async move {
            match api::fetch_honor_roster().await {
                Ok(current) => roster.set(current),
                Err(e) => {
                    notice.set(Some(Notice::error(format!(
                        "Falha ao carregar a lista de honra: {e}"
                    ))));
                }
            }
            roster_loading.set(false);
        });
    });

    let clear_form = move || {
        name.set(String::new());
        habby_id.set(String::new());
        access_ok.set(false);
        attack_ok.set(false);
        editing.set(None);
    };

    let on_submit_entry = move |_| {
        let entry = RosterEntry {
            name: name.get_untracked().trim().to_string(),
            habby_id: habby_id.get_untracked().trim().to_string(),
            access_phase: marker(access_ok.get_untracked()),
            attack_phase: marker(attack_ok.get_untracked()),
        };
        let position = editing.get_untracked();
        let mut result = Ok(());
        roster.update(|r| result = r.add_or_update(entry, position));
        match result {
            Ok(()) => {
                notice.set(None);
                clear_form();
            }
            Err(e) => notice.set(Some(Notice::error(roster_error_text(&e)))),
        }
    };

    let on_edit = move |index: usize| {
        let Some(entry) = roster.with_untracked(|r| r.get(index).cloned()) else {
            return;
        };
        name.set(entry.name);
        habby_id.set(entry.habby_id);
        access_ok.set(is_affirmative(&entry.access_phase));
        attack_ok.set(is_affirmative(&entry.attack_phase));
        editing.set(Some(index));
    };

    let on_remove = move |index: usize| {
        if !confirm("Tem certeza que deseja remover este membro?") {
            return;
        }
        let mut result = Ok(());
        roster.update(|r| result = r.remove(index).map(|_| ()));
        match result {
            Ok(()) => {
                // Keep the edit target pointing at the same member.
                match editing.get_untracked() {
                    Some(i) if i == index => clear_form(),
                    Some(i) if i > index => editing.set(Some(i - 1)),
                    _ => {}
                }
                notice.set(None);
            }
            Err(e) => notice.set(Some(Notice::error(roster_error_text(&e)))),
        }
    };

    let on_reorder = move |_| {
        let mut reordered = false;
        roster.update(|r| reordered = r.reorder_by_eligibility());
        if reordered {
            notice.set(Some(Notice::info("Lista de Honra atualizada e reordenada!")));
        }
    };

    let on_csv_change = move |e: leptos::ev::Event| {
        let Some(target) = e.target() else {
            return;
        };
        let Ok(input) = target.dyn_into::<web_sys::HtmlInputElement>() else {
            return;
        };
        let Some(file) = input.files().and_then(|files| files.get(0)) else {
            return;
        };
        // Allow re-selecting the same file later.
        input.set_value("");

        let Ok(reader) = web_sys::FileReader::new() else {
            return;
        };
        let reader_for_load = reader.clone();
        let onload = wasm_bindgen::closure::Closure::once(move |_: web_sys::ProgressEvent| {
            let Ok(result) = reader_for_load.result() else {
                return;
            };
            let Some(text) = result.as_string() else {
                return;
            };
            let records = parse_roster_records(&text);
            let mut outcome = MergeOutcome::default();
            roster.update(|r| outcome = r.bulk_merge(records));
            notice.set(Some(Notice::info(format!(
                "{} membros importados do CSV ({} novos, {} atualizados).",
                outcome.total(),
                outcome.added,
                outcome.updated,
            ))));
        });
        reader.set_onload(Some(onload.as_ref().unchecked_ref()));
        onload.forget();
        if reader.read_as_text(&file).is_err() {
            notice.set(Some(Notice::error("Não foi possível ler o arquivo CSV.")));
        }
    };

    let request_in_flight = move || saving.get() || finalizing.get();

    let on_save_changes = move |_| {
        if saving.get_untracked() || finalizing.get_untracked() {
            return;
        }
        let snapshot = roster.get_untracked();
        saving.set(true);
        spawn_local(async move {
            match api::save_roster_changes(&snapshot).await {
                Ok(()) => {
                    notice.set(Some(Notice::info("Alterações salvas na temporada atual.")));
                }
                Err(e) => notice.set(Some(Notice::error(format!("Erro ao salvar: {e}")))),
            }
            saving.set(false);
        });
    };

    let on_finalize = move |_| {
        if saving.get_untracked() || finalizing.get_untracked() {
            return;
        }
        let snapshot = roster.get_untracked();
        let start = start_date.get_untracked();
        let end = end_date.get_untracked();
        // Full validation before anything leaves the client.
        if let Err(e) = validate_season(&snapshot, &start, &end) {
            notice.set(Some(Notice::error(roster_error_text(&e))));
            return;
        }
        finalizing.set(true);
        let payload = NewHonorSeason {
            start_date: start,
            end_date: end,
            participants: snapshot.into_entries(),
        };
        spawn_local(async move {
            match api::finalize_season(&payload).await {
                Ok(message) => {
                    notice.set(Some(Notice::info(message)));
                    // The roster stays for continued editing; only dates reset.
                    start_date.set(String::new());
                    end_date.set(String::new());
                }
                Err(e) => notice.set(Some(Notice::error(format!("Erro ao finalizar: {e}")))),
            }
            finalizing.set(false);
        });
    };

    view! {
        <div>
            <h1 style="font-family: 'Silkscreen', monospace; color: #f5c542; letter-spacing: 0.08em;">"Gerenciar Lista de Honra"</h1>

            {move || {
                notice.get().map(|n| {
                    let (border, color) = if n.is_error {
                        ("#7f1d1d", "#fca5a5")
                    } else {
                        ("#f5c542", "#f5c542")
                    };
                    view! {
                        <div style=format!("display: flex; justify-content: space-between; align-items: center; gap: 12px; border: 1px solid {border}; border-radius: 6px; background: #13161f; padding: 10px 14px; margin: 12px 0; color: {color}; font-size: 0.88rem;")>
                            <span>{n.text}</span>
                            <button
                                style="background: none; border: none; color: inherit; cursor: pointer; font-size: 1rem;"
                                on:click=move |_| notice.set(None)
                            >"×"</button>
                        </div>
                    }
                })
            }}

            <Section title="Importar por CSV">
                <p style="color: #9a9590; font-size: 0.85rem;">
                    "Anexe um .csv com as colunas: "
                    <b>"name, habby_id, fase_acesso, fase_ataque"</b>
                </p>
                <label
                    for="csv-upload"
                    style="display: inline-block; background: #1a1d2a; border: 1px solid #f5c542; border-radius: 6px; color: #f5c542; padding: 8px 14px; cursor: pointer; font-size: 0.85rem;"
                >"Anexar CSV"</label>
                <input
                    id="csv-upload"
                    type="file"
                    accept=".csv"
                    style="display: none;"
                    on:change=on_csv_change
                />
            </Section>

            <Section title="Registro Manual">
                {move || {
                    editing.get().map(|index| view! {
                        <p style="color: #f5c542; font-size: 0.82rem; margin-top: 0;">
                            {format!("Editando o membro da posição {}º", index + 1)}
                        </p>
                    })
                }}
                <div style="display: flex; flex-wrap: wrap; gap: 10px; margin-bottom: 10px;">
                    <input
                        style=FIELD_STYLE
                        type="text"
                        placeholder="Nome do Membro"
                        prop:value=move || name.get()
                        on:input=move |e| {
                            if let Some(v) = input_value(&e) {
                                name.set(v);
                            }
                        }
                    />
                    <input
                        style=FIELD_STYLE
                        type="text"
                        placeholder="Habby ID"
                        prop:value=move || habby_id.get()
                        on:input=move |e| {
                            if let Some(v) = input_value(&e) {
                                habby_id.set(v);
                            }
                        }
                    />
                </div>
                <PhaseToggleRow label="Ataque na Fase de Acesso?" value=access_ok />
                <PhaseToggleRow label="Ataque na Fase de Ataque?" value=attack_ok />
                <button style=PRIMARY_BUTTON_STYLE on:click=on_submit_entry>
                    {move || if editing.get().is_some() { "Atualizar" } else { "Adicionar" }}
                </button>
                {move || {
                    editing.get().is_some().then(|| view! {
                        <button
                            style="margin-left: 8px; background: none; border: 1px solid #282c3e; border-radius: 6px; color: #9a9590; padding: 8px 14px; cursor: pointer; font-size: 0.85rem;"
                            on:click=move |_| clear_form()
                        >"Cancelar"</button>
                    })
                }}
            </Section>

            <Section title="Lista para a Temporada de Honra">
                <button
                    style=PRIMARY_BUTTON_STYLE
                    disabled=move || roster.with(|r| r.len() <= HONOR_TIER_SIZE)
                    title="Reordena a fila de elegibilidade; os três primeiros atuais entram em espera"
                    on:click=on_reorder
                >"Atualizar Lista de Honra"</button>

                {move || {
                    if roster_loading.get() {
                        return view! { <p style="color: #5a5860;">"Carregando lista..."</p> }.into_any();
                    }
                    if roster.with(|r| r.is_empty()) {
                        return view! { <p style="color: #5a5860;">"Nenhum membro adicionado."</p> }.into_any();
                    }
                    view! {
                        <table style="width: 100%; border-collapse: collapse; margin-top: 10px; font-size: 0.88rem;">
                            <thead>
                                <tr style="color: #9a9590; text-align: left;">
                                    <th style=CELL_STYLE>"Pos."</th>
                                    <th style=CELL_STYLE>"Nome"</th>
                                    <th style=CELL_STYLE>"Habby ID"</th>
                                    <th style=CELL_STYLE>"Acesso"</th>
                                    <th style=CELL_STYLE>"Ataque"</th>
                                    <th style=CELL_STYLE>"Ações"</th>
                                </tr>
                            </thead>
                            <tbody>
                                {roster.get().entries().iter().enumerate().map(|(index, entry)| {
                                    let row_style = if index < HONOR_TIER_SIZE {
                                        "background: rgba(245,197,66,0.08); color: #f5c542;"
                                    } else {
                                        ""
                                    };
                                    let entry = entry.clone();
                                    view! {
                                        <tr style=row_style>
                                            <td style=CELL_STYLE>{format!("{}º", index + 1)}</td>
                                            <td style=CELL_STYLE>{entry.name}</td>
                                            <td style=CELL_STYLE>{entry.habby_id}</td>
                                            <td style=CELL_STYLE>{entry.access_phase}</td>
                                            <td style=CELL_STYLE>{entry.attack_phase}</td>
                                            <td style=CELL_STYLE>
                                                <button style=ROW_BUTTON_STYLE title="Editar" on:click=move |_| on_edit(index)>"✎"</button>
                                                <button style=ROW_BUTTON_STYLE title="Remover" on:click=move |_| on_remove(index)>"✕"</button>
                                            </td>
                                        </tr>
                                    }
                                }).collect_view()}
                            </tbody>
                        </table>
                    }
                    .into_any()
                }}

                <button
                    style=PRIMARY_BUTTON_STYLE
                    disabled=move || request_in_flight() || roster.with(|r| r.is_empty())
                    on:click=on_save_changes
                >
                    {move || if saving.get() { "Salvando..." } else { "Salvar Alterações" }}
                </button>
            </Section>

            <Section title="Finalizar Temporada">
                <div style="display: flex; flex-wrap: wrap; gap: 10px; margin-bottom: 10px;">
                    <input
                        style=FIELD_STYLE
                        type="date"
                        prop:value=move || start_date.get()
                        on:input=move |e| {
                            if let Some(v) = input_value(&e) {
                                start_date.set(v);
                            }
                        }
                    />
                    <input
                        style=FIELD_STYLE
                        type="date"
                        prop:value=move || end_date.get()
                        on:input=move |e| {
                            if let Some(v) = input_value(&e) {
                                end_date.set(v);
                            }
                        }
                    />
                </div>
                <button
                    style=PRIMARY_BUTTON_STYLE
                    disabled=move || {
                        request_in_flight()
                            || roster.with(|r| r.is_empty())
                            || start_date.get().is_empty()
                            || end_date.get().is_empty()
                    }
                    on:click=on_finalize
                >
                    {move || if finalizing.get() { "Finalizando..." } else { "Finalizar e Salvar" }}
                </button>
            </Section>
        </div>
    }
}

const FIELD_STYLE: &str = "flex: 1; min-width: 180px; padding: 9px 12px; background: #1a1d2a; border: 1px solid #282c3e; border-radius: 6px; color: #e2e0d8; font-size: 0.88rem; outline: none;";
const PRIMARY_BUTTON_STYLE: &str = "background: #f5c542; border: none; border-radius: 6px; color: #0c0e17; padding: 9px 16px; cursor: pointer; font-weight: 600; font-size: 0.85rem; margin-top: 8px;";
const ROW_BUTTON_STYLE: &str = "background: none; border: 1px solid #282c3e; border-radius: 4px; color: #9a9590; cursor: pointer; padding: 3px 8px; margin-right: 6px;";
const CELL_STYLE: &str = "padding: 7px 10px; border-bottom: 1px solid #282c3e;";

#[component]
fn Section(title: &'static str, children: Children) -> impl IntoView {
    view! {
        <div style="background: #13161f; border: 1px solid #282c3e; border-radius: 8px; padding: 16px 18px; margin: 16px 0;">
            <h2 style="margin-top: 0; font-size: 1rem; color: #e2e0d8;">{title}</h2>
            {children()}
        </div>
    }
}

#[component]
fn PhaseToggleRow(label: &'static str, value: RwSignal<bool>) -> impl IntoView {
    let option = move |affirmative: bool, text: &'static str| {
        view! {
            <button
                style=move || {
                    let selected = value.get() == affirmative;
                    format!(
                        "border: 1px solid {}; background: {}; color: {}; border-radius: 6px; padding: 5px 14px; cursor: pointer; font-size: 0.82rem; margin-left: 6px;",
                        if selected { "#f5c542" } else { "#282c3e" },
                        if selected { "rgba(245,197,66,0.12)" } else { "transparent" },
                        if selected { "#f5c542" } else { "#9a9590" },
                    )
                }
                on:click=move |_| value.set(affirmative)
            >
                {text}
            </button>
        }
    };

    view! {
        <div style="display: flex; align-items: center; margin: 6px 0;">
            <span style="color: #9a9590; font-size: 0.85rem; min-width: 210px;">{label}</span>
            {option(true, "Sim")}
            {option(false, "Não")}
        </div>
    }
}
