use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

use toxicos_shared::profile::MemberProfile;

use crate::api;
use crate::app::CurrentUser;

/// Stat sheet for the logged-in member. Honor members get a highlighted frame.
#[component]
pub fn ProfilePage() -> impl IntoView {
    let CurrentUser(user) = expect_context();
    let profile: RwSignal<Option<MemberProfile>> = RwSignal::new(None);
    let is_honor_member: RwSignal<bool> = RwSignal::new(false);
    let loading: RwSignal<bool> = RwSignal::new(true);
    let loaded_for: RwSignal<Option<String>> = RwSignal::new(None);

    // Refetch whenever the session identity changes.
    Effect::new(move || {
        let Some(habby_id) = user.get().map(|u| u.habby_id) else {
            return;
        };
        if loaded_for.get_untracked().as_deref() == Some(habby_id.as_str()) {
            return;
        }
        loaded_for.set(Some(habby_id.clone()));
        loading.set(true);
        spawn_local(async move {
            match api::fetch_profile(&habby_id).await {
                Ok(sheet) => profile.set(Some(sheet)),
                Err(e) => {
                    web_sys::console::warn_1(&format!("profile fetch failed: {e}").into());
                    profile.set(None);
                }
            }
            // Best-effort badge; the profile still renders without it.
            match api::fetch_honor_status(&habby_id).await {
                Ok(status) => is_honor_member.set(status.is_honor_member),
                Err(e) => {
                    web_sys::console::warn_1(&format!("honor status fetch failed: {e}").into());
                }
            }
            loading.set(false);
        });
    });

    view! {
        <div>
            {move || {
                if loading.get() {
                    return view! { <p style="color: #5a5860;">"Carregando perfil..."</p> }.into_any();
                }
                let Some(sheet) = profile.get() else {
                    return view! { <p style="color: #5a5860;">"Perfil não encontrado."</p> }.into_any();
                };
                let frame = if is_honor_member.get() {
                    "border: 1px solid #f5c542; box-shadow: 0 0 18px rgba(245,197,66,0.15);"
                } else {
                    "border: 1px solid #282c3e;"
                };
                view! {
                    <div style=format!("background: #13161f; {frame} border-radius: 8px; padding: 20px;")>
                        <div style="display: flex; align-items: center; gap: 16px; margin-bottom: 18px;">
                            <img
                                src=sheet.profile_pic_url.clone()
                                alt=format!("Foto de {}", sheet.nick)
                                style="width: 72px; height: 72px; border-radius: 50%; border: 2px solid #282c3e; object-fit: cover;"
                            />
                            <div>
                                <h1 style="margin: 0; color: #e2e0d8;">{sheet.nick.clone()}</h1>
                                <p style="margin: 2px 0 0; color: #9a9590; font-size: 0.85rem;">
                                    {format!("Habby ID: {}", sheet.habby_id)}
                                </p>
                                {is_honor_member.get().then(|| view! {
                                    <span style="color: #f5c542; font-size: 0.78rem;">"★ Membro de Honra"</span>
                                })}
                            </div>
                        </div>
                        <div style="display: grid; grid-template-columns: repeat(auto-fit, minmax(240px, 1fr)); gap: 14px;">
                            <StatCard title="Atributos Gerais" rows=vec![
                                ("ATK Total", sheet.atk.to_string()),
                                ("HP Total", sheet.hp.to_string()),
                            ] />
                            <StatCard title="Atributos do Sobrevivente" rows=vec![
                                ("ATK Base", sheet.survivor_base_atk.to_string()),
                                ("HP Base", sheet.survivor_base_hp.to_string()),
                                ("Bônus ATK", percent(&sheet.survivor_bonus_atk)),
                                ("Bônus HP", percent(&sheet.survivor_bonus_hp)),
                                ("ATK Final", sheet.survivor_final_atk.to_string()),
                                ("HP Final", sheet.survivor_final_hp.to_string()),
                                ("Taxa Crítica", percent(&sheet.survivor_crit_rate)),
                                ("Dano Crítico", percent(&sheet.survivor_crit_damage)),
                                ("Dano de Habilidade", percent(&sheet.survivor_skill_damage)),
                                ("Reforço de Escudo", percent(&sheet.survivor_shield_boost)),
                                ("Alvos Envenenados", percent(&sheet.survivor_poison_targets)),
                                ("Alvos Enfraquecidos", percent(&sheet.survivor_weak_targets)),
                                ("Alvos Congelados", percent(&sheet.survivor_frozen_targets)),
                            ] />
                            <StatCard title="Atributos do Pet" rows=vec![
                                ("ATK Base", sheet.pet_base_atk.to_string()),
                                ("HP Base", sheet.pet_base_hp.to_string()),
                                ("Dano Crítico", percent(&sheet.pet_crit_damage)),
                                ("Dano de Habilidade", percent(&sheet.pet_skill_damage)),
                            ] />
                            <StatCard title="Atributos de Colecionáveis" rows=vec![
                                ("ATK Final", sheet.collect_final_atk.to_string()),
                                ("HP Final", sheet.collect_final_hp.to_string()),
                                ("Taxa Crítica", percent(&sheet.collect_crit_rate)),
                                ("Dano Crítico", percent(&sheet.collect_crit_damage)),
                                ("Dano de Habilidade", percent(&sheet.collect_skill_damage)),
                                ("Alvos Envenenados", percent(&sheet.collect_poison_targets)),
                                ("Alvos Enfraquecidos", percent(&sheet.collect_weak_targets)),
                                ("Alvos Congelados", percent(&sheet.collect_frozen_targets)),
                            ] />
                        </div>
                    </div>
                }
                .into_any()
            }}
        </div>
    }
}

/// Percentage stats arrive as decimal strings; empty means zero.
fn percent(raw: &str) -> String {
    if raw.trim().is_empty() {
        "0.00%".to_string()
    } else {
        format!("{}%", raw.trim())
    }
}

#[component]
fn StatCard(title: &'static str, rows: Vec<(&'static str, String)>) -> impl IntoView {
    view! {
        <div style="background: #1a1d2a; border: 1px solid #282c3e; border-radius: 6px; padding: 12px 14px;">
            <h3 style="margin: 0 0 8px; color: #f5c542; font-size: 0.9rem;">{title}</h3>
            <ul style="list-style: none; margin: 0; padding: 0; color: #9a9590; font-size: 0.84rem; line-height: 1.9;">
                {rows.into_iter().map(|(label, value)| view! {
                    <li style="display: flex; justify-content: space-between;">
                        <span>{label}</span>
                        <span style="color: #e2e0d8;">{value}</span>
                    </li>
                }).collect_view()}
            </ul>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::percent;

    #[test]
    fn percent_appends_sign_and_defaults_empty() {
        assert_eq!(percent("12.5"), "12.5%");
        assert_eq!(percent(" 3.00 "), "3.00%");
        assert_eq!(percent(""), "0.00%");
    }
}
