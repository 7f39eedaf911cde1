use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

use toxicos_shared::profile::SessionUser;

use crate::api;
use crate::home::HomePage;
use crate::honor::HonorPage;
use crate::honor_register::HonorRegisterPage;
use crate::profile::ProfilePage;
use crate::results::ResultsPage;
use crate::search::MemberSearch;
use crate::snake_game::SnakeGamePage;

/// Which screen is rendered. There is no URL router; navigation is plain
/// conditional rendering driven by this signal.
#[derive(Clone, Copy, PartialEq, Eq)]
pub(crate) enum Page {
    Home,
    Ranking,
    Honor,
    HonorAdmin,
    Snake,
    Profile,
}

#[derive(Clone, Copy)]
pub(crate) struct CurrentPage(pub RwSignal<Page>);
#[derive(Clone, Copy)]
pub(crate) struct CurrentUser(pub RwSignal<Option<SessionUser>>);
#[derive(Clone, Copy)]
pub(crate) struct SessionChecked(pub RwSignal<bool>);

fn can_manage(user: &Option<SessionUser>) -> bool {
    user.as_ref().is_some_and(SessionUser::can_manage)
}

/// Root application component. Provides global reactive signals via context.
#[component]
pub fn App() -> impl IntoView {
    let page: RwSignal<Page> = RwSignal::new(Page::Home);
    let user: RwSignal<Option<SessionUser>> = RwSignal::new(None);
    let session_checked: RwSignal<bool> = RwSignal::new(false);

    provide_context(CurrentPage(page));
    provide_context(CurrentUser(user));
    provide_context(SessionChecked(session_checked));

    // Session bootstrap; anonymous on any failure.
    Effect::new(move || {
        if session_checked.get_untracked() {
            return;
        }
        spawn_local(async move {
            match api::fetch_session().await {
                Ok(session) if session.is_logged_in => user.set(session.user),
                Ok(_) => user.set(None),
                Err(e) => {
                    web_sys::console::warn_1(&format!("session check failed: {e}").into());
                    user.set(None);
                }
            }
            session_checked.set(true);
        });
    });

    // Leaving a management/profile page on logout falls back to home.
    Effect::new(move || {
        let current_user = user.get();
        let current_page = page.get_untracked();
        let needs_manage = current_page == Page::HonorAdmin;
        let needs_login = current_page == Page::Profile;
        if (needs_manage && !can_manage(&current_user))
            || (needs_login && current_user.is_none())
        {
            page.set(Page::Home);
        }
    });

    view! {
        <div style="min-height: 100vh; background: #0c0e17; color: #e2e0d8; font-family: 'Inter', system-ui, sans-serif;">
            <NavBar />
            <div style="max-width: 1100px; margin: 0 auto; padding: 24px 16px;">
                {move || {
                    if !session_checked.get() {
                        return view! {
                            <p style="color: #5a5860; text-align: center;">"Verificando acesso..."</p>
                        }
                        .into_any();
                    }
                    match page.get() {
                        Page::Home => view! { <HomePage /> }.into_any(),
                        Page::Ranking => view! { <ResultsPage /> }.into_any(),
                        Page::Honor => view! { <HonorPage /> }.into_any(),
                        Page::HonorAdmin => view! { <HonorRegisterPage /> }.into_any(),
                        Page::Snake => view! { <SnakeGamePage /> }.into_any(),
                        Page::Profile => view! { <ProfilePage /> }.into_any(),
                    }
                }}
            </div>
        </div>
    }
}

#[component]
fn NavBar() -> impl IntoView {
    let CurrentUser(user) = expect_context();
    let logging_out: RwSignal<bool> = RwSignal::new(false);

    let on_logout = move |_| {
        if logging_out.get_untracked() {
            return;
        }
        logging_out.set(true);
        spawn_local(async move {
            if let Err(e) = api::logout().await {
                web_sys::console::warn_1(&format!("logout failed: {e}").into());
            }
            user.set(None);
            logging_out.set(false);
        });
    };

    view! {
        <div style="display: flex; align-items: center; flex-wrap: wrap; gap: 4px; padding: 10px 16px; background: #13161f; border-bottom: 1px solid #282c3e;">
            <span class="text-gold-gradient" style="font-family: 'Silkscreen', monospace; font-size: 1.05rem; font-weight: 700; letter-spacing: 0.14em; margin-right: 14px;">"TÓXICØS"</span>
            <NavButton label="Home" target=Page::Home />
            <NavButton label="Ranking" target=Page::Ranking />
            <NavButton label="Honra" target=Page::Honor />
            <NavButton label="Cobrinha" target=Page::Snake />
            {move || {
                user.get().is_some().then(|| view! { <NavButton label="Meu Perfil" target=Page::Profile /> })
            }}
            {move || {
                can_manage(&user.get())
                    .then(|| view! { <NavButton label="Gerenciar Honra" target=Page::HonorAdmin /> })
            }}
            <div style="margin-left: auto; display: flex; align-items: center; gap: 10px;">
                <MemberSearch />
                {move || {
                    if user.get().is_some() {
                        view! {
                            <button
                                style="background: none; border: 1px solid #282c3e; border-radius: 6px; color: #9a9590; padding: 6px 12px; cursor: pointer; font-size: 0.82rem;"
                                disabled=move || logging_out.get()
                                on:click=on_logout
                            >
                                {move || if logging_out.get() { "Saindo..." } else { "Sair" }}
                            </button>
                        }
                        .into_any()
                    } else {
                        ().into_any()
                    }
                }}
            </div>
        </div>
    }
}

#[component]
fn NavButton(label: &'static str, target: Page) -> impl IntoView {
    let CurrentPage(page) = expect_context();

    view! {
        <button
            style=move || {
                let active = page.get() == target;
                format!(
                    "background: none; border: none; cursor: pointer; padding: 8px 12px; font-size: 0.88rem; font-family: 'Inter', system-ui, sans-serif; border-bottom: 2px solid {}; color: {};",
                    if active { "#f5c542" } else { "transparent" },
                    if active { "#f5c542" } else { "#e2e0d8" },
                )
            }
            on:click=move |_| page.set(target)
        >
            {label}
        </button>
    }
}
