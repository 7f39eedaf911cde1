use std::cell::RefCell;

use gloo_storage::Storage;
use leptos::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use wasm_bindgen_futures::spawn_local;
use web_sys::CanvasRenderingContext2d;

use toxicos_shared::snake::{Difficulty, Direction, GRID_TILES, Point, ScoreEntry, SnakeGame};

use crate::api;
use crate::app::CurrentUser;

const TILE_PX: f64 = 20.0;
const CANVAS_PX: f64 = GRID_TILES as f64 * TILE_PX;

struct GameIntervalBinding {
    window: web_sys::Window,
    interval_id: i32,
    _callback: Closure<dyn Fn()>,
}

struct GameKeydownBinding {
    window: web_sys::Window,
    _handler: Closure<dyn Fn(web_sys::KeyboardEvent)>,
}

thread_local! {
    static GAME_INTERVAL_BINDING: RefCell<Option<GameIntervalBinding>> = const { RefCell::new(None) };
    static GAME_KEYDOWN_BINDING: RefCell<Option<GameKeydownBinding>> = const { RefCell::new(None) };
}

fn clear_interval_binding() {
    GAME_INTERVAL_BINDING.with(|slot| {
        if let Some(old) = slot.borrow_mut().take() {
            old.window.clear_interval_with_handle(old.interval_id);
        }
    });
}

fn clear_keydown_binding() {
    GAME_KEYDOWN_BINDING.with(|slot| {
        if let Some(old) = slot.borrow_mut().take() {
            let _ = old.window.remove_event_listener_with_callback(
                "keydown",
                old._handler.as_ref().unchecked_ref(),
            );
        }
    });
}

/// Random board tile from the browser RNG; the game core re-rolls tiles that
/// land on the snake.
fn random_tile() -> Point {
    let roll = || (js_sys::Math::random() * GRID_TILES as f64).floor() as i32;
    Point::new(roll(), roll())
}

#[derive(serde::Serialize, serde::Deserialize)]
#[serde(default)]
struct SnakeSettings {
    difficulty: Difficulty,
}

impl Default for SnakeSettings {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::Normal,
        }
    }
}

/// Arcade mini-game page: canvas-drawn snake with difficulty tiers and a
/// score leaderboard. Scores are submitted for logged-in members only.
#[component]
pub fn SnakeGamePage() -> impl IntoView {
    let CurrentUser(user) = expect_context();
    let saved: SnakeSettings =
        gloo_storage::LocalStorage::get("toxicos_snake_settings").unwrap_or_default();

    let game: RwSignal<SnakeGame> = RwSignal::new(SnakeGame::new());
    let difficulty: RwSignal<Difficulty> = RwSignal::new(saved.difficulty);
    let scores: RwSignal<Vec<ScoreEntry>> = RwSignal::new(Vec::new());
    let scores_load_started: RwSignal<bool> = RwSignal::new(false);
    let score_submitted: RwSignal<bool> = RwSignal::new(false);
    let canvas_ref = NodeRef::<leptos::html::Canvas>::new();

    let load_scores = move || {
        spawn_local(async move {
            match api::fetch_snake_scores().await {
                Ok(list) => scores.set(list),
                Err(e) => {
                    web_sys::console::warn_1(&format!("snake scores fetch failed: {e}").into());
                }
            }
        });
    };

    Effect::new(move || {
        if scores_load_started.get_untracked() {
            return;
        }
        scores_load_started.set(true);
        load_scores();
    });

    // Persist the chosen difficulty like any other preference.
    Effect::new(move || {
        let settings = SnakeSettings {
            difficulty: difficulty.get(),
        };
        let _ = gloo_storage::LocalStorage::set("toxicos_snake_settings", &settings);
    });

    // Game loop: one interval per difficulty, re-armed when the tier changes.
    Effect::new(move || {
        let tick_ms = difficulty.get().tick_ms();
        clear_interval_binding();

        let Some(window) = web_sys::window() else {
            return;
        };
        let cb = Closure::<dyn Fn()>::new(move || {
            game.update(|g| {
                g.step(random_tile);
            });
        });
        let Ok(interval_id) = window.set_interval_with_callback_and_timeout_and_arguments_0(
            cb.as_ref().unchecked_ref(),
            tick_ms as i32,
        ) else {
            return;
        };
        GAME_INTERVAL_BINDING.with(|slot| {
            *slot.borrow_mut() = Some(GameIntervalBinding {
                window: window.clone(),
                interval_id,
                _callback: cb,
            });
        });
    });

    // Arrow-key steering, ignored while typing in a form field.
    Effect::new(move || {
        clear_keydown_binding();
        let Some(window) = web_sys::window() else {
            return;
        };
        let handler =
            Closure::<dyn Fn(web_sys::KeyboardEvent)>::new(move |e: web_sys::KeyboardEvent| {
                let target_tag = e
                    .target()
                    .and_then(|t| t.dyn_into::<web_sys::HtmlElement>().ok())
                    .map(|el| el.tag_name())
                    .unwrap_or_default();
                if target_tag == "INPUT" || target_tag == "TEXTAREA" {
                    return;
                }
                let direction = match e.key().as_str() {
                    "ArrowUp" => Direction::Up,
                    "ArrowDown" => Direction::Down,
                    "ArrowLeft" => Direction::Left,
                    "ArrowRight" => Direction::Right,
                    _ => return,
                };
                e.prevent_default();
                game.update(|g| g.turn(direction));
            });
        if window
            .add_event_listener_with_callback("keydown", handler.as_ref().unchecked_ref())
            .is_ok()
        {
            GAME_KEYDOWN_BINDING.with(|slot| {
                *slot.borrow_mut() = Some(GameKeydownBinding {
                    window: window.clone(),
                    _handler: handler,
                });
            });
        }
    });

    on_cleanup(|| {
        clear_interval_binding();
        clear_keydown_binding();
    });

    // Submit once per run when the game ends, then refresh the leaderboard.
    Effect::new(move || {
        let over = game.with(|g| g.is_game_over());
        if !over || score_submitted.get_untracked() {
            return;
        }
        score_submitted.set(true);
        let score = game.with_untracked(|g| g.score());
        if score == 0 {
            return;
        }
        let Some(current) = user.get_untracked() else {
            return;
        };
        let entry = ScoreEntry {
            username: current.username,
            score: score as i64,
            difficulty: difficulty.get_untracked().label().to_string(),
        };
        spawn_local(async move {
            match api::submit_snake_score(&entry).await {
                Ok(()) => load_scores(),
                Err(e) => {
                    web_sys::console::warn_1(&format!("score submit failed: {e}").into());
                }
            }
        });
    });

    // Redraw on every game change.
    Effect::new(move || {
        let snapshot = game.get();
        let Some(canvas) = canvas_ref.get() else {
            return;
        };
        let Some(ctx) = canvas
            .get_context("2d")
            .ok()
            .flatten()
            .and_then(|ctx| ctx.dyn_into::<CanvasRenderingContext2d>().ok())
        else {
            return;
        };
        ctx.set_fill_style_str("#0c0e17");
        ctx.fill_rect(0.0, 0.0, CANVAS_PX, CANVAS_PX);

        ctx.set_fill_style_str("#00ffff");
        for segment in snapshot.snake() {
            ctx.fill_rect(
                segment.x as f64 * TILE_PX,
                segment.y as f64 * TILE_PX,
                TILE_PX - 1.0,
                TILE_PX - 1.0,
            );
        }

        ctx.set_fill_style_str("#ff00ff");
        let food = snapshot.food();
        ctx.fill_rect(
            food.x as f64 * TILE_PX,
            food.y as f64 * TILE_PX,
            TILE_PX,
            TILE_PX,
        );
    });

    let reset_game = move || {
        game.set(SnakeGame::new());
        score_submitted.set(false);
    };

    let on_difficulty_change = move |e: leptos::ev::Event| {
        let Some(target) = e.target() else {
            return;
        };
        let Ok(select) = target.dyn_into::<web_sys::HtmlSelectElement>() else {
            return;
        };
        let Some(tier) = Difficulty::from_label(&select.value()) else {
            return;
        };
        difficulty.set(tier);
        reset_game();
    };

    let steer = move |direction: Direction| {
        game.update(|g| g.turn(direction));
    };

    view! {
        <div style="max-width: 520px; margin: 0 auto; text-align: center;">
            <h1 style="font-family: 'Silkscreen', monospace; color: #f5c542; letter-spacing: 0.08em;">"Jogo da Cobrinha"</h1>

            <div style="display: flex; justify-content: space-between; align-items: center; margin-bottom: 10px;">
                <span style="color: #e2e0d8; font-size: 0.92rem;">
                    {move || format!("Pontuação: {}", game.with(|g| g.score()))}
                </span>
                <select
                    style="background: #1a1d2a; border: 1px solid #282c3e; border-radius: 6px; color: #e2e0d8; padding: 6px 10px; font-size: 0.85rem;"
                    prop:value=move || difficulty.get().label().to_string()
                    on:change=on_difficulty_change
                >
                    {Difficulty::ALL.iter().map(|tier| {
                        view! { <option value=tier.label()>{tier.label()}</option> }
                    }).collect_view()}
                </select>
            </div>

            <div style="position: relative; display: inline-block;">
                <canvas
                    node_ref=canvas_ref
                    width="400"
                    height="400"
                    style="border: 1px solid #282c3e; border-radius: 6px; background: #0c0e17;"
                />
                {move || {
                    game.with(|g| g.is_game_over()).then(|| view! {
                        <div style="position: absolute; inset: 0; background: rgba(12,14,23,0.82); display: flex; flex-direction: column; align-items: center; justify-content: center; gap: 10px; border-radius: 6px;">
                            <h2 style="color: #fca5a5; margin: 0;">"Fim de Jogo!"</h2>
                            <button
                                style="background: #f5c542; border: none; border-radius: 6px; color: #0c0e17; padding: 8px 16px; cursor: pointer; font-weight: 600;"
                                on:click=move |_| reset_game()
                            >"Jogar Novamente"</button>
                        </div>
                    })
                }}
            </div>

            <div style="margin-top: 10px; display: flex; flex-direction: column; align-items: center; gap: 6px;">
                <button style=PAD_BUTTON_STYLE on:click=move |_| steer(Direction::Up)>"↑"</button>
                <div style="display: flex; gap: 6px;">
                    <button style=PAD_BUTTON_STYLE on:click=move |_| steer(Direction::Left)>"←"</button>
                    <button style=PAD_BUTTON_STYLE on:click=move |_| steer(Direction::Down)>"↓"</button>
                    <button style=PAD_BUTTON_STYLE on:click=move |_| steer(Direction::Right)>"→"</button>
                </div>
            </div>

            <div style="margin-top: 20px; text-align: left;">
                <h2 style="color: #e2e0d8; font-size: 1rem;">"Ranking"</h2>
                <table style="width: 100%; border-collapse: collapse; font-size: 0.85rem;">
                    <thead>
                        <tr style="color: #9a9590; text-align: left;">
                            <th style=CELL_STYLE>"Pos."</th>
                            <th style=CELL_STYLE>"Nome"</th>
                            <th style=CELL_STYLE>"Pontuação"</th>
                            <th style=CELL_STYLE>"Dificuldade"</th>
                        </tr>
                    </thead>
                    <tbody>
                        {move || scores.get().into_iter().enumerate().map(|(index, entry)| view! {
                            <tr>
                                <td style=CELL_STYLE>{format!("{}º", index + 1)}</td>
                                <td style=CELL_STYLE>{entry.username}</td>
                                <td style=CELL_STYLE>{entry.score}</td>
                                <td style=CELL_STYLE>{entry.difficulty}</td>
                            </tr>
                        }).collect_view()}
                    </tbody>
                </table>
            </div>
        </div>
    }
}

const PAD_BUTTON_STYLE: &str = "width: 46px; height: 38px; background: #1a1d2a; border: 1px solid #282c3e; border-radius: 6px; color: #e2e0d8; cursor: pointer; font-size: 1rem;";
const CELL_STYLE: &str = "padding: 6px 10px; border-bottom: 1px solid #282c3e;";
