//! Fetch layer over the external persistence API. Every helper returns the
//! upstream `{"error": ...}` message on failure when the service provides
//! one, so callers can surface it verbatim.

use toxicos_shared::profile::{
    HomeContent, HonorStatus, MemberProfile, RankHistory, SearchResult, Session,
};
use toxicos_shared::roster::Roster;
use toxicos_shared::season::{HonorSeason, NewHonorSeason, Season};
use toxicos_shared::snake::ScoreEntry;

/// Extract the service's error message from a failed response, falling back
/// to the HTTP status.
async fn error_message(resp: gloo_net::http::Response) -> String {
    let status = resp.status();
    match resp.json::<serde_json::Value>().await {
        Ok(body) => body
            .get("error")
            .and_then(|v| v.as_str())
            .map(str::to_string)
            .unwrap_or_else(|| format!("HTTP {status}")),
        Err(_) => format!("HTTP {status}"),
    }
}

async fn get_json<T: serde::de::DeserializeOwned>(url: &str) -> Result<T, String> {
    let resp = gloo_net::http::Request::get(url)
        .send()
        .await
        .map_err(|e| format!("fetch error: {e}"))?;

    if !resp.ok() {
        return Err(error_message(resp).await);
    }

    resp.json::<T>().await.map_err(|e| format!("parse error: {e}"))
}

pub async fn fetch_session() -> Result<Session, String> {
    get_json("/api/session").await
}

pub async fn logout() -> Result<(), String> {
    let resp = gloo_net::http::Request::post("/api/logout")
        .send()
        .await
        .map_err(|e| format!("fetch error: {e}"))?;
    if !resp.ok() {
        return Err(error_message(resp).await);
    }
    Ok(())
}

pub async fn fetch_home_content() -> Result<HomeContent, String> {
    get_json("/api/home-content").await
}

pub async fn update_home_content(content: &HomeContent) -> Result<(), String> {
    let resp = gloo_net::http::Request::put("/api/home-content")
        .json(content)
        .map_err(|e| format!("request error: {e}"))?
        .send()
        .await
        .map_err(|e| format!("fetch error: {e}"))?;
    if !resp.ok() {
        return Err(error_message(resp).await);
    }
    Ok(())
}

pub async fn fetch_seasons() -> Result<Vec<Season>, String> {
    get_json("/api/seasons").await
}

pub async fn delete_season(id: i64) -> Result<(), String> {
    let resp = gloo_net::http::Request::delete(&format!("/api/seasons/{id}"))
        .send()
        .await
        .map_err(|e| format!("fetch error: {e}"))?;
    if !resp.ok() {
        return Err(error_message(resp).await);
    }
    Ok(())
}

pub async fn fetch_honor_seasons() -> Result<Vec<HonorSeason>, String> {
    get_json("/api/honor-seasons").await
}

/// Current working roster for the management screen.
pub async fn fetch_honor_roster() -> Result<Roster, String> {
    get_json("/api/honor-roster").await
}

/// Overwrite the latest honor season's participant list with the current
/// roster snapshot. Mutates existing state; contrast with [`finalize_season`].
pub async fn save_roster_changes(roster: &Roster) -> Result<(), String> {
    let resp = gloo_net::http::Request::put("/api/honor-seasons/latest")
        .json(roster)
        .map_err(|e| format!("request error: {e}"))?
        .send()
        .await
        .map_err(|e| format!("fetch error: {e}"))?;
    if !resp.ok() {
        return Err(error_message(resp).await);
    }
    Ok(())
}

/// Append-only: every call creates a new immutable season record. Returns the
/// service's confirmation message.
pub async fn finalize_season(payload: &NewHonorSeason) -> Result<String, String> {
    let resp = gloo_net::http::Request::post("/api/honor-seasons")
        .json(payload)
        .map_err(|e| format!("request error: {e}"))?
        .send()
        .await
        .map_err(|e| format!("fetch error: {e}"))?;
    if !resp.ok() {
        return Err(error_message(resp).await);
    }
    let body = resp
        .json::<serde_json::Value>()
        .await
        .map_err(|e| format!("parse error: {e}"))?;
    Ok(body
        .get("message")
        .and_then(|v| v.as_str())
        .unwrap_or("Temporada de honra criada.")
        .to_string())
}

pub async fn fetch_snake_scores() -> Result<Vec<ScoreEntry>, String> {
    get_json("/api/snake-scores").await
}

pub async fn submit_snake_score(entry: &ScoreEntry) -> Result<(), String> {
    let resp = gloo_net::http::Request::post("/api/snake-scores")
        .json(entry)
        .map_err(|e| format!("request error: {e}"))?
        .send()
        .await
        .map_err(|e| format!("fetch error: {e}"))?;
    if !resp.ok() {
        return Err(error_message(resp).await);
    }
    Ok(())
}

pub async fn search_members(query: &str) -> Result<Vec<SearchResult>, String> {
    let resp = gloo_net::http::Request::get("/api/search-users")
        .query([("query", query)])
        .send()
        .await
        .map_err(|e| format!("fetch error: {e}"))?;
    if !resp.ok() {
        return Err(error_message(resp).await);
    }
    resp.json::<Vec<SearchResult>>()
        .await
        .map_err(|e| format!("parse error: {e}"))
}

pub async fn fetch_profile(habby_id: &str) -> Result<MemberProfile, String> {
    get_json(&format!("/api/profile/{habby_id}")).await
}

pub async fn fetch_honor_status(habby_id: &str) -> Result<HonorStatus, String> {
    get_json(&format!("/api/honor-status/{habby_id}")).await
}

pub async fn fetch_rank_history(habby_id: &str) -> Result<RankHistory, String> {
    get_json(&format!("/api/history/{habby_id}")).await
}
