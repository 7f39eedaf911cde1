use serde::{Deserialize, Serialize};

/// Authenticated user as reported by the session endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    pub username: String,
    #[serde(default)]
    pub nick: String,
    pub habby_id: String,
    pub role: String,
}

impl SessionUser {
    pub fn is_admin(&self) -> bool {
        self.role == "admin"
    }

    /// Admins and leaders may manage seasons and the honor roster.
    pub fn can_manage(&self) -> bool {
        self.role == "admin" || self.role == "leader"
    }
}

/// Session check response. Absent user means anonymous.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Session {
    #[serde(rename = "isLoggedIn", default)]
    pub is_logged_in: bool,
    #[serde(default)]
    pub user: Option<SessionUser>,
}

/// Row of the member search dropdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    pub nick: String,
    pub habby_id: String,
}

/// Whether a member appears in the current honor season's roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct HonorStatus {
    #[serde(default)]
    pub is_honor_member: bool,
}

/// A member's standing in the latest ranking season.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankHistory {
    pub position: u32,
    #[serde(rename = "fase_acesso", default)]
    pub access_phase: i64,
    #[serde(default)]
    pub evolution: Option<i64>,
}

/// Full stat sheet served by the profile endpoint. Percentage stats come over
/// the wire as decimal strings; absent fields render as zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct MemberProfile {
    pub nick: String,
    pub habby_id: String,
    pub profile_pic_url: String,

    // General attributes
    pub atk: i64,
    pub hp: i64,

    // Survivor attributes
    pub survivor_base_atk: i64,
    pub survivor_base_hp: i64,
    pub survivor_bonus_atk: String,
    pub survivor_bonus_hp: String,
    pub survivor_final_atk: i64,
    pub survivor_final_hp: i64,
    pub survivor_crit_rate: String,
    pub survivor_crit_damage: String,
    pub survivor_skill_damage: String,
    pub survivor_shield_boost: String,
    pub survivor_poison_targets: String,
    pub survivor_weak_targets: String,
    pub survivor_frozen_targets: String,

    // Pet attributes
    pub pet_base_atk: i64,
    pub pet_base_hp: i64,
    pub pet_crit_damage: String,
    pub pet_skill_damage: String,

    // Collectible attributes
    pub collect_final_atk: i64,
    pub collect_final_hp: i64,
    pub collect_crit_rate: String,
    pub collect_crit_damage: String,
    pub collect_skill_damage: String,
    pub collect_poison_targets: String,
    pub collect_weak_targets: String,
    pub collect_frozen_targets: String,
}

/// Editable home page content blocks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct HomeContent {
    pub leader: String,
    pub focus: String,
    pub league: String,
    pub requirements: Vec<String>,
    pub about_us: String,
    pub content_section: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leaders_and_admins_can_manage() {
        let mut user = SessionUser {
            username: "u".to_string(),
            nick: String::new(),
            habby_id: "1".to_string(),
            role: "member".to_string(),
        };
        assert!(!user.can_manage());
        user.role = "leader".to_string();
        assert!(user.can_manage() && !user.is_admin());
        user.role = "admin".to_string();
        assert!(user.can_manage() && user.is_admin());
    }

    #[test]
    fn session_defaults_to_anonymous() {
        let session: Session = serde_json::from_str("{}").unwrap();
        assert!(!session.is_logged_in);
        assert!(session.user.is_none());
    }

    #[test]
    fn profile_tolerates_sparse_payloads() {
        let profile: MemberProfile =
            serde_json::from_str(r#"{"nick":"Izanagi","habby_id":"42","atk":1000}"#).unwrap();
        assert_eq!(profile.nick, "Izanagi");
        assert_eq!(profile.atk, 1000);
        assert_eq!(profile.hp, 0);
        assert_eq!(profile.survivor_crit_rate, "");
    }

    #[test]
    fn rank_history_reads_wire_field_names() {
        let history: RankHistory =
            serde_json::from_str(r#"{"position":4,"fase_acesso":120,"evolution":-3}"#).unwrap();
        assert_eq!(history.position, 4);
        assert_eq!(history.access_phase, 120);
        assert_eq!(history.evolution, Some(-3));
    }
}
