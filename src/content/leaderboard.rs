use tracing::warn;

use crate::content::asset_text;
use crate::model::user::{DEFAULT_DISPLAY_NAME, User};

const ROSTER_ASSET: &str = "leaderboard.json";
const TEMPLATE_ID: &str = "you";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LeaderboardScope {
    Global,
    State,
    City,
}

impl LeaderboardScope {
    pub const ALL: [LeaderboardScope; 3] = [
        LeaderboardScope::Global,
        LeaderboardScope::State,
        LeaderboardScope::City,
    ];

    pub fn label(self) -> &'static str {
        match self {
            LeaderboardScope::Global => "Brasil",
            LeaderboardScope::State => "Estado",
            LeaderboardScope::City => "Cidade",
        }
    }

    pub fn next(self) -> Self {
        match self {
            LeaderboardScope::Global => LeaderboardScope::State,
            LeaderboardScope::State => LeaderboardScope::City,
            LeaderboardScope::City => LeaderboardScope::Global,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LeaderboardEntry {
    pub rank: usize,
    pub name: String,
    pub score: u32,
    pub city: String,
    pub state: String,
    pub is_premium: bool,
    pub is_you: bool,
}

/// Mock students shown in the ranking, plus the profile new logins start from.
#[derive(Clone, Debug)]
pub struct Roster {
    others: Vec<User>,
    template: User,
}

impl Roster {
    pub fn load() -> Self {
        asset_text(ROSTER_ASSET)
            .map(|json| Self::from_json(&json))
            .unwrap_or_else(|| {
                warn!(asset = ROSTER_ASSET, "roster asset missing");
                Self::from_users(Vec::new())
            })
    }

    pub fn from_json(json: &str) -> Self {
        match serde_json::from_str::<Vec<User>>(json) {
            Ok(users) => Self::from_users(users),
            Err(err) => {
                warn!(%err, "roster is not valid JSON");
                Self::from_users(Vec::new())
            }
        }
    }

    pub fn from_users(users: Vec<User>) -> Self {
        let (templates, others): (Vec<User>, Vec<User>) =
            users.into_iter().partition(|u| u.id == TEMPLATE_ID);
        let template = templates.into_iter().next().unwrap_or_else(blank_template);
        Self { others, template }
    }

    pub fn template(&self) -> &User {
        &self.template
    }

    /// Rank the roster together with `current`, narrowed to `current`'s
    /// state or city for the smaller scopes. Ties keep roster order.
    pub fn rank(&self, current: Option<&User>, scope: LeaderboardScope) -> Vec<LeaderboardEntry> {
        let in_scope = |u: &User| match (scope, current) {
            (LeaderboardScope::Global, _) | (_, None) => true,
            (LeaderboardScope::State, Some(me)) => u.state == me.state,
            (LeaderboardScope::City, Some(me)) => u.state == me.state && u.city == me.city,
        };

        let mut users: Vec<(&User, bool)> = self
            .others
            .iter()
            .filter(|u| in_scope(u))
            .map(|u| (u, false))
            .collect();
        if let Some(me) = current {
            users.push((me, true));
        }
        users.sort_by(|a, b| b.0.score.cmp(&a.0.score));

        users
            .into_iter()
            .enumerate()
            .map(|(i, (u, is_you))| LeaderboardEntry {
                rank: i + 1,
                name: u.name.clone(),
                score: u.score,
                city: u.city.clone(),
                state: u.state.clone(),
                is_premium: u.is_premium,
                is_you,
            })
            .collect()
    }
}

fn blank_template() -> User {
    User {
        id: TEMPLATE_ID.to_string(),
        name: DEFAULT_DISPLAY_NAME.to_string(),
        avatar: String::new(),
        score: 0,
        streak: 0,
        city: String::new(),
        state: String::new(),
        is_premium: false,
        questions_answered: 0,
        essay_credits: 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundled_roster_has_template_and_three_students() {
        let roster = Roster::load();
        assert_eq!(roster.template().id, "you");
        assert_eq!(roster.template().essay_credits, 0);
        assert_eq!(roster.rank(None, LeaderboardScope::Global).len(), 3);
    }

    #[test]
    fn test_global_ranking_sorts_by_score_and_includes_current_user() {
        let roster = Roster::load();
        let mut me = roster.template().clone();
        me.score = 14_000;
        let ranking = roster.rank(Some(&me), LeaderboardScope::Global);
        assert_eq!(ranking.len(), 4);
        assert_eq!(ranking[0].name, "Ana Silva");
        assert_eq!(ranking[2].rank, 3);
        assert!(ranking[2].is_you);
    }

    #[test]
    fn test_state_scope_keeps_only_same_state() {
        let roster = Roster::load();
        let me = roster.template().clone();
        let ranking = roster.rank(Some(&me), LeaderboardScope::State);
        assert!(ranking.iter().all(|e| e.state == "SP"));
        assert_eq!(ranking.len(), 2);
    }

    #[test]
    fn test_missing_template_falls_back_to_blank_profile() {
        let roster = Roster::from_users(Vec::new());
        assert_eq!(roster.template().name, DEFAULT_DISPLAY_NAME);
    }

    #[test]
    fn test_scope_cycles_through_all_variants() {
        let mut scope = LeaderboardScope::Global;
        for expected in [LeaderboardScope::State, LeaderboardScope::City, LeaderboardScope::Global] {
            scope = scope.next();
            assert_eq!(scope, expected);
        }
    }
}
