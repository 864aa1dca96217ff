use serde::{Deserialize, Serialize};

pub const DEFAULT_DISPLAY_NAME: &str = "Estudante";
pub const GOOGLE_AVATAR: &str = "https://lh3.googleusercontent.com/a/ACg8ocL5y9Xy=s96-c";

/// Identifies one login. Work started by a user carries it so that results
/// arriving after a logout cannot land on the next account.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct LoginToken(pub u64);

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub avatar: String,
    pub score: u32,
    pub streak: u32,
    pub city: String,
    pub state: String,
    pub is_premium: bool,
    pub questions_answered: u32,
    pub essay_credits: u32,
}

impl User {
    /// Build the logged-in user from the roster template.
    pub fn from_template(template: &User, name: &str, via_google: bool) -> Self {
        let name = name.trim();
        let mut user = template.clone();
        user.name = if name.is_empty() {
            DEFAULT_DISPLAY_NAME.to_string()
        } else {
            name.to_string()
        };
        if via_google {
            user.avatar = GOOGLE_AVATAR.to_string();
        }
        user
    }

    pub fn record_session(&mut self, score: u32, answered: u32) {
        self.score = self.score.saturating_add(score);
        self.questions_answered = self.questions_answered.saturating_add(answered);
    }

    pub fn add_credits(&mut self, amount: u32) {
        self.essay_credits = self.essay_credits.saturating_add(amount);
    }

    /// Floors at zero.
    pub fn consume_credit(&mut self) {
        self.essay_credits = self.essay_credits.saturating_sub(1);
    }
}

#[cfg(test)]
pub(crate) fn sample_user() -> User {
    User {
        id: "you".to_string(),
        name: DEFAULT_DISPLAY_NAME.to_string(),
        avatar: "https://picsum.photos/100/100?random=99".to_string(),
        score: 0,
        streak: 0,
        city: "São Paulo".to_string(),
        state: "SP".to_string(),
        is_premium: false,
        questions_answered: 0,
        essay_credits: 0,
    }
}
