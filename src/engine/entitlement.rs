//! Paywall decisions. Everything here is a pure function of the user record.

use crate::model::user::User;

/// Questions a free account may answer before quizzes lock.
pub const FREE_QUESTION_LIMIT: u32 = 20;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Denial {
    LimitReached,
    ReportLocked,
}

impl Denial {
    pub fn headline(self) -> &'static str {
        match self {
            Denial::LimitReached => "Você atingiu o limite de 20 questões grátis.",
            Denial::ReportLocked => "O Relatório IA é exclusivo para assinantes.",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Access {
    Allowed,
    Denied(Denial),
}

pub fn can_start_quiz(user: &User) -> Access {
    if user.is_premium || user.questions_answered < FREE_QUESTION_LIMIT {
        Access::Allowed
    } else {
        Access::Denied(Denial::LimitReached)
    }
}

/// Gate for the performance report and the study plan.
pub fn can_view_gated_feature(user: &User) -> Access {
    if user.is_premium {
        Access::Allowed
    } else {
        Access::Denied(Denial::ReportLocked)
    }
}

/// Free questions left, or `None` when the account is unlimited.
pub fn free_questions_remaining(user: &User) -> Option<u32> {
    if user.is_premium {
        None
    } else {
        Some(FREE_QUESTION_LIMIT.saturating_sub(user.questions_answered))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::user::sample_user;

    fn user(premium: bool, answered: u32) -> User {
        let mut u = sample_user();
        u.is_premium = premium;
        u.questions_answered = answered;
        u
    }

    #[test]
    fn test_premium_always_starts_quizzes() {
        for answered in [0, 19, 20, 21, 5_000] {
            assert_eq!(can_start_quiz(&user(true, answered)), Access::Allowed);
        }
    }

    #[test]
    fn test_free_tier_denied_exactly_from_the_limit() {
        for answered in 0..40 {
            let access = can_start_quiz(&user(false, answered));
            if answered >= FREE_QUESTION_LIMIT {
                assert_eq!(access, Access::Denied(Denial::LimitReached));
            } else {
                assert_eq!(access, Access::Allowed);
            }
        }
    }

    #[test]
    fn test_gated_features_need_premium() {
        assert_eq!(can_view_gated_feature(&user(true, 0)), Access::Allowed);
        assert_eq!(
            can_view_gated_feature(&user(false, 0)),
            Access::Denied(Denial::ReportLocked)
        );
    }

    #[test]
    fn test_decisions_are_idempotent() {
        let u = user(false, 20);
        assert_eq!(can_start_quiz(&u), can_start_quiz(&u));
        assert_eq!(u.questions_answered, 20);
    }

    #[test]
    fn test_remaining_free_questions_floor_at_zero() {
        assert_eq!(free_questions_remaining(&user(false, 3)), Some(17));
        assert_eq!(free_questions_remaining(&user(false, 45)), Some(0));
        assert_eq!(free_questions_remaining(&user(true, 45)), None);
    }
}
