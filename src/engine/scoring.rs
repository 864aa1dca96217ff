/// XP awarded for each correctly answered question.
pub const CORRECT_ANSWER_XP: u32 = 100;

pub fn level_from_score(total_xp: u32) -> u32 {
    let level = (total_xp as f64 / 100.0).sqrt() as u32;
    level.max(1)
}

pub fn xp_to_next_level(total_xp: u32) -> u32 {
    let current_level = level_from_score(total_xp);
    let next_level_xp = (current_level + 1).pow(2) * 100;
    next_level_xp.saturating_sub(total_xp)
}
