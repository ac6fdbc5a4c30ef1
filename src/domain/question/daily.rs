//! Daily challenge selection.

use chrono::{Datelike, NaiveDate};

use super::Question;

/// Picks the challenge for `date` from the eligible pool.
///
/// The pool is ordered by creation time (then id) so every caller sees the
/// same question for a given UTC day.
pub fn pick_daily(pool: &[Question], date: NaiveDate) -> Option<&Question> {
    if pool.is_empty() {
        return None;
    }
    let mut ordered: Vec<&Question> = pool.iter().collect();
    ordered.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));

    let len = i64::try_from(ordered.len()).ok()?;
    let index = usize::try_from(i64::from(date.num_days_from_ce()).rem_euclid(len)).ok()?;
    ordered.get(index).copied()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{LevelId, Timestamp};
    use crate::domain::question::{NewQuestion, QuestionKind};

    fn question(prompt: &str, offset_days: i64) -> Question {
        let mut q = Question::new(NewQuestion {
            level_id: LevelId::new(),
            kind: Some(QuestionKind::FillInTheBlank),
            prompt: prompt.to_string(),
            answer: "x".to_string(),
            daily_challenge: true,
            ..Default::default()
        })
        .unwrap();
        q.created_at = Timestamp::now().add_days(offset_days);
        q
    }

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 1, d).unwrap()
    }

    #[test]
    fn empty_pool_has_no_challenge() {
        assert!(pick_daily(&[], date(1)).is_none());
    }

    #[test]
    fn same_day_same_question_regardless_of_input_order() {
        let a = question("a", -2);
        let b = question("b", -1);
        let c = question("c", 0);

        let forward = pick_daily(&[a.clone(), b.clone(), c.clone()], date(10)).unwrap().id;
        let reversed = pick_daily(&[c, b, a], date(10)).unwrap().id;
        assert_eq!(forward, reversed);
    }

    #[test]
    fn consecutive_days_rotate_through_pool() {
        let pool = vec![question("a", -2), question("b", -1), question("c", 0)];
        let picks: std::collections::HashSet<_> = (1..=3)
            .map(|d| pick_daily(&pool, date(d)).unwrap().id)
            .collect();
        assert_eq!(picks.len(), 3);
    }
}
