//! Integration tests for the progress log.
//!
//! Exercises the full path from recording counts and moods in the store to
//! streak and statistics computation, including policy switching.

use chrono::NaiveDate;
use workprogress_core::{
    Config, Database, ProgressStatsAnalyzer, QualificationPolicy, StreakSummary,
};

fn d(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

#[test]
fn test_week_of_progress_streaks() {
    let db = Database::open_memory().unwrap();
    let study = db.add_section("Study").unwrap();
    let reading = db.add_task(study.id, "Reading").unwrap();
    let problems = db.add_task(study.id, "Problems").unwrap();

    // Mon-Wed: counted work
    db.increment_count(d("2025-03-03"), reading.id, 1).unwrap();
    db.increment_count(d("2025-03-04"), problems.id, 5).unwrap();
    db.set_count(d("2025-03-05"), reading.id, 2).unwrap();
    // Thu: only a mood
    db.set_mood(d("2025-03-06"), Some("😐")).unwrap();
    // Fri: count recorded but zero
    db.set_count(d("2025-03-07"), reading.id, 0).unwrap();
    // Sat, Sun: counted work again
    db.set_count(d("2025-03-08"), problems.id, 1).unwrap();
    db.set_count(d("2025-03-09"), problems.id, 1).unwrap();

    let today = d("2025-03-09");
    assert_eq!(
        db.streaks(QualificationPolicy::CountOrMood, today).unwrap(),
        StreakSummary { current: 2, longest: 4 }
    );
    assert_eq!(
        db.streaks(QualificationPolicy::CountOnly, today).unwrap(),
        StreakSummary { current: 2, longest: 3 }
    );

    // A day later the streak is still live (anchored at yesterday)
    assert_eq!(
        db.streaks(QualificationPolicy::CountOrMood, d("2025-03-10")).unwrap().current,
        2
    );
    // Two days later it is gone, but the record stays
    assert_eq!(
        db.streaks(QualificationPolicy::CountOrMood, d("2025-03-11")).unwrap(),
        StreakSummary { current: 0, longest: 4 }
    );
}

#[test]
fn test_clearing_mood_retroactively_changes_streak() {
    let db = Database::open_memory().unwrap();
    let section = db.add_section("Habits").unwrap();
    let task = db.add_task(section.id, "Journal").unwrap();

    db.set_count(d("2025-04-01"), task.id, 1).unwrap();
    db.set_mood(d("2025-04-02"), Some("🙂")).unwrap();
    db.set_count(d("2025-04-03"), task.id, 1).unwrap();

    let today = d("2025-04-03");
    assert_eq!(db.streaks(QualificationPolicy::CountOrMood, today).unwrap().current, 3);

    db.set_mood(d("2025-04-02"), None).unwrap();
    assert_eq!(
        db.streaks(QualificationPolicy::CountOrMood, today).unwrap(),
        StreakSummary { current: 1, longest: 1 }
    );
}

#[test]
fn test_removed_task_drops_its_history_from_streaks() {
    let db = Database::open_memory().unwrap();
    let section = db.add_section("Side").unwrap();
    let keep = db.add_task(section.id, "Keep").unwrap();
    let drop = db.add_task(section.id, "Drop").unwrap();

    db.set_count(d("2025-05-01"), keep.id, 1).unwrap();
    db.set_count(d("2025-05-02"), drop.id, 1).unwrap();
    db.set_count(d("2025-05-03"), keep.id, 1).unwrap();
    assert_eq!(
        db.streaks(QualificationPolicy::CountOrMood, d("2025-05-03")).unwrap().longest,
        3
    );

    db.remove_task(drop.id).unwrap();
    assert_eq!(
        db.streaks(QualificationPolicy::CountOrMood, d("2025-05-03")).unwrap(),
        StreakSummary { current: 1, longest: 1 }
    );
}

#[test]
fn test_stats_from_database_with_configured_policy() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join("config.toml");
    let mut config = Config::load_from(&config_path).unwrap();
    config.set("streak.policy", "count_only").unwrap();
    config.save_to(&config_path).unwrap();
    let config = Config::load_from(&config_path).unwrap();

    let db = Database::open_at(&dir.path().join("progress.db")).unwrap();
    let work = db.add_section("Work").unwrap();
    let tickets = db.add_task(work.id, "Tickets").unwrap();
    db.set_count(d("2025-01-06"), tickets.id, 3).unwrap();
    db.set_count(d("2025-01-07"), tickets.id, 7).unwrap();
    db.set_mood(d("2025-01-08"), Some("🎉")).unwrap();

    let analyzer = ProgressStatsAnalyzer::new(
        config.streak.policy,
        config.display.week_starts_on_monday,
    );
    let stats = analyzer
        .analyze_database(&db, d("2025-01-01"), d("2025-01-31"))
        .unwrap();

    assert_eq!(stats.total_count, 10);
    assert_eq!(stats.active_days, 2);
    assert_eq!(stats.qualifying_days, 2);
    assert_eq!(stats.best_day.as_ref().map(|b| b.date), Some(d("2025-01-07")));
    assert_eq!(stats.moods.len(), 1);
    assert_eq!(stats.by_section[0].total, 10);
}
