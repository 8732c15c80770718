//! Progress statistics over a date range.
//!
//! Aggregates per-day task counts and day entries into:
//! - totals per task and per section
//! - active and qualifying day counts
//! - a mood histogram
//! - weekly totals and the best day

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

use crate::error::{Result, ValidationError};
use crate::progress::{DayEntry, Section, Task, TaskCount};
use crate::storage::Database;
use crate::streak::QualificationPolicy;

/// Total count for one task over the range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskTotal {
    pub task_id: i64,
    pub task_name: String,
    pub section_id: i64,
    pub total: i64,
    /// Days on which this task had a positive count
    pub active_days: u32,
}

/// Total count for one section over the range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionTotal {
    pub section_id: i64,
    pub section_name: String,
    pub total: i64,
}

/// How many days carried a given mood.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoodCount {
    pub mood: String,
    pub days: u32,
}

/// Total count for the week starting at `week_start`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekTotal {
    pub week_start: NaiveDate,
    pub total: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BestDay {
    pub date: NaiveDate,
    pub total: i64,
}

/// Complete statistics report for an inclusive date range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressStats {
    pub from: NaiveDate,
    pub to: NaiveDate,
    pub days_in_range: u32,
    /// Days with at least one positive count
    pub active_days: u32,
    /// Days satisfying the qualification policy
    pub qualifying_days: u32,
    pub total_count: i64,
    pub by_task: Vec<TaskTotal>,
    pub by_section: Vec<SectionTotal>,
    pub moods: Vec<MoodCount>,
    pub weekly: Vec<WeekTotal>,
    pub best_day: Option<BestDay>,
}

/// Analyzer for progress over a range.
#[derive(Debug, Clone, Default)]
pub struct ProgressStatsAnalyzer {
    pub policy: QualificationPolicy,
    pub week_starts_on_monday: bool,
}

impl ProgressStatsAnalyzer {
    pub fn new(policy: QualificationPolicy, week_starts_on_monday: bool) -> Self {
        Self {
            policy,
            week_starts_on_monday,
        }
    }

    /// First day of the week containing `date`.
    pub fn week_start(&self, date: NaiveDate) -> NaiveDate {
        let offset = if self.week_starts_on_monday {
            date.weekday().num_days_from_monday()
        } else {
            date.weekday().num_days_from_sunday()
        };
        date - Duration::days(offset as i64)
    }

    /// Aggregate `counts` and `entries` falling inside `from..=to`.
    ///
    /// Records outside the range are ignored, as are counts for tasks that
    /// are not in `tasks`.
    ///
    /// # Errors
    /// Returns [`ValidationError::InvalidRange`] if `from > to`.
    pub fn analyze(
        &self,
        sections: &[Section],
        tasks: &[Task],
        counts: &[TaskCount],
        entries: &[DayEntry],
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<ProgressStats, ValidationError> {
        if from > to {
            return Err(ValidationError::InvalidRange { from, to });
        }
        let in_range = |date: NaiveDate| date >= from && date <= to;

        let task_map: HashMap<i64, &Task> = tasks.iter().map(|t| (t.id, t)).collect();
        let mut task_totals: BTreeMap<i64, (i64, u32)> = BTreeMap::new();
        let mut section_totals: HashMap<i64, i64> = HashMap::new();
        let mut day_totals: BTreeMap<NaiveDate, i64> = BTreeMap::new();
        let mut day_max: HashMap<NaiveDate, i64> = HashMap::new();

        for count in counts.iter().filter(|c| in_range(c.date)) {
            let Some(task) = task_map.get(&count.task_id) else {
                tracing::warn!(task_id = count.task_id, "count references unknown task");
                continue;
            };
            let entry = task_totals.entry(task.id).or_insert((0, 0));
            entry.0 = entry.0.saturating_add(count.count);
            if count.count > 0 {
                entry.1 += 1;
            }
            add_saturating(section_totals.entry(task.section_id).or_insert(0), count.count);
            add_saturating(day_totals.entry(count.date).or_insert(0), count.count);
            let max = day_max.entry(count.date).or_insert(0);
            *max = (*max).max(count.count);
        }

        let moods_by_day: HashMap<NaiveDate, &str> = entries
            .iter()
            .filter(|e| in_range(e.date))
            .filter_map(|e| e.mood.as_deref().map(|m| (e.date, m)))
            .collect();

        let mut mood_hist: BTreeMap<&str, u32> = BTreeMap::new();
        for mood in moods_by_day.values() {
            let mood = mood.trim();
            if !mood.is_empty() {
                *mood_hist.entry(mood).or_insert(0) += 1;
            }
        }

        let mut days_seen: Vec<NaiveDate> =
            day_max.keys().chain(moods_by_day.keys()).copied().collect();
        days_seen.sort();
        days_seen.dedup();
        let qualifying_days = days_seen
            .iter()
            .filter(|date| {
                let max = day_max.get(*date).copied().unwrap_or(0);
                self.policy.qualifies(max, moods_by_day.get(*date).copied())
            })
            .count() as u32;

        let active_days = day_max.values().filter(|max| **max > 0).count() as u32;
        let total_count = day_totals.values().fold(0i64, |acc, t| acc.saturating_add(*t));

        let mut weekly_map: BTreeMap<NaiveDate, i64> = BTreeMap::new();
        for (date, total) in &day_totals {
            add_saturating(weekly_map.entry(self.week_start(*date)).or_insert(0), *total);
        }

        // Highest total wins; earliest date breaks ties
        let best_day = day_totals
            .iter()
            .filter(|(_, total)| **total > 0)
            .fold(None::<BestDay>, |best, (date, total)| match best {
                Some(b) if b.total >= *total => Some(b),
                _ => Some(BestDay {
                    date: *date,
                    total: *total,
                }),
            });

        let by_task = task_totals
            .into_iter()
            .filter_map(|(task_id, (total, active))| {
                task_map.get(&task_id).map(|task| TaskTotal {
                    task_id,
                    task_name: task.name.clone(),
                    section_id: task.section_id,
                    total,
                    active_days: active,
                })
            })
            .collect();

        let by_section = sections
            .iter()
            .filter_map(|s| {
                section_totals.get(&s.id).map(|total| SectionTotal {
                    section_id: s.id,
                    section_name: s.name.clone(),
                    total: *total,
                })
            })
            .collect();

        let mut moods: Vec<MoodCount> = mood_hist
            .into_iter()
            .map(|(mood, days)| MoodCount {
                mood: mood.to_string(),
                days,
            })
            .collect();
        moods.sort_by(|a, b| b.days.cmp(&a.days).then_with(|| a.mood.cmp(&b.mood)));

        Ok(ProgressStats {
            from,
            to,
            days_in_range: ((to - from).num_days() + 1) as u32,
            active_days,
            qualifying_days,
            total_count,
            by_task,
            by_section,
            moods,
            weekly: weekly_map
                .into_iter()
                .map(|(week_start, total)| WeekTotal { week_start, total })
                .collect(),
            best_day,
        })
    }

    /// Load everything needed from `db` and analyze `from..=to`.
    pub fn analyze_database(
        &self,
        db: &Database,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<ProgressStats> {
        if from > to {
            return Err(ValidationError::InvalidRange { from, to }.into());
        }
        let sections = db.list_sections()?;
        let tasks = db.list_tasks(None, true)?;
        let counts = db.counts_between(from, to)?;
        let entries = db.entries_between(from, to)?;
        Ok(self.analyze(&sections, &tasks, &counts, &entries, from, to)?)
    }
}

/// Totals clamp at `i64::MAX` rather than overflowing.
fn add_saturating(slot: &mut i64, value: i64) {
    *slot = slot.saturating_add(value);
}
