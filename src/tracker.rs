use crate::category::Category;
use crate::util::percent;
use serde::Serialize;
use tracing::{debug, info};

/// Band size of one level
pub const POINTS_PER_LEVEL: i64 = 500;
/// Bonus credited by a check-in
pub const PUNCH_BONUS: i64 = 50;

pub const SEED_TOTAL_POINTS: i64 = 2480;
pub const SEED_STREAK: u32 = 15;

pub type TaskId = u64;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Task {
    pub id: TaskId,
    pub name: String,
    pub category: Category,
    pub duration: u32,
    pub completed: bool,
    pub points: i64,
}

/// Reward for a task of `duration` minutes: five points per full ten minutes plus ten
pub fn points_for_duration(duration: u32) -> i64 {
    (duration / 10) as i64 * 5 + 10
}

pub fn level_from_points(total_points: i64) -> i64 {
    total_points.div_euclid(POINTS_PER_LEVEL) + 1
}

pub fn points_to_next_level(total_points: i64) -> i64 {
    POINTS_PER_LEVEL - total_points.rem_euclid(POINTS_PER_LEVEL)
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CategoryStats {
    pub category: Category,
    pub completed: usize,
    pub total: usize,
    pub percent: f64,
}

/// Serializable view of the tracker plus every derived value
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrackerSnapshot {
    pub tasks: Vec<Task>,
    pub total_points: i64,
    pub streak: u32,
    pub today_punched: bool,
    pub completed_count: usize,
    pub progress_percent: f64,
    pub today_duration: u32,
    pub available_points: i64,
    pub level: i64,
    pub points_to_next_level: i64,
    pub categories: Vec<CategoryStats>,
}

/// All study state for one session: the task list and the points/streak ledger.
///
/// `total_points` is an event ledger. It moves on toggles and check-ins only and
/// is never reconciled against the set of completed tasks, so deleting a
/// completed task leaves its points credited.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackerState {
    tasks: Vec<Task>,
    total_points: i64,
    streak: u32,
    today_punched: bool,
    /// `None` once the id space is used up
    next_id: Option<TaskId>,
}

impl TrackerState {
    pub fn new(tasks: Vec<Task>, total_points: i64, streak: u32) -> Self {
        let next_id = match tasks.iter().map(|t| t.id).max() {
            Some(max) => max.checked_add(1),
            None => Some(1),
        };
        Self {
            tasks,
            total_points,
            streak,
            today_punched: false,
            next_id,
        }
    }

    /// Session start state: five example tasks, 2480 points, a 15 day streak
    pub fn seeded() -> Self {
        let seed = |id, name: &str, category, duration, completed, points| Task {
            id,
            name: name.to_string(),
            category,
            duration,
            completed,
            points,
        };

        Self::new(
            vec![
                seed(
                    1,
                    "Read \"Computer Systems: A Programmer's Perspective\", ch. 3",
                    Category::Reading,
                    60,
                    false,
                    30,
                ),
                seed(2, "LeetCode daily problem", Category::Coding, 45, true, 25),
                seed(3, "Memorize 50 English words", Category::Language, 30, true, 20),
                seed(4, "Study the React Hooks docs", Category::Coding, 90, false, 40),
                seed(5, "Morning run, 3 km", Category::Exercise, 30, true, 25),
            ],
            SEED_TOTAL_POINTS,
            SEED_STREAK,
        )
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn task(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn total_points(&self) -> i64 {
        self.total_points
    }

    pub fn streak(&self) -> u32 {
        self.streak
    }

    pub fn today_punched(&self) -> bool {
        self.today_punched
    }

    /// Flip completion of task `id`, crediting or debiting its points.
    /// Unknown ids are ignored.
    pub fn toggle_task(&mut self, id: TaskId) {
        let Some(task) = self.tasks.iter_mut().find(|t| t.id == id) else {
            debug!(id, "toggle ignored, no such task");
            return;
        };

        task.completed = !task.completed;
        if task.completed {
            self.total_points += task.points;
        } else {
            self.total_points -= task.points;
        }
        debug!(
            id,
            completed = task.completed,
            points = task.points,
            total_points = self.total_points,
            "task toggled"
        );
    }

    /// Append a new incomplete task. Returns `None` without touching state when
    /// `name` is blank or no fresh id is left. Duration bounds are the caller's business.
    pub fn add_task(&mut self, name: &str, category: Category, duration: u32) -> Option<TaskId> {
        if name.trim().is_empty() {
            debug!("add ignored, blank name");
            return None;
        }

        let Some(id) = self.next_id else {
            debug!("add ignored, task ids exhausted");
            return None;
        };
        self.next_id = id.checked_add(1);
        let points = points_for_duration(duration);
        self.tasks.push(Task {
            id,
            name: name.to_string(),
            category,
            duration,
            completed: false,
            points,
        });
        debug!(id, %category, duration, points, "task added");
        Some(id)
    }

    /// Remove task `id` if present. Points already credited for it stay.
    pub fn delete_task(&mut self, id: TaskId) {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != id);
        if self.tasks.len() != before {
            debug!(id, total_points = self.total_points, "task deleted");
        }
    }

    /// Once-per-session check-in: bumps the streak and credits the bonus
    pub fn punch(&mut self) {
        if self.today_punched {
            debug!("punch ignored, already checked in");
            return;
        }
        self.today_punched = true;
        self.streak += 1;
        self.total_points += PUNCH_BONUS;
        info!(
            streak = self.streak,
            total_points = self.total_points,
            "checked in"
        );
    }

    pub fn completed_count(&self) -> usize {
        self.tasks.iter().filter(|t| t.completed).count()
    }

    pub fn progress_percent(&self) -> f64 {
        percent(self.completed_count(), self.tasks.len())
    }

    /// Minutes studied today, counting completed tasks only
    pub fn today_duration(&self) -> u32 {
        self.tasks
            .iter()
            .filter(|t| t.completed)
            .map(|t| t.duration)
            .sum()
    }

    /// Points on offer across the whole list, completed or not
    pub fn available_points(&self) -> i64 {
        self.tasks.iter().map(|t| t.points).sum()
    }

    pub fn category_stats(&self, category: Category) -> CategoryStats {
        let (completed, total) = self
            .tasks
            .iter()
            .filter(|t| t.category == category)
            .fold((0, 0), |(done, all), t| {
                (done + usize::from(t.completed), all + 1)
            });

        CategoryStats {
            category,
            completed,
            total,
            percent: percent(completed, total),
        }
    }

    pub fn level(&self) -> i64 {
        level_from_points(self.total_points)
    }

    pub fn points_to_next_level(&self) -> i64 {
        points_to_next_level(self.total_points)
    }

    pub fn snapshot(&self) -> TrackerSnapshot {
        TrackerSnapshot {
            tasks: self.tasks.clone(),
            total_points: self.total_points,
            streak: self.streak,
            today_punched: self.today_punched,
            completed_count: self.completed_count(),
            progress_percent: self.progress_percent(),
            today_duration: self.today_duration(),
            available_points: self.available_points(),
            level: self.level(),
            points_to_next_level: self.points_to_next_level(),
            categories: Category::ALL
                .iter()
                .map(|c| self.category_stats(*c))
                .collect(),
        }
    }
}

impl Default for TrackerState {
    fn default() -> Self {
        Self::seeded()
    }
}
