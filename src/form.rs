use thiserror::Error;

use crate::category::Category;
use crate::tracker::points_for_duration;

pub const MIN_DURATION: u32 = 15;
pub const MAX_DURATION: u32 = 180;
pub const DURATION_STEP: u32 = 15;
pub const DEFAULT_DURATION: u32 = 30;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("task name must not be empty")]
    EmptyName,
    #[error("duration {0} is outside 15..=180 minutes")]
    DurationOutOfRange(u32),
}

/// Transient state of the add-task overlay. Lives only while the overlay is open
/// and never touches the tracker on its own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddTaskForm {
    pub name: String,
    pub category: Category,
    pub duration: u32,
    default_duration: u32,
}

impl AddTaskForm {
    pub fn new(category: Category, duration: u32) -> Self {
        let duration = clamp_duration(duration);
        Self {
            name: String::new(),
            category,
            duration,
            default_duration: duration,
        }
    }

    pub fn push_char(&mut self, c: char) {
        self.name.push(c);
    }

    pub fn pop_char(&mut self) {
        self.name.pop();
    }

    pub fn next_category(&mut self) {
        self.category = self.category.next();
    }

    pub fn prev_category(&mut self) {
        self.category = self.category.prev();
    }

    pub fn increase_duration(&mut self) {
        self.duration = clamp_duration(self.duration + DURATION_STEP);
    }

    pub fn decrease_duration(&mut self) {
        self.duration = clamp_duration(self.duration.saturating_sub(DURATION_STEP));
    }

    /// Points the task would be worth if submitted now
    pub fn preview_points(&self) -> i64 {
        points_for_duration(self.duration)
    }

    pub fn validate(&self) -> Result<(String, Category, u32), FormError> {
        if self.name.trim().is_empty() {
            return Err(FormError::EmptyName);
        }
        if !(MIN_DURATION..=MAX_DURATION).contains(&self.duration) {
            return Err(FormError::DurationOutOfRange(self.duration));
        }
        Ok((self.name.clone(), self.category, self.duration))
    }

    /// Clear the name and restore the default duration after a successful submit.
    /// The chosen category is kept.
    pub fn reset(&mut self) {
        self.name.clear();
        self.duration = self.default_duration;
    }
}

impl Default for AddTaskForm {
    fn default() -> Self {
        Self::new(Category::default(), DEFAULT_DURATION)
    }
}

/// Snap `duration` onto the slider grid: a multiple of the step within bounds
pub fn clamp_duration(duration: u32) -> u32 {
    let snapped = (duration / DURATION_STEP) * DURATION_STEP;
    snapped.clamp(MIN_DURATION, MAX_DURATION)
}
