use serde::Serialize;

use crate::util::format_minutes;

/// One row of the study history table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StudyRecord {
    pub date: &'static str,
    pub duration: u32,
    pub tasks: u32,
    pub points: u32,
}

impl StudyRecord {
    pub fn duration_label(&self) -> String {
        format_minutes(self.duration)
    }
}

// Static sample history, newest first. Never written to.
const SAMPLE_RECORDS: [StudyRecord; 5] = [
    StudyRecord {
        date: "Dec 13",
        duration: 180,
        tasks: 5,
        points: 120,
    },
    StudyRecord {
        date: "Dec 12",
        duration: 240,
        tasks: 6,
        points: 150,
    },
    StudyRecord {
        date: "Dec 11",
        duration: 150,
        tasks: 4,
        points: 95,
    },
    StudyRecord {
        date: "Dec 10",
        duration: 200,
        tasks: 5,
        points: 130,
    },
    StudyRecord {
        date: "Dec 9",
        duration: 120,
        tasks: 3,
        points: 75,
    },
];

pub fn sample_records() -> &'static [StudyRecord] {
    &SAMPLE_RECORDS
}
