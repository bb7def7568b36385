use crate::checklist::Checklist;
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

pub use taskdeck_core::config::DEFAULT_WEIGHT;

pub const MIN_WEIGHT: u8 = 1;
pub const MAX_WEIGHT: u8 = 100;

/// Process-local handle assigned by the task store. Never persisted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskId(pub u64);

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Identity of a sub-task as seen from a serialized copy of the task list.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TaskKey {
    pub main_task: String,
    pub branch_number: u32,
}

impl TaskKey {
    pub fn new(main_task: impl Into<String>, branch_number: u32) -> Self {
        Self {
            main_task: main_task.into(),
            branch_number,
        }
    }
}

impl fmt::Display for TaskKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.main_task, self.branch_number)
    }
}

/// A sub-task in its flat, in-memory form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    #[serde(skip)]
    pub id: TaskId,
    pub main_task: String,
    #[serde(default)]
    pub main_task_type: String,
    pub sub_task: String,
    #[serde(default)]
    pub details: String,
    /// Hours as a float; never negative.
    #[serde(default)]
    pub estimated_time: f64,
    pub branch_number: u32,
    #[serde(default = "default_weight", deserialize_with = "deserialize_weight")]
    pub weight: u8,
    #[serde(default)]
    pub completed: bool,
    #[serde(default, rename = "sub_task_tasks")]
    pub checklist: Checklist,
}

pub(crate) fn default_weight() -> u8 {
    DEFAULT_WEIGHT
}

/// Any JSON number is accepted and clamped into the weight range, so one
/// out-of-range record never makes a whole file unreadable.
pub(crate) fn deserialize_weight<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    struct WeightVisitor;

    impl Visitor<'_> for WeightVisitor {
        type Value = u8;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a numeric weight")
        }

        fn visit_i64<E: de::Error>(self, value: i64) -> Result<u8, E> {
            Ok(value.clamp(i64::from(MIN_WEIGHT), i64::from(MAX_WEIGHT)) as u8)
        }

        fn visit_u64<E: de::Error>(self, value: u64) -> Result<u8, E> {
            Ok(value.clamp(u64::from(MIN_WEIGHT), u64::from(MAX_WEIGHT)) as u8)
        }

        fn visit_f64<E: de::Error>(self, value: f64) -> Result<u8, E> {
            if value.is_nan() {
                return Ok(DEFAULT_WEIGHT);
            }
            Ok(value
                .round()
                .clamp(f64::from(MIN_WEIGHT), f64::from(MAX_WEIGHT)) as u8)
        }
    }

    deserializer.deserialize_any(WeightVisitor)
}

impl Task {
    pub fn new(
        main_task: impl Into<String>,
        main_task_type: impl Into<String>,
        sub_task: impl Into<String>,
        branch_number: u32,
    ) -> Self {
        Self {
            id: TaskId::default(),
            main_task: main_task.into(),
            main_task_type: main_task_type.into(),
            sub_task: sub_task.into(),
            details: String::new(),
            estimated_time: 0.0,
            branch_number,
            weight: DEFAULT_WEIGHT,
            completed: false,
            checklist: Checklist::default(),
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = details.into();
        self
    }

    pub fn with_time(mut self, hours: u32, minutes: u32) -> Self {
        self.estimated_time = EstimatedTime::new(hours, minutes).as_hours();
        self
    }

    pub fn with_weight(mut self, weight: u8) -> Self {
        self.weight = weight.clamp(MIN_WEIGHT, MAX_WEIGHT);
        self
    }

    pub fn with_checklist(mut self, checklist: Checklist) -> Self {
        self.checklist = checklist;
        self
    }

    pub fn key(&self) -> TaskKey {
        TaskKey::new(self.main_task.clone(), self.branch_number)
    }

    pub fn matches_key(&self, key: &TaskKey) -> bool {
        self.branch_number == key.branch_number && self.main_task == key.main_task
    }

    pub fn time(&self) -> EstimatedTime {
        EstimatedTime::from_hours(self.estimated_time)
    }
}

/// Whole hours plus minutes in `0..60`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EstimatedTime {
    pub hours: u32,
    pub minutes: u32,
}

impl EstimatedTime {
    /// Normalizes minutes of 60 or more into hours.
    pub fn new(hours: u32, minutes: u32) -> Self {
        Self {
            hours: hours.saturating_add(minutes / 60),
            minutes: minutes % 60,
        }
    }

    /// Splits fractional hours, rounding to the nearest minute. A fraction
    /// that rounds up to a full hour carries into `hours`. Hours past
    /// `u32::MAX` saturate.
    pub fn from_hours(time: f64) -> Self {
        if !time.is_finite() || time <= 0.0 {
            return Self::default();
        }
        let hours = time.floor();
        let minutes = ((time - hours) * 60.0).round();
        Self::new(hours as u32, minutes as u32)
    }

    pub fn as_hours(self) -> f64 {
        f64::from(self.hours) + f64::from(self.minutes) / 60.0
    }

    pub fn is_zero(self) -> bool {
        self.hours == 0 && self.minutes == 0
    }
}

/// `1h 30m`, `2h`, `45m`, `0m`.
impl fmt::Display for EstimatedTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.hours, self.minutes) {
            (0, m) => write!(f, "{}m", m),
            (h, 0) => write!(f, "{}h", h),
            (h, m) => write!(f, "{}h {}m", h, m),
        }
    }
}
