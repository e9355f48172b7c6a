//! Domain records exchanged with the DayMatrix backend.
//!
//! These are plain wire types owned by the backend; the client holds
//! ephemeral copies and never persists derived fields back.

pub mod matrix;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The authenticated principal, cached client-side for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default)]
    pub tasks: Vec<i64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaskStatus {
    Pending,
    #[serde(rename = "In Progress")]
    InProgress,
    Completed,
    Canceled,
}

impl TaskStatus {
    /// The wire name used in JSON bodies and query strings.
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Pending => "Pending",
            TaskStatus::InProgress => "In Progress",
            TaskStatus::Completed => "Completed",
            TaskStatus::Canceled => "Canceled",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaskCategory {
    Work,
    Home,
    Study,
    Other,
}

impl TaskCategory {
    /// The wire name used in JSON bodies and query strings.
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskCategory::Work => "Work",
            TaskCategory::Home => "Home",
            TaskCategory::Study => "Study",
            TaskCategory::Other => "Other",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: i64,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_assigned: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_due: Option<DateTime<Utc>>,
    #[serde(default)]
    pub users: Vec<i64>,
    pub status: TaskStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<TaskCategory>,
}

/// Payload for creating a task; the backend assigns the id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTask {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_assigned: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_due: Option<DateTime<Utc>>,
    pub status: TaskStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<TaskCategory>,
}

/// Partial update for a task; absent fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_assigned: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_due: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<TaskStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<TaskCategory>,
}

/// Payload for creating a note; the backend stamps the dates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewNote {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    pub user_id: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: i64,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_created: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_updated: Option<DateTime<Utc>>,
    pub user_id: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HabitStatus {
    #[serde(rename = "In Progress")]
    InProgress,
    Completed,
    Canceled,
    Planned,
}

impl HabitStatus {
    /// The wire name used in JSON bodies and query strings.
    pub fn as_str(&self) -> &'static str {
        match self {
            HabitStatus::InProgress => "In Progress",
            HabitStatus::Completed => "Completed",
            HabitStatus::Canceled => "Canceled",
            HabitStatus::Planned => "Planned",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HabitDay {
    Sunday,
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
}

/// Payload for creating a habit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewHabit {
    pub title: String,
    pub color: String,
    pub status: HabitStatus,
    pub habit_days: HabitDay,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Habit {
    pub id: i64,
    pub title: String,
    pub color: String,
    #[serde(default)]
    pub users: Vec<i64>,
    pub status: HabitStatus,
    pub habit_days: HabitDay,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GoalStatus {
    #[serde(rename = "In Progress")]
    InProgress,
    Completed,
    Canceled,
    Planned,
}

impl GoalStatus {
    /// The wire name used in JSON bodies and query strings.
    pub fn as_str(&self) -> &'static str {
        match self {
            GoalStatus::InProgress => "In Progress",
            GoalStatus::Completed => "Completed",
            GoalStatus::Canceled => "Canceled",
            GoalStatus::Planned => "Planned",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GoalPeriod {
    Monthly,
    Weekly,
    Yearly,
    #[serde(rename = "Five Year")]
    FiveYear,
}

impl GoalPeriod {
    /// The wire name used in JSON bodies and query strings.
    pub fn as_str(&self) -> &'static str {
        match self {
            GoalPeriod::Monthly => "Monthly",
            GoalPeriod::Weekly => "Weekly",
            GoalPeriod::Yearly => "Yearly",
            GoalPeriod::FiveYear => "Five Year",
        }
    }
}

/// Payload for creating a goal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewGoal {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub status: GoalStatus,
    pub goal_period: GoalPeriod,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Goal {
    pub id: i64,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub users: Vec<i64>,
    pub status: GoalStatus,
    pub goal_period: GoalPeriod,
}
