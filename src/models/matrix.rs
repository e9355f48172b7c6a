//! Eisenhower-matrix classification for tasks.
//!
//! Importance and urgency are derived client-side for the prioritization
//! view; they are never sent back to the backend.

use chrono::{DateTime, Utc};

use super::{Task, TaskCategory, TaskStatus};

/// Keywords in the title or description that mark a task as important.
const IMPORTANT_KEYWORDS: [&str; 5] = ["important", "critical", "priority", "urgent", "deadline"];

/// Tasks due within this many days count as urgent.
const URGENT_WINDOW_DAYS: i64 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Importance {
    High,
    Low,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Urgency {
    High,
    Low,
}

/// The four quadrants of the prioritization matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quadrant {
    /// Important and urgent
    DoFirst,
    /// Important, not urgent
    Schedule,
    /// Urgent, not important
    Delegate,
    /// Neither
    Eliminate,
}

impl Quadrant {
    pub fn from_levels(importance: Importance, urgency: Urgency) -> Self {
        match (importance, urgency) {
            (Importance::High, Urgency::High) => Quadrant::DoFirst,
            (Importance::High, Urgency::Low) => Quadrant::Schedule,
            (Importance::Low, Urgency::High) => Quadrant::Delegate,
            (Importance::Low, Urgency::Low) => Quadrant::Eliminate,
        }
    }
}

/// Classify a task's importance from its text and category.
pub fn importance(task: &Task) -> Importance {
    let text = format!(
        "{} {}",
        task.title,
        task.description.as_deref().unwrap_or("")
    )
    .to_lowercase();

    if IMPORTANT_KEYWORDS.iter().any(|kw| text.contains(kw)) {
        return Importance::High;
    }

    if matches!(task.category, Some(TaskCategory::Work)) {
        return Importance::High;
    }

    Importance::Low
}

/// Classify a task's urgency from its due date. No due date means not urgent.
pub fn urgency(task: &Task) -> Urgency {
    urgency_at(task, Utc::now())
}

/// Urgency against an injected clock, for deterministic tests.
pub fn urgency_at(task: &Task, now: DateTime<Utc>) -> Urgency {
    match task.date_due {
        Some(due) => {
            let remaining = due.signed_duration_since(now);
            if remaining.num_seconds() <= URGENT_WINDOW_DAYS * 86_400 {
                Urgency::High
            } else {
                Urgency::Low
            }
        }
        None => Urgency::Low,
    }
}

/// Place a task in its matrix quadrant.
pub fn quadrant(task: &Task) -> Quadrant {
    Quadrant::from_levels(importance(task), urgency(task))
}

/// A task is overdue when its due date has passed and it is not completed.
pub fn is_overdue(task: &Task, now: DateTime<Utc>) -> bool {
    match task.date_due {
        Some(due) => due < now && task.status != TaskStatus::Completed,
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn task(title: &str) -> Task {
        Task {
            id: 1,
            title: title.to_string(),
            description: None,
            date_assigned: None,
            date_due: None,
            users: vec![],
            status: TaskStatus::Pending,
            category: None,
        }
    }

    #[test]
    fn test_importance_keyword_in_title() {
        assert_eq!(importance(&task("URGENT: file taxes")), Importance::High);
        assert_eq!(importance(&task("water plants")), Importance::Low);
    }

    #[test]
    fn test_importance_keyword_in_description() {
        let mut t = task("file taxes");
        t.description = Some("deadline is Friday".to_string());
        assert_eq!(importance(&t), Importance::High);
    }

    #[test]
    fn test_importance_work_category() {
        let mut t = task("standup");
        t.category = Some(TaskCategory::Work);
        assert_eq!(importance(&t), Importance::High);

        t.category = Some(TaskCategory::Other);
        assert_eq!(importance(&t), Importance::Low);
    }

    #[test]
    fn test_urgency_due_soon() {
        let now = Utc::now();
        let mut t = task("pack bags");
        t.date_due = Some(now + Duration::days(2));
        assert_eq!(urgency_at(&t, now), Urgency::High);

        t.date_due = Some(now + Duration::days(10));
        assert_eq!(urgency_at(&t, now), Urgency::Low);
    }

    #[test]
    fn test_urgency_past_due_is_urgent() {
        let now = Utc::now();
        let mut t = task("expired already");
        t.date_due = Some(now - Duration::days(1));
        assert_eq!(urgency_at(&t, now), Urgency::High);
    }

    #[test]
    fn test_urgency_no_due_date() {
        assert_eq!(urgency_at(&task("someday"), Utc::now()), Urgency::Low);
    }

    #[test]
    fn test_quadrant_mapping() {
        assert_eq!(
            Quadrant::from_levels(Importance::High, Urgency::High),
            Quadrant::DoFirst
        );
        assert_eq!(
            Quadrant::from_levels(Importance::High, Urgency::Low),
            Quadrant::Schedule
        );
        assert_eq!(
            Quadrant::from_levels(Importance::Low, Urgency::High),
            Quadrant::Delegate
        );
        assert_eq!(
            Quadrant::from_levels(Importance::Low, Urgency::Low),
            Quadrant::Eliminate
        );
    }

    #[test]
    fn test_is_overdue() {
        let now = Utc::now();
        let mut t = task("renew passport");
        assert!(!is_overdue(&t, now));

        t.date_due = Some(now - Duration::hours(1));
        assert!(is_overdue(&t, now));

        t.status = TaskStatus::Completed;
        assert!(!is_overdue(&t, now));
    }
}
