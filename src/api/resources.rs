//! Typed CRUD wrappers over the backend record endpoints.
//!
//! All of these route through [`ApiClient::request`], so every call gets
//! the bearer injection and refresh-and-retry behavior for free. Non-2xx
//! responses become [`ApiError::Server`] with the raw body as the message.
//!
//! Notes, habits and goals are scoped per user; their list endpoints take
//! the owning `user_id` as a query parameter.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::api::client::ApiClient;
use crate::error::ApiError;
use crate::models::{
    Goal, GoalPeriod, GoalStatus, Habit, HabitStatus, NewGoal, NewHabit, NewNote, NewTask, Note,
    Task, TaskCategory, TaskPatch, TaskStatus, User,
};
use crate::traits::Method;

/// Build `base?key=value` with the value percent-encoded.
fn filter_path(base: &str, key: &str, value: &str) -> String {
    format!("{}?{}={}", base, key, urlencoding::encode(value))
}

impl ApiClient {
    async fn fetch_json<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<&serde_json::Value>,
    ) -> Result<T, ApiError> {
        let response = self.request(method, path, body).await?;
        if !response.is_success() {
            return Err(ApiError::Server {
                status: response.status,
                message: response
                    .text()
                    .unwrap_or_else(|_| "Unknown error".to_string()),
            });
        }
        Ok(response.json()?)
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: &impl Serialize,
    ) -> Result<T, ApiError> {
        let value = serde_json::to_value(body)?;
        self.fetch_json(method, path, Some(&value)).await
    }

    async fn expect_success(&self, method: Method, path: &str) -> Result<(), ApiError> {
        let response = self.request(method, path, None).await?;
        if !response.is_success() {
            return Err(ApiError::Server {
                status: response.status,
                message: response
                    .text()
                    .unwrap_or_else(|_| "Unknown error".to_string()),
            });
        }
        Ok(())
    }

    // Tasks

    pub async fn list_tasks(&self) -> Result<Vec<Task>, ApiError> {
        self.fetch_json(Method::Get, "/tasks", None).await
    }

    pub async fn get_task(&self, id: i64) -> Result<Task, ApiError> {
        self.fetch_json(Method::Get, &format!("/tasks/{}", id), None)
            .await
    }

    pub async fn create_task(&self, task: &NewTask) -> Result<Task, ApiError> {
        self.send_json(Method::Post, "/tasks", task).await
    }

    pub async fn update_task(&self, id: i64, patch: &TaskPatch) -> Result<Task, ApiError> {
        self.send_json(Method::Put, &format!("/tasks/{}", id), patch)
            .await
    }

    pub async fn delete_task(&self, id: i64) -> Result<(), ApiError> {
        self.expect_success(Method::Delete, &format!("/tasks/{}", id))
            .await
    }

    /// Filter tasks by status (GET /tasks/status?status=...).
    pub async fn tasks_by_status(&self, status: TaskStatus) -> Result<Vec<Task>, ApiError> {
        self.fetch_json(
            Method::Get,
            &filter_path("/tasks/status", "status", status.as_str()),
            None,
        )
        .await
    }

    /// Filter tasks by category (GET /tasks/category?category=...).
    pub async fn tasks_by_category(&self, category: TaskCategory) -> Result<Vec<Task>, ApiError> {
        self.fetch_json(
            Method::Get,
            &filter_path("/tasks/category", "category", category.as_str()),
            None,
        )
        .await
    }

    // Notes

    pub async fn list_notes(&self, user_id: i64) -> Result<Vec<Note>, ApiError> {
        self.fetch_json(Method::Get, &format!("/notes?user_id={}", user_id), None)
            .await
    }

    pub async fn get_note(&self, id: i64) -> Result<Note, ApiError> {
        self.fetch_json(Method::Get, &format!("/notes/{}", id), None)
            .await
    }

    pub async fn create_note(&self, note: &NewNote) -> Result<Note, ApiError> {
        self.send_json(Method::Post, "/notes", note).await
    }

    pub async fn update_note(&self, id: i64, note: &Note) -> Result<Note, ApiError> {
        self.send_json(Method::Put, &format!("/notes/{}", id), note)
            .await
    }

    pub async fn delete_note(&self, id: i64) -> Result<(), ApiError> {
        self.expect_success(Method::Delete, &format!("/notes/{}", id))
            .await
    }

    // Habits

    pub async fn list_habits(&self, user_id: i64) -> Result<Vec<Habit>, ApiError> {
        self.fetch_json(Method::Get, &format!("/habits?user_id={}", user_id), None)
            .await
    }

    pub async fn get_habit(&self, id: i64) -> Result<Habit, ApiError> {
        self.fetch_json(Method::Get, &format!("/habits/{}", id), None)
            .await
    }

    /// Filter habits by status (GET /habits/status?status=...).
    pub async fn habits_by_status(&self, status: HabitStatus) -> Result<Vec<Habit>, ApiError> {
        self.fetch_json(
            Method::Get,
            &filter_path("/habits/status", "status", status.as_str()),
            None,
        )
        .await
    }

    pub async fn create_habit(&self, habit: &NewHabit) -> Result<Habit, ApiError> {
        self.send_json(Method::Post, "/habits", habit).await
    }

    pub async fn update_habit(&self, id: i64, habit: &Habit) -> Result<Habit, ApiError> {
        self.send_json(Method::Put, &format!("/habits/{}", id), habit)
            .await
    }

    pub async fn delete_habit(&self, id: i64) -> Result<(), ApiError> {
        self.expect_success(Method::Delete, &format!("/habits/{}", id))
            .await
    }

    // Goals

    pub async fn list_goals(&self, user_id: i64) -> Result<Vec<Goal>, ApiError> {
        self.fetch_json(Method::Get, &format!("/goals?user_id={}", user_id), None)
            .await
    }

    pub async fn get_goal(&self, id: i64) -> Result<Goal, ApiError> {
        self.fetch_json(Method::Get, &format!("/goals/{}", id), None)
            .await
    }

    /// Filter goals by status (GET /goals/status?status=...).
    pub async fn goals_by_status(&self, status: GoalStatus) -> Result<Vec<Goal>, ApiError> {
        self.fetch_json(
            Method::Get,
            &filter_path("/goals/status", "status", status.as_str()),
            None,
        )
        .await
    }

    /// Filter goals by period (GET /goals/period?period=...).
    pub async fn goals_by_period(&self, period: GoalPeriod) -> Result<Vec<Goal>, ApiError> {
        self.fetch_json(
            Method::Get,
            &filter_path("/goals/period", "period", period.as_str()),
            None,
        )
        .await
    }

    pub async fn create_goal(&self, goal: &NewGoal) -> Result<Goal, ApiError> {
        self.send_json(Method::Post, "/goals", goal).await
    }

    pub async fn update_goal(&self, id: i64, goal: &Goal) -> Result<Goal, ApiError> {
        self.send_json(Method::Put, &format!("/goals/{}", id), goal)
            .await
    }

    pub async fn delete_goal(&self, id: i64) -> Result<(), ApiError> {
        self.expect_success(Method::Delete, &format!("/goals/{}", id))
            .await
    }

    // Users

    pub async fn list_users(&self) -> Result<Vec<User>, ApiError> {
        self.fetch_json(Method::Get, "/users", None).await
    }

    pub async fn update_user(&self, id: i64, user: &User) -> Result<User, ApiError> {
        self.send_json(Method::Put, &format!("/users/{}", id), user)
            .await
    }

    pub async fn delete_user(&self, id: i64) -> Result<(), ApiError> {
        self.expect_success(Method::Delete, &format!("/users/{}", id))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_path_encodes_spaces() {
        assert_eq!(
            filter_path("/tasks/status", "status", TaskStatus::InProgress.as_str()),
            "/tasks/status?status=In%20Progress"
        );
        assert_eq!(
            filter_path("/goals/period", "period", GoalPeriod::FiveYear.as_str()),
            "/goals/period?period=Five%20Year"
        );
        assert_eq!(
            filter_path("/tasks/status", "status", TaskStatus::Pending.as_str()),
            "/tasks/status?status=Pending"
        );
    }
}
