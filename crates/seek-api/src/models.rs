// Wire types for the Seek REST API.
//
// Responses come wrapped in a `{ success, message, <payload> }` envelope;
// the envelopes themselves stay private to `endpoints/`.

use chrono::{NaiveDate, NaiveDateTime};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize, Serializer};

// ── Auth ────────────────────────────────────────────────────────────

fn expose<S: Serializer>(secret: &SecretString, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(secret.expose_secret())
}

/// Body of `POST /login`.
#[derive(Debug, Clone, Serialize)]
pub struct Credentials {
    pub email: String,
    #[serde(serialize_with = "expose")]
    pub password: SecretString,
}

/// Body of `POST /signup`.
#[derive(Debug, Clone, Serialize)]
pub struct SignupRequest {
    pub username: String,
    pub email: String,
    #[serde(serialize_with = "expose")]
    pub password: SecretString,
    pub role: Role,
}

/// Body of `POST /google_login` and `POST /google_signup`.
#[derive(Debug, Clone, Serialize)]
pub struct GoogleTokenRequest {
    #[serde(serialize_with = "expose")]
    pub access_token: SecretString,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    Student,
    Admin,
}

/// Successful login: the JWT to persist under `access_token`.
#[derive(Debug, Deserialize)]
pub struct LoginResponse {
    pub access_token: SecretString,
    #[serde(default)]
    pub message: Option<String>,
}

/// Envelope for endpoints that only report a message.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MessageResponse {
    #[serde(default, alias = "Success")]
    pub success: Option<bool>,
    #[serde(default)]
    pub message: String,
}

// ── Course structure ────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Week {
    pub id: u64,
    pub week_number: u32,
    pub title: String,
}

/// A week with its lectures and assignments expanded.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct WeekDetail {
    pub id: u64,
    pub week_number: u32,
    pub title: String,
    #[serde(default)]
    pub lectures: Vec<Lecture>,
    #[serde(default)]
    pub assignments: Vec<Assignment>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Lecture {
    pub id: u64,
    pub week_id: u64,
    pub title: String,
    #[serde(default, alias = "video_url")]
    pub video_id: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AssignmentType {
    Graded,
    Practice,
    Programming,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Assignment {
    pub id: u64,
    pub week_id: u64,
    pub title: String,
    #[serde(rename = "type", alias = "assignment_type")]
    pub kind: AssignmentType,
    #[serde(default)]
    pub due_date: Option<String>,
    #[serde(default)]
    pub total_points: Option<u32>,
}

impl Assignment {
    /// Parse `due_date`, accepting both `YYYY-MM-DD` and ISO-8601 timestamps.
    pub fn due(&self) -> Option<NaiveDateTime> {
        let raw = self.due_date.as_deref()?;
        NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S")
            .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S"))
            .ok()
            .or_else(|| {
                NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                    .ok()
                    .and_then(|d| d.and_hms_opt(0, 0, 0))
            })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionType {
    SingleChoice,
    MultipleChoice,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct QuestionOption {
    pub id: u64,
    pub option_text: String,
    #[serde(default)]
    pub is_correct: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct AssignmentQuestion {
    pub id: u64,
    pub assignment_id: u64,
    pub question_text: String,
    pub question_type: QuestionType,
    #[serde(default)]
    pub points: Option<u32>,
    #[serde(default)]
    pub options: Vec<QuestionOption>,
}

/// Single assignment with its questions, as returned by `GET /assignments/{id}`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct AssignmentDetail {
    #[serde(flatten)]
    pub assignment: Assignment,
    #[serde(default)]
    pub questions: Vec<AssignmentQuestion>,
}

// ── Programming assignments ─────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct TestCase {
    pub input: String,
    pub expected_output: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ProgrammingAssignment {
    pub assignment_id: u64,
    pub problem_statement: String,
    #[serde(default)]
    pub input_format: Option<String>,
    #[serde(default)]
    pub output_format: Option<String>,
    #[serde(default)]
    pub constraints: Option<String>,
    #[serde(default)]
    pub sample_input: Option<String>,
    #[serde(default)]
    pub sample_output: Option<String>,
    #[serde(default)]
    pub test_cases: Vec<TestCase>,
}

// ── AI helpers ──────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct ExplainErrorRequest {
    pub code_snippet: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ErrorExplanation {
    #[serde(default)]
    pub message: Option<String>,
    pub explanation: String,
}

/// Body of `POST /chat_history`: one Kia chatbot turn.
#[derive(Debug, Clone, Serialize)]
pub struct ChatTurn {
    pub user_id: u64,
    pub query: String,
    pub response: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ChatTurnSaved {
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default)]
    pub message: String,
    pub user_id: u64,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn assignment_accepts_either_type_key() {
        let a: Assignment = serde_json::from_value(json!({
            "id": 1, "week_id": 2, "title": "A1", "type": "graded"
        }))
        .unwrap();
        assert_eq!(a.kind, AssignmentType::Graded);

        let b: Assignment = serde_json::from_value(json!({
            "id": 1, "week_id": 2, "title": "A1", "assignment_type": "practice"
        }))
        .unwrap();
        assert_eq!(b.kind, AssignmentType::Practice);
    }

    #[test]
    fn due_date_parses_plain_dates_and_timestamps() {
        let mut a: Assignment = serde_json::from_value(json!({
            "id": 1, "week_id": 1, "title": "A", "type": "graded", "due_date": "2024-12-31"
        }))
        .unwrap();
        assert_eq!(a.due().unwrap().to_string(), "2024-12-31 00:00:00");

        a.due_date = Some("2024-12-31T23:59:00".into());
        assert_eq!(a.due().unwrap().to_string(), "2024-12-31 23:59:00");

        a.due_date = Some("12-31-2024".into());
        assert!(a.due().is_none());
    }

    #[test]
    fn credentials_serialize_password() {
        let c = Credentials {
            email: "a@b.c".into(),
            password: SecretString::from("pw".to_owned()),
        };
        let v = serde_json::to_value(&c).unwrap();
        assert_eq!(v, json!({"email": "a@b.c", "password": "pw"}));
    }

    #[test]
    fn lecture_accepts_video_url_alias() {
        let l: Lecture = serde_json::from_value(json!({
            "id": 3, "week_id": 1, "title": "Intro", "video_url": "abc"
        }))
        .unwrap();
        assert_eq!(l.video_id.as_deref(), Some("abc"));
    }
}
