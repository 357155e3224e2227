// Course structure endpoints: weeks, lectures, assignments.

use serde::Deserialize;

use crate::client::ApiClient;
use crate::error::Error;
use crate::models::{Assignment, AssignmentDetail, Lecture, ProgrammingAssignment, Week, WeekDetail};

// ── Envelopes ───────────────────────────────────────────────────────

#[derive(Deserialize)]
struct WeeksEnvelope {
    weeks: Vec<Week>,
}

#[derive(Deserialize)]
struct WeekEnvelope {
    week: WeekDetail,
}

#[derive(Deserialize)]
struct LecturesEnvelope {
    lectures: Vec<Lecture>,
}

#[derive(Deserialize)]
struct LectureEnvelope {
    lecture: Lecture,
}

#[derive(Deserialize)]
struct AssignmentsEnvelope {
    assignments: Vec<Assignment>,
}

#[derive(Deserialize)]
struct AssignmentEnvelope {
    #[serde(alias = "data")]
    assignment: AssignmentDetail,
}

#[derive(Deserialize)]
struct ProgrammingEnvelope {
    data: ProgrammingAssignment,
}

// ── Endpoints ───────────────────────────────────────────────────────

impl ApiClient {
    /// `GET /weeks`
    pub async fn list_weeks(&self) -> Result<Vec<Week>, Error> {
        let env: WeeksEnvelope = self.get("/weeks").await?;
        Ok(env.weeks)
    }

    /// `GET /weeks/{id}` with lectures and assignments expanded.
    pub async fn get_week(&self, id: u64) -> Result<WeekDetail, Error> {
        let env: WeekEnvelope = self.get(&format!("/weeks/{id}")).await?;
        Ok(env.week)
    }

    /// `GET /lectures`
    pub async fn list_lectures(&self) -> Result<Vec<Lecture>, Error> {
        let env: LecturesEnvelope = self.get("/lectures").await?;
        Ok(env.lectures)
    }

    /// `GET /lectures/{id}`
    pub async fn get_lecture(&self, id: u64) -> Result<Lecture, Error> {
        let env: LectureEnvelope = self.get(&format!("/lectures/{id}")).await?;
        Ok(env.lecture)
    }

    /// `GET /assignments`
    pub async fn list_assignments(&self) -> Result<Vec<Assignment>, Error> {
        let env: AssignmentsEnvelope = self.get("/assignments").await?;
        Ok(env.assignments)
    }

    /// `GET /assignments/{id}`
    pub async fn get_assignment(&self, id: u64) -> Result<AssignmentDetail, Error> {
        let env: AssignmentEnvelope = self.get(&format!("/assignments/{id}")).await?;
        Ok(env.assignment)
    }

    /// `GET /programming_assignments/{id}`
    pub async fn get_programming_assignment(&self, id: u64) -> Result<ProgrammingAssignment, Error> {
        let env: ProgrammingEnvelope = self
            .get(&format!("/programming_assignments/{id}"))
            .await?;
        Ok(env.data)
    }
}
