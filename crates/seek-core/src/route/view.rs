use serde::Serialize;
use strum::{Display, EnumIter, IntoStaticStr};

/// Views the application can mount. Identifiers only; rendering belongs
/// to whatever front end consumes the route table.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display, EnumIter, IntoStaticStr,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum View {
    Login,
    Register,
    Course,
    Lecture,
    ProgrammingAssignment,
    Assignment,
    GenerateTopicMock,
    Kia,
    MockQuiz,
    /// Fallback for URLs no route matches.
    NotFound,
}
