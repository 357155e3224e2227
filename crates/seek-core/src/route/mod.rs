// ── Route table ──
//
// The platform's routes as an ordered list of descriptor records,
// resolved by the pure matcher in `table.rs`. Nothing here constructs
// or renders a view.

mod pattern;
mod table;
mod view;

use std::collections::BTreeMap;

pub use pattern::PathPattern;
pub use table::{Resolution, RouteEntry, RouteParams, RouteTable};
pub use view::View;

/// Inputs handed to a resolved view.
pub type ViewProps = BTreeMap<String, String>;

/// Maps the navigation's params to view props. Must be pure.
pub type PropsFn = fn(&RouteParams) -> ViewProps;

/// Static description of one route.
#[derive(Debug, Clone, Copy)]
pub struct RouteDef {
    pub path: &'static str,
    pub name: &'static str,
    pub view: View,
    /// Secondary paths resolving to this same entry.
    pub aliases: &'static [&'static str],
    pub props: Option<PropsFn>,
}

impl RouteDef {
    pub const fn new(path: &'static str, name: &'static str, view: View) -> Self {
        Self {
            path,
            name,
            view,
            aliases: &[],
            props: None,
        }
    }

    pub const fn alias(mut self, aliases: &'static [&'static str]) -> Self {
        self.aliases = aliases;
        self
    }

    pub const fn props(mut self, props: PropsFn) -> Self {
        self.props = Some(props);
        self
    }
}

/// The platform's route list, in declaration order.
pub const ROUTES: &[RouteDef] = &[
    RouteDef::new("/login", "Login", View::Login).alias(&["/"]),
    RouteDef::new("/register", "Register", View::Register),
    RouteDef::new("/course", "Course", View::Course),
    RouteDef::new("/lecture", "Lecture", View::Lecture).props(lecture_props),
    RouteDef::new(
        "/programming/:id",
        "ProgrammingAssignment",
        View::ProgrammingAssignment,
    ),
    RouteDef::new("/assignment/:id", "Assignment", View::Assignment),
    RouteDef::new(
        "/generate-topic-mock",
        "GenerateTopicMock",
        View::GenerateTopicMock,
    )
    .props(topic_props),
    RouteDef::new("/kia", "Kia", View::Kia),
    RouteDef::new("/mock-quiz", "MockQuiz", View::MockQuiz).props(mock_quiz_props),
];

// ── Props mappers ───────────────────────────────────────────────────

fn pick(params: &RouteParams, keys: &[&str]) -> ViewProps {
    keys.iter()
        .filter_map(|k| params.query.get(*k).map(|v| ((*k).to_owned(), v.clone())))
        .collect()
}

fn lecture_props(params: &RouteParams) -> ViewProps {
    pick(params, &["week_id", "lecture_id"])
}

fn topic_props(params: &RouteParams) -> ViewProps {
    pick(params, &["topic"])
}

fn mock_quiz_props(params: &RouteParams) -> ViewProps {
    pick(params, &["topic", "week_id"])
}
