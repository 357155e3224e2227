//! Assignment command handlers.

use std::fmt::Write as _;

use tabled::Tabled;

use seek_api::models::{Assignment, AssignmentDetail, AssignmentType, QuestionType};

use crate::cli::{AssignmentsArgs, AssignmentsCommand, GlobalOpts};
use crate::config::Context;
use crate::error::CliError;
use crate::output::{self, Painter};

pub(super) fn kind_label(kind: AssignmentType) -> &'static str {
    match kind {
        AssignmentType::Graded => "graded",
        AssignmentType::Practice => "practice",
        AssignmentType::Programming => "programming",
    }
}

fn due_label(a: &Assignment) -> String {
    match (a.due(), a.due_date.as_deref()) {
        (Some(due), _) => due.format("%Y-%m-%d %H:%M").to_string(),
        (None, Some(raw)) => raw.to_owned(),
        (None, None) => "-".into(),
    }
}

#[derive(Tabled)]
pub(super) struct AssignmentRow {
    #[tabled(rename = "ID")]
    id: u64,
    #[tabled(rename = "Week")]
    week_id: u64,
    #[tabled(rename = "Type")]
    kind: &'static str,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Due")]
    due: String,
    #[tabled(rename = "Points")]
    points: String,
}

impl From<&Assignment> for AssignmentRow {
    fn from(a: &Assignment) -> Self {
        Self {
            id: a.id,
            week_id: a.week_id,
            kind: kind_label(a.kind),
            title: a.title.clone(),
            due: due_label(a),
            points: a.total_points.map_or_else(|| "-".into(), |p| p.to_string()),
        }
    }
}

/// Front-end page for an assignment: programming ones have their own view.
fn page_href(ctx: &Context, a: &Assignment) -> String {
    let route = match a.kind {
        AssignmentType::Programming => "ProgrammingAssignment",
        AssignmentType::Graded | AssignmentType::Practice => "Assignment",
    };
    let id = a.id.to_string();
    ctx.shell
        .routes()
        .href(route, &[("id", id.as_str())])
        .unwrap_or_default()
}

fn detail(painter: Painter, ctx: &Context, d: &AssignmentDetail) -> String {
    let a = &d.assignment;
    let mut out = painter.heading(&a.title);
    out.push('\n');
    out.push_str(&output::detail_lines(
        painter,
        &[
            ("ID", a.id.to_string()),
            ("Week", a.week_id.to_string()),
            ("Type", kind_label(a.kind).to_owned()),
            ("Due", due_label(a)),
            ("Points", a.total_points.map_or_else(|| "-".into(), |p| p.to_string())),
            ("Page", page_href(ctx, a)),
        ],
    ));

    for (n, q) in d.questions.iter().enumerate() {
        let kind = match q.question_type {
            QuestionType::SingleChoice => "single choice",
            QuestionType::MultipleChoice => "multiple choice",
        };
        let _ = write!(out, "\n\n{}. {} ", n + 1, q.question_text);
        out.push_str(&painter.label(&format!("({kind})")));
        for opt in &q.options {
            let _ = write!(out, "\n   - {}", opt.option_text);
        }
    }
    out
}

pub async fn handle(
    ctx: &Context,
    args: AssignmentsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let painter = Painter::new(&global.color);

    match args.command {
        AssignmentsCommand::List { week } => {
            let mut assignments = ctx.api().list_assignments().await?;
            if let Some(week) = week {
                assignments.retain(|a| a.week_id == week);
            }
            let out = output::render_list(
                &global.output,
                &assignments,
                |a: &Assignment| AssignmentRow::from(a),
                |a| a.id.to_string(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        AssignmentsCommand::Get { id } => {
            let assignment = ctx.api().get_assignment(id).await?;
            let out = output::render_single(
                &global.output,
                &assignment,
                |d| detail(painter, ctx, d),
                |d| d.assignment.id.to_string(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }
    }
}
