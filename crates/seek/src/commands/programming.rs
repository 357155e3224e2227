//! Programming assignment command handler.

use std::fmt::Write as _;

use seek_api::models::ProgrammingAssignment;

use crate::cli::{GlobalOpts, ProgrammingArgs, ProgrammingCommand};
use crate::config::Context;
use crate::error::CliError;
use crate::output::{self, Painter};

fn section(out: &mut String, painter: Painter, title: &str, body: Option<&str>) {
    if let Some(body) = body.filter(|b| !b.trim().is_empty()) {
        let _ = write!(out, "\n\n{}\n{}", painter.label(title), body.trim_end());
    }
}

fn detail(painter: Painter, p: &ProgrammingAssignment) -> String {
    let mut out = painter.heading(&format!("Programming assignment {}", p.assignment_id));
    section(&mut out, painter, "Problem", Some(&p.problem_statement));
    section(&mut out, painter, "Input format", p.input_format.as_deref());
    section(&mut out, painter, "Output format", p.output_format.as_deref());
    section(&mut out, painter, "Constraints", p.constraints.as_deref());
    section(&mut out, painter, "Sample input", p.sample_input.as_deref());
    section(&mut out, painter, "Sample output", p.sample_output.as_deref());

    for (n, case) in p.test_cases.iter().enumerate() {
        let _ = write!(
            out,
            "\n\n{}\n  in:  {}\n  out: {}",
            painter.label(&format!("Test case {}", n + 1)),
            case.input.trim_end(),
            case.expected_output.trim_end()
        );
    }
    out
}

pub async fn handle(
    ctx: &Context,
    args: ProgrammingArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let painter = Painter::new(&global.color);

    match args.command {
        ProgrammingCommand::Get { id } => {
            let assignment = ctx.api().get_programming_assignment(id).await?;
            let out = output::render_single(
                &global.output,
                &assignment,
                |p| detail(painter, p),
                |p| p.assignment_id.to_string(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }
    }
}
