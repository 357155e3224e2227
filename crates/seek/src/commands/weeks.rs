//! Week command handlers.

use tabled::Tabled;

use seek_api::models::{Week, WeekDetail};

use crate::cli::{GlobalOpts, WeeksArgs, WeeksCommand};
use crate::config::Context;
use crate::error::CliError;
use crate::output::{self, Painter};

use super::assignments::AssignmentRow;
use super::lectures::LectureRow;

#[derive(Tabled)]
struct WeekRow {
    #[tabled(rename = "ID")]
    id: u64,
    #[tabled(rename = "Week")]
    number: u32,
    #[tabled(rename = "Title")]
    title: String,
}

impl From<&Week> for WeekRow {
    fn from(w: &Week) -> Self {
        Self {
            id: w.id,
            number: w.week_number,
            title: w.title.clone(),
        }
    }
}

fn detail(painter: Painter, w: &WeekDetail) -> String {
    let mut out = painter.heading(&format!("Week {}: {}", w.week_number, w.title));

    out.push_str("\n\n");
    out.push_str(&painter.label("Lectures"));
    out.push('\n');
    if w.lectures.is_empty() {
        out.push_str("  (none)");
    } else {
        out.push_str(&tabled::Table::new(w.lectures.iter().map(LectureRow::from)).to_string());
    }

    out.push_str("\n\n");
    out.push_str(&painter.label("Assignments"));
    out.push('\n');
    if w.assignments.is_empty() {
        out.push_str("  (none)");
    } else {
        out.push_str(
            &tabled::Table::new(w.assignments.iter().map(AssignmentRow::from)).to_string(),
        );
    }
    out
}

pub async fn handle(ctx: &Context, args: WeeksArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let painter = Painter::new(&global.color);

    match args.command {
        WeeksCommand::List => {
            let weeks = ctx.api().list_weeks().await?;
            let out = output::render_list(
                &global.output,
                &weeks,
                |w: &Week| WeekRow::from(w),
                |w| w.id.to_string(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        WeeksCommand::Get { id } => {
            let week = ctx.api().get_week(id).await?;
            let out = output::render_single(
                &global.output,
                &week,
                |w| detail(painter, w),
                |w| w.id.to_string(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }
    }
}
