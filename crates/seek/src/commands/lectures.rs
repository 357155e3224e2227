//! Lecture command handlers.

use tabled::Tabled;

use seek_api::models::Lecture;

use crate::cli::{GlobalOpts, LecturesArgs, LecturesCommand};
use crate::config::Context;
use crate::error::CliError;
use crate::output::{self, Painter};

use super::util;

#[derive(Tabled)]
pub(super) struct LectureRow {
    #[tabled(rename = "ID")]
    id: u64,
    #[tabled(rename = "Week")]
    week_id: u64,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Video")]
    video: String,
}

impl From<&Lecture> for LectureRow {
    fn from(l: &Lecture) -> Self {
        Self {
            id: l.id,
            week_id: l.week_id,
            title: l.title.clone(),
            video: util::or_dash(l.video_id.as_deref()),
        }
    }
}

fn detail(painter: Painter, ctx: &Context, l: &Lecture) -> String {
    let href = ctx
        .shell
        .routes()
        .href("Lecture", &[])
        .map(|base| format!("{base}?week_id={}&lecture_id={}", l.week_id, l.id))
        .unwrap_or_default();
    output::detail_lines(
        painter,
        &[
            ("ID", l.id.to_string()),
            ("Week", l.week_id.to_string()),
            ("Title", l.title.clone()),
            ("Video", util::or_dash(l.video_id.as_deref())),
            ("Page", href),
        ],
    )
}

pub async fn handle(
    ctx: &Context,
    args: LecturesArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let painter = Painter::new(&global.color);

    match args.command {
        LecturesCommand::List { week } => {
            let mut lectures = ctx.api().list_lectures().await?;
            if let Some(week) = week {
                lectures.retain(|l| l.week_id == week);
            }
            let out = output::render_list(
                &global.output,
                &lectures,
                |l: &Lecture| LectureRow::from(l),
                |l| l.id.to_string(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        LecturesCommand::Get { id } => {
            let lecture = ctx.api().get_lecture(id).await?;
            let out = output::render_single(
                &global.output,
                &lecture,
                |l| detail(painter, ctx, l),
                |l| l.id.to_string(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }
    }
}
