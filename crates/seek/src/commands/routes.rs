//! Route table command handlers. Offline: nothing here calls the API.

use serde::Serialize;
use tabled::Tabled;

use seek_core::{Resolution, RouteEntry};

use crate::cli::{GlobalOpts, RoutesArgs, RoutesCommand};
use crate::config::Context;
use crate::error::CliError;
use crate::output::{self, Painter};

// ── Table rows ──────────────────────────────────────────────────────

#[derive(Serialize)]
struct RouteInfo {
    name: &'static str,
    path: String,
    aliases: Vec<String>,
    view: String,
    props: bool,
}

impl From<&RouteEntry> for RouteInfo {
    fn from(e: &RouteEntry) -> Self {
        Self {
            name: e.name,
            path: e.pattern.to_string(),
            aliases: e.aliases.iter().map(ToString::to_string).collect(),
            view: e.view.to_string(),
            props: e.has_props_mapper(),
        }
    }
}

#[derive(Tabled)]
struct RouteRow {
    #[tabled(rename = "Name")]
    name: &'static str,
    #[tabled(rename = "Path")]
    path: String,
    #[tabled(rename = "Aliases")]
    aliases: String,
    #[tabled(rename = "View")]
    view: String,
    #[tabled(rename = "Props")]
    props: &'static str,
}

impl From<&RouteInfo> for RouteRow {
    fn from(r: &RouteInfo) -> Self {
        Self {
            name: r.name,
            path: r.path.clone(),
            aliases: r.aliases.join(", "),
            view: r.view.clone(),
            props: if r.props { "mapped" } else { "path" },
        }
    }
}

fn resolution_detail(painter: Painter, r: &Resolution) -> String {
    let fmt_map = |m: &std::collections::BTreeMap<String, String>| {
        if m.is_empty() {
            "-".to_owned()
        } else {
            m.iter()
                .map(|(k, v)| format!("{k}={v}"))
                .collect::<Vec<_>>()
                .join(", ")
        }
    };
    let view = if r.is_not_found() {
        painter.warn(&r.view.to_string())
    } else {
        painter.ok(&r.view.to_string())
    };
    output::detail_lines(
        painter,
        &[
            ("Route", r.name.unwrap_or("-").to_owned()),
            ("View", view),
            ("Path", r.path.clone()),
            ("Path params", fmt_map(&r.params.path)),
            ("Query", fmt_map(&r.params.query)),
            ("Props", fmt_map(&r.props)),
        ],
    )
}

// ── Handler ─────────────────────────────────────────────────────────

pub fn handle(ctx: &Context, args: RoutesArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let painter = Painter::new(&global.color);
    let routes = ctx.shell.routes();

    match args.command {
        RoutesCommand::List => {
            let infos: Vec<RouteInfo> = routes.entries().iter().map(RouteInfo::from).collect();
            let out = output::render_list(
                &global.output,
                &infos,
                |r: &RouteInfo| RouteRow::from(r),
                |r| r.path.clone(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        RoutesCommand::Resolve { url } => {
            let resolution = ctx.shell.navigate(&url);
            let out = output::render_single(
                &global.output,
                &resolution,
                |r| resolution_detail(painter, r),
                |r| r.view.to_string(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        RoutesCommand::Href { name, params } => {
            if routes.get(&name).is_none() {
                let available = routes
                    .entries()
                    .iter()
                    .map(|e| e.name)
                    .collect::<Vec<_>>()
                    .join(", ");
                return Err(CliError::UnknownRoute { name, available });
            }
            let pairs: Vec<(&str, &str)> = params
                .iter()
                .map(|(k, v)| (k.as_str(), v.as_str()))
                .collect();
            let href = routes.href(&name, &pairs)?;
            output::print_output(&href, global.quiet);
            Ok(())
        }
    }
}
