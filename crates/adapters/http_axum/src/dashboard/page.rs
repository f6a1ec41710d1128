//! The single dashboard page: every panel, with all but the visible one hidden.

use std::fmt::Write;

use axum::extract::State;
use axum::response::Html;

use eigerdash_app::dashboard::Snapshot;
use eigerdash_app::ports::StatusApi;
use eigerdash_domain::command::DetectorAction;
use eigerdash_domain::page::{Page, escape_html};
use eigerdash_domain::render::ids;
use eigerdash_domain::time::clock;
use eigerdash_domain::unit_table::{CONNECTED_COLUMN, UnitKind, cell_id, row_count, row_key};
use eigerdash_domain::view::Panel;

use crate::state::AppState;

/// `GET /`: render the dashboard and show pending alerts once.
pub async fn index<A: StatusApi>(State(state): State<AppState<A>>) -> Html<String> {
    let snapshot = state.dashboard.snapshot();
    let alerts = state.alerts.drain();
    let table_rows = state.dashboard.settings().table_rows;
    Html(render(&snapshot, &alerts, state.refresh_secs, table_rows))
}

/// Render the complete HTML document.
#[must_use]
pub fn render(
    snapshot: &Snapshot,
    alerts: &[String],
    refresh_secs: u32,
    table_rows: usize,
) -> String {
    let page = &snapshot.page;
    let mut html = String::with_capacity(16 * 1024);

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    if refresh_secs > 0 {
        let _ = writeln!(html, r#"<meta http-equiv="refresh" content="{refresh_secs}">"#);
    }
    let _ = writeln!(html, "<title>{}</title>\n</head>\n<body>", escape_html(&snapshot.title));

    html.push_str("<nav>\n");
    for panel in Panel::ALL {
        let current = if panel == snapshot.panel {
            r#" aria-current="page""#
        } else {
            ""
        };
        let _ = writeln!(
            html,
            r#"<a href="/view/{}"{current}>{}</a>"#,
            panel.name(),
            panel.label()
        );
    }
    html.push_str("</nav>\n");

    for alert in alerts {
        let _ = writeln!(html, r#"<div class="alert" role="alert">{}</div>"#, escape_html(alert));
    }

    for panel in Panel::ALL {
        let hidden = if panel == snapshot.panel { "" } else { " hidden" };
        let _ = writeln!(
            html,
            r#"<section id="{name}" class="{name}"{hidden}>"#,
            name = panel.name()
        );
        let _ = writeln!(html, "<h2>{}</h2>", panel.label());
        match panel {
            Panel::Home => home(&mut html, page),
            Panel::Detector => detector(&mut html, page),
            Panel::Receivers => unit_table(&mut html, page, UnitKind::Receiver, table_rows),
            Panel::Processors => {
                unit_table(&mut html, page, UnitKind::Processor, table_rows);
                file_writer(&mut html);
            }
        }
        html.push_str("</section>\n");
    }

    let updated = page.updated_at().map_or_else(|| "never".to_string(), clock);
    let _ = writeln!(
        html,
        r#"<footer>API {} &middot; last update <span id="last-update">{updated}</span></footer>"#,
        escape_html(&snapshot.api_version)
    );
    html.push_str("</body>\n</html>\n");
    html
}

fn value_row(html: &mut String, page: &Page, label: &str, id: &str) {
    let _ = writeln!(
        html,
        r#"<tr><th>{label}</th><td id="{id}">{}</td></tr>"#,
        page.html(id)
    );
}

fn home(html: &mut String, page: &Page) {
    html.push_str("<table>\n");
    value_row(html, page, "API version", ids::API_VERSION);
    value_row(html, page, "Adapters", ids::API_ADAPTERS);
    html.push_str("</table>\n");
}

fn setting_row(html: &mut String, page: &Page, label: &str, id: &str, action: &str) {
    let _ = writeln!(
        html,
        r#"<tr><th>{label}</th><td id="{id}">{}</td><td><form method="post" action="{action}"><input name="value" required><button type="submit">Set</button></form></td></tr>"#,
        page.html(id)
    );
}

fn detector(html: &mut String, page: &Page) {
    html.push_str("<table>\n");
    setting_row(html, page, "Exposure (s)", ids::EXPOSURE, "/detector/exposure");
    setting_row(html, page, "Period (s)", ids::PERIOD, "/detector/period");
    setting_row(html, page, "Images", ids::NIMAGES, "/detector/nimages");
    value_row(html, page, "Acquisition complete", ids::ACQUIRE);
    value_row(html, page, "State", ids::STATE);
    html.push_str("</table>\n<div class=\"commands\">\n");
    for action in DetectorAction::ALL {
        let _ = writeln!(
            html,
            r#"<form method="post" action="/detector/command/{action}"><button type="submit">{action}</button></form>"#
        );
    }
    html.push_str("</div>\n");
}

fn column_label(column: &str) -> String {
    column.replace('-', " ")
}

fn unit_table(html: &mut String, page: &Page, kind: UnitKind, table_rows: usize) {
    let rows = table_rows.max(row_count(page, kind));
    let _ = write!(
        html,
        "<table id=\"{}-table\">\n<tr><th>#</th><th>{CONNECTED_COLUMN}</th>",
        kind.prefix()
    );
    for column in kind.columns() {
        let _ = write!(html, "<th>{}</th>", column_label(column));
    }
    html.push_str("</tr>\n");

    for index in 0..rows {
        let row = row_key(kind, index);
        let connected = cell_id(&row, CONNECTED_COLUMN);
        let _ = write!(
            html,
            r#"<tr id="{row}"><td>{}</td><td id="{connected}">{}</td>"#,
            index + 1,
            page.html(&connected)
        );
        for column in kind.columns() {
            let id = cell_id(&row, column);
            let _ = write!(html, r#"<td id="{id}">{}</td>"#, page.html(&id));
        }
        html.push_str("</tr>\n");
    }
    html.push_str("</table>\n");
}

fn file_writer(html: &mut String) {
    html.push_str(concat!(
        r#"<form method="post" action="/processor/params">"#,
        r#"<label>Frames <input name="frames" required></label>"#,
        r#"<label>Path <input name="path"></label>"#,
        r#"<label>File name <input name="filename"></label>"#,
        r#"<button type="submit">Apply</button></form>"#,
        "\n",
        r#"<form method="post" action="/processor/start"><button type="submit">Start writing</button></form>"#,
        "\n",
        r#"<form method="post" action="/processor/stop"><button type="submit">Stop writing</button></form>"#,
        "\n",
    ));
}
