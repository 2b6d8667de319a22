// Time Grid Select
// Replays a scripted pointer gesture against a week grid and prints the selections

use std::fs;
use std::time::{Duration, Instant};

use anyhow::{anyhow, Context, Result};
use chrono::{NaiveDate, NaiveDateTime};
use egui::Pos2;
use serde::{Deserialize, Serialize};

use time_grid_select::models::selection::{SelectionSegment, SlotRef};
use time_grid_select::models::settings::GridSettings;
use time_grid_select::services::settings::SettingsService;
use time_grid_select::ui::selection::SelectionCommit;
use time_grid_select::{GridLayout, TimeGridCalendar};

#[derive(Debug, Deserialize)]
struct Script {
    start_date: NaiveDate,
    #[serde(default = "default_columns")]
    columns: usize,
    #[serde(default = "default_column_width")]
    column_width: f32,
    #[serde(default = "default_gutter")]
    gutter: f32,
    steps: Vec<Step>,
}

fn default_columns() -> usize {
    7
}

fn default_column_width() -> f32 {
    120.0
}

fn default_gutter() -> f32 {
    60.0
}

#[derive(Debug, Deserialize)]
#[serde(tag = "action", rename_all = "lowercase")]
enum Step {
    Down(Target),
    Move(Target),
    Up(Target),
    Click(Target),
    Dblclick(Target),
    Wait { ms: u64 },
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Target {
    Slot { column: usize, time: String },
    Point { x: f32, y: f32 },
}

#[derive(Debug, Serialize)]
struct CommitReport {
    trigger: String,
    start: Option<NaiveDateTime>,
    end: Option<NaiveDateTime>,
    segments: Vec<SelectionSegment>,
}

fn resolve(layout: &GridLayout, target: &Target) -> Result<Pos2> {
    match target {
        Target::Point { x, y } => Ok(Pos2::new(*x, *y)),
        Target::Slot { column, time } => {
            let index = layout
                .slot_for_label(time)
                .ok_or_else(|| anyhow!("no grid line labeled {time}"))?;
            if *column >= layout.column_count() {
                return Err(anyhow!("column {column} is outside the grid"));
            }
            Ok(layout.slot_rect(SlotRef::new(*column, index)).center())
        }
    }
}

fn report(layout: &GridLayout, commit: SelectionCommit) -> CommitReport {
    let range = layout.date_time_range(&commit.selection);
    CommitReport {
        trigger: format!("{:?}", commit.trigger),
        start: range.as_ref().map(|r| r.start),
        end: range.as_ref().map(|r| r.end),
        segments: layout.segments(&commit.selection),
    }
}

/// Run every step against a fresh calendar and collect the commits, settling
/// a click still inside its debounce window at the end.
fn replay(script: &Script, settings: &GridSettings) -> Result<Vec<CommitReport>> {
    let layout = GridLayout::consecutive(
        script.start_date,
        script.columns,
        Pos2::new(script.gutter, 0.0),
        script.column_width,
        settings,
    )?;
    log::info!(
        "Replaying {} step(s) over {} column(s)",
        script.steps.len(),
        layout.column_count()
    );

    let mut calendar = TimeGridCalendar::new(layout, settings, 0.0);
    let base = Instant::now();
    let mut elapsed = Duration::ZERO;
    let mut commits = Vec::new();

    for step in &script.steps {
        let now = base + elapsed;
        let layout = calendar.layout().clone();
        let commit = match step {
            Step::Down(target) => calendar.pointer_down(resolve(&layout, target)?, now),
            Step::Move(target) => {
                calendar.pointer_move(resolve(&layout, target)?);
                None
            }
            Step::Up(target) => calendar.pointer_up(resolve(&layout, target)?, now),
            Step::Click(target) => calendar.click(resolve(&layout, target)?, now),
            Step::Dblclick(target) => calendar.double_click(resolve(&layout, target)?, now),
            Step::Wait { ms } => {
                elapsed += Duration::from_millis(*ms);
                calendar.tick(base + elapsed)
            }
        };
        if let Some(commit) = commit {
            commits.push(report(&layout, commit));
        }
    }

    // settle a trailing click
    let settle = base + elapsed + Duration::from_millis(settings.click_debounce_ms);
    if let Some(commit) = calendar.tick(settle) {
        commits.push(report(calendar.layout(), commit));
    }
    Ok(commits)
}

fn main() -> Result<()> {
    env_logger::init();

    let path = std::env::args()
        .nth(1)
        .context("usage: time-grid-select <script.json>")?;
    let data = fs::read_to_string(&path).with_context(|| format!("failed to read {path}"))?;
    let script: Script =
        serde_json::from_str(&data).with_context(|| format!("failed to parse {path}"))?;

    let settings = SettingsService::from_default_location().get()?;
    let commits = replay(&script, &settings)?;

    println!("{}", serde_json::to_string_pretty(&commits)?);
    Ok(())
}
