//! Text screen for the interactive shell

use calstats_core::{StatCard, UploadPhase};
use calstats_domain::constants::TIMELINE_TITLE;

use crate::AppContext;

/// Full screen: status, statistics, timeline and detail overlay.
pub fn screen(ctx: &AppContext) -> String {
    let mut out = String::new();
    push_line(&mut out, "Calendar Statistics");
    let channel = if ctx.is_connected() { "connected" } else { "disconnected" };
    push_line(&mut out, format!("Channel: {channel}"));
    let file = ctx
        .upload()
        .selected_file()
        .map_or_else(|| "none".to_string(), |p| p.display().to_string());
    push_line(&mut out, format!("File: {file}"));
    match ctx.upload().phase() {
        UploadPhase::Loading => push_line(&mut out, "Analyzing..."),
        UploadPhase::Failed(message) => push_line(&mut out, format!("Error: {message}")),
        UploadPhase::Idle | UploadPhase::Loaded(_) => {}
    }

    if ctx.showing_result() {
        out.push('\n');
        out.push_str(&stats(ctx));
        out.push('\n');
        out.push_str(&timeline(ctx));
    }
    out
}

fn push_line(out: &mut String, line: impl AsRef<str>) {
    out.push_str(line.as_ref());
    out.push('\n');
}

fn stats(ctx: &AppContext) -> String {
    let panel = ctx.stats();
    let mut out = String::new();
    card(&mut out, &panel.last_year);
    card(&mut out, &panel.last_5_years);

    if let Some(eligibility) = &panel.eligibility {
        push_line(&mut out, "Citizenship Eligibility");
        for line in eligibility.lines() {
            push_line(&mut out, format!("  {line}"));
        }
    }
    if let Some(working_time) = &panel.working_time {
        push_line(&mut out, "Working Time");
        for line in working_time.lines() {
            push_line(&mut out, format!("  {line}"));
        }
    }
    out
}

fn card(out: &mut String, card: &StatCard) {
    push_line(out, format!("{} {}", card.kind.title(), card.indicator()));
    push_line(out, format!("  {}", card.headline()));
    for line in card.lines() {
        push_line(out, format!("    {line}"));
    }
}

fn timeline(ctx: &AppContext) -> String {
    let view = ctx.timeline();
    let mut out = String::new();

    if let Some(placeholder) = view.placeholder() {
        push_line(&mut out, TIMELINE_TITLE);
        push_line(&mut out, format!("  {placeholder}"));
        return out;
    }
    out.push_str(&view.widget().render());

    if let Some(detail) = view.detail() {
        push_line(&mut out, format!("+-- [{}] {}", detail.id, detail.title));
        push_line(&mut out, format!("|   Start: {}", detail.start));
        if let Some(end) = &detail.end {
            push_line(&mut out, format!("|   End:   {end}"));
        }
        push_line(&mut out, "+-- (close to dismiss)");
    }
    out
}
