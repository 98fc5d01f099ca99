//! Scripted shell sessions

mod support;

use calstats_lib::shell;
use support::{context_with, ScriptedChannel};

async fn run_script(script: &str) -> String {
    let channel = ScriptedChannel::reachable();
    let mut ctx = context_with(channel);
    let subscription = ctx.mount().await;

    let mut out = Vec::new();
    shell::run(&mut ctx, subscription, script.as_bytes(), &mut out).await.unwrap();
    String::from_utf8(out).unwrap()
}

#[tokio::test]
async fn help_and_quit() {
    let output = run_script("help\nquit\nshow\n").await;
    assert!(output.contains("Commands:"));
    assert!(output.contains("toggle last-5-years"));
    assert_eq!(output.matches("Calendar Statistics").count(), 1);
}

#[tokio::test]
async fn errors_are_reported_and_loop_continues() {
    let output = run_script("upload\nfly\nfile notes.txt\n\nshow\n").await;
    assert!(output.contains("Please select a file first."));
    assert!(output.contains("Unknown command 'fly'"));
    assert!(output.contains("notes.txt is not a .ics file"));
    assert!(output.contains("Channel: connected"));
}

#[tokio::test]
async fn navigation_before_data_is_harmless() {
    let output = run_script("<\n>>\nclose\nquit\n").await;
    assert!(!output.contains("Overseas Trips Timeline"));
}
