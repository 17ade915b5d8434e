// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use gk_core::Action;

fn spec(line: &str) -> CommandSpec {
    match Action::command(line) {
        Action::Command(spec) => spec,
        _ => unreachable!(),
    }
}

#[tokio::test]
async fn fake_command_succeeds_by_default() {
    let adapter = FakeCommandAdapter::new();
    let out = adapter.run(&spec("npm run lint")).await.unwrap();
    assert!(out.success());
    assert_eq!(adapter.lines(), vec!["npm run lint"]);
}

#[tokio::test]
async fn fake_command_scripted_results() {
    let adapter = FakeCommandAdapter::new();
    adapter
        .fail("migrate apply", 2, "lock held")
        .succeed_with("migrate status", "0 pending")
        .unlaunchable("scripts/gone", "No such file");

    let failed = adapter.run(&spec("migrate apply")).await.unwrap();
    assert_eq!(failed.code, Some(2));
    assert_eq!(failed.stderr, "lock held");

    let status = adapter.run(&spec("migrate status")).await.unwrap();
    assert_eq!(status.stdout, "0 pending");

    let gone = adapter.run(&spec("scripts/gone")).await;
    assert!(matches!(gone, Err(CommandError::Launch { .. })));
}

#[tokio::test]
async fn fake_command_counts_calls() {
    let adapter = FakeCommandAdapter::new();
    adapter.run(&spec("a")).await.unwrap();
    adapter.run(&spec("b")).await.unwrap();
    adapter.run(&spec("a")).await.unwrap();
    assert_eq!(adapter.call_count("a"), 2);
    assert_eq!(adapter.call_count("c"), 0);
}

#[tokio::test(start_paused = true)]
async fn fake_command_delay_uses_tokio_time() {
    let adapter = FakeCommandAdapter::new();
    adapter.delay("slow", std::time::Duration::from_secs(60));
    let start = tokio::time::Instant::now();
    adapter.run(&spec("slow")).await.unwrap();
    assert!(start.elapsed() >= std::time::Duration::from_secs(60));
}
