use std::sync::Arc;

use black_anvil::{LocalBridge, ScriptConsole, ScriptHost, ScriptLimits};

#[tokio::test]
async fn oversize_script_is_reported_through_console() {
    let host = ScriptHost::new(ScriptLimits {
        max_script_bytes: 16,
        timeout_ms: 5_000,
    });
    let console = ScriptConsole::new(Arc::new(LocalBridge::new(host)));
    console.set_script("1 + 1 + 1 + 1 + 1 + 1");

    let outcome = console.run_clicked().await;

    assert!(outcome.failed);
    assert!(
        console.output().starts_with("Error: E-ANVIL-0601"),
        "unexpected output: {}",
        console.output()
    );
}

#[tokio::test]
async fn load_statements_are_rejected() {
    let console = ScriptConsole::new(Arc::new(LocalBridge::default()));
    console.set_script("load('//lib.star', 'helper')\nhelper()");
    let outcome = console.run_clicked().await;
    assert!(outcome.failed);
    assert!(console.output().starts_with("Error: E-ANVIL-0603"));
}
