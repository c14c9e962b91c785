use std::sync::Arc;

use black_anvil::{
    CommandBridge, LocalBridge, ScriptConsole, ScriptHost, ERROR_PREFIX, RUNNING_TEXT,
};
use serde_json::json;

fn local_console() -> Arc<ScriptConsole> {
    Arc::new(ScriptConsole::new(Arc::new(LocalBridge::new(
        ScriptHost::default(),
    ))))
}

#[tokio::test]
async fn one_plus_one_displays_two() {
    let console = local_console();
    console.set_script("1+1");

    let outcome = console.run_clicked().await;

    assert_eq!(console.output(), "2");
    assert!(!outcome.failed);
}

#[tokio::test]
async fn multi_statement_script_displays_final_expression() {
    let console = local_console();
    console.set_script(
        r#"
targets = {"release": "--release", "debug": ""}
sorted(targets.keys())
"#,
    );
    console.run_clicked().await;
    assert_eq!(console.output(), r#"["debug", "release"]"#);
}

#[tokio::test]
async fn broken_script_displays_error_prefix() {
    let console = local_console();
    console.set_script("def broken(:\n  pass");

    let outcome = console.run_clicked().await;

    let output = console.output();
    assert!(output.starts_with(ERROR_PREFIX), "unexpected output: {output}");
    assert!(outcome.failed);
}

#[tokio::test]
async fn running_text_is_visible_until_spawned_run_settles() {
    let console = local_console();
    console.set_script("'done'");

    let handle = console.spawn_run();
    assert_eq!(console.output(), RUNNING_TEXT);

    let outcome = handle.await.expect("join console task");
    assert_eq!(outcome.text, "done");
    assert_eq!(console.output(), "done");
}

#[tokio::test]
async fn repeated_clicks_rerun_the_current_buffer() {
    let console = local_console();
    console.set_script("1+1");
    console.run_clicked().await;
    console.set_script("2*21");
    console.run_clicked().await;
    assert_eq!(console.output(), "42");
}

#[tokio::test]
async fn bridge_contract_uses_script_key() {
    let bridge = LocalBridge::default();
    let value = bridge
        .invoke("run_starlark", json!({ "script": "len('anvil')" }))
        .await
        .expect("resolve");
    assert_eq!(value, json!("5"));
}
