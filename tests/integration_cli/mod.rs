//! Runs the compiled CLI as a child process.

mod run_script;
