//! Console flows driven through `LocalBridge` and the real Starlark host.

mod click_flow;
mod limits;
