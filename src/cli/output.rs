//! CLI output formatting.
//!
//! Commands produce a result type implementing [`CommandOutput`] and
//! let [`output`] pick the human or JSON rendering based on the
//! global `--json` flag.

/// A command result that can render itself for humans or machines.
pub trait CommandOutput {
    /// Human-readable rendering for the terminal.
    fn to_human(&self) -> String;

    /// Machine-readable JSON rendering.
    fn to_json(&self) -> serde_json::Value;
}

/// Print a command result on stdout in the requested format.
pub fn output<T: CommandOutput>(result: &T, json: bool) {
    if json {
        println!("{}", result.to_json());
    } else {
        println!("{}", result.to_human());
    }
}
