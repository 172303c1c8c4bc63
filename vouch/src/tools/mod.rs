//! Built-in demo tools.
//!
//! The standard set an approval-gated assistant is wired with: a planning
//! tool, a couple of read-only lookups, arithmetic, and a disk write. The
//! read-only ones are the natural auto-approve candidates; `write_todos`
//! and `write_file` are the ones worth gating.

pub mod calc;
pub mod fs;
pub mod search;
pub mod todo;
pub mod weather;

pub use calc::CalculatorTool;
pub use fs::WriteFileTool;
pub use search::SearchTool;
pub use todo::WriteTodosTool;
pub use weather::WeatherTool;
