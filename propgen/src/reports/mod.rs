//! Report data structures for commands.
//!
//! Operations build reports, then commands render them to an `Output`.

mod check;
mod generate;
mod output;

pub use check::{CheckReport, ClassInfo, SectionInfo};
pub use generate::GenerateReport;
pub use output::{Report, TerminalOutput};
