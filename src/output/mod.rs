pub mod formatter;

pub use formatter::{
    format_failed_runs, format_prs, format_stale_branches, rule, should_use_colors,
};
