//! List command implementation.
//!
//! Renders the filtered view of the todo list plus completion counts.

use todo_store::{StatusFilter, ViewFilter};

use super::config::Config;
use super::{open_seeded_app, CommandContext, Result};
use crate::output::{format_todos_json, format_todos_table};

/// Options for the list command.
#[derive(Debug, Default)]
pub struct ListOptions {
    /// Case-insensitive text search.
    pub search: Option<String>,
    /// Only featured todos.
    pub featured: bool,
    /// Completion restriction.
    pub status: StatusFilter,
}

impl ListOptions {
    /// The view filter these options describe.
    pub fn view_filter(&self) -> ViewFilter {
        ViewFilter::new()
            .with_search(self.search.clone().unwrap_or_default())
            .with_featured_only(self.featured)
            .with_status(self.status)
    }
}

/// Executes the list command.
///
/// # Errors
///
/// Returns an error if the state file cannot be read.
pub async fn execute(ctx: &CommandContext, opts: &ListOptions, config: &Config) -> Result<()> {
    let mut app = open_seeded_app(ctx, config).await?;
    app.set_filter(opts.view_filter());

    let visible = app.visible();
    if ctx.json_output {
        let output = format_todos_json(&visible, app.filter(), app.stats())?;
        println!("{output}");
    } else if !ctx.quiet {
        let output = format_todos_table(
            &visible,
            app.stats(),
            app.filter().is_active(),
            ctx.use_colors,
        );
        print!("{output}");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options_make_inactive_filter() {
        let filter = ListOptions::default().view_filter();
        assert!(!filter.is_active());
    }

    #[test]
    fn test_options_map_to_filter() {
        let opts = ListOptions {
            search: Some("milk".to_string()),
            featured: true,
            status: StatusFilter::Completed,
        };
        let filter = opts.view_filter();

        assert_eq!(filter.search, "milk");
        assert!(filter.featured_only);
        assert_eq!(filter.status, StatusFilter::Completed);
        assert!(filter.is_active());
    }
}
