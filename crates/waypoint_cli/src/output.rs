use owo_colors::OwoColorize;
use waypoint_core::StatisticRecord;

/// Standard output formatting for the CLI
pub struct Output;

impl Output {
    pub fn new() -> Self {
        Self
    }

    /// Print a system/status message (indented)
    pub fn status(&self, message: &str) {
        println!("  {}", message.dimmed());
    }

    /// Print an info message (indented)
    pub fn info(&self, label: &str, value: &str) {
        println!("  {} {}", label.bright_blue(), value);
    }

    /// Print a success message (indented)
    pub fn success(&self, message: &str) {
        println!("  {} {}", "✓".bright_green(), message);
    }

    /// Print a warning message (indented)
    pub fn warning(&self, message: &str) {
        println!("  {} {}", "⚠".yellow(), message);
    }

    /// Print a section header
    pub fn section(&self, title: &str) {
        println!();
        println!("{}", title.bright_cyan().bold());
        println!("{}", "─".repeat(40).dimmed());
    }

    /// Print a list item (already indented)
    pub fn list_item(&self, item: &str) {
        println!("    • {}", item);
    }

    /// Print a statistic card, optionally with its "3 / 10" position
    pub fn statistic(&self, position: Option<(usize, usize)>, stat: &StatisticRecord) {
        println!();
        if let Some((index, len)) = position {
            print!("  {} ", format!("{}/{}", index, len).dimmed());
        } else {
            print!("  ");
        }
        println!("{}  {}", stat.figure.bright_yellow().bold(), stat.title.bold());

        if !stat.description.is_empty() {
            println!("      {}", stat.description);
        }
        if !stat.source.is_empty() {
            println!("      {} {}", "Source:".dimmed(), stat.source.dimmed());
        }
    }

    /// Print labelled citation rows
    pub fn details(&self, stat: &StatisticRecord) {
        for (label, value) in stat.detail_lines() {
            println!("  {:<12} {}", format!("{}:", label).bright_blue(), value);
        }
    }
}
