//! Terminal output helpers.

use console::style;

/// Print a success message
pub fn success(msg: &str) {
    println!("{} {}", style("✓").green().bold(), msg);
}

/// Print an error message
pub fn error(msg: &str) {
    eprintln!("{} {}", style("✗").red().bold(), style(msg).red());
}

/// Print a warning message
pub fn warning(msg: &str) {
    eprintln!("{} {}", style("⚠").yellow().bold(), style(msg).yellow());
}

/// Print an info message
pub fn info(msg: &str) {
    println!("{}", style(msg).blue());
}

/// Print a header
pub fn header(msg: &str) {
    println!("\n{}", style(msg).bold().blue());
}

/// Print an indented plain line
pub fn line(msg: &str) {
    println!("  {}", msg);
}
