use colored::Colorize;
use std::fmt;

/// Prints an informational message.
pub fn info(message: impl fmt::Display) {
    println!("{} {}", "[i]".cyan(), message);
}

/// Prints a success message.
pub fn success(message: impl fmt::Display) {
    println!("{} {}", "[+]".green(), message);
}

/// Prints a warning message.
pub fn warning(message: impl fmt::Display) {
    println!("{} {}", "[!]".yellow(), message);
}

/// Prints an error message to stderr.
pub fn error(message: impl fmt::Display) {
    eprintln!("{} {}", "[x]".red(), message);
}

/// Prints a section heading.
pub fn section(title: impl fmt::Display) {
    let banner = format!("==== {} ====", title);
    println!("\n{}", banner.bold());
}

/// Prints a plain line of output.
pub fn line(message: impl fmt::Display) {
    println!("{message}");
}
