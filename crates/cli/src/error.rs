use colored::Colorize;

/// Format an error for CLI display with contextual help messages.
pub fn display_error(err: &anyhow::Error) {
    let msg = format!("{err}");

    if msg.contains("No such file or directory") {
        eprintln!("  {} File not found", "ERROR".red().bold());
        eprintln!("        {msg}");
    } else if msg.contains("unknown game id") {
        eprintln!("  {} {msg}", "ERROR".red().bold());
        eprintln!(
            "        List available games with: {}",
            "brainprint catalog list".dimmed()
        );
    } else {
        eprintln!("  {} {}", "ERROR".red().bold(), msg);
        for cause in err.chain().skip(1) {
            eprintln!("        {} {cause}", "caused by:".dimmed());
        }
    }
}
