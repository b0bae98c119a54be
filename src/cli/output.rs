// Console output helpers
//
// Shared banner and status formatting so tools and the launcher speak with
// one voice.

pub const RULE_WIDTH: usize = 70;

/// Heavy separator line.
pub fn rule() {
    println!("{}", "=".repeat(RULE_WIDTH));
}

/// Light separator line.
pub fn thin_rule() {
    println!("{}", "-".repeat(RULE_WIDTH));
}

/// Centered application header between heavy rules.
pub fn header(title: &str) {
    rule();
    println!("{:^width$}", title, width = RULE_WIDTH);
    rule();
    println!();
}

pub fn success(message: &str) {
    println!("\n\x1b[1;32m✅ {}\x1b[0m", message);
}

pub fn error(message: &str) {
    println!("\n\x1b[1;31m❌ Error: {}\x1b[0m", message);
}

pub fn warning(message: &str) {
    println!("\n\x1b[1;33m⚠️  Warning: {}\x1b[0m", message);
}

pub fn info(message: &str) {
    println!("\nℹ️  {}", message);
}

/// Result banner keyed on the exit code.
pub fn result_banner(tool_name: &str, code: i32) {
    println!();
    rule();
    if code == 0 {
        println!("\x1b[1;32m✅ '{}' completed successfully!\x1b[0m", tool_name);
    } else {
        println!(
            "\x1b[1;31m❌ '{}' failed with exit code {}\x1b[0m",
            tool_name, code
        );
    }
    rule();
}
