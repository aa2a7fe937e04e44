//! GitHub Actions workflow commands
//!
//! Lines printed to stdout in the `::command::message` form are picked up by
//! the Actions runner and shown as annotations on the job.

/// Escapes a message for use in a workflow command
fn escape(message: &str) -> String {
    message
        .replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

fn command(name: &str, message: &str) -> String {
    format!("::{}::{}", name, escape(message))
}

/// Marks the job as failed with `message`
pub fn error(message: &str) {
    println!("{}", command("error", message));
}

pub fn warning(message: &str) {
    println!("{}", command("warning", message));
}

pub fn notice(message: &str) {
    println!("{}", command("notice", message));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_escaping() {
        assert_eq!(
            command("error", "50% failing\r\non main"),
            "::error::50%25 failing%0D%0Aon main"
        );
        assert_eq!(command("notice", "plain"), "::notice::plain");
    }
}
