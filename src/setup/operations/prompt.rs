use std::io::{self, BufRead, Write};

/// Ask a yes/no question on stdin; anything but `y`/`yes` (or EOF) is no
pub fn confirm(question: &str) -> bool {
    print!("{} (y/N): ", question);
    let _ = io::stdout().flush();
    read_answer(io::stdin().lock())
}

fn read_answer<R: BufRead>(mut input: R) -> bool {
    let mut line = String::new();
    match input.read_line(&mut line) {
        Ok(0) | Err(_) => false,
        Ok(_) => matches!(line.trim().to_ascii_lowercase().as_str(), "y" | "yes"),
    }
}
