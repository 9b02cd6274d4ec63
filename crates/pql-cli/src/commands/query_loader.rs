use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

/// Where a command reads its input from: inline text, a file, or stdin (`-`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuerySource {
    pub path: Option<PathBuf>,
    pub text: Option<String>,
}

impl QuerySource {
    /// Inline text wins over a path.
    pub fn load(&self) -> Result<String, String> {
        match (&self.text, &self.path) {
            (Some(text), _) => Ok(text.clone()),
            (None, Some(path)) if path.as_os_str() == "-" => {
                let mut buf = String::new();
                io::stdin()
                    .read_to_string(&mut buf)
                    .map_err(|e| format!("failed to read stdin: {e}"))?;
                Ok(buf)
            }
            (None, Some(path)) => {
                fs::read_to_string(path).map_err(|e| format!("failed to read '{}': {e}", path.display()))
            }
            (None, None) => Err("input is required: pass a file, `-`, or -q/--query".to_owned()),
        }
    }

    /// Loads and trims, exiting on failure or empty input.
    pub fn load_or_exit(&self) -> String {
        let loaded = self.load().unwrap_or_else(|msg| {
            eprintln!("error: {msg}");
            std::process::exit(1);
        });

        let trimmed = loaded.trim();
        if trimmed.is_empty() {
            eprintln!("error: input is empty");
            std::process::exit(1);
        }
        trimmed.to_owned()
    }
}
