use std::env;
use std::io::{self, BufRead, Write};

use crate::shared::errors::{AppError, AppResult};

/// Read one required value: the environment variable wins when set and
/// non-empty, otherwise the user is prompted on stdin until they type
/// something.
pub fn read_input(env_key: &str, guidance: &[&str], prompt: &str) -> AppResult<String> {
    if let Ok(value) = env::var(env_key) {
        let trimmed = value.trim();
        if !trimmed.is_empty() {
            log::debug!("Using {} from the environment", env_key);
            return Ok(trimmed.to_string());
        }
    }

    for line in guidance {
        println!("{}", line);
    }

    let stdin = io::stdin();
    loop {
        println!("{}", prompt);
        io::stdout().flush()?;

        let mut line = String::new();
        let bytes_read = stdin.lock().read_line(&mut line)?;
        if bytes_read == 0 {
            return Err(AppError::InvalidInput(format!(
                "Input stream closed while waiting for {}",
                env_key
            )));
        }

        let trimmed = line.trim();
        if !trimmed.is_empty() {
            return Ok(trimmed.to_string());
        }
        println!("A value is required.");
    }
}
