//! Request/response framing
//!
//! One JSON request arrives on stdin, read to end-of-stream. Exactly one
//! JSON document leaves on stdout, and only on success; everything else
//! the resource says goes to stderr.

use serde::Serialize;
use serde::de::DeserializeOwned;
use std::io::{Read, Write};

use crate::error::{CliError, Result};

/// Read and parse the invocation's request document from stdin
pub fn read_request<T: DeserializeOwned>() -> Result<T> {
    let mut buffer = String::new();
    std::io::stdin()
        .read_to_string(&mut buffer)
        .map_err(|e| CliError::input(format!("failed to read request from stdin: {}", e)))?;

    serde_json::from_str(&buffer)
        .map_err(|e| CliError::input(format!("malformed request: {}", e)))
}

/// Write the success payload to stdout
pub fn emit_response<T: Serialize>(response: &T) -> Result<()> {
    let mut stdout = std::io::stdout().lock();
    serde_json::to_writer(&mut stdout, response).map_err(|e| CliError::Other {
        message: format!("failed to serialize response: {}", e),
    })?;
    writeln!(stdout)?;
    Ok(())
}
