//! Failure reporting helpers.
//!
//! Nothing in here terminates the process: errors are handed back to the caller, and only
//! the binary decides to print [`render`]ed failures and exit.

use std::fmt::Display;

use anyhow::Context;

/// Passes `Ok` values through and attaches `msg` to an error.
pub fn return_on_error<T, E, M>(msg: M, result: Result<T, E>) -> anyhow::Result<T>
where
    E: std::error::Error + Send + Sync + 'static,
    M: Display + Send + Sync + 'static,
{
    result.context(msg)
}

/// Formats an error the way the command line reports fatal failures:
///
/// ```text
///
/// ❌  Error Getting Image
///    connection refused
/// ```
pub fn render(error: &anyhow::Error) -> String {
    let causes: Vec<String> = error.chain().skip(1).map(|cause| cause.to_string()).collect();
    if causes.is_empty() {
        format!("\n❌  {error}")
    } else {
        format!("\n❌  {error}\n   {}", causes.join(": "))
    }
}

#[cfg(test)]
mod tests {
    use std::io;

    use super::*;

    #[test]
    fn ok_passes_through() {
        let result: Result<u8, io::Error> = Ok(7);
        assert_eq!(return_on_error("unused", result).unwrap(), 7);
    }

    #[test]
    fn error_gets_message() {
        let result: Result<u8, io::Error> = Err(io::Error::new(io::ErrorKind::NotFound, "gone"));
        let err = return_on_error("Error Opening File", result).unwrap_err();
        assert_eq!(err.to_string(), "Error Opening File");
        assert_eq!(render(&err), "\n❌  Error Opening File\n   gone");
    }

    #[test]
    fn renders_bare_error() {
        let err = anyhow::anyhow!("nothing to do");
        assert_eq!(render(&err), "\n❌  nothing to do");
    }
}
