//! Launch type definitions

use std::time::Duration;

use crate::error::{AutomatorError, Result};

/// Arguments placed before the macro path: no GUI, log to the console, run a macro
pub const FIJI_HEADLESS_ARGS: [&str; 3] = ["--headless", "--console", "--run"];

/// How often a running child is polled for exit
pub const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Captured result of a finished subprocess
#[derive(Debug, Clone)]
pub struct ProcessOutput {
    /// Exit code; `None` if the process was ended by a signal
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
    pub elapsed: Duration,
}

impl ProcessOutput {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }

    /// Turn a failed exit into `NonZeroExit`
    pub fn into_success(self) -> Result<Self> {
        if self.success() {
            Ok(self)
        } else {
            Err(AutomatorError::NonZeroExit {
                code: self.code.unwrap_or(-1),
                stderr: self.stderr,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn output(code: Option<i32>) -> ProcessOutput {
        ProcessOutput {
            code,
            stdout: String::new(),
            stderr: "boom".to_string(),
            elapsed: Duration::ZERO,
        }
    }

    #[test]
    fn zero_exit_is_success() {
        assert!(output(Some(0)).into_success().is_ok());
    }

    #[test]
    fn non_zero_exit_carries_code_and_stderr() {
        match output(Some(3)).into_success() {
            Err(AutomatorError::NonZeroExit { code, stderr }) => {
                assert_eq!(code, 3);
                assert_eq!(stderr, "boom");
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn signal_exit_maps_to_minus_one() {
        match output(None).into_success() {
            Err(AutomatorError::NonZeroExit { code, .. }) => assert_eq!(code, -1),
            other => panic!("unexpected: {:?}", other),
        }
    }
}
