// Pure command building functions (no I/O)

use std::path::Path;
use std::process::Command;

use crate::launch::types::FIJI_HEADLESS_ARGS;

/// `<fiji> --headless --console --run <macro>`
pub fn build_fiji_command(fiji: &Path, macro_path: &Path) -> Command {
    let mut cmd = Command::new(fiji);
    cmd.args(FIJI_HEADLESS_ARGS);
    cmd.arg(macro_path);
    if let Some(dir) = fiji.parent().filter(|d| !d.as_os_str().is_empty()) {
        cmd.current_dir(dir);
    }
    cmd
}

/// Format a command for debug logging (pure string building).
pub fn format_command(cmd: &Command) -> String {
    let mut output = format!("\"{}\"", cmd.get_program().to_string_lossy());
    for arg in cmd.get_args() {
        let fmtarg = arg.to_string_lossy();
        if fmtarg.starts_with("--") {
            output.push_str(&format!(" {}", fmtarg));
        } else {
            output.push_str(&format!(" \"{}\"", fmtarg));
        }
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── build_fiji_command ──

    #[test]
    fn headless_flags_precede_macro_path() {
        let cmd = build_fiji_command(
            Path::new("/opt/Fiji.app/ImageJ-linux64"),
            Path::new("/out/thunderstorm_macro.ijm"),
        );
        assert_eq!(cmd.get_program(), "/opt/Fiji.app/ImageJ-linux64");
        let args: Vec<String> = cmd
            .get_args()
            .map(|a| a.to_string_lossy().into_owned())
            .collect();
        assert_eq!(
            args,
            vec!["--headless", "--console", "--run", "/out/thunderstorm_macro.ijm"]
        );
    }

    #[test]
    fn runs_from_fiji_directory() {
        let cmd = build_fiji_command(Path::new("/opt/Fiji.app/ImageJ-linux64"), Path::new("m.ijm"));
        assert_eq!(cmd.get_current_dir(), Some(Path::new("/opt/Fiji.app")));
    }

    #[test]
    fn bare_program_name_keeps_cwd() {
        let cmd = build_fiji_command(Path::new("ImageJ-linux64"), Path::new("m.ijm"));
        assert_eq!(cmd.get_current_dir(), None);
    }

    // ── format_command ──

    #[test]
    fn format_quotes_program_and_paths() {
        let cmd = build_fiji_command(Path::new("/opt/fiji"), Path::new("/tmp/my macro.ijm"));
        assert_eq!(
            format_command(&cmd),
            "\"/opt/fiji\" --headless --console --run \"/tmp/my macro.ijm\""
        );
    }
}
