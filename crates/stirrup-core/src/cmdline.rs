//! Exec template expansion and command line construction.
//!
//! A template is the tokenized `Exec` line of one desktop entry, fixed
//! at build time. Expansion is a single pass: each token is either a
//! literal, or one of the four substitution tokens filled from this
//! run's argument list. Quoting matches what the bundled shell needs,
//! not general shell escaping: a name is double-quoted iff it contains
//! a space, and names containing a double quote are refused outright.

use crate::config::LauncherManifest;
use crate::error::{Error, Result};

/// The bundled shell, relative to the bundle root (the process cwd once
/// the launcher has entered its own directory).
pub const SHELL_RELPATH: &str = r"usr\bin\bash.exe";

/// How the bundled shell refers to itself on its own command line.
const SHELL_ARGV0: &str = "/usr/bin/bash";

/// A fully built child-process start line.
///
/// `render()` is the single command line string handed to process
/// creation; `program` is the executable identity it belongs to. The
/// split exists because process creation wants both: the program to
/// load, and the raw argument tail the child will parse for itself.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CommandLine {
    program: String,
    argv0: String,
    tail: String,
}

impl CommandLine {
    pub fn program(&self) -> &str {
        &self.program
    }

    /// Everything after the first token, without its leading space.
    pub fn args_tail(&self) -> &str {
        self.tail.strip_prefix(' ').unwrap_or(&self.tail)
    }

    /// The complete command line, prefix first.
    pub fn render(&self) -> String {
        let mut line = self.argv0.clone();
        line.push_str(&self.tail);
        line
    }
}

/// Quote one filename argument for the bundled shell.
///
/// Double quotes inside a filename have no escape on the other side, so
/// they are rejected rather than mangled.
pub fn quote_filename(name: &str) -> Result<String> {
    if name.contains('"') {
        return Err(Error::UnquotableFilename(name.to_string()));
    }
    if name.contains(' ') {
        Ok(format!("\"{name}\""))
    } else {
        Ok(name.to_string())
    }
}

/// Expand the manifest's Exec template against this run's arguments.
pub fn expand(manifest: &LauncherManifest, args: &[String]) -> Result<CommandLine> {
    let mut tokens = manifest.exec_template.iter();

    let (program, argv0, prefix_tail) = if manifest.use_helper {
        (
            SHELL_RELPATH.to_string(),
            SHELL_ARGV0.to_string(),
            helper_prefix_tail(manifest),
        )
    } else {
        // The first template token re-specifies the target; the resolved
        // path stands in for it.
        tokens.next();
        (
            manifest.target_exe.clone(),
            manifest.target_exe.clone(),
            String::new(),
        )
    };

    let mut tail = prefix_tail;
    for token in tokens {
        let expanded = expand_token(token, args)?;
        if expanded.is_empty() {
            // A substitution with nothing to substitute vanishes
            // entirely, separating space included.
            continue;
        }
        tail.push(' ');
        tail.push_str(&expanded);
    }

    Ok(CommandLine {
        program,
        argv0,
        tail,
    })
}

/// The blocking post-install configuration run, always through the
/// bundled shell with a login environment.
pub fn postinst_invocation(manifest: &LauncherManifest) -> CommandLine {
    CommandLine {
        program: SHELL_RELPATH.to_string(),
        argv0: SHELL_ARGV0.to_string(),
        tail: format!(" --login {}", manifest.postinst),
    }
}

fn expand_token(token: &str, args: &[String]) -> Result<String> {
    match token {
        // Single-file forms: only ever the first argument.
        "%f" | "%u" => match args.first() {
            Some(arg) => quote_filename(arg),
            None => Ok(String::new()),
        },
        // Multi-file forms: all arguments, individually quoted, in order.
        "%F" | "%U" => {
            let mut joined = String::new();
            for arg in args {
                if !joined.is_empty() {
                    joined.push(' ');
                }
                joined.push_str(&quote_filename(arg)?);
            }
            Ok(joined)
        }
        literal => Ok(literal.to_string()),
    }
}

/// The sub-invocation the shell runs when delegating: the expanded
/// template tokens arrive as `"$@"`. The quiet form execs them
/// transparently; the terminal form reports start and exit status and
/// holds the console open for a keypress.
fn helper_prefix_tail(manifest: &LauncherManifest) -> String {
    if manifest.terminal {
        format!(
            concat!(
                " --login -c 'echo \"Starting {title}.\"; \"$@\"; status=$?; ",
                "echo \"{title} exited with status $status.\"; ",
                "read -r -s -n 1 -p \"Press any key to close.\"' --"
            ),
            title = manifest.title,
        )
    } else {
        " --login -c 'exec \"$@\"' --".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manifest(use_helper: bool, terminal: bool, template: &[&str]) -> LauncherManifest {
        LauncherManifest {
            app_id: "MSYS2.demo.editor.1.0".into(),
            title: "Demo Editor".into(),
            use_helper,
            terminal,
            target_exe: r"mingw64\bin\editor.exe".into(),
            exec_template: template.iter().map(|t| t.to_string()).collect(),
            postinst: "_scripts/postinst.sh".into(),
            state_file: "_location.txt".into(),
        }
    }

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|a| a.to_string()).collect()
    }

    #[test]
    fn test_quote_plain_name_unchanged() {
        assert_eq!(quote_filename("a.txt").unwrap(), "a.txt");
        assert_eq!(quote_filename("").unwrap(), "");
    }

    #[test]
    fn test_quote_spaced_name_wrapped_once() {
        assert_eq!(quote_filename("a b.txt").unwrap(), "\"a b.txt\"");
        assert_eq!(quote_filename("a b c").unwrap(), "\"a b c\"");
    }

    #[test]
    fn test_quote_rejects_double_quote() {
        assert!(matches!(
            quote_filename("a\"b.txt"),
            Err(Error::UnquotableFilename(_))
        ));
    }

    #[test]
    fn test_single_file_token_empty_args() {
        let m = manifest(false, false, &["editor", "%f"]);
        let line = expand(&m, &[]).unwrap();
        assert_eq!(line.render(), r"mingw64\bin\editor.exe");
    }

    #[test]
    fn test_single_file_token_takes_first_only() {
        let m = manifest(false, false, &["editor", "%f"]);
        let line = expand(&m, &args(&["a.txt", "b.txt"])).unwrap();
        assert_eq!(line.render(), r"mingw64\bin\editor.exe a.txt");
    }

    #[test]
    fn test_single_file_token_quotes_spaces() {
        let m = manifest(false, false, &["editor", "%u"]);
        let line = expand(&m, &args(&["a b.txt"])).unwrap();
        assert_eq!(line.render(), r#"mingw64\bin\editor.exe "a b.txt""#);
    }

    #[test]
    fn test_multi_file_token_joins_in_order() {
        let m = manifest(false, false, &["editor", "%F"]);
        let line = expand(&m, &args(&["a.txt", "b c.txt"])).unwrap();
        assert_eq!(line.render(), r#"mingw64\bin\editor.exe a.txt "b c.txt""#);
    }

    #[test]
    fn test_multi_file_token_vanishes_without_args() {
        let m = manifest(false, false, &["editor", "--flag", "%U"]);
        let line = expand(&m, &[]).unwrap();
        assert_eq!(line.render(), r"mingw64\bin\editor.exe --flag");
    }

    #[test]
    fn test_literals_kept_around_substitutions() {
        let m = manifest(false, false, &["editor", "--new-window", "%F", "--wait"]);
        let line = expand(&m, &args(&["x.txt"])).unwrap();
        assert_eq!(
            line.render(),
            r"mingw64\bin\editor.exe --new-window x.txt --wait"
        );
    }

    #[test]
    fn test_no_double_spaces_when_token_vanishes() {
        let m = manifest(false, false, &["editor", "%f", "--flag"]);
        let line = expand(&m, &[]).unwrap();
        assert_eq!(line.render(), r"mingw64\bin\editor.exe --flag");
    }

    #[test]
    fn test_expansion_error_propagates() {
        let m = manifest(false, false, &["editor", "%F"]);
        assert!(expand(&m, &args(&["ok.txt", "bad\".txt"])).is_err());
    }

    #[test]
    fn test_helper_quiet_prefix() {
        let m = manifest(true, false, &["editor", "%f"]);
        let line = expand(&m, &args(&["a.txt"])).unwrap();
        assert_eq!(line.program(), SHELL_RELPATH);
        assert_eq!(
            line.render(),
            "/usr/bin/bash --login -c 'exec \"$@\"' -- editor a.txt"
        );
    }

    #[test]
    fn test_helper_keeps_first_token() {
        // Delegated launches pass the command name through to the shell;
        // only direct launches replace it with the resolved path.
        let m = manifest(true, false, &["editor"]);
        let line = expand(&m, &[]).unwrap();
        assert!(line.render().ends_with(" -- editor"));
    }

    #[test]
    fn test_helper_terminal_prefix_reports_status() {
        let m = manifest(true, true, &["editor", "%f"]);
        let line = expand(&m, &[]).unwrap();
        let rendered = line.render();
        assert!(rendered.starts_with("/usr/bin/bash --login -c '"));
        assert!(rendered.contains("Starting Demo Editor."));
        assert!(rendered.contains("exited with status $status."));
        assert!(rendered.contains("read -r -s -n 1"));
        assert!(rendered.ends_with("' -- editor"));
    }

    #[test]
    fn test_args_tail_strips_argv0() {
        let m = manifest(false, false, &["editor", "%f"]);
        let line = expand(&m, &args(&["a.txt"])).unwrap();
        assert_eq!(line.args_tail(), "a.txt");
    }

    #[test]
    fn test_postinst_invocation_shape() {
        let m = manifest(false, false, &["editor"]);
        let line = postinst_invocation(&m);
        assert_eq!(line.program(), SHELL_RELPATH);
        assert_eq!(line.render(), "/usr/bin/bash --login _scripts/postinst.sh");
    }
}
