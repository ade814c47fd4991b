use std::ffi::OsString;

use clap::{ArgAction, Parser};

const HELP_FLAGS: [&str; 3] = ["-h", "-H", "--help"];
const CASE_SENSITIVE_FLAGS: [&str; 3] = ["-c", "-C", "--case-sensitive"];

pub(crate) const HELP_TEXT: &str = r#"The ask program prompts the user and accepts a single-key response.

Usage:  ask [options] "prompt string" responses

Options:
The options can appear anywhere on the command line.
-c, -C, --case-sensitive   Case-sensitive response matching.
-h, -H, --help             Show this help screen.

The "prompt string" and responses are positional parameters.
They must appear in order.
"prompt string"  The prompt string the user sees
responses        The characters the user is allowed to press to
                 answer the prompt (Not a comma-separated list.)

Return value (system exit code):
   0   The user entered a response that was not in the list.
 1-125 The index of the choice in the responses.
       (The first response is 1, the next is 2, and so on.)
  126  The user pressed Enter without making a choice.
  127  The user pressed Escape.

Usage Notes:
* The user must press Enter after pressing a key.
* The response is not case-sensitive by default.  Use -c if necessary.
* If the user presses more than one key, the first key will be used.
* The escape sequences \\, \a, \n, \r, and \t are allowed in the
  prompt string.
* Unknown options are ignored.

Environment:
ASK_CONFIG     Path to a TOML file with default settings.
ASK_VERBOSE    Print diagnostics to stderr when set (0 disables).
ASK_LOG_FILE   Append a JSON record of each answer to this file.

Example:
  ask "** Answer [Y]es, [N]o, or [M]aybe: " YNM

The example returns:
 Exit code 1 if the user pressed y or Y.
 Exit code 2 if the user pressed n or N.
 Exit code 3 if the user pressed m or M.
 Exit code 0 if the user pressed a key that was not y, Y, n, N, m, or M.
 Exit code 126 if the user pressed Enter without pressing a key.
 Exit code 127 if the user pressed Escape.
"#;

#[derive(Debug, Default, Parser)]
#[command(
    name = "ask",
    version,
    about = "Ask a question and get a single-key response",
    disable_help_flag = true,
    disable_version_flag = true,
    args_override_self = true
)]
pub struct Cli {
    /// Prompt shown to the user.
    pub prompt: Option<String>,

    /// Characters the user may press, in index order.
    pub responses: Option<String>,

    /// Case-sensitive response matching.
    #[arg(short = 'c', short_alias = 'C', long, action = ArgAction::SetTrue)]
    pub case_sensitive: bool,

    /// Show the help screen.
    #[arg(short = 'h', short_alias = 'H', long, action = ArgAction::SetTrue)]
    pub help: bool,
}

impl Cli {
    /// Parses `args` (program name first) without ever rejecting the command line.
    ///
    /// Dash-leading tokens other than the known flags are dropped, as are
    /// positionals past the second. Anything clap still refuses (arguments
    /// that are not valid UTF-8) turns into a help request.
    pub fn parse_lenient<I, T>(args: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        let args = normalize_args(args);
        Self::try_parse_from(args).unwrap_or_else(|_| Self {
            help: true,
            ..Self::default()
        })
    }

    pub(crate) fn positionals(&self) -> Option<(&str, &str)> {
        Some((self.prompt.as_deref()?, self.responses.as_deref()?))
    }
}

fn normalize_args<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let mut args = args.into_iter().map(Into::into);
    let mut kept = Vec::new();
    kept.extend(args.next());

    let mut positionals = 0;
    for arg in args {
        let (is_flag, is_known) = {
            let text = arg.to_string_lossy();
            let known = HELP_FLAGS.contains(&text.as_ref())
                || CASE_SENSITIVE_FLAGS.contains(&text.as_ref());
            (text.starts_with('-'), known)
        };
        if is_flag {
            if is_known {
                kept.push(arg);
            }
            continue;
        }
        if positionals < 2 {
            positionals += 1;
            kept.push(arg);
        }
    }

    kept
}
