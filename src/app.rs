use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};

use crate::cli::{Cli, HELP_TEXT};
use crate::config::{EnvOverrides, Settings};
use crate::keys::LineKeySource;
use crate::logging::SessionLog;
use crate::model::{Answer, Resolution, SessionRequest};
use crate::resolver::ask;

const NO_KEY_PRESSED_CODE: i32 = 126;
const CANCELLED_CODE: i32 = 127;

pub(crate) fn run(cli: Cli) -> Result<i32> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    run_with_io(cli, &EnvOverrides::from_process(), stdin.lock(), stdout.lock())
}

pub(crate) fn run_with_io<R: BufRead, W: Write>(
    cli: Cli,
    env: &EnvOverrides,
    input: R,
    mut output: W,
) -> Result<i32> {
    if cli.help {
        print_help(&mut output)?;
        return Ok(0);
    }

    let Some((prompt, responses)) = cli.positionals() else {
        let missing = if cli.prompt.is_none() {
            "No prompt string specified on the command line."
        } else {
            "No responses specified on the command line."
        };
        writeln!(output, "\n{missing}").context("failed to write usage")?;
        print_help(&mut output)?;
        return Ok(0);
    };

    let settings = Settings::resolve(cli.case_sensitive, env);
    let request = SessionRequest::new(prompt, responses, settings.case_mode);
    if settings.verbose && request.responses.len() > request.responses.candidates().len() {
        eprintln!(
            "warn: only the first {} of {} responses can be selected",
            request.responses.candidates().len(),
            request.responses.len()
        );
    }

    let mut keys = LineKeySource::new(input);
    let answer = match ask(&request, &mut keys, &mut output) {
        Ok(answer) => answer,
        Err(err) => {
            if settings.verbose {
                eprintln!("warn: {err:#}");
            }
            Answer::unanswered()
        }
    };
    let code = exit_code(answer.resolution);

    if settings.verbose {
        eprintln!(
            "debug: key={:?} resolution={:?} exit_code={code}",
            answer.key, answer.resolution
        );
    }

    if let Some(log_file) = &settings.log_file
        && let Err(err) = SessionLog::new(log_file).record(&request, &answer, code)
    {
        eprintln!("warn: {err:#}");
    }

    Ok(code)
}

pub(crate) fn exit_code(resolution: Resolution) -> i32 {
    match resolution {
        Resolution::Matched(index) => i32::try_from(index).unwrap_or(0),
        Resolution::NoMatch => 0,
        Resolution::NoKeyPressed => NO_KEY_PRESSED_CODE,
        Resolution::Cancelled => CANCELLED_CODE,
    }
}

fn print_help<W: Write>(output: &mut W) -> Result<()> {
    writeln!(output, "\nask - version {}\n", env!("CARGO_PKG_VERSION"))
        .and_then(|()| writeln!(output, "{HELP_TEXT}"))
        .and_then(|()| output.flush())
        .context("failed to write help")
}
