mod app;
mod cli;
pub(crate) mod config;
pub(crate) mod keys;
pub(crate) mod logging;
pub(crate) mod model;
pub(crate) mod prompt;
pub(crate) mod resolver;

use std::io::{BufRead, Write};

pub use crate::cli::Cli;
pub use crate::config::{CONFIG_ENV, EnvOverrides, LOG_FILE_ENV, VERBOSE_ENV};
pub use crate::keys::{ESCAPE, Key, KeySource, LINE_DISCARD_LIMIT, LineKeySource, SPECIAL_KEY_OFFSET};
pub use crate::model::{Answer, CaseMode, MAX_RESPONSES, Resolution, ResponseSet, SessionRequest};
pub use crate::prompt::{expand_escapes, write_prompt};
pub use crate::resolver::{ask, classify, find_response, resolve};

pub fn run(cli: Cli) -> anyhow::Result<i32> {
    app::run(cli)
}

/// Like [`run`], with the environment, key input and prompt output supplied by the caller.
pub fn run_with_io<R: BufRead, W: Write>(
    cli: Cli,
    env: &EnvOverrides,
    input: R,
    output: W,
) -> anyhow::Result<i32> {
    app::run_with_io(cli, env, input, output)
}

/// Maps a resolution to the process exit code scripts branch on.
pub fn exit_code(resolution: Resolution) -> i32 {
    app::exit_code(resolution)
}
