use std::io::Write;

use anyhow::{Context, Result};

use crate::keys::{ESCAPE, Key, KeySource};
use crate::model::{Answer, CaseMode, Resolution, ResponseSet, SessionRequest};
use crate::prompt::write_prompt;

/// Keys that end the exchange without a lookup.
pub fn classify(key: Key) -> Option<Resolution> {
    match key {
        Key::Char(ESCAPE) => Some(Resolution::Cancelled),
        Key::Char('\r' | '\n') => Some(Resolution::NoKeyPressed),
        _ => None,
    }
}

/// One-based position of the first candidate matching `key`.
pub fn find_response(responses: &ResponseSet, key: Key, case_mode: CaseMode) -> Option<usize> {
    let Key::Char(pressed) = key else {
        return None;
    };

    responses
        .candidates()
        .iter()
        .position(|&candidate| match case_mode {
            CaseMode::Sensitive => candidate == pressed,
            CaseMode::Insensitive => candidate.to_uppercase().eq(pressed.to_uppercase()),
        })
        .map(|index| index + 1)
}

pub fn resolve(responses: &ResponseSet, key: Key, case_mode: CaseMode) -> Resolution {
    if let Some(resolution) = classify(key) {
        return resolution;
    }
    match find_response(responses, key, case_mode) {
        Some(index) => Resolution::Matched(index),
        None => Resolution::NoMatch,
    }
}

/// Runs one prompt/read cycle.
///
/// A request with an empty prompt or response set answers `NoMatch` without
/// writing or reading anything. Exhausted input also answers `NoMatch`.
pub fn ask<K, W>(request: &SessionRequest, keys: &mut K, out: &mut W) -> Result<Answer>
where
    K: KeySource + ?Sized,
    W: Write + ?Sized,
{
    if request.prompt.is_empty() || request.responses.is_empty() {
        return Ok(Answer::unanswered());
    }

    write_prompt(&request.prompt, out).context("failed to write prompt")?;

    let Some(key) = keys.read_key().context("failed to read response key")? else {
        return Ok(Answer::unanswered());
    };

    Ok(Answer {
        key: Some(key),
        resolution: resolve(&request.responses, key, request.case_mode),
    })
}
