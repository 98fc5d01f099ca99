//! Interactive loop
//!
//! Reacts to two event sources on one task: command lines from the input
//! and inbound events from the channel subscription. All state changes go
//! through the context here.

use std::io::Write;

use calstats_core::Subscription;
use calstats_domain::Result;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::debug;

use crate::commands::{self, Command, Flow, HELP};
use crate::{render, AppContext};

const PROMPT: &str = "calstats> ";

/// Run until `quit` or end of input.
pub async fn run<R, W>(
    ctx: &mut AppContext,
    mut subscription: Subscription,
    input: R,
    out: &mut W,
) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut lines = input.lines();
    write!(out, "{}\n{PROMPT}", render::screen(ctx))?;
    out.flush()?;

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    debug!("input closed");
                    break;
                };
                if line.trim().is_empty() {
                    write!(out, "{PROMPT}")?;
                    out.flush()?;
                    continue;
                }
                match handle_line(ctx, &line).await {
                    Ok(Some(text)) => write!(out, "{text}\n{PROMPT}")?,
                    Ok(None) => break,
                    Err(message) => write!(out, "{message}\n{PROMPT}")?,
                }
            }
            Some(event) = subscription.recv() => {
                ctx.apply_inbound(event);
                write!(out, "\n{}\n{PROMPT}", render::screen(ctx))?;
            }
        }
        out.flush()?;
    }
    Ok(())
}

/// `Ok(None)` means quit. Errors carry the text to show the user.
async fn handle_line(ctx: &mut AppContext, line: &str) -> std::result::Result<Option<String>, String> {
    let command = line.parse::<Command>().map_err(|err| err.user_message())?;
    if command == Command::Help {
        return Ok(Some(HELP.to_string()));
    }

    match commands::execute(ctx, command).await {
        Ok(Flow::Quit) => Ok(None),
        Ok(Flow::Continue) => Ok(Some(render::screen(ctx))),
        Err(err) => Err(format!("{}\n{}", err.user_message(), render::screen(ctx))),
    }
}
