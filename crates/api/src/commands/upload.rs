//! File selection and upload commands

use std::path::PathBuf;
use std::time::Instant;

use calstats_domain::Result;

use crate::utils::logging::log_command_execution;
use crate::AppContext;

pub fn select_file(ctx: &mut AppContext, path: PathBuf) -> Result<()> {
    let start = Instant::now();
    let result = ctx.select_file(path);
    log_command_execution("upload::select_file", start.elapsed(), result.as_ref().map(|_| ()));
    result
}

/// Send the selected file. The analysis arrives later on the subscription.
pub async fn upload_calendar(ctx: &mut AppContext) -> Result<()> {
    let start = Instant::now();
    let result = ctx.start_upload().await;
    log_command_execution("upload::upload_calendar", start.elapsed(), result.as_ref().map(|_| ()));
    result
}
