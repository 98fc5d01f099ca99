//! Statistics card commands

use std::time::Instant;

use calstats_core::CardKind;
use tracing::debug;

use crate::utils::logging::log_command_execution;
use crate::AppContext;

pub fn toggle_card(ctx: &mut AppContext, kind: CardKind) {
    let start = Instant::now();
    let expanded = ctx.stats_mut().toggle(kind);
    debug!(card = %kind, expanded, "card toggled");
    log_command_execution("stats::toggle_card", start.elapsed(), Ok(()));
}
