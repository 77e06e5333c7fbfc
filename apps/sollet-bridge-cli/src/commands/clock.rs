use super::Session;
use crate::error::{CliError, CliResult};
use sollet_bridge_client::for_humans;

pub async fn execute(session: &Session) -> CliResult<()> {
    let clock = session
        .state
        .refresh_clock(session.connection.as_ref())
        .await?
        .ok_or_else(|| CliError::CommandExecution("clock sysvar not returned".to_string()))?;

    let epoch_age = clock
        .unix_timestamp
        .saturating_sub(clock.epoch_start_timestamp)
        .max(0) as u64;

    println!("🕒 Cluster clock ({})", session.state.network());
    println!("   Slot:           {}", clock.slot);
    println!("   Epoch:          {}", clock.epoch);
    println!("   Leader epoch:   {}", clock.leader_schedule_epoch);
    println!("   Unix timestamp: {}", clock.unix_timestamp);
    println!("   Epoch age:      {}", for_humans(epoch_age));
    Ok(())
}
