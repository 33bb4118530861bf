use std::io::Write;

use anyhow::Result;
use tracing::info;

use crate::{engine::streak::compute, storage::habit_store::HabitStore, utils::clock::Clock};

use super::output::print_logs;

/// Command to process `logs`. Streaks are recomputed for today before printing; when the stored
/// ones are outdated (for example a day passed without a check-in) they are saved again.
pub async fn process_logs_command(
    store: &impl HabitStore,
    clock: &impl Clock,
    output: &mut impl Write,
) -> Result<()> {
    let habits = store.load_habits().await?;
    let logs = store.load_logs().await?;
    let stored = store.load_streaks().await?;

    let streaks = compute(&habits, &logs, clock.today());
    if streaks != stored {
        info!("Stored streaks are outdated, refreshing");
        store.save_snapshot(&logs, &streaks).await?;
    }

    print_logs(output, &logs, &streaks)
}
