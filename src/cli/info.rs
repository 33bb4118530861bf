use std::io::Write;

use anyhow::Result;

use crate::engine::habit::{MAX_HABITS, MIN_HABITS};

const FEATURES: &[&str] = &[
    "Maintain streak counts for completed habits",
    "Interactive or flag based daily check-in, including past days",
    "View habit completion logs and history",
    "Clear logs or reset all data",
    "JSON-based persistent storage",
];

pub fn print_app_info(output: &mut impl Write) -> Result<()> {
    let separator = "=".repeat(50);
    writeln!(output, "\n{separator}")?;
    writeln!(
        output,
        "{} v{}",
        env!("CARGO_PKG_NAME").to_uppercase(),
        env!("CARGO_PKG_VERSION")
    )?;
    writeln!(output, "{separator}")?;

    writeln!(output, "\nDescription:")?;
    writeln!(output, "  {}", env!("CARGO_PKG_DESCRIPTION"))?;

    writeln!(output, "\nRelease Information:")?;
    writeln!(output, "  Version: {}", env!("CARGO_PKG_VERSION"))?;
    writeln!(output, "  License: {}", env!("CARGO_PKG_LICENSE"))?;

    writeln!(output, "\nFeatures:")?;
    writeln!(output, "  • Track {MIN_HABITS}-{MAX_HABITS} daily habits")?;
    for feature in FEATURES {
        writeln!(output, "  • {feature}")?;
    }
    writeln!(output, "\n{separator}")?;
    Ok(())
}
