use std::io::{self, Write};

use anyhow::Result;
use crossterm::{
    execute,
    style::{Color, Print, ResetColor, SetForegroundColor},
};
use satreg_catalog::{LoadStatus, SourceStatus};

/// Color scheme for terminal output.
struct Colors;

impl Colors {
    const ENABLED: Color = Color::Green;
    const DISABLED: Color = Color::DarkGrey;
    const LOADING: Color = Color::Yellow;
    const ERROR: Color = Color::Red;
    const HEADER: Color = Color::Magenta;
}

/// Print the source table.
pub fn print_sources(rows: &[SourceStatus]) -> Result<()> {
    let mut stdout = io::stdout();
    let id_width = rows
        .iter()
        .map(|r| r.descriptor.id.len())
        .max()
        .unwrap_or(2)
        .max(2);

    execute!(
        stdout,
        SetForegroundColor(Colors::HEADER),
        Print(format!("   {:<id_width$}  {:<9}  {}\n", "ID", "KIND", "NAME")),
        ResetColor
    )?;

    for row in rows {
        let (mark, color) = if row.enabled {
            ("[x]", Colors::ENABLED)
        } else {
            ("[ ]", Colors::DISABLED)
        };
        let status_color = match row.load_state.status {
            LoadStatus::Error => Colors::ERROR,
            LoadStatus::Loading => Colors::LOADING,
            _ => Colors::DISABLED,
        };
        let origin = if row.descriptor.builtin { "" } else { " *" };

        execute!(
            stdout,
            SetForegroundColor(color),
            Print(mark),
            ResetColor,
            Print(format!(
                " {:<id_width$}  {:<9}  {}{}  ",
                row.descriptor.id, row.descriptor.kind, row.descriptor.name, origin
            )),
            SetForegroundColor(status_color),
            Print(row.summary()),
            ResetColor,
            Print("\n")
        )?;
    }
    stdout.flush()?;
    Ok(())
}

/// Print an informational line to stderr.
pub fn print_info(msg: &str) -> Result<()> {
    let mut stderr = io::stderr();
    execute!(
        stderr,
        SetForegroundColor(Colors::DISABLED),
        Print(msg),
        Print("\n"),
        ResetColor
    )?;
    Ok(())
}
