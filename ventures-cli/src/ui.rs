//! Styled terminal output.

use std::io;
use std::io::Write;

use crossterm::queue;
use crossterm::style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor};
use ventures_lib::notify::{Level, Notification};
use ventures_table::TextGrid;

use crate::dashboard::Kpi;

fn level_color(level: Level) -> Color {
    match level {
        Level::Info => Color::Cyan,
        Level::Success => Color::Green,
        Level::Warning => Color::Yellow,
        Level::Error => Color::Red,
    }
}

/// Writes a bold section heading followed by a blank line.
pub fn title<W: Write>(out: &mut W, text: &str) -> io::Result<()> {
    queue!(
        out,
        SetAttribute(Attribute::Bold),
        Print(text),
        SetAttribute(Attribute::Reset),
        Print("\n\n")
    )?;
    out.flush()
}

/// Writes a laid-out table. The header is bold and the rule dimmed.
pub fn grid<W: Write>(out: &mut W, grid: &TextGrid) -> io::Result<()> {
    for (index, line) in grid.lines().iter().enumerate() {
        match index {
            0 => queue!(
                out,
                SetAttribute(Attribute::Bold),
                Print(line),
                SetAttribute(Attribute::Reset)
            )?,
            1 => queue!(
                out,
                SetForegroundColor(Color::DarkGrey),
                Print(line),
                ResetColor
            )?,
            _ => queue!(out, Print(line))?,
        }
        queue!(out, Print("\n"))?;
    }
    queue!(out, Print("\n"))?;
    out.flush()
}

/// Writes KPI cards as `label  value` lines with aligned values.
pub fn kpis<W: Write>(out: &mut W, kpis: &[Kpi]) -> io::Result<()> {
    let width = kpis.iter().map(|k| k.label.chars().count()).max().unwrap_or(0);
    for kpi in kpis {
        queue!(
            out,
            SetForegroundColor(Color::DarkGrey),
            Print(format!("{:<width$}  ", kpi.label, width = width)),
            ResetColor,
            SetAttribute(Attribute::Bold),
            Print(&kpi.value),
            SetAttribute(Attribute::Reset),
            Print("\n")
        )?;
    }
    queue!(out, Print("\n"))?;
    out.flush()
}

/// Writes queued notifications, colored by level.
pub fn notifications<W: Write>(out: &mut W, notifications: &[Notification]) -> io::Result<()> {
    for notification in notifications {
        queue!(
            out,
            SetForegroundColor(level_color(notification.level)),
            Print(format!("[{}] ", notification.level.as_str())),
            ResetColor,
            Print(&notification.message),
            Print("\n")
        )?;
    }
    out.flush()
}

/// Writes an error line.
pub fn error<W: Write>(out: &mut W, message: &str) -> io::Result<()> {
    queue!(
        out,
        SetForegroundColor(Color::Red),
        Print("error: "),
        ResetColor,
        Print(message),
        Print("\n")
    )?;
    out.flush()
}
