//! Text rendering of passport panels and stdin commands

use std::io::Write;

use dpp_core::catalog::{Catalog, RecordId};
use dpp_core::highlight::HoverEvent;
use dpp_core::ui::{PanelSink, PanelView, ScoreBar, TitleSink, DIMENSIONS_LABEL};

const BAR_WIDTH: usize = 20;

/// Writes panels and the title to a text stream
pub struct TerminalSink<W: Write> {
    out: W,
}

impl<W: Write> TerminalSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> TitleSink for TerminalSink<W> {
    fn set_title(&mut self, title: &str) {
        if let Err(e) = writeln!(self.out, "=== {title} ===") {
            log::warn!("Failed to write title: {}", e);
        }
    }
}

impl<W: Write> PanelSink for TerminalSink<W> {
    fn render_panels(&mut self, panels: &[PanelView]) -> Result<(), Box<dyn std::error::Error>> {
        for (index, panel) in panels.iter().enumerate() {
            let marker = if panel.highlighted { '*' } else { ' ' };
            let status = if panel.bound { "" } else { " (not in model)" };
            writeln!(self.out, "{marker}[{}] {}{status}", index + 1, panel.title)?;
            writeln!(self.out, "     {}", panel.subtitle)?;
            writeln!(self.out, "     {}", score_line(&panel.condition))?;
            writeln!(self.out, "     {}", score_line(&panel.reusability))?;
            writeln!(self.out, "     {DIMENSIONS_LABEL}: {}", panel.dimensions)?;
            writeln!(self.out, "     id {}", panel.id)?;
        }
        self.out.flush()?;
        Ok(())
    }
}

fn score_line(bar: &ScoreBar) -> String {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
    let filled = (bar.marker_percent() / 100.0 * BAR_WIDTH as f32).round() as usize;
    let mut track: String = "-".repeat(BAR_WIDTH);
    track.replace_range(filled.min(BAR_WIDTH - 1)..=filled.min(BAR_WIDTH - 1), "|");
    format!("{:<12} [{track}] {:>3.0} {}", bar.label, bar.value, bar.css_color())
}

/// A line typed on stdin
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Hover(HoverEvent),
    Panels,
    Resize(u32, u32),
    Quit,
}

/// Parse a command line; records are named by id or by 1-based panel number
pub fn parse_command(line: &str, catalog: &Catalog) -> Result<Command, String> {
    let mut words = line.split_whitespace();
    let verb = words.next().ok_or_else(|| "empty command".to_string())?;

    match verb {
        "enter" | "leave" => {
            let target = words
                .next()
                .ok_or_else(|| format!("usage: {verb} <id|number>"))?;
            let id = resolve_record(target, catalog)?;
            Ok(Command::Hover(if verb == "enter" {
                HoverEvent::Enter(id)
            } else {
                HoverEvent::Leave(id)
            }))
        }
        "panels" => Ok(Command::Panels),
        "resize" => {
            let mut size = words.map(str::parse::<u32>);
            match (size.next(), size.next()) {
                (Some(Ok(width)), Some(Ok(height))) => Ok(Command::Resize(width, height)),
                _ => Err("usage: resize <width> <height>".to_string()),
            }
        }
        "quit" | "exit" => Ok(Command::Quit),
        other => Err(format!("unknown command '{other}'")),
    }
}

fn resolve_record(target: &str, catalog: &Catalog) -> Result<RecordId, String> {
    if let Ok(number) = target.parse::<usize>() {
        return number
            .checked_sub(1)
            .and_then(|index| catalog.records().get(index))
            .map(|record| record.id().clone())
            .ok_or_else(|| format!("no panel number {number}"));
    }
    // Unknown ids are passed through; hovering them is a no-op
    Ok(RecordId::new(target))
}

#[cfg(test)]
mod tests {
    use super::*;
    use dpp_core::catalog::Record;

    fn catalog() -> Catalog {
        Catalog::new(
            "Pavilion",
            "pavilion.glb",
            vec![Record::for_material_name("Brick", "Masonry", "Facade", 80.0, 25.0, "1 x 2")],
        )
        .unwrap()
    }

    #[test]
    fn test_parse_hover_by_number_and_id() {
        let catalog = catalog();
        let brick = RecordId::from_material_name("Brick");

        assert_eq!(
            parse_command("enter 1", &catalog),
            Ok(Command::Hover(HoverEvent::Enter(brick.clone())))
        );
        assert_eq!(
            parse_command(&format!("leave {brick}"), &catalog),
            Ok(Command::Hover(HoverEvent::Leave(brick)))
        );
        assert!(parse_command("enter 2", &catalog).is_err());
    }

    #[test]
    fn test_parse_other_commands() {
        let catalog = catalog();
        assert_eq!(parse_command("resize 800 600", &catalog), Ok(Command::Resize(800, 600)));
        assert!(parse_command("resize 800", &catalog).is_err());
        assert_eq!(parse_command("panels", &catalog), Ok(Command::Panels));
        assert_eq!(parse_command(" quit ", &catalog), Ok(Command::Quit));
        assert!(parse_command("jump", &catalog).is_err());
    }

    #[test]
    fn test_render_panels_as_text() {
        let catalog = catalog();
        let mut sink = TerminalSink::new(Vec::new());
        sink.set_title(catalog.model_name());
        sink.render_panels(&dpp_core::ui::build_panels(&catalog, None))
            .unwrap();

        let text = String::from_utf8(sink.into_inner()).unwrap();
        assert!(text.starts_with("=== Pavilion ==="));
        assert!(text.contains("[1] Masonry (not in model)"));
        assert!(text.contains("Dimensions (m): 1 x 2"));
        assert!(text.contains("rgb(191, 64, 0)"));
    }
}
