use crossterm::{
    queue,
    style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor},
};
use ecopet::achievements::Achievement;
use ecopet::model::{EcoStats, HistoryEntry, Mood, PetState};
use std::io::{self, Write};

pub(crate) struct Painter<'a, W: Write> {
    out: &'a mut W,
    color: bool,
}

impl<'a, W: Write> Painter<'a, W> {
    pub(crate) fn new(out: &'a mut W, color: bool) -> Self {
        Self { out, color }
    }

    fn text(&mut self, s: &str) -> io::Result<()> {
        queue!(self.out, Print(s))
    }

    fn colored(&mut self, s: &str, fg: Color, bold: bool) -> io::Result<()> {
        if !self.color {
            return self.text(s);
        }
        if bold {
            queue!(self.out, SetAttribute(Attribute::Bold))?;
        }
        queue!(self.out, SetForegroundColor(fg), Print(s), ResetColor)?;
        if bold {
            queue!(self.out, SetAttribute(Attribute::Reset))?;
        }
        Ok(())
    }

    fn line(&mut self) -> io::Result<()> {
        self.text("\n")
    }

    fn finish(&mut self) -> io::Result<()> {
        self.out.flush()
    }
}

fn mood_color(mood: Mood) -> Color {
    match mood {
        Mood::Happy => Color::Green,
        Mood::Okay => Color::Cyan,
        Mood::Meh => Color::Yellow,
        Mood::Sad => Color::DarkYellow,
        Mood::Miserable => Color::Red,
        Mood::Gone => Color::DarkGrey,
    }
}

/// Progress through the current level as `[###   ] 5/20`.
fn xp_bar(xp: u64, xp_per_level: u64, width: usize) -> String {
    let per = xp_per_level.max(1);
    let into = xp % per;
    let filled = usize::try_from(into * width as u64 / per).unwrap_or(width);
    format!(
        "[{}{}] {into}/{per}",
        "█".repeat(filled),
        " ".repeat(width - filled)
    )
}

fn face(mood: Mood) -> [&'static str; 5] {
    let mouth = match mood {
        Mood::Gone => return ["", "     (empty nest)", "", "", ""],
        Mood::Happy | Mood::Okay => "   |   \\___/   |",
        Mood::Meh => "   |   -----   |",
        Mood::Sad | Mood::Miserable => "   |   /___\\   |",
    };
    [
        "     /       \\",
        "    /  o   o  \\",
        "   |     ^     |",
        mouth,
        "    \\_________/",
    ]
}

pub(crate) fn status<W: Write>(
    p: &mut Painter<'_, W>,
    pet: &PetState,
    xp_per_level: u64,
) -> io::Result<()> {
    p.colored(&format!("{}  ", pet.stage.name), Color::White, true)?;
    p.text("Mood: ")?;
    p.colored(pet.mood.as_str(), mood_color(pet.mood), true)?;
    p.line()?;
    p.line()?;
    for row in face(pet.mood) {
        p.colored(row, mood_color(pet.mood), false)?;
        p.line()?;
    }

    p.text(&format!(
        "Level {:<4} XP {:<6} {}",
        pet.level,
        pet.xp,
        xp_bar(pet.xp, xp_per_level, 14)
    ))?;
    p.line()?;
    if pet.coins != 0 {
        p.text(&format!("Coins: {}", pet.coins))?;
        p.line()?;
    }
    if let Some(msg) = &pet.message {
        p.line()?;
        p.colored(msg, Color::Magenta, false)?;
        p.line()?;
    }
    p.finish()
}

pub(crate) fn history<W: Write>(p: &mut Painter<'_, W>, entries: &[HistoryEntry]) -> io::Result<()> {
    if entries.is_empty() {
        p.text("No actions logged yet.")?;
        p.line()?;
        return p.finish();
    }
    for e in entries {
        let when = chrono::DateTime::<chrono::Utc>::from_timestamp_millis(e.timestamp)
            .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|| "?".to_string());
        p.colored(&when, Color::DarkGrey, false)?;
        p.text(&format!("  {:<12}", e.action_type))?;
        if let Some(d) = &e.detail {
            p.text(&format!(" {d:<14}"))?;
        }
        match (e.xp_gain, e.new_level) {
            (Some(gain), Some(level)) => {
                p.colored(&format!(" +{gain} xp"), Color::Green, false)?;
                p.text(&format!(" (lvl {level})"))?;
            }
            _ => {
                let note = e.note.as_deref().unwrap_or("ignored");
                p.colored(&format!(" {note}"), Color::DarkGrey, false)?;
            }
        }
        p.line()?;
    }
    p.finish()
}

pub(crate) fn stats<W: Write>(p: &mut Painter<'_, W>, stats: &EcoStats) -> io::Result<()> {
    p.text(&format!("CO2 saved:       {:>8.0} g", stats.co2_saved))?;
    p.line()?;
    p.text(&format!("Plastic reduced: {:>8.1} items", stats.plastic_reduced))?;
    p.line()?;
    p.text(&format!("Energy saved:    {:>8.0} pts", stats.energy_saved))?;
    p.line()?;
    p.finish()
}

pub(crate) fn achievements<W: Write>(
    p: &mut Painter<'_, W>,
    all: &[Achievement],
    unlocked: &[&Achievement],
) -> io::Result<()> {
    for a in all {
        let done = unlocked.iter().any(|u| u.id == a.id);
        if done {
            p.colored("[x] ", Color::Green, true)?;
            p.colored(a.title, Color::White, true)?;
        } else {
            p.colored("[ ] ", Color::DarkGrey, false)?;
            p.text(a.title)?;
        }
        p.text(&format!("  {}", a.description))?;
        p.line()?;
    }
    p.finish()
}

pub(crate) fn unlocked_banner<W: Write>(
    p: &mut Painter<'_, W>,
    fresh: &[&Achievement],
) -> io::Result<()> {
    for a in fresh {
        p.colored(&format!("Unlocked: {}", a.title), Color::Yellow, true)?;
        p.line()?;
    }
    p.finish()
}
