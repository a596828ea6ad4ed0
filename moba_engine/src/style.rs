//! Styling helpers for terminal output.
//!
//! The [`GameStyle`] trait provides a set of convenience methods for applying
//! ANSI styling via the `colored` crate. Implementations for `&str` and
//! `String` are provided so string literals can be styled directly.

use colored::{ColoredString, Colorize};
use moba_data::Team;
use textwrap::{Options, termwidth};

/// Convenience trait for applying color and style to text output.
pub trait GameStyle {
    fn node_style(&self) -> ColoredString;
    fn node_titlebar_style(&self) -> ColoredString;
    fn description_style(&self) -> ColoredString;
    fn direction_style(&self) -> ColoredString;
    fn skill_style(&self) -> ColoredString;
    fn error_style(&self) -> ColoredString;
    fn denied_style(&self) -> ColoredString;
    fn usage_style(&self) -> ColoredString;
    fn subheading_style(&self) -> ColoredString;
    fn section_style(&self) -> ColoredString;
    fn prompt_style(&self) -> ColoredString;
    fn harm_style(&self) -> ColoredString;
    fn heal_style(&self) -> ColoredString;
    fn team_style(&self, team: Team) -> ColoredString;
}

impl GameStyle for &str {
    fn section_style(&self) -> ColoredString {
        let bracketed = format!("[{self}]");
        bracketed.truecolor(75, 80, 75)
    }
    fn subheading_style(&self) -> ColoredString {
        self.underline()
    }
    fn node_style(&self) -> ColoredString {
        self.truecolor(223, 77, 10)
    }
    fn node_titlebar_style(&self) -> ColoredString {
        self.truecolor(223, 77, 10).underline()
    }
    fn description_style(&self) -> ColoredString {
        self.italic().truecolor(102, 208, 250)
    }
    fn direction_style(&self) -> ColoredString {
        self.italic().truecolor(110, 220, 110)
    }
    fn skill_style(&self) -> ColoredString {
        self.truecolor(220, 180, 40)
    }
    fn error_style(&self) -> ColoredString {
        self.truecolor(230, 30, 30)
    }
    fn denied_style(&self) -> ColoredString {
        self.italic().truecolor(230, 30, 30)
    }
    fn usage_style(&self) -> ColoredString {
        self.truecolor(230, 230, 30)
    }
    fn prompt_style(&self) -> ColoredString {
        self.truecolor(75, 180, 255)
    }
    fn harm_style(&self) -> ColoredString {
        self.truecolor(230, 80, 80)
    }
    fn heal_style(&self) -> ColoredString {
        self.truecolor(80, 230, 80)
    }
    fn team_style(&self, team: Team) -> ColoredString {
        match team {
            Team::Blue => self.truecolor(80, 120, 255).bold(),
            Team::Red => self.truecolor(230, 60, 60).bold(),
            Team::Neutral => self.truecolor(180, 180, 180),
        }
    }
}

impl GameStyle for String {
    fn section_style(&self) -> ColoredString {
        self.as_str().section_style()
    }
    fn subheading_style(&self) -> ColoredString {
        self.as_str().subheading_style()
    }
    fn node_style(&self) -> ColoredString {
        self.as_str().node_style()
    }
    fn node_titlebar_style(&self) -> ColoredString {
        self.as_str().node_titlebar_style()
    }
    fn description_style(&self) -> ColoredString {
        self.as_str().description_style()
    }
    fn direction_style(&self) -> ColoredString {
        self.as_str().direction_style()
    }
    fn skill_style(&self) -> ColoredString {
        self.as_str().skill_style()
    }
    fn error_style(&self) -> ColoredString {
        self.as_str().error_style()
    }
    fn denied_style(&self) -> ColoredString {
        self.as_str().denied_style()
    }
    fn usage_style(&self) -> ColoredString {
        self.as_str().usage_style()
    }
    fn prompt_style(&self) -> ColoredString {
        self.as_str().prompt_style()
    }
    fn harm_style(&self) -> ColoredString {
        self.as_str().harm_style()
    }
    fn heal_style(&self) -> ColoredString {
        self.as_str().heal_style()
    }
    fn team_style(&self, team: Team) -> ColoredString {
        self.as_str().team_style(team)
    }
}

/// Wrapping options for ordinary paragraphs.
pub fn normal_block() -> Options<'static> {
    Options::new(termwidth().min(100))
}

/// Wrapping options for indented paragraphs (help text, info topics).
pub fn indented_block() -> Options<'static> {
    normal_block().initial_indent("    ").subsequent_indent("    ")
}
