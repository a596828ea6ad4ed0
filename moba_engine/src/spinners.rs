//! Flavour text spinners.
//!
//! Random one-liners for situations the game reports often (walking a lane,
//! mistyped commands, leaving the game).
use std::collections::HashMap;

use gametools::spinners::{Spinner, Wedge};
use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SpinnerType {
    Movement,
    QuitMsg,
    UnrecognizedCommand,
}
impl SpinnerType {
    pub const ALL: [SpinnerType; 3] = [
        SpinnerType::Movement,
        SpinnerType::QuitMsg,
        SpinnerType::UnrecognizedCommand,
    ];

    /// Built-in lines with their relative weights.
    fn default_values(self) -> &'static [(&'static str, usize)] {
        match self {
            SpinnerType::Movement => &[
                ("You head that way...", 3),
                ("You jog down the lane...", 2),
                ("You slip through the brush...", 1),
                ("You march on...", 2),
            ],
            SpinnerType::QuitMsg => &[("See you on the lanes.", 2), ("GG.", 1), ("Until the next match.", 1)],
            SpinnerType::UnrecognizedCommand => &[
                ("Didn't quite catch that. Type \"help\" for a list of commands.", 3),
                ("That's not a command. Type \"help\" for a list of commands.", 2),
                ("Your hero stares blankly. Type \"help\" for a list of commands.", 1),
            ],
        }
    }
}

/// Build the spinner table with every built-in spinner.
pub fn default_spinners() -> HashMap<SpinnerType, Spinner<String>> {
    SpinnerType::ALL
        .into_iter()
        .map(|spin_type| {
            let wedges = spin_type
                .default_values()
                .iter()
                .map(|(text, width)| Wedge::new_weighted((*text).to_string(), *width))
                .collect::<Vec<_>>();
            (spin_type, Spinner::new(wedges))
        })
        .collect()
}
