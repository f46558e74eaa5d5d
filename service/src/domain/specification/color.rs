//! [`Colors`] of a print job.

use std::collections::BTreeSet;

use common::define_kind;
use serde::{Deserialize, Serialize};

define_kind! {
    #[doc = "Ink color of the fixed shop palette."]
    enum Color {
        #[doc = "Black ink."]
        Black = 1,

        #[doc = "Cyan ink."]
        Cyan = 2,

        #[doc = "Magenta ink."]
        Magenta = 3,

        #[doc = "Yellow ink."]
        Yellow = 4,

        #[doc = "Red spot ink."]
        Red = 5,

        #[doc = "Blue spot ink."]
        Blue = 6,

        #[doc = "Green spot ink."]
        Green = 7,

        #[doc = "Orange spot ink."]
        Orange = 8,

        #[doc = "Metallic golden ink."]
        Golden = 9,

        #[doc = "Metallic silver ink."]
        Silver = 10,
    }
}

define_text! {
    #[doc = "Free-text description of a color missing in the palette."]
    CustomColor(max = 128)
}

/// Colors selected for a print job.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Colors {
    /// Selected [`Color`]s of the palette.
    pub palette: BTreeSet<Color>,

    /// [`CustomColor`], if selected.
    pub custom: Option<CustomColor>,
}

impl Colors {
    /// Selects the provided [`Color`] if it's not selected, or deselects it
    /// otherwise.
    #[must_use]
    pub fn toggle(mut self, color: Color) -> Self {
        if !self.palette.remove(&color) {
            _ = self.palette.insert(color);
        }
        self
    }

    /// Indicates whether no color is selected at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.palette.is_empty() && self.custom.is_none()
    }
}
