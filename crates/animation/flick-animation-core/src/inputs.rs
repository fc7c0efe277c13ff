//! Input contracts for the core engine.
//!
//! Hosts collect lifecycle and pointer events each frame and pass them into
//! `Engine::update()` as a command batch. Commands naming unknown widgets, or
//! phases a widget's kind does not speak, are ignored.

use serde::{Deserialize, Serialize};

use crate::ids::WidgetId;

#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct Inputs {
    /// Widget commands applied this tick, in order.
    #[serde(default)]
    pub commands: Vec<WidgetCommand>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum WidgetCommand {
    /// Play the start phase.
    RunStart { widget: WidgetId },
    /// Enter the idle update loop.
    RunUpdate { widget: WidgetId },
    /// Play the end phase.
    RunEnd { widget: WidgetId },
    /// Pointer click on a button.
    Click { widget: WidgetId },
    /// Pointer entered a button.
    PointerEnter { widget: WidgetId },
    /// Pointer left a button.
    PointerExit { widget: WidgetId },
    Select { widget: WidgetId },
    Unselect { widget: WidgetId },
    OpenPanel { widget: WidgetId },
    ClosePanel { widget: WidgetId },
    /// Toggle a button's interactable flag.
    SetInteractable { widget: WidgetId, interactable: bool },
}

impl WidgetCommand {
    pub fn widget(&self) -> WidgetId {
        match *self {
            Self::RunStart { widget }
            | Self::RunUpdate { widget }
            | Self::RunEnd { widget }
            | Self::Click { widget }
            | Self::PointerEnter { widget }
            | Self::PointerExit { widget }
            | Self::Select { widget }
            | Self::Unselect { widget }
            | Self::OpenPanel { widget }
            | Self::ClosePanel { widget }
            | Self::SetInteractable { widget, .. } => widget,
        }
    }
}
