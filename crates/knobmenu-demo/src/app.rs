#![forbid(unsafe_code)]

//! The pulse-generator settings menu and its input loop.
//!
//! Input arrives as single-character symbols standing in for rotary
//! encoder events. Each symbol becomes an [`Intent`]; utilized leaves are
//! picked up from the controller's event channel and acted on here.

use std::sync::mpsc;

use knobmenu_core::{
    Controller, Intent, Item, ItemKind, MenuError, MenuEvent, MenuNode, NodeId, RadioGroup,
    Result, Tree,
};
use knobmenu_render::{ListRenderer, RenderPass, RowFormat};

use crate::cli::Opts;

/// Menu item ids.
pub mod ids {
    pub const GENERATOR: i32 = 1;
    pub const MIN_FREQ: i32 = 11;
    pub const MAX_FREQ: i32 = 12;
    pub const PULSE_RATIO: i32 = 13;
    pub const CURVE_SHAPE: i32 = 14;
    pub const CURVE_LINEAR: i32 = 141;
    pub const CURVE_QUADRATIC: i32 = 142;
    pub const FREQ_FLOATING: i32 = 15;
    pub const FREQ_UNITS: i32 = 16;
    pub const FREQ_UNITS_RPM: i32 = 161;
    pub const FREQ_UNITS_HZ: i32 = 162;
    pub const BACK: i32 = 0;
}

/// Build the settings menu.
///
/// ```text
/// Pulse generator
/// ├── Minimal frequency
/// ├── Maximal frequency
/// ├── Pulse ratio
/// ├── Acceleration curve
/// │   ├── (*) Linear curve
/// │   ├── ( ) Quadratic curve
/// │   └── Back
/// ├── [ ] Frequency floating
/// ├── Frequency units
/// │   ├── (*) Rotates per minute
/// │   ├── ( ) Hertz
/// │   └── Back
/// └── Back
/// ```
pub fn pulse_generator_menu() -> Result<Tree> {
    let curve = RadioGroup::new(14)?;
    let units = RadioGroup::new(16)?;
    let back = || MenuNode::new(Item::new(ids::BACK, "Back"));

    Ok(Tree::from_node(
        MenuNode::new(Item::new(ids::GENERATOR, "Pulse generator"))
            .child(MenuNode::new(Item::new(ids::MIN_FREQ, "Minimal frequency")))
            .child(MenuNode::new(Item::new(ids::MAX_FREQ, "Maximal frequency")))
            .child(MenuNode::new(Item::new(ids::PULSE_RATIO, "Pulse ratio")))
            .child(
                MenuNode::new(Item::new(ids::CURVE_SHAPE, "Acceleration curve"))
                    .child(MenuNode::new(Item::radio(
                        ids::CURVE_LINEAR,
                        "Linear curve",
                        curve,
                        true,
                    )))
                    .child(MenuNode::new(Item::radio(
                        ids::CURVE_QUADRATIC,
                        "Quadratic curve",
                        curve,
                        false,
                    )))
                    .child(back()),
            )
            .child(MenuNode::new(Item::checkable(
                ids::FREQ_FLOATING,
                "Frequency floating",
                false,
            )))
            .child(
                MenuNode::new(Item::new(ids::FREQ_UNITS, "Frequency units"))
                    .child(MenuNode::new(Item::radio(
                        ids::FREQ_UNITS_RPM,
                        "Rotates per minute",
                        units,
                        true,
                    )))
                    .child(MenuNode::new(Item::radio(
                        ids::FREQ_UNITS_HZ,
                        "Hertz",
                        units,
                        false,
                    )))
                    .child(back()),
            )
            .child(back()),
    ))
}

/// A rotary encoder event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    RotateRight,
    RotateLeft,
    Click,
    LongClick,
    Quit,
}

impl Input {
    /// Decode one input symbol.
    #[must_use]
    pub fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            '>' | 'r' => Some(Self::RotateRight),
            '<' | 'l' => Some(Self::RotateLeft),
            'c' => Some(Self::Click),
            'C' | 'L' => Some(Self::LongClick),
            'q' => Some(Self::Quit),
            _ => None,
        }
    }

    #[must_use]
    pub fn intent(self) -> Option<Intent> {
        match self {
            Self::RotateRight => Some(Intent::Advance),
            Self::RotateLeft => Some(Intent::Retreat),
            Self::Click => Some(Intent::Enter),
            Self::LongClick => Some(Intent::Back),
            Self::Quit => None,
        }
    }
}

/// Menu, LCD viewport and the event channel between them.
#[derive(Debug)]
pub struct DemoApp {
    menu: Controller,
    lcd: ListRenderer,
    cols: usize,
    events: mpsc::Receiver<MenuEvent>,
}

impl DemoApp {
    /// Build the menu and enter its top level.
    pub fn new(opts: &Opts) -> Result<Self> {
        let (tx, events) = mpsc::channel();
        let mut menu = Controller::new(pulse_generator_menu()?);
        menu.set_listener(tx);
        menu.descend()?;

        let format = if opts.ascii {
            RowFormat::ascii()
        } else {
            RowFormat::unicode()
        };
        let mut app = Self {
            menu,
            lcd: ListRenderer::new(opts.rows).with_row_format(format),
            cols: opts.cols,
            events,
        };
        app.drain_events()?;
        Ok(app)
    }

    #[must_use]
    pub fn menu(&self) -> &Controller {
        &self.menu
    }

    /// Apply one input. Returns `false` once the user asked to quit.
    ///
    /// Inputs that do not apply to the active item are ignored.
    pub fn handle(&mut self, input: Input) -> Result<bool> {
        let Some(intent) = input.intent() else {
            tracing::info!("quit requested");
            return Ok(false);
        };
        match self.menu.apply(intent) {
            Ok(outcome) => tracing::debug!(?input, ?outcome, "input applied"),
            Err(err) => ignore_not_applicable(err)?,
        }
        self.drain_events()?;
        Ok(true)
    }

    /// Feed every symbol of `script`, stopping at `q`.
    pub fn run_script(&mut self, script: &str) -> Result<()> {
        for input in script.chars().filter_map(Input::from_symbol) {
            if !self.handle(input)? {
                break;
            }
        }
        Ok(())
    }

    /// Render the LCD contents.
    pub fn frame(&mut self) -> (RenderPass, Vec<String>) {
        self.lcd.render_lines(&self.menu, self.cols)
    }

    fn drain_events(&mut self) -> Result<()> {
        while let Ok(event) = self.events.try_recv() {
            match event {
                MenuEvent::ActiveChanged { new, .. } => {
                    tracing::debug!(caption = self.menu.tree()[new].caption(), "cursor moved");
                }
                MenuEvent::Utilized { item } => self.utilize(item)?,
            }
        }
        Ok(())
    }

    fn utilize(&mut self, node: NodeId) -> Result<()> {
        let item = &self.menu.tree()[node];
        let (id, kind) = (item.id(), item.kind());
        tracing::info!(id, caption = item.caption(), "item utilized");
        let result = match kind {
            ItemKind::Radio(_) => self.menu.select_radio(node).map(drop),
            ItemKind::Checkable => self.menu.toggle(node).map(drop),
            ItemKind::Plain if id == ids::BACK => self.menu.ascend().map(drop),
            ItemKind::Plain => Ok(()),
        };
        result.or_else(ignore_not_applicable)
    }
}

fn ignore_not_applicable(err: MenuError) -> Result<()> {
    if err.is_not_applicable() {
        tracing::debug!(%err, "input ignored");
        Ok(())
    } else {
        Err(err)
    }
}
