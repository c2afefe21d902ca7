// Defaults and constants for shell settings

use crate::{BarStyle, ContainerMode, Direction, NavbarPosition, ScrollMode};

pub(crate) const THEME: &str = "default";

// Layout defaults
pub(crate) const LAYOUT_STYLE: &str = "layout1";
pub(crate) const CONTAINER_MODE: ContainerMode = ContainerMode::Fullwidth;
pub(crate) const CONTAINER_WIDTH: u32 = 1570;
pub(crate) const SCROLL: ScrollMode = ScrollMode::Content;

pub(crate) const NAVBAR_STYLE: &str = "style-1";
pub(crate) const NAVBAR_POSITION: NavbarPosition = NavbarPosition::Left;
pub(crate) const TOOLBAR_STYLE: BarStyle = BarStyle::Fixed;
pub(crate) const FOOTER_STYLE: BarStyle = BarStyle::Static;

pub(crate) const CUSTOM_SCROLLBARS: bool = true;
pub(crate) const DIRECTION: Direction = Direction::Ltr;
