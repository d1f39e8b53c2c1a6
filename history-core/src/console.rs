//! Registry of the game consoles a ranking can be kept for.

/// A supported console.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Console {
    /// Short identifier used as the catalog and ranking key (e.g. "SFC").
    pub id: &'static str,
    /// Display name.
    pub name: &'static str,
    /// Single-glyph icon shown next to entries.
    pub icon: &'static str,
}

/// Display name used for console ids that are not in the registry.
pub const UNKNOWN_CONSOLE_NAME: &str = "UNKNOWN";

const CONSOLES: [Console; 13] = [
    Console { id: "FC", name: "FAMICOM", icon: "🎮" },
    Console { id: "MD", name: "MEGA DRIVE", icon: "⚫" },
    Console { id: "GB", name: "GAME BOY", icon: "🔋" },
    Console { id: "SFC", name: "SUPER FAMICOM", icon: "👾" },
    Console { id: "PS", name: "PLAYSTATION", icon: "💿" },
    Console { id: "N64", name: "NINTENDO 64", icon: "🧊" },
    Console { id: "DC", name: "DREAMCAST", icon: "⭐" },
    Console { id: "GC", name: "GAMECUBE", icon: "📦" },
    Console { id: "PS2", name: "PLAYSTATION 2", icon: "📀" },
    Console { id: "WII", name: "Wii", icon: "🕊" },
    Console { id: "GBA", name: "GAME BOY ADVANCE", icon: "📱" },
    Console { id: "DS", name: "NINTENDO DS", icon: "📒" },
    Console { id: "3DS", name: "NINTENDO 3DS", icon: "👓" },
];

impl Console {
    /// All registered consoles in display order.
    pub fn all() -> &'static [Console] {
        &CONSOLES
    }

    /// Look up a console by id. Ids are matched exactly.
    pub fn find(id: &str) -> Option<&'static Console> {
        CONSOLES.iter().find(|c| c.id == id)
    }

    /// Display name for an id, falling back to [`UNKNOWN_CONSOLE_NAME`].
    pub fn display_name(id: &str) -> &'static str {
        Self::find(id).map(|c| c.name).unwrap_or(UNKNOWN_CONSOLE_NAME)
    }

    /// Icon for an id, if the console is registered.
    pub fn icon_for(id: &str) -> Option<&'static str> {
        Self::find(id).map(|c| c.icon)
    }
}
