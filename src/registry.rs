//! Static registry of the game servers the dashboard knows about.
//!
//! The table is compiled in and never changes at runtime. Colors are hex
//! tokens and icons are emoji tokens; the UI layer turns them into egui
//! values.

use serde::Serialize;

/// A game server profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GameProfile {
    /// Identifier sent to the process manager (`?server=` / `{"server": ..}`)
    pub id: &'static str,
    /// Display name
    pub name: &'static str,
    /// Port players connect to
    pub port: u16,
    /// Icon shown in the sidebar
    pub icon: &'static str,
    /// Accent color as a `#RRGGBB` hex string
    pub color: &'static str,
}

/// All known game servers, in sidebar order
pub const GAMES: [GameProfile; 4] = [
    GameProfile {
        id: "satisfactory",
        name: "Satisfactory",
        port: 7777,
        icon: "🏭",
        color: "#FA9549",
    },
    GameProfile {
        id: "minecraft",
        name: "Minecraft",
        port: 25565,
        icon: "⛏",
        color: "#4ADE80",
    },
    GameProfile {
        id: "rust",
        name: "Rust",
        port: 28015,
        icon: "☢",
        color: "#CD4631",
    },
    GameProfile {
        id: "conan",
        name: "Conan Exiles",
        port: 7777,
        icon: "⚔",
        color: "#E1CE7A",
    },
];

/// Look up a profile by id
pub fn find(id: &str) -> Option<&'static GameProfile> {
    GAMES.iter().find(|g| g.id == id)
}

/// Profile selected when nothing else is configured
pub fn default_game() -> &'static GameProfile {
    &GAMES[0]
}

/// Resolve a configured id, falling back to the default profile
pub fn find_or_default(id: &str) -> &'static GameProfile {
    find(id).unwrap_or_else(|| {
        tracing::warn!("Unknown game '{}', falling back to {}", id, default_game().id);
        default_game()
    })
}

/// All profile ids, in sidebar order
pub fn ids() -> impl Iterator<Item = &'static str> {
    GAMES.iter().map(|g| g.id)
}
