/// Difficulty setting; only the easiest one changes the map.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Skill {
    Baby,
    Easy,
    #[default]
    Medium,
    Hard,
    Nightmare,
}

/// Map cheat progression: off, all lines, all lines plus things.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub enum CheatLevel {
    #[default]
    Off,
    Lines,
    Things,
}

/// Game-mode flags owned by the game loop.
#[derive(Debug, Clone, Default)]
pub struct Session {
    pub deathmatch: bool,
    pub netgame: bool,
    pub single_demo: bool,
    pub skill: Skill,
    pub cheat: CheatLevel,
    pub spectating: bool,
    pub episode: u32,
    pub map: u32,
    /// Registered release with the two extra episodes.
    pub retail: bool,
    pub gametic: u32,
}
