//! Every asset the game loads is stored as a string path here.

pub mod settings {
    pub const SETTINGS: &str = "settings.ron";
}

pub mod dolls {
    pub const DOLL1: &str = "dolls/doll1.png";
    pub const DOLL2: &str = "dolls/doll2.png";
    pub const DOLL3: &str = "dolls/doll3.png";
    pub const DOLL4: &str = "dolls/doll4.png";
    pub const DOLL5: &str = "dolls/doll5.png";
    pub const DOLL6: &str = "dolls/doll6.png";
    pub const DOLL7: &str = "dolls/doll7.png";

    pub const ANGRY1: &str = "dolls/angry1.png";
    pub const ANGRY2: &str = "dolls/angry2.png";
    pub const ANGRY3: &str = "dolls/angry3.png";
    pub const ANGRY4: &str = "dolls/angry4.png";
}

pub mod audio {
    /// Played on every qualifying tap.
    pub const TAP_FEEDBACK: &str = "audio/sound.mp3";
}
