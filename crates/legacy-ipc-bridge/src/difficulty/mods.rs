//! Legacy modifier bitflags and native modifiers.

use bitflags::bitflags;

bitflags! {
    /// Modifier set as encoded by the legacy client.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct LegacyMods: u32 {
        const NO_FAIL = 1 << 0;
        const EASY = 1 << 1;
        const TOUCH_DEVICE = 1 << 2;
        const HIDDEN = 1 << 3;
        const HARD_ROCK = 1 << 4;
        const SUDDEN_DEATH = 1 << 5;
        const DOUBLE_TIME = 1 << 6;
        const RELAX = 1 << 7;
        const HALF_TIME = 1 << 8;
        /// Always sent together with DOUBLE_TIME.
        const NIGHTCORE = 1 << 9;
        const FLASHLIGHT = 1 << 10;
        const AUTOPLAY = 1 << 11;
        const SPUN_OUT = 1 << 12;
        const AUTOPILOT = 1 << 13;
        /// Always sent together with SUDDEN_DEATH.
        const PERFECT = 1 << 14;
        const KEY4 = 1 << 15;
        const KEY5 = 1 << 16;
        const KEY6 = 1 << 17;
        const KEY7 = 1 << 18;
        const KEY8 = 1 << 19;
        const FADE_IN = 1 << 20;
        const RANDOM = 1 << 21;
        const CINEMA = 1 << 22;
        const TARGET = 1 << 23;
        const KEY9 = 1 << 24;
        const KEY_COOP = 1 << 25;
        const KEY1 = 1 << 26;
        const KEY3 = 1 << 27;
        const KEY2 = 1 << 28;
        const SCORE_V2 = 1 << 29;
        const MIRROR = 1 << 30;
    }
}

impl LegacyMods {
    /// Reinterpret the wire integer bit-for-bit. Unknown bits are kept.
    pub const fn from_wire(mods: i32) -> Self {
        Self::from_bits_retain(mods as u32)
    }
}

impl Default for LegacyMods {
    fn default() -> Self {
        Self::empty()
    }
}

/// Native modifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mod {
    NoFail,
    Easy,
    TouchDevice,
    Hidden,
    HardRock,
    SuddenDeath,
    Perfect,
    DoubleTime,
    Nightcore,
    HalfTime,
    Flashlight,
    Autoplay,
    Cinema,
    Relax,
    Autopilot,
    SpunOut,
    TargetPractice,
    FadeIn,
    Random,
    Mirror,
    DualStages,
    /// Mania key count override (1..=9).
    Keys(u8),
    ScoreV2,
}

impl Mod {
    pub fn acronym(self) -> String {
        let s = match self {
            Mod::NoFail => "NF",
            Mod::Easy => "EZ",
            Mod::TouchDevice => "TD",
            Mod::Hidden => "HD",
            Mod::HardRock => "HR",
            Mod::SuddenDeath => "SD",
            Mod::Perfect => "PF",
            Mod::DoubleTime => "DT",
            Mod::Nightcore => "NC",
            Mod::HalfTime => "HT",
            Mod::Flashlight => "FL",
            Mod::Autoplay => "AT",
            Mod::Cinema => "CN",
            Mod::Relax => "RX",
            Mod::Autopilot => "AP",
            Mod::SpunOut => "SO",
            Mod::TargetPractice => "TP",
            Mod::FadeIn => "FI",
            Mod::Random => "RD",
            Mod::Mirror => "MR",
            Mod::DualStages => "DS",
            Mod::Keys(n) => return format!("{n}K"),
            Mod::ScoreV2 => "SV2",
        };
        s.to_owned()
    }

    /// Playback rate change applied by this mod, if any.
    pub fn clock_rate(self) -> Option<f64> {
        match self {
            Mod::DoubleTime | Mod::Nightcore => Some(1.5),
            Mod::HalfTime => Some(0.75),
            _ => None,
        }
    }
}

/// Translation shared by every ruleset. Nightcore and Perfect supersede the
/// mods they are always sent with.
pub(crate) fn convert_common(mods: LegacyMods) -> Vec<Mod> {
    let mut out = Vec::new();

    if mods.contains(LegacyMods::NO_FAIL) {
        out.push(Mod::NoFail);
    }
    if mods.contains(LegacyMods::EASY) {
        out.push(Mod::Easy);
    }
    if mods.contains(LegacyMods::HIDDEN) {
        out.push(Mod::Hidden);
    }
    if mods.contains(LegacyMods::HARD_ROCK) {
        out.push(Mod::HardRock);
    }
    if mods.contains(LegacyMods::PERFECT) {
        out.push(Mod::Perfect);
    } else if mods.contains(LegacyMods::SUDDEN_DEATH) {
        out.push(Mod::SuddenDeath);
    }
    if mods.contains(LegacyMods::NIGHTCORE) {
        out.push(Mod::Nightcore);
    } else if mods.contains(LegacyMods::DOUBLE_TIME) {
        out.push(Mod::DoubleTime);
    }
    if mods.contains(LegacyMods::HALF_TIME) {
        out.push(Mod::HalfTime);
    }
    if mods.contains(LegacyMods::FLASHLIGHT) {
        out.push(Mod::Flashlight);
    }
    if mods.contains(LegacyMods::AUTOPLAY) {
        out.push(Mod::Autoplay);
    }
    if mods.contains(LegacyMods::CINEMA) {
        out.push(Mod::Cinema);
    }
    if mods.contains(LegacyMods::SCORE_V2) {
        out.push(Mod::ScoreV2);
    }

    out
}
