//! Rule variants and the fixed id -> ruleset table.

use std::sync::Arc;

use super::calculator::{DifficultyCalculator, StrainCalculator};
use super::error::CalculationError;
use super::mods::{convert_common, LegacyMods, Mod};

/// The four rule variants the legacy client knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RulesetKind {
    Osu,
    Taiko,
    Catch,
    Mania,
}

impl RulesetKind {
    pub const ALL: [RulesetKind; 4] = [
        RulesetKind::Osu,
        RulesetKind::Taiko,
        RulesetKind::Catch,
        RulesetKind::Mania,
    ];

    pub fn from_id(id: i32) -> Option<Self> {
        match id {
            0 => Some(RulesetKind::Osu),
            1 => Some(RulesetKind::Taiko),
            2 => Some(RulesetKind::Catch),
            3 => Some(RulesetKind::Mania),
            _ => None,
        }
    }

    pub fn id(self) -> i32 {
        match self {
            RulesetKind::Osu => 0,
            RulesetKind::Taiko => 1,
            RulesetKind::Catch => 2,
            RulesetKind::Mania => 3,
        }
    }

    pub fn short_name(self) -> &'static str {
        match self {
            RulesetKind::Osu => "osu",
            RulesetKind::Taiko => "taiko",
            RulesetKind::Catch => "fruits",
            RulesetKind::Mania => "mania",
        }
    }
}

/// A pluggable rule variant.
pub trait Ruleset: Send + Sync {
    fn kind(&self) -> RulesetKind;

    /// Native mods for a legacy bitflag. Flags without a native equivalent
    /// are dropped.
    fn convert_from_legacy_mods(&self, mods: LegacyMods) -> Vec<Mod>;

    fn create_difficulty_calculator(&self) -> Box<dyn DifficultyCalculator>;
}

/// Built-in ruleset backed by the reference strain calculator.
#[derive(Debug, Clone, Copy)]
pub struct BuiltinRuleset {
    kind: RulesetKind,
}

impl BuiltinRuleset {
    pub fn new(kind: RulesetKind) -> Self {
        Self { kind }
    }
}

impl Ruleset for BuiltinRuleset {
    fn kind(&self) -> RulesetKind {
        self.kind
    }

    fn convert_from_legacy_mods(&self, mods: LegacyMods) -> Vec<Mod> {
        let mut out = convert_common(mods);

        match self.kind {
            RulesetKind::Osu => {
                if mods.contains(LegacyMods::RELAX) {
                    out.push(Mod::Relax);
                }
                if mods.contains(LegacyMods::AUTOPILOT) {
                    out.push(Mod::Autopilot);
                }
                if mods.contains(LegacyMods::SPUN_OUT) {
                    out.push(Mod::SpunOut);
                }
                if mods.contains(LegacyMods::TOUCH_DEVICE) {
                    out.push(Mod::TouchDevice);
                }
                if mods.contains(LegacyMods::TARGET) {
                    out.push(Mod::TargetPractice);
                }
            }
            RulesetKind::Taiko => {
                if mods.contains(LegacyMods::RELAX) {
                    out.push(Mod::Relax);
                }
                if mods.contains(LegacyMods::RANDOM) {
                    out.push(Mod::Random);
                }
            }
            RulesetKind::Catch => {
                if mods.contains(LegacyMods::RELAX) {
                    out.push(Mod::Relax);
                }
            }
            RulesetKind::Mania => {
                const KEYS: [(LegacyMods, u8); 9] = [
                    (LegacyMods::KEY1, 1),
                    (LegacyMods::KEY2, 2),
                    (LegacyMods::KEY3, 3),
                    (LegacyMods::KEY4, 4),
                    (LegacyMods::KEY5, 5),
                    (LegacyMods::KEY6, 6),
                    (LegacyMods::KEY7, 7),
                    (LegacyMods::KEY8, 8),
                    (LegacyMods::KEY9, 9),
                ];
                for (flag, keys) in KEYS {
                    if mods.contains(flag) {
                        out.push(Mod::Keys(keys));
                    }
                }
                if mods.contains(LegacyMods::KEY_COOP) {
                    out.push(Mod::DualStages);
                }
                if mods.contains(LegacyMods::FADE_IN) {
                    out.push(Mod::FadeIn);
                }
                if mods.contains(LegacyMods::RANDOM) {
                    out.push(Mod::Random);
                }
                if mods.contains(LegacyMods::MIRROR) {
                    out.push(Mod::Mirror);
                }
            }
        }

        out
    }

    fn create_difficulty_calculator(&self) -> Box<dyn DifficultyCalculator> {
        Box::new(StrainCalculator::for_ruleset(self.kind))
    }
}

/// Fixed table resolving wire ruleset ids 0..=3.
#[derive(Clone)]
pub struct RulesetTable {
    slots: [Arc<dyn Ruleset>; 4],
}

impl RulesetTable {
    pub fn builtin() -> Self {
        Self {
            slots: RulesetKind::ALL.map(|k| Arc::new(BuiltinRuleset::new(k)) as Arc<dyn Ruleset>),
        }
    }

    /// Replace the implementation behind one id.
    pub fn with_ruleset(mut self, ruleset: Arc<dyn Ruleset>) -> Self {
        let idx = ruleset.kind().id() as usize;
        self.slots[idx] = ruleset;
        self
    }

    pub fn resolve(&self, id: i32) -> Result<Arc<dyn Ruleset>, CalculationError> {
        let kind = RulesetKind::from_id(id).ok_or(CalculationError::InvalidRulesetId(id))?;
        Ok(Arc::clone(&self.slots[kind.id() as usize]))
    }
}

impl Default for RulesetTable {
    fn default() -> Self {
        Self::builtin()
    }
}
