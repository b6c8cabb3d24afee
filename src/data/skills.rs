//! Active skill definitions.

/// Static description of one skill slot.
#[derive(Debug, Clone, PartialEq)]
pub struct SkillDef {
    pub name: &'static str,
    pub description: &'static str,
    /// SP cost at level 1.
    pub base_sp: u32,
    pub cooldown_secs: u32,
    /// Buff duration at level 1; 0 for instant skills.
    pub base_duration_secs: u32,
    /// Whether the duration grows by one second per level above 1.
    pub duration_scales: bool,
}

/// Slots are stable: the damage engine reads timers by index.
pub fn all_skills() -> Vec<SkillDef> {
    vec![
        SkillDef {
            name: "Heavy Strike",
            description: "Instantly strike for 100x player damage, +1x per level",
            base_sp: 5,
            cooldown_secs: 90,
            base_duration_secs: 0,
            duration_scales: false,
        },
        SkillDef {
            name: "Critical",
            description: "0.5% critical chance per level while active",
            base_sp: 8,
            cooldown_secs: 90,
            base_duration_secs: 30,
            duration_scales: false,
        },
        SkillDef {
            name: "Rage",
            description: "2x damage, +0.5x per level while active",
            base_sp: 10,
            cooldown_secs: 90,
            base_duration_secs: 30,
            duration_scales: true,
        },
        SkillDef {
            name: "Shadow Clone",
            description: "Doubles all damage while active",
            base_sp: 12,
            cooldown_secs: 90,
            base_duration_secs: 30,
            duration_scales: true,
        },
    ]
}

impl SkillDef {
    pub fn is_instant(&self) -> bool {
        self.base_duration_secs == 0
    }

    /// Buff duration at `level` (treated as at least 1).
    pub fn duration_at(&self, level: u32) -> u32 {
        if self.duration_scales {
            self.base_duration_secs + level.max(1) - 1
        } else {
            self.base_duration_secs
        }
    }
}
