//! Job trees for the two helper series.
//!
//! A tree is ordered camps → groups → four promotion tiers. Tier entries
//! are either a single job or a list of mutually exclusive branches; lists
//! at tiers 3 and 4 line up positionally with the tier-2 list.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// The universe a helper belongs to. Fixed at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Series {
    #[serde(rename = "MAPLE")]
    Maple,
    #[serde(rename = "RO")]
    Ro,
}

impl Series {
    pub const ALL: [Series; 2] = [Series::Maple, Series::Ro];

    pub fn name(&self) -> &'static str {
        match self {
            Series::Maple => "MAPLE",
            Series::Ro => "RO",
        }
    }

    /// Parses the persisted tag.
    pub fn from_tag(tag: &str) -> Option<Series> {
        match tag {
            "MAPLE" => Some(Series::Maple),
            "RO" => Some(Series::Ro),
            _ => None,
        }
    }
}

/// One tier of a group's promotion path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobTierEntry {
    Single(String),
    Branching(Vec<String>),
}

impl JobTierEntry {
    /// Number of terminal branches this entry contributes.
    pub fn width(&self) -> usize {
        match self {
            JobTierEntry::Single(_) => 1,
            JobTierEntry::Branching(names) => names.len(),
        }
    }

    pub fn names(&self) -> Vec<&str> {
        match self {
            JobTierEntry::Single(name) => vec![name.as_str()],
            JobTierEntry::Branching(names) => names.iter().map(String::as_str).collect(),
        }
    }

    /// Position of `job` within a branching entry. A single entry always
    /// reports position 0 so succession from it stays on the first branch.
    pub fn position_of(&self, job: &str) -> Option<usize> {
        match self {
            JobTierEntry::Single(_) => Some(0),
            JobTierEntry::Branching(names) => names.iter().position(|n| n == job),
        }
    }

    /// The job at `index`. A single entry answers for every index.
    pub fn at(&self, index: usize) -> Option<&str> {
        match self {
            JobTierEntry::Single(name) => Some(name.as_str()),
            JobTierEntry::Branching(names) => names.get(index).map(String::as_str),
        }
    }

    pub fn is_branching(&self) -> bool {
        matches!(self, JobTierEntry::Branching(_))
    }
}

/// Second-level branch inside a camp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobGroup {
    pub name: String,
    pub tiers: [Option<JobTierEntry>; 4],
}

impl JobGroup {
    /// A group whose tiers 2-4 split into aligned branches.
    pub fn branching(
        name: &str,
        job1: &str,
        tier2: &[&str],
        tier3: &[&str],
        tier4: &[&str],
    ) -> Self {
        let list = |names: &[&str]| {
            Some(JobTierEntry::Branching(names.iter().map(|n| n.to_string()).collect()))
        };
        Self {
            name: name.to_string(),
            tiers: [
                Some(JobTierEntry::Single(job1.to_string())),
                list(tier2),
                list(tier3),
                list(tier4),
            ],
        }
    }

    /// A group with exactly one job per tier.
    pub fn chain(name: &str, jobs: [&str; 4]) -> Self {
        Self {
            name: name.to_string(),
            tiers: jobs.map(|j| Some(JobTierEntry::Single(j.to_string()))),
        }
    }

    /// Entry for `tier` (1-4).
    pub fn tier(&self, tier: u8) -> Option<&JobTierEntry> {
        match tier {
            1..=4 => self.tiers[usize::from(tier - 1)].as_ref(),
            _ => None,
        }
    }

    pub fn first_job(&self) -> Option<&str> {
        self.tier(1).and_then(|entry| entry.at(0))
    }
}

/// Top-level branch of a series.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobCamp {
    pub name: String,
    pub groups: Vec<JobGroup>,
}

impl JobCamp {
    pub fn new(name: &str, groups: Vec<JobGroup>) -> Self {
        Self {
            name: name.to_string(),
            groups,
        }
    }
}

/// Complete promotion graph for one series.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JobTree {
    pub camps: Vec<JobCamp>,
}

impl JobTree {
    pub fn new(camps: Vec<JobCamp>) -> Self {
        Self { camps }
    }

    pub fn camp(&self, camp: &str) -> Option<&JobCamp> {
        self.camps.iter().find(|c| c.name == camp)
    }

    pub fn group(&self, camp: &str, group: &str) -> Option<&JobGroup> {
        self.camp(camp)?.groups.iter().find(|g| g.name == group)
    }

    pub fn tier(&self, camp: &str, group: &str, tier: u8) -> Option<&JobTierEntry> {
        self.group(camp, group)?.tier(tier)
    }

    /// Number of distinct terminal branches: the sum of tier-4 widths.
    pub fn branch_count(&self) -> usize {
        self.camps
            .iter()
            .flat_map(|c| c.groups.iter())
            .filter_map(|g| g.tier(4))
            .map(JobTierEntry::width)
            .sum()
    }

    /// Every tier-4 job name in the tree.
    pub fn terminal_jobs(&self) -> BTreeSet<&str> {
        self.camps
            .iter()
            .flat_map(|c| c.groups.iter())
            .filter_map(|g| g.tier(4))
            .flat_map(|entry| entry.names())
            .collect()
    }
}

pub fn maple_tree() -> JobTree {
    JobTree::new(vec![
        JobCamp::new(
            "Explorers",
            vec![
                JobGroup::branching(
                    "Warrior",
                    "Swordman",
                    &["Fighter", "Page", "Spearman"],
                    &["Crusader", "White Knight", "Dragon Knight"],
                    &["Hero", "Paladin", "Dark Knight"],
                ),
                JobGroup::branching(
                    "Magician",
                    "Magician",
                    &["Wizard (Fire, Poison)", "Wizard (Ice, Lightning)", "Cleric"],
                    &["Mage (Fire, Poison)", "Mage (Ice, Lightning)", "Priest"],
                    &["Arch Mage (Fire, Poison)", "Arch Mage (Ice, Lightning)", "Bishop"],
                ),
                JobGroup::branching(
                    "Bowman",
                    "Archer",
                    &["Hunter", "Crossbowman"],
                    &["Ranger", "Sniper"],
                    &["Bowmaster", "Marksman"],
                ),
                JobGroup::branching(
                    "Thief",
                    "Rogue",
                    &["Assassin", "Bandit"],
                    &["Hermit", "Chief Bandit"],
                    &["Night Lord", "Shadower"],
                ),
                JobGroup::branching(
                    "Pirate",
                    "Pirate",
                    &["Brawler", "Gunslinger"],
                    &["Marauder", "Outlaw"],
                    &["Buccaneer", "Corsair"],
                ),
            ],
        ),
        JobCamp::new(
            "Cygnus Knights",
            vec![
                JobGroup::chain(
                    "Dawn Warrior",
                    ["Dawn Warrior", "Dawn Warrior II", "Dawn Warrior III", "Dawn Warrior IV"],
                ),
                JobGroup::chain(
                    "Blaze Wizard",
                    ["Blaze Wizard", "Blaze Wizard II", "Blaze Wizard III", "Blaze Wizard IV"],
                ),
                JobGroup::chain(
                    "Wind Archer",
                    ["Wind Archer", "Wind Archer II", "Wind Archer III", "Wind Archer IV"],
                ),
                JobGroup::chain(
                    "Night Walker",
                    ["Night Walker", "Night Walker II", "Night Walker III", "Night Walker IV"],
                ),
                JobGroup::chain(
                    "Thunder Breaker",
                    [
                        "Thunder Breaker",
                        "Thunder Breaker II",
                        "Thunder Breaker III",
                        "Thunder Breaker IV",
                    ],
                ),
            ],
        ),
    ])
}

pub fn ro_tree() -> JobTree {
    JobTree::new(vec![
        JobCamp::new(
            "Rune-Midgarts",
            vec![
                JobGroup::branching(
                    "Swordman",
                    "Swordman",
                    &["Knight", "Crusader"],
                    &["Lord Knight", "Paladin"],
                    &["Rune Knight", "Royal Guard"],
                ),
                JobGroup::branching(
                    "Mage",
                    "Mage",
                    &["Wizard", "Sage"],
                    &["High Wizard", "Scholar"],
                    &["Warlock", "Sorcerer"],
                ),
                JobGroup::branching(
                    "Archer",
                    "Archer",
                    &["Hunter", "Bard"],
                    &["Sniper", "Minstrel"],
                    &["Ranger", "Maestro"],
                ),
                JobGroup::branching(
                    "Acolyte",
                    "Acolyte",
                    &["Priest", "Monk"],
                    &["High Priest", "Champion"],
                    &["Arch Bishop", "Sura"],
                ),
                JobGroup::branching(
                    "Merchant",
                    "Merchant",
                    &["Blacksmith", "Alchemist"],
                    &["Whitesmith", "Biochemist"],
                    &["Mechanic", "Geneticist"],
                ),
                JobGroup::branching(
                    "Thief",
                    "Thief",
                    &["Assassin", "Rogue"],
                    &["Assassin Cross", "Stalker"],
                    &["Guillotine Cross", "Shadow Chaser"],
                ),
            ],
        ),
        JobCamp::new(
            "Expanded",
            vec![
                JobGroup::branching(
                    "Taekwon",
                    "Taekwon Kid",
                    &["Star Gladiator", "Soul Linker"],
                    &["Star Emperor", "Soul Reaper"],
                    &["Sky Emperor", "Soul Ascetic"],
                ),
                JobGroup::chain(
                    "Gunslinger",
                    ["Gunslinger", "Rebellion", "Night Watch", "Desperado"],
                ),
            ],
        ),
    ])
}
