//! Relic definitions. A relic's index is its persisted identity, so new
//! relics are only ever appended.

#[derive(Debug, Clone, PartialEq)]
pub struct RelicDef {
    pub name: &'static str,
    pub description: &'static str,
}

pub fn all_relics() -> Vec<RelicDef> {
    vec![
        RelicDef {
            name: "Warrior's Emblem",
            description: "+2% damage per level",
        },
        RelicDef {
            name: "Sage's Hourglass",
            description: "+2% damage per level",
        },
        RelicDef {
            name: "Golden Idol",
            description: "+2% damage, +5% coins per level",
        },
        RelicDef {
            name: "Hunter's Quiver",
            description: "+2% damage per level",
        },
        RelicDef {
            name: "Shadow Dagger",
            description: "+2% damage per level",
        },
        RelicDef {
            name: "Pirate's Compass",
            description: "+2% damage per level",
        },
        RelicDef {
            name: "Knight's Banner",
            description: "+2% damage per level",
        },
        RelicDef {
            name: "Alchemist's Flask",
            description: "+2% damage per level",
        },
        RelicDef {
            name: "Merchant's Ledger",
            description: "+2% damage, +4% coins per level",
        },
        RelicDef {
            name: "Star Fragment",
            description: "+2% damage per level",
        },
    ]
}
