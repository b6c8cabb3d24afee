//! Player-triggered combat: active skills.

pub mod skills;

pub use skills::{cast_skill, SkillCast, SkillEffect};
