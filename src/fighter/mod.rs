//! Fighter entity: physics, animation and combat state

pub mod animation;
pub mod intent;
pub mod state;

pub use animation::{Action, AnimationController, ClipTable, Completion};
pub use intent::{
    AttackKind, FighterView, HumanController, Intent, IntentContext, IntentSource,
};
pub use state::{Fighter, FighterSpec, MAX_HEALTH};
