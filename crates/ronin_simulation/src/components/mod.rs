//! ECS Components для игровых entity
//!
//! Организация по доменам:
//! - actor: базовые характеристики (Actor, Health)
//! - movement: navigation handle (NavAgent)
//! - animation: animation handle (AnimationDriver)
//! - combat: hit/hurt surfaces (HitSurfaces)
//!
//! Каждый handle реализует capability trait из `ai::collaborators`.

pub mod actor;
pub mod animation;
pub mod combat;
pub mod movement;

// Re-exports для удобного импорта
pub use actor::*;
pub use animation::*;
pub use combat::*;
pub use movement::*;
