//! Player control компоненты: маркеры, input snapshot, lock-on

use bevy::prelude::*;

/// Marker component для player-controlled entity
///
/// Акторы БЕЗ этого компонента управляются AI systems.
/// Input/ability системы используют `With<Player>` filter.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Player;

/// Marker: точка, которую преследуют и в которую целятся враги
///
/// Обычно висит на самом игроке. Если маркера нет — враги пропускают
/// Chase/Attack в этом tick'е и ищут его снова в следующем.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct PlayerTarget;

/// Input snapshot игрока (пишется движком каждый tick)
///
/// `special_move` / `special_ability` — edge флаги: ability controller
/// сбрасывает их в false при потреблении (одно нажатие = одна sequence).
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Reflect)]
#[reflect(Component)]
pub struct PlayerInput {
    pub vertical: f32,
    pub horizontal: f32,
    pub special_move: bool,
    pub special_ability: bool,
    pub aim: bool,
}

impl PlayerInput {
    pub fn has_move_input(&self) -> bool {
        self.vertical != 0.0 || self.horizontal != 0.0
    }
}

/// Текущая lock-on цель камеры (None = не залочены)
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq)]
pub struct LockOnTarget(pub Option<Entity>);

/// Lock-on anchor: точка прицеливания, принадлежащая актору
///
/// Lock-on обычно указывает на anchor (голова/грудь), а эффект применяется к owner.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct LockOnPoint {
    pub owner: Entity,
}
