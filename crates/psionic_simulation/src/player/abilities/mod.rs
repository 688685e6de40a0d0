//! Player abilities: timed special-move / special-ability sequences
//!
//! Архитектура:
//! - AbilityController — один слот AbilitySequence на игрока (новый input пока
//!   слот занят потребляется и игнорируется, не ставится в очередь)
//! - PlayerClass + AbilityBehavior — какие sequences умеет класс
//! - AbilitySequence — continuation: kind + phase + AbilityTimer<AbilityStep>
//!
//! Sequence подвешена только на своём таймере. Когда таймер истёк, шаг
//! исполняется против live мира; если цель исчезла — sequence тихо бросается.

use bevy::prelude::*;
use std::time::Duration;

pub mod psionic;

#[cfg(test)]
mod abilities_tests;

pub use psionic::Psionic;

use crate::combat::{ActorFlung, FlingDirection, Flingable};
use crate::components::{
    AnimationDriver, Animator, CameraBasis, CapsuleCollider, CapsuleShape, Dead, Health,
    LockOnPoint, LockOnTarget, MainCamera, Player, PlayerInput,
};
use crate::perception::{LayerMask, PerceptionService, SpatialWorld};
use crate::player::DashStarted;
use crate::timer::AbilityTimer;

/// Тип ability sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
pub enum AbilityKind {
    Dash,
    Pull,
    Push,
}

/// Фаза sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Reflect)]
pub enum AbilityPhase {
    /// Root motion dash, капсула сжата
    Dashing,
    /// Анимация каста, эффект ещё не применён
    Windup,
}

/// Continuation token: что сделать, когда таймер sequence истечёт
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AbilityStep {
    /// Выключить root motion, вернуть капсулу к размерам на старте dash
    FinishDash { restore: CapsuleShape },
    /// Притянуть текущую lock-on цель (перечитывается в момент release)
    ReleasePull,
    /// Оттолкнуть всех flingable впереди игрока
    ReleasePush { radius: f32 },
}

/// Активная ability sequence
#[derive(Debug, Clone)]
pub struct AbilitySequence {
    pub kind: AbilityKind,
    pub phase: AbilityPhase,
    /// Горизонтальное направление (dash direction / facing на старте)
    pub direction: Vec3,
    timer: AbilityTimer<AbilityStep>,
}

impl AbilitySequence {
    pub fn new(
        kind: AbilityKind,
        phase: AbilityPhase,
        direction: Vec3,
        delay: Duration,
        step: AbilityStep,
    ) -> Self {
        let mut timer = AbilityTimer::new();
        timer.arm(delay, step);
        Self {
            kind,
            phase,
            direction,
            timer,
        }
    }

    /// Сколько simulated time прошло с начала sequence
    pub fn elapsed(&self) -> Duration {
        self.timer.elapsed()
    }

    pub fn remaining(&self) -> Duration {
        self.timer.remaining()
    }

    pub fn pending_step(&self) -> Option<&AbilityStep> {
        self.timer.payload()
    }

    /// Продвигает sequence, возвращает шаг в tick срабатывания
    pub fn tick(&mut self, delta: Duration) -> Option<AbilityStep> {
        self.timer.tick(delta)
    }
}

/// Всё, что нужно классу для старта sequence
pub struct AbilityContext<'a> {
    pub transform: &'a Transform,
    pub input: &'a PlayerInput,
    pub camera: CameraBasis,
    pub lock_on: Option<Entity>,
    pub animator: &'a mut Animator,
    pub collider: &'a mut CapsuleCollider,
}

/// Способности класса (вместо override'ов в наследниках)
pub trait AbilityBehavior {
    /// Special move (edge). None — у класса нет такого движения.
    fn special_move(&self, ctx: &mut AbilityContext) -> Option<AbilitySequence>;

    /// Special ability (edge). None — у класса нет такой способности.
    fn special_ability(&self, ctx: &mut AbilityContext) -> Option<AbilitySequence>;
}

/// Класс игрока
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Reflect)]
pub enum PlayerClass {
    /// Без способностей
    #[default]
    Unclassed,
    Psionic,
}

impl AbilityBehavior for PlayerClass {
    fn special_move(&self, ctx: &mut AbilityContext) -> Option<AbilitySequence> {
        match self {
            PlayerClass::Unclassed => None,
            PlayerClass::Psionic => Psionic.special_move(ctx),
        }
    }

    fn special_ability(&self, ctx: &mut AbilityContext) -> Option<AbilitySequence> {
        match self {
            PlayerClass::Unclassed => None,
            PlayerClass::Psionic => Psionic.special_ability(ctx),
        }
    }
}

/// Ability слот игрока
#[derive(Component, Debug, Clone, Default)]
pub struct AbilityController {
    pub class: PlayerClass,
    sequence: Option<AbilitySequence>,
}

impl AbilityController {
    pub fn new(class: PlayerClass) -> Self {
        Self {
            class,
            sequence: None,
        }
    }

    pub fn is_busy(&self) -> bool {
        self.sequence.is_some()
    }

    pub fn sequence(&self) -> Option<&AbilitySequence> {
        self.sequence.as_ref()
    }

    /// Занимает слот. false если слот уже занят (sequence не стартует).
    pub fn start(&mut self, sequence: AbilitySequence) -> bool {
        if self.is_busy() {
            return false;
        }
        self.sequence = Some(sequence);
        true
    }

    /// Отменяет активную sequence (pending шаг не исполнится)
    pub fn cancel(&mut self) -> Option<AbilityKind> {
        self.sequence.take().map(|sequence| sequence.kind)
    }

    /// Продвигает активную sequence. Когда шаг сработал — слот освобождается.
    pub fn tick(&mut self, delta: Duration) -> Option<(AbilityKind, AbilityStep)> {
        let sequence = self.sequence.as_mut()?;
        let step = sequence.tick(delta)?;
        let kind = sequence.kind;
        self.sequence = None;
        Some((kind, step))
    }
}

/// Lock-on anchor → актор-владелец (anchor без LockOnPoint — сам актор)
pub fn resolve_lock_on_owner(anchor: Entity, anchors: &Query<&LockOnPoint>) -> Entity {
    anchors.get(anchor).map(|point| point.owner).unwrap_or(anchor)
}

/// Актор "впереди" источника (горизонтальная проекция на forward ≥ 0)
pub fn is_ahead(source: Vec3, forward: Vec3, position: Vec3) -> bool {
    let mut offset = position - source;
    offset.y = 0.0;
    let mut forward = forward;
    forward.y = 0.0;
    offset.dot(forward) >= 0.0
}

/// Система: edge-triggered старт sequences
///
/// Флаги input всегда сбрасываются при потреблении, даже если слот занят
/// (одно нажатие = максимум одна sequence, без очереди).
#[allow(clippy::type_complexity)]
pub fn handle_ability_input(
    lock_on: Res<LockOnTarget>,
    cameras: Query<&Transform, (With<MainCamera>, Without<Player>)>,
    mut players: Query<
        (
            Entity,
            &Transform,
            &mut PlayerInput,
            &mut AbilityController,
            &mut Animator,
            &mut CapsuleCollider,
        ),
        (With<Player>, Without<Dead>),
    >,
    mut dash_events: EventWriter<DashStarted>,
) {
    let camera = cameras.iter().next().map(CameraBasis::from_transform);

    for (entity, transform, mut input, mut controller, mut animator, mut collider) in
        players.iter_mut()
    {
        if !input.special_move && !input.special_ability {
            continue;
        }

        let special_move = std::mem::take(&mut input.special_move);
        let special_ability = std::mem::take(&mut input.special_ability);
        let input_snapshot = *input;
        let class = controller.class;

        let mut ctx = AbilityContext {
            transform,
            input: &input_snapshot,
            camera: camera.unwrap_or_else(|| CameraBasis::from_transform(transform)),
            lock_on: lock_on.0,
            animator: &mut animator,
            collider: &mut collider,
        };

        if special_move {
            if controller.is_busy() {
                crate::log(&format!("Player {:?}: special move ignored (busy)", entity));
            } else if let Some(sequence) = class.special_move(&mut ctx) {
                dash_events.write(DashStarted {
                    actor: entity,
                    direction: sequence.direction,
                });
                crate::log(&format!(
                    "💨 Player {:?}: {:?} started (dir {:?})",
                    entity, sequence.kind, sequence.direction
                ));
                controller.start(sequence);
            }
        }

        if special_ability {
            if controller.is_busy() {
                crate::log(&format!("Player {:?}: special ability ignored (busy)", entity));
            } else if let Some(sequence) = class.special_ability(&mut ctx) {
                crate::log(&format!("🌀 Player {:?}: {:?} started", entity, sequence.kind));
                controller.start(sequence);
            }
        }
    }
}

/// Система: продвижение sequences + исполнение сработавших шагов
#[allow(clippy::type_complexity)]
pub fn advance_ability_sequences(
    time: Res<Time>,
    lock_on: Res<LockOnTarget>,
    spatial: Res<SpatialWorld>,
    anchors: Query<&LockOnPoint>,
    mut players: Query<
        (
            Entity,
            &Transform,
            &mut AbilityController,
            &mut Animator,
            &mut CapsuleCollider,
        ),
        (With<Player>, Without<Dead>),
    >,
    mut flingables: Query<(&Transform, &mut Flingable, Option<&Health>, Has<Dead>), Without<Player>>,
    mut flung_events: EventWriter<ActorFlung>,
) {
    let delta = time.delta();

    for (entity, transform, mut controller, mut animator, mut collider) in players.iter_mut() {
        let Some((kind, step)) = controller.tick(delta) else {
            continue;
        };

        let source = transform.translation;
        let forward = transform.forward().as_vec3();

        match step {
            AbilityStep::FinishDash { restore } => {
                animator.apply_root_motion(false);
                collider.set_shape(restore);
                crate::log(&format!("Player {:?}: dash finished", entity));
            }
            AbilityStep::ReleasePull => {
                let Some(anchor) = lock_on.0 else {
                    crate::log(&format!("Player {:?}: pull abandoned (lock-on cleared)", entity));
                    continue;
                };
                let target = resolve_lock_on_owner(anchor, &anchors);

                let Ok((target_transform, mut flingable, health, is_dead)) = flingables.get_mut(target)
                else {
                    crate::log(&format!("Player {:?}: pull abandoned (target {:?} gone)", entity, target));
                    continue;
                };
                if is_dead || health.is_some_and(|h| !h.is_alive()) {
                    continue;
                }

                let impulse = flingable.fling(
                    FlingDirection::Forwards,
                    source,
                    forward,
                    target_transform.translation,
                );
                flung_events.write(ActorFlung {
                    target,
                    source: entity,
                    direction: FlingDirection::Forwards,
                    impulse,
                });
            }
            AbilityStep::ReleasePush { radius } => {
                let hits = spatial.sphere_overlap(source, radius, LayerMask::ALL);
                let mut flung = 0;

                for target in hits {
                    if target == entity {
                        continue;
                    }
                    let Ok((target_transform, mut flingable, health, is_dead)) =
                        flingables.get_mut(target)
                    else {
                        continue;
                    };
                    if is_dead || health.is_some_and(|h| !h.is_alive()) {
                        continue;
                    }
                    if !is_ahead(source, forward, target_transform.translation) {
                        continue;
                    }

                    let impulse = flingable.fling(
                        FlingDirection::Backwards,
                        source,
                        forward,
                        target_transform.translation,
                    );
                    flung_events.write(ActorFlung {
                        target,
                        source: entity,
                        direction: FlingDirection::Backwards,
                        impulse,
                    });
                    flung += 1;
                }

                crate::log(&format!("Player {:?}: {:?} flung {} actors", entity, kind, flung));
            }
        }
    }
}
