//! Animation компоненты: AnimationDriver capability + Animator intent
//!
//! Blending, state machine анимаций, root motion — в движке.
//! ECS видит только то, что влияет на gameplay: layer weights (aim readiness),
//! bool/float параметры и запросы на проигрывание.

use bevy::prelude::*;
use std::collections::HashMap;

/// Параметр "сколько движемся" (0 = стоим, 0.5 = шаг, 1 = бег)
pub const MOVING_AMOUNT: &str = "MovingAmount";
pub const IS_INTERACTING: &str = "isInteracting";
pub const IS_JUMPING: &str = "isJumping";
pub const IS_GROUNDED: &str = "isGrounded";

/// Capability: управление анимацией актора
pub trait AnimationDriver {
    fn play(&mut self, name: &str, root_motion: bool);
    fn cross_fade(&mut self, name: &str, blend_time: f32);
    fn layer_weight(&self, layer: usize) -> f32;
    fn set_layer_weight(&mut self, layer: usize, weight: f32);
    fn get_bool(&self, flag: &str) -> bool;
    fn set_bool(&mut self, flag: &str, value: bool);
    fn set_float(&mut self, param: &str, value: f32);
    fn apply_root_motion(&mut self, enabled: bool);
}

/// Запрос на проигрывание анимации (ECS → движок)
#[derive(Debug, Clone, PartialEq)]
pub enum AnimationRequest {
    Play { name: String, root_motion: bool },
    CrossFade { name: String, blend_time: f32 },
}

/// Intent-компонент аниматора
///
/// `requests` — запросы текущего tick'а. Очищаются в начале следующего tick'а
/// (движок забирает их после шага симуляции).
#[derive(Component, Debug, Clone, Default)]
pub struct Animator {
    layer_weights: Vec<f32>,
    floats: HashMap<String, f32>,
    bools: HashMap<String, bool>,
    root_motion: bool,
    requests: Vec<AnimationRequest>,
}

impl Animator {
    pub fn with_layers(count: usize) -> Self {
        Self {
            layer_weights: vec![0.0; count],
            ..Default::default()
        }
    }

    pub fn root_motion(&self) -> bool {
        self.root_motion
    }

    pub fn get_float(&self, param: &str) -> Option<f32> {
        self.floats.get(param).copied()
    }

    pub fn requests(&self) -> &[AnimationRequest] {
        &self.requests
    }

    pub fn clear_requests(&mut self) {
        self.requests.clear();
    }

    /// Последний запрошенный клип (по имени)
    pub fn last_requested(&self) -> Option<&str> {
        self.requests.last().map(|request| match request {
            AnimationRequest::Play { name, .. } | AnimationRequest::CrossFade { name, .. } => {
                name.as_str()
            }
        })
    }
}

impl AnimationDriver for Animator {
    fn play(&mut self, name: &str, root_motion: bool) {
        self.requests.push(AnimationRequest::Play {
            name: name.to_string(),
            root_motion,
        });
    }

    fn cross_fade(&mut self, name: &str, blend_time: f32) {
        self.requests.push(AnimationRequest::CrossFade {
            name: name.to_string(),
            blend_time,
        });
    }

    fn layer_weight(&self, layer: usize) -> f32 {
        self.layer_weights.get(layer).copied().unwrap_or(0.0)
    }

    fn set_layer_weight(&mut self, layer: usize, weight: f32) {
        if layer >= self.layer_weights.len() {
            self.layer_weights.resize(layer + 1, 0.0);
        }
        self.layer_weights[layer] = weight.clamp(0.0, 1.0);
    }

    fn get_bool(&self, flag: &str) -> bool {
        self.bools.get(flag).copied().unwrap_or(false)
    }

    fn set_bool(&mut self, flag: &str, value: bool) {
        self.bools.insert(flag.to_string(), value);
    }

    fn set_float(&mut self, param: &str, value: f32) {
        self.floats.insert(param.to_string(), value);
    }

    fn apply_root_motion(&mut self, enabled: bool) {
        self.root_motion = enabled;
    }
}

/// Система: очистка запросов прошлого tick'а
pub fn clear_animation_requests(mut animators: Query<&mut Animator>) {
    for mut animator in animators.iter_mut() {
        if !animator.requests.is_empty() {
            animator.clear_requests();
        }
    }
}
