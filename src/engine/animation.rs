// Sprite animation playback with controller-style parameters

use std::collections::HashMap;

/// A single animation clip
#[derive(Debug, Clone)]
pub struct AnimationClip {
    /// Name of the animation (e.g., "idle", "walk", "death")
    pub name: String,
    /// Number of frames in the animation
    pub frame_count: usize,
    /// Duration of each frame in seconds
    pub frame_duration: f32,
    /// Whether the animation loops
    pub looping: bool,
}

impl AnimationClip {
    /// Create a new animation clip
    pub fn new(name: &str, frame_count: usize, fps: f32, looping: bool) -> Self {
        Self {
            name: name.to_string(),
            frame_count: frame_count.max(1),
            frame_duration: 1.0 / fps,
            looping,
        }
    }

    /// Create a looping animation
    pub fn looping(name: &str, frame_count: usize, fps: f32) -> Self {
        Self::new(name, frame_count, fps, true)
    }

    /// Create a one-shot animation (plays once, then reports that it finished)
    pub fn one_shot(name: &str, frame_count: usize, fps: f32) -> Self {
        Self::new(name, frame_count, fps, false)
    }

    /// One-shot clip lasting exactly `seconds`
    pub fn timed(name: &str, seconds: f32) -> Self {
        let frame_count = 10;
        Self::one_shot(name, frame_count, frame_count as f32 / seconds.max(0.001))
    }

    /// Get the total duration of one animation cycle
    pub fn total_duration(&self) -> f32 {
        self.frame_count as f32 * self.frame_duration
    }
}

/// Value of an animator parameter
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AnimParam {
    Bool(bool),
    Float(f32),
    Int(i32),
}

/// Plays clips and stores the parameters game code feeds to it each frame
#[derive(Debug, Default)]
pub struct Animator {
    clips: HashMap<String, AnimationClip>,
    params: HashMap<&'static str, AnimParam>,
    current: String,
    current_frame: usize,
    frame_timer: f32,
    playing: bool,
    flip_horizontal: bool,
}

impl Animator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an animator from a clip list, starting on the first clip
    pub fn with_clips(clips: Vec<AnimationClip>) -> Self {
        let mut animator = Self::new();
        let first = clips.first().map(|clip| clip.name.clone());
        for clip in clips {
            animator.add_clip(clip);
        }
        if let Some(name) = first {
            animator.play(&name);
        }
        animator
    }

    pub fn add_clip(&mut self, clip: AnimationClip) {
        self.clips.insert(clip.name.clone(), clip);
    }

    pub fn has_clip(&self, name: &str) -> bool {
        self.clips.contains_key(name)
    }

    /// Play an animation by name (no-op if it is already the current one)
    pub fn play(&mut self, name: &str) {
        if self.current != name {
            self.play_from_start(name);
        }
    }

    /// Play an animation from the beginning, even if it's the same
    pub fn play_from_start(&mut self, name: &str) {
        self.current = name.to_string();
        self.current_frame = 0;
        self.frame_timer = 0.0;
        self.playing = true;
    }

    pub fn set_bool(&mut self, name: &'static str, value: bool) {
        self.params.insert(name, AnimParam::Bool(value));
    }

    pub fn set_float(&mut self, name: &'static str, value: f32) {
        self.params.insert(name, AnimParam::Float(value));
    }

    pub fn set_int(&mut self, name: &'static str, value: i32) {
        self.params.insert(name, AnimParam::Int(value));
    }

    pub fn get_bool(&self, name: &str) -> Option<bool> {
        match self.params.get(name) {
            Some(AnimParam::Bool(v)) => Some(*v),
            _ => None,
        }
    }

    pub fn get_float(&self, name: &str) -> Option<f32> {
        match self.params.get(name) {
            Some(AnimParam::Float(v)) => Some(*v),
            _ => None,
        }
    }

    pub fn get_int(&self, name: &str) -> Option<i32> {
        match self.params.get(name) {
            Some(AnimParam::Int(v)) => Some(*v),
            _ => None,
        }
    }

    pub fn set_flip_horizontal(&mut self, flip: bool) {
        self.flip_horizontal = flip;
    }

    pub fn is_flipped_horizontal(&self) -> bool {
        self.flip_horizontal
    }

    /// Advance playback. Returns the name of the one-shot clip that reached
    /// its last frame during this update, if any.
    pub fn update(&mut self, dt: f32) -> Option<String> {
        if !self.playing {
            return None;
        }

        let clip = self.clips.get(&self.current)?;

        self.frame_timer += dt;

        while self.frame_timer >= clip.frame_duration {
            self.frame_timer -= clip.frame_duration;
            self.current_frame += 1;

            if self.current_frame >= clip.frame_count {
                if clip.looping {
                    self.current_frame = 0;
                } else {
                    self.current_frame = clip.frame_count - 1;
                    self.playing = false;
                    return Some(clip.name.clone());
                }
            }
        }

        None
    }

    pub fn current(&self) -> &str {
        &self.current
    }

    pub fn current_frame(&self) -> usize {
        self.current_frame
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Check if the current one-shot animation has finished
    pub fn is_finished(&self) -> bool {
        match self.clips.get(&self.current) {
            Some(clip) => !clip.looping && !self.playing,
            None => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_animation_clip_creation() {
        let clip = AnimationClip::looping("idle", 4, 8.0);
        assert_eq!(clip.name, "idle");
        assert_eq!(clip.frame_count, 4);
        assert_eq!(clip.frame_duration, 0.125);
        assert!(clip.looping);
    }

    #[test]
    fn test_flip_follows_setter() {
        let mut animator = Animator::new();
        assert!(!animator.is_flipped_horizontal());
        animator.set_flip_horizontal(true);
        assert!(animator.is_flipped_horizontal());
    }

    #[test]
    fn test_timed_clip_duration() {
        let clip = AnimationClip::timed("squished", 2.0);
        assert_relative_eq!(clip.total_duration(), 2.0, epsilon = 1e-4);
        assert!(!clip.looping);
    }

    #[test]
    fn test_with_clips_starts_on_first() {
        let animator = Animator::with_clips(vec![
            AnimationClip::looping("walk", 4, 10.0),
            AnimationClip::one_shot("hit", 3, 10.0),
        ]);
        assert_eq!(animator.current(), "walk");
        assert!(animator.has_clip("hit"));
    }

    #[test]
    fn test_looping_never_reports_finish() {
        let mut animator = Animator::with_clips(vec![AnimationClip::looping("walk", 3, 10.0)]);
        assert_eq!(animator.update(0.35), None);
        assert_eq!(animator.current_frame(), 0);
        assert!(animator.is_playing());
    }

    #[test]
    fn test_one_shot_reports_finish_once() {
        let mut animator = Animator::with_clips(vec![AnimationClip::one_shot("death", 3, 10.0)]);

        assert_eq!(animator.update(0.15), None);
        assert_eq!(animator.update(0.2), Some("death".to_string()));
        assert!(animator.is_finished());
        assert_eq!(animator.update(1.0), None);
    }

    #[test]
    fn test_play_from_start_restarts() {
        let mut animator = Animator::with_clips(vec![AnimationClip::one_shot("hit", 2, 10.0)]);
        animator.update(0.5);
        assert!(animator.is_finished());

        animator.play("hit");
        assert!(animator.is_finished(), "play() keeps a finished clip");

        animator.play_from_start("hit");
        assert!(animator.is_playing());
        assert_eq!(animator.current_frame(), 0);
    }

    #[test]
    fn test_parameters() {
        let mut animator = Animator::new();
        animator.set_bool("grounded", true);
        animator.set_float("movement", 0.5);
        animator.set_int("hp", 2);

        assert_eq!(animator.get_bool("grounded"), Some(true));
        assert_eq!(animator.get_float("movement"), Some(0.5));
        assert_eq!(animator.get_int("hp"), Some(2));
        assert_eq!(animator.get_bool("movement"), None);
    }
}
