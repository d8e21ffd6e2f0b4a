use glam::Vec2;
use std::collections::VecDeque;

/// Source of per-tick player input.
///
/// `take_jump` is edge-triggered: it reports a press once, on the tick it
/// happened.
pub trait InputSampler {
    /// Move intent, each axis nominally in `[-1, 1]`. `y` is forward.
    fn sample_move(&mut self) -> Vec2;
    /// Look delta since the previous tick.
    fn sample_look(&mut self) -> Vec2;
    fn take_jump(&mut self) -> bool;

    /// Sample everything for one tick: move, then look, then jump.
    fn sample(&mut self) -> InputFrame {
        InputFrame {
            movement: self.sample_move(),
            look: self.sample_look(),
            jump: self.take_jump(),
        }
    }
}

impl<T: InputSampler + ?Sized> InputSampler for Box<T> {
    fn sample_move(&mut self) -> Vec2 {
        (**self).sample_move()
    }

    fn sample_look(&mut self) -> Vec2 {
        (**self).sample_look()
    }

    fn take_jump(&mut self) -> bool {
        (**self).take_jump()
    }

    fn sample(&mut self) -> InputFrame {
        (**self).sample()
    }
}

/// One tick's worth of input.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct InputFrame {
    pub movement: Vec2,
    pub look: Vec2,
    pub jump: bool,
}

impl InputFrame {
    pub fn walk(movement: Vec2) -> Self {
        Self {
            movement,
            ..Self::default()
        }
    }

    pub fn look(look: Vec2) -> Self {
        Self {
            look,
            ..Self::default()
        }
    }

    pub fn jump() -> Self {
        Self {
            jump: true,
            ..Self::default()
        }
    }
}

/// Which input fields had to be repaired.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Sanitized {
    pub movement: bool,
    pub look: bool,
}

impl Sanitized {
    pub fn any(&self) -> bool {
        self.movement || self.look
    }
}

/// Replace non-finite components with zero and clamp move axes to `[-1, 1]`.
pub fn sanitize(frame: InputFrame) -> (InputFrame, Sanitized) {
    let (movement, bad_move) = finite_or_zero(frame.movement);
    let (look, bad_look) = finite_or_zero(frame.look);
    let movement = movement.clamp(Vec2::NEG_ONE, Vec2::ONE);

    (
        InputFrame {
            movement,
            look,
            jump: frame.jump,
        },
        Sanitized {
            movement: bad_move,
            look: bad_look,
        },
    )
}

fn finite_or_zero(v: Vec2) -> (Vec2, bool) {
    let fix = |c: f32| if c.is_finite() { c } else { 0.0 };
    let fixed = Vec2::new(fix(v.x), fix(v.y));
    (fixed, !v.is_finite())
}

/// Turns a held button into press edges.
#[derive(Debug, Clone, Copy, Default)]
pub struct JumpEdge {
    was_down: bool,
}

impl JumpEdge {
    /// Feed the current button level; true only on the tick it goes down.
    pub fn update(&mut self, down: bool) -> bool {
        let pressed = down && !self.was_down;
        self.was_down = down;
        pressed
    }
}

/// Replays a queue of frames, one per `sample` call, then idles.
///
/// A scripted frame's `jump` is the button level. It goes through a
/// [`JumpEdge`], so a jump held across several frames fires once. The
/// per-axis methods read the most recently sampled frame.
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    frames: VecDeque<InputFrame>,
    current: InputFrame,
    jump_edge: JumpEdge,
}

impl ScriptedInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, frame: InputFrame) -> &mut Self {
        self.frames.push_back(frame);
        self
    }

    pub fn hold(&mut self, frame: InputFrame, ticks: usize) -> &mut Self {
        self.frames.extend(std::iter::repeat(frame).take(ticks));
        self
    }

    pub fn remaining(&self) -> usize {
        self.frames.len()
    }
}

impl InputSampler for ScriptedInput {
    fn sample_move(&mut self) -> Vec2 {
        self.current.movement
    }

    fn sample_look(&mut self) -> Vec2 {
        self.current.look
    }

    fn take_jump(&mut self) -> bool {
        std::mem::take(&mut self.current.jump)
    }

    fn sample(&mut self) -> InputFrame {
        let mut frame = self.frames.pop_front().unwrap_or_default();
        frame.jump = self.jump_edge.update(frame.jump);
        self.current = frame;
        self.current.jump = false;
        frame
    }
}
