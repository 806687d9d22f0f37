//! RNG module - piece selection
//!
//! Every new look-ahead piece is an independent, uniform draw over the 7
//! shapes (no bag). The generator is a small seedable LCG so that a game is
//! fully reproducible from its seed and input sequence.
//!
//! [`ShapeSource`] is the seam for substituting the selection, e.g. with a
//! fixed script in tests.

use crate::types::{Shape, SHAPE_COUNT};

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // LCG formula: (a * state + c) mod m
        // Using Numerical Recipes constants: a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    pub fn next_range(&mut self, max: u32) -> u32 {
        // Low LCG bits have short periods; scale from the high bits instead.
        ((u64::from(self.next_u32()) * u64::from(max)) >> 32) as u32
    }

    /// Current internal state (reseeding with it continues the sequence)
    pub fn state(&self) -> u32 {
        self.state
    }
}

/// Supplies the shape of every newly generated piece
pub trait ShapeSource {
    fn next_shape(&mut self) -> Shape;
}

/// Uniform independent selection over all shapes
#[derive(Debug, Clone)]
pub struct UniformShapes {
    rng: SimpleRng,
}

impl UniformShapes {
    pub fn new(seed: u32) -> Self {
        Self {
            rng: SimpleRng::new(seed),
        }
    }

    /// Current RNG state; a source built from it continues the same sequence
    pub fn state(&self) -> u32 {
        self.rng.state()
    }
}

impl Default for UniformShapes {
    fn default() -> Self {
        Self::new(1)
    }
}

impl ShapeSource for UniformShapes {
    fn next_shape(&mut self) -> Shape {
        let index = self.rng.next_range(SHAPE_COUNT as u32) as usize;
        Shape::ALL[index]
    }
}

/// Replays a fixed sequence of shapes, starting over at the end
#[derive(Debug, Clone)]
pub struct ScriptedShapes {
    script: Vec<Shape>,
    index: usize,
}

impl ScriptedShapes {
    /// Panics on an empty script.
    pub fn new(script: impl Into<Vec<Shape>>) -> Self {
        let script = script.into();
        assert!(!script.is_empty(), "shape script must not be empty");
        Self { script, index: 0 }
    }
}

impl ShapeSource for ScriptedShapes {
    fn next_shape(&mut self) -> Shape {
        let shape = self.script[self.index];
        self.index = (self.index + 1) % self.script.len();
        shape
    }
}

impl<S: ShapeSource + ?Sized> ShapeSource for &mut S {
    fn next_shape(&mut self) -> Shape {
        (**self).next_shape()
    }
}

impl<S: ShapeSource + ?Sized> ShapeSource for Box<S> {
    fn next_shape(&mut self) -> Shape {
        (**self).next_shape()
    }
}
