//! Install bookkeeping for the preview program, independent of the GPU.

use crate::error::RenderError;

/// Sources the current program was (or failed to be) built from.
#[derive(Debug, Clone, PartialEq, Eq)]
struct ProgramKey {
    vertex: String,
    fragment: String,
}

/// Holds at most one program built from a vertex/fragment source pair.
///
/// A new pair releases the current program before the replacement is built,
/// so a failed build leaves the slot empty. Repeating the last attempted pair
/// is skipped whether that attempt succeeded or not.
#[derive(Debug)]
pub struct ProgramSlot<P> {
    program: Option<P>,
    /// Key of the last install attempt
    key: Option<ProgramKey>,
    /// Number of programs successfully built
    generation: u64,
}

impl<P> Default for ProgramSlot<P> {
    fn default() -> Self {
        Self {
            program: None,
            key: None,
            generation: 0,
        }
    }
}

impl<P> ProgramSlot<P> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build and install a program for `vertex`/`fragment` with `build`.
    ///
    /// Returns `Ok(false)` without calling `build` when the sources equal the
    /// last attempt, `Ok(true)` when a new program was installed.
    pub fn install<F>(&mut self, vertex: &str, fragment: &str, build: F) -> Result<bool, RenderError>
    where
        F: FnOnce(&str, &str) -> Result<P, RenderError>,
    {
        if let Some(key) = &self.key
            && key.vertex == vertex
            && key.fragment == fragment
        {
            return Ok(false);
        }

        self.key = Some(ProgramKey {
            vertex: vertex.to_string(),
            fragment: fragment.to_string(),
        });

        // Release the superseded program before building its replacement
        if self.program.take().is_some() {
            log::debug!("Released preview program #{}", self.generation);
        }

        let program = build(vertex, fragment)?;
        self.program = Some(program);
        self.generation += 1;
        Ok(true)
    }

    pub fn program(&self) -> Option<&P> {
        self.program.as_ref()
    }

    pub fn has_program(&self) -> bool {
        self.program.is_some()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}
