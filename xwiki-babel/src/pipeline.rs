//! Ordered rewrite pipelines
//!
//!     Every conversion in this crate is a [`Pipeline`]: a fixed, named sequence of passes over
//!     the whole document text. Passes are either global pattern substitutions or single
//!     left-to-right line scans with a small typed state. Later passes assume the shape produced
//!     by earlier ones, so the order of the pass list is part of each converter's contract.
//!
//!     Passes share a [`PassContext`]. It carries the protected span [`Stash`] (text that must
//!     not be touched by later passes, like code bodies) and, for rendering, the
//!     [`LocationHint`] used to resolve images. Protected spans are restored once, after the
//!     last pass.

use crate::common::protect::Stash;
use crate::formats::html::images::LocationHint;
use serde::Serialize;

/// Signature shared by all passes.
pub type PassFn = fn(&str, &mut PassContext<'_>) -> String;

/// Scratch state for a single pipeline run.
#[derive(Debug, Default)]
pub struct PassContext<'a> {
    pub stash: Stash,
    pub location: Option<&'a LocationHint>,
}

impl<'a> PassContext<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_location(location: Option<&'a LocationHint>) -> Self {
        Self {
            stash: Stash::default(),
            location,
        }
    }
}

/// A named rewrite step.
#[derive(Clone, Copy)]
pub struct Pass {
    pub name: &'static str,
    run: PassFn,
}

impl Pass {
    pub const fn new(name: &'static str, run: PassFn) -> Self {
        Self { name, run }
    }
}

impl std::fmt::Debug for Pass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pass").field("name", &self.name).finish()
    }
}

/// Text after one pass, as recorded by [`Pipeline::trace`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PassTrace {
    pub pass: String,
    pub output: String,
}

/// Name of the final step recorded by [`Pipeline::trace`].
pub const RESTORE_PASS: &str = "restore-protected";

#[derive(Debug, Clone, Copy)]
pub struct Pipeline {
    pub name: &'static str,
    passes: &'static [Pass],
}

impl Pipeline {
    pub const fn new(name: &'static str, passes: &'static [Pass]) -> Self {
        Self { name, passes }
    }

    pub fn pass_names(&self) -> Vec<&'static str> {
        self.passes.iter().map(|p| p.name).collect()
    }

    /// Run every pass in order and restore protected spans.
    pub fn run(&self, source: &str, ctx: &mut PassContext<'_>) -> String {
        let mut text = source.to_string();
        for pass in self.passes {
            log::trace!("{}: running pass '{}'", self.name, pass.name);
            text = (pass.run)(&text, ctx);
        }
        ctx.stash.restore(&text)
    }

    /// Same computation as [`Pipeline::run`], keeping the text after each pass.
    ///
    /// Intermediate outputs still contain protected span tokens; the last entry is the
    /// restored result.
    pub fn trace(&self, source: &str, ctx: &mut PassContext<'_>) -> Vec<PassTrace> {
        let mut traces = Vec::with_capacity(self.passes.len() + 1);
        let mut text = source.to_string();
        for pass in self.passes {
            text = (pass.run)(&text, ctx);
            traces.push(PassTrace {
                pass: pass.name.to_string(),
                output: text.clone(),
            });
        }
        traces.push(PassTrace {
            pass: RESTORE_PASS.to_string(),
            output: ctx.stash.restore(&text),
        });
        traces
    }
}
