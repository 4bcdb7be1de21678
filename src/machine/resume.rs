//! Resumption representation
//!
//! A resumption is a data-described "what runs next". It is the unit that
//! replaces native call-stack frames: `apply`, `if`, `while` and ordinary
//! sequencing all install resumptions instead of recursing, which is what
//! makes single-step pausing possible.
//!
//! Resumptions are immutable and chained by `Rc`. The while loop rebuilds
//! its three-node cycle from fresh nodes on every iteration, so chain depth
//! stays constant no matter how long the loop runs.

use serde::{Deserialize, Serialize};
use std::rc::Rc;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "t")]
pub enum Resumption {
    /// Resume scanning `source` at byte offset `pos`, then trigger `next`.
    Advance {
        source: Rc<str>,
        pos: usize,
        next: Rc<Resumption>,
    },
    /// Begin scanning `code` from offset 0, then trigger `next`. Entering
    /// updates the active-function view.
    Enter { code: Rc<str>, next: Rc<Resumption> },
    /// The turn point of a while loop: pop a boolean; if true, run `body`
    /// then `cond` then this test again; if false, trigger `after`.
    LoopTest {
        cond: Rc<str>,
        body: Rc<str>,
        after: Rc<Resumption>,
    },
    /// Normal termination of the outermost program.
    Done,
}

impl Resumption {
    pub fn advance(source: Rc<str>, pos: usize, next: Rc<Resumption>) -> Rc<Resumption> {
        Rc::new(Resumption::Advance { source, pos, next })
    }

    pub fn enter(code: Rc<str>, next: Rc<Resumption>) -> Rc<Resumption> {
        Rc::new(Resumption::Enter { code, next })
    }

    pub fn loop_test(cond: Rc<str>, body: Rc<str>, after: Rc<Resumption>) -> Rc<Resumption> {
        Rc::new(Resumption::LoopTest { cond, body, after })
    }

    pub fn done() -> Rc<Resumption> {
        Rc::new(Resumption::Done)
    }

    /// Depth of the chain reachable through `next`/`after` links. Used to
    /// check that loops do not grow the chain per iteration.
    pub fn depth(&self) -> usize {
        match self {
            Resumption::Advance { next, .. } => 1 + next.depth(),
            Resumption::Enter { next, .. } => 1 + next.depth(),
            Resumption::LoopTest { after, .. } => 1 + after.depth(),
            Resumption::Done => 1,
        }
    }
}
