//! Lexical environment: an immutable chain of frames
//!
//! Frames are never mutated after construction. A child holds an `Rc` to its
//! parent, so closures and nested calls share the same ancestry and a frame
//! lives exactly as long as something still points at it.

use super::builtins;
use super::Value;
use std::collections::HashMap;
use std::rc::Rc;

/// Shared reference to a frame
pub type FrameRef = Rc<Frame>;

/// One level of lexical scope
#[derive(Debug)]
pub struct Frame {
    /// Bindings introduced at this level
    bindings: HashMap<String, Value>,
    /// Enclosing scope; `None` only for the base frame
    parent: Option<FrameRef>,
}

impl Frame {
    /// The base environment: exactly the builtin registry, no parent
    pub fn base() -> FrameRef {
        let bindings = builtins::registry()
            .iter()
            .map(|(name, builtin)| (name.to_string(), Value::Builtin(*builtin)))
            .collect();
        Rc::new(Frame {
            bindings,
            parent: None,
        })
    }

    /// New frame on top of `parent`. The parent is shared, not copied.
    pub fn extend(parent: &FrameRef, bindings: HashMap<String, Value>) -> FrameRef {
        Rc::new(Frame {
            bindings,
            parent: Some(Rc::clone(parent)),
        })
    }

    /// Look up a name from this frame outward.
    ///
    /// Absence is not an error here; the evaluator decides what a missing
    /// name means.
    pub fn get(&self, name: &str) -> Option<Value> {
        let mut frame = self;
        loop {
            if let Some(value) = frame.bindings.get(name) {
                return Some(value.clone());
            }
            frame = frame.parent.as_deref()?;
        }
    }

    /// Check if a name is bound anywhere in the chain
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Every name visible from this frame, innermost first
    pub fn visible_names(&self) -> Vec<&str> {
        let mut names = Vec::new();
        let mut frame = Some(self);
        while let Some(f) = frame {
            names.extend(f.bindings.keys().map(String::as_str));
            frame = f.parent.as_deref();
        }
        names
    }

    pub fn parent(&self) -> Option<&FrameRef> {
        self.parent.as_ref()
    }

    /// Bindings of this frame only
    pub fn bindings(&self) -> &HashMap<String, Value> {
        &self.bindings
    }

    /// Number of frames above the base frame
    pub fn depth(&self) -> usize {
        let mut depth = 0;
        let mut frame = self;
        while let Some(parent) = frame.parent.as_deref() {
            depth += 1;
            frame = parent;
        }
        depth
    }
}
