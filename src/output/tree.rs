//! Indented process hierarchy
//!
//! Pre-order walk: a node is written before any of its descendants, children
//! in collection order. The root has no connector; every deeper level adds
//! exactly four columns of prefix (`├── `, `└── `, `│   ` or blanks), so
//! the prefix width of a line is `4 * depth`.
//!
//! The walk keeps its own stack instead of recursing, so a very deep
//! hierarchy cannot overflow the call stack.

use colored::Color;

use super::emitter::Emitter;
use super::fields::{name_of, text_or_unknown};
use crate::model::ProcessTreeNode;

const BRANCH: &str = "├── ";
const LAST_BRANCH: &str = "└── ";
const PIPE: &str = "│   ";
const BLANK: &str = "    ";

struct Frame<'a> {
    node: &'a ProcessTreeNode,
    /// Continuation columns inherited from ancestors
    prefix: String,
    last: bool,
    depth: usize,
}

/// Render the subtree rooted at `root`, one line per node
pub(crate) fn render(root: &ProcessTreeNode, emitter: &Emitter) -> String {
    let mut out = String::new();
    let mut stack = vec![Frame {
        node: root,
        prefix: String::new(),
        last: true,
        depth: 0,
    }];

    while let Some(frame) = stack.pop() {
        if frame.depth > 0 {
            out.push_str(&frame.prefix);
            out.push_str(if frame.last { LAST_BRANCH } else { BRANCH });
        }
        out.push_str(&label(frame.node, emitter));
        out.push('\n');

        let child_prefix = if frame.depth == 0 {
            String::new()
        } else {
            format!("{}{}", frame.prefix, if frame.last { BLANK } else { PIPE })
        };

        // Reversed so the first child is popped first
        let count = frame.node.children.len();
        for (i, child) in frame.node.children.iter().enumerate().rev() {
            stack.push(Frame {
                node: child,
                prefix: child_prefix.clone(),
                last: i + 1 == count,
                depth: frame.depth + 1,
            });
        }
    }
    out
}

fn label(node: &ProcessTreeNode, emitter: &Emitter) -> String {
    let process = &node.process;
    let name = emitter.paint(&name_of(process), Color::Green);
    let user = text_or_unknown(process.user.as_deref());
    format!("{name} (PID {}) [{user}]", process.pid)
}
