//! Line-based diff rendering.
//!
//! The comparison contract only cares about two things: whether the diff is
//! empty, and the literal text shown to the user when it is not. The diff
//! algorithm itself is an implementation detail kept behind this module.

use difference::{Changeset, Difference};

/// Renders a line diff from `expected` to `actual`, or `None` when the two
/// are identical. Added lines are prefixed `+`, removed lines `-`, unchanged
/// lines a single space.
pub fn render(expected: &str, actual: &str) -> Option<String> {
    if expected == actual {
        return None;
    }

    let changeset = Changeset::new(expected, actual, "\n");
    let mut rendered = String::new();
    for diff in &changeset.diffs {
        match diff {
            Difference::Same(block) => push_block(&mut rendered, ' ', block),
            Difference::Add(block) => push_block(&mut rendered, '+', block),
            Difference::Rem(block) => push_block(&mut rendered, '-', block),
        }
    }
    Some(rendered)
}

fn push_block(out: &mut String, prefix: char, block: &str) {
    let mut lines: Vec<&str> = block.split('\n').collect();
    // A block ending at the input's trailing newline splits into a final
    // empty segment; rendering it would produce a dangling prefix-only line.
    if lines.last() == Some(&"") {
        lines.pop();
    }
    for line in lines {
        out.push(prefix);
        out.push_str(line);
        out.push('\n');
    }
}
