//! Indented lines of generated source. Indenting a fragment links it under
//! a new parent instead of copying the text, so deeply nested blocks stay cheap.

use alloc::{rc::Rc, string::String, vec::Vec};

/// One line of output together with its nesting depth
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Fragment {
    /// Literal line without indentation
    Line(Rc<str>),
    /// Fragment nested one level deeper
    Indent(Rc<Fragment>),
}

impl Fragment {
    /// Literal line
    #[must_use]
    pub fn line(text: impl Into<Rc<str>>) -> Fragment {
        Fragment::Line(text.into())
    }

    /// Nest self one level deeper
    #[must_use]
    pub fn indent(self) -> Fragment {
        Fragment::Indent(Rc::new(self))
    }

    /// Nesting depth and text of this line
    #[must_use]
    pub fn depth_and_text(&self) -> (usize, &str) {
        let mut depth = 0;
        let mut fragment = self;
        loop {
            match fragment {
                Fragment::Line(text) => return (depth, text),
                Fragment::Indent(inner) => {
                    depth += 1;
                    fragment = inner;
                }
            }
        }
    }

    /// Append this line to out, each level of depth adds `indent_size` spaces.
    /// Empty lines are written without indentation.
    pub fn render_into(&self, out: &mut String, indent_size: usize) {
        let (depth, text) = self.depth_and_text();
        if !text.is_empty() {
            out.extend(core::iter::repeat(' ').take(depth * indent_size));
            out.push_str(text);
        }
        out.push('\n');
    }

    /// Render this line, including the trailing newline
    #[must_use]
    pub fn render(&self, indent_size: usize) -> String {
        let mut out = String::new();
        self.render_into(&mut out, indent_size);
        out
    }
}

/// Nest every fragment one level deeper
pub fn indent_all(fragments: Vec<Fragment>) -> impl Iterator<Item = Fragment> {
    fragments.into_iter().map(Fragment::indent)
}

/// Flatten fragments into text
#[must_use]
pub fn render_all(fragments: &[Fragment], indent_size: usize) -> String {
    let mut out = String::new();
    for fragment in fragments {
        fragment.render_into(&mut out, indent_size);
    }
    out
}

#[test]
fn render_nested() {
    let line = Fragment::line("return x");
    let nested = line.clone().indent().indent();
    assert_eq!(nested.render(2), "    return x\n");
    assert_eq!(nested.render(4), "        return x\n");
    assert_eq!(line.render(2), "return x\n");
    assert_eq!(nested.depth_and_text(), (2, "return x"));
}

#[test]
fn render_blank_and_many() {
    let lines = alloc::vec![
        Fragment::line("def f():"),
        Fragment::line("pass").indent(),
        Fragment::line("").indent(),
    ];
    assert_eq!(render_all(&lines, 2), "def f():\n  pass\n\n");
}

#[test]
fn render_is_deterministic() {
    let mut fragment = Fragment::line("x");
    for _ in 0..100 {
        fragment = fragment.indent();
    }
    assert_eq!(fragment.render(1), fragment.clone().render(1));
    assert_eq!(fragment.render(1).len(), 100 + 2);
}
