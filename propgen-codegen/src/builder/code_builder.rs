//! Code builder utility for generating properly indented code.

/// One indent level; every generated language uses four spaces.
const INDENT: &str = "    ";

/// Fluent API for building code with proper indentation.
///
/// Emitters write their output incrementally, one event at a time, so a
/// builder usually renders a fragment that starts at a non-zero level.
///
/// # Example
///
/// ```
/// use propgen_codegen::builder::CodeBuilder;
///
/// let code = CodeBuilder::default()
///     .line("const IceInternal::Property IcePropsData[] =")
///     .block_with_close("{", "};", |b| {
///         b.line("IceInternal::Property(\"Ice.Trace.Network\", false, 0),")
///     })
///     .build();
///
/// assert_eq!(
///     code,
///     "const IceInternal::Property IcePropsData[] =\n{\n    IceInternal::Property(\"Ice.Trace.Network\", false, 0),\n};\n"
/// );
/// ```
#[derive(Debug, Clone, Default)]
pub struct CodeBuilder {
    indent_level: usize,
    buffer: String,
}

impl CodeBuilder {
    /// Start at `level` instead of column zero.
    pub fn at_level(mut self, level: usize) -> Self {
        self.indent_level = level;
        self
    }

    /// Add a line of code with current indentation.
    pub fn line(mut self, s: &str) -> Self {
        for _ in 0..self.indent_level {
            self.buffer.push_str(INDENT);
        }
        self.buffer.push_str(s);
        self.buffer.push('\n');
        self
    }

    /// Add a blank line (no indentation).
    pub fn blank(mut self) -> Self {
        self.buffer.push('\n');
        self
    }

    /// Add raw text without indentation or newline.
    pub fn raw(mut self, s: &str) -> Self {
        self.buffer.push_str(s);
        self
    }

    /// Increase indentation level.
    pub fn indent(mut self) -> Self {
        self.indent_level += 1;
        self
    }

    /// Decrease indentation level.
    pub fn dedent(mut self) -> Self {
        self.indent_level = self.indent_level.saturating_sub(1);
        self
    }

    /// Add a block with a closing line, indenting its body.
    pub fn block_with_close<F>(self, header: &str, close: &str, f: F) -> Self
    where
        F: FnOnce(Self) -> Self,
    {
        let builder = self.line(header).indent();
        f(builder).dedent().line(close)
    }

    /// Iterate and add content for each item.
    pub fn each<T, I, F>(mut self, items: I, f: F) -> Self
    where
        I: IntoIterator<Item = T>,
        F: Fn(Self, T) -> Self,
    {
        for item in items {
            self = f(self, item);
        }
        self
    }

    /// Consume the builder and return the generated code.
    pub fn build(self) -> String {
        self.buffer
    }
}
