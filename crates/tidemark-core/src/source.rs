//! Parsed source files handed to rules.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// One line of a [`SourceUnit`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    /// Line number (1-indexed).
    pub index: usize,
    /// Line text without its terminator.
    pub text: String,
    /// Byte offset of the first character of the line.
    pub offset: usize,
}

/// Kind of a node in the structure tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeclarationKind {
    /// Root node spanning the whole file.
    File,
    /// `protocol Name`
    Protocol,
    /// `class Name`
    Class,
    /// `struct Name`
    Struct,
    /// `enum Name`
    Enum,
    /// `extension Name`
    Extension,
    /// `func name`
    Function,
    /// A call expression located at its opening parenthesis; children are its
    /// [`DeclarationKind::Argument`]s and any nodes nested in the callee or
    /// trailing closures.
    Call,
    /// One parenthesised argument of a call.
    Argument,
    /// Anything the syntax service does not classify.
    Other,
}

impl DeclarationKind {
    /// Returns true for nominal type declarations (including protocols).
    #[must_use]
    pub fn is_type(self) -> bool {
        matches!(self, Self::Protocol | Self::Class | Self::Struct | Self::Enum)
    }
}

/// A node of the structure tree produced by a syntax service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeclarationNode {
    /// What this node represents.
    pub kind: DeclarationKind,
    /// Declared or called name, if any.
    pub name: Option<String>,
    /// Byte offset of the node in the file contents.
    pub offset: usize,
    /// Length of the node in bytes.
    pub length: usize,
    /// Nested nodes in source order.
    pub children: Vec<DeclarationNode>,
}

impl DeclarationNode {
    /// Creates an unnamed node without children.
    #[must_use]
    pub fn new(kind: DeclarationKind, offset: usize, length: usize) -> Self {
        Self {
            kind,
            name: None,
            offset,
            length,
            children: Vec::new(),
        }
    }

    /// Creates a file-scope root node.
    #[must_use]
    pub fn file(length: usize, children: Vec<DeclarationNode>) -> Self {
        Self::new(DeclarationKind::File, 0, length).with_children(children)
    }

    /// Sets the node name.
    #[must_use]
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Replaces the node's children.
    #[must_use]
    pub fn with_children(mut self, children: Vec<DeclarationNode>) -> Self {
        self.children = children;
        self
    }

    /// Iterates over this node and all of its descendants, depth first, in source order.
    #[must_use]
    pub fn walk(&self) -> Walk<'_> {
        Walk { stack: vec![self] }
    }
}

/// Depth-first iterator returned by [`DeclarationNode::walk`].
pub struct Walk<'a> {
    stack: Vec<&'a DeclarationNode>,
}

impl<'a> Iterator for Walk<'a> {
    type Item = &'a DeclarationNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}

/// Immutable parsed representation of one source file.
#[derive(Debug, Clone)]
pub struct SourceUnit {
    path: Option<PathBuf>,
    contents: String,
    lines: Vec<Line>,
    structure: DeclarationNode,
}

impl SourceUnit {
    /// Creates a source unit, deriving the line table from `contents`.
    #[must_use]
    pub fn new(path: Option<PathBuf>, contents: String, structure: DeclarationNode) -> Self {
        let lines = split_lines(&contents);
        Self {
            path,
            contents,
            lines,
            structure,
        }
    }

    /// Creates a unit with an empty structure tree, for purely lexical use.
    #[must_use]
    pub fn from_contents(contents: impl Into<String>) -> Self {
        let contents = contents.into();
        let structure = DeclarationNode::file(contents.len(), Vec::new());
        Self::new(None, contents, structure)
    }

    /// Path of the file, absent for in-memory content.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Raw file contents.
    #[must_use]
    pub fn contents(&self) -> &str {
        &self.contents
    }

    /// Line table (1-indexed, terminators stripped).
    #[must_use]
    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    /// Root of the structure tree.
    #[must_use]
    pub fn structure(&self) -> &DeclarationNode {
        &self.structure
    }

    /// Owned copy of the path for building violation locations.
    #[must_use]
    pub fn location_path(&self) -> Option<PathBuf> {
        self.path.clone()
    }

    /// Converts a byte offset into a 1-indexed `(line, character)` pair.
    ///
    /// Characters are counted in `char`s. Returns `None` when the offset is
    /// out of range or not on a character boundary.
    #[must_use]
    pub fn line_and_character(&self, offset: usize) -> Option<(usize, usize)> {
        if offset > self.contents.len() {
            return None;
        }
        let after = self.lines.partition_point(|line| line.offset <= offset);
        let line = self.lines.get(after.checked_sub(1)?)?;
        let prefix = self.contents.get(line.offset..offset)?;
        Some((line.index, prefix.chars().count() + 1))
    }
}

fn split_lines(contents: &str) -> Vec<Line> {
    let mut lines = Vec::new();
    let mut offset = 0;
    for (i, raw) in contents.split_inclusive('\n').enumerate() {
        let text = match raw.strip_suffix('\n') {
            Some(text) => text.strip_suffix('\r').unwrap_or(text),
            None => raw,
        };
        lines.push(Line {
            index: i + 1,
            text: text.to_string(),
            offset,
        });
        offset += raw.len();
    }
    lines
}
