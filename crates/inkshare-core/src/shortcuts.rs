//! Keyboard shortcut registry.

use crate::input::KeyInput;
use crate::tools::ToolKind;

/// What a shortcut asks the editor to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorCommand {
    Undo,
    Redo,
    DeleteSelection,
    CancelGesture,
    SelectAll,
    SetTool(ToolKind),
}

/// A keyboard shortcut definition.
///
/// `ctrl` matches either Ctrl or Cmd.
#[derive(Debug, Clone)]
pub struct Shortcut {
    pub key: &'static str,
    pub ctrl: bool,
    pub shift: bool,
    pub command: EditorCommand,
    pub description: &'static str,
}

impl Shortcut {
    pub const fn new(
        key: &'static str,
        ctrl: bool,
        shift: bool,
        command: EditorCommand,
        description: &'static str,
    ) -> Self {
        Self {
            key,
            ctrl,
            shift,
            command,
            description,
        }
    }

    pub fn matches(&self, input: &KeyInput) -> bool {
        self.key.eq_ignore_ascii_case(&input.key)
            && self.ctrl == input.modifiers.command()
            && self.shift == input.modifiers.shift
    }

    /// Format the shortcut for display (e.g., "Ctrl+Shift+Z").
    pub fn format(&self) -> String {
        let mut parts = Vec::new();
        if self.ctrl {
            parts.push("Ctrl");
        }
        if self.shift {
            parts.push("Shift");
        }
        parts.push(self.key);
        parts.join("+")
    }
}

/// Registry of all keyboard shortcuts.
pub struct ShortcutRegistry;

impl ShortcutRegistry {
    pub fn all() -> Vec<Shortcut> {
        use EditorCommand::*;
        vec![
            Shortcut::new("Z", true, false, Undo, "Undo"),
            Shortcut::new("Z", true, true, Redo, "Redo"),
            Shortcut::new("Y", true, false, Redo, "Redo"),
            Shortcut::new("A", true, false, SelectAll, "Select all actions"),
            Shortcut::new("Delete", false, false, DeleteSelection, "Delete selection"),
            Shortcut::new("Backspace", false, false, DeleteSelection, "Delete selection"),
            Shortcut::new("Escape", false, false, CancelGesture, "Cancel current gesture"),
            Shortcut::new("V", false, false, SetTool(ToolKind::Select), "Select tool"),
            Shortcut::new("H", false, false, SetTool(ToolKind::Pan), "Pan tool"),
            Shortcut::new("P", false, false, SetTool(ToolKind::Draw), "Freehand tool"),
            Shortcut::new("L", false, false, SetTool(ToolKind::StraightLine), "Line tool"),
            Shortcut::new("A", false, false, SetTool(ToolKind::Arrow), "Arrow tool"),
            Shortcut::new("R", false, false, SetTool(ToolKind::Rectangle), "Rectangle tool"),
            Shortcut::new("C", false, false, SetTool(ToolKind::Circle), "Circle tool"),
            Shortcut::new("T", false, false, SetTool(ToolKind::Text), "Text tool"),
            Shortcut::new("I", false, false, SetTool(ToolKind::Image), "Image tool"),
            Shortcut::new("E", false, false, SetTool(ToolKind::Eraser), "Eraser tool"),
        ]
    }

    /// Help listing: one `"Ctrl+Z    Undo"` style line per shortcut.
    pub fn help_lines() -> Vec<String> {
        Self::all()
            .iter()
            .map(|s| format!("{:12} {}", s.format(), s.description))
            .collect()
    }

    /// Command bound to `input`, if any.
    pub fn lookup(input: &KeyInput) -> Option<EditorCommand> {
        Self::all()
            .into_iter()
            .find(|s| s.matches(input))
            .map(|s| s.command)
    }
}
