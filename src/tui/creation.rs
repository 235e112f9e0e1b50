use crate::io::source::SourceError;
use crate::model::record::NewProject;
use crate::util::unicode::{next_grapheme_boundary, prev_grapheme_boundary};

/// Input fields of the creation dialog, in tab order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    Description,
    Tech,
}

impl Field {
    pub const ALL: [Field; 3] = [Field::Name, Field::Description, Field::Tech];

    pub fn label(self) -> &'static str {
        match self {
            Field::Name => "Name",
            Field::Description => "Description",
            Field::Tech => "Tech",
        }
    }

    fn next(self) -> Field {
        match self {
            Field::Name => Field::Description,
            Field::Description => Field::Tech,
            Field::Tech => Field::Name,
        }
    }

    fn prev(self) -> Field {
        match self {
            Field::Name => Field::Tech,
            Field::Description => Field::Name,
            Field::Tech => Field::Description,
        }
    }
}

/// What the dialog asks of the list view. Zero or more `Notify` always come
/// before the single `Closed`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkflowSignal {
    Notify(String),
    Closed,
}

/// State of the "new project" dialog while it is open
#[derive(Debug, Clone)]
pub struct CreationForm {
    pub name: String,
    pub description: String,
    pub tech: String,
    pub focus: Field,
    /// Byte offset of the cursor in the focused field
    pub cursor: usize,
    /// A create request is in flight; input is frozen
    pub submitting: bool,
    /// Validation or server error shown under the fields
    pub error: Option<String>,
}

impl Default for CreationForm {
    fn default() -> Self {
        CreationForm::new()
    }
}

impl CreationForm {
    pub fn new() -> Self {
        CreationForm {
            name: String::new(),
            description: String::new(),
            tech: String::new(),
            focus: Field::Name,
            cursor: 0,
            submitting: false,
            error: None,
        }
    }

    pub fn value(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Description => &self.description,
            Field::Tech => &self.tech,
        }
    }

    fn focused_mut(&mut self) -> &mut String {
        match self.focus {
            Field::Name => &mut self.name,
            Field::Description => &mut self.description,
            Field::Tech => &mut self.tech,
        }
    }

    pub fn insert_char(&mut self, c: char) {
        if self.submitting {
            return;
        }
        let cursor = self.cursor;
        self.focused_mut().insert(cursor, c);
        self.cursor += c.len_utf8();
        self.error = None;
    }

    pub fn backspace(&mut self) {
        if self.submitting {
            return;
        }
        let cursor = self.cursor;
        let field = self.focused_mut();
        if let Some(prev) = prev_grapheme_boundary(field, cursor) {
            field.replace_range(prev..cursor, "");
            self.cursor = prev;
        }
    }

    pub fn move_left(&mut self) {
        if let Some(prev) = prev_grapheme_boundary(self.value(self.focus), self.cursor) {
            self.cursor = prev;
        }
    }

    pub fn move_right(&mut self) {
        if let Some(next) = next_grapheme_boundary(self.value(self.focus), self.cursor) {
            self.cursor = next;
        }
    }

    pub fn focus_next(&mut self) {
        self.focus = self.focus.next();
        self.cursor = self.value(self.focus).len();
    }

    pub fn focus_prev(&mut self) {
        self.focus = self.focus.prev();
        self.cursor = self.value(self.focus).len();
    }

    /// Validate and freeze the form. Returns the payload to send, or `None`
    /// (with `error` set) when the input is unusable or a submit is pending.
    pub fn submit(&mut self) -> Option<NewProject> {
        if self.submitting {
            return None;
        }
        match NewProject::new(&self.name, &self.description, &self.tech) {
            Ok(project) => {
                self.error = None;
                self.submitting = true;
                Some(project)
            }
            Err(reason) => {
                self.error = Some(reason);
                None
            }
        }
    }

    /// The create request came back. Success closes the dialog; failure keeps
    /// it open so the input can be fixed.
    pub fn finish(&mut self, name: &str, result: Result<(), SourceError>) -> Vec<WorkflowSignal> {
        self.submitting = false;
        match result {
            Ok(()) => {
                tracing::info!(%name, "project created");
                vec![
                    WorkflowSignal::Notify(format!("Project {} created", name)),
                    WorkflowSignal::Closed,
                ]
            }
            Err(e) => {
                tracing::warn!(%name, "create failed: {}", e);
                self.error = Some(e.to_string());
                vec![WorkflowSignal::Notify(format!(
                    "Could not create project: {}",
                    e
                ))]
            }
        }
    }

    /// User dismissed the dialog.
    pub fn cancel(&self) -> Vec<WorkflowSignal> {
        vec![WorkflowSignal::Closed]
    }
}
