//! State of the "Add Application" form.

use crate::config::Application;

/// Which input of the form receives typed characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormField {
    #[default]
    Name,
    Command,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddForm {
    pub name: String,
    pub command: String,
    pub field: FormField,
}

impl AddForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn switch_field(&mut self) {
        self.field = match self.field {
            FormField::Name => FormField::Command,
            FormField::Command => FormField::Name,
        };
    }

    fn focused_text(&mut self) -> &mut String {
        match self.field {
            FormField::Name => &mut self.name,
            FormField::Command => &mut self.command,
        }
    }

    pub fn insert(&mut self, c: char) {
        self.focused_text().push(c);
    }

    pub fn delete(&mut self) {
        self.focused_text().pop();
    }

    /// The application described by the form, or `None` while either field
    /// is blank.
    pub fn to_application(&self) -> Option<Application> {
        let name = self.name.trim();
        let command = self.command.trim();
        if name.is_empty() || command.is_empty() {
            return None;
        }
        Some(Application::new(name, command))
    }
}
