//! Project records read from lookup tables

use std::fmt;

/// Position of a slide in its presentation (1-based)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SlideId(pub u32);

impl fmt::Display for SlideId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "slide {}", self.0)
    }
}

/// Department key: the first two characters of a project code
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Department(String);

impl Department {
    /// Number of leading code characters that form the department
    pub const KEY_LEN: usize = 2;

    /// Derive the department from a project code
    ///
    /// Returns `None` when the code is shorter than two characters.
    pub fn from_code(code: &str) -> Option<Self> {
        let key: String = code.chars().take(Self::KEY_LEN).collect();
        if key.chars().count() < Self::KEY_LEN {
            return None;
        }
        Some(Self(key))
    }

    /// The department key
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Name given to the group shape that collects this department's markers
    pub fn group_name(&self) -> String {
        format!("{}_group", self.0)
    }
}

impl fmt::Display for Department {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Kind of portfolio item listed in the "PROJECT / IDEA / TASK" column
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum Category {
    /// Project or initiative
    Initiative,
    /// Idea
    Idea,
    /// Task
    Task,
    /// Anything else, kept verbatim
    Other(String),
    /// Column absent or cell empty
    #[default]
    Unspecified,
}

impl Category {
    /// Interpret the text of a category cell (case-insensitive)
    pub fn parse(text: &str) -> Self {
        let text = text.trim();
        match text.to_ascii_lowercase().as_str() {
            "" => Category::Unspecified,
            "project" | "initiative" => Category::Initiative,
            "idea" => Category::Idea,
            "task" => Category::Task,
            _ => Category::Other(text.to_string()),
        }
    }
}

/// One row of a lookup table
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectRecord {
    /// Project code ("AFKORTING"); its first two characters name the department
    pub code: String,
    /// Raw grid reference text ("SPF")
    pub grid_ref: String,
    /// Project title ("TITEL")
    pub title: String,
    /// Item kind ("PROJECT / IDEA / TASK")
    pub category: Category,
    /// Slide the lookup table was read from
    pub origin: SlideId,
    department: Department,
}

impl ProjectRecord {
    /// Build a record, or `None` if the code cannot name a department
    pub fn new(
        code: impl Into<String>,
        grid_ref: impl Into<String>,
        title: impl Into<String>,
        category: Category,
        origin: SlideId,
    ) -> Option<Self> {
        let code = code.into();
        let department = Department::from_code(&code)?;
        Some(Self {
            code,
            grid_ref: grid_ref.into(),
            title: title.into(),
            category,
            origin,
            department,
        })
    }

    /// The record's department
    pub fn department(&self) -> &Department {
        &self.department
    }

    /// Hover text shown on the marker link
    pub fn tooltip(&self) -> String {
        format!("{} : {}", self.code, self.title)
    }
}
